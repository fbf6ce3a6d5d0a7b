use page_testgen::extract::record_model::TestCaseRecord;
use page_testgen::extract_test_cases;

// ============================================================================
// Helper builders
// ============================================================================

fn record(id: &str, scenario: &str, steps: &str, expected: &str) -> TestCaseRecord {
    TestCaseRecord {
        id: id.into(),
        scenario: scenario.into(),
        steps: steps.into(),
        expected: expected.into(),
    }
}

const TWO_CASES: &str = "Here are some test cases for the page:

**Test Case ID:** TC_001
**Test Scenario:** Verify the login button opens the login form
**Steps to Execute:**
1. Open the page
2. Click \"Login\"
**Expected Result:**
The login form is displayed.

**Test Case ID:** TC_002
**Test Scenario:** Verify search submits the query
**Steps to Execute:**
1. Type \"shoes\" into the q input
2. Press Enter
**Expected Result:**
The results page lists matching products.
";

// ============================================================================
// 1. No delimiter
// ============================================================================

#[test]
fn no_delimiter_yields_no_records() {
    assert!(extract_test_cases("").is_empty());
    assert!(extract_test_cases("I could not generate test cases for this page.").is_empty());
    assert!(extract_test_cases("**Test Scenario:** orphan\n**Expected Result:** nothing").is_empty());
}

// ============================================================================
// 2. Single well-formed record
// ============================================================================

#[test]
fn single_record_all_fields() {
    let text = "**Test Case ID:** TC1\n**Test Scenario:** Login works\n**Steps to Execute:**\nClick login\n**Expected Result:**\nUser is logged in";
    let records = extract_test_cases(text);
    assert_eq!(
        records,
        vec![record("TC1", "Login works", "Click login", "User is logged in")]
    );
}

#[test]
fn fields_are_trimmed_including_crlf() {
    let text = "**Test Case ID:**  TC1  \r\n**Test Scenario:**  Login  \r\n**Steps to Execute:**\r\n  Click  \r\n**Expected Result:**\r\n  Done  \r\n";
    let records = extract_test_cases(text);
    assert_eq!(records, vec![record("TC1", "Login", "Click", "Done")]);
}

// ============================================================================
// 3. Multiple records, order and multi-line fields
// ============================================================================

#[test]
fn multiple_records_in_order_with_preamble_discarded() {
    let records = extract_test_cases(TWO_CASES);
    assert_eq!(records.len(), 2);

    assert_eq!(records[0].id, "TC_001");
    assert_eq!(
        records[0].scenario,
        "Verify the login button opens the login form"
    );
    assert_eq!(records[0].steps, "1. Open the page\n2. Click \"Login\"");
    assert_eq!(records[0].expected, "The login form is displayed.");

    assert_eq!(records[1].id, "TC_002");
    assert_eq!(records[1].steps, "1. Type \"shoes\" into the q input\n2. Press Enter");
    assert_eq!(
        records[1].expected,
        "The results page lists matching products."
    );
}

#[test]
fn order_follows_text_not_ids() {
    let text = "**Test Case ID:** TC3\n**Test Case ID:** TC1\n**Test Case ID:** TC2\n";
    let ids: Vec<String> = extract_test_cases(text).into_iter().map(|r| r.id).collect();
    assert_eq!(ids, vec!["TC3", "TC1", "TC2"]);
}

#[test]
fn duplicate_ids_are_kept() {
    let text = "**Test Case ID:** TC1\n**Test Scenario:** a\n**Test Case ID:** TC1\n**Test Scenario:** b\n";
    let records = extract_test_cases(text);
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].scenario, "a");
    assert_eq!(records[1].scenario, "b");
}

// ============================================================================
// 4. Missing labels degrade field by field
// ============================================================================

#[test]
fn missing_expected_result_keeps_siblings() {
    let text = "**Test Case ID:** TC1\n**Test Scenario:** Login works\n**Steps to Execute:**\nClick login\n";
    let records = extract_test_cases(text);
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].id, "TC1");
    assert_eq!(records[0].scenario, "Login works");
    assert_eq!(records[0].steps, "Click login");
    assert_eq!(records[0].expected, "");
}

#[test]
fn missing_scenario_is_empty() {
    let text = "**Test Case ID:** TC1\n**Steps to Execute:**\nClick login\n**Expected Result:**\nLogged in";
    let records = extract_test_cases(text);
    assert_eq!(records, vec![record("TC1", "", "Click login", "Logged in")]);
}

#[test]
fn missing_steps_label_is_empty() {
    let text = "**Test Case ID:** TC1\n**Test Scenario:** Login\n**Expected Result:**\nLogged in";
    let records = extract_test_cases(text);
    assert_eq!(records, vec![record("TC1", "Login", "", "Logged in")]);
}

#[test]
fn scenario_is_single_line_only() {
    let text = "**Test Case ID:** TC1\n**Test Scenario:**\nOn the next line\n";
    let records = extract_test_cases(text);
    assert_eq!(records[0].scenario, "");
}

#[test]
fn empty_segment_still_yields_record() {
    let records = extract_test_cases("intro\n**Test Case ID:**   \n\n");
    assert_eq!(records, vec![TestCaseRecord::default()]);
}

#[test]
fn garbage_first_line_becomes_id() {
    let text = "**Test Case ID:**\n**Test Scenario:** Login\n";
    let records = extract_test_cases(text);
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].id, "**Test Scenario:** Login");
    assert_eq!(records[0].scenario, "Login");
}

#[test]
fn expected_runs_to_end_of_segment() {
    let text = "**Test Case ID:** TC1\n**Expected Result:**\nLine one\nLine two\n\n---\n";
    let records = extract_test_cases(text);
    assert_eq!(records[0].expected, "Line one\nLine two\n\n---");
}

// ============================================================================
// 5. Label formatting drift
// ============================================================================

#[test]
fn colon_outside_bold_is_accepted() {
    let text = "**Test Case ID**: TC1\n**Test Scenario**: Login\n**Steps to Execute**:\nClick\n**Expected Result**:\nDone";
    let records = extract_test_cases(text);
    assert_eq!(records, vec![record("TC1", "Login", "Click", "Done")]);
}

#[test]
fn plain_labels_are_accepted() {
    let text = "Test Case ID: TC1\nTest Scenario: Login\nSteps to Execute:\nClick\nExpected Result:\nDone";
    let records = extract_test_cases(text);
    assert_eq!(records, vec![record("TC1", "Login", "Click", "Done")]);
}

#[test]
fn labels_are_case_insensitive() {
    let text = "**test case id:** tc1\n**TEST SCENARIO:** Login\n**steps to execute:**\nClick\n**expected result:**\nDone";
    let records = extract_test_cases(text);
    assert_eq!(records, vec![record("tc1", "Login", "Click", "Done")]);
}

#[test]
fn bulleted_labels_are_accepted() {
    let text = "- **Test Case ID:** TC1\n- **Test Scenario:** Login\n* **Steps to Execute:**\nClick\n* **Expected Result:**\nDone";
    let records = extract_test_cases(text);
    assert_eq!(records, vec![record("TC1", "Login", "Click", "Done")]);
}

// ============================================================================
// 6. Label words inside prose
// ============================================================================

#[test]
fn label_words_mid_line_do_not_start_a_record() {
    let text = "**Test Case ID:** TC1\n**Test Scenario:** Search by id\n**Steps to Execute:**\n1. Type the Test Case ID: 42 into search\n2. Press Enter\n**Expected Result:**\nFound";
    let records = extract_test_cases(text);
    assert_eq!(
        records,
        vec![record(
            "TC1",
            "Search by id",
            "1. Type the Test Case ID: 42 into search\n2. Press Enter",
            "Found"
        )]
    );
}

#[test]
fn label_words_mid_line_do_not_cut_steps() {
    let text = "**Test Case ID:** TC1\n**Steps to Execute:**\n1. Check the Expected Result: column\n**Expected Result:**\nColumn is visible";
    let records = extract_test_cases(text);
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].steps, "1. Check the Expected Result: column");
    assert_eq!(records[0].expected, "Column is visible");
}
