use page_testgen::extract::identity::{
    ScriptLink, assign_case_keys, case_key, correlate_scripts, keyed_script_rows,
    record_fingerprint,
};
use page_testgen::extract::record_model::{ScriptRecord, TestCaseRecord};

// ============================================================================
// Helper builders
// ============================================================================

fn case(id: &str, scenario: &str) -> TestCaseRecord {
    TestCaseRecord {
        id: id.into(),
        scenario: scenario.into(),
        steps: "1. Open page".into(),
        expected: "Page loads".into(),
    }
}

fn script(id: &str) -> ScriptRecord {
    ScriptRecord {
        id: id.into(),
        scenario: "s".into(),
        code: "pass".into(),
    }
}

// ============================================================================
// Key assignment
// ============================================================================

#[test]
fn keys_are_positional_and_zero_padded() {
    assert_eq!(case_key(0), "TC-001");
    assert_eq!(case_key(41), "TC-042");
    assert_eq!(case_key(999), "TC-1000");
}

#[test]
fn assign_keys_ignores_generator_ids() {
    let keyed = assign_case_keys(&[case("TC9", "a"), case("TC9", "b"), case("", "c")]);
    let keys: Vec<&str> = keyed.iter().map(|k| k.key.as_str()).collect();
    assert_eq!(keys, vec!["TC-001", "TC-002", "TC-003"]);
    assert_eq!(keyed[1].record.scenario, "b");
}

#[test]
fn assign_keys_on_empty_input() {
    assert!(assign_case_keys(&[]).is_empty());
}

// ============================================================================
// Fingerprints
// ============================================================================

#[test]
fn fingerprint_is_sha1_hex() {
    let fp = record_fingerprint(&case("TC1", "Login"));
    assert_eq!(fp.len(), 40);
    assert!(fp.chars().all(|c| c.is_ascii_hexdigit()));
}

#[test]
fn fingerprint_is_stable_and_content_sensitive() {
    assert_eq!(
        record_fingerprint(&case("TC1", "Login")),
        record_fingerprint(&case("TC1", "Login"))
    );
    assert_ne!(
        record_fingerprint(&case("TC1", "Login")),
        record_fingerprint(&case("TC1", "Logout"))
    );
}

#[test]
fn fingerprint_distinguishes_field_boundaries() {
    let a = TestCaseRecord {
        id: "ab".into(),
        ..Default::default()
    };
    let b = TestCaseRecord {
        id: "a".into(),
        scenario: "b".into(),
        ..Default::default()
    };
    assert_ne!(record_fingerprint(&a), record_fingerprint(&b));
}

// ============================================================================
// Correlation
// ============================================================================

#[test]
fn scripts_link_to_echoed_keys() {
    let keyed = assign_case_keys(&[case("x", "a"), case("y", "b")]);
    let links = correlate_scripts(&keyed, &[script("TC-002"), script("TC-001")]);
    assert_eq!(
        links,
        vec![
            ScriptLink {
                script_index: 0,
                case_key: Some("TC-002".into())
            },
            ScriptLink {
                script_index: 1,
                case_key: Some("TC-001".into())
            },
        ]
    );
}

#[test]
fn matching_ignores_case_and_whitespace() {
    let keyed = assign_case_keys(&[case("x", "a")]);
    let links = correlate_scripts(&keyed, &[script("  tc-001 ")]);
    assert_eq!(links[0].case_key.as_deref(), Some("TC-001"));
}

#[test]
fn generator_ids_are_not_trusted() {
    let keyed = assign_case_keys(&[case("TC1", "a")]);
    let links = correlate_scripts(&keyed, &[script("TC1"), script("TC-007")]);
    assert_eq!(links.len(), 2);
    assert!(links.iter().all(|l| l.case_key.is_none()));
}

// ============================================================================
// Table rows
// ============================================================================

#[test]
fn table_row_replaces_generator_id_with_key() {
    let keyed = assign_case_keys(&[case("TC1", "Login")]);
    let row = keyed[0].table_row();
    assert_eq!(row.id, "TC-001");
    assert_eq!(row.scenario, "Login");
    assert_eq!(row.steps, "1. Open page");
    assert_eq!(keyed[0].record.id, "TC1");
}

#[test]
fn linked_scripts_take_the_case_key() {
    let scripts = vec![script("tc-002"), script("TC7")];
    let links = vec![
        ScriptLink {
            script_index: 0,
            case_key: Some("TC-002".into()),
        },
        ScriptLink {
            script_index: 1,
            case_key: None,
        },
    ];
    let ids: Vec<String> = keyed_script_rows(&scripts, &links)
        .into_iter()
        .map(|s| s.id)
        .collect();
    assert_eq!(ids, vec!["TC-002", "TC7"]);
}
