use std::sync::LazyLock;

use regex::Regex;

use super::record_model::TestCaseRecord;

// ============================================================================
// Field labels
// ============================================================================

pub const TEST_CASE_ID_LABEL: &str = "Test Case ID";
pub const SCENARIO_LABEL: &str = "Test Scenario";
pub const STEPS_LABEL: &str = "Steps to Execute";
pub const EXPECTED_LABEL: &str = "Expected Result";

/// Build the pattern for a labeled field.
///
/// A label starts a line, optionally behind a list bullet. It is accepted with
/// or without markdown bold and with the colon either inside or outside the
/// bold markers: `**Test Scenario:**`, `- **Test Scenario**:` and
/// `Test Scenario:`. The same words in the middle of a line are plain text.
/// Patterns using it need the `m` flag.
fn label_pattern(name: &str) -> String {
    format!(
        r"^[ \t]*(?:[-*][ \t]+)?\*{{0,2}}{}\*{{0,2}}[ \t]*:[ \t]*\*{{0,2}}",
        regex::escape(name)
    )
}

static SEGMENT_DELIMITER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!("(?im){}", label_pattern(TEST_CASE_ID_LABEL)))
        .expect("test case id label regex")
});

static SCENARIO_FIELD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?im){}([^\r\n]*)",
        label_pattern(SCENARIO_LABEL)
    ))
    .expect("scenario field regex")
});

static STEPS_FIELD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?ims){}(.*?)(?:{}|\z)",
        label_pattern(STEPS_LABEL),
        label_pattern(EXPECTED_LABEL)
    ))
    .expect("steps field regex")
});

static EXPECTED_FIELD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"(?ims){}(.*)", label_pattern(EXPECTED_LABEL)))
        .expect("expected result field regex")
});

// ============================================================================
// Extraction
// ============================================================================

/// Parse generator output into test case records.
///
/// The text is cut into segments at every line opening with a "Test Case ID"
/// label; whatever precedes the first label is discarded. Each segment yields
/// exactly one
/// record, in the order the segments appear. Fields are scraped independently
/// and default to an empty string when their label is missing, so one absent
/// label never blanks its siblings: without an "Expected Result" label the
/// steps run to the end of the segment. Text without any label yields no
/// records.
pub fn extract_test_cases(text: &str) -> Vec<TestCaseRecord> {
    let records: Vec<TestCaseRecord> = SEGMENT_DELIMITER
        .split(text)
        .skip(1)
        .map(parse_segment)
        .collect();

    tracing::debug!(records = records.len(), "extracted test case records");
    records
}

/// Scrape the four fields of one segment.
fn parse_segment(segment: &str) -> TestCaseRecord {
    let id = segment
        .trim()
        .lines()
        .next()
        .unwrap_or_default()
        .trim()
        .to_string();

    TestCaseRecord {
        id,
        scenario: capture_trimmed(&SCENARIO_FIELD, segment),
        steps: capture_trimmed(&STEPS_FIELD, segment),
        expected: capture_trimmed(&EXPECTED_FIELD, segment),
    }
}

/// First capture group of `re` in `haystack`, trimmed, or empty when absent.
fn capture_trimmed(re: &Regex, haystack: &str) -> String {
    re.captures(haystack)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
        .unwrap_or_default()
}
