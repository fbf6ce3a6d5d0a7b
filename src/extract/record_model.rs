use serde::{Deserialize, Serialize};

// ============================================================================
// Records produced by the extractors
// ============================================================================

/// One human-readable test case scraped from generator output.
///
/// Every field may be empty: the generator's formatting is not guaranteed, so a
/// missing label degrades to an empty string instead of rejecting the record.
/// Serde names match the tabular column headers used by the exporters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestCaseRecord {
    /// Free text taken from the first line after the "Test Case ID" label
    #[serde(rename = "Test Case ID")]
    pub id: String,

    #[serde(rename = "Test Scenario")]
    pub scenario: String,

    /// Possibly multi-line
    #[serde(rename = "Steps to Execute")]
    pub steps: String,

    /// Possibly multi-line
    #[serde(rename = "Expected Result")]
    pub expected: String,
}

/// A generated automation script together with the test case it claims to cover.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptRecord {
    #[serde(rename = "Test Case ID")]
    pub id: String,

    #[serde(rename = "Test Scenario")]
    pub scenario: String,

    /// Source text exactly as the generator wrote it, outer whitespace trimmed
    #[serde(rename = "Python Selenium Code")]
    pub code: String,
}

/// Column headers of a test case table, in field order.
pub const TEST_CASE_COLUMNS: [&str; 4] = [
    "Test Case ID",
    "Test Scenario",
    "Steps to Execute",
    "Expected Result",
];

/// Column headers of a script table, in field order.
pub const SCRIPT_COLUMNS: [&str; 3] = ["Test Case ID", "Test Scenario", "Python Selenium Code"];
