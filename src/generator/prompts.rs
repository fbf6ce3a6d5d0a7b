use serde::{Deserialize, Serialize};

use crate::collector::element_set::ElementSet;
use crate::error::AppError;
use crate::extract::identity::KeyedTestCase;

/// How many test cases to ask the generator for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PromptConfig {
    #[serde(default = "default_min_cases")]
    pub min_cases: usize,

    #[serde(default = "default_max_cases")]
    pub max_cases: usize,
}

impl Default for PromptConfig {
    fn default() -> Self {
        Self {
            min_cases: default_min_cases(),
            max_cases: default_max_cases(),
        }
    }
}

fn default_min_cases() -> usize { 3 }
fn default_max_cases() -> usize { 5 }

/// Prompt asking for test cases covering `elements`, in the labeled layout
/// that `extract_test_cases` reads.
pub fn build_test_case_prompt(elements: &ElementSet, config: &PromptConfig) -> Result<String, AppError> {
    let elements_json = serde_json::to_string(elements).map_err(|e| AppError::JsonSerialize {
        context: "element set for test case prompt".into(),
        source: e,
    })?;

    let max_cases = config.max_cases.max(config.min_cases);

    Ok(format!(
        r#"Generate {min} to {max} test cases for a webpage containing these elements:
{elements}

Write every test case in exactly this format, one after another:

**Test Case ID:** <short identifier, e.g. TC1>
**Test Scenario:** <one-line description>
**Steps to Execute:**
<numbered steps, one per line>
**Expected Result:**
<expected outcome>
"#,
        min = config.min_cases,
        max = max_cases,
        elements = elements_json,
    ))
}

/// Test case as shown to the generator: the crate's key stands in for the id.
#[derive(Serialize)]
struct PromptCase<'a> {
    #[serde(rename = "Test Case ID")]
    id: &'a str,
    #[serde(rename = "Test Scenario")]
    scenario: &'a str,
    #[serde(rename = "Steps to Execute")]
    steps: &'a str,
    #[serde(rename = "Expected Result")]
    expected: &'a str,
}

/// Prompt asking for one Selenium script per keyed test case, in the fragment
/// layout that `extract_script_cases` reads.
pub fn build_script_prompt(cases: &[KeyedTestCase]) -> Result<String, AppError> {
    let prompt_cases: Vec<PromptCase<'_>> = cases
        .iter()
        .map(|c| PromptCase {
            id: &c.key,
            scenario: &c.record.scenario,
            steps: &c.record.steps,
            expected: &c.record.expected,
        })
        .collect();

    let cases_json = serde_json::to_string_pretty(&prompt_cases).map_err(|e| AppError::JsonSerialize {
        context: "test cases for script prompt".into(),
        source: e,
    })?;

    Ok(format!(
        r#"Generate Python Selenium scripts for these test cases:
{cases}

For each test case output one block in exactly this shape, copying its
Test Case ID unchanged and keeping the scenario on a single line:

{{"Test Case ID": "<id>", "Test Scenario": "<scenario>", "Python Selenium Code": """
<complete Python Selenium script>
"""}}
"#,
        cases = cases_json,
    ))
}
