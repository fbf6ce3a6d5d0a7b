use std::sync::LazyLock;

use regex::Regex;

use super::record_model::ScriptRecord;

/// Opening and closing delimiter of the code block.
const CODE_DELIMITER: &str = "\"\"\"";

/// Everything of a fragment up to and including the opening code delimiter.
///
/// Field order and quoting are fixed. The id and scenario are double-quoted,
/// stay on one line and end at the quote that precedes the next field label,
/// so quotes inside the text are kept.
static FRAGMENT_HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r#"\{\s*"Test Case ID"\s*:\s*"([^\r\n]*?)"\s*,"#,
        r#"\s*"Test Scenario"\s*:\s*"([^\r\n]*?)"\s*,"#,
        r#"\s*"Python Selenium Code"\s*:\s*""""#,
    ))
    .expect("script fragment header regex")
});

/// Parse generator output into script records.
///
/// Only fragments of the exact shape
/// `{"Test Case ID": "..", "Test Scenario": "..", "Python Selenium Code": """.."""`
/// produce a record; anything else is skipped whole, never emitted partially.
/// A fragment that is not complete before the next fragment starts is dropped
/// and scanning resumes at that next fragment. The id and scenario
/// are kept verbatim; the code keeps its internal line breaks and loses only
/// surrounding whitespace.
pub fn extract_script_cases(text: &str) -> Vec<ScriptRecord> {
    let mut records = Vec::new();
    let mut pos = 0;

    while let Some(caps) = FRAGMENT_HEADER.captures_at(text, pos) {
        let Some(header) = caps.get(0) else { break };

        // A header that reaches into another fragment's header borrowed that
        // fragment's fields.
        if let Some(inner) = FRAGMENT_HEADER
            .find_at(text, header.start() + 1)
            .filter(|m| m.start() < header.end())
        {
            tracing::debug!(
                offset = header.start(),
                "dropping script fragment that runs into the next one"
            );
            pos = inner.start();
            continue;
        }

        let body_start = header.end();

        let next_header = FRAGMENT_HEADER
            .find_at(text, body_start)
            .map(|m| m.start());
        let close = text[body_start..]
            .find(CODE_DELIMITER)
            .map(|offset| body_start + offset);

        match close {
            Some(close) if next_header.is_none_or(|next| close < next) => {
                records.push(ScriptRecord {
                    id: caps[1].to_string(),
                    scenario: caps[2].to_string(),
                    code: text[body_start..close].trim().to_string(),
                });
                pos = close + CODE_DELIMITER.len();
            }
            _ => {
                tracing::debug!(
                    offset = header.start(),
                    "dropping script fragment with unterminated code block"
                );
                pos = next_header.unwrap_or(text.len());
            }
        }
    }

    tracing::debug!(records = records.len(), "extracted script records");
    records
}
