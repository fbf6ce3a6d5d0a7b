use crate::collector::element_set::ElementSet;
use crate::extract::identity::ScriptLink;
use crate::extract::record_model::{ScriptRecord, TestCaseRecord};

// ============================================================================
// Console presenter: plain-text terminal output
// ============================================================================

/// Format an element set, one category per block.
///
/// ```text
/// === Elements (3 total) ===
/// Buttons (1): Login
/// Links (2): /home, /about
/// Inputs (0): (none)
/// Forms (0): (none)
/// ```
pub fn format_elements(elements: &ElementSet) -> String {
    let mut out = format!("=== Elements ({} total) ===\n", elements.total());
    for (name, values) in [
        ("Buttons", &elements.buttons),
        ("Links", &elements.links),
        ("Inputs", &elements.inputs),
        ("Forms", &elements.forms),
    ] {
        let listed = if values.is_empty() {
            "(none)".to_string()
        } else {
            values.join(", ")
        };
        out.push_str(&format!("{} ({}): {}\n", name, values.len(), listed));
    }
    out
}

/// Format test cases as numbered blocks with indented multi-line fields.
pub fn format_test_cases(records: &[TestCaseRecord]) -> String {
    let mut out = format!("=== Test Cases ({}) ===\n", records.len());

    for (i, record) in records.iter().enumerate() {
        out.push_str(&format!(
            "\n[{}] {} — {}\n",
            i + 1,
            or_placeholder(&record.id),
            or_placeholder(&record.scenario)
        ));
        out.push_str("  Steps:\n");
        out.push_str(&indent(&record.steps, 4));
        out.push_str("  Expected:\n");
        out.push_str(&indent(&record.expected, 4));
    }

    out
}

/// Format scripts, noting the keyed test case each one belongs to when known.
pub fn format_scripts(records: &[ScriptRecord], links: &[ScriptLink]) -> String {
    let mut out = format!("=== Test Scripts ({}) ===\n", records.len());

    for (i, record) in records.iter().enumerate() {
        let linked = links
            .iter()
            .find(|l| l.script_index == i)
            .map(|l| match &l.case_key {
                Some(key) => format!(" [{}]", key),
                None => " [unmatched]".to_string(),
            })
            .unwrap_or_default();

        out.push_str(&format!(
            "\n[{}] {} — {}{}\n",
            i + 1,
            or_placeholder(&record.id),
            or_placeholder(&record.scenario),
            linked
        ));
        out.push_str(&indent(&record.code, 4));
    }

    out
}

fn or_placeholder(value: &str) -> &str {
    if value.is_empty() { "(empty)" } else { value }
}

fn indent(text: &str, width: usize) -> String {
    if text.is_empty() {
        return format!("{}(empty)\n", " ".repeat(width));
    }
    let pad = " ".repeat(width);
    text.lines()
        .map(|line| format!("{}{}\n", pad, line))
        .collect()
}
