use serde::Serialize;
use sha1::{Digest, Sha1};

use super::record_model::{ScriptRecord, TestCaseRecord};

/// A test case with a key assigned by this crate rather than by the generator.
///
/// The key is what the script prompt hands to the generator, so the scripts
/// that come back can be tied to their test case without trusting the
/// generator's own id text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeyedTestCase {
    pub key: String,
    /// SHA-1 of the four record fields
    pub fingerprint: String,
    pub record: TestCaseRecord,
}

impl KeyedTestCase {
    /// The record as written to the test case table, with the assigned key in
    /// place of the generator's id.
    pub fn table_row(&self) -> TestCaseRecord {
        TestCaseRecord {
            id: self.key.clone(),
            ..self.record.clone()
        }
    }
}

/// Which keyed test case a script belongs to, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptLink {
    pub script_index: usize,
    pub case_key: Option<String>,
}

/// Format the key for the test case at `index` (zero-based).
pub fn case_key(index: usize) -> String {
    format!("TC-{:03}", index + 1)
}

/// Assign positional keys (`TC-001`, `TC-002`, ...) and content fingerprints.
pub fn assign_case_keys(cases: &[TestCaseRecord]) -> Vec<KeyedTestCase> {
    cases
        .iter()
        .enumerate()
        .map(|(i, record)| KeyedTestCase {
            key: case_key(i),
            fingerprint: record_fingerprint(record),
            record: record.clone(),
        })
        .collect()
}

/// Hex SHA-1 over the record fields, each terminated by a NUL byte so that
/// moving text between adjacent fields changes the digest.
pub fn record_fingerprint(record: &TestCaseRecord) -> String {
    let mut hasher = Sha1::new();
    for field in [&record.id, &record.scenario, &record.steps, &record.expected] {
        hasher.update(field.as_bytes());
        hasher.update([0u8]);
    }
    format!("{:x}", hasher.finalize())
}

/// Link every script to the keyed test case whose key it echoes.
///
/// Matching ignores case and surrounding whitespace. One link per script, in
/// script order; scripts that name no assigned key get `case_key: None`.
pub fn correlate_scripts(cases: &[KeyedTestCase], scripts: &[ScriptRecord]) -> Vec<ScriptLink> {
    scripts
        .iter()
        .enumerate()
        .map(|(script_index, script)| {
            let id = script.id.trim();
            let case_key = cases
                .iter()
                .find(|c| c.key.eq_ignore_ascii_case(id))
                .map(|c| c.key.clone());
            ScriptLink {
                script_index,
                case_key,
            }
        })
        .collect()
}

/// Scripts as written to the script table: a linked script carries its test
/// case's key as its id, so both tables name a case the same way. Unlinked
/// scripts keep their id verbatim.
pub fn keyed_script_rows(scripts: &[ScriptRecord], links: &[ScriptLink]) -> Vec<ScriptRecord> {
    scripts
        .iter()
        .enumerate()
        .map(|(i, script)| {
            let key = links
                .iter()
                .find(|l| l.script_index == i)
                .and_then(|l| l.case_key.clone());
            match key {
                Some(key) => ScriptRecord {
                    id: key,
                    ..script.clone()
                },
                None => script.clone(),
            }
        })
        .collect()
}
