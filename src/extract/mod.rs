//! Turning free-form generator output into records.
//!
//! Both extractors are pure functions of their input text. The test case
//! extractor is tolerant and scrapes whatever fields it can find; the script
//! extractor is strict and only accepts whole fragments, since a partially
//! matched code block is worse than none.

pub mod identity;
pub mod record_model;
pub mod scripts;
pub mod test_cases;

pub use record_model::{ScriptRecord, TestCaseRecord};
pub use scripts::extract_script_cases;
pub use test_cases::extract_test_cases;
