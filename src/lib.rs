//! Generate test cases and Selenium scripts for a web page with a text model.
//!
//! The interesting part is [`extract`]: two parsers that turn the loosely
//! formatted text a model returns into records. Everything else (browser
//! collection, generator backends, export, CLI) is glue around them.

pub mod cli;
pub mod collector;
pub mod error;
pub mod export;
pub mod extract;
pub mod generator;
pub mod pipeline;
pub mod trace;

pub use error::AppError;
pub use extract::{ScriptRecord, TestCaseRecord, extract_script_cases, extract_test_cases};
