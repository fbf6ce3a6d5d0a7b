use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::collector::element_set::ElementSet;
use crate::error::AppError;
use crate::extract::record_model::{SCRIPT_COLUMNS, ScriptRecord, TEST_CASE_COLUMNS, TestCaseRecord};
use crate::pipeline::PipelineOutput;

pub const ELEMENTS_FILE: &str = "elements.json";
pub const TEST_CASES_STEM: &str = "test_cases";
pub const SCRIPTS_STEM: &str = "test_scripts";

/// File format of the record tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum TableFormat {
    #[default]
    Csv,
    Json,
}

impl TableFormat {
    pub fn extension(self) -> &'static str {
        match self {
            TableFormat::Csv => "csv",
            TableFormat::Json => "json",
        }
    }
}

/// Paths of everything a full run wrote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactPaths {
    pub elements: PathBuf,
    pub test_cases: PathBuf,
    pub scripts: PathBuf,
}

// ============================================================================
// Writers
// ============================================================================

/// Write the element set as pretty JSON to `<dir>/elements.json`.
pub fn write_elements_json(dir: &Path, elements: &ElementSet) -> Result<PathBuf, AppError> {
    ensure_dir(dir)?;
    let path = dir.join(ELEMENTS_FILE);
    let json = serde_json::to_string_pretty(elements).map_err(|e| AppError::JsonSerialize {
        context: ELEMENTS_FILE.into(),
        source: e,
    })?;
    std::fs::write(&path, json).map_err(|e| AppError::io(&path, e))?;
    Ok(path)
}

/// Write one row per test case to `<dir>/test_cases.<ext>`.
pub fn write_test_cases(
    dir: &Path,
    records: &[TestCaseRecord],
    format: TableFormat,
) -> Result<PathBuf, AppError> {
    write_table(dir, TEST_CASES_STEM, &TEST_CASE_COLUMNS, records, format)
}

/// Write one row per script to `<dir>/test_scripts.<ext>`.
pub fn write_scripts(
    dir: &Path,
    records: &[ScriptRecord],
    format: TableFormat,
) -> Result<PathBuf, AppError> {
    write_table(dir, SCRIPTS_STEM, &SCRIPT_COLUMNS, records, format)
}

/// Write all three artifacts of a run. Both tables identify test cases by
/// their assigned keys.
pub fn write_all(
    dir: &Path,
    output: &PipelineOutput,
    format: TableFormat,
) -> Result<ArtifactPaths, AppError> {
    Ok(ArtifactPaths {
        elements: write_elements_json(dir, &output.elements)?,
        test_cases: write_test_cases(dir, &output.test_case_rows(), format)?,
        scripts: write_scripts(dir, &output.script_rows(), format)?,
    })
}

fn write_table<T: Serialize>(
    dir: &Path,
    stem: &str,
    headers: &[&str],
    records: &[T],
    format: TableFormat,
) -> Result<PathBuf, AppError> {
    ensure_dir(dir)?;
    let path = dir.join(format!("{}.{}", stem, format.extension()));

    match format {
        TableFormat::Csv => write_csv(&path, headers, records)?,
        TableFormat::Json => {
            let json = serde_json::to_string_pretty(records).map_err(|e| AppError::JsonSerialize {
                context: stem.into(),
                source: e,
            })?;
            std::fs::write(&path, json).map_err(|e| AppError::io(&path, e))?;
        }
    }

    tracing::debug!(path = %path.display(), rows = records.len(), "wrote table");
    Ok(path)
}

/// The header row is written explicitly so that an empty table still has one.
fn write_csv<T: Serialize>(path: &Path, headers: &[&str], records: &[T]) -> Result<(), AppError> {
    let csv_err = |source| AppError::Csv {
        path: path.to_path_buf(),
        source,
    };

    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)
        .map_err(csv_err)?;

    writer.write_record(headers).map_err(csv_err)?;
    for record in records {
        writer.serialize(record).map_err(csv_err)?;
    }
    writer.flush().map_err(|e| AppError::io(path, e))?;
    Ok(())
}

fn ensure_dir(dir: &Path) -> Result<(), AppError> {
    std::fs::create_dir_all(dir).map_err(|e| AppError::io(dir, e))
}
