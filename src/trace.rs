use std::fs::{File, OpenOptions};
use std::io::{LineWriter, Write};
use std::path::Path;
use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::Serialize;

use crate::collector::element_set::ElementSet;
use crate::error::AppError;

/// What a trace line reports about its stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TraceKind {
    /// Page elements were collected
    Collected,
    /// The generator answered a prompt
    Generated,
    /// Records were parsed out of an answer
    Extracted,
}

/// One line of the trace file.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TraceEntry {
    pub timestamp_ms: u128,
    pub stage: String,
    pub kind: TraceKind,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generator: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prompt_chars: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_chars: Option<usize>,

    /// Elements collected or records extracted
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<usize>,
}

impl TraceEntry {
    fn new(stage: &str, kind: TraceKind) -> Self {
        Self {
            timestamp_ms: SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_millis())
                .unwrap_or_default(),
            stage: stage.to_string(),
            kind,
            url: None,
            generator: None,
            prompt_chars: None,
            response_chars: None,
            items: None,
        }
    }
}

/// JSONL record of a run: one line per collection, generator call and
/// extraction.
///
/// Only opening the file can fail. A line that cannot be written is logged
/// and skipped.
pub struct PipelineTrace {
    out: Option<Mutex<LineWriter<File>>>,
}

impl PipelineTrace {
    /// Append to the trace file at `path`, creating it if needed.
    pub fn open(path: &Path) -> Result<Self, AppError> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|e| AppError::io(path, e))?;
        Ok(Self {
            out: Some(Mutex::new(LineWriter::new(file))),
        })
    }

    /// Trace that records nothing.
    pub fn off() -> Self {
        Self { out: None }
    }

    pub fn is_on(&self) -> bool {
        self.out.is_some()
    }

    pub fn collected(&self, stage: &str, url: &str, elements: &ElementSet) {
        self.append(TraceEntry {
            url: Some(url.to_string()),
            items: Some(elements.total()),
            ..TraceEntry::new(stage, TraceKind::Collected)
        });
    }

    /// Sizes are counted in characters; prompts and answers are not stored.
    pub fn generated(&self, stage: &str, generator: &str, prompt: &str, response: &str) {
        self.append(TraceEntry {
            generator: Some(generator.to_string()),
            prompt_chars: Some(prompt.chars().count()),
            response_chars: Some(response.chars().count()),
            ..TraceEntry::new(stage, TraceKind::Generated)
        });
    }

    pub fn extracted(&self, stage: &str, items: usize) {
        self.append(TraceEntry {
            items: Some(items),
            ..TraceEntry::new(stage, TraceKind::Extracted)
        });
    }

    fn append(&self, entry: TraceEntry) {
        let Some(out) = &self.out else {
            return;
        };

        let line = match serde_json::to_string(&entry) {
            Ok(line) => line,
            Err(e) => {
                tracing::warn!(stage = %entry.stage, error = %e, "could not encode trace entry");
                return;
            }
        };

        let mut out = out.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        if let Err(e) = writeln!(out, "{}", line) {
            tracing::warn!(stage = %entry.stage, error = %e, "could not write trace entry");
        }
    }
}
