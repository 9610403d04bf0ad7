//! Append-only diagnostic log of raw API responses.
//!
//! Every decoded response is written as pretty JSON (keys sorted) followed by a
//! newline. The file is only ever appended to during a run; `clear` truncates it
//! once at the start of an invocation that produces output.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::error::{AppError, EXIT_USAGE};

/// Destination for raw response dumps.
pub trait DumpSink {
    fn record(&mut self, body: &Value) -> Result<(), AppError>;
}

/// In-memory sink; keeps every recorded body in order.
impl DumpSink for Vec<Value> {
    fn record(&mut self, body: &Value) -> Result<(), AppError> {
        self.push(body.clone());
        Ok(())
    }
}

/// File-backed sink.
#[derive(Debug, Clone)]
pub struct DumpLog {
    path: PathBuf,
}

impl DumpLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Truncate the log if it exists. A missing file is left missing.
    pub fn clear(&self) -> Result<(), AppError> {
        if self.path.is_file() {
            File::create(&self.path).map_err(|e| {
                AppError::new(
                    EXIT_USAGE,
                    format!("Failed to clear dump log '{}': {e}", self.path.display()),
                )
            })?;
        }
        Ok(())
    }
}

impl DumpSink for DumpLog {
    fn record(&mut self, body: &Value) -> Result<(), AppError> {
        append_json(&self.path, body)
    }
}

/// Append one pretty-printed JSON document to `path`, creating the file if needed.
pub fn append_json(path: &Path, body: &Value) -> Result<(), AppError> {
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| AppError::new(EXIT_USAGE, format!("Failed to open '{}': {e}", path.display())))?;

    let text = pretty_json(body)?;
    writeln!(file, "{text}")
        .map_err(|e| AppError::new(EXIT_USAGE, format!("Failed to write '{}': {e}", path.display())))?;
    Ok(())
}

/// Pretty JSON with four-space indentation. `serde_json::Map` keeps keys sorted.
pub fn pretty_json(body: &Value) -> Result<String, AppError> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    serde::Serialize::serialize(body, &mut ser)
        .map_err(|e| AppError::new(EXIT_USAGE, format!("Failed to serialize JSON: {e}")))?;
    String::from_utf8(buf).map_err(|e| AppError::new(EXIT_USAGE, format!("Serialized JSON is not UTF-8: {e}")))
}
