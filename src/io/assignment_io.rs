use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::io::atomic_write_string;
use crate::state::assignment::{AssignmentSink, BatchAssignment};

#[derive(Debug, Error)]
pub enum AssignmentIoError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("assignment file parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Reads the saved assignments. A missing file is an empty list.
pub fn load_assignments(path: &Path) -> Result<Vec<BatchAssignment>, AssignmentIoError> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(err) => return Err(err.into()),
    };
    if content.trim().is_empty() {
        return Ok(Vec::new());
    }
    Ok(serde_json::from_str(&content)?)
}

pub fn append_assignment(path: &Path, payload: &BatchAssignment) -> Result<(), AssignmentIoError> {
    let mut saved = load_assignments(path)?;
    saved.push(payload.clone());
    let json = serde_json::to_string_pretty(&saved)?;
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    atomic_write_string(path, &json)?;
    Ok(())
}

/// Persists every batch call as one entry of a JSON array file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct JsonFileSink {
    path: PathBuf,
}

impl JsonFileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl AssignmentSink for JsonFileSink {
    fn assign(&mut self, payload: &BatchAssignment) -> Result<(), String> {
        append_assignment(&self.path, payload).map_err(|err| err.to_string())
    }
}
