use std::path::Path;

use crate::config::Validate;
use super::record::{MatchRecord, RECORD_VERSION};
use super::RECORD_FILE_EXTENSION;

#[derive(Debug)]
pub enum RecordError {
    IoError(std::io::Error),
    ParseError(serde_yaml_ng::Error),
    UnsupportedVersion { found: u32, expected: u32 },
    InvalidRecord(String),
}

impl std::fmt::Display for RecordError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecordError::IoError(e) => write!(f, "IO error: {}", e),
            RecordError::ParseError(e) => write!(f, "Parse error: {}", e),
            RecordError::UnsupportedVersion { found, expected } => {
                write!(f, "Unsupported record version: found {}, expected {}", found, expected)
            }
            RecordError::InvalidRecord(reason) => write!(f, "Invalid match record: {}", reason),
        }
    }
}

impl std::error::Error for RecordError {}

impl From<std::io::Error> for RecordError {
    fn from(e: std::io::Error) -> Self {
        RecordError::IoError(e)
    }
}

impl From<serde_yaml_ng::Error> for RecordError {
    fn from(e: serde_yaml_ng::Error) -> Self {
        RecordError::ParseError(e)
    }
}

pub fn save_record(path: &Path, record: &MatchRecord) -> Result<(), RecordError> {
    record
        .validate()
        .map_err(RecordError::InvalidRecord)?;
    let serialized = serde_yaml_ng::to_string(record)?;
    std::fs::write(path, serialized)?;
    Ok(())
}

pub fn load_record(path: &Path) -> Result<MatchRecord, RecordError> {
    let content = std::fs::read_to_string(path)?;
    load_record_from_str(&content)
}

pub fn load_record_from_str(content: &str) -> Result<MatchRecord, RecordError> {
    let record: MatchRecord = serde_yaml_ng::from_str(content)?;
    if record.version != RECORD_VERSION {
        return Err(RecordError::UnsupportedVersion {
            found: record.version,
            expected: RECORD_VERSION,
        });
    }
    record
        .validate()
        .map_err(RecordError::InvalidRecord)?;
    Ok(record)
}

pub fn generate_record_filename() -> String {
    let timestamp = chrono::Local::now().format("%Y%m%d%H%M%S");
    format!("{}_DUEL.{}", timestamp, RECORD_FILE_EXTENSION)
}
