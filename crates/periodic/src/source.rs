//! # Record Source
//!
//! The engine consumes an ordered list of records. Where they come from is
//! behind [`RecordSource`]; the JSON file reader is the production source.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

/// Errors from a record source.
#[derive(Error, Debug)]
pub enum SourceError {
    /// The records could not be read.
    #[error("failed to read records from {path}: {source}")]
    Io {
        /// File that failed.
        path: PathBuf,
        /// Underlying error.
        source: std::io::Error,
    },

    /// The payload is not a JSON array of records.
    #[error("malformed record payload: {0}")]
    Parse(#[from] serde_json::Error),

    /// Any other backend failure.
    #[error("record source unavailable: {0}")]
    Unavailable(String),
}

/// Result type for record sources.
pub type SourceResult<T> = Result<T, SourceError>;

/// One card's data.
///
/// Only `Name` and `NetWorth` are interpreted. Every other field is kept in
/// [`Record::fields`] and forwarded to presentation unchanged.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Display name, also used as the card identifier.
    #[serde(rename = "Name", default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Raw net worth, usually a string like `"$150,000"`.
    #[serde(rename = "NetWorth", default, skip_serializing_if = "Value::is_null")]
    pub net_worth: Value,
    /// `Photo`, `Age`, `Country`, `Interest` and anything else.
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl Record {
    /// Creates a record with a name and a net worth string.
    #[must_use]
    pub fn new(name: impl Into<String>, net_worth: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            net_worth: Value::String(net_worth.into()),
            fields: Map::new(),
        }
    }

    /// Adds a pass-through field.
    #[must_use]
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    /// Looks up a pass-through field.
    #[must_use]
    pub fn field(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }
}

/// Supplier of the record list.
pub trait RecordSource {
    /// Fetches every record, in display order.
    ///
    /// # Errors
    ///
    /// Any failure makes the engine unavailable for the session.
    fn fetch(&mut self) -> SourceResult<Vec<Record>>;
}

/// Parses a JSON array of records.
///
/// # Errors
///
/// Returns [`SourceError::Parse`] if the payload is not an array of objects.
pub fn parse_records(json: &str) -> SourceResult<Vec<Record>> {
    Ok(serde_json::from_str(json)?)
}

/// Reads records from a JSON file.
#[derive(Clone, Debug)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    /// Creates a source for `path`. Nothing is read until [`RecordSource::fetch`].
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl RecordSource for JsonFileSource {
    fn fetch(&mut self) -> SourceResult<Vec<Record>> {
        let json = std::fs::read_to_string(&self.path).map_err(|source| SourceError::Io {
            path: self.path.clone(),
            source,
        })?;
        let records = parse_records(&json)?;
        tracing::debug!(path = %self.path.display(), records = records.len(), "records read");
        Ok(records)
    }
}

/// In-memory records, handed out once.
#[derive(Clone, Debug, Default)]
pub struct StaticSource {
    records: Option<Vec<Record>>,
}

impl StaticSource {
    /// Creates a source yielding `records` on the first fetch.
    #[must_use]
    pub fn new(records: Vec<Record>) -> Self {
        Self { records: Some(records) }
    }
}

impl RecordSource for StaticSource {
    fn fetch(&mut self) -> SourceResult<Vec<Record>> {
        self.records
            .take()
            .ok_or_else(|| SourceError::Unavailable("records already consumed".to_owned()))
    }
}
