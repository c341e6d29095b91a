//! Error types for ridership-core
//!
//! Provides the error hierarchy with thiserror plus a load report for
//! non-fatal warnings collected while reading a dataset.

use std::path::PathBuf;
use thiserror::Error;

/// Malformed `DD.MM.YYYY` date text
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DateParseError {
    #[error("expected DD.MM.YYYY, got '{input}'")]
    Shape { input: String },

    #[error("'{input}' is not a calendar date")]
    OutOfRange { input: String },
}

/// Core error type for ridership operations
#[derive(Error, Debug)]
pub enum CoreError {
    // ===================
    // IO Errors
    // ===================
    #[error("Failed to read file: {path}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    // ===================
    // Parse Errors
    // ===================
    #[error("Invalid date: {0}")]
    DateParse(#[from] DateParseError),

    #[error("Failed to parse JSON in {path}: {message}")]
    JsonParse {
        path: PathBuf,
        message: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Record {index} rejected: {source}")]
    InvalidRecord {
        index: usize,
        #[source]
        source: DateParseError,
    },

    // ===================
    // Store Errors
    // ===================
    #[error("Index {index} out of range for store of length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    // ===================
    // Config Errors
    // ===================
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    #[error("Failed to parse config {path}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Non-fatal issue found while loading a dataset
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadWarning {
    pub source: String,
    pub message: String,
}

/// Report of issues encountered while loading a dataset
///
/// Coerced mode values are recorded as warnings instead of failing the load.
/// Anything that rejects the input is a [`CoreError`] instead.
#[derive(Debug, Default)]
pub struct LoadReport {
    warnings: Vec<LoadWarning>,
    pub records_loaded: usize,
    pub values_coerced: usize,
}

impl LoadReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_warning(&mut self, source: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(LoadWarning {
            source: source.into(),
            message: message.into(),
        });
    }

    pub fn warnings(&self) -> &[LoadWarning] {
        &self.warnings
    }

    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty() && self.values_coerced == 0
    }
}
