//! Error types for ferro-gwas
//!
//! Errors fall into two groups:
//! - row-level failures (bad alleles, malformed SNP fields) that skip a single
//!   catalog row and let the load continue
//! - run-level failures (I/O, resolver, configuration) that abort the load

use std::fmt;
use thiserror::Error;

/// Error codes for categorizing errors
///
/// These codes can be used for programmatic error handling
/// and for documentation lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum ErrorCode {
    // Row errors (E1xxx)
    /// REF/ALT alleles cannot be expressed as a genomic change
    InvalidAllele = 1001,
    /// Positional SNP field does not have four parts
    MalformedSnpField = 1002,
    /// Position is not a positive integer
    InvalidPosition = 1003,

    // Resolver errors (E2xxx)
    /// Resolver call failed or returned an unusable response
    ResolverFailed = 2001,

    // IO errors (E9xxx)
    /// File IO error
    IoError = 9001,
    /// JSON parsing error
    JsonError = 9002,
    /// TSV parsing error
    TsvError = 9003,
    /// Configuration error
    ConfigError = 9004,
}

impl ErrorCode {
    /// Get the error code as a string (e.g., "E1001")
    pub fn as_str(&self) -> String {
        format!("E{:04}", *self as u16)
    }

    /// Get a brief description of this error code
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::InvalidAllele => "invalid reference or alternate allele",
            ErrorCode::MalformedSnpField => "malformed positional SNP field",
            ErrorCode::InvalidPosition => "invalid chromosome position",
            ErrorCode::ResolverFailed => "identifier resolution failed",
            ErrorCode::IoError => "file I/O error",
            ErrorCode::JsonError => "JSON parsing error",
            ErrorCode::TsvError => "TSV parsing error",
            ErrorCode::ConfigError => "configuration error",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Main error type for ferro-gwas operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GwasError {
    /// Alleles that cannot be converted into an HGVS expression
    #[error("Cannot convert ({chrom}, {pos}, {reference}, {alternate}) into HGVS id")]
    InvalidAllele {
        chrom: String,
        pos: u64,
        reference: String,
        alternate: String,
    },

    /// Positional SNP field that does not split into chrom/pos/ref/alt
    #[error("Malformed SNP field: {value}")]
    MalformedSnp { value: String },

    /// Position that is not a positive integer
    #[error("Invalid position: {value}")]
    InvalidPosition { value: String },

    /// Identifier resolver failure
    #[error("Resolver error: {msg}")]
    Resolver { msg: String },

    /// IO error (for file operations)
    #[error("IO error: {msg}")]
    Io { msg: String },

    /// TSV parsing error
    #[error("TSV error: {msg}")]
    Csv { msg: String },

    /// JSON parsing error
    #[error("JSON error: {msg}")]
    Json { msg: String },

    /// Configuration error
    #[error("Configuration error: {msg}")]
    Config { msg: String },
}

impl GwasError {
    /// Get the error code for this error
    pub fn code(&self) -> ErrorCode {
        match self {
            GwasError::InvalidAllele { .. } => ErrorCode::InvalidAllele,
            GwasError::MalformedSnp { .. } => ErrorCode::MalformedSnpField,
            GwasError::InvalidPosition { .. } => ErrorCode::InvalidPosition,
            GwasError::Resolver { .. } => ErrorCode::ResolverFailed,
            GwasError::Io { .. } => ErrorCode::IoError,
            GwasError::Csv { .. } => ErrorCode::TsvError,
            GwasError::Json { .. } => ErrorCode::JsonError,
            GwasError::Config { .. } => ErrorCode::ConfigError,
        }
    }

    /// Whether the error only invalidates the current catalog row.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            GwasError::InvalidAllele { .. }
                | GwasError::MalformedSnp { .. }
                | GwasError::InvalidPosition { .. }
        )
    }

    /// Error message prefixed with its code, e.g. `[E1001] Cannot convert ...`
    pub fn detailed_message(&self) -> String {
        format!("[{}] {}", self.code(), self)
    }
}

impl From<std::io::Error> for GwasError {
    fn from(err: std::io::Error) -> Self {
        GwasError::Io {
            msg: err.to_string(),
        }
    }
}

impl From<csv::Error> for GwasError {
    fn from(err: csv::Error) -> Self {
        GwasError::Csv {
            msg: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for GwasError {
    fn from(err: serde_json::Error) -> Self {
        GwasError::Json {
            msg: err.to_string(),
        }
    }
}

impl From<reqwest::Error> for GwasError {
    fn from(err: reqwest::Error) -> Self {
        GwasError::Resolver {
            msg: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for GwasError {
    fn from(err: toml::de::Error) -> Self {
        GwasError::Config {
            msg: err.to_string(),
        }
    }
}
