//! Error types for krm-core

use thiserror::Error;

/// Result type alias using krm-core's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Errors shared by every krm plugin
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration file not found
    #[error("Configuration file not found: {path}")]
    ConfigNotFound { path: String },

    /// Invalid or incomplete plugin configuration
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    /// A placeholder referenced an unset environment variable
    #[error("Environment variable not set: {name}")]
    MissingVariable { name: String },

    /// Remote server answered with a non-success status
    #[error("{url}: {status} {reason}")]
    HttpStatus {
        url: String,
        status: u16,
        reason: String,
    },

    /// Transport-level fetch failure
    #[error("{url}: {reason}")]
    Network { url: String, reason: String },

    /// Content digest did not match the configured one
    #[error("sha256 checksum validation failed for {label}\nexpected: {expected}\nactual:   {actual}")]
    ChecksumMismatch {
        label: String,
        expected: String,
        actual: String,
    },

    /// Malformed YAML stream
    #[error("{origin}: invalid yaml{}\n{message}", at_location(.location))]
    Decode {
        origin: String,
        message: String,
        location: Option<Location>,
    },

    /// Secret value that is not base64-encoded UTF-8 text
    #[error("Invalid base64 value: {message}")]
    Base64 { message: String },

    /// YAML serialization or config deserialization error
    #[error("YAML parsing error: {0}")]
    YamlParse(#[from] serde_yaml_ng::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Position of a parse failure inside a YAML stream
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Location {
    pub line: usize,
    pub column: usize,
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

fn at_location(location: &Option<Location>) -> String {
    location.map(|l| format!(" at {l}")).unwrap_or_default()
}

impl Error {
    /// Create a config not found error
    pub fn config_not_found(path: impl Into<String>) -> Self {
        Self::ConfigNotFound { path: path.into() }
    }

    /// Create an invalid config error
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Create a missing variable error
    pub fn missing_variable(name: impl Into<String>) -> Self {
        Self::MissingVariable { name: name.into() }
    }

    /// Create an HTTP status error
    pub fn http_status(url: impl Into<String>, status: u16, reason: impl Into<String>) -> Self {
        Self::HttpStatus {
            url: url.into(),
            status,
            reason: reason.into(),
        }
    }

    /// Create a network error
    pub fn network(url: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Network {
            url: url.into(),
            reason: reason.into(),
        }
    }

    /// Create a checksum mismatch error
    pub fn checksum_mismatch(
        label: impl Into<String>,
        expected: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        Self::ChecksumMismatch {
            label: label.into(),
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    /// Create a decode error from a YAML error, keeping its location
    pub fn decode(origin: impl Into<String>, err: &serde_yaml_ng::Error) -> Self {
        Self::Decode {
            origin: origin.into(),
            message: err.to_string(),
            location: err.location().map(|l| Location {
                line: l.line(),
                column: l.column(),
            }),
        }
    }

    /// Create a base64 error
    pub fn base64(message: impl Into<String>) -> Self {
        Self::Base64 {
            message: message.into(),
        }
    }
}
