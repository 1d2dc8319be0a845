//! Error types for boltbench.
//!
//! Defines the main error enum used throughout the runner and benchmarks.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for boltbench operations.
#[derive(Error, Debug)]
pub enum BenchError {
    /// A SQL file passed to the runner does not exist.
    #[error("SQL file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// Firebolt Core query failures (non-2xx responses, transport errors).
    #[error("{0}")]
    Query(String),

    /// Firebolt Cloud setup errors (missing credentials, auth failed, etc.)
    #[error("Connection error: {0}")]
    Connection(String),

    /// Errors raised by an established cloud connection, passed through as-is.
    #[error("{0}")]
    Driver(String),

    /// Configuration errors (invalid config file, bad arguments, etc.)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal application errors (unexpected states, bugs, etc.)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl BenchError {
    /// Creates a query error with the given message.
    pub fn query(msg: impl Into<String>) -> Self {
        Self::Query(msg.into())
    }

    /// Creates a connection error with the given message.
    pub fn connection(msg: impl Into<String>) -> Self {
        Self::Connection(msg.into())
    }

    /// Creates a driver error with the given message.
    pub fn driver(msg: impl Into<String>) -> Self {
        Self::Driver(msg.into())
    }

    /// Creates a configuration error with the given message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Creates an internal error with the given message.
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Returns the error category as a string for display purposes.
    pub fn category(&self) -> &'static str {
        match self {
            Self::FileNotFound(_) => "File Error",
            Self::Query(_) => "Query Error",
            Self::Connection(_) => "Connection Error",
            Self::Driver(_) => "Driver Error",
            Self::Config(_) => "Configuration Error",
            Self::Internal(_) => "Internal Error",
        }
    }
}

/// Result type alias using BenchError.
pub type Result<T> = std::result::Result<T, BenchError>;
