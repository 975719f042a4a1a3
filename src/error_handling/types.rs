//! Error type definitions.
//!
//! This module defines the initialization errors and the check failures that
//! propagate to each individual check case.

use log::SetLoggerError;
use reqwest::Error as ReqwestError;
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing the HTTP client.
    #[error("HTTP client initialization error: {0}")]
    HttpClientError(#[from] ReqwestError),

    /// A configured URL could not be parsed.
    #[error("Invalid URL {url}: {reason}")]
    InvalidUrl { url: String, reason: String },
}

/// Failures raised while resolving expectations or checking a redirect.
///
/// None of these are retried or recovered internally; each one fails the
/// check case that produced it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CheckError {
    /// The product-details data source was unreachable, answered non-2xx,
    /// or returned a body that is not the expected JSON.
    #[error("product details unavailable at {url}: {reason}")]
    Unavailable { url: String, reason: String },

    /// The alias table references a releng product the directory does not have.
    #[error("product {key} is missing from the version directory")]
    MissingProduct { key: String },

    /// No filename convention exists for this platform.
    #[error("unsupported platform {os:?} (alias {alias:?}, version {version:?})")]
    UnsupportedPlatform {
        os: String,
        alias: String,
        version: String,
    },

    /// The request to the service under test failed at the network level.
    #[error("Failing URL: {url}.\nError message: {reason}")]
    RequestFailed { url: String, reason: String },

    /// The observed response did not match the expected outcome.
    #[error("{message}")]
    AssertionFailure { message: String },
}

impl CheckError {
    /// Short label used when tallying failures.
    pub fn kind(&self) -> &'static str {
        match self {
            CheckError::Unavailable { .. } => "unavailable",
            CheckError::MissingProduct { .. } => "missing product",
            CheckError::UnsupportedPlatform { .. } => "unsupported platform",
            CheckError::RequestFailed { .. } => "request failed",
            CheckError::AssertionFailure { .. } => "assertion failure",
        }
    }
}
