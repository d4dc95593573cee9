//! Error types for bootstrap operations.
//!
//! This module defines [`SetupError`], the primary error type used throughout
//! the crate, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Fatal conditions (`UnsupportedPlatform`, `MissingMandatoryDependency`,
//!   `InstallationExhausted`, `ArtifactWriteError`) abort the pipeline
//! - Strategy-level errors (`ActionFailed`, `DownloadFailed`, `CommandFailed`)
//!   are caught by the installer and only advance to the next strategy
//! - All errors should provide actionable messages for users

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for bootstrap operations.
#[derive(Debug, Error)]
pub enum SetupError {
    /// Host OS family is not one of the supported platforms.
    #[error("Unsupported platform '{signal}': only Linux (GNU) and macOS hosts are supported")]
    UnsupportedPlatform { signal: String },

    /// A required tool that is never auto-installed is absent.
    #[error("Missing mandatory dependency '{dependency}': {hint}")]
    MissingMandatoryDependency { dependency: String, hint: String },

    /// Every installation strategy was tried and none produced a usable tool.
    #[error("Could not install '{dependency}' after {attempts} attempt(s): {hint}")]
    InstallationExhausted {
        dependency: String,
        attempts: usize,
        hint: String,
    },

    /// The readiness check found required items absent.
    #[error("Verification failed, missing: {}", missing.join(", "))]
    VerificationFailure { missing: Vec<String> },

    /// A generated artifact could not be written.
    #[error("Failed to write {path}: {source}")]
    ArtifactWriteError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A single installation action failed.
    #[error("{action} failed: {message}")]
    ActionFailed { action: String, message: String },

    /// A download returned an error or could not complete.
    #[error("Download of {url} failed: {message}")]
    DownloadFailed { url: String, message: String },

    /// An external command exited unsuccessfully.
    #[error("Command failed with exit code {code:?}: {command}")]
    CommandFailed { command: String, code: Option<i32> },

    /// Explicitly requested configuration file not found.
    #[error("Configuration not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Failed to parse configuration file.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// Invalid configuration values.
    #[error("Invalid configuration: {message}")]
    ConfigValidationError { message: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for bootstrap operations.
pub type Result<T> = std::result::Result<T, SetupError>;
