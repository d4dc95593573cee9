//! autodeploy-setup - host bootstrapper for the autodeployment system.
//!
//! Detects the host platform, installs the provisioning and cloud CLIs the
//! system shells out to, writes the project's environment and service
//! files, and verifies that every required library and command is usable.
//!
//! # Modules
//!
//! - [`artifacts`] - Environment template, live `.env` and systemd unit
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Optional `setup.yml` loading and validation
//! - [`error`] - Error types and result aliases
//! - [`platform`] - Host OS family classification
//! - [`requirements`] - Dependency probing, strategy selection and installation
//! - [`runner`] - The bootstrap pipeline and dry-run planning
//! - [`shell`] - Process execution helpers
//! - [`ui`] - Spinners, status lines and summaries
//! - [`verify`] - Final readiness report
//!
//! # Example
//!
//! ```
//! use autodeploy_setup::platform::{detect, PlatformKind};
//!
//! assert_eq!(detect("linux-gnu"), PlatformKind::LinuxGnu);
//! assert_eq!(detect("darwin23"), PlatformKind::Darwin);
//! assert!(!detect("msys").is_supported());
//! ```

pub mod artifacts;
pub mod cli;
pub mod config;
pub mod error;
pub mod platform;
pub mod requirements;
pub mod runner;
pub mod shell;
pub mod ui;
pub mod verify;

pub use error::{Result, SetupError};
