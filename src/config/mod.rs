//! Configuration loading, parsing, and validation.
//!
//! - Schema definitions in [`schema`]
//! - File discovery, loading and validation in [`loader`]
//!
//! # Example
//!
//! ```
//! use autodeploy_setup::config::load_config;
//! use tempfile::TempDir;
//! use std::fs;
//!
//! let temp = TempDir::new().unwrap();
//! let dir = temp.path().join(".autodeploy");
//! fs::create_dir_all(&dir).unwrap();
//! fs::write(dir.join("setup.yml"), "tools:\n  terraform_version: \"1.6.6\"").unwrap();
//!
//! let config = load_config(temp.path(), None).unwrap();
//! assert_eq!(config.tools.terraform_version, "1.6.6");
//! ```

pub mod loader;
pub mod schema;

pub use loader::{default_config_path, load_config, load_config_file, parse_config, validate};
pub use schema::{
    ArtifactSettings, NetworkSettings, SetupConfig, ToolSettings, VerificationSettings,
};
