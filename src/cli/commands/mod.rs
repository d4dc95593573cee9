//! CLI command implementations.
//!
//! Each command implements the [`Command`] trait, which provides a uniform
//! interface for executing commands and reporting results.
//!
//! # Architecture
//!
//! Commands are dispatched via [`CommandDispatcher`], which routes CLI
//! subcommands to their implementations. This allows:
//! - Single binary with subcommands (`autodeploy-setup run`, `autodeploy-setup verify`)
//! - Shared config loading and probe construction
//! - Consistent global flag handling

pub mod completions;
pub mod dispatcher;
pub mod plan;
pub mod run;
pub mod verify;

pub use dispatcher::{Command, CommandDispatcher, CommandResult};

use std::path::{Path, PathBuf};

use crate::config::{load_config, SetupConfig};
use crate::error::Result;
use crate::requirements::HostProbe;

/// Global inputs shared by every command.
#[derive(Debug, Clone)]
pub struct Invocation {
    /// Directory artifacts are written into.
    pub project_root: PathBuf,
    /// Explicit `--config` path.
    pub config_path: Option<PathBuf>,
    /// OS family string used for platform detection.
    pub signal: String,
}

impl Invocation {
    /// Load the configuration for this invocation.
    pub fn load_config(&self) -> Result<SetupConfig> {
        load_config(&self.project_root, self.config_path.as_deref())
    }
}

/// Build the real probe: `$PATH` plus the install directory and any extra
/// directories from the config.
pub fn host_probe(config: &SetupConfig, project_root: &Path) -> HostProbe {
    let mut extra = vec![config.tools.bin_dir.clone()];
    extra.extend(config.tools.extra_path.iter().cloned());

    HostProbe::from_env(
        &extra,
        config.verification.resolved_interpreter(project_root),
    )
}
