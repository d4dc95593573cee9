//! Run command implementation.
//!
//! The `autodeploy-setup run` command performs the full bootstrap.

use std::time::Duration;

use crate::cli::args::RunArgs;
use crate::error::Result;
use crate::requirements::HostActionRunner;
use crate::runner::BootstrapPipeline;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};
use super::{host_probe, Invocation};

/// The run command implementation.
pub struct RunCommand {
    invocation: Invocation,
    args: RunArgs,
}

impl RunCommand {
    /// Create a new run command.
    pub fn new(invocation: Invocation, args: RunArgs) -> Self {
        Self { invocation, args }
    }

    /// Get the command arguments.
    pub fn args(&self) -> &RunArgs {
        &self.args
    }
}

impl Command for RunCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let config = self.invocation.load_config()?;
        let root = &self.invocation.project_root;

        let probe = host_probe(&config, root);
        tracing::debug!("Probe search path: {:?}", probe.search_path());

        let mut runner =
            HostActionRunner::new(Duration::from_secs(config.network.timeout_secs))?;
        tracing::debug!("Download timeout: {:?}", runner.timeout());
        let mut pipeline = BootstrapPipeline::new(&config, root, &probe, &mut runner);
        let summary = pipeline.run(&self.invocation.signal, ui)?;

        Ok(CommandResult::from_ready(summary.exit_code() == 0))
    }
}
