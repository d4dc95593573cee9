//! Verify command implementation.
//!
//! The `autodeploy-setup verify` command re-runs the readiness check only.

use crate::cli::args::VerifyArgs;
use crate::error::Result;
use crate::ui::UserInterface;
use crate::verify::verify;

use super::dispatcher::{Command, CommandResult};
use super::{host_probe, Invocation};

/// The verify command implementation.
pub struct VerifyCommand {
    invocation: Invocation,
    args: VerifyArgs,
}

impl VerifyCommand {
    /// Create a new verify command.
    pub fn new(invocation: Invocation, args: VerifyArgs) -> Self {
        Self { invocation, args }
    }
}

impl Command for VerifyCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let config = self.invocation.load_config()?;
        let probe = host_probe(&config, &self.invocation.project_root);

        let settings = &config.verification;
        let report = verify(&probe, &settings.libraries, &settings.commands);

        if self.args.json {
            println!("{}", report.to_json()?);
        } else {
            ui.show_header("Verification");
            report.render(ui);
        }

        match report.ensure_ready() {
            Ok(()) => Ok(CommandResult::success()),
            Err(e) => {
                tracing::warn!("{}", e);
                Ok(CommandResult::failure(1))
            }
        }
    }
}
