//! Plan command implementation.
//!
//! The `autodeploy-setup plan` command prints the install strategies a run
//! would attempt, without executing them.

use crate::error::Result;
use crate::requirements::HostArch;
use crate::runner::plan;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};
use super::{host_probe, Invocation};

/// The plan command implementation.
pub struct PlanCommand {
    invocation: Invocation,
}

impl PlanCommand {
    /// Create a new plan command.
    pub fn new(invocation: Invocation) -> Self {
        Self { invocation }
    }
}

impl Command for PlanCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let config = self.invocation.load_config()?;
        let probe = host_probe(&config, &self.invocation.project_root);

        let planned = plan(&config, &probe, &self.invocation.signal, HostArch::current())?;
        planned.render(ui);

        Ok(CommandResult::success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SetupError;
    use crate::ui::MockUI;
    use tempfile::TempDir;

    #[test]
    fn plan_rejects_unsupported_platform() {
        let temp = TempDir::new().unwrap();
        let invocation = Invocation {
            project_root: temp.path().to_path_buf(),
            config_path: None,
            signal: "freebsd".to_string(),
        };
        let cmd = PlanCommand::new(invocation);
        let mut ui = MockUI::new();

        let result = cmd.execute(&mut ui);
        assert!(matches!(result, Err(SetupError::UnsupportedPlatform { .. })));
    }

    #[test]
    fn plan_lists_every_dependency() {
        let temp = TempDir::new().unwrap();
        let invocation = Invocation {
            project_root: temp.path().to_path_buf(),
            config_path: None,
            signal: "linux-gnu".to_string(),
        };
        let cmd = PlanCommand::new(invocation);
        let mut ui = MockUI::new();

        let result = cmd.execute(&mut ui).unwrap();
        assert_eq!(result.exit_code, 0);
        assert_eq!(ui.headers(), &["Plan for linux-gnu host"]);
    }
}
