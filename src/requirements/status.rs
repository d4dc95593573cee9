//! Installation outcome types.
//!
//! Each call to the installer produces an [`InstallationOutcome`] that
//! records every strategy it tried and where the dependency ended up.

use crate::error::SetupError;
use crate::requirements::registry::Dependency;

/// How a single strategy attempt ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttemptResult {
    /// All actions succeeded and the re-probe found the tool.
    Confirmed,
    /// An action failed; later actions in the strategy were not run.
    ActionFailed(String),
    /// All actions succeeded but the re-probe still found nothing.
    NotDetected,
}

/// One strategy tried for a dependency.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StrategyAttempt {
    pub label: String,
    pub result: AttemptResult,
}

impl StrategyAttempt {
    pub fn is_confirmed(&self) -> bool {
        self.result == AttemptResult::Confirmed
    }

    /// One-line summary for warnings.
    pub fn summary(&self) -> String {
        match &self.result {
            AttemptResult::Confirmed => format!("{}: installed", self.label),
            AttemptResult::ActionFailed(reason) => format!("{}: {}", self.label, reason),
            AttemptResult::NotDetected => {
                format!("{}: completed but the tool is still not on the search path", self.label)
            }
        }
    }
}

/// Where a dependency ended up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FinalState {
    /// Found before anything was attempted.
    AlreadyPresent,
    /// Installed by the strategy with this label.
    InstalledVia(String),
    /// Required and still absent.
    Failed,
    /// Optional and absent.
    SkippedOptional,
}

/// Result of ensuring one dependency.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallationOutcome {
    pub dependency: String,
    pub attempts: Vec<StrategyAttempt>,
    pub final_state: FinalState,
    pub message: Option<String>,
}

impl InstallationOutcome {
    pub fn already_present(dependency: &Dependency) -> Self {
        Self {
            dependency: dependency.name.clone(),
            attempts: Vec::new(),
            final_state: FinalState::AlreadyPresent,
            message: None,
        }
    }

    pub fn is_failed(&self) -> bool {
        self.final_state == FinalState::Failed
    }

    /// Turn a failed required outcome into the fatal error it stands for.
    ///
    /// Returns `None` for every other outcome.
    pub fn escalate(&self, dependency: &Dependency) -> Option<SetupError> {
        if !self.is_failed() || !dependency.required {
            return None;
        }

        let hint = self
            .message
            .clone()
            .unwrap_or_else(|| dependency.install_hint.clone());

        if dependency.auto_installable {
            Some(SetupError::InstallationExhausted {
                dependency: dependency.name.clone(),
                attempts: self.attempts.len(),
                hint,
            })
        } else {
            Some(SetupError::MissingMandatoryDependency {
                dependency: dependency.name.clone(),
                hint,
            })
        }
    }
}
