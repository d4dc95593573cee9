//! Dependency installation.
//!
//! `ensure` probes a dependency and, when it is absent and installable,
//! folds over the selected strategies in order. A strategy counts only when
//! a fresh probe confirms the tool afterwards; the first confirmed strategy
//! ends the fold.

use crate::platform::PlatformKind;
use crate::requirements::actions::ActionRunner;
use crate::requirements::probe::{Probe, ProbeTarget};
use crate::requirements::registry::Dependency;
use crate::requirements::status::{
    AttemptResult, FinalState, InstallationOutcome, StrategyAttempt,
};
use crate::requirements::strategy::{InstallStrategy, StrategySource};

/// Package manager consulted on macOS.
const PACKAGE_MANAGER: &str = "brew";

/// Ensures dependencies are present, installing them when allowed.
pub struct DependencyInstaller<'a> {
    probe: &'a dyn Probe,
    runner: &'a mut dyn ActionRunner,
    strategies: &'a dyn StrategySource,
}

impl<'a> DependencyInstaller<'a> {
    pub fn new(
        probe: &'a dyn Probe,
        runner: &'a mut dyn ActionRunner,
        strategies: &'a dyn StrategySource,
    ) -> Self {
        Self {
            probe,
            runner,
            strategies,
        }
    }

    /// Make sure `dependency` is present on `platform`.
    ///
    /// Never returns an error: strategy failures are recorded in the
    /// outcome. Use [`InstallationOutcome::escalate`] to decide whether the
    /// result is fatal.
    pub fn ensure(&mut self, dependency: &Dependency, platform: PlatformKind) -> InstallationOutcome {
        if self.probe.probe(&dependency.probe) {
            tracing::debug!("{} already present", dependency.name);
            return InstallationOutcome::already_present(dependency);
        }

        if !dependency.auto_installable {
            return absent_outcome(dependency, Vec::new(), Some(dependency.install_hint.clone()));
        }

        let package_manager_present = platform == PlatformKind::Darwin
            && self.probe.probe(&ProbeTarget::command(PACKAGE_MANAGER));
        let plan = self
            .strategies
            .plan_for(dependency, platform, package_manager_present);

        let mut attempts = Vec::with_capacity(plan.strategies.len());
        for strategy in &plan.strategies {
            let result = self.attempt(dependency, strategy);
            let confirmed = result == AttemptResult::Confirmed;
            attempts.push(StrategyAttempt {
                label: strategy.label.clone(),
                result,
            });

            if confirmed {
                tracing::info!("Installed {} via {}", dependency.name, strategy.label);
                return InstallationOutcome {
                    dependency: dependency.name.clone(),
                    attempts,
                    final_state: FinalState::InstalledVia(strategy.label.clone()),
                    message: None,
                };
            }
        }

        let message = plan
            .manual_instruction
            .or_else(|| Some(dependency.install_hint.clone()));
        absent_outcome(dependency, attempts, message)
    }

    fn attempt(&mut self, dependency: &Dependency, strategy: &InstallStrategy) -> AttemptResult {
        for action in &strategy.actions {
            if let Err(e) = self.runner.run(action) {
                tracing::warn!(
                    "Strategy '{}' for {} failed: {}",
                    strategy.label,
                    dependency.name,
                    e
                );
                return AttemptResult::ActionFailed(e.to_string());
            }
        }

        if self.probe.probe(&dependency.probe) {
            AttemptResult::Confirmed
        } else {
            tracing::warn!(
                "Strategy '{}' finished but {} is still not detected",
                strategy.label,
                dependency.name
            );
            AttemptResult::NotDetected
        }
    }
}

fn absent_outcome(
    dependency: &Dependency,
    attempts: Vec<StrategyAttempt>,
    message: Option<String>,
) -> InstallationOutcome {
    let final_state = if dependency.required {
        FinalState::Failed
    } else {
        FinalState::SkippedOptional
    };

    InstallationOutcome {
        dependency: dependency.name.clone(),
        attempts,
        final_state,
        message,
    }
}
