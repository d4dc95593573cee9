//! Bootstrap pipeline.
//!
//! Order of work:
//!
//! 1. classify the host, abort on an unsupported platform
//! 2. check the mandatory tools that are never installed automatically
//! 3. ensure each dependency in priority order, aborting on a required failure
//! 4. write the project artifacts
//! 5. verify readiness and print the summary

use std::path::Path;
use std::time::{Duration, Instant};

use crate::artifacts::{ArtifactMaterializer, MaterializeReport};
use crate::config::SetupConfig;
use crate::error::{Result, SetupError};
use crate::platform::{detect, PlatformKind};
use crate::requirements::{
    ActionRunner, Dependency, DependencyInstaller, DependencyRegistry, FinalState, HostArch,
    InstallationOutcome, Probe, StrategySelector,
};
use crate::ui::{hints, RunSummary, SpinnerHandle, StatusKind, SummaryRow, UserInterface};
use crate::verify::{verify, ReadinessReport};

/// Everything a completed run produced.
#[derive(Debug, Clone)]
pub struct BootstrapSummary {
    pub platform: PlatformKind,
    pub outcomes: Vec<InstallationOutcome>,
    pub materialized: MaterializeReport,
    pub report: ReadinessReport,
    pub duration: Duration,
}

impl BootstrapSummary {
    /// Process exit code for this run.
    pub fn exit_code(&self) -> i32 {
        if self.report.overall_ready {
            0
        } else {
            1
        }
    }

    /// Outcome for a dependency by name.
    pub fn outcome(&self, dependency: &str) -> Option<&InstallationOutcome> {
        self.outcomes.iter().find(|o| o.dependency == dependency)
    }
}

/// Orchestrates a full bootstrap run.
pub struct BootstrapPipeline<'a> {
    config: &'a SetupConfig,
    project_root: &'a Path,
    registry: DependencyRegistry,
    probe: &'a dyn Probe,
    runner: &'a mut dyn ActionRunner,
    arch: HostArch,
}

impl<'a> BootstrapPipeline<'a> {
    pub fn new(
        config: &'a SetupConfig,
        project_root: &'a Path,
        probe: &'a dyn Probe,
        runner: &'a mut dyn ActionRunner,
    ) -> Self {
        Self {
            config,
            project_root,
            registry: DependencyRegistry::builtin(),
            probe,
            runner,
            arch: HostArch::current(),
        }
    }

    /// Override the host architecture used to pick release archives.
    pub fn with_arch(mut self, arch: HostArch) -> Self {
        self.arch = arch;
        self
    }

    /// Replace the built-in dependency set.
    pub fn with_registry(mut self, registry: DependencyRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Run the whole bootstrap for the host described by `signal`.
    ///
    /// Fatal conditions come back as errors. A run that completes but
    /// fails verification returns `Ok` with a non-zero
    /// [`BootstrapSummary::exit_code`].
    pub fn run(&mut self, signal: &str, ui: &mut dyn UserInterface) -> Result<BootstrapSummary> {
        let start = Instant::now();

        let platform = detect(signal);
        if !platform.is_supported() {
            return Err(SetupError::UnsupportedPlatform {
                signal: signal.to_string(),
            });
        }
        tracing::debug!("Host signal '{}' classified as {}", signal, platform);

        ui.show_header(&format!("Preparing {} host", platform));

        self.check_mandatory(ui)?;

        ui.show_section("Dependencies");
        let outcomes = self.ensure_all(platform, ui)?;

        let materialized =
            ArtifactMaterializer::new(self.project_root, &self.config.artifacts)
                .materialize(platform)?;
        report_artifacts(&materialized, ui);

        let verification = &self.config.verification;
        let report = verify(self.probe, &verification.libraries, &verification.commands);
        report.render(ui);
        if let Err(e) = report.ensure_ready() {
            tracing::warn!("{}", e);
        }

        let duration = start.elapsed();
        ui.show_run_summary(&build_summary(&outcomes, &report, duration));
        self.show_next_steps(&report, ui);

        Ok(BootstrapSummary {
            platform,
            outcomes,
            materialized,
            report,
            duration,
        })
    }

    fn check_mandatory(&self, ui: &mut dyn UserInterface) -> Result<()> {
        for dependency in self.registry.mandatory_manual() {
            if self.probe.probe(&dependency.probe) {
                continue;
            }

            ui.error(&format!("{} is required but was not found", dependency.name));
            ui.show_hint(&hints::install_command(&dependency.install_hint));
            return Err(SetupError::MissingMandatoryDependency {
                dependency: dependency.name.clone(),
                hint: dependency.install_hint.clone(),
            });
        }
        Ok(())
    }

    fn ensure_all(
        &mut self,
        platform: PlatformKind,
        ui: &mut dyn UserInterface,
    ) -> Result<Vec<InstallationOutcome>> {
        let selector = StrategySelector::new(&self.config.tools, self.arch);
        let mut installer = DependencyInstaller::new(self.probe, &mut *self.runner, &selector);
        let mut outcomes = Vec::with_capacity(self.registry.len());

        for dependency in self.registry.iter() {
            let mut spinner = ui.start_spinner(&format!("Checking {}", dependency.name));
            let outcome = installer.ensure(dependency, platform);
            finish_spinner(spinner.as_mut(), dependency, &outcome);

            for attempt in outcome.attempts.iter().filter(|a| !a.is_confirmed()) {
                ui.warning(&attempt.summary());
            }
            if outcome.final_state == FinalState::SkippedOptional {
                ui.warning(&format!(
                    "{} is optional and was not installed. {}",
                    dependency.name, dependency.install_hint
                ));
            }

            if let Some(err) = outcome.escalate(dependency) {
                if let Some(message) = &outcome.message {
                    ui.show_hint(message);
                }
                ui.show_hint(hints::after_failure());
                return Err(err);
            }

            outcomes.push(outcome);
        }

        Ok(outcomes)
    }

    fn show_next_steps(&self, report: &ReadinessReport, ui: &mut dyn UserInterface) {
        let artifacts = &self.config.artifacts;
        if report.overall_ready {
            for hint in hints::after_ready(&artifacts.api_entry_point, &artifacts.cli_entry_point) {
                ui.show_hint(&hint);
            }
            return;
        }

        let libraries = report.missing_libraries();
        if !libraries.is_empty() {
            let interpreter = self
                .config
                .verification
                .resolved_interpreter(self.project_root);
            ui.show_hint(&hints::install_libraries(&interpreter, &libraries));
        }
        for name in report.missing() {
            if let Some(dependency) = self.registry.get(name) {
                ui.show_hint(&hints::install_command(&dependency.install_hint));
            }
        }
        ui.show_hint(hints::after_failure());
    }
}

fn finish_spinner(
    spinner: &mut dyn SpinnerHandle,
    dependency: &Dependency,
    outcome: &InstallationOutcome,
) {
    match &outcome.final_state {
        FinalState::AlreadyPresent => {
            spinner.finish_success(&format!("{} already present", dependency.name))
        }
        FinalState::InstalledVia(label) => {
            spinner.finish_success(&format!("{} installed via {}", dependency.name, label))
        }
        FinalState::SkippedOptional => {
            spinner.finish_skipped(&format!("{} not found (optional)", dependency.name))
        }
        FinalState::Failed => {
            spinner.finish_error(&format!("{} could not be installed", dependency.name))
        }
    }
}

fn report_artifacts(materialized: &MaterializeReport, ui: &mut dyn UserInterface) {
    ui.show_section("Artifacts");
    ui.success(&format!("Wrote {}", materialized.template_path.display()));
    if materialized.env_created {
        ui.success(&format!("Created {}", materialized.env_path.display()));
    } else {
        ui.skipped(&format!("{} exists, left unchanged", materialized.env_path.display()));
    }
    if let Some(service) = &materialized.service_path {
        ui.success(&format!("Wrote {}", service.display()));
    }
}

fn build_summary(
    outcomes: &[InstallationOutcome],
    report: &ReadinessReport,
    duration: Duration,
) -> RunSummary {
    let mut rows: Vec<SummaryRow> = outcomes
        .iter()
        .map(|outcome| {
            let (status, detail) = match &outcome.final_state {
                FinalState::AlreadyPresent => (StatusKind::Success, "already present".to_string()),
                FinalState::InstalledVia(label) => {
                    (StatusKind::Success, format!("installed via {}", label))
                }
                FinalState::SkippedOptional => (StatusKind::Skipped, "optional, not found".to_string()),
                FinalState::Failed => (StatusKind::Failed, "not installed".to_string()),
            };
            SummaryRow {
                name: outcome.dependency.clone(),
                status,
                detail,
            }
        })
        .collect();

    let passed = report.items.iter().filter(|i| i.present).count();
    rows.push(SummaryRow {
        name: "verification".to_string(),
        status: report.status(),
        detail: format!("{}/{} checks passed", passed, report.items.len()),
    });

    RunSummary {
        rows,
        total_duration: duration,
        ready: report.overall_ready,
    }
}
