//! Dry-run planning.
//!
//! Shows what a bootstrap would do on this host without running any
//! install action or writing any file.

use crate::config::SetupConfig;
use crate::error::{Result, SetupError};
use crate::platform::{detect, PlatformKind};
use crate::requirements::{
    Dependency, DependencyRegistry, HostArch, Probe, ProbeTarget, StrategyPlan, StrategySelector,
};
use crate::ui::UserInterface;

/// What the bootstrap would do for one dependency.
#[derive(Debug, Clone)]
pub struct PlannedDependency {
    pub dependency: Dependency,
    pub present: bool,
    pub plan: StrategyPlan,
}

/// Planned work for the whole host.
#[derive(Debug, Clone)]
pub struct BootstrapPlan {
    pub platform: PlatformKind,
    pub items: Vec<PlannedDependency>,
}

impl BootstrapPlan {
    /// Print the plan, one block per dependency.
    pub fn render(&self, ui: &mut dyn UserInterface) {
        ui.show_header(&format!("Plan for {} host", self.platform));

        for item in &self.items {
            let name = &item.dependency.name;
            if item.present {
                ui.success(&format!("{}: present, nothing to do", name));
                continue;
            }

            if !item.dependency.auto_installable {
                let line = format!("{}: missing, {}", name, item.dependency.install_hint);
                if item.dependency.required {
                    ui.error(&line);
                } else {
                    ui.skipped(&line);
                }
                continue;
            }

            ui.warning(&format!("{}: missing", name));
            for (index, strategy) in item.plan.strategies.iter().enumerate() {
                ui.message(&format!("  {}. {}", index + 1, strategy.label));
                for action in &strategy.actions {
                    ui.message(&format!("     - {}", action));
                }
            }
            if let Some(instruction) = &item.plan.manual_instruction {
                ui.show_hint(instruction);
            }
        }
    }
}

/// Probe every dependency and collect the strategies `run` would try.
pub fn plan(
    config: &SetupConfig,
    probe: &dyn Probe,
    signal: &str,
    arch: HostArch,
) -> Result<BootstrapPlan> {
    let platform = detect(signal);
    if !platform.is_supported() {
        return Err(SetupError::UnsupportedPlatform {
            signal: signal.to_string(),
        });
    }

    let selector = StrategySelector::new(&config.tools, arch);
    let package_manager_present =
        platform == PlatformKind::Darwin && probe.probe(&ProbeTarget::command("brew"));

    let items = DependencyRegistry::builtin()
        .iter()
        .map(|dependency| {
            let present = probe.probe(&dependency.probe);
            let plan = if present {
                StrategyPlan::default()
            } else {
                selector.strategies_for(dependency, platform, package_manager_present)
            };
            PlannedDependency {
                dependency: dependency.clone(),
                present,
                plan,
            }
        })
        .collect();

    Ok(BootstrapPlan { platform, items })
}
