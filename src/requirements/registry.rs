//! Dependency registry and definitions.
//!
//! Defines which external tools the host needs, how to detect them, and
//! whether the bootstrap may install them. The built-in set is fixed and
//! ordered by install priority.

use crate::requirements::probe::ProbeTarget;
use serde::Serialize;

/// The job a dependency does for the downstream application.
///
/// Strategy selection matches on the role rather than the tool name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DependencyRole {
    /// Infrastructure provisioning (terraform)
    ProvisioningCli,
    /// Cloud provider CLI (aws)
    CloudCli,
    /// Container runtime (docker)
    ContainerRuntime,
    /// Version control (git)
    VersionControl,
}

/// A dependency definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dependency {
    /// Dependency name (e.g., "terraform", "git")
    pub name: String,
    /// What the dependency is for
    pub role: DependencyRole,
    /// How presence is detected
    pub probe: ProbeTarget,
    /// Absence after installation is fatal
    pub required: bool,
    /// The bootstrap may try to install it
    pub auto_installable: bool,
    /// Human-readable install instructions
    pub install_hint: String,
}

impl Dependency {
    fn command(
        name: &str,
        role: DependencyRole,
        required: bool,
        auto_installable: bool,
        install_hint: &str,
    ) -> Self {
        Self {
            name: name.to_string(),
            role,
            probe: ProbeTarget::command(name),
            required,
            auto_installable,
            install_hint: install_hint.to_string(),
        }
    }

    /// Required but never installed by the bootstrap.
    ///
    /// These are checked before anything is installed.
    pub fn is_mandatory_manual(&self) -> bool {
        self.required && !self.auto_installable
    }
}

/// Registry of known dependencies in install priority order.
#[derive(Debug, Clone)]
pub struct DependencyRegistry {
    dependencies: Vec<Dependency>,
}

impl DependencyRegistry {
    /// Create a registry with the built-in dependencies.
    pub fn builtin() -> Self {
        Self {
            dependencies: vec![
                Dependency::command(
                    "terraform",
                    DependencyRole::ProvisioningCli,
                    true,
                    true,
                    "Install Terraform from https://developer.hashicorp.com/terraform/install",
                ),
                Dependency::command(
                    "aws",
                    DependencyRole::CloudCli,
                    true,
                    true,
                    "Install the AWS CLI from https://aws.amazon.com/cli/",
                ),
                Dependency::command(
                    "docker",
                    DependencyRole::ContainerRuntime,
                    false,
                    false,
                    "Install Docker from https://docs.docker.com/get-docker/",
                ),
                Dependency::command(
                    "git",
                    DependencyRole::VersionControl,
                    true,
                    false,
                    "Install git manually: https://git-scm.com/downloads",
                ),
            ],
        }
    }

    /// Create a registry from explicit definitions (priority = vector order).
    pub fn from_dependencies(dependencies: Vec<Dependency>) -> Self {
        Self { dependencies }
    }

    /// Look up a dependency by name.
    pub fn get(&self, name: &str) -> Option<&Dependency> {
        self.dependencies.iter().find(|d| d.name == name)
    }

    /// Dependencies in install priority order.
    pub fn iter(&self) -> impl Iterator<Item = &Dependency> {
        self.dependencies.iter()
    }

    /// Dependencies that must already be on the host.
    pub fn mandatory_manual(&self) -> impl Iterator<Item = &Dependency> {
        self.dependencies.iter().filter(|d| d.is_mandatory_manual())
    }

    pub fn len(&self) -> usize {
        self.dependencies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dependencies.is_empty()
    }
}

impl Default for DependencyRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}
