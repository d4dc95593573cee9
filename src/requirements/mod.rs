//! Dependency detection and installation.
//!
//! - [`probe`] answers whether a command or library is usable
//! - [`registry`] lists the tools the host needs, in install priority order
//! - [`strategy`] maps a dependency and platform to install strategies
//! - [`actions`] performs the side effects a strategy describes
//! - [`installer`] ties them together per dependency
//! - [`status`] records what happened

pub mod actions;
pub mod installer;
pub mod probe;
pub mod registry;
pub mod status;
pub mod strategy;

pub use actions::{ActionRunner, HostActionRunner};
pub use installer::DependencyInstaller;
pub use probe::{HostProbe, Probe, ProbeKind, ProbeTarget};
pub use registry::{Dependency, DependencyRegistry, DependencyRole};
pub use status::{AttemptResult, FinalState, InstallationOutcome, StrategyAttempt};
pub use strategy::{
    HostArch, InstallAction, InstallStrategy, StrategyPlan, StrategySelector, StrategySource,
};
