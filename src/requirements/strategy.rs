//! Installation strategy selection.
//!
//! For each dependency and platform there is a fixed, ordered list of ways
//! to install it. A strategy is a named sequence of [`InstallAction`]s; the
//! installer tries strategies in order and stops at the first one whose
//! result is confirmed by a fresh probe.

use crate::config::ToolSettings;
use crate::platform::PlatformKind;
use crate::requirements::registry::{Dependency, DependencyRole};
use std::fmt;
use std::path::PathBuf;

/// A single external side effect performed while installing a tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstallAction {
    /// Fetch a URL into a local file.
    Download { url: String, dest: PathBuf },
    /// Extract a zip archive into a directory.
    Unpack { archive: PathBuf, dest: PathBuf },
    /// Move an executable into the install bin directory.
    MoveIntoPath { source: PathBuf, bin_dir: PathBuf },
    /// Run a vendor-supplied installer.
    RunInstaller {
        program: PathBuf,
        args: Vec<String>,
        privileged: bool,
    },
    /// Install a package with the platform package manager.
    PackageManager { manager: String, package: String },
    /// Delete a file or directory created by an earlier action.
    Remove { path: PathBuf },
}

impl InstallAction {
    /// Human-readable description for status lines and `plan` output.
    pub fn describe(&self) -> String {
        match self {
            InstallAction::Download { url, dest } => {
                format!("download {} to {}", url, dest.display())
            }
            InstallAction::Unpack { archive, dest } => {
                format!("unpack {} into {}", archive.display(), dest.display())
            }
            InstallAction::MoveIntoPath { source, bin_dir } => {
                format!("move {} into {}", source.display(), bin_dir.display())
            }
            InstallAction::RunInstaller {
                program,
                args,
                privileged,
            } => {
                let mut line = format!("run {}", program.display());
                if !args.is_empty() {
                    line.push(' ');
                    line.push_str(&args.join(" "));
                }
                if *privileged {
                    line.push_str(" (privileged)");
                }
                line
            }
            InstallAction::PackageManager { manager, package } => {
                format!("{} install {}", manager, package)
            }
            InstallAction::Remove { path } => format!("remove {}", path.display()),
        }
    }
}

impl fmt::Display for InstallAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.describe())
    }
}

/// A named, ordered sequence of install actions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallStrategy {
    pub label: String,
    pub actions: Vec<InstallAction>,
}

/// Strategies to try for one dependency.
///
/// `manual_instruction` is set when no automatic route exists and the user
/// has to act; it is always the last word for that dependency.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StrategyPlan {
    pub strategies: Vec<InstallStrategy>,
    pub manual_instruction: Option<String>,
}

impl StrategyPlan {
    fn single(strategy: InstallStrategy) -> Self {
        Self {
            strategies: vec![strategy],
            manual_instruction: None,
        }
    }

    fn manual(instruction: String) -> Self {
        Self {
            strategies: Vec::new(),
            manual_instruction: Some(instruction),
        }
    }

    /// Nothing to try and nothing to tell the user.
    pub fn is_empty(&self) -> bool {
        self.strategies.is_empty() && self.manual_instruction.is_none()
    }
}

/// CPU architecture, as far as release artifact names care.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostArch {
    X86_64,
    Aarch64,
    Other,
}

impl HostArch {
    /// Architecture this binary was built for.
    pub fn current() -> Self {
        match std::env::consts::ARCH {
            "x86_64" => HostArch::X86_64,
            "aarch64" => HostArch::Aarch64,
            _ => HostArch::Other,
        }
    }

    /// Go-style name used by HashiCorp release archives.
    fn hashicorp(&self) -> Option<&'static str> {
        match self {
            HostArch::X86_64 => Some("amd64"),
            HostArch::Aarch64 => Some("arm64"),
            HostArch::Other => None,
        }
    }

    /// Kernel-style name used by the AWS CLI bundle.
    fn kernel(&self) -> Option<&'static str> {
        match self {
            HostArch::X86_64 => Some("x86_64"),
            HostArch::Aarch64 => Some("aarch64"),
            HostArch::Other => None,
        }
    }
}

/// Source of install strategies for the installer.
pub trait StrategySource {
    /// Ordered strategies for `dependency` on `platform`, highest priority first.
    fn plan_for(
        &self,
        dependency: &Dependency,
        platform: PlatformKind,
        package_manager_present: bool,
    ) -> StrategyPlan;
}

/// Chooses install strategies from a fixed policy table.
#[derive(Debug, Clone)]
pub struct StrategySelector {
    terraform_version: String,
    bin_dir: PathBuf,
    work_dir: PathBuf,
    arch: HostArch,
}

impl StrategySelector {
    pub fn new(tools: &ToolSettings, arch: HostArch) -> Self {
        Self {
            terraform_version: tools.terraform_version.clone(),
            bin_dir: tools.bin_dir.clone(),
            work_dir: tools.resolved_work_dir(),
            arch,
        }
    }

    /// Ordered strategies for `dependency` on `platform`.
    ///
    /// `package_manager_present` reports whether Homebrew is available; it
    /// only matters on macOS.
    pub fn strategies_for(
        &self,
        dependency: &Dependency,
        platform: PlatformKind,
        package_manager_present: bool,
    ) -> StrategyPlan {
        if !dependency.auto_installable {
            return StrategyPlan::default();
        }

        match (platform, dependency.role) {
            (_, DependencyRole::ContainerRuntime | DependencyRole::VersionControl) => {
                StrategyPlan::default()
            }
            (PlatformKind::LinuxGnu, DependencyRole::ProvisioningCli) => {
                self.linux_terraform(dependency)
            }
            (PlatformKind::LinuxGnu, DependencyRole::CloudCli) => self.linux_awscli(dependency),
            (PlatformKind::Darwin, role) => {
                let package = match role {
                    DependencyRole::CloudCli => "awscli",
                    _ => dependency.name.as_str(),
                };
                if package_manager_present {
                    StrategyPlan::single(InstallStrategy {
                        label: "homebrew".to_string(),
                        actions: vec![InstallAction::PackageManager {
                            manager: "brew".to_string(),
                            package: package.to_string(),
                        }],
                    })
                } else {
                    StrategyPlan::manual(format!(
                        "Homebrew not found. Install it from https://brew.sh and run \
                         'brew install {}', or {}",
                        package,
                        lowercase_first(&dependency.install_hint)
                    ))
                }
            }
            (PlatformKind::Unsupported, _) => {
                StrategyPlan::manual(dependency.install_hint.clone())
            }
        }
    }

    fn linux_terraform(&self, dependency: &Dependency) -> StrategyPlan {
        let Some(arch) = self.arch.hashicorp() else {
            return self.unsupported_arch(dependency);
        };

        let version = &self.terraform_version;
        let file = format!("terraform_{}_linux_{}.zip", version, arch);
        let archive = self.work_dir.join(&file);

        StrategyPlan::single(InstallStrategy {
            label: "hashicorp-release".to_string(),
            actions: vec![
                InstallAction::Download {
                    url: format!(
                        "https://releases.hashicorp.com/terraform/{}/{}",
                        version, file
                    ),
                    dest: archive.clone(),
                },
                InstallAction::Unpack {
                    archive: archive.clone(),
                    dest: self.work_dir.clone(),
                },
                InstallAction::MoveIntoPath {
                    source: self.work_dir.join("terraform"),
                    bin_dir: self.bin_dir.clone(),
                },
                InstallAction::Remove { path: archive },
            ],
        })
    }

    fn linux_awscli(&self, dependency: &Dependency) -> StrategyPlan {
        let Some(arch) = self.arch.kernel() else {
            return self.unsupported_arch(dependency);
        };

        let archive = self.work_dir.join("awscliv2.zip");
        let unpacked = self.work_dir.join("aws");

        StrategyPlan::single(InstallStrategy {
            label: "awscli-bundle".to_string(),
            actions: vec![
                InstallAction::Download {
                    url: format!("https://awscli.amazonaws.com/awscli-exe-linux-{}.zip", arch),
                    dest: archive.clone(),
                },
                InstallAction::Unpack {
                    archive: archive.clone(),
                    dest: self.work_dir.clone(),
                },
                InstallAction::RunInstaller {
                    program: unpacked.join("install"),
                    args: vec![
                        "--bin-dir".to_string(),
                        self.bin_dir.display().to_string(),
                        "--update".to_string(),
                    ],
                    privileged: true,
                },
                InstallAction::Remove { path: archive },
                InstallAction::Remove { path: unpacked },
            ],
        })
    }

    fn unsupported_arch(&self, dependency: &Dependency) -> StrategyPlan {
        StrategyPlan::manual(format!(
            "No prebuilt {} download for {} hosts. {}",
            dependency.name,
            std::env::consts::ARCH,
            dependency.install_hint
        ))
    }
}

impl StrategySource for StrategySelector {
    fn plan_for(
        &self,
        dependency: &Dependency,
        platform: PlatformKind,
        package_manager_present: bool,
    ) -> StrategyPlan {
        self.strategies_for(dependency, platform, package_manager_present)
    }
}

fn lowercase_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}
