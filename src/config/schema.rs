//! Configuration schema for `.autodeploy/setup.yml`.
//!
//! Every key is optional; an absent file is equivalent to an empty one.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Root configuration structure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SetupConfig {
    /// Tool installation settings
    pub tools: ToolSettings,

    /// Readiness check settings
    pub verification: VerificationSettings,

    /// Generated file names and downstream entry points
    pub artifacts: ArtifactSettings,

    /// Download settings
    pub network: NetworkSettings,
}

/// Where and which versions of tools get installed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolSettings {
    /// Terraform release to download on Linux
    pub terraform_version: String,

    /// Directory downloaded binaries are moved into
    pub bin_dir: PathBuf,

    /// Scratch directory for archives (defaults to the system temp dir)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub work_dir: Option<PathBuf>,

    /// Extra directories searched when probing for commands
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extra_path: Vec<PathBuf>,
}

impl Default for ToolSettings {
    fn default() -> Self {
        Self {
            terraform_version: default_terraform_version(),
            bin_dir: PathBuf::from("/usr/local/bin"),
            work_dir: None,
            extra_path: Vec::new(),
        }
    }
}

impl ToolSettings {
    /// Resolve the scratch directory.
    pub fn resolved_work_dir(&self) -> PathBuf {
        self.work_dir
            .clone()
            .unwrap_or_else(|| std::env::temp_dir().join("autodeploy-setup"))
    }
}

fn default_terraform_version() -> String {
    "1.6.6".to_string()
}

/// What the readiness check probes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VerificationSettings {
    /// Interpreter used for import checks
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interpreter: Option<String>,

    /// Importable libraries, probed in order
    pub libraries: Vec<String>,

    /// Commands, probed in order after the libraries
    pub commands: Vec<String>,
}

impl Default for VerificationSettings {
    fn default() -> Self {
        Self {
            interpreter: None,
            libraries: [
                "fastapi", "uvicorn", "pydantic", "openai", "requests", "git", "paramiko",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            commands: ["terraform", "aws", "git"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

impl VerificationSettings {
    /// Resolve the interpreter for a project.
    ///
    /// An explicit setting wins; otherwise the project's `venv/bin/python`
    /// is used when it exists, and `python3` from the search path if not.
    pub fn resolved_interpreter(&self, project_root: &Path) -> String {
        if let Some(interpreter) = &self.interpreter {
            return interpreter.clone();
        }

        let venv = project_root.join("venv").join("bin").join("python");
        if venv.is_file() {
            venv.display().to_string()
        } else {
            "python3".to_string()
        }
    }
}

/// Generated artifact names and the downstream commands they reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArtifactSettings {
    /// Environment template, rewritten on every run
    pub env_template: PathBuf,

    /// Live environment file, created only when absent
    pub env_file: PathBuf,

    /// systemd unit file (Linux only)
    pub service_file: PathBuf,

    /// Unit description
    pub service_name: String,

    /// Command that starts the API server
    pub api_entry_point: String,

    /// Deployment client usage shown after setup
    pub cli_entry_point: String,
}

impl Default for ArtifactSettings {
    fn default() -> Self {
        Self {
            env_template: PathBuf::from(".env.template"),
            env_file: PathBuf::from(".env"),
            service_file: PathBuf::from("autodeploy.service"),
            service_name: "Autodeployment Chat System API".to_string(),
            api_entry_point: "python main.py".to_string(),
            cli_entry_point: "python cli.py deploy \"<description>\" <repository-url>"
                .to_string(),
        }
    }
}

/// Download settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkSettings {
    /// Per-download timeout in seconds
    pub timeout_secs: u64,
}

impl Default for NetworkSettings {
    fn default() -> Self {
        Self { timeout_secs: 120 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn empty_yaml_yields_defaults() {
        let config: SetupConfig = serde_yaml::from_str("{}").unwrap();
        assert_eq!(config, SetupConfig::default());
        assert_eq!(config.tools.terraform_version, "1.6.6");
        assert_eq!(config.network.timeout_secs, 120);
        assert_eq!(config.verification.commands, vec!["terraform", "aws", "git"]);
    }

    #[test]
    fn partial_section_keeps_other_defaults() {
        let yaml = r#"
tools:
  terraform_version: "1.7.0"
verification:
  commands: [git]
"#;
        let config: SetupConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.tools.terraform_version, "1.7.0");
        assert_eq!(config.tools.bin_dir, PathBuf::from("/usr/local/bin"));
        assert_eq!(config.verification.commands, vec!["git"]);
        assert_eq!(config.verification.libraries.len(), 7);
    }

    #[test]
    fn default_libraries_match_downstream_imports() {
        let libs = VerificationSettings::default().libraries;
        assert_eq!(
            libs,
            vec!["fastapi", "uvicorn", "pydantic", "openai", "requests", "git", "paramiko"]
        );
    }

    #[test]
    fn interpreter_prefers_project_venv() {
        let temp = TempDir::new().unwrap();
        let settings = VerificationSettings::default();
        assert_eq!(settings.resolved_interpreter(temp.path()), "python3");

        let bin = temp.path().join("venv").join("bin");
        std::fs::create_dir_all(&bin).unwrap();
        std::fs::write(bin.join("python"), "").unwrap();
        assert_eq!(
            settings.resolved_interpreter(temp.path()),
            bin.join("python").display().to_string()
        );
    }

    #[test]
    fn explicit_interpreter_wins() {
        let settings = VerificationSettings {
            interpreter: Some("/opt/py/bin/python3.11".to_string()),
            ..Default::default()
        };
        assert_eq!(
            settings.resolved_interpreter(Path::new("/nonexistent")),
            "/opt/py/bin/python3.11"
        );
    }

    #[test]
    fn work_dir_defaults_under_temp() {
        let tools = ToolSettings::default();
        assert!(tools.resolved_work_dir().ends_with("autodeploy-setup"));
    }
}
