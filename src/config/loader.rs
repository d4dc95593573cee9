//! Configuration file discovery, loading and validation.

use crate::config::schema::SetupConfig;
use crate::error::{Result, SetupError};
use crate::requirements::probe::is_module_name;
use std::fs;
use std::path::{Path, PathBuf};

/// Default config location relative to the project root.
pub fn default_config_path(project_root: &Path) -> PathBuf {
    project_root.join(".autodeploy").join("setup.yml")
}

/// Load a single config file and parse it into SetupConfig.
///
/// # Errors
///
/// Returns `ConfigNotFound` if the file doesn't exist.
/// Returns `ConfigParseError` if the YAML is invalid.
pub fn load_config_file(path: &Path) -> Result<SetupConfig> {
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            SetupError::ConfigNotFound {
                path: path.to_path_buf(),
            }
        } else {
            SetupError::Io(e)
        }
    })?;

    parse_config(&content, path)
}

/// Parse YAML content into SetupConfig.
///
/// An empty document parses as the default configuration.
pub fn parse_config(content: &str, source_path: &Path) -> Result<SetupConfig> {
    if content.trim().is_empty() {
        return Ok(SetupConfig::default());
    }

    serde_yaml::from_str(content).map_err(|e| SetupError::ConfigParseError {
        path: source_path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Load config with optional path override, then validate it.
///
/// An explicit path must exist. Without one, `.autodeploy/setup.yml` is
/// used when present and defaults apply otherwise.
pub fn load_config(project_root: &Path, config_override: Option<&Path>) -> Result<SetupConfig> {
    let config = match config_override {
        Some(path) => load_config_file(path)?,
        None => {
            let path = default_config_path(project_root);
            if path.exists() {
                load_config_file(&path)?
            } else {
                tracing::debug!("No config at {}, using defaults", path.display());
                SetupConfig::default()
            }
        }
    };

    validate(&config)?;
    Ok(config)
}

/// Validate configuration values.
///
/// Collects every problem before failing so all of them are reported at once.
pub fn validate(config: &SetupConfig) -> Result<()> {
    let mut problems = Vec::new();

    let version = config.tools.terraform_version.trim();
    if version.is_empty() {
        problems.push("tools.terraform_version must not be empty".to_string());
    } else if version.contains('/') || version.contains(char::is_whitespace) {
        problems.push(format!(
            "tools.terraform_version '{}' is not a release version",
            version
        ));
    }

    for library in &config.verification.libraries {
        if !is_module_name(library) {
            problems.push(format!(
                "verification.libraries entry '{}' is not an importable module name",
                library
            ));
        }
    }

    for command in &config.verification.commands {
        if command.trim().is_empty() || command.contains('/') {
            problems.push(format!(
                "verification.commands entry '{}' must be a bare command name",
                command
            ));
        }
    }

    if config.network.timeout_secs == 0 {
        problems.push("network.timeout_secs must be greater than zero".to_string());
    }

    if problems.is_empty() {
        Ok(())
    } else {
        Err(SetupError::ConfigValidationError {
            message: problems.join("; "),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_project_config(root: &Path, content: &str) {
        let dir = root.join(".autodeploy");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("setup.yml"), content).unwrap();
    }

    #[test]
    fn missing_default_config_uses_defaults() {
        let temp = TempDir::new().unwrap();
        let config = load_config(temp.path(), None).unwrap();
        assert_eq!(config, SetupConfig::default());
    }

    #[test]
    fn project_config_is_discovered() {
        let temp = TempDir::new().unwrap();
        write_project_config(temp.path(), "tools:\n  terraform_version: \"1.8.2\"\n");

        let config = load_config(temp.path(), None).unwrap();
        assert_eq!(config.tools.terraform_version, "1.8.2");
    }

    #[test]
    fn explicit_config_must_exist() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("nope.yml");

        let err = load_config(temp.path(), Some(&missing)).unwrap_err();
        assert!(matches!(err, SetupError::ConfigNotFound { .. }));
    }

    #[test]
    fn explicit_config_overrides_discovery() {
        let temp = TempDir::new().unwrap();
        write_project_config(temp.path(), "network:\n  timeout_secs: 5\n");
        let other = temp.path().join("other.yml");
        fs::write(&other, "network:\n  timeout_secs: 30\n").unwrap();

        let config = load_config(temp.path(), Some(&other)).unwrap();
        assert_eq!(config.network.timeout_secs, 30);
    }

    #[test]
    fn invalid_yaml_is_parse_error() {
        let temp = TempDir::new().unwrap();
        write_project_config(temp.path(), "tools: [unclosed");

        let err = load_config(temp.path(), None).unwrap_err();
        assert!(matches!(err, SetupError::ConfigParseError { .. }));
    }

    #[test]
    fn empty_file_is_defaults() {
        let config = parse_config("  \n", Path::new("setup.yml")).unwrap();
        assert_eq!(config, SetupConfig::default());
    }

    #[test]
    fn validate_rejects_bad_library_names() {
        let mut config = SetupConfig::default();
        config.verification.libraries = vec!["fastapi".into(), "os; rm -rf".into()];

        let err = validate(&config).unwrap_err();
        assert!(err.to_string().contains("os; rm -rf"));
    }

    #[test]
    fn validate_accepts_dotted_modules() {
        let mut config = SetupConfig::default();
        config.verification.libraries = vec!["google.cloud.storage".into(), "_private".into()];
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn validate_collects_multiple_problems() {
        let mut config = SetupConfig::default();
        config.tools.terraform_version = "  ".into();
        config.network.timeout_secs = 0;

        let message = validate(&config).unwrap_err().to_string();
        assert!(message.contains("terraform_version"));
        assert!(message.contains("timeout_secs"));
    }

    #[test]
    fn validate_rejects_command_paths() {
        let mut config = SetupConfig::default();
        config.verification.commands = vec!["/usr/bin/git".into()];
        assert!(matches!(
            validate(&config),
            Err(SetupError::ConfigValidationError { .. })
        ));
    }
}
