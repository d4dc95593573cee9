//! Generated project files.
//!
//! The materializer writes three files under the project root:
//!
//! - the environment template, rewritten on every run
//! - the live environment file, created from the template only when absent
//! - the systemd unit (Linux only)
//!
//! An existing live environment file is never read or modified.

pub mod templates;

use crate::config::ArtifactSettings;
use crate::error::{Result, SetupError};
use crate::platform::PlatformKind;
use std::collections::HashMap;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

/// What a materialize pass wrote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaterializeReport {
    /// Environment template path (always written)
    pub template_path: PathBuf,
    /// Live environment file path
    pub env_path: PathBuf,
    /// Whether the live environment file was created on this run
    pub env_created: bool,
    /// Service descriptor path, when one was written
    pub service_path: Option<PathBuf>,
}

/// Writes configuration artifacts into a project directory.
pub struct ArtifactMaterializer<'a> {
    project_root: &'a Path,
    settings: &'a ArtifactSettings,
}

impl<'a> ArtifactMaterializer<'a> {
    pub fn new(project_root: &'a Path, settings: &'a ArtifactSettings) -> Self {
        Self {
            project_root,
            settings,
        }
    }

    /// Write all artifacts for `platform`.
    ///
    /// # Errors
    ///
    /// Returns `ArtifactWriteError` for the first file that cannot be written.
    pub fn materialize(&self, platform: PlatformKind) -> Result<MaterializeReport> {
        let env_content = templates::load(templates::ENV_TEMPLATE)?;

        let template_path = self.project_root.join(&self.settings.env_template);
        write_file(&template_path, env_content)?;
        tracing::debug!("Wrote {}", template_path.display());

        let env_path = self.project_root.join(&self.settings.env_file);
        let env_created = create_if_absent(&env_path, env_content)?;
        if env_created {
            tracing::debug!("Created {}", env_path.display());
        } else {
            tracing::debug!("{} exists, leaving it untouched", env_path.display());
        }

        let service_path = if platform == PlatformKind::LinuxGnu {
            let path = self.project_root.join(&self.settings.service_file);
            write_file(&path, &self.render_service()?)?;
            tracing::debug!("Wrote {}", path.display());
            Some(path)
        } else {
            None
        };

        Ok(MaterializeReport {
            template_path,
            env_path,
            env_created,
            service_path,
        })
    }

    /// Render the systemd unit for this project.
    pub fn render_service(&self) -> Result<String> {
        let root = fs::canonicalize(self.project_root)
            .unwrap_or_else(|_| self.project_root.to_path_buf());

        let mut values = HashMap::new();
        values.insert("service_name", self.settings.service_name.clone());
        values.insert("project_root", root.display().to_string());
        values.insert("api_entry_point", self.settings.api_entry_point.clone());

        templates::render(templates::load(templates::SERVICE_TEMPLATE)?, &values)
    }
}

fn write_file(path: &Path, content: &str) -> Result<()> {
    fs::write(path, content).map_err(|source| SetupError::ArtifactWriteError {
        path: path.to_path_buf(),
        source,
    })
}

/// Create `path` with `content` unless something already exists there.
///
/// Uses `create_new` so an existing file is never opened for writing.
fn create_if_absent(path: &Path, content: &str) -> Result<bool> {
    let mut file = match OpenOptions::new().write(true).create_new(true).open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => return Ok(false),
        Err(source) => {
            return Err(SetupError::ArtifactWriteError {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    file.write_all(content.as_bytes())
        .map_err(|source| SetupError::ArtifactWriteError {
            path: path.to_path_buf(),
            source,
        })?;
    Ok(true)
}
