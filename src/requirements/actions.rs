//! Execution of install actions against the host.
//!
//! [`ActionRunner`] is the seam between the installer's decision logic and
//! real side effects. [`HostActionRunner`] downloads with `reqwest`, unpacks
//! with `unzip`, and shells out for moves, vendor installers and Homebrew.

use crate::error::{Result, SetupError};
use crate::requirements::strategy::InstallAction;
use crate::shell::command::{display_command, execute, CommandOptions};
use crate::shell::platform::{is_elevated, privileged};
use anyhow::{bail, Context};
use reqwest::blocking::Client;
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Performs install actions.
pub trait ActionRunner {
    /// Run one action to completion.
    ///
    /// Any error ends the current strategy.
    fn run(&mut self, action: &InstallAction) -> Result<()>;
}

/// Runs actions on the real host.
pub struct HostActionRunner {
    client: Client,
    timeout: Duration,
    elevated: bool,
}

impl HostActionRunner {
    /// Create a runner whose downloads time out after `timeout`.
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("autodeploy-setup/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            timeout,
            elevated: is_elevated(),
        })
    }

    /// Get the configured timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    fn download(&self, url: &str, dest: &Path) -> Result<()> {
        self.fetch_to_file(url, dest).map_err(|e| {
            discard(dest);
            SetupError::DownloadFailed {
                url: url.to_string(),
                message: format!("{:#}", e),
            }
        })
    }

    fn fetch_to_file(&self, url: &str, dest: &Path) -> anyhow::Result<()> {
        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }

        let mut response = self.client.get(url).send()?;
        if !response.status().is_success() {
            bail!("HTTP {}", response.status());
        }

        let mut file =
            fs::File::create(dest).with_context(|| format!("creating {}", dest.display()))?;
        let bytes = response.copy_to(&mut file)?;
        tracing::debug!("Downloaded {} bytes from {}", bytes, url);
        Ok(())
    }

    fn command(&self, action: &InstallAction, program: &str, args: Vec<String>) -> Result<()> {
        let result = execute(program, &args, &CommandOptions::captured()).map_err(|_| {
            SetupError::ActionFailed {
                action: action.describe(),
                message: format!("could not start '{}'", program),
            }
        })?;

        if result.success {
            Ok(())
        } else {
            Err(SetupError::ActionFailed {
                action: action.describe(),
                message: format!(
                    "'{}' exited with {}: {}",
                    display_command(program, &args),
                    result
                        .exit_code
                        .map(|c| c.to_string())
                        .unwrap_or_else(|| "signal".to_string()),
                    result.last_output_line().unwrap_or("no output")
                ),
            })
        }
    }

    /// Create `dir` if needed, escalating with `sudo mkdir -p` when the
    /// parent is not writable.
    fn ensure_dir(&self, action: &InstallAction, dir: &Path) -> Result<()> {
        if dir.is_dir() {
            return Ok(());
        }
        if dir.exists() {
            return Err(SetupError::ActionFailed {
                action: action.describe(),
                message: format!("{} exists and is not a directory", dir.display()),
            });
        }

        match fs::create_dir_all(dir) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::PermissionDenied && !self.elevated => {
                let args = vec!["-p".to_string(), dir.display().to_string()];
                let (program, args) = privileged("mkdir", &args, false);
                self.command(action, &program, args)
            }
            Err(e) => Err(SetupError::ActionFailed {
                action: action.describe(),
                message: e.to_string(),
            }),
        }
    }

    fn move_into(&self, action: &InstallAction, source: &Path, bin_dir: &Path) -> Result<()> {
        let Some(file_name) = source.file_name() else {
            return Err(SetupError::ActionFailed {
                action: action.describe(),
                message: format!("{} has no file name", source.display()),
            });
        };
        self.ensure_dir(action, bin_dir)?;

        let args = vec![
            source.display().to_string(),
            bin_dir.join(file_name).display().to_string(),
        ];
        let writable = is_writable_dir(bin_dir);
        let (program, args) = privileged("mv", &args, self.elevated || writable);
        self.command(action, &program, args)
    }

    fn remove(&self, path: &Path) -> Result<()> {
        let removed = if path.is_dir() {
            fs::remove_dir_all(path)
        } else {
            fs::remove_file(path)
        };

        match removed {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(SetupError::ActionFailed {
                action: format!("remove {}", path.display()),
                message: e.to_string(),
            }),
        }
    }
}

impl ActionRunner for HostActionRunner {
    fn run(&mut self, action: &InstallAction) -> Result<()> {
        tracing::debug!("Running action: {}", action);

        match action {
            InstallAction::Download { url, dest } => self.download(url, dest),
            InstallAction::Unpack { archive, dest } => {
                fs::create_dir_all(dest).map_err(|e| SetupError::ActionFailed {
                    action: action.describe(),
                    message: e.to_string(),
                })?;
                self.command(
                    action,
                    "unzip",
                    vec![
                        "-o".to_string(),
                        "-q".to_string(),
                        archive.display().to_string(),
                        "-d".to_string(),
                        dest.display().to_string(),
                    ],
                )
            }
            InstallAction::MoveIntoPath { source, bin_dir } => {
                self.move_into(action, source, bin_dir)
            }
            InstallAction::RunInstaller {
                program,
                args,
                privileged: needs_privilege,
            } => {
                let program = program.display().to_string();
                let (program, args) = privileged(&program, args, self.elevated || !needs_privilege);
                self.command(action, &program, args)
            }
            InstallAction::PackageManager { manager, package } => {
                self.command(action, manager, vec!["install".to_string(), package.clone()])
            }
            InstallAction::Remove { path } => self.remove(path),
        }
    }
}

/// Whether the current user can create files in `dir`.
fn is_writable_dir(dir: &Path) -> bool {
    let marker = dir.join(format!(".autodeploy-setup-{}", std::process::id()));
    match fs::File::create(&marker) {
        Ok(_) => {
            discard(&marker);
            true
        }
        Err(_) => false,
    }
}

/// Best-effort removal of a file this process created.
fn discard(path: &Path) {
    match fs::remove_file(path) {
        Ok(()) => {}
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => tracing::debug!("Could not remove {}: {}", path.display(), e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn runner() -> HostActionRunner {
        HostActionRunner::new(Duration::from_secs(10)).unwrap()
    }

    #[test]
    fn timeout_is_kept() {
        assert_eq!(runner().timeout(), Duration::from_secs(10));
    }

    #[test]
    fn download_writes_body_to_dest() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/terraform.zip");
            then.status(200).body("PK-archive-bytes");
        });

        let temp = TempDir::new().unwrap();
        let dest = temp.path().join("nested").join("terraform.zip");

        runner()
            .run(&InstallAction::Download {
                url: server.url("/terraform.zip"),
                dest: dest.clone(),
            })
            .unwrap();

        assert_eq!(fs::read_to_string(&dest).unwrap(), "PK-archive-bytes");
    }

    #[test]
    fn download_non_success_is_download_failed() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/missing.zip");
            then.status(404).body("Not Found");
        });

        let temp = TempDir::new().unwrap();
        let err = runner()
            .run(&InstallAction::Download {
                url: server.url("/missing.zip"),
                dest: temp.path().join("missing.zip"),
            })
            .unwrap_err();

        match err {
            SetupError::DownloadFailed { message, .. } => {
                assert!(message.contains("404"), "message: {}", message)
            }
            other => panic!("expected DownloadFailed, got {:?}", other),
        }
    }

    #[test]
    fn failed_download_leaves_no_archive_behind() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/terraform.zip");
            then.status(503).body("unavailable");
        });

        let temp = TempDir::new().unwrap();
        let dest = temp.path().join("terraform.zip");
        fs::write(&dest, "truncated").unwrap();

        let result = runner().run(&InstallAction::Download {
            url: server.url("/terraform.zip"),
            dest: dest.clone(),
        });

        assert!(matches!(result, Err(SetupError::DownloadFailed { .. })));
        assert!(!dest.exists());
    }

    #[test]
    fn discard_tolerates_missing_file() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("gone.zip");
        discard(&file);
        fs::write(&file, "zip").unwrap();
        discard(&file);
        assert!(!file.exists());
    }

    #[test]
    fn remove_deletes_files_and_directories() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("awscliv2.zip");
        let dir = temp.path().join("aws");
        fs::write(&file, "zip").unwrap();
        fs::create_dir_all(dir.join("dist")).unwrap();

        let mut r = runner();
        r.run(&InstallAction::Remove { path: file.clone() }).unwrap();
        r.run(&InstallAction::Remove { path: dir.clone() }).unwrap();

        assert!(!file.exists());
        assert!(!dir.exists());
    }

    #[test]
    fn remove_missing_path_is_ok() {
        let temp = TempDir::new().unwrap();
        runner()
            .run(&InstallAction::Remove {
                path: temp.path().join("never-created"),
            })
            .unwrap();
    }

    #[cfg(unix)]
    #[test]
    fn move_into_writable_bin_dir() {
        let temp = TempDir::new().unwrap();
        let source = temp.path().join("terraform");
        let bin = temp.path().join("bin");
        fs::write(&source, "binary").unwrap();
        fs::create_dir_all(&bin).unwrap();

        runner()
            .run(&InstallAction::MoveIntoPath {
                source: source.clone(),
                bin_dir: bin.clone(),
            })
            .unwrap();

        assert!(!source.exists());
        assert!(bin.join("terraform").exists());
    }

    #[cfg(unix)]
    #[test]
    fn move_creates_missing_bin_dir() {
        let temp = TempDir::new().unwrap();
        let source = temp.path().join("terraform");
        let bin = temp.path().join("home").join(".local").join("bin");
        fs::write(&source, "binary").unwrap();

        runner()
            .run(&InstallAction::MoveIntoPath {
                source: source.clone(),
                bin_dir: bin.clone(),
            })
            .unwrap();

        assert!(bin.is_dir());
        assert_eq!(fs::read_to_string(bin.join("terraform")).unwrap(), "binary");
        assert!(!source.exists());
    }

    #[cfg(unix)]
    #[test]
    fn move_refuses_file_in_place_of_bin_dir() {
        let temp = TempDir::new().unwrap();
        let source = temp.path().join("terraform");
        let bin = temp.path().join("bin");
        fs::write(&source, "binary").unwrap();
        fs::write(&bin, "not a directory").unwrap();

        let err = runner()
            .run(&InstallAction::MoveIntoPath {
                source: source.clone(),
                bin_dir: bin.clone(),
            })
            .unwrap_err();

        assert!(err.to_string().contains("is not a directory"), "{}", err);
        assert_eq!(fs::read_to_string(&bin).unwrap(), "not a directory");
        assert!(source.exists());
    }

    #[cfg(unix)]
    #[test]
    fn failing_installer_is_action_failed() {
        let err = runner()
            .run(&InstallAction::RunInstaller {
                program: PathBuf::from("/bin/false"),
                args: Vec::new(),
                privileged: false,
            })
            .unwrap_err();
        assert!(matches!(err, SetupError::ActionFailed { .. }));
    }

    #[test]
    fn missing_package_manager_is_action_failed() {
        let err = runner()
            .run(&InstallAction::PackageManager {
                manager: "definitely-not-brew-7f3a".to_string(),
                package: "terraform".to_string(),
            })
            .unwrap_err();
        assert!(err.to_string().contains("could not start"));
    }

    #[test]
    fn writable_dir_check() {
        let temp = TempDir::new().unwrap();
        assert!(is_writable_dir(temp.path()));
        assert!(!is_writable_dir(&temp.path().join("does-not-exist")));
    }
}
