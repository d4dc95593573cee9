//! Capability probes for commands and importable libraries.
//!
//! A probe answers one question: is this capability usable on the host
//! right now? Commands are found by walking an explicit list of search
//! directories; libraries are checked by importing them in a fresh
//! interpreter process. Probing never changes host state and can be
//! repeated any number of times.
//!
//! # Example
//!
//! ```no_run
//! use autodeploy_setup::requirements::probe::{HostProbe, Probe, ProbeTarget};
//!
//! let probe = HostProbe::from_env(&[], "python3");
//! if !probe.probe(&ProbeTarget::command("git")) {
//!     eprintln!("git is not on PATH");
//! }
//! ```

use crate::shell::command::{execute, CommandOptions};
use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};

/// What kind of capability a probe target names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProbeKind {
    /// An executable resolved through the search path.
    Command,
    /// A module importable by the configured interpreter.
    ImportableLibrary,
}

/// A named capability to look for.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProbeTarget {
    pub name: String,
    pub kind: ProbeKind,
}

impl ProbeTarget {
    pub fn command(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: ProbeKind::Command,
        }
    }

    pub fn library(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: ProbeKind::ImportableLibrary,
        }
    }
}

impl fmt::Display for ProbeTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            ProbeKind::Command => write!(f, "command '{}'", self.name),
            ProbeKind::ImportableLibrary => write!(f, "library '{}'", self.name),
        }
    }
}

/// Determines whether a capability is present.
///
/// Implementations must be side-effect free. Any failure to determine
/// presence reads as absent.
pub trait Probe {
    fn probe(&self, target: &ProbeTarget) -> bool;
}

/// Probe backed by the real filesystem and interpreter.
#[derive(Debug, Clone)]
pub struct HostProbe {
    search_path: Vec<PathBuf>,
    interpreter: String,
}

impl HostProbe {
    /// Create a probe over an explicit search path.
    pub fn new(search_path: Vec<PathBuf>, interpreter: impl Into<String>) -> Self {
        Self {
            search_path,
            interpreter: interpreter.into(),
        }
    }

    /// Create a probe over `$PATH` followed by `extra` directories.
    pub fn from_env(extra: &[PathBuf], interpreter: impl Into<String>) -> Self {
        let mut search_path = parse_system_path();
        for dir in extra {
            if !search_path.contains(dir) {
                search_path.push(dir.clone());
            }
        }
        Self::new(search_path, interpreter)
    }

    pub fn search_path(&self) -> &[PathBuf] {
        &self.search_path
    }

    pub fn interpreter(&self) -> &str {
        &self.interpreter
    }

    fn probe_library(&self, module: &str) -> bool {
        if !is_module_name(module) {
            tracing::debug!("'{}' is not a valid module name, treating as absent", module);
            return false;
        }

        let Some(interpreter) = self.resolve_interpreter() else {
            tracing::debug!("Interpreter '{}' not found", self.interpreter);
            return false;
        };

        let mut options = CommandOptions::captured();
        if let Ok(joined) = std::env::join_paths(&self.search_path) {
            options
                .env
                .insert("PATH".to_string(), joined.to_string_lossy().to_string());
        }

        let args = vec!["-c".to_string(), format!("import {}", module)];
        match execute(&interpreter.to_string_lossy(), &args, &options) {
            Ok(result) => {
                if !result.success {
                    tracing::debug!(
                        "import {} failed: {}",
                        module,
                        result.last_output_line().unwrap_or("no output")
                    );
                }
                result.success
            }
            Err(e) => {
                tracing::debug!("Could not run interpreter for {}: {}", module, e);
                false
            }
        }
    }

    fn resolve_interpreter(&self) -> Option<PathBuf> {
        let path = Path::new(&self.interpreter);
        if path.components().count() > 1 {
            return (path.is_file() && is_executable(path)).then(|| path.to_path_buf());
        }
        resolve_tool_path(&self.interpreter, &self.search_path)
    }
}

impl Probe for HostProbe {
    fn probe(&self, target: &ProbeTarget) -> bool {
        let present = match target.kind {
            ProbeKind::Command => resolve_tool_path(&target.name, &self.search_path).is_some(),
            ProbeKind::ImportableLibrary => self.probe_library(&target.name),
        };
        tracing::debug!("Probed {}: {}", target, if present { "present" } else { "absent" });
        present
    }
}

/// Whether `name` is a dotted module path such as `google.cloud.storage`.
pub fn is_module_name(name: &str) -> bool {
    !name.is_empty()
        && name.split('.').all(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) if first == '_' || first.is_ascii_alphabetic() => {
                    chars.all(|c| c == '_' || c.is_ascii_alphanumeric())
                }
                _ => false,
            }
        })
}

/// Check whether a file has executable permission bits set.
#[cfg(unix)]
pub fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    path.metadata()
        .map(|m| m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

/// On Windows, executability is determined by file extension, not permission bits.
#[cfg(not(unix))]
pub fn is_executable(_path: &Path) -> bool {
    true
}

/// Resolve a tool's binary path by iterating over search directories.
///
/// Returns the first match that exists and is executable. Does NOT use
/// the `which` command, whose behavior varies across systems.
pub fn resolve_tool_path(tool: &str, path_entries: &[PathBuf]) -> Option<PathBuf> {
    for dir in path_entries {
        let candidate = dir.join(tool);
        if candidate.is_file() && is_executable(&candidate) {
            return Some(candidate);
        }
    }
    None
}

/// Parse the system PATH environment variable into a list of directories.
pub fn parse_system_path() -> Vec<PathBuf> {
    std::env::var_os("PATH")
        .map(|path| std::env::split_paths(&path).collect())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[cfg(unix)]
    fn make_executable(dir: &Path, name: &str, body: &str) -> PathBuf {
        use std::os::unix::fs::PermissionsExt;
        let path = dir.join(name);
        fs::write(&path, body).unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    #[test]
    fn probe_target_display() {
        assert_eq!(ProbeTarget::command("git").to_string(), "command 'git'");
        assert_eq!(
            ProbeTarget::library("fastapi").to_string(),
            "library 'fastapi'"
        );
    }

    #[test]
    fn module_name_validation() {
        assert!(is_module_name("fastapi"));
        assert!(is_module_name("google.cloud.storage"));
        assert!(is_module_name("_thread"));
        assert!(!is_module_name(""));
        assert!(!is_module_name("1abc"));
        assert!(!is_module_name("os; import sys"));
        assert!(!is_module_name("a..b"));
        assert!(!is_module_name("trailing."));
    }

    #[cfg(unix)]
    #[test]
    fn command_found_in_search_path() {
        let temp = TempDir::new().unwrap();
        make_executable(temp.path(), "terraform", "#!/bin/sh\n");

        let probe = HostProbe::new(vec![temp.path().to_path_buf()], "python3");
        assert!(probe.probe(&ProbeTarget::command("terraform")));
        assert!(!probe.probe(&ProbeTarget::command("aws")));
    }

    #[cfg(unix)]
    #[test]
    fn non_executable_file_is_absent() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("git"), "").unwrap();

        let probe = HostProbe::new(vec![temp.path().to_path_buf()], "python3");
        assert!(!probe.probe(&ProbeTarget::command("git")));
    }

    #[test]
    fn empty_search_path_finds_nothing() {
        let probe = HostProbe::new(Vec::new(), "python3");
        assert!(!probe.probe(&ProbeTarget::command("sh")));
        assert!(!probe.probe(&ProbeTarget::library("json")));
    }

    #[cfg(unix)]
    #[test]
    fn resolve_tool_path_returns_first_match() {
        let first = TempDir::new().unwrap();
        let second = TempDir::new().unwrap();
        make_executable(first.path(), "aws", "#!/bin/sh\n");
        make_executable(second.path(), "aws", "#!/bin/sh\n");

        let found = resolve_tool_path(
            "aws",
            &[first.path().to_path_buf(), second.path().to_path_buf()],
        );
        assert_eq!(found, Some(first.path().join("aws")));
    }

    #[cfg(unix)]
    #[test]
    fn library_probe_uses_interpreter_exit_code() {
        let temp = TempDir::new().unwrap();
        // Fake interpreter: succeeds only for "import present_mod".
        make_executable(
            temp.path(),
            "fakepy",
            "#!/bin/sh\n[ \"$2\" = \"import present_mod\" ]\n",
        );

        let probe = HostProbe::new(
            vec![temp.path().to_path_buf(), PathBuf::from("/bin"), PathBuf::from("/usr/bin")],
            "fakepy",
        );
        assert!(probe.probe(&ProbeTarget::library("present_mod")));
        assert!(!probe.probe(&ProbeTarget::library("missing_mod")));
    }

    #[cfg(unix)]
    #[test]
    fn library_probe_accepts_interpreter_path() {
        let temp = TempDir::new().unwrap();
        let interpreter = make_executable(temp.path(), "python", "#!/bin/sh\nexit 0\n");

        let probe = HostProbe::new(
            vec![PathBuf::from("/bin"), PathBuf::from("/usr/bin")],
            interpreter.display().to_string(),
        );
        assert!(probe.probe(&ProbeTarget::library("anything")));
    }

    #[test]
    fn missing_interpreter_reads_as_absent() {
        let probe = HostProbe::new(
            vec![PathBuf::from("/nonexistent-dir")],
            "/nonexistent-dir/python3",
        );
        assert!(!probe.probe(&ProbeTarget::library("fastapi")));
    }

    #[test]
    fn from_env_appends_extra_dirs() {
        let extra = PathBuf::from("/opt/autodeploy-test/bin");
        let probe = HostProbe::from_env(&[extra.clone()], "python3");
        assert_eq!(probe.search_path().last(), Some(&extra));
        assert_eq!(probe.interpreter(), "python3");
    }
}
