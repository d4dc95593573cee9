//! Host platform classification.
//!
//! The bootstrap only knows how to provision GNU/Linux and macOS hosts.
//! Classification works on an OS family string (the shell's `$OSTYPE`
//! convention: `linux-gnu`, `darwin23`, `msys`, ...) so it can be driven
//! from the environment, a CLI flag, or a test.

use std::fmt;

use serde::Serialize;

/// Supported host platforms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum PlatformKind {
    /// GNU/Linux (glibc userland).
    LinuxGnu,
    /// macOS.
    Darwin,
    /// Anything else. Fatal for the pipeline.
    Unsupported,
}

impl PlatformKind {
    /// Classify an OS family signal.
    ///
    /// Matching is case-insensitive and prefix-based, so versioned
    /// signals such as `darwin23.0` classify as [`PlatformKind::Darwin`].
    pub fn classify(signal: &str) -> Self {
        let signal = signal.trim().to_ascii_lowercase();
        if signal == "linux" || signal.starts_with("linux-gnu") {
            PlatformKind::LinuxGnu
        } else if signal.starts_with("darwin") {
            PlatformKind::Darwin
        } else {
            PlatformKind::Unsupported
        }
    }

    /// Whether the pipeline can run on this platform.
    pub fn is_supported(&self) -> bool {
        !matches!(self, PlatformKind::Unsupported)
    }

    /// Short display name.
    pub fn name(&self) -> &'static str {
        match self {
            PlatformKind::LinuxGnu => "linux-gnu",
            PlatformKind::Darwin => "darwin",
            PlatformKind::Unsupported => "unsupported",
        }
    }
}

impl fmt::Display for PlatformKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Read the host OS family signal.
///
/// Prefers `$OSTYPE` when the invoking shell exported it, otherwise maps
/// the compile target onto the same vocabulary.
pub fn host_signal() -> String {
    host_signal_with(|key| std::env::var(key))
}

/// Read the host signal with a custom env lookup (for testing).
pub fn host_signal_with<F>(env_fn: F) -> String
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    if let Ok(ostype) = env_fn("OSTYPE") {
        if !ostype.trim().is_empty() {
            return ostype;
        }
    }

    match std::env::consts::OS {
        "linux" => "linux-gnu".to_string(),
        "macos" => "darwin".to_string(),
        other => other.to_string(),
    }
}

/// Detect the platform kind for a given signal.
pub fn detect(signal: &str) -> PlatformKind {
    let kind = PlatformKind::classify(signal);
    tracing::debug!("Classified OS family '{}' as {}", signal, kind);
    kind
}
