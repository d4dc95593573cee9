//! User interface components.
//!
//! This module provides:
//! - [`UserInterface`] trait for UI abstraction
//! - [`TerminalUI`] for interactive terminal usage
//! - [`NonInteractiveUI`] for CI/headless environments
//! - [`MockUI`] for capturing output in tests
//!
//! # Example
//!
//! ```
//! use autodeploy_setup::ui::{create_ui, OutputMode};
//!
//! // Use non-interactive mode for testability
//! let mut ui = create_ui(false, OutputMode::Quiet);
//! ui.show_header("Host setup");
//! ui.success("terraform found");
//! ```

pub mod hints;
pub mod icons;
pub mod mock;
pub mod non_interactive;
pub mod output;
pub mod spinner;
pub mod terminal;
pub mod theme;

pub use icons::StatusKind;
pub use mock::{MockSpinner, MockUI, SpinnerStatus};
pub use non_interactive::NonInteractiveUI;
pub use output::OutputMode;
pub use spinner::ProgressSpinner;
pub use terminal::{create_ui, TerminalUI};
pub use theme::{should_use_colors, SetupTheme};

use std::time::Duration;

/// Trait for user interface interactions.
///
/// This trait allows mocking the UI in tests.
pub trait UserInterface {
    /// Get the current output mode.
    fn output_mode(&self) -> OutputMode;

    /// Display a message to the user.
    fn message(&mut self, msg: &str);

    /// Display a success message.
    fn success(&mut self, msg: &str);

    /// Display a warning message.
    fn warning(&mut self, msg: &str);

    /// Display an error message.
    fn error(&mut self, msg: &str);

    /// Display a skipped item.
    fn skipped(&mut self, msg: &str);

    /// Start a spinner for an operation.
    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle>;

    /// Show a header/banner.
    fn show_header(&mut self, title: &str);

    /// Show a group heading inside a report.
    fn show_section(&mut self, title: &str);

    /// Show a next-step hint.
    fn show_hint(&mut self, hint: &str);

    /// Show the end-of-run summary box.
    fn show_run_summary(&mut self, summary: &RunSummary);

    /// Check if running in interactive mode.
    fn is_interactive(&self) -> bool;
}

/// Handle for controlling a spinner.
pub trait SpinnerHandle {
    /// Update the spinner message.
    fn set_message(&mut self, msg: &str);

    /// Mark the operation as successful.
    fn finish_success(&mut self, msg: &str);

    /// Mark the operation as failed.
    fn finish_error(&mut self, msg: &str);

    /// Mark as skipped.
    fn finish_skipped(&mut self, msg: &str);
}

/// One line of the end-of-run summary.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryRow {
    pub name: String,
    pub status: StatusKind,
    pub detail: String,
}

/// End-of-run summary.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub rows: Vec<SummaryRow>,
    pub total_duration: Duration,
    pub ready: bool,
}

impl RunSummary {
    /// Aggregate verdict line.
    pub fn verdict(&self) -> String {
        if self.ready {
            "Environment ready".to_string()
        } else {
            let failed: Vec<&str> = self
                .rows
                .iter()
                .filter(|r| r.status == StatusKind::Failed)
                .map(|r| r.name.as_str())
                .collect();
            if failed.is_empty() {
                "Environment not ready".to_string()
            } else {
                format!("Environment not ready: {}", failed.join(", "))
            }
        }
    }
}

/// Format a duration for display (e.g., "1.2s", "3m 5s").
pub fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs();
    if secs >= 60 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else {
        format!("{:.1}s", duration.as_secs_f64())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(name: &str, status: StatusKind) -> SummaryRow {
        SummaryRow {
            name: name.to_string(),
            status,
            detail: String::new(),
        }
    }

    #[test]
    fn summary_verdict_when_ready() {
        let summary = RunSummary {
            rows: vec![
                row("terraform", StatusKind::Success),
                row("aws", StatusKind::Success),
                row("docker", StatusKind::Skipped),
            ],
            total_duration: Duration::from_secs(3),
            ready: true,
        };
        assert_eq!(summary.verdict(), "Environment ready");
    }

    #[test]
    fn summary_verdict_names_failures() {
        let summary = RunSummary {
            rows: vec![row("git", StatusKind::Failed), row("fastapi", StatusKind::Failed)],
            total_duration: Duration::ZERO,
            ready: false,
        };
        assert_eq!(summary.verdict(), "Environment not ready: git, fastapi");
    }

    #[test]
    fn format_duration_seconds_and_minutes() {
        assert_eq!(format_duration(Duration::from_millis(1200)), "1.2s");
        assert_eq!(format_duration(Duration::from_secs(185)), "3m 5s");
    }
}
