//! Readiness verification.
//!
//! Re-probes every configured library and command after installation and
//! reduces the results to a single verdict. Verification never stops
//! early: every item is probed exactly once, in input order, libraries
//! first.

use anyhow::Context;
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::{Result, SetupError};
use crate::requirements::probe::{Probe, ProbeTarget};
use crate::ui::{StatusKind, UserInterface};

/// What a verification item checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum VerificationKind {
    /// Importable by the configured interpreter
    Library,
    /// Executable on the search path
    Command,
}

/// Result of probing one item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VerificationItem {
    pub name: String,
    pub kind: VerificationKind,
    pub present: bool,
}

impl VerificationItem {
    fn target(name: &str, kind: VerificationKind) -> ProbeTarget {
        match kind {
            VerificationKind::Library => ProbeTarget::library(name),
            VerificationKind::Command => ProbeTarget::command(name),
        }
    }
}

/// Aggregate verification result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReadinessReport {
    pub items: Vec<VerificationItem>,
    pub overall_ready: bool,
    pub generated_at: DateTime<Utc>,
}

impl ReadinessReport {
    /// Build a report from probed items.
    pub fn from_items(items: Vec<VerificationItem>) -> Self {
        let overall_ready = items.iter().all(|i| i.present);
        Self {
            items,
            overall_ready,
            generated_at: Utc::now(),
        }
    }

    /// Items of one kind, in probe order.
    pub fn of_kind(&self, kind: VerificationKind) -> impl Iterator<Item = &VerificationItem> {
        self.items.iter().filter(move |i| i.kind == kind)
    }

    /// Names of the items that were not found.
    pub fn missing(&self) -> Vec<&str> {
        self.items
            .iter()
            .filter(|i| !i.present)
            .map(|i| i.name.as_str())
            .collect()
    }

    /// Names of the libraries that could not be imported.
    pub fn missing_libraries(&self) -> Vec<String> {
        self.of_kind(VerificationKind::Library)
            .filter(|i| !i.present)
            .map(|i| i.name.clone())
            .collect()
    }

    /// Fail with [`SetupError::VerificationFailure`] unless every item is present.
    pub fn ensure_ready(&self) -> Result<()> {
        if self.overall_ready {
            Ok(())
        } else {
            Err(SetupError::VerificationFailure {
                missing: self.missing().iter().map(|s| s.to_string()).collect(),
            })
        }
    }

    /// Serialize the report for `--json` output.
    pub fn to_json(&self) -> Result<String> {
        let json =
            serde_json::to_string_pretty(self).context("Failed to serialize readiness report")?;
        Ok(json)
    }

    /// Print the grouped pass/fail lines and the aggregate verdict.
    pub fn render(&self, ui: &mut dyn UserInterface) {
        for (title, kind) in [
            ("Libraries", VerificationKind::Library),
            ("Commands", VerificationKind::Command),
        ] {
            let mut group = self.of_kind(kind).peekable();
            if group.peek().is_none() {
                continue;
            }

            ui.show_section(title);
            for item in group {
                if item.present {
                    ui.success(&format!("  {}", item.name));
                } else {
                    ui.error(&format!("  {} not found", item.name));
                }
            }
        }

        if ui.output_mode().shows_details() {
            ui.message(&format!(
                "Checked at {}",
                self.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
            ));
        }

        let found = self.items.iter().filter(|i| i.present).count();
        let line = format!("{}/{} checks passed", found, self.items.len());
        if self.overall_ready {
            ui.success(&line);
        } else {
            ui.error(&line);
        }
    }

    /// Status for a summary row.
    pub fn status(&self) -> StatusKind {
        if self.overall_ready {
            StatusKind::Success
        } else {
            StatusKind::Failed
        }
    }
}

/// Probe every library, then every command, once each.
pub fn verify(probe: &dyn Probe, libraries: &[String], commands: &[String]) -> ReadinessReport {
    let requested = libraries
        .iter()
        .map(|name| (name, VerificationKind::Library))
        .chain(commands.iter().map(|name| (name, VerificationKind::Command)));

    let items = requested
        .map(|(name, kind)| {
            let present = probe.probe(&VerificationItem::target(name, kind));
            tracing::debug!("verify {}: {}", name, if present { "ok" } else { "missing" });
            VerificationItem {
                name: name.clone(),
                kind,
                present,
            }
        })
        .collect();

    ReadinessReport::from_items(items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::requirements::probe::ProbeKind;
    use crate::ui::MockUI;
    use std::cell::RefCell;
    use std::collections::HashSet;

    struct CountingProbe {
        present: HashSet<String>,
        calls: RefCell<Vec<(String, ProbeKind)>>,
    }

    impl CountingProbe {
        fn with(present: &[&str]) -> Self {
            Self {
                present: present.iter().map(|s| s.to_string()).collect(),
                calls: RefCell::new(Vec::new()),
            }
        }
    }

    impl Probe for CountingProbe {
        fn probe(&self, target: &ProbeTarget) -> bool {
            self.calls
                .borrow_mut()
                .push((target.name.clone(), target.kind));
            self.present.contains(&target.name)
        }
    }

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn probes_every_item_once_libraries_first() {
        let probe = CountingProbe::with(&["fastapi", "git"]);
        let report = verify(&probe, &names(&["fastapi", "openai"]), &names(&["terraform", "git"]));

        assert_eq!(report.items.len(), 4);
        let calls = probe.calls.borrow();
        assert_eq!(
            *calls,
            vec![
                ("fastapi".to_string(), ProbeKind::ImportableLibrary),
                ("openai".to_string(), ProbeKind::ImportableLibrary),
                ("terraform".to_string(), ProbeKind::Command),
                ("git".to_string(), ProbeKind::Command),
            ]
        );
    }

    #[test]
    fn overall_ready_requires_all_present() {
        let probe = CountingProbe::with(&["fastapi", "terraform"]);
        let report = verify(&probe, &names(&["fastapi"]), &names(&["terraform"]));
        assert!(report.overall_ready);
        assert!(report.ensure_ready().is_ok());

        let report = verify(&probe, &names(&["fastapi", "paramiko"]), &names(&["terraform"]));
        assert!(!report.overall_ready);
        assert_eq!(report.missing(), vec!["paramiko"]);
        assert_eq!(report.missing_libraries(), vec!["paramiko".to_string()]);
    }

    #[test]
    fn ensure_ready_lists_missing_items() {
        let probe = CountingProbe::with(&[]);
        let report = verify(&probe, &[], &names(&["aws", "git"]));
        match report.ensure_ready() {
            Err(SetupError::VerificationFailure { missing }) => {
                assert_eq!(missing, vec!["aws".to_string(), "git".to_string()]);
            }
            other => panic!("expected VerificationFailure, got {:?}", other),
        }
    }

    #[test]
    fn empty_inputs_are_ready() {
        let probe = CountingProbe::with(&[]);
        let report = verify(&probe, &[], &[]);
        assert!(report.items.is_empty());
        assert!(report.overall_ready);
    }

    #[test]
    fn render_groups_items() {
        let probe = CountingProbe::with(&["git"]);
        let report = verify(&probe, &names(&["requests"]), &names(&["git"]));
        let mut ui = MockUI::new();
        report.render(&mut ui);

        assert_eq!(ui.sections(), &["Libraries", "Commands"]);
        assert!(ui.has_error("requests not found"));
        assert!(ui.has_success("git"));
        assert!(ui.has_error("1/2 checks passed"));
    }

    #[test]
    fn render_skips_empty_groups() {
        let probe = CountingProbe::with(&["sh"]);
        let report = verify(&probe, &[], &names(&["sh"]));
        let mut ui = MockUI::new();
        report.render(&mut ui);

        assert_eq!(ui.sections(), &["Commands"]);
        assert!(ui.has_success("1/1 checks passed"));
    }

    #[test]
    fn verbose_render_shows_timestamp() {
        let probe = CountingProbe::with(&["git"]);
        let report = verify(&probe, &[], &names(&["git"]));
        let mut ui = MockUI::with_mode(crate::ui::OutputMode::Verbose);
        report.render(&mut ui);
        assert!(ui.has_message("Checked at"));

        let mut quiet = MockUI::new();
        report.render(&mut quiet);
        assert!(!quiet.has_message("Checked at"));
    }

    #[test]
    fn json_contains_items_and_verdict() {
        let probe = CountingProbe::with(&["git"]);
        let report = verify(&probe, &[], &names(&["git"]));
        let json = report.to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["overall_ready"], true);
        assert_eq!(value["items"][0]["name"], "git");
        assert_eq!(value["items"][0]["kind"], "command");
        assert!(value["generated_at"].is_string());
    }
}
