//! Artifact templates embedded at compile time.

use crate::error::{Result, SetupError};
use include_dir::{include_dir, Dir};
use regex::{Captures, Regex};
use std::collections::HashMap;
use std::sync::LazyLock;

/// Embedded templates directory.
static TEMPLATES_DIR: Dir<'_> = include_dir!("$CARGO_MANIFEST_DIR/templates");

/// Environment template file name.
pub const ENV_TEMPLATE: &str = "env.template";

/// systemd unit template file name.
pub const SERVICE_TEMPLATE: &str = "autodeploy.service";

/// Raw content of an embedded template.
pub fn load(name: &str) -> Result<&'static str> {
    let file = TEMPLATES_DIR
        .get_file(name)
        .ok_or_else(|| SetupError::ConfigNotFound {
            path: format!("templates/{}", name).into(),
        })?;

    file.contents_utf8()
        .ok_or_else(|| SetupError::ConfigParseError {
            path: format!("templates/{}", name).into(),
            message: "Invalid UTF-8".to_string(),
        })
}

static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{\{\s*([A-Za-z_][A-Za-z0-9_]*)\s*\}\}").expect("valid placeholder regex")
});

/// Replace `{{ key }}` placeholders with values.
///
/// Every placeholder must have a value; unknown keys are an error rather
/// than being left in the output.
pub fn render(template: &str, values: &HashMap<&str, String>) -> Result<String> {
    let mut missing = Vec::new();

    let rendered = PLACEHOLDER.replace_all(template, |caps: &Captures<'_>| {
        let key = &caps[1];
        match values.get(key) {
            Some(value) => value.clone(),
            None => {
                missing.push(key.to_string());
                caps[0].to_string()
            }
        }
    });

    if missing.is_empty() {
        Ok(rendered.into_owned())
    } else {
        Err(SetupError::ConfigValidationError {
            message: format!("template variable(s) without a value: {}", missing.join(", ")),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_template_has_documented_keys() {
        let content = load(ENV_TEMPLATE).unwrap();
        for line in [
            "OPENAI_API_KEY=",
            "AWS_ACCESS_KEY_ID=",
            "AWS_SECRET_ACCESS_KEY=",
            "AWS_DEFAULT_REGION=us-east-1",
            "LOG_LEVEL=INFO",
            "API_HOST=0.0.0.0",
            "API_PORT=8000",
        ] {
            assert!(
                content.lines().any(|l| l == line),
                "missing line {:?}",
                line
            );
        }
    }

    #[test]
    fn service_template_is_restartable() {
        let content = load(SERVICE_TEMPLATE).unwrap();
        assert!(content.contains("Type=simple"));
        assert!(content.contains("Restart=always"));
        assert!(content.contains("RestartSec=10"));
    }

    #[test]
    fn unknown_template_is_not_found() {
        assert!(matches!(
            load("nope.tmpl"),
            Err(SetupError::ConfigNotFound { .. })
        ));
    }

    #[test]
    fn render_substitutes_with_and_without_spaces() {
        let mut values = HashMap::new();
        values.insert("name", "api".to_string());
        values.insert("port", "8000".to_string());

        let out = render("svc={{ name }} port={{port}}", &values).unwrap();
        assert_eq!(out, "svc=api port=8000");
    }

    #[test]
    fn render_reports_missing_values() {
        let err = render("{{ a }} {{ b }}", &HashMap::new()).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("a, b"), "message: {}", message);
    }

    #[test]
    fn render_leaves_plain_text_alone() {
        let out = render("KEY=value\n# {not a placeholder}\n", &HashMap::new()).unwrap();
        assert_eq!(out, "KEY=value\n# {not a placeholder}\n");
    }
}
