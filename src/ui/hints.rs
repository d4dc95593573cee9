//! Next-step hints shown at the end of a run.

/// Hints after a successful run: how to start the downstream services.
pub fn after_ready(api_entry_point: &str, cli_entry_point: &str) -> Vec<String> {
    vec![
        "Fill in the credentials in .env".to_string(),
        format!("Start the API server: {}", api_entry_point),
        format!("Deploy an application: {}", cli_entry_point),
    ]
}

/// Hint for libraries the interpreter could not import.
pub fn install_libraries(interpreter: &str, libraries: &[String]) -> String {
    let packages: Vec<&str> = libraries.iter().map(|l| pip_package(l)).collect();
    format!(
        "Install missing libraries: {} -m pip install {}",
        interpreter,
        packages.join(" ")
    )
}

/// Hint for a required command that is still absent.
pub fn install_command(install_hint: &str) -> String {
    install_hint.to_string()
}

/// Hint after a failed run.
pub fn after_failure() -> &'static str {
    "Fix the issues above and re-run `autodeploy-setup`; completed steps are skipped."
}

/// Distribution name for an import name, where the two differ.
fn pip_package(module: &str) -> &str {
    match module {
        "git" => "GitPython",
        other => other.split('.').next().unwrap_or(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn after_ready_mentions_entry_points() {
        let hints = after_ready("python main.py", "python cli.py deploy");
        assert!(hints.iter().any(|h| h.contains("python main.py")));
        assert!(hints.iter().any(|h| h.contains("python cli.py deploy")));
    }

    #[test]
    fn install_libraries_maps_git_to_gitpython() {
        let hint = install_libraries("python3", &["fastapi".into(), "git".into()]);
        assert_eq!(
            hint,
            "Install missing libraries: python3 -m pip install fastapi GitPython"
        );
    }

    #[test]
    fn after_failure_mentions_rerun() {
        assert!(after_failure().contains("re-run"));
    }
}
