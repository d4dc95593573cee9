//! Library integration tests.

use autodeploy_setup::SetupError;

#[test]
fn error_types_are_public() {
    let err = SetupError::MissingMandatoryDependency {
        dependency: "git".into(),
        hint: "Install git manually: https://git-scm.com/downloads".into(),
    };
    assert!(err.to_string().contains("git"));
}

#[test]
fn result_type_alias_is_public() {
    fn test_fn() -> autodeploy_setup::Result<()> {
        Ok(())
    }
    assert!(test_fn().is_ok());
}

#[test]
fn cli_types_are_public() {
    use autodeploy_setup::cli::{Cli, Commands};
    use clap::Parser;

    let cli = Cli::parse_from(["autodeploy-setup", "verify", "--json"]);
    assert!(cli.command.is_some());

    if let Some(Commands::Verify(args)) = cli.command {
        assert!(args.json);
    } else {
        panic!("Expected Verify command");
    }
}

#[test]
fn builtin_registry_is_in_priority_order() {
    use autodeploy_setup::requirements::DependencyRegistry;

    let names: Vec<_> = DependencyRegistry::builtin()
        .iter()
        .map(|d| d.name.clone())
        .collect();
    assert_eq!(names, ["terraform", "aws", "docker", "git"]);
}

#[test]
fn default_config_without_file() {
    let temp = tempfile::TempDir::new().unwrap();
    let config = autodeploy_setup::config::load_config(temp.path(), None).unwrap();
    assert_eq!(config.tools.terraform_version, "1.6.6");
    assert_eq!(config.verification.commands, ["terraform", "aws", "git"]);
}
