//! Process-level environment checks.

/// Check if running in a CI environment.
///
/// Used to force non-interactive output in `main()`.
/// Checks common CI environment variables: `CI`, `GITHUB_ACTIONS`,
/// `GITLAB_CI`, `CIRCLECI`, `TRAVIS`, `JENKINS_URL`.
pub fn is_ci() -> bool {
    std::env::var("CI").is_ok()
        || std::env::var("GITHUB_ACTIONS").is_ok()
        || std::env::var("GITLAB_CI").is_ok()
        || std::env::var("CIRCLECI").is_ok()
        || std::env::var("TRAVIS").is_ok()
        || std::env::var("JENKINS_URL").is_ok()
}

/// Check if running as root.
///
/// Privileged install actions are prefixed with `sudo` when this is false.
pub fn is_elevated() -> bool {
    #[cfg(unix)]
    {
        // SAFETY: geteuid() is a simple syscall that returns the effective user ID
        unsafe { libc::geteuid() == 0 }
    }

    #[cfg(not(unix))]
    {
        false
    }
}

/// Wrap a program invocation so it runs with elevated privileges.
///
/// Returns the program and argument vector to execute: unchanged when
/// already elevated, otherwise routed through `sudo`.
pub fn privileged(program: &str, args: &[String], elevated: bool) -> (String, Vec<String>) {
    if elevated {
        (program.to_string(), args.to_vec())
    } else {
        let mut sudo_args = Vec::with_capacity(args.len() + 1);
        sudo_args.push(program.to_string());
        sudo_args.extend(args.iter().cloned());
        ("sudo".to_string(), sudo_args)
    }
}
