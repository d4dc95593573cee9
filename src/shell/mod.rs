//! External process execution and process-level environment checks.

pub mod command;
pub mod platform;

pub use command::{display_command, execute, CommandOptions, CommandResult};
pub use platform::{is_ci, is_elevated, privileged};
