//! Jotter terminal client.
//!
//! An interactive shell over [`jotter_client`]: sign up or sign in with an
//! emailed code, then manage notes.

pub mod command;
pub mod config;
pub mod prompt;
pub mod shell;

pub use command::{Command, ShellLine};
pub use config::{CliConfig, ConfigError};
pub use prompt::{LineEditor, Prompt};
pub use shell::{Flow, Shell};
