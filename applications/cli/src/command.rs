/// Commands accepted at the shell prompt
use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(
    name = "jotter",
    no_binary_name = true,
    disable_version_flag = true,
    disable_help_subcommand = true
)]
pub struct ShellLine {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Create an account; a code is emailed to you
    Signup,
    /// Sign in to an existing account; a code is emailed to you
    Signin {
        /// Email address (prompted when omitted)
        email: Option<String>,
    },
    /// Submit the emailed code
    Verify {
        /// The one-time code
        code: String,
    },
    /// Send the code again once the cooldown has passed
    Resend,
    /// Discard the pending code and change your details
    Reset,
    /// Show who is signed in
    Me,
    /// List your notes
    #[command(alias = "ls")]
    Notes,
    /// Create a note
    New,
    /// Edit a note
    Edit {
        /// Note ID
        id: String,
    },
    /// Delete a note
    #[command(alias = "delete")]
    Rm {
        /// Note ID
        id: String,
    },
    /// Print the Google sign-in link
    Google,
    /// Sign out
    Logout,
    /// Show available commands
    Help,
    /// Leave the shell
    #[command(alias = "exit")]
    Quit,
}

impl ShellLine {
    /// Parse one input line; `Ok(None)` for a blank line.
    pub fn parse_line(line: &str) -> Result<Option<Command>, clap::Error> {
        let words: Vec<&str> = line.split_whitespace().collect();
        if words.is_empty() {
            return Ok(None);
        }
        ShellLine::try_parse_from(words).map(|parsed| Some(parsed.command))
    }
}
