/// Line input for the shell
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use tracing::warn;

/// Source of user input lines
pub trait Prompt {
    /// Read one line; `None` when the user hangs up (Ctrl-D / Ctrl-C)
    fn read_line(&mut self, prompt: &str) -> Option<String>;
}

/// Interactive editor with history
pub struct LineEditor {
    editor: DefaultEditor,
}

impl LineEditor {
    pub fn new() -> rustyline::Result<Self> {
        Ok(Self {
            editor: DefaultEditor::new()?,
        })
    }
}

impl Prompt for LineEditor {
    fn read_line(&mut self, prompt: &str) -> Option<String> {
        match self.editor.readline(prompt) {
            Ok(line) => {
                if !line.trim().is_empty() {
                    let _ = self.editor.add_history_entry(line.as_str());
                }
                Some(line)
            }
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => None,
            Err(e) => {
                warn!(error = %e, "Failed to read input");
                None
            }
        }
    }
}
