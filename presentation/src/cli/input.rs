//! Interactive query input

use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

pub const QUERY_PROMPT: &str = "Enter your research query: ";

/// Ask for a research query on the terminal.
///
/// Returns `Ok(None)` when the user cancels (Ctrl-C / Ctrl-D).
pub fn prompt_query() -> Result<Option<String>, ReadlineError> {
    let mut editor = DefaultEditor::new()?;
    match editor.readline(QUERY_PROMPT) {
        Ok(line) => Ok(Some(line)),
        Err(ReadlineError::Interrupted | ReadlineError::Eof) => Ok(None),
        Err(e) => Err(e),
    }
}
