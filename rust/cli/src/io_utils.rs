//! Line input for interactive commands.

use std::io::BufRead;

/// Reads one line from `input`, trimmed. `None` on EOF or a read error.
///
/// ```rust
/// # use adaptive_cli::io_utils::read_stdin_line;
/// let mut input = std::io::Cursor::new("raise 40\n");
/// assert_eq!(read_stdin_line(&mut input).as_deref(), Some("raise 40"));
/// assert_eq!(read_stdin_line(&mut input), None);
/// ```
pub fn read_stdin_line(input: &mut dyn BufRead) -> Option<String> {
    let mut line = String::new();
    match input.read_line(&mut line) {
        Ok(0) => None,
        Ok(_) => Some(line.trim().to_string()),
        Err(e) => {
            tracing::warn!(error = %e, "failed to read input");
            None
        }
    }
}
