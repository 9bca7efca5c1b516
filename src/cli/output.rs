//! Output helpers for the CLI handlers.

use std::io::{self, Write};

use hubnote::error::ExportError;

/// Writes one line to stdout.
///
/// # Errors
///
/// Returns [`ExportError::Io`] when the write fails.
pub fn write_line(message: &str) -> Result<(), ExportError> {
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{message}").map_err(|error| ExportError::Io {
        message: error.to_string(),
    })
}
