//! Output sink for generated code.

use std::io::Write;
use std::path::Path;

use tracing::info;

use crate::error::Result;

/// Writes `code` to `path`, or to stdout when `path` is `None`.
///
/// Missing parent directories are created.
///
/// # Errors
///
/// Returns an I/O error if the file or stdout cannot be written.
pub fn write_output(path: Option<&Path>, code: &str) -> Result<()> {
    match path {
        Some(path) => {
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent)?;
                }
            }
            std::fs::write(path, code)?;
            info!("Wrote {} bytes to {}", code.len(), path.display());
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(code.as_bytes())?;
            stdout.flush()?;
        }
    }
    Ok(())
}
