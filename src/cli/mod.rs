//! CLI utilities for ferro-gwas
//!
//! Functions used by the `ferro-gwas` binary, kept in the library so they
//! can be tested against in-memory buffers.

pub mod format;

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::error::GwasError;

pub use format::{output_error, output_notation, write_records, OutputFormat};

/// Open the output destination: a file, or stdout for `None` and `-`.
pub fn open_output(path: Option<&Path>) -> Result<Box<dyn Write>, GwasError> {
    match path {
        Some(path) if path.to_string_lossy() != "-" => {
            let file = File::create(path).map_err(|e| GwasError::Io {
                msg: format!("Failed to create {}: {}", path.display(), e),
            })?;
            Ok(Box::new(BufWriter::new(file)))
        }
        _ => Ok(Box::new(BufWriter::new(io::stdout()))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_output_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.ndjson");
        {
            let mut writer = open_output(Some(path.as_path())).unwrap();
            writeln!(writer, "hello").unwrap();
        }
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "hello\n");
    }

    #[test]
    fn test_open_output_bad_dir() {
        let err = open_output(Some(Path::new("/nonexistent/dir/out.ndjson"))).err();
        assert!(matches!(err, Some(GwasError::Io { .. })));
    }
}
