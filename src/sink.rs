// 💾 Output Sinks
// Where the rendered worth table goes; always written as UTF-8

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::errors::SinkError;

/// WorthSink - accepts the final document
pub trait WorthSink {
    fn write(&self, text: &str) -> Result<(), SinkError>;

    /// Destination identifier for progress messages
    fn destination(&self) -> String;
}

/// Writes (and overwrites) a file, creating missing parent directories
pub struct FileSink {
    path: PathBuf,
}

impl FileSink {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        FileSink {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl WorthSink for FileSink {
    fn write(&self, text: &str) -> Result<(), SinkError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| SinkError::CreateDir {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        fs::write(&self.path, text.as_bytes()).map_err(|source| SinkError::Write {
            destination: self.destination(),
            source,
        })
    }

    fn destination(&self) -> String {
        self.path.display().to_string()
    }
}

/// Writes to standard output
#[derive(Debug, Clone, Copy, Default)]
pub struct StdoutSink;

impl WorthSink for StdoutSink {
    fn write(&self, text: &str) -> Result<(), SinkError> {
        let mut out = io::stdout().lock();
        out.write_all(text.as_bytes())
            .and_then(|_| out.flush())
            .map_err(|source| SinkError::Write {
                destination: self.destination(),
                source,
            })
    }

    fn destination(&self) -> String {
        "<stdout>".to_string()
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_sink_creates_parents() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("plugins").join("worth.yml");
        let sink = FileSink::new(&target);

        sink.write("worth:\n  1: 2.0\n").unwrap();

        assert_eq!(fs::read_to_string(&target).unwrap(), "worth:\n  1: 2.0\n");
    }

    #[test]
    fn test_file_sink_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("worth.yml");
        let sink = FileSink::new(&target);

        sink.write("old contents that are longer\n").unwrap();
        sink.write("new\n").unwrap();

        assert_eq!(fs::read_to_string(&target).unwrap(), "new\n");
    }

    #[test]
    fn test_file_sink_reports_write_failure() {
        let dir = tempfile::tempdir().unwrap();
        // A directory cannot be written as a file
        let sink = FileSink::new(dir.path());

        match sink.write("x") {
            Err(SinkError::Write { destination, .. }) => {
                assert_eq!(destination, dir.path().display().to_string());
            }
            other => panic!("expected write failure, got {:?}", other),
        }
    }
}
