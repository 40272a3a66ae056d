//! File I/O for the diagnostic log.
//!
//! The log is opened once and read front to back; nothing is tailed or
//! re-read.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use anyhow::{Context, Result};

/// Buffer size for reading log files (8KB).
const BUFFER_SIZE: usize = 8 * 1024;

/// Sequential log file reader that skips blank lines.
pub struct LogLoader {
    reader: BufReader<File>,
    eof_reached: bool,
    line_buffer: String,
}

impl LogLoader {
    /// Open the log file at `path`.
    pub fn open(path: &Path) -> Result<Self> {
        let file = File::open(path).with_context(|| format!("Failed to open log file: {}", path.display()))?;

        Ok(Self {
            reader: BufReader::with_capacity(BUFFER_SIZE, file),
            eof_reached: false,
            line_buffer: String::with_capacity(512),
        })
    }

    /// Read the next non-empty line, with trailing whitespace removed.
    ///
    /// Returns `None` at EOF. Read errors (including invalid UTF-8) are logged
    /// and end the read.
    pub fn next_line(&mut self) -> Option<String> {
        if self.eof_reached {
            return None;
        }
        loop {
            self.line_buffer.clear();

            match self.reader.read_line(&mut self.line_buffer) {
                Ok(0) => {
                    self.eof_reached = true;
                    return None;
                }
                Ok(_) => {
                    let line = self.line_buffer.trim_end();
                    if !line.is_empty() {
                        return Some(line.to_string());
                    }
                }
                Err(e) => {
                    log::warn!("Error reading log file: {}", e);
                    self.eof_reached = true;
                    return None;
                }
            }
        }
    }

    /// Drain the remaining lines.
    pub fn lines(mut self) -> Vec<String> {
        let mut lines = Vec::new();
        while let Some(line) = self.next_line() {
            lines.push(line);
        }
        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write_temp(name: &str, contents: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!("cell-position-plot-{}-{}", std::process::id(), name));
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn reads_non_empty_lines_in_order() {
        let path = write_temp("loader.txt", "first\r\n\n   \nsecond  \nthird");
        let mut loader = LogLoader::open(&path).unwrap();
        assert_eq!(loader.next_line().as_deref(), Some("first"));
        assert_eq!(loader.next_line().as_deref(), Some("second"));
        assert_eq!(loader.next_line().as_deref(), Some("third"));
        assert_eq!(loader.next_line(), None);
        assert_eq!(loader.next_line(), None);
        fs::remove_file(path).ok();
    }

    #[test]
    fn lines_drains_whole_file() {
        let path = write_temp("drain.txt", "a\nb\n\nc\n");
        let lines = LogLoader::open(&path).unwrap().lines();
        assert_eq!(lines, vec!["a", "b", "c"]);
        fs::remove_file(path).ok();
    }

    #[test]
    fn missing_file_is_an_error() {
        let path = std::env::temp_dir().join("cell-position-plot-does-not-exist.txt");
        let err = LogLoader::open(&path).err().expect("open should fail");
        assert!(err.to_string().contains("Failed to open log file"));
    }
}
