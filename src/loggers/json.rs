//! JSON-lines destination logger

use crate::core::{LogRecord, MinimumLevel, StructuredLogger};
use parking_lot::Mutex;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;

/// Writes each accepted record as a single-line JSON object (JSONL),
/// compatible with log aggregation tools.
pub struct JsonLogger<W: Write + Send> {
    writer: Mutex<W>,
    minimum: MinimumLevel,
}

impl JsonLogger<BufWriter<File>> {
    /// Create a JSON logger appending to the file at `path`
    pub fn file<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self::new(BufWriter::new(file)))
    }
}

impl<W: Write + Send> JsonLogger<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
            minimum: MinimumLevel::default(),
        }
    }

    #[must_use]
    pub fn with_minimum(mut self, minimum: MinimumLevel) -> Self {
        self.minimum = minimum;
        self
    }

    /// Flush pending output and hand back the writer
    pub fn into_inner(self) -> W {
        let mut writer = self.writer.into_inner();
        if let Err(e) = writer.flush() {
            eprintln!("[TRACE BRIDGE] json logger flush failed: {}", e);
        }
        writer
    }
}

impl<W: Write + Send> StructuredLogger for JsonLogger<W> {
    fn write(&self, record: &LogRecord) {
        if !self.minimum.allows(record) {
            return;
        }

        // No flush here: pending output stays buffered until drop or into_inner
        let json = record.to_json_value();
        let mut writer = self.writer.lock();
        if let Err(e) = writeln!(writer, "{}", json) {
            eprintln!("[TRACE BRIDGE] json logger write failed: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Property, Severity};
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_json_logger_writes_one_line_per_record() {
        let dir = tempdir().unwrap();
        let log_path = dir.path().join("bridge.jsonl");

        let logger = JsonLogger::file(&log_path).unwrap();

        logger.write(
            &LogRecord::new(Severity::Information, "hello {Name}")
                .with_properties(vec![Property::new("Name", "world")]),
        );
        logger.write(&LogRecord::new(Severity::Error, "bad"));

        drop(logger);

        let content = fs::read_to_string(&log_path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);

        let first: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first["level"], "INFO");
        assert_eq!(first["message"], "hello world");
        assert_eq!(first["properties"]["Name"], "world");

        let second: serde_json::Value = serde_json::from_str(lines[1]).unwrap();
        assert_eq!(second["level"], "ERROR");
    }

    #[test]
    fn test_writes_stay_buffered_until_drop() {
        let dir = tempdir().unwrap();
        let log_path = dir.path().join("buffered.jsonl");

        let logger = JsonLogger::file(&log_path).unwrap();
        logger.write(&LogRecord::new(Severity::Information, "pending"));

        // a single small record fits the BufWriter buffer, so nothing
        // reaches the file before the logger goes away
        assert_eq!(fs::read_to_string(&log_path).unwrap(), "");

        drop(logger);
        assert!(fs::read_to_string(&log_path).unwrap().contains("pending"));
    }

    #[test]
    fn test_minimum_level_gate() {
        let logger = JsonLogger::new(Vec::new()).with_minimum(MinimumLevel::new(Severity::Warning));
        logger.write(&LogRecord::new(Severity::Debug, "dropped"));
        logger.write(&LogRecord::new(Severity::Fatal, "kept"));

        let bytes = logger.into_inner();
        let content = String::from_utf8(bytes).unwrap();
        assert!(!content.contains("dropped"));
        assert!(content.contains("kept"));
    }
}
