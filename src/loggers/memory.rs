//! In-memory capturing logger

use crate::core::{LogRecord, MinimumLevel, StructuredLogger};
use parking_lot::Mutex;

/// Destination logger that captures records in memory, in arrival order.
/// Useful as a test double and for inspecting replayed buffers.
pub struct CollectingLogger {
    records: Mutex<Vec<LogRecord>>,
    minimum: Option<MinimumLevel>,
}

impl CollectingLogger {
    pub fn new() -> Self {
        Self {
            records: Mutex::new(Vec::new()),
            minimum: None,
        }
    }

    /// Capture only records passing the given gate
    pub fn with_minimum(minimum: MinimumLevel) -> Self {
        Self {
            records: Mutex::new(Vec::new()),
            minimum: Some(minimum),
        }
    }

    /// Snapshot of the captured records
    pub fn records(&self) -> Vec<LogRecord> {
        self.records.lock().clone()
    }

    /// Remove and return everything captured so far
    pub fn take(&self) -> Vec<LogRecord> {
        std::mem::take(&mut *self.records.lock())
    }

    pub fn len(&self) -> usize {
        self.records.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.lock().is_empty()
    }
}

impl Default for CollectingLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl StructuredLogger for CollectingLogger {
    fn write(&self, record: &LogRecord) {
        if let Some(minimum) = &self.minimum {
            if !minimum.allows(record) {
                return;
            }
        }
        self.records.lock().push(record.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Severity;

    #[test]
    fn test_captures_in_order() {
        let logger = CollectingLogger::new();
        logger.write(&LogRecord::new(Severity::Debug, "a"));
        logger.write(&LogRecord::new(Severity::Debug, "b"));

        let records = logger.records();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].template, "a");
        assert_eq!(records[1].template, "b");
    }

    #[test]
    fn test_minimum_level_gate() {
        let logger = CollectingLogger::with_minimum(MinimumLevel::new(Severity::Warning));
        logger.write(&LogRecord::new(Severity::Debug, "dropped"));
        logger.write(&LogRecord::new(Severity::Error, "kept"));

        let records = logger.records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].template, "kept");
    }

    #[test]
    fn test_take_drains() {
        let logger = CollectingLogger::new();
        logger.write(&LogRecord::new(Severity::Debug, "a"));

        assert_eq!(logger.take().len(), 1);
        assert!(logger.is_empty());
    }
}
