//! In-memory holding area for records captured before rebinding

use crate::core::error::{BridgeError, Result};
use crate::core::logger::StructuredLogger;
use crate::core::record::LogRecord;
use parking_lot::Mutex;
use std::sync::Arc;

/// Ordered, thread-safe record buffer with exactly two lifecycle states:
/// Active (accepting emits) and Disposed (inert).
///
/// The transition happens once; emits after disposal fail with
/// [`BridgeError::BufferDisposed`].
pub struct BufferSink {
    records: Mutex<Option<Vec<LogRecord>>>,
}

impl BufferSink {
    pub fn new() -> Self {
        Self {
            records: Mutex::new(Some(Vec::new())),
        }
    }

    /// Append a record in arrival order
    pub fn emit(&self, record: LogRecord) -> Result<()> {
        match self.records.lock().as_mut() {
            Some(records) => {
                records.push(record);
                Ok(())
            }
            None => Err(BridgeError::BufferDisposed),
        }
    }

    /// Forward every stored record, unmodified and in insertion order, to
    /// `logger`. Does not clear or dispose; after disposal this is a no-op.
    pub fn drain_to(&self, logger: &dyn StructuredLogger) {
        let guard = self.records.lock();
        if let Some(records) = guard.as_ref() {
            for record in records {
                logger.write(record);
            }
        }
    }

    /// Clear the stored records and transition to Disposed. Idempotent.
    pub fn dispose(&self) {
        self.records.lock().take();
    }

    pub fn is_disposed(&self) -> bool {
        self.records.lock().is_none()
    }

    /// Number of buffered records (zero after disposal)
    pub fn len(&self) -> usize {
        self.records.lock().as_ref().map_or(0, Vec::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Single critical section for rebinding: forward everything in order,
    /// then dispose, with no window for an interleaved emit in between.
    pub(crate) fn replay_and_dispose(&self, logger: &dyn StructuredLogger) {
        let mut guard = self.records.lock();
        if let Some(records) = guard.take() {
            for record in &records {
                logger.write(record);
            }
        }
    }
}

impl Default for BufferSink {
    fn default() -> Self {
        Self::new()
    }
}

/// Destination logger routing every record into a [`BufferSink`]; the
/// initial active logger of every bridge.
pub(crate) struct BufferLogger {
    sink: Arc<BufferSink>,
}

impl BufferLogger {
    pub(crate) fn new(sink: Arc<BufferSink>) -> Self {
        Self { sink }
    }
}

impl StructuredLogger for BufferLogger {
    fn write(&self, record: &LogRecord) {
        // Unreachable after rebind: the swap happens under the same lock
        // that excludes intake. Surface it rather than panic if misused.
        if self.sink.emit(record.clone()).is_err() {
            eprintln!("[TRACE BRIDGE] record dropped: buffer already disposed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::severity::Severity;
    use parking_lot::Mutex as PlMutex;

    struct Capture {
        messages: PlMutex<Vec<String>>,
    }

    impl Capture {
        fn new() -> Self {
            Self {
                messages: PlMutex::new(Vec::new()),
            }
        }
    }

    impl StructuredLogger for Capture {
        fn write(&self, record: &LogRecord) {
            self.messages.lock().push(record.template.clone());
        }
    }

    #[test]
    fn test_emit_and_drain_preserve_order() {
        let sink = BufferSink::new();
        sink.emit(LogRecord::new(Severity::Debug, "first")).unwrap();
        sink.emit(LogRecord::new(Severity::Debug, "second")).unwrap();
        sink.emit(LogRecord::new(Severity::Debug, "third")).unwrap();

        let capture = Capture::new();
        sink.drain_to(&capture);

        assert_eq!(*capture.messages.lock(), vec!["first", "second", "third"]);
        // drain does not clear
        assert_eq!(sink.len(), 3);
        assert!(!sink.is_disposed());
    }

    #[test]
    fn test_emit_after_dispose_fails() {
        let sink = BufferSink::new();
        sink.emit(LogRecord::new(Severity::Debug, "kept")).unwrap();
        sink.dispose();

        let err = sink.emit(LogRecord::new(Severity::Debug, "late")).unwrap_err();
        assert!(matches!(err, BridgeError::BufferDisposed));
    }

    #[test]
    fn test_dispose_is_idempotent() {
        let sink = BufferSink::new();
        sink.emit(LogRecord::new(Severity::Debug, "gone")).unwrap();

        sink.dispose();
        sink.dispose();

        assert!(sink.is_disposed());
        assert_eq!(sink.len(), 0);

        // drain after dispose forwards nothing
        let capture = Capture::new();
        sink.drain_to(&capture);
        assert!(capture.messages.lock().is_empty());
    }

    #[test]
    fn test_replay_and_dispose_is_single_shot() {
        let sink = BufferSink::new();
        sink.emit(LogRecord::new(Severity::Debug, "one")).unwrap();
        sink.emit(LogRecord::new(Severity::Debug, "two")).unwrap();

        let capture = Capture::new();
        sink.replay_and_dispose(&capture);
        assert_eq!(*capture.messages.lock(), vec!["one", "two"]);
        assert!(sink.is_disposed());

        // second replay forwards nothing
        sink.replay_and_dispose(&capture);
        assert_eq!(capture.messages.lock().len(), 2);
    }

    #[test]
    fn test_concurrent_emits_are_all_kept() {
        let sink = Arc::new(BufferSink::new());
        let mut handles = Vec::new();

        for t in 0..4 {
            let sink = Arc::clone(&sink);
            handles.push(std::thread::spawn(move || {
                for i in 0..50 {
                    sink.emit(LogRecord::new(Severity::Debug, format!("{}-{}", t, i)))
                        .unwrap();
                }
            }));
        }
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(sink.len(), 200);
    }
}
