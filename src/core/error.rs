//! Error types for the trace bridge

pub type Result<T> = std::result::Result<T, BridgeError>;

#[derive(Debug, thiserror::Error)]
pub enum BridgeError {
    /// Emit or replay attempted on a buffer that has already been disposed
    #[error("buffer sink already disposed")]
    BufferDisposed,

    /// Raw event kind outside the known enumeration; never defaulted
    #[error("unknown trace event kind: {value}")]
    UnknownEventKind { value: i32 },

    /// Binding requested but no destination logger has been configured
    #[error("no destination logger configured")]
    NoDestinationLogger,
}

impl BridgeError {
    /// Create an unknown-event-kind error for a raw host value
    pub fn unknown_event_kind(value: i32) -> Self {
        BridgeError::UnknownEventKind { value }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = BridgeError::BufferDisposed;
        assert_eq!(err.to_string(), "buffer sink already disposed");

        let err = BridgeError::unknown_event_kind(42);
        assert_eq!(err.to_string(), "unknown trace event kind: 42");

        let err = BridgeError::NoDestinationLogger;
        assert_eq!(err.to_string(), "no destination logger configured");
    }

    #[test]
    fn test_error_creation() {
        let err = BridgeError::unknown_event_kind(7);
        assert!(matches!(err, BridgeError::UnknownEventKind { value: 7 }));
    }
}
