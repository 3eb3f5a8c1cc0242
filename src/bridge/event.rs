//! Host trace event kinds and intake argument shapes

use crate::core::error::{BridgeError, Result};
use crate::core::property::PropertyValue;
use crate::core::record::DynError;
use crate::core::severity::Severity;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Typed trace event kinds emitted by the host facility.
///
/// The discriminants are the host's raw wire values; anything outside this
/// set is rejected by [`TraceEventKind::from_raw`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TraceEventKind {
    Critical = 1,
    Error = 2,
    Warning = 4,
    Information = 8,
    Verbose = 16,
    Start = 256,
    Stop = 512,
    Suspend = 1024,
    Resume = 2048,
    Transfer = 4096,
}

impl TraceEventKind {
    /// Decode a raw host value.
    ///
    /// Fails with [`BridgeError::UnknownEventKind`] for values outside the
    /// enumeration; callers never receive a guessed kind.
    pub fn from_raw(value: i32) -> Result<Self> {
        match value {
            1 => Ok(TraceEventKind::Critical),
            2 => Ok(TraceEventKind::Error),
            4 => Ok(TraceEventKind::Warning),
            8 => Ok(TraceEventKind::Information),
            16 => Ok(TraceEventKind::Verbose),
            256 => Ok(TraceEventKind::Start),
            512 => Ok(TraceEventKind::Stop),
            1024 => Ok(TraceEventKind::Suspend),
            2048 => Ok(TraceEventKind::Resume),
            4096 => Ok(TraceEventKind::Transfer),
            other => Err(BridgeError::unknown_event_kind(other)),
        }
    }

    /// Map this kind to its normalized severity
    pub fn severity(self) -> Severity {
        match self {
            TraceEventKind::Critical => Severity::Fatal,
            TraceEventKind::Error => Severity::Error,
            TraceEventKind::Warning => Severity::Warning,
            TraceEventKind::Information => Severity::Information,
            TraceEventKind::Verbose => Severity::Verbose,
            TraceEventKind::Start
            | TraceEventKind::Stop
            | TraceEventKind::Suspend
            | TraceEventKind::Resume
            | TraceEventKind::Transfer => Severity::Debug,
        }
    }

    pub fn to_str(&self) -> &'static str {
        match self {
            TraceEventKind::Critical => "Critical",
            TraceEventKind::Error => "Error",
            TraceEventKind::Warning => "Warning",
            TraceEventKind::Information => "Information",
            TraceEventKind::Verbose => "Verbose",
            TraceEventKind::Start => "Start",
            TraceEventKind::Stop => "Stop",
            TraceEventKind::Suspend => "Suspend",
            TraceEventKind::Resume => "Resume",
            TraceEventKind::Transfer => "Transfer",
        }
    }

    /// Whether this kind belongs to the activity-tracing family
    pub fn is_activity(self) -> bool {
        matches!(
            self,
            TraceEventKind::Start
                | TraceEventKind::Stop
                | TraceEventKind::Suspend
                | TraceEventKind::Resume
                | TraceEventKind::Transfer
        )
    }
}

impl fmt::Display for TraceEventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_str())
    }
}

/// A positional argument supplied with a format-style trace event:
/// either an ordinary value or an error to be threaded through as the
/// record's associated error.
#[derive(Debug, Clone)]
pub enum TraceArg {
    Value(PropertyValue),
    Error(DynError),
}

impl TraceArg {
    /// Render the argument as a property value; errors fall back to their
    /// display form.
    pub fn to_property_value(&self) -> PropertyValue {
        match self {
            TraceArg::Value(value) => value.clone(),
            TraceArg::Error(err) => PropertyValue::String(err.to_string()),
        }
    }
}

impl TraceArg {
    pub fn value(value: impl Into<PropertyValue>) -> Self {
        TraceArg::Value(value.into())
    }

    pub fn error(err: DynError) -> Self {
        TraceArg::Error(err)
    }
}

impl From<PropertyValue> for TraceArg {
    fn from(value: PropertyValue) -> Self {
        TraceArg::Value(value)
    }
}

impl From<&str> for TraceArg {
    fn from(s: &str) -> Self {
        TraceArg::Value(s.into())
    }
}

impl From<String> for TraceArg {
    fn from(s: String) -> Self {
        TraceArg::Value(s.into())
    }
}

impl From<i32> for TraceArg {
    fn from(i: i32) -> Self {
        TraceArg::Value(i.into())
    }
}

impl From<i64> for TraceArg {
    fn from(i: i64) -> Self {
        TraceArg::Value(i.into())
    }
}

impl From<f64> for TraceArg {
    fn from(f: f64) -> Self {
        TraceArg::Value(f.into())
    }
}

impl From<bool> for TraceArg {
    fn from(b: bool) -> Self {
        TraceArg::Value(b.into())
    }
}

impl From<DynError> for TraceArg {
    fn from(err: DynError) -> Self {
        TraceArg::Error(err)
    }
}

/// Per-intake snapshot of ambient call-site state, handed to filters
#[derive(Debug, Clone)]
pub struct TraceEventCache {
    pub timestamp: DateTime<Utc>,
    pub process_id: u32,
    pub thread_id: String,
}

impl TraceEventCache {
    pub fn capture() -> Self {
        Self {
            timestamp: Utc::now(),
            process_id: std::process::id(),
            thread_id: format!("{:?}", std::thread::current().id()),
        }
    }
}

impl Default for TraceEventCache {
    fn default() -> Self {
        Self::capture()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_mapping_table() {
        assert_eq!(TraceEventKind::Critical.severity(), Severity::Fatal);
        assert_eq!(TraceEventKind::Error.severity(), Severity::Error);
        assert_eq!(TraceEventKind::Warning.severity(), Severity::Warning);
        assert_eq!(
            TraceEventKind::Information.severity(),
            Severity::Information
        );
        assert_eq!(TraceEventKind::Verbose.severity(), Severity::Verbose);
        assert_eq!(TraceEventKind::Start.severity(), Severity::Debug);
        assert_eq!(TraceEventKind::Stop.severity(), Severity::Debug);
        assert_eq!(TraceEventKind::Suspend.severity(), Severity::Debug);
        assert_eq!(TraceEventKind::Resume.severity(), Severity::Debug);
        assert_eq!(TraceEventKind::Transfer.severity(), Severity::Debug);
    }

    #[test]
    fn test_from_raw_round_trip() {
        for kind in [
            TraceEventKind::Critical,
            TraceEventKind::Error,
            TraceEventKind::Warning,
            TraceEventKind::Information,
            TraceEventKind::Verbose,
            TraceEventKind::Start,
            TraceEventKind::Stop,
            TraceEventKind::Suspend,
            TraceEventKind::Resume,
            TraceEventKind::Transfer,
        ] {
            assert_eq!(TraceEventKind::from_raw(kind as i32).unwrap(), kind);
        }
    }

    #[test]
    fn test_from_raw_rejects_unknown() {
        let err = TraceEventKind::from_raw(3).unwrap_err();
        assert!(matches!(err, BridgeError::UnknownEventKind { value: 3 }));

        assert!(TraceEventKind::from_raw(0).is_err());
        assert!(TraceEventKind::from_raw(8192).is_err());
    }

    #[test]
    fn test_trace_arg_error_renders_as_string() {
        let err: DynError = std::sync::Arc::new(std::io::Error::new(
            std::io::ErrorKind::Other,
            "boom",
        ));
        let arg = TraceArg::Error(err);
        assert_eq!(arg.to_property_value(), PropertyValue::from("boom"));
    }
}
