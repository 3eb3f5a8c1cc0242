//! Destination logger capability
//!
//! `StructuredLogger` is the seam between the bridge and whatever renders
//! and stores records. Implementations apply their own minimum-level gate;
//! `MinimumLevel` is provided for that, with per-source-context overrides
//! keyed by the `SourceContext` property that `for_context` stamps.

use super::property::{Property, PropertyValue};
use super::record::LogRecord;
use super::severity::Severity;
use crate::core::error::{BridgeError, Result};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

/// The name of the property identifying a record's originating namespace
pub const SOURCE_CONTEXT_PROPERTY: &str = "SourceContext";

pub trait StructuredLogger: Send + Sync {
    /// Accept a finished record. Never reports success or failure back to
    /// the caller; a logger that cannot handle a record drops it locally.
    fn write(&self, record: &LogRecord);

    /// Attempt to bind a name/value pair into a property.
    ///
    /// `None` means the binding was rejected (invalid name, unsupported
    /// shape); rejection is an expected outcome, not an error. The default
    /// implementation rejects empty or all-whitespace names.
    fn bind_property(
        &self,
        name: &str,
        value: PropertyValue,
        _destructure: bool,
    ) -> Option<Property> {
        if name.trim().is_empty() {
            return None;
        }
        Some(Property::new(name, value))
    }
}

/// Tag a logger so that every record it forwards carries an extra property.
///
/// The property is added only when the record does not already carry one
/// with the same name.
pub fn for_context(
    logger: Arc<dyn StructuredLogger>,
    name: impl Into<String>,
    value: impl Into<PropertyValue>,
) -> Arc<dyn StructuredLogger> {
    Arc::new(ContextLogger {
        inner: logger,
        property: Property::new(name, value),
    })
}

struct ContextLogger {
    inner: Arc<dyn StructuredLogger>,
    property: Property,
}

impl StructuredLogger for ContextLogger {
    fn write(&self, record: &LogRecord) {
        if record.property(&self.property.name).is_some() {
            self.inner.write(record);
            return;
        }

        let mut tagged = record.clone();
        tagged.properties.push(self.property.clone());
        self.inner.write(&tagged);
    }

    fn bind_property(
        &self,
        name: &str,
        value: PropertyValue,
        destructure: bool,
    ) -> Option<Property> {
        self.inner.bind_property(name, value, destructure)
    }
}

/// Minimum-severity gate with per-source-context overrides.
///
/// A record tagged `SourceContext = X` is gated by the override registered
/// for `X` when one exists, otherwise by the default level.
#[derive(Debug, Clone)]
pub struct MinimumLevel {
    default: Severity,
    overrides: HashMap<String, Severity>,
}

impl MinimumLevel {
    pub fn new(default: Severity) -> Self {
        Self {
            default,
            overrides: HashMap::new(),
        }
    }

    #[must_use]
    pub fn override_for(mut self, source_context: impl Into<String>, level: Severity) -> Self {
        self.overrides.insert(source_context.into(), level);
        self
    }

    pub fn allows(&self, record: &LogRecord) -> bool {
        let min = match record.property(SOURCE_CONTEXT_PROPERTY) {
            Some(PropertyValue::String(context)) => {
                *self.overrides.get(context).unwrap_or(&self.default)
            }
            _ => self.default,
        };
        record.severity >= min
    }
}

impl Default for MinimumLevel {
    fn default() -> Self {
        Self::new(Severity::Verbose)
    }
}

static DEFAULT_LOGGER: RwLock<Option<Arc<dyn StructuredLogger>>> = RwLock::new(None);

/// Install the process-wide default destination logger
pub fn set_default_logger(logger: Arc<dyn StructuredLogger>) {
    *DEFAULT_LOGGER.write() = Some(logger);
}

/// Fetch the process-wide default destination logger, if configured
pub fn default_logger() -> Result<Arc<dyn StructuredLogger>> {
    DEFAULT_LOGGER
        .read()
        .clone()
        .ok_or(BridgeError::NoDestinationLogger)
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;

    struct Capture {
        records: Mutex<Vec<LogRecord>>,
    }

    impl StructuredLogger for Capture {
        fn write(&self, record: &LogRecord) {
            self.records.lock().push(record.clone());
        }
    }

    #[test]
    fn test_bind_property_rejects_blank_names() {
        let capture = Capture {
            records: Mutex::new(Vec::new()),
        };
        assert!(capture.bind_property("", PropertyValue::Int(1), false).is_none());
        assert!(capture.bind_property("  ", PropertyValue::Int(1), false).is_none());
        assert!(capture.bind_property("Id", PropertyValue::Int(1), false).is_some());
    }

    #[test]
    fn test_for_context_tags_records() {
        let capture = Arc::new(Capture {
            records: Mutex::new(Vec::new()),
        });
        let tagged = for_context(capture.clone(), SOURCE_CONTEXT_PROPERTY, "Bridge");

        tagged.write(&LogRecord::new(Severity::Debug, "hello"));

        let records = capture.records.lock();
        assert_eq!(
            records[0].property(SOURCE_CONTEXT_PROPERTY),
            Some(&PropertyValue::from("Bridge"))
        );
    }

    #[test]
    fn test_for_context_keeps_existing_property() {
        let capture = Arc::new(Capture {
            records: Mutex::new(Vec::new()),
        });
        let tagged = for_context(capture.clone(), SOURCE_CONTEXT_PROPERTY, "Outer");

        let record = LogRecord::new(Severity::Debug, "hello")
            .with_properties(vec![Property::new(SOURCE_CONTEXT_PROPERTY, "Inner")]);
        tagged.write(&record);

        let records = capture.records.lock();
        assert_eq!(
            records[0].property(SOURCE_CONTEXT_PROPERTY),
            Some(&PropertyValue::from("Inner"))
        );
        assert_eq!(records[0].properties.len(), 1);
    }

    #[test]
    fn test_minimum_level_override() {
        let gate = MinimumLevel::new(Severity::Information).override_for("Bridge", Severity::Error);

        let plain = LogRecord::new(Severity::Warning, "");
        assert!(gate.allows(&plain));

        let bridged = LogRecord::new(Severity::Warning, "")
            .with_properties(vec![Property::new(SOURCE_CONTEXT_PROPERTY, "Bridge")]);
        assert!(!gate.allows(&bridged));

        let fatal = LogRecord::new(Severity::Fatal, "")
            .with_properties(vec![Property::new(SOURCE_CONTEXT_PROPERTY, "Bridge")]);
        assert!(gate.allows(&fatal));
    }
}
