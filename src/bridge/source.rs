//! Host-side trace source: a named event origin with a severity switch
//! and registered bridge listeners, plus the binding utility that rebinds
//! every listener to a destination logger.

use super::event::{TraceArg, TraceEventCache, TraceEventKind};
use super::listener::TraceBridge;
use crate::core::error::Result;
use crate::core::logger::{default_logger, StructuredLogger};
use crate::core::property::PropertyValue;
use crate::core::record::LogRecord;
use crate::core::severity::Severity;
use parking_lot::RwLock;
use std::sync::Arc;
use uuid::Uuid;

/// Switch deciding which typed events a source forwards to its listeners.
///
/// Activity-tracing kinds (Start, Stop, Suspend, Resume, Transfer) pass
/// only under `All`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SourceLevels {
    Off,
    Critical,
    Error,
    #[default]
    Warning,
    Information,
    Verbose,
    All,
}

impl SourceLevels {
    pub fn should_trace(self, kind: TraceEventKind) -> bool {
        if kind.is_activity() {
            return self == SourceLevels::All;
        }

        let threshold = match self {
            SourceLevels::Off => return false,
            SourceLevels::All => return true,
            SourceLevels::Critical => Severity::Fatal,
            SourceLevels::Error => Severity::Error,
            SourceLevels::Warning => Severity::Warning,
            SourceLevels::Information => Severity::Information,
            SourceLevels::Verbose => Severity::Verbose,
        };
        kind.severity() >= threshold
    }
}

/// A named origin of trace events fanning out to registered bridges
pub struct TraceSource {
    name: String,
    switch: RwLock<SourceLevels>,
    listeners: RwLock<Vec<Arc<TraceBridge>>>,
}

impl TraceSource {
    pub fn new(name: impl Into<String>, switch: SourceLevels) -> Self {
        Self {
            name: name.into(),
            switch: RwLock::new(switch),
            listeners: RwLock::new(Vec::new()),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_switch(&self, switch: SourceLevels) {
        *self.switch.write() = switch;
    }

    pub fn add_listener(&self, listener: Arc<TraceBridge>) {
        self.listeners.write().push(listener);
    }

    pub fn listeners(&self) -> Vec<Arc<TraceBridge>> {
        self.listeners.read().clone()
    }

    pub fn trace_event(&self, kind: TraceEventKind, id: i32) {
        self.fan_out(kind, |bridge, cache| {
            bridge.trace_event(cache, &self.name, kind, id);
        });
    }

    pub fn trace_event_message(&self, kind: TraceEventKind, id: i32, message: &str) {
        self.fan_out(kind, |bridge, cache| {
            bridge.trace_event_message(cache, &self.name, kind, id, message);
        });
    }

    pub fn trace_event_format(
        &self,
        kind: TraceEventKind,
        id: i32,
        format: &str,
        args: Vec<TraceArg>,
    ) {
        self.fan_out(kind, |bridge, cache| {
            bridge.trace_event_format(cache, &self.name, kind, id, format, args.clone());
        });
    }

    /// Information-level message, the common case
    pub fn trace_information(&self, message: &str) {
        self.trace_event_message(TraceEventKind::Information, 0, message);
    }

    pub fn trace_data(&self, kind: TraceEventKind, id: i32, data: impl Into<PropertyValue>) {
        let data = data.into();
        self.fan_out(kind, |bridge, cache| {
            bridge.trace_data(cache, &self.name, kind, id, data.clone());
        });
    }

    pub fn trace_data_array(&self, kind: TraceEventKind, id: i32, data: Vec<PropertyValue>) {
        self.fan_out(kind, |bridge, cache| {
            bridge.trace_data_array(cache, &self.name, kind, id, data.clone());
        });
    }

    pub fn trace_transfer(&self, id: i32, message: &str, related_activity: Uuid) {
        self.fan_out(TraceEventKind::Transfer, |bridge, cache| {
            bridge.trace_transfer(cache, &self.name, id, message, related_activity);
        });
    }

    fn fan_out(&self, kind: TraceEventKind, mut call: impl FnMut(&TraceBridge, &TraceEventCache)) {
        if !self.switch.read().should_trace(kind) {
            return;
        }

        let cache = TraceEventCache::capture();
        for listener in self.listeners.read().iter() {
            call(listener, &cache);
        }
    }

    /// Rebind every registered bridge to `logger`, replaying their buffers.
    ///
    /// When the source has no bridges, a warning record is written through
    /// `logger` instead, so a misconfigured bootstrap is visible somewhere.
    pub fn write_to(&self, logger: Arc<dyn StructuredLogger>) -> Result<()> {
        let listeners = self.listeners();

        if listeners.is_empty() {
            let record = LogRecord::new(
                Severity::Warning,
                "No trace bridge listeners registered on source {TraceSource}",
            )
            .with_properties(vec![crate::core::property::Property::new(
                super::extract::SOURCE_PROPERTY,
                self.name.as_str(),
            )]);
            logger.write(&record);
            return Ok(());
        }

        for listener in listeners {
            listener.write_to(Arc::clone(&logger))?;
        }
        Ok(())
    }

    /// Rebind every registered bridge to the process-wide default logger.
    ///
    /// Fails with [`crate::core::BridgeError::NoDestinationLogger`] when no
    /// default has been configured.
    pub fn write_to_default(&self) -> Result<()> {
        self.write_to(default_logger()?)
    }
}
