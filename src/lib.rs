//! # Trace Log Bridge
//!
//! Bridges loosely-typed host trace events (messages, categorized writes,
//! typed events with IDs, data payloads, transfers, failures) into
//! structured log records with normalized severity and named properties.
//!
//! ## Features
//!
//! - **Early capture**: events arriving before a destination logger is
//!   configured are buffered and replayed in order on rebind
//! - **Severity mapping**: host event kinds map onto a total severity order
//! - **Pluggable filtering**: accept/reject predicate over every intake
//! - **Thread safe**: intake is safe from any thread, including during
//!   rebinding

pub mod bridge;
pub mod core;
pub mod loggers;

pub mod prelude {
    pub use crate::bridge::{
        ActivitySource, BufferSink, CorrelationManager, FixedActivity, SourceLevels, TraceArg,
        TraceBridge, TraceEventCache, TraceEventKind, TraceFilter, TraceFilterEvent, TraceSource,
        BRIDGE_SOURCE_CONTEXT,
    };
    pub use crate::core::{
        default_logger, for_context, set_default_logger, BridgeError, DynError, LogRecord,
        MinimumLevel, Property, PropertyValue, Result, Severity, StructuredLogger,
        SOURCE_CONTEXT_PROPERTY,
    };
    pub use crate::loggers::{CollectingLogger, ConsoleLogger, JsonLogger};
}

pub use bridge::{
    ActivitySource, BufferSink, CorrelationManager, SourceLevels, TraceArg, TraceBridge,
    TraceEventCache, TraceEventKind, TraceFilter, TraceFilterEvent, TraceSource,
    BRIDGE_SOURCE_CONTEXT,
};
pub use core::{
    default_logger, for_context, set_default_logger, BridgeError, DynError, LogRecord,
    MinimumLevel, Property, PropertyValue, Result, Severity, StructuredLogger,
    SOURCE_CONTEXT_PROPERTY,
};
pub use loggers::{CollectingLogger, ConsoleLogger, JsonLogger};
