//! Core record model and destination-logger capability

pub mod error;
pub mod logger;
pub mod property;
pub mod record;
pub mod severity;
pub mod template;

pub use error::{BridgeError, Result};
pub use logger::{
    default_logger, for_context, set_default_logger, MinimumLevel, StructuredLogger,
    SOURCE_CONTEXT_PROPERTY,
};
pub use property::{Property, PropertyValue};
pub use record::{DynError, LogRecord};
pub use severity::Severity;
