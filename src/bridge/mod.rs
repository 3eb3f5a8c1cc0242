//! The trace-event side: listener, buffering, filtering, and the host
//! source model

pub mod activity;
pub mod buffer;
pub mod event;
pub mod extract;
pub mod filter;
pub mod listener;
pub mod source;

pub use activity::{ActivitySource, CorrelationManager, FixedActivity};
pub use buffer::BufferSink;
pub use event::{TraceArg, TraceEventCache, TraceEventKind};
pub use extract::PropertyExtractor;
pub use filter::{TraceFilter, TraceFilterEvent};
pub use listener::{TraceBridge, BRIDGE_SOURCE_CONTEXT};
pub use source::{SourceLevels, TraceSource};
