//! The trace listener: event intake, record construction, buffered
//! capture, and the one-time rebind to a destination logger.

use super::activity::{ActivitySource, CorrelationManager};
use super::buffer::{BufferLogger, BufferSink};
use super::event::{TraceArg, TraceEventCache, TraceEventKind};
use super::extract::{
    PropertyExtractor, CATEGORY_PROPERTY, FAIL_DETAIL_PROPERTY, RELATED_ACTIVITY_ID_PROPERTY,
    TRACE_DATA_PROPERTY,
};
use super::filter::{TraceFilter, TraceFilterEvent};
use crate::core::error::{BridgeError, Result};
use crate::core::logger::{for_context, StructuredLogger, SOURCE_CONTEXT_PROPERTY};
use crate::core::property::{Property, PropertyValue};
use crate::core::record::{DynError, LogRecord};
use crate::core::severity::Severity;
use parking_lot::RwLock;
use std::sync::Arc;
use uuid::Uuid;

/// Value of the `SourceContext` property stamped on every record a bridge
/// forwards after rebinding; destination minimum-level overrides key on it.
pub const BRIDGE_SOURCE_CONTEXT: &str = "TraceLogBridge";

const DEFAULT_SEVERITY: Severity = Severity::Debug;
const FAIL_SEVERITY: Severity = Severity::Fatal;
const NO_MESSAGE_EVENT_TEMPLATE: &str = "{TraceSource} {TraceEventType}: {TraceEventId}";
const TRACE_DATA_TEMPLATE: &str = "{TraceData}";

/// Listener that converts host trace events into structured log records.
///
/// Starts in the Buffering state, capturing every accepted record in an
/// owned [`BufferSink`]. [`TraceBridge::write_to`] transitions to Bound
/// exactly once: it tags the supplied logger with the bridge's source
/// context, replays the buffer through it in original order, disposes the
/// buffer, and makes the tagged logger the active destination.
///
/// Every intake method is safe to call from any thread at any time,
/// including concurrently with `write_to`.
pub struct TraceBridge {
    active: RwLock<Arc<dyn StructuredLogger>>,
    buffer: Arc<BufferSink>,
    filter: RwLock<Option<Arc<dyn TraceFilter>>>,
    activity: Arc<dyn ActivitySource>,
}

/// One intake request; every public intake method funnels through this so
/// the property construction lives in exactly one place.
enum Intake {
    Message {
        message: String,
        category: Option<String>,
    },
    Object {
        data: PropertyValue,
        category: Option<String>,
    },
    Event {
        cache: TraceEventCache,
        source: String,
        kind: TraceEventKind,
        id: i32,
        message: Option<String>,
        args: Option<Vec<TraceArg>>,
    },
    Data {
        cache: TraceEventCache,
        source: String,
        kind: TraceEventKind,
        id: i32,
        payload: Payload,
    },
    Transfer {
        cache: TraceEventCache,
        source: String,
        id: i32,
        message: String,
        related: Uuid,
    },
    Fail {
        message: String,
        detail: Option<String>,
    },
}

enum Payload {
    Single(PropertyValue),
    Many(Vec<PropertyValue>),
}

impl TraceBridge {
    pub fn new() -> Self {
        Self::with_activity_source(Arc::new(CorrelationManager))
    }

    /// Create a bridge reading correlation state from the given accessor
    pub fn with_activity_source(activity: Arc<dyn ActivitySource>) -> Self {
        let buffer = Arc::new(BufferSink::new());
        let initial: Arc<dyn StructuredLogger> = Arc::new(BufferLogger::new(Arc::clone(&buffer)));

        Self {
            active: RwLock::new(initial),
            buffer,
            filter: RwLock::new(None),
            activity,
        }
    }

    /// Install or remove the intake filter
    pub fn set_filter(&self, filter: Option<Arc<dyn TraceFilter>>) {
        *self.filter.write() = filter;
    }

    /// Plain message write
    pub fn write(&self, message: impl Into<String>) {
        self.dispatch(Intake::Message {
            message: message.into(),
            category: None,
        });
    }

    /// Plain message write with a category property
    pub fn write_with_category(&self, message: impl Into<String>, category: impl Into<String>) {
        self.dispatch(Intake::Message {
            message: message.into(),
            category: Some(category.into()),
        });
    }

    /// Object write: the payload becomes a `TraceData` property and the
    /// message renders its display form
    pub fn write_object(&self, data: impl Into<PropertyValue>) {
        self.dispatch(Intake::Object {
            data: data.into(),
            category: None,
        });
    }

    pub fn write_object_with_category(
        &self,
        data: impl Into<PropertyValue>,
        category: impl Into<String>,
    ) {
        self.dispatch(Intake::Object {
            data: data.into(),
            category: Some(category.into()),
        });
    }

    /// Typed trace event with no message; the template embeds source, kind
    /// and ID
    pub fn trace_event(&self, cache: &TraceEventCache, source: &str, kind: TraceEventKind, id: i32) {
        self.dispatch(Intake::Event {
            cache: cache.clone(),
            source: source.to_string(),
            kind,
            id,
            message: None,
            args: None,
        });
    }

    /// Typed trace event with a message
    pub fn trace_event_message(
        &self,
        cache: &TraceEventCache,
        source: &str,
        kind: TraceEventKind,
        id: i32,
        message: impl Into<String>,
    ) {
        self.dispatch(Intake::Event {
            cache: cache.clone(),
            source: source.to_string(),
            kind,
            id,
            message: Some(message.into()),
            args: None,
        });
    }

    /// Typed trace event with a format string and positional arguments
    pub fn trace_event_format(
        &self,
        cache: &TraceEventCache,
        source: &str,
        kind: TraceEventKind,
        id: i32,
        format: impl Into<String>,
        args: Vec<TraceArg>,
    ) {
        self.dispatch(Intake::Event {
            cache: cache.clone(),
            source: source.to_string(),
            kind,
            id,
            message: Some(format.into()),
            args: Some(args),
        });
    }

    /// Data event carrying a single payload object
    pub fn trace_data(
        &self,
        cache: &TraceEventCache,
        source: &str,
        kind: TraceEventKind,
        id: i32,
        data: impl Into<PropertyValue>,
    ) {
        self.dispatch(Intake::Data {
            cache: cache.clone(),
            source: source.to_string(),
            kind,
            id,
            payload: Payload::Single(data.into()),
        });
    }

    /// Data event carrying an ordered array of payload objects, preserved
    /// as a sequence rather than flattened to a string
    pub fn trace_data_array(
        &self,
        cache: &TraceEventCache,
        source: &str,
        kind: TraceEventKind,
        id: i32,
        data: Vec<PropertyValue>,
    ) {
        self.dispatch(Intake::Data {
            cache: cache.clone(),
            source: source.to_string(),
            kind,
            id,
            payload: Payload::Many(data),
        });
    }

    /// Transfer event relating the current activity to another
    pub fn trace_transfer(
        &self,
        cache: &TraceEventCache,
        source: &str,
        id: i32,
        message: impl Into<String>,
        related_activity: Uuid,
    ) {
        self.dispatch(Intake::Transfer {
            cache: cache.clone(),
            source: source.to_string(),
            id,
            message: message.into(),
            related: related_activity,
        });
    }

    /// Failure report; always Fatal
    pub fn fail(&self, message: impl Into<String>) {
        self.dispatch(Intake::Fail {
            message: message.into(),
            detail: None,
        });
    }

    /// Failure report with a detail string; always Fatal
    pub fn fail_with_detail(&self, message: impl Into<String>, detail: impl Into<String>) {
        self.dispatch(Intake::Fail {
            message: message.into(),
            detail: Some(detail.into()),
        });
    }

    /// Rebind the bridge to `logger`: tag it with the bridge source
    /// context, replay all buffered records through it in original order,
    /// dispose the buffer, and make it the active destination.
    ///
    /// The replay and the reference swap happen under the lock that intake
    /// reads, so a concurrent intake lands either in the buffer (and is
    /// replayed) or in the new logger, never both and never nowhere.
    ///
    /// Fails with [`BridgeError::BufferDisposed`] when called a second
    /// time or after [`TraceBridge::dispose`].
    pub fn write_to(&self, logger: Arc<dyn StructuredLogger>) -> Result<()> {
        let tagged = for_context(logger, SOURCE_CONTEXT_PROPERTY, BRIDGE_SOURCE_CONTEXT);

        let mut active = self.active.write();
        if self.buffer.is_disposed() {
            return Err(BridgeError::BufferDisposed);
        }

        self.buffer.replay_and_dispose(tagged.as_ref());
        *active = tagged;
        Ok(())
    }

    /// Dispose the owned buffer without replaying it. Idempotent.
    pub fn dispose(&self) {
        self.buffer.dispose();
    }

    fn dispatch(&self, intake: Intake) {
        // Read the active logger once; held across filter, extraction and
        // emit so rebinding cannot interleave mid-call.
        let active = self.active.read();

        if !self.should_trace(&intake) {
            return;
        }

        let extractor = PropertyExtractor::new(&**active, &*self.activity);
        let (severity, template, properties, error) = build(&extractor, intake);

        let record = LogRecord::new(severity, template)
            .with_properties(properties)
            .with_error(error);
        active.write(&record);
    }

    fn should_trace(&self, intake: &Intake) -> bool {
        let filter = self.filter.read().clone();
        let Some(filter) = filter else {
            return true;
        };

        let event = match intake {
            Intake::Message { message, .. } => TraceFilterEvent {
                message: Some(message),
                ..Default::default()
            },
            Intake::Object { data, .. } => TraceFilterEvent {
                data: Some(data),
                ..Default::default()
            },
            Intake::Event {
                cache,
                source,
                kind,
                id,
                message,
                args,
            } => TraceFilterEvent {
                cache: Some(cache),
                source: Some(source),
                kind: Some(*kind),
                id: Some(*id),
                message: message.as_deref(),
                args: args.as_deref(),
                ..Default::default()
            },
            Intake::Data {
                cache,
                source,
                kind,
                id,
                payload,
            } => {
                let (data, data_array) = match payload {
                    Payload::Single(value) => (Some(value), None),
                    Payload::Many(values) => (None, Some(values.as_slice())),
                };
                TraceFilterEvent {
                    cache: Some(cache),
                    source: Some(source),
                    kind: Some(*kind),
                    id: Some(*id),
                    data,
                    data_array,
                    ..Default::default()
                }
            }
            Intake::Transfer {
                cache,
                source,
                id,
                message,
                ..
            } => TraceFilterEvent {
                cache: Some(cache),
                source: Some(source),
                kind: Some(TraceEventKind::Transfer),
                id: Some(*id),
                message: Some(message),
                ..Default::default()
            },
            Intake::Fail { message, .. } => TraceFilterEvent {
                message: Some(message),
                ..Default::default()
            },
        };

        filter.should_trace(&event)
    }
}

/// Turn one intake request into the pieces of a record
fn build(
    extractor: &PropertyExtractor<'_>,
    intake: Intake,
) -> (Severity, String, Vec<Property>, Option<DynError>) {
    match intake {
        Intake::Message { message, category } => {
            let mut properties = extractor.base();
            if let Some(category) = category {
                extractor.push_bound(&mut properties, CATEGORY_PROPERTY, category.into());
            }
            (DEFAULT_SEVERITY, message, properties, None)
        }
        Intake::Object { data, category } => {
            let mut properties = extractor.base();
            extractor.push_bound(&mut properties, TRACE_DATA_PROPERTY, data);
            if let Some(category) = category {
                extractor.push_bound(&mut properties, CATEGORY_PROPERTY, category.into());
            }
            (
                DEFAULT_SEVERITY,
                TRACE_DATA_TEMPLATE.to_string(),
                properties,
                None,
            )
        }
        Intake::Event {
            source,
            kind,
            id,
            message,
            args,
            ..
        } => {
            let mut properties = extractor.for_event(&source, kind, id);
            let mut error = None;
            if let Some(args) = args {
                error = extractor.append_args(&mut properties, &args);
            }
            let template = message.unwrap_or_else(|| NO_MESSAGE_EVENT_TEMPLATE.to_string());
            (kind.severity(), template, properties, error)
        }
        Intake::Data {
            source,
            kind,
            id,
            payload,
            ..
        } => {
            let mut properties = extractor.for_event(&source, kind, id);
            let data = match payload {
                Payload::Single(value) => value,
                Payload::Many(values) => PropertyValue::Sequence(values),
            };
            extractor.push_bound(&mut properties, TRACE_DATA_PROPERTY, data);
            (
                kind.severity(),
                TRACE_DATA_TEMPLATE.to_string(),
                properties,
                None,
            )
        }
        Intake::Transfer {
            source,
            id,
            message,
            related,
            ..
        } => {
            let kind = TraceEventKind::Transfer;
            let mut properties = extractor.for_event(&source, kind, id);
            extractor.push_bound(&mut properties, RELATED_ACTIVITY_ID_PROPERTY, related.into());
            (kind.severity(), message, properties, None)
        }
        Intake::Fail { message, detail } => {
            let mut properties = extractor.for_fail();
            if let Some(detail) = detail {
                extractor.push_bound(&mut properties, FAIL_DETAIL_PROPERTY, detail.into());
            }
            (FAIL_SEVERITY, message, properties, None)
        }
    }
}

impl Default for TraceBridge {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for TraceBridge {
    fn drop(&mut self) {
        self.buffer.dispose();
    }
}
