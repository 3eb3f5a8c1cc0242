//! Property extraction for each intake shape

use super::activity::ActivitySource;
use super::event::{TraceArg, TraceEventKind};
use crate::core::logger::StructuredLogger;
use crate::core::property::{Property, PropertyValue};
use crate::core::record::DynError;

pub const ACTIVITY_ID_PROPERTY: &str = "ActivityId";
pub const CATEGORY_PROPERTY: &str = "Category";
pub const EVENT_ID_PROPERTY: &str = "TraceEventId";
pub const EVENT_KIND_PROPERTY: &str = "TraceEventType";
pub const FAIL_DETAIL_PROPERTY: &str = "FailDetails";
pub const RELATED_ACTIVITY_ID_PROPERTY: &str = "RelatedActivityId";
pub const SOURCE_PROPERTY: &str = "TraceSource";
pub const TRACE_DATA_PROPERTY: &str = "TraceData";

/// Marker value bound to `TraceEventType` for fail intakes
pub const FAIL_EVENT_KIND: &str = "Fail";

/// Builds property lists for intake calls, binding every pair through the
/// active logger. A rejected binding is silently omitted; no path out of
/// this type can abort an emission.
pub struct PropertyExtractor<'a> {
    logger: &'a dyn StructuredLogger,
    activity: &'a dyn ActivitySource,
}

impl<'a> PropertyExtractor<'a> {
    pub fn new(logger: &'a dyn StructuredLogger, activity: &'a dyn ActivitySource) -> Self {
        Self { logger, activity }
    }

    /// Properties common to every intake: the ambient activity identifier
    pub fn base(&self) -> Vec<Property> {
        let mut properties = Vec::new();
        self.push_bound(
            &mut properties,
            ACTIVITY_ID_PROPERTY,
            self.activity.activity_id().into(),
        );
        properties
    }

    /// Properties for typed trace events: source name, kind tag, event ID
    pub fn for_event(&self, source: &str, kind: TraceEventKind, id: i32) -> Vec<Property> {
        let mut properties = self.base();
        self.push_bound(&mut properties, SOURCE_PROPERTY, source.into());
        self.push_bound(&mut properties, EVENT_KIND_PROPERTY, kind.to_str().into());
        self.push_bound(&mut properties, EVENT_ID_PROPERTY, id.into());
        properties
    }

    /// Properties for fail intakes: kind tagged with the fixed marker
    pub fn for_fail(&self) -> Vec<Property> {
        let mut properties = self.base();
        self.push_bound(&mut properties, EVENT_KIND_PROPERTY, FAIL_EVENT_KIND.into());
        properties
    }

    /// Add one property per positional argument, named by its zero-based
    /// position, in argument order. Returns the error to associate with the
    /// record when any argument is an error value (last occurrence wins).
    pub fn append_args(&self, properties: &mut Vec<Property>, args: &[TraceArg]) -> Option<DynError> {
        let mut error = None;

        for (index, arg) in args.iter().enumerate() {
            self.push_bound(properties, &index.to_string(), arg.to_property_value());

            if let TraceArg::Error(err) = arg {
                error = Some(err.clone());
            }
        }

        error
    }

    /// Bind and append, dropping the pair when the logger rejects it
    pub fn push_bound(&self, properties: &mut Vec<Property>, name: &str, value: PropertyValue) {
        if let Some(property) = self.logger.bind_property(name, value, false) {
            properties.push(property);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bridge::activity::FixedActivity;
    use crate::core::record::LogRecord;
    use uuid::Uuid;

    struct Plain;

    impl StructuredLogger for Plain {
        fn write(&self, _record: &LogRecord) {}
    }

    /// Logger that rejects every binding, for the silent-omission contract
    struct RejectAll;

    impl StructuredLogger for RejectAll {
        fn write(&self, _record: &LogRecord) {}

        fn bind_property(
            &self,
            _name: &str,
            _value: PropertyValue,
            _destructure: bool,
        ) -> Option<Property> {
            None
        }
    }

    #[test]
    fn test_base_carries_activity_id() {
        let id = Uuid::new_v4();
        let activity = FixedActivity(id);
        let logger = Plain;
        let extractor = PropertyExtractor::new(&logger, &activity);

        let properties = extractor.base();
        assert_eq!(properties.len(), 1);
        assert_eq!(properties[0].name, ACTIVITY_ID_PROPERTY);
        assert_eq!(properties[0].value, PropertyValue::from(id));
    }

    #[test]
    fn test_event_properties() {
        let activity = FixedActivity(Uuid::nil());
        let logger = Plain;
        let extractor = PropertyExtractor::new(&logger, &activity);

        let properties = extractor.for_event("host", TraceEventKind::Warning, 4);
        let names: Vec<&str> = properties.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                ACTIVITY_ID_PROPERTY,
                SOURCE_PROPERTY,
                EVENT_KIND_PROPERTY,
                EVENT_ID_PROPERTY
            ]
        );
    }

    #[test]
    fn test_args_become_positional_properties() {
        let activity = FixedActivity(Uuid::nil());
        let logger = Plain;
        let extractor = PropertyExtractor::new(&logger, &activity);

        let mut properties = Vec::new();
        let args = vec![TraceArg::from(1), TraceArg::from(2)];
        let error = extractor.append_args(&mut properties, &args);

        assert!(error.is_none());
        assert_eq!(properties[0], Property::new("0", 1));
        assert_eq!(properties[1], Property::new("1", 2));
    }

    #[test]
    fn test_last_error_argument_wins() {
        let activity = FixedActivity(Uuid::nil());
        let logger = Plain;
        let extractor = PropertyExtractor::new(&logger, &activity);

        let first: DynError =
            std::sync::Arc::new(std::io::Error::new(std::io::ErrorKind::Other, "first"));
        let second: DynError =
            std::sync::Arc::new(std::io::Error::new(std::io::ErrorKind::Other, "second"));

        let mut properties = Vec::new();
        let args = vec![
            TraceArg::Error(first),
            TraceArg::from("middle"),
            TraceArg::Error(second),
        ];
        let error = extractor.append_args(&mut properties, &args);

        assert_eq!(error.unwrap().to_string(), "second");
        // error arguments still appear as positional string properties
        assert_eq!(properties[0], Property::new("0", "first"));
        assert_eq!(properties[2], Property::new("2", "second"));
    }

    #[test]
    fn test_rejected_bindings_are_omitted() {
        let activity = FixedActivity(Uuid::nil());
        let logger = RejectAll;
        let extractor = PropertyExtractor::new(&logger, &activity);

        let properties = extractor.for_event("host", TraceEventKind::Error, 1);
        assert!(properties.is_empty());
    }
}
