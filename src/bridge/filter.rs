//! Trace filtering contract

use super::event::{TraceArg, TraceEventCache, TraceEventKind};
use crate::core::property::PropertyValue;

/// The fields an intake call received, handed to the filter unchanged.
/// Fields a given intake shape does not carry are `None`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TraceFilterEvent<'a> {
    pub cache: Option<&'a TraceEventCache>,
    pub source: Option<&'a str>,
    pub kind: Option<TraceEventKind>,
    pub id: Option<i32>,
    /// Format string or plain message, whichever the call carried
    pub message: Option<&'a str>,
    pub args: Option<&'a [TraceArg]>,
    pub data: Option<&'a PropertyValue>,
    pub data_array: Option<&'a [PropertyValue]>,
}

/// Externally pluggable accept/reject predicate over intake calls.
///
/// A rejected event produces no record and no side effect. Absence of a
/// filter means "accept all".
pub trait TraceFilter: Send + Sync {
    fn should_trace(&self, event: &TraceFilterEvent<'_>) -> bool;
}

impl<F> TraceFilter for F
where
    F: Fn(&TraceFilterEvent<'_>) -> bool + Send + Sync,
{
    fn should_trace(&self, event: &TraceFilterEvent<'_>) -> bool {
        self(event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn even_ids_only(event: &TraceFilterEvent<'_>) -> bool {
        event.id.map_or(true, |id| id % 2 == 0)
    }

    #[test]
    fn test_fn_filter() {
        let filter = even_ids_only;

        let odd = TraceFilterEvent {
            id: Some(3),
            ..Default::default()
        };
        let even = TraceFilterEvent {
            id: Some(4),
            ..Default::default()
        };
        let none = TraceFilterEvent::default();

        assert!(!filter.should_trace(&odd));
        assert!(filter.should_trace(&even));
        assert!(filter.should_trace(&none));
    }
}
