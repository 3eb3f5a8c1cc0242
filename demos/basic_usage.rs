//! Basic usage: capture early trace events, then bind a console logger
//! and watch the buffer replay.

use std::sync::Arc;
use trace_log_bridge::prelude::*;

fn main() {
    let source = TraceSource::new("demo-app", SourceLevels::Information);
    let bridge = Arc::new(TraceBridge::new());
    source.add_listener(Arc::clone(&bridge));

    // No destination logger yet: these are buffered
    source.trace_information("starting up");
    source.trace_event_message(TraceEventKind::Warning, 17, "config file missing, using defaults");
    source.trace_event_format(
        TraceEventKind::Error,
        18,
        "retry {0} of {1} failed",
        vec![TraceArg::from(2), TraceArg::from(5)],
    );

    // Bind the destination; buffered records replay in order
    let logger = Arc::new(ConsoleLogger::new());
    source.write_to(logger).expect("first bind");

    // From here on, events flow straight through
    source.trace_information("ready");
    bridge.fail_with_detail("unrecoverable state", "demo detail");
}
