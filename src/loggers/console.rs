//! Console destination logger

use crate::core::{LogRecord, MinimumLevel, Severity, StructuredLogger};
#[cfg(feature = "console")]
use colored::Colorize;

/// Renders records as text lines: `[timestamp] [LEVEL] message key=value...`
/// Error and Fatal go to stderr, everything else to stdout.
pub struct ConsoleLogger {
    minimum: MinimumLevel,
    use_colors: bool,
}

impl ConsoleLogger {
    pub fn new() -> Self {
        Self {
            minimum: MinimumLevel::default(),
            use_colors: true,
        }
    }

    #[must_use]
    pub fn with_minimum(mut self, minimum: MinimumLevel) -> Self {
        self.minimum = minimum;
        self
    }

    #[must_use]
    pub fn with_colors(mut self, use_colors: bool) -> Self {
        self.use_colors = use_colors;
        self
    }

    fn format_text(&self, record: &LogRecord) -> String {
        let level_str = self.level_str(record.severity);
        let timestamp = record.timestamp.format("%Y-%m-%dT%H:%M:%S%.3fZ");

        let mut line = format!("[{}] [{}] {}", timestamp, level_str, record.render_message());

        for property in &record.properties {
            line.push_str(&format!(" {}={}", property.name, property.value));
        }

        if let Some(error) = &record.error {
            line.push_str(&format!("\n    error: {}", error));
        }

        line
    }

    #[cfg(feature = "console")]
    fn level_str(&self, severity: Severity) -> String {
        if self.use_colors {
            format!("{:7}", severity.to_str())
                .color(severity.color_code())
                .to_string()
        } else {
            format!("{:7}", severity.to_str())
        }
    }

    #[cfg(not(feature = "console"))]
    fn level_str(&self, severity: Severity) -> String {
        format!("{:7}", severity.to_str())
    }
}

impl Default for ConsoleLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl StructuredLogger for ConsoleLogger {
    fn write(&self, record: &LogRecord) {
        if !self.minimum.allows(record) {
            return;
        }

        let output = self.format_text(record);
        match record.severity {
            Severity::Error | Severity::Fatal => eprintln!("{}", output),
            _ => println!("{}", output),
        }
    }
}
