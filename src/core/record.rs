//! Structured log record

use super::property::{Property, PropertyValue};
use super::severity::Severity;
use super::template;
use chrono::{DateTime, Utc};
use std::sync::Arc;

/// Shared error value carried by a record, rendered by destination loggers
/// separately from ordinary properties.
pub type DynError = Arc<dyn std::error::Error + Send + Sync>;

/// The structured unit produced for every accepted intake call.
///
/// Immutable once constructed; cloning is cheap (the error is shared).
#[derive(Debug, Clone)]
pub struct LogRecord {
    pub timestamp: DateTime<Utc>,
    pub severity: Severity,
    pub error: Option<DynError>,
    pub template: String,
    pub properties: Vec<Property>,
}

impl LogRecord {
    pub fn new(severity: Severity, template: impl Into<String>) -> Self {
        Self {
            timestamp: Utc::now(),
            severity,
            error: None,
            template: template.into(),
            properties: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_properties(mut self, properties: Vec<Property>) -> Self {
        self.properties = properties;
        self
    }

    #[must_use]
    pub fn with_error(mut self, error: Option<DynError>) -> Self {
        self.error = error;
        self
    }

    /// Look up a property value by name (first binding wins)
    pub fn property(&self, name: &str) -> Option<&PropertyValue> {
        self.properties
            .iter()
            .find(|p| p.name == name)
            .map(|p| &p.value)
    }

    /// Render the message template against the bound properties
    pub fn render_message(&self) -> String {
        template::render(&self.template, &self.properties)
    }

    /// Convert to a JSON object for line-oriented structured output
    #[must_use]
    pub fn to_json_value(&self) -> serde_json::Value {
        let mut props = serde_json::Map::new();
        for property in &self.properties {
            // First binding wins on duplicate names
            props
                .entry(property.name.clone())
                .or_insert_with(|| property.value.to_json_value());
        }

        serde_json::json!({
            "timestamp": self.timestamp.to_rfc3339(),
            "level": self.severity.to_str(),
            "template": self.template,
            "message": self.render_message(),
            "properties": serde_json::Value::Object(props),
            "error": self.error.as_ref().map(|e| e.to_string()),
        })
    }
}
