//! Structured logging with component context.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

/// Log level for structured logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Trace => write!(f, "TRACE"),
            Self::Debug => write!(f, "DEBUG"),
            Self::Info => write!(f, "INFO"),
            Self::Warn => write!(f, "WARN"),
            Self::Error => write!(f, "ERROR"),
        }
    }
}

/// A structured log entry.
#[derive(Debug, Clone, Serialize)]
pub struct LogEntry {
    /// Log level.
    pub level: LogLevel,
    /// Log message.
    pub message: String,
    /// Component that emitted the entry (e.g. "cart-store").
    pub component: String,
    /// Page or session correlation ID.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_id: Option<String>,
    /// Additional structured fields.
    #[serde(flatten)]
    pub fields: BTreeMap<String, serde_json::Value>,
    /// Microseconds since the logger was created.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub elapsed_us: Option<u64>,
}

impl LogEntry {
    /// Format as JSON string.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| self.message.clone())
    }

    /// Format as human-readable string.
    pub fn to_human(&self) -> String {
        let mut s = format!("[{}] {}: {}", self.level, self.component, self.message);

        if let Some(elapsed) = self.elapsed_us {
            s.push_str(&format!(" ({}us)", elapsed));
        }

        if !self.fields.is_empty() {
            s.push_str(" | ");
            let fields: Vec<String> = self
                .fields
                .iter()
                .map(|(k, v)| format!("{}={}", k, v))
                .collect();
            s.push_str(&fields.join(" "));
        }

        s
    }

    /// Get a field value.
    pub fn field(&self, key: &str) -> Option<&serde_json::Value> {
        self.fields.get(key)
    }
}

/// Output format for logs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// JSON format (for production/log aggregation).
    #[default]
    Json,
    /// Human-readable format (for development).
    Human,
}

/// In-memory capture of log entries.
///
/// Clones share the same buffer.
#[derive(Debug, Clone, Default)]
pub struct CapturedLogs {
    entries: Rc<RefCell<Vec<LogEntry>>>,
}

impl CapturedLogs {
    /// Create an empty capture buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all captured entries.
    pub fn entries(&self) -> Vec<LogEntry> {
        self.entries.borrow().clone()
    }

    /// Captured entries at `level`.
    pub fn at_level(&self, level: LogLevel) -> Vec<LogEntry> {
        self.entries
            .borrow()
            .iter()
            .filter(|e| e.level == level)
            .cloned()
            .collect()
    }

    /// Whether any entry at `level` has `message`.
    pub fn contains(&self, level: LogLevel, message: &str) -> bool {
        self.entries
            .borrow()
            .iter()
            .any(|e| e.level == level && e.message == message)
    }

    /// Drop all captured entries.
    pub fn clear(&self) {
        self.entries.borrow_mut().clear();
    }

    fn push(&self, entry: LogEntry) {
        self.entries.borrow_mut().push(entry);
    }
}

/// Destination for log entries.
#[derive(Debug, Clone, Default)]
pub enum LogSink {
    /// Formatted lines on stderr (Spin and the browser console capture this).
    #[default]
    Stderr,
    /// Forward to the `tracing` macros.
    Tracing,
    /// Keep entries in memory.
    Memory(CapturedLogs),
    /// Drop everything.
    Discard,
}

/// Structured logger with component context.
///
/// Provides structured logging with a component name, an optional page
/// correlation ID and timing information.
#[derive(Debug, Clone)]
pub struct StructuredLogger {
    component: String,
    page_id: Option<String>,
    start_time: std::time::Instant,
    min_level: LogLevel,
    format: LogFormat,
    sink: LogSink,
}

impl StructuredLogger {
    /// Create a new logger for a component.
    pub fn new(component: impl Into<String>) -> Self {
        Self {
            component: component.into(),
            page_id: None,
            start_time: std::time::Instant::now(),
            min_level: LogLevel::Info,
            format: LogFormat::Json,
            sink: LogSink::Stderr,
        }
    }

    /// A logger that drops everything.
    pub fn disabled() -> Self {
        Self::new("disabled").with_sink(LogSink::Discard)
    }

    /// A logger capturing every level into memory.
    pub fn capturing(component: impl Into<String>) -> (Self, CapturedLogs) {
        let logs = CapturedLogs::new();
        let logger = Self::new(component)
            .with_min_level(LogLevel::Trace)
            .with_sink(LogSink::Memory(logs.clone()));
        (logger, logs)
    }

    /// Derive a logger for another component sharing level, format and sink.
    pub fn for_component(&self, component: impl Into<String>) -> Self {
        let mut logger = self.clone();
        logger.component = component.into();
        logger
    }

    /// Set the page correlation ID.
    pub fn with_page_id(mut self, page_id: impl Into<String>) -> Self {
        self.page_id = Some(page_id.into());
        self
    }

    /// Set minimum log level.
    pub fn with_min_level(mut self, level: LogLevel) -> Self {
        self.min_level = level;
        self
    }

    /// Set output format.
    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    /// Set the sink.
    pub fn with_sink(mut self, sink: LogSink) -> Self {
        self.sink = sink;
        self
    }

    /// Log at trace level.
    pub fn trace(&self, message: &str) {
        self.log(LogLevel::Trace, message, BTreeMap::new());
    }

    /// Log at debug level.
    pub fn debug(&self, message: &str) {
        self.log(LogLevel::Debug, message, BTreeMap::new());
    }

    /// Log at info level.
    pub fn info(&self, message: &str) {
        self.log(LogLevel::Info, message, BTreeMap::new());
    }

    /// Log at warn level.
    pub fn warn(&self, message: &str) {
        self.log(LogLevel::Warn, message, BTreeMap::new());
    }

    /// Log at error level.
    pub fn error(&self, message: &str) {
        self.log(LogLevel::Error, message, BTreeMap::new());
    }

    fn log(&self, level: LogLevel, message: &str, fields: BTreeMap<String, serde_json::Value>) {
        if level < self.min_level {
            return;
        }

        let entry = LogEntry {
            level,
            message: message.to_string(),
            component: self.component.clone(),
            page_id: self.page_id.clone(),
            fields,
            elapsed_us: Some(self.elapsed_us()),
        };

        match &self.sink {
            LogSink::Stderr => eprintln!("{}", self.render(&entry)),
            LogSink::Tracing => {
                let line = self.render(&entry);
                match level {
                    LogLevel::Trace => tracing::trace!(component = %entry.component, "{}", line),
                    LogLevel::Debug => tracing::debug!(component = %entry.component, "{}", line),
                    LogLevel::Info => tracing::info!(component = %entry.component, "{}", line),
                    LogLevel::Warn => tracing::warn!(component = %entry.component, "{}", line),
                    LogLevel::Error => tracing::error!(component = %entry.component, "{}", line),
                }
            }
            LogSink::Memory(logs) => logs.push(entry),
            LogSink::Discard => {}
        }
    }

    fn render(&self, entry: &LogEntry) -> String {
        match self.format {
            LogFormat::Json => entry.to_json(),
            LogFormat::Human => entry.to_human(),
        }
    }

    /// Get the component name.
    pub fn component(&self) -> &str {
        &self.component
    }

    /// Get elapsed time since logger creation.
    pub fn elapsed_us(&self) -> u64 {
        self.start_time.elapsed().as_micros() as u64
    }
}

/// Builder for log entries with fluent API.
pub struct LogBuilder<'a> {
    logger: &'a StructuredLogger,
    level: LogLevel,
    message: String,
    fields: BTreeMap<String, serde_json::Value>,
}

impl<'a> LogBuilder<'a> {
    /// Create a new log builder.
    pub fn new(logger: &'a StructuredLogger, level: LogLevel, message: impl Into<String>) -> Self {
        Self {
            logger,
            level,
            message: message.into(),
            fields: BTreeMap::new(),
        }
    }

    /// Add a string field.
    pub fn field(mut self, key: &str, value: impl Into<String>) -> Self {
        self.fields
            .insert(key.to_string(), serde_json::json!(value.into()));
        self
    }

    /// Add an integer field.
    pub fn field_i64(mut self, key: &str, value: i64) -> Self {
        self.fields.insert(key.to_string(), serde_json::json!(value));
        self
    }

    /// Add a boolean field.
    pub fn field_bool(mut self, key: &str, value: bool) -> Self {
        self.fields.insert(key.to_string(), serde_json::json!(value));
        self
    }

    /// Emit the log entry.
    pub fn emit(self) {
        self.logger.log(self.level, &self.message, self.fields);
    }
}

impl StructuredLogger {
    /// Start building an info log entry.
    pub fn info_builder(&self, message: impl Into<String>) -> LogBuilder<'_> {
        LogBuilder::new(self, LogLevel::Info, message)
    }

    /// Start building a warn log entry.
    pub fn warn_builder(&self, message: impl Into<String>) -> LogBuilder<'_> {
        LogBuilder::new(self, LogLevel::Warn, message)
    }

    /// Start building an error log entry.
    pub fn error_builder(&self, message: impl Into<String>) -> LogBuilder<'_> {
        LogBuilder::new(self, LogLevel::Error, message)
    }

    /// Start building a debug log entry.
    pub fn debug_builder(&self, message: impl Into<String>) -> LogBuilder<'_> {
        LogBuilder::new(self, LogLevel::Debug, message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_min_level_filters() {
        let logs = CapturedLogs::new();
        let logger = StructuredLogger::new("cart-store")
            .with_min_level(LogLevel::Warn)
            .with_sink(LogSink::Memory(logs.clone()));

        logger.info("ignored");
        logger.warn("kept");

        let entries = logs.entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].message, "kept");
        assert_eq!(entries[0].component, "cart-store");
    }

    #[test]
    fn test_builder_fields() {
        let (logger, logs) = StructuredLogger::capturing("cart-store");
        logger
            .debug_builder("item added")
            .field("id", "p1")
            .field_i64("quantity", 2)
            .field_bool("new", false)
            .emit();

        let entry = &logs.at_level(LogLevel::Debug)[0];
        assert_eq!(entry.field("id"), Some(&serde_json::json!("p1")));
        assert_eq!(entry.field("quantity"), Some(&serde_json::json!(2)));
        assert_eq!(entry.field("new"), Some(&serde_json::json!(false)));
    }

    #[test]
    fn test_json_format() {
        let entry = LogEntry {
            level: LogLevel::Warn,
            message: "stored cart unreadable".to_string(),
            component: "cart-store".to_string(),
            page_id: Some("home".to_string()),
            fields: BTreeMap::from([("key".to_string(), serde_json::json!("cart"))]),
            elapsed_us: None,
        };

        let json: serde_json::Value = serde_json::from_str(&entry.to_json()).unwrap();
        assert_eq!(json["level"], "warn");
        assert_eq!(json["page_id"], "home");
        assert_eq!(json["key"], "cart");
        assert!(json.get("elapsed_us").is_none());
    }

    #[test]
    fn test_human_format() {
        let entry = LogEntry {
            level: LogLevel::Info,
            message: "checkout".to_string(),
            component: "cart-widget".to_string(),
            page_id: None,
            fields: BTreeMap::from([("count".to_string(), serde_json::json!(3))]),
            elapsed_us: Some(12),
        };

        assert_eq!(entry.to_human(), "[INFO] cart-widget: checkout (12us) | count=3");
    }

    #[test]
    fn test_for_component_shares_sink() {
        let (logger, logs) = StructuredLogger::capturing("cart-widget");
        let store_logger = logger.for_component("cart-store");
        store_logger.info("loaded");

        assert_eq!(logs.entries()[0].component, "cart-store");
    }

    #[test]
    fn test_disabled_logger() {
        let logger = StructuredLogger::disabled();
        logger.error("nothing happens");
    }
}
