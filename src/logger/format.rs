//! Invocation log format module
//!
//! Supports multiple log formats:
//! - `common` (single-line, access-log style)
//! - `json` (JSON structured logging)
//! - Custom patterns with variables

use chrono::Local;
use serde::Serialize;

/// Invocation log entry describing one dispatcher round trip
#[derive(Debug, Clone, Serialize)]
pub struct InvocationLogEntry {
    /// Invocation sequence number
    pub id: u64,
    /// Time the invocation was created
    pub time: chrono::DateTime<Local>,
    /// Dispatcher name ("get" or "post")
    pub dispatcher: &'static str,
    /// HTTP method
    pub method: String,
    /// Request path with query string
    pub target: String,
    /// Request body size in bytes
    pub request_bytes: usize,
    /// Response status code, if a response arrived
    pub status: Option<u16>,
    /// Response body size in bytes
    pub response_bytes: usize,
    /// Final outcome ("rendered", "network_failure", ...)
    pub outcome: String,
    /// Round trip time in microseconds
    pub elapsed_us: u64,
}

impl InvocationLogEntry {
    /// Create a new pending entry with current timestamp
    pub fn new(id: u64, dispatcher: &'static str, method: String, target: String) -> Self {
        Self {
            id,
            time: Local::now(),
            dispatcher,
            method,
            target,
            request_bytes: 0,
            status: None,
            response_bytes: 0,
            outcome: "pending".to_string(),
            elapsed_us: 0,
        }
    }

    /// Format the log entry according to the specified format
    pub fn format(&self, format: &str) -> String {
        match format {
            "common" => self.format_common(),
            "json" => self.format_json(),
            custom => self.format_custom(custom),
        }
    }

    fn status_str(&self) -> String {
        self.status.map_or_else(|| "-".to_string(), |s| s.to_string())
    }

    /// `#$id [$time_local] $dispatcher "$method $target" $status $request_bytes/$response_bytes $outcome $elapsed`
    fn format_common(&self) -> String {
        format!(
            "#{} [{}] {} \"{} {}\" {} {}/{} {} {}",
            self.id,
            self.time.format("%d/%b/%Y:%H:%M:%S %z"),
            self.dispatcher,
            self.method,
            self.target,
            self.status_str(),
            self.request_bytes,
            self.response_bytes,
            self.outcome,
            self.elapsed(),
        )
    }

    fn format_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|e| format!(r#"{{"error":"{e}"}}"#))
    }

    /// Elapsed time in seconds with millisecond precision
    fn elapsed(&self) -> String {
        #[allow(clippy::cast_precision_loss)]
        let secs = self.elapsed_us as f64 / 1_000_000.0;
        format!("{secs:.3}")
    }

    /// Custom format with variable substitution
    ///
    /// Supported variables:
    /// - `$id` - Invocation sequence number
    /// - `$time_local` - Local time in Common Log Format
    /// - `$time_iso8601` - ISO 8601 timestamp
    /// - `$dispatcher` - Dispatcher name
    /// - `$method` - HTTP method
    /// - `$target` - Request path with query string
    /// - `$status` - Response status code or `-`
    /// - `$request_bytes` / `$response_bytes` - Body sizes
    /// - `$outcome` - Final outcome
    /// - `$elapsed` - Round trip time in seconds (3 decimal places)
    fn format_custom(&self, pattern: &str) -> String {
        let mut result = pattern.to_string();

        result = result.replace("$id", &self.id.to_string());
        result = result.replace(
            "$time_local",
            &self.time.format("%d/%b/%Y:%H:%M:%S %z").to_string(),
        );
        result = result.replace("$time_iso8601", &self.time.to_rfc3339());
        result = result.replace("$dispatcher", self.dispatcher);
        result = result.replace("$method", &self.method);
        result = result.replace("$target", &self.target);
        result = result.replace("$status", &self.status_str());
        result = result.replace("$request_bytes", &self.request_bytes.to_string());
        result = result.replace("$response_bytes", &self.response_bytes.to_string());
        result = result.replace("$outcome", &self.outcome);
        result = result.replace("$elapsed", &self.elapsed());

        result
    }
}
