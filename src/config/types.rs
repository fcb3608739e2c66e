// Configuration types module
// Defines all configuration-related data structures

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Main configuration structure
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub remote: RemoteConfig,
    pub endpoints: EndpointsConfig,
    pub page: PageConfig,
    pub http: HttpConfig,
    pub logging: LoggingConfig,
}

/// Remote collaborator location
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct RemoteConfig {
    pub host: String,
    pub port: u16,
}

/// Fixed endpoints targeted by the two dispatchers
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct EndpointsConfig {
    /// Path of the GET endpoint (default: /hello)
    pub hello_path: String,
    /// Name of the single query parameter carrying the field value
    pub hello_param: String,
    /// Path of the POST endpoint (default: /echo)
    pub echo_path: String,
}

impl Default for EndpointsConfig {
    fn default() -> Self {
        Self {
            hello_path: "/hello".to_string(),
            hello_param: "name".to_string(),
            echo_path: "/echo".to_string(),
        }
    }
}

/// Element ids of the page the dispatchers read from and render into
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct PageConfig {
    pub get_input: String,
    pub get_output: String,
    pub post_input: String,
    pub post_output: String,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            get_input: "nameGet".to_string(),
            get_output: "responseGet".to_string(),
            post_input: "namePost".to_string(),
            post_output: "responsePost".to_string(),
        }
    }
}

/// What an invocation does with its output element when it fails
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum FailurePolicy {
    /// Leave the output element untouched
    #[default]
    Silent,
    /// Write a one-line diagnostic into the output element as text
    Surface,
}

/// HTTP client configuration
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct HttpConfig {
    /// Request timeout in seconds, 0 disables it
    pub request_timeout: u64,
    pub user_agent: String,
    #[serde(default)]
    pub failure_policy: FailurePolicy,
}

impl HttpConfig {
    pub const fn timeout(&self) -> Option<Duration> {
        if self.request_timeout == 0 {
            None
        } else {
            Some(Duration::from_secs(self.request_timeout))
        }
    }
}

/// Logging configuration
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LoggingConfig {
    pub level: String,
    pub invocation_log: bool,
    /// Invocation log format (common, json, or custom pattern)
    #[serde(default = "default_invocation_log_format")]
    pub invocation_log_format: String,
    /// Log file path (optional, stdout if not set)
    #[serde(default)]
    pub log_file: Option<String>,
    /// Error log file path (optional, stderr if not set)
    #[serde(default)]
    pub error_log_file: Option<String>,
}

#[allow(clippy::missing_const_for_fn)]
fn default_invocation_log_format() -> String {
    "common".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeout_zero_disables() {
        let http = HttpConfig {
            request_timeout: 0,
            user_agent: "ua".to_string(),
            failure_policy: FailurePolicy::Silent,
        };
        assert_eq!(http.timeout(), None);

        let http = HttpConfig {
            request_timeout: 5,
            ..http
        };
        assert_eq!(http.timeout(), Some(Duration::from_secs(5)));
    }

    #[test]
    fn test_failure_policy_deserialize() {
        let policy: FailurePolicy = serde_json::from_str("\"surface\"").unwrap();
        assert_eq!(policy, FailurePolicy::Surface);
        assert_eq!(FailurePolicy::default(), FailurePolicy::Silent);
    }
}
