//! Dispatch error taxonomy

use std::time::Duration;

use hyper::StatusCode;
use thiserror::Error;

/// Why an invocation did not render its response
#[derive(Debug, Error)]
pub enum DispatchError {
    /// Connection, transport or body read failure
    #[error("network failure: {0}")]
    NetworkFailure(String),

    /// The collaborator answered with a non-2xx status
    #[error("unsuccessful status {status}")]
    UnsuccessfulStatus { status: StatusCode, body: String },

    #[error("no response within {}s", .0.as_secs_f64())]
    Timeout(Duration),

    /// The request could not be built (bad base URI, header value, ...)
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

impl DispatchError {
    /// Short snake_case name used in invocation logs
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::NetworkFailure(_) => "network_failure",
            Self::UnsuccessfulStatus { .. } => "unsuccessful_status",
            Self::Timeout(_) => "timeout",
            Self::InvalidRequest(_) => "invalid_request",
        }
    }

    pub const fn status(&self) -> Option<StatusCode> {
        match self {
            Self::UnsuccessfulStatus { status, .. } => Some(*status),
            _ => None,
        }
    }
}
