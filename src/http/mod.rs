//! HTTP module
//!
//! Outbound request shaping and the transport that sends it.

pub mod client;
pub mod request;

pub use client::{HyperTransport, InboundResponse, Transport};
pub use request::{echo_request, hello_request, OutboundRequest};
