//! HTTP transport module
//!
//! The dispatchers only see the `Transport` trait; `HyperTransport` is the
//! production implementation over a pooled hyper-util HTTP/1 client.

use std::error::Error as StdError;
use std::future::Future;
use std::time::Duration;

use http_body_util::{BodyExt, Full};
use hyper::body::Bytes;
use hyper::{header, Request, StatusCode};
use hyper_util::client::legacy::connect::HttpConnector;
use hyper_util::client::legacy::Client;
use hyper_util::rt::TokioExecutor;

use super::request::OutboundRequest;
use crate::config::Config;
use crate::error::DispatchError;

/// A complete response as seen by a dispatcher
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundResponse {
    pub status: StatusCode,
    pub body: Bytes,
}

/// Sends one shaped request and resolves with the full response.
///
/// Implementations do not judge the status code; any response that
/// arrives in full is `Ok`.
pub trait Transport {
    fn send(
        &self,
        request: OutboundRequest,
    ) -> impl Future<Output = Result<InboundResponse, DispatchError>>;
}

/// hyper-util backed transport bound to one remote base URI
pub struct HyperTransport {
    client: Client<HttpConnector, Full<Bytes>>,
    base: String,
    user_agent: String,
    timeout: Option<Duration>,
}

impl HyperTransport {
    pub fn new(base: impl Into<String>, user_agent: impl Into<String>, timeout: Option<Duration>) -> Self {
        let client = Client::builder(TokioExecutor::new()).build_http();
        Self {
            client,
            base: base.into().trim_end_matches('/').to_string(),
            user_agent: user_agent.into(),
            timeout,
        }
    }

    pub fn from_config(config: &Config) -> Result<Self, String> {
        Ok(Self::new(
            config.remote_base()?,
            config.http.user_agent.clone(),
            config.http.timeout(),
        ))
    }

    async fn round_trip(&self, request: OutboundRequest) -> Result<InboundResponse, DispatchError> {
        let uri = format!("{}{}", self.base, request.path_and_query);
        let mut builder = Request::builder()
            .method(request.method)
            .uri(uri)
            .header(header::USER_AGENT, self.user_agent.as_str());
        if let Some(content_type) = request.content_type {
            builder = builder.header(header::CONTENT_TYPE, content_type);
        }
        let req = builder
            .body(Full::new(request.body))
            .map_err(|e| DispatchError::InvalidRequest(e.to_string()))?;

        let response = self
            .client
            .request(req)
            .await
            .map_err(|e| DispatchError::NetworkFailure(describe(&e)))?;

        let status = response.status();
        let body = response
            .into_body()
            .collect()
            .await
            .map_err(|e| DispatchError::NetworkFailure(describe(&e)))?
            .to_bytes();

        Ok(InboundResponse { status, body })
    }
}

impl Transport for HyperTransport {
    async fn send(&self, request: OutboundRequest) -> Result<InboundResponse, DispatchError> {
        match self.timeout {
            Some(limit) => tokio::time::timeout(limit, self.round_trip(request))
                .await
                .map_err(|_| DispatchError::Timeout(limit))?,
            None => self.round_trip(request).await,
        }
    }
}

/// Error message including its source chain ("client error (Connect): ...")
fn describe(err: &dyn StdError) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(inner) = source {
        message.push_str(": ");
        message.push_str(&inner.to_string());
        source = inner.source();
    }
    message
}
