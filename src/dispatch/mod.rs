//! Dispatch module
//!
//! A dispatcher turns one external trigger into one outbound request and
//! renders the response into its output element. Invocations run as
//! local tasks on the single UI thread; nothing orders or coalesces them,
//! so the response that completes last is the one left on screen.

mod get;
mod post;

use std::cell::Cell;
use std::rc::Rc;
use std::time::Instant;

use tokio::task::JoinHandle;

use crate::config::{Config, FailurePolicy};
use crate::http::{InboundResponse, OutboundRequest, Transport};
use crate::logger::{self, InvocationLogEntry};
use crate::page::OutputElement;

pub use crate::error::DispatchError;
pub use get::GetDispatcher;
pub use post::PostDispatcher;

/// Resolves once per invocation: the completed invocation after
/// rendering, `Err` on failure
pub type InvocationHandle = JoinHandle<Result<Invocation, DispatchError>>;

/// How a successful body is written into the output element
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    /// Literal text, markup is never interpreted
    Text,
    /// Parsed as markup
    Markup,
}

/// One triggered execution of a dispatcher
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub id: u64,
    /// Input field value read at trigger time
    pub source_field_value: String,
    pub target_endpoint: String,
    /// Body written into the output element, set once on success
    pub response_text: Option<String>,
}

/// State shared by the dispatchers of one page
#[derive(Clone)]
pub struct DispatchContext {
    next_id: Rc<Cell<u64>>,
    policy: FailurePolicy,
    /// Invocation log format, `None` when invocation logging is off
    log_format: Option<Rc<str>>,
}

impl DispatchContext {
    pub fn new(policy: FailurePolicy, log_format: Option<&str>) -> Self {
        Self {
            next_id: Rc::new(Cell::new(1)),
            policy,
            log_format: log_format.map(Rc::from),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        let log_format = config
            .logging
            .invocation_log
            .then_some(config.logging.invocation_log_format.as_str());
        Self::new(config.http.failure_policy, log_format)
    }

    /// Start a new invocation for `value` aimed at `endpoint`
    fn begin(&self, value: String, endpoint: &str) -> Invocation {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        Invocation {
            id,
            source_field_value: value,
            target_endpoint: endpoint.to_string(),
            response_text: None,
        }
    }
}

/// Send `request` on a local task and render its outcome into `output`.
///
/// Must be called from within a `LocalSet`.
fn spawn_invocation<T: Transport + 'static>(
    transport: Rc<T>,
    ctx: &DispatchContext,
    mut invocation: Invocation,
    dispatcher: &'static str,
    request: OutboundRequest,
    output: OutputElement,
    mode: RenderMode,
) -> InvocationHandle {
    let mut entry = InvocationLogEntry::new(
        invocation.id,
        dispatcher,
        request.method.to_string(),
        request.path_and_query.clone(),
    );
    entry.request_bytes = request.body.len();
    logger::log_invocation_sent(
        &entry,
        &invocation.target_endpoint,
        &invocation.source_field_value,
    );

    let policy = ctx.policy;
    let log_format = ctx.log_format.clone();

    tokio::task::spawn_local(async move {
        let started = Instant::now();

        let result = match transport.send(request).await {
            Ok(response) => {
                entry.status = Some(response.status.as_u16());
                entry.response_bytes = response.body.len();
                accept(response)
            }
            Err(err) => Err(err),
        };
        entry.elapsed_us = u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);

        let outcome = match result {
            Ok(text) => {
                match mode {
                    RenderMode::Text => output.set_text(&text),
                    RenderMode::Markup => output.set_markup(&text),
                }
                entry.outcome = "rendered".to_string();
                invocation.response_text = Some(text);
                Ok(invocation)
            }
            Err(err) => {
                entry.outcome = err.kind().to_string();
                logger::log_dispatch_failure(entry.id, dispatcher, &err);
                if policy == FailurePolicy::Surface {
                    output.set_text(&format!("Error: {err}"));
                }
                Err(err)
            }
        };

        if let Some(format) = log_format {
            logger::log_invocation(&entry, &format);
        }
        outcome
    })
}

/// Decode a 2xx body, replacing invalid UTF-8; reject anything else
fn accept(response: InboundResponse) -> Result<String, DispatchError> {
    let text = String::from_utf8_lossy(&response.body).into_owned();
    if response.status.is_success() {
        Ok(text)
    } else {
        Err(DispatchError::UnsuccessfulStatus {
            status: response.status,
            body: text,
        })
    }
}
