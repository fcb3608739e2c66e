//! GET dispatcher: query-parameter request, plain-text rendering

use std::rc::Rc;

use super::{spawn_invocation, DispatchContext, InvocationHandle, RenderMode};
use crate::config::EndpointsConfig;
use crate::http::{hello_request, Transport};
use crate::page::{InputField, OutputElement};

/// Sends the input value as the single query parameter of a GET and
/// writes the body into the output element as literal text
pub struct GetDispatcher<T> {
    input: InputField,
    output: OutputElement,
    endpoints: EndpointsConfig,
    transport: Rc<T>,
    ctx: DispatchContext,
}

impl<T: Transport + 'static> GetDispatcher<T> {
    pub const fn new(
        input: InputField,
        output: OutputElement,
        endpoints: EndpointsConfig,
        transport: Rc<T>,
        ctx: DispatchContext,
    ) -> Self {
        Self {
            input,
            output,
            endpoints,
            transport,
            ctx,
        }
    }

    /// Read the field now, send one request and return without waiting
    pub fn trigger(&self) -> InvocationHandle {
        let invocation = self
            .ctx
            .begin(self.input.value(), &self.endpoints.hello_path);
        let request = hello_request(&self.endpoints, &invocation.source_field_value);
        spawn_invocation(
            Rc::clone(&self.transport),
            &self.ctx,
            invocation,
            "get",
            request,
            self.output.clone(),
            RenderMode::Text,
        )
    }
}
