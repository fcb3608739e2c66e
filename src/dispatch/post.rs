//! POST dispatcher: raw text body, markup rendering

use std::rc::Rc;

use super::{spawn_invocation, DispatchContext, InvocationHandle, RenderMode};
use crate::config::EndpointsConfig;
use crate::http::{echo_request, Transport};
use crate::page::{InputField, OutputElement};

/// Sends the input value as the `text/plain` body of a POST and writes
/// the body into the output element as markup.
///
/// The markup rendering differs from `GetDispatcher` on purpose.
pub struct PostDispatcher<T> {
    input: InputField,
    output: OutputElement,
    endpoints: EndpointsConfig,
    transport: Rc<T>,
    ctx: DispatchContext,
}

impl<T: Transport + 'static> PostDispatcher<T> {
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

    pub fn trigger(&self) -> InvocationHandle {
        let invocation = self
            .ctx
            .begin(self.input.value(), &self.endpoints.echo_path);
        let request = echo_request(&self.endpoints, &invocation.source_field_value);
        spawn_invocation(
            Rc::clone(&self.transport),
            &self.ctx,
            invocation,
            "post",
            request,
            self.output.clone(),
            RenderMode::Markup,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FailurePolicy;
    use crate::dispatch::testing::{ok, ScriptedTransport};
    use crate::dispatch::DispatchError;
    use crate::page::Node;
    use hyper::Method;
    use tokio::task::LocalSet;

    fn dispatcher(
        transport: &Rc<ScriptedTransport>,
    ) -> (InputField, OutputElement, PostDispatcher<ScriptedTransport>) {
        let input = InputField::new("namePost");
        let output = OutputElement::new("responsePost");
        let post = PostDispatcher::new(
            input.clone(),
            output.clone(),
            EndpointsConfig::default(),
            Rc::clone(transport),
            DispatchContext::new(FailurePolicy::Silent, None),
        );
        (input, output, post)
    }

    #[tokio::test]
    async fn test_body_is_field_value_verbatim() {
        LocalSet::new()
            .run_until(async {
                for value in ["", "plain", " padded ", "a=b&c=%20", "<i>x</i>", "línea\r\nnueva"] {
                    let transport = Rc::new(ScriptedTransport::default());
                    let (input, _, post) = dispatcher(&transport);
                    transport.reply(ok(""));

                    input.set_value(value);
                    post.trigger().await.unwrap().unwrap();

                    let sent = transport.sent();
                    assert_eq!(sent.len(), 1);
                    assert_eq!(sent[0].method, Method::POST);
                    assert_eq!(sent[0].path_and_query, "/echo");
                    assert_eq!(sent[0].content_type, Some("text/plain"));
                    assert_eq!(sent[0].body.as_ref(), value.as_bytes());
                }
            })
            .await;
    }

    #[tokio::test]
    async fn test_renders_body_as_markup() {
        LocalSet::new()
            .run_until(async {
                let transport = Rc::new(ScriptedTransport::default());
                let (_, output, post) = dispatcher(&transport);

                transport.reply(ok("<b>Echo</b>"));
                post.trigger().await.unwrap().unwrap();

                let children = output.children();
                assert_eq!(children.len(), 1);
                match &children[0] {
                    Node::Element(el) => {
                        assert_eq!(el.tag, "b");
                        assert_eq!(el.children, vec![Node::Text("Echo".to_string())]);
                    }
                    Node::Text(t) => panic!("expected <b> element, got text {t:?}"),
                }
                assert_eq!(output.text_content(), "Echo");
            })
            .await;
    }

    #[tokio::test]
    async fn test_network_failure_keeps_previous_markup() {
        LocalSet::new()
            .run_until(async {
                let transport = Rc::new(ScriptedTransport::default());
                let (_, output, post) = dispatcher(&transport);
                output.set_markup("<i>earlier</i>");
                transport.reply(Err(DispatchError::NetworkFailure("reset".to_string())));

                assert!(post.trigger().await.unwrap().is_err());
                assert_eq!(output.inner_markup(), "<i>earlier</i>");
            })
            .await;
    }
}
