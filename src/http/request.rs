//! Outbound request shaping
//!
//! Builds the two request shapes the dispatchers send: a GET carrying the
//! field value as its only query parameter, and a POST carrying it as a
//! raw `text/plain` body.

use hyper::body::Bytes;
use hyper::Method;
use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::config::EndpointsConfig;

/// Bytes left unescaped by `encodeURIComponent`
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// A fully shaped request, independent of the transport sending it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundRequest {
    pub method: Method,
    pub path_and_query: String,
    pub content_type: Option<&'static str>,
    pub body: Bytes,
}

/// Percent-encode `value` for use inside a URL query component
pub fn encode_component(value: &str) -> String {
    utf8_percent_encode(value, COMPONENT).to_string()
}

/// `GET <hello_path>?<hello_param>=<value>`
pub fn hello_request(endpoints: &EndpointsConfig, value: &str) -> OutboundRequest {
    OutboundRequest {
        method: Method::GET,
        path_and_query: format!(
            "{}?{}={}",
            endpoints.hello_path,
            encode_component(&endpoints.hello_param),
            encode_component(value)
        ),
        content_type: None,
        body: Bytes::new(),
    }
}

/// `POST <echo_path>` with `value` as the untouched `text/plain` body
pub fn echo_request(endpoints: &EndpointsConfig, value: &str) -> OutboundRequest {
    OutboundRequest {
        method: Method::POST,
        path_and_query: endpoints.echo_path.clone(),
        content_type: Some("text/plain"),
        body: Bytes::from(value.to_owned()),
    }
}

/// Percent-decoded value of the query parameter `name`, if present
///
/// Invalid UTF-8 after decoding is replaced rather than rejected.
pub fn query_value(path_and_query: &str, name: &str) -> Option<String> {
    let (_, query) = path_and_query.split_once('?')?;
    query.split('&').find_map(|pair| {
        let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
        (percent_decode_str(key).decode_utf8_lossy() == name)
            .then(|| percent_decode_str(value).decode_utf8_lossy().into_owned())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_component_matches_encode_uri_component() {
        assert_eq!(encode_component("Ada Lovelace"), "Ada%20Lovelace");
        assert_eq!(encode_component("a&b=c?d/e#f+g"), "a%26b%3Dc%3Fd%2Fe%23f%2Bg");
        assert_eq!(encode_component("-_.!~*'()"), "-_.!~*'()");
        assert_eq!(encode_component("ñ✓"), "%C3%B1%E2%9C%93");
        assert_eq!(encode_component(""), "");
    }

    #[test]
    fn test_hello_request_shape() {
        let req = hello_request(&EndpointsConfig::default(), "Ada");
        assert_eq!(req.method, Method::GET);
        assert_eq!(req.path_and_query, "/hello?name=Ada");
        assert_eq!(req.content_type, None);
        assert!(req.body.is_empty());
    }

    #[test]
    fn test_hello_request_query_round_trips() {
        let endpoints = EndpointsConfig::default();
        for value in ["", " ", "a&b=c", "100%", "?#/\\", "x+y", "日本語", "line\nbreak", "&name=evil"] {
            let req = hello_request(&endpoints, value);
            // the value is the sole query parameter
            let query = req.path_and_query.split_once('?').unwrap().1;
            assert_eq!(query.matches('&').count(), 0, "{value:?}");
            assert_eq!(query.matches('=').count(), 1, "{value:?}");
            assert_eq!(query_value(&req.path_and_query, "name").as_deref(), Some(value));
        }
    }

    #[test]
    fn test_echo_request_body_untouched() {
        let endpoints = EndpointsConfig::default();
        for value in ["", "plain", "<b>markup</b>", "a&b=c%20", "ünï\r\n"] {
            let req = echo_request(&endpoints, value);
            assert_eq!(req.method, Method::POST);
            assert_eq!(req.path_and_query, "/echo");
            assert_eq!(req.content_type, Some("text/plain"));
            assert_eq!(req.body.as_ref(), value.as_bytes());
        }
    }

    #[test]
    fn test_query_value_missing() {
        assert_eq!(query_value("/hello", "name"), None);
        assert_eq!(query_value("/hello?other=1", "name"), None);
        assert_eq!(query_value("/hello?name", "name").as_deref(), Some(""));
    }
}
