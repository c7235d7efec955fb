//! Request description
//!
//! A [`RequestBuilder`] captures everything one endpoint call needs: the
//! verb, the resolved path, ordered query parameters, headers and body. It is
//! plain data, so the client can rebuild the reqwest request on every retry.

use crate::error::{Error, Result};
use bytes::Bytes;
use reqwest::Method;
use serde::Serialize;
use std::fmt::Display;
use std::time::Duration;

/// Request body
#[derive(Debug, Clone, Default)]
pub enum RequestBody {
    /// No body
    #[default]
    Empty,
    /// Serialized JSON
    Json(Bytes),
    /// Raw bytes with an explicit content type
    Raw {
        /// Value for the `Content-Type` header
        content_type: String,
        /// Payload
        data: Bytes,
    },
}

/// Description of a single HTTP call
#[derive(Debug, Clone)]
pub struct RequestBuilder {
    /// HTTP verb
    pub method: Method,
    /// Resolved, percent-encoded path (starts with `/`)
    pub path: String,
    /// Query parameters, in insertion order
    pub query: Vec<(String, String)>,
    /// Request headers, in insertion order
    pub headers: Vec<(String, String)>,
    /// Body
    pub body: RequestBody,
    /// Override timeout for this request
    pub timeout: Option<Duration>,
}

impl RequestBuilder {
    /// Start a request from a path template like `/{db}/{doc_id}`
    pub fn new(method: Method, template: &str, params: &[(&str, &str)]) -> Result<Self> {
        Ok(Self {
            method,
            path: resolve_path(template, params)?,
            query: Vec::new(),
            headers: Vec::new(),
            body: RequestBody::Empty,
            timeout: None,
        })
    }

    /// Add a query parameter
    #[must_use]
    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Add a query parameter when the option is set, using its display form
    #[must_use]
    pub fn query_opt<T: Display>(self, key: &str, value: Option<T>) -> Self {
        match value {
            Some(value) => self.query(key, value.to_string()),
            None => self,
        }
    }

    /// Add a query parameter whose value is JSON encoded (view keys and the like)
    pub fn query_json<T: Serialize>(self, key: &str, value: Option<&T>) -> Result<Self> {
        match value {
            Some(value) => {
                let encoded = serde_json::to_string(value)?;
                Ok(self.query(key, encoded))
            }
            None => Ok(self),
        }
    }

    /// Add a comma separated list parameter
    #[must_use]
    pub fn query_list(self, key: &str, values: Option<&[String]>) -> Self {
        match values {
            Some(values) if !values.is_empty() => self.query(key, values.join(",")),
            _ => self,
        }
    }

    /// Add a header
    #[must_use]
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((key.into(), value.into()));
        self
    }

    /// Add a header when the option is set
    #[must_use]
    pub fn header_opt(self, key: &str, value: Option<&str>) -> Self {
        match value {
            Some(value) => self.header(key, value),
            None => self,
        }
    }

    /// Add every header from a caller supplied map
    #[must_use]
    pub fn headers<'a>(mut self, headers: impl IntoIterator<Item = (&'a String, &'a String)>) -> Self {
        for (key, value) in headers {
            self.headers.push((key.clone(), value.clone()));
        }
        self
    }

    /// Set a JSON body
    pub fn json<T: Serialize + ?Sized>(mut self, body: &T) -> Result<Self> {
        let data = serde_json::to_vec(body)?;
        self.body = RequestBody::Json(Bytes::from(data));
        Ok(self)
    }

    /// Set a raw body
    #[must_use]
    pub fn raw(mut self, content_type: impl Into<String>, data: impl Into<Bytes>) -> Self {
        self.body = RequestBody::Raw {
            content_type: content_type.into(),
            data: data.into(),
        };
        self
    }

    /// Set timeout
    #[must_use]
    pub fn timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Value of a header, matched case-insensitively
    pub fn header_value(&self, key: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_str())
    }
}

/// Substitute `{name}` placeholders in a path template.
///
/// Values are matched by name and each is percent-encoded as a single path
/// segment, so a `/` inside a document id becomes `%2F`. Empty values and
/// placeholders without a value are rejected.
pub fn resolve_path(template: &str, params: &[(&str, &str)]) -> Result<String> {
    let mut resolved = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find('{') {
        resolved.push_str(&rest[..start]);
        let after = &rest[start + 1..];
        let end = after
            .find('}')
            .ok_or_else(|| Error::invalid_value("path", format!("unclosed placeholder in '{template}'")))?;
        let name = &after[..end];

        let value = params
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| *value)
            .ok_or_else(|| Error::invalid_value(name, "no value supplied for path parameter"))?;
        if value.is_empty() {
            return Err(Error::invalid_value(name, "path parameter cannot be empty"));
        }

        resolved.push_str(&urlencoding::encode(value));
        rest = &after[end + 1..];
    }
    resolved.push_str(rest);

    Ok(resolved)
}

#[cfg(test)]
mod request_tests {
    use super::*;
    use test_case::test_case;

    #[test_case("/{db}", &[("db", "products")], "/products" ; "single segment")]
    #[test_case("/{db}/{doc_id}", &[("doc_id", "b"), ("db", "a")], "/a/b" ; "by name not position")]
    #[test_case("/{db}/{doc_id}", &[("db", "a"), ("doc_id", "x/y z")], "/a/x%2Fy%20z" ; "reserved characters")]
    #[test_case("/{db}/{doc_id}", &[("db", "a"), ("doc_id", "q?r#s&t")], "/a/q%3Fr%23s%26t" ; "query delimiters")]
    #[test_case("/{db}/_design/{ddoc}/_view/{view}", &[("db", "d"), ("ddoc", "dd"), ("view", "v")], "/d/_design/dd/_view/v" ; "literal segments")]
    #[test_case("/{db}/{doc_id}", &[("db", "a"), ("doc_id", "caf\u{e9}")], "/a/caf%C3%A9" ; "unicode")]
    fn test_resolve_path(template: &str, params: &[(&str, &str)], expected: &str) {
        assert_eq!(resolve_path(template, params).unwrap(), expected);
    }

    #[test]
    fn test_resolve_path_missing_param() {
        let err = resolve_path("/{db}/{doc_id}", &[("db", "a")]).unwrap_err();
        assert!(err.is_validation());
        assert!(err.to_string().contains("doc_id"));
    }

    #[test]
    fn test_resolve_path_empty_param() {
        let err = resolve_path("/{db}", &[("db", "")]).unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_query_helpers() {
        let req = RequestBuilder::new(Method::GET, "/_all_dbs", &[])
            .unwrap()
            .query_opt("limit", Some(10))
            .query_opt::<bool>("descending", None)
            .query_json("startkey", Some(&"a"))
            .unwrap()
            .query_list("states", Some(&["failed".to_string(), "error".to_string()]));

        assert_eq!(
            req.query,
            vec![
                ("limit".to_string(), "10".to_string()),
                ("startkey".to_string(), "\"a\"".to_string()),
                ("states".to_string(), "failed,error".to_string()),
            ]
        );
    }

    #[test]
    fn test_header_value_case_insensitive() {
        let req = RequestBuilder::new(Method::GET, "/", &[])
            .unwrap()
            .header("If-None-Match", "\"1-abc\"");
        assert_eq!(req.header_value("if-none-match"), Some("\"1-abc\""));
        assert_eq!(req.header_value("Accept"), None);
    }

    #[test]
    fn test_json_body() {
        let req = RequestBuilder::new(Method::POST, "/_dbs_info", &[])
            .unwrap()
            .json(&serde_json::json!({"keys": ["a"]}))
            .unwrap();
        match req.body {
            RequestBody::Json(data) => assert_eq!(&data[..], br#"{"keys":["a"]}"#),
            other => panic!("unexpected body: {other:?}"),
        }
    }
}
