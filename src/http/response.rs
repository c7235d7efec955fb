//! Response wrappers for calls that do not decode into a model

use bytes::Bytes;
use futures::stream::BoxStream;
use reqwest::header::{HeaderMap, CONTENT_TYPE, ETAG};

/// Streamed response body
pub type ByteStream = BoxStream<'static, crate::Result<Bytes>>;

/// Result of a HEAD request
#[derive(Debug, Clone)]
pub struct HeadResponse {
    /// HTTP status code
    pub status: u16,
    /// Response headers
    pub headers: HeaderMap,
}

impl HeadResponse {
    /// Entity tag with the surrounding quotes removed (the document revision
    /// for document HEAD requests)
    pub fn etag(&self) -> Option<String> {
        header_str(&self.headers, ETAG.as_str()).map(|v| v.trim_matches('"').to_string())
    }

    /// Header value as a string
    pub fn header(&self, name: &str) -> Option<&str> {
        header_str(&self.headers, name)
    }
}

/// Fully buffered binary response (attachments, multipart bodies)
#[derive(Debug, Clone)]
pub struct BinaryResponse {
    /// HTTP status code
    pub status: u16,
    /// Response headers
    pub headers: HeaderMap,
    /// Response body
    pub body: Bytes,
}

impl BinaryResponse {
    /// The `Content-Type` header, including any multipart boundary
    pub fn content_type(&self) -> Option<&str> {
        header_str(&self.headers, CONTENT_TYPE.as_str())
    }
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|v| v.to_str().ok())
}

#[cfg(test)]
mod response_tests {
    use super::*;
    use reqwest::header::HeaderValue;

    #[test]
    fn test_etag_strips_quotes() {
        let mut headers = HeaderMap::new();
        headers.insert(ETAG, HeaderValue::from_static("\"2-7051cbe5c8faecd085a3fa619e6e6337\""));
        let head = HeadResponse {
            status: 200,
            headers,
        };
        assert_eq!(
            head.etag().as_deref(),
            Some("2-7051cbe5c8faecd085a3fa619e6e6337")
        );
    }

    #[test]
    fn test_content_type() {
        let mut headers = HeaderMap::new();
        headers.insert(
            CONTENT_TYPE,
            HeaderValue::from_static("multipart/mixed; boundary=\"abc\""),
        );
        let response = BinaryResponse {
            status: 200,
            headers,
            body: Bytes::new(),
        };
        assert_eq!(
            response.content_type(),
            Some("multipart/mixed; boundary=\"abc\"")
        );
    }
}
