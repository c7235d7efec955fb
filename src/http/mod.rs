//! HTTP client module
//!
//! The request pipeline every service operation goes through.
//!
//! # Features
//!
//! - **Request description**: path templating with per-segment percent-encoding
//! - **Automatic Retries**: Configurable retry logic with backoff and `Retry-After`
//! - **Rate Limiting**: Token bucket rate limiter using governor
//! - **Authentication**: Integration with the auth module

mod client;
mod rate_limit;
mod request;
mod response;

pub use client::{HttpClient, HttpClientConfig, HttpClientConfigBuilder};
pub use rate_limit::{RateLimiter, RateLimiterConfig};
pub use request::{resolve_path, RequestBody, RequestBuilder};
pub use response::{BinaryResponse, ByteStream, HeadResponse};

#[cfg(test)]
mod tests;
