//! The fixed response sent to every client.
//!
//! # Responsibilities
//! - Validate the configured header values once, at startup
//! - Build the identical 200 response for every request, any path or method
//! - Advertise the configured `Connection` policy to clients

use axum::body::{Body, Bytes};
use axum::http::{header, HeaderValue};
use axum::response::Response;

use crate::config::{ClosePolicy, ResponseConfig};
use crate::server::ServerError;

/// Pre-validated response parts shared by every request handler invocation.
#[derive(Debug, Clone)]
pub struct FixedResponse {
    content_type: HeaderValue,
    connection: HeaderValue,
    body: Bytes,
}

impl FixedResponse {
    /// Build the response parts from configuration.
    ///
    /// Fails only if the configured content type is not a legal header value,
    /// which validation normally catches before this point.
    pub fn new(config: &ResponseConfig, policy: ClosePolicy) -> Result<Self, ServerError> {
        Ok(Self {
            content_type: HeaderValue::from_str(&config.content_type)?,
            connection: HeaderValue::from_static(policy.as_header_value()),
            body: Bytes::from(config.body.clone()),
        })
    }

    /// Produce the fixed 200 response.
    pub fn to_response(&self) -> Response {
        let mut response = Response::new(Body::from(self.body.clone()));
        let headers = response.headers_mut();
        headers.insert(header::CONTENT_TYPE, self.content_type.clone());
        headers.insert(header::CONNECTION, self.connection.clone());
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[tokio::test]
    async fn response_has_fixed_parts() {
        let fixed = FixedResponse::new(&ResponseConfig::default(), ClosePolicy::Close).unwrap();
        let response = fixed.to_response();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONNECTION], "close");
        assert_eq!(response.headers()[header::CONTENT_TYPE], "text/plain");

        let body = axum::body::to_bytes(response.into_body(), 1024).await.unwrap();
        assert_eq!(&body[..], b"Hello, World!");
    }

    #[test]
    fn keep_alive_policy_is_advertised() {
        let fixed = FixedResponse::new(&ResponseConfig::default(), ClosePolicy::KeepAlive).unwrap();
        let response = fixed.to_response();
        assert_eq!(response.headers()[header::CONNECTION], "keep-alive");
    }

    #[test]
    fn invalid_content_type_is_rejected() {
        let config = ResponseConfig {
            content_type: "text/plain\r\nX-Injected: 1".to_string(),
            ..ResponseConfig::default()
        };
        assert!(FixedResponse::new(&config, ClosePolicy::Close).is_err());
    }
}
