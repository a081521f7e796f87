use serde_json::Value;
use tracing::debug;

use crate::config::GetuiConfig;
use crate::errors::{GetuiError, Result};

/// Header carrying the session token
pub const AUTH_TOKEN_HEADER: &str = "authtoken";

const USER_AGENT: &str = concat!("nova-getui-shared/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Delete => "DELETE",
        }
    }
}

/// One call against the app-scoped API root
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    /// Endpoint path starting with `/`, e.g. `/push_single`
    pub path: String,
    pub body: Option<Value>,
    pub auth_token: Option<String>,
}

/// HTTP boundary of the client
///
/// Implementations return the parsed JSON body of a 2xx response; checking
/// the provider `result` marker is left to the caller.
#[async_trait::async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: ApiRequest) -> Result<Value>;
}

/// reqwest-backed transport bound to `{base_url}/{app_id}`
pub struct HttpTransport {
    http_client: reqwest::Client,
    app_url: String,
}

impl HttpTransport {
    pub fn new(config: &GetuiConfig) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            http_client,
            app_url: config.app_url(),
        })
    }

    pub fn app_url(&self) -> &str {
        &self.app_url
    }
}

#[async_trait::async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: ApiRequest) -> Result<Value> {
        let url = format!("{}{}", self.app_url, request.path);

        let mut builder = match request.method {
            Method::Get => self.http_client.get(&url),
            Method::Post => self.http_client.post(&url),
            Method::Delete => self.http_client.delete(&url),
        };
        if let Some(token) = &request.auth_token {
            builder = builder.header(AUTH_TOKEN_HEADER, token);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await?;
        let status = response.status();
        let text = response.text().await?;

        debug!(
            method = request.method.as_str(),
            path = %request.path,
            status = status.as_u16(),
            "Getui response received"
        );

        if !status.is_success() {
            return Err(GetuiError::Status {
                status: status.as_u16(),
                body: text,
            });
        }

        serde_json::from_str(&text).map_err(|e| GetuiError::Decode(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_transport_creation() {
        let cfg = GetuiConfig::new("app-id", "secret", "key", "master");
        let transport = HttpTransport::new(&cfg).unwrap();
        assert_eq!(transport.app_url(), "https://restapi.getui.com/v1/app-id");
    }

    #[test]
    fn test_method_names() {
        assert_eq!(Method::Get.as_str(), "GET");
        assert_eq!(Method::Post.as_str(), "POST");
        assert_eq!(Method::Delete.as_str(), "DELETE");
    }
}
