use async_trait::async_trait;
use gloo_net::http::{Request, RequestBuilder};
use serde_json::Value;
use web_sys::RequestCredentials;

use super::{ApiReply, ApiRequest, Method, Transport};
use crate::config::{access_token, AppConfig};
use crate::error::ProfileError;

/// Browser fetch, with the session cookie and the stored access token attached.
pub struct GlooTransport {
    config: AppConfig,
}

impl GlooTransport {
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    fn builder(&self, request: &ApiRequest) -> RequestBuilder {
        let url = self.config.endpoint(&request.path);
        let builder = match request.method {
            Method::Get => Request::get(&url),
            Method::Post => Request::post(&url),
            Method::Put => Request::put(&url),
            Method::Delete => Request::delete(&url),
        };
        let builder = builder.credentials(RequestCredentials::Include);
        match access_token() {
            Some(token) => builder.header("Authorization", &format!("Bearer {}", token)),
            None => builder,
        }
    }
}

#[async_trait(?Send)]
impl Transport for GlooTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiReply, ProfileError> {
        let builder = self.builder(&request);
        let sent = match &request.body {
            Some(body) => builder
                .json(body)
                .map_err(|e| ProfileError::Network(e.to_string()))?
                .send()
                .await,
            None => builder.send().await,
        };
        let resp = sent.map_err(|e| ProfileError::Network(e.to_string()))?;

        let status = resp.status();
        // Error pages are not always JSON; fall back to wrapping the text.
        let text = resp.text().await.unwrap_or_default();
        let body = if text.trim().is_empty() {
            Value::Null
        } else {
            serde_json::from_str::<Value>(&text)
                .unwrap_or_else(|_| serde_json::json!({ "message": text }))
        };
        Ok(ApiReply { status, body })
    }
}
