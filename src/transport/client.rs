use super::{RpcRequest, RpcResponse, Transport};
use crate::models::Config;
use crate::{Error, Result};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, REFERER};
use reqwest::Client;

/// reqwest-backed transport sending the configured `User-Agent` and `Referer`.
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new(config: &Config) -> Result<Self> {
        let referer = HeaderValue::from_str(&config.referer).map_err(|_| {
            Error::Config(format!("invalid Referer header value: {:?}", config.referer))
        })?;
        let mut headers = HeaderMap::new();
        headers.insert(REFERER, referer);

        let client = Client::builder()
            .user_agent(config.user_agent.clone())
            .default_headers(headers)
            .timeout(config.timeout)
            .build()?;

        Ok(Self::new_with_client(client))
    }

    pub fn new_with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: &RpcRequest) -> Result<RpcResponse> {
        tracing::debug!("POST {}", request.url);

        let response = self
            .client
            .post(&request.url)
            .query(&request.query)
            .form(&request.form)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Failed to send request to {}: {}", request.url, e);
                e
            })?;

        let status = response.status().as_u16();
        let body = response.text().await?;

        Ok(RpcResponse { status, body })
    }
}
