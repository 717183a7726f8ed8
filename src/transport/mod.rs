//! HTTP transport for batched-RPC calls
//!
//! The translator talks to the endpoint only through [`Transport`], so tests
//! can swap the network for canned responses.

pub mod client;
pub mod mock;

pub use client::HttpTransport;
pub use mock::MockTransport;

use crate::Result;
use async_trait::async_trait;

/// A POST to the batch endpoint: query string plus form-encoded body.
#[derive(Debug, Clone, PartialEq)]
pub struct RpcRequest {
    pub url: String,
    pub query: Vec<(&'static str, String)>,
    pub form: Vec<(&'static str, String)>,
}

impl RpcRequest {
    pub fn form_value(&self, name: &str) -> Option<&str> {
        self.form
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn query_value(&self, name: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value.as_str())
    }
}

/// Status and raw text of whatever the endpoint answered.
#[derive(Debug, Clone, PartialEq)]
pub struct RpcResponse {
    pub status: u16,
    pub body: String,
}

impl RpcResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[async_trait]
pub trait Transport: Send + Sync {
    /// Sends `request`. Only connectivity failures are errors; any HTTP
    /// status comes back as an [`RpcResponse`].
    async fn send(&self, request: &RpcRequest) -> Result<RpcResponse>;
}
