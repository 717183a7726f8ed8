use super::{RpcRequest, RpcResponse, Transport};
use crate::Result;
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

/// Transport replaying canned responses and recording every request.
///
/// Clones share the same response queue and request log.
#[derive(Clone)]
pub struct MockTransport {
    responses: Arc<Mutex<Vec<RpcResponse>>>,
    requests: Arc<Mutex<Vec<RpcRequest>>>,
    call_count: Arc<Mutex<usize>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(Vec::new())),
            requests: Arc::new(Mutex::new(Vec::new())),
            call_count: Arc::new(Mutex::new(0)),
        }
    }

    pub fn with_response(self, status: u16, body: &str) -> Self {
        self.responses.lock().unwrap().push(RpcResponse {
            status,
            body: body.to_string(),
        });
        self
    }

    pub fn get_call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }

    pub fn requests(&self) -> Vec<RpcRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl Default for MockTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(&self, request: &RpcRequest) -> Result<RpcResponse> {
        let mut count = self.call_count.lock().unwrap();
        *count += 1;

        self.requests.lock().unwrap().push(request.clone());

        let responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            // An empty 200 body; extraction rejects it
            Ok(RpcResponse {
                status: 200,
                body: String::new(),
            })
        } else {
            let index = (*count - 1) % responses.len();
            Ok(responses[index].clone())
        }
    }
}
