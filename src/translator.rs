//! Translation session orchestrating one translate call end to end.

use crate::languages::AUTO;
use crate::models::{Config, Detected, StatusPolicy, Translated, TranslationRequest};
use crate::rpc::{self, extract_payload, parse_translation, RPC_PATH};
use crate::transport::{HttpTransport, RpcRequest, Transport};
use crate::{Error, Result};
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{debug, error, warn};

pub const DEFAULT_DESTINATION: &str = "en";

/// Picks the host for one call. A single host is always used as is.
pub fn pick_service_url<'a, R: Rng + ?Sized>(
    urls: &'a [String],
    rng: &mut R,
) -> Option<&'a str> {
    if urls.len() == 1 {
        return Some(urls[0].as_str());
    }
    urls.choose(rng).map(String::as_str)
}

/// Batch endpoint URL on `host`. Hosts without a scheme are reached over https.
pub fn rpc_url(host: &str) -> String {
    let host = host.trim_end_matches('/');
    if host.contains("://") {
        format!("{}{}", host, RPC_PATH)
    } else {
        format!("https://{}{}", host, RPC_PATH)
    }
}

/// Translates text through the web endpoint's batched-RPC protocol.
///
/// Holds only immutable configuration and the transport, so one instance
/// can serve concurrent calls.
pub struct Translator {
    transport: Box<dyn Transport>,
    service_urls: Vec<String>,
    status_policy: StatusPolicy,
}

impl Translator {
    /// Build a translator sending real HTTP requests.
    pub fn new(config: Config) -> Result<Self> {
        let transport = HttpTransport::new(&config)?;
        Self::with_transport(&config, Box::new(transport))
    }

    /// Build a translator over any transport, typically a mock in tests.
    pub fn with_transport(config: &Config, transport: Box<dyn Transport>) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            transport,
            service_urls: config.effective_service_urls(),
            status_policy: config.status_policy,
        })
    }

    /// Translate `text` into `destination`. `source` may be `auto`.
    pub async fn translate(
        &self,
        text: &str,
        destination: &str,
        source: &str,
    ) -> Result<Translated> {
        let request = TranslationRequest::new(text, destination, source)?;

        let host = pick_service_url(&self.service_urls, &mut rand::thread_rng())
            .ok_or_else(|| Error::Config("no service URLs configured".to_string()))?;
        let rpc_request = RpcRequest {
            url: rpc_url(host),
            query: rpc::query_params(),
            form: vec![(rpc::FORM_FIELD, request.encode()?)],
        };

        debug!(
            "Translating {} chars {} -> {} via {}",
            text.chars().count(),
            request.source,
            request.destination,
            host
        );

        let response = self.transport.send(&rpc_request).await?;

        if !response.is_success() {
            match self.status_policy {
                StatusPolicy::Strict => {
                    error!("Unexpected status {} from {}", response.status, rpc_request.url);
                    return Err(Error::Transport {
                        status: response.status,
                        url: rpc_request.url,
                    });
                }
                StatusPolicy::Lenient => warn!(
                    "Unexpected status {} from {}, parsing body anyway",
                    response.status, rpc_request.url
                ),
            }
        }

        let payload = extract_payload(&response.body)?;
        let translated = parse_translation(&payload, &request)?;

        debug!(
            "Translated into {} part(s), source {}",
            translated.parts.len(),
            translated.source
        );

        Ok(translated)
    }

    /// Detect the language of `text`.
    ///
    /// The endpoint has no detection call, so this runs a full translation
    /// into English and reports the source it found.
    pub async fn detect(&self, text: &str) -> Result<Detected> {
        let translated = self.translate(text, DEFAULT_DESTINATION, AUTO).await?;

        Ok(Detected {
            language: translated.source,
            confidence: translated.confidence,
        })
    }
}
