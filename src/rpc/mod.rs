//! Batched-RPC wire protocol of the translate web endpoint
//!
//! The endpoint speaks the browser app's internal batch protocol: requests
//! carry a doubly JSON-encoded payload in a form field, and responses are a
//! length-prefixed, line-oriented stream that is not valid JSON as a whole.

pub mod encode;
pub mod extract;
pub mod parse;

pub use encode::encode_request;
pub use extract::{extract_payload, BracketCount};
pub use parse::{parse_translation, ParsedBody};

/// Identifier of the translate call inside a batch.
pub const RPC_ID: &str = "MkEWBc";

/// Web-server build label sent as the `bl` query parameter.
pub const BUILD_LABEL: &str = "boq_translate-webserver_20201207.13_p0";

pub const RPC_PATH: &str = "/_/TranslateWebserverUi/data/batchexecute";

/// Form field carrying the encoded request.
pub const FORM_FIELD: &str = "f.req";

/// Fixed query parameters accompanying every translate call.
pub fn query_params() -> Vec<(&'static str, String)> {
    vec![
        ("rpcids", RPC_ID.to_string()),
        ("bl", BUILD_LABEL.to_string()),
        ("soc-app", "1".to_string()),
        ("soc-platform", "1".to_string()),
        ("soc-device", "1".to_string()),
        ("rt", "c".to_string()),
    ]
}
