use super::RPC_ID;
use crate::Result;
use serde_json::{json, Value};

/// Serializes a translate call into the `f.req` payload.
///
/// The inner `[[text, source, destination, true], [null]]` array is JSON
/// encoded into a string before it is embedded; the endpoint rejects a
/// nested array in that slot.
pub fn encode_request(text: &str, source: &str, destination: &str) -> Result<String> {
    let inner = json!([[text, source, destination, true], [Value::Null]]);
    let inner = serde_json::to_string(&inner)?;
    let envelope = json!([[[RPC_ID, inner, Value::Null, "generic"]]]);
    Ok(serde_json::to_string(&envelope)?)
}
