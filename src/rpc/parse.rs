use super::RPC_ID;
use crate::languages::AUTO;
use crate::models::{Translated, TranslatedPart, TranslationRequest};
use crate::{Error, Result};
use serde_json::Value;

const ORIGIN_PRONUNCIATION: &str = "/0/0";
const DETECTED_LANGUAGE_FALLBACK: &str = "/0/2";
const DETECTED_LANGUAGE: &str = "/2";
const SINGLE_TRANSLATION: &str = "/1/0/0/0";
const PRONUNCIATION: &str = "/1/0/0/1";
// Inferred from recorded responses, not from any published description of the format.
const SPACING_FLAG: &str = "/1/0/0/3";
const SEGMENTS: &str = "/1/0/0/5";

fn malformed(message: impl Into<String>) -> Error {
    Error::MalformedResponse(message.into())
}

/// Typed view over the decoded translate body.
///
/// The body is an untyped nested array addressed purely by position. Each
/// accessor documents the index path it reads. Optional fields come back as
/// `None` when absent or of the wrong type; only the segment list and the
/// spacing flag can fail the parse.
#[derive(Debug, Clone)]
pub struct ParsedBody(Value);

impl ParsedBody {
    /// Decodes both envelope layers of an extracted payload.
    ///
    /// The payload is `[[rpc_id, encoded_body, ...]]` where `encoded_body` is
    /// itself a JSON document in a string.
    pub fn from_payload(payload: &str) -> Result<Self> {
        let envelope: Value = serde_json::from_str(payload)
            .map_err(|e| malformed(format!("envelope is not valid JSON: {}", e)))?;

        match envelope.pointer("/0/1").and_then(Value::as_str) {
            Some(id) if id == RPC_ID => {}
            other => tracing::warn!("Envelope carries RPC id {:?}, expected {}", other, RPC_ID),
        }

        let encoded = envelope
            .pointer("/0/2")
            .and_then(Value::as_str)
            .ok_or_else(|| malformed("envelope has no encoded body at [0][2]"))?;

        let body = serde_json::from_str(encoded)
            .map_err(|e| malformed(format!("encoded body is not valid JSON: {}", e)))?;

        Ok(Self(body))
    }

    pub fn into_value(self) -> Value {
        self.0
    }

    fn str_at(&self, pointer: &str) -> Option<&str> {
        self.0.pointer(pointer).and_then(Value::as_str)
    }

    fn non_empty_str_at(&self, pointer: &str) -> Option<&str> {
        self.str_at(pointer).filter(|s| !s.is_empty())
    }

    /// `[2]`: language the endpoint detected for an `auto` source.
    pub fn detected_language(&self) -> Option<&str> {
        self.non_empty_str_at(DETECTED_LANGUAGE)
    }

    /// `[0][2]`: secondary position of the detected language.
    pub fn detected_language_fallback(&self) -> Option<&str> {
        self.non_empty_str_at(DETECTED_LANGUAGE_FALLBACK)
    }

    /// `[0][0]`: romanization of the original text.
    pub fn origin_pronunciation(&self) -> Option<&str> {
        self.str_at(ORIGIN_PRONUNCIATION)
    }

    /// `[1][0][0][1]`: romanization of the translation.
    pub fn pronunciation(&self) -> Option<&str> {
        self.str_at(PRONUNCIATION)
    }

    /// `[1][0][0][3]`: whether segments are joined with a space.
    ///
    /// `null` or a missing slot means no spacing. Any other non-boolean value
    /// is treated as format drift and fails the parse.
    pub fn spacing(&self) -> Result<bool> {
        match self.0.pointer(SPACING_FLAG) {
            Some(Value::Bool(flag)) => Ok(*flag),
            None | Some(Value::Null) => Ok(false),
            Some(other) => Err(malformed(format!(
                "expected boolean spacing flag at [1][0][0][3], found {}",
                other
            ))),
        }
    }

    /// `[1][0][0][5]`: translated segments as `[text, [alternatives...]?, ...]`.
    ///
    /// When the segment list is `null` the whole translation at
    /// `[1][0][0][0]` becomes the single part.
    pub fn parts(&self) -> Result<Vec<TranslatedPart>> {
        match self.0.pointer(SEGMENTS) {
            Some(Value::Array(segments)) => segments.iter().map(part_from_segment).collect(),
            None | Some(Value::Null) => self
                .str_at(SINGLE_TRANSLATION)
                .map(|text| vec![TranslatedPart::new(text.to_string(), Vec::new())])
                .ok_or_else(|| malformed("no translated segments at [1][0][0][5]")),
            Some(other) => Err(malformed(format!(
                "expected segment list at [1][0][0][5], found {}",
                other
            ))),
        }
    }
}

fn part_from_segment(segment: &Value) -> Result<TranslatedPart> {
    let text = segment
        .get(0)
        .and_then(Value::as_str)
        .ok_or_else(|| malformed(format!("segment has no text: {}", segment)))?;

    let alternatives = segment
        .get(1)
        .and_then(Value::as_array)
        .map(|alts| {
            alts.iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();

    Ok(TranslatedPart::new(text.to_string(), alternatives))
}

/// Joins segment texts, separated by a single space only when `spacing` is set.
pub fn join_parts(parts: &[TranslatedPart], spacing: bool) -> String {
    let separator = if spacing { " " } else { "" };
    parts
        .iter()
        .map(|part| part.text.as_str())
        .collect::<Vec<_>>()
        .join(separator)
}

/// Builds the translation result for `request` from an extracted payload.
pub fn parse_translation(payload: &str, request: &TranslationRequest) -> Result<Translated> {
    let body = ParsedBody::from_payload(payload)?;

    let parts = body.parts()?;
    let spacing = body.spacing()?;
    let translated_text = join_parts(&parts, spacing);

    let source = if request.source == AUTO {
        match body
            .detected_language()
            .or_else(|| body.detected_language_fallback())
        {
            Some(lang) => lang.to_string(),
            None => {
                tracing::warn!("Response carries no detected language, keeping '{}'", AUTO);
                AUTO.to_string()
            }
        }
    } else {
        request.source.clone()
    };

    let pronunciation = body.pronunciation().map(str::to_string);
    let origin_pronunciation = body.origin_pronunciation().map(str::to_string);

    Ok(Translated {
        source,
        destination: request.destination.clone(),
        origin_text: request.text.clone(),
        translated_text,
        pronunciation,
        parts,
        origin_pronunciation,
        confidence: None,
        parsed: body.into_value(),
    })
}
