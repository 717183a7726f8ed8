//! Language code tables and resolution
//!
//! Normalizes user-supplied language identifiers (codes, English names,
//! locale-qualified variants) to the canonical codes the endpoint accepts.

use crate::{Error, Result};

/// Sentinel source code asking the endpoint to detect the language.
pub const AUTO: &str = "auto";

/// Canonical language codes with their English display names.
pub const LANGUAGES: &[(&str, &str)] = &[
    ("af", "afrikaans"),
    ("sq", "albanian"),
    ("am", "amharic"),
    ("ar", "arabic"),
    ("hy", "armenian"),
    ("az", "azerbaijani"),
    ("eu", "basque"),
    ("be", "belarusian"),
    ("bn", "bengali"),
    ("bs", "bosnian"),
    ("bg", "bulgarian"),
    ("ca", "catalan"),
    ("ceb", "cebuano"),
    ("ny", "chichewa"),
    ("zh-cn", "chinese (simplified)"),
    ("zh-tw", "chinese (traditional)"),
    ("co", "corsican"),
    ("hr", "croatian"),
    ("cs", "czech"),
    ("da", "danish"),
    ("nl", "dutch"),
    ("en", "english"),
    ("eo", "esperanto"),
    ("et", "estonian"),
    ("tl", "filipino"),
    ("fi", "finnish"),
    ("fr", "french"),
    ("fy", "frisian"),
    ("gl", "galician"),
    ("ka", "georgian"),
    ("de", "german"),
    ("el", "greek"),
    ("gu", "gujarati"),
    ("ht", "haitian creole"),
    ("ha", "hausa"),
    ("haw", "hawaiian"),
    ("iw", "hebrew"),
    ("he", "hebrew"),
    ("hi", "hindi"),
    ("hmn", "hmong"),
    ("hu", "hungarian"),
    ("is", "icelandic"),
    ("ig", "igbo"),
    ("id", "indonesian"),
    ("ga", "irish"),
    ("it", "italian"),
    ("ja", "japanese"),
    ("jw", "javanese"),
    ("kn", "kannada"),
    ("kk", "kazakh"),
    ("km", "khmer"),
    ("ko", "korean"),
    ("ku", "kurdish (kurmanji)"),
    ("ky", "kyrgyz"),
    ("lo", "lao"),
    ("la", "latin"),
    ("lv", "latvian"),
    ("lt", "lithuanian"),
    ("lb", "luxembourgish"),
    ("mk", "macedonian"),
    ("mg", "malagasy"),
    ("ms", "malay"),
    ("ml", "malayalam"),
    ("mt", "maltese"),
    ("mi", "maori"),
    ("mr", "marathi"),
    ("mn", "mongolian"),
    ("my", "myanmar (burmese)"),
    ("ne", "nepali"),
    ("no", "norwegian"),
    ("or", "odia"),
    ("ps", "pashto"),
    ("fa", "persian"),
    ("pl", "polish"),
    ("pt", "portuguese"),
    ("pa", "punjabi"),
    ("ro", "romanian"),
    ("ru", "russian"),
    ("sm", "samoan"),
    ("gd", "scots gaelic"),
    ("sr", "serbian"),
    ("st", "sesotho"),
    ("sn", "shona"),
    ("sd", "sindhi"),
    ("si", "sinhala"),
    ("sk", "slovak"),
    ("sl", "slovenian"),
    ("so", "somali"),
    ("es", "spanish"),
    ("su", "sundanese"),
    ("sw", "swahili"),
    ("sv", "swedish"),
    ("tg", "tajik"),
    ("ta", "tamil"),
    ("te", "telugu"),
    ("th", "thai"),
    ("tr", "turkish"),
    ("uk", "ukrainian"),
    ("ur", "urdu"),
    ("ug", "uyghur"),
    ("uz", "uzbek"),
    ("vi", "vietnamese"),
    ("cy", "welsh"),
    ("xh", "xhosa"),
    ("yi", "yiddish"),
    ("yo", "yoruba"),
    ("zu", "zulu"),
];

/// Codes the endpoint does not accept, mapped to the code it expects instead.
pub const SPECIAL_CASES: &[(&str, &str)] = &[("ee", "et"), ("zh", "zh-cn")];

/// Which side of the request a code is being resolved for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Source,
    Destination,
}

impl Role {
    fn label(self) -> &'static str {
        match self {
            Role::Source => "source",
            Role::Destination => "destination",
        }
    }
}

pub fn is_canonical(code: &str) -> bool {
    LANGUAGES.iter().any(|(c, _)| *c == code)
}

/// Looks up the English display name of a canonical code.
pub fn language_name(code: &str) -> Option<&'static str> {
    LANGUAGES
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, name)| *name)
}

fn special_case(code: &str) -> Option<&'static str> {
    SPECIAL_CASES
        .iter()
        .find(|(from, _)| *from == code)
        .map(|(_, to)| *to)
}

/// Alias lookup by English name. Names shared by several codes resolve to
/// the last one listed (`hebrew` -> `he`).
fn alias(name: &str) -> Option<&'static str> {
    LANGUAGES
        .iter()
        .rev()
        .find(|(_, n)| *n == name)
        .map(|(code, _)| *code)
}

/// Lowercases and strips the locale variant: `zh_CN` -> `zh`, `_EN` -> `en`.
///
/// Empty segments are skipped so a leading underscore does not erase the code.
fn normalize(code: &str) -> String {
    let lowered = code.trim().to_lowercase();
    let stripped = lowered
        .split('_')
        .find(|segment| !segment.is_empty())
        .unwrap_or_default();
    stripped.to_string()
}

/// Resolves `code` to a canonical language code.
///
/// Canonical codes pass through unchanged; otherwise the special-case table
/// and then the name alias table are consulted. Only a source may be `auto`.
pub fn resolve(code: &str, role: Role) -> Result<String> {
    let normalized = normalize(code);

    if role == Role::Source && normalized == AUTO {
        return Ok(AUTO.to_string());
    }
    if is_canonical(&normalized) {
        return Ok(normalized);
    }

    special_case(&normalized)
        .or_else(|| alias(&normalized))
        .map(str::to_string)
        .ok_or_else(|| Error::InvalidLanguageCode {
            role: role.label(),
            code: code.to_string(),
        })
}
