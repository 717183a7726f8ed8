use super::RPC_ID;
use crate::{Error, Result};

/// How far into a line the quoted RPC identifier may appear for that line to
/// introduce the payload. Later occurrences are payload data, not headers.
const MARKER_WINDOW: usize = 30;

/// Structural bracket tally over one or more lines of the response stream.
///
/// Brackets inside string literals are ignored. A `"` toggles string mode
/// unless the character right before it is a backslash. String mode starts
/// closed on every scanned line.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BracketCount {
    pub open: usize,
    pub close: usize,
}

impl BracketCount {
    pub fn scan(&mut self, line: &str) {
        let mut in_string = false;
        let mut prev = None;

        for c in line.chars() {
            if c == '"' && prev != Some('\\') {
                in_string = !in_string;
            }
            if !in_string {
                match c {
                    '[' => self.open += 1,
                    ']' => self.close += 1,
                    _ => {}
                }
            }
            prev = Some(c);
        }
    }

    /// True once at least one array was opened and every opened array closed.
    pub fn is_balanced(&self) -> bool {
        self.open > 0 && self.open == self.close
    }
}

fn introduces_payload(line: &str, marker: &str) -> bool {
    let end = line
        .char_indices()
        .nth(MARKER_WINDOW)
        .map(|(i, _)| i)
        .unwrap_or(line.len());
    line[..end].contains(marker)
}

/// Isolates the JSON array answering the translate call from a raw
/// response body.
///
/// Lines before the one carrying the quoted RPC identifier near its start are
/// skipped. From there lines are concatenated until the structural brackets
/// balance. Running out of input first is a malformed response.
pub fn extract_payload(body: &str) -> Result<String> {
    let marker = format!("\"{}\"", RPC_ID);
    let mut lines = body
        .lines()
        .skip_while(|line| !introduces_payload(line, &marker))
        .peekable();

    if lines.peek().is_none() {
        return Err(Error::MalformedResponse(format!(
            "no line introducing {} found in response",
            RPC_ID
        )));
    }

    let mut count = BracketCount::default();
    let mut payload = String::new();

    for line in lines {
        count.scan(line);
        payload.push_str(line);

        if count.is_balanced() {
            tracing::debug!("Extracted {} byte payload for {}", payload.len(), RPC_ID);
            return Ok(payload);
        }
    }

    Err(Error::MalformedResponse(format!(
        "payload brackets never balanced ({} open, {} closed)",
        count.open, count.close
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    const HELLO_KO: &str = include_str!("../../tests/fixtures/hello_ko.txt");

    fn scan(line: &str) -> BracketCount {
        let mut count = BracketCount::default();
        count.scan(line);
        count
    }

    #[test]
    fn test_scan_counts_structural_brackets() {
        assert_eq!(scan("[[1,2],[3]]"), BracketCount { open: 3, close: 3 });
        assert_eq!(scan("[[\"a\""), BracketCount { open: 2, close: 0 });
    }

    #[test]
    fn test_scan_ignores_brackets_inside_strings() {
        assert_eq!(scan(r#"["[not] [counted"]"#), BracketCount { open: 1, close: 1 });
    }

    #[test]
    fn test_scan_respects_escaped_quotes() {
        // the escaped quote keeps the string open across the `]`
        assert_eq!(scan(r#"["a\"]",1]"#), BracketCount { open: 1, close: 1 });
        assert_eq!(
            scan(r#"["x","[[\"y\",[\"z\"]]]"]"#),
            BracketCount { open: 1, close: 1 }
        );
    }

    #[test]
    fn test_scan_accumulates_across_lines() {
        let mut count = BracketCount::default();
        count.scan("[[\"wrb.fr\",");
        assert!(!count.is_balanced());
        count.scan("null]]");
        assert!(count.is_balanced());
    }

    #[test]
    fn test_empty_count_is_not_balanced() {
        assert!(!BracketCount::default().is_balanced());
        assert!(!scan("no brackets here").is_balanced());
    }

    #[test]
    fn test_extract_skips_marker_deep_inside_earlier_line() {
        let payload = extract_payload(HELLO_KO).unwrap();

        assert!(payload.starts_with(r#"[["wrb.fr","MkEWBc","#));
        assert!(payload.ends_with(r#""generic"]]"#));
        serde_json::from_str::<serde_json::Value>(&payload).unwrap();
    }

    #[test]
    fn test_extract_joins_payload_spanning_lines() {
        let body = concat!(
            ")]}'\n",
            "\n",
            "120\n",
            "[[\"wrb.fr\",\"MkEWBc\",\n",
            "\"[null,[[[null,null,null,true,null,[[\\\"Hi ]\\\",[]]]]]]]\",\n",
            "null,null,null,\"generic\"]]\n",
            "25\n",
            "[[\"e\",4,null,null,120]]\n",
        );

        let payload = extract_payload(body).unwrap();
        let value: serde_json::Value = serde_json::from_str(&payload).unwrap();
        assert_eq!(value[0][1], "MkEWBc");
        assert_eq!(value[0][6], "generic");
    }

    #[test]
    fn test_extract_handles_crlf_line_endings() {
        let body = ")]}'\r\n\r\n40\r\n[[\"wrb.fr\",\"MkEWBc\",\"[]\",null]]\r\n";
        let payload = extract_payload(body).unwrap();
        assert_eq!(payload, r#"[["wrb.fr","MkEWBc","[]",null]]"#);
    }

    #[test]
    fn test_extract_fails_on_truncated_payload() {
        let body = ")]}'\n\n300\n[[\"wrb.fr\",\"MkEWBc\",\"[null,\n[[1,2]\n";
        let err = extract_payload(body).unwrap_err();
        assert!(matches!(err, Error::MalformedResponse(_)));
        assert!(err.to_string().contains("never balanced"));
    }

    #[test]
    fn test_extract_fails_without_marker_line() {
        let body = ")]}'\n\n23\n[[\"e\",4,null,null,23]]\n";
        let err = extract_payload(body).unwrap_err();
        assert!(matches!(err, Error::MalformedResponse(_)));

        assert!(matches!(
            extract_payload("").unwrap_err(),
            Error::MalformedResponse(_)
        ));
    }
}
