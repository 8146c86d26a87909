//! Front-matter parsing
//!
//! Posts use a plain `Key: Value` header block between `---` delimiter
//! lines. Only the `Title` key is consumed downstream; the full mapping is
//! kept so other keys survive a parse round trip.

use std::collections::BTreeMap;
use thiserror::Error;

/// A parse failure inside the front-matter block
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    /// A header line has no `:` separator. The whole file is rejected so a
    /// half-parsed mapping never reaches storage.
    #[error("front-matter line {line} has no colon: {text:?}")]
    MissingColon { line: usize, text: String },
}

/// A document split into metadata and body, alive for one sync pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedDocument {
    pub metadata: BTreeMap<String, String>,
    pub body: String,
}

impl ParsedDocument {
    /// Parse front-matter from raw document text.
    ///
    /// A matching document starts with a `---` line, carries `Key: Value`
    /// lines, and closes with another `---` line; everything after the
    /// closing delimiter is the body, verbatim. Keys and values are
    /// trimmed; the value keeps any colons past the first. When no block
    /// matches, the metadata is empty and the body is the entire input.
    pub fn parse(raw: &str) -> Result<Self, ParseError> {
        let Some(rest) = strip_delimiter_line(raw) else {
            return Ok(Self::no_front_matter(raw));
        };

        // Find the closing --- line
        let Some((header, body)) = split_at_closing_delimiter(rest) else {
            return Ok(Self::no_front_matter(raw));
        };

        let mut metadata = BTreeMap::new();
        for (idx, line) in header.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let Some((key, value)) = line.split_once(':') else {
                return Err(ParseError::MissingColon {
                    line: idx + 2, // 1-based, after the opening ---
                    text: line.to_string(),
                });
            };
            metadata.insert(key.trim().to_string(), value.trim().to_string());
        }

        Ok(Self {
            metadata,
            body: body.to_string(),
        })
    }

    fn no_front_matter(raw: &str) -> Self {
        Self {
            metadata: BTreeMap::new(),
            body: raw.to_string(),
        }
    }

    /// The `Title` metadata value, if present and non-empty
    pub fn title(&self) -> Option<&str> {
        self.metadata
            .get("Title")
            .map(String::as_str)
            .filter(|t| !t.is_empty())
    }
}

/// Strip a leading `---` delimiter line, returning the text after it
fn strip_delimiter_line(text: &str) -> Option<&str> {
    let rest = text.strip_prefix("---")?;
    match rest.strip_prefix("\r\n").or_else(|| rest.strip_prefix('\n')) {
        Some(after) => Some(after),
        // `---` with no trailing newline is a bare delimiter, not a header
        None => None,
    }
}

/// Split header text from body at the closing `---` line
fn split_at_closing_delimiter(text: &str) -> Option<(&str, &str)> {
    for (pos, _) in text.match_indices("---") {
        let at_line_start = pos == 0 || text[..pos].ends_with('\n');
        if !at_line_start {
            continue;
        }
        let after = &text[pos + 3..];
        let body = after
            .strip_prefix("\r\n")
            .or_else(|| after.strip_prefix('\n'))
            .unwrap_or(after);
        if after.is_empty() || after.starts_with('\n') || after.starts_with("\r\n") {
            let header = text[..pos].trim_end_matches(['\n', '\r']);
            return Some((header, body));
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_basic_front_matter() {
        let doc = ParsedDocument::parse("---\nTitle: Hello World\n---\nBody text").unwrap();
        assert_eq!(doc.title(), Some("Hello World"));
        assert_eq!(doc.body, "Body text");
    }

    #[test]
    fn test_parse_multiple_keys() {
        let raw = "---\nTitle: A Post\nAuthor: Someone\n---\ncontent here\n";
        let doc = ParsedDocument::parse(raw).unwrap();
        assert_eq!(doc.metadata.len(), 2);
        assert_eq!(doc.metadata["Author"], "Someone");
        assert_eq!(doc.body, "content here\n");
    }

    #[test]
    fn test_keys_and_values_trimmed() {
        let doc = ParsedDocument::parse("---\n  Title :   Spaced Out  \n---\nbody").unwrap();
        assert_eq!(doc.title(), Some("Spaced Out"));
    }

    #[test]
    fn test_value_keeps_extra_colons() {
        let doc = ParsedDocument::parse("---\nLink: https://example.com\n---\nb").unwrap();
        assert_eq!(doc.metadata["Link"], "https://example.com");
    }

    #[test]
    fn test_no_front_matter_returns_whole_body() {
        let doc = ParsedDocument::parse("Just some text\nwith lines").unwrap();
        assert!(doc.metadata.is_empty());
        assert_eq!(doc.body, "Just some text\nwith lines");
        assert_eq!(doc.title(), None);
    }

    #[test]
    fn test_unclosed_front_matter_is_body() {
        let raw = "---\nTitle: Half\nno closing delimiter";
        let doc = ParsedDocument::parse(raw).unwrap();
        assert!(doc.metadata.is_empty());
        assert_eq!(doc.body, raw);
    }

    #[test]
    fn test_missing_colon_rejects_file() {
        let err = ParsedDocument::parse("---\nTitle Hello\n---\nbody").unwrap_err();
        assert_eq!(
            err,
            ParseError::MissingColon {
                line: 2,
                text: "Title Hello".to_string(),
            }
        );
    }

    #[test]
    fn test_crlf_line_endings() {
        let doc = ParsedDocument::parse("---\r\nTitle: Windows\r\n---\r\nbody\r\n").unwrap();
        assert_eq!(doc.title(), Some("Windows"));
        assert_eq!(doc.body, "body\r\n");
    }

    #[test]
    fn test_empty_header_block() {
        let doc = ParsedDocument::parse("---\n---\nbody").unwrap();
        assert!(doc.metadata.is_empty());
        assert_eq!(doc.body, "body");
    }

    #[test]
    fn test_empty_title_value_is_none() {
        let doc = ParsedDocument::parse("---\nTitle:\n---\nbody").unwrap();
        assert_eq!(doc.title(), None);
    }
}
