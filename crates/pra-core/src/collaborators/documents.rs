//! Document extraction collaborator
//!
//! Text extraction is an external capability consumed through
//! [`DocumentExtractor`]. The default implementation handles plain text;
//! PDF/DOCX decoding belongs to a production extractor behind the same
//! trait. Section extraction over the recovered text lives here too.

use crate::error::ExtractError;
use async_trait::async_trait;
use indexmap::IndexMap;

/// Character cap for a section with no following anchor
const SECTION_CAP: usize = 1000;

/// Character cap for an abstract with no following anchor
const ABSTRACT_CAP: usize = 500;

/// Document section anchors in reading order: (section name, anchor
/// keyword, keyword ending the section)
const SECTION_ANCHORS: &[(&str, &str, Option<&str>)] = &[
    ("Abstract", "abstract", Some("introduction")),
    ("Introduction", "introduction", Some("method")),
    ("Methodology", "method", Some("result")),
    ("Results", "result", Some("conclusion")),
    ("Conclusion", "conclusion", None),
];

/// Text extraction interface
#[async_trait]
pub trait DocumentExtractor: Send + Sync {
    /// Recover text from document bytes
    async fn extract_text(&self, bytes: &[u8], filename: &str) -> Result<String, ExtractError>;
}

/// Extractor for plain-text uploads
#[derive(Debug, Clone, Default)]
pub struct PlainTextExtractor;

impl PlainTextExtractor {
    /// Create the extractor
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl DocumentExtractor for PlainTextExtractor {
    async fn extract_text(&self, bytes: &[u8], filename: &str) -> Result<String, ExtractError> {
        let extension = file_extension(filename);
        match extension.as_str() {
            "txt" | "md" => {
                let text = String::from_utf8_lossy(bytes).into_owned();
                tracing::info!(chars = text.len(), filename, "extracted plain text");
                Ok(text)
            }
            other => Err(ExtractError::UnsupportedFormat(format!(
                "{other} requires the document extraction service"
            ))),
        }
    }
}

/// Lowercased extension of a filename, empty when absent
#[must_use]
pub fn file_extension(filename: &str) -> String {
    filename
        .rsplit('.')
        .next()
        .filter(|ext| *ext != filename)
        .map(str::to_lowercase)
        .unwrap_or_default()
}

/// Extract common research-paper sections by keyword anchor
///
/// Each section spans from its case-insensitive anchor to the next
/// anchor, or a fixed character cap when the next anchor is missing.
/// Sections whose anchor does not occur are omitted.
#[must_use]
pub fn extract_sections(text: &str) -> IndexMap<String, String> {
    let text_lower = text.to_lowercase();
    let mut sections = IndexMap::new();

    for (name, anchor, next_anchor) in SECTION_ANCHORS {
        let Some(start) = text_lower.find(anchor) else {
            continue;
        };

        let cap = if *anchor == "abstract" { ABSTRACT_CAP } else { SECTION_CAP };
        let end = next_anchor
            .and_then(|next| text_lower[start..].find(next).map(|off| start + off))
            .filter(|end| *end > start)
            .unwrap_or_else(|| char_boundary(text, start + cap));

        let section = text[start..end.min(text.len())].trim().to_string();
        if !section.is_empty() {
            sections.insert((*name).to_string(), section);
        }
    }

    sections
}

/// Largest char boundary not exceeding `target`
fn char_boundary(text: &str, target: usize) -> usize {
    if target >= text.len() {
        return text.len();
    }
    let mut idx = target;
    while !text.is_char_boundary(idx) {
        idx -= 1;
    }
    idx
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAPER: &str = "Title page\n\
        Abstract: we study caching.\n\
        Introduction: caches are everywhere.\n\
        Methods: we measured things.\n\
        Results: caches help.\n\
        Conclusion: use caches.";

    #[tokio::test]
    async fn plain_text_roundtrips() {
        let extractor = PlainTextExtractor::new();
        let text = extractor
            .extract_text(b"hello world", "notes.txt")
            .await
            .unwrap();
        assert_eq!(text, "hello world");
    }

    #[tokio::test]
    async fn binary_formats_are_rejected() {
        let extractor = PlainTextExtractor::new();
        let err = extractor
            .extract_text(b"%PDF-1.4", "paper.pdf")
            .await
            .unwrap_err();
        assert!(matches!(err, ExtractError::UnsupportedFormat(_)));
    }

    #[test]
    fn extension_is_lowercased() {
        assert_eq!(file_extension("Report.PDF"), "pdf");
        assert_eq!(file_extension("archive.tar.gz"), "gz");
        assert_eq!(file_extension("no_extension"), "");
    }

    #[test]
    fn finds_all_anchored_sections() {
        let sections = extract_sections(PAPER);

        assert_eq!(
            sections.keys().collect::<Vec<_>>(),
            vec!["Abstract", "Introduction", "Methodology", "Results", "Conclusion"]
        );
        assert!(sections["Abstract"].starts_with("Abstract: we study caching."));
        assert!(!sections["Abstract"].to_lowercase().contains("introduction"));
        assert!(sections["Conclusion"].contains("use caches"));
    }

    #[test]
    fn section_without_next_anchor_is_capped() {
        let long_tail = format!("conclusion: {}", "x".repeat(3000));
        let sections = extract_sections(&long_tail);
        assert!(sections["Conclusion"].len() <= SECTION_CAP);
    }

    #[test]
    fn unanchored_text_yields_nothing() {
        assert!(extract_sections("plain meeting notes").is_empty());
    }

    #[test]
    fn anchors_are_case_insensitive() {
        let sections = extract_sections("ABSTRACT in caps. INTRODUCTION follows.");
        assert!(sections.contains_key("Abstract"));
        assert!(sections.contains_key("Introduction"));
    }
}
