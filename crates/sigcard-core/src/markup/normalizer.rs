//! Regex-based HTML to plain text normalization.

use crate::extract::rules::patterns::{BLANK_LINES, SCRIPT_BLOCK, STYLE_BLOCK, TAG};

use super::{MarkupConverter, Result};

/// Entities decoded by the normalizer, applied in this order.
const ENTITIES: [(&str, &str); 4] = [
    ("&nbsp;", " "),
    ("&amp;", "&"),
    ("&lt;", "<"),
    ("&gt;", ">"),
];

/// Markup converter built on [`normalize`]. It never fails.
#[derive(Debug, Default, Clone, Copy)]
pub struct RegexNormalizer;

impl MarkupConverter for RegexNormalizer {
    fn to_text(&self, html: &str) -> Result<String> {
        Ok(normalize(html))
    }
}

/// Convert HTML to plain text.
///
/// Drops `<style>` and `<script>` blocks, turns every other tag into a line
/// break, decodes `&nbsp;`, `&amp;`, `&lt;` and `&gt;`, collapses runs of
/// newlines and trims the result. This is not a parser: malformed markup
/// still yields deterministic, possibly noisy, text.
pub fn normalize(html: &str) -> String {
    let text = STYLE_BLOCK.replace_all(html, "");
    let text = SCRIPT_BLOCK.replace_all(&text, "");
    let text = TAG.replace_all(&text, "\n");

    let mut text = text.into_owned();
    for (entity, decoded) in ENTITIES {
        text = text.replace(entity, decoded);
    }

    BLANK_LINES.replace_all(&text, "\n").trim().to_string()
}
