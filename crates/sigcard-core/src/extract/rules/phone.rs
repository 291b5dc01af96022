//! French phone number extraction and normalization.

use super::patterns::{PHONE_FR, PHONE_SEPARATORS};
use super::{ExtractionMatch, FieldExtractor};

/// Phone number extractor for the French numbering plan.
#[derive(Debug, Default, Clone, Copy)]
pub struct PhoneExtractor;

impl PhoneExtractor {
    /// Create a new phone extractor.
    pub fn new() -> Self {
        Self
    }
}

impl FieldExtractor for PhoneExtractor {
    type Output = ExtractionMatch<String>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        PHONE_FR.find(text).map(|m| {
            ExtractionMatch::new(normalize_phone_fr(m.as_str()), m.as_str())
                .with_position(m.start(), m.end())
        })
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        PHONE_FR
            .find_iter(text)
            .map(|m| {
                ExtractionMatch::new(normalize_phone_fr(m.as_str()), m.as_str())
                    .with_position(m.start(), m.end())
            })
            .collect()
    }
}

/// Extract the first French phone number from text in local format.
///
/// Returns an empty string when nothing matches.
pub fn extract_phone_fr(text: &str) -> String {
    PhoneExtractor::new()
        .extract(text)
        .map(|m| m.value)
        .unwrap_or_default()
}

/// Strip separators and rewrite a `+33` prefix to a leading `0`.
///
/// No digit validation happens here; the input is assumed to already have
/// the shape matched by the phone pattern.
pub fn normalize_phone_fr(raw: &str) -> String {
    let compact = PHONE_SEPARATORS.replace_all(raw, "");

    match compact.strip_prefix("+33") {
        Some(rest) => format!("0{}", rest),
        None => compact.into_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_separator_styles() {
        for text in [
            "06 12 34 56 78",
            "06.12.34.56.78",
            "06-12-34-56-78",
            "0612345678",
            "+33612345678",
            "+33 6 12 34 56 78",
            "+33 6.12.34.56.78",
            "06 12.34-56 78",
        ] {
            assert_eq!(extract_phone_fr(text), "0612345678", "input: {}", text);
        }
    }

    #[test]
    fn test_extract_in_context() {
        let text = "Bonjour,\nMon numero: 01 23 45 67 89, merci.";
        assert_eq!(extract_phone_fr(text), "0123456789");
    }

    #[test]
    fn test_first_match_wins() {
        let text = "Fixe: 01 23 45 67 89\nMobile: 06 12 34 56 78";
        assert_eq!(extract_phone_fr(text), "0123456789");
    }

    #[test]
    fn test_no_match() {
        assert_eq!(extract_phone_fr(""), "");
        assert_eq!(extract_phone_fr("Pas de numero ici"), "");
        // Zero after the prefix is not a valid French number
        assert_eq!(extract_phone_fr("00 12 34 56 78"), "");
        // Too short
        assert_eq!(extract_phone_fr("06 12 34 56"), "");
    }

    #[test]
    fn test_accented_letter_ends_number() {
        assert_eq!(extract_phone_fr("Tel 06 12 34 56 78é"), "0612345678");
        assert_eq!(extract_phone_fr("06.12.34.56.78Ça va"), "0612345678");
    }

    #[test]
    fn test_word_boundary_required() {
        assert_eq!(extract_phone_fr("0612345678901"), "");
        assert_eq!(extract_phone_fr("0612345678abc"), "");
    }

    #[test]
    fn test_extract_all_positions() {
        let text = "a 06 12 34 56 78 b +33 1 23 45 67 89";
        let results = PhoneExtractor::new().extract_all(text);

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].value, "0612345678");
        assert_eq!(results[0].source, "06 12 34 56 78");
        assert_eq!(results[0].position, Some((2, 16)));
        assert_eq!(results[1].value, "0123456789");
        assert_eq!(results[1].source, "+33 1 23 45 67 89");
    }

    #[test]
    fn test_normalize_phone_fr() {
        assert_eq!(normalize_phone_fr("+33 6 12 34 56 78"), "0612345678");
        assert_eq!(normalize_phone_fr("06.12.34.56.78"), "0612345678");
        assert_eq!(normalize_phone_fr("0612345678"), "0612345678");
    }
}
