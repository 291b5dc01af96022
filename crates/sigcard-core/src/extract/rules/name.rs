//! Full-name guessing from an email signature block.

use tracing::trace;

use super::patterns::{NAME_TOKEN, SIGNATURE_BOUNDARY};
use super::{ExtractionMatch, FieldExtractor};
use crate::models::config::ExtractionConfig;

/// Signature name guesser.
///
/// Looks for a signature boundary line ("Cordialement", "--", ...) and
/// inspects the lines right after it, or the tail of the text when no
/// boundary is found. The first line made of a few capitalized words wins.
#[derive(Debug, Clone)]
pub struct NameGuesser {
    /// Lines inspected after a boundary marker.
    boundary_window: usize,
    /// Lines inspected at the end of the text when there is no marker.
    tail_window: usize,
    /// Capitalized tokens a line needs to qualify.
    min_capitalized: usize,
    /// Accepted token count range for a candidate line.
    min_tokens: usize,
    max_tokens: usize,
}

impl NameGuesser {
    /// Create a guesser with the default windows.
    pub fn new() -> Self {
        Self::from_config(&ExtractionConfig::default())
    }

    /// Create a guesser from extraction configuration.
    pub fn from_config(config: &ExtractionConfig) -> Self {
        Self {
            boundary_window: config.boundary_window,
            tail_window: config.tail_window,
            min_capitalized: config.min_capitalized_tokens,
            min_tokens: config.min_name_tokens,
            max_tokens: config.max_name_tokens,
        }
    }

    /// Set the number of lines inspected after a boundary marker.
    pub fn with_boundary_window(mut self, lines: usize) -> Self {
        self.boundary_window = lines;
        self
    }

    /// Set the number of trailing lines inspected without a marker.
    pub fn with_tail_window(mut self, lines: usize) -> Self {
        self.tail_window = lines;
        self
    }

    /// Guess a full name, or return `fallback` when no line qualifies.
    pub fn guess(&self, text: &str, fallback: &str) -> String {
        self.extract(text)
            .map(|m| m.value)
            .unwrap_or_else(|| fallback.to_string())
    }

    /// Candidate window: lines after the first boundary, or the text tail.
    fn candidate_window<'a>(&self, lines: &'a [&'a str]) -> &'a [&'a str] {
        let boundary = lines.iter().position(|l| SIGNATURE_BOUNDARY.is_match(l));

        match boundary {
            Some(idx) if idx + 1 < lines.len() => {
                let end = idx
                    .saturating_add(1)
                    .saturating_add(self.boundary_window)
                    .min(lines.len());
                trace!("signature boundary at line {}: {:?}", idx, lines[idx]);
                &lines[idx + 1..end]
            }
            _ => {
                let start = lines.len().saturating_sub(self.tail_window);
                &lines[start..]
            }
        }
    }

    fn is_name_line(&self, line: &str) -> bool {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.len() < self.min_tokens || tokens.len() > self.max_tokens {
            return false;
        }

        let capitalized = tokens.iter().filter(|t| NAME_TOKEN.is_match(t)).count();
        capitalized >= self.min_capitalized
    }
}

impl Default for NameGuesser {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for NameGuesser {
    type Output = ExtractionMatch<String>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        self.extract_all(text).into_iter().next()
    }

    /// Every qualifying line of the candidate window, in window order.
    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        let lines: Vec<&str> = text
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .collect();

        self.candidate_window(&lines)
            .iter()
            .filter(|l| self.is_name_line(l))
            .map(|l| ExtractionMatch::new(l.to_string(), *l))
            .collect()
    }
}

/// Guess a full name from a signature block using the default windows.
pub fn guess_full_name(text: &str, fallback: &str) -> String {
    NameGuesser::new().guess(text, fallback)
}
