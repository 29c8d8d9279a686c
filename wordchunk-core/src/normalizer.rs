//! Word to token normalization

use crate::types::{Token, Word};
use regex::Regex;
use std::sync::OnceLock;

/// First letter through last letter, letters being Unicode category L
const LETTER_SPAN: &str = r"(?s)\p{L}(?:.*\p{L})?";

static LETTER_SPAN_RE: OnceLock<Regex> = OnceLock::new();

/// Normalize one word into a token
///
/// Leading and trailing non-letters are trimmed and the rest is lower-cased
/// one character at a time. Inner punctuation (`lo'rem`, `am-et`) is kept.
/// Returns `None` when no letters are left.
pub fn normalize(word: &str) -> Option<Token> {
    let trimmed = trim_non_letters(word);
    if trimmed.is_empty() {
        return None;
    }
    Some(Token::from_normalized(trimmed.chars().map(lower_char).collect()))
}

fn trim_non_letters(text: &str) -> &str {
    let letters = LETTER_SPAN_RE
        .get_or_init(|| Regex::new(LETTER_SPAN).expect("letter span pattern should be valid"));
    letters.find(text).map_or("", |span| span.as_str())
}

/// Single-character lower-case mapping
///
/// U+0130 is the only character whose full mapping expands; its first
/// character is the plain `i` of the simple mapping.
fn lower_char(c: char) -> char {
    c.to_lowercase().next().unwrap_or(c)
}

/// Iterator adaptor turning words into tokens, dropping empty results
#[derive(Debug, Clone)]
pub struct Normalizer<I> {
    words: I,
}

impl<I> Normalizer<I> {
    /// Wrap a word iterator
    pub fn new(words: I) -> Self {
        Self { words }
    }
}

impl<I> Iterator for Normalizer<I>
where
    I: Iterator<Item = Word>,
{
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        self.words.by_ref().find_map(|word| normalize(word.as_str()))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, self.words.size_hint().1)
    }
}

/// Normalize a sequence of words, preserving order
pub fn tokens<I>(words: I) -> Normalizer<I::IntoIter>
where
    I: IntoIterator<Item = Word>,
{
    Normalizer::new(words.into_iter())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn normalize_all(words: &[&str]) -> Vec<String> {
        tokens(words.iter().map(|w| Word::from(*w)))
            .map(Token::into_string)
            .collect()
    }

    #[test]
    fn test_lower_cases() {
        assert_eq!(
            normalize_all(&["Lorem", "IPSUM", "siT", "aMEt"]),
            vec!["lorem", "ipsum", "sit", "amet"]
        );
    }

    #[test]
    fn test_trims_surrounding_punctuation() {
        assert_eq!(
            normalize_all(&["'Lorem'", "(ipsum", "_sit,,,", "amet?"]),
            vec!["lorem", "ipsum", "sit", "amet"]
        );
    }

    #[test]
    fn test_keeps_internal_punctuation() {
        assert_eq!(
            normalize_all(&["Lo'rem", "_ip_sum_", "si,t", "am-et"]),
            vec!["lo'rem", "ip_sum", "si,t", "am-et"]
        );
    }

    #[test]
    fn test_unicode_letters() {
        assert_eq!(
            normalize_all(&["Süsse", "Straße", "世界", "'世界'"]),
            vec!["süsse", "straße", "世界", "世界"]
        );
    }

    #[test]
    fn test_drops_words_without_letters() {
        assert_eq!(normalize_all(&["***", "lorem", "42", "--", "ipsum"]), vec!["lorem", "ipsum"]);
        assert!(normalize("").is_none());
    }

    #[test]
    fn test_digits_are_trimmed_at_edges() {
        assert_eq!(normalize("1st").unwrap(), "st");
        assert_eq!(normalize("b2b").unwrap(), "b2b");
    }

    #[test]
    fn test_dotted_capital_i_maps_to_plain_i() {
        let token = normalize("İstanbul").unwrap();
        assert_eq!(token, "istanbul");
        assert_eq!(token.as_str().chars().count(), 8);
        assert_eq!(normalize("İ").unwrap(), "i");
    }

    #[test]
    fn test_sigma_is_not_context_sensitive() {
        assert_eq!(normalize("ΟΔΟΣ").unwrap(), "οδοσ");
    }

    #[test]
    fn test_letter_numbers_are_not_letters() {
        assert!(normalize("Ⅻ").is_none());
        assert!(normalize("ⅰⅱⅲ").is_none());
        assert_eq!(normalize("Ⅻth").unwrap(), "th");
    }

    #[test]
    fn test_trailing_combining_marks_are_trimmed() {
        // NAMASTE ends in vowel sign E (U+0947); the inner virama stays
        assert_eq!(
            normalize("नमस्ते").unwrap(),
            "\u{928}\u{92E}\u{938}\u{94D}\u{924}"
        );
        assert_eq!(normalize("\u{301}abc\u{301}").unwrap(), "abc");
    }

    #[test]
    fn test_idempotent_on_normalized_tokens() {
        for word in ["lorem", "lo'rem", "straße", "世界", "am-et", "नमस्ते", "İstanbul"] {
            let token = normalize(word).unwrap();
            assert_eq!(normalize(token.as_str()).unwrap(), token);
        }
    }
}
