//! Value types flowing through the pipeline

use std::fmt;

/// Number of consecutive tokens in a chunk
pub const CHUNK_SIZE: usize = 3;

/// A maximal run of non-whitespace characters, exactly as found in the input
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Word(String);

impl Word {
    /// Create a word from raw text
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    /// Borrow the raw text
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Word {
    fn from(text: &str) -> Self {
        Self(text.to_string())
    }
}

impl From<String> for Word {
    fn from(text: String) -> Self {
        Self(text)
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A normalized word: lower-case, non-empty, starting and ending with a
/// Unicode letter (general category L)
///
/// Tokens are only built by [`crate::normalizer::normalize`], so the invariant
/// holds for every value in circulation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Token(String);

impl Token {
    pub(crate) fn from_normalized(text: String) -> Self {
        debug_assert!(!text.is_empty());
        Self(text)
    }

    /// Normalize arbitrary text into a token, if any letters survive
    pub fn parse(text: &str) -> Option<Self> {
        crate::normalizer::normalize(text)
    }

    /// Borrow the token text
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the token, returning its text
    pub fn into_string(self) -> String {
        self.0
    }
}

impl AsRef<str> for Token {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<&str> for Token {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A window of [`CHUNK_SIZE`] consecutive tokens
///
/// Equality, hashing and ordering are structural, token by token, so a chunk
/// can key the frequency table directly.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Chunk([Token; CHUNK_SIZE]);

impl Chunk {
    /// Create a chunk from its tokens, oldest first
    pub fn new(tokens: [Token; CHUNK_SIZE]) -> Self {
        Self(tokens)
    }

    /// Build a chunk by normalizing each word
    ///
    /// Returns `None` if any word normalizes to nothing.
    pub fn parse(words: [&str; CHUNK_SIZE]) -> Option<Self> {
        let mut tokens = Vec::with_capacity(CHUNK_SIZE);
        for word in words {
            tokens.push(Token::parse(word)?);
        }
        tokens.try_into().ok().map(Self)
    }

    /// The tokens, oldest first
    pub fn tokens(&self) -> &[Token; CHUNK_SIZE] {
        &self.0
    }

    /// Iterate token texts
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(Token::as_str)
    }
}

impl fmt::Display for Chunk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, token) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            f.write_str(token.as_str())?;
        }
        Ok(())
    }
}

/// How many times a chunk occurred
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Count {
    /// Number of occurrences
    pub count: usize,
    /// The chunk counted
    pub chunk: Chunk,
}

impl Count {
    /// Create a count entry
    pub fn new(count: usize, chunk: Chunk) -> Self {
        Self { count, chunk }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chunk(words: [&str; CHUNK_SIZE]) -> Chunk {
        Chunk::parse(words).unwrap()
    }

    #[test]
    fn test_chunk_display_joins_with_single_space() {
        assert_eq!(chunk(["lorem", "ipsum", "dolor"]).to_string(), "lorem ipsum dolor");
    }

    #[test]
    fn test_chunk_parse_normalizes_words() {
        let parsed = chunk(["'Lorem'", "IPSUM", "dolor,"]);
        assert_eq!(parsed, chunk(["lorem", "ipsum", "dolor"]));
    }

    #[test]
    fn test_chunk_parse_rejects_empty_token() {
        assert!(Chunk::parse(["lorem", "***", "dolor"]).is_none());
    }

    #[test]
    fn test_chunk_equality_is_positional() {
        let a = chunk(["a", "b", "c"]);
        let b = chunk(["c", "b", "a"]);
        assert_ne!(a, b);
        assert_eq!(a, chunk(["a", "b", "c"]));
    }

    #[test]
    fn test_chunk_ordering_is_lexicographic() {
        assert!(chunk(["a", "b", "c"]) < chunk(["a", "b", "d"]));
        assert!(chunk(["a", "z", "z"]) < chunk(["b", "a", "a"]));
    }

    #[test]
    fn test_word_display_keeps_raw_text() {
        let word = Word::from("'Lorem,");
        assert_eq!(word.to_string(), "'Lorem,");
        assert_eq!(word.as_str(), "'Lorem,");
    }

    #[test]
    fn test_token_compares_with_str() {
        let token = Token::parse("Straße").unwrap();
        assert_eq!(token, "straße");
    }
}
