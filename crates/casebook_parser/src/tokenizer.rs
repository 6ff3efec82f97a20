//! Input tokenization.
//!
//! Splits raw player input on whitespace. Each word is later classified
//! against the vocabulary into exactly one [`TokenClass`].

/// The grammatical class of a word, as far as the vocabulary knows.
///
/// A word may be registered as both a noun and an adjective ("apple" in
/// "apple core"); classification resolves that by precedence, see
/// [`Vocabulary::classify`](crate::vocabulary::Vocabulary::classify).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TokenClass {
    /// the, a, an, some
    Determiner,
    /// on, at, to, with, ...
    Preposition,
    /// Names or aliases a registered noun.
    Noun,
    /// Names a registered modifier.
    Adjective,
    /// Names or aliases a registered action.
    Verb,
    /// Not in the vocabulary.
    Unknown,
}

/// Splits player input into lowercase words.
pub struct InputTokenizer;

impl InputTokenizer {
    /// Tokenizes a raw input string into words.
    ///
    /// - Splits on any whitespace
    /// - Converts words to lowercase
    #[must_use]
    pub fn tokenize(input: &str) -> Vec<String> {
        input.split_whitespace().map(str::to_lowercase).collect()
    }
}
