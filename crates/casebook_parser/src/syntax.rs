//! Syntax parsing.
//!
//! Turns a line of input into a [`ParsedCommand`]: the verb, the direct
//! and indirect object phrases and the prepositional phrases. Words are
//! consumed left to right; nothing here looks at the world.

use std::collections::BTreeSet;
use std::mem;

use casebook_foundation::ActionId;
use tracing::debug;

use crate::error::SyntaxError;
use crate::noun_phrase::{NounPhrase, PrepPhrase};
use crate::tokenizer::{InputTokenizer, TokenClass};
use crate::vocabulary::Vocabulary;

/// The syntactic shape of one command.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParsedCommand {
    /// The verb as typed.
    pub verb: String,
    /// The action the verb names.
    pub action: ActionId,
    /// Direct object phrase.
    pub direct_object: Option<NounPhrase>,
    /// Indirect object phrase ("villager" in "give villager apple").
    pub indirect_object: Option<NounPhrase>,
    /// Prepositional phrases in input order.
    pub prep_phrases: Vec<PrepPhrase>,
}

/// Parses input against a vocabulary.
pub struct SyntaxParser<'a> {
    vocabulary: &'a Vocabulary,
}

impl<'a> SyntaxParser<'a> {
    /// Creates a parser over a vocabulary.
    #[must_use]
    pub fn new(vocabulary: &'a Vocabulary) -> Self {
        Self { vocabulary }
    }

    /// Parses one line of input.
    ///
    /// The first word must be a verb. Each later word is a determiner, a
    /// preposition, a noun or an adjective, checked in that order.
    /// Adjectives accumulate until a noun closes the phrase. A noun after a
    /// preposition closes a prepositional phrase; the first free noun is
    /// the direct object. A second free noun becomes the direct object with
    /// the first demoted to indirect object if the verb takes one, or
    /// otherwise absorbs the first as a modifier when that word is also an
    /// adjective ("apple core"). Failing both, the second noun is dropped
    /// and the first stays the direct object.
    ///
    /// # Errors
    ///
    /// Returns a syntax error for empty input, an unknown verb or word, or
    /// a doubled determiner or preposition.
    pub fn parse(&self, input: &str) -> Result<ParsedCommand, SyntaxError> {
        let words = InputTokenizer::tokenize(input);
        let Some((verb, rest)) = words.split_first() else {
            return Err(SyntaxError::Empty);
        };
        let unknown_verb = || SyntaxError::UnknownVerb(verb.clone());
        let action_id = self.vocabulary.verb_id(verb).ok_or_else(unknown_verb)?;
        let action = self.vocabulary.action(action_id).ok_or_else(unknown_verb)?;

        let mut determiner: Option<&str> = None;
        let mut preposition: Option<&str> = None;
        let mut modifiers = BTreeSet::new();
        let mut direct_object: Option<NounPhrase> = None;
        let mut indirect_object = None;
        let mut prep_phrases = Vec::new();

        for word in rest {
            match self.vocabulary.classify(word) {
                TokenClass::Determiner => {
                    if determiner.is_some() {
                        return Err(SyntaxError::DuplicateDeterminer(word.clone()));
                    }
                    determiner = Some(word.as_str());
                }
                TokenClass::Preposition => {
                    if preposition.is_some() {
                        return Err(SyntaxError::DuplicatePreposition(word.clone()));
                    }
                    preposition = Some(word.as_str());
                }
                TokenClass::Noun => {
                    determiner = None;
                    let mut phrase = NounPhrase {
                        noun: word.clone(),
                        modifiers: mem::take(&mut modifiers),
                    };
                    if let Some(prep) = preposition.take() {
                        prep_phrases.push(PrepPhrase {
                            preposition: prep.to_string(),
                            phrase,
                        });
                    } else if let Some(previous) = direct_object.take() {
                        if action.indirect_object_role().is_some() {
                            indirect_object = Some(previous);
                        } else if self.vocabulary.is_adjective(&previous.noun) {
                            phrase.modifiers.extend(previous.modifiers);
                            phrase.modifiers.insert(previous.noun);
                        } else {
                            debug!(noun = %word, "dropping unattached noun");
                            direct_object = Some(previous);
                            continue;
                        }
                        direct_object = Some(phrase);
                    } else {
                        direct_object = Some(phrase);
                    }
                }
                TokenClass::Adjective => {
                    modifiers.insert(word.clone());
                }
                TokenClass::Verb | TokenClass::Unknown => {
                    return Err(SyntaxError::UnknownWord(word.clone()));
                }
            }
        }

        let parsed = ParsedCommand {
            verb: verb.clone(),
            action: action_id,
            direct_object,
            indirect_object,
            prep_phrases,
        };
        debug!(?parsed, "parsed command");
        Ok(parsed)
    }
}
