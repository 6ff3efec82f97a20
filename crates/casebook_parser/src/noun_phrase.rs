//! Noun phrase representation and resolution.
//!
//! Handles phrases like "golden key" and resolves them to a single world
//! entity the actor can reach.

use std::collections::BTreeSet;

use casebook_foundation::{EntityId, Scope};
use casebook_world::WorldView;
use tracing::debug;

use crate::error::{Candidate, CommandError};
use crate::scope::Reach;
use crate::vocabulary::Vocabulary;

/// A parsed noun phrase: a head noun and an unordered set of modifiers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NounPhrase {
    /// The head word (e.g., "key" in "golden key")
    pub noun: String,
    /// Modifier words; order in the input is irrelevant
    pub modifiers: BTreeSet<String>,
}

impl NounPhrase {
    /// Creates a phrase with just a noun.
    #[must_use]
    pub fn new(noun: impl Into<String>) -> Self {
        Self {
            noun: noun.into(),
            modifiers: BTreeSet::new(),
        }
    }

    /// Adds a modifier.
    #[must_use]
    pub fn with_modifier(mut self, modifier: impl Into<String>) -> Self {
        self.modifiers.insert(modifier.into());
        self
    }

    /// The phrase as shown in messages: modifiers, then the noun.
    #[must_use]
    pub fn text(&self) -> String {
        self.modifiers
            .iter()
            .map(String::as_str)
            .chain(std::iter::once(self.noun.as_str()))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// A noun phrase governed by a preposition ("with the golden key").
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PrepPhrase {
    /// The preposition
    pub preposition: String,
    /// The governed phrase
    pub phrase: NounPhrase,
}

/// Resolves noun phrases to entities, relative to one actor.
pub struct NounResolver<'a, W: WorldView + ?Sized> {
    vocabulary: &'a Vocabulary,
    world: &'a W,
    actor: EntityId,
}

impl<'a, W: WorldView + ?Sized> NounResolver<'a, W> {
    /// Creates a resolver for the given actor.
    #[must_use]
    pub fn new(vocabulary: &'a Vocabulary, world: &'a W, actor: EntityId) -> Self {
        Self {
            vocabulary,
            world,
            actor,
        }
    }

    /// Resolves a phrase to a single entity within `scope`.
    ///
    /// 1. Collect nouns named or aliased by the head word.
    /// 2. A single name match is the unambiguous candidate.
    /// 3. Otherwise modifiers narrow the matches to those whose own
    ///    modifiers are a superset of the phrase's.
    /// 4. Matches are sorted by reach and the scope picks the pool.
    ///
    /// # Errors
    ///
    /// Returns a proximity or ownership failure when nothing suitable is
    /// in reach, or an ambiguity failure listing every reachable match.
    pub fn resolve(&self, phrase: &NounPhrase, scope: Scope) -> Result<EntityId, CommandError> {
        let mut matches = self.vocabulary.lookup_nouns_by_name(&phrase.noun).to_vec();
        let mut unambiguous = match matches.as_slice() {
            [only] => Some(*only),
            _ => None,
        };

        if unambiguous.is_none() && !phrase.modifiers.is_empty() {
            let by_modifier: Vec<EntityId> = matches
                .iter()
                .copied()
                .filter(|entity| self.has_modifiers(*entity, &phrase.modifiers))
                .collect();
            match by_modifier.len() {
                0 => {}
                1 => unambiguous = Some(by_modifier[0]),
                _ => matches = by_modifier,
            }
        }

        let reach = Reach::survey(self.world, self.actor, &matches);
        let available = reach.available(scope);
        debug!(
            phrase = %phrase.text(),
            ?scope,
            ?unambiguous,
            ?available,
            "resolving noun phrase"
        );

        if let Some(candidate) = unambiguous {
            if available.contains(&candidate) {
                return Ok(candidate);
            }
            let ubiquitous = self
                .vocabulary
                .noun(candidate)
                .is_some_and(|noun| noun.traits().is_ubiquitous());
            if ubiquitous {
                return Ok(candidate);
            }
            let article = self.missing_article(candidate, &reach);
            return Err(scope_failure(phrase, scope, article));
        }

        match available.as_slice() {
            [] => Err(scope_failure(phrase, scope, "a".to_string())),
            [only] => Ok(*only),
            many => Err(CommandError::Ambiguous(
                many.iter()
                    .map(|entity| Candidate {
                        entity: *entity,
                        name: self.vocabulary.full_name(*entity),
                    })
                    .collect(),
            )),
        }
    }

    fn has_modifiers(&self, entity: EntityId, wanted: &BTreeSet<String>) -> bool {
        let own = self.vocabulary.modifier_names(entity);
        wanted.iter().all(|m| own.contains(&m.as_str()))
    }

    /// Article for an unambiguous candidate that is out of scope.
    fn missing_article(&self, candidate: EntityId, reach: &Reach) -> String {
        let composite = self
            .vocabulary
            .noun(candidate)
            .is_some_and(|noun| noun.traits().is_composite());
        if reach.nearby().contains(&candidate) {
            "the".to_string()
        } else if composite {
            "any".to_string()
        } else {
            self.vocabulary.article(candidate).to_string()
        }
    }
}

fn scope_failure(phrase: &NounPhrase, scope: Scope, article: String) -> CommandError {
    let name = phrase.text();
    if scope == Scope::Inventory {
        CommandError::Ownership { name, article }
    } else {
        CommandError::Proximity { name }
    }
}
