//! Vocabulary registry.
//!
//! Catalogs of nouns, actions (verbs) and modifiers (adjectives), each
//! entry with a stable identity and a name/alias lookup, plus the closed
//! sets of determiners and prepositions.
//!
//! Registration is two-phase: nouns and actions are built as plain values
//! and only become visible to the parser once registered here.

use std::collections::{HashMap, HashSet};

use casebook_foundation::{
    ActionId, EntityId, Error, ModifierId, Result, Role, RoleSet, Trait, Traits,
};
use tracing::trace;

use crate::action::Action;
use crate::tokenizer::TokenClass;

/// Determiners recognized by default.
pub const DEFAULT_DETERMINERS: [&str; 4] = ["the", "a", "an", "some"];

/// Prepositions recognized by default.
pub const DEFAULT_PREPOSITIONS: [&str; 9] = ["on", "at", "to", "with", "in", "into", "from", "for", "of"];

/// A registered noun: anything a command can refer to.
#[derive(Clone, Debug)]
pub struct Noun {
    id: EntityId,
    name: String,
    aliases: Vec<String>,
    modifiers: Vec<ModifierId>,
    traits: Traits,
    description: Option<String>,
    legal: HashSet<(Role, ActionId)>,
    universal: RoleSet,
}

impl Noun {
    /// Starts building a noun with the given name.
    #[must_use]
    pub fn builder(name: impl Into<String>) -> NounBuilder {
        NounBuilder::new(name)
    }

    /// Catalog identity.
    #[must_use]
    pub fn id(&self) -> EntityId {
        self.id
    }

    /// Head word.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Alternative head words.
    #[must_use]
    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }

    /// Modifiers in display order.
    #[must_use]
    pub fn modifiers(&self) -> &[ModifierId] {
        &self.modifiers
    }

    /// Capability flags.
    #[must_use]
    pub fn traits(&self) -> Traits {
        self.traits
    }

    /// Text shown when the noun is looked at.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns true if the word is this noun's name or one of its aliases.
    #[must_use]
    pub fn is_called(&self, word: &str) -> bool {
        self.name == word || self.aliases.iter().any(|alias| alias == word)
    }

    /// Returns true if this noun may fill `role` for the given action.
    #[must_use]
    pub fn is_legal_for(&self, role: Role, action: ActionId) -> bool {
        self.universal.contains(role) || self.legal.contains(&(role, action))
    }

    /// Returns true if this noun may fill `role` for every action.
    #[must_use]
    pub fn is_universal(&self, role: Role) -> bool {
        self.universal.contains(role)
    }

    fn grant(&mut self, role: Role, action: ActionId) {
        self.legal.insert((role, action));
    }
}

/// A noun that has not been registered yet.
///
/// Legality grants name verbs by word; they are resolved against the
/// vocabulary at registration time.
#[derive(Clone, Debug)]
pub struct NounBuilder {
    name: String,
    aliases: Vec<String>,
    modifiers: Vec<String>,
    traits: Traits,
    description: Option<String>,
    grants: Vec<(Role, String)>,
    universal: RoleSet,
}

impl NounBuilder {
    /// Creates a builder for a noun with the given name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            aliases: Vec::new(),
            modifiers: Vec::new(),
            traits: Traits::none(),
            description: None,
            grants: Vec::new(),
            universal: RoleSet::empty(),
        }
    }

    /// Adds an alias.
    #[must_use]
    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.aliases.push(alias.into());
        self
    }

    /// Adds several aliases.
    #[must_use]
    pub fn with_aliases(mut self, aliases: &[&str]) -> Self {
        self.aliases.extend(aliases.iter().map(|a| (*a).to_string()));
        self
    }

    /// Adds a modifier ("golden" in "golden key").
    #[must_use]
    pub fn with_modifier(mut self, modifier: impl Into<String>) -> Self {
        self.modifiers.push(modifier.into());
        self
    }

    /// Adds capability flags.
    #[must_use]
    pub fn with_traits(mut self, traits: Traits) -> Self {
        for t in traits.iter() {
            self.traits.insert(t);
        }
        self
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Declares the noun legal in `role` for the named verb.
    #[must_use]
    pub fn legal_for(mut self, role: Role, verb: impl Into<String>) -> Self {
        self.grants.push((role, verb.into()));
        self
    }

    /// Declares the noun legal in `role` for every verb.
    #[must_use]
    pub fn legal_for_any(mut self, role: Role) -> Self {
        self.universal.insert(role);
        self
    }
}

/// A registered adjective.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Modifier {
    /// Catalog identity.
    pub id: ModifierId,
    /// The adjective.
    pub name: String,
}

/// Runtime storage for all vocabulary definitions.
#[derive(Clone, Debug)]
pub struct Vocabulary {
    nouns: Vec<Noun>,
    /// Name or alias -> nouns, in registration order
    noun_names: HashMap<String, Vec<EntityId>>,
    actions: Vec<Action>,
    /// Name or alias -> action
    verb_names: HashMap<String, ActionId>,
    modifiers: Vec<Modifier>,
    modifier_names: HashMap<String, ModifierId>,
    determiners: HashSet<String>,
    prepositions: HashSet<String>,
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self::new()
    }
}

impl Vocabulary {
    /// Creates an empty vocabulary with the default function words.
    #[must_use]
    pub fn new() -> Self {
        Self {
            nouns: Vec::new(),
            noun_names: HashMap::new(),
            actions: Vec::new(),
            verb_names: HashMap::new(),
            modifiers: Vec::new(),
            modifier_names: HashMap::new(),
            determiners: DEFAULT_DETERMINERS.iter().map(|w| (*w).to_string()).collect(),
            prepositions: DEFAULT_PREPOSITIONS.iter().map(|w| (*w).to_string()).collect(),
        }
    }

    /// Replaces the determiner and preposition sets.
    #[must_use]
    pub fn with_function_words(mut self, determiners: &[&str], prepositions: &[&str]) -> Self {
        self.determiners = determiners.iter().map(|w| (*w).to_string()).collect();
        self.prepositions = prepositions.iter().map(|w| (*w).to_string()).collect();
        self
    }

    // --- Registration ---

    /// Registers an action, making its name and aliases parseable verbs.
    ///
    /// # Errors
    ///
    /// Returns an error if the name or an alias is already taken.
    pub fn register_action(&mut self, mut action: Action) -> Result<ActionId> {
        let words: Vec<String> = std::iter::once(action.name().to_string())
            .chain(action.aliases().iter().cloned())
            .collect();
        if let Some(taken) = words.iter().find(|w| self.verb_names.contains_key(*w)) {
            return Err(Error::duplicate_verb(taken.clone()));
        }

        let id = ActionId::new(index_u32(self.actions.len()));
        action.set_id(id);
        for word in words {
            self.verb_names.insert(word, id);
        }
        self.actions.push(action);
        Ok(id)
    }

    /// Registers a noun and interns its modifiers.
    ///
    /// # Errors
    ///
    /// Returns an error if a legality grant names an unknown verb.
    pub fn register_noun(&mut self, builder: NounBuilder) -> Result<EntityId> {
        let mut legal = HashSet::new();
        for (role, verb) in &builder.grants {
            let action = self
                .verb_names
                .get(verb)
                .copied()
                .ok_or_else(|| Error::unknown_verb(verb.clone()))?;
            legal.insert((*role, action));
        }

        let id = EntityId::new(index_u32(self.nouns.len()));
        let modifiers = builder
            .modifiers
            .iter()
            .map(|m| self.intern_modifier(m))
            .collect();

        for word in std::iter::once(&builder.name).chain(&builder.aliases) {
            let ids = self.noun_names.entry(word.clone()).or_default();
            if !ids.contains(&id) {
                ids.push(id);
            }
        }

        self.nouns.push(Noun {
            id,
            name: builder.name,
            aliases: builder.aliases,
            modifiers,
            traits: builder.traits,
            description: builder.description,
            legal,
            universal: builder.universal,
        });
        Ok(id)
    }

    /// Returns the id of a modifier, registering it if needed.
    pub fn intern_modifier(&mut self, name: &str) -> ModifierId {
        if let Some(id) = self.modifier_names.get(name) {
            return *id;
        }
        let id = ModifierId::new(index_u32(self.modifiers.len()));
        self.modifiers.push(Modifier {
            id,
            name: name.to_string(),
        });
        self.modifier_names.insert(name.to_string(), id);
        id
    }

    /// Declares an already registered noun legal in `role` for a verb.
    ///
    /// # Errors
    ///
    /// Returns an error if the noun or the verb is unknown.
    pub fn grant_role(&mut self, entity: EntityId, role: Role, verb: &str) -> Result<()> {
        let action = self
            .verb_names
            .get(verb)
            .copied()
            .ok_or_else(|| Error::unknown_verb(verb))?;
        let noun = self
            .nouns
            .get_mut(entity.index() as usize)
            .ok_or_else(|| Error::unknown_entity(entity))?;
        noun.grant(role, action);
        Ok(())
    }

    // --- Classification ---

    /// Returns true if the word is a determiner.
    #[must_use]
    pub fn is_determiner(&self, word: &str) -> bool {
        self.determiners.contains(word)
    }

    /// Returns true if the word is a preposition.
    #[must_use]
    pub fn is_preposition(&self, word: &str) -> bool {
        self.prepositions.contains(word)
    }

    /// Returns true if the word names or aliases a noun.
    #[must_use]
    pub fn is_noun(&self, word: &str) -> bool {
        self.noun_names.contains_key(word)
    }

    /// Returns true if the word is a registered modifier.
    #[must_use]
    pub fn is_adjective(&self, word: &str) -> bool {
        self.modifier_names.contains_key(word)
    }

    /// Returns true if the word names or aliases an action.
    #[must_use]
    pub fn is_verb(&self, word: &str) -> bool {
        self.verb_names.contains_key(word)
    }

    /// Classifies a word.
    ///
    /// Precedence is determiner, preposition, noun, adjective, verb, so a
    /// word registered as both noun and adjective classifies as a noun.
    #[must_use]
    pub fn classify(&self, word: &str) -> TokenClass {
        let class = if self.is_determiner(word) {
            TokenClass::Determiner
        } else if self.is_preposition(word) {
            TokenClass::Preposition
        } else if self.is_noun(word) {
            TokenClass::Noun
        } else if self.is_adjective(word) {
            TokenClass::Adjective
        } else if self.is_verb(word) {
            TokenClass::Verb
        } else {
            TokenClass::Unknown
        };
        trace!(word, ?class, "classified");
        class
    }

    // --- Lookup ---

    /// All nouns whose name or alias equals the word, in registration order.
    #[must_use]
    pub fn lookup_nouns_by_name(&self, word: &str) -> &[EntityId] {
        self.noun_names
            .get(word)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// The action a verb word names.
    #[must_use]
    pub fn lookup_verb_by_name(&self, word: &str) -> Option<&Action> {
        let id = self.verb_names.get(word)?;
        self.action(*id)
    }

    /// A modifier by identity.
    #[must_use]
    pub fn lookup_adjective(&self, id: ModifierId) -> Option<&Modifier> {
        self.modifiers.get(id.index() as usize)
    }

    /// A noun by identity.
    #[must_use]
    pub fn noun(&self, id: EntityId) -> Option<&Noun> {
        self.nouns.get(id.index() as usize)
    }

    /// All registered nouns.
    pub fn nouns(&self) -> impl Iterator<Item = &Noun> {
        self.nouns.iter()
    }

    /// An action by identity.
    #[must_use]
    pub fn action(&self, id: ActionId) -> Option<&Action> {
        self.actions.get(id.index() as usize)
    }

    /// Mutable access to an action, to add consequences during setup.
    pub fn action_mut(&mut self, id: ActionId) -> Option<&mut Action> {
        self.actions.get_mut(id.index() as usize)
    }

    /// Identity of the action a verb word names.
    #[must_use]
    pub fn verb_id(&self, word: &str) -> Option<ActionId> {
        self.verb_names.get(word).copied()
    }

    /// Canonical names of every action, in registration order.
    pub fn verb_names(&self) -> impl Iterator<Item = &str> {
        self.actions.iter().map(Action::name)
    }

    /// Names of a noun's modifiers, in display order.
    #[must_use]
    pub fn modifier_names(&self, id: EntityId) -> Vec<&str> {
        self.noun(id)
            .map(|noun| {
                noun.modifiers
                    .iter()
                    .filter_map(|m| self.lookup_adjective(*m))
                    .map(|m| m.name.as_str())
                    .collect()
            })
            .unwrap_or_default()
    }

    // --- Legality ---

    /// Returns true if the entity may fill `role` for the action.
    #[must_use]
    pub fn is_legal_for(&self, entity: EntityId, role: Role, action: ActionId) -> bool {
        self.noun(entity)
            .is_some_and(|noun| noun.is_legal_for(role, action))
    }

    // --- Display ---

    /// Modifiers followed by the name ("golden key").
    ///
    /// Unknown entities render as their id.
    #[must_use]
    pub fn full_name(&self, id: EntityId) -> String {
        let Some(noun) = self.noun(id) else {
            return id.to_string();
        };
        let mut words = self.modifier_names(id);
        words.push(&noun.name);
        words.join(" ")
    }

    /// Indefinite article: "some" for composite nouns, otherwise "an" or
    /// "a" by the first letter of the first displayed word.
    #[must_use]
    pub fn article(&self, id: EntityId) -> &'static str {
        let Some(noun) = self.noun(id) else {
            return "a";
        };
        if noun.traits.is_composite() {
            return "some";
        }
        let first = self
            .modifier_names(id)
            .first()
            .copied()
            .unwrap_or(noun.name.as_str());
        match first.chars().next() {
            Some('a' | 'e' | 'i' | 'o' | 'u') => "an",
            _ => "a",
        }
    }

    /// "are" for plural nouns, "is" otherwise.
    #[must_use]
    pub fn existential(&self, id: EntityId) -> &'static str {
        match self.noun(id) {
            Some(noun) if noun.traits.has(Trait::Plural) => "are",
            _ => "is",
        }
    }
}

fn index_u32(len: usize) -> u32 {
    u32::try_from(len).unwrap_or(u32::MAX)
}
