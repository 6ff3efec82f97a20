//! Action contracts, validation and execution.
//!
//! An [`Action`] is the immutable contract of a verb: which grammatical
//! positions fill which roles, which roles are required, the scope each
//! role resolves in, and the effect to run. Actions are built with
//! [`Action::builder`] and become parseable once registered in a
//! [`Vocabulary`].

use std::fmt;
use std::sync::Arc;

use casebook_foundation::{ActionId, EntityId, Error, Outcome, Result, Role, RoleSet, Scope};
use casebook_world::{World, WorldView};
use tracing::debug;

use crate::consequence::{ConsequenceRule, ConsequenceTable};
use crate::error::CommandError;
use crate::schema::Schema;
use crate::vocabulary::Vocabulary;

/// Effect callback of an action.
pub type Effect = Arc<dyn Fn(&Schema, &mut Scene<'_>) -> Outcome + Send + Sync>;

/// What an effect may touch while it runs.
pub struct Scene<'a> {
    /// The live world, mutated in place.
    pub world: &'a mut World,
    /// The vocabulary, for names and traits.
    pub vocabulary: &'a Vocabulary,
}

impl<'a> Scene<'a> {
    /// Creates a scene.
    #[must_use]
    pub fn new(world: &'a mut World, vocabulary: &'a Vocabulary) -> Self {
        Self { world, vocabulary }
    }

    /// Full display name of an entity.
    #[must_use]
    pub fn name(&self, entity: EntityId) -> String {
        self.vocabulary.full_name(entity)
    }
}

/// Default scopes in role order.
const DEFAULT_SCOPES: [Scope; 5] = [
    Scope::Nearby,
    Scope::Nearby,
    Scope::Nearby,
    Scope::Nearby,
    Scope::Inventory,
];

/// Default messages for an entity that cannot play a role, in role order.
const DEFAULT_MESSAGES: [&str; 5] = [
    "How disappointing! Behavior of that sort is hardly appropriate for a noble adventurer such as yourself!",
    "You can't do that to the {}",
    "That is not the kind of thing you do with a {}",
    "You can't {} there",
    "The {} is not well-designed for that task",
];

/// A verb's contract.
#[derive(Clone)]
pub struct Action {
    id: Option<ActionId>,
    name: String,
    aliases: Vec<String>,
    prepositions: Vec<(String, Role)>,
    direct_object: Option<Role>,
    indirect_object: Option<Role>,
    required: RoleSet,
    permissive: RoleSet,
    scopes: [Scope; 5],
    messages: [String; 5],
    effect: Option<Effect>,
    consequences: ConsequenceTable,
}

impl fmt::Debug for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Action")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("aliases", &self.aliases)
            .field("prepositions", &self.prepositions)
            .field("direct_object", &self.direct_object)
            .field("indirect_object", &self.indirect_object)
            .field("required", &self.required)
            .field("permissive", &self.permissive)
            .field("consequences", &self.consequences.len())
            .finish_non_exhaustive()
    }
}

impl Action {
    /// Starts building an action.
    #[must_use]
    pub fn builder(name: impl Into<String>) -> ActionBuilder {
        ActionBuilder::new(name)
    }

    /// Identity assigned at registration, if registered.
    #[must_use]
    pub fn id(&self) -> Option<ActionId> {
        self.id
    }

    pub(crate) fn set_id(&mut self, id: ActionId) {
        self.id = Some(id);
    }

    /// Canonical verb.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Synonym verbs.
    #[must_use]
    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }

    /// Role filled by the direct object.
    #[must_use]
    pub fn direct_object_role(&self) -> Option<Role> {
        self.direct_object
    }

    /// Role filled by the indirect object.
    #[must_use]
    pub fn indirect_object_role(&self) -> Option<Role> {
        self.indirect_object
    }

    /// Role a preposition introduces, if this verb takes it.
    #[must_use]
    pub fn role_for_preposition(&self, preposition: &str) -> Option<Role> {
        self.prepositions
            .iter()
            .find(|(p, _)| p == preposition)
            .map(|(_, role)| *role)
    }

    /// Roles that must be filled.
    #[must_use]
    pub fn required_roles(&self) -> RoleSet {
        self.required
    }

    /// Roles exempt from the legality check.
    #[must_use]
    pub fn permissive_roles(&self) -> RoleSet {
        self.permissive
    }

    /// Scope a role resolves in.
    #[must_use]
    pub fn scope(&self, role: Role) -> Scope {
        self.scopes[role.slot()]
    }

    /// Roles the grammar can reach: the agent, the objects and every
    /// preposition.
    #[must_use]
    pub fn wired_roles(&self) -> RoleSet {
        wired(self.direct_object, self.indirect_object, &self.prepositions)
    }

    /// Message for an entity that cannot play `role`, naming it.
    #[must_use]
    pub fn role_message(&self, role: Role, name: &str) -> String {
        self.messages[role.slot()].replacen("{}", name, 1)
    }

    /// The consequences registered so far.
    #[must_use]
    pub fn consequences(&self) -> &ConsequenceTable {
        &self.consequences
    }

    /// Adds a consequence.
    pub fn add_consequence(&mut self, rule: ConsequenceRule) {
        self.consequences.register(rule);
    }

    /// Checks a schema against this contract.
    ///
    /// Roles are checked in [`Role::ALL`] order. A filled role the grammar
    /// never wires, or the first filled required role whose entity is not
    /// legal for it, rejects at once. Empty required roles are collected
    /// and turned into a clarifying question.
    ///
    /// Validation has no side effects.
    ///
    /// # Errors
    ///
    /// Returns the rejection.
    pub fn validate(&self, schema: &Schema, vocabulary: &Vocabulary) -> std::result::Result<(), CommandError> {
        let wired = self.wired_roles();
        let mut missing = RoleSet::empty();

        for role in Role::ALL {
            let filled = schema.get(role);
            if filled.is_some() && !wired.contains(role) {
                return Err(CommandError::NotUnderstood);
            }
            if !self.required.contains(role) {
                continue;
            }
            match filled {
                None => missing.insert(role),
                Some(entity) => {
                    if !self.permissive.contains(role) && !self.is_legal(vocabulary, entity, role) {
                        let message = self.role_message(role, &vocabulary.full_name(entity));
                        debug!(action = %self.name, %role, %entity, "illegal role filler");
                        return Err(CommandError::SemanticRole {
                            role,
                            entity,
                            message,
                        });
                    }
                }
            }
        }

        if missing.is_empty() {
            Ok(())
        } else {
            Err(self.missing_role_question(schema, missing, vocabulary))
        }
    }

    fn is_legal(&self, vocabulary: &Vocabulary, entity: EntityId, role: Role) -> bool {
        let Some(noun) = vocabulary.noun(entity) else {
            return false;
        };
        noun.is_universal(role) || self.id.is_some_and(|id| noun.is_legal_for(role, id))
    }

    fn missing_role_question(&self, schema: &Schema, missing: RoleSet, vocabulary: &Vocabulary) -> CommandError {
        let preposition = self
            .prepositions
            .iter()
            .rev()
            .find(|(_, role)| missing.contains(*role))
            .map(|(p, _)| format!(" {p}"))
            .unwrap_or_default();

        let patient_form = || format!("What do you want to {}{preposition}?", self.name);
        let question = if missing.contains(Role::Patient) {
            patient_form()
        } else if missing.contains(Role::Theme) || missing.contains(Role::Instrument) {
            match schema.get(Role::Patient) {
                Some(patient) => format!(
                    "What do you want to {} the {}{preposition}?",
                    self.name,
                    vocabulary.full_name(patient)
                ),
                None => patient_form(),
            }
        } else {
            return CommandError::NotUnderstood;
        };
        CommandError::MissingRole { question, missing }
    }

    /// Runs the effect, then lets the consequence table replace the
    /// outcome.
    ///
    /// An action without an effect succeeds with "Done". The location used
    /// for the consequence lookup is the agent's location after the effect
    /// has run.
    pub fn execute(&self, schema: &Schema, scene: &mut Scene<'_>) -> Outcome {
        let outcome = match &self.effect {
            Some(effect) => effect(schema, scene),
            None => Outcome::success("Done"),
        };
        let location = schema
            .get(Role::Agent)
            .and_then(|agent| scene.world.location_of(agent));
        match self
            .consequences
            .apply(schema, outcome.verdict(), location, scene)
        {
            Some(replacement) => replacement,
            None => outcome,
        }
    }

    /// Validates, then executes if the schema is acceptable.
    ///
    /// # Errors
    ///
    /// Returns the validation failure; nothing is executed in that case.
    pub fn attempt(&self, schema: &Schema, scene: &mut Scene<'_>) -> std::result::Result<Outcome, CommandError> {
        self.validate(schema, scene.vocabulary)?;
        Ok(self.execute(schema, scene))
    }
}

fn wired(direct: Option<Role>, indirect: Option<Role>, prepositions: &[(String, Role)]) -> RoleSet {
    let mut roles = RoleSet::of(&[Role::Agent]);
    roles.extend(direct);
    roles.extend(indirect);
    roles.extend(prepositions.iter().map(|(_, role)| *role));
    roles
}

/// Builder for [`Action`].
pub struct ActionBuilder {
    name: String,
    aliases: Vec<String>,
    prepositions: Vec<(String, Role)>,
    direct_object: Option<Role>,
    indirect_object: Option<Role>,
    required: RoleSet,
    permissive: RoleSet,
    scopes: [Scope; 5],
    messages: [String; 5],
    effect: Option<Effect>,
}

impl ActionBuilder {
    /// Creates a builder. Only the agent is required by default.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            aliases: Vec::new(),
            prepositions: Vec::new(),
            direct_object: None,
            indirect_object: None,
            required: RoleSet::of(&[Role::Agent]),
            permissive: RoleSet::empty(),
            scopes: DEFAULT_SCOPES,
            messages: DEFAULT_MESSAGES.map(str::to_string),
            effect: None,
        }
    }

    /// Adds synonym verbs.
    #[must_use]
    pub fn with_aliases(mut self, aliases: &[&str]) -> Self {
        self.aliases.extend(aliases.iter().map(|a| (*a).to_string()));
        self
    }

    /// Maps a preposition to the role its phrase fills.
    ///
    /// Mapping the same preposition twice replaces the earlier role.
    #[must_use]
    pub fn with_preposition(mut self, preposition: impl Into<String>, role: Role) -> Self {
        let preposition = preposition.into();
        self.prepositions.retain(|(p, _)| *p != preposition);
        self.prepositions.push((preposition, role));
        self
    }

    /// Sets the role the direct object fills.
    #[must_use]
    pub fn with_direct_object(mut self, role: Role) -> Self {
        self.direct_object = Some(role);
        self
    }

    /// Sets the role the indirect object fills.
    #[must_use]
    pub fn with_indirect_object(mut self, role: Role) -> Self {
        self.indirect_object = Some(role);
        self
    }

    /// Adds required roles.
    #[must_use]
    pub fn with_required(mut self, roles: &[Role]) -> Self {
        self.required.extend(roles.iter().copied());
        self
    }

    /// Exempts roles from the legality check.
    #[must_use]
    pub fn with_permissive(mut self, roles: &[Role]) -> Self {
        self.permissive.extend(roles.iter().copied());
        self
    }

    /// Overrides the scope a role resolves in.
    #[must_use]
    pub fn with_scope(mut self, role: Role, scope: Scope) -> Self {
        self.scopes[role.slot()] = scope;
        self
    }

    /// Overrides the message for an illegal filler; `{}` is replaced by
    /// the entity's name.
    #[must_use]
    pub fn with_message(mut self, role: Role, template: impl Into<String>) -> Self {
        self.messages[role.slot()] = template.into();
        self
    }

    /// Sets the effect.
    #[must_use]
    pub fn with_effect<F>(mut self, effect: F) -> Self
    where
        F: Fn(&Schema, &mut Scene<'_>) -> Outcome + Send + Sync + 'static,
    {
        self.effect = Some(Arc::new(effect));
        self
    }

    /// Finishes the action.
    ///
    /// # Errors
    ///
    /// Returns an error if a required role can never be filled because no
    /// object position or preposition wires it.
    pub fn build(self) -> Result<Action> {
        let wired = wired(self.direct_object, self.indirect_object, &self.prepositions);
        let unassigned: RoleSet = Role::ALL.into_iter().filter(|r| !wired.contains(*r)).collect();
        let required_unassigned = unassigned.intersection(self.required);
        if !required_unassigned.is_empty() {
            return Err(Error::invalid_roles(self.name, required_unassigned));
        }

        Ok(Action {
            id: None,
            name: self.name,
            aliases: self.aliases,
            prepositions: self.prepositions,
            direct_object: self.direct_object,
            indirect_object: self.indirect_object,
            required: self.required,
            permissive: self.permissive,
            scopes: self.scopes,
            messages: self.messages,
            effect: self.effect,
            consequences: ConsequenceTable::new(),
        })
    }
}
