//! Role assignment.
//!
//! Binds the phrases of a [`ParsedCommand`] to world entities, producing
//! the [`Schema`] the action is validated and executed against.

use casebook_foundation::{EntityId, Role};
use casebook_world::WorldView;
use tracing::debug;

use crate::action::Action;
use crate::error::CommandError;
use crate::noun_phrase::{NounPhrase, NounResolver};
use crate::schema::Schema;
use crate::syntax::ParsedCommand;
use crate::vocabulary::Vocabulary;

/// Binds parsed phrases to entities for one actor.
pub struct RoleAssigner<'a, W: WorldView + ?Sized> {
    vocabulary: &'a Vocabulary,
    resolver: NounResolver<'a, W>,
    actor: EntityId,
}

impl<'a, W: WorldView + ?Sized> RoleAssigner<'a, W> {
    /// Creates an assigner for the given actor.
    #[must_use]
    pub fn new(vocabulary: &'a Vocabulary, world: &'a W, actor: EntityId) -> Self {
        Self {
            vocabulary,
            resolver: NounResolver::new(vocabulary, world, actor),
            actor,
        }
    }

    /// Builds the schema for a parsed command.
    ///
    /// The actor is always the agent. Prepositional phrases resolve first,
    /// in input order, then the indirect object, then the direct object.
    /// An object the verb has no role for is ignored.
    ///
    /// # Errors
    ///
    /// Returns `NotUnderstood` for a preposition the verb does not take,
    /// or the first resolution failure.
    pub fn assign(&self, parsed: &ParsedCommand) -> Result<Schema, CommandError> {
        let action = self
            .vocabulary
            .action(parsed.action)
            .ok_or(CommandError::NotUnderstood)?;
        let mut schema = Schema::new().with(Role::Agent, self.actor);

        for prep in &parsed.prep_phrases {
            let role = action
                .role_for_preposition(&prep.preposition)
                .ok_or(CommandError::NotUnderstood)?;
            self.bind(&mut schema, action, &prep.phrase, role)?;
        }
        if let (Some(phrase), Some(role)) = (&parsed.indirect_object, action.indirect_object_role()) {
            self.bind(&mut schema, action, phrase, role)?;
        }
        if let (Some(phrase), Some(role)) = (&parsed.direct_object, action.direct_object_role()) {
            self.bind(&mut schema, action, phrase, role)?;
        }

        debug!(action = action.name(), ?schema, "roles assigned");
        Ok(schema)
    }

    fn bind(
        &self,
        schema: &mut Schema,
        action: &Action,
        phrase: &NounPhrase,
        role: Role,
    ) -> Result<(), CommandError> {
        let entity = self.resolver.resolve(phrase, action.scope(role))?;
        schema.set(role, entity);
        Ok(())
    }
}
