//! Main interpreter pipeline.
//!
//! Orchestrates the full flow from raw input to an [`Outcome`]: syntax,
//! role assignment, validation and execution with consequences.

use casebook_foundation::{ActionId, EntityId, Error, Outcome, Result};
use casebook_world::{World, WorldView};
use tracing::{debug, info};

use crate::action::Scene;
use crate::command::RoleAssigner;
use crate::consequence::ConsequenceRule;
use crate::error::CommandError;
use crate::schema::Schema;
use crate::syntax::{ParsedCommand, SyntaxParser};
use crate::vocabulary::Vocabulary;

/// A fully interpreted command, ready to execute.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Command {
    /// The action to run.
    pub action: ActionId,
    /// The bound roles.
    pub schema: Schema,
}

/// The command interpreter.
///
/// Owns the vocabulary; the world is passed in per call so the caller
/// keeps control of its lifetime.
#[derive(Clone, Debug, Default)]
pub struct Interpreter {
    vocabulary: Vocabulary,
}

impl Interpreter {
    /// Creates an interpreter over a vocabulary.
    #[must_use]
    pub fn new(vocabulary: Vocabulary) -> Self {
        Self { vocabulary }
    }

    /// The vocabulary.
    #[must_use]
    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    /// Mutable access to the vocabulary, for registering content.
    pub fn vocabulary_mut(&mut self) -> &mut Vocabulary {
        &mut self.vocabulary
    }

    /// Parses input into its syntactic shape.
    ///
    /// # Errors
    ///
    /// Returns the syntax error.
    pub fn parse(&self, input: &str) -> std::result::Result<ParsedCommand, CommandError> {
        Ok(SyntaxParser::new(&self.vocabulary).parse(input)?)
    }

    /// Binds a parsed command's phrases to entities near the actor.
    ///
    /// # Errors
    ///
    /// Returns the first resolution failure.
    pub fn assign_roles<W: WorldView + ?Sized>(
        &self,
        parsed: &ParsedCommand,
        actor: EntityId,
        world: &W,
    ) -> std::result::Result<Schema, CommandError> {
        RoleAssigner::new(&self.vocabulary, world, actor).assign(parsed)
    }

    /// Parses and resolves input without running anything.
    ///
    /// # Errors
    ///
    /// Returns the syntax, resolution or validation failure.
    pub fn prepare<W: WorldView + ?Sized>(
        &self,
        input: &str,
        actor: EntityId,
        world: &W,
    ) -> std::result::Result<Command, CommandError> {
        let parsed = self.parse(input)?;
        let schema = self.assign_roles(&parsed, actor, world)?;
        self.validate(parsed.action, &schema)?;
        Ok(Command {
            action: parsed.action,
            schema,
        })
    }

    /// Checks a schema against an action's contract.
    ///
    /// # Errors
    ///
    /// Returns the validation failure.
    pub fn validate(&self, action: ActionId, schema: &Schema) -> std::result::Result<(), CommandError> {
        self.vocabulary
            .action(action)
            .ok_or(CommandError::NotUnderstood)?
            .validate(schema, &self.vocabulary)
    }

    /// Validates, then runs the action and its consequences.
    ///
    /// # Errors
    ///
    /// Returns the validation failure; the world is untouched in that case.
    pub fn execute(
        &self,
        action: ActionId,
        schema: &Schema,
        world: &mut World,
    ) -> std::result::Result<Outcome, CommandError> {
        let action = self
            .vocabulary
            .action(action)
            .ok_or(CommandError::NotUnderstood)?;
        let mut scene = Scene::new(world, &self.vocabulary);
        let outcome = action.attempt(schema, &mut scene)?;
        debug!(action = action.name(), ?schema, ?outcome, "executed");
        Ok(outcome)
    }

    /// Runs one line of input for an actor.
    ///
    /// Every failure is folded into a failed outcome carrying the message
    /// to show, so the caller always has something to print.
    pub fn interpret(&self, input: &str, actor: EntityId, world: &mut World) -> Outcome {
        match self.try_interpret(input, actor, world) {
            Ok(outcome) => outcome,
            Err(err) => {
                debug!(input, error = %err, "command rejected");
                err.into()
            }
        }
    }

    /// Runs one line of input, keeping the rejection typed.
    ///
    /// # Errors
    ///
    /// Returns the syntax, resolution or validation failure.
    pub fn try_interpret(
        &self,
        input: &str,
        actor: EntityId,
        world: &mut World,
    ) -> std::result::Result<Outcome, CommandError> {
        let command = self.prepare(input, actor, world)?;
        self.execute(command.action, &command.schema, world)
    }

    /// Registers a consequence on the action a verb names.
    ///
    /// # Errors
    ///
    /// Returns an error if the verb is unknown.
    pub fn register_consequence(&mut self, verb: &str, rule: ConsequenceRule) -> Result<()> {
        let id = self
            .vocabulary
            .verb_id(verb)
            .ok_or_else(|| Error::unknown_verb(verb))?;
        let action = self
            .vocabulary
            .action_mut(id)
            .ok_or_else(|| Error::unknown_action(id))?;
        action.add_consequence(rule);
        info!(verb, "consequence registered");
        Ok(())
    }
}
