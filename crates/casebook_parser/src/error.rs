//! Command failures.
//!
//! Every stage of the pipeline returns one of these instead of panicking.
//! Each variant renders the message the player sees; none of them ends the
//! session.

use std::fmt::Write as _;

use casebook_foundation::{EntityId, Outcome, Role, RoleSet};
use thiserror::Error;

const NOT_UNDERSTOOD: &str = "Sorry, I didn't understand that";

/// The input could not be parsed.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum SyntaxError {
    /// Nothing but whitespace was entered.
    #[error("Say something")]
    Empty,

    /// The first word is not a registered verb.
    #[error("I don't know how to {0}!")]
    UnknownVerb(String),

    /// A later word is not in the vocabulary.
    #[error("Sorry, I don't know what you mean by '{0}'")]
    UnknownWord(String),

    /// Two determiners without a noun between them.
    #[error("Sorry, I didn't understand that")]
    DuplicateDeterminer(String),

    /// Two prepositions without a noun between them.
    #[error("Sorry, I didn't understand that")]
    DuplicatePreposition(String),
}

/// One entity a reference might have meant.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Candidate {
    /// The entity.
    pub entity: EntityId,
    /// Its full display name.
    pub name: String,
}

/// Why a command was rejected.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    /// The input did not parse.
    #[error(transparent)]
    Syntax(#[from] SyntaxError),

    /// A role was filled that the verb never wires, or a preposition the
    /// verb does not take was used.
    #[error("Sorry, I didn't understand that")]
    NotUnderstood,

    /// Required roles are empty; `question` asks the player for them.
    #[error("{question}")]
    MissingRole {
        /// The clarifying question.
        question: String,
        /// Every required role left empty.
        missing: RoleSet,
    },

    /// An entity was put in a role it cannot play for this verb.
    #[error("{message}")]
    SemanticRole {
        /// The offending role.
        role: Role,
        /// The entity filling it.
        entity: EntityId,
        /// The verb's message for that role.
        message: String,
    },

    /// A reference matches several reachable entities.
    #[error("{}", render_candidates(.0))]
    Ambiguous(Vec<Candidate>),

    /// The referenced thing is not within reach.
    #[error("I don't see any {name} here")]
    Proximity {
        /// The phrase as the player wrote it.
        name: String,
    },

    /// The referenced thing is not in the actor's inventory.
    #[error("You don't have {article} {name}!")]
    Ownership {
        /// The phrase as the player wrote it.
        name: String,
        /// Article to use in the message.
        article: String,
    },
}

impl CommandError {
    /// Returns true if the failure happened before any world lookup.
    #[must_use]
    pub fn is_syntax(&self) -> bool {
        matches!(self, CommandError::Syntax(_))
    }
}

fn render_candidates(candidates: &[Candidate]) -> String {
    match candidates {
        [only] => format!("Which do you mean, the {}?", only.name),
        [first, second] => format!("Which do you mean, the {} or the {}?", first.name, second.name),
        [init @ .., last] => {
            let mut message = String::from("Which do you mean: ");
            for candidate in init {
                let _ = write!(message, "\n\tthe {},", candidate.name);
            }
            let _ = write!(message, "\n\tor the {}?", last.name);
            message
        }
        [] => NOT_UNDERSTOOD.to_string(),
    }
}

impl From<CommandError> for Outcome {
    fn from(err: CommandError) -> Self {
        Outcome::failure(err.to_string())
    }
}

impl From<SyntaxError> for Outcome {
    fn from(err: SyntaxError) -> Self {
        Outcome::failure(err.to_string())
    }
}
