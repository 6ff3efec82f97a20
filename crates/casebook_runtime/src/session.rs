//! Session state for a game.
//!
//! The session holds the interpreter, the live world and the player, and
//! keeps the bookkeeping around them: turns, command history and the RNG
//! that picks between message variants.

use std::collections::VecDeque;
use std::fmt::Write as _;

use casebook_foundation::{EntityId, Outcome};
use casebook_parser::{CommandError, Interpreter};
use casebook_world::World;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info};

use crate::config::SessionConfig;

/// What the session made of one line of input.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Response {
    /// Blank input; nothing to say.
    Silent,
    /// A session command such as `help` or `score`.
    Meta(String),
    /// The command was rejected before anything ran.
    Rejected(CommandError),
    /// The command ran.
    Executed {
        /// Everything the action produced.
        outcome: Outcome,
        /// The message variant chosen for display.
        text: String,
    },
}

impl Response {
    /// The text to show the player.
    #[must_use]
    pub fn text(&self) -> String {
        match self {
            Response::Silent => String::new(),
            Response::Meta(text) | Response::Executed { text, .. } => text.clone(),
            Response::Rejected(err) => err.to_string(),
        }
    }

    /// Returns true if the command ran.
    #[must_use]
    pub fn is_executed(&self) -> bool {
        matches!(self, Response::Executed { .. })
    }
}

/// One game in progress.
pub struct Session {
    interpreter: Interpreter,
    world: World,
    player: EntityId,
    config: SessionConfig,
    turns: u64,
    history: VecDeque<String>,
    rng: ChaCha8Rng,
}

impl Session {
    /// Creates a session.
    #[must_use]
    pub fn new(interpreter: Interpreter, world: World, player: EntityId, config: SessionConfig) -> Self {
        let rng = ChaCha8Rng::seed_from_u64(config.seed);
        Self {
            interpreter,
            world,
            player,
            history: VecDeque::with_capacity(config.history_len),
            config,
            turns: 0,
            rng,
        }
    }

    /// The interpreter.
    #[must_use]
    pub const fn interpreter(&self) -> &Interpreter {
        &self.interpreter
    }

    /// Mutable access to the interpreter, for registering consequences.
    pub fn interpreter_mut(&mut self) -> &mut Interpreter {
        &mut self.interpreter
    }

    /// The current world.
    #[must_use]
    pub const fn world(&self) -> &World {
        &self.world
    }

    /// Mutable access to the world.
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// The player entity.
    #[must_use]
    pub const fn player(&self) -> EntityId {
        self.player
    }

    /// The configuration.
    #[must_use]
    pub const fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Commands that have run so far.
    #[must_use]
    pub const fn turns(&self) -> u64 {
        self.turns
    }

    /// Recent input, oldest first.
    pub fn history(&self) -> impl Iterator<Item = &str> {
        self.history.iter().map(String::as_str)
    }

    /// Returns true once the player has died.
    #[must_use]
    pub fn is_over(&self) -> bool {
        self.world.health(self.player).is_some_and(|health| health <= 0)
    }

    /// The opening description of the player's surroundings.
    pub fn opening(&mut self) -> String {
        match self.interpreter.try_interpret("look", self.player, &mut self.world) {
            Ok(outcome) => outcome.message().to_string(),
            Err(err) => err.to_string(),
        }
    }

    /// Handles one line of input.
    ///
    /// Session commands are answered directly. Anything else goes through
    /// the interpreter; only commands that actually run advance the turn
    /// counter.
    pub fn respond(&mut self, input: &str) -> Response {
        let line = input.trim();
        if line.is_empty() {
            return Response::Silent;
        }

        let response = match line.to_lowercase().as_str() {
            "help" => Response::Meta(self.help()),
            "history" => Response::Meta(self.render_history()),
            "status" | "score" => Response::Meta(self.status()),
            _ => self.run(line),
        };
        self.remember(line);
        response
    }

    fn run(&mut self, line: &str) -> Response {
        match self.interpreter.try_interpret(line, self.player, &mut self.world) {
            Ok(outcome) => {
                self.turns += 1;
                let index = self.rng.gen_range(0..outcome.messages().len());
                let text = outcome.variant(index).to_string();
                debug!(turn = self.turns, index, "command executed");
                if self.is_over() {
                    info!(turns = self.turns, "player died");
                }
                Response::Executed { outcome, text }
            }
            Err(err) => Response::Rejected(err),
        }
    }

    fn remember(&mut self, line: &str) {
        if self.config.history_len == 0 {
            return;
        }
        while self.history.len() >= self.config.history_len {
            self.history.pop_front();
        }
        self.history.push_back(line.to_string());
    }

    /// The verb list.
    #[must_use]
    pub fn help(&self) -> String {
        let verbs: Vec<&str> = self.interpreter.vocabulary().verb_names().collect();
        format!("Available commands are: \n{}", verbs.join(", "))
    }

    /// Score and turn count.
    #[must_use]
    pub fn status(&self) -> String {
        format!(
            "You have a score of {} after {} turns",
            self.world.score(),
            self.turns
        )
    }

    fn render_history(&self) -> String {
        let mut text = String::from("Recent command history: \n");
        if self.history.is_empty() {
            text.push_str("(no commands yet entered)");
        }
        for line in &self.history {
            let _ = write!(text, "\n|{}{line}", self.config.prompt);
        }
        text.push('\n');
        text
    }
}
