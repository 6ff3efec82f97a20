//! The game loop: prompt, respond, repeat until the player quits or dies.

use std::io::{self, BufRead, Write};

use tracing::{debug, info};

use crate::editor::{LineEditor, ReadResult, RustylineEditor};
use crate::error::Result;
use crate::session::{Response, Session};

/// Words that end the game.
const QUIT_WORDS: [&str; 4] = ["exit", "quit", "end", "done"];

/// Printed when the player dies.
pub const DEATH_MESSAGE: &str = "You have died ... ";

/// An interactive game on a terminal.
pub struct Repl<E: LineEditor = RustylineEditor> {
    /// Where commands come from.
    editor: E,

    /// The game being played.
    session: Session,

    /// Print the configured banner before the opening text.
    show_banner: bool,
}

impl Repl<RustylineEditor> {
    /// Creates a new REPL with the default rustyline editor.
    ///
    /// # Errors
    ///
    /// Returns an error if the editor fails to initialize.
    pub fn new(session: Session) -> Result<Self> {
        let editor = RustylineEditor::new()?;
        Ok(Self::with_editor(editor, session))
    }
}

impl<E: LineEditor> Repl<E> {
    /// Creates a new REPL with the given editor.
    pub fn with_editor(mut editor: E, session: Session) -> Self {
        let vocabulary = session.interpreter().vocabulary();
        let verbs = vocabulary.verb_names().map(str::to_string).collect();
        let nouns = vocabulary
            .nouns()
            .map(|noun| noun.name().to_string())
            .collect();
        editor.set_words(verbs, nouns);
        Self {
            editor,
            session,
            show_banner: true,
        }
    }

    /// Disables the welcome banner.
    #[must_use]
    pub const fn without_banner(mut self) -> Self {
        self.show_banner = false;
        self
    }

    /// Returns a reference to the session.
    #[must_use]
    pub const fn session(&self) -> &Session {
        &self.session
    }

    /// Returns a mutable reference to the session.
    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    /// Runs the REPL loop on standard output.
    ///
    /// # Errors
    ///
    /// Returns an error if reading input or writing output fails.
    pub fn run(&mut self) -> Result<()> {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        self.run_with(&mut out)
    }

    /// Runs the REPL loop, writing everything to `out`.
    ///
    /// # Errors
    ///
    /// Returns an error if reading input or writing output fails.
    pub fn run_with(&mut self, out: &mut impl Write) -> Result<()> {
        if self.show_banner {
            self.print_banner(out)?;
        }
        writeln!(out, "{}", self.session.opening())?;

        loop {
            let prompt = self.session.config().prompt.clone();
            let line = match self.editor.read_line(&prompt)? {
                ReadResult::Line(line) => line,
                ReadResult::Interrupted => continue,
                ReadResult::Eof => break,
            };

            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }
            self.editor.add_history(trimmed);

            if QUIT_WORDS.contains(&trimmed.to_lowercase().as_str()) {
                debug!("player quit");
                break;
            }

            let response = self.session.respond(trimmed);
            print_response(out, &response)?;

            if self.session.is_over() {
                writeln!(out, "{DEATH_MESSAGE}")?;
                break;
            }
        }

        writeln!(out, "{}", self.session.status())?;
        out.flush()?;
        info!(turns = self.session.turns(), "game over");
        Ok(())
    }

    fn print_banner(&self, out: &mut impl Write) -> Result<()> {
        if let Some(banner) = &self.session.config().banner {
            writeln!(out, "\x1b[1;36m{banner}\x1b[0m")?;
            writeln!(out, "Type 'help' for a list of commands. Use Ctrl+D to exit.\n")?;
        }
        Ok(())
    }
}

/// Plays a game from a script, one command per line.
///
/// Each command is echoed after the prompt, followed by the response. Play
/// stops at the end of input, at a quit word or when the player dies.
///
/// # Errors
///
/// Returns an error if reading input or writing output fails.
pub fn run_batch(session: &mut Session, input: impl BufRead, out: &mut impl Write) -> Result<()> {
    writeln!(out, "{}", session.opening())?;
    for line in input.lines() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        writeln!(out, "{}{trimmed}", session.config().prompt)?;
        if QUIT_WORDS.contains(&trimmed.to_lowercase().as_str()) {
            break;
        }

        let response = session.respond(trimmed);
        print_response(out, &response)?;
        if session.is_over() {
            writeln!(out, "{DEATH_MESSAGE}")?;
            break;
        }
    }
    writeln!(out, "{}", session.status())?;
    out.flush()?;
    Ok(())
}

fn print_response(out: &mut impl Write, response: &Response) -> Result<()> {
    match response {
        Response::Silent => {}
        Response::Rejected(err) => writeln!(out, "{err}")?,
        Response::Meta(text) | Response::Executed { text, .. } => writeln!(out, "{text}")?,
    }
    Ok(())
}
