//! Terminal input for the game loop.
//!
//! The REPL reads through [`LineEditor`]; the real implementation wraps
//! rustyline with verb and noun completion.

use std::borrow::Cow;

use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::highlight::{CmdKind, Highlighter};
use rustyline::hint::HistoryHinter;
use rustyline::history::DefaultHistory;
use rustyline::{Completer, Config, Context, Editor, Helper, Hinter, Validator};

use crate::error::{Result, RuntimeError};
use crate::highlight::CommandHighlighter;

/// What came back from one prompt.
#[derive(Debug)]
pub enum ReadResult {
    /// The player typed a command.
    Line(String),
    /// Ctrl+C: abandon the current line.
    Interrupted,
    /// Ctrl+D or end of input.
    Eof,
}

/// Source of player input.
///
/// Tests drive the REPL with a scripted implementation.
pub trait LineEditor {
    /// Prompts for and reads one line.
    ///
    /// # Errors
    ///
    /// Returns an error if reading from the terminal fails.
    fn read_line(&mut self, prompt: &str) -> Result<ReadResult>;

    /// Remembers a command for recall with the arrow keys.
    fn add_history(&mut self, line: &str);

    /// Set the words offered for completion.
    fn set_words(&mut self, verbs: Vec<String>, nouns: Vec<String>);
}

/// Completion, history hints and verb highlighting for rustyline.
#[derive(Helper, Completer, Hinter, Validator)]
struct CommandHelper {
    #[rustyline(Completer)]
    completer: WordCompleter,
    #[rustyline(Hinter)]
    hinter: HistoryHinter,
    highlighter: CommandHighlighter,
}

impl Highlighter for CommandHelper {
    fn highlight<'l>(&self, line: &'l str, pos: usize) -> Cow<'l, str> {
        self.highlighter.highlight(line, pos)
    }

    fn highlight_prompt<'b, 's: 'b, 'p: 'b>(
        &'s self,
        prompt: &'p str,
        default: bool,
    ) -> Cow<'b, str> {
        if default {
            Cow::Owned(format!("\x1b[1m{prompt}\x1b[0m"))
        } else {
            Cow::Borrowed(prompt)
        }
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _kind: CmdKind) -> bool {
        true
    }

    fn highlight_hint<'h>(&self, hint: &'h str) -> Cow<'h, str> {
        Cow::Owned(format!("\x1b[2m{hint}\x1b[0m"))
    }
}

/// Completes verbs in the first position and nouns everywhere else.
#[derive(Default)]
struct WordCompleter {
    verbs: Vec<String>,
    nouns: Vec<String>,
}

impl WordCompleter {
    fn candidates(&self, line: &str, pos: usize) -> (usize, Vec<Pair>) {
        let start = line[..pos]
            .rfind(char::is_whitespace)
            .map_or(0, |i| i + 1);
        let word = line[start..pos].to_lowercase();
        let pool = if line[..start].trim().is_empty() {
            &self.verbs
        } else {
            &self.nouns
        };

        let candidates = pool
            .iter()
            .filter(|w| w.starts_with(&word))
            .map(|w| Pair {
                display: w.clone(),
                replacement: w.clone(),
            })
            .collect();
        (start, candidates)
    }
}

impl Completer for WordCompleter {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        Ok(self.candidates(line, pos))
    }
}

/// A [`LineEditor`] on top of rustyline.
pub struct RustylineEditor {
    editor: Editor<CommandHelper, DefaultHistory>,
}

impl RustylineEditor {
    /// Creates the editor with completion installed but no words yet.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal cannot be set up.
    pub fn new() -> Result<Self> {
        let config = Config::builder()
            .auto_add_history(false)
            .max_history_size(1000)
            .map_err(|e| RuntimeError::Editor(e.to_string()))?
            .build();

        let helper = CommandHelper {
            completer: WordCompleter::default(),
            hinter: HistoryHinter::new(),
            highlighter: CommandHighlighter::default(),
        };

        let mut editor =
            Editor::with_config(config).map_err(|e| RuntimeError::Editor(e.to_string()))?;
        editor.set_helper(Some(helper));

        Ok(Self { editor })
    }
}

impl LineEditor for RustylineEditor {
    fn read_line(&mut self, prompt: &str) -> Result<ReadResult> {
        match self.editor.readline(prompt) {
            Ok(line) => Ok(ReadResult::Line(line)),
            Err(ReadlineError::Interrupted) => Ok(ReadResult::Interrupted),
            Err(ReadlineError::Eof) => Ok(ReadResult::Eof),
            Err(e) => Err(RuntimeError::Editor(e.to_string())),
        }
    }

    fn add_history(&mut self, line: &str) {
        let _ = self.editor.add_history_entry(line);
    }

    fn set_words(&mut self, verbs: Vec<String>, nouns: Vec<String>) {
        if let Some(helper) = self.editor.helper_mut() {
            helper.highlighter.set_verbs(verbs.iter().cloned());
            helper.completer.verbs = verbs;
            helper.completer.nouns = nouns;
        }
    }
}
