//! Input highlighting for the REPL.

use std::borrow::Cow;
use std::collections::HashSet;

/// Colors the verb of a command as the player types it.
///
/// A known verb is shown in green, an unknown one in red. The rest of the
/// line is left alone.
#[derive(Clone, Debug, Default)]
pub struct CommandHighlighter {
    verbs: HashSet<String>,
}

impl CommandHighlighter {
    /// Creates a highlighter that knows the given verbs.
    pub fn new(verbs: impl IntoIterator<Item = String>) -> Self {
        Self {
            verbs: verbs.into_iter().collect(),
        }
    }

    /// Replaces the known verbs.
    pub fn set_verbs(&mut self, verbs: impl IntoIterator<Item = String>) {
        self.verbs = verbs.into_iter().collect();
    }

    /// Highlight a line of input.
    pub fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        let start = line.len() - line.trim_start().len();
        let rest = &line[start..];
        let end = rest.find(char::is_whitespace).unwrap_or(rest.len());
        let word = &rest[..end];
        if word.is_empty() {
            return Cow::Borrowed(line);
        }

        let color = if self.verbs.contains(&word.to_lowercase()) {
            "\x1b[1;32m"
        } else {
            "\x1b[31m"
        };
        Cow::Owned(format!(
            "{}{color}{word}\x1b[0m{}",
            &line[..start],
            &rest[end..]
        ))
    }
}
