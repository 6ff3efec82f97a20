//! The user-facing result of running a command.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// What a command produced: a verdict and the narrative to show.
///
/// The verdict is `Some(true)` for success, `Some(false)` for failure and
/// `None` for neutral narrative that is neither. Consequences match on the
/// verdict exactly, so a neutral outcome only triggers consequences that
/// were registered without a required verdict.
///
/// An outcome carries at least one message. Extra messages are
/// interchangeable variants; a front end may pick any of them.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Outcome {
    verdict: Option<bool>,
    messages: Vec<String>,
}

impl Outcome {
    /// Creates an outcome with an explicit verdict.
    #[must_use]
    pub fn new(verdict: Option<bool>, message: impl Into<String>) -> Self {
        Self {
            verdict,
            messages: vec![message.into()],
        }
    }

    /// A successful outcome.
    #[must_use]
    pub fn success(message: impl Into<String>) -> Self {
        Self::new(Some(true), message)
    }

    /// A failed outcome.
    #[must_use]
    pub fn failure(message: impl Into<String>) -> Self {
        Self::new(Some(false), message)
    }

    /// Narrative that is neither success nor failure.
    #[must_use]
    pub fn neutral(message: impl Into<String>) -> Self {
        Self::new(None, message)
    }

    /// Adds an alternative message.
    #[must_use]
    pub fn with_variant(mut self, message: impl Into<String>) -> Self {
        self.messages.push(message.into());
        self
    }

    /// The verdict of this outcome.
    #[must_use]
    pub const fn verdict(&self) -> Option<bool> {
        self.verdict
    }

    /// Returns true if the verdict is success.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.verdict == Some(true)
    }

    /// Returns true if the verdict is failure.
    #[must_use]
    pub fn is_failure(&self) -> bool {
        self.verdict == Some(false)
    }

    /// The primary message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.messages[0]
    }

    /// All message variants, primary first.
    #[must_use]
    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    /// The message variant at `index`, wrapping around.
    #[must_use]
    pub fn variant(&self, index: usize) -> &str {
        &self.messages[index % self.messages.len()]
    }

    /// Appends text to the primary message.
    pub fn append(&mut self, text: &str) {
        self.messages[0].push_str(text);
    }

    /// Replaces the primary message.
    pub fn set_message(&mut self, message: impl Into<String>) {
        self.messages[0] = message.into();
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}
