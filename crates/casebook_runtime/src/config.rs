//! Session configuration.

/// Default number of commands kept in the history.
pub const DEFAULT_HISTORY_LEN: usize = 10;

/// Settings for a [`Session`](crate::Session).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionConfig {
    /// How many recent commands to remember.
    pub history_len: usize,
    /// Seed for choosing between message variants.
    pub seed: u64,
    /// Prompt shown before each command.
    pub prompt: String,
    /// Title printed when an interactive session starts.
    pub banner: Option<String>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            history_len: DEFAULT_HISTORY_LEN,
            seed: 0,
            prompt: ">> ".to_string(),
            banner: Some("ADVENTURE QUEST".to_string()),
        }
    }
}

impl SessionConfig {
    /// Sets the history length.
    #[must_use]
    pub const fn with_history_len(mut self, history_len: usize) -> Self {
        self.history_len = history_len;
        self
    }

    /// Sets the variant seed.
    #[must_use]
    pub const fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Sets the prompt.
    #[must_use]
    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = prompt.into();
        self
    }

    /// Sets or clears the banner.
    #[must_use]
    pub fn with_banner(mut self, banner: Option<String>) -> Self {
        self.banner = banner;
        self
    }
}
