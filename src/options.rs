//! Game configuration options.

use core::time::Duration;

/// Default number of reshuffles per game.
pub const DEFAULT_SHUFFLES: u8 = 3;

/// Default pause between deal steps.
pub const DEFAULT_STEP_DELAY: Duration = Duration::from_millis(10);

/// Configuration options for a Montana game.
///
/// Use the builder pattern to customize options:
///
/// ```
/// use core::time::Duration;
/// use montana::GameOptions;
///
/// let options = GameOptions::default()
///     .with_shuffles(2)
///     .with_step_delay(Duration::from_millis(40));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameOptions {
    /// Reshuffles allowed per game.
    pub shuffles: u8,
    /// Pause between queued deal steps when dealing is paced.
    ///
    /// Only [`Game::run_dealing`](crate::Game::run_dealing) waits; engine
    /// transitions never do.
    pub step_delay: Duration,
}

impl Default for GameOptions {
    fn default() -> Self {
        Self {
            shuffles: DEFAULT_SHUFFLES,
            step_delay: DEFAULT_STEP_DELAY,
        }
    }
}

impl GameOptions {
    /// Sets the number of reshuffles allowed per game.
    ///
    /// # Example
    ///
    /// ```
    /// use montana::GameOptions;
    ///
    /// let options = GameOptions::default().with_shuffles(0);
    /// assert_eq!(options.shuffles, 0);
    /// ```
    #[must_use]
    pub const fn with_shuffles(mut self, shuffles: u8) -> Self {
        self.shuffles = shuffles;
        self
    }

    /// Sets the pause between deal steps.
    ///
    /// # Example
    ///
    /// ```
    /// use core::time::Duration;
    /// use montana::GameOptions;
    ///
    /// let options = GameOptions::default().with_step_delay(Duration::ZERO);
    /// assert_eq!(options.step_delay, Duration::ZERO);
    /// ```
    #[must_use]
    pub const fn with_step_delay(mut self, delay: Duration) -> Self {
        self.step_delay = delay;
        self
    }
}
