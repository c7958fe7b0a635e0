//! Session configuration with sensible defaults.

use std::time::Duration;

use crate::catalog::Filter;

/// Product name used in the share payload and the UI title.
pub const DEFAULT_PRODUCT_NAME: &str = "Creative Studio";

/// Pause between accepting a draw and committing its prompt.
pub const DEFAULT_TRANSITION_DELAY: Duration = Duration::from_millis(150);

/// Configuration for a [`SessionController`](crate::session::SessionController).
///
/// Built with [`StudioConfig::default()`] and the `with_*` methods:
///
/// ```
/// use std::time::Duration;
/// use studio::StudioConfig;
///
/// let config = StudioConfig::default()
///     .with_seed(7)
///     .with_transition_delay(Duration::from_millis(50));
/// assert_eq!(config.seed, Some(7));
/// ```
#[derive(Debug, Clone)]
pub struct StudioConfig {
    /// Name shown in titles and share text. Default: `"Creative Studio"`.
    pub product_name: String,
    /// Delay between a draw request and its commit. Default: 150 ms.
    pub transition_delay: Duration,
    /// Filter active when the session starts. Default: `all`.
    pub initial_filter: Filter,
    /// RNG seed for reproducible draws. `None` seeds from OS entropy.
    pub seed: Option<u64>,
}

impl Default for StudioConfig {
    fn default() -> Self {
        Self {
            product_name: DEFAULT_PRODUCT_NAME.to_string(),
            transition_delay: DEFAULT_TRANSITION_DELAY,
            initial_filter: Filter::All,
            seed: None,
        }
    }
}

impl StudioConfig {
    pub fn with_product_name(mut self, name: impl Into<String>) -> Self {
        self.product_name = name.into();
        self
    }

    /// Zero is bumped to one millisecond; the transition is never instant.
    pub fn with_transition_delay(mut self, delay: Duration) -> Self {
        self.transition_delay = delay.max(Duration::from_millis(1));
        self
    }

    pub fn with_initial_filter(mut self, filter: Filter) -> Self {
        self.initial_filter = filter;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}
