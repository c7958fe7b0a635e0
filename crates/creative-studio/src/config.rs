//! App configuration with sensible defaults.
//!
//! [`AppConfig`] holds what the command line controls and converts it into
//! a [`StudioConfig`] for the session and a [`TuiConfig`] for the terminal
//! front end.

use std::time::Duration;

use studio::StudioConfig;
use studio::catalog::{ALL_FILTER, Catalog};
use studio::config::DEFAULT_TRANSITION_DELAY;
use studio::log::LogBuffer;
use studio_tui::{Osc52Queue, TuiConfig};

/// Configuration for a Creative Studio terminal session.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Filter to open with (`all` or a category name). Default: `"all"`.
    pub filter: String,
    /// RNG seed for reproducible draws. Default: `None` (OS entropy).
    pub seed: Option<u64>,
    /// Transition delay in milliseconds. Default: `150`.
    pub delay_ms: u64,
    /// Open with the log pane visible. Default: `false`.
    pub show_logs: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            filter: ALL_FILTER.to_string(),
            seed: None,
            delay_ms: DEFAULT_TRANSITION_DELAY.as_millis() as u64,
            show_logs: false,
        }
    }
}

impl AppConfig {
    /// Build a [`StudioConfig`], resolving the filter against `catalog`.
    pub fn build_studio_config(&self, catalog: &Catalog) -> studio::Result<StudioConfig> {
        let filter = catalog.resolve_filter(&self.filter)?;
        let mut config = StudioConfig::default()
            .with_initial_filter(filter)
            .with_transition_delay(Duration::from_millis(self.delay_ms));
        if let Some(seed) = self.seed {
            config = config.with_seed(seed);
        }
        Ok(config)
    }

    /// Build a [`TuiConfig`] that drains `log_buffer` into the log pane and
    /// writes queued OSC 52 copies between frames.
    pub fn build_tui_config(
        &self,
        log_buffer: Option<LogBuffer>,
        clipboard_queue: Option<Osc52Queue>,
    ) -> TuiConfig {
        TuiConfig {
            log_buffer,
            show_logs: self.show_logs,
            clipboard_queue,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use studio::StudioError;
    use studio::catalog::{Category, Filter};

    #[test]
    fn defaults_match_the_session_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.filter, "all");
        assert_eq!(config.delay_ms, 150);
        assert!(config.seed.is_none());
        assert!(!config.show_logs);

        let studio = config.build_studio_config(&Catalog::builtin()).unwrap();
        assert_eq!(studio.initial_filter, Filter::All);
        assert_eq!(studio.transition_delay, Duration::from_millis(150));
    }

    #[test]
    fn filter_and_seed_carry_over() {
        let config = AppConfig {
            filter: "Minimalist".into(),
            seed: Some(11),
            ..Default::default()
        };
        let studio = config.build_studio_config(&Catalog::builtin()).unwrap();
        assert_eq!(studio.initial_filter, Filter::Category(Category::Minimalist));
        assert_eq!(studio.seed, Some(11));
    }

    #[test]
    fn unknown_filter_is_rejected() {
        let config = AppConfig {
            filter: "surreal".into(),
            ..Default::default()
        };
        assert!(matches!(
            config.build_studio_config(&Catalog::builtin()),
            Err(StudioError::InvalidFilter(_))
        ));
    }

    #[test]
    fn tui_config_takes_log_buffer_and_clipboard_queue() {
        let config = AppConfig {
            show_logs: true,
            ..Default::default()
        };
        let (_clipboard, queue) = studio_tui::Osc52Clipboard::channel();
        let tui = config.build_tui_config(Some(LogBuffer::new()), Some(queue));
        assert!(tui.log_buffer.is_some());
        assert!(tui.clipboard_queue.is_some());
        assert!(tui.show_logs);
    }
}
