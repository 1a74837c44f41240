//! Session configuration and patch volatility

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Volatility class of a patch
///
/// Classification does not change the state machine, only the debounce
/// delay: thematic changes users compare visually settle faster than text
/// edits mid-typing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Volatility {
    /// Colors, fonts, animations
    Structural,
    /// Everything else (text, items, form fields)
    Content,
}

impl Volatility {
    /// Classify by the top-level section a path addresses
    #[inline]
    #[must_use]
    pub fn classify(section: Option<&str>) -> Self {
        match section {
            Some("colors" | "fonts" | "animations") => Self::Structural,
            _ => Self::Content,
        }
    }
}

/// Customization session configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Debounce for structural patches (milliseconds)
    pub structural_debounce_ms: u64,
    /// Debounce for content patches (milliseconds)
    pub content_debounce_ms: u64,
    /// Bound on a single persistence call (milliseconds)
    pub save_timeout_ms: u64,
    /// Bound on waiting for the preview to ack a reload (milliseconds)
    pub refresh_timeout_ms: u64,
}

impl SessionConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With structural debounce
    #[inline]
    #[must_use]
    pub fn with_structural_debounce(mut self, delay: Duration) -> Self {
        self.structural_debounce_ms = delay.as_millis() as u64;
        self
    }

    /// With content debounce
    #[inline]
    #[must_use]
    pub fn with_content_debounce(mut self, delay: Duration) -> Self {
        self.content_debounce_ms = delay.as_millis() as u64;
        self
    }

    /// With save timeout
    #[inline]
    #[must_use]
    pub fn with_save_timeout(mut self, timeout: Duration) -> Self {
        self.save_timeout_ms = timeout.as_millis() as u64;
        self
    }

    /// Debounce delay for a volatility class
    #[inline]
    #[must_use]
    pub fn debounce_for(&self, volatility: Volatility) -> Duration {
        match volatility {
            Volatility::Structural => Duration::from_millis(self.structural_debounce_ms),
            Volatility::Content => Duration::from_millis(self.content_debounce_ms),
        }
    }

    /// Save timeout as a duration
    #[inline]
    #[must_use]
    pub fn save_timeout(&self) -> Duration {
        Duration::from_millis(self.save_timeout_ms)
    }

    /// Refresh timeout as a duration
    #[inline]
    #[must_use]
    pub fn refresh_timeout(&self) -> Duration {
        Duration::from_millis(self.refresh_timeout_ms)
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            structural_debounce_ms: 300,
            content_debounce_ms: 500,
            save_timeout_ms: 10_000,
            refresh_timeout_ms: 5_000,
        }
    }
}
