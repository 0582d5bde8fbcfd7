//! Request pacing and rate-limit backoff.
//!
//! Notion allows roughly three requests per second per integration. A single
//! sequential worker stays under that ceiling by pausing a fixed interval
//! between requests; `429` responses on archive requests back off
//! exponentially.
//!
//! # Example
//!
//! ```toml
//! [limits]
//! request_interval_ms = 350
//! max_attempts = 3
//! initial_backoff_ms = 1000
//! backoff_multiplier = 2.0
//! ```

use std::time::Duration;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RateLimitConfig {
    /// Pause between consecutive query pages and after each archived page,
    /// in milliseconds.
    /// Default: 350 (~3 requests/second)
    #[serde(default = "default_request_interval_ms")]
    pub request_interval_ms: u64,

    /// Maximum archive attempts per page, including the first.
    /// Only rate-limited attempts are retried.
    /// Default: 3
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Backoff after the first rate-limited attempt, in milliseconds.
    /// Default: 1000
    #[serde(default = "default_initial_backoff_ms")]
    pub initial_backoff_ms: u64,

    /// Multiplier applied per attempt.
    /// Default: 2.0 (1s, 2s, 4s)
    #[serde(default = "default_backoff_multiplier")]
    pub backoff_multiplier: f64,

    /// Upper bound on a single backoff, in milliseconds.
    /// Default: 60000
    #[serde(default = "default_max_backoff_ms")]
    pub max_backoff_ms: u64,

    /// Random jitter as a fraction of the delay (0.0-1.0).
    /// Default: 0.0
    #[serde(default)]
    pub jitter: f64,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            request_interval_ms: default_request_interval_ms(),
            max_attempts: default_max_attempts(),
            initial_backoff_ms: default_initial_backoff_ms(),
            backoff_multiplier: default_backoff_multiplier(),
            max_backoff_ms: default_max_backoff_ms(),
            jitter: 0.0,
        }
    }
}

fn default_request_interval_ms() -> u64 {
    350
}

fn default_max_attempts() -> u32 {
    3
}

fn default_initial_backoff_ms() -> u64 {
    1000
}

fn default_backoff_multiplier() -> f64 {
    2.0
}

fn default_max_backoff_ms() -> u64 {
    60_000
}

impl RateLimitConfig {
    /// Fixed pause between requests.
    pub fn request_interval(&self) -> Duration {
        Duration::from_millis(self.request_interval_ms)
    }

    /// Calculate the backoff for a given attempt (0-indexed).
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        let base_delay =
            (self.initial_backoff_ms as f64) * self.backoff_multiplier.powi(attempt as i32);
        let capped_delay = base_delay.min(self.max_backoff_ms as f64);

        let jitter_range = capped_delay * self.jitter;
        let jitter = if jitter_range > 0.0 {
            use rand::Rng;
            rand::thread_rng().gen_range(-jitter_range..jitter_range)
        } else {
            0.0
        };

        let final_delay = (capped_delay + jitter).max(0.0);
        Duration::from_millis(final_delay as u64)
    }

    pub(super) fn validate(&self) -> Result<(), String> {
        if self.max_attempts == 0 {
            return Err("limits.max_attempts must be at least 1".into());
        }
        if self.backoff_multiplier < 1.0 {
            return Err(format!(
                "limits.backoff_multiplier must be >= 1.0 (got {})",
                self.backoff_multiplier
            ));
        }
        if !(0.0..=1.0).contains(&self.jitter) {
            return Err(format!(
                "limits.jitter must be between 0.0 and 1.0 (got {})",
                self.jitter
            ));
        }
        Ok(())
    }
}
