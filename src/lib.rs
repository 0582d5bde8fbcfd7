//! Rate-limited bulk archival of Notion database pages.
//!
//! A run loads a [`config::SweepConfig`], queries every configured database
//! with its filter, and archives each matching page, pacing requests to stay
//! under Notion's rate limit. See [`sweep::run_sweep`].

pub mod config;
pub mod credentials;
pub mod notion;
#[cfg(feature = "cli")]
pub mod observability;
pub mod sweep;

#[cfg(test)]
mod tests;
