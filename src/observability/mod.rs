//! Observability module providing structured log output.
//!
//! Every component logs through `tracing` macros with structured fields
//! (`database_id`, `page_id`, `attempt`, ...). This module installs the
//! subscriber that renders them in the configured format.

mod tracing_init;

pub use tracing_init::*;
