//! Consolidated test modules.
//!
//! End-to-end tests that run the sweep against a mock Notion API over HTTP.
