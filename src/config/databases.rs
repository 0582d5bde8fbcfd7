use serde::{Deserialize, Serialize};

/// One database to sweep.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DatabaseConfig {
    /// Notion database ID, with or without dashes.
    pub database_id: String,

    /// Display name used in logs. Defaults to the normalized ID.
    #[serde(default)]
    pub name: Option<String>,

    /// Free-form note; not used by the sweep.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Notion filter object, sent verbatim with every query.
    pub filters: serde_json::Value,

    /// Overrides the global dry-run flag for this database.
    #[serde(default)]
    pub dry_run: Option<bool>,
}

impl DatabaseConfig {
    pub(super) fn validate(&self) -> Result<(), String> {
        if self.database_id.trim().is_empty() {
            return Err("database_id must not be empty".into());
        }
        if !self.filters.is_object() {
            return Err("filters must be a table/object".into());
        }
        Ok(())
    }
}
