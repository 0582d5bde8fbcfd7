use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Notion API connection settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NotionConfig {
    /// API base URL.
    /// Default: "https://api.notion.com/v1"
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Value of the `Notion-Version` header.
    /// Default: "2022-06-28"
    #[serde(default = "default_api_version")]
    pub api_version: String,

    /// Timeout for each database query request, in seconds.
    #[serde(default = "default_query_timeout_secs")]
    pub query_timeout_secs: u64,

    /// Timeout for each page archive request, in seconds.
    #[serde(default = "default_mutation_timeout_secs")]
    pub mutation_timeout_secs: u64,

    /// Results per query page (1-100). Notion's default applies when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,
}

impl Default for NotionConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_version: default_api_version(),
            query_timeout_secs: default_query_timeout_secs(),
            mutation_timeout_secs: default_mutation_timeout_secs(),
            page_size: None,
        }
    }
}

fn default_base_url() -> String {
    "https://api.notion.com/v1".to_string()
}

fn default_api_version() -> String {
    "2022-06-28".to_string()
}

fn default_query_timeout_secs() -> u64 {
    30
}

fn default_mutation_timeout_secs() -> u64 {
    10
}

impl NotionConfig {
    pub fn query_timeout(&self) -> Duration {
        Duration::from_secs(self.query_timeout_secs)
    }

    pub fn mutation_timeout(&self) -> Duration {
        Duration::from_secs(self.mutation_timeout_secs)
    }

    pub(super) fn validate(&self) -> Result<(), String> {
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(format!(
                "notion.base_url must be an http(s) URL (got '{}')",
                self.base_url
            ));
        }
        if let Some(size) = self.page_size
            && !(1..=100).contains(&size)
        {
            return Err(format!(
                "notion.page_size must be between 1 and 100 (got {size})"
            ));
        }
        Ok(())
    }
}
