//! HTTP client for the Notion REST API.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{
    Client, Method, RequestBuilder, Response, StatusCode,
    header::{AUTHORIZATION, CONTENT_TYPE, RETRY_AFTER},
};
use serde::{Deserialize, Serialize};

use super::{NotionApi, NotionError, QueryPage};
use crate::{config::NotionConfig, credentials::ApiKey};

const NOTION_VERSION_HEADER: &str = "Notion-Version";

#[derive(Debug, Serialize)]
struct QueryRequest<'a> {
    filter: &'a serde_json::Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    start_cursor: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    page_size: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct QueryResponse {
    #[serde(default)]
    results: Vec<PageObject>,
    #[serde(default)]
    has_more: bool,
    #[serde(default)]
    next_cursor: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PageObject {
    id: String,
}

#[derive(Debug, Serialize)]
struct ArchiveRequest {
    archived: bool,
}

/// Client for the Notion REST API.
///
/// Every request carries the bearer token, the `Notion-Version` header, and a
/// JSON content type. Queries and archive calls have separate timeouts.
#[derive(Clone)]
pub struct NotionClient {
    http_client: Client,
    base_url: String,
    api_key: ApiKey,
    api_version: String,
    query_timeout: Duration,
    mutation_timeout: Duration,
    page_size: Option<u32>,
}

impl std::fmt::Debug for NotionClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotionClient")
            .field("base_url", &self.base_url)
            .field("api_version", &self.api_version)
            .field("api_key", &self.api_key)
            .finish()
    }
}

impl NotionClient {
    pub fn new(api_key: ApiKey, config: &NotionConfig) -> Result<Self, NotionError> {
        let http_client = Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;

        let mut base_url = config.base_url.clone();
        // Remove trailing slash
        if base_url.ends_with('/') {
            base_url.pop();
        }

        Ok(Self {
            http_client,
            base_url,
            api_key,
            api_version: config.api_version.clone(),
            query_timeout: config.query_timeout(),
            mutation_timeout: config.mutation_timeout(),
            page_size: config.page_size,
        })
    }

    fn request(&self, method: Method, url: &str) -> RequestBuilder {
        self.http_client
            .request(method, url)
            .header(AUTHORIZATION, format!("Bearer {}", self.api_key.expose()))
            .header(NOTION_VERSION_HEADER, &self.api_version)
            .header(CONTENT_TYPE, "application/json")
    }
}

/// Map a non-2xx response to a [`NotionError`].
async fn check_status(response: Response) -> Result<Response, NotionError> {
    let status = response.status();

    if status.is_success() {
        return Ok(response);
    }

    if status == StatusCode::TOO_MANY_REQUESTS {
        let retry_after = response
            .headers()
            .get(RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse::<u64>().ok())
            .map(Duration::from_secs);
        return Err(NotionError::RateLimited { retry_after });
    }

    let body = response.text().await.unwrap_or_default();
    Err(NotionError::Request { status, body })
}

#[async_trait]
impl NotionApi for NotionClient {
    async fn query_database(
        &self,
        database_id: &str,
        filter: &serde_json::Value,
        start_cursor: Option<&str>,
    ) -> Result<QueryPage, NotionError> {
        let url = format!("{}/databases/{}/query", self.base_url, database_id);
        let body = QueryRequest {
            filter,
            start_cursor,
            page_size: self.page_size,
        };

        let response = self
            .request(Method::POST, &url)
            .timeout(self.query_timeout)
            .json(&body)
            .send()
            .await?;
        let response = check_status(response).await?;

        let data: QueryResponse = response.json().await?;

        Ok(QueryPage {
            ids: data.results.into_iter().map(|page| page.id).collect(),
            has_more: data.has_more,
            next_cursor: data.next_cursor,
        })
    }

    async fn archive_page(&self, page_id: &str) -> Result<(), NotionError> {
        let url = format!("{}/pages/{}", self.base_url, page_id);

        let response = self
            .request(Method::PATCH, &url)
            .timeout(self.mutation_timeout)
            .json(&ArchiveRequest { archived: true })
            .send()
            .await?;
        check_status(response).await?;

        Ok(())
    }
}
