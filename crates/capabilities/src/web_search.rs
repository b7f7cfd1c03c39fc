use parley_core::engine::AdapterError;
use parley_core::types::SearchHit;
use serde::Deserialize;

const DEFAULT_BASE_URL: &str = "https://www.googleapis.com";
const MAX_RESULTS: usize = 5;

// Google omits `items` entirely when a query has no results.
#[derive(Debug, Deserialize)]
struct CustomSearchResponse {
    #[serde(default)]
    items: Vec<CustomSearchItem>,
}

#[derive(Debug, Deserialize)]
struct CustomSearchItem {
    #[serde(default)]
    title: String,
    #[serde(default)]
    snippet: String,
    #[serde(default)]
    link: String,
}

/// General web search via Google Custom Search.
pub struct WebSearchAdapter {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    search_engine_id: String,
}

impl WebSearchAdapter {
    pub fn new(api_key: String, search_engine_id: String) -> Self {
        Self::with_base_url(api_key, search_engine_id, DEFAULT_BASE_URL.to_string())
    }

    pub fn with_base_url(api_key: String, search_engine_id: String, base_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url,
            api_key,
            search_engine_id,
        }
    }

    pub async fn search(&self, query: &str) -> Result<Vec<SearchHit>, AdapterError> {
        let url = self.request_url(query);
        tracing::debug!("web search request for '{}'", query);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| AdapterError::Http(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(AdapterError::Api(format!("{}: {}", status, text)));
        }

        let parsed: CustomSearchResponse = response
            .json()
            .await
            .map_err(|e| AdapterError::Parse(e.to_string()))?;

        Ok(parsed
            .items
            .into_iter()
            .take(MAX_RESULTS)
            .map(|item| SearchHit {
                title: item.title,
                snippet: item.snippet,
                link: item.link,
            })
            .collect())
    }

    fn request_url(&self, query: &str) -> String {
        format!(
            "{}/customsearch/v1?key={}&cx={}&q={}",
            self.base_url.trim_end_matches('/'),
            self.api_key,
            self.search_engine_id,
            urlencoding::encode(query)
        )
    }
}
