use parley_core::engine::AdapterError;
use parley_core::types::NewsArticle;
use serde::Deserialize;

const DEFAULT_BASE_URL: &str = "https://newsapi.org/v2";
const PAGE_SIZE: usize = 5;

#[derive(Debug, Deserialize)]
struct NewsApiResponse {
    #[serde(default)]
    articles: Vec<NewsApiArticle>,
}

#[derive(Debug, Deserialize)]
struct NewsApiArticle {
    #[serde(default)]
    title: String,
    description: Option<String>,
    #[serde(default)]
    url: String,
}

/// Article search against the NewsAPI `everything` endpoint.
pub struct NewsAdapter {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl NewsAdapter {
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL.to_string())
    }

    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url,
            api_key,
        }
    }

    /// Top articles for the query. An empty list means the backend had no
    /// matching articles; errors mean it could not be asked.
    pub async fn search(&self, query: &str) -> Result<Vec<NewsArticle>, AdapterError> {
        let url = self.request_url(query);
        tracing::debug!("news request for '{}'", query);

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

        let parsed: NewsApiResponse = response
            .json()
            .await
            .map_err(|e| AdapterError::Parse(e.to_string()))?;

        Ok(parsed
            .articles
            .into_iter()
            .map(|article| NewsArticle {
                title: article.title,
                description: article.description.unwrap_or_default(),
                url: article.url,
            })
            .collect())
    }

    fn request_url(&self, query: &str) -> String {
        format!(
            "{}/everything?q={}&apiKey={}&pageSize={}",
            self.base_url.trim_end_matches('/'),
            urlencoding::encode(query),
            self.api_key,
            PAGE_SIZE
        )
    }
}
