use parley_core::engine::AdapterError;
use parley_core::types::VideoHit;
use serde::Deserialize;

const DEFAULT_BASE_URL: &str = "https://www.googleapis.com";
const MAX_RESULTS: usize = 5;

#[derive(Debug, Deserialize)]
struct YouTubeSearchResponse {
    #[serde(default)]
    items: Vec<YouTubeItem>,
}

#[derive(Debug, Default, Deserialize)]
struct YouTubeItem {
    #[serde(default)]
    id: YouTubeId,
    #[serde(default)]
    snippet: YouTubeSnippet,
}

#[derive(Debug, Default, Deserialize)]
struct YouTubeId {
    #[serde(rename = "videoId", default)]
    video_id: String,
}

#[derive(Debug, Default, Deserialize)]
struct YouTubeSnippet {
    #[serde(default)]
    title: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    thumbnails: Thumbnails,
}

#[derive(Debug, Default, Deserialize)]
struct Thumbnails {
    #[serde(default)]
    medium: Thumbnail,
}

#[derive(Debug, Default, Deserialize)]
struct Thumbnail {
    #[serde(default)]
    url: String,
}

/// Video search via the YouTube Data API.
pub struct VideoSearchAdapter {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl VideoSearchAdapter {
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

    pub async fn search(&self, query: &str) -> Result<Vec<VideoHit>, AdapterError> {
        let url = self.request_url(query);
        tracing::debug!("video search request for '{}'", query);

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

        let parsed: YouTubeSearchResponse = response
            .json()
            .await
            .map_err(|e| AdapterError::Parse(e.to_string()))?;

        Ok(hits_from(parsed))
    }

    fn request_url(&self, query: &str) -> String {
        format!(
            "{}/youtube/v3/search?part=snippet&maxResults={}&q={}&type=video&key={}",
            self.base_url.trim_end_matches('/'),
            MAX_RESULTS,
            urlencoding::encode(query),
            self.api_key
        )
    }
}

fn hits_from(parsed: YouTubeSearchResponse) -> Vec<VideoHit> {
    parsed
        .items
        .into_iter()
        .filter(|item| !item.id.video_id.is_empty())
        .map(|item| VideoHit {
            title: item.snippet.title,
            description: item.snippet.description,
            video_id: item.id.video_id,
            thumbnail_url: item.snippet.thumbnails.medium.url,
        })
        .collect()
}
