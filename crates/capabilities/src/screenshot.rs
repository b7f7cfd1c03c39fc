use base64::{engine::general_purpose::STANDARD, Engine as _};
use parley_core::engine::AdapterError;
use parley_core::types::ScreenshotImage;

const DEFAULT_BASE_URL: &str = "https://screenshot.abstractapi.com/v1";

/// Website screenshot capture via the Abstract API. The rendered PNG comes
/// back as raw bytes and is re-encoded into a data URI so the reply can
/// embed it directly.
pub struct ScreenshotAdapter {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl ScreenshotAdapter {
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

    pub async fn capture(&self, target_url: &str) -> Result<ScreenshotImage, AdapterError> {
        let url = self.request_url(target_url);
        tracing::debug!("screenshot request for '{}'", target_url);

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

        let bytes = response
            .bytes()
            .await
            .map_err(|e| AdapterError::Http(e.to_string()))?;

        Ok(ScreenshotImage {
            data_uri: to_data_uri(&bytes),
        })
    }

    fn request_url(&self, target_url: &str) -> String {
        format!(
            "{}/?api_key={}&url={}",
            self.base_url.trim_end_matches('/'),
            self.api_key,
            urlencoding::encode(target_url)
        )
    }
}

fn to_data_uri(bytes: &[u8]) -> String {
    format!("data:image/png;base64,{}", STANDARD.encode(bytes))
}
