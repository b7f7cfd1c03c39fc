use async_trait::async_trait;

use parley_core::engine::{AdapterError, CapabilityDispatcher};
use parley_core::types::{CapabilityKind, CapabilityReply};

use crate::news::NewsAdapter;
use crate::phone::PhoneValidationAdapter;
use crate::screenshot::ScreenshotAdapter;
use crate::video_search::VideoSearchAdapter;
use crate::web_search::WebSearchAdapter;

/// API credentials for the five data backends.
#[derive(Debug, Clone, Default)]
pub struct BackendConfig {
    pub news_api_key: String,
    pub numverify_api_key: String,
    pub abstract_api_key: String,
    pub google_api_key: String,
    pub search_engine_id: String,
    pub youtube_api_key: String,
}

/// The concrete capability set: one adapter per backend, selected by the
/// routing decision's kind. Exactly one adapter is invoked per dispatch.
pub struct CapabilityClient {
    news: NewsAdapter,
    phone: PhoneValidationAdapter,
    screenshot: ScreenshotAdapter,
    web: WebSearchAdapter,
    video: VideoSearchAdapter,
}

impl CapabilityClient {
    pub fn new(config: BackendConfig) -> Self {
        Self {
            news: NewsAdapter::new(config.news_api_key),
            phone: PhoneValidationAdapter::new(config.numverify_api_key),
            screenshot: ScreenshotAdapter::new(config.abstract_api_key),
            web: WebSearchAdapter::new(config.google_api_key, config.search_engine_id),
            video: VideoSearchAdapter::new(config.youtube_api_key),
        }
    }
}

#[async_trait]
impl CapabilityDispatcher for CapabilityClient {
    async fn dispatch(
        &self,
        kind: CapabilityKind,
        argument: &str,
    ) -> Result<CapabilityReply, AdapterError> {
        match kind {
            CapabilityKind::News => Ok(CapabilityReply::News(self.news.search(argument).await?)),
            CapabilityKind::PhoneValidation => {
                Ok(CapabilityReply::Phone(self.phone.validate(argument).await?))
            }
            CapabilityKind::Screenshot => Ok(CapabilityReply::Screenshot(
                self.screenshot.capture(argument).await?,
            )),
            CapabilityKind::WebSearch => Ok(CapabilityReply::Web(self.web.search(argument).await?)),
            CapabilityKind::VideoSearch => {
                Ok(CapabilityReply::Video(self.video.search(argument).await?))
            }
        }
    }
}
