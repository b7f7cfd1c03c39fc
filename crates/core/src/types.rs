use serde::{Deserialize, Serialize};

/// The five non-generative backend functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CapabilityKind {
    News,
    PhoneValidation,
    Screenshot,
    WebSearch,
    VideoSearch,
}

impl CapabilityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            CapabilityKind::News => "news",
            CapabilityKind::PhoneValidation => "phone_validation",
            CapabilityKind::Screenshot => "screenshot",
            CapabilityKind::WebSearch => "web_search",
            CapabilityKind::VideoSearch => "video_search",
        }
    }
}

/// Outcome of intent matching for one utterance.
///
/// A `Capability` decision always carries a non-empty, trimmed argument;
/// rules whose extraction comes up empty do not match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoutingDecision {
    Capability {
        kind: CapabilityKind,
        argument: String,
    },
    Generative,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewsArticle {
    pub title: String,
    pub description: String,
    pub url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhoneRecord {
    pub valid: bool,
    pub country: String,
    pub location: String,
    pub carrier: String,
    pub line_type: String,
}

/// A captured page rendered as a `data:image/png;base64,...` URI, usable
/// directly in markup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScreenshotImage {
    pub data_uri: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchHit {
    pub title: String,
    pub snippet: String,
    pub link: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoHit {
    pub title: String,
    pub description: String,
    pub video_id: String,
    pub thumbnail_url: String,
}

/// Typed result of one capability dispatch. Produced by an adapter call,
/// consumed immediately by the formatter, never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum CapabilityReply {
    News(Vec<NewsArticle>),
    Phone(PhoneRecord),
    Screenshot(ScreenshotImage),
    Web(Vec<SearchHit>),
    Video(Vec<VideoHit>),
}

impl CapabilityReply {
    pub fn kind(&self) -> CapabilityKind {
        match self {
            CapabilityReply::News(_) => CapabilityKind::News,
            CapabilityReply::Phone(_) => CapabilityKind::PhoneValidation,
            CapabilityReply::Screenshot(_) => CapabilityKind::Screenshot,
            CapabilityReply::Web(_) => CapabilityKind::WebSearch,
            CapabilityReply::Video(_) => CapabilityKind::VideoSearch,
        }
    }

    /// True when a list-shaped reply came back with no items. Single-record
    /// replies always count as non-empty; their failure mode is an error.
    pub fn is_empty(&self) -> bool {
        match self {
            CapabilityReply::News(items) => items.is_empty(),
            CapabilityReply::Web(items) => items.is_empty(),
            CapabilityReply::Video(items) => items.is_empty(),
            CapabilityReply::Phone(_) | CapabilityReply::Screenshot(_) => false,
        }
    }
}

/// How long the generative reply should be. Selected by the user's
/// `ai_response_length` setting and passed in per call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verbosity {
    Brief,
    Detailed,
}

/// What a generation request is for: a conversational reply, or the
/// one-time conversation title.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseMode {
    Reply(Verbosity),
    Title,
}
