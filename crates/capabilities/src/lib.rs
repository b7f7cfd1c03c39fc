pub mod client;
pub mod news;
pub mod phone;
pub mod screenshot;
pub mod video_search;
pub mod web_search;

pub use client::{BackendConfig, CapabilityClient};
pub use news::NewsAdapter;
pub use phone::PhoneValidationAdapter;
pub use screenshot::ScreenshotAdapter;
pub use video_search::VideoSearchAdapter;
pub use web_search::WebSearchAdapter;
