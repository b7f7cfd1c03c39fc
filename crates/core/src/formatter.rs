//! Response formatting: typed capability results to a single reply string.

use crate::types::{
    CapabilityReply, NewsArticle, PhoneRecord, ScreenshotImage, SearchHit, VideoHit,
};

/// Fixed reply when phone validation could not be completed.
pub const PHONE_FAILURE_REPLY: &str =
    "Sorry, I couldn't verify that phone number. Please try again.";

/// Fixed reply when a screenshot could not be captured.
pub const SCREENSHOT_FAILURE_REPLY: &str =
    "Sorry, I couldn't take a screenshot of that website. Please try again or check the URL.";

/// Render a non-empty capability reply. The argument is the extracted query
/// the routing decision carried; it names the result set in the summary
/// line. Callers handle the empty-list case before reaching this point.
pub fn format(argument: &str, reply: &CapabilityReply) -> String {
    match reply {
        CapabilityReply::News(articles) => format_news(argument, articles),
        CapabilityReply::Phone(record) => format_phone(argument, record),
        CapabilityReply::Screenshot(image) => format_screenshot(argument, image),
        CapabilityReply::Web(hits) => format_web_search(argument, hits),
        CapabilityReply::Video(hits) => format_video_search(argument, hits),
    }
}

pub fn format_news(query: &str, articles: &[NewsArticle]) -> String {
    let body = articles
        .iter()
        .map(|article| {
            format!(
                "{}\n{}\nRead more: {}",
                article.title, article.description, article.url
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n");

    format!("Here are the latest news articles about {}:\n\n{}", query, body)
}

pub fn format_phone(number: &str, record: &PhoneRecord) -> String {
    format!(
        "Phone number verification result for {}:\nValid: {}\nCountry: {}\nLocation: {}\nCarrier: {}\nLine type: {}",
        number, record.valid, record.country, record.location, record.carrier, record.line_type
    )
}

pub fn format_screenshot(url: &str, image: &ScreenshotImage) -> String {
    format!(
        "Here's a screenshot of {}:\n\n![Screenshot]({})",
        url, image.data_uri
    )
}

pub fn format_web_search(query: &str, hits: &[SearchHit]) -> String {
    let body = hits
        .iter()
        .map(|hit| format!("{}\n{}\nRead more: {}", hit.title, hit.snippet, hit.link))
        .collect::<Vec<_>>()
        .join("\n\n");

    format!("Here are the top search results for \"{}\":\n\n{}", query, body)
}

pub fn format_video_search(query: &str, hits: &[VideoHit]) -> String {
    let body = hits
        .iter()
        .map(|hit| {
            format!(
                "{}\n{}\nWatch: [YouTube Video](https://www.youtube.com/watch?v={})",
                hit.title, hit.description, hit.video_id
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n");

    format!("Here are the top YouTube videos for \"{}\":\n\n{}", query, body)
}
