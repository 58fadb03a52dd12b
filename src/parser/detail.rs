use scraper::Html;

use super::{own_text, selector, ExtractError};
use crate::records::DetailRecord;

pub const EXTRACTOR: &str = "get_meta";

const VIEW_COUNT: &str = r#"span[class="talk-sharing__value"]"#;
const TOPIC_LINK: &str = r#"li[class="talk-topics__item"] > a"#;

/// View count text and comma-joined related topics from a talk summary page.
pub fn extract(talk_url: &str, html: &str) -> Result<DetailRecord, ExtractError> {
    let doc = Html::parse_document(html);

    let views = doc
        .select(&selector(VIEW_COUNT)?)
        .flat_map(own_text)
        .next()
        .unwrap_or_default()
        .to_string();

    let topics: Vec<&str> = doc
        .select(&selector(TOPIC_LINK)?)
        .flat_map(|a| a.text())
        .map(|t| t.trim_matches('\n'))
        .collect();

    Ok(DetailRecord {
        talk_url: talk_url.to_string(),
        views,
        topics: topics.join(","),
    })
}
