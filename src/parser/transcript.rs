use scraper::Html;

use super::{selector, ExtractError};
use crate::records::TranscriptRecord;

pub const EXTRACTOR: &str = "get_content";

const PARAGRAPH_TEXT: &str = r#"div[class="talk-article__body talk-transcript__body"] span[class="talk-transcript__para__text"]"#;

/// Flatten transcript paragraphs into one line of text. Bare newline nodes
/// are dropped, the rest joined with spaces, and embedded newlines become
/// spaces.
pub fn extract(talk_url: &str, html: &str) -> Result<TranscriptRecord, ExtractError> {
    let doc = Html::parse_document(html);

    let parts: Vec<&str> = doc
        .select(&selector(PARAGRAPH_TEXT)?)
        .flat_map(|span| span.text())
        .filter(|t| *t != "\n")
        .collect();

    Ok(TranscriptRecord {
        talk_url: talk_url.to_string(),
        text: parts.join(" ").replace('\n', " "),
    })
}
