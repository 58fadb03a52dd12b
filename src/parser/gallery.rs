use scraper::{ElementRef, Html};

use super::{own_text, selector, ExtractError};
use crate::records::ListingEntry;

pub const EXTRACTOR: &str = "get_pages";

const SPEAKER: &str = r#"h4[class="h12 talk-link__speaker"]"#;
const TITLE_LINK: &str = r#"h4[class="h9 m5"] a"#;
const META_VALUE: &str = r#"div[class="meta"] span[class="meta__val"]"#;

/// Pull every talk listed on one gallery page, in page order.
///
/// Speakers, titles, links and meta values are collected as independent
/// lists and zipped, so the shortest list bounds the result. Meta values
/// alternate posted date / categories.
pub fn extract(html: &str) -> Result<Vec<ListingEntry>, ExtractError> {
    let doc = Html::parse_document(html);

    let speakers: Vec<&str> = doc.select(&selector(SPEAKER)?).flat_map(own_text).collect();
    let links: Vec<ElementRef> = doc.select(&selector(TITLE_LINK)?).collect();
    let titles: Vec<&str> = links.iter().flat_map(|a| own_text(*a)).collect();
    let urls: Vec<&str> = links.iter().filter_map(|a| a.value().attr("href")).collect();
    let meta: Vec<&str> = doc
        .select(&selector(META_VALUE)?)
        .flat_map(|span| span.text())
        .collect();

    let dates = meta.iter().step_by(2);
    let categories = meta.iter().skip(1).step_by(2);

    Ok(speakers
        .iter()
        .zip(&titles)
        .zip(&urls)
        .zip(dates)
        .zip(categories)
        .map(|((((speaker, title), url), date), cats)| ListingEntry {
            speaker: speaker.to_string(),
            title: title.to_string(),
            url: url.to_string(),
            date: date.to_string(),
            categories: cats.to_string(),
        })
        .collect())
}
