pub mod detail;
pub mod gallery;
pub mod transcript;

use scraper::{ElementRef, Selector};
use tracing::warn;

use crate::fetcher::FetchResult;

#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    #[error("document unavailable: {0}")]
    Unavailable(String),
    #[error("invalid selector `{selector}`: {message}")]
    Selector {
        selector: &'static str,
        message: String,
    },
}

/// Body of a fetched page, or `Unavailable` when the fetch failed.
pub fn page_body(page: &FetchResult) -> Result<&str, ExtractError> {
    page.as_deref()
        .map_err(|e| ExtractError::Unavailable(e.to_string()))
}

/// Swap a failed extraction for its default, reporting which extractor failed.
pub fn degrade<T>(
    extractor: &str,
    result: Result<T, ExtractError>,
    default: impl FnOnce() -> T,
) -> T {
    result.unwrap_or_else(|e| {
        warn!("err: {} in {}", e, extractor);
        default()
    })
}

fn selector(css: &'static str) -> Result<Selector, ExtractError> {
    Selector::parse(css).map_err(|e| ExtractError::Selector {
        selector: css,
        message: e.to_string(),
    })
}

/// Text nodes that are direct children of `el`, one item per node.
fn own_text<'a>(el: ElementRef<'a>) -> impl Iterator<Item = &'a str> + 'a {
    el.children()
        .filter_map(|node| node.value().as_text())
        .map(|text| &**text)
}
