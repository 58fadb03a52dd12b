use std::ops::RangeInclusive;
use std::sync::Arc;

use rayon::prelude::*;
use tracing::info;

use crate::fetcher::{FetchResult, Fetcher};
use crate::parser::{self, degrade, page_body, ExtractError};
use crate::records::{DetailRecord, ListingEntry, TranscriptRecord};

/// Per-stage outcome counts. `errors` counts pages that fell back to defaults.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StageStats {
    pub total: usize,
    pub ok: usize,
    pub errors: usize,
}

impl StageStats {
    /// One aligned progress line, e.g. `  transcripts    57 ok, 2 errors (59 total)`.
    pub fn summary(&self, name: &str) -> String {
        format!("  {:<14} {} ok, {} errors ({} total)", name, self.ok, self.errors, self.total)
    }
}

pub fn gallery_urls(site_root: &str, pages: RangeInclusive<u32>) -> Vec<String> {
    pages
        .map(|n| format!("{}/talks?page={}", site_root, n))
        .collect()
}

pub fn detail_urls(site_root: &str, talk_urls: &[String]) -> Vec<String> {
    talk_urls
        .iter()
        .map(|u| format!("{}{}?language=en", site_root, u))
        .collect()
}

pub fn transcript_urls(site_root: &str, talk_urls: &[String]) -> Vec<String> {
    talk_urls
        .iter()
        .map(|u| format!("{}{}/transcript?language=en", site_root, u))
        .collect()
}

/// Scrape the listing pages and flatten them: page 1 entries first, then page 2, ...
pub async fn gallery_scrape(
    fetcher: &Fetcher,
    site_root: &str,
    pages: RangeInclusive<u32>,
) -> (Vec<ListingEntry>, StageStats) {
    let urls = gallery_urls(site_root, pages);
    info!(
        "Fetching {} gallery pages ({} workers)",
        urls.len(),
        fetcher.concurrency()
    );
    let responses = fetcher.fetch_all(&urls).await;

    let (per_page, stats) = extract_blocking(
        responses,
        parser::gallery::EXTRACTOR,
        |_, body| parser::gallery::extract(body),
        |_| Vec::new(),
    )
    .await;

    (per_page.into_iter().flatten().collect(), stats)
}

/// One `DetailRecord` per talk URL, same order.
pub async fn talk_scrape(
    fetcher: &Fetcher,
    site_root: &str,
    talk_urls: &[String],
) -> (Vec<DetailRecord>, StageStats) {
    let urls = detail_urls(site_root, talk_urls);
    info!("Fetching {} talk summary pages", urls.len());
    let responses = fetcher.fetch_all(&urls).await;

    let talks: Arc<[String]> = talk_urls.into();
    let fallback = Arc::clone(&talks);
    extract_blocking(
        responses,
        parser::detail::EXTRACTOR,
        move |i, body| parser::detail::extract(&talks[i], body),
        move |i| DetailRecord::empty(&fallback[i]),
    )
    .await
}

/// One `TranscriptRecord` per talk URL, same order.
pub async fn transcript_scrape(
    fetcher: &Fetcher,
    site_root: &str,
    talk_urls: &[String],
) -> (Vec<TranscriptRecord>, StageStats) {
    let urls = transcript_urls(site_root, talk_urls);
    info!("Fetching {} transcript pages", urls.len());
    let responses = fetcher.fetch_all(&urls).await;

    let talks: Arc<[String]> = talk_urls.into();
    let fallback = Arc::clone(&talks);
    extract_blocking(
        responses,
        parser::transcript::EXTRACTOR,
        move |i, body| parser::transcript::extract(&talks[i], body),
        move |i| TranscriptRecord::empty(&fallback[i]),
    )
    .await
}

/// Parse a fetched batch on the blocking pool so HTML work never holds an
/// async worker.
async fn extract_blocking<T, E, D>(
    responses: Vec<FetchResult>,
    extractor: &'static str,
    extract: E,
    default: D,
) -> (Vec<T>, StageStats)
where
    T: Send + 'static,
    E: Fn(usize, &str) -> Result<T, ExtractError> + Send + Sync + 'static,
    D: Fn(usize) -> T + Send + 'static,
{
    let task =
        tokio::task::spawn_blocking(move || extract_each(&responses, extractor, extract, default));
    match task.await {
        Ok(out) => out,
        Err(e) => std::panic::resume_unwind(e.into_panic()),
    }
}

/// Run `extract` over every response in parallel, keeping input order and
/// substituting `default` wherever a page could not be fetched or parsed.
fn extract_each<T, E, D>(
    responses: &[FetchResult],
    extractor: &str,
    extract: E,
    default: D,
) -> (Vec<T>, StageStats)
where
    T: Send,
    E: Fn(usize, &str) -> Result<T, ExtractError> + Sync,
    D: Fn(usize) -> T,
{
    let results: Vec<Result<T, ExtractError>> = responses
        .par_iter()
        .enumerate()
        .map(|(i, page)| page_body(page).and_then(|body| extract(i, body)))
        .collect();

    let errors = results.iter().filter(|r| r.is_err()).count();
    let stats = StageStats {
        total: results.len(),
        ok: results.len() - errors,
        errors,
    };

    let values = results
        .into_iter()
        .enumerate()
        .map(|(i, r)| degrade(extractor, r, || default(i)))
        .collect();

    (values, stats)
}
