use anyhow::Result;
use tracing::info;

use crate::aggregate;
use crate::config::Config;
use crate::fetcher::Fetcher;
use crate::records::TalkRecord;
use crate::stages::{self, StageStats};

pub struct RunStats {
    pub gallery: StageStats,
    pub transcripts: StageStats,
    pub details: StageStats,
}

/// Gallery -> transcripts -> details -> join. Each stage finishes its whole
/// batch before the next starts; the later two reuse the gallery's URL list.
pub async fn collect_talks(config: &Config, fetcher: &Fetcher) -> Result<(Vec<TalkRecord>, RunStats)> {
    let root = config.site_root.as_str();

    let (listings, gallery) = stages::gallery_scrape(fetcher, root, config.pages.clone()).await;
    info!("Gallery yielded {} talks", listings.len());
    println!("{}", gallery.summary("gallery pages"));

    let talk_urls: Vec<String> = listings.iter().map(|l| l.url.clone()).collect();
    let (transcripts, transcript_stats) = stages::transcript_scrape(fetcher, root, &talk_urls).await;
    println!("{}", transcript_stats.summary("transcripts"));
    let (details, detail_stats) = stages::talk_scrape(fetcher, root, &talk_urls).await;
    println!("{}", detail_stats.summary("talk pages"));

    let talks = aggregate::join(root, listings, details, transcripts)?;

    Ok((
        talks,
        RunStats {
            gallery,
            transcripts: transcript_stats,
            details: detail_stats,
        },
    ))
}
