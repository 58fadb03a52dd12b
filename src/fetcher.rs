use std::sync::Arc;

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use tokio::sync::Semaphore;
use tracing::{debug, warn};

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("HTTP {status} for {url}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },
    #[error("fetch task for {url} did not report back")]
    Lost { url: String },
}

/// Raw page body for one requested URL, or why it is unavailable.
pub type FetchResult = std::result::Result<String, FetchError>;

/// Issues batches of GET requests with at most `concurrency` in flight.
#[derive(Clone)]
pub struct Fetcher {
    client: reqwest::Client,
    concurrency: usize,
}

impl Fetcher {
    pub fn new(concurrency: usize) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("ted_scraper/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            concurrency: concurrency.max(1),
        })
    }

    pub fn concurrency(&self) -> usize {
        self.concurrency
    }

    /// Fetch every URL and return the results in input order once all
    /// requests have completed. A failed request yields an `Err` at its own
    /// index; it never aborts the rest of the batch.
    pub async fn fetch_all(&self, urls: &[String]) -> Vec<FetchResult> {
        let total = urls.len();
        let semaphore = Arc::new(Semaphore::new(self.concurrency));

        let pb = ProgressBar::new(total as u64);
        if let Ok(style) =
            ProgressStyle::default_bar().template("[{elapsed_precise}] {bar:40} {pos}/{len} ({per_sec})")
        {
            pb.set_style(style.progress_chars("=> "));
        }

        // Workers report (index, result); completion order is irrelevant
        let (tx, mut rx) = tokio::sync::mpsc::channel::<(usize, FetchResult)>(self.concurrency * 2);

        for (idx, url) in urls.iter().cloned().enumerate() {
            let client = self.client.clone();
            let sem = Arc::clone(&semaphore);
            let tx = tx.clone();

            tokio::spawn(async move {
                let Ok(_permit) = sem.acquire_owned().await else {
                    return;
                };
                let result = fetch_one(&client, &url).await;
                let _ = tx.send((idx, result)).await;
            });
        }

        // rx closes once every spawned task has dropped its sender
        drop(tx);

        let mut slots: Vec<Option<FetchResult>> = (0..total).map(|_| None).collect();
        while let Some((idx, result)) = rx.recv().await {
            if let Err(e) = &result {
                warn!("Fetch failed: {}", e);
            }
            slots[idx] = Some(result);
            pb.inc(1);
        }
        pb.finish_and_clear();

        slots
            .into_iter()
            .zip(urls)
            .map(|(slot, url)| {
                slot.unwrap_or_else(|| {
                    let err = FetchError::Lost { url: url.clone() };
                    warn!("Fetch failed: {}", err);
                    Err(err)
                })
            })
            .collect()
    }
}

async fn fetch_one(client: &reqwest::Client, url: &str) -> FetchResult {
    debug!("GET {}", url);
    let transport = |source| FetchError::Transport {
        url: url.to_string(),
        source,
    };

    let response = client.get(url).send().await.map_err(transport)?;
    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Status {
            url: url.to_string(),
            status,
        });
    }

    response.text().await.map_err(transport)
}
