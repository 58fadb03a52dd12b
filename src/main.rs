mod aggregate;
mod config;
mod fetcher;
mod output;
mod parser;
mod pipeline;
mod records;
mod stages;

use std::path::PathBuf;
use std::time::Instant;

use clap::Parser;

use config::Config;

#[derive(Parser)]
#[command(
    name = "ted_scraper",
    about = "Scrape TED talk metadata and transcripts into a JSON file"
)]
struct Cli {
    /// Site to scrape
    #[arg(long, default_value = config::SITE_ROOT)]
    site_root: String,
    /// Max requests in flight per stage
    #[arg(short = 'c', long, default_value_t = config::CONCURRENCY)]
    concurrency: usize,
    /// First gallery page to scrape
    #[arg(long, default_value_t = config::FIRST_PAGE)]
    first_page: u32,
    /// Last gallery page to scrape (inclusive)
    #[arg(long, default_value_t = config::LAST_PAGE)]
    last_page: u32,
    /// Output file
    #[arg(short, long, default_value = config::OUTPUT_FILE)]
    output: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let t0 = Instant::now();
    let cli = Cli::parse();
    let config = Config::new(
        &cli.site_root,
        cli.concurrency,
        cli.first_page,
        cli.last_page,
        cli.output,
    )?;
    let fetcher = fetcher::Fetcher::new(config.concurrency)?;

    println!("scraping {} ...", config.site_root);
    let (talks, stats) = pipeline::collect_talks(&config, &fetcher).await?;
    println!("{} talks found. saving raw data ...", talks.len());
    tracing::debug!(
        "degraded pages: {} gallery, {} transcripts, {} talk pages",
        stats.gallery.errors,
        stats.transcripts.errors,
        stats.details.errors
    );

    println!("serializing data to json ...");
    let json = output::to_json(&talks)?;
    println!("saving as json ...");
    output::save(&config.output, &json)?;
    println!(
        "completed.  data saved as \"{}\" in {}",
        config.output.display(),
        format_duration(t0.elapsed())
    );

    Ok(())
}

fn format_duration(d: std::time::Duration) -> String {
    let secs = d.as_secs();
    if secs < 60 {
        format!("{:.1}s", d.as_secs_f64())
    } else if secs < 3600 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else {
        format!("{}h {}m {}s", secs / 3600, (secs % 3600) / 60, secs % 60)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[test]
    fn no_flags_means_default_run() {
        let cli = Cli::parse_from(["ted_scraper"]);
        let config = Config::new(
            &cli.site_root,
            cli.concurrency,
            cli.first_page,
            cli.last_page,
            cli.output,
        )
        .unwrap();
        let defaults = Config::default();
        assert_eq!(config.site_root, defaults.site_root);
        assert_eq!(config.concurrency, defaults.concurrency);
        assert_eq!(config.pages, defaults.pages);
        assert_eq!(config.output, defaults.output);
    }

    #[test]
    fn flags_override_defaults() {
        let cli = Cli::parse_from([
            "ted_scraper", "-c", "2", "--first-page", "3", "--last-page", "4", "-o", "x.json",
        ]);
        assert_eq!(cli.concurrency, 2);
        assert_eq!(cli.first_page, 3);
        assert_eq!(cli.last_page, 4);
        assert_eq!(cli.output, PathBuf::from("x.json"));
    }

    #[test]
    fn durations() {
        assert_eq!(format_duration(Duration::from_millis(2500)), "2.5s");
        assert_eq!(format_duration(Duration::from_secs(125)), "2m 5s");
        assert_eq!(format_duration(Duration::from_secs(3725)), "1h 2m 5s");
    }
}
