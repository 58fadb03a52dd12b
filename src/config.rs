use std::ops::RangeInclusive;
use std::path::PathBuf;

use anyhow::{bail, Result};

pub const SITE_ROOT: &str = "https://www.ted.com";
pub const CONCURRENCY: usize = 5;
pub const FIRST_PAGE: u32 = 1;
pub const LAST_PAGE: u32 = 59;
pub const OUTPUT_FILE: &str = "tedtalk_full.json";

/// Settings shared by every stage of one run.
#[derive(Debug, Clone)]
pub struct Config {
    pub site_root: String,
    pub concurrency: usize,
    pub pages: RangeInclusive<u32>,
    pub output: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            site_root: SITE_ROOT.to_string(),
            concurrency: CONCURRENCY,
            pages: FIRST_PAGE..=LAST_PAGE,
            output: PathBuf::from(OUTPUT_FILE),
        }
    }
}

impl Config {
    pub fn new(
        site_root: &str,
        concurrency: usize,
        first_page: u32,
        last_page: u32,
        output: PathBuf,
    ) -> Result<Self> {
        if first_page > last_page {
            bail!(
                "first page ({}) is after last page ({})",
                first_page,
                last_page
            );
        }
        let site_root = site_root.trim_end_matches('/');
        if site_root.is_empty() {
            bail!("site root must not be empty");
        }

        Ok(Self {
            site_root: site_root.to_string(),
            concurrency: concurrency.max(1),
            pages: first_page..=last_page,
            output,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_cover_full_gallery() {
        let c = Config::default();
        assert_eq!(c.site_root, "https://www.ted.com");
        assert_eq!(c.concurrency, 5);
        assert_eq!(c.pages, 1..=59);
        assert_eq!(c.output, PathBuf::from("tedtalk_full.json"));
    }

    #[test]
    fn trailing_slash_trimmed() {
        let c = Config::new("http://localhost:8080/", 5, 1, 2, "out.json".into()).unwrap();
        assert_eq!(c.site_root, "http://localhost:8080");
    }

    #[test]
    fn zero_concurrency_clamped() {
        let c = Config::new(SITE_ROOT, 0, 1, 1, "out.json".into()).unwrap();
        assert_eq!(c.concurrency, 1);
    }

    #[test]
    fn inverted_page_range_rejected() {
        assert!(Config::new(SITE_ROOT, 5, 3, 2, "out.json".into()).is_err());
    }
}
