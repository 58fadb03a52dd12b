use anyhow::{bail, Result};
use tracing::warn;

use crate::records::{DetailRecord, ListingEntry, TalkRecord, TranscriptRecord};

/// Join the three stage outputs by position into final records.
///
/// `details` and `transcripts` must have been fetched from the URL list of
/// `listings`, in the same order. Each record carries the URL it was fetched
/// for, so a misaligned join is caught here instead of pairing the wrong talks.
pub fn join(
    site_root: &str,
    listings: Vec<ListingEntry>,
    details: Vec<DetailRecord>,
    transcripts: Vec<TranscriptRecord>,
) -> Result<Vec<TalkRecord>> {
    if details.len() != listings.len() || transcripts.len() != listings.len() {
        bail!(
            "stage outputs differ in length: {} listings, {} details, {} transcripts",
            listings.len(),
            details.len(),
            transcripts.len()
        );
    }

    listings
        .into_iter()
        .zip(details)
        .zip(transcripts)
        .enumerate()
        .map(|(i, ((listing, detail), transcript))| {
            if detail.talk_url != listing.url || transcript.talk_url != listing.url {
                bail!(
                    "record {} misaligned: listing {}, detail {}, transcript {}",
                    i,
                    listing.url,
                    detail.talk_url,
                    transcript.talk_url
                );
            }
            Ok(to_talk_record(site_root, listing, detail, transcript))
        })
        .collect()
}

fn to_talk_record(
    site_root: &str,
    listing: ListingEntry,
    detail: DetailRecord,
    transcript: TranscriptRecord,
) -> TalkRecord {
    TalkRecord {
        speaker: strip_newlines(&listing.speaker).to_string(),
        title: strip_newlines(&listing.title).to_string(),
        date: strip_newlines(&listing.date).to_string(),
        url: format!("{}{}", site_root, strip_newlines(&listing.url)),
        categories: split_list(strip_newlines(&listing.categories)),
        transcript: strip_newlines(&transcript.text).to_string(),
        view_n: parse_view_count(&detail.views),
        topics: split_list(strip_newlines(&detail.topics)),
    }
}

/// Trim newline characters only; other surrounding whitespace is content.
pub fn strip_newlines(s: &str) -> &str {
    s.trim_matches('\n')
}

/// `"1,234,567 views"` -> 1234567. Empty input counts as zero; anything else
/// that fails to parse is logged and also counted as zero.
pub fn parse_view_count(text: &str) -> i64 {
    let token = text.split_whitespace().next().unwrap_or("0");
    let digits = token.replace(',', "");
    digits.parse().unwrap_or_else(|e| {
        warn!("Unparseable view count {:?}: {}", text, e);
        0
    })
}

/// Split a comma-joined list, stripping newlines from each item. Spaces after
/// commas are kept. Empty input gives `[]` rather than a single empty item.
pub fn split_list(joined: &str) -> Vec<String> {
    if joined.is_empty() {
        return Vec::new();
    }
    joined
        .split(',')
        .map(|s| strip_newlines(s).to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listing(url: &str) -> ListingEntry {
        ListingEntry {
            speaker: "\nGrace Hopper\n".into(),
            title: "\nNanoseconds\n".into(),
            url: url.into(),
            date: "\nJun 2018\n".into(),
            categories: "Informative,Funny".into(),
        }
    }

    fn detail(url: &str, views: &str, topics: &str) -> DetailRecord {
        DetailRecord {
            talk_url: url.into(),
            views: views.into(),
            topics: topics.into(),
        }
    }

    fn transcript(url: &str, text: &str) -> TranscriptRecord {
        TranscriptRecord {
            talk_url: url.into(),
            text: text.into(),
        }
    }

    #[test]
    fn view_count_normalization() {
        assert_eq!(parse_view_count("1,234,567 views"), 1_234_567);
        assert_eq!(parse_view_count("1,234,567"), 1_234_567);
        assert_eq!(parse_view_count("\n42\n"), 42);
        assert_eq!(parse_view_count(""), 0);
        assert_eq!(parse_view_count("   "), 0);
        assert_eq!(parse_view_count("lots"), 0);
    }

    #[test]
    fn join_then_split_round_trip() {
        let items = ["a", "b", "c"];
        assert_eq!(split_list(&items.join(",")), vec!["a", "b", "c"]);
    }

    #[test]
    fn split_strips_only_newlines() {
        assert_eq!(split_list("Inspiring, Informative"), vec!["Inspiring", " Informative"]);
        assert_eq!(split_list("\nArt\n,Design"), vec!["Art", "Design"]);
        assert_eq!(split_list("a,,b"), vec!["a", "", "b"]);
        assert!(split_list("").is_empty());
    }

    #[test]
    fn strip_only_newlines() {
        assert_eq!(strip_newlines("\n\n title \n"), " title ");
    }

    #[test]
    fn joins_and_normalizes() {
        let records = join(
            "https://www.ted.com",
            vec![listing("/talks/grace")],
            vec![detail("/talks/grace", "2,500", "Computers,History")],
            vec![transcript("/talks/grace", "\nHello there.\n")],
        )
        .unwrap();

        assert_eq!(
            records,
            vec![TalkRecord {
                speaker: "Grace Hopper".into(),
                title: "Nanoseconds".into(),
                date: "Jun 2018".into(),
                url: "https://www.ted.com/talks/grace".into(),
                categories: vec!["Informative".into(), "Funny".into()],
                transcript: "Hello there.".into(),
                view_n: 2500,
                topics: vec!["Computers".into(), "History".into()],
            }]
        );
    }

    #[test]
    fn degraded_records_join_as_defaults() {
        let records = join(
            "https://www.ted.com",
            vec![listing("/talks/x")],
            vec![DetailRecord::empty("/talks/x")],
            vec![TranscriptRecord::empty("/talks/x")],
        )
        .unwrap();
        assert_eq!(records[0].view_n, 0);
        assert!(records[0].topics.is_empty());
        assert_eq!(records[0].transcript, "");
    }

    #[test]
    fn length_mismatch_is_fatal() {
        let err = join(
            "https://www.ted.com",
            vec![listing("/talks/a"), listing("/talks/b")],
            vec![detail("/talks/a", "1", "")],
            vec![transcript("/talks/a", ""), transcript("/talks/b", "")],
        );
        assert!(err.is_err());
    }

    #[test]
    fn identity_mismatch_is_fatal() {
        let err = join(
            "https://www.ted.com",
            vec![listing("/talks/a"), listing("/talks/b")],
            vec![detail("/talks/b", "1", ""), detail("/talks/a", "2", "")],
            vec![transcript("/talks/a", ""), transcript("/talks/b", "")],
        )
        .unwrap_err();
        assert!(err.to_string().contains("misaligned"));
    }
}
