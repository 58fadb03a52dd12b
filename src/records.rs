/// One talk found on a gallery listing page. `url` is site-relative.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingEntry {
    pub speaker: String,
    pub title: String,
    pub url: String,
    pub date: String,
    pub categories: String,
}

/// Summary-page fields for one talk; `topics` is comma-joined.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailRecord {
    pub talk_url: String,
    pub views: String,
    pub topics: String,
}

impl DetailRecord {
    pub fn empty(talk_url: &str) -> Self {
        Self {
            talk_url: talk_url.to_string(),
            views: String::new(),
            topics: String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptRecord {
    pub talk_url: String,
    pub text: String,
}

impl TranscriptRecord {
    pub fn empty(talk_url: &str) -> Self {
        Self {
            talk_url: talk_url.to_string(),
            text: String::new(),
        }
    }
}

/// Final joined record, one JSON object per talk.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct TalkRecord {
    pub speaker: String,
    pub title: String,
    pub date: String,
    pub url: String,
    pub categories: Vec<String>,
    pub transcript: String,
    pub view_n: i64,
    pub topics: Vec<String>,
}
