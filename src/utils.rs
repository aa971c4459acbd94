use std::{cmp::Ordering, collections::HashSet, fmt};

use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use chrono::{DateTime, Duration, TimeZone, Utc};
use rand::{Rng, distr::Alphanumeric};
use sha2::{Digest, Sha256};

use crate::types::{Song, SongTableRow};

pub fn generate_code_verifier() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(128)
        .map(char::from)
        .collect()
}

pub fn generate_code_challenge(verifier: &str) -> String {
    let hash = Sha256::digest(verifier.as_bytes());
    URL_SAFE_NO_PAD.encode(hash)
}

pub fn playlist_url_to_id(url: &str) -> String {
    let uri = url.split('?').next().unwrap_or(url);

    match uri.split("open.spotify.com/playlist/").nth(1) {
        Some(id) => id.trim_end_matches('/').to_string(),
        // anything without the playlist URL marker is treated as a bare id
        None => uri.to_string(),
    }
}

pub fn remove_duplicate_songs(songs: &mut Vec<Song>) {
    let mut seen_ids = HashSet::new();
    songs.retain(|song| seen_ids.insert(song.id.clone()));
}

pub fn sort_song_rows(rows: &mut Vec<SongTableRow>) {
    rows.sort_by(|a, b| {
        match a.name.to_lowercase().cmp(&b.name.to_lowercase()) {
            Ordering::Equal => a.artists.cmp(&b.artists), // secondary sort: artists ascending
            other => other,
        }
    });
}

pub fn format_names(names: &[String]) -> String {
    names.iter().take(3).cloned().collect::<Vec<_>>().join(", ")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum TimeRange {
    AllTime,
    Month,
    Trimester,
    Semester,
    Year,
}

impl TimeRange {
    pub const ALL: [TimeRange; 5] = [
        TimeRange::AllTime,
        TimeRange::Month,
        TimeRange::Trimester,
        TimeRange::Semester,
        TimeRange::Year,
    ];

    pub fn cutoff(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        match self {
            // predates any Spotify library, so everything passes
            TimeRange::AllTime => Utc.with_ymd_and_hms(2000, 1, 1, 0, 0, 0).unwrap(),
            TimeRange::Month => now - Duration::days(30),
            TimeRange::Trimester => now - Duration::days(90),
            TimeRange::Semester => now - Duration::days(180),
            TimeRange::Year => now - Duration::days(365),
        }
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TimeRange::AllTime => "all-time",
            TimeRange::Month => "month",
            TimeRange::Trimester => "trimester",
            TimeRange::Semester => "semester",
            TimeRange::Year => "year",
        };
        write!(f, "{}", name)
    }
}

pub fn parse_time_range(raw: &str) -> Result<TimeRange, String> {
    let value = raw.trim().to_lowercase().replace('_', "-");

    if value.is_empty() {
        return Err("time range cannot be empty".to_string());
    }

    match value.as_str() {
        "all-time" => Ok(TimeRange::AllTime),
        "month" => Ok(TimeRange::Month),
        "trimester" => Ok(TimeRange::Trimester),
        "semester" => Ok(TimeRange::Semester),
        "year" => Ok(TimeRange::Year),
        other => Err(format!(
            "invalid value '{other}' (expected one of: all-time, month, trimester, semester, year)"
        )),
    }
}

pub fn songs_within_range(songs: &[Song], range: TimeRange) -> Vec<Song> {
    let cutoff = range.cutoff(Utc::now());

    songs
        .iter()
        .filter(|song| {
            DateTime::parse_from_rfc3339(&song.added_at)
                .map(|added_at| added_at.with_timezone(&Utc) >= cutoff)
                // entries without a usable timestamp stay in
                .unwrap_or(true)
        })
        .cloned()
        .collect()
}
