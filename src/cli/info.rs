use std::{cmp::Ordering, collections::HashMap};

use tabled::Table;

use crate::{
    error,
    management::PlaylistManager,
    types::{AudioFeatures, FeatureStatsRow, Song, TrendTableRow},
    utils, warning,
};

/// Number of entries shown in the trend tables when `--top` is not given.
const DEFAULT_TOP: usize = 10;

pub async fn info(
    url: Option<String>,
    liked: bool,
    trending_genres: bool,
    trending_artists: bool,
    audio_features: bool,
    top: Option<usize>,
    time_range: utils::TimeRange,
) {
    let playlist_id = super::playlist::resolve_playlist_id(url, liked);

    let playlist = match PlaylistManager::new(playlist_id, None)
        .load_from_cache()
        .await
    {
        Ok(manager) => manager.get_playlist(),
        Err(e) => error!(
            "Failed to load playlist cache: {:?}\nRun sporecli playlist update first.",
            e
        ),
    };

    let songs = utils::songs_within_range(&playlist.songs, time_range);
    if songs.is_empty() {
        warning!(
            "No songs of {} were added within the {} range.",
            playlist.name,
            time_range
        );
        return;
    }

    if trending_genres {
        let counted = count_occurrences(songs.iter().flat_map(|song| song.genres.iter()));
        print_trend_table(counted, top.unwrap_or(DEFAULT_TOP));
        return;
    }

    if trending_artists {
        let counted = count_occurrences(songs.iter().flat_map(|song| song.artists.iter()));
        print_trend_table(counted, top.unwrap_or(DEFAULT_TOP));
        return;
    }

    if audio_features {
        print_feature_statistics(&songs);
    }
}

fn count_occurrences<'a>(items: impl Iterator<Item = &'a String>) -> Vec<(String, usize)> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    for item in items {
        *counts.entry(item.clone()).or_insert(0) += 1;
    }

    let mut counted: Vec<(String, usize)> = counts.into_iter().collect();
    counted.sort_by(|a, b| match b.1.cmp(&a.1) {
        Ordering::Equal => a.0.cmp(&b.0), // secondary sort: name ascending
        other => other,
    });

    counted
}

fn print_trend_table(counted: Vec<(String, usize)>, top: usize) {
    let total: usize = counted.iter().map(|(_, count)| count).sum();

    let table_rows: Vec<TrendTableRow> = counted
        .into_iter()
        .take(top)
        .map(|(name, count)| TrendTableRow {
            name,
            songs: count.to_string(),
            share: format!("{:.2}%", count as f64 / total as f64 * 100.0),
        })
        .collect();

    println!("{}", Table::new(table_rows));
}

fn print_feature_statistics(songs: &[Song]) {
    let features: Vec<&AudioFeatures> = songs
        .iter()
        .filter_map(|song| song.features.as_ref())
        .collect();

    if features.is_empty() {
        warning!("No audio features cached for this playlist.");
        return;
    }

    let table_rows = vec![
        feature_row("danceability", features.iter().map(|f| f.danceability)),
        feature_row("energy", features.iter().map(|f| f.energy)),
        feature_row(
            "instrumentalness",
            features.iter().map(|f| f.instrumentalness),
        ),
        feature_row("tempo", features.iter().map(|f| f.tempo)),
        feature_row("valence", features.iter().map(|f| f.valence)),
    ];

    println!("{}", Table::new(table_rows));
}

fn feature_row(name: &str, values: impl Iterator<Item = f64>) -> FeatureStatsRow {
    let values: Vec<f64> = values.collect();
    let min = values.iter().cloned().fold(f64::INFINITY, f64::min);
    let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let mean = values.iter().sum::<f64>() / values.len() as f64;

    FeatureStatsRow {
        feature: name.to_string(),
        min: format!("{min:.3}"),
        mean: format!("{mean:.3}"),
        max: format!("{max:.3}"),
    }
}
