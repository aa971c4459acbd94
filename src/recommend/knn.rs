use std::cmp::Ordering;

use crate::types::Song;

/// A candidate song together with its distance from the base song.
#[derive(Debug, Clone)]
pub struct Neighbor {
    pub song: Song,
    pub distance: f64,
}

/// Distance between two binary membership vectors, summed positionally.
///
/// The vectors are not interchangeable: `indexed_a` belongs to the base song
/// the recommendation is computed for, `indexed_b` to the candidate. An item
/// the base song carries and the candidate lacks weighs double an item only
/// the candidate carries, and shared presence lowers the distance.
pub fn membership_distance(indexed_a: &[u8], indexed_b: &[u8]) -> f64 {
    let mut distance = 0.0;

    for (item_a, item_b) in indexed_a.iter().zip(indexed_b.iter()) {
        if item_a != item_b {
            distance += if *item_a == 1 { 0.4 } else { 0.2 };
        } else if *item_a == 1 {
            distance -= 0.4;
        }
    }

    distance
}

/// Overall distance between two songs.
///
/// Weighted sum of the genre membership distance, the artist membership
/// distance, the absolute popularity difference, and - when both songs carry
/// audio features - the absolute feature deltas. The factors live on very
/// different scales, which the weights fold into one orderable value. The
/// result has no unit and may be negative.
pub fn compute_distance(song_a: &Song, song_b: &Song) -> f64 {
    let genres_distance = membership_distance(&song_a.genres_indexed, &song_b.genres_indexed);
    let artists_distance = membership_distance(&song_a.artists_indexed, &song_b.artists_indexed);
    let popularity_distance = (f64::from(song_a.popularity) - f64::from(song_b.popularity)).abs();

    let mut distance = genres_distance + artists_distance * 0.4 + popularity_distance * 0.005;

    if let (Some(features_a), Some(features_b)) = (&song_a.features, &song_b.features) {
        let energy_distance = (features_a.energy - features_b.energy).abs();
        let valence_distance = (features_a.valence - features_b.valence).abs();
        let tempo_distance = (features_a.tempo - features_b.tempo).abs();
        let danceability_distance = (features_a.danceability - features_b.danceability).abs();
        // instrumentalness is noisy below the second decimal
        let instrumentalness_distance =
            (round2(features_a.instrumentalness) - round2(features_b.instrumentalness)).abs();

        distance += energy_distance * 0.6
            + valence_distance * 0.9
            + tempo_distance * 0.0025
            + danceability_distance * 0.25
            + instrumentalness_distance * 0.4;
    }

    distance
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Ranks every other song of the playlist by its distance from the base song
/// and returns the closest `number_of_songs`.
///
/// Brute force over all candidates, sorted ascending. The base song itself is
/// excluded by id; ties keep playlist order.
pub fn get_neighbors(songs: &[Song], base: &Song, number_of_songs: usize) -> Vec<Neighbor> {
    let mut neighbors: Vec<Neighbor> = songs
        .iter()
        .filter(|song| song.id != base.id)
        .map(|song| Neighbor {
            song: song.clone(),
            distance: compute_distance(base, song),
        })
        .collect();

    neighbors.sort_by(|a, b| a.distance.partial_cmp(&b.distance).unwrap_or(Ordering::Equal));
    neighbors.truncate(number_of_songs);

    neighbors
}
