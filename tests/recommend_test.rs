use sporecli::recommend::encode::{Vocabulary, index_playlist, membership_vector};
use sporecli::recommend::knn::{compute_distance, get_neighbors, membership_distance};
use sporecli::types::{AudioFeatures, Song};

// Helper function to create a test song
fn create_test_song(
    id: &str,
    name: &str,
    artists: &[&str],
    genres: &[&str],
    popularity: u32,
) -> Song {
    Song {
        id: id.to_string(),
        name: name.to_string(),
        artists: artists.iter().map(|artist| artist.to_string()).collect(),
        genres: genres.iter().map(|genre| genre.to_string()).collect(),
        popularity,
        added_at: "2023-10-01T12:00:00Z".to_string(),
        features: None,
        genres_indexed: Vec::new(),
        artists_indexed: Vec::new(),
    }
}

// Helper function to create a test song with membership vectors already set
fn create_indexed_song(id: &str, genres_indexed: &[u8], artists_indexed: &[u8], popularity: u32) -> Song {
    let mut song = create_test_song(id, id, &[], &[], popularity);
    song.genres_indexed = genres_indexed.to_vec();
    song.artists_indexed = artists_indexed.to_vec();
    song
}

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}

#[test]
fn test_vocabulary_first_seen_order() {
    let songs = vec![
        create_test_song("id1", "Song 1", &["Artist A"], &["pop", "rock"], 50),
        create_test_song("id2", "Song 2", &["Artist B", "Artist A"], &["rock", "metal"], 60),
    ];

    let vocabulary = Vocabulary::from_songs(&songs);

    // Distinct items in the order they were first observed
    assert_eq!(vocabulary.genres, vec!["pop", "rock", "metal"]);
    assert_eq!(vocabulary.artists, vec!["Artist A", "Artist B"]);
}

#[test]
fn test_membership_vector() {
    let all_items = vec!["pop".to_string(), "rock".to_string(), "metal".to_string()];

    let items = vec!["rock".to_string()];
    assert_eq!(membership_vector(&items, &all_items), vec![0, 1, 0]);

    let items = vec!["metal".to_string(), "pop".to_string()];
    assert_eq!(membership_vector(&items, &all_items), vec![1, 0, 1]);

    // Items outside the vocabulary are not represented
    let items = vec!["jazz".to_string()];
    assert_eq!(membership_vector(&items, &all_items), vec![0, 0, 0]);
}

#[test]
fn test_index_playlist() {
    let mut songs = vec![
        create_test_song("id1", "Song 1", &["Artist A"], &["pop", "rock"], 50),
        create_test_song("id2", "Song 2", &["Artist B"], &["rock"], 60),
    ];

    let vocabulary = index_playlist(&mut songs);

    // Every song's vectors span the whole vocabulary
    for song in &songs {
        assert_eq!(song.genres_indexed.len(), vocabulary.genres.len());
        assert_eq!(song.artists_indexed.len(), vocabulary.artists.len());
    }

    assert_eq!(songs[0].genres_indexed, vec![1, 1]);
    assert_eq!(songs[1].genres_indexed, vec![0, 1]);
    assert_eq!(songs[0].artists_indexed, vec![1, 0]);
    assert_eq!(songs[1].artists_indexed, vec![0, 1]);
}

#[test]
fn test_membership_distance_shared_presence() {
    // Shared items lower the distance
    assert_close(membership_distance(&[1], &[1]), -0.4);
}

#[test]
fn test_membership_distance_base_only() {
    // An item the base song carries and the candidate lacks
    assert_close(membership_distance(&[1], &[0]), 0.4);
}

#[test]
fn test_membership_distance_candidate_only() {
    // An item only the candidate carries weighs half
    assert_close(membership_distance(&[0], &[1]), 0.2);
}

#[test]
fn test_membership_distance_both_absent() {
    assert_close(membership_distance(&[0], &[0]), 0.0);
}

#[test]
fn test_membership_distance_is_asymmetric() {
    let a = [1, 0];
    let b = [0, 1];

    assert_close(membership_distance(&a, &b), 0.6);
    assert_close(membership_distance(&b, &a), 0.6);

    let a = [1, 1];
    let b = [0, 1];

    // base-only mismatch vs candidate-only mismatch
    assert_close(membership_distance(&a, &b), 0.0);
    assert_close(membership_distance(&b, &a), -0.2);
}

#[test]
fn test_membership_distance_mixed() {
    let a = [1, 1, 0, 0];
    let b = [1, 0, 1, 0];

    // -0.4 (shared) + 0.4 (base only) + 0.2 (candidate only) + 0
    assert_close(membership_distance(&a, &b), 0.2);
}

#[test]
fn test_compute_distance_membership_and_popularity() {
    let song_a = create_indexed_song("a", &[1, 1, 0], &[1, 0], 80);
    let song_b = create_indexed_song("b", &[1, 0, 1], &[0, 1], 60);

    // genres: -0.4 + 0.4 + 0.2 = 0.2
    // artists: (0.4 + 0.2) * 0.4 = 0.24
    // popularity: 20 * 0.005 = 0.1
    assert_close(compute_distance(&song_a, &song_b), 0.54);
}

#[test]
fn test_compute_distance_includes_audio_features() {
    let mut song_a = create_indexed_song("a", &[1, 1, 0], &[1, 0], 80);
    let mut song_b = create_indexed_song("b", &[1, 0, 1], &[0, 1], 60);

    song_a.features = Some(AudioFeatures {
        danceability: 0.5,
        energy: 0.8,
        instrumentalness: 0.0,
        tempo: 120.0,
        valence: 0.6,
    });
    song_b.features = Some(AudioFeatures {
        danceability: 0.7,
        energy: 0.6,
        instrumentalness: 0.5,
        tempo: 100.0,
        valence: 0.9,
    });

    // membership + popularity terms: 0.54
    // energy: 0.2 * 0.6 = 0.12
    // valence: 0.3 * 0.9 = 0.27
    // tempo: 20 * 0.0025 = 0.05
    // danceability: 0.2 * 0.25 = 0.05
    // instrumentalness: 0.5 * 0.4 = 0.2
    assert_close(compute_distance(&song_a, &song_b), 1.23);
}

#[test]
fn test_compute_distance_ignores_features_when_one_side_missing() {
    let mut song_a = create_indexed_song("a", &[1, 1, 0], &[1, 0], 80);
    let song_b = create_indexed_song("b", &[1, 0, 1], &[0, 1], 60);

    song_a.features = Some(AudioFeatures {
        danceability: 0.5,
        energy: 0.8,
        instrumentalness: 0.0,
        tempo: 120.0,
        valence: 0.6,
    });

    // Feature deltas only apply when both songs carry features
    assert_close(compute_distance(&song_a, &song_b), 0.54);
}

#[test]
fn test_compute_distance_rounds_instrumentalness() {
    let features = AudioFeatures {
        danceability: 0.5,
        energy: 0.5,
        instrumentalness: 0.001,
        tempo: 100.0,
        valence: 0.5,
    };

    let mut song_a = create_indexed_song("a", &[1], &[1], 50);
    song_a.features = Some(features.clone());

    // Sub-0.01 differences vanish after rounding
    let mut song_b = create_indexed_song("b", &[1], &[1], 50);
    song_b.features = Some(AudioFeatures {
        instrumentalness: 0.004,
        ..features.clone()
    });
    assert_close(compute_distance(&song_a, &song_b), -0.56);

    // 0.001 rounds to 0.00, 0.006 rounds to 0.01
    let mut song_c = create_indexed_song("c", &[1], &[1], 50);
    song_c.features = Some(AudioFeatures {
        instrumentalness: 0.006,
        ..features
    });
    assert_close(compute_distance(&song_a, &song_c), -0.556);
}

#[test]
fn test_compute_distance_is_deterministic() {
    let song_a = create_indexed_song("a", &[1, 0, 1], &[1, 0], 42);
    let song_b = create_indexed_song("b", &[0, 1, 1], &[0, 1], 77);

    let first = compute_distance(&song_a, &song_b);
    let second = compute_distance(&song_a, &song_b);

    assert_eq!(first, second);
}

#[test]
fn test_get_neighbors_excludes_base_song() {
    let mut songs = vec![
        create_test_song("base", "Base", &["Artist A"], &["pop"], 50),
        create_test_song("other", "Other", &["Artist A"], &["pop"], 60),
    ];
    index_playlist(&mut songs);

    let neighbors = get_neighbors(&songs, &songs[0], 10);

    assert_eq!(neighbors.len(), 1);
    assert_eq!(neighbors[0].song.id, "other");
}

#[test]
fn test_get_neighbors_sorted_ascending() {
    // Identical genre/artist profiles, so popularity drives the order
    let mut songs = vec![
        create_test_song("base", "Base", &["Artist A"], &["pop"], 50),
        create_test_song("far", "Far", &["Artist A"], &["pop"], 90),
        create_test_song("close", "Close", &["Artist A"], &["pop"], 55),
        create_test_song("middle", "Middle", &["Artist A"], &["pop"], 60),
    ];
    index_playlist(&mut songs);

    let neighbors = get_neighbors(&songs, &songs[0], 10);

    let ids: Vec<&str> = neighbors.iter().map(|n| n.song.id.as_str()).collect();
    assert_eq!(ids, vec!["close", "middle", "far"]);

    // Shared genre and artist make the distances negative
    assert!(neighbors.iter().all(|n| n.distance < 0.0));
    assert!(neighbors[0].distance <= neighbors[1].distance);
    assert!(neighbors[1].distance <= neighbors[2].distance);
}

#[test]
fn test_get_neighbors_truncates_to_requested_count() {
    let mut songs = vec![
        create_test_song("base", "Base", &["Artist A"], &["pop"], 50),
        create_test_song("s1", "Song 1", &["Artist A"], &["pop"], 55),
        create_test_song("s2", "Song 2", &["Artist A"], &["pop"], 60),
        create_test_song("s3", "Song 3", &["Artist A"], &["pop"], 90),
    ];
    index_playlist(&mut songs);

    let neighbors = get_neighbors(&songs, &songs[0], 2);

    assert_eq!(neighbors.len(), 2);
    assert_eq!(neighbors[0].song.id, "s1");
    assert_eq!(neighbors[1].song.id, "s2");
}

#[test]
fn test_get_neighbors_clamps_to_pool_size() {
    let mut songs = vec![
        create_test_song("base", "Base", &["Artist A"], &["pop"], 50),
        create_test_song("s1", "Song 1", &["Artist B"], &["rock"], 55),
        create_test_song("s2", "Song 2", &["Artist C"], &["metal"], 60),
    ];
    index_playlist(&mut songs);

    let neighbors = get_neighbors(&songs, &songs[0], 100);

    assert_eq!(neighbors.len(), 2);
}

#[test]
fn test_get_neighbors_ties_keep_playlist_order() {
    let mut songs = vec![
        create_test_song("base", "Base", &["Artist A"], &["pop"], 50),
        create_test_song("first", "Twin", &["Artist B"], &["rock"], 60),
        create_test_song("second", "Twin", &["Artist B"], &["rock"], 60),
    ];
    index_playlist(&mut songs);

    let neighbors = get_neighbors(&songs, &songs[0], 10);

    assert_eq!(neighbors.len(), 2);
    assert_eq!(neighbors[0].distance, neighbors[1].distance);
    assert_eq!(neighbors[0].song.id, "first");
    assert_eq!(neighbors[1].song.id, "second");
}
