use chrono::{Datelike, Duration, Utc};
use sporecli::types::{Song, SongTableRow};
use sporecli::utils::*;

// Helper function to create a test song
fn create_test_song(id: &str, name: &str, artists: &[&str], genres: &[&str]) -> Song {
    Song {
        id: id.to_string(),
        name: name.to_string(),
        artists: artists.iter().map(|artist| artist.to_string()).collect(),
        genres: genres.iter().map(|genre| genre.to_string()).collect(),
        popularity: 50,
        added_at: "2023-10-01T12:00:00Z".to_string(),
        features: None,
        genres_indexed: Vec::new(),
        artists_indexed: Vec::new(),
    }
}

// Helper function to create a test song table row
fn create_test_song_row(name: &str, artists: &str) -> SongTableRow {
    SongTableRow {
        name: name.to_string(),
        artists: artists.to_string(),
        genres: String::new(),
        popularity: "50".to_string(),
    }
}

#[test]
fn test_generate_code_verifier() {
    let verifier = generate_code_verifier();

    // Should be exactly 128 characters
    assert_eq!(verifier.len(), 128);

    // Should contain only alphanumeric characters
    assert!(verifier.chars().all(|c| c.is_ascii_alphanumeric()));

    // Two generated verifiers should be different
    let verifier2 = generate_code_verifier();
    assert_ne!(verifier, verifier2);
}

#[test]
fn test_generate_code_challenge() {
    let verifier = "test_verifier_123";
    let challenge = generate_code_challenge(verifier);

    // Should not be empty
    assert!(!challenge.is_empty());

    // Should be deterministic - same input produces same output
    let challenge2 = generate_code_challenge(verifier);
    assert_eq!(challenge, challenge2);

    // Different input should produce different output
    let challenge3 = generate_code_challenge("different_verifier");
    assert_ne!(challenge, challenge3);

    // Should be base64-encoded (URL-safe, no padding)
    assert!(
        challenge
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    );
}

#[test]
fn test_playlist_url_to_id() {
    // Full URL with share query parameters
    let id = playlist_url_to_id("https://open.spotify.com/playlist/37i9dQZF1DXcBWIGoYBM5M?si=abc123");
    assert_eq!(id, "37i9dQZF1DXcBWIGoYBM5M");

    // Full URL without query parameters
    let id = playlist_url_to_id("https://open.spotify.com/playlist/37i9dQZF1DXcBWIGoYBM5M");
    assert_eq!(id, "37i9dQZF1DXcBWIGoYBM5M");

    // Trailing slash is stripped
    let id = playlist_url_to_id("https://open.spotify.com/playlist/37i9dQZF1DXcBWIGoYBM5M/");
    assert_eq!(id, "37i9dQZF1DXcBWIGoYBM5M");

    // A bare id passes through unchanged
    let id = playlist_url_to_id("37i9dQZF1DXcBWIGoYBM5M");
    assert_eq!(id, "37i9dQZF1DXcBWIGoYBM5M");
}

#[test]
fn test_remove_duplicate_songs() {
    let mut songs = vec![
        create_test_song("id1", "Song 1", &["Artist A"], &["pop"]),
        create_test_song("id2", "Song 2", &["Artist B"], &["rock"]),
        create_test_song("id1", "Song 1 Duplicate", &["Artist A"], &["pop"]), // Duplicate
        create_test_song("id3", "Song 3", &["Artist C"], &["metal"]),
    ];

    remove_duplicate_songs(&mut songs);

    // Should have 3 unique songs
    assert_eq!(songs.len(), 3);

    // Should contain the first occurrence of each unique ID
    let ids: Vec<&String> = songs.iter().map(|song| &song.id).collect();
    assert_eq!(ids, vec!["id1", "id2", "id3"]);
}

#[test]
fn test_sort_song_rows() {
    let mut rows = vec![
        create_test_song_row("banana", "Artist Z"),
        create_test_song_row("Apple", "Artist B"),
        create_test_song_row("apple", "Artist A"), // Same name ignoring case, different artist
        create_test_song_row("Cherry", "Artist C"),
    ];

    sort_song_rows(&mut rows);

    // Should be sorted by name case-insensitively, then by artists ascending
    assert_eq!(rows[0].artists, "Artist A");
    assert_eq!(rows[1].artists, "Artist B");
    assert_eq!(rows[2].name, "banana");
    assert_eq!(rows[3].name, "Cherry");
}

#[test]
fn test_format_names() {
    let names = vec!["Daft Punk".to_string(), "Pharrell Williams".to_string()];
    assert_eq!(format_names(&names), "Daft Punk, Pharrell Williams");

    // Only the first three names are kept
    let many = vec![
        "a".to_string(),
        "b".to_string(),
        "c".to_string(),
        "d".to_string(),
    ];
    assert_eq!(format_names(&many), "a, b, c");

    // Empty list gives an empty string
    assert_eq!(format_names(&[]), "");
}

#[test]
fn test_time_range_display() {
    assert_eq!(TimeRange::AllTime.to_string(), "all-time");
    assert_eq!(TimeRange::Month.to_string(), "month");
    assert_eq!(TimeRange::Trimester.to_string(), "trimester");
    assert_eq!(TimeRange::Semester.to_string(), "semester");
    assert_eq!(TimeRange::Year.to_string(), "year");
}

#[test]
fn test_parse_time_range_valid_inputs() {
    assert_eq!(parse_time_range("month").unwrap(), TimeRange::Month);
    assert_eq!(parse_time_range("year").unwrap(), TimeRange::Year);

    // Case insensitivity
    assert_eq!(parse_time_range("ALL-TIME").unwrap(), TimeRange::AllTime);

    // Underscores are accepted as separators
    assert_eq!(parse_time_range("all_time").unwrap(), TimeRange::AllTime);

    // Surrounding whitespace is ignored
    assert_eq!(parse_time_range(" trimester ").unwrap(), TimeRange::Trimester);
}

#[test]
fn test_parse_time_range_invalid_inputs() {
    // Test empty string
    let result = parse_time_range("");
    assert!(result.is_err());
    assert!(result.unwrap_err().contains("cannot be empty"));

    // Test whitespace only
    let result = parse_time_range("   ");
    assert!(result.is_err());
    assert!(result.unwrap_err().contains("cannot be empty"));

    // Test invalid value
    let result = parse_time_range("decade");
    assert!(result.is_err());
    assert!(result.unwrap_err().contains("invalid value 'decade'"));
}

#[test]
fn test_time_range_cutoff() {
    let now = Utc::now();

    assert_eq!(TimeRange::Month.cutoff(now), now - Duration::days(30));
    assert_eq!(TimeRange::Trimester.cutoff(now), now - Duration::days(90));
    assert_eq!(TimeRange::Semester.cutoff(now), now - Duration::days(180));
    assert_eq!(TimeRange::Year.cutoff(now), now - Duration::days(365));

    // All-time resolves to a fixed date that predates any library
    assert_eq!(TimeRange::AllTime.cutoff(now).year(), 2000);
}

#[test]
fn test_time_range_all_constant() {
    assert_eq!(TimeRange::ALL.len(), 5);
    assert!(TimeRange::ALL.contains(&TimeRange::AllTime));
    assert!(TimeRange::ALL.contains(&TimeRange::Month));
    assert!(TimeRange::ALL.contains(&TimeRange::Trimester));
    assert!(TimeRange::ALL.contains(&TimeRange::Semester));
    assert!(TimeRange::ALL.contains(&TimeRange::Year));
}

#[test]
fn test_songs_within_range() {
    let mut old_song = create_test_song("id1", "Old Song", &["Artist A"], &["pop"]);
    old_song.added_at = "2001-01-01T00:00:00Z".to_string();

    let mut recent_song = create_test_song("id2", "Recent Song", &["Artist B"], &["rock"]);
    recent_song.added_at = Utc::now().to_rfc3339();

    // entries without a usable timestamp stay in
    let mut undated_song = create_test_song("id3", "Undated Song", &["Artist C"], &["metal"]);
    undated_song.added_at = String::new();

    let songs = vec![old_song, recent_song, undated_song];

    let all_time = songs_within_range(&songs, TimeRange::AllTime);
    assert_eq!(all_time.len(), 3);

    let month = songs_within_range(&songs, TimeRange::Month);
    assert_eq!(month.len(), 2);
    assert!(month.iter().all(|song| song.name != "Old Song"));
}
