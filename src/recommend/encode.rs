use std::collections::HashSet;

use crate::types::Song;

/// The distinct genres and artists observed across one playlist, in
/// first-seen order. Membership vectors are positional over these lists.
#[derive(Debug, Clone, Default)]
pub struct Vocabulary {
    pub genres: Vec<String>,
    pub artists: Vec<String>,
}

impl Vocabulary {
    pub fn from_songs(songs: &[Song]) -> Self {
        let mut vocabulary = Vocabulary::default();
        let mut seen_genres = HashSet::new();
        let mut seen_artists = HashSet::new();

        for song in songs {
            for genre in &song.genres {
                if seen_genres.insert(genre.clone()) {
                    vocabulary.genres.push(genre.clone());
                }
            }
            for artist in &song.artists {
                if seen_artists.insert(artist.clone()) {
                    vocabulary.artists.push(artist.clone());
                }
            }
        }

        vocabulary
    }
}

/// Maps a song's items onto the playlist-wide item list in binary form.
pub fn membership_vector(items: &[String], all_items: &[String]) -> Vec<u8> {
    all_items
        .iter()
        .map(|item| u8::from(items.contains(item)))
        .collect()
}

/// Builds the playlist vocabularies and fills in every song's membership
/// vectors. Must be called after every playlist load, since the vectors are
/// never persisted.
pub fn index_playlist(songs: &mut [Song]) -> Vocabulary {
    let vocabulary = Vocabulary::from_songs(songs);

    for song in songs.iter_mut() {
        song.genres_indexed = membership_vector(&song.genres, &vocabulary.genres);
        song.artists_indexed = membership_vector(&song.artists, &vocabulary.artists);
    }

    vocabulary
}
