use tabled::Table;

use crate::{
    error, info,
    management::PlaylistManager,
    recommend::{encode, knn},
    spotify, success,
    types::{RecommendationTableRow, Song, SongTableRow},
    utils, warning,
};

/// Upper bound on the number of recommended songs, carried over from the
/// playlist endpoints this feeds into.
const MAX_NEIGHBORS: usize = 100;

pub async fn recommend(
    url: Option<String>,
    liked: bool,
    song_name: String,
    artist_name: Option<String>,
    number_of_songs: u32,
    with_distance: bool,
    build_playlist: bool,
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

    let mut number_of_songs = number_of_songs as usize;
    if number_of_songs == 0 {
        error!("Number of songs must be at least 1.");
    }
    if number_of_songs > MAX_NEIGHBORS {
        warning!("Maximum number of songs is {}.", MAX_NEIGHBORS);
        number_of_songs = MAX_NEIGHBORS;
    }

    let mut songs = playlist.songs;
    encode::index_playlist(&mut songs);

    let base_song = match find_base_song(&songs, &song_name, artist_name.as_deref()) {
        Some(song) => song.clone(),
        None => error!(
            "Song {:?} not found in playlist {:?}.",
            song_name, playlist.name
        ),
    };

    print_base_characteristics(&base_song);

    let neighbors = knn::get_neighbors(&songs, &base_song, number_of_songs);
    if neighbors.is_empty() {
        warning!("No other songs in the playlist to compare against.");
        return;
    }

    if with_distance {
        let table_rows: Vec<RecommendationTableRow> = neighbors
            .iter()
            .map(|neighbor| RecommendationTableRow {
                name: neighbor.song.name.clone(),
                artists: utils::format_names(&neighbor.song.artists),
                genres: utils::format_names(&neighbor.song.genres),
                popularity: neighbor.song.popularity.to_string(),
                distance: format!("{:.3}", neighbor.distance),
            })
            .collect();

        println!("{}", Table::new(table_rows));
    } else {
        let table_rows: Vec<SongTableRow> = neighbors
            .iter()
            .map(|neighbor| SongTableRow {
                name: neighbor.song.name.clone(),
                artists: utils::format_names(&neighbor.song.artists),
                genres: utils::format_names(&neighbor.song.genres),
                popularity: neighbor.song.popularity.to_string(),
            })
            .collect();

        println!("{}", Table::new(table_rows));
    }

    if build_playlist {
        build_recommendation_playlist(&playlist.name, &base_song, &neighbors).await;
    }
}

fn find_base_song<'a>(
    songs: &'a [Song],
    song_name: &str,
    artist_name: Option<&str>,
) -> Option<&'a Song> {
    let name_term = song_name.to_lowercase();

    songs.iter().find(|song| {
        if song.name.to_lowercase() != name_term {
            return false;
        }

        match artist_name {
            Some(artist) => song
                .artists
                .iter()
                .any(|song_artist| song_artist.to_lowercase() == artist.to_lowercase()),
            None => true,
        }
    })
}

fn print_base_characteristics(song: &Song) {
    info!("Base song: {}", song.name);
    info!("Artists: {}", song.artists.join(", "));
    info!("Genres: {}", song.genres.join(", "));
    info!("Popularity: {}", song.popularity);

    if let Some(features) = &song.features {
        info!("Danceability: {}", features.danceability);
        info!("Energy: {}", features.energy);
        info!("Instrumentalness: {}", features.instrumentalness);
        info!("Tempo: {}", features.tempo);
        info!("Valence: {}", features.valence);
    }
}

async fn build_recommendation_playlist(
    base_playlist_name: &str,
    base_song: &Song,
    neighbors: &[knn::Neighbor],
) {
    let playlist_name = format!("'{}' Related", base_song.name);
    let description = format!(
        "Songs related to '{}', within the playlist {}",
        base_song.name, base_playlist_name
    );

    let playlist_id = match spotify::playlist::exists(&playlist_name).await {
        Ok(Some(existing_id)) => {
            info!("Playlist {} already exists. Replacing its songs.", playlist_name);
            if let Err(e) = spotify::playlist::clear(&existing_id).await {
                warning!("Failed to clear existing playlist: {}", e);
            }
            Some(existing_id)
        }
        Ok(None) => match spotify::playlist::create(playlist_name.clone(), description).await {
            Ok(response) => {
                success!("Playlist {} created.", playlist_name);
                Some(response.id)
            }
            Err(e) => {
                warning!("Failed to create playlist: {}", e);
                None
            }
        },
        Err(e) => {
            warning!("Failed to check if playlist exists: {}", e);
            None
        }
    };

    let Some(playlist_id) = playlist_id else {
        return;
    };

    // the base song leads, followed by its neighbors in ranking order
    let uris: Vec<String> = std::iter::once(base_song)
        .chain(neighbors.iter().map(|neighbor| &neighbor.song))
        .map(|song| format!("spotify:track:{}", song.id))
        .collect();

    for chunk in uris.chunks(100) {
        match spotify::playlist::add_tracks(playlist_id.clone(), chunk.to_vec()).await {
            Ok(_) => success!("Added {} songs to {}.", chunk.len(), playlist_name),
            Err(e) => warning!("Failed to add songs to playlist: {}", e),
        }
    }
}
