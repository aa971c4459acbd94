use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use tabled::Table;

use crate::{
    error,
    management::{ArtistGenreManager, LIKED_SONGS_CACHE_ID, PlaylistManager, TokenManager},
    spotify, success,
    types::{AudioFeatures, CachedPlaylist, PlaylistItem, Song, SongTableRow},
    utils, warning,
};

pub async fn update_playlist(url: Option<String>, liked: bool, force: bool) {
    let mut token_mgr = match TokenManager::load().await {
        Ok(manager) => manager,
        Err(e) => {
            error!(
                "Failed to load token. Please run sporecli auth\n Error: {}",
                e
            );
        }
    };

    let (playlist_id, playlist_name, total) = if liked {
        let token = token_mgr.get_valid_token().await;
        let total = match spotify::playlist::get_liked_total(&token).await {
            Ok(total) => total,
            Err(e) => error!("Failed to fetch liked songs count: {}", e),
        };
        (
            LIKED_SONGS_CACHE_ID.to_string(),
            "Liked Songs".to_string(),
            total,
        )
    } else {
        let Some(url) = url else {
            error!("Provide a playlist with --url or use --liked.");
        };
        let playlist_id = utils::playlist_url_to_id(&url);
        let details = match spotify::playlist::get_details(&playlist_id).await {
            Ok(details) => details,
            Err(e) => error!("Failed to fetch playlist details: {}", e),
        };
        (details.id, details.name, details.tracks.total)
    };

    let cached_count = match PlaylistManager::new(playlist_id.clone(), None)
        .load_from_cache()
        .await
    {
        Ok(manager) => manager.count_songs(),
        Err(_) => 0,
    };

    if cached_count as u64 == total && !force {
        success!(
            "Playlist cache for {} is up to date. Nothing to update here.",
            playlist_name
        );
        return;
    }

    let mut genre_mgr = ArtistGenreManager::load()
        .await
        .unwrap_or_else(|_| ArtistGenreManager::new());

    let pb = ProgressBar::new_spinner();
    pb.set_message(format!("Mapping songs from {}...", playlist_name));
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_style(
        ProgressStyle::with_template("{spinner:.blue} {msg}")
            .unwrap()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    );

    // liked songs pages cap at 50 items, playlist pages at 100
    let page_size: u64 = if liked { 50 } else { 100 };
    let mut items: Vec<PlaylistItem> = Vec::new();
    let mut offset: u64 = 0;

    while offset < total {
        let token = token_mgr.get_valid_token().await;
        let page = if liked {
            spotify::playlist::get_liked_page(&token, page_size as u32, offset).await
        } else {
            spotify::playlist::get_tracks_page(&token, &playlist_id, page_size as u32, offset).await
        };

        match page {
            Ok(page_items) => {
                if page_items.is_empty() {
                    break;
                }

                items.extend(page_items);
                pb.set_message(format!("Mapped {}/{} songs...", items.len(), total));
                offset += page_size;
            }
            Err(e) => {
                pb.finish_and_clear();
                error!("Failed to fetch songs: {}", e);
            }
        }
    }

    let mut songs: Vec<Song> = Vec::new();

    for item in items {
        let added_at = item.added_at.clone().unwrap_or_default();
        let Some(track) = item.track else {
            warning!("Skipping an entry without track data.");
            continue;
        };
        let Some(track_id) = track.id.clone() else {
            warning!("Skipping local track {}.", track.name);
            continue;
        };

        let mut genres: Vec<String> = Vec::new();
        for artist in &track.artists {
            let Some(artist_id) = &artist.id else {
                continue;
            };

            let artist_genres = if let Some(cached) = genre_mgr.get(artist_id) {
                cached.clone()
            } else {
                let token = token_mgr.get_valid_token().await;
                match spotify::artists::get_artist(&token, artist_id).await {
                    Ok(response) => {
                        genre_mgr.add(artist_id.clone(), response.genres.clone());
                        response.genres
                    }
                    Err(e) => {
                        warning!("Failed to fetch genres for artist {}: {}", artist.name, e);
                        Vec::new()
                    }
                }
            };

            for genre in artist_genres {
                if !genres.contains(&genre) {
                    genres.push(genre);
                }
            }
        }

        songs.push(Song {
            id: track_id,
            name: track.name.clone(),
            artists: track
                .artists
                .iter()
                .map(|artist| artist.name.clone())
                .collect(),
            genres,
            popularity: track.popularity.unwrap_or(0),
            added_at,
            features: None,
            genres_indexed: Vec::new(),
            artists_indexed: Vec::new(),
        });

        pb.set_message(format!(
            "Mapped genres for {}/{} songs...",
            songs.len(),
            total
        ));
    }

    pb.set_message("Fetching audio features...");

    let song_ids: Vec<String> = songs.iter().map(|song| song.id.clone()).collect();

    for chunk in song_ids.chunks(100) {
        let token = token_mgr.get_valid_token().await;
        match spotify::tracks::get_audio_features(&token, chunk).await {
            Ok(features_list) => {
                for features in features_list.into_iter().flatten() {
                    if let Some(song) = songs.iter_mut().find(|song| song.id == features.id) {
                        song.features = Some(AudioFeatures {
                            danceability: features.danceability,
                            energy: features.energy,
                            instrumentalness: features.instrumentalness,
                            tempo: features.tempo,
                            valence: features.valence,
                        });
                    }
                }
            }
            Err(e) => warning!("Failed to fetch audio features batch: {}", e),
        }
    }

    utils::remove_duplicate_songs(&mut songs);

    pb.finish_and_clear();
    success!("Mapped {} songs from {}.", songs.len(), playlist_name);

    let playlist = CachedPlaylist {
        id: playlist_id.clone(),
        name: playlist_name,
        songs,
    };

    if let Err(e) = PlaylistManager::new(playlist_id, Some(playlist))
        .save_to_cache()
        .await
    {
        error!("Failed to cache playlist songs. Err: {:?}", e);
    }

    if let Err(e) = genre_mgr.persist().await {
        warning!("Cannot cache artist genres. Err: {}", e);
    }

    success!("Playlist cache updated.");
}

pub async fn list_playlist(url: Option<String>, liked: bool, search: Option<String>) {
    let playlist_id = resolve_playlist_id(url, liked);

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

    let mut songs = playlist.songs;

    if let Some(song_search) = search {
        let search_term = song_search.to_lowercase();
        songs.retain(|song| song.name.to_lowercase().contains(&search_term));
    }

    let mut table_rows: Vec<SongTableRow> = songs
        .into_iter()
        .map(|song| SongTableRow {
            name: song.name,
            artists: utils::format_names(&song.artists),
            genres: utils::format_names(&song.genres),
            popularity: song.popularity.to_string(),
        })
        .collect();

    utils::sort_song_rows(&mut table_rows);

    let table = Table::new(table_rows);
    println!(
        "Playlist: {name}\n{table}",
        name = playlist.name,
        table = table
    );
}

pub(crate) fn resolve_playlist_id(url: Option<String>, liked: bool) -> String {
    if liked {
        return LIKED_SONGS_CACHE_ID.to_string();
    }

    match url {
        Some(url) => utils::playlist_url_to_id(&url),
        None => error!("Provide a playlist with --url or use --liked."),
    }
}
