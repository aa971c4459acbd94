use std::{io::Error, path::PathBuf};

use crate::types::CachedPlaylist;

/// Cache id used in place of a playlist id when the source is the user's
/// Liked Songs, which have no playlist of their own.
pub const LIKED_SONGS_CACHE_ID: &str = "liked-songs";

#[derive(Debug)]
pub enum LibraryError {
    IoError(Error),
    SerdeError(serde_json::Error),
}

impl From<Error> for LibraryError {
    fn from(err: Error) -> Self {
        LibraryError::IoError(err)
    }
}

pub struct PlaylistManager {
    playlist_id: String,
    playlist: CachedPlaylist,
}

impl PlaylistManager {
    pub fn new(playlist_id: String, playlist: Option<CachedPlaylist>) -> Self {
        Self {
            playlist_id,
            playlist: playlist.unwrap_or_default(),
        }
    }

    pub async fn load_from_cache(&self) -> Result<Self, LibraryError> {
        let path = Self::cache_path(&self);
        let content = async_fs::read_to_string(&path)
            .await
            .map_err(LibraryError::IoError)?;
        let playlist = serde_json::from_str(&content).map_err(LibraryError::SerdeError)?;
        Ok(Self {
            playlist_id: self.playlist_id.clone(),
            playlist,
        })
    }

    pub async fn save_to_cache(&self) -> Result<(), LibraryError> {
        let path = Self::cache_path(&self);
        if let Some(parent) = path.parent() {
            async_fs::create_dir_all(parent)
                .await
                .map_err(LibraryError::IoError)?;
        }

        let json =
            serde_json::to_string_pretty(&self.playlist).map_err(LibraryError::SerdeError)?;
        async_fs::write(&path, json)
            .await
            .map_err(LibraryError::IoError)
    }

    pub fn get_playlist(&self) -> CachedPlaylist {
        self.playlist.clone()
    }

    pub fn count_songs(&self) -> usize {
        self.playlist.songs.len()
    }

    fn cache_path(&self) -> PathBuf {
        let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
        path.push(format!(
            "sporecli/playlists/{playlist_id}/songs.json",
            playlist_id = self.playlist_id
        ));
        path
    }
}
