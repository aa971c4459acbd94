use serde::{Deserialize, Serialize};
use tabled::Tabled;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Token {
    pub access_token: String,
    pub refresh_token: String,
    pub scope: String,
    pub expires_in: u64,
    pub obtained_at: u64,
}

#[derive(Debug, Clone)]
pub struct PkceToken {
    pub code_verifier: String,
    pub token: Option<Token>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AudioFeatures {
    pub danceability: f64,
    pub energy: f64,
    pub instrumentalness: f64,
    pub tempo: f64,
    pub valence: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Song {
    pub id: String,
    pub name: String,
    pub artists: Vec<String>,
    pub genres: Vec<String>,
    pub popularity: u32,
    pub added_at: String,
    pub features: Option<AudioFeatures>,
    // membership vectors are playlist-scoped and rebuilt on every load
    #[serde(skip)]
    pub genres_indexed: Vec<u8>,
    #[serde(skip)]
    pub artists_indexed: Vec<u8>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CachedPlaylist {
    pub id: String,
    pub name: String,
    pub songs: Vec<Song>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistDetailsResponse {
    pub id: String,
    pub name: String,
    pub tracks: TracksTotal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TracksTotal {
    pub total: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistTracksResponse {
    pub items: Vec<PlaylistItem>,
    pub total: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistItem {
    pub added_at: Option<String>,
    pub track: Option<TrackObject>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackObject {
    pub id: Option<String>,
    pub name: String,
    pub uri: String,
    pub popularity: Option<u32>,
    pub artists: Vec<TrackArtist>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackArtist {
    pub id: Option<String>,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtistResponse {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub genres: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AudioFeaturesResponse {
    pub audio_features: Vec<Option<AudioFeaturesObject>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AudioFeaturesObject {
    pub id: String,
    pub danceability: f64,
    pub energy: f64,
    pub instrumentalness: f64,
    pub tempo: f64,
    pub valence: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePlaylistRequest {
    pub name: String,
    pub description: String,
    pub public: bool,
    pub collaborative: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePlaylistResponse {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddTracksRequest {
    pub uris: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddTracksResponse {
    pub snapshot_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserPlaylistsResponse {
    pub items: Vec<PlaylistSummary>,
    pub next: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistSummary {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteTracksRequest {
    pub tracks: Vec<TrackUri>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackUri {
    pub uri: String,
}

#[derive(Tabled)]
pub struct SongTableRow {
    pub name: String,
    pub artists: String,
    pub genres: String,
    pub popularity: String,
}

#[derive(Tabled)]
pub struct RecommendationTableRow {
    pub name: String,
    pub artists: String,
    pub genres: String,
    pub popularity: String,
    pub distance: String,
}

#[derive(Tabled)]
pub struct TrendTableRow {
    pub name: String,
    pub songs: String,
    pub share: String,
}

#[derive(Tabled)]
pub struct FeatureStatsRow {
    pub feature: String,
    pub min: String,
    pub mean: String,
    pub max: String,
}
