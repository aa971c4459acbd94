//! # Spotify Integration Module
//!
//! This module provides the interface to the Spotify Web API, implementing
//! authentication, playlist data retrieval, and playlist management. It is
//! the integration layer between sporecli and Spotify's services, handling
//! HTTP communication, the OAuth flow, error handling, and rate limiting.
//!
//! ## Architecture
//!
//! Each submodule handles a specific domain of Spotify API functionality:
//!
//! ```text
//! Application Layer (CLI, Management)
//!          ↓
//! Spotify Integration Layer
//!     ├── Authentication (OAuth 2.0 PKCE)
//!     ├── Playlist Operations (Tracks, Liked Songs, Create, Modify)
//!     ├── Artist Operations (Genre Lookup)
//!     └── Track Operations (Audio Features)
//!          ↓
//! HTTP Layer (reqwest, JSON)
//!          ↓
//! Spotify Web API
//! ```
//!
//! ## Core Modules
//!
//! - [`auth`] - OAuth 2.0 PKCE flow: code verifier/challenge generation,
//!   browser launch, local callback handling, token exchange and refresh.
//! - [`playlist`] - Playlist reads (details, offset-paginated track pages,
//!   Liked Songs) and writes (duplicate detection, creation, clearing,
//!   chunked track insertion).
//! - [`artists`] - Artist metadata lookup, used to derive a song's genres
//!   from its artists.
//! - [`tracks`] - Batch audio-features retrieval.
//!
//! ## Rate Limiting
//!
//! Fetching a playlist touches the API once per page, once per distinct
//! artist, and once per hundred songs for audio features, so rate limits are
//! an expected condition rather than an error. Read operations handle
//! 429 Too Many Requests with exponential backoff, honoring the
//! `Retry-After` header when Spotify provides one, and retry 5xx responses
//! after a fixed delay. Retries are capped by [`MAX_BACKOFF_ATTEMPTS`];
//! other errors are propagated to the caller.
//!
//! ## API Coverage
//!
//! - `GET /playlists/{id}` - Playlist name and total track count
//! - `GET /playlists/{id}/tracks` - Playlist tracks with offset pagination
//! - `GET /me/tracks` - The user's Liked Songs
//! - `GET /artists/{id}` - Artist genres
//! - `GET /audio-features` - Batch audio features
//! - `GET /me/playlists` - The user's playlists for duplicate checking
//! - `POST /users/{user_id}/playlists` - Create new playlists
//! - `POST /playlists/{playlist_id}/tracks` - Add tracks to playlists
//! - `DELETE /playlists/{playlist_id}/tracks` - Remove tracks from playlists
//! - `POST /api/token` - Token exchange and refresh operations
//!
//! ## Error Types
//!
//! All API functions return `Result` types: `reqwest::Error` for HTTP
//! client, network, and API errors; `String` for authentication and token
//! management errors.

pub mod artists;
pub mod auth;
pub mod playlist;
pub mod tracks;

/// Upper bound on rate-limit retries for a single request before giving up.
pub const MAX_BACKOFF_ATTEMPTS: u32 = 5;
