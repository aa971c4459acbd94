//! # CLI Module
//!
//! This module provides the command-line interface layer for sporecli, a
//! Spotify API client that builds song recommendations from a playlist. It
//! implements all user-facing CLI commands and coordinates between the API
//! services, data management, and the recommendation core.
//!
//! ## Command Categories
//!
//! ### Authentication
//!
//! - [`auth`] - Initiates the Spotify OAuth authentication flow with PKCE
//!   security
//!
//! ### Playlist Operations
//!
//! - [`update_playlist`] - Fetches a playlist (or the user's Liked Songs)
//!   from Spotify, enriches every song with artist genres and audio
//!   features, and caches the result locally
//! - [`list_playlist`] - Displays the cached songs with optional search
//!   filtering
//!
//! ### Recommendations
//!
//! - [`recommend`] - Ranks the cached songs by their distance from a chosen
//!   base song and optionally builds the resulting playlist on Spotify
//!
//! ### Information Commands
//!
//! - [`info`] - Trending genres, trending artists, and audio-feature
//!   statistics over the cached playlist
//!
//! ## Architecture Design
//!
//! The CLI module follows a layered architecture approach:
//!
//! ```text
//! CLI Layer (User Interface)
//!     ↓
//! Management Layer (Data/Cache Management) + Recommendation Core
//!     ↓
//! API Layer (Spotify Integration)
//!     ↓
//! Network Layer (HTTP Requests)
//! ```
//!
//! Each CLI command delegates to the management, recommendation, and API
//! modules while handling user interaction, progress feedback, and error
//! presentation.
//!
//! ## Data Flow Patterns
//!
//! ### Update Operations
//! 1. **Authentication Check**: Verify valid tokens exist
//! 2. **Count Guard**: Compare the cached song count with the remote total
//! 3. **API Interaction**: Fetch pages, artist genres, and audio features
//!    with rate limiting
//! 4. **Cache Management**: Persist the enriched songs locally
//! 5. **Progress Feedback**: Provide real-time user feedback
//!
//! ### Query Operations
//! 1. **Cache Loading**: Load the requested playlist from local storage
//! 2. **Data Processing**: Encode, rank, filter, and format for display
//! 3. **Output Generation**: Create formatted tables or information
//! 4. **Error Handling**: Point to `playlist update` when the cache is
//!    missing
//!
//! ## Error Handling Philosophy
//!
//! - **Graceful Degradation**: Per-song failures (missing genres, missing
//!   audio features) don't abort a playlist update
//! - **Helpful Messages**: Clear guidance on how to resolve issues
//! - **Recovery Suggestions**: Actionable advice for user recovery steps
//!
//! ## Usage Patterns
//!
//! ### Initial Setup
//! ```bash
//! sporecli auth                                    # Authenticate with Spotify
//! sporecli playlist update --url <playlist-url>    # Cache playlist songs
//! ```
//!
//! ### Regular Usage
//! ```bash
//! sporecli playlist --url <playlist-url>           # View cached songs
//! sporecli recommend --url <playlist-url> --song "Around the World" --build
//! sporecli info --url <playlist-url> --trending-genres
//! ```

mod auth;
mod info;
mod playlist;
mod recommend;

pub use auth::auth;
pub use info::info;
pub use playlist::list_playlist;
pub use playlist::update_playlist;
pub use recommend::recommend;
