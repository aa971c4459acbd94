mod auth;
mod genres;
mod library;

pub use auth::TokenManager;
pub use genres::ArtistGenreManager;
pub use library::LIKED_SONGS_CACHE_ID;
pub use library::LibraryError;
pub use library::PlaylistManager;
