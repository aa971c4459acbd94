//! Spotify Playlist Recommender CLI Library
//!
//! This library provides functionality for building song recommendations from
//! a user's Spotify playlists. It fetches playlist data via the Spotify Web
//! API, enriches every song with artist genres and audio features, and ranks
//! songs by a hand-rolled nearest-neighbor distance to produce recommendation
//! playlists.
//!
//! # Modules
//!
//! - `api` - HTTP API endpoints for the local callback server
//! - `cli` - Command-line interface implementations
//! - `config` - Configuration management and environment variables
//! - `management` - High-level data management and caching
//! - `recommend` - Feature encoding and nearest-neighbor ranking
//! - `server` - Local HTTP server for OAuth callbacks
//! - `spotify` - Spotify Web API client implementation
//! - `types` - Data structures and type definitions
//! - `utils` - Utility functions and helpers
//!
//! # Example
//!
//! ```
//! use sporecli::{cli, config};
//!
//! #[tokio::main]
//! async fn main() -> sporecli::Res<()> {
//!     config::load_env().await?;
//!     // Use CLI functions...
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod management;
pub mod recommend;
pub mod server;
pub mod spotify;
pub mod types;
pub mod utils;

/// A convenient Result type alias for operations that may fail.
///
/// Provides a standard error handling pattern throughout the application
/// using a boxed dynamic error trait object, while maintaining Send + Sync
/// bounds for async contexts.
pub type Res<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Prints an informational message with a blue bullet point.
///
/// Used for general information and status updates throughout the
/// application. Accepts the same arguments as `println!`.
///
/// # Example
///
/// ```
/// info!("Mapping playlist songs...");
/// info!("Found {} songs", count);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
///
/// Used to provide positive feedback when operations complete successfully.
/// Accepts the same arguments as `println!`.
///
/// # Example
///
/// ```
/// success!("Authentication completed successfully");
/// success!("Cached {} songs", count);
/// ```
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// Immediately terminates the program with exit code 1 after printing, so it
/// should only be used for fatal errors where recovery is not possible.
/// Accepts the same arguments as `println!`.
///
/// # Example
///
/// ```
/// error!("Failed to load configuration");
/// // Program exits here - code after this will not execute
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark.
///
/// Used for recoverable issues or important information that users should
/// notice without terminating the program. Accepts the same arguments as
/// `println!`.
///
/// # Example
///
/// ```
/// warning!("Cache file not found, will create new one");
/// warning!("Skipping local track {}", name);
/// ```
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
