use std::sync::Arc;

use clap::{
    CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};

use sporecli::{cli, config, error, types::PkceToken, utils};
use tokio::sync::Mutex;

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::White.on_default() | Effects::BOLD)
        .usage(AnsiColor::White.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightBlue.on_default())
        .placeholder(AnsiColor::BrightGreen.on_default())
}

#[derive(Parser, Debug, Clone)]
#[clap(
  version = env!("CARGO_PKG_VERSION"),
  name=env!("CARGO_PKG_NAME"),
  bin_name=env!("CARGO_PKG_NAME"),
  author=env!("CARGO_PKG_AUTHORS"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Authorize with Spotify API
    Auth,

    /// Handle cached playlist songs
    Playlist(PlaylistOptions),

    /// Recommend songs related to one song of a playlist
    Recommend(RecommendOptions),

    /// Statistics about a cached playlist
    Info(InfoOptions),

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
#[command(
    about = "Handle cached playlist songs",
    args_conflicts_with_subcommands = true // disallow mixing query flags with `update`
)]
pub struct PlaylistOptions {
    /// Playlist URL or id
    #[clap(long)]
    pub url: Option<String>,

    /// Use the user's Liked Songs instead of a playlist
    #[clap(long)]
    pub liked: bool,

    /// Search for songs by name
    #[clap(long)]
    pub search: Option<String>,

    /// Subcommands under `playlist` (e.g., `update`)
    #[command(subcommand)]
    pub command: Option<PlaylistSubcommand>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum PlaylistSubcommand {
    /// Update the cached songs from the Spotify API
    Update(PlaylistUpdateOpts),
}

#[derive(Parser, Debug, Clone)]
pub struct PlaylistUpdateOpts {
    /// Playlist URL or id
    #[clap(long)]
    pub url: Option<String>,

    /// Use the user's Liked Songs instead of a playlist
    #[clap(long)]
    pub liked: bool,

    /// Force update (skip the cached song count guard)
    #[clap(long)]
    pub force: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct RecommendOptions {
    /// Playlist URL or id
    #[clap(long)]
    url: Option<String>,

    /// Use the user's Liked Songs instead of a playlist
    #[clap(long)]
    liked: bool,

    /// Name of the base song the recommendations are computed for
    #[clap(long)]
    song: String,

    /// Artist name to disambiguate the base song
    #[clap(long)]
    artist: Option<String>,

    /// Number of songs to recommend
    #[clap(long, default_value_t = 50)]
    number_of_songs: u32,

    /// Include the distance column in the output
    #[clap(long)]
    with_distance: bool,

    /// Build the recommendation playlist in the user's library
    #[clap(long)]
    build: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct InfoOptions {
    /// Playlist URL or id
    #[clap(long)]
    url: Option<String>,

    /// Use the user's Liked Songs instead of a playlist
    #[clap(long)]
    liked: bool,

    /// Show the most frequent genres of the playlist
    #[clap(long)]
    trending_genres: bool,

    /// Show the most frequent artists of the playlist
    #[clap(long)]
    trending_artists: bool,

    /// Show min/mean/max statistics of the audio features
    #[clap(long)]
    audio_features: bool,

    /// Number of entries in the trend tables
    #[clap(long)]
    top: Option<usize>,

    /// Time range of songs considered, by the date they were added
    #[clap(long, default_value = "all-time", value_parser = utils::parse_time_range)]
    time_range: utils::TimeRange,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

#[tokio::main]
async fn main() {
    if let Err(e) = config::load_env().await {
        error!("Cannot load environment. Err: {}", e);
    }

    let cli = Cli::parse();

    match cli.command {
        Command::Auth => {
            let oauth_result: Arc<Mutex<Option<PkceToken>>> = Arc::new(Mutex::new(None));
            cli::auth(Arc::clone(&oauth_result)).await;
        }

        Command::Playlist(opt) => match opt.command {
            Some(PlaylistSubcommand::Update(u)) => {
                cli::update_playlist(u.url, u.liked, u.force).await
            }
            None => cli::list_playlist(opt.url, opt.liked, opt.search).await,
        },

        Command::Recommend(opt) => {
            cli::recommend(
                opt.url,
                opt.liked,
                opt.song,
                opt.artist,
                opt.number_of_songs,
                opt.with_distance,
                opt.build,
            )
            .await
        }

        Command::Info(opt) => {
            cli::info(
                opt.url,
                opt.liked,
                opt.trending_genres,
                opt.trending_artists,
                opt.audio_features,
                opt.top,
                opt.time_range,
            )
            .await
        }

        Command::Completions(opt) => {
            let mut cmd = Cli::command_for_update();
            let name = cmd.get_name().to_string();
            generate(opt.shell, &mut cmd, name, &mut std::io::stdout())
        }
    }
}
