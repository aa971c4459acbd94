use std::time::Duration;

use reqwest::{Client, StatusCode};
use tokio::time::sleep;

use crate::{config, spotify::MAX_BACKOFF_ATTEMPTS, types::ArtistResponse, warning};

/// Retrieves a single artist from the Spotify Web API.
///
/// The artist object carries the genre list that Spotify does not attach to
/// tracks, so a song's genres are derived by querying each of its artists.
/// Callers should memoize results across songs - playlists repeat artists
/// constantly and this endpoint is the hottest path for rate limits during a
/// playlist update.
///
/// # Arguments
///
/// * `token` - Valid access token for Spotify API authentication
/// * `artist_id` - Spotify ID of the artist
///
/// # Rate Limiting
///
/// 429 responses are retried with exponential backoff, honoring the
/// `Retry-After` header when present. 5xx responses are retried after a
/// 10-second delay. Other errors are propagated.
pub async fn get_artist(token: &str, artist_id: &str) -> Result<ArtistResponse, reqwest::Error> {
    let api_url = format!(
        "{uri}/artists/{id}",
        uri = &config::spotify_apiurl(),
        id = artist_id
    );

    let mut attempt: u32 = 0;

    loop {
        let client = Client::new();
        let response = client.get(&api_url).bearer_auth(token).send().await?;

        if response.status() == StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("retry-after")
                .and_then(|value| value.to_str().ok())
                .and_then(|value| value.parse::<u64>().ok())
                .unwrap_or(0);

            attempt += 1;
            if attempt > MAX_BACKOFF_ATTEMPTS {
                warning!(
                    "Rate limit still active after {} attempts. Try again later.",
                    MAX_BACKOFF_ATTEMPTS
                );
                response.error_for_status()?;
                continue;
            }

            let delay = retry_after.max(2u64.pow(attempt));
            sleep(Duration::from_secs(delay)).await;
            continue;
        }

        let response = match response.error_for_status() {
            Ok(valid_response) => valid_response,
            Err(err) => {
                if let Some(status) = err.status() {
                    if status.is_server_error() {
                        sleep(Duration::from_secs(10)).await;
                        continue; // retry
                    }
                }
                return Err(err); // propagate other errors
            }
        };

        let json = response.json::<ArtistResponse>().await?;
        return Ok(json);
    }
}
