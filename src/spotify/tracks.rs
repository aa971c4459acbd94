use std::time::Duration;

use reqwest::{Client, StatusCode};
use tokio::time::sleep;

use crate::{
    config,
    spotify::MAX_BACKOFF_ATTEMPTS,
    types::{AudioFeaturesObject, AudioFeaturesResponse},
    warning,
};

/// Retrieves audio features for multiple tracks in a single API request.
///
/// Combines up to 100 track IDs in one call, which is what makes enriching a
/// whole playlist affordable compared to per-track requests. The response
/// list is positionally aligned with the requested IDs, and unknown or
/// unanalyzable tracks come back as `null`, hence the `Option` entries.
///
/// # Arguments
///
/// * `token` - Valid access token for Spotify API authentication
/// * `song_ids` - Track IDs to fetch features for (at most 100)
///
/// # Rate Limiting
///
/// 429 responses are retried with exponential backoff, honoring the
/// `Retry-After` header when present. 5xx responses are retried after a
/// 10-second delay. Other errors are propagated.
pub async fn get_audio_features(
    token: &str,
    song_ids: &[String],
) -> Result<Vec<Option<AudioFeaturesObject>>, reqwest::Error> {
    let ids = song_ids
        .iter()
        .map(|id| id.as_str())
        .collect::<Vec<_>>()
        .join(",");

    let api_url = format!(
        "{uri}/audio-features?ids={ids}",
        uri = &config::spotify_apiurl(),
        ids = ids
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

        let json = response.json::<AudioFeaturesResponse>().await?;
        return Ok(json.audio_features);
    }
}
