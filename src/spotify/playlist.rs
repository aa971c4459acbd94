use std::time::Duration;

use reqwest::{Client, StatusCode};
use tokio::time::sleep;

use crate::{
    config, error,
    management::TokenManager,
    spotify::MAX_BACKOFF_ATTEMPTS,
    types::{
        AddTracksRequest, AddTracksResponse, CreatePlaylistRequest, CreatePlaylistResponse,
        DeleteTracksRequest, PlaylistDetailsResponse, PlaylistItem, PlaylistTracksResponse,
        TrackUri, UserPlaylistsResponse,
    },
    warning,
};

/// Retrieves a playlist's metadata, most importantly its name and total
/// track count.
///
/// The total count drives the pagination loop and the cache freshness guard,
/// so this is the first request of every playlist update.
///
/// # Authentication
///
/// Loads the token from the token manager. If no valid token is found, the
/// function terminates the program with an error message directing the user
/// to run `sporecli auth`.
///
/// # Retry Logic
///
/// Retries 5xx responses with a 10-second delay. Other errors are propagated
/// immediately.
pub async fn get_details(playlist_id: &str) -> Result<PlaylistDetailsResponse, reqwest::Error> {
    let api_url = format!(
        "{uri}/playlists/{id}",
        uri = &config::spotify_apiurl(),
        id = playlist_id
    );

    let mut token_mgr = match TokenManager::load().await {
        Ok(manager) => manager,
        Err(e) => {
            error!(
                "Failed to load token. Please run sporecli auth\n Error: {}",
                e
            );
        }
    };

    loop {
        let client = Client::new();
        let token = token_mgr.get_valid_token().await;
        let response = client.get(&api_url).bearer_auth(token).send().await;

        let response = match response {
            Ok(resp) => match resp.error_for_status() {
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
            },
            Err(err) => {
                return Err(err);
            } // network or reqwest error
        };

        let json = response.json::<PlaylistDetailsResponse>().await?;
        return Ok(json);
    }
}

/// Retrieves one page of a playlist's tracks.
///
/// Pages are addressed by offset; the Spotify API caps `limit` at 100 for
/// this endpoint, so a full playlist read walks offsets in steps of 100.
///
/// # Arguments
///
/// * `token` - Valid access token for Spotify API authentication
/// * `playlist_id` - Spotify ID of the playlist
/// * `limit` - Maximum number of items for this page (1-100)
/// * `offset` - Index of the first item of this page
///
/// # Rate Limiting
///
/// 429 responses are retried with exponential backoff. When Spotify sends a
/// `Retry-After` header its delay is honored if larger than the backoff
/// delay. After [`MAX_BACKOFF_ATTEMPTS`] attempts the rate-limit error is
/// propagated. 5xx responses are retried after a 10-second delay.
pub async fn get_tracks_page(
    token: &str,
    playlist_id: &str,
    limit: u32,
    offset: u64,
) -> Result<Vec<PlaylistItem>, reqwest::Error> {
    let api_url = format!(
        "{uri}/playlists/{id}/tracks?limit={limit}&offset={offset}",
        uri = &config::spotify_apiurl(),
        id = playlist_id,
        limit = limit,
        offset = offset
    );

    fetch_items(token, &api_url).await
}

/// Retrieves the total count of the user's Liked Songs.
///
/// Uses `limit=1` to minimize data transfer while still getting the total
/// from the response metadata.
pub async fn get_liked_total(token: &str) -> Result<u64, reqwest::Error> {
    let api_url = format!(
        "{uri}/me/tracks?limit=1",
        uri = &config::spotify_apiurl()
    );

    let client = Client::new();
    let response = client
        .get(&api_url)
        .bearer_auth(token)
        .send()
        .await?
        .error_for_status()?;

    let json = response.json::<PlaylistTracksResponse>().await?;

    Ok(json.total.unwrap_or(0))
}

/// Retrieves one page of the user's Liked Songs.
///
/// Saved-track items share their shape with playlist items, but the endpoint
/// caps `limit` at 50. Rate limiting is handled the same way as
/// [`get_tracks_page`].
pub async fn get_liked_page(
    token: &str,
    limit: u32,
    offset: u64,
) -> Result<Vec<PlaylistItem>, reqwest::Error> {
    let api_url = format!(
        "{uri}/me/tracks?limit={limit}&offset={offset}",
        uri = &config::spotify_apiurl(),
        limit = limit,
        offset = offset
    );

    fetch_items(token, &api_url).await
}

async fn fetch_items(token: &str, api_url: &str) -> Result<Vec<PlaylistItem>, reqwest::Error> {
    let mut attempt: u32 = 0;

    loop {
        let client = Client::new();
        let response = client.get(api_url).bearer_auth(token).send().await?;

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
                return response.error_for_status().map(|_| Vec::new());
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

        let json = response.json::<PlaylistTracksResponse>().await?;
        return Ok(json.items);
    }
}

/// Checks whether a playlist with the given name exists in the user's
/// library.
///
/// Walks the user's playlists page by page and compares names. Returns the
/// id of the first match, or `None` when no playlist carries the name. Used
/// for duplicate detection before creating a recommendation playlist.
pub async fn exists(name: &str) -> Result<Option<String>, reqwest::Error> {
    let mut token_mgr = match TokenManager::load().await {
        Ok(manager) => manager,
        Err(e) => {
            error!(
                "Failed to load token. Please run sporecli auth\n Error: {}",
                e
            );
        }
    };

    let mut offset: u64 = 0;

    loop {
        let api_url = format!(
            "{uri}/me/playlists?limit=50&offset={offset}",
            uri = &config::spotify_apiurl(),
            offset = offset
        );

        let client = Client::new();
        let token = token_mgr.get_valid_token().await;
        let response = client
            .get(&api_url)
            .bearer_auth(token)
            .send()
            .await?
            .error_for_status()?;

        let json = response.json::<UserPlaylistsResponse>().await?;

        if let Some(playlist) = json.items.iter().find(|playlist| playlist.name == name) {
            return Ok(Some(playlist.id.clone()));
        }

        if json.next.is_none() || json.items.is_empty() {
            return Ok(None);
        }

        offset += 50;
    }
}

/// Creates a new private playlist in the user's library.
///
/// The owning user is taken from the configuration. Retries 5xx responses
/// with a 10-second delay; other errors are propagated.
pub async fn create(
    name: String,
    description: String,
) -> Result<CreatePlaylistResponse, reqwest::Error> {
    let api_url = format!(
        "{uri}/users/{user_id}/playlists",
        uri = &config::spotify_apiurl(),
        user_id = &config::spotify_user()
    );

    let body = CreatePlaylistRequest {
        name,
        description,
        public: false,
        collaborative: false,
    };

    let mut token_mgr = match TokenManager::load().await {
        Ok(manager) => manager,
        Err(e) => {
            error!(
                "Failed to load token. Please run sporecli auth\n Error: {}",
                e
            );
        }
    };

    loop {
        let client = Client::new();
        let token = token_mgr.get_valid_token().await;
        let response = client
            .post(&api_url)
            .bearer_auth(token)
            .json(&body)
            .send()
            .await;

        let response = match response {
            Ok(resp) => match resp.error_for_status() {
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
            },
            Err(err) => {
                return Err(err);
            } // network or reqwest error
        };

        let json = response.json::<CreatePlaylistResponse>().await?;
        return Ok(json);
    }
}

/// Adds tracks to a playlist.
///
/// The endpoint accepts at most 100 URIs per request; the caller chunks
/// accordingly.
pub async fn add_tracks(
    playlist_id: String,
    uris: Vec<String>,
) -> Result<AddTracksResponse, reqwest::Error> {
    let api_url = format!(
        "{uri}/playlists/{id}/tracks",
        uri = &config::spotify_apiurl(),
        id = playlist_id
    );

    let mut token_mgr = match TokenManager::load().await {
        Ok(manager) => manager,
        Err(e) => {
            error!(
                "Failed to load token. Please run sporecli auth\n Error: {}",
                e
            );
        }
    };

    let client = Client::new();
    let token = token_mgr.get_valid_token().await;
    let response = client
        .post(&api_url)
        .bearer_auth(token)
        .json(&AddTracksRequest { uris })
        .send()
        .await?
        .error_for_status()?;

    let json = response.json::<AddTracksResponse>().await?;
    Ok(json)
}

/// Removes every track from a playlist.
///
/// Reads the playlist's current track URIs page by page and deletes them in
/// chunks of 100. Used to empty an existing recommendation playlist before
/// refilling it, instead of creating a duplicate.
pub async fn clear(playlist_id: &str) -> Result<(), reqwest::Error> {
    let mut token_mgr = match TokenManager::load().await {
        Ok(manager) => manager,
        Err(e) => {
            error!(
                "Failed to load token. Please run sporecli auth\n Error: {}",
                e
            );
        }
    };

    let mut uris: Vec<String> = Vec::new();
    let mut offset: u64 = 0;

    loop {
        let token = token_mgr.get_valid_token().await;
        let items = get_tracks_page(&token, playlist_id, 100, offset).await?;
        if items.is_empty() {
            break;
        }

        uris.extend(
            items
                .iter()
                .filter_map(|item| item.track.as_ref().map(|track| track.uri.clone())),
        );
        offset += 100;
    }

    let api_url = format!(
        "{uri}/playlists/{id}/tracks",
        uri = &config::spotify_apiurl(),
        id = playlist_id
    );

    for chunk in uris.chunks(100) {
        let body = DeleteTracksRequest {
            tracks: chunk
                .iter()
                .map(|uri| TrackUri { uri: uri.clone() })
                .collect(),
        };

        let client = Client::new();
        let token = token_mgr.get_valid_token().await;
        client
            .delete(&api_url)
            .bearer_auth(token)
            .json(&body)
            .send()
            .await?
            .error_for_status()?;
    }

    Ok(())
}
