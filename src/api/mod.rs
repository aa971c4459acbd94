//! # API Module
//!
//! This module provides the HTTP endpoints for the temporary local web
//! server that sporecli runs during authentication.
//!
//! ## Endpoints
//!
//! - [`callback`] - Handles OAuth callback requests from Spotify's
//!   authorization server. This endpoint completes the PKCE authentication
//!   flow by exchanging the authorization code for an access token.
//! - [`health`] - Health check endpoint returning application status and
//!   version information.
//!
//! ## Architecture
//!
//! Built on the [Axum](https://docs.rs/axum) web framework; each endpoint is
//! an async function plugged into Axum's routing system by
//! [`crate::server::start_api_server`]. The callback handler shares state
//! with the running auth flow through an `Arc<Mutex<Option<PkceToken>>>`
//! extension: the auth flow deposits the PKCE code verifier there, and the
//! handler deposits the obtained token back.

mod callback;
mod health;

pub use callback::callback;
pub use health::health;
