//! # Recommendation Module
//!
//! This module implements the song recommendation core: encoding a playlist's
//! songs into comparable feature vectors and ranking songs by a hand-rolled
//! nearest-neighbor distance.
//!
//! ## Overview
//!
//! Recommendations are computed entirely from the playlist itself. Every
//! playlist load derives two vocabularies - the distinct genres and the
//! distinct artists observed across all of its songs - and every song is
//! encoded as a pair of binary membership vectors over those vocabularies.
//! The distance between two songs is a weighted sum of:
//!
//! - genre membership distance, which rewards shared genres and penalizes
//!   mismatches asymmetrically
//! - artist membership distance, scaled down since two songs sharing an
//!   artist says less than sharing a genre profile
//! - the absolute popularity difference
//! - absolute deltas of the audio features (energy, valence, tempo,
//!   danceability, instrumentalness) when both songs carry them
//!
//! The resulting value has no unit and may be negative; it only exists to
//! order candidates. Ranking is a brute-force pass over every other song in
//! the playlist, sorted ascending, with the closest K taken.
//!
//! ## Core Modules
//!
//! - [`encode`] - Vocabulary construction and membership vector encoding
//! - [`knn`] - Distance computation and neighbor ranking
//!
//! ## Invariants
//!
//! - Vocabularies are playlist-scoped and recomputed per playlist load; no
//!   identity is guaranteed across playlists.
//! - Membership vectors of all songs in one indexed playlist share the same
//!   length and position meaning.
//! - Distance is deterministic for fixed vocabularies and inputs; ties keep
//!   playlist order.

pub mod encode;
pub mod knn;
