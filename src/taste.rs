//! Taste comparison between two accounts.
//!
//! Combines two symmetric signals into one integer affinity score:
//!
//! - the genre overlap, summing `min(weight_a, weight_b)` over every genre
//!   both accounts carry (see [`crate::weights`]);
//! - the artist overlap, a fixed number of points per shared artist.
//!
//! Both terms are symmetric, so `compare_taste(a, b) == compare_taste(b, a)`
//! for any pair of hydrated accounts.

use crate::error::Result;
use crate::model::Account;
use crate::weights::{genre_weights, ranked_genres};
use std::collections::HashSet;

/// Points awarded per shared artist.
///
/// A shared artist is a much stronger signal than one overlapping genre
/// count, so it outweighs it by a fixed factor. This value is a deliberate
/// product decision; do not change it without confirming intended behavior.
pub const COMMON_ARTIST_WEIGHT: u32 = 3;

/// Immutable scoring parameters, shared by every comparison in one request.
#[derive(Debug, Clone, Copy)]
pub struct ScoringWeights {
    /// Points per shared artist; defaults to [`COMMON_ARTIST_WEIGHT`].
    pub common_artist_weight: u32,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            common_artist_weight: COMMON_ARTIST_WEIGHT,
        }
    }
}

/// Artist ids followed by both accounts, sorted for deterministic output.
///
/// # Errors
///
/// Fails with [`MatchError::AccountNotResolved`](crate::error::MatchError)
/// if either account's artist list was never hydrated.
pub fn common_artists(a: &Account, b: &Account) -> Result<Vec<String>> {
    let ids_a: HashSet<&str> = a.artists()?.iter().map(|artist| artist.id.as_str()).collect();
    let mut shared: Vec<String> = b
        .artists()?
        .iter()
        .filter(|artist| ids_a.contains(artist.id.as_str()))
        .map(|artist| artist.id.clone())
        .collect();
    shared.sort();
    shared.dedup();
    Ok(shared)
}

/// Genres both accounts carry, strongest shared interest first.
///
/// Ordered descending by `min(weight_a, weight_b)`; equal minima are broken
/// alphabetically by genre name.
///
/// # Errors
///
/// Same resolution requirement as [`common_artists`].
pub fn common_genres(a: &Account, b: &Account) -> Result<Vec<String>> {
    let weights_a = genre_weights(a.artists()?);
    let weights_b = genre_weights(b.artists()?);

    let shared: std::collections::HashMap<String, u32> = weights_a
        .iter()
        .filter_map(|(genre, count_a)| {
            weights_b
                .get(genre)
                .map(|count_b| (genre.clone(), (*count_a).min(*count_b)))
        })
        .collect();

    Ok(ranked_genres(&shared)
        .into_iter()
        .map(|(genre, _)| genre)
        .collect())
}

/// The affinity score between two accounts.
///
/// `genre_score + |common artists| * common_artist_weight`, where the genre
/// score sums `min(weight_a, weight_b)` over the shared genres (genres absent
/// from one account contribute 0, so summing over the intersection is
/// equivalent to summing over the union). Always non-negative; an account
/// with no artists scores 0 against anyone.
///
/// # Errors
///
/// Same resolution requirement as [`common_artists`].
pub fn compare_taste(a: &Account, b: &Account, weights: &ScoringWeights) -> Result<u32> {
    let weights_a = genre_weights(a.artists()?);
    let weights_b = genre_weights(b.artists()?);

    let genre_score: u32 = weights_a
        .iter()
        .filter_map(|(genre, count_a)| weights_b.get(genre).map(|count_b| (*count_a).min(*count_b)))
        .sum();

    let artist_score = common_artists(a, b)?.len() as u32 * weights.common_artist_weight;

    Ok(genre_score + artist_score)
}
