//! Weighted genre index derived from an account's followed artists.
//!
//! The weight of a genre is the number of the account's artists carrying that
//! genre. Maps are derived fresh for each computation from the current artist
//! snapshot; nothing here is cached or persisted, so repeated calls over the
//! same snapshot always agree and concurrent calls never interfere.

use crate::model::Artist;
use std::collections::HashMap;

/// Count how many of `artists` carry each genre.
///
/// Iterates every (artist, genre) pair and increments the counter for that
/// genre name. No normalization happens here; genre names are matched exactly
/// as the upstream catalog delivered them. A genre no artist carries is
/// absent from the map, never present with weight 0.
#[must_use]
pub fn genre_weights(artists: &[Artist]) -> HashMap<String, u32> {
    let mut weights: HashMap<String, u32> = HashMap::new();
    for artist in artists {
        for genre in &artist.genres {
            *weights.entry(genre.clone()).or_insert(0) += 1;
        }
    }
    weights
}

/// Order a weight map as a sequence, heaviest genre first.
///
/// Ties on the count are broken alphabetically by genre name so the ordering
/// is deterministic rather than an accident of hash iteration.
#[must_use]
pub fn ranked_genres(weights: &HashMap<String, u32>) -> Vec<(String, u32)> {
    let mut ranked: Vec<(String, u32)> = weights
        .iter()
        .map(|(genre, count)| (genre.clone(), *count))
        .collect();
    ranked.sort_by(|(name_a, count_a), (name_b, count_b)| {
        count_b.cmp(count_a).then_with(|| name_a.cmp(name_b))
    });
    ranked
}
