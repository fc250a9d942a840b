//! Filter pipeline over the candidate listing pool.
//!
//! Each step only removes listings (never mutates them), applied in a fixed
//! order: exclude-own, role matching, listing type, genre, and finally the
//! provisional recency sort. Adding a filter can therefore never grow the
//! surviving set.

use crate::model::{Account, Listing, ListingType};
use log::debug;
use serde::{Deserialize, Serialize};

/// Caller-supplied options for one feed request.
///
/// Paging fields are validated by the assembler, not here: both must be
/// supplied together and both must be positive.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedFilterOptions {
    /// Drop the requester's own listings.
    pub exclude_own: bool,
    /// Keep only listings with an available slot matching one of the
    /// requester's declared roles (or the "Any" wildcard role).
    pub match_role: bool,
    /// Exact-match filter on the listing type.
    pub listing_type: Option<ListingType>,
    /// Exact-match filter on the listing genre.
    pub genre: Option<String>,
    /// Pre-sort the survivors newest-first before scoring. The assembler's
    /// final sort is stable and score-descending, so this acts as a
    /// recency tie-break between equal scores.
    pub from_latest: bool,
    /// 1-based page number; must be paired with `page_size`.
    pub page_number: Option<i64>,
    /// Page length; must be paired with `page_number`.
    pub page_size: Option<i64>,
}

/// Reduce `candidates` according to `options`, preserving arrival order
/// except for the optional recency sort at the end.
#[must_use]
pub fn apply(
    candidates: Vec<Listing>,
    requester: &Account,
    options: &FeedFilterOptions,
) -> Vec<Listing> {
    let pool_size = candidates.len();
    let mut survivors = candidates;

    if options.exclude_own {
        survivors.retain(|listing| listing.owner_id != requester.id);
    }

    if options.match_role && !requester.roles.is_empty() {
        survivors.retain(|listing| listing.has_open_role(&requester.roles));
    }

    if let Some(kind) = options.listing_type {
        survivors.retain(|listing| listing.kind == kind);
    }

    if let Some(genre) = &options.genre {
        survivors.retain(|listing| listing.genre.as_deref() == Some(genre.as_str()));
    }

    if options.from_latest {
        survivors.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    }

    debug!(
        "filter pipeline kept {}/{} listings for account {}",
        survivors.len(),
        pool_size,
        requester.id
    );
    survivors
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{MusicianSlot, SlotStatus};
    use chrono::{TimeZone, Utc};

    fn requester(roles: &[&str]) -> Account {
        Account {
            id: 100,
            name: "requester".to_string(),
            roles: roles.iter().map(ToString::to_string).collect(),
            artists: Some(vec![]),
        }
    }

    fn listing(id: i64, owner_id: i64) -> Listing {
        Listing {
            id,
            owner_id,
            genre: None,
            kind: ListingType::Band,
            description: String::new(),
            created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap() + chrono::Duration::days(id),
            slots: vec![],
        }
    }

    fn slot(role: &str, status: SlotStatus) -> MusicianSlot {
        MusicianSlot {
            id: 0,
            role: role.to_string(),
            status,
        }
    }

    #[test]
    fn exclude_own_drops_requester_listings() {
        let pool = vec![listing(1, 100), listing(2, 200), listing(3, 100)];
        let options = FeedFilterOptions {
            exclude_own: true,
            ..FeedFilterOptions::default()
        };

        let kept = apply(pool, &requester(&[]), &options);
        assert_eq!(kept.iter().map(|l| l.id).collect::<Vec<_>>(), vec![2]);
    }

    #[test]
    fn role_matching_requires_an_available_matching_slot() {
        let mut open_match = listing(1, 200);
        open_match.slots = vec![slot("Guitarist", SlotStatus::Available)];
        let mut filled_match = listing(2, 200);
        filled_match.slots = vec![slot("Guitarist", SlotStatus::Filled)];
        let mut open_other = listing(3, 200);
        open_other.slots = vec![slot("Drummer", SlotStatus::Available)];

        let options = FeedFilterOptions {
            match_role: true,
            ..FeedFilterOptions::default()
        };
        let kept = apply(
            vec![open_match, filled_match, open_other],
            &requester(&["Guitarist"]),
            &options,
        );

        assert_eq!(kept.iter().map(|l| l.id).collect::<Vec<_>>(), vec![1]);
    }

    #[test]
    fn role_matching_is_skipped_when_requester_declares_no_roles() {
        let mut pool = vec![listing(1, 200)];
        pool[0].slots = vec![slot("Drummer", SlotStatus::Filled)];

        let options = FeedFilterOptions {
            match_role: true,
            ..FeedFilterOptions::default()
        };
        assert_eq!(apply(pool, &requester(&[]), &options).len(), 1);
    }

    #[test]
    fn genre_filter_is_exact_and_skips_untagged_listings() {
        let mut rock = listing(1, 200);
        rock.genre = Some("Rock".to_string());
        let mut jazz = listing(2, 200);
        jazz.genre = Some("Jazz".to_string());
        let untagged = listing(3, 200);

        let options = FeedFilterOptions {
            genre: Some("Rock".to_string()),
            ..FeedFilterOptions::default()
        };
        let kept = apply(vec![rock, jazz, untagged], &requester(&[]), &options);

        assert_eq!(kept.iter().map(|l| l.id).collect::<Vec<_>>(), vec![1]);
    }

    #[test]
    fn listing_type_filter_keeps_only_requested_kind() {
        let band = listing(1, 200);
        let mut song = listing(2, 200);
        song.kind = ListingType::CollaborativeSong;

        let options = FeedFilterOptions {
            listing_type: Some(ListingType::CollaborativeSong),
            ..FeedFilterOptions::default()
        };
        let kept = apply(vec![band, song], &requester(&[]), &options);
        assert_eq!(kept.iter().map(|l| l.id).collect::<Vec<_>>(), vec![2]);
    }

    #[test]
    fn from_latest_sorts_survivors_newest_first() {
        let pool = vec![listing(1, 200), listing(3, 200), listing(2, 200)];
        let options = FeedFilterOptions {
            from_latest: true,
            ..FeedFilterOptions::default()
        };

        let kept = apply(pool, &requester(&[]), &options);
        assert_eq!(kept.iter().map(|l| l.id).collect::<Vec<_>>(), vec![3, 2, 1]);
    }

    #[test]
    fn each_additional_filter_never_grows_the_pool() {
        let mut pool = Vec::new();
        for id in 1..=10 {
            let mut l = listing(id, if id % 2 == 0 { 100 } else { 200 });
            l.genre = Some(if id % 3 == 0 { "Rock" } else { "Jazz" }.to_string());
            l.slots = vec![slot("Guitarist", SlotStatus::Available)];
            pool.push(l);
        }

        let requester = requester(&["Guitarist"]);
        let mut options = FeedFilterOptions::default();
        let mut previous = apply(pool.clone(), &requester, &options).len();

        options.exclude_own = true;
        let after_own = apply(pool.clone(), &requester, &options).len();
        assert!(after_own <= previous);
        previous = after_own;

        options.match_role = true;
        let after_role = apply(pool.clone(), &requester, &options).len();
        assert!(after_role <= previous);
        previous = after_role;

        options.genre = Some("Rock".to_string());
        let after_genre = apply(pool, &requester, &options).len();
        assert!(after_genre <= previous);
    }
}
