//! Feed assembly: load, filter, score, sort, paginate.
//!
//! The assembler orchestrates one read-only feed request: resolve the
//! requester through the [`AccountDirectory`], load the candidate pool from
//! the [`ListingStore`], run the filter pipeline, score every survivor
//! against its owner with the taste comparator, then sort and paginate the
//! scored entries. It holds no state between requests and never mutates
//! stored data.

use crate::error::{MatchError, Result};
use crate::filter::{self, FeedFilterOptions};
use crate::model::{Account, Listing};
use crate::taste::{self, ScoringWeights};
use log::{debug, info};
use serde::Serialize;

/// Resolves accounts in full detail: followed artists with genres, and
/// declared roles. Implementations fail with
/// [`MatchError::AccountNotFound`] for absent accounts.
pub trait AccountDirectory {
    fn detailed_account(&self, id: i64) -> Result<Account>;
}

/// Supplies the candidate listing pool with owner and slot detail.
pub trait ListingStore {
    fn listings(&self) -> Result<Vec<Listing>>;
}

/// One listing paired with its affinity score; constructed transiently per
/// feed request, never persisted.
#[derive(Debug, Clone, Serialize)]
pub struct FeedEntry {
    pub listing: Listing,
    pub similarity_score: u32,
}

/// Shared taste between two accounts, as exposed to callers.
#[derive(Debug, Clone, Serialize)]
pub struct CommonTaste {
    pub common_artists: Vec<String>,
    pub common_genres: Vec<String>,
}

/// Request-scoped orchestrator over the two collaborators.
pub struct FeedAssembler<'a> {
    directory: &'a dyn AccountDirectory,
    store: &'a dyn ListingStore,
    weights: ScoringWeights,
}

impl<'a> FeedAssembler<'a> {
    #[must_use]
    pub fn new(directory: &'a dyn AccountDirectory, store: &'a dyn ListingStore) -> Self {
        Self {
            directory,
            store,
            weights: ScoringWeights::default(),
        }
    }

    /// Override the default scoring weights.
    #[must_use]
    pub fn with_weights(mut self, weights: ScoringWeights) -> Self {
        self.weights = weights;
        self
    }

    /// Build the ranked feed for `requester_id`.
    ///
    /// Entries come back descending by affinity score; the sort is stable,
    /// so equal scores keep the order the filter pipeline produced (which is
    /// newest-first when `from_latest` is set). Pagination is applied over
    /// the scored, sorted sequence.
    ///
    /// # Errors
    ///
    /// - [`MatchError::AccountNotFound`] if the requester or a listing owner
    ///   cannot be resolved.
    /// - [`MatchError::BadRequest`] for malformed paging parameters.
    /// - Any collaborator failure, propagated unchanged.
    pub fn build_feed(
        &self,
        requester_id: i64,
        options: &FeedFilterOptions,
    ) -> Result<Vec<FeedEntry>> {
        let paging = validate_paging(options)?;

        let requester = self.directory.detailed_account(requester_id)?;
        let candidates = self.store.listings()?;
        info!(
            "building feed for account {requester_id} over {} candidates",
            candidates.len()
        );

        let survivors = filter::apply(candidates, &requester, options);

        let mut entries = Vec::with_capacity(survivors.len());
        for listing in survivors {
            let owner = self.directory.detailed_account(listing.owner_id)?;
            let similarity_score = taste::compare_taste(&requester, &owner, &self.weights)?;
            entries.push(FeedEntry {
                listing,
                similarity_score,
            });
        }

        // Stable sort: equal scores keep the filter pipeline's order.
        entries.sort_by(|a, b| b.similarity_score.cmp(&a.similarity_score));

        if let Some((page_number, page_size)) = paging {
            let skip = (page_number - 1) * page_size;
            debug!("paging feed: page {page_number}, size {page_size}");
            entries = entries
                .into_iter()
                .skip(skip as usize)
                .take(page_size as usize)
                .collect();
        }

        Ok(entries)
    }

    /// Shared artists and ranked shared genres between two accounts.
    ///
    /// # Errors
    ///
    /// [`MatchError::AccountNotFound`] if either account is absent; any
    /// directory failure propagates unchanged.
    pub fn common_taste(&self, requester_id: i64, other_id: i64) -> Result<CommonTaste> {
        let requester = self.directory.detailed_account(requester_id)?;
        let other = self.directory.detailed_account(other_id)?;

        Ok(CommonTaste {
            common_artists: taste::common_artists(&requester, &other)?,
            common_genres: taste::common_genres(&requester, &other)?,
        })
    }
}

/// Check the paging fields: both or neither, and both positive.
fn validate_paging(options: &FeedFilterOptions) -> Result<Option<(i64, i64)>> {
    match (options.page_number, options.page_size) {
        (None, None) => Ok(None),
        (Some(number), Some(size)) => {
            if number <= 0 {
                return Err(MatchError::BadRequest(format!(
                    "page_number must be positive, got {number}"
                )));
            }
            if size <= 0 {
                return Err(MatchError::BadRequest(format!(
                    "page_size must be positive, got {size}"
                )));
            }
            Ok(Some((number, size)))
        }
        _ => Err(MatchError::BadRequest(
            "page_number and page_size must be supplied together".to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Artist, ListingType, MusicianSlot, SlotStatus};
    use crate::store::MemoryCatalog;
    use chrono::{TimeZone, Utc};

    fn artist(id: &str, genres: &[&str]) -> Artist {
        Artist {
            id: id.to_string(),
            name: id.to_string(),
            genres: genres.iter().map(ToString::to_string).collect(),
            popularity: 0,
        }
    }

    fn account(id: i64, roles: &[&str], artists: Vec<Artist>) -> Account {
        Account {
            id,
            name: format!("account-{id}"),
            roles: roles.iter().map(ToString::to_string).collect(),
            artists: Some(artists),
        }
    }

    fn listing(id: i64, owner_id: i64) -> Listing {
        Listing {
            id,
            owner_id,
            genre: None,
            kind: ListingType::Band,
            description: String::new(),
            created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
                + chrono::Duration::hours(id),
            slots: vec![MusicianSlot {
                id,
                role: "Guitarist".to_string(),
                status: SlotStatus::Available,
            }],
        }
    }

    /// Requester shares more taste with owner 2 than owner 3, so owner 2's
    /// listing ranks first regardless of arrival order.
    #[test]
    fn feed_is_sorted_descending_by_score() {
        let mut catalog = MemoryCatalog::new();
        catalog.add_account(account(
            1,
            &[],
            vec![artist("x", &["Rock"]), artist("y", &["Rock"])],
        ));
        catalog.add_account(account(2, &[], vec![artist("x", &["Rock"])]));
        catalog.add_account(account(3, &[], vec![artist("z", &["Pop"])]));
        catalog.add_listing(listing(10, 3));
        catalog.add_listing(listing(11, 2));

        let assembler = FeedAssembler::new(&catalog, &catalog);
        let feed = assembler
            .build_feed(1, &FeedFilterOptions::default())
            .unwrap();

        assert_eq!(feed.len(), 2);
        assert_eq!(feed[0].listing.id, 11);
        assert!(feed[0].similarity_score > feed[1].similarity_score);
    }

    #[test]
    fn equal_scores_keep_arrival_order() {
        let mut catalog = MemoryCatalog::new();
        catalog.add_account(account(1, &[], vec![]));
        catalog.add_account(account(2, &[], vec![]));
        catalog.add_listing(listing(10, 2));
        catalog.add_listing(listing(11, 2));
        catalog.add_listing(listing(12, 2));

        let assembler = FeedAssembler::new(&catalog, &catalog);
        let feed = assembler
            .build_feed(1, &FeedFilterOptions::default())
            .unwrap();

        let ids: Vec<i64> = feed.iter().map(|entry| entry.listing.id).collect();
        assert_eq!(ids, vec![10, 11, 12]);
    }

    #[test]
    fn from_latest_breaks_score_ties_by_recency() {
        let mut catalog = MemoryCatalog::new();
        catalog.add_account(account(1, &[], vec![]));
        catalog.add_account(account(2, &[], vec![]));
        catalog.add_listing(listing(10, 2));
        catalog.add_listing(listing(12, 2));
        catalog.add_listing(listing(11, 2));

        let assembler = FeedAssembler::new(&catalog, &catalog);
        let options = FeedFilterOptions {
            from_latest: true,
            ..FeedFilterOptions::default()
        };
        let feed = assembler.build_feed(1, &options).unwrap();

        let ids: Vec<i64> = feed.iter().map(|entry| entry.listing.id).collect();
        assert_eq!(ids, vec![12, 11, 10]);
    }

    #[test]
    fn pagination_windows_the_sorted_sequence() {
        let mut catalog = MemoryCatalog::new();
        catalog.add_account(account(1, &[], vec![]));
        catalog.add_account(account(2, &[], vec![]));
        for id in 1..=12 {
            catalog.add_listing(listing(id, 2));
        }

        let assembler = FeedAssembler::new(&catalog, &catalog);
        let options = FeedFilterOptions {
            page_number: Some(2),
            page_size: Some(5),
            ..FeedFilterOptions::default()
        };
        let page = assembler.build_feed(1, &options).unwrap();

        let ids: Vec<i64> = page.iter().map(|entry| entry.listing.id).collect();
        assert_eq!(ids, vec![6, 7, 8, 9, 10]);
    }

    #[test]
    fn tail_page_may_be_short() {
        let mut catalog = MemoryCatalog::new();
        catalog.add_account(account(1, &[], vec![]));
        catalog.add_account(account(2, &[], vec![]));
        for id in 1..=7 {
            catalog.add_listing(listing(id, 2));
        }

        let assembler = FeedAssembler::new(&catalog, &catalog);
        let options = FeedFilterOptions {
            page_number: Some(2),
            page_size: Some(5),
            ..FeedFilterOptions::default()
        };
        assert_eq!(assembler.build_feed(1, &options).unwrap().len(), 2);
    }

    #[test]
    fn non_positive_paging_is_a_bad_request() {
        let mut catalog = MemoryCatalog::new();
        catalog.add_account(account(1, &[], vec![]));
        let assembler = FeedAssembler::new(&catalog, &catalog);

        for (number, size) in [(0, 5), (1, 0), (-1, 5), (2, -3)] {
            let options = FeedFilterOptions {
                page_number: Some(number),
                page_size: Some(size),
                ..FeedFilterOptions::default()
            };
            assert!(matches!(
                assembler.build_feed(1, &options).unwrap_err(),
                MatchError::BadRequest(_)
            ));
        }
    }

    #[test]
    fn half_specified_paging_is_rejected() {
        let mut catalog = MemoryCatalog::new();
        catalog.add_account(account(1, &[], vec![]));
        let assembler = FeedAssembler::new(&catalog, &catalog);

        let options = FeedFilterOptions {
            page_number: Some(1),
            ..FeedFilterOptions::default()
        };
        assert!(matches!(
            assembler.build_feed(1, &options).unwrap_err(),
            MatchError::BadRequest(_)
        ));
    }

    #[test]
    fn unknown_requester_is_not_found() {
        let catalog = MemoryCatalog::new();
        let assembler = FeedAssembler::new(&catalog, &catalog);

        assert!(matches!(
            assembler
                .build_feed(99, &FeedFilterOptions::default())
                .unwrap_err(),
            MatchError::AccountNotFound(99)
        ));
    }

    #[test]
    fn unknown_owner_fails_the_whole_feed() {
        let mut catalog = MemoryCatalog::new();
        catalog.add_account(account(1, &[], vec![]));
        catalog.add_listing(listing(10, 2)); // owner 2 never registered

        let assembler = FeedAssembler::new(&catalog, &catalog);
        assert!(matches!(
            assembler
                .build_feed(1, &FeedFilterOptions::default())
                .unwrap_err(),
            MatchError::AccountNotFound(2)
        ));
    }

    #[test]
    fn common_taste_combines_comparator_outputs() {
        let mut catalog = MemoryCatalog::new();
        catalog.add_account(account(
            1,
            &[],
            vec![artist("x", &["Rock", "Jazz"]), artist("y", &["Rock"])],
        ));
        catalog.add_account(account(
            2,
            &[],
            vec![artist("x", &["Rock"]), artist("z", &["Pop"])],
        ));

        let assembler = FeedAssembler::new(&catalog, &catalog);
        let taste = assembler.common_taste(1, 2).unwrap();

        assert_eq!(taste.common_artists, vec!["x"]);
        assert_eq!(taste.common_genres, vec!["Rock"]);
    }

    #[test]
    fn identical_requests_return_identical_feeds() {
        let mut catalog = MemoryCatalog::new();
        catalog.add_account(account(1, &[], vec![artist("x", &["Rock"])]));
        catalog.add_account(account(2, &[], vec![artist("x", &["Rock"])]));
        catalog.add_listing(listing(10, 2));

        let assembler = FeedAssembler::new(&catalog, &catalog);
        let options = FeedFilterOptions::default();
        let first = assembler.build_feed(1, &options).unwrap();
        let second = assembler.build_feed(1, &options).unwrap();

        assert_eq!(first.len(), second.len());
        for (a, b) in first.iter().zip(second.iter()) {
            assert_eq!(a.listing.id, b.listing.id);
            assert_eq!(a.similarity_score, b.similarity_score);
        }
    }
}
