//! Read models consumed by the matching engine.
//!
//! Everything here is a fully-hydrated, request-scoped snapshot: the engine
//! never reaches back into a live data-access context while scoring or
//! filtering. Collaborators (see [`crate::feed`]) own the entities and hand
//! the engine immutable copies for the duration of one request.

use crate::error::{MatchError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Role name that matches any slot when the requester declares it.
pub const ANY_ROLE: &str = "Any";

/// An artist as delivered by the upstream music catalog.
///
/// Genre names are assumed already normalized upstream; the engine matches
/// them exactly. `popularity` is carried through from the catalog but unused
/// by the scoring engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Artist {
    /// Catalog identifier (opaque string, e.g. a streaming-service id).
    pub id: String,
    pub name: String,
    pub genres: Vec<String>,
    #[serde(default)]
    pub popularity: u32,
}

/// A musician's account, used here only as a read-only taste source.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    pub id: i64,
    pub name: String,
    /// Declared musician roles, e.g. "Guitarist". The literal role
    /// [`ANY_ROLE`] acts as a wildcard in role matching.
    #[serde(default)]
    pub roles: Vec<String>,
    /// Followed artists with their genres. `None` means the account was
    /// never hydrated by an account directory; the comparator refuses to
    /// treat such an account as having zero taste.
    #[serde(default)]
    pub artists: Option<Vec<Artist>>,
}

impl Account {
    /// The account's hydrated artist list.
    ///
    /// # Errors
    ///
    /// Fails with [`MatchError::AccountNotResolved`] if the artist list was
    /// never loaded. Callers must resolve accounts through the directory
    /// before comparing taste.
    pub fn artists(&self) -> Result<&[Artist]> {
        self.artists
            .as_deref()
            .ok_or(MatchError::AccountNotResolved(self.id))
    }
}

/// What a listing is looking for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ListingType {
    Band,
    CollaborativeSong,
}

impl ListingType {
    /// Stable database/CLI token for the variant.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Band => "band",
            Self::CollaborativeSong => "collaborative-song",
        }
    }

    /// Parse the token produced by [`Self::as_str`].
    pub fn parse(token: &str) -> Result<Self> {
        match token {
            "band" => Ok(Self::Band),
            "collaborative-song" => Ok(Self::CollaborativeSong),
            other => Err(MatchError::BadRequest(format!(
                "unknown listing type `{other}`"
            ))),
        }
    }
}

/// Whether a slot in a listing is still open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SlotStatus {
    Available,
    Filled,
}

impl SlotStatus {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Available => "available",
            Self::Filled => "filled",
        }
    }

    pub fn parse(token: &str) -> Result<Self> {
        match token {
            "available" => Ok(Self::Available),
            "filled" => Ok(Self::Filled),
            other => Err(MatchError::BadRequest(format!(
                "unknown slot status `{other}`"
            ))),
        }
    }
}

/// An open or filled role within a listing, e.g. "Drummer"/Available.
///
/// Slots are owned exclusively by their listing and only created or removed
/// through listing create/update, which is outside this engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MusicianSlot {
    pub id: i64,
    pub role: String,
    pub status: SlotStatus,
}

/// An open call for musicians: a band to join or a song to collaborate on.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Listing {
    pub id: i64,
    pub owner_id: i64,
    /// Optional genre the listing advertises; exact-match filtered.
    pub genre: Option<String>,
    pub kind: ListingType,
    pub description: String,
    pub created_at: DateTime<Utc>,
    /// Ordered collection of musician slots.
    pub slots: Vec<MusicianSlot>,
}

impl Listing {
    /// True if at least one `Available` slot matches one of `roles`, or the
    /// requester declared the [`ANY_ROLE`] wildcard.
    #[must_use]
    pub fn has_open_role(&self, roles: &[String]) -> bool {
        let wildcard = roles.iter().any(|r| r == ANY_ROLE);
        self.slots
            .iter()
            .filter(|slot| slot.status == SlotStatus::Available)
            .any(|slot| wildcard || roles.iter().any(|r| *r == slot.role))
    }
}
