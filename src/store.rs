//! Concrete catalog collaborators: sqlite-backed and in-memory.
//!
//! The engine itself only sees the [`AccountDirectory`] and [`ListingStore`]
//! traits; these implementations back the CLI, the tests and the benches.
//! [`SqliteCatalog`] persists accounts, followed artists and listings in a
//! single `SQLite` file. [`MemoryCatalog`] holds the same data in maps for
//! embedding callers and test fixtures.

use crate::error::{MatchError, Result};
use crate::feed::{AccountDirectory, ListingStore};
use crate::model::{Account, Artist, Listing, ListingType, MusicianSlot, SlotStatus};
use chrono::{DateTime, Utc};
use log::{debug, info};
use rusqlite::Connection;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// Fixture file format accepted by [`SqliteCatalog::import_fixture`] and
/// [`MemoryCatalog::from_fixture`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Fixture {
    #[serde(default)]
    pub accounts: Vec<Account>,
    #[serde(default)]
    pub listings: Vec<Listing>,
}

/// Catalog persisted in a `SQLite` database file.
pub struct SqliteCatalog {
    conn: Connection,
}

impl SqliteCatalog {
    /// Open (or create) the catalog at `path` and ensure the schema exists.
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;
        let catalog = Self { conn };
        catalog.init_schema()?;
        Ok(catalog)
    }

    /// In-memory catalog, used by tests.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let catalog = Self { conn };
        catalog.init_schema()?;
        Ok(catalog)
    }

    fn init_schema(&self) -> Result<()> {
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS account (
                id   INTEGER PRIMARY KEY,
                name TEXT NOT NULL
            );
            CREATE TABLE IF NOT EXISTS account_role (
                account_id INTEGER NOT NULL REFERENCES account(id),
                role       TEXT NOT NULL,
                UNIQUE(account_id, role)
            );
            CREATE TABLE IF NOT EXISTS artist (
                id         TEXT PRIMARY KEY,
                name       TEXT NOT NULL,
                popularity INTEGER NOT NULL DEFAULT 0
            );
            CREATE TABLE IF NOT EXISTS artist_genre (
                artist_id TEXT NOT NULL REFERENCES artist(id),
                genre     TEXT NOT NULL,
                UNIQUE(artist_id, genre)
            );
            CREATE TABLE IF NOT EXISTS follows (
                account_id INTEGER NOT NULL REFERENCES account(id),
                artist_id  TEXT NOT NULL REFERENCES artist(id),
                UNIQUE(account_id, artist_id)
            );
            CREATE TABLE IF NOT EXISTS listing (
                id          INTEGER PRIMARY KEY,
                owner_id    INTEGER NOT NULL REFERENCES account(id),
                genre       TEXT,
                kind        TEXT NOT NULL,
                description TEXT NOT NULL,
                created_at  TEXT NOT NULL
            );
            CREATE TABLE IF NOT EXISTS slot (
                id         INTEGER PRIMARY KEY,
                listing_id INTEGER NOT NULL REFERENCES listing(id),
                role       TEXT NOT NULL,
                status     TEXT NOT NULL
            );
            CREATE INDEX IF NOT EXISTS idx_follows_account ON follows(account_id);
            CREATE INDEX IF NOT EXISTS idx_slot_listing ON slot(listing_id);",
        )?;
        Ok(())
    }

    /// Insert an account with its roles and followed artists in one
    /// transaction. Artists shared between accounts are upserted.
    pub fn insert_account(&mut self, account: &Account) -> Result<()> {
        let tx = self.conn.transaction()?;

        tx.execute(
            "INSERT OR REPLACE INTO account (id, name) VALUES (?1, ?2)",
            (account.id, &account.name),
        )?;

        {
            let mut role_stmt = tx.prepare(
                "INSERT OR IGNORE INTO account_role (account_id, role) VALUES (?1, ?2)",
            )?;
            for role in &account.roles {
                role_stmt.execute((account.id, role))?;
            }

            if let Some(artists) = &account.artists {
                let mut artist_stmt = tx.prepare(
                    "INSERT OR REPLACE INTO artist (id, name, popularity) VALUES (?1, ?2, ?3)",
                )?;
                let mut genre_stmt = tx.prepare(
                    "INSERT OR IGNORE INTO artist_genre (artist_id, genre) VALUES (?1, ?2)",
                )?;
                let mut follow_stmt = tx.prepare(
                    "INSERT OR IGNORE INTO follows (account_id, artist_id) VALUES (?1, ?2)",
                )?;
                for artist in artists {
                    artist_stmt.execute((&artist.id, &artist.name, artist.popularity))?;
                    for genre in &artist.genres {
                        genre_stmt.execute((&artist.id, genre))?;
                    }
                    follow_stmt.execute((account.id, &artist.id))?;
                }
            }
        }

        tx.commit()?;
        debug!("stored account {} ({})", account.id, account.name);
        Ok(())
    }

    /// Insert a listing and its slots in one transaction.
    pub fn insert_listing(&mut self, listing: &Listing) -> Result<()> {
        let tx = self.conn.transaction()?;

        tx.execute(
            "INSERT OR REPLACE INTO listing (id, owner_id, genre, kind, description, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            (
                listing.id,
                listing.owner_id,
                &listing.genre,
                listing.kind.as_str(),
                &listing.description,
                listing.created_at.to_rfc3339(),
            ),
        )?;

        {
            let mut slot_stmt = tx.prepare(
                "INSERT OR REPLACE INTO slot (id, listing_id, role, status) VALUES (?1, ?2, ?3, ?4)",
            )?;
            for slot in &listing.slots {
                slot_stmt.execute((slot.id, listing.id, &slot.role, slot.status.as_str()))?;
            }
        }

        tx.commit()?;
        debug!("stored listing {} for owner {}", listing.id, listing.owner_id);
        Ok(())
    }

    /// Load a JSON fixture file and store its accounts and listings.
    pub fn import_fixture(&mut self, path: &Path) -> Result<(usize, usize)> {
        let raw = std::fs::read_to_string(path)?;
        let fixture: Fixture = serde_json::from_str(&raw)?;

        for account in &fixture.accounts {
            self.insert_account(account)?;
        }
        for listing in &fixture.listings {
            self.insert_listing(listing)?;
        }

        info!(
            "imported {} accounts and {} listings from {}",
            fixture.accounts.len(),
            fixture.listings.len(),
            path.display()
        );
        Ok((fixture.accounts.len(), fixture.listings.len()))
    }

    /// All stored accounts in summary form (id, name, roles; no artists).
    pub fn account_summaries(&self) -> Result<Vec<(i64, String, Vec<String>)>> {
        let mut stmt = self.conn.prepare("SELECT id, name FROM account ORDER BY id")?;
        let rows = stmt
            .query_map([], |row| Ok((row.get::<_, i64>(0)?, row.get::<_, String>(1)?)))?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        let mut summaries = Vec::with_capacity(rows.len());
        for (id, name) in rows {
            summaries.push((id, name, self.roles_for(id)?));
        }
        Ok(summaries)
    }

    fn roles_for(&self, account_id: i64) -> Result<Vec<String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT role FROM account_role WHERE account_id = ?1 ORDER BY role")?;
        let roles = stmt
            .query_map([account_id], |row| row.get::<_, String>(0))?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(roles)
    }

    fn artists_for(&self, account_id: i64) -> Result<Vec<Artist>> {
        let mut stmt = self.conn.prepare(
            "SELECT a.id, a.name, a.popularity FROM artist a
             JOIN follows f ON f.artist_id = a.id
             WHERE f.account_id = ?1 ORDER BY a.id",
        )?;
        let rows = stmt
            .query_map([account_id], |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, u32>(2)?,
                ))
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        let mut genre_stmt = self
            .conn
            .prepare("SELECT genre FROM artist_genre WHERE artist_id = ?1 ORDER BY genre")?;

        let mut artists = Vec::with_capacity(rows.len());
        for (id, name, popularity) in rows {
            let genres = genre_stmt
                .query_map([&id], |row| row.get::<_, String>(0))?
                .collect::<std::result::Result<Vec<_>, _>>()?;
            artists.push(Artist {
                id,
                name,
                genres,
                popularity,
            });
        }
        Ok(artists)
    }

    fn slots_for(&self, listing_id: i64) -> Result<Vec<MusicianSlot>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, role, status FROM slot WHERE listing_id = ?1 ORDER BY id")?;
        let rows = stmt
            .query_map([listing_id], |row| {
                Ok((
                    row.get::<_, i64>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                ))
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        let mut slots = Vec::with_capacity(rows.len());
        for (id, role, status) in rows {
            slots.push(MusicianSlot {
                id,
                role,
                status: SlotStatus::parse(&status)
                    .map_err(|_| MatchError::InvalidData(format!("slot status `{status}`")))?,
            });
        }
        Ok(slots)
    }
}

impl AccountDirectory for SqliteCatalog {
    fn detailed_account(&self, id: i64) -> Result<Account> {
        let mut stmt = self.conn.prepare("SELECT name FROM account WHERE id = ?1")?;
        let name = match stmt.query_row([id], |row| row.get::<_, String>(0)) {
            Ok(name) => name,
            Err(rusqlite::Error::QueryReturnedNoRows) => {
                return Err(MatchError::AccountNotFound(id))
            }
            Err(err) => return Err(err.into()),
        };

        Ok(Account {
            id,
            name,
            roles: self.roles_for(id)?,
            artists: Some(self.artists_for(id)?),
        })
    }
}

impl ListingStore for SqliteCatalog {
    fn listings(&self) -> Result<Vec<Listing>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, owner_id, genre, kind, description, created_at
             FROM listing ORDER BY id",
        )?;
        let rows = stmt
            .query_map([], |row| {
                Ok((
                    row.get::<_, i64>(0)?,
                    row.get::<_, i64>(1)?,
                    row.get::<_, Option<String>>(2)?,
                    row.get::<_, String>(3)?,
                    row.get::<_, String>(4)?,
                    row.get::<_, String>(5)?,
                ))
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        let mut listings = Vec::with_capacity(rows.len());
        for (id, owner_id, genre, kind, description, created_at) in rows {
            let kind = ListingType::parse(&kind)
                .map_err(|_| MatchError::InvalidData(format!("listing kind `{kind}`")))?;
            let created_at = DateTime::parse_from_rfc3339(&created_at)
                .map_err(|err| {
                    MatchError::InvalidData(format!("timestamp `{created_at}`: {err}"))
                })?
                .with_timezone(&Utc);
            listings.push(Listing {
                id,
                owner_id,
                genre,
                kind,
                description,
                created_at,
                slots: self.slots_for(id)?,
            });
        }
        Ok(listings)
    }
}

/// Map-backed catalog for tests, benches and embedding callers.
#[derive(Debug, Default, Clone)]
pub struct MemoryCatalog {
    accounts: HashMap<i64, Account>,
    listings: Vec<Listing>,
}

impl MemoryCatalog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog directly from a parsed fixture.
    #[must_use]
    pub fn from_fixture(fixture: Fixture) -> Self {
        let mut catalog = Self::new();
        for account in fixture.accounts {
            catalog.add_account(account);
        }
        for listing in fixture.listings {
            catalog.add_listing(listing);
        }
        catalog
    }

    pub fn add_account(&mut self, account: Account) {
        self.accounts.insert(account.id, account);
    }

    pub fn add_listing(&mut self, listing: Listing) {
        self.listings.push(listing);
    }
}

impl AccountDirectory for MemoryCatalog {
    fn detailed_account(&self, id: i64) -> Result<Account> {
        self.accounts
            .get(&id)
            .cloned()
            .ok_or(MatchError::AccountNotFound(id))
    }
}

impl ListingStore for MemoryCatalog {
    fn listings(&self) -> Result<Vec<Listing>> {
        Ok(self.listings.clone())
    }
}
