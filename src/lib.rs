//! Taste-comparison and feed-ranking engine for matching musicians.
//!
//! Bandmate compares two accounts' music tastes (followed artists and the
//! genres those artists carry) and uses that comparison to rank an open
//! listings feed and to surface the common taste between two musicians.
//!
//! Core modules:
//! - [`weights`] - Weighted genre index over an account's artists
//! - [`taste`] - Affinity scoring between two accounts
//! - [`filter`] - Filter pipeline over the candidate listing pool
//! - [`feed`] - Feed assembly: load, filter, score, sort, paginate
//!
//! ### Supporting Modules
//!
//! - [`model`] - Hydrated read models (accounts, artists, listings, slots)
//! - [`store`] - SQLite and in-memory catalog collaborators
//! - [`error`] - Typed error taxonomy
//! - [`config`] - Data directory management
//! - [`cli`] / [`completion`] - Command-line interface
//!
//! ## Quick Start Example
//!
//! ```
//! use bandmate::feed::FeedAssembler;
//! use bandmate::filter::FeedFilterOptions;
//! use bandmate::model::{Account, Artist};
//! use bandmate::store::MemoryCatalog;
//!
//! let mut catalog = MemoryCatalog::new();
//! catalog.add_account(Account {
//!     id: 1,
//!     name: "alice".to_string(),
//!     roles: vec!["Guitarist".to_string()],
//!     artists: Some(vec![Artist {
//!         id: "a1".to_string(),
//!         name: "The Example".to_string(),
//!         genres: vec!["Rock".to_string()],
//!         popularity: 50,
//!     }]),
//! });
//!
//! let assembler = FeedAssembler::new(&catalog, &catalog);
//! let feed = assembler.build_feed(1, &FeedFilterOptions::default())?;
//! assert!(feed.is_empty());
//! # Ok::<(), bandmate::error::MatchError>(())
//! ```
//!
//! ## Scoring
//!
//! The affinity score between two accounts combines:
//! - the genre overlap: `Σ min(weight_a(g), weight_b(g))` over shared
//!   genres, where a genre's weight is the number of the account's artists
//!   carrying it;
//! - the artist overlap: a fixed 3 points per shared artist
//!   ([`taste::COMMON_ARTIST_WEIGHT`]).
//!
//! Both terms are symmetric, non-negative, and derived fresh from the
//! current snapshot on every call; nothing is cached between requests.
//!
//! ## Error Handling
//!
//! Library functions return [`error::Result`] with a typed
//! [`error::MatchError`]. The engine performs no local recovery: collaborator
//! failures and validation errors propagate unchanged, and no partial feeds
//! are ever returned.

pub mod cli;
pub mod completion;
pub mod config;
pub mod error;
pub mod feed;
pub mod filter;
pub mod model;
pub mod store;
pub mod taste;
pub mod weights;
