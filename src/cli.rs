//! Command-line interface definitions.
//!
//! Uses Clap derive macros for type-safe argument parsing and routing.
//!
//! ## Examples
//!
//! ```bash
//! bandmate import musicians.json
//! bandmate feed 1 --match-role --genre Rock --page 1 --page-size 20
//! bandmate common 1 2
//! ```

use crate::model::ListingType;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Shell types supported for completion generation
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

/// CLI-side listing type token.
#[derive(Copy, Clone, PartialEq, Eq, ValueEnum, Debug)]
pub enum ListingKind {
    /// A band looking for members
    Band,
    /// A one-off song collaboration
    CollaborativeSong,
}

impl From<ListingKind> for ListingType {
    fn from(kind: ListingKind) -> Self {
        match kind {
            ListingKind::Band => ListingType::Band,
            ListingKind::CollaborativeSong => ListingType::CollaborativeSong,
        }
    }
}

/// Main application arguments structure.
#[derive(Parser)]
#[command(name = "bandmate")]
#[command(about = "Bandmate: match musicians by music taste - ranked listing feeds & common taste")]
#[command(version)]
pub struct Args {
    /// Path to the catalog database (defaults to the platform data dir)
    #[arg(long, global = true, env = "BANDMATE_DB")]
    pub db: Option<PathBuf>,

    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Enumeration of all available subcommands.
#[derive(Subcommand)]
pub enum Command {
    /// Create an empty catalog database
    ///
    /// Creates the database file with the full schema. Without --force this
    /// fails if the database already exists.
    Init {
        /// Overwrite an existing database
        #[arg(long)]
        force: bool,
    },

    /// Import accounts and listings from a JSON fixture file
    ///
    /// The fixture carries accounts (with their followed artists and genres,
    /// as ingested from the upstream music catalog) and open listings with
    /// their musician slots.
    Import {
        /// Path to the fixture file
        path: PathBuf,
    },

    /// Build the ranked listing feed for an account
    ///
    /// Loads the candidate pool, applies the requested filters, scores every
    /// surviving listing against the requester's taste and prints the feed
    /// sorted by affinity, best match first.
    Feed {
        /// Account id of the requester
        requester: i64,

        /// Drop the requester's own listings
        #[arg(long)]
        exclude_own: bool,

        /// Keep only listings with an open slot matching one of the
        /// requester's roles ("Any" acts as a wildcard)
        #[arg(long)]
        match_role: bool,

        /// Keep only listings of this type
        #[arg(long, value_enum)]
        listing_type: Option<ListingKind>,

        /// Keep only listings advertising this genre (exact match)
        #[arg(long)]
        genre: Option<String>,

        /// Pre-sort candidates newest-first (recency breaks score ties)
        #[arg(long)]
        from_latest: bool,

        /// 1-based page number (requires --page-size)
        #[arg(long)]
        page: Option<i64>,

        /// Page length (requires --page)
        #[arg(long)]
        page_size: Option<i64>,

        /// Print the feed as JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Show the common taste between two accounts
    ///
    /// Prints shared artists and shared genres (strongest shared interest
    /// first) between the requester and another account.
    Common {
        /// Account id of the requester
        requester: i64,

        /// Account id to compare against
        other: i64,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// List all accounts in the catalog
    List,

    /// Generate shell completions
    ///
    /// Usage: bandmate completion bash > ~/.local/share/bash-completion/completions/bandmate
    Completion {
        /// Shell to generate completions for
        shell: Shell,
    },
}
