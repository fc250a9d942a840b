//! # Bandmate - Musician Matching CLI
//!
//! Bandmate matches musicians forming bands or collaborations by comparing
//! their music tastes. The CLI maintains a local catalog of accounts (with
//! their followed artists and genres) and open listings, and exposes the
//! taste-comparison and feed-ranking engine on top of it.
//!
//! ## Architecture
//!
//! - `cli`: Command-line interface definitions
//! - `store`: SQLite catalog and fixture import
//! - `weights` / `taste`: Genre weighting and affinity scoring
//! - `filter` / `feed`: Candidate filtering and feed assembly
//! - `config`: Data directory management

use anyhow::Result;
use bandmate::feed::FeedAssembler;
use bandmate::filter::FeedFilterOptions;
use bandmate::store::SqliteCatalog;
use bandmate::{cli, completion, config};
use clap::{CommandFactory, Parser};
use log::info;
use std::path::PathBuf;

fn resolve_db_path(override_path: Option<PathBuf>) -> Result<PathBuf> {
    match override_path {
        Some(path) => Ok(path),
        None => config::get_db_path(),
    }
}

/// Main entry point.
///
/// Initializes logging (controlled via `RUST_LOG`), parses command-line
/// arguments, and routes commands to the engine. Errors propagate as
/// `anyhow::Result` and are displayed with full context.
fn main() -> Result<()> {
    env_logger::init();

    let args = cli::Args::parse();
    let db_path = resolve_db_path(args.db)?;

    match args.command {
        cli::Command::Init { force } => {
            if db_path.exists() && !force {
                return Err(anyhow::anyhow!(
                    "catalog already exists at {}; use --force to overwrite",
                    db_path.display()
                ));
            }
            if db_path.exists() {
                std::fs::remove_file(&db_path)?;
            }
            SqliteCatalog::open(&db_path)?;
            println!("Initialized catalog at {}", db_path.display());
        }
        cli::Command::Import { path } => {
            let mut catalog = SqliteCatalog::open(&db_path)?;
            let (accounts, listings) = catalog.import_fixture(&path)?;
            println!("Imported {accounts} accounts and {listings} listings");
        }
        cli::Command::Feed {
            requester,
            exclude_own,
            match_role,
            listing_type,
            genre,
            from_latest,
            page,
            page_size,
            json,
        } => {
            let catalog = SqliteCatalog::open(&db_path)?;
            let options = FeedFilterOptions {
                exclude_own,
                match_role,
                listing_type: listing_type.map(Into::into),
                genre,
                from_latest,
                page_number: page,
                page_size,
            };

            info!("building feed for account {requester}");
            let assembler = FeedAssembler::new(&catalog, &catalog);
            let entries = assembler.build_feed(requester, &options)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&entries)?);
            } else if entries.is_empty() {
                println!("No listings matched.");
            } else {
                println!("{:>5}  {:>7}  {:<18}  {:<12}  description", "score", "listing", "type", "genre");
                for entry in &entries {
                    println!(
                        "{:>5}  {:>7}  {:<18}  {:<12}  {}",
                        entry.similarity_score,
                        entry.listing.id,
                        entry.listing.kind.as_str(),
                        entry.listing.genre.as_deref().unwrap_or("-"),
                        entry.listing.description
                    );
                }
            }
        }
        cli::Command::Common {
            requester,
            other,
            json,
        } => {
            let catalog = SqliteCatalog::open(&db_path)?;
            let assembler = FeedAssembler::new(&catalog, &catalog);
            let taste = assembler.common_taste(requester, other)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&taste)?);
            } else {
                println!("Common artists: {}", taste.common_artists.join(", "));
                println!("Common genres:  {}", taste.common_genres.join(", "));
            }
        }
        cli::Command::List => {
            let catalog = SqliteCatalog::open(&db_path)?;
            for (id, name, roles) in catalog.account_summaries()? {
                println!("{id:>5}  {name}  [{}]", roles.join(", "));
            }
        }
        cli::Command::Completion { shell } => {
            let mut cmd = cli::Args::command();
            completion::generate_completions(completion::shell_to_completion_shell(shell), &mut cmd);
        }
    }

    Ok(())
}
