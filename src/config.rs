//! Configuration and data directory management.
//!
//! Bandmate stores its catalog in the platform-standard data directory:
//! - Linux: `~/.local/share/bandmate/`
//! - macOS: `~/Library/Application Support/bandmate/`
//! - Windows: `%APPDATA%\bandmate\`

use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

/// Returns the platform-appropriate catalog database path, creating the
/// `bandmate` data subdirectory if needed.
///
/// # Errors
///
/// Fails if the system data directory cannot be determined or the
/// subdirectory cannot be created.
pub fn get_db_path() -> Result<PathBuf> {
    Ok(get_data_dir()?.join("bandmate.db"))
}

/// Returns the bandmate data directory itself, creating it if needed.
pub fn get_data_dir() -> Result<PathBuf> {
    let data_dir = dirs::data_dir().ok_or_else(|| {
        anyhow::anyhow!("Could not determine system data directory for this platform.")
    })?;

    let bandmate_dir = data_dir.join("bandmate");
    fs::create_dir_all(&bandmate_dir).with_context(|| {
        format!(
            "Failed to create data directory at {}. Please check file permissions.",
            bandmate_dir.display()
        )
    })?;

    Ok(bandmate_dir)
}
