use std::path::Path;

use super::domain::Listing;

/// The dataset compiled into the binary, used when no override path is
/// configured.
static EMBEDDED_LISTINGS: &str = include_str!("listings.json");

/// A dataset that cannot be read or parsed aborts startup; there is nothing
/// to serve without one.
#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    #[error("failed to read listings dataset: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse listings dataset: {0}")]
    Parse(#[from] serde_json::Error),
}

pub fn load_default() -> Result<Vec<Listing>, DatasetError> {
    from_str(EMBEDDED_LISTINGS)
}

pub fn load_from_path(path: &Path) -> Result<Vec<Listing>, DatasetError> {
    let raw = std::fs::read_to_string(path)?;
    from_str(&raw)
}

pub fn from_str(raw: &str) -> Result<Vec<Listing>, DatasetError> {
    Ok(serde_json::from_str(raw)?)
}
