//! JSON deck file loading.
//!
//! A deck is a JSON array of `{ "title": ..., "body": ..., "undoable": ... }`
//! objects; only `title` is required.

use super::card::DemoCard;
use crate::model::DeckError;
use serde::Deserialize;
use std::path::Path;
use tracing::info;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct DeckEntry {
    title: String,
    #[serde(default)]
    body: Option<String>,
    #[serde(default)]
    undoable: Option<bool>,
}

/// Parse deck JSON. Cards are numbered from zero in file order.
pub fn parse_deck(json: &str, path: &Path) -> Result<Vec<DemoCard>, DeckError> {
    let entries: Vec<DeckEntry> =
        serde_json::from_str(json).map_err(|e| DeckError::InvalidJson {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    if entries.is_empty() {
        return Err(DeckError::Empty {
            path: path.to_path_buf(),
        });
    }

    Ok(entries
        .into_iter()
        .enumerate()
        .map(|(index, entry)| DemoCard {
            id: index as u64,
            title: entry.title,
            body: entry.body.unwrap_or_default(),
            undoable: entry.undoable.unwrap_or(true),
        })
        .collect())
}

/// Read and parse the deck at `path`.
///
/// # Errors
///
/// `FileNotFound` for a missing file, `Io` for read failures, `InvalidJson`
/// or `Empty` for bad contents.
pub fn load_deck(path: &Path) -> Result<Vec<DemoCard>, DeckError> {
    if !path.exists() {
        return Err(DeckError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let json = std::fs::read_to_string(path)?;
    let cards = parse_deck(&json, path)?;
    info!(path = %path.display(), cards = cards.len(), "Loaded deck");
    Ok(cards)
}
