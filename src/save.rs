//! Save, load, import, export.
//!
//! The whole world lives in one named slot of a string-keyed store as a
//! JSON document. Loading a document whose version string differs from
//! [`SAVE_VERSION`] runs the migration pass and stamps the result.
//! Storage failures never escape this module: a refused write reports
//! `false`, a corrupt document loads as `None`.
//!
//! [`AutoSave`] implements the debounce policy for background saves:
//! rapid mutations coalesce into one write after a quiet period.

mod migrate;
mod snapshot;
mod store;

pub use migrate::{
    migrate_save, migrate_tile, LegacyGameState, LegacyGrid, LegacySaveFile, LegacyTileRecord,
    LEGACY_WATERED_BACKDATE_MS,
};
pub use snapshot::{
    position_key, restore, snapshot, CropRecord, SaveFile, SavedGameState, SavedGrid,
    SectionRecord, SnapshotError, TileRecord,
};
pub use store::{FileStore, KvStore, MemoryStore};

use serde::Deserialize;

use crate::clock::Millis;
use crate::game::GameState;

/// Store key for the single save slot.
pub const SAVE_KEY: &str = "farming-game-save";

/// Current save format version.
pub const SAVE_VERSION: &str = "1.0.0";

/// Header fields of a save document, readable without touching the
/// world payload.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SaveInfo {
    /// Stored format version.
    pub version: String,
    /// When the save was written, in milliseconds since the epoch.
    pub timestamp: Millis,
}

/// A successfully loaded game.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedGame {
    /// The restored world.
    pub state: GameState,
    /// Header of the document it came from.
    pub info: SaveInfo,
    /// Whether a format migration ran during the load.
    pub migrated: bool,
}

/// Serialize the game and write it to the save slot.
///
/// Returns `false` when serialization fails or the store refuses the
/// write.
pub fn save_game(store: &mut impl KvStore, state: &GameState, now: Millis) -> bool {
    let file = SaveFile {
        version: SAVE_VERSION.to_owned(),
        timestamp: now,
        game_state: snapshot(state),
    };
    match serde_json::to_string(&file) {
        Ok(json) => store.set(SAVE_KEY, &json),
        Err(_) => false,
    }
}

fn parse_save(json: &str, now: Millis) -> Option<(SaveFile, bool)> {
    let info: SaveInfo = serde_json::from_str(json).ok()?;
    if info.version == SAVE_VERSION {
        let file: SaveFile = serde_json::from_str(json).ok()?;
        Some((file, false))
    } else {
        let legacy: LegacySaveFile = serde_json::from_str(json).ok()?;
        Some((migrate_save(legacy, SAVE_VERSION, now), true))
    }
}

/// Read, migrate if needed, and restore the saved game.
///
/// Returns `None` when the slot is empty or the document cannot be
/// understood.
#[must_use]
pub fn load_game(store: &impl KvStore, now: Millis) -> Option<LoadedGame> {
    let json = store.get(SAVE_KEY)?;
    let (file, migrated) = parse_save(&json, now)?;
    let state = restore(&file.game_state).ok()?;
    Some(LoadedGame {
        state,
        info: SaveInfo {
            version: file.version,
            timestamp: file.timestamp,
        },
        migrated,
    })
}

/// Whether the save slot holds anything.
#[must_use]
pub fn has_save(store: &impl KvStore) -> bool {
    store.get(SAVE_KEY).is_some()
}

/// Delete the saved game. Returns `true` when a save was present.
pub fn delete_save(store: &mut impl KvStore) -> bool {
    store.remove(SAVE_KEY)
}

/// Read the save header without restoring the world.
#[must_use]
pub fn save_info(store: &impl KvStore) -> Option<SaveInfo> {
    let json = store.get(SAVE_KEY)?;
    serde_json::from_str(&json).ok()
}

/// Hand out the raw save document, e.g. for download.
#[must_use]
pub fn export_save(store: &impl KvStore) -> Option<String> {
    store.get(SAVE_KEY)
}

/// Accept an externally supplied save document.
///
/// The document must parse as JSON and carry `version`, `timestamp` and
/// `gameState` fields; beyond that it is stored verbatim and vetted
/// fully on the next load.
pub fn import_save(store: &mut impl KvStore, json: &str) -> bool {
    let Ok(value) = serde_json::from_str::<serde_json::Value>(json) else {
        return false;
    };
    let complete = value.get("version").is_some()
        && value.get("timestamp").is_some()
        && value.get("gameState").is_some();
    if !complete {
        return false;
    }
    store.set(SAVE_KEY, json)
}

/// Debounced auto-save trigger.
///
/// Each mutating action pushes the deadline out by the configured
/// delay; [`AutoSave::poll`] fires once when the deadline passes with
/// no further changes. The timer is reset, never cancelled-with-cleanup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AutoSave {
    delay: Millis,
    deadline: Option<Millis>,
}

impl AutoSave {
    /// Create a trigger that fires `delay` ms after the last change.
    #[must_use]
    pub const fn new(delay: Millis) -> Self {
        Self {
            delay,
            deadline: None,
        }
    }

    /// Record a mutating action, pushing the deadline out.
    pub const fn note_change(&mut self, now: Millis) {
        self.deadline = Some(now.saturating_add(self.delay));
    }

    /// Whether a save is scheduled.
    #[must_use]
    pub const fn pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// Drop any scheduled save.
    pub const fn cancel(&mut self) {
        self.deadline = None;
    }

    /// Check the deadline. Returns `true` exactly once per quiet
    /// period, when it has elapsed.
    pub fn poll(&mut self, now: Millis) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}
