//! Forward migration of older save formats.
//!
//! The oldest saves encoded everything about a tile in one type string:
//! `"carrot_mature"`, `"wheat_seeds"`, `"home"`. Current saves split
//! that into terrain, occupation and crop payload. Migration is a pure
//! transform from a tolerant superset shape ([`LegacySaveFile`]) to the
//! current [`SaveFile`]: tile types that already parse pass through
//! untouched, everything else is inferred from substrings. Unknown
//! strings become plain grass rather than failing the whole load.

use serde::Deserialize;

use crate::clock::Millis;
use crate::config::GameConfig;
use crate::game::{CropKind, CropStage, TileType};
use crate::save::snapshot::{
    CropRecord, SaveFile, SavedGameState, SavedGrid, SectionRecord, TileRecord,
};

/// Synthetic `wateredTime` backdate for legacy boolean watered flags,
/// leaving half the watering window still to run after migration.
pub const LEGACY_WATERED_BACKDATE_MS: Millis = 30_000;

/// Tolerant top-level save shape: parses current and legacy documents.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacySaveFile {
    /// Stored format version.
    pub version: String,
    /// When the save was written.
    pub timestamp: Millis,
    /// The saved world, in whatever shape it was written.
    pub game_state: LegacyGameState,
}

/// Tolerant game state shape. Early saves carried no coin balance.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyGameState {
    /// Serialized grid.
    pub grid: LegacyGrid,
    /// Camera zoom factor.
    pub scale: f64,
    /// Camera pan offset, x axis.
    pub offset_x: f64,
    /// Camera pan offset, y axis.
    pub offset_y: f64,
    /// Coin balance, absent in the earliest saves.
    #[serde(default)]
    pub coins: Option<u32>,
}

/// Tolerant grid shape.
#[derive(Debug, Clone, Deserialize)]
pub struct LegacyGrid {
    /// Grid width in tiles.
    pub width: u16,
    /// Grid height in tiles.
    pub height: u16,
    /// Tile records keyed by `"x,y"`.
    pub tiles: Vec<(String, LegacyTileRecord)>,
    /// Sections, outer index x, inner index y.
    pub sections: Vec<Vec<SectionRecord>>,
}

/// One tile in any known historical shape.
///
/// Extra fields older writers emitted (fence flags and the like) are
/// ignored by serde.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyTileRecord {
    /// Type string. Either a plain terrain name or a baked legacy
    /// encoding like `"carrot_mature"`.
    #[serde(rename = "type")]
    pub type_name: String,
    /// Tile x coordinate.
    pub x: u16,
    /// Tile y coordinate.
    pub y: u16,
    /// Legacy boolean watered flag.
    #[serde(default)]
    pub watered: Option<bool>,
    /// Occupier name, present in newer records.
    #[serde(default)]
    pub occupation: Option<String>,
    /// Crop payload, present in newer records.
    #[serde(default)]
    pub crop_data: Option<CropRecord>,
    /// Tile-level watering timestamp, present in newer records.
    #[serde(default)]
    pub watered_time: Option<Millis>,
}

fn infer_crop_kind(name: &str) -> Option<CropKind> {
    CropKind::ALL
        .into_iter()
        .find(|kind| name.contains(kind.as_str()))
}

fn infer_stage(name: &str) -> CropStage {
    if name.contains("mature") {
        CropStage::Mature
    } else if name.contains("grow") {
        CropStage::Growing
    } else {
        // "seed" and anything unrecognized start from the beginning.
        CropStage::Seed
    }
}

fn synthetic_watered_time(watered: Option<bool>, now: Millis) -> Option<Millis> {
    match watered {
        Some(true) => Some(now.saturating_sub(LEGACY_WATERED_BACKDATE_MS)),
        _ => None,
    }
}

/// Migrate one tile record to the current shape.
///
/// Records whose type string already names a terrain pass through with
/// their newer fields intact. Baked legacy encodings are split into
/// terrain, occupation and crop payload, with `plantedTime` defaulting
/// to `now` since the legacy shape never recorded it.
#[must_use]
pub fn migrate_tile(record: &LegacyTileRecord, now: Millis) -> TileRecord {
    let name = record.type_name.to_lowercase();
    let sx = record.x / crate::game::SECTION_SIZE;
    let sy = record.y / crate::game::SECTION_SIZE;

    #[allow(clippy::cast_possible_truncation)]
    let passthrough = |base: &str, occupation: Option<String>, crop_data: Option<CropRecord>| {
        TileRecord {
            base: base.to_owned(),
            x: record.x,
            y: record.y,
            section_x: Some(sx as u8),
            section_y: Some(sy as u8),
            occupation,
            crop_data,
            watered_time: record.watered_time,
        }
    };

    if TileType::parse(&name).is_some() {
        // Already current: keep whatever the record carries.
        return passthrough(&name, record.occupation.clone(), record.crop_data.clone());
    }

    if let Some(kind) = infer_crop_kind(&name) {
        let stage = infer_stage(&name);
        let mut migrated = passthrough(
            TileType::Dirt.as_str(),
            Some("crop".to_owned()),
            Some(CropRecord {
                kind: kind.as_str().to_owned(),
                stage: stage.as_u8(),
                planted_time: now,
                watered_time: synthetic_watered_time(record.watered, now),
            }),
        );
        migrated.watered_time = None;
        return migrated;
    }

    if name.contains("home") {
        return passthrough(TileType::Grass.as_str(), Some("home".to_owned()), None);
    }

    // Unrecognized legacy value: reset to bare grass.
    passthrough(TileType::Grass.as_str(), None, None)
}

/// Migrate a whole save document to the current format.
///
/// Every tile is passed through [`migrate_tile`], the section matrix is
/// kept as stored, a missing coin balance becomes the new-game stake,
/// and the document is stamped with `version`.
#[must_use]
pub fn migrate_save(legacy: LegacySaveFile, version: &str, now: Millis) -> SaveFile {
    let tiles = legacy
        .game_state
        .grid
        .tiles
        .iter()
        .map(|(key, record)| (key.clone(), migrate_tile(record, now)))
        .collect();

    SaveFile {
        version: version.to_owned(),
        timestamp: legacy.timestamp,
        game_state: SavedGameState {
            grid: SavedGrid {
                width: legacy.game_state.grid.width,
                height: legacy.game_state.grid.height,
                tiles,
                sections: legacy.game_state.grid.sections,
            },
            scale: legacy.game_state.scale,
            offset_x: legacy.game_state.offset_x,
            offset_y: legacy.game_state.offset_y,
            coins: legacy
                .game_state
                .coins
                .unwrap_or(GameConfig::default().starting_coins),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // A real pre-split save: stage and crop baked into the type string,
    // watered as a boolean, no coins, a fence flag nothing reads now.
    const LEGACY_FIXTURE: &str = r#"{
        "version": "0.9.0",
        "timestamp": 1700000000000,
        "gameState": {
            "grid": {
                "width": 60,
                "height": 60,
                "tiles": [
                    ["24,24", {"type": "carrot_mature", "x": 24, "y": 24, "watered": true}],
                    ["25,24", {"type": "wheat_seeds", "x": 25, "y": 24}],
                    ["26,24", {"type": "tomato_growing", "x": 26, "y": 24, "watered": false}],
                    ["27,24", {"type": "home", "x": 27, "y": 24}],
                    ["28,24", {"type": "sprinkler", "x": 28, "y": 24}],
                    ["29,24", {"type": "dirt", "x": 29, "y": 24, "wateredTime": 1699999990000}]
                ],
                "sections": [
                    [{"x": 0, "y": 0, "isLocked": true, "hasFence": false}],
                    [{"x": 1, "y": 0, "isLocked": false, "hasFence": false}]
                ]
            },
            "scale": 1.25,
            "offsetX": -40.5,
            "offsetY": 12.0
        }
    }"#;

    const NOW: Millis = 1_755_000_000_000;

    fn migrated_fixture() -> SaveFile {
        let legacy: LegacySaveFile = serde_json::from_str(LEGACY_FIXTURE).unwrap();
        migrate_save(legacy, "1.0.0", NOW)
    }

    fn tile<'a>(file: &'a SaveFile, key: &str) -> &'a TileRecord {
        &file
            .game_state
            .grid
            .tiles
            .iter()
            .find(|(k, _)| k == key)
            .unwrap()
            .1
    }

    #[test]
    fn test_mature_carrot_splits_into_current_shape() {
        let file = migrated_fixture();
        let record = tile(&file, "24,24");

        assert_eq!(record.base, "dirt");
        assert_eq!(record.occupation.as_deref(), Some("crop"));
        let crop = record.crop_data.as_ref().unwrap();
        assert_eq!(crop.kind, "carrot");
        assert_eq!(crop.stage, 2);
        assert_eq!(crop.planted_time, NOW);
        assert_eq!(crop.watered_time, Some(NOW - LEGACY_WATERED_BACKDATE_MS));
    }

    #[test]
    fn test_seed_and_growing_stages_infer_from_substrings() {
        let file = migrated_fixture();

        let wheat = tile(&file, "25,24");
        assert_eq!(wheat.crop_data.as_ref().unwrap().kind, "wheat");
        assert_eq!(wheat.crop_data.as_ref().unwrap().stage, 0);
        assert_eq!(wheat.crop_data.as_ref().unwrap().watered_time, None);

        let tomato = tile(&file, "26,24");
        assert_eq!(tomato.crop_data.as_ref().unwrap().kind, "tomato");
        assert_eq!(tomato.crop_data.as_ref().unwrap().stage, 1);
        // watered: false is not a watering.
        assert_eq!(tomato.crop_data.as_ref().unwrap().watered_time, None);
    }

    #[test]
    fn test_home_and_unknown_types() {
        let file = migrated_fixture();

        let home = tile(&file, "27,24");
        assert_eq!(home.base, "grass");
        assert_eq!(home.occupation.as_deref(), Some("home"));
        assert!(home.crop_data.is_none());

        let unknown = tile(&file, "28,24");
        assert_eq!(unknown.base, "grass");
        assert_eq!(unknown.occupation, None);
        assert!(unknown.crop_data.is_none());
    }

    #[test]
    fn test_current_shape_tiles_pass_through() {
        let file = migrated_fixture();
        let record = tile(&file, "29,24");

        assert_eq!(record.base, "dirt");
        assert_eq!(record.occupation, None);
        assert_eq!(record.watered_time, Some(1_699_999_990_000));
    }

    #[test]
    fn test_document_is_stamped_and_defaulted() {
        let file = migrated_fixture();

        assert_eq!(file.version, "1.0.0");
        // Timestamp is the original write time, not migration time.
        assert_eq!(file.timestamp, 1_700_000_000_000);
        assert_eq!(file.game_state.coins, GameConfig::default().starting_coins);
        assert!((file.game_state.scale - 1.25).abs() < f64::EPSILON);
        // Fence flags are dropped, lock flags survive.
        assert!(file.game_state.grid.sections[0][0].is_locked);
        assert!(!file.game_state.grid.sections[1][0].is_locked);
    }

    #[test]
    fn test_migrated_tile_restores_into_a_live_game() {
        let file = migrated_fixture();
        // Make the sparse fixture restorable: dimensions stay, tiles
        // only partially cover the grid, sections partially given.
        let state = crate::save::snapshot::restore(&file.game_state).unwrap();

        let tile = state.grid.get(crate::game::Coord::new(24, 24)).unwrap();
        assert_eq!(tile.base, TileType::Dirt);
        assert_eq!(tile.occupation, Some(crate::game::Occupation::Crop));
        let crop = tile.crop.unwrap();
        assert_eq!(crop.kind, CropKind::Carrot);
        assert_eq!(crop.stage, CropStage::Mature);
        assert_eq!(crop.planted_at, NOW);
    }

    #[test]
    fn test_corn_recognized_in_baked_names() {
        let record = LegacyTileRecord {
            type_name: "CORN_GROWING".to_owned(),
            x: 30,
            y: 30,
            watered: Some(true),
            occupation: None,
            crop_data: None,
            watered_time: None,
        };
        let migrated = migrate_tile(&record, NOW);

        assert_eq!(migrated.base, "dirt");
        let crop = migrated.crop_data.unwrap();
        assert_eq!(crop.kind, "corn");
        assert_eq!(crop.stage, 1);
        assert_eq!(crop.watered_time, Some(NOW - LEGACY_WATERED_BACKDATE_MS));
    }
}
