//! Wire format for saved games.
//!
//! A save is a JSON document: a version string, a timestamp, and the
//! full game state with the tile map flattened to an ordered list of
//! `["x,y", record]` pairs so it survives text round-trips regardless
//! of key order. [`snapshot`] and [`restore`] convert between that
//! shape and the live [`GameState`].

use serde::{Deserialize, Serialize};

use crate::clock::Millis;
use crate::game::{
    Coord, CropData, CropKind, CropStage, GameState, Grid, Occupation, Tile, TileType,
    ViewTransform,
};

/// Top-level save document.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveFile {
    /// Format version string, e.g. `"1.0.0"`.
    pub version: String,
    /// When the save was written, in milliseconds since the epoch.
    pub timestamp: Millis,
    /// The saved world.
    pub game_state: SavedGameState,
}

/// Serialized game state: grid, camera, wallet.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedGameState {
    /// Serialized grid and sections.
    pub grid: SavedGrid,
    /// Camera zoom factor.
    pub scale: f64,
    /// Camera pan offset, x axis, in screen pixels.
    pub offset_x: f64,
    /// Camera pan offset, y axis, in screen pixels.
    pub offset_y: f64,
    /// Coin balance.
    pub coins: u32,
}

/// Serialized grid: dimensions, tiles as ordered pairs, section matrix.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedGrid {
    /// Grid width in tiles.
    pub width: u16,
    /// Grid height in tiles.
    pub height: u16,
    /// Tile records keyed by `"x,y"`, in column-major write order.
    pub tiles: Vec<(String, TileRecord)>,
    /// Sections, outer index x, inner index y.
    pub sections: Vec<Vec<SectionRecord>>,
}

/// One serialized tile.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TileRecord {
    /// Terrain name: `grass`, `dirt`, `road` or `locked`.
    #[serde(rename = "type")]
    pub base: String,
    /// Tile x coordinate.
    pub x: u16,
    /// Tile y coordinate.
    pub y: u16,
    /// Section column this tile belongs to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section_x: Option<u8>,
    /// Section row this tile belongs to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section_y: Option<u8>,
    /// Occupier name, when something sits on the tile.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub occupation: Option<String>,
    /// Crop payload, when the occupier is a crop.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crop_data: Option<CropRecord>,
    /// Tile-level watering timestamp for bare dirt.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub watered_time: Option<Millis>,
}

/// Serialized crop payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CropRecord {
    /// Crop name: `wheat`, `carrot`, `tomato` or `corn`.
    #[serde(rename = "type")]
    pub kind: String,
    /// Growth stage as a number: 0 seed, 1 growing, 2 mature.
    pub stage: u8,
    /// When the crop was planted, in milliseconds since the epoch.
    pub planted_time: Millis,
    /// When the crop was last watered, if the window may still matter.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub watered_time: Option<Millis>,
}

/// One serialized section.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionRecord {
    /// Section column.
    pub x: u8,
    /// Section row.
    pub y: u8,
    /// Whether the section is still locked.
    pub is_locked: bool,
}

/// Why a save document could not be turned back into a game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SnapshotError {
    /// The stored dimensions do not describe a valid grid.
    BadDimensions {
        /// Stored width.
        width: u16,
        /// Stored height.
        height: u16,
    },
    /// A tile key did not parse as `"x,y"`.
    BadTileKey(String),
    /// A tile lies outside the stored grid.
    TileOutOfBounds {
        /// Tile x coordinate.
        x: u16,
        /// Tile y coordinate.
        y: u16,
    },
    /// A terrain name was not recognized.
    UnknownTileType(String),
    /// An occupier name was not recognized.
    UnknownOccupation(String),
    /// A crop name was not recognized.
    UnknownCrop(String),
    /// A stage number outside 0..=2.
    BadStage(u8),
    /// A section coordinate outside the section matrix.
    BadSectionCoord {
        /// Section column.
        x: u8,
        /// Section row.
        y: u8,
    },
}

impl std::fmt::Display for SnapshotError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BadDimensions { width, height } => {
                write!(f, "invalid grid dimensions {width}x{height}")
            }
            Self::BadTileKey(key) => write!(f, "malformed tile key '{key}'"),
            Self::TileOutOfBounds { x, y } => write!(f, "tile ({x}, {y}) outside the grid"),
            Self::UnknownTileType(name) => write!(f, "unknown tile type '{name}'"),
            Self::UnknownOccupation(name) => write!(f, "unknown occupation '{name}'"),
            Self::UnknownCrop(name) => write!(f, "unknown crop '{name}'"),
            Self::BadStage(n) => write!(f, "crop stage {n} out of range"),
            Self::BadSectionCoord { x, y } => {
                write!(f, "section ({x}, {y}) outside the section grid")
            }
        }
    }
}

impl std::error::Error for SnapshotError {}

/// Format a tile position the way save keys spell it.
#[must_use]
pub fn position_key(coord: Coord) -> String {
    format!("{},{}", coord.x, coord.y)
}

fn parse_position_key(key: &str) -> Option<Coord> {
    let (x, y) = key.split_once(',')?;
    Some(Coord::new(x.parse().ok()?, y.parse().ok()?))
}

fn tile_record(coord: Coord, tile: &Tile) -> TileRecord {
    let sc = coord.section();
    TileRecord {
        base: tile.base.as_str().to_owned(),
        x: coord.x,
        y: coord.y,
        section_x: Some(sc.sx),
        section_y: Some(sc.sy),
        occupation: tile.occupation.map(|o| o.as_str().to_owned()),
        crop_data: tile.crop.map(|crop| CropRecord {
            kind: crop.kind.as_str().to_owned(),
            stage: crop.stage.as_u8(),
            planted_time: crop.planted_at,
            watered_time: crop.watered_at,
        }),
        watered_time: tile.watered_at,
    }
}

/// Snapshot a live game into its wire shape.
#[must_use]
pub fn snapshot(state: &GameState) -> SavedGameState {
    let grid = &state.grid;

    let mut tiles = Vec::with_capacity(usize::from(grid.width()) * usize::from(grid.height()));
    for x in 0..grid.width() {
        for y in 0..grid.height() {
            let coord = Coord::new(x, y);
            if let Some(tile) = grid.get(coord) {
                tiles.push((position_key(coord), tile_record(coord, tile)));
            }
        }
    }

    let mut sections = Vec::with_capacity(usize::from(grid.sections_across()));
    for sx in 0..grid.sections_across() {
        let mut column = Vec::with_capacity(usize::from(grid.sections_down()));
        for sy in 0..grid.sections_down() {
            let sc = crate::game::SectionCoord::new(sx, sy);
            let locked = !crate::game::is_unlocked(grid, sc);
            column.push(SectionRecord {
                x: sx,
                y: sy,
                is_locked: locked,
            });
        }
        sections.push(column);
    }

    SavedGameState {
        grid: SavedGrid {
            width: grid.width(),
            height: grid.height(),
            tiles,
            sections,
        },
        scale: state.view.scale,
        offset_x: state.view.offset_x,
        offset_y: state.view.offset_y,
        coins: state.coins,
    }
}

fn restore_tile(record: &TileRecord) -> Result<Tile, SnapshotError> {
    let base = TileType::parse(&record.base)
        .ok_or_else(|| SnapshotError::UnknownTileType(record.base.clone()))?;

    let occupation = match &record.occupation {
        Some(name) => Some(
            Occupation::parse(name)
                .ok_or_else(|| SnapshotError::UnknownOccupation(name.clone()))?,
        ),
        None => None,
    };

    let crop = match &record.crop_data {
        Some(data) => {
            let kind = CropKind::parse(&data.kind)
                .ok_or_else(|| SnapshotError::UnknownCrop(data.kind.clone()))?;
            let stage =
                CropStage::from_u8(data.stage).ok_or(SnapshotError::BadStage(data.stage))?;
            Some(CropData {
                kind,
                stage,
                planted_at: data.planted_time,
                watered_at: data.watered_time,
            })
        }
        None => None,
    };

    let mut tile = Tile::new(base);
    tile.occupation = occupation;
    tile.crop = crop;
    tile.watered_at = record.watered_time;
    Ok(tile)
}

/// Rebuild a live game from its wire shape.
///
/// Timestamps are restored exactly as stored; growth picks up from them
/// on the next sweep.
///
/// # Errors
///
/// Rejects dimensions that do not form a sectioned grid, tiles outside
/// it, and names or stages that do not parse.
pub fn restore(saved: &SavedGameState) -> Result<GameState, SnapshotError> {
    let mut grid =
        Grid::new(saved.grid.width, saved.grid.height).ok_or(SnapshotError::BadDimensions {
            width: saved.grid.width,
            height: saved.grid.height,
        })?;

    for column in &saved.grid.sections {
        for record in column {
            let sc = crate::game::SectionCoord::new(record.x, record.y);
            let slot = grid
                .section_slot_mut(sc)
                .ok_or(SnapshotError::BadSectionCoord {
                    x: record.x,
                    y: record.y,
                })?;
            slot.locked = record.is_locked;
        }
    }

    for (key, record) in &saved.grid.tiles {
        let coord =
            parse_position_key(key).ok_or_else(|| SnapshotError::BadTileKey(key.clone()))?;
        if !grid.in_bounds(coord) {
            return Err(SnapshotError::TileOutOfBounds {
                x: coord.x,
                y: coord.y,
            });
        }
        let tile = restore_tile(record)?;
        grid.set(coord, tile);
    }

    let view = ViewTransform {
        scale: saved.scale,
        offset_x: saved.offset_x,
        offset_y: saved.offset_y,
    };

    Ok(GameState::from_parts(grid, saved.coins, view))
}
