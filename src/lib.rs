// Allow unwrap and unreadable literals in tests (test code is not production)
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::unreadable_literal))]
//! Tilth: the simulation core of a tile-grid farming game.
//!
//! This crate owns the world model and its rules:
//! - Timestamp-driven crop growth, so state catches up after any pause
//! - Section unlocking with adjacency-priced expansion
//! - A coin economy covering tools, seeds, and harvests
//! - Versioned JSON saves with forward migration of old formats
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────┐
//! │     Save / Load (versioned JSON)    │
//! ├─────────────────────────────────────┤
//! │  Game Rules (crops, economy, view)  │
//! ├─────────────────────────────────────┤
//! │      Grid / Section Tile Store      │
//! └─────────────────────────────────────┘
//! ```
//!
//! Rendering, input and timers live outside: callers feed in
//! milliseconds (any [`clock::Clock`]) and screen coordinates, and read
//! back typed state.

pub mod clock;
pub mod config;
pub mod error;
pub mod game;
pub mod save;

pub use clock::{Clock, ManualClock, Millis, SystemClock};
pub use config::GameConfig;
pub use error::{HarvestError, PaintError, PlantError, ToolError, UnlockError, WaterError};

// Re-export key game types at crate root for convenience
pub use game::{
    Coord, CropData, CropKind, CropStage, GameState, Grid, SectionCoord, SeedRegistry, Tile,
    TileType, Tool, ViewTransform,
};
pub use save::{AutoSave, KvStore, MemoryStore};
