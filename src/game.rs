//! Game layer for Tilth.
//!
//! Implements the farming rules on top of the tile grid:
//! - Grid of tiles (grass, dirt, roads, locked land)
//! - Sections that unlock for coins as the farm expands
//! - Crops with timestamp-driven growth and watering
//! - Economy (tool prices, harvest payouts, section pricing)
//! - Camera transform between screen and grid space

mod crops;
mod economy;
mod grid;
mod home;
mod invariants;
mod seeds;
mod sections;
mod state;
mod view;

pub use crops::{
    can_water_any, can_water_crop, can_water_dirt, derived_stage, effective_elapsed_half,
    effective_elapsed_ms, growth_progress, harvest_crop, is_watered, plant_seed,
    remaining_growth_ms, remaining_water_ms, update_growth, water_any, water_crop, water_dirt,
    CropData, CropKind, CropStage, WaterTarget, WATER_DURATION_MS,
};
pub use economy::{
    award_harvest, can_afford, can_unlock_section, count_unlocked_non_center, spend, unlock_cost,
    SpendOutcome, Tool, ADJACENCY_DISCOUNT_PERCENT, BASE_SECTION_COST, SECTION_COST_INCREASE,
};
pub use grid::{Coord, Grid, Occupation, Tile, TileType};
pub use home::{has_home, home_anchor, home_bounds, place_home, HOME_OFFSET, HOME_SIZE};
pub use invariants::{assert_invariants, check_invariants, InvariantViolation};
pub use seeds::{Rarity, SeedConfig, SeedRegistry, StageColors};
pub use sections::{
    center_section, is_adjacent_to_unlocked, is_tile_accessible, is_unlocked, lock_section,
    section, section_tiles, summarize, unlock_section, Section, SectionCoord, SectionSummary,
    SECTIONS_PER_ROW, SECTION_SIZE,
};
pub use state::{GameState, ToolOutcome};
pub use view::ViewTransform;
