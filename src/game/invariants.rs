//! Structural sanity checks that detect bugs.
//!
//! In a correctly implemented game these should NEVER trigger. They are
//! not gameplay limits: the rules themselves keep states well-formed,
//! and these sweeps exist to catch corruption early in debug builds,
//! integration tests, and fuzzing. Release builds compile
//! [`assert_invariants`] to a no-op.

use crate::clock::Millis;
use crate::game::crops::derived_stage;
use crate::game::grid::{Occupation, TileType};
use crate::game::sections::{self, section_tiles};
use crate::game::seeds::SeedRegistry;
use crate::game::state::GameState;

/// Invariant violation error.
#[derive(Debug, Clone)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub message: String,
}

impl std::fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Invariant violation: {}", self.message)
    }
}

impl std::error::Error for InvariantViolation {}

/// Check all structural invariants.
///
/// Returns a list of violations found, or empty if all invariants hold.
/// These are bug detectors, not gameplay limits. States restored from
/// foreign or freshly migrated saves are not expected to pass: migration
/// keeps a crop's stage while resetting its timestamps.
#[must_use]
pub fn check_invariants(
    state: &GameState,
    registry: &SeedRegistry,
    now: Millis,
) -> Vec<InvariantViolation> {
    let mut violations = Vec::new();
    let grid = &state.grid;

    // Section list shape
    let expected = usize::from(grid.sections_across()) * usize::from(grid.sections_down());
    if grid.sections().len() != expected {
        violations.push(InvariantViolation {
            message: format!(
                "Section list has {} entries, expected {expected}",
                grid.sections().len()
            ),
        });
    }

    // Lock state and terrain must agree per section
    for section in grid.sections() {
        for coord in section_tiles(section.coord) {
            let Some(tile) = grid.get(coord) else {
                continue;
            };
            if section.locked && tile.base != TileType::Locked {
                violations.push(InvariantViolation {
                    message: format!(
                        "Locked section ({}, {}) has {} terrain at ({}, {})",
                        section.coord.sx,
                        section.coord.sy,
                        tile.base.as_str(),
                        coord.x,
                        coord.y
                    ),
                });
            }
            if !section.locked && tile.base == TileType::Locked {
                violations.push(InvariantViolation {
                    message: format!(
                        "Unlocked section ({}, {}) has locked terrain at ({}, {})",
                        section.coord.sx, section.coord.sy, coord.x, coord.y
                    ),
                });
            }
        }
    }

    let mut home_tiles = 0u32;
    for (coord, tile) in grid.iter() {
        // Crop data pairs exactly with crop occupancy
        let occupied_by_crop = tile.occupation == Some(Occupation::Crop);
        if occupied_by_crop != tile.crop.is_some() {
            violations.push(InvariantViolation {
                message: format!(
                    "Tile ({}, {}) has crop occupation {} but crop data {}",
                    coord.x,
                    coord.y,
                    occupied_by_crop,
                    tile.crop.is_some()
                ),
            });
        }

        // Crops grow on dirt only
        if tile.crop.is_some() && tile.base != TileType::Dirt {
            violations.push(InvariantViolation {
                message: format!(
                    "Crop on {} terrain at ({}, {})",
                    tile.base.as_str(),
                    coord.x,
                    coord.y
                ),
            });
        }

        // Nothing lives on locked land
        if tile.is_occupied() && !sections::is_tile_accessible(grid, coord) {
            violations.push(InvariantViolation {
                message: format!(
                    "Occupied tile ({}, {}) in a locked section",
                    coord.x, coord.y
                ),
            });
        }

        // Tile-level watering belongs to dirt
        if tile.watered_at.is_some() && tile.base != TileType::Dirt {
            violations.push(InvariantViolation {
                message: format!(
                    "Watered {} terrain at ({}, {})",
                    tile.base.as_str(),
                    coord.x,
                    coord.y
                ),
            });
        }

        // Stored stages never run ahead of what timestamps imply
        if let Some(crop) = &tile.crop {
            let derived = derived_stage(crop, registry.get(crop.kind), now);
            if crop.stage > derived {
                violations.push(InvariantViolation {
                    message: format!(
                        "Crop at ({}, {}) stored stage {:?} ahead of derived {:?}",
                        coord.x, coord.y, crop.stage, derived
                    ),
                });
            }
        }

        if tile.occupation == Some(Occupation::Home) {
            home_tiles += 1;
        }
    }

    // The homestead is all-or-nothing: a full block or absent
    if home_tiles != 0 && home_tiles != 4 {
        violations.push(InvariantViolation {
            message: format!("Homestead covers {home_tiles} tiles, expected 0 or 4"),
        });
    }

    violations
}

/// Panic on any broken invariant. Debug builds only.
#[cfg(debug_assertions)]
pub fn assert_invariants(state: &GameState, registry: &SeedRegistry, now: Millis) {
    let violations = check_invariants(state, registry, now);
    assert!(
        violations.is_empty(),
        "game state invariants violated:\n{}",
        violations
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n")
    );
}

/// No-op in release builds.
#[cfg(not(debug_assertions))]
pub fn assert_invariants(_state: &GameState, _registry: &SeedRegistry, _now: Millis) {}
