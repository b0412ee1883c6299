//! Homestead placement.
//!
//! The homestead is a fixed 2x2 block in the starting section, offset from
//! the section origin so it sits clear of the middle plots. Its tiles carry
//! [`Occupation::Home`] and refuse terrain edits and planting.

use crate::game::grid::{Coord, Grid, Occupation};
use crate::game::sections;

/// Homestead edge length in tiles.
pub const HOME_SIZE: u16 = 2;

/// Offset of the homestead from the starting section's origin.
pub const HOME_OFFSET: (u16, u16) = (5, 2);

/// Top-left tile of the homestead's spot in the starting section.
#[must_use]
pub fn home_anchor(grid: &Grid) -> Coord {
    let origin = sections::center_section(grid).origin();
    Coord::new(origin.x + HOME_OFFSET.0, origin.y + HOME_OFFSET.1)
}

/// Iterate the homestead's tile coordinates.
fn home_coords(anchor: Coord) -> impl Iterator<Item = Coord> {
    (0..HOME_SIZE).flat_map(move |dy| {
        (0..HOME_SIZE).map(move |dx| Coord::new(anchor.x + dx, anchor.y + dy))
    })
}

/// Stamp the homestead onto its spot in the starting section.
///
/// Every tile of the block must exist, be accessible, and be unoccupied.
/// Returns `false` (changing nothing) otherwise, including when a homestead
/// already stands.
pub fn place_home(grid: &mut Grid) -> bool {
    let anchor = home_anchor(grid);
    let placeable = home_coords(anchor).all(|coord| {
        sections::is_tile_accessible(grid, coord)
            && grid.get(coord).is_some_and(|tile| !tile.is_occupied())
    });
    if !placeable {
        return false;
    }
    for coord in home_coords(anchor) {
        if let Some(tile) = grid.get_mut(coord) {
            tile.occupation = Some(Occupation::Home);
        }
    }
    true
}

/// Check if any tile carries the homestead.
#[must_use]
pub fn has_home(grid: &Grid) -> bool {
    grid.iter()
        .any(|(_, tile)| tile.occupation == Some(Occupation::Home))
}

/// Bounding box of the homestead, if one stands.
#[must_use]
pub fn home_bounds(grid: &Grid) -> Option<(Coord, Coord)> {
    let mut bounds: Option<(Coord, Coord)> = None;
    for (coord, tile) in grid.iter() {
        if tile.occupation != Some(Occupation::Home) {
            continue;
        }
        bounds = Some(match bounds {
            None => (coord, coord),
            Some((min, max)) => (
                Coord::new(min.x.min(coord.x), min.y.min(coord.y)),
                Coord::new(max.x.max(coord.x), max.y.max(coord.y)),
            ),
        });
    }
    bounds
}
