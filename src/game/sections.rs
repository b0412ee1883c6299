//! Section lock state over the grid.
//!
//! The grid is carved into 12x12 sections. A fresh world has every section
//! locked except the center one; locked sections render as [`TileType::Locked`]
//! terrain and refuse all farming. Unlocking is progressive: only sections
//! touching already-unlocked land (8-way) can be bought, and unlocking resets
//! the section's footprint to open grass, wiping whatever was on it.

use crate::game::grid::{Coord, Grid, Tile};

/// Edge length of a section in tiles.
pub const SECTION_SIZE: u16 = 12;

/// Sections across the default 60x60 grid.
pub const SECTIONS_PER_ROW: u8 = 5;

/// A coordinate in section space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SectionCoord {
    /// Section column.
    pub sx: u8,
    /// Section row.
    pub sy: u8,
}

impl SectionCoord {
    /// Create a new section coordinate.
    #[must_use]
    pub const fn new(sx: u8, sy: u8) -> Self {
        Self { sx, sy }
    }

    /// Grid coordinate of this section's top-left tile.
    #[must_use]
    pub const fn origin(self) -> Coord {
        Coord::new(
            self.sx as u16 * SECTION_SIZE,
            self.sy as u16 * SECTION_SIZE,
        )
    }
}

/// Lock state of one section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Section {
    /// Where this section sits in section space.
    pub coord: SectionCoord,
    /// Whether the section is still locked.
    pub locked: bool,
}

/// Counts of sections by lock state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionSummary {
    /// Total number of sections.
    pub total: u32,
    /// Sections the player has opened.
    pub unlocked: u32,
    /// Sections still locked.
    pub locked: u32,
}

/// Build the initial section list: all locked except the center.
pub(crate) fn create_sections(across: u16, down: u16) -> Vec<Section> {
    let center = SectionCoord::new((across / 2) as u8, (down / 2) as u8);
    let mut sections = Vec::with_capacity(usize::from(across) * usize::from(down));
    for sy in 0..down as u8 {
        for sx in 0..across as u8 {
            let coord = SectionCoord::new(sx, sy);
            sections.push(Section {
                coord,
                locked: coord != center,
            });
        }
    }
    sections
}

/// The section unlocked from the start.
#[must_use]
pub fn center_section(grid: &Grid) -> SectionCoord {
    SectionCoord::new(grid.sections_across() / 2, grid.sections_down() / 2)
}

/// Look up a section by coordinate.
#[must_use]
pub fn section(grid: &Grid, sc: SectionCoord) -> Option<&Section> {
    grid.section_index(sc).map(|idx| &grid.sections()[idx])
}

/// Check if a section exists and is unlocked.
#[must_use]
pub fn is_unlocked(grid: &Grid, sc: SectionCoord) -> bool {
    section(grid, sc).is_some_and(|s| !s.locked)
}

/// Check if a tile can be interacted with (its section is unlocked).
#[must_use]
pub fn is_tile_accessible(grid: &Grid, coord: Coord) -> bool {
    grid.in_bounds(coord) && is_unlocked(grid, coord.section())
}

/// Check if any of the 8 neighboring sections is unlocked.
#[must_use]
pub fn is_adjacent_to_unlocked(grid: &Grid, sc: SectionCoord) -> bool {
    for dy in -1i16..=1 {
        for dx in -1i16..=1 {
            if dx == 0 && dy == 0 {
                continue;
            }
            let nx = i16::from(sc.sx) + dx;
            let ny = i16::from(sc.sy) + dy;
            if nx < 0
                || ny < 0
                || nx >= i16::from(grid.sections_across())
                || ny >= i16::from(grid.sections_down())
            {
                continue;
            }
            let neighbor = SectionCoord::new(nx as u8, ny as u8);
            if is_unlocked(grid, neighbor) {
                return true;
            }
        }
    }
    false
}

/// Iterate the 144 tile coordinates of a section.
pub fn section_tiles(sc: SectionCoord) -> impl Iterator<Item = Coord> {
    let origin = sc.origin();
    (0..SECTION_SIZE).flat_map(move |dy| {
        (0..SECTION_SIZE).map(move |dx| Coord::new(origin.x + dx, origin.y + dy))
    })
}

/// Unlock a section and reset its footprint to open grass.
///
/// Whatever was on those tiles is destroyed; unlocking is a fresh start for
/// the section. Returns `false` if the section does not exist or is already
/// unlocked.
pub fn unlock_section(grid: &mut Grid, sc: SectionCoord) -> bool {
    match grid.section_slot_mut(sc) {
        Some(slot) if slot.locked => slot.locked = false,
        _ => return false,
    }
    for coord in section_tiles(sc) {
        grid.set(coord, Tile::grass());
    }
    true
}

/// Re-lock a section and reset its footprint to locked terrain.
///
/// The destructive mirror of [`unlock_section`]. Returns `false` if the
/// section does not exist or is already locked.
pub fn lock_section(grid: &mut Grid, sc: SectionCoord) -> bool {
    match grid.section_slot_mut(sc) {
        Some(slot) if !slot.locked => slot.locked = true,
        _ => return false,
    }
    for coord in section_tiles(sc) {
        grid.set(coord, Tile::locked());
    }
    true
}

/// Tally sections by lock state.
#[must_use]
pub fn summarize(grid: &Grid) -> SectionSummary {
    let total = grid.sections().len() as u32;
    let unlocked = grid.sections().iter().filter(|s| !s.locked).count() as u32;
    SectionSummary {
        total,
        unlocked,
        locked: total - unlocked,
    }
}
