//! Grid and tile types.
//!
//! Tiles live in a dense row-major `Vec`, indexed by coordinate. A tile is
//! terrain plus optional occupancy: a crop (with its growth data) or the
//! homestead. Section lock state is tracked per 12x12 region alongside the
//! tiles; a tile's section is derived from its coordinate and never stored.

use crate::clock::Millis;
use crate::error::PaintError;
use crate::game::crops::{CropData, WATER_DURATION_MS};
use crate::game::sections::{self, Section, SectionCoord, SECTION_SIZE};

/// A coordinate on the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Coord {
    /// X coordinate (column).
    pub x: u16,
    /// Y coordinate (row).
    pub y: u16,
}

impl Coord {
    /// Create a new coordinate.
    #[must_use]
    pub const fn new(x: u16, y: u16) -> Self {
        Self { x, y }
    }

    /// The section this coordinate falls in.
    #[must_use]
    #[inline]
    pub const fn section(self) -> SectionCoord {
        SectionCoord::new(
            (self.x / SECTION_SIZE) as u8,
            (self.y / SECTION_SIZE) as u8,
        )
    }
}

/// Base terrain of a tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum TileType {
    /// Default open ground.
    Grass = 0,
    /// Tilled soil, the only terrain that takes seeds.
    Dirt = 1,
    /// Decorative path.
    Road = 2,
    /// Terrain of a section that has not been bought yet.
    Locked = 3,
}

impl TileType {
    /// Check if seeds can be planted on this terrain.
    #[must_use]
    pub const fn is_farmable(self) -> bool {
        matches!(self, TileType::Dirt)
    }

    /// Check if this terrain belongs to a locked section.
    #[must_use]
    pub const fn is_locked(self) -> bool {
        matches!(self, TileType::Locked)
    }

    /// Stable string form used in save files.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            TileType::Grass => "grass",
            TileType::Dirt => "dirt",
            TileType::Road => "road",
            TileType::Locked => "locked",
        }
    }

    /// Parse the save-file string form.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "grass" => Some(TileType::Grass),
            "dirt" => Some(TileType::Dirt),
            "road" => Some(TileType::Road),
            "locked" => Some(TileType::Locked),
            _ => None,
        }
    }
}

/// What currently sits on a tile, besides terrain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Occupation {
    /// Part of the 2x2 homestead.
    Home,
    /// A planted crop; the tile carries [`CropData`].
    Crop,
}

impl Occupation {
    /// Stable string form used in save files.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Occupation::Home => "home",
            Occupation::Crop => "crop",
        }
    }

    /// Parse the save-file string form.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "home" => Some(Occupation::Home),
            "crop" => Some(Occupation::Crop),
            _ => None,
        }
    }
}

/// A single tile on the grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tile {
    /// Base terrain.
    pub base: TileType,
    /// What occupies the tile, if anything.
    pub occupation: Option<Occupation>,
    /// Growth data, present exactly when `occupation` is `Crop`.
    pub crop: Option<CropData>,
    /// When bare dirt was last watered. Crops track their own window.
    pub watered_at: Option<Millis>,
}

impl Tile {
    /// Create an empty tile with the given terrain.
    #[must_use]
    pub const fn new(base: TileType) -> Self {
        Self {
            base,
            occupation: None,
            crop: None,
            watered_at: None,
        }
    }

    /// Create a grass tile.
    #[must_use]
    pub const fn grass() -> Self {
        Self::new(TileType::Grass)
    }

    /// Create a dirt tile.
    #[must_use]
    pub const fn dirt() -> Self {
        Self::new(TileType::Dirt)
    }

    /// Create a road tile.
    #[must_use]
    pub const fn road() -> Self {
        Self::new(TileType::Road)
    }

    /// Create a locked tile.
    #[must_use]
    pub const fn locked() -> Self {
        Self::new(TileType::Locked)
    }

    /// Check if anything occupies the tile.
    #[must_use]
    #[inline]
    pub const fn is_occupied(&self) -> bool {
        self.occupation.is_some()
    }

    /// Check if a crop occupies the tile.
    #[must_use]
    #[inline]
    pub const fn has_crop(&self) -> bool {
        matches!(self.occupation, Some(Occupation::Crop))
    }

    /// Check if this is bare dirt with a live watering window.
    #[must_use]
    pub fn dirt_watered(&self, now: Millis) -> bool {
        self.base == TileType::Dirt
            && !self.has_crop()
            && self
                .watered_at
                .is_some_and(|w| now.saturating_sub(w) < WATER_DURATION_MS)
    }

    /// Remove any crop from the tile, leaving the terrain as is.
    pub const fn clear_crop(&mut self) {
        if matches!(self.occupation, Some(Occupation::Crop)) {
            self.occupation = None;
        }
        self.crop = None;
    }
}

/// The game grid.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    /// Width in tiles.
    width: u16,
    /// Height in tiles.
    height: u16,
    /// Tiles in row-major order.
    tiles: Vec<Tile>,
    /// Section lock state, row-major by section coordinate.
    sections: Vec<Section>,
}

impl Grid {
    /// Create a new world. Every section starts locked except the center,
    /// which starts as open grass.
    ///
    /// # Errors
    ///
    /// Returns `None` if either dimension is zero or not a multiple of
    /// [`SECTION_SIZE`].
    #[must_use]
    pub fn new(width: u16, height: u16) -> Option<Self> {
        if width == 0 || height == 0 {
            return None;
        }
        if width % SECTION_SIZE != 0 || height % SECTION_SIZE != 0 {
            return None;
        }
        // Section coordinates are u8.
        if width / SECTION_SIZE > u16::from(u8::MAX) || height / SECTION_SIZE > u16::from(u8::MAX) {
            return None;
        }

        let sections = sections::create_sections(width / SECTION_SIZE, height / SECTION_SIZE);
        let size = usize::from(width) * usize::from(height);
        let mut tiles = vec![Tile::locked(); size];

        for (idx, tile) in tiles.iter_mut().enumerate() {
            let x = (idx % usize::from(width)) as u16;
            let y = (idx / usize::from(width)) as u16;
            let sc = Coord::new(x, y).section();
            let section_idx =
                usize::from(sc.sy) * usize::from(width / SECTION_SIZE) + usize::from(sc.sx);
            if !sections[section_idx].locked {
                *tile = Tile::grass();
            }
        }

        Some(Self {
            width,
            height,
            tiles,
            sections,
        })
    }

    /// Get the width of the grid.
    #[must_use]
    pub const fn width(&self) -> u16 {
        self.width
    }

    /// Get the height of the grid.
    #[must_use]
    pub const fn height(&self) -> u16 {
        self.height
    }

    /// Number of sections across.
    #[must_use]
    pub const fn sections_across(&self) -> u8 {
        (self.width / SECTION_SIZE) as u8
    }

    /// Number of sections down.
    #[must_use]
    pub const fn sections_down(&self) -> u8 {
        (self.height / SECTION_SIZE) as u8
    }

    /// All sections, row-major by section coordinate.
    #[must_use]
    #[inline]
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub(crate) fn section_slot_mut(&mut self, sc: SectionCoord) -> Option<&mut Section> {
        let idx = self.section_index(sc)?;
        Some(&mut self.sections[idx])
    }

    pub(crate) fn section_index(&self, sc: SectionCoord) -> Option<usize> {
        if sc.sx < self.sections_across() && sc.sy < self.sections_down() {
            Some(usize::from(sc.sy) * usize::from(self.sections_across()) + usize::from(sc.sx))
        } else {
            None
        }
    }

    /// Check if a coordinate is within the grid bounds.
    #[must_use]
    pub const fn in_bounds(&self, coord: Coord) -> bool {
        coord.x < self.width && coord.y < self.height
    }

    /// Convert a coordinate to an index into the tiles array.
    fn coord_to_index(&self, coord: Coord) -> Option<usize> {
        if self.in_bounds(coord) {
            Some(usize::from(coord.y) * usize::from(self.width) + usize::from(coord.x))
        } else {
            None
        }
    }

    /// Get a reference to the tile at the given coordinate.
    #[must_use]
    pub fn get(&self, coord: Coord) -> Option<&Tile> {
        self.coord_to_index(coord).map(|idx| &self.tiles[idx])
    }

    /// Get a mutable reference to the tile at the given coordinate.
    #[must_use]
    pub fn get_mut(&mut self, coord: Coord) -> Option<&mut Tile> {
        self.coord_to_index(coord).map(|idx| &mut self.tiles[idx])
    }

    /// Overwrite the terrain at the given coordinate without any gameplay
    /// checks. Occupancy and crop data are untouched.
    ///
    /// Returns `false` if the coordinate is out of bounds.
    pub fn set_base(&mut self, coord: Coord, base: TileType) -> bool {
        if let Some(idx) = self.coord_to_index(coord) {
            self.tiles[idx].base = base;
            true
        } else {
            false
        }
    }

    /// Replace the whole tile at the given coordinate.
    ///
    /// Returns `false` if the coordinate is out of bounds.
    pub fn set(&mut self, coord: Coord, tile: Tile) -> bool {
        if let Some(idx) = self.coord_to_index(coord) {
            self.tiles[idx] = tile;
            true
        } else {
            false
        }
    }

    /// Apply a terrain tool, honoring gameplay rules: the tile must exist,
    /// its section must be unlocked, and nothing may occupy it.
    ///
    /// # Errors
    ///
    /// Refuses out-of-bounds targets, locked sections, and occupied tiles.
    pub fn paint_base(&mut self, coord: Coord, base: TileType) -> Result<(), PaintError> {
        let Some(idx) = self.coord_to_index(coord) else {
            return Err(PaintError::OutOfBounds);
        };
        if !sections::is_tile_accessible(self, coord) {
            return Err(PaintError::Locked);
        }
        if self.tiles[idx].is_occupied() {
            return Err(PaintError::Occupied);
        }
        let tile = &mut self.tiles[idx];
        tile.base = base;
        // Repainting resets any dirt watering.
        tile.watered_at = None;
        Ok(())
    }

    /// Iterate over all coordinates and tiles.
    pub fn iter(&self) -> impl Iterator<Item = (Coord, &Tile)> {
        self.tiles.iter().enumerate().map(|(idx, tile)| {
            let x = (idx % usize::from(self.width)) as u16;
            let y = (idx / usize::from(self.width)) as u16;
            (Coord::new(x, y), tile)
        })
    }

    /// Iterate over all coordinates and mutable tiles.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (Coord, &mut Tile)> {
        let width = self.width;
        self.tiles.iter_mut().enumerate().map(move |(idx, tile)| {
            let x = (idx % usize::from(width)) as u16;
            let y = (idx / usize::from(width)) as u16;
            (Coord::new(x, y), tile)
        })
    }

    /// Count tiles with the given terrain.
    #[must_use]
    pub fn count_base(&self, base: TileType) -> u32 {
        self.tiles.iter().filter(|t| t.base == base).count() as u32
    }

    /// Count tiles holding a crop.
    #[must_use]
    pub fn count_crops(&self) -> u32 {
        self.tiles.iter().filter(|t| t.has_crop()).count() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::sections::SECTIONS_PER_ROW;

    #[test]
    fn test_new_grid_locks_everything_but_center() {
        let grid = Grid::new(60, 60).unwrap();
        assert_eq!(grid.sections_across(), SECTIONS_PER_ROW);
        assert_eq!(grid.sections_down(), SECTIONS_PER_ROW);
        assert_eq!(grid.count_base(TileType::Grass), 144);
        assert_eq!(grid.count_base(TileType::Locked), 3600 - 144);

        // Center section spans tiles 24..36 on both axes.
        assert_eq!(grid.get(Coord::new(24, 24)).unwrap().base, TileType::Grass);
        assert_eq!(grid.get(Coord::new(35, 35)).unwrap().base, TileType::Grass);
        assert_eq!(grid.get(Coord::new(23, 24)).unwrap().base, TileType::Locked);
        assert_eq!(grid.get(Coord::new(36, 35)).unwrap().base, TileType::Locked);
    }

    #[test]
    fn test_grid_rejects_bad_dimensions() {
        assert!(Grid::new(0, 60).is_none());
        assert!(Grid::new(60, 0).is_none());
        assert!(Grid::new(61, 60).is_none());
        assert!(Grid::new(60, 50).is_none());
    }

    #[test]
    fn test_grid_bounds() {
        let grid = Grid::new(60, 60).unwrap();
        assert!(grid.in_bounds(Coord::new(0, 0)));
        assert!(grid.in_bounds(Coord::new(59, 59)));
        assert!(!grid.in_bounds(Coord::new(60, 0)));
        assert!(!grid.in_bounds(Coord::new(0, 60)));
        assert!(grid.get(Coord::new(60, 60)).is_none());
    }

    #[test]
    fn test_set_base_preserves_occupancy() {
        let mut grid = Grid::new(60, 60).unwrap();
        let coord = Coord::new(30, 30);
        grid.get_mut(coord).unwrap().occupation = Some(Occupation::Home);
        assert!(grid.set_base(coord, TileType::Dirt));
        let tile = grid.get(coord).unwrap();
        assert_eq!(tile.base, TileType::Dirt);
        assert_eq!(tile.occupation, Some(Occupation::Home));
    }

    #[test]
    fn test_paint_refuses_locked_and_occupied() {
        let mut grid = Grid::new(60, 60).unwrap();

        // Locked section.
        assert_eq!(
            grid.paint_base(Coord::new(0, 0), TileType::Dirt),
            Err(PaintError::Locked)
        );

        // Occupied tile in the open center.
        let coord = Coord::new(30, 30);
        grid.get_mut(coord).unwrap().occupation = Some(Occupation::Home);
        assert_eq!(
            grid.paint_base(coord, TileType::Dirt),
            Err(PaintError::Occupied)
        );

        // Out of bounds.
        assert_eq!(
            grid.paint_base(Coord::new(99, 99), TileType::Dirt),
            Err(PaintError::OutOfBounds)
        );

        // Plain repaint works.
        assert_eq!(grid.paint_base(Coord::new(25, 25), TileType::Dirt), Ok(()));
        assert_eq!(grid.get(Coord::new(25, 25)).unwrap().base, TileType::Dirt);
    }

    #[test]
    fn test_paint_clears_dirt_watering() {
        let mut grid = Grid::new(60, 60).unwrap();
        let coord = Coord::new(25, 25);
        grid.paint_base(coord, TileType::Dirt).unwrap();
        grid.get_mut(coord).unwrap().watered_at = Some(1000);
        grid.paint_base(coord, TileType::Grass).unwrap();
        assert_eq!(grid.get(coord).unwrap().watered_at, None);
    }

    #[test]
    fn test_tile_type_strings_round_trip() {
        for base in [
            TileType::Grass,
            TileType::Dirt,
            TileType::Road,
            TileType::Locked,
        ] {
            assert_eq!(TileType::parse(base.as_str()), Some(base));
        }
        assert_eq!(TileType::parse("swamp"), None);
    }

    #[test]
    fn test_coord_section() {
        assert_eq!(Coord::new(0, 0).section(), SectionCoord::new(0, 0));
        assert_eq!(Coord::new(11, 11).section(), SectionCoord::new(0, 0));
        assert_eq!(Coord::new(12, 11).section(), SectionCoord::new(1, 0));
        assert_eq!(Coord::new(30, 30).section(), SectionCoord::new(2, 2));
        assert_eq!(Coord::new(59, 59).section(), SectionCoord::new(4, 4));
    }

    #[test]
    fn test_iter_yields_every_coord_once() {
        let grid = Grid::new(12, 24).unwrap();
        let count = grid.iter().count();
        assert_eq!(count, 12 * 24);
        let (last_coord, _) = grid.iter().last().unwrap();
        assert_eq!(last_coord, Coord::new(11, 23));
    }
}
