//! Camera transform.
//!
//! Pure screen-space math: where tiles land on screen and what a cursor
//! position points at. The transform is part of the saved game so the
//! player's viewport survives a reload. No rendering happens here.

use crate::config::GameConfig;
use crate::game::grid::Coord;
use crate::game::sections::SectionCoord;

/// Pan and zoom state of the viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewTransform {
    /// Zoom scale. 1.0 means one tile is `tile_size` pixels.
    pub scale: f64,
    /// Screen x of the grid's origin.
    pub offset_x: f64,
    /// Screen y of the grid's origin.
    pub offset_y: f64,
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self {
            scale: 1.0,
            offset_x: 0.0,
            offset_y: 0.0,
        }
    }
}

impl ViewTransform {
    /// Tile edge length in screen pixels at the current zoom.
    #[must_use]
    pub fn scaled_tile_size(&self, config: &GameConfig) -> f64 {
        config.tile_size * self.scale
    }

    /// The grid coordinate under a screen position, if any.
    #[must_use]
    pub fn screen_to_grid(&self, sx: f64, sy: f64, config: &GameConfig) -> Option<Coord> {
        let tile = self.scaled_tile_size(config);
        if tile <= 0.0 {
            return None;
        }
        let gx = ((sx - self.offset_x) / tile).floor();
        let gy = ((sy - self.offset_y) / tile).floor();
        if gx < 0.0 || gy < 0.0 || gx >= f64::from(config.width) || gy >= f64::from(config.height) {
            return None;
        }
        Some(Coord::new(gx as u16, gy as u16))
    }

    /// Screen position of a grid coordinate's top-left corner.
    #[must_use]
    pub fn grid_to_screen(&self, coord: Coord, config: &GameConfig) -> (f64, f64) {
        let tile = self.scaled_tile_size(config);
        (
            f64::from(coord.x) * tile + self.offset_x,
            f64::from(coord.y) * tile + self.offset_y,
        )
    }

    /// The section under a screen position, if any.
    #[must_use]
    pub fn section_at_screen(&self, sx: f64, sy: f64, config: &GameConfig) -> Option<SectionCoord> {
        self.screen_to_grid(sx, sy, config).map(Coord::section)
    }

    /// Drag the viewport by a screen-space delta.
    pub fn pan(&mut self, dx: f64, dy: f64) {
        self.offset_x += dx;
        self.offset_y += dy;
    }

    /// Zoom by whole steps around a cursor position.
    ///
    /// Positive steps zoom in. The world point under the cursor stays under
    /// the cursor, and the scale is clamped to the configured range.
    pub fn zoom_at(&mut self, cursor_x: f64, cursor_y: f64, steps: i32, config: &GameConfig) {
        let new_scale = (self.scale + f64::from(steps) * config.zoom_step)
            .clamp(config.min_scale, config.max_scale);
        if (new_scale - self.scale).abs() < f64::EPSILON {
            return;
        }
        // Keep the world point under the cursor fixed while the scale moves.
        let world_x = cursor_x - self.offset_x;
        let world_y = cursor_y - self.offset_y;
        let ratio = new_scale / self.scale;
        self.offset_x -= world_x * ratio - world_x;
        self.offset_y -= world_y * ratio - world_y;
        self.scale = new_scale;
    }

    /// Center the whole grid in a viewport.
    pub fn center_grid(&mut self, viewport_w: f64, viewport_h: f64, config: &GameConfig) {
        let tile = self.scaled_tile_size(config);
        let grid_w = f64::from(config.width) * tile;
        let grid_h = f64::from(config.height) * tile;
        self.offset_x = (viewport_w - grid_w) / 2.0;
        self.offset_y = (viewport_h - grid_h) / 2.0;
    }

    /// Center a tile in a viewport.
    pub fn center_on(&mut self, coord: Coord, viewport_w: f64, viewport_h: f64, config: &GameConfig) {
        let tile = self.scaled_tile_size(config);
        self.offset_x = viewport_w / 2.0 - (f64::from(coord.x) + 0.5) * tile;
        self.offset_y = viewport_h / 2.0 - (f64::from(coord.y) + 0.5) * tile;
    }
}
