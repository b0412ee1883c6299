//! Game configuration.

use crate::clock::Millis;

/// Tunable parameters for a game world.
///
/// `Default` matches the shipped game: a 60x60 grid of 12x12 sections,
/// 32px tiles, and zoom clamped to [0.5, 2.0].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GameConfig {
    /// Grid width in tiles.
    pub width: u16,
    /// Grid height in tiles.
    pub height: u16,
    /// Tile edge length in screen pixels at scale 1.0.
    pub tile_size: f64,
    /// Lowest allowed zoom scale.
    pub min_scale: f64,
    /// Highest allowed zoom scale.
    pub max_scale: f64,
    /// Scale change per zoom step.
    pub zoom_step: f64,
    /// Coins a fresh game starts with.
    pub starting_coins: u32,
    /// Quiet period before a pending autosave fires.
    pub autosave_delay_ms: Millis,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: 60,
            height: 60,
            tile_size: 32.0,
            min_scale: 0.5,
            max_scale: 2.0,
            zoom_step: 0.1,
            starting_coins: 50,
            autosave_delay_ms: 2000,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matches_shipped_game() {
        let config = GameConfig::default();
        assert_eq!(config.width, 60);
        assert_eq!(config.height, 60);
        assert!((config.tile_size - 32.0).abs() < f64::EPSILON);
        assert!((config.min_scale - 0.5).abs() < f64::EPSILON);
        assert!((config.max_scale - 2.0).abs() < f64::EPSILON);
    }
}
