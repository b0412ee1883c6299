//! Seed catalog.
//!
//! One [`SeedConfig`] per crop kind: prices, growth durations, and the
//! presentation data tooltips and shop panels draw from. The registry is
//! built once and never mutated; balance changes are new registries.

use crate::clock::Millis;
use crate::game::crops::{CropKind, CropStage};

/// How rare a seed is in the shop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rarity {
    /// Everyday seeds.
    Common,
    /// Pricier, better margins.
    Uncommon,
    /// Top of the catalog.
    Rare,
}

impl Rarity {
    /// Stable string form.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Rarity::Common => "common",
            Rarity::Uncommon => "uncommon",
            Rarity::Rare => "rare",
        }
    }
}

/// Render colors for each growth stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StageColors {
    /// Seed stage fill.
    pub seed: &'static str,
    /// Growing stage fill.
    pub growing: &'static str,
    /// Mature stage fill.
    pub mature: &'static str,
}

/// Everything the game knows about one kind of seed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedConfig {
    /// Which crop this configures.
    pub kind: CropKind,
    /// Shop display name.
    pub display_name: &'static str,
    /// Coins to buy one seed.
    pub buy_price: u32,
    /// Coins earned per harvest.
    pub sell_price: u32,
    /// Milliseconds from seed to growing, unwatered.
    pub seed_to_growing_ms: Millis,
    /// Milliseconds from growing to mature, unwatered.
    pub growing_to_mature_ms: Millis,
    /// Stage fill colors.
    pub colors: StageColors,
    /// Keyboard shortcut for selecting this seed.
    pub shortcut: char,
    /// Shop rarity tier.
    pub rarity: Rarity,
    /// Shop flavor text.
    pub description: &'static str,
    /// Emoji shown in the shop and tooltips.
    pub icon: &'static str,
}

impl SeedConfig {
    /// Total unwatered growth time, seed to mature.
    #[must_use]
    pub const fn total_growth_ms(&self) -> Millis {
        self.seed_to_growing_ms.saturating_add(self.growing_to_mature_ms)
    }

    /// Unwatered duration of one stage. Mature has no duration.
    #[must_use]
    pub const fn stage_duration_ms(&self, stage: CropStage) -> Millis {
        match stage {
            CropStage::Seed => self.seed_to_growing_ms,
            CropStage::Growing => self.growing_to_mature_ms,
            CropStage::Mature => 0,
        }
    }

    /// Coins gained per harvest after the seed cost.
    #[must_use]
    pub const fn profit_margin(&self) -> i64 {
        self.sell_price as i64 - self.buy_price as i64
    }

    /// Profit margin per second of unwatered growth.
    #[must_use]
    pub fn profit_per_second(&self) -> f64 {
        let secs = self.total_growth_ms() as f64 / 1000.0;
        if secs <= 0.0 {
            return 0.0;
        }
        self.profit_margin() as f64 / secs
    }

    /// Tool identifier for planting this seed, e.g. `wheat_seeds`.
    #[must_use]
    pub fn seed_tool_name(&self) -> String {
        format!("{}_seeds", self.kind.as_str())
    }
}

/// The immutable seed catalog, one entry per [`CropKind`].
#[derive(Debug, Clone, Copy)]
pub struct SeedRegistry {
    entries: [SeedConfig; 4],
}

impl SeedRegistry {
    /// The shipped catalog.
    #[must_use]
    pub const fn standard() -> Self {
        Self {
            entries: [
                // Starter crops: cheap, quick, forgiving.
                SeedConfig {
                    kind: CropKind::Wheat,
                    display_name: "Wheat",
                    buy_price: 4,
                    sell_price: 8,
                    seed_to_growing_ms: 10_000,
                    growing_to_mature_ms: 20_000,
                    colors: StageColors {
                        seed: "#ffd700",
                        growing: "#9acd32",
                        mature: "#daa520",
                    },
                    shortcut: 'w',
                    rarity: Rarity::Common,
                    description: "Fast-growing, basic crop. Great for beginners!",
                    icon: "\u{1f33e}",
                },
                SeedConfig {
                    kind: CropKind::Carrot,
                    display_name: "Carrot",
                    buy_price: 6,
                    sell_price: 12,
                    seed_to_growing_ms: 20_000,
                    growing_to_mature_ms: 40_000,
                    colors: StageColors {
                        seed: "#ff8c00",
                        growing: "#32cd32",
                        mature: "#ff6347",
                    },
                    shortcut: 'c',
                    rarity: Rarity::Common,
                    description: "Crunchy and nutritious. Takes a bit longer to grow.",
                    icon: "\u{1f955}",
                },
                // Patience crops: slower cycles, fatter margins.
                SeedConfig {
                    kind: CropKind::Tomato,
                    display_name: "Tomato",
                    buy_price: 10,
                    sell_price: 20,
                    seed_to_growing_ms: 30_000,
                    growing_to_mature_ms: 60_000,
                    colors: StageColors {
                        seed: "#dc143c",
                        growing: "#228b22",
                        mature: "#ff4444",
                    },
                    shortcut: 't',
                    rarity: Rarity::Uncommon,
                    description: "Juicy and valuable. Takes patience but worth the wait!",
                    icon: "\u{1f345}",
                },
                SeedConfig {
                    kind: CropKind::Corn,
                    display_name: "Corn",
                    buy_price: 15,
                    sell_price: 32,
                    seed_to_growing_ms: 40_000,
                    growing_to_mature_ms: 80_000,
                    colors: StageColors {
                        seed: "#ffd700",
                        growing: "#228b22",
                        mature: "#ffff99",
                    },
                    shortcut: 'o',
                    rarity: Rarity::Rare,
                    description: "Golden kernels of goodness. Slow growing but very profitable!",
                    icon: "\u{1f33d}",
                },
            ],
        }
    }

    /// Look up the config for a kind. Total: every kind has an entry.
    #[must_use]
    #[inline]
    pub const fn get(&self, kind: CropKind) -> &SeedConfig {
        &self.entries[kind as usize]
    }

    /// Iterate the catalog in registry order.
    pub fn iter(&self) -> impl Iterator<Item = &SeedConfig> {
        self.entries.iter()
    }

    /// Resolve a keyboard shortcut to a kind.
    #[must_use]
    pub fn by_shortcut(&self, key: char) -> Option<CropKind> {
        self.entries
            .iter()
            .find(|config| config.shortcut == key)
            .map(|config| config.kind)
    }
}

impl Default for SeedRegistry {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_covers_every_kind() {
        let registry = SeedRegistry::standard();
        for kind in CropKind::ALL {
            let config = registry.get(kind);
            assert_eq!(config.kind, kind);
            assert!(config.buy_price > 0);
            assert!(config.sell_price > config.buy_price);
            assert!(config.seed_to_growing_ms > 0);
            assert!(config.growing_to_mature_ms > 0);
        }
    }

    #[test]
    fn test_growth_times() {
        let registry = SeedRegistry::standard();
        assert_eq!(registry.get(CropKind::Wheat).total_growth_ms(), 30_000);
        assert_eq!(registry.get(CropKind::Carrot).total_growth_ms(), 60_000);
        assert_eq!(registry.get(CropKind::Tomato).total_growth_ms(), 90_000);
        assert_eq!(registry.get(CropKind::Corn).total_growth_ms(), 120_000);

        let corn = registry.get(CropKind::Corn);
        assert_eq!(corn.stage_duration_ms(CropStage::Seed), 40_000);
        assert_eq!(corn.stage_duration_ms(CropStage::Growing), 80_000);
        assert_eq!(corn.stage_duration_ms(CropStage::Mature), 0);
    }

    #[test]
    fn test_profit_helpers() {
        let registry = SeedRegistry::standard();
        let wheat = registry.get(CropKind::Wheat);
        assert_eq!(wheat.profit_margin(), 4);
        assert!((wheat.profit_per_second() - 4.0 / 30.0).abs() < 1e-9);

        let corn = registry.get(CropKind::Corn);
        assert_eq!(corn.profit_margin(), 17);
        assert!((corn.profit_per_second() - 17.0 / 120.0).abs() < 1e-9);
    }

    #[test]
    fn test_shortcuts() {
        let registry = SeedRegistry::standard();
        assert_eq!(registry.by_shortcut('w'), Some(CropKind::Wheat));
        assert_eq!(registry.by_shortcut('c'), Some(CropKind::Carrot));
        assert_eq!(registry.by_shortcut('t'), Some(CropKind::Tomato));
        assert_eq!(registry.by_shortcut('o'), Some(CropKind::Corn));
        assert_eq!(registry.by_shortcut('x'), None);
    }

    #[test]
    fn test_seed_tool_names() {
        let registry = SeedRegistry::standard();
        assert_eq!(registry.get(CropKind::Wheat).seed_tool_name(), "wheat_seeds");
        assert_eq!(registry.get(CropKind::Corn).seed_tool_name(), "corn_seeds");
    }
}
