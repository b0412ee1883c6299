//! Coins, tool prices, and section pricing.
//!
//! Tools have flat prices; seeds cost their catalog buy price. Section
//! unlocks get progressively dearer:
//!
//! ```text
//! cost = BASE_SECTION_COST + unlocked_non_center * SECTION_COST_INCREASE
//! cost = cost * 80 / 100        (if touching unlocked land)
//! cost = max(cost, BASE_SECTION_COST), center = 0
//! ```
//!
//! All wallet arithmetic saturates; a refused spend leaves the balance
//! untouched.

use crate::game::crops::CropKind;
use crate::game::grid::{Grid, TileType};
use crate::game::sections::{self, SectionCoord};
use crate::game::seeds::SeedRegistry;

/// Price of the first non-center section, and the floor under every
/// discounted price.
pub const BASE_SECTION_COST: u32 = 30;

/// Price growth per already-unlocked section (center excluded).
pub const SECTION_COST_INCREASE: u32 = 20;

/// Percentage kept of the price when the section touches unlocked land.
pub const ADJACENCY_DISCOUNT_PERCENT: u32 = 80;

/// A player-selectable tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tool {
    /// Paint grass terrain.
    Grass,
    /// Till a tile into dirt.
    Dirt,
    /// Lay a road tile.
    Road,
    /// Water a crop or dirt tile.
    Water,
    /// Harvest a mature crop.
    Harvest,
    /// Plant a seed of the given kind.
    Seed(CropKind),
}

impl Tool {
    /// Price of using this tool once.
    #[must_use]
    pub const fn cost(self, registry: &SeedRegistry) -> u32 {
        match self {
            Tool::Grass => 1,
            Tool::Dirt => 2,
            Tool::Road => 5,
            Tool::Water => 2,
            Tool::Harvest => 0,
            Tool::Seed(kind) => registry.get(kind).buy_price,
        }
    }

    /// The terrain this tool paints, if it is a terrain tool.
    #[must_use]
    pub const fn terrain(self) -> Option<TileType> {
        match self {
            Tool::Grass => Some(TileType::Grass),
            Tool::Dirt => Some(TileType::Dirt),
            Tool::Road => Some(TileType::Road),
            Tool::Water | Tool::Harvest | Tool::Seed(_) => None,
        }
    }
}

/// Result of a spend attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpendOutcome {
    /// Whether the coins were taken.
    pub success: bool,
    /// What the attempt cost (or would have cost).
    pub cost: u32,
}

/// Check if the balance covers a tool use.
#[must_use]
pub fn can_afford(coins: u32, tool: Tool, registry: &SeedRegistry) -> bool {
    coins >= tool.cost(registry)
}

/// Take a tool's price from the balance. A refused spend changes nothing.
pub fn spend(coins: &mut u32, tool: Tool, registry: &SeedRegistry) -> SpendOutcome {
    let cost = tool.cost(registry);
    if *coins < cost {
        return SpendOutcome {
            success: false,
            cost,
        };
    }
    *coins -= cost;
    SpendOutcome { success: true, cost }
}

/// Add a harvest's sell price to the balance. Returns the amount awarded.
pub fn award_harvest(coins: &mut u32, kind: CropKind, registry: &SeedRegistry) -> u32 {
    let amount = registry.get(kind).sell_price;
    *coins = coins.saturating_add(amount);
    amount
}

/// Unlocked sections that count toward price growth (center excluded).
#[must_use]
pub fn count_unlocked_non_center(grid: &Grid) -> u32 {
    let center = sections::center_section(grid);
    grid.sections()
        .iter()
        .filter(|s| !s.locked && s.coord != center)
        .count() as u32
}

/// Price of unlocking a section right now.
///
/// The center is free; every other section follows the progressive formula
/// in the module doc, floored at [`BASE_SECTION_COST`].
#[must_use]
pub fn unlock_cost(grid: &Grid, sc: SectionCoord) -> u32 {
    if sc == sections::center_section(grid) {
        return 0;
    }
    let mut cost = BASE_SECTION_COST
        .saturating_add(count_unlocked_non_center(grid).saturating_mul(SECTION_COST_INCREASE));
    if sections::is_adjacent_to_unlocked(grid, sc) {
        cost = cost * ADJACENCY_DISCOUNT_PERCENT / 100;
    }
    cost.max(BASE_SECTION_COST)
}

/// Check if a section is buyable: it exists, is locked, is not the center,
/// and touches unlocked land.
#[must_use]
pub fn can_unlock_section(grid: &Grid, sc: SectionCoord) -> bool {
    if sc == sections::center_section(grid) {
        return false;
    }
    let Some(section) = sections::section(grid, sc) else {
        return false;
    };
    section.locked && sections::is_adjacent_to_unlocked(grid, sc)
}


/// Formal verification harnesses for pricing arithmetic.
///
/// Run with: `cargo kani`
#[cfg(kani)]
mod kani_proofs {
    use super::*;

    /// Prove the progressive price never overflows and never dips below
    /// the base price for non-center sections.
    #[kani::proof]
    fn prove_section_price_bounds() {
        let unlocked: u32 = kani::any();
        kani::assume(unlocked <= 65_025); // 255 * 255 sections

        let base = BASE_SECTION_COST.saturating_add(unlocked.saturating_mul(SECTION_COST_INCREASE));
        let discounted = base * ADJACENCY_DISCOUNT_PERCENT / 100;

        assert!(discounted.max(BASE_SECTION_COST) >= BASE_SECTION_COST);
        assert!(base >= BASE_SECTION_COST);
    }

    /// Prove a refused spend cannot underflow the wallet.
    #[kani::proof]
    fn prove_spend_no_underflow() {
        let balance: u32 = kani::any();
        let cost: u32 = kani::any();

        let after = if balance >= cost { balance - cost } else { balance };
        assert!(after <= balance);
    }
}
