//! Top-level game state.
//!
//! One owned value holds everything a running game is: the grid, the coin
//! balance, and the camera. Methods here are thin orchestration over the
//! domain modules, adding the coin charges and awards the raw operations
//! deliberately leave out. Nothing reads the wall clock; callers pass `now`.

use crate::clock::Millis;
use crate::config::GameConfig;
use crate::error::{HarvestError, PlantError, ToolError, UnlockError, WaterError};
use crate::game::crops::{self, CropKind, WaterTarget};
use crate::game::economy::{self, Tool};
use crate::game::grid::{Coord, Grid, TileType};
use crate::game::home;
use crate::game::sections::{self, SectionCoord, SectionSummary};
use crate::game::seeds::SeedRegistry;
use crate::game::view::ViewTransform;

/// What a successful tool application did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolOutcome {
    /// Terrain was painted for the given price.
    TerrainPainted {
        /// Coins spent.
        cost: u32,
    },
    /// The crop or the dirt under the cursor was watered.
    Watered(WaterTarget),
    /// A mature crop was collected.
    Harvested {
        /// What was collected.
        kind: CropKind,
        /// Coins awarded for it.
        awarded: u32,
    },
    /// A seed went into the ground for the given price.
    Planted {
        /// Coins spent.
        cost: u32,
    },
}

/// A complete game.
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    /// The world grid with its section lock state.
    pub grid: Grid,
    /// Coin balance.
    pub coins: u32,
    /// Camera pan and zoom.
    pub view: ViewTransform,
}

impl GameState {
    /// Start a fresh game: locked world, open center section, homestead
    /// placed, starting coins in the wallet.
    ///
    /// # Errors
    ///
    /// Returns `None` for dimensions [`Grid::new`] rejects.
    #[must_use]
    pub fn new(config: &GameConfig) -> Option<Self> {
        let mut grid = Grid::new(config.width, config.height)?;
        home::place_home(&mut grid);
        Some(Self {
            grid,
            coins: config.starting_coins,
            view: ViewTransform::default(),
        })
    }

    /// Reassemble a game from restored parts.
    #[must_use]
    pub const fn from_parts(grid: Grid, coins: u32, view: ViewTransform) -> Self {
        Self { grid, coins, view }
    }

    /// Apply a tool to a tile: the coin charge and the action together.
    ///
    /// Mirrors what clicking with a selected tool does: the price is
    /// checked first, the action runs, and coins move only when the action
    /// succeeded.
    ///
    /// # Errors
    ///
    /// [`ToolError::CannotAfford`] when the balance is short, otherwise
    /// the underlying action's refusal.
    pub fn apply_tool(
        &mut self,
        coord: Coord,
        tool: Tool,
        registry: &SeedRegistry,
        now: Millis,
    ) -> Result<ToolOutcome, ToolError> {
        let cost = tool.cost(registry);
        if self.coins < cost {
            return Err(ToolError::CannotAfford { cost });
        }
        let outcome = match tool {
            Tool::Grass => {
                self.grid.paint_base(coord, TileType::Grass)?;
                ToolOutcome::TerrainPainted { cost }
            }
            Tool::Dirt => {
                self.grid.paint_base(coord, TileType::Dirt)?;
                ToolOutcome::TerrainPainted { cost }
            }
            Tool::Road => {
                self.grid.paint_base(coord, TileType::Road)?;
                ToolOutcome::TerrainPainted { cost }
            }
            Tool::Water => {
                let target = crops::water_any(&mut self.grid, coord, now)?;
                ToolOutcome::Watered(target)
            }
            Tool::Harvest => {
                let (kind, awarded) = self.harvest(coord, registry)?;
                return Ok(ToolOutcome::Harvested { kind, awarded });
            }
            Tool::Seed(kind) => {
                crops::plant_seed(&mut self.grid, coord, kind, now)?;
                ToolOutcome::Planted { cost }
            }
        };
        self.coins -= cost;
        Ok(outcome)
    }

    /// Plant a seed, charging its catalog price.
    ///
    /// # Errors
    ///
    /// [`PlantError::CannotAfford`] when the balance is short, otherwise
    /// the planting refusal. A refusal never moves coins.
    pub fn plant(
        &mut self,
        coord: Coord,
        kind: CropKind,
        registry: &SeedRegistry,
        now: Millis,
    ) -> Result<(), PlantError> {
        let cost = Tool::Seed(kind).cost(registry);
        if self.coins < cost {
            return Err(PlantError::CannotAfford { cost });
        }
        crops::plant_seed(&mut self.grid, coord, kind, now)?;
        self.coins -= cost;
        Ok(())
    }

    /// Water the crop on a tile.
    ///
    /// # Errors
    ///
    /// See [`crops::water_crop`].
    pub fn water_crop(&mut self, coord: Coord, now: Millis) -> Result<(), WaterError> {
        crops::water_crop(&mut self.grid, coord, now)
    }

    /// Water a bare dirt tile.
    ///
    /// # Errors
    ///
    /// See [`crops::water_dirt`].
    pub fn water_dirt(&mut self, coord: Coord, now: Millis) -> Result<(), WaterError> {
        crops::water_dirt(&mut self.grid, coord, now)
    }

    /// Water whatever the tile holds.
    ///
    /// # Errors
    ///
    /// See [`crops::water_any`].
    pub fn water_any(&mut self, coord: Coord, now: Millis) -> Result<WaterTarget, WaterError> {
        crops::water_any(&mut self.grid, coord, now)
    }

    /// Harvest a mature crop and award its sell price.
    ///
    /// # Errors
    ///
    /// See [`crops::harvest_crop`]. A refusal never moves coins.
    pub fn harvest(
        &mut self,
        coord: Coord,
        registry: &SeedRegistry,
    ) -> Result<(CropKind, u32), HarvestError> {
        let kind = crops::harvest_crop(&mut self.grid, coord)?;
        let awarded = economy::award_harvest(&mut self.coins, kind, registry);
        Ok((kind, awarded))
    }

    /// Buy and unlock a section. Returns the price paid.
    ///
    /// # Errors
    ///
    /// Refuses missing sections, unlocked sections (the center always
    /// reads as unlocked), sections not touching owned land, and a short
    /// balance. A refusal never moves coins.
    pub fn try_unlock_section(&mut self, sc: SectionCoord) -> Result<u32, UnlockError> {
        let Some(section) = sections::section(&self.grid, sc) else {
            return Err(UnlockError::NoSuchSection(sc));
        };
        if !section.locked {
            return Err(UnlockError::AlreadyUnlocked);
        }
        if !sections::is_adjacent_to_unlocked(&self.grid, sc) {
            return Err(UnlockError::NotAdjacent);
        }
        let cost = economy::unlock_cost(&self.grid, sc);
        if self.coins < cost {
            return Err(UnlockError::CannotAfford { cost });
        }
        self.coins -= cost;
        sections::unlock_section(&mut self.grid, sc);
        Ok(cost)
    }

    /// Run the growth sweep over every crop.
    ///
    /// Returns whether anything changed, which is what render loops key
    /// off.
    pub fn tick(&mut self, registry: &SeedRegistry, now: Millis) -> bool {
        crops::update_growth(&mut self.grid, registry, now)
    }

    /// Stamp the homestead onto its spot if the spot is free.
    pub fn place_home(&mut self) -> bool {
        home::place_home(&mut self.grid)
    }

    /// Tally sections by lock state.
    #[must_use]
    pub fn section_summary(&self) -> SectionSummary {
        sections::summarize(&self.grid)
    }
}
