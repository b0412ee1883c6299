//! Error types for farm actions.

use std::fmt;

use crate::game::SectionCoord;

/// Reasons a seed cannot be planted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlantError {
    /// Target coordinate is outside the grid.
    OutOfBounds,
    /// Seeds only take on dirt terrain.
    NotDirt,
    /// The tile already holds a crop or the homestead.
    Occupied,
    /// Not enough coins for the seed.
    CannotAfford {
        /// Price of the seed that was refused.
        cost: u32,
    },
}

impl fmt::Display for PlantError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlantError::OutOfBounds => write!(f, "No tile found"),
            PlantError::NotDirt => write!(f, "Seeds can only be planted on dirt!"),
            PlantError::Occupied => write!(f, "This tile is already occupied!"),
            PlantError::CannotAfford { cost } => {
                write!(f, "Not enough coins! Seeds cost {cost}")
            }
        }
    }
}

impl std::error::Error for PlantError {}

/// Reasons a watering attempt is refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaterError {
    /// Target coordinate is outside the grid.
    NoTile,
    /// Neither a crop nor waterable dirt at the target.
    NothingToWater,
    /// The crop has finished growing; water does nothing.
    AlreadyMature,
    /// The crop's watering window is still active.
    AlreadyWatered,
    /// Water targets dirt, and this tile is not dirt.
    NotDirt,
    /// The dirt tile holds a crop; water the crop itself.
    CropInTheWay,
    /// The dirt's watering window is still active.
    DirtAlreadyWatered,
}

impl fmt::Display for WaterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WaterError::NoTile => write!(f, "No tile found"),
            WaterError::NothingToWater => write!(f, "Nothing to water here!"),
            WaterError::AlreadyMature => write!(f, "This crop is already fully grown!"),
            WaterError::AlreadyWatered => write!(f, "This crop is already watered!"),
            WaterError::NotDirt => write!(f, "Can only water dirt tiles!"),
            WaterError::CropInTheWay => write!(f, "Use water on the crop instead!"),
            WaterError::DirtAlreadyWatered => write!(f, "This dirt is already watered!"),
        }
    }
}

impl std::error::Error for WaterError {}

/// Reasons a harvest is refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HarvestError {
    /// No crop at the target coordinate.
    NoCrop,
    /// The crop has not reached the mature stage.
    NotMature,
}

impl fmt::Display for HarvestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HarvestError::NoCrop => write!(f, "Nothing to harvest here!"),
            HarvestError::NotMature => write!(f, "This crop is not ready yet!"),
        }
    }
}

impl std::error::Error for HarvestError {}

/// Reasons a terrain tool is refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaintError {
    /// Target coordinate is outside the grid.
    OutOfBounds,
    /// The tile's section is still locked.
    Locked,
    /// The tile holds a crop or the homestead.
    Occupied,
    /// Not enough coins for the tool.
    CannotAfford {
        /// Price of the tool that was refused.
        cost: u32,
    },
}

impl fmt::Display for PaintError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaintError::OutOfBounds => write!(f, "No tile found"),
            PaintError::Locked => write!(f, "Unlock this section first!"),
            PaintError::Occupied => write!(f, "This tile is already occupied!"),
            PaintError::CannotAfford { cost } => {
                write!(f, "Not enough coins! This tool costs {cost}")
            }
        }
    }
}

impl std::error::Error for PaintError {}

/// Reasons a section unlock is refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnlockError {
    /// Section coordinate is outside the 5x5 section grid.
    NoSuchSection(SectionCoord),
    /// The section is already unlocked.
    AlreadyUnlocked,
    /// Only sections touching an unlocked section can be bought.
    NotAdjacent,
    /// Not enough coins for the unlock price.
    CannotAfford {
        /// Price of the section that was refused.
        cost: u32,
    },
}

impl fmt::Display for UnlockError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnlockError::NoSuchSection(sc) => {
                write!(f, "No section at ({}, {})", sc.sx, sc.sy)
            }
            UnlockError::AlreadyUnlocked => write!(f, "This section is already unlocked!"),
            UnlockError::NotAdjacent => {
                write!(f, "Can only unlock sections next to your land!")
            }
            UnlockError::CannotAfford { cost } => {
                write!(f, "Not enough coins! This section costs {cost}")
            }
        }
    }
}

impl std::error::Error for UnlockError {}

/// Any refusal surfaced by applying a tool to a tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolError {
    /// The balance does not cover the tool's price.
    CannotAfford {
        /// Price of the tool that was refused.
        cost: u32,
    },
    /// A terrain tool was refused.
    Paint(PaintError),
    /// The water tool was refused.
    Water(WaterError),
    /// The harvest tool was refused.
    Harvest(HarvestError),
    /// A seed tool was refused.
    Plant(PlantError),
}

impl fmt::Display for ToolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ToolError::CannotAfford { cost } => {
                write!(f, "Not enough coins! This tool costs {cost}")
            }
            ToolError::Paint(e) => write!(f, "{e}"),
            ToolError::Water(e) => write!(f, "{e}"),
            ToolError::Harvest(e) => write!(f, "{e}"),
            ToolError::Plant(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for ToolError {}

impl From<PaintError> for ToolError {
    fn from(e: PaintError) -> Self {
        ToolError::Paint(e)
    }
}

impl From<WaterError> for ToolError {
    fn from(e: WaterError) -> Self {
        ToolError::Water(e)
    }
}

impl From<HarvestError> for ToolError {
    fn from(e: HarvestError) -> Self {
        ToolError::Harvest(e)
    }
}

impl From<PlantError> for ToolError {
    fn from(e: PlantError) -> Self {
        ToolError::Plant(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_water_error_messages() {
        assert_eq!(WaterError::NothingToWater.to_string(), "Nothing to water here!");
        assert_eq!(
            WaterError::AlreadyMature.to_string(),
            "This crop is already fully grown!"
        );
        assert_eq!(
            WaterError::AlreadyWatered.to_string(),
            "This crop is already watered!"
        );
        assert_eq!(
            WaterError::DirtAlreadyWatered.to_string(),
            "This dirt is already watered!"
        );
        assert_eq!(WaterError::CropInTheWay.to_string(), "Use water on the crop instead!");
    }

    #[test]
    fn test_unlock_error_carries_cost() {
        let err = UnlockError::CannotAfford { cost: 40 };
        assert_eq!(err.to_string(), "Not enough coins! This section costs 40");
    }
}
