//! Crop growth engine.
//!
//! Growth is recomputed from timestamps, never ticked per frame. Each crop
//! stores when it was planted and, optionally, when it was last watered.
//! Watering opens a 60 second window during which growth runs at 1.5x, so
//! effective growth time is
//!
//! ```text
//! elapsed = now - planted_at
//! overlap = min(now, watered_at + WATER_DURATION) - max(planted_at, watered_at)
//! effective = elapsed + overlap / 2
//! ```
//!
//! All comparisons happen in half-millisecond units (`2 * elapsed + overlap`)
//! so the 1.5x rate stays exact integer arithmetic. A crop advances from seed
//! to growing when effective time crosses `seed_to_growing_ms`, and to mature
//! when it crosses `seed_to_growing_ms + growing_to_mature_ms`. Stored stages
//! only ever advance.
//!
//! When a watering window expires, the sweep clears `watered_at` and rebases
//! `planted_at` backwards by the earned bonus, so effective time is continuous
//! across the expiry and the crop can be watered again. Re-watering before
//! the sweep notices the expiry folds the old window the same way.

use crate::clock::Millis;
use crate::error::{HarvestError, PlantError, WaterError};
use crate::game::grid::{Coord, Grid, Occupation};
use crate::game::seeds::{SeedConfig, SeedRegistry};

/// How long one watering lasts.
pub const WATER_DURATION_MS: Millis = 60_000;

/// The kinds of crop that can be planted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum CropKind {
    /// Fast and cheap.
    Wheat = 0,
    /// Mid-tier staple.
    Carrot = 1,
    /// Slow but valuable.
    Tomato = 2,
    /// Slowest and most profitable.
    Corn = 3,
}

impl CropKind {
    /// Every kind, in registry order.
    pub const ALL: [CropKind; 4] = [
        CropKind::Wheat,
        CropKind::Carrot,
        CropKind::Tomato,
        CropKind::Corn,
    ];

    /// Stable string form used in save files.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            CropKind::Wheat => "wheat",
            CropKind::Carrot => "carrot",
            CropKind::Tomato => "tomato",
            CropKind::Corn => "corn",
        }
    }

    /// Parse the save-file string form.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "wheat" => Some(CropKind::Wheat),
            "carrot" => Some(CropKind::Carrot),
            "tomato" => Some(CropKind::Tomato),
            "corn" => Some(CropKind::Corn),
            _ => None,
        }
    }
}

/// Growth stage of a planted crop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u8)]
pub enum CropStage {
    /// Just planted.
    Seed = 0,
    /// Sprouted, still growing.
    Growing = 1,
    /// Ready to harvest.
    Mature = 2,
}

impl CropStage {
    /// Numeric form used in save files.
    #[must_use]
    pub const fn as_u8(self) -> u8 {
        self as u8
    }

    /// Parse the save-file numeric form.
    #[must_use]
    pub const fn from_u8(n: u8) -> Option<Self> {
        match n {
            0 => Some(CropStage::Seed),
            1 => Some(CropStage::Growing),
            2 => Some(CropStage::Mature),
            _ => None,
        }
    }
}

/// Growth state carried by a crop-occupied tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CropData {
    /// What was planted.
    pub kind: CropKind,
    /// Last stage the sweep committed. Never regresses.
    pub stage: CropStage,
    /// Effective planting instant. Rebased backwards when a watering
    /// window expires so the earned bonus is kept.
    pub planted_at: Millis,
    /// Start of the active watering window, if any.
    pub watered_at: Option<Millis>,
}

impl CropData {
    /// Create a freshly planted seed.
    #[must_use]
    pub const fn planted(kind: CropKind, now: Millis) -> Self {
        Self {
            kind,
            stage: CropStage::Seed,
            planted_at: now,
            watered_at: None,
        }
    }
}

/// Which thing a blanket watering action ended up watering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaterTarget {
    /// The crop on the tile.
    Crop,
    /// The bare dirt itself.
    Dirt,
}

/// Overlap of the watering window with lived time, in milliseconds.
///
/// Migration can leave `watered_at` before `planted_at`; the `max` clamps
/// the window to time the crop actually existed.
fn water_overlap(crop: &CropData, now: Millis) -> Millis {
    match crop.watered_at {
        Some(w) => {
            let end = w.saturating_add(WATER_DURATION_MS);
            let start = crop.planted_at.max(w);
            now.min(end).saturating_sub(start)
        }
        None => 0,
    }
}

/// Effective growth time in half-milliseconds.
#[must_use]
pub fn effective_elapsed_half(crop: &CropData, now: Millis) -> u64 {
    let elapsed = now.saturating_sub(crop.planted_at);
    elapsed.saturating_mul(2).saturating_add(water_overlap(crop, now))
}

/// Effective growth time in whole milliseconds.
#[must_use]
pub fn effective_elapsed_ms(crop: &CropData, now: Millis) -> Millis {
    effective_elapsed_half(crop, now) / 2
}

/// Stage implied by the crop's timestamps, ignoring the stored stage.
#[must_use]
pub fn derived_stage(crop: &CropData, config: &SeedConfig, now: Millis) -> CropStage {
    let eff_half = effective_elapsed_half(crop, now);
    if eff_half >= config.total_growth_ms().saturating_mul(2) {
        CropStage::Mature
    } else if eff_half >= config.seed_to_growing_ms.saturating_mul(2) {
        CropStage::Growing
    } else {
        CropStage::Seed
    }
}

/// Check if the crop has a live watering window.
#[must_use]
pub fn is_watered(crop: &CropData, now: Millis) -> bool {
    crop.watered_at
        .is_some_and(|w| now.saturating_sub(w) < WATER_DURATION_MS)
}

/// Milliseconds left on the crop's watering window, zero when unwatered.
#[must_use]
pub fn remaining_water_ms(crop: &CropData, now: Millis) -> Millis {
    match crop.watered_at {
        Some(w) => w.saturating_add(WATER_DURATION_MS).saturating_sub(now),
        None => 0,
    }
}

/// Progress through the stored stage, in `[0, 1]`.
///
/// Uses the same half-millisecond arithmetic as stage transitions, so a
/// progress of 1.0 coincides exactly with the sweep advancing the stage.
#[must_use]
pub fn growth_progress(crop: &CropData, config: &SeedConfig, now: Millis) -> f64 {
    let eff_half = effective_elapsed_half(crop, now);
    match crop.stage {
        CropStage::Seed => {
            let span = config.seed_to_growing_ms.saturating_mul(2);
            ratio_clamped(eff_half, 0, span)
        }
        CropStage::Growing => {
            let start = config.seed_to_growing_ms.saturating_mul(2);
            let span = config.growing_to_mature_ms.saturating_mul(2);
            ratio_clamped(eff_half, start, span)
        }
        CropStage::Mature => 1.0,
    }
}

fn ratio_clamped(value: u64, start: u64, span: u64) -> f64 {
    if span == 0 {
        return 1.0;
    }
    let above = value.saturating_sub(start).min(span);
    above as f64 / span as f64
}

/// Wall milliseconds until the crop reaches its next stage boundary.
///
/// Accounts for the 1.5x rate while the current watering window lasts:
/// growth earns 3 half-units per millisecond inside the window and 2
/// outside it. Returns 0 for mature crops and for crops whose timestamps
/// already cross the boundary (the next sweep will commit the stage).
#[must_use]
pub fn remaining_growth_ms(crop: &CropData, config: &SeedConfig, now: Millis) -> Millis {
    let target_half = match crop.stage {
        CropStage::Seed => config.seed_to_growing_ms.saturating_mul(2),
        CropStage::Growing => config.total_growth_ms().saturating_mul(2),
        CropStage::Mature => return 0,
    };
    let eff_half = effective_elapsed_half(crop, now);
    let deficit = target_half.saturating_sub(eff_half);
    if deficit == 0 {
        return 0;
    }

    let window_left = crop
        .watered_at
        .filter(|&w| w <= now && now - w < WATER_DURATION_MS)
        .map_or(0, |w| w.saturating_add(WATER_DURATION_MS) - now);
    let boosted = window_left.saturating_mul(3);
    if deficit <= boosted {
        deficit.div_ceil(3)
    } else {
        window_left + (deficit - boosted).div_ceil(2)
    }
}

/// Plant a seed on a dirt tile.
///
/// # Errors
///
/// Refuses out-of-bounds targets, non-dirt terrain, and occupied tiles.
pub fn plant_seed(
    grid: &mut Grid,
    coord: Coord,
    kind: CropKind,
    now: Millis,
) -> Result<(), PlantError> {
    let Some(tile) = grid.get_mut(coord) else {
        return Err(PlantError::OutOfBounds);
    };
    if !tile.base.is_farmable() {
        return Err(PlantError::NotDirt);
    }
    if tile.is_occupied() {
        return Err(PlantError::Occupied);
    }
    tile.occupation = Some(Occupation::Crop);
    tile.crop = Some(CropData::planted(kind, now));
    Ok(())
}

/// Water the crop on a tile, opening a fresh 60 second window.
///
/// # Errors
///
/// Refuses missing tiles, tiles without a crop, mature crops, and crops
/// whose window is still running.
pub fn water_crop(grid: &mut Grid, coord: Coord, now: Millis) -> Result<(), WaterError> {
    let Some(tile) = grid.get_mut(coord) else {
        return Err(WaterError::NoTile);
    };
    let Some(crop) = tile.crop.as_mut() else {
        return Err(WaterError::NothingToWater);
    };
    if crop.stage == CropStage::Mature {
        return Err(WaterError::AlreadyMature);
    }
    if is_watered(crop, now) {
        return Err(WaterError::AlreadyWatered);
    }
    // An expired window the sweep has not retired yet is banked here,
    // otherwise overwriting watered_at would forget its bonus.
    if crop.watered_at.is_some() {
        let bonus = water_overlap(crop, now) / 2;
        crop.planted_at = crop.planted_at.saturating_sub(bonus);
    }
    crop.watered_at = Some(now);
    Ok(())
}

/// Water a bare dirt tile.
///
/// # Errors
///
/// Refuses missing tiles, crop-occupied tiles (water the crop instead),
/// non-dirt terrain, and dirt whose window is still running.
pub fn water_dirt(grid: &mut Grid, coord: Coord, now: Millis) -> Result<(), WaterError> {
    let Some(tile) = grid.get_mut(coord) else {
        return Err(WaterError::NoTile);
    };
    if tile.has_crop() {
        return Err(WaterError::CropInTheWay);
    }
    if !tile.base.is_farmable() {
        return Err(WaterError::NotDirt);
    }
    if tile.dirt_watered(now) {
        return Err(WaterError::DirtAlreadyWatered);
    }
    tile.watered_at = Some(now);
    Ok(())
}

/// Water whatever the tile holds: the crop if there is one, the dirt
/// otherwise.
///
/// # Errors
///
/// Propagates the underlying [`water_crop`] or [`water_dirt`] refusal.
pub fn water_any(grid: &mut Grid, coord: Coord, now: Millis) -> Result<WaterTarget, WaterError> {
    let Some(tile) = grid.get(coord) else {
        return Err(WaterError::NoTile);
    };
    if tile.has_crop() {
        water_crop(grid, coord, now).map(|()| WaterTarget::Crop)
    } else {
        water_dirt(grid, coord, now).map(|()| WaterTarget::Dirt)
    }
}

/// Check if [`water_crop`] would succeed.
#[must_use]
pub fn can_water_crop(grid: &Grid, coord: Coord, now: Millis) -> bool {
    grid.get(coord).is_some_and(|tile| {
        tile.crop
            .as_ref()
            .is_some_and(|crop| crop.stage != CropStage::Mature && !is_watered(crop, now))
    })
}

/// Check if [`water_dirt`] would succeed.
#[must_use]
pub fn can_water_dirt(grid: &Grid, coord: Coord, now: Millis) -> bool {
    grid.get(coord).is_some_and(|tile| {
        !tile.has_crop() && tile.base.is_farmable() && !tile.dirt_watered(now)
    })
}

/// Check if [`water_any`] would succeed.
#[must_use]
pub fn can_water_any(grid: &Grid, coord: Coord, now: Millis) -> bool {
    can_water_crop(grid, coord, now) || can_water_dirt(grid, coord, now)
}

/// Harvest a mature crop, clearing the tile back to bare dirt.
///
/// # Errors
///
/// Refuses tiles without a crop and crops that are not mature.
pub fn harvest_crop(grid: &mut Grid, coord: Coord) -> Result<CropKind, HarvestError> {
    let Some(tile) = grid.get_mut(coord) else {
        return Err(HarvestError::NoCrop);
    };
    let Some(crop) = tile.crop else {
        return Err(HarvestError::NoCrop);
    };
    if crop.stage != CropStage::Mature {
        return Err(HarvestError::NotMature);
    }
    tile.clear_crop();
    Ok(crop.kind)
}

/// Sweep every crop: commit stage advances implied by timestamps and
/// retire expired watering windows.
///
/// A long gap may advance a crop several stages in one sweep. Expired
/// windows are folded into `planted_at` (see the module doc) so growth is
/// continuous across the expiry. Returns whether anything changed.
pub fn update_growth(grid: &mut Grid, registry: &SeedRegistry, now: Millis) -> bool {
    let mut changed = false;
    for (_, tile) in grid.iter_mut() {
        let Some(crop) = tile.crop.as_mut() else {
            continue;
        };
        let config = registry.get(crop.kind);

        let derived = derived_stage(crop, config, now);
        if derived > crop.stage {
            crop.stage = derived;
            changed = true;
        }

        if let Some(w) = crop.watered_at {
            if now.saturating_sub(w) >= WATER_DURATION_MS {
                let bonus = water_overlap(crop, now) / 2;
                crop.planted_at = crop.planted_at.saturating_sub(bonus);
                crop.watered_at = None;
                changed = true;
            }
        }
    }
    changed
}

#[cfg(kani)]
mod kani_proofs {
    use super::*;

    /// Prove the watering credit can never exceed the window length.
    ///
    /// The overlap is clipped to `[max(planted, watered), watered + window]`,
    /// so no combination of timestamps can mint more than one window of
    /// bonus time.
    #[kani::proof]
    fn prove_water_overlap_bounded() {
        let crop = CropData {
            kind: CropKind::Wheat,
            stage: CropStage::Seed,
            planted_at: kani::any(),
            watered_at: Some(kani::any()),
        };
        let now: Millis = kani::any();

        assert!(water_overlap(&crop, now) <= WATER_DURATION_MS);
    }

    /// Prove effective growth time never moves backwards.
    ///
    /// Both the elapsed term and the overlap term are monotone in `now`,
    /// including at the saturation edges.
    #[kani::proof]
    fn prove_effective_time_monotone() {
        let watered: bool = kani::any();
        let crop = CropData {
            kind: CropKind::Wheat,
            stage: CropStage::Seed,
            planted_at: kani::any(),
            watered_at: if watered { Some(kani::any()) } else { None },
        };
        let earlier: Millis = kani::any();
        let later: Millis = kani::any();
        kani::assume(earlier <= later);

        assert!(effective_elapsed_half(&crop, earlier) <= effective_elapsed_half(&crop, later));
    }

    /// Prove the visible water countdown is bounded once the watering
    /// instant has passed.
    #[kani::proof]
    fn prove_remaining_water_bounded() {
        let crop = CropData {
            kind: CropKind::Wheat,
            stage: CropStage::Seed,
            planted_at: kani::any(),
            watered_at: Some(kani::any()),
        };
        let now: Millis = kani::any();
        kani::assume(crop.watered_at.is_some_and(|w| w <= now));

        assert!(remaining_water_ms(&crop, now) <= WATER_DURATION_MS);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::grid::TileType;

    fn farm() -> (Grid, SeedRegistry) {
        let mut grid = Grid::new(60, 60).unwrap();
        // Open dirt in the center section.
        for x in 24..36 {
            for y in 24..36 {
                grid.set_base(Coord::new(x, y), TileType::Dirt);
            }
        }
        (grid, SeedRegistry::standard())
    }

    const PLOT: Coord = Coord::new(30, 30);

    #[test]
    fn test_plant_requires_dirt() {
        let (mut grid, _) = farm();
        grid.set_base(PLOT, TileType::Grass);
        assert_eq!(
            plant_seed(&mut grid, PLOT, CropKind::Wheat, 0),
            Err(PlantError::NotDirt)
        );
        grid.set_base(PLOT, TileType::Dirt);
        assert_eq!(plant_seed(&mut grid, PLOT, CropKind::Wheat, 0), Ok(()));
        assert_eq!(
            plant_seed(&mut grid, PLOT, CropKind::Carrot, 0),
            Err(PlantError::Occupied)
        );
        assert_eq!(
            plant_seed(&mut grid, Coord::new(99, 99), CropKind::Wheat, 0),
            Err(PlantError::OutOfBounds)
        );
    }

    #[test]
    fn test_unwatered_wheat_stage_boundaries() {
        let (mut grid, registry) = farm();
        plant_seed(&mut grid, PLOT, CropKind::Wheat, 0).unwrap();
        let config = registry.get(CropKind::Wheat);

        let crop = grid.get(PLOT).unwrap().crop.unwrap();
        assert_eq!(derived_stage(&crop, config, 9_999), CropStage::Seed);
        assert_eq!(derived_stage(&crop, config, 10_000), CropStage::Growing);
        assert_eq!(derived_stage(&crop, config, 29_999), CropStage::Growing);
        assert_eq!(derived_stage(&crop, config, 30_000), CropStage::Mature);
    }

    #[test]
    fn test_watering_speeds_growth_from_planting() {
        let (mut grid, registry) = farm();
        plant_seed(&mut grid, PLOT, CropKind::Wheat, 0).unwrap();
        water_crop(&mut grid, PLOT, 0).unwrap();
        let config = registry.get(CropKind::Wheat);

        // 30000ms of growth at 1.5x arrives in 20000ms of wall time.
        let crop = grid.get(PLOT).unwrap().crop.unwrap();
        assert_eq!(derived_stage(&crop, config, 19_999), CropStage::Growing);
        assert_eq!(derived_stage(&crop, config, 20_000), CropStage::Mature);
    }

    #[test]
    fn test_watering_bonus_accrues_only_inside_window() {
        let (mut grid, registry) = farm();
        plant_seed(&mut grid, PLOT, CropKind::Wheat, 0).unwrap();
        water_crop(&mut grid, PLOT, 10_000).unwrap();
        let config = registry.get(CropKind::Wheat);

        // Half the bonus of a from-birth watering: mature at 23334, not 20000.
        let crop = grid.get(PLOT).unwrap().crop.unwrap();
        assert_eq!(derived_stage(&crop, config, 23_333), CropStage::Growing);
        assert_eq!(derived_stage(&crop, config, 23_334), CropStage::Mature);
    }

    #[test]
    fn test_water_refusals_in_order() {
        let (mut grid, _) = farm();
        assert_eq!(
            water_crop(&mut grid, Coord::new(99, 99), 0),
            Err(WaterError::NoTile)
        );
        assert_eq!(
            water_crop(&mut grid, PLOT, 0),
            Err(WaterError::NothingToWater)
        );

        plant_seed(&mut grid, PLOT, CropKind::Wheat, 0).unwrap();
        water_crop(&mut grid, PLOT, 1_000).unwrap();
        assert_eq!(
            water_crop(&mut grid, PLOT, 2_000),
            Err(WaterError::AlreadyWatered)
        );

        // Window expired, watering works again.
        assert_eq!(water_crop(&mut grid, PLOT, 61_000), Ok(()));
    }

    #[test]
    fn test_watering_mature_crop_refused() {
        let (mut grid, registry) = farm();
        plant_seed(&mut grid, PLOT, CropKind::Wheat, 0).unwrap();
        update_growth(&mut grid, &registry, 30_000);
        assert_eq!(
            water_crop(&mut grid, PLOT, 30_000),
            Err(WaterError::AlreadyMature)
        );
    }

    #[test]
    fn test_dirt_watering() {
        let (mut grid, _) = farm();
        assert_eq!(water_dirt(&mut grid, PLOT, 0), Ok(()));
        assert!(grid.get(PLOT).unwrap().dirt_watered(0));
        assert_eq!(
            water_dirt(&mut grid, PLOT, 1_000),
            Err(WaterError::DirtAlreadyWatered)
        );
        // Expired window waters again.
        assert!(!grid.get(PLOT).unwrap().dirt_watered(60_000));
        assert_eq!(water_dirt(&mut grid, PLOT, 60_000), Ok(()));

        let grass = Coord::new(24, 24);
        let mut g2 = grid.clone();
        g2.set_base(grass, TileType::Grass);
        assert_eq!(water_dirt(&mut g2, grass, 0), Err(WaterError::NotDirt));
    }

    #[test]
    fn test_water_any_prefers_crop() {
        let (mut grid, _) = farm();
        plant_seed(&mut grid, PLOT, CropKind::Wheat, 0).unwrap();
        assert_eq!(water_any(&mut grid, PLOT, 0), Ok(WaterTarget::Crop));
        assert_eq!(
            water_any(&mut grid, PLOT, 1_000),
            Err(WaterError::AlreadyWatered)
        );

        let bare = Coord::new(31, 31);
        assert_eq!(water_any(&mut grid, bare, 0), Ok(WaterTarget::Dirt));
    }

    #[test]
    fn test_crop_water_refused_on_dirt_through_water_dirt() {
        let (mut grid, _) = farm();
        plant_seed(&mut grid, PLOT, CropKind::Wheat, 0).unwrap();
        assert_eq!(water_dirt(&mut grid, PLOT, 0), Err(WaterError::CropInTheWay));
    }

    #[test]
    fn test_harvest_only_mature() {
        let (mut grid, registry) = farm();
        plant_seed(&mut grid, PLOT, CropKind::Carrot, 0).unwrap();
        assert_eq!(harvest_crop(&mut grid, PLOT), Err(HarvestError::NotMature));

        update_growth(&mut grid, &registry, 60_000);
        assert_eq!(harvest_crop(&mut grid, PLOT), Ok(CropKind::Carrot));

        let tile = grid.get(PLOT).unwrap();
        assert_eq!(tile.base, TileType::Dirt);
        assert!(!tile.is_occupied());
        assert!(tile.crop.is_none());
        assert_eq!(harvest_crop(&mut grid, PLOT), Err(HarvestError::NoCrop));
    }

    // ==================== SWEEP TESTS ====================

    #[test]
    fn test_sweep_commits_stage_and_reports_change() {
        let (mut grid, registry) = farm();
        plant_seed(&mut grid, PLOT, CropKind::Wheat, 0).unwrap();

        assert!(!update_growth(&mut grid, &registry, 9_999));
        assert!(update_growth(&mut grid, &registry, 10_000));
        assert_eq!(
            grid.get(PLOT).unwrap().crop.unwrap().stage,
            CropStage::Growing
        );
        // Idempotent until the next boundary.
        assert!(!update_growth(&mut grid, &registry, 10_001));
    }

    #[test]
    fn test_sweep_jumps_stages_after_long_gap() {
        let (mut grid, registry) = farm();
        plant_seed(&mut grid, PLOT, CropKind::Tomato, 0).unwrap();

        assert!(update_growth(&mut grid, &registry, 1_000_000));
        assert_eq!(
            grid.get(PLOT).unwrap().crop.unwrap().stage,
            CropStage::Mature
        );
    }

    #[test]
    fn test_sweep_retires_expired_window_without_losing_growth() {
        // Epoch-scale base: the rebase subtracts from planted_at.
        const BASE: Millis = 1_700_000_000_000;
        let (mut grid, registry) = farm();
        plant_seed(&mut grid, PLOT, CropKind::Corn, BASE).unwrap();
        water_crop(&mut grid, PLOT, BASE).unwrap();
        let config = registry.get(CropKind::Corn);

        let before = {
            let crop = grid.get(PLOT).unwrap().crop.unwrap();
            effective_elapsed_half(&crop, BASE + 70_000)
        };
        assert!(update_growth(&mut grid, &registry, BASE + 70_000));

        let crop = grid.get(PLOT).unwrap().crop.unwrap();
        assert_eq!(crop.watered_at, None);
        assert_eq!(crop.planted_at, BASE - 30_000);
        assert_eq!(effective_elapsed_half(&crop, BASE + 70_000), before);
        // 70000ms wall plus a full 30000ms bonus.
        assert_eq!(effective_elapsed_ms(&crop, BASE + 70_000), 100_000);
        assert_eq!(derived_stage(&crop, config, BASE + 70_000), CropStage::Growing);

        // Nothing left to retire.
        assert!(!update_growth(&mut grid, &registry, BASE + 70_001));
    }

    #[test]
    fn test_rewatering_expired_window_banks_its_bonus() {
        const BASE: Millis = 1_700_000_000_000;
        let (mut grid, _) = farm();
        plant_seed(&mut grid, PLOT, CropKind::Corn, BASE).unwrap();
        water_crop(&mut grid, PLOT, BASE).unwrap();

        // No sweep ran; re-watering right after expiry must keep the
        // 30000ms earned by the first window.
        water_crop(&mut grid, PLOT, BASE + 60_000).unwrap();
        let crop = grid.get(PLOT).unwrap().crop.unwrap();
        assert_eq!(crop.planted_at, BASE - 30_000);
        assert_eq!(crop.watered_at, Some(BASE + 60_000));
        // 60000ms wall plus the banked 30000ms.
        assert_eq!(effective_elapsed_ms(&crop, BASE + 60_000), 90_000);
    }

    // ==================== PROJECTION TESTS ====================

    #[test]
    fn test_progress_tracks_stage_boundaries() {
        let (mut grid, registry) = farm();
        plant_seed(&mut grid, PLOT, CropKind::Wheat, 0).unwrap();
        let config = registry.get(CropKind::Wheat);

        let crop = grid.get(PLOT).unwrap().crop.unwrap();
        assert!((growth_progress(&crop, config, 0) - 0.0).abs() < 1e-9);
        assert!((growth_progress(&crop, config, 5_000) - 0.5).abs() < 1e-9);
        assert!((growth_progress(&crop, config, 10_000) - 1.0).abs() < 1e-9);
        // Progress is capped even before the sweep commits the stage.
        assert!((growth_progress(&crop, config, 15_000) - 1.0).abs() < 1e-9);

        update_growth(&mut grid, &registry, 10_000);
        let crop = grid.get(PLOT).unwrap().crop.unwrap();
        assert!((growth_progress(&crop, config, 20_000) - 0.5).abs() < 1e-9);
        assert!((growth_progress(&crop, config, 30_000) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_remaining_growth_unwatered() {
        let (mut grid, registry) = farm();
        plant_seed(&mut grid, PLOT, CropKind::Wheat, 0).unwrap();
        let config = registry.get(CropKind::Wheat);

        let crop = grid.get(PLOT).unwrap().crop.unwrap();
        assert_eq!(remaining_growth_ms(&crop, config, 0), 10_000);
        assert_eq!(remaining_growth_ms(&crop, config, 4_000), 6_000);
        assert_eq!(remaining_growth_ms(&crop, config, 10_000), 0);
    }

    #[test]
    fn test_remaining_growth_inside_window() {
        let (mut grid, registry) = farm();
        plant_seed(&mut grid, PLOT, CropKind::Wheat, 0).unwrap();
        water_crop(&mut grid, PLOT, 0).unwrap();
        let config = registry.get(CropKind::Wheat);
        let crop = grid.get(PLOT).unwrap().crop.unwrap();

        // 20000 half-units at 3 per ms.
        let remaining = remaining_growth_ms(&crop, config, 0);
        assert_eq!(remaining, 6_667);
        assert_eq!(derived_stage(&crop, config, 6_666), CropStage::Seed);
        assert_eq!(derived_stage(&crop, config, 6_667), CropStage::Growing);
    }

    #[test]
    fn test_remaining_growth_spills_past_window() {
        let (mut grid, registry) = farm();
        plant_seed(&mut grid, PLOT, CropKind::Corn, 0).unwrap();
        water_crop(&mut grid, PLOT, 0).unwrap();
        let config = registry.get(CropKind::Corn);
        let crop = grid.get(PLOT).unwrap().crop.unwrap();

        // Corn needs 40000ms to sprout; the window covers 60000ms * 1.5 =
        // 90000ms worth, so the boundary lands inside the window.
        let to_growing = remaining_growth_ms(&crop, config, 0);
        assert_eq!(to_growing, 26_667);

        // Full maturity needs 120000ms effective: 60000ms watered earns
        // 90000, the last 30000 comes at normal speed.
        let crop_growing = CropData {
            stage: CropStage::Growing,
            ..crop
        };
        assert_eq!(remaining_growth_ms(&crop_growing, config, 0), 90_000);
        assert_eq!(derived_stage(&crop_growing, config, 89_999), CropStage::Growing);
        assert_eq!(derived_stage(&crop_growing, config, 90_000), CropStage::Mature);
    }

    #[test]
    fn test_water_clock_readings() {
        let (mut grid, _) = farm();
        plant_seed(&mut grid, PLOT, CropKind::Wheat, 0).unwrap();
        water_crop(&mut grid, PLOT, 5_000).unwrap();
        let crop = grid.get(PLOT).unwrap().crop.unwrap();

        assert!(is_watered(&crop, 5_000));
        assert!(is_watered(&crop, 64_999));
        assert!(!is_watered(&crop, 65_000));
        assert_eq!(remaining_water_ms(&crop, 5_000), 60_000);
        assert_eq!(remaining_water_ms(&crop, 50_000), 15_000);
        assert_eq!(remaining_water_ms(&crop, 70_000), 0);
    }

    #[test]
    fn test_migrated_water_before_planting_is_clamped() {
        // Migration can synthesize a watering that predates planting.
        let crop = CropData {
            kind: CropKind::Wheat,
            stage: CropStage::Seed,
            planted_at: 100_000,
            watered_at: Some(70_000),
        };
        // Window [70000, 130000); only [100000, now] overlaps lived time.
        assert_eq!(effective_elapsed_half(&crop, 100_000), 0);
        assert_eq!(effective_elapsed_half(&crop, 110_000), 30_000);
        assert_eq!(effective_elapsed_half(&crop, 130_000), 90_000);
        assert_eq!(effective_elapsed_half(&crop, 140_000), 110_000);
    }

    #[test]
    fn test_crop_kind_strings_round_trip() {
        for kind in CropKind::ALL {
            assert_eq!(CropKind::parse(kind.as_str()), Some(kind));
        }
        assert_eq!(CropKind::parse("kale"), None);
    }

    #[test]
    fn test_crop_stage_numeric_round_trip() {
        for stage in [CropStage::Seed, CropStage::Growing, CropStage::Mature] {
            assert_eq!(CropStage::from_u8(stage.as_u8()), Some(stage));
        }
        assert_eq!(CropStage::from_u8(3), None);
    }
}
