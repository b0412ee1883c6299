#![no_main]

//! Growth clock fuzzer.
//!
//! Drives the pure crop projections with arbitrary timestamps, including
//! the rebased and migrated shapes where `watered_at` predates
//! `planted_at`. Projections must stay bounded and monotone, the boundary
//! countdown must name the exact transition instant, and a growth sweep
//! must be idempotent.

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use tilth::clock::Millis;
use tilth::game::{
    derived_stage, growth_progress, is_watered, plant_seed, remaining_growth_ms,
    remaining_water_ms, update_growth, Coord, CropData, CropKind, CropStage, Grid, SeedRegistry,
    TileType, WATER_DURATION_MS,
};

/// Keeps window arithmetic away from the u64 saturation range.
const TS_CAP: Millis = 1 << 62;

/// A dirt plot inside the starting section.
const PLOT: Coord = Coord::new(30, 30);

/// Structured input for growth fuzzing.
#[derive(Arbitrary, Debug)]
struct GrowthInput {
    /// Which crop kind to grow.
    kind_index: u8,
    /// Stored stage selector.
    stage: u8,
    /// Planting timestamp.
    planted_at: u64,
    /// Watering timestamp, if the crop was ever watered.
    watered_at: Option<u64>,
    /// Observation timestamp.
    now: u64,
    /// Extra time for the second observation.
    advance: u32,
}

fuzz_target!(|input: GrowthInput| {
    let kind = CropKind::ALL[input.kind_index as usize % CropKind::ALL.len()];
    let Some(stage) = CropStage::from_u8(input.stage % 3) else {
        return;
    };
    let now = input.now.min(TS_CAP);
    let later = now.saturating_add(Millis::from(input.advance));

    let mut crop = CropData::planted(kind, input.planted_at.min(TS_CAP));
    crop.stage = stage;
    crop.watered_at = input.watered_at.map(|w| w.min(TS_CAP));

    let registry = SeedRegistry::standard();
    let config = registry.get(kind);

    // Projections are total, bounded and move forward with the clock.
    let p_now = growth_progress(&crop, config, now);
    let p_later = growth_progress(&crop, config, later);
    assert!((0.0..=1.0).contains(&p_now), "progress out of range: {p_now}");
    assert!(p_now <= p_later, "progress ran backwards: {p_now} -> {p_later}");
    assert!(
        derived_stage(&crop, config, now) <= derived_stage(&crop, config, later),
        "derived stage ran backwards"
    );

    // Water accounting agrees with the window flag.
    let left = remaining_water_ms(&crop, now);
    assert_eq!(is_watered(&crop, now), left > 0, "window flag disagrees");
    if crop.watered_at.is_none() {
        assert_eq!(left, 0, "unwatered crop reported water");
    }
    if crop.watered_at.map_or(true, |w| w <= now) {
        assert!(left <= WATER_DURATION_MS, "window outlived the watering");
    }

    // With sane clocks the countdown names the exact boundary instant.
    let clocks_sane =
        crop.planted_at <= now && crop.watered_at.map_or(true, |w| w <= now);
    if clocks_sane {
        let mut current = crop;
        current.stage = derived_stage(&current, config, now);
        let r = remaining_growth_ms(&current, config, now);
        if current.stage == CropStage::Mature {
            assert_eq!(r, 0, "mature crop still counting down");
        } else {
            assert!(r > 0, "pending stage with no remaining time");
            assert!(
                derived_stage(&current, config, now + r) > current.stage,
                "countdown undershot the stage boundary"
            );
            assert_eq!(
                derived_stage(&current, config, now + r - 1),
                current.stage,
                "countdown overshot the stage boundary"
            );
        }
    }

    // A sweep commits stages and retires expired windows; a second sweep
    // at the same instant must find nothing left to do.
    let Some(mut grid) = Grid::new(60, 60) else {
        return;
    };
    grid.set_base(PLOT, TileType::Dirt);
    if plant_seed(&mut grid, PLOT, kind, crop.planted_at).is_err() {
        return;
    }
    if let Some(tile) = grid.get_mut(PLOT) {
        tile.crop = Some(crop);
    }
    update_growth(&mut grid, &registry, now);
    let settled = grid.clone();
    assert!(
        !update_growth(&mut grid, &registry, now),
        "second sweep at the same instant reported changes"
    );
    assert_eq!(grid, settled, "second sweep mutated the grid");
});
