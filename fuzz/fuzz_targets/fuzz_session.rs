#![no_main]

//! Whole-game action fuzzer.
//!
//! Replays an arbitrary action script against a fresh game: tool
//! strokes, section purchases, time jumps and save cycles in any order.
//! Every action must leave the world consistent, and a save taken at any
//! point must reload to the same game.
//!
//! This catches integration bugs the single-system fuzzers miss.

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use tilth::clock::Millis;
use tilth::config::GameConfig;
use tilth::game::{check_invariants, Coord, CropKind, GameState, SectionCoord, SeedRegistry, Tool};
use tilth::save::{load_game, save_game, MemoryStore};

/// Wall clock at the start of the session.
const START: Millis = 1_700_000_000_000;

/// A fuzzer-generated player action.
#[derive(Arbitrary, Debug, Clone)]
enum FuzzAction {
    /// Apply a tool to a tile (coordinates may fall off the grid).
    Stroke { x: u8, y: u8, tool: u8 },
    /// Try to buy a section.
    Unlock { sx: u8, sy: u8 },
    /// Let time pass and run a growth sweep.
    Advance { ms: u16 },
    /// Save, reload and continue from the reloaded game.
    SaveReload,
}

/// Structured input for session fuzzing.
#[derive(Arbitrary, Debug)]
struct SessionInput {
    /// Starting coin balance.
    starting_coins: u16,
    /// The action script (capped to bound runtime).
    actions: Vec<FuzzAction>,
}

fn tool_from(byte: u8) -> Tool {
    match byte % 9 {
        0 => Tool::Grass,
        1 => Tool::Dirt,
        2 => Tool::Road,
        3 => Tool::Water,
        4 => Tool::Harvest,
        n => Tool::Seed(CropKind::ALL[(n - 5) as usize % CropKind::ALL.len()]),
    }
}

fuzz_target!(|input: SessionInput| {
    let actions: Vec<_> = input.actions.into_iter().take(32).collect();

    let mut config = GameConfig::default();
    config.starting_coins = u32::from(input.starting_coins);
    let Some(mut state) = GameState::new(&config) else {
        return;
    };
    let registry = SeedRegistry::standard();
    let mut now = START;

    for action in actions {
        match &action {
            FuzzAction::Stroke { x, y, tool } => {
                // Out-of-range coordinates exercise the refusal paths.
                let coord = Coord::new(u16::from(*x) % 64, u16::from(*y) % 64);
                let _ = state.apply_tool(coord, tool_from(*tool), &registry, now);
            }
            FuzzAction::Unlock { sx, sy } => {
                let _ = state.try_unlock_section(SectionCoord::new(sx % 6, sy % 6));
            }
            FuzzAction::Advance { ms } => {
                now = now.saturating_add(Millis::from(*ms));
                state.tick(&registry, now);
            }
            FuzzAction::SaveReload => {
                let mut store = MemoryStore::new();
                assert!(save_game(&mut store, &state, now), "save refused");
                let loaded = load_game(&store, now).expect("fresh save failed to load");
                assert_eq!(loaded.state, state, "reload diverged from the live game");
                assert!(!loaded.migrated, "fresh save came back as a migration");
                state = loaded.state;
            }
        }

        let violations = check_invariants(&state, &registry, now);
        assert!(
            violations.is_empty(),
            "invariants violated after {action:?}: {violations:?}"
        );
    }
});
