#![no_main]

//! Save decoding fuzzer.
//!
//! Feeds arbitrary text through every path that accepts an untrusted
//! save: the header probe, the full load (including the legacy
//! migration route), and the import surface. None of them may panic,
//! and anything that does load must survive a save cycle unchanged.

use libfuzzer_sys::fuzz_target;
use tilth::clock::Millis;
use tilth::save::{
    import_save, load_game, save_game, save_info, KvStore, MemoryStore, SAVE_KEY,
};

/// Fixed wall clock for migration stamps.
const NOW: Millis = 1_700_000_000_000;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    let mut store = MemoryStore::new();
    store.set(SAVE_KEY, text);

    // The header probe and the full load must tolerate any text.
    let _ = save_info(&store);
    let Some(loaded) = load_game(&store, NOW) else {
        return;
    };

    // Whatever loads must write back out and reload identically.
    let mut second = MemoryStore::new();
    if save_game(&mut second, &loaded.state, NOW) {
        let reloaded = load_game(&second, NOW).expect("fresh save failed to load");
        assert_eq!(reloaded.state, loaded.state, "save cycle changed the game");
        assert!(!reloaded.migrated, "fresh save came back as a migration");
    }

    // The import surface runs its own header checks on the same text.
    let mut imported = MemoryStore::new();
    if import_save(&mut imported, text) {
        let _ = load_game(&imported, NOW);
    }
});
