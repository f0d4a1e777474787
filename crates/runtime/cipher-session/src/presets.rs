//! Preset phrases

use rand::Rng;

pub const PRESETS: [&str; 30] = [
    "coffee then build",
    "ship tiny things",
    "one clean thought",
    "less noise, more signal",
    "today: focus block",
    "reply later (actually)",
    "make it weird",
    "small win unlocked",
    "write the first line",
    "debug the vibe",
    "touch grass soon",
    "post once, done",
    "keep it simple",
    "no scope creep",
    "breathe, then type",
    "read, then decide",
    "one call only",
    "protect your attention",
    "reduce the scroll",
    "learn one trick",
    "choose the hard yes",
    "ship > perfect",
    "sleep before hype",
    "be kind, be fast",
    "save your energy",
    "quiet confidence",
    "do it in 10",
    "clear inbox, clear mind",
    "trust the process",
    "make a better default",
];

/// Initial text when nothing was stored
pub fn default_preset() -> &'static str {
    PRESETS[0]
}

/// Pick a preset using the caller's RNG
pub fn random_preset<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
    PRESETS[rng.gen_range(0..PRESETS.len())]
}
