//! Spine colors
//!
//! Purely cosmetic: every render draws a fresh color per book.

use rand::seq::SliceRandom;

/// Fixed spine palette
pub const SPINE_COLORS: [&str; 14] = [
    "#FFADAD", "#FFD6A5", "#FDFFB6", "#CAFFBF", "#9BF6FF", "#A0C4FF", "#BDB2FF",
    "#FFC6FF", "#E0BBE4", "#FEC8D8", "#D1E2C4", "#A2D2FF", "#F9E2AE", "#FBC4A7",
];

/// Pick a palette color uniformly at random
pub fn random_spine_color() -> &'static str {
    SPINE_COLORS
        .choose(&mut rand::thread_rng())
        .copied()
        .unwrap_or(SPINE_COLORS[0])
}
