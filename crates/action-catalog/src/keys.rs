//! Key groups and well-known pointer targets shared by the catalog tiers
//! and the variation table.

/// Keys tried first to get a game out of its start screen.
pub const START_KEYS: [&str; 3] = ["Space", "Enter", "Escape"];

/// The arrow movement group. Emitted as a whole: a game that listens to one
/// arrow almost always listens to all four.
pub const ARROW_KEYS: [&str; 4] = ["ArrowUp", "ArrowDown", "ArrowLeft", "ArrowRight"];

/// The WASD movement group.
pub const WASD_KEYS: [&str; 4] = ["w", "a", "s", "d"];

/// Whitelist of plausible action keys, intersected with the descriptor.
pub const ACTION_KEYS: [&str; 6] = ["Space", "z", "x", "c", "Enter", "Control"];

/// Fallback when the descriptor names no action key at all.
pub const ACTION_KEY_FALLBACK: [&str; 3] = ["Space", "z", "x"];

/// Click target addressing the center of the play canvas.
pub const CANVAS_CENTER: &str = "canvas-center";

/// Click target addressing the first visible button on the page.
pub const FIRST_BUTTON: &str = "first-button";

/// True when `key` belongs to the arrow group.
pub fn is_arrow(key: &str) -> bool {
    ARROW_KEYS.contains(&key)
}

/// True when `key` belongs to the WASD group.
pub fn is_wasd(key: &str) -> bool {
    WASD_KEYS.contains(&key)
}
