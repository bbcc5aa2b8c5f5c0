//! Retry substitutions: when an action keeps failing, these variations are
//! tried in its place. The table is declarative and bidirectional rather
//! than scattered per-key conditionals.

use gameprobe_core_types::{Action, ActionKind, GameDescriptor};
use tracing::debug;

use crate::keys::{CANVAS_CENTER, FIRST_BUTTON};

/// Duration of the safety wait appended to every non-empty variation list.
pub const VARIATION_WAIT_MS: u64 = 1_500;

/// Bidirectional key substitution pairs. A failed left-hand key retries as
/// the right-hand key and vice versa.
const KEY_SUBSTITUTIONS: [(&str, &str); 5] = [
    ("ArrowUp", "w"),
    ("ArrowDown", "s"),
    ("ArrowLeft", "a"),
    ("ArrowRight", "d"),
    ("Space", "Enter"),
];

/// Substitute counterpart for `key`, if the table has one.
pub fn substitute_key(key: &str) -> Option<&'static str> {
    KEY_SUBSTITUTIONS.iter().find_map(|(left, right)| {
        if *left == key {
            Some(*right)
        } else if *right == key {
            Some(*left)
        } else {
            None
        }
    })
}

/// Variations to try in place of a failed action.
///
/// Returns an empty list when no substitution rule matches; the caller then
/// falls through to the catalog's cyclic order. Every non-empty list ends
/// with a safety wait.
pub fn variations_for(failed: &Action, descriptor: &GameDescriptor) -> Vec<Action> {
    let mut variations = Vec::new();

    match failed.kind {
        ActionKind::Key => {
            if let Some(counterpart) = failed.value.as_deref().and_then(substitute_key) {
                variations.push(Action::key(counterpart));
            }
        }
        ActionKind::Click => {
            // A dead canvas click retries against a concrete button,
            // preferring the start control the analysis labeled.
            if failed.target.as_deref() == Some(CANVAS_CENTER) {
                let target = descriptor
                    .start_label
                    .clone()
                    .unwrap_or_else(|| FIRST_BUTTON.to_string());
                variations.push(Action::click(target));
            }
        }
        ActionKind::Type | ActionKind::Wait => {}
    }

    if !variations.is_empty() {
        variations.push(Action::wait(VARIATION_WAIT_MS));
        debug!(failed = %failed, count = variations.len(), "variations generated");
    }
    variations
}

#[cfg(test)]
mod tests {
    use super::*;
    use gameprobe_core_types::GameDescriptor;

    fn descriptor() -> GameDescriptor {
        GameDescriptor::named("test")
    }

    #[test]
    fn arrow_and_wasd_substitutions_round_trip() {
        for (arrow, letter) in [
            ("ArrowUp", "w"),
            ("ArrowDown", "s"),
            ("ArrowLeft", "a"),
            ("ArrowRight", "d"),
        ] {
            let from_arrow = variations_for(&Action::key(arrow), &descriptor());
            assert!(
                from_arrow.iter().any(|a| a.value.as_deref() == Some(letter)),
                "{arrow} should substitute to {letter}"
            );

            let from_letter = variations_for(&Action::key(letter), &descriptor());
            assert!(
                from_letter.iter().any(|a| a.value.as_deref() == Some(arrow)),
                "{letter} should substitute to {arrow}"
            );
        }
    }

    #[test]
    fn space_and_enter_are_mutual_fallbacks() {
        assert_eq!(substitute_key("Space"), Some("Enter"));
        assert_eq!(substitute_key("Enter"), Some("Space"));
    }

    #[test]
    fn nonempty_variations_end_with_safety_wait() {
        let variations = variations_for(&Action::key("ArrowUp"), &descriptor());
        let last = variations.last().unwrap();
        assert_eq!(last.kind, ActionKind::Wait);
        assert_eq!(last.duration_ms, Some(VARIATION_WAIT_MS));
    }

    #[test]
    fn center_click_falls_back_to_first_button() {
        let variations = variations_for(&Action::click(CANVAS_CENTER), &descriptor());
        assert_eq!(variations[0].target.as_deref(), Some(FIRST_BUTTON));
    }

    #[test]
    fn center_click_prefers_labeled_start_control() {
        let mut descriptor = descriptor();
        descriptor.start_label = Some("Start".into());
        let variations = variations_for(&Action::click(CANVAS_CENTER), &descriptor);
        assert_eq!(variations[0].target.as_deref(), Some("Start"));
    }

    #[test]
    fn unknown_identities_yield_no_variations() {
        assert!(variations_for(&Action::key("q"), &descriptor()).is_empty());
        assert!(variations_for(&Action::click(FIRST_BUTTON), &descriptor()).is_empty());
        assert!(variations_for(&Action::wait(1_000), &descriptor()).is_empty());
    }
}
