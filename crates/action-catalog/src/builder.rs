//! Tiered catalog construction.
//!
//! The tiers encode a prior over how casual web games expose input:
//! keyboard first (start keys, movement, action keys), then pointer, then a
//! neutral wait. Every tier has a universal fallback, so the catalog is
//! never empty no matter how sparse the descriptor is.

use std::collections::HashSet;

use gameprobe_core_types::{Action, ActionIdentity, GameDescriptor, Gesture, StartHint};
use tracing::debug;

use crate::keys::{
    ACTION_KEYS, ACTION_KEY_FALLBACK, ARROW_KEYS, CANVAS_CENTER, FIRST_BUTTON, START_KEYS,
    WASD_KEYS,
};

/// Duration of the settle wait closing every catalog.
pub const SETTLE_WAIT_MS: u64 = 1_000;

/// Builds the ordered, cyclic action catalog for one run.
pub struct CatalogBuilder;

impl CatalogBuilder {
    /// Build the prioritized catalog for `descriptor`.
    ///
    /// Tiers are concatenated in priority order and deduplicated by action
    /// identity: a key already emitted by an earlier tier is not re-emitted
    /// by a later one. The catalog always ends in exactly one settle wait,
    /// so the cursor's wraparound always includes a neutral action.
    pub fn build(descriptor: &GameDescriptor) -> Vec<Action> {
        let mut catalog = Accumulator::default();

        start_tier(descriptor, &mut catalog);
        movement_tier(descriptor, &mut catalog);
        action_key_tier(descriptor, &mut catalog);
        pointer_tier(descriptor, &mut catalog);

        // Settle tier: always exactly one trailing wait.
        catalog.push(Action::wait(SETTLE_WAIT_MS));

        let actions = catalog.into_actions();
        debug!(
            game = %descriptor.name,
            actions = actions.len(),
            "action catalog built"
        );
        actions
    }
}

/// Catalog accumulator with identity-level deduplication.
#[derive(Default)]
struct Accumulator {
    actions: Vec<Action>,
    seen: HashSet<ActionIdentity>,
}

impl Accumulator {
    fn push(&mut self, action: Action) {
        if self.seen.insert(action.identity()) {
            self.actions.push(action);
        }
    }

    fn push_keys<'a>(&mut self, keys: impl IntoIterator<Item = &'a str>) {
        for key in keys {
            self.push(Action::key(key));
        }
    }

    fn into_actions(self) -> Vec<Action> {
        self.actions
    }
}

fn start_tier(descriptor: &GameDescriptor, catalog: &mut Accumulator) {
    if descriptor.start_hint == StartHint::Button {
        let target = descriptor
            .start_label
            .clone()
            .unwrap_or_else(|| FIRST_BUTTON.to_string());
        catalog.push(Action::click(target));
        // Back the click up with whatever start keys the analysis saw.
        catalog.push_keys(
            START_KEYS
                .iter()
                .copied()
                .filter(|key| has_key(descriptor, key)),
        );
        return;
    }

    // Key or auto hint: start keys the descriptor lists, or the whole
    // whitelist when it lists none. A run is never blocked on missing
    // descriptor data.
    let known: Vec<&str> = START_KEYS
        .iter()
        .copied()
        .filter(|key| has_key(descriptor, key))
        .collect();
    if known.is_empty() {
        catalog.push_keys(START_KEYS);
    } else {
        catalog.push_keys(known);
    }
}

fn movement_tier(descriptor: &GameDescriptor, catalog: &mut Accumulator) {
    let has_arrows = descriptor.candidate_keys.iter().any(|k| crate::keys::is_arrow(k));
    let has_wasd = descriptor.candidate_keys.iter().any(|k| crate::keys::is_wasd(k));

    if has_arrows {
        catalog.push_keys(ARROW_KEYS);
    }
    if has_wasd {
        catalog.push_keys(WASD_KEYS);
    }
    if !has_arrows && !has_wasd {
        // Sane universal fallback.
        catalog.push_keys(ARROW_KEYS);
    }
}

fn action_key_tier(descriptor: &GameDescriptor, catalog: &mut Accumulator) {
    let intersection: Vec<&str> = ACTION_KEYS
        .iter()
        .copied()
        .filter(|key| has_key(descriptor, key))
        .collect();
    if intersection.is_empty() {
        catalog.push_keys(ACTION_KEY_FALLBACK);
    } else {
        catalog.push_keys(intersection);
    }
}

fn pointer_tier(descriptor: &GameDescriptor, catalog: &mut Accumulator) {
    if descriptor.has_gesture(Gesture::Click) {
        catalog.push(Action::click(CANVAS_CENTER));
        catalog.push(Action::click(FIRST_BUTTON));
    }
}

fn has_key(descriptor: &GameDescriptor, key: &str) -> bool {
    descriptor.candidate_keys.iter().any(|k| k.as_str() == key)
}
