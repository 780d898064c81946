//! What the player asked for this frame: held movement plus edge-triggered actions.

pub mod keys;

use std::collections::HashMap;

use serde::Serialize;
use smallvec::SmallVec;

use crate::player::MoveIntent;

pub const ACTION_DEBOUNCE: f64 = 0.2;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum Action {
    Interact,
    ToggleInventory,
    Meditate,
    AdvanceDialogue,
    /// Inventory slot, zero-based.
    DescribeItem(usize),
}

impl Action {
    /// Actions bound to a key that players tend to mash.
    pub fn is_debounced(self) -> bool {
        matches!(
            self,
            Action::Interact | Action::ToggleInventory | Action::Meditate
        )
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct InputFrame {
    pub intent: MoveIntent,
    pub actions: SmallVec<[Action; 4]>,
}

impl InputFrame {
    pub fn idle() -> Self {
        Self::default()
    }

    pub fn moving(intent: MoveIntent) -> Self {
        Self {
            intent,
            actions: SmallVec::new(),
        }
    }

    pub fn with_action(mut self, action: Action) -> Self {
        self.actions.push(action);
        self
    }
}

/// Drops repeats of a debounced action that arrive within the interval of
/// the last accepted one. Times are game seconds, not wall-clock.
#[derive(Clone, Debug, PartialEq)]
pub struct ActionGate {
    interval: f64,
    last: HashMap<Action, f64>,
}

impl Default for ActionGate {
    fn default() -> Self {
        Self::new(ACTION_DEBOUNCE)
    }
}

impl ActionGate {
    pub fn new(interval: f64) -> Self {
        Self {
            interval: interval.max(0.0),
            last: HashMap::new(),
        }
    }

    pub fn accept(&mut self, action: Action, now: f64) -> bool {
        if !action.is_debounced() {
            return true;
        }
        match self.last.get(&action) {
            Some(&at) if now - at < self.interval => false,
            _ => {
                self.last.insert(action, now);
                true
            }
        }
    }
}
