//=========================================================================
// Input Buffer
//
// Collects normalized platform events between two frame boundaries in
// two categories: discrete and continuous.
//
// Responsibilities:
// - Store incoming events for the current frame
// - Deduplicate consecutive identical discrete events (e.g., repeated Quit)
// - Coalesce continuous events (e.g., PointerMoved, Resized): last wins
// - Hand the batch over via `drain()`
//
// Notes:
// The buffer is reset on every drain and keeps its allocations for the
// next frame.
//=========================================================================

//=== Standard Library Imports ============================================
use std::collections::HashSet;

//=== Internal Modules ====================================================
use crate::core::input::InputEvent;

//=== InputBuffer Struct ==================================================
//
// Transient event store for one frame of input.
//
// Internally maintains:
// - `discrete`: one-shot events, in arrival order
// - `continuous`: last-known value per continuous event type
//
pub(crate) struct InputBuffer {
    discrete: Vec<InputEvent>,
    continuous: HashSet<InputEvent>,
}

impl InputBuffer {
    //--- Construction -----------------------------------------------------
    pub fn new() -> Self {
        const DISCRETE_BASE: usize = 8;
        const CONTINUOUS_BASE: usize = 4;

        Self {
            discrete: Vec::with_capacity(DISCRETE_BASE),
            continuous: HashSet::with_capacity(CONTINUOUS_BASE),
        }
    }

    //--- Continuous Event Handling ---------------------------------------
    //
    // The latest event replaces any previous one of the same type.
    //
    pub fn push_continuous(&mut self, event: InputEvent) {
        self.continuous.replace(event);
    }

    //--- Discrete Event Handling -----------------------------------------
    //
    // Duplicate consecutive events are ignored to prevent flooding.
    //
    pub fn push_discrete(&mut self, event: InputEvent) {
        if self.discrete.last() != Some(&event) {
            self.discrete.push(event);
        }
    }

    //--- Drain ------------------------------------------------------------
    //
    // Returns `(discrete, continuous)` and clears the buffer, or `None`
    // if nothing was buffered.
    //
    pub fn drain(&mut self) -> Option<(Vec<InputEvent>, Vec<InputEvent>)> {
        if self.is_empty() {
            return None;
        }
        let discrete = std::mem::take(&mut self.discrete);
        let continuous = self.continuous.drain().collect();
        Some((discrete, continuous))
    }

    //--- Restore ----------------------------------------------------------
    //
    // Puts back a batch that could not be delivered. Events pushed after
    // the restore still follow the usual dedup/replace rules.
    //
    pub fn restore(&mut self, discrete: Vec<InputEvent>, continuous: Vec<InputEvent>) {
        for event in discrete {
            self.push_discrete(event);
        }
        for event in continuous {
            self.push_continuous(event);
        }
    }

    //--- Utilities --------------------------------------------------------
    pub fn len(&self) -> usize {
        self.discrete.len() + self.continuous.len()
    }

    pub fn is_empty(&self) -> bool {
        self.discrete.is_empty() && self.continuous.is_empty()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
