//=========================================================================
// Input Event Types
//
// Defines the internal representation of the platform events the cursor
// core reacts to.
//
// This module abstracts away platform-specific input (e.g. Winit) into a
// small, engine-friendly format.
//
// Responsibilities:
// - Represent pointer motion, surface resizes and quit requests
// - Provide equality and hashing semantics for coalescing
//
// Event Flow:
// ```text
// Platform Layer (Winit)
//         ↓
//    InputEvent (this module)
//         ↓
//    InputBuffer (coalesces continuous events)
//         ↓
//    EventCollector (InputSource for the frame loop)
// ```
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::hash::{Hash, Hasher};

//=== InputEvent ==========================================================

/// Low-level input event from the platform layer.
///
/// # Equality & Hashing Semantics
///
/// Events are compared *by type*, not by payload. Two `PointerMoved`
/// events are equal regardless of coordinates, which lets a `HashSet`
/// keep only the latest one (last position wins).
///
/// ```text
/// PointerMoved{1,2}  == PointerMoved{3,4}   ✓
/// Resized{..}        == Resized{..}         ✓
/// PointerMoved{..}   == Quit                ✗
/// ```
///
/// # Event Types
///
/// - **PointerMoved**: Continuous pointer position updates
/// - **Resized**: Continuous drawable size updates
/// - **Quit**: Discrete, explicit request to shut down
#[derive(Debug, Clone, Copy)]
pub enum InputEvent {
    /// Pointer moved to a new position.
    ///
    /// Coordinates are in window space (physical pixels, top-left origin).
    PointerMoved { x: f32, y: f32 },

    /// Drawable area changed size (physical pixels).
    Resized { width: u32, height: u32 },

    /// Explicit quit signal (window closed, Escape pressed, ...).
    Quit,
}

impl InputEvent {
    /// Returns `true` for events where only the latest value matters.
    pub fn is_continuous(&self) -> bool {
        matches!(self, Self::PointerMoved { .. } | Self::Resized { .. })
    }
}

//--- Trait Implementations -----------------------------------------------

impl PartialEq for InputEvent {
    fn eq(&self, other: &Self) -> bool {
        std::mem::discriminant(self) == std::mem::discriminant(other)
    }
}

impl Eq for InputEvent {}

impl Hash for InputEvent {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // Hash only the event *type*, not the data payload
        std::mem::discriminant(self).hash(state);
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
