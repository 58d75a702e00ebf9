//=========================================================================
// Input
//
// What the frame loop needs from the outside world each iteration: the
// current pointer position and a drained queue of discrete events.
//
// Responsibilities:
// - Define the `InputSource` seam (platform bridge in production,
//   scripted sources in tests)
// - Expose the normalized `InputEvent` type
//
// Notes:
// Both operations must be non-blocking. A source with nothing new
// reports the last known pointer position and `None` respectively.
//
//=========================================================================

//=== Submodules ==========================================================

pub mod event;

//=== Public API ==========================================================

pub use event::InputEvent;

//=== InputSource =========================================================

/// Non-blocking provider of pointer samples and discrete events.
pub trait InputSource {
    /// Latest known pointer position in window pixels.
    fn pointer_position(&mut self) -> (i32, i32);

    /// Next pending event, or `None` once the queue is drained.
    fn poll_event(&mut self) -> Option<InputEvent>;
}
