//=========================================================================
// Frame
//=========================================================================
//
// Timing and orchestration of one frame-loop iteration.
//
// Components:
// - `frame_clock`: iteration duration → next iteration's delta time
// - `frame_loop`: lifecycle state machine and render pass ordering
//
//=========================================================================

//=== Module Declarations =================================================

mod frame_clock;
mod frame_loop;

//=== Public API ==========================================================

pub use frame_clock::FrameClock;
pub use frame_loop::{CursorAssets, FrameLoop, LoopState, TickControl};
