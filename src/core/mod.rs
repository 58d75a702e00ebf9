//=========================================================================
// Core
//=========================================================================
//
// Platform-free heart of the cursor program.
//
// Architecture:
// ```text
//   FrameLoop ──(pointer, delta)──► CursorController
//       │                              ├─ Sprite (primary cursor)
//       │                              └─ TrailRing ──► Sprite × N
//       │
//       ├─ InputSource   (platform_bridge::EventCollector in production)
//       └─ RenderSurface (platform::GpuSurface in production)
// ```
//
// Notes:
// Everything here is single-threaded and single-owner. The frame loop
// touches the cursor state exactly once per iteration, between a clear
// and a present of the render surface.
//
//=========================================================================

//=== Module Declarations =================================================

pub mod cursor;
pub mod frame;
pub mod input;
pub(crate) mod platform_bridge;
pub mod render;
pub mod trail;

//=== Re-exports ==========================================================

pub use cursor::{CursorController, CursorSettings};
pub use frame::{CursorAssets, FrameClock, FrameLoop, LoopState, TickControl};
pub use input::{InputEvent, InputSource};
pub use render::{AssetLoadError, Rect, RenderSurface, Sprite, TextureData, TextureId};
pub use trail::TrailRing;
