//=========================================================================
// Prelude
//=========================================================================
//
// Convenience module that re-exports commonly used types and traits.
//
// Usage:
//   use cursor_trail::prelude::*;
//
//=========================================================================

//=== Public API ==========================================================

// Engine
pub use crate::engine::{Engine, EngineBuilder, EngineError};

// Configuration
pub use crate::config::{Config, ConfigError};

// Cursor and trail
pub use crate::core::cursor::{CursorController, CursorSettings};
pub use crate::core::trail::TrailRing;

// Frame loop
pub use crate::core::frame::{CursorAssets, FrameLoop, LoopState, TickControl};

// Seams
pub use crate::core::input::{InputEvent, InputSource};
pub use crate::core::render::{Rect, RenderSurface, Sprite, TextureData, TextureId};
