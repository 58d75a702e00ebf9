//=========================================================================
// Rendering
//=========================================================================
//
// Platform-free rendering vocabulary of the core.
//
// Components:
// - `interface`: `RenderSurface` trait, `Rect`, `TextureId`, asset errors
// - `texture_loader`: file → RGBA8 decoding
// - `sprite`: a texture handle placed in a rectangle
//
//=========================================================================

//=== Module Declarations =================================================

pub mod interface;
pub mod sprite;
pub mod texture_loader;

#[cfg(test)]
pub(crate) mod testing;

//=== Public API ==========================================================

pub use interface::{AssetLoadError, Rect, RenderSurface, TextureId};
pub use sprite::{load_texture, Sprite};
pub use texture_loader::{load_texture_data, TextureData};
