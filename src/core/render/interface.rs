//=========================================================================
// Render Interface
//=========================================================================
//
// Contract between the core and whatever draws pixels (wgpu, a test
// recorder, ...).
//
// Architecture:
//   Core (Sprite, TrailRing, CursorController)
//         ↓ draw_texture(TextureId, Rect)
//   RenderSurface (trait)
//         ↓
//   Backend (platform::GpuSurface / testing::RecordingSurface)
//
// The core never owns GPU objects. It holds `TextureId` handles handed
// out by the surface and gives them back exactly once at teardown.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::path::PathBuf;

use thiserror::Error;

//=== Internal Dependencies ===============================================

use super::texture_loader::TextureData;

//=== Rect ================================================================

/// Integer screen-space rectangle (pixels, top-left origin).
///
/// The rectangle fully determines placement and scale of a draw: the
/// whole source texture is stretched into it, never cropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    /// Degenerate placeholder rectangle. Draws cover no pixels.
    pub const ZERO: Rect = Rect { x: 0, y: 0, width: 0, height: 0 };

    pub const fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self { x, y, width, height }
    }

    /// Square of side `size` whose center is `(x, y)`.
    ///
    /// The top-left corner is offset by `size / 2` (integer division).
    pub fn centered(x: i32, y: i32, size: u32) -> Self {
        let half = (size / 2) as i32;
        Self::new(x - half, y - half, size, size)
    }

    /// Center point of the rectangle (integer division).
    pub fn center(&self) -> (i32, i32) {
        (
            self.x + (self.width / 2) as i32,
            self.y + (self.height / 2) as i32,
        )
    }

    /// Moves the rectangle so its center sits on `(x, y)`, keeping its size.
    pub fn center_on(&mut self, x: i32, y: i32) {
        self.x = x - (self.width / 2) as i32;
        self.y = y - (self.height / 2) as i32;
    }

    /// Returns `true` if the rectangle covers no pixels.
    pub fn is_degenerate(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

//=== TextureId ===========================================================

/// Opaque handle to a texture owned by a [`RenderSurface`].
///
/// Copyable on purpose: sprites borrow the texture by handle, the
/// surface remains the sole owner of the underlying resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TextureId(pub(crate) u32);

impl TextureId {
    pub fn index(self) -> u32 {
        self.0
    }
}

//=== AssetLoadError ======================================================

/// A texture asset could not be turned into a drawable handle.
///
/// Never fatal: the affected sprite is kept but draws nothing.
#[derive(Debug, Error)]
pub enum AssetLoadError {
    /// File missing, unreadable, or not a decodable image.
    #[error("failed to load texture '{}': {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// Image decoded but has no pixels.
    #[error("texture '{}' is empty ({width}x{height})", path.display())]
    EmptyImage {
        path: PathBuf,
        width: u32,
        height: u32,
    },

    /// Decoded pixels the surface cannot upload (size limits, layout).
    #[error("texture rejected by render surface: {reason}")]
    Unsupported { reason: String },
}

//=== RenderSurface =======================================================

/// The shared, single-owner drawing surface.
///
/// All draw calls of one frame are issued between [`clear`](Self::clear)
/// and [`present`](Self::present), strictly in call order. Later draws
/// end up on top of earlier ones.
pub trait RenderSurface {
    /// Uploads decoded pixels and returns a handle to the new texture.
    fn create_texture(&mut self, data: &TextureData) -> Result<TextureId, AssetLoadError>;

    /// Releases a texture. Unknown or already released handles are ignored.
    fn destroy_texture(&mut self, texture: TextureId);

    /// Starts a new frame by clearing the backbuffer.
    fn clear(&mut self);

    /// Draws the full texture stretched into `dest`.
    fn draw_texture(&mut self, texture: TextureId, dest: Rect);

    /// Shows the backbuffer.
    fn present(&mut self);

    /// Current drawable size in pixels.
    fn output_size(&self) -> (u32, u32);
}

//=========================================================================
// Unit Tests
//=========================================================================
