//=========================================================================
// Sprite
//=========================================================================
//
// A borrowed texture handle placed in a screen-space rectangle.
//
// The owner mutates `rect` in place; the texture is fixed at
// construction. A sprite whose texture failed to load keeps existing
// but draws nothing.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::path::Path;

use log::{error, info};

//=== Internal Dependencies ===============================================

use super::interface::{Rect, RenderSurface, TextureId};
use super::texture_loader::load_texture_data;

//=== Sprite ==============================================================

/// Drawable texture instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sprite {
    texture: Option<TextureId>,
    pub rect: Rect,
}

impl Sprite {
    /// Creates a sprite. `None` yields an invisible sprite.
    pub fn new(texture: Option<TextureId>, rect: Rect) -> Self {
        Self { texture, rect }
    }

    pub fn texture(&self) -> Option<TextureId> {
        self.texture
    }

    pub fn is_visible(&self) -> bool {
        self.texture.is_some()
    }

    /// Issues one draw of the full texture into `rect`.
    ///
    /// No-op without a texture.
    pub fn display<S: RenderSurface + ?Sized>(&self, surface: &mut S) {
        if let Some(texture) = self.texture {
            surface.draw_texture(texture, self.rect);
        }
    }
}

//=== Texture Loading =====================================================

/// Decodes `path` and uploads it to `surface`.
///
/// Failures are reported on the diagnostic stream and turned into `None`
/// so the caller can keep going with an invisible sprite.
pub fn load_texture<S: RenderSurface + ?Sized>(surface: &mut S, path: &Path) -> Option<TextureId> {
    let uploaded = load_texture_data(path).and_then(|data| surface.create_texture(&data));

    match uploaded {
        Ok(texture) => {
            info!(target: "core::sprite", "Loaded texture '{}' as {:?}", path.display(), texture);
            Some(texture)
        }
        Err(e) => {
            error!(target: "core::sprite", "{}; sprite will be invisible", e);
            None
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
