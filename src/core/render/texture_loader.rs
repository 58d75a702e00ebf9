//=========================================================================
// Texture Loader
//=========================================================================
//
// Decodes image files into tightly packed RGBA8 pixels, ready for
// `RenderSurface::create_texture`.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::path::Path;

use log::debug;

//=== Internal Dependencies ===============================================

use super::interface::AssetLoadError;

//=== TextureData =========================================================

/// Decoded texture pixels, row-major RGBA8, no row padding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextureData {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

impl TextureData {
    /// Bytes per row of `pixels`.
    pub fn bytes_per_row(&self) -> u32 {
        self.width * 4
    }
}

//=== Loading =============================================================

/// Loads and decodes the image at `path`.
///
/// # Errors
///
/// [`AssetLoadError::Decode`] if the file is missing, unreadable, or not a
/// supported image; [`AssetLoadError::EmptyImage`] if it has no pixels.
pub fn load_texture_data(path: &Path) -> Result<TextureData, AssetLoadError> {
    let image = image::open(path)
        .map_err(|source| AssetLoadError::Decode {
            path: path.to_path_buf(),
            source,
        })?
        .into_rgba8();

    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return Err(AssetLoadError::EmptyImage {
            path: path.to_path_buf(),
            width,
            height,
        });
    }

    debug!(target: "core::sprite", "Decoded '{}' ({}x{})", path.display(), width, height);

    Ok(TextureData {
        width,
        height,
        pixels: image.into_raw(),
    })
}

//=========================================================================
// Unit Tests
//=========================================================================
