//=========================================================================
// Test Doubles
//=========================================================================
//
// In-memory render surface and input source for exercising the core
// without a window or GPU.
//
//=========================================================================

use std::collections::VecDeque;

use super::interface::{AssetLoadError, Rect, RenderSurface, TextureId};
use super::texture_loader::TextureData;
use crate::core::input::{InputEvent, InputSource};

//=== SurfaceCall =========================================================

/// One call observed by [`RecordingSurface`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SurfaceCall {
    CreateTexture(TextureId),
    DestroyTexture(TextureId),
    Clear,
    Draw { texture: TextureId, dest: Rect },
    Present,
}

//=== RecordingSurface ====================================================

/// Render surface that records every call in order.
pub(crate) struct RecordingSurface {
    pub calls: Vec<SurfaceCall>,
    pub size: (u32, u32),
    /// When set, `create_texture` rejects every upload.
    pub fail_textures: bool,
    next_id: u32,
}

impl RecordingSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            calls: Vec::new(),
            size: (width, height),
            fail_textures: false,
            next_id: 0,
        }
    }

    pub fn failing(width: u32, height: u32) -> Self {
        Self {
            fail_textures: true,
            ..Self::new(width, height)
        }
    }

    /// Draw calls in issue order.
    pub fn draws(&self) -> Vec<(TextureId, Rect)> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                SurfaceCall::Draw { texture, dest } => Some((*texture, *dest)),
                _ => None,
            })
            .collect()
    }

    pub fn destroyed(&self) -> Vec<TextureId> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                SurfaceCall::DestroyTexture(id) => Some(*id),
                _ => None,
            })
            .collect()
    }

    pub fn count(&self, call: SurfaceCall) -> usize {
        self.calls.iter().filter(|c| **c == call).count()
    }
}

impl RenderSurface for RecordingSurface {
    fn create_texture(&mut self, data: &TextureData) -> Result<TextureId, AssetLoadError> {
        if self.fail_textures {
            return Err(AssetLoadError::Unsupported {
                reason: format!("recording surface refuses {}x{}", data.width, data.height),
            });
        }
        let id = TextureId(self.next_id);
        self.next_id += 1;
        self.calls.push(SurfaceCall::CreateTexture(id));
        Ok(id)
    }

    fn destroy_texture(&mut self, texture: TextureId) {
        self.calls.push(SurfaceCall::DestroyTexture(texture));
    }

    fn clear(&mut self) {
        self.calls.push(SurfaceCall::Clear);
    }

    fn draw_texture(&mut self, texture: TextureId, dest: Rect) {
        self.calls.push(SurfaceCall::Draw { texture, dest });
    }

    fn present(&mut self) {
        self.calls.push(SurfaceCall::Present);
    }

    fn output_size(&self) -> (u32, u32) {
        self.size
    }
}

//=== ScriptedInput =======================================================

/// Input source fed by the test.
#[derive(Default)]
pub(crate) struct ScriptedInput {
    pub pointer: (i32, i32),
    pub events: VecDeque<InputEvent>,
}

impl ScriptedInput {
    pub fn at(x: i32, y: i32) -> Self {
        Self {
            pointer: (x, y),
            events: VecDeque::new(),
        }
    }

    pub fn push(&mut self, event: InputEvent) {
        self.events.push_back(event);
    }
}

impl InputSource for ScriptedInput {
    fn pointer_position(&mut self) -> (i32, i32) {
        self.pointer
    }

    fn poll_event(&mut self) -> Option<InputEvent> {
        self.events.pop_front()
    }
}
