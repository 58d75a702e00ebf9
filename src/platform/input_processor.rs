//=========================================================================
// Input Processor
//=========================================================================
//
// Converts Winit window events into engine InputEvents.
//
// Architecture:
//   Winit Events → InputProcessor → InputEvent (engine type) → InputBuffer
//
// Only what the cursor needs is mapped: pointer motion, surface size and
// the Escape key as an explicit quit. Everything else returns None.
//
//=========================================================================

//=== External Dependencies ===============================================

use winit::{
    dpi::{PhysicalPosition, PhysicalSize},
    event::{ElementState, KeyEvent},
    keyboard::{KeyCode, PhysicalKey},
};

//=== Internal Dependencies ===============================================

use crate::core::input::InputEvent;

//=== InputProcessor ======================================================

/// Converts Winit events to engine InputEvents.
pub(crate) struct InputProcessor {
    quit_key: KeyCode,
}

impl InputProcessor {
    //--- Construction -----------------------------------------------------

    pub(crate) fn new() -> Self {
        Self {
            quit_key: KeyCode::Escape,
        }
    }

    //--- Event Processing -------------------------------------------------

    /// Converts a keyboard event (only the quit key maps to anything).
    pub(crate) fn process_key_event(&self, key_event: &KeyEvent) -> Option<InputEvent> {
        self.map_key(key_event.physical_key, key_event.state)
    }

    /// Creates a pointer move event (window space, physical pixels).
    pub(crate) fn process_pointer_move(&self, position: PhysicalPosition<f64>) -> InputEvent {
        InputEvent::PointerMoved {
            x: position.x as f32,
            y: position.y as f32,
        }
    }

    /// Creates a resize event (physical pixels).
    pub(crate) fn process_resize(&self, size: PhysicalSize<u32>) -> InputEvent {
        InputEvent::Resized {
            width: size.width,
            height: size.height,
        }
    }

    //--- Internal Helpers -------------------------------------------------

    fn map_key(&self, key: PhysicalKey, state: ElementState) -> Option<InputEvent> {
        match (key, state) {
            (PhysicalKey::Code(code), ElementState::Pressed) if code == self.quit_key => {
                Some(InputEvent::Quit)
            }
            _ => None,
        }
    }
}

//=========================================================================
// Tests
//=========================================================================
