//=========================================================================
// Platform Bridge Interface
//=========================================================================
//
// Platform-to-core interface types (events and errors).
//
// Defines the contract between the windowing layer and the frame loop.
// Error payloads are rendered to strings so the core does not depend on
// any particular windowing or GPU crate.
//
//=========================================================================

//=== External Dependencies ===============================================

use thiserror::Error;

//=== Internal Dependencies ===============================================

use crate::core::input::InputEvent;

//=== PlatformEvent =======================================================

/// Events sent from the platform layer to the frame loop's input queue.
#[derive(Debug, Clone)]
pub(crate) enum PlatformEvent {
    /// Input batched since the last frame boundary.
    Inputs {
        discrete: Vec<InputEvent>,
        continuous: Vec<InputEvent>,
    },

    /// Window close requested.
    WindowClosed,
}

//=== InitError ===========================================================

/// Fatal startup failure of the window, renderer, or event loop.
///
/// Reported, then the process terminates.
#[derive(Debug, Error)]
pub enum InitError {
    /// Event loop creation failed (OS-level issue).
    #[error("event loop creation failed: {0}")]
    EventLoopCreation(String),

    /// Event loop execution error.
    #[error("event loop error: {0}")]
    EventLoopExecution(String),

    /// The OS refused to create the window.
    #[error("window creation failed: {0}")]
    WindowCreation(String),

    /// The renderer could not attach to the window.
    #[error("render surface creation failed: {0}")]
    SurfaceCreation(String),

    /// No GPU adapter can present to the window.
    #[error("no compatible graphics adapter found")]
    AdapterUnavailable,

    /// The adapter refused to open a device.
    #[error("graphics device request failed: {0}")]
    DeviceRequest(String),

    /// The surface offers no usable texture format.
    #[error("render surface reports no supported formats")]
    UnsupportedSurface,
}

//=========================================================================
// Unit Tests
//=========================================================================
