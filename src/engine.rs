//=========================================================================
// Cursor Trail Engine
//
// Main entry point and coordinator for the program.
//
// Architecture:
// ```text
//     EngineBuilder  ──build()──>  Engine  ──run()──>  [Runtime]
//         │                          │
//         ├─ with_config()           └─ runs platform on this thread
//         └─ with_channel_capacity()    blocks until exit
// ```
//
//=========================================================================

//=== External Dependencies ===============================================

use log::{error, info};
use thiserror::Error;

//=== Internal Dependencies ===============================================

use crate::config::{Config, ConfigError};
use crate::core::platform_bridge::InitError;
use crate::platform::Platform;

//=== EngineError =========================================================

/// Anything that stops the program from starting or running.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Init(#[from] InitError),
}

//=== EngineBuilder =======================================================

/// Builder for configuring and constructing an [`Engine`].
///
/// # Default Values
///
/// - **Config**: [`Config::default`]
/// - **Channel capacity**: 128 batches
///
/// # Examples
///
/// ```no_run
/// use std::path::Path;
/// use cursor_trail::{Config, EngineBuilder};
///
/// let config = Config::load_or_default(Path::new("config.json"))?;
/// EngineBuilder::new().with_config(config).build()?.run()?;
/// # Ok::<(), cursor_trail::EngineError>(())
/// ```
pub struct EngineBuilder {
    config: Config,
    channel_capacity: usize,
}

impl EngineBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            config: Config::default(),
            channel_capacity: 128,
        }
    }

    /// Sets window, cursor and trail parameters.
    pub fn with_config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    /// Sets the channel capacity for platform → frame loop batches.
    ///
    /// Batches beyond the capacity are dropped with a warning.
    ///
    /// # Panics
    ///
    /// Panics if `capacity == 0`.
    pub fn with_channel_capacity(mut self, capacity: usize) -> Self {
        assert!(capacity > 0, "Channel capacity must be positive");
        self.channel_capacity = capacity;
        self
    }

    /// Validates the configuration and produces a runnable [`Engine`].
    pub fn build(self) -> Result<Engine, EngineError> {
        self.config.validate()?;

        info!(
            "Building engine ({}x{}, trail: {}, channel: {})",
            self.config.window_width,
            self.config.window_height,
            self.config.cursor_trail_elements,
            self.channel_capacity
        );

        Ok(Engine {
            config: self.config,
            channel_capacity: self.channel_capacity,
        })
    }
}

impl Default for EngineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

//=== Engine ==============================================================

/// Cursor trail runtime. Create via [`EngineBuilder`].
pub struct Engine {
    config: Config,
    channel_capacity: usize,
}

impl Engine {
    /// Opens the window and runs until quit. Blocks the calling thread.
    ///
    /// Must be called on the main thread (Winit requirement on macOS/iOS).
    pub fn run(self) -> Result<(), EngineError> {
        info!("Starting engine runtime");

        let platform = Platform::new(self.config, self.channel_capacity);

        if let Err(e) = platform.run() {
            error!("Platform error: {}", e);
            return Err(e.into());
        }

        info!("Engine shutdown complete");
        Ok(())
    }

    pub fn config(&self) -> &Config {
        &self.config
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
