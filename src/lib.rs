//=========================================================================
// Cursor Trail - Library Root
//
// A custom mouse cursor with a fading trail, drawn every frame on a
// hardware-accelerated 2D surface.
//
// Responsibilities:
// - Expose the engine interface (`EngineBuilder`, `Engine`)
// - Expose configuration loading (`Config`)
// - Keep OS and GPU integration (`platform`) hidden from users
//
// Typical usage:
// ```no_run
// use cursor_trail::{Config, EngineBuilder};
//
// fn main() -> Result<(), cursor_trail::EngineError> {
//     let config = Config::load_or_default("config.json".as_ref())?;
//     EngineBuilder::new().with_config(config).build()?.run()
// }
// ```
//
//=========================================================================

//--- Public Modules ------------------------------------------------------
//
// `core` holds the platform-free cursor, trail and frame logic. It is
// exposed so the logic can be driven by other surfaces and input sources.
//
pub mod config;
pub mod core;
pub mod prelude;

//--- Internal Modules ----------------------------------------------------
//
// `platform` contains window, Winit and wgpu integration and is kept
// private.
//
mod engine;
mod platform;

//--- Public Exports ------------------------------------------------------

pub use crate::config::{Config, ConfigError};
pub use crate::core::platform_bridge::InitError;
pub use crate::engine::{Engine, EngineBuilder, EngineError};
