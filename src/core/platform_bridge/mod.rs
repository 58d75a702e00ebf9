//=========================================================================
// Platform Bridge
//=========================================================================
//
// Bridges the platform layer (winit) with the frame loop.
//
// This module defines the contract between platform implementations and
// core logic, so the windowing backend can change without touching the
// cursor code.
//
// Components:
// - `interface`: Event types and fatal init errors (the contract)
// - `event_collector`: Core-side event draining, as an `InputSource`
//
//=========================================================================

//=== Module Declarations =================================================

pub(crate) mod event_collector;
pub(crate) mod interface;

//=== Internal API ========================================================

pub(crate) use event_collector::EventCollector;
pub use interface::InitError;
pub(crate) use interface::PlatformEvent;
