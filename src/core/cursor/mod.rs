//=========================================================================
// Cursor
//=========================================================================
//
// Primary cursor sprite plus its trail, driven once per frame.
//
//=========================================================================

//=== Module Declarations =================================================

mod cursor_controller;

//=== Public API ==========================================================

pub use cursor_controller::{CursorController, CursorSettings};
