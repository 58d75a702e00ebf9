//=========================================================================
// Cursor Controller
//=========================================================================
//
// Places the primary cursor sprite on the pointer and feeds the trail at
// a fixed sampling rate.
//
// Architecture:
// ```text
//   tick(x, y, dt)
//     ├─ clamp (x, y) into bounds
//     ├─ center primary sprite on (x, y)
//     ├─ accumulator += dt
//     └─ accumulator >= interval ?
//          └─ trail.advance(x, y, trail_size); accumulator = 0
//
//   render()
//     ├─ trail (oldest → newest)
//     └─ primary sprite (always on top)
// ```
//
// Sampling is time based only: a motionless pointer keeps stacking
// entries at the same spot, and fast motion spreads them further apart.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::trace;

//=== Internal Dependencies ===============================================

use crate::core::render::{Rect, RenderSurface, Sprite, TextureId};
use crate::core::trail::TrailRing;

//=== CursorSettings ======================================================

/// Geometry and timing of the cursor and its trail.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CursorSettings {
    /// Side of the primary cursor square, in pixels.
    pub cursor_size: u32,

    /// Side of each spawned trail entry, in pixels.
    pub trail_size: u32,

    /// Number of trail entries (ring capacity).
    pub trail_length: usize,

    /// Time between two trail spawns, in milliseconds.
    pub spawn_interval_ms: f64,
}

impl Default for CursorSettings {
    fn default() -> Self {
        Self {
            cursor_size: 100,
            trail_size: 100,
            trail_length: 10,
            spawn_interval_ms: 30.0,
        }
    }
}

//=== CursorController ====================================================

/// Owns the primary cursor sprite and its trail.
#[derive(Debug, Clone)]
pub struct CursorController {
    sprite: Sprite,
    trail: TrailRing,
    accumulator_ms: f64,
    spawn_interval_ms: f64,
    trail_size: u32,
    bounds: (u32, u32),
}

impl CursorController {
    //--- Construction -----------------------------------------------------

    /// Creates a controller with an unadvanced trail.
    ///
    /// `bounds` is the drawable size the pointer is clamped into.
    ///
    /// # Panics
    ///
    /// Panics if `settings.trail_length == 0`.
    pub fn new(
        settings: CursorSettings,
        cursor_texture: Option<TextureId>,
        trail_texture: Option<TextureId>,
        bounds: (u32, u32),
    ) -> Self {
        let size = settings.cursor_size;

        Self {
            sprite: Sprite::new(cursor_texture, Rect::new(0, 0, size, size)),
            trail: TrailRing::new(settings.trail_length, trail_texture),
            accumulator_ms: 0.0,
            spawn_interval_ms: settings.spawn_interval_ms,
            trail_size: settings.trail_size,
            bounds,
        }
    }

    //--- Update -----------------------------------------------------------

    /// Samples the pointer and advances the spawn clock by `delta_ms`.
    ///
    /// Returns `true` if the trail advanced during this tick.
    pub fn tick(&mut self, pointer_x: i32, pointer_y: i32, delta_ms: f64) -> bool {
        let (x, y) = self.clamp(pointer_x, pointer_y);
        self.sprite.rect.center_on(x, y);

        self.accumulator_ms += delta_ms;
        if self.accumulator_ms < self.spawn_interval_ms {
            return false;
        }

        trace!(
            target: "core::cursor",
            "Spawn interval reached after {:.3}ms, spawning at ({}, {})",
            self.accumulator_ms,
            x,
            y
        );

        self.trail.advance(x, y, self.trail_size);
        // Reset to zero, not to the remainder
        self.accumulator_ms = 0.0;
        true
    }

    /// Updates the drawable size used for clamping.
    pub fn set_bounds(&mut self, width: u32, height: u32) {
        self.bounds = (width, height);
    }

    //--- Rendering --------------------------------------------------------

    /// Draws the trail, then the primary sprite on top of it.
    pub fn render<S: RenderSurface + ?Sized>(&self, surface: &mut S) {
        self.trail.render(surface);
        self.sprite.display(surface);
    }

    //--- Queries ----------------------------------------------------------

    pub fn sprite(&self) -> &Sprite {
        &self.sprite
    }

    pub fn trail(&self) -> &TrailRing {
        &self.trail
    }

    /// Milliseconds accumulated since the last trail advance.
    pub fn accumulator_ms(&self) -> f64 {
        self.accumulator_ms
    }

    pub fn bounds(&self) -> (u32, u32) {
        self.bounds
    }

    //--- Internal Helpers -------------------------------------------------

    fn clamp(&self, x: i32, y: i32) -> (i32, i32) {
        let max_x = (self.bounds.0 as i32 - 1).max(0);
        let max_y = (self.bounds.1 as i32 - 1).max(0);
        (x.clamp(0, max_x), y.clamp(0, max_y))
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
