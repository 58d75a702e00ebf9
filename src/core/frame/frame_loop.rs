//=========================================================================
// Frame Loop
//=========================================================================
//
// Drives one iteration of the cursor program per call and owns the
// resources it acquired.
//
// Architecture:
// ```text
//   Initializing ──start()──► Running ──Quit──► ShuttingDown
//                               │
//                               └─ iterate():
//                                    1. clock.begin()  (delta = previous start → now)
//                                    2. cursor.tick(pointer, delta)
//                                    3. drain events (Quit → teardown, exit)
//                                    4. clear → cursor.render → present
//                                    5. clock.end()  (work time, frame count)
// ```
//
// Teardown releases textures in reverse acquisition order, exactly once.
// The platform then drops the renderer and the window, in that order.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::path::PathBuf;

use log::{debug, info, trace};

//=== Internal Dependencies ===============================================

use super::FrameClock;
use crate::core::cursor::{CursorController, CursorSettings};
use crate::core::input::{InputEvent, InputSource};
use crate::core::render::{load_texture, RenderSurface, TextureId};

//=== LoopState ===========================================================

/// Lifecycle phase of the frame loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    /// Created, resources not acquired yet.
    Initializing,

    /// Iterating.
    Running,

    /// Quit received, resources released. Terminal.
    ShuttingDown,
}

//=== TickControl =========================================================

/// Whether the driver should keep calling [`FrameLoop::iterate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickControl {
    Continue,
    Exit,
}

//=== CursorAssets ========================================================

/// Image files for the cursor and its trail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CursorAssets {
    pub cursor_image: PathBuf,
    pub trail_image: PathBuf,
}

impl Default for CursorAssets {
    fn default() -> Self {
        Self {
            cursor_image: PathBuf::from("img/cursor.png"),
            trail_image: PathBuf::from("img/cursortrail.png"),
        }
    }
}

//=== FrameLoop ===========================================================

/// Per-iteration driver for the cursor and its render pass.
pub struct FrameLoop {
    state: LoopState,
    clock: FrameClock,
    settings: CursorSettings,
    assets: CursorAssets,
    cursor: Option<CursorController>,
    /// Loaded textures, in acquisition order.
    textures: Vec<TextureId>,
}

impl FrameLoop {
    /// Frames between two statistics lines at debug level.
    const STATS_INTERVAL: u64 = 600;

    //--- Construction -----------------------------------------------------

    pub fn new(settings: CursorSettings, assets: CursorAssets) -> Self {
        Self {
            state: LoopState::Initializing,
            clock: FrameClock::new(),
            settings,
            assets,
            cursor: None,
            textures: Vec::with_capacity(2),
        }
    }

    //--- Lifecycle --------------------------------------------------------

    /// Loads textures onto `surface` and enters [`LoopState::Running`].
    ///
    /// Asset failures are logged and leave the affected sprite invisible.
    /// Calling this outside `Initializing` does nothing.
    pub fn start<S: RenderSurface + ?Sized>(&mut self, surface: &mut S) {
        if self.state != LoopState::Initializing {
            debug!(target: "core::frame", "start() ignored in state {:?}", self.state);
            return;
        }

        let cursor_texture = load_texture(surface, &self.assets.cursor_image);
        let trail_texture = load_texture(surface, &self.assets.trail_image);
        self.textures.extend(cursor_texture);
        self.textures.extend(trail_texture);

        self.cursor = Some(CursorController::new(
            self.settings,
            cursor_texture,
            trail_texture,
            surface.output_size(),
        ));

        self.state = LoopState::Running;
        info!(
            target: "core::frame",
            "Frame loop running (trail: {} entries every {}ms)",
            self.settings.trail_length,
            self.settings.spawn_interval_ms
        );
    }

    /// Runs one iteration. Returns [`TickControl::Exit`] once quit was seen.
    pub fn iterate<S, I>(&mut self, surface: &mut S, input: &mut I) -> TickControl
    where
        S: RenderSurface + ?Sized,
        I: InputSource + ?Sized,
    {
        match self.state {
            LoopState::Running => {}
            LoopState::ShuttingDown => return TickControl::Exit,
            LoopState::Initializing => {
                trace!(target: "core::frame", "iterate() before start(), skipping");
                return TickControl::Continue;
            }
        }
        let Some(cursor) = self.cursor.as_mut() else {
            return TickControl::Continue;
        };

        //--- 1. Iteration start, measures the previous iteration ----------
        self.clock.begin();

        //--- 2. Advance cursor with the previous iteration's duration -----
        let (x, y) = input.pointer_position();
        if cursor.tick(x, y, self.clock.delta_ms()) {
            trace!(target: "core::frame", "Trail advanced at ({}, {})", x, y);
        }

        //--- 3. Drain events ----------------------------------------------
        let mut quit = false;
        while let Some(event) = input.poll_event() {
            match event {
                InputEvent::Quit => {
                    quit = true;
                    break;
                }
                InputEvent::Resized { width, height } => {
                    debug!(target: "core::frame", "Bounds changed to {}x{}", width, height);
                    cursor.set_bounds(width, height);
                }
                InputEvent::PointerMoved { .. } => {}
            }
        }

        if quit {
            info!(target: "core::frame", "Quit received");
            self.shutdown(surface);
            return TickControl::Exit;
        }

        //--- 4. Render pass -----------------------------------------------
        surface.clear();
        cursor.render(surface);
        surface.present();

        //--- 5. Close the iteration ---------------------------------------
        let work = self.clock.end();
        let frames = self.clock.frame_count();
        if frames % Self::STATS_INTERVAL == 0 {
            debug!(
                target: "core::frame",
                "Frame {}: delta {:.3}ms, render work {:.3}ms",
                frames,
                self.clock.delta_ms(),
                work.as_secs_f64() * 1000.0
            );
        }

        TickControl::Continue
    }

    /// Releases owned textures in reverse acquisition order.
    ///
    /// Idempotent: only the first call touches the surface.
    pub fn shutdown<S: RenderSurface + ?Sized>(&mut self, surface: &mut S) {
        if self.state == LoopState::ShuttingDown {
            return;
        }
        self.state = LoopState::ShuttingDown;

        for texture in self.textures.drain(..).rev() {
            debug!(target: "core::frame", "Releasing texture {:?}", texture);
            surface.destroy_texture(texture);
        }
        info!(target: "core::frame", "Frame loop resources released");
    }

    //--- Queries ----------------------------------------------------------

    pub fn state(&self) -> LoopState {
        self.state
    }

    /// The cursor controller, once started.
    pub fn cursor(&self) -> Option<&CursorController> {
        self.cursor.as_ref()
    }

    pub fn clock(&self) -> &FrameClock {
        &self.clock
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::render::testing::{RecordingSurface, ScriptedInput, SurfaceCall};
    use crate::core::render::Rect;
    use std::path::Path;
    use std::thread;
    use std::time::Duration;

    //--- Test Helpers -----------------------------------------------------

    fn write_png(dir: &Path, name: &str) -> PathBuf {
        let path = dir.join(name);
        image::RgbaImage::from_pixel(2, 2, image::Rgba([255, 255, 255, 255]))
            .save(&path)
            .unwrap();
        path
    }

    fn settings(interval: f64) -> CursorSettings {
        CursorSettings {
            cursor_size: 10,
            trail_size: 4,
            trail_length: 3,
            spawn_interval_ms: interval,
        }
    }

    /// Started loop with both textures loaded (cursor = 0, trail = 1).
    fn started(dir: &Path, interval: f64, surface: &mut RecordingSurface) -> FrameLoop {
        let assets = CursorAssets {
            cursor_image: write_png(dir, "cursor.png"),
            trail_image: write_png(dir, "trail.png"),
        };
        let mut frame_loop = FrameLoop::new(settings(interval), assets);
        frame_loop.start(surface);
        frame_loop
    }

    //=====================================================================
    // Lifecycle
    //=====================================================================

    #[test]
    fn new_loop_is_initializing() {
        let frame_loop = FrameLoop::new(settings(10.0), CursorAssets::default());
        assert_eq!(frame_loop.state(), LoopState::Initializing);
        assert!(frame_loop.cursor().is_none());
    }

    #[test]
    fn iterate_before_start_draws_nothing() {
        let mut surface = RecordingSurface::new(800, 600);
        let mut input = ScriptedInput::at(10, 10);
        let mut frame_loop = FrameLoop::new(settings(10.0), CursorAssets::default());

        assert_eq!(frame_loop.iterate(&mut surface, &mut input), TickControl::Continue);
        assert!(surface.calls.is_empty());
    }

    #[test]
    fn start_loads_textures_and_runs() {
        let dir = tempfile::tempdir().unwrap();
        let mut surface = RecordingSurface::new(800, 600);

        let frame_loop = started(dir.path(), 10.0, &mut surface);

        assert_eq!(frame_loop.state(), LoopState::Running);
        assert_eq!(
            surface.calls,
            vec![
                SurfaceCall::CreateTexture(TextureId(0)),
                SurfaceCall::CreateTexture(TextureId(1)),
            ]
        );
        let cursor = frame_loop.cursor().unwrap();
        assert_eq!(cursor.bounds(), (800, 600));
        assert_eq!(cursor.sprite().texture(), Some(TextureId(0)));
    }

    #[test]
    fn start_twice_loads_once() {
        let dir = tempfile::tempdir().unwrap();
        let mut surface = RecordingSurface::new(800, 600);
        let mut frame_loop = started(dir.path(), 10.0, &mut surface);

        frame_loop.start(&mut surface);

        assert_eq!(surface.calls.len(), 2);
    }

    //=====================================================================
    // Iteration
    //=====================================================================

    #[test]
    fn iteration_is_clear_draws_present() {
        let dir = tempfile::tempdir().unwrap();
        let mut surface = RecordingSurface::new(800, 600);
        let mut frame_loop = started(dir.path(), 1000.0, &mut surface);
        surface.calls.clear();
        let mut input = ScriptedInput::at(100, 100);

        assert_eq!(frame_loop.iterate(&mut surface, &mut input), TickControl::Continue);

        assert_eq!(surface.calls.first(), Some(&SurfaceCall::Clear));
        assert_eq!(surface.calls.last(), Some(&SurfaceCall::Present));
        let draws = surface.draws();
        assert_eq!(draws.len(), 4, "3 trail entries + cursor");
        assert_eq!(draws[3], (TextureId(0), Rect::centered(100, 100, 10)), "Cursor drawn last");
        assert_eq!(frame_loop.clock().frame_count(), 1);
    }

    #[test]
    fn first_iteration_uses_zero_delta() {
        let dir = tempfile::tempdir().unwrap();
        let mut surface = RecordingSurface::new(800, 600);
        let mut frame_loop = started(dir.path(), 1000.0, &mut surface);
        let mut input = ScriptedInput::at(0, 0);

        frame_loop.iterate(&mut surface, &mut input);

        assert_eq!(frame_loop.cursor().unwrap().accumulator_ms(), 0.0);
    }

    #[test]
    fn idle_time_between_iterations_drives_spawning() {
        let dir = tempfile::tempdir().unwrap();
        let mut surface = RecordingSurface::new(800, 600);
        let mut frame_loop = started(dir.path(), 30.0, &mut surface);
        let mut input = ScriptedInput::at(200, 150);

        frame_loop.iterate(&mut surface, &mut input);
        thread::sleep(Duration::from_millis(50));
        frame_loop.iterate(&mut surface, &mut input);

        let cursor = frame_loop.cursor().unwrap();
        assert_eq!(
            cursor.trail().newest().rect,
            Rect::centered(200, 150, 4),
            "50ms between redraws exceeds the 30ms interval"
        );
        assert_eq!(cursor.accumulator_ms(), 0.0, "Accumulator resets after advancing");
    }

    #[test]
    fn idle_time_between_iterations_accumulates() {
        let dir = tempfile::tempdir().unwrap();
        let mut surface = RecordingSurface::new(800, 600);
        let mut frame_loop = started(dir.path(), 10_000.0, &mut surface);
        let mut input = ScriptedInput::at(0, 0);

        frame_loop.iterate(&mut surface, &mut input);
        thread::sleep(Duration::from_millis(20));
        frame_loop.iterate(&mut surface, &mut input);

        assert!(
            frame_loop.cursor().unwrap().accumulator_ms() >= 20.0,
            "Accumulator must include wall time spent outside iterate()"
        );
    }

    #[test]
    fn each_iteration_consumes_previous_iteration_duration() {
        let dir = tempfile::tempdir().unwrap();
        let mut surface = RecordingSurface::new(800, 600);
        let mut frame_loop = started(dir.path(), 10_000.0, &mut surface);
        let mut input = ScriptedInput::at(0, 0);

        //--- Iteration 1 sees zero ----------------------------------------
        frame_loop.iterate(&mut surface, &mut input);
        assert_eq!(frame_loop.cursor().unwrap().accumulator_ms(), 0.0);

        //--- Iteration 2 receives iteration 1's start-to-start duration ---
        thread::sleep(Duration::from_millis(15));
        frame_loop.iterate(&mut surface, &mut input);
        let first_duration = frame_loop.clock().delta_ms();
        let after_second = frame_loop.cursor().unwrap().accumulator_ms();
        assert!(first_duration >= 15.0);
        assert_eq!(after_second, first_duration, "Iteration 2 consumed exactly iteration 1");

        //--- Iteration 3 adds iteration 2's duration ----------------------
        thread::sleep(Duration::from_millis(5));
        frame_loop.iterate(&mut surface, &mut input);
        let second_duration = frame_loop.clock().delta_ms();
        assert!(second_duration >= 5.0);
        assert_eq!(
            frame_loop.cursor().unwrap().accumulator_ms(),
            after_second + second_duration
        );
    }

    #[test]
    fn resize_event_updates_bounds() {
        let dir = tempfile::tempdir().unwrap();
        let mut surface = RecordingSurface::new(800, 600);
        let mut frame_loop = started(dir.path(), 1000.0, &mut surface);
        let mut input = ScriptedInput::at(0, 0);
        input.push(InputEvent::Resized { width: 320, height: 200 });

        frame_loop.iterate(&mut surface, &mut input);

        assert_eq!(frame_loop.cursor().unwrap().bounds(), (320, 200));
    }

    #[test]
    fn trail_follows_pointer_across_iterations() {
        let dir = tempfile::tempdir().unwrap();
        let mut surface = RecordingSurface::new(800, 600);
        let mut frame_loop = started(dir.path(), 0.0, &mut surface);
        let mut input = ScriptedInput::at(0, 0);

        for i in 1..=4 {
            input.pointer = (i * 10, i * 10);
            frame_loop.iterate(&mut surface, &mut input);
        }

        let centers: Vec<(i32, i32)> = frame_loop
            .cursor()
            .unwrap()
            .trail()
            .iter()
            .map(|s| s.rect.center())
            .collect();
        assert_eq!(centers, vec![(20, 20), (30, 30), (40, 40)]);
    }

    //=====================================================================
    // Degraded Assets
    //=====================================================================

    #[test]
    fn missing_cursor_texture_keeps_loop_running() {
        let dir = tempfile::tempdir().unwrap();
        let assets = CursorAssets {
            cursor_image: dir.path().join("missing.png"),
            trail_image: write_png(dir.path(), "trail.png"),
        };
        let mut surface = RecordingSurface::new(800, 600);
        let mut frame_loop = FrameLoop::new(settings(0.0), assets);
        frame_loop.start(&mut surface);
        let mut input = ScriptedInput::at(50, 50);

        for _ in 0..3 {
            assert_eq!(frame_loop.iterate(&mut surface, &mut input), TickControl::Continue);
        }
        assert_eq!(surface.count(SurfaceCall::Present), 3);
        assert!(
            surface.draws().iter().all(|(t, _)| *t == TextureId(0)),
            "Only the trail texture (first successful load) is drawn"
        );

        input.push(InputEvent::Quit);
        assert_eq!(frame_loop.iterate(&mut surface, &mut input), TickControl::Exit);
        assert_eq!(surface.destroyed(), vec![TextureId(0)]);
    }

    #[test]
    fn all_textures_failing_still_presents() {
        let mut surface = RecordingSurface::failing(800, 600);
        let mut frame_loop = FrameLoop::new(settings(10.0), CursorAssets::default());
        frame_loop.start(&mut surface);
        let mut input = ScriptedInput::at(1, 1);

        frame_loop.iterate(&mut surface, &mut input);

        assert_eq!(surface.calls, vec![SurfaceCall::Clear, SurfaceCall::Present]);
    }

    //=====================================================================
    // Shutdown
    //=====================================================================

    #[test]
    fn quit_tears_down_in_reverse_order_without_drawing() {
        let dir = tempfile::tempdir().unwrap();
        let mut surface = RecordingSurface::new(800, 600);
        let mut frame_loop = started(dir.path(), 10.0, &mut surface);
        surface.calls.clear();
        let mut input = ScriptedInput::at(10, 10);
        input.push(InputEvent::PointerMoved { x: 1.0, y: 1.0 });
        input.push(InputEvent::Quit);

        assert_eq!(frame_loop.iterate(&mut surface, &mut input), TickControl::Exit);

        assert_eq!(
            surface.calls,
            vec![
                SurfaceCall::DestroyTexture(TextureId(1)),
                SurfaceCall::DestroyTexture(TextureId(0)),
            ],
            "Teardown only, no clear/draw/present after quit"
        );
        assert_eq!(frame_loop.state(), LoopState::ShuttingDown);
    }

    #[test]
    fn teardown_happens_exactly_once() {
        let dir = tempfile::tempdir().unwrap();
        let mut surface = RecordingSurface::new(800, 600);
        let mut frame_loop = started(dir.path(), 10.0, &mut surface);
        let mut input = ScriptedInput::at(10, 10);
        input.push(InputEvent::Quit);

        frame_loop.iterate(&mut surface, &mut input);
        frame_loop.shutdown(&mut surface);
        input.push(InputEvent::Quit);
        let after = frame_loop.iterate(&mut surface, &mut input);

        assert_eq!(after, TickControl::Exit);
        assert_eq!(surface.destroyed().len(), 2, "Each texture released exactly once");
        assert_eq!(surface.count(SurfaceCall::Clear), 0);
    }
}
