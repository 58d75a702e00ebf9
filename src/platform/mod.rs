//=========================================================================
// Platform Subsystem
//
// Bridges Winit (OS-level events) with the frame loop via a channel and
// owns the window and its GPU surface.
//
// Architecture:
// ```text
//  Main Thread (single):
//  ┌────────────────────────────────────────────────────────────┐
//  │  Winit Event Loop                                          │
//  │   ↓                                                        │
//  │  InputProcessor  (Winit → InputEvent)                      │
//  │   ↓                                                        │
//  │  InputBuffer                                               │
//  │   ├─ discrete: Vec<>      (Quit)                           │
//  │   └─ continuous: Set<>    (PointerMoved, Resized)          │
//  │   ↓                                                        │
//  │  RedrawRequested ── flush ──► Channel ──► EventCollector   │
//  │   ↓                                           ↓            │
//  │  FrameLoop::iterate(GpuSurface, EventCollector)            │
//  │   ↓                                                        │
//  │  Continue → request_redraw()   Exit → teardown, exit()     │
//  └────────────────────────────────────────────────────────────┘
// ```
//
// Frame boundary: RedrawRequested
//   → All buffered input sent as one batch
//   → The frame loop runs exactly one iteration
//   → Empty buffers are NOT sent
//
// Teardown order: textures (frame loop) → GpuSurface → Window.
//
//=========================================================================

//=== Submodules ==========================================================

mod gpu_surface;
mod input_buffer;
mod input_processor;

//=== External Crates =====================================================

use std::sync::Arc;

use crossbeam_channel::{bounded, Sender, TrySendError};
use log::*;
use winit::{
    application::ApplicationHandler,
    dpi::PhysicalSize,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, EventLoop},
    window::{Window, WindowAttributes, WindowId},
};

//=== Internal Imports ====================================================

use crate::config::Config;
use crate::core::frame::{FrameLoop, TickControl};
use crate::core::input::InputEvent;
use crate::core::platform_bridge::{EventCollector, InitError, PlatformEvent};
use gpu_surface::GpuSurface;
use input_buffer::InputBuffer;
use input_processor::InputProcessor;

//=== Platform ============================================================

/// Window owner, input aggregator and frame driver.
///
/// Runs on the main thread (Winit requirement on macOS/iOS). The frame
/// loop is driven from `RedrawRequested`, so rendering paces itself on
/// the surface's present mode.
///
/// # Lifecycle
///
/// 1. **Construction**: `Platform::new(config, capacity)`
/// 2. **Execution**: `platform.run()` - blocks in the event loop
/// 3. **Startup**: `resumed()` creates window, surface, textures
/// 4. **Shutdown**: Quit reaches the frame loop → teardown → `exit()`
pub(crate) struct Platform {
    config: Config,

    /// Renderer, dropped before the window it presents to.
    surface: Option<GpuSurface>,

    /// OS window handle (None until `resumed()` called).
    window: Option<Arc<Window>>,

    frame_loop: FrameLoop,

    /// Buffers discrete/continuous input until frame boundary.
    buffer: InputBuffer,

    /// Channel into the frame loop's input queue.
    event_sender: Sender<PlatformEvent>,

    /// Frame-loop side of the channel.
    collector: EventCollector,

    /// Converts Winit events to engine InputEvents.
    input_processor: InputProcessor,

    /// First fatal startup error, reported by `run()`.
    fatal: Option<InitError>,
}

impl Platform {
    //--- Construction -----------------------------------------------------

    /// Creates the platform. The window is created lazily in `resumed()`.
    pub fn new(config: Config, channel_capacity: usize) -> Self {
        let (event_sender, receiver) = bounded(channel_capacity);
        let frame_loop = FrameLoop::new(config.cursor_settings(), config.cursor_assets());

        info!(target: "platform", "Platform subsystem initialized (channel: {})", channel_capacity);
        Self {
            config,
            surface: None,
            window: None,
            frame_loop,
            buffer: InputBuffer::new(),
            event_sender,
            collector: EventCollector::new(receiver),
            input_processor: InputProcessor::new(),
            fatal: None,
        }
    }

    //--- Execution --------------------------------------------------------

    /// Runs the event loop until the frame loop exits or startup fails.
    pub fn run(mut self) -> Result<(), InitError> {
        debug!(target: "platform", "Starting Winit event loop");

        let event_loop =
            EventLoop::new().map_err(|e| InitError::EventLoopCreation(e.to_string()))?;

        event_loop
            .run_app(&mut self)
            .map_err(|e| InitError::EventLoopExecution(e.to_string()))?;

        self.teardown();

        match self.fatal.take() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }

    //--- Internal Helpers -------------------------------------------------

    /// Window title and size from the config.
    ///
    /// The size is physical so the window, the pointer samples and the
    /// sprite sizes all share one pixel unit.
    fn window_attributes(config: &Config) -> WindowAttributes {
        WindowAttributes::default()
            .with_title(config.window_title.clone())
            .with_inner_size(PhysicalSize::new(config.window_width, config.window_height))
    }

    /// Creates window and renderer, then loads the frame loop's textures.
    fn initialize(&mut self, event_loop: &ActiveEventLoop) -> Result<(), InitError> {
        let window = event_loop
            .create_window(Self::window_attributes(&self.config))
            .map(Arc::new)
            .map_err(|e| InitError::WindowCreation(e.to_string()))?;

        window.set_cursor_visible(false);
        info!(
            target: "platform",
            "Window created: {}x{} @ {}x DPI",
            window.inner_size().width,
            window.inner_size().height,
            window.scale_factor()
        );

        let mut surface = GpuSurface::new(Arc::clone(&window), self.config.vsync)?;
        self.frame_loop.start(&mut surface);

        window.request_redraw();
        self.surface = Some(surface);
        self.window = Some(window);
        Ok(())
    }

    /// Flushes buffered input events into the frame loop's queue.
    ///
    /// A full channel puts the batch back into the buffer for the next
    /// frame boundary. A disconnected channel drops it with a warning.
    fn flush_input_buffer(&mut self) {
        if let Some((discrete, continuous)) = self.buffer.drain() {
            let discrete_count = discrete.len();
            let continuous_count = continuous.len();

            trace!(
                target: "platform::input",
                "Flushing {} discrete + {} continuous events",
                discrete_count,
                continuous_count
            );

            match self
                .event_sender
                .try_send(PlatformEvent::Inputs { discrete, continuous })
            {
                Ok(()) => {}
                Err(TrySendError::Full(batch)) => {
                    warn!(
                        target: "platform::input",
                        "Input queue full, deferring {} discrete + {} continuous events",
                        discrete_count,
                        continuous_count
                    );
                    if let PlatformEvent::Inputs { discrete, continuous } = batch {
                        self.buffer.restore(discrete, continuous);
                    }
                }
                Err(TrySendError::Disconnected(_)) => warn!(
                    target: "platform::input",
                    "Channel disconnected, dropping {} events",
                    discrete_count + continuous_count
                ),
            }
        }
    }

    /// Forwards a close request ahead of any further input.
    fn send_window_closed(&mut self) {
        self.flush_input_buffer();
        if self.event_sender.try_send(PlatformEvent::WindowClosed).is_err() {
            // Retried as a discrete Quit on the next flush.
            self.buffer.push_discrete(InputEvent::Quit);
        }
    }

    /// Releases frame loop resources, then the renderer, then the window.
    fn teardown(&mut self) {
        if let Some(surface) = self.surface.as_mut() {
            self.frame_loop.shutdown(surface);
        }
        if self.surface.take().is_some() {
            debug!(target: "platform", "Renderer released");
        }
        if self.window.take().is_some() {
            debug!(target: "platform", "Window released");
        }
    }

    //--- Test Accessors ---------------------------------------------------

    #[cfg(test)]
    pub(crate) fn window(&self) -> Option<&Window> {
        self.window.as_deref()
    }
}

//=== Winit Integration ===================================================

impl ApplicationHandler for Platform {
    /// Called when app becomes active (startup or mobile resume).
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            debug!(target: "platform", "Window already exists (mobile resume?)");
            return;
        }

        if let Err(e) = self.initialize(event_loop) {
            error!(target: "platform", "Startup failed: {}", e);
            self.fatal = Some(e);
            event_loop.exit();
        }
    }

    /// Handles per-window events.
    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        match &event {
            WindowEvent::CloseRequested => {
                info!(target: "platform", "Window close requested");
                self.send_window_closed();
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }

            WindowEvent::CursorMoved { position, .. } => {
                let event = self.input_processor.process_pointer_move(*position);
                self.buffer.push_continuous(event);
            }

            WindowEvent::Resized(size) => {
                debug!(target: "platform", "Window resized to {}x{}", size.width, size.height);
                if let Some(surface) = self.surface.as_mut() {
                    surface.resize(*size);
                }
                if size.width > 0 && size.height > 0 {
                    self.buffer
                        .push_continuous(self.input_processor.process_resize(*size));
                }
            }

            WindowEvent::KeyboardInput { event: key_event, .. } => {
                if let Some(event) = self.input_processor.process_key_event(key_event) {
                    self.buffer.push_discrete(event);
                } else {
                    trace!(target: "platform::input", "Unmapped key ignored");
                }
            }

            WindowEvent::RedrawRequested => {
                // Frame boundary: flush all buffered input
                self.flush_input_buffer();

                let Some(surface) = self.surface.as_mut() else {
                    return;
                };

                match self.frame_loop.iterate(surface, &mut self.collector) {
                    TickControl::Continue => {
                        if let Some(window) = &self.window {
                            window.request_redraw();
                        }
                    }
                    TickControl::Exit => {
                        self.teardown();
                        event_loop.exit();
                    }
                }
            }

            _ => {}
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::input::InputSource;
    use crate::core::LoopState;
    use winit::dpi::Size;

    fn platform(capacity: usize) -> Platform {
        Platform::new(Config::default(), capacity)
    }

    //=====================================================================
    // Platform Tests
    //=====================================================================

    #[test]
    fn platform_creation() {
        let platform = platform(16);
        assert!(platform.window().is_none(), "Window should be created lazily");
        assert!(platform.surface.is_none());
        assert_eq!(platform.frame_loop.state(), LoopState::Initializing);
    }

    #[test]
    fn window_size_is_in_physical_pixels() {
        let config = Config {
            window_width: 1024,
            window_height: 768,
            window_title: "Trails".to_string(),
            ..Config::default()
        };

        let attrs = Platform::window_attributes(&config);

        assert_eq!(
            attrs.inner_size,
            Some(Size::Physical(PhysicalSize::new(1024, 768))),
            "Window size must use the same unit as cursor and trail sizes"
        );
        assert_eq!(attrs.title, "Trails");
    }

    #[test]
    fn flush_empty_buffer_is_noop() {
        let mut platform = platform(16);

        platform.flush_input_buffer();

        assert!(platform.collector.poll_event().is_none(), "No events for empty buffer");
    }

    #[test]
    fn flush_delivers_pointer_and_events_to_collector() {
        let mut platform = platform(16);
        platform.buffer.push_continuous(InputEvent::PointerMoved { x: 40.0, y: 30.0 });
        platform.buffer.push_discrete(InputEvent::Quit);

        platform.flush_input_buffer();

        assert_eq!(platform.collector.pointer_position(), (40, 30));
        assert_eq!(platform.collector.poll_event(), Some(InputEvent::Quit));
        assert!(platform.collector.poll_event().is_none());
    }

    #[test]
    fn multiple_flushes_clear_buffer() {
        let mut platform = platform(16);
        platform.buffer.push_discrete(InputEvent::Quit);

        platform.flush_input_buffer();
        platform.flush_input_buffer();

        assert!(platform.collector.poll_event().is_some(), "First flush should send");
        assert!(platform.collector.poll_event().is_none(), "Second flush should not send");
    }

    #[test]
    fn flush_into_full_channel_defers_batch() {
        let mut platform = platform(1);
        platform.buffer.push_continuous(InputEvent::PointerMoved { x: 1.0, y: 1.0 });
        platform.flush_input_buffer();

        platform.buffer.push_discrete(InputEvent::Quit);
        platform.flush_input_buffer();

        assert_eq!(platform.buffer.len(), 1, "Deferred Quit waits for the next flush");
        assert_eq!(platform.collector.pointer_position(), (1, 1));
        assert!(platform.collector.poll_event().is_none());

        platform.flush_input_buffer();

        assert!(platform.buffer.is_empty());
        assert_eq!(
            platform.collector.poll_event(),
            Some(InputEvent::Quit),
            "Escape pressed while the queue was full still quits"
        );
    }

    #[test]
    fn deferred_pointer_is_superseded_by_newer_motion() {
        let mut platform = platform(1);
        platform.buffer.push_discrete(InputEvent::Quit);
        platform.flush_input_buffer();

        platform.buffer.push_continuous(InputEvent::PointerMoved { x: 5.0, y: 5.0 });
        platform.flush_input_buffer();
        platform.buffer.push_continuous(InputEvent::PointerMoved { x: 9.0, y: 8.0 });

        assert_eq!(platform.collector.poll_event(), Some(InputEvent::Quit));
        platform.flush_input_buffer();
        assert_eq!(platform.collector.pointer_position(), (9, 8));
    }

    #[test]
    fn window_closed_becomes_quit() {
        let mut platform = platform(16);

        platform.send_window_closed();

        assert_eq!(platform.collector.poll_event(), Some(InputEvent::Quit));
    }

    #[test]
    fn window_closed_on_full_channel_falls_back_to_buffer() {
        let mut platform = platform(1);
        platform.buffer.push_continuous(InputEvent::PointerMoved { x: 2.0, y: 2.0 });

        platform.send_window_closed();

        assert_eq!(platform.buffer.len(), 1, "Quit buffered for the next frame");
    }

    #[test]
    fn teardown_without_window_is_noop() {
        let mut platform = platform(16);
        platform.teardown();
        assert!(platform.window().is_none());
    }
}
