//=========================================================================
// Platform Subsystem
//
// Bridges Winit (OS-level events) with the engine's core thread.
//
// Architecture:
// ```text
//  Main Thread:                     Logic Thread:
//  ┌──────────────────────────┐    ┌──────────────────────┐
//  │  Winit Event Loop        │    │  CoreSystems         │
//  │   ↓                      │    │   Orchestrator       │
//  │  InputProcessor          │    │                      │
//  │   └─ physical → logical  │    │  InputSystem         │
//  │   ↓                      │    │   ↓                  │
//  │  InputBuffer             │    │  GameState           │
//  │   └─ ordered Vec<>       │    │   ↓                  │
//  │                          │    │  Snapshot            │
//  │   ↓                      │    └──────────────────────┘
//  │  RedrawRequested (flush) │         ↑          │
//  │   ↓                      │         │          │
//  │  crossbeam Sender ───────┼─────────┘          │
//  │                          │                    │
//  │  user_event(Snapshot) ◄──┼── EventLoopProxy ──┘
//  └──────────────────────────┘
// ```
//
// Key Design Decisions:
// - **RedrawRequested = frame boundary**: input is batched per frame and
//   sent atomically, preserving order within the frame
// - **Snapshots come back as user events**: the window title is the
//   presentation surface (positions, score, game-over overlay)
// - **Graceful channel disconnect**: if the core thread dies, the platform
//   logs a warning and keeps running so the window can still be closed
// - **Main thread requirement**: Winit mandates the main thread on
//   macOS/iOS, so this runs on the thread that called `Engine::run()`
//
//=========================================================================

//=== Submodules ==========================================================

mod input_buffer;
mod input_processor;

//=== External Crates =====================================================

use crossbeam_channel::Sender;
use log::*;
use winit::{
    application::ApplicationHandler,
    dpi::LogicalSize,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, EventLoop, EventLoopProxy},
    window::{Window, WindowAttributes, WindowId},
};

//=== Internal Imports ====================================================

use crate::core::game::Snapshot;
use crate::core::platform_bridge::{PlatformError, PlatformEvent, Presenter};
use input_buffer::InputBuffer;
use input_processor::InputProcessor;

//=== Constants ===========================================================

const WINDOW_TITLE: &str = "Catch The Objects";

//=== ProxyPresenter ======================================================

/// Forwards snapshots from the logic thread into the Winit event loop.
pub(crate) struct ProxyPresenter {
    proxy: EventLoopProxy<Snapshot>,
}

impl ProxyPresenter {
    pub(crate) fn new(proxy: EventLoopProxy<Snapshot>) -> Self {
        Self { proxy }
    }
}

impl Presenter for ProxyPresenter {
    fn present(&mut self, snapshot: &Snapshot) {
        if self.proxy.send_event(*snapshot).is_err() {
            debug!(target: "platform", "Event loop closed, dropping snapshot");
        }
    }
}

//=== Platform ============================================================

/// Window manager and input event aggregator.
///
/// Runs on the main thread and talks to the core thread only through the
/// crossbeam sender (input out) and user events (snapshots in).
///
/// # Lifecycle
///
/// 1. `Platform::create_event_loop()` - builds the loop so a proxy can be
///    handed to the core thread before anything runs
/// 2. `Platform::new(sender, size)` - initializes subsystems
/// 3. `platform.run(event_loop)` - blocks until the window closes
/// 4. Close → sends `WindowClosed` → loop exits
pub(crate) struct Platform {
    /// OS window handle (None until `resumed()` is called).
    window: Option<Window>,

    /// Buffers ordered input until the frame boundary.
    buffer: InputBuffer,

    /// Channel to the core thread.
    event_sender: Sender<PlatformEvent>,

    /// Converts Winit events to engine InputEvents.
    input_processor: InputProcessor,

    /// Requested logical window size.
    initial_size: LogicalSize<f64>,

    /// Most recent snapshot received from the core thread.
    last_snapshot: Option<Snapshot>,
}

impl Platform {
    //--- Construction -----------------------------------------------------

    /// Creates the event loop that will carry snapshots back to this thread.
    ///
    /// # Errors
    ///
    /// [`PlatformError::EventLoopCreation`] if the OS refuses (or if called
    /// twice in one process).
    pub(crate) fn create_event_loop() -> Result<EventLoop<Snapshot>, PlatformError> {
        EventLoop::<Snapshot>::with_user_event()
            .build()
            .map_err(|e| PlatformError::EventLoopCreation(Box::new(e)))
    }

    /// Does not create the window yet; that happens lazily in `resumed()`.
    pub(crate) fn new(event_sender: Sender<PlatformEvent>, width: f32, height: f32) -> Self {
        info!(target: "platform", "Platform subsystem initialized");
        Self {
            window: None,
            buffer: InputBuffer::new(),
            event_sender,
            input_processor: InputProcessor::new(),
            initial_size: LogicalSize::new(f64::from(width), f64::from(height)),
            last_snapshot: None,
        }
    }

    //--- Execution --------------------------------------------------------

    /// Runs the event loop until the window is closed.
    ///
    /// # Errors
    ///
    /// [`PlatformError::EventLoopExecution`] if Winit fails while running.
    pub(crate) fn run(mut self, event_loop: EventLoop<Snapshot>) -> Result<(), PlatformError> {
        debug!(target: "platform", "Starting Winit event loop");
        event_loop
            .run_app(&mut self)
            .map_err(|e| PlatformError::EventLoopExecution(Box::new(e)))
    }

    //--- Internal Helpers -------------------------------------------------

    /// Sends buffered input to the core thread. Empty frames are skipped.
    ///
    /// If the channel is disconnected the events are dropped with a warning
    /// so the window stays closable.
    fn flush_input_buffer(&mut self) {
        let Some(events) = self.buffer.drain() else {
            return;
        };

        let count = events.len();
        trace!(target: "platform::input", "Flushing {} input events", count);

        if self.event_sender.send(PlatformEvent::Inputs(events)).is_err() {
            warn!(target: "platform::input", "Channel disconnected, dropping {} events", count);
        }
    }

    /// Forwards a platform event that must not overtake buffered input.
    fn send_ordered(&mut self, event: PlatformEvent) {
        self.flush_input_buffer();
        if self.event_sender.send(event).is_err() {
            warn!(target: "platform", "Channel disconnected, core thread is gone");
        }
    }

    /// Applies a snapshot to the presentation surface.
    fn present(&mut self, snapshot: Snapshot) {
        let was_over = self.last_snapshot.map(|s| s.game_over).unwrap_or(false);
        if snapshot.game_over && !was_over {
            info!(target: "platform", "Game Over! Final Score: {}", snapshot.score);
        } else if !snapshot.game_over && was_over {
            info!(target: "platform", "Play again");
        }

        if let Some(window) = &self.window {
            window.set_title(&title_for(&snapshot));
            window.request_redraw();
        }
        self.last_snapshot = Some(snapshot);
    }

    //--- Test Accessors ---------------------------------------------------

    #[cfg(test)]
    pub(crate) fn window(&self) -> Option<&Window> {
        self.window.as_ref()
    }
}

/// Window title standing in for the playfield, the score label and the
/// game-over overlay.
fn title_for(snapshot: &Snapshot) -> String {
    let field = format!(
        "object ({:.0}, {:.0}) | basket {:.0}",
        snapshot.object.x, snapshot.object.y, snapshot.basket_x
    );
    if snapshot.game_over {
        format!(
            "{} | Game Over! Final Score: {} | press R or click to play again | {}",
            WINDOW_TITLE, snapshot.score, field
        )
    } else {
        format!("{} | Score: {} | {}", WINDOW_TITLE, snapshot.score, field)
    }
}

//=== Winit Integration ===================================================

impl ApplicationHandler<Snapshot> for Platform {
    /// Creates the window on startup (or on mobile resume if it is gone).
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            debug!(target: "platform", "Window already exists (mobile resume?)");
            return;
        }

        let attrs = WindowAttributes::default()
            .with_title(WINDOW_TITLE)
            .with_inner_size(self.initial_size);

        match event_loop.create_window(attrs) {
            Ok(window) => {
                let scale_factor = window.scale_factor();
                let logical = window.inner_size().to_logical::<f64>(scale_factor);
                info!(
                    target: "platform",
                    "Window created: {}x{} @ {}x DPI",
                    logical.width,
                    logical.height,
                    scale_factor
                );
                self.input_processor.set_scale_factor(scale_factor);
                if let Some(snapshot) = &self.last_snapshot {
                    window.set_title(&title_for(snapshot));
                }
                window.request_redraw();
                self.window = Some(window);
                self.send_ordered(PlatformEvent::Resized {
                    width: logical.width as f32,
                    height: logical.height as f32,
                });
            }
            Err(e) => {
                error!(target: "platform", "Window creation failed: {}", e);
                let _ = self.event_sender.send(PlatformEvent::WindowClosed);
                event_loop.exit();
            }
        }
    }

    /// Receives snapshots from the core thread.
    fn user_event(&mut self, _event_loop: &ActiveEventLoop, snapshot: Snapshot) {
        self.present(snapshot);
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                info!(target: "platform", "Window close requested");
                self.send_ordered(PlatformEvent::WindowClosed);
                event_loop.exit();
            }

            WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
                debug!(target: "platform", "Scale factor changed: {}", scale_factor);
                self.input_processor.set_scale_factor(scale_factor);
            }

            WindowEvent::Resized(size) => {
                let logical = size.to_logical::<f64>(self.input_processor.scale_factor());
                self.send_ordered(PlatformEvent::Resized {
                    width: logical.width as f32,
                    height: logical.height as f32,
                });
            }

            WindowEvent::CursorMoved { position, .. } => {
                let event = self.input_processor.process_mouse_move(position);
                self.buffer.push(event);
            }

            WindowEvent::MouseInput { state, button, .. } => {
                let event = self.input_processor.process_mouse_button(button, state);
                self.buffer.push(event);
            }

            WindowEvent::Touch(touch) => {
                let event = self.input_processor.process_touch(&touch);
                self.buffer.push(event);
            }

            WindowEvent::KeyboardInput { event: key_event, .. } => {
                if let Some(event) = self.input_processor.process_key_event(&key_event) {
                    self.buffer.push(event);
                } else {
                    trace!(target: "platform::input", "Unmapped or repeated key ignored");
                }
            }

            WindowEvent::RedrawRequested => {
                // Frame boundary: flush all buffered input
                self.flush_input_buffer();
            }

            _ => {}
        }

        if !self.buffer.is_empty() {
            if let Some(window) = &self.window {
                window.request_redraw();
            }
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
