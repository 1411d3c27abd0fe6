//=========================================================================
// Core Systems Orchestrator
//
// Central coordinator for the game on the logic (non-platform) thread.
//
// Responsibilities:
// - Own the GameState exclusively; nothing else ever touches it
// - Receive platform events via crossbeam channel
// - Drive the game with a fixed-period tick
// - Serialize ticks and input strictly in arrival order
// - Publish a snapshot after every event that changed the screen
// - Fire audio cues (background loop at start, catch sound per catch)
//
// Notes:
// Ticks and platform events are multiplexed with `select!`, so a drag
// that arrives before a tick is applied before that tick is evaluated.
//
//=========================================================================

//=== Module Declarations =================================================

pub mod audio;
pub mod game;
pub mod input;
pub mod platform_bridge;

//=== Standard Library Imports ============================================

use std::io;
use std::thread;
use std::time::Duration;

//=== External Crates =====================================================

use crossbeam_channel::{select, tick, Receiver};
use log::{debug, info, trace};

//=== Internal Modules ====================================================

use audio::{AudioCue, AudioSink};
use game::{GameState, Snapshot, TickOutcome};
use input::{GameCommand, InputContext, InputEvent, InputSystem};
use platform_bridge::{PlatformEvent, Presenter};

//=== TickControl =========================================================
//
// Control flow for the core loop: keep going or shut down.
//
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TickControl {
    Continue,
    Exit,
}

//=== CoreSystemsOrchestrator =============================================
//
// Owns the game and its collaborators on the logic thread.
//
pub(crate) struct CoreSystemsOrchestrator {
    state: GameState,
    input: InputSystem,
    audio: Box<dyn AudioSink>,
    presenter: Box<dyn Presenter>,
    last_presented: Option<Snapshot>,
}

impl CoreSystemsOrchestrator {
    //--- Construction -----------------------------------------------------

    pub(crate) fn new(
        state: GameState,
        audio: Box<dyn AudioSink>,
        presenter: Box<dyn Presenter>,
    ) -> Self {
        let mut input = InputSystem::new();
        input.set_context(InputContext::from_game_over(state.is_game_over()));

        Self {
            state,
            input,
            audio,
            presenter,
            last_presented: None,
        }
    }

    //--- spawn_core_thread() ---------------------------------------------
    //
    // Moves the orchestrator onto a named logic thread.
    //
    // Each loop iteration:
    //  1. Waits for either a platform event or the next tick
    //  2. Applies it to the game
    //  3. Presents the snapshot if it changed
    //  4. Exits on WindowClosed or channel disconnect
    //
    pub(crate) fn spawn_core_thread(
        self,
        receiver: Receiver<PlatformEvent>,
        tick_interval: Duration,
    ) -> io::Result<thread::JoinHandle<()>> {
        thread::Builder::new()
            .name("core".into())
            .spawn(move || self.run_loop(receiver, tick_interval))
    }

    fn run_loop(mut self, receiver: Receiver<PlatformEvent>, tick_interval: Duration) {
        let ticker = tick(tick_interval);
        info!(target: "core", "Core loop started (tick every {:?})", tick_interval);

        self.audio.play(AudioCue::BackgroundLoop);
        self.publish();

        loop {
            let control = select! {
                recv(receiver) -> msg => match msg {
                    Ok(event) => self.handle_platform_event(event),
                    Err(_) => {
                        debug!(target: "core", "Platform channel disconnected");
                        TickControl::Exit
                    }
                },
                recv(ticker) -> _ => {
                    self.handle_tick();
                    TickControl::Continue
                }
            };

            if control == TickControl::Exit {
                info!(target: "core", "Core thread exiting (final score {})", self.state.score());
                break;
            }

            self.publish();
        }
    }

    //--- Event Handling ---------------------------------------------------

    /// Applies one platform event to the game.
    pub(crate) fn handle_platform_event(&mut self, event: PlatformEvent) -> TickControl {
        match event {
            PlatformEvent::Inputs(events) => {
                trace!(target: "core", "Processing {} input events", events.len());
                // Context is re-synced after every event
                for event in &events {
                    self.handle_input(event);
                }
                TickControl::Continue
            }

            PlatformEvent::Resized { width, height } => {
                if self.state.set_screen_size(width, height) {
                    debug!(target: "core", "Screen resized to {}x{}", width, height);
                }
                TickControl::Continue
            }

            PlatformEvent::WindowClosed => TickControl::Exit,
        }
    }

    /// Advances the game one tick and fires any resulting side effects.
    pub(crate) fn handle_tick(&mut self) {
        match self.state.on_tick() {
            TickOutcome::Caught => {
                info!(target: "game", "Caught! Score: {}", self.state.score());
                self.audio.play(AudioCue::Catch);
            }
            TickOutcome::Missed => {
                info!(target: "game", "Missed. Game over with score {}", self.state.score());
            }
            TickOutcome::Falling => {}
        }
        self.sync_context();
    }

    //--- Internal Helpers -------------------------------------------------

    fn handle_input(&mut self, event: &InputEvent) {
        if let Some(command) = self.input.handle_event(event) {
            self.apply(command);
        }
    }

    fn apply(&mut self, command: GameCommand) {
        match command {
            GameCommand::Drag(x) => self.state.on_drag(x),
            GameCommand::Restart => {
                info!(target: "game", "Restarting");
                self.state.on_restart();
            }
        }
        self.sync_context();
    }

    fn sync_context(&mut self) {
        let context = InputContext::from_game_over(self.state.is_game_over());
        if context != self.input.context() {
            self.input.set_context(context);
        }
    }

    fn publish(&mut self) {
        let snapshot = self.state.snapshot();
        if self.last_presented != Some(snapshot) {
            self.presenter.present(&snapshot);
            self.last_presented = Some(snapshot);
        }
    }

    #[cfg(test)]
    pub(crate) fn state(&self) -> &GameState {
        &self.state
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
