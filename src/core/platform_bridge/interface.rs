//=========================================================================
// Platform Bridge Interface
//=========================================================================
//
// Platform-to-core interface types (events, presentation, errors).
//
// Defines the contract for communication between platform and core threads.
//
//=========================================================================

//=== External Dependencies ===============================================

use thiserror::Error;

//=== Internal Dependencies ===============================================

use crate::core::game::Snapshot;
use crate::core::input::InputEvent;

//=== PlatformEvent =======================================================

/// Events sent from platform to core over the crossbeam channel.
#[derive(Debug, Clone)]
pub(crate) enum PlatformEvent {
    /// One frame of input, in arrival order.
    Inputs(Vec<InputEvent>),

    /// Drawable area changed (logical pixels).
    Resized { width: f32, height: f32 },

    /// Window close requested.
    WindowClosed,
}

//=== Presenter ===========================================================

/// Consumer of snapshots on the far side of the logic thread.
///
/// Called after every event that changed what is on screen.
pub trait Presenter: Send {
    fn present(&mut self, snapshot: &Snapshot);
}

//=== PlatformError =======================================================

type BoxedError = Box<dyn std::error::Error + Send + Sync>;

/// Platform initialization and runtime errors.
#[derive(Debug, Error)]
pub enum PlatformError {
    /// Event loop creation failed (OS-level issue).
    #[error("event loop creation failed: {0}")]
    EventLoopCreation(#[source] BoxedError),

    /// Event loop execution error.
    #[error("event loop error: {0}")]
    EventLoopExecution(#[source] BoxedError),
}
