//=========================================================================
// Prelude
//=========================================================================
//
// Convenience module that re-exports commonly used types and traits.
//
// Usage:
//   use catch_the_objects::prelude::*;
//
//=========================================================================

//=== Public API ==========================================================

// Runtime
pub use crate::engine::{Engine, EngineBuilder, EngineError};

// Game core
pub use crate::core::game::{
    ConfigError, GameConfig, GameState, Position, Snapshot, SpawnBand, SpawnPolicy, TickOutcome,
};

// Input
pub use crate::core::input::{GameCommand, InputContext, KeyCode, MouseButton};

// Collaborators
pub use crate::core::audio::{AssetAudio, AudioCue, AudioSink, SilentAudio};
pub use crate::core::platform_bridge::Presenter;
