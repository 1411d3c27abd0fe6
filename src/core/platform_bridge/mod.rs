//=========================================================================
// Platform Bridge
//=========================================================================
//
// Bridges the platform layer (winit) with the core logic thread.
//
// This module defines the contract between platform implementations and
// core logic so the backend can be swapped without touching the game.
//
// Components:
// - `interface`: Event types, presenter trait and error definitions
//
//=========================================================================

//=== Module Declarations =================================================

pub(crate) mod interface;

//=== Internal API ========================================================

pub(crate) use interface::PlatformEvent;
pub use interface::{PlatformError, Presenter};
