//=========================================================================
// Catch The Objects: Library Root
//
// A single-screen arcade game: an object falls from the top of the
// screen on a fixed tick, the player drags a basket to catch it, and
// every catch scores a point. Letting one fall past the bottom ends
// the game until the player restarts.
//
// Responsibilities:
// - Expose the game core (`core::game::GameState`) for embedding/testing
// - Expose the runtime facade (`EngineBuilder` / `Engine`)
// - Keep the winit platform layer private
//
// Typical usage:
// ```no_run
// use catch_the_objects::EngineBuilder;
//
// fn main() -> Result<(), catch_the_objects::EngineError> {
//     EngineBuilder::new().build()?.run()
// }
// ```
//
//=========================================================================

//--- Public Modules ------------------------------------------------------
//
// `core` holds the game state machine, input translation, audio cues and
// the platform contract. It is usable without a window.
//
pub mod core;
pub mod prelude;

//--- Internal Modules ----------------------------------------------------
//
// `platform` is the winit window/event loop and is not part of the API.
// `engine` wires core and platform together.
//
mod engine;
mod platform;

//--- Public Exports ------------------------------------------------------

pub use engine::{Engine, EngineBuilder, EngineError};
