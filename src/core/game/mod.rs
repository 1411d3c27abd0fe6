//=========================================================================
// Game Core
//=========================================================================
//
// The catch game's state machine.
//
// Architecture:
//   tick / drag / restart ──> GameState ──> Snapshot (read-only)
//                                 │
//                                 └──> SpawnPolicy (respawn x)
//
//=========================================================================

//=== Module Declarations =================================================

mod config;
mod snapshot;
mod spawn;
mod state;

//=== Public API ==========================================================

pub use config::{ConfigError, GameConfig, SpawnBand};
pub use snapshot::{Position, Snapshot, TickOutcome};
pub use spawn::{RandomSpawn, SpawnPolicy};
pub use state::GameState;

#[cfg(test)]
pub(crate) use spawn::ScriptedSpawn;
