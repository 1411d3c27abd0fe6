//=========================================================================
// Spawn Policy
//=========================================================================
//
// Chooses the x coordinate of each new falling object.
//
// GameState clamps whatever a policy returns into the spawn band, so a
// policy only decides *where* inside the band the object appears.
//
//=========================================================================

//=== External Dependencies ===============================================

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

//=== Internal Dependencies ===============================================

use super::config::SpawnBand;

//=== SpawnPolicy =========================================================

/// Source of spawn x coordinates.
///
/// `Send` so the owning [`GameState`](super::GameState) can move onto the
/// logic thread.
pub trait SpawnPolicy: Send {
    /// Returns the x for the next object, ideally inside `band`.
    fn next_x(&mut self, band: SpawnBand) -> f32;
}

//=== RandomSpawn =========================================================

/// Uniformly random spawn x within the band.
pub struct RandomSpawn {
    rng: StdRng,
}

impl RandomSpawn {
    /// Seeds from OS entropy.
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Deterministic sequence for reproducible runs.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomSpawn {
    fn default() -> Self {
        Self::new()
    }
}

impl SpawnPolicy for RandomSpawn {
    /// Falls back to `band.min` when the band is inverted or not finite.
    fn next_x(&mut self, band: SpawnBand) -> f32 {
        if band.is_valid() {
            self.rng.gen_range(band.min..=band.max)
        } else {
            band.min
        }
    }
}

//=== ScriptedSpawn (tests) ===============================================

/// Replays a fixed list of x values, repeating the last one when exhausted.
#[cfg(test)]
pub(crate) struct ScriptedSpawn {
    xs: std::collections::VecDeque<f32>,
    last: f32,
}

#[cfg(test)]
impl ScriptedSpawn {
    pub(crate) fn new(xs: &[f32]) -> Self {
        Self {
            xs: xs.iter().copied().collect(),
            last: xs.last().copied().unwrap_or(200.0),
        }
    }
}

#[cfg(test)]
impl SpawnPolicy for ScriptedSpawn {
    fn next_x(&mut self, _band: SpawnBand) -> f32 {
        self.xs.pop_front().unwrap_or(self.last)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
