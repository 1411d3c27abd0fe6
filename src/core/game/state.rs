//=========================================================================
// Game State
//=========================================================================
//
// Holds and updates all mutable game data.
//
// Events:
//   on_tick()     - object falls one step, then miss/catch resolution
//   on_drag(x)    - basket follows the pointer
//   on_restart()  - clears score and game over, respawns the object
//
// The state is owned by a single thread; nothing here blocks or locks.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::debug;

//=== Internal Dependencies ===============================================

use super::config::GameConfig;
use super::snapshot::{Position, Snapshot, TickOutcome};
use super::spawn::{RandomSpawn, SpawnPolicy};

//=== GameState ===========================================================

/// The catch game's complete mutable state and its update rules.
///
/// Exactly one object is in play at any time. A new one is spawned only
/// when the previous object is caught or missed (or on restart).
///
/// # Examples
///
/// ```
/// use catch_the_objects::core::game::{GameConfig, GameState, TickOutcome};
///
/// let mut state = GameState::with_seed(GameConfig::default(), 3);
/// state.on_drag(120.0);
/// assert_eq!(state.snapshot().basket_x, 120.0);
///
/// let outcome = state.on_tick();
/// assert!(matches!(outcome, TickOutcome::Falling | TickOutcome::Caught));
/// ```
pub struct GameState {
    config: GameConfig,
    basket_x: f32,
    object: Position,
    score: u32,
    game_over: bool,
    spawner: Box<dyn SpawnPolicy>,
}

impl GameState {
    //--- Construction -----------------------------------------------------

    /// Creates a state with an entropy-seeded random spawner.
    ///
    /// `config` is taken as is; see [`GameConfig::validate`]. An invalid
    /// spawn band does not panic but pins spawns to one of its ends.
    pub fn new(config: GameConfig) -> Self {
        Self::with_spawner(config, Box::new(RandomSpawn::new()))
    }

    /// Creates a state whose spawn sequence is reproducible.
    pub fn with_seed(config: GameConfig, seed: u64) -> Self {
        Self::with_spawner(config, Box::new(RandomSpawn::seeded(seed)))
    }

    /// Creates a state with a custom spawn policy.
    ///
    /// The basket starts at the horizontal midpoint of the screen and the
    /// first object is spawned immediately.
    pub fn with_spawner(config: GameConfig, mut spawner: Box<dyn SpawnPolicy>) -> Self {
        let object = spawn_object(&config, spawner.as_mut());
        Self {
            basket_x: config.screen_width / 2.0,
            object,
            score: 0,
            game_over: false,
            config,
            spawner,
        }
    }

    //--- Events -----------------------------------------------------------

    /// Advances the simulation by one tick.
    ///
    /// Order matters: the off-screen check runs before the catch check, so
    /// an object that is past the bottom is a miss even when it sits right
    /// above the basket.
    ///
    /// Ticks run the same rules while the game is over: the object keeps
    /// falling behind the game-over screen and catches still score.
    pub fn on_tick(&mut self) -> TickOutcome {
        self.object.y += self.config.fall_step;
        debug!(target: "game", "Object position: ({:.1}, {:.1})", self.object.x, self.object.y);

        if self.object.y > self.config.screen_height {
            self.game_over = true;
            self.respawn();
            return TickOutcome::Missed;
        }

        if self.in_catch_zone() {
            self.score = self.score.saturating_add(1);
            self.respawn();
            return TickOutcome::Caught;
        }

        TickOutcome::Falling
    }

    /// Moves the basket to `x`. Not clamped: the basket may leave the screen.
    pub fn on_drag(&mut self, x: f32) {
        self.basket_x = x;
    }

    /// Starts a fresh round.
    pub fn on_restart(&mut self) {
        self.score = 0;
        self.game_over = false;
        self.respawn();
    }

    /// Adopts a new logical screen size reported by the host.
    ///
    /// Degenerate sizes (a minimised window) are ignored. Returns whether
    /// the size was applied.
    pub fn set_screen_size(&mut self, width: f32, height: f32) -> bool {
        let usable = |v: f32| v.is_finite() && v > 0.0;
        if !usable(width) || !usable(height) {
            return false;
        }
        self.config.screen_width = width;
        self.config.screen_height = height;
        true
    }

    //--- Queries ----------------------------------------------------------

    /// Read-only view for the presentation layer.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            basket_x: self.basket_x,
            object: self.object,
            score: self.score,
            game_over: self.game_over,
            screen_width: self.config.screen_width,
            screen_height: self.config.screen_height,
        }
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    //--- Internal Helpers -------------------------------------------------

    fn in_catch_zone(&self) -> bool {
        (self.object.x - self.basket_x).abs() < self.config.catch_radius
            && self.object.y > self.config.catch_threshold()
    }

    fn respawn(&mut self) {
        self.object = spawn_object(&self.config, self.spawner.as_mut());
    }
}

fn spawn_object(config: &GameConfig, spawner: &mut dyn SpawnPolicy) -> Position {
    let x = config.spawn_band.clamp(spawner.next_x(config.spawn_band));
    Position::new(x, config.spawn_y)
}

//=========================================================================
// Unit Tests
//=========================================================================
