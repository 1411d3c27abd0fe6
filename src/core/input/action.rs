//=========================================================================
// Game Commands & Input Context
//=========================================================================
//
// Commands: what input asks the game to do (move the basket, restart).
// Contexts: which bindings are live. Restart only resolves while the
// game-over overlay is up.
//
//=========================================================================

//=== GameCommand =========================================================

/// A high-level request for [`GameState`](crate::core::game::GameState).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameCommand {
    /// Move the basket to this x (logical pixels).
    Drag(f32),

    /// Start a new round.
    Restart,
}

//=== InputContext ========================================================

/// Identifies which set of bindings is active.
///
/// - `Playing`: pointer drags move the basket
/// - `GameOver`: the overlay owns input; bound keys and clicks restart
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum InputContext {
    #[default]
    Playing,
    GameOver,
}

impl InputContext {
    /// Context matching the game's game-over flag.
    pub const fn from_game_over(game_over: bool) -> Self {
        if game_over {
            Self::GameOver
        } else {
            Self::Playing
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
