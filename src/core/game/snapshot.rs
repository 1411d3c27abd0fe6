//=========================================================================
// Snapshot & Tick Outcome
//=========================================================================
//
// Read-only values handed out of the game core.
//
// Snapshot: everything the presentation layer needs for one frame.
// TickOutcome: what a tick resolved to, so callers can trigger side
// effects (catch sound, logging) without the core doing any I/O.
//
//=========================================================================

//=== Position ============================================================

/// A 2D point in logical screen pixels (top-left origin).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

//=== Snapshot ============================================================

/// Immutable view of the game for rendering.
///
/// Produced after every processed event. Holds copies, so it can cross
/// thread boundaries freely.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Snapshot {
    /// Horizontal centre of the basket.
    pub basket_x: f32,

    /// Centre of the falling object.
    pub object: Position,

    /// Objects caught since the last restart.
    pub score: u32,

    /// `true` once an object has fallen past the bottom of the screen.
    pub game_over: bool,

    /// Logical screen size the state is currently laid out for.
    pub screen_width: f32,
    pub screen_height: f32,
}

//=== TickOutcome =========================================================

/// Result of a single [`GameState::on_tick`](super::GameState::on_tick).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TickOutcome {
    /// Object moved down and is still in play.
    Falling,

    /// Object was inside the catch zone; score incremented, object respawned.
    Caught,

    /// Object passed the bottom; game over set, object respawned.
    Missed,
}

impl TickOutcome {
    /// Returns `true` if the tick retired the current object.
    pub fn resolved(self) -> bool {
        matches!(self, Self::Caught | Self::Missed)
    }
}
