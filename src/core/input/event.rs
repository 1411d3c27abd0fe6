//=========================================================================
// Input Event Types
//
// Defines the internal representation of low-level input events.
//
// This module abstracts away platform-specific input (e.g. Winit)
// into a unified format used by the input subsystem.
//
// Responsibilities:
// - Represent keyboard, mouse and touch inputs in a portable way
// - Provide equality and hashing semantics for deduplication
// - Enable event coalescing (e.g., multiple MouseMoved → last position)
//
// Event Flow:
// ```text
// Platform Layer (Winit)
//         ↓
//    InputEvent (this module)
//         ↓
//    InputSystem (StateTracker + ActionMapper)
//         ↓
//    GameCommand (drag / restart)
// ```
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::hash::{Hash, Hasher};

//=== MouseButton =========================================================

/// Physical mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Primary button (typically left). Drives the basket drag.
    Left,

    /// Secondary button (typically right).
    Right,

    /// Middle button (wheel click).
    Middle,

    /// Any other button (side buttons, thumb buttons, macro keys).
    Other,
}

//=== KeyCode =============================================================

/// Physical keyboard key identifier.
///
/// Only the keys the game can bind are listed; everything else arrives as
/// `Unidentified` and is filtered by the platform layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    //--- Alphabetic Keys --------------------------------------------------

    KeyA, KeyB, KeyC, KeyD, KeyE, KeyF, KeyG, KeyH, KeyI,
    KeyJ, KeyK, KeyL, KeyM, KeyN, KeyO, KeyP, KeyQ, KeyR,
    KeyS, KeyT, KeyU, KeyV, KeyW, KeyX, KeyY, KeyZ,

    //--- Arrow Keys -------------------------------------------------------

    ArrowDown,
    ArrowLeft,
    ArrowRight,
    ArrowUp,

    //--- Special Keys -----------------------------------------------------

    Space,
    Enter,
    Escape,

    /// Fallback for keys not mapped by the platform layer.
    Unidentified,
}

//=== TouchPhase ==========================================================

/// Lifecycle stage of a touch contact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TouchPhase {
    Started,
    Moved,
    Ended,
    Cancelled,
}

//=== InputEvent ==========================================================

/// Low-level input event from the platform layer.
///
/// Positions are logical pixels with a top-left origin.
///
/// # Equality & Hashing Semantics
///
/// Events compare by type and key/button/phase payload. Pointer
/// coordinates are ignored so continuous motion coalesces (last position
/// wins):
///
/// ```text
/// KeyDown(A)          == KeyDown(A)           ✓
/// KeyDown(A)          == KeyUp(A)             ✗
/// MouseMoved{..}      == MouseMoved{..}       ✓ (coordinates ignored)
/// Touch{Moved, ..}    == Touch{Moved, ..}     ✓
/// Touch{Moved, ..}    == Touch{Ended, ..}     ✗
/// ```
#[derive(Debug, Clone)]
pub enum InputEvent {
    KeyDown(KeyCode),
    KeyUp(KeyCode),
    MouseButtonDown(MouseButton),
    MouseButtonUp(MouseButton),

    /// Cursor moved to a new position.
    MouseMoved { x: f32, y: f32 },

    /// A touch contact changed.
    Touch { phase: TouchPhase, x: f32, y: f32 },

    /// Unsupported event. Ignored by the input system.
    Unidentified,
}

impl InputEvent {
    /// Returns `true` for events that describe a position stream rather
    /// than a one-shot transition.
    pub fn is_continuous(&self) -> bool {
        matches!(
            self,
            Self::MouseMoved { .. } | Self::Touch { phase: TouchPhase::Moved, .. }
        )
    }
}

//--- Trait Implementations -----------------------------------------------

impl PartialEq for InputEvent {
    fn eq(&self, other: &Self) -> bool {
        use InputEvent::*;
        match (self, other) {
            (KeyDown(a), KeyDown(b)) => a == b,
            (KeyUp(a), KeyUp(b)) => a == b,
            (MouseButtonDown(a), MouseButtonDown(b)) => a == b,
            (MouseButtonUp(a), MouseButtonUp(b)) => a == b,
            (MouseMoved { .. }, MouseMoved { .. }) => true,
            (Touch { phase: a, .. }, Touch { phase: b, .. }) => a == b,
            (Unidentified, Unidentified) => true,
            _ => false,
        }
    }
}

impl Eq for InputEvent {}

impl Hash for InputEvent {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Self::KeyDown(key) | Self::KeyUp(key) => key.hash(state),
            Self::MouseButtonDown(button) | Self::MouseButtonUp(button) => button.hash(state),
            Self::Touch { phase, .. } => phase.hash(state),
            Self::MouseMoved { .. } | Self::Unidentified => {}
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
