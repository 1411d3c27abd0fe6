//=========================================================================
// State Tracker
//=========================================================================
//
// Persistent pointer and keyboard state between input events.
//
// Tracks:
//   - keys held (so auto-repeat never fires a binding twice)
//   - whether a drag gesture is in progress
//   - last known pointer position
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashSet;

//=== Internal Dependencies ===============================================

use super::event::KeyCode;

//=== StateTracker ========================================================

/// Held keys, drag status and pointer position.
#[derive(Debug, Default)]
pub struct StateTracker {
    keys_down: HashSet<KeyCode>,
    dragging: bool,
    pointer: Option<(f32, f32)>,
}

impl StateTracker {
    pub fn new() -> Self {
        Self::default()
    }

    //--- Updates ----------------------------------------------------------

    /// Marks `key` held. Returns `true` on the UP → DOWN transition only.
    pub(super) fn press_key(&mut self, key: KeyCode) -> bool {
        self.keys_down.insert(key)
    }

    pub(super) fn release_key(&mut self, key: KeyCode) {
        self.keys_down.remove(&key);
    }

    pub(super) fn move_pointer(&mut self, x: f32, y: f32) {
        self.pointer = Some((x, y));
    }

    pub(super) fn begin_drag(&mut self) {
        self.dragging = true;
    }

    pub(super) fn end_drag(&mut self) {
        self.dragging = false;
    }

    //--- Queries ----------------------------------------------------------

    pub fn is_key_down(&self, key: KeyCode) -> bool {
        self.keys_down.contains(&key)
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Last pointer position, `None` until the pointer has been seen.
    pub fn pointer_position(&self) -> Option<(f32, f32)> {
        self.pointer
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_tracker_is_idle() {
        let tracker = StateTracker::new();
        assert!(!tracker.is_dragging());
        assert_eq!(tracker.pointer_position(), None);
        assert!(!tracker.is_key_down(KeyCode::KeyR));
    }

    #[test]
    fn repeated_press_is_not_a_transition() {
        let mut tracker = StateTracker::new();
        assert!(tracker.press_key(KeyCode::KeyR));
        assert!(!tracker.press_key(KeyCode::KeyR));
        assert!(tracker.is_key_down(KeyCode::KeyR));

        tracker.release_key(KeyCode::KeyR);
        assert!(!tracker.is_key_down(KeyCode::KeyR));
        assert!(tracker.press_key(KeyCode::KeyR));
    }

    #[test]
    fn drag_lifecycle() {
        let mut tracker = StateTracker::new();
        tracker.move_pointer(10.0, 20.0);
        tracker.begin_drag();
        assert!(tracker.is_dragging());
        assert_eq!(tracker.pointer_position(), Some((10.0, 20.0)));

        tracker.end_drag();
        assert!(!tracker.is_dragging());
        assert_eq!(tracker.pointer_position(), Some((10.0, 20.0)));
    }
}
