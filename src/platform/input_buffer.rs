//=========================================================================
// Input Buffer
//
// Collects input events between frame boundaries, in arrival order.
//
// Responsibilities:
// - Store incoming platform events per frame, preserving their order
// - Deduplicate repeated discrete inputs (e.g., key auto-repeat)
// - Coalesce runs of pointer motion (last position of the run wins)
// - Hand the whole frame over via `drain()`
//
// Notes:
// Only *consecutive* motion is coalesced. A press or release between two
// moves keeps both moves, so a drag that starts and ends inside one frame
// still reaches the core in the order the user produced it.
//
// The buffer lives on the platform thread and is emptied on every
// RedrawRequested.
//=========================================================================

//=== Internal Modules ====================================================
use crate::core::input::InputEvent;

//=== InputBuffer =========================================================

/// Transient, ordered event store for one frame of input.
pub(crate) struct InputBuffer {
    events: Vec<InputEvent>,
}

impl InputBuffer {
    //--- Construction -----------------------------------------------------

    pub(crate) fn new() -> Self {
        const FRAME_BASE: usize = 32;

        Self {
            events: Vec::with_capacity(FRAME_BASE),
        }
    }

    //--- Buffering --------------------------------------------------------

    /// Appends an event.
    ///
    /// Motion that directly follows motion of the same kind replaces it;
    /// a discrete event identical to the previous one is dropped.
    pub(crate) fn push(&mut self, event: InputEvent) {
        match self.events.last_mut() {
            Some(last) if *last == event && event.is_continuous() => *last = event,
            Some(last) if *last == event => {}
            _ => self.events.push(event),
        }
    }

    //--- Drain ------------------------------------------------------------

    /// Takes this frame's events in arrival order, or `None` if empty.
    pub(crate) fn drain(&mut self) -> Option<Vec<InputEvent>> {
        if self.is_empty() {
            return None;
        }
        Some(std::mem::take(&mut self.events))
    }

    //--- Utilities --------------------------------------------------------

    pub(crate) fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::input::{KeyCode, MouseButton, TouchPhase};

    fn key_down(code: KeyCode) -> InputEvent {
        InputEvent::KeyDown(code)
    }

    fn mouse_move(x: f32, y: f32) -> InputEvent {
        InputEvent::MouseMoved { x, y }
    }

    fn x_of(event: &InputEvent) -> Option<f32> {
        match *event {
            InputEvent::MouseMoved { x, .. } | InputEvent::Touch { x, .. } => Some(x),
            _ => None,
        }
    }

    #[test]
    fn test_discrete_deduplication() {
        let mut buffer = InputBuffer::new();
        buffer.push(key_down(KeyCode::KeyR));
        buffer.push(key_down(KeyCode::KeyR));
        buffer.push(key_down(KeyCode::Enter));
        let events = buffer.drain().unwrap();
        assert_eq!(events.len(), 2, "Consecutive duplicates should be ignored");
    }

    #[test]
    fn test_consecutive_motion_coalesces() {
        let mut buffer = InputBuffer::new();
        buffer.push(mouse_move(10.0, 10.0));
        buffer.push(mouse_move(20.0, 30.0));

        let events = buffer.drain().unwrap();
        assert_eq!(events.len(), 1, "Only the latest motion survives");
        match events[0] {
            InputEvent::MouseMoved { x, y } => assert_eq!((x, y), (20.0, 30.0)),
            ref other => panic!("Expected MouseMoved event, found {:?}", other),
        }
    }

    #[test]
    fn test_motion_around_press_and_release_is_kept_in_order() {
        let mut buffer = InputBuffer::new();
        buffer.push(mouse_move(100.0, 700.0));
        buffer.push(InputEvent::MouseButtonDown(MouseButton::Left));
        buffer.push(mouse_move(150.0, 700.0));
        buffer.push(mouse_move(180.0, 700.0));
        buffer.push(InputEvent::MouseButtonUp(MouseButton::Left));

        let events = buffer.drain().unwrap();
        assert_eq!(
            events,
            vec![
                mouse_move(0.0, 0.0),
                InputEvent::MouseButtonDown(MouseButton::Left),
                mouse_move(0.0, 0.0),
                InputEvent::MouseButtonUp(MouseButton::Left),
            ]
        );
        let xs: Vec<Option<f32>> = events.iter().map(x_of).collect();
        assert_eq!(xs, vec![Some(100.0), None, Some(180.0), None]);
    }

    #[test]
    fn test_touch_move_then_end_keeps_both() {
        let mut buffer = InputBuffer::new();
        buffer.push(InputEvent::Touch { phase: TouchPhase::Started, x: 10.0, y: 4.0 });
        buffer.push(InputEvent::Touch { phase: TouchPhase::Moved, x: 20.0, y: 4.0 });
        buffer.push(InputEvent::Touch { phase: TouchPhase::Moved, x: 30.0, y: 4.0 });
        buffer.push(InputEvent::Touch { phase: TouchPhase::Ended, x: 35.0, y: 4.0 });

        let events = buffer.drain().unwrap();
        let xs: Vec<Option<f32>> = events.iter().map(x_of).collect();
        assert_eq!(xs, vec![Some(10.0), Some(30.0), Some(35.0)]);
    }

    #[test]
    fn test_different_motion_kinds_do_not_merge() {
        let mut buffer = InputBuffer::new();
        buffer.push(mouse_move(1.0, 1.0));
        buffer.push(InputEvent::Touch { phase: TouchPhase::Moved, x: 3.0, y: 4.0 });

        assert_eq!(buffer.drain().unwrap().len(), 2);
    }

    #[test]
    fn test_drain_clears_buffer() {
        let mut buffer = InputBuffer::new();
        buffer.push(key_down(KeyCode::KeyR));
        buffer.push(mouse_move(5.0, 5.0));

        assert_eq!(buffer.drain().unwrap().len(), 2);
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_empty_drain_is_none() {
        let mut buffer = InputBuffer::new();
        assert!(buffer.drain().is_none());
    }
}
