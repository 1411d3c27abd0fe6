//=========================================================================
// Input System
//
// Turns low-level input events into game commands.
//
// Architecture:
// ```text
//   InputEvent ──> StateTracker (keys held, drag, pointer)
//        │
//        └──────> ActionMapper (bindings per context) ──> GameCommand
// ```
//
// Drag semantics:
// - Left button press (or touch start) begins a drag in `Playing`
// - Pointer motion while dragging emits `Drag(x)`
// - Release (or touch end/cancel) ends the drag
// - Entering `GameOver` cancels any drag; the overlay owns input
//
//=========================================================================

//=== Submodules ==========================================================

pub mod action;
pub mod action_mapper;
pub mod event;
pub mod state_tracker;

//=== Public API ==========================================================

pub use action::{GameCommand, InputContext};
pub use action_mapper::ActionMapper;
pub use event::{InputEvent, KeyCode, MouseButton, TouchPhase};
pub use state_tracker::StateTracker;

//=== External Crates =====================================================

use log::trace;

//=== InputSystem =========================================================

/// Stateful translator from [`InputEvent`]s to [`GameCommand`]s.
pub struct InputSystem {
    mapper: ActionMapper,
    tracker: StateTracker,
}

impl InputSystem {
    //--- Construction -----------------------------------------------------

    /// Creates an input system with the stock bindings.
    pub fn new() -> Self {
        Self::with_mapper(ActionMapper::with_default_bindings())
    }

    pub fn with_mapper(mapper: ActionMapper) -> Self {
        Self {
            mapper,
            tracker: StateTracker::new(),
        }
    }

    //--- Event Processing -------------------------------------------------

    /// Processes one event, returning the command it produces (if any).
    ///
    /// Events must be fed in arrival order; the caller applies the command
    /// and re-syncs the context before the next event.
    pub fn handle_event(&mut self, event: &InputEvent) -> Option<GameCommand> {
        match *event {
            InputEvent::KeyDown(key) => {
                if self.tracker.press_key(key) {
                    self.mapper.map_key(key)
                } else {
                    None
                }
            }

            InputEvent::KeyUp(key) => {
                self.tracker.release_key(key);
                None
            }

            InputEvent::MouseButtonDown(button) => self.press(button),

            InputEvent::MouseButtonUp(MouseButton::Left) => {
                self.tracker.end_drag();
                None
            }

            InputEvent::MouseButtonUp(_) => None,

            InputEvent::MouseMoved { x, y } => self.pointer_moved(x, y),

            InputEvent::Touch { phase, x, y } => match phase {
                TouchPhase::Started => {
                    self.tracker.move_pointer(x, y);
                    self.press(MouseButton::Left)
                }
                TouchPhase::Moved => self.pointer_moved(x, y),
                TouchPhase::Ended => {
                    // Lift-off position is the last drag position
                    let command = self.pointer_moved(x, y);
                    self.tracker.end_drag();
                    command
                }
                TouchPhase::Cancelled => {
                    self.tracker.move_pointer(x, y);
                    self.tracker.end_drag();
                    None
                }
            },

            InputEvent::Unidentified => {
                trace!(target: "core::input", "Ignoring unidentified input event");
                None
            }
        }
    }

    /// Processes a batch in order under the current context.
    ///
    /// The context is not re-synced between events, so a batch that
    /// restarts the game still resolves later events as `GameOver` input.
    pub fn process(&mut self, events: &[InputEvent]) -> Vec<GameCommand> {
        events.iter().filter_map(|event| self.handle_event(event)).collect()
    }

    //--- Context ----------------------------------------------------------

    /// Switches the active binding context.
    ///
    /// Entering `GameOver` ends any drag in progress.
    pub fn set_context(&mut self, context: InputContext) {
        if context == InputContext::GameOver {
            self.tracker.end_drag();
        }
        self.mapper.set_context(context);
    }

    pub fn context(&self) -> InputContext {
        self.mapper.current_context()
    }

    //--- Accessors --------------------------------------------------------

    pub fn mapper_mut(&mut self) -> &mut ActionMapper {
        &mut self.mapper
    }

    pub fn tracker(&self) -> &StateTracker {
        &self.tracker
    }

    //--- Internal Helpers -------------------------------------------------

    fn press(&mut self, button: MouseButton) -> Option<GameCommand> {
        if let Some(command) = self.mapper.map_button(button) {
            return Some(command);
        }

        if button != MouseButton::Left || self.context() != InputContext::Playing {
            return None;
        }

        self.tracker.begin_drag();
        self.tracker
            .pointer_position()
            .map(|(x, _)| GameCommand::Drag(x))
    }

    fn pointer_moved(&mut self, x: f32, y: f32) -> Option<GameCommand> {
        self.tracker.move_pointer(x, y);
        if self.tracker.is_dragging() {
            Some(GameCommand::Drag(x))
        } else {
            None
        }
    }
}

impl Default for InputSystem {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    //--- Test Helpers -----------------------------------------------------

    fn mouse_move(x: f32, y: f32) -> InputEvent {
        InputEvent::MouseMoved { x, y }
    }

    fn touch(phase: TouchPhase, x: f32) -> InputEvent {
        InputEvent::Touch { phase, x, y: 500.0 }
    }

    fn feed(system: &mut InputSystem, events: &[InputEvent]) -> Vec<GameCommand> {
        system.process(events)
    }

    //--- Drag -------------------------------------------------------------

    #[test]
    fn hover_without_press_does_not_drag() {
        let mut system = InputSystem::new();
        let commands = feed(&mut system, &[mouse_move(100.0, 100.0), mouse_move(150.0, 90.0)]);
        assert!(commands.is_empty());
    }

    #[test]
    fn press_and_move_drags_basket() {
        let mut system = InputSystem::new();
        let commands = feed(
            &mut system,
            &[
                mouse_move(100.0, 700.0),
                InputEvent::MouseButtonDown(MouseButton::Left),
                mouse_move(130.0, 700.0),
                mouse_move(160.0, 710.0),
                InputEvent::MouseButtonUp(MouseButton::Left),
                mouse_move(300.0, 700.0),
            ],
        );

        assert_eq!(
            commands,
            vec![
                GameCommand::Drag(100.0),
                GameCommand::Drag(130.0),
                GameCommand::Drag(160.0),
            ]
        );
    }

    #[test]
    fn press_before_any_motion_starts_drag_silently() {
        let mut system = InputSystem::new();
        assert_eq!(system.handle_event(&InputEvent::MouseButtonDown(MouseButton::Left)), None);
        assert!(system.tracker().is_dragging());
        assert_eq!(system.handle_event(&mouse_move(42.0, 0.0)), Some(GameCommand::Drag(42.0)));
    }

    #[test]
    fn right_button_does_not_drag() {
        let mut system = InputSystem::new();
        let commands = feed(
            &mut system,
            &[
                InputEvent::MouseButtonDown(MouseButton::Right),
                mouse_move(10.0, 10.0),
            ],
        );
        assert!(commands.is_empty());
    }

    #[test]
    fn touch_drag_follows_finger() {
        let mut system = InputSystem::new();
        let commands = feed(
            &mut system,
            &[
                touch(TouchPhase::Started, 50.0),
                touch(TouchPhase::Moved, 75.0),
                touch(TouchPhase::Ended, 80.0),
                touch(TouchPhase::Moved, 99.0),
            ],
        );
        assert_eq!(
            commands,
            vec![GameCommand::Drag(50.0), GameCommand::Drag(75.0), GameCommand::Drag(80.0)]
        );
    }

    #[test]
    fn cancelled_touch_does_not_move_basket() {
        let mut system = InputSystem::new();
        let commands = feed(
            &mut system,
            &[touch(TouchPhase::Started, 50.0), touch(TouchPhase::Cancelled, 300.0)],
        );
        assert_eq!(commands, vec![GameCommand::Drag(50.0)]);
        assert!(!system.tracker().is_dragging());
    }

    //--- Restart ----------------------------------------------------------

    #[test]
    fn restart_keys_ignored_while_playing() {
        let mut system = InputSystem::new();
        assert_eq!(system.handle_event(&InputEvent::KeyDown(KeyCode::KeyR)), None);
    }

    #[test]
    fn restart_key_fires_once_per_press_on_game_over() {
        let mut system = InputSystem::new();
        system.set_context(InputContext::GameOver);

        let commands = feed(
            &mut system,
            &[
                InputEvent::KeyDown(KeyCode::KeyR),
                InputEvent::KeyDown(KeyCode::KeyR),
                InputEvent::KeyUp(KeyCode::KeyR),
                InputEvent::KeyDown(KeyCode::Enter),
            ],
        );
        assert_eq!(commands, vec![GameCommand::Restart, GameCommand::Restart]);
    }

    #[test]
    fn click_on_game_over_restarts_instead_of_dragging() {
        let mut system = InputSystem::new();
        system.set_context(InputContext::GameOver);

        let commands = feed(
            &mut system,
            &[
                mouse_move(200.0, 400.0),
                InputEvent::MouseButtonDown(MouseButton::Left),
                mouse_move(250.0, 400.0),
            ],
        );
        assert_eq!(commands, vec![GameCommand::Restart]);
        assert!(!system.tracker().is_dragging());
    }

    #[test]
    fn tap_on_game_over_restarts() {
        let mut system = InputSystem::new();
        system.set_context(InputContext::GameOver);
        assert_eq!(
            system.handle_event(&touch(TouchPhase::Started, 10.0)),
            Some(GameCommand::Restart)
        );
    }

    #[test]
    fn entering_game_over_cancels_drag() {
        let mut system = InputSystem::new();
        feed(&mut system, &[mouse_move(1.0, 1.0), InputEvent::MouseButtonDown(MouseButton::Left)]);
        assert!(system.tracker().is_dragging());

        system.set_context(InputContext::GameOver);
        assert!(!system.tracker().is_dragging());
        system.set_context(InputContext::Playing);
        assert_eq!(system.handle_event(&mouse_move(5.0, 5.0)), None);
    }

    #[test]
    fn custom_bindings_through_mapper() {
        let mut system = InputSystem::new();
        system
            .mapper_mut()
            .bind_key(KeyCode::Escape, GameCommand::Restart, InputContext::Playing);
        assert_eq!(
            system.handle_event(&InputEvent::KeyDown(KeyCode::Escape)),
            Some(GameCommand::Restart)
        );
    }

    #[test]
    fn unidentified_events_are_ignored() {
        let mut system = InputSystem::new();
        assert_eq!(system.handle_event(&InputEvent::Unidentified), None);
    }
}
