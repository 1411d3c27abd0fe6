//=========================================================================
// Action Mapper
//=========================================================================
//
// Maps key and button presses to game commands based on the active context.
//
// Architecture:
//   (key/button, context) → HashMap → GameCommand
//
// Only bindings in the active context resolve.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashMap;

//=== Internal Dependencies ===============================================

use super::action::{GameCommand, InputContext};
use super::event::{KeyCode, MouseButton};

//=== ActionMapper ========================================================

/// Context-aware key/button → command table.
pub struct ActionMapper {
    key_bindings: HashMap<(KeyCode, InputContext), GameCommand>,
    mouse_bindings: HashMap<(MouseButton, InputContext), GameCommand>,
    current_context: InputContext,
}

impl ActionMapper {
    /// Creates an empty mapper in the `Playing` context.
    pub fn new() -> Self {
        Self {
            key_bindings: HashMap::new(),
            mouse_bindings: HashMap::new(),
            current_context: InputContext::Playing,
        }
    }

    /// Mapper with the game's stock bindings.
    ///
    /// On the game-over overlay, R, Enter, Space and a left click all
    /// restart. `Playing` has no bindings: the basket follows the pointer.
    pub fn with_default_bindings() -> Self {
        let mut mapper = Self::new();
        for key in [KeyCode::KeyR, KeyCode::Enter, KeyCode::Space] {
            mapper.bind_key(key, GameCommand::Restart, InputContext::GameOver);
        }
        mapper.bind_mouse(MouseButton::Left, GameCommand::Restart, InputContext::GameOver);
        mapper
    }

    //--- Binding API ------------------------------------------------------

    pub fn bind_key(&mut self, key: KeyCode, command: GameCommand, context: InputContext) {
        self.key_bindings.insert((key, context), command);
    }

    pub fn bind_mouse(&mut self, button: MouseButton, command: GameCommand, context: InputContext) {
        self.mouse_bindings.insert((button, context), command);
    }

    pub fn unbind_key(&mut self, key: KeyCode, context: InputContext) {
        self.key_bindings.remove(&(key, context));
    }

    pub fn unbind_mouse(&mut self, button: MouseButton, context: InputContext) {
        self.mouse_bindings.remove(&(button, context));
    }

    /// Clears all bindings for a context (keys and mouse buttons).
    pub fn clear_context(&mut self, context: InputContext) {
        self.key_bindings.retain(|&(_, ctx), _| ctx != context);
        self.mouse_bindings.retain(|&(_, ctx), _| ctx != context);
    }

    //--- Mapping ----------------------------------------------------------

    /// Maps a key press in the active context.
    pub fn map_key(&self, key: KeyCode) -> Option<GameCommand> {
        self.key_bindings.get(&(key, self.current_context)).copied()
    }

    /// Maps a button press in the active context.
    pub fn map_button(&self, button: MouseButton) -> Option<GameCommand> {
        self.mouse_bindings.get(&(button, self.current_context)).copied()
    }

    pub fn set_context(&mut self, context: InputContext) {
        self.current_context = context;
    }

    pub fn current_context(&self) -> InputContext {
        self.current_context
    }
}

impl Default for ActionMapper {
    fn default() -> Self {
        Self::with_default_bindings()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_mapper_is_empty_and_playing() {
        let mapper = ActionMapper::new();
        assert_eq!(mapper.current_context(), InputContext::Playing);
        assert_eq!(mapper.map_key(KeyCode::KeyR), None);
        assert_eq!(mapper.map_button(MouseButton::Left), None);
    }

    #[test]
    fn default_restart_keys_only_resolve_on_game_over() {
        let mut mapper = ActionMapper::with_default_bindings();

        assert_eq!(mapper.map_key(KeyCode::KeyR), None);
        assert_eq!(mapper.map_button(MouseButton::Left), None);

        mapper.set_context(InputContext::GameOver);
        for key in [KeyCode::KeyR, KeyCode::Enter, KeyCode::Space] {
            assert_eq!(mapper.map_key(key), Some(GameCommand::Restart), "{:?}", key);
        }
        assert_eq!(mapper.map_button(MouseButton::Left), Some(GameCommand::Restart));
        assert_eq!(mapper.map_key(KeyCode::KeyQ), None);
    }

    #[test]
    fn rebinding_replaces_previous_command() {
        let mut mapper = ActionMapper::new();
        mapper.bind_key(KeyCode::KeyA, GameCommand::Drag(0.0), InputContext::Playing);
        mapper.bind_key(KeyCode::KeyA, GameCommand::Restart, InputContext::Playing);
        assert_eq!(mapper.map_key(KeyCode::KeyA), Some(GameCommand::Restart));
    }

    #[test]
    fn unbind_removes_only_that_context() {
        let mut mapper = ActionMapper::new();
        mapper.bind_key(KeyCode::KeyR, GameCommand::Restart, InputContext::Playing);
        mapper.bind_key(KeyCode::KeyR, GameCommand::Restart, InputContext::GameOver);

        mapper.unbind_key(KeyCode::KeyR, InputContext::Playing);
        assert_eq!(mapper.map_key(KeyCode::KeyR), None);

        mapper.set_context(InputContext::GameOver);
        assert_eq!(mapper.map_key(KeyCode::KeyR), Some(GameCommand::Restart));
    }

    #[test]
    fn clear_context_drops_keys_and_buttons() {
        let mut mapper = ActionMapper::with_default_bindings();
        mapper.clear_context(InputContext::GameOver);
        mapper.set_context(InputContext::GameOver);

        assert_eq!(mapper.map_key(KeyCode::Enter), None);
        assert_eq!(mapper.map_button(MouseButton::Left), None);
    }

    #[test]
    fn unbind_mouse_button() {
        let mut mapper = ActionMapper::with_default_bindings();
        mapper.unbind_mouse(MouseButton::Left, InputContext::GameOver);
        mapper.set_context(InputContext::GameOver);
        assert_eq!(mapper.map_button(MouseButton::Left), None);
        assert_eq!(mapper.map_key(KeyCode::KeyR), Some(GameCommand::Restart));
    }
}
