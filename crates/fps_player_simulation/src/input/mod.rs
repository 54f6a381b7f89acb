//! Player input — именованные actions и события для ECS loop
//!
//! # Архитектура
//!
//! ```text
//! Host input map (Godot InputMap / scripted headless input)
//!     ↓
//! ActionState snapshot (held + just_pressed edges)
//!     ↓
//! PlayerInputEvent / MouseLookEvent (ECS events)
//!     ↓
//! MovementController (look, cancel, physics step)
//! ```

pub mod events;

pub use events::*;

/// Именованные actions из input map
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputAction {
    Forward,
    Backward,
    Left,
    Right,
    Jump,
    Shoot,
    UiCancel,
}

impl InputAction {
    pub const ALL: [InputAction; 7] = [
        InputAction::Forward,
        InputAction::Backward,
        InputAction::Left,
        InputAction::Right,
        InputAction::Jump,
        InputAction::Shoot,
        InputAction::UiCancel,
    ];

    /// Имя action в input map host'а
    pub fn name(self) -> &'static str {
        match self {
            InputAction::Forward => "forward",
            InputAction::Backward => "backward",
            InputAction::Left => "left",
            InputAction::Right => "right",
            InputAction::Jump => "jump",
            InputAction::Shoot => "shoot",
            InputAction::UiCancel => "ui_cancel",
        }
    }

    /// Edge-triggered (just_pressed) или level (held)
    pub fn is_edge(self) -> bool {
        matches!(
            self,
            InputAction::Jump | InputAction::Shoot | InputAction::UiCancel
        )
    }
}

/// Snapshot actions за один шаг
///
/// - `forward/backward/left/right`: held (level)
/// - `jump/shoot/cancel`: just_pressed в этом шаге (edge)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ActionState {
    pub forward: bool,
    pub backward: bool,
    pub left: bool,
    pub right: bool,
    pub jump: bool,
    pub shoot: bool,
    pub cancel: bool,
}

impl ActionState {
    pub fn is_active(&self, action: InputAction) -> bool {
        match action {
            InputAction::Forward => self.forward,
            InputAction::Backward => self.backward,
            InputAction::Left => self.left,
            InputAction::Right => self.right,
            InputAction::Jump => self.jump,
            InputAction::Shoot => self.shoot,
            InputAction::UiCancel => self.cancel,
        }
    }

    pub fn set(&mut self, action: InputAction, active: bool) {
        let slot = match action {
            InputAction::Forward => &mut self.forward,
            InputAction::Backward => &mut self.backward,
            InputAction::Left => &mut self.left,
            InputAction::Right => &mut self.right,
            InputAction::Jump => &mut self.jump,
            InputAction::Shoot => &mut self.shoot,
            InputAction::UiCancel => &mut self.cancel,
        };
        *slot = active;
    }

    /// Builder для тестов и scripted input
    pub fn with(mut self, action: InputAction) -> Self {
        self.set(action, true);
        self
    }

    /// Только held actions (edges сброшены)
    pub fn held_only(&self) -> Self {
        Self {
            jump: false,
            shoot: false,
            cancel: false,
            ..*self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_names_match_input_map() {
        let names: Vec<_> = InputAction::ALL.iter().map(|a| a.name()).collect();
        assert_eq!(
            names,
            ["forward", "backward", "left", "right", "jump", "shoot", "ui_cancel"]
        );
    }

    #[test]
    fn test_set_and_query() {
        let mut actions = ActionState::default();
        for action in InputAction::ALL {
            assert!(!actions.is_active(action));
            actions.set(action, true);
            assert!(actions.is_active(action));
        }
    }

    #[test]
    fn test_held_only_drops_edges() {
        let actions = ActionState::default()
            .with(InputAction::Forward)
            .with(InputAction::Jump)
            .with(InputAction::Shoot);

        let held = actions.held_only();
        assert!(held.forward);
        assert!(!held.jump);
        assert!(!held.shoot);
    }
}
