//! ECS systems для PlayerControllerPlugin

use bevy::prelude::*;

use crate::host::HeadlessHost;
use crate::input::{ActionState, InputAction, MouseLookEvent, PlayerInputEvent};
use crate::player::{MovementController, Player};

/// Actions между frame phase и ближайшим physics step
///
/// - `held`: последний snapshot held actions
/// - `jump`/`shoot`: edges латчатся, пока FixedUpdate их не заберёт
///   (frame без physics step не теряет нажатие)
#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct PendingActions {
    pub held: ActionState,
    pub jump: bool,
    pub shoot: bool,
}

impl PendingActions {
    /// Snapshot для physics step (edges сбрасываются)
    pub fn take_step_actions(&mut self) -> ActionState {
        let actions = ActionState {
            jump: self.jump,
            shoot: self.shoot,
            ..self.held
        };
        self.jump = false;
        self.shoot = false;
        actions
    }
}

/// Mouse look — yaw/pitch по каждому MouseLookEvent
pub fn player_mouse_look(
    mut events: EventReader<MouseLookEvent>,
    mut player_query: Query<&mut MovementController, With<Player>>,
    mut host: ResMut<HeadlessHost>,
) {
    let Ok(mut controller) = player_query.single_mut() else {
        events.clear();
        return;
    };

    for event in events.read() {
        controller.handle_mouse_motion(&mut *host, event.relative());
    }
}

/// Латчит held actions и edges до physics step
pub fn collect_player_input(
    mut events: EventReader<PlayerInputEvent>,
    mut pending: ResMut<PendingActions>,
) {
    for event in events.read() {
        pending.held = event.actions.held_only();
        pending.jump |= event.actions.is_active(InputAction::Jump);
        pending.shoot |= event.actions.is_active(InputAction::Shoot);
    }
}

/// ui_cancel → release курсора (frame phase, без ожидания physics step)
pub fn player_cancel_input(
    mut events: EventReader<PlayerInputEvent>,
    mut player_query: Query<&mut MovementController, With<Player>>,
    mut host: ResMut<HeadlessHost>,
) {
    let Ok(mut controller) = player_query.single_mut() else {
        events.clear();
        return;
    };

    for event in events.read() {
        controller.process(&mut *host, &event.actions);
    }
}

/// Physics step: выстрел + интеграция движения
pub fn player_physics_step(
    time: Res<Time<Fixed>>,
    mut pending: ResMut<PendingActions>,
    mut player_query: Query<&mut MovementController, With<Player>>,
    mut host: ResMut<HeadlessHost>,
) {
    let Ok(mut controller) = player_query.single_mut() else {
        return;
    };

    let actions = pending.take_step_actions();
    controller.physics_step(&mut *host, &actions, time.delta_secs(), time.elapsed());
}

/// Баллистика projectiles в headless сцене
pub fn step_headless_projectiles(time: Res<Time<Fixed>>, mut host: ResMut<HeadlessHost>) {
    host.step_projectiles(time.delta_secs());
}

/// Удаление projectiles с истёкшим lifetime
pub fn expire_projectiles(
    time: Res<Time<Fixed>>,
    mut player_query: Query<&mut MovementController, With<Player>>,
    mut host: ResMut<HeadlessHost>,
) {
    let Ok(mut controller) = player_query.single_mut() else {
        return;
    };

    controller.expire_projectiles(&mut *host, time.elapsed());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pending_edges_consumed_once() {
        let mut pending = PendingActions {
            held: ActionState::default().with(InputAction::Forward),
            jump: true,
            shoot: true,
        };

        let first = pending.take_step_actions();
        assert!(first.forward && first.jump && first.shoot);

        let second = pending.take_step_actions();
        assert!(second.forward);
        assert!(!second.jump && !second.shoot);
    }
}
