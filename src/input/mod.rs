pub mod actions;
mod bindings;

pub use actions::{Attack, Capture, Defend, Jump, Move, PlayerInput};
use bevy::prelude::*;
use bevy_enhanced_input::prelude::*;
pub use bindings::player_input_actions;

use crate::core::GameplaySet;
use crate::core::pause::PauseState;

/// Per-frame snapshot of what the player is asking for.
///
/// Gameplay systems read this instead of the raw actions so they can be
/// driven directly in tests.
#[derive(Component, Debug, Default, Clone, Copy, PartialEq)]
pub struct PlayerIntent {
  pub move_x: f32,
  pub jump_pressed: bool,
  pub capture_held: bool,
  /// `capture_held` as of the previous frame.
  pub capture_was_held: bool,
  pub attack_pressed: bool,
  pub defend_held: bool,
  jump_held: bool,
  attack_held: bool,
}

impl PlayerIntent {
  pub fn capture_just_pressed(&self) -> bool {
    self.capture_held && !self.capture_was_held
  }

  pub fn capture_just_released(&self) -> bool {
    !self.capture_held && self.capture_was_held
  }

  /// Carries the held state into the next frame and sets the new one.
  pub fn set_capture_held(&mut self, held: bool) {
    self.capture_was_held = self.capture_held;
    self.capture_held = held;
  }
}

pub struct InputPlugin;

impl Plugin for InputPlugin {
  fn build(&self, app: &mut App) {
    crate::core::ensure_gameplay_sets(app);
    app
      .add_plugins(EnhancedInputPlugin)
      .add_input_context::<PlayerInput>()
      .add_systems(Update, read_player_intent.in_set(GameplaySet::Intent));
  }
}

fn is_active(state: &ActionState) -> bool {
  // Fired = just pressed or held, Ongoing = held below a condition threshold
  matches!(state, ActionState::Fired | ActionState::Ongoing)
}

pub fn read_player_intent(
  mut players: Query<(&Actions<PlayerInput>, &mut PlayerIntent)>,
  move_actions: Query<(&Action<Move>, &ActionState)>,
  jump_actions: Query<&ActionState, With<Action<Jump>>>,
  capture_actions: Query<&ActionState, With<Action<Capture>>>,
  attack_actions: Query<&ActionState, With<Action<Attack>>>,
  defend_actions: Query<&ActionState, With<Action<Defend>>>,
  pause: Option<Res<PauseState>>,
) {
  let blocked = pause.is_some_and(|p| p.input_blocked());

  for (actions, mut intent) in &mut players {
    let mut move_x = 0.0;
    let mut jump = false;
    let mut capture = false;
    let mut attack = false;
    let mut defend = false;

    if !blocked {
      for action_entity in actions.iter() {
        if let Ok((action, state)) = move_actions.get(action_entity) {
          if is_active(state) {
            move_x = **action;
          }
        }
        if jump_actions.get(action_entity).is_ok_and(is_active) {
          jump = true;
        }
        if capture_actions.get(action_entity).is_ok_and(is_active) {
          capture = true;
        }
        if attack_actions.get(action_entity).is_ok_and(is_active) {
          attack = true;
        }
        if defend_actions.get(action_entity).is_ok_and(is_active) {
          defend = true;
        }
      }
    }

    // Jump and attack trigger on the press edge only
    intent.jump_pressed = jump && !intent.jump_held;
    intent.attack_pressed = attack && !intent.attack_held;
    intent.jump_held = jump;
    intent.attack_held = attack;
    intent.move_x = move_x;
    intent.defend_held = defend;
    intent.set_capture_held(capture);
  }
}
