use bevy::prelude::*;
use bevy_enhanced_input::prelude::*;

use super::actions::{Attack, Capture, Defend, Jump, Move, PlayerInput};

pub fn player_input_actions() -> impl Bundle {
  actions!(PlayerInput[
      (
          Action::<Move>::new(),
          Bindings::spawn((
              Bidirectional::ad_keys(),
              Bidirectional::left_right_arrow(),
          )),
      ),
      (
          Action::<Jump>::new(),
          bindings![KeyCode::Space, KeyCode::KeyW],
      ),
      (
          Action::<Capture>::new(),
          bindings![KeyCode::KeyE],
      ),
      (
          Action::<Attack>::new(),
          bindings![MouseButton::Left, KeyCode::KeyJ],
      ),
      (
          Action::<Defend>::new(),
          bindings![MouseButton::Right, KeyCode::KeyL],
      ),
  ])
}
