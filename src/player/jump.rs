use bevy::ecs::message::MessageWriter;
use bevy::prelude::*;

use super::components::{
  CharacterMovementConfig, CharacterVelocity, JumpState, LocomotionState, MovementLocks, Player,
};
use crate::core::audio::{PlaySfx, SfxCue};
use crate::input::PlayerIntent;

/// Holds a jump press from the frame it happened until the next fixed step.
pub fn buffer_jump_input(mut players: Query<(&PlayerIntent, &mut JumpState), With<Player>>) {
  for (intent, mut jumps) in &mut players {
    if intent.jump_pressed {
      jumps.buffered = true;
    }
  }
}

/// Ground jump plus air jumps up to `max_jumps` in total.
pub fn process_jump(
  mut players: Query<
    (
      &mut LocomotionState,
      &mut CharacterVelocity,
      &mut JumpState,
      &CharacterMovementConfig,
      &MovementLocks,
    ),
    With<Player>,
  >,
  mut sfx: MessageWriter<PlaySfx>,
) {
  for (mut state, mut velocity, mut jumps, config, locks) in &mut players {
    if !std::mem::take(&mut jumps.buffered) {
      continue;
    }
    if !locks.is_empty() {
      continue;
    }

    // Walking off a ledge uses up the ground jump
    let used = if state.is_grounded() {
      0
    } else {
      jumps.used.max(1)
    };
    if used >= config.max_jumps {
      continue;
    }

    jumps.used = used + 1;
    velocity.0.y = config.jump_speed;
    *state = LocomotionState::Airborne;
    sfx.write(PlaySfx::new(SfxCue::Jump, 0.6));
    trace!("Jump {} of {}", jumps.used, config.max_jumps);
  }
}
