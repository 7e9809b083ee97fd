use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

use super::components::{
  CharacterMovementConfig, CharacterVelocity, Facing, JumpState, LocomotionState, MovementLocks,
  Player,
};
use crate::core::{GravityConfig, TERMINAL_VELOCITY};
use crate::input::PlayerIntent;

/// Runs in FixedUpdate AFTER physics writeback to read fresh ground state.
pub fn sync_ground_from_physics(
  mut players: Query<
    (
      &mut LocomotionState,
      &mut CharacterVelocity,
      &mut JumpState,
      Option<&KinematicCharacterControllerOutput>,
    ),
    With<Player>,
  >,
) {
  for (mut state, mut velocity, mut jumps, output) in &mut players {
    let physics_grounded = output.is_some_and(|o| o.grounded);

    match *state {
      LocomotionState::Grounded => {
        if !physics_grounded {
          *state = LocomotionState::Airborne;
        }
      }
      LocomotionState::Airborne => {
        // Only land while falling, not on the frame a jump leaves the ground
        if physics_grounded && velocity.0.y <= 0.0 {
          velocity.0.y = 0.0;
          jumps.used = 0;
          *state = LocomotionState::Grounded;
        }
      }
    }
  }
}

pub fn handle_movement_input(
  mut players: Query<
    (
      &PlayerIntent,
      &MovementLocks,
      &mut CharacterVelocity,
      &mut Facing,
      &CharacterMovementConfig,
      &LocomotionState,
    ),
    With<Player>,
  >,
  time: Res<Time>,
) {
  for (intent, locks, mut velocity, mut facing, config, state) in &mut players {
    let move_value = if locks.is_empty() { intent.move_x } else { 0.0 };

    if move_value > 0.0 {
      *facing = Facing::Right;
    } else if move_value < 0.0 {
      *facing = Facing::Left;
    }

    let target_velocity_x = move_value * config.walk_speed;
    let accel = if state.is_grounded() {
      config.acceleration
    } else {
      config.air_acceleration
    };

    // Smoothly interpolate horizontal velocity towards target
    let diff = target_velocity_x - velocity.0.x;
    velocity.0.x += diff * (accel * time.delta_secs()).min(1.0);

    if move_value != 0.0 || velocity.0.x.abs() > 1.0 {
      trace!("Move: input={}, vel_x={:.1}, loco={:?}", move_value, velocity.0.x, state);
    }
  }
}

/// Applies gravity while airborne.
pub fn apply_locomotion_physics(
  mut players: Query<(&mut CharacterVelocity, &LocomotionState), With<Player>>,
  gravity: Res<GravityConfig>,
  time: Res<Time>,
) {
  for (mut velocity, state) in &mut players {
    match state {
      LocomotionState::Grounded => {
        velocity.0.y = velocity.0.y.max(0.0);
      }
      LocomotionState::Airborne => {
        velocity.0.y -= gravity.value * time.delta_secs();
        velocity.0.y = velocity.0.y.max(-TERMINAL_VELOCITY);
      }
    }
  }
}

pub fn apply_velocity_to_controller(
  mut players: Query<(&CharacterVelocity, &mut KinematicCharacterController), With<Player>>,
  time: Res<Time>,
) {
  for (velocity, mut controller) in &mut players {
    controller.translation = Some(velocity.0 * time.delta_secs());
  }
}

/// Mirrors the sprite to the facing direction.
pub fn apply_facing(mut players: Query<(&Facing, &mut Sprite), (With<Player>, Changed<Facing>)>) {
  for (facing, mut sprite) in &mut players {
    sprite.flip_x = *facing == Facing::Left;
  }
}
