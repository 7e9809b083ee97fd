use bevy::prelude::*;
use bitflags::bitflags;

#[derive(Component)]
pub struct Player;

#[derive(Component, Default, Debug, Clone, Copy)]
pub struct CharacterVelocity(pub Vec2);

#[derive(Component, Debug, Clone, Copy)]
pub struct CharacterMovementConfig {
  pub walk_speed: f32,
  pub acceleration: f32,
  pub air_acceleration: f32,
  pub jump_speed: f32,
  pub max_jumps: u32,
}

#[derive(Component, Default, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocomotionState {
  #[default]
  Grounded,
  Airborne,
}

impl LocomotionState {
  pub fn is_grounded(self) -> bool {
    self == Self::Grounded
  }
}

bitflags! {
  /// Reasons horizontal movement and jumping are currently blocked.
  #[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Default)]
  pub struct MovementLocks: u8 {
    const DEATH = 1 << 0;
    const CAPTURE = 1 << 1;
    const DEFEND = 1 << 2;
    const HINT = 1 << 3;
  }
}

/// Last horizontal direction the player moved in.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Facing {
  Left,
  Right,
}

impl Facing {
  pub fn sign(self) -> f32 {
    match self {
      Self::Left => -1.0,
      Self::Right => 1.0,
    }
  }
}

/// Animation flag the presentation reads.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlayerPose {
  #[default]
  Idle,
  Running,
  Jumping,
  Attacking,
  Defending,
  Dead,
}

/// Jumps used since last touching the ground, plus a press waiting for the
/// next fixed step.
#[derive(Component, Debug, Default, Clone, Copy)]
pub struct JumpState {
  pub used: u32,
  pub buffered: bool,
}

/// Sprite colour the player returns to after defend or death.
#[derive(Component, Debug, Clone, Copy)]
pub struct BaseLook {
  pub color: Color,
  pub defend_alpha: f32,
}
