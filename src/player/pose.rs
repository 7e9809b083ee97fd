use bevy::prelude::*;

use super::combat::MeleeAttack;
use super::components::{CharacterVelocity, LocomotionState, MovementLocks, Player, PlayerPose};
use super::vitals::PlayerVitals;

pub fn pose_for(
  vitals: &PlayerVitals,
  locks: MovementLocks,
  attacking: bool,
  locomotion: LocomotionState,
  velocity: Vec2,
) -> PlayerPose {
  if !vitals.is_alive() {
    PlayerPose::Dead
  } else if locks.contains(MovementLocks::DEFEND) {
    PlayerPose::Defending
  } else if attacking {
    PlayerPose::Attacking
  } else if !locomotion.is_grounded() {
    PlayerPose::Jumping
  } else if velocity.x.abs() > 1.0 {
    PlayerPose::Running
  } else {
    PlayerPose::Idle
  }
}

pub fn update_pose(
  time: Res<Time>,
  mut players: Query<
    (
      &PlayerVitals,
      &MovementLocks,
      &MeleeAttack,
      &LocomotionState,
      &CharacterVelocity,
      &mut PlayerPose,
    ),
    With<Player>,
  >,
) {
  let now = time.elapsed_secs();
  for (vitals, locks, attack, locomotion, velocity, mut pose) in &mut players {
    let next = pose_for(vitals, *locks, attack.is_cooling_down(now), *locomotion, velocity.0);
    // Avoid change ticks every frame
    pose.set_if_neq(next);
  }
}
