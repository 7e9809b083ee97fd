use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

use super::combat::MeleeAttack;
use super::components::{
  BaseLook, CharacterMovementConfig, CharacterVelocity, Facing, JumpState, LocomotionState,
  MovementLocks, Player, PlayerPose,
};
use super::death::DeathFeedback;
use super::vitals::PlayerVitals;
use crate::checkpoint::{CaptureFeedback, CaptureGate};
use crate::config::ConfigLoaded;
use crate::input::{PlayerInput, PlayerIntent, player_input_actions};
use crate::session::LevelEntity;
use crate::session::hazards::HazardLatch;

/// Everything the gameplay systems need on a player, without physics or
/// input bindings.
pub fn player_gameplay_bundle(config: &ConfigLoaded, spawn: Vec2) -> impl Bundle {
  let player = &config.player;
  let checkpoint = &config.checkpoint;
  let color = Color::srgb(player.color[0], player.color[1], player.color[2]);

  (
    (
      Player,
      PlayerIntent::default(),
      PlayerVitals::new(spawn),
      MovementLocks::empty(),
      CharacterVelocity::default(),
      // Start airborne so gravity applies until landing
      LocomotionState::Airborne,
      Facing::Right,
      PlayerPose::default(),
      JumpState::default(),
    ),
    (
      CharacterMovementConfig {
        walk_speed: player.walk_speed,
        acceleration: player.acceleration,
        air_acceleration: player.air_acceleration,
        jump_speed: player.jump_speed,
        max_jumps: player.max_jumps,
      },
      BaseLook {
        color,
        defend_alpha: player.defend_alpha,
      },
      DeathFeedback {
        sequence_secs: config.death.sequence_secs,
        hurt_volume: config.death.hurt_volume,
      },
      HazardLatch::default(),
      MeleeAttack::new(&config.combat),
      CaptureGate::new(
        checkpoint.photos,
        checkpoint.hold_secs,
        checkpoint.slow_time.then_some(checkpoint.slow_time_scale),
      ),
      CaptureFeedback {
        freeze_secs: checkpoint.freeze_secs,
        used_volume: checkpoint.used_volume,
        empty_volume: checkpoint.empty_volume,
      },
      Sprite::from_color(color, Vec2::new(player.size[0], player.size[1])),
      Transform::from_xyz(spawn.x, spawn.y, 10.0),
      Visibility::default(),
    ),
  )
}

pub fn spawn_player_entity(commands: &mut Commands, config: &ConfigLoaded, spawn: Vec2) -> Entity {
  let player = &config.player;

  // Rapier capsule_y uses half_height (cylinder part) and radius
  let half_height = player.collider_length / 2.0;

  let entity = commands
    .spawn((
      player_gameplay_bundle(config, spawn),
      LevelEntity,
      RigidBody::KinematicPositionBased,
      Collider::capsule_y(half_height, player.collider_radius),
      KinematicCharacterController {
        snap_to_ground: Some(CharacterLength::Absolute(player.snap_to_ground)),
        max_slope_climb_angle: player.max_slope_angle.to_radians(),
        min_slope_slide_angle: player.max_slope_angle.to_radians(),
        autostep: Some(CharacterAutostep {
          max_height: CharacterLength::Absolute(player.autostep_height),
          min_width: CharacterLength::Absolute(player.autostep_width),
          include_dynamic_bodies: false,
        }),
        ..default()
      },
      PlayerInput,
      player_input_actions(),
    ))
    .id();

  info!("Spawned player at ({:.1}, {:.1})", spawn.x, spawn.y);
  entity
}
