pub mod combat;
pub mod components;
pub mod death;
mod defend;
mod jump;
pub mod movement;
mod pose;
pub mod spawn;
pub mod vitals;


use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

use crate::checkpoint::RestoreCheckpoint;
use crate::core::GameplaySet;
use crate::core::audio::PlaySfx;
use crate::enemy::EnemyHit;
use vitals::{DamagePlayer, DeathSequenceComplete, GameOver};

/// Movement and physics. Needs rapier and [`crate::core::GravityConfig`].
pub struct PlayerPlugin;

impl Plugin for PlayerPlugin {
  fn build(&self, app: &mut App) {
    app
      .add_plugins(LifeCyclePlugin)
      .add_systems(
        FixedUpdate,
        (
          jump::process_jump,
          movement::handle_movement_input,
          movement::apply_locomotion_physics,
          movement::apply_velocity_to_controller,
        )
          .chain()
          .before(PhysicsSet::SyncBackend),
      )
      // Read physics output AFTER Rapier writeback (still in FixedUpdate)
      .add_systems(
        FixedUpdate,
        movement::sync_ground_from_physics.after(PhysicsSet::Writeback),
      );
  }
}

/// Damage, death, respawn, defend and attack. Runs without physics.
pub struct LifeCyclePlugin;

impl Plugin for LifeCyclePlugin {
  fn build(&self, app: &mut App) {
    crate::core::ensure_gameplay_sets(app);
    app
      .add_message::<DamagePlayer>()
      .add_message::<DeathSequenceComplete>()
      .add_message::<GameOver>()
      .add_message::<RestoreCheckpoint>()
      .add_message::<EnemyHit>()
      .add_message::<combat::MeleeSwing>()
      .add_message::<PlaySfx>()
      .add_systems(
        Update,
        (
          (
            jump::buffer_jump_input,
            defend::update_defend,
            combat::player_attack,
          )
            .in_set(GameplaySet::Hazards),
          death::apply_damage.in_set(GameplaySet::Vitals),
          (death::tick_death_animations, death::resolve_death_outcome)
            .chain()
            .in_set(GameplaySet::Outcome),
          (pose::update_pose, movement::apply_facing).in_set(GameplaySet::Presentation),
        ),
      );
  }
}
