use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

use crate::config::ConfigLoaded;

/// Downward speed cap for airborne characters.
pub const TERMINAL_VELOCITY: f32 = 500.0;

#[derive(Resource)]
pub struct GravityConfig {
  pub value: f32,
}

pub struct PhysicsPlugin;

impl Plugin for PhysicsPlugin {
  fn build(&self, app: &mut App) {
    app
      .add_plugins(RapierPhysicsPlugin::<NoUserData>::default().with_length_unit(50.0))
      .add_systems(Startup, setup_gravity);
  }
}

/// Characters are kinematic and integrate gravity themselves, so rapier's
/// own gravity is switched off and the configured value lives in
/// [`GravityConfig`].
fn setup_gravity(
  mut commands: Commands,
  config: Res<ConfigLoaded>,
  mut rapier: Query<&mut RapierConfiguration>,
) {
  commands.insert_resource(GravityConfig {
    value: config.physics.gravity,
  });
  for mut rapier_config in &mut rapier {
    rapier_config.gravity = Vec2::ZERO;
  }
}
