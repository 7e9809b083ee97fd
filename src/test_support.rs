//! Shared setup for App-level tests.

use std::time::Duration;

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;

use crate::checkpoint::CheckpointPlugin;
use crate::config::{ConfigLoaded, EMBEDDED_CONFIG, EnemySpawnConfig, GameConfig};
use crate::core::hit_stop::HitStopPlugin;
use crate::core::time_scale::TimeScalePlugin;
use crate::enemy::spawn::spawn_enemy;
use crate::enemy::{EnemyId, EnemyPlugin, EnemyRegistry};
use crate::input::PlayerIntent;
use crate::player::LifeCyclePlugin;
use crate::player::components::LocomotionState;
use crate::player::spawn::player_gameplay_bundle;
use crate::session::LifeBudget;

pub const FRAME: Duration = Duration::from_millis(50);

pub fn shipped_config() -> ConfigLoaded {
  ConfigLoaded::from(GameConfig::from_toml(EMBEDDED_CONFIG).unwrap())
}

/// Gameplay without physics, rendering or input devices.
pub fn gameplay_app() -> App {
  let mut app = App::new();
  app
    .add_plugins(MinimalPlugins)
    .insert_resource(TimeUpdateStrategy::ManualDuration(FRAME))
    .insert_resource(shipped_config())
    .insert_resource(LifeBudget::new(3))
    .add_plugins(TimeScalePlugin)
    .add_plugins(HitStopPlugin)
    .add_plugins(LifeCyclePlugin)
    .add_plugins(EnemyPlugin)
    .add_plugins(CheckpointPlugin);
  // First update has a zero delta
  app.update();
  app
}

/// Spawns a grounded player at `at`.
pub fn spawn_player(app: &mut App, at: Vec2) -> Entity {
  let config = app.world().resource::<ConfigLoaded>().clone();
  app
    .world_mut()
    .spawn(player_gameplay_bundle(&config, at))
    .insert(LocomotionState::Grounded)
    .id()
}

/// Spawns a stationary enemy at `at` through the regular spawn path.
pub fn spawn_enemy_at(app: &mut App, at: Vec2) -> (Entity, EnemyId) {
  let config = app.world().resource::<ConfigLoaded>().clone();
  let spawn = EnemySpawnConfig {
    x: at.x,
    y: at.y,
    patrol_min: at.x,
    patrol_max: at.x,
    speed: 0.0,
    start_moving_right: true,
    shooter: false,
  };

  let world = app.world_mut();
  let mut registry = world.remove_resource::<EnemyRegistry>().unwrap_or_default();
  let entity = {
    let mut commands = world.commands();
    spawn_enemy(&mut commands, &mut registry, &config, &spawn)
  };
  world.flush();
  world.insert_resource(registry);

  let id = *world.get::<EnemyId>(entity).unwrap();
  (entity, id)
}

pub fn run(app: &mut App, frames: usize) {
  for _ in 0..frames {
    app.update();
  }
}

/// Sets the capture input for the next frame, keeping press edges intact.
pub fn set_capture(app: &mut App, player: Entity, held: bool) {
  let mut entity = app.world_mut().entity_mut(player);
  let mut intent = entity.get_mut::<PlayerIntent>().unwrap();
  intent.set_capture_held(held);
}

/// Holds capture for `frames` frames, then releases it for one.
pub fn hold_capture(app: &mut App, player: Entity, frames: usize) {
  for _ in 0..frames {
    set_capture(app, player, true);
    app.update();
  }
  set_capture(app, player, false);
  app.update();
}
