//! E2E tests for level reload and restart.
//!
//! Builds the level from the shipped config through the session plugin and
//! checks what a reload or restart puts back to its starting state.

use std::time::Duration;

use bevy::ecs::message::MessageReader;
use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use photo_platformer::checkpoint::{CheckpointLedger, CheckpointPlugin};
use photo_platformer::config::{ConfigLoaded, EMBEDDED_CONFIG, GameConfig};
use photo_platformer::core::hit_stop::HitStopPlugin;
use photo_platformer::core::time_scale::{GlobalTimeScale, OverrideOwner, TimeScalePlugin};
use photo_platformer::enemy::{Enemy, EnemyHit, EnemyLifecycle, EnemyPlugin, EnemyRegistry};
use photo_platformer::player::LifeCyclePlugin;
use photo_platformer::player::components::Player;
use photo_platformer::player::vitals::{DamagePlayer, DamageSource, PlayerVitals, VitalState};
use photo_platformer::session::{
  GameOverScreen, LevelCommand, LevelEntered, LifeBudget, SessionPlugin,
};

#[derive(Resource, Default)]
struct Entered(Vec<bool>);

fn record_entered(mut entered: MessageReader<LevelEntered>, mut log: ResMut<Entered>) {
  log.0.extend(entered.read().map(|e| e.restart));
}

fn session_app() -> App {
  let config = ConfigLoaded::from(GameConfig::from_toml(EMBEDDED_CONFIG).unwrap());

  let mut app = App::new();
  app
    .add_plugins(MinimalPlugins)
    .add_plugins(bevy::input::InputPlugin)
    .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_millis(50)))
    .insert_resource(config)
    .add_plugins((
      TimeScalePlugin,
      HitStopPlugin,
      LifeCyclePlugin,
      EnemyPlugin,
      CheckpointPlugin,
      SessionPlugin,
    ))
    .init_resource::<Entered>()
    .add_systems(Last, record_entered);
  // Startup requests the first level
  app.update();
  app
}

fn players(app: &mut App) -> Vec<Entity> {
  app
    .world_mut()
    .query_filtered::<Entity, With<Player>>()
    .iter(app.world())
    .collect()
}

fn enemies(app: &mut App) -> Vec<Entity> {
  app
    .world_mut()
    .query_filtered::<Entity, With<Enemy>>()
    .iter(app.world())
    .collect()
}

fn reload(app: &mut App, command: LevelCommand) {
  app.world_mut().write_message(command);
  app.update();
}

#[test]
fn first_frame_builds_the_level() {
  let mut app = session_app();
  let config = app.world().resource::<ConfigLoaded>().clone();

  assert_eq!(players(&mut app).len(), 1);
  assert_eq!(enemies(&mut app).len(), config.level.enemies.len());
  assert_eq!(
    app.world().resource::<EnemyRegistry>().len(),
    config.level.enemies.len()
  );
  assert_eq!(
    app.world().resource::<LifeBudget>().remaining(),
    config.lives.starting
  );
  assert_eq!(app.world().resource::<Entered>().0, vec![false]);
}

#[test]
fn reload_resets_lives_ledger_and_time() {
  let mut app = session_app();
  let starting = app.world().resource::<ConfigLoaded>().lives.starting;

  let enemy = enemies(&mut app)[0];
  app.world_mut().write_message(EnemyHit { enemy });
  app.update();
  assert_eq!(app.world().resource::<CheckpointLedger>().live().len(), 1);

  app.world_mut().resource_mut::<LifeBudget>().set_remaining(1);
  app
    .world_mut()
    .resource_mut::<GlobalTimeScale>()
    .engage(OverrideOwner::Pause, 0.0);

  let old_player = players(&mut app)[0];
  reload(&mut app, LevelCommand::Reload);

  assert_eq!(app.world().resource::<LifeBudget>().remaining(), starting);
  assert!(app.world().resource::<CheckpointLedger>().live().is_empty());
  assert!(app.world().resource::<CheckpointLedger>().snapshot().is_empty());
  assert_eq!(app.world().resource::<GlobalTimeScale>().current(), 1.0);

  let players = players(&mut app);
  assert_eq!(players.len(), 1);
  assert_ne!(players[0], old_player);
  assert!(app.world().get_entity(old_player).is_err());

  for enemy in enemies(&mut app) {
    assert!(app.world().get::<EnemyLifecycle>(enemy).unwrap().is_alive());
  }
}

#[test]
fn game_over_waits_for_restart() {
  let mut app = session_app();
  let starting = app.world().resource::<ConfigLoaded>().lives.starting;
  app.world_mut().resource_mut::<LifeBudget>().set_remaining(0);

  app.world_mut().write_message(DamagePlayer {
    source: DamageSource::Debug,
  });
  for _ in 0..40 {
    app.update();
  }

  let player = players(&mut app)[0];
  assert_eq!(
    app.world().get::<PlayerVitals>(player).unwrap().state(),
    VitalState::AwaitingOutcome
  );
  assert!(app.world().contains_resource::<GameOverScreen>());
  assert_eq!(app.world().resource::<GlobalTimeScale>().current(), 0.0);

  reload(&mut app, LevelCommand::Restart);

  assert!(!app.world().contains_resource::<GameOverScreen>());
  assert_eq!(app.world().resource::<GlobalTimeScale>().current(), 1.0);
  assert_eq!(app.world().resource::<LifeBudget>().remaining(), starting);
  let player = players(&mut app)[0];
  assert!(app.world().get::<PlayerVitals>(player).unwrap().is_alive());
}

#[test]
fn restart_wins_over_reload_in_one_frame() {
  let mut app = session_app();

  app.world_mut().write_message(LevelCommand::Reload);
  app.world_mut().write_message(LevelCommand::Restart);
  app.update();

  assert_eq!(app.world().resource::<Entered>().0, vec![false, true]);
  assert_eq!(players(&mut app).len(), 1);
}
