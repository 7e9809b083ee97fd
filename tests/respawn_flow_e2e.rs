//! E2E tests for the death, respawn and checkpoint restore loop.
//!
//! Runs the gameplay plugins headless (no physics, rendering or input
//! devices) and drives the player through damage messages and capture intent.

use std::time::Duration;

use bevy::ecs::message::MessageReader;
use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use photo_platformer::checkpoint::{CaptureGate, CheckpointLedger, CheckpointPlugin};
use photo_platformer::config::{ConfigLoaded, EMBEDDED_CONFIG, EnemySpawnConfig, GameConfig};
use photo_platformer::core::GameplaySet;
use photo_platformer::core::hit_stop::HitStopPlugin;
use photo_platformer::core::time_scale::TimeScalePlugin;
use photo_platformer::enemy::spawn::spawn_enemy;
use photo_platformer::enemy::{EnemyHit, EnemyId, EnemyLifecycle, EnemyPlugin, EnemyRegistry, LifecycleState};
use photo_platformer::input::PlayerIntent;
use photo_platformer::player::LifeCyclePlugin;
use photo_platformer::player::components::LocomotionState;
use photo_platformer::player::spawn::player_gameplay_bundle;
use photo_platformer::player::vitals::{DamagePlayer, DamageSource, GameOver, PlayerVitals, VitalState};
use photo_platformer::session::LifeBudget;

/// Enough frames at 50ms for the death sequence to finish.
const DEATH_FRAMES: usize = 40;

#[derive(Resource, Default)]
struct GameOverCount(usize);

fn count_game_over(mut game_over: MessageReader<GameOver>, mut count: ResMut<GameOverCount>) {
  count.0 += game_over.read().count();
}

fn test_app(lives: u32) -> App {
  let config = ConfigLoaded::from(GameConfig::from_toml(EMBEDDED_CONFIG).unwrap());

  let mut app = App::new();
  app
    .add_plugins(MinimalPlugins)
    .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_millis(50)))
    .insert_resource(config)
    .insert_resource(LifeBudget::new(lives))
    .add_plugins((
      TimeScalePlugin,
      HitStopPlugin,
      LifeCyclePlugin,
      EnemyPlugin,
      CheckpointPlugin,
    ))
    .init_resource::<GameOverCount>()
    .add_systems(Update, count_game_over.after(GameplaySet::Presentation));
  app.update();
  app
}

fn spawn_player(app: &mut App, at: Vec2) -> Entity {
  let config = app.world().resource::<ConfigLoaded>().clone();
  app
    .world_mut()
    .spawn(player_gameplay_bundle(&config, at))
    .insert(LocomotionState::Grounded)
    .id()
}

fn spawn_still_enemy(app: &mut App, x: f32) -> (Entity, EnemyId) {
  let config = app.world().resource::<ConfigLoaded>().clone();
  let spawn = EnemySpawnConfig {
    x,
    y: 0.0,
    patrol_min: x,
    patrol_max: x,
    speed: 0.0,
    start_moving_right: true,
    shooter: false,
  };

  let world = app.world_mut();
  let mut registry = world.remove_resource::<EnemyRegistry>().unwrap();
  let entity = {
    let mut commands = world.commands();
    spawn_enemy(&mut commands, &mut registry, &config, &spawn)
  };
  world.flush();
  world.insert_resource(registry);
  (entity, *world.get::<EnemyId>(entity).unwrap())
}

fn kill_player(app: &mut App) {
  app.world_mut().write_message(DamagePlayer {
    source: DamageSource::Debug,
  });
  for _ in 0..DEATH_FRAMES {
    app.update();
  }
}

fn hold_capture(app: &mut App, player: Entity, frames: usize) {
  for held in std::iter::repeat_n(true, frames).chain([false]) {
    app
      .world_mut()
      .get_mut::<PlayerIntent>(player)
      .unwrap()
      .set_capture_held(held);
    app.update();
  }
}

fn enemy_state(app: &App, enemy: Entity) -> LifecycleState {
  app.world().get::<EnemyLifecycle>(enemy).unwrap().state()
}

#[test]
fn last_life_respawns_then_next_death_is_game_over() {
  let mut app = test_app(1);
  let player = spawn_player(&mut app, Vec2::new(0.0, 40.0));

  // Move away so the respawn teleport is observable
  app
    .world_mut()
    .get_mut::<Transform>(player)
    .unwrap()
    .translation
    .x = 200.0;

  kill_player(&mut app);
  let world = app.world();
  assert!(world.get::<PlayerVitals>(player).unwrap().is_alive());
  assert_eq!(
    world.get::<Transform>(player).unwrap().translation.truncate(),
    Vec2::new(0.0, 40.0)
  );
  assert_eq!(world.resource::<LifeBudget>().remaining(), 0);
  assert_eq!(world.resource::<GameOverCount>().0, 0);

  kill_player(&mut app);
  let world = app.world();
  assert_eq!(
    world.get::<PlayerVitals>(player).unwrap().state(),
    VitalState::AwaitingOutcome
  );
  assert_eq!(world.resource::<GameOverCount>().0, 1);

  // Further damage is ignored while waiting on the outcome
  kill_player(&mut app);
  assert_eq!(app.world().resource::<GameOverCount>().0, 1);
}

#[test]
fn capture_round_trip_restores_exact_snapshot() {
  let mut app = test_app(3);
  let player = spawn_player(&mut app, Vec2::ZERO);
  let (a, id_a) = spawn_still_enemy(&mut app, 300.0);
  let (b, id_b) = spawn_still_enemy(&mut app, 400.0);
  let (c, id_c) = spawn_still_enemy(&mut app, 500.0);

  app.world_mut().write_message(EnemyHit { enemy: a });
  app.world_mut().write_message(EnemyHit { enemy: b });
  app.update();
  hold_capture(&mut app, player, 15);
  assert_eq!(app.world().get::<CaptureGate>(player).unwrap().photos(), 2);

  app.world_mut().write_message(EnemyHit { enemy: c });
  app.update();
  kill_player(&mut app);

  let ledger = app.world().resource::<CheckpointLedger>();
  assert_eq!(ledger.live().len(), 2);
  assert!(ledger.is_dead(id_a) && ledger.is_dead(id_b) && !ledger.is_dead(id_c));
  assert_eq!(enemy_state(&app, a), LifecycleState::Dead);
  assert_eq!(enemy_state(&app, b), LifecycleState::Dead);
  assert_eq!(enemy_state(&app, c), LifecycleState::Alive);

  // The revived enemy can die again and is tracked again
  app.world_mut().write_message(EnemyHit { enemy: c });
  app.update();
  assert!(app.world().resource::<CheckpointLedger>().is_dead(id_c));

  // Photos are not refunded by a respawn
  assert_eq!(app.world().get::<CaptureGate>(player).unwrap().photos(), 2);
}
