use bevy::color::Alpha;
use bevy::prelude::*;

use super::tutorial::TutorialPhase;
use super::*;
use crate::config::ConfigLoaded;
use crate::core::time_scale::{GlobalTimeScale, OverrideOwner};
use crate::enemy::cosmetics::DeathCosmetic;
use crate::enemy::{EnemyHit, EnemyLifecycle, LifecycleState};
use crate::player::vitals::{DamagePlayer, DamageSource, PlayerVitals};
use crate::session::LifeBudget;
use crate::test_support::*;

fn hit(app: &mut App, enemy: Entity) {
  app.world_mut().write_message(EnemyHit { enemy });
}

fn state(app: &App, enemy: Entity) -> LifecycleState {
  app.world().get::<EnemyLifecycle>(enemy).unwrap().state()
}

fn photos(app: &App, player: Entity) -> u32 {
  app.world().get::<CaptureGate>(player).unwrap().photos()
}

fn time_scale(app: &App) -> f32 {
  app.world().resource::<GlobalTimeScale>().current()
}

#[test]
fn respawn_rolls_enemies_back_to_capture() {
  let mut app = gameplay_app();
  let player = spawn_player(&mut app, Vec2::ZERO);
  let (a, id_a) = spawn_enemy_at(&mut app, Vec2::new(300.0, 0.0));
  let (b, id_b) = spawn_enemy_at(&mut app, Vec2::new(400.0, 0.0));
  let (c, id_c) = spawn_enemy_at(&mut app, Vec2::new(500.0, 0.0));

  hit(&mut app, a);
  hit(&mut app, b);
  app.update();

  hold_capture(&mut app, player, 15);
  {
    let ledger = app.world().resource::<CheckpointLedger>();
    assert_eq!(ledger.snapshot().len(), 2);
    assert!(ledger.in_snapshot(id_a) && ledger.in_snapshot(id_b));
  }
  assert_eq!(photos(&app, player), 2);

  // Wander off and kill one more after the capture
  app
    .world_mut()
    .get_mut::<Transform>(player)
    .unwrap()
    .translation
    .x = 150.0;
  hit(&mut app, c);
  app.update();
  assert!(app.world().resource::<CheckpointLedger>().is_dead(id_c));

  app.world_mut().write_message(DamagePlayer {
    source: DamageSource::Debug,
  });
  run(&mut app, 40);

  let world = app.world();
  let position = world.get::<Transform>(player).unwrap().translation;
  assert_eq!(position.truncate(), Vec2::ZERO);
  assert!(world.get::<PlayerVitals>(player).unwrap().is_alive());
  assert_eq!(world.resource::<LifeBudget>().remaining(), 2);

  let ledger = world.resource::<CheckpointLedger>();
  assert!(ledger.is_dead(id_a) && ledger.is_dead(id_b));
  assert!(!ledger.is_dead(id_c));

  assert_eq!(state(&app, a), LifecycleState::Dead);
  assert_eq!(state(&app, b), LifecycleState::Dead);
  assert_eq!(state(&app, c), LifecycleState::Alive);
  assert_eq!(*world.get::<Visibility>(a).unwrap(), Visibility::Hidden);
  assert_eq!(*world.get::<Visibility>(c).unwrap(), Visibility::Inherited);
}

#[test]
fn early_release_restores_time_and_keeps_photos() {
  let mut app = gameplay_app();
  let player = spawn_player(&mut app, Vec2::ZERO);

  for _ in 0..3 {
    set_capture(&mut app, player, true);
    app.update();
  }
  assert!((time_scale(&app) - 0.6).abs() < 1e-6);

  set_capture(&mut app, player, false);
  app.update();
  assert_eq!(time_scale(&app), 1.0);
  assert_eq!(photos(&app, player), 3);
  assert!(app.world().resource::<CheckpointLedger>().snapshot().is_empty());
}

#[test]
fn despawned_player_hands_back_slow_motion() {
  let mut app = gameplay_app();
  let player = spawn_player(&mut app, Vec2::ZERO);

  for _ in 0..3 {
    set_capture(&mut app, player, true);
    app.update();
  }
  assert!((time_scale(&app) - 0.6).abs() < 1e-6);

  app.world_mut().despawn(player);
  app.update();

  let scale = app.world().resource::<GlobalTimeScale>();
  assert_eq!(scale.current(), 1.0);
  assert_eq!(scale.depth(), 0);
}

#[test]
fn despawned_player_under_pause_stays_paused() {
  let mut app = gameplay_app();
  let player = spawn_player(&mut app, Vec2::ZERO);

  for _ in 0..3 {
    set_capture(&mut app, player, true);
    app.update();
  }
  app
    .world_mut()
    .resource_mut::<GlobalTimeScale>()
    .engage(OverrideOwner::Pause, 0.0);

  app.world_mut().despawn(player);
  app.update();
  {
    let scale = app.world().resource::<GlobalTimeScale>();
    assert_eq!(scale.current(), 0.0);
    assert_eq!(scale.depth(), 1);
  }

  let resumed = app
    .world_mut()
    .resource_mut::<GlobalTimeScale>()
    .release(OverrideOwner::Pause);
  assert_eq!(resumed, Some(1.0));
}

#[test]
fn one_hold_fires_once() {
  let mut app = gameplay_app();
  let player = spawn_player(&mut app, Vec2::ZERO);

  // Long enough for two captures if the latch failed
  hold_capture(&mut app, player, 30);
  assert_eq!(photos(&app, player), 2);
  assert_eq!(time_scale(&app), 1.0);
}

#[test]
fn restore_twice_matches_once() {
  let mut app = gameplay_app();
  let (a, id_a) = spawn_enemy_at(&mut app, Vec2::new(300.0, 0.0));
  let (b, _) = spawn_enemy_at(&mut app, Vec2::new(400.0, 0.0));

  hit(&mut app, a);
  app.update();
  app.world_mut().resource_mut::<CheckpointLedger>().save_snapshot();
  hit(&mut app, b);
  run(&mut app, 15);

  app.world_mut().write_message(RestoreCheckpoint);
  app.update();
  let ledger_once = app.world().resource::<CheckpointLedger>().live().clone();
  let states_once = (state(&app, a), state(&app, b));

  app.world_mut().write_message(RestoreCheckpoint);
  app.update();
  assert_eq!(app.world().resource::<CheckpointLedger>().live(), &ledger_once);
  assert_eq!((state(&app, a), state(&app, b)), states_once);
  assert_eq!(states_once, (LifecycleState::Dead, LifecycleState::Alive));
  assert!(ledger_once.contains(&id_a));
}

#[test]
fn dying_enemy_is_recorded_before_its_animation_ends() {
  let mut app = gameplay_app();
  let (enemy, id) = spawn_enemy_at(&mut app, Vec2::new(300.0, 0.0));

  hit(&mut app, enemy);
  app.update();

  assert_eq!(state(&app, enemy), LifecycleState::Dying);
  assert!(app.world().resource::<CheckpointLedger>().is_dead(id));

  // A capture now includes it
  app.world_mut().resource_mut::<CheckpointLedger>().save_snapshot();
  assert!(app.world().resource::<CheckpointLedger>().in_snapshot(id));
}

#[test]
fn restore_mid_animation_revives_cleanly() {
  let mut app = gameplay_app();
  let (enemy, id) = spawn_enemy_at(&mut app, Vec2::new(300.0, 0.0));
  let alpha = app.world().get::<Sprite>(enemy).unwrap().color.alpha();

  hit(&mut app, enemy);
  app.update();
  assert!(app.world().get::<DeathCosmetic>(enemy).is_some());

  app.world_mut().write_message(RestoreCheckpoint);
  app.update();

  let world = app.world();
  assert_eq!(state(&app, enemy), LifecycleState::Alive);
  assert!(!world.resource::<CheckpointLedger>().is_dead(id));
  assert!(world.get::<DeathCosmetic>(enemy).is_none());
  assert_eq!(world.get::<Sprite>(enemy).unwrap().color.alpha(), alpha);
  assert_eq!(*world.get::<Visibility>(enemy).unwrap(), Visibility::Inherited);

  // The cancelled animation never finishes the death
  run(&mut app, 20);
  assert_eq!(state(&app, enemy), LifecycleState::Alive);
}

fn spawn_tutorial(app: &mut App) -> Entity {
  let config = app.world().resource::<ConfigLoaded>().clone();
  let tutorial = CheckpointTutorial::new(&config.level.tutorials[0]);
  let center = tutorial.area.center();
  app
    .world_mut()
    .spawn((
      tutorial,
      Sprite::from_color(Color::WHITE, Vec2::splat(16.0)),
      Transform::from_translation(center.extend(1.0)),
    ))
    .id()
}

fn tutorial_phase(app: &App, tutorial: Entity) -> TutorialPhase {
  app
    .world()
    .get::<CheckpointTutorial>(tutorial)
    .unwrap()
    .phase()
}

#[test]
fn tutorial_captures_and_hands_the_gate_back() {
  let mut app = gameplay_app();
  let tutorial = spawn_tutorial(&mut app);
  let center = app
    .world()
    .get::<CheckpointTutorial>(tutorial)
    .unwrap()
    .area
    .center();
  let player = spawn_player(&mut app, center);

  app.update();
  assert!(matches!(
    tutorial_phase(&app, tutorial),
    TutorialPhase::Active { .. }
  ));
  assert!(!app.world().get::<CaptureGate>(player).unwrap().input_enabled());
  assert!((time_scale(&app) - 0.8).abs() < 1e-6);

  for _ in 0..15 {
    set_capture(&mut app, player, true);
    app.update();
  }
  assert!(matches!(
    tutorial_phase(&app, tutorial),
    TutorialPhase::Finishing { .. }
  ));
  assert_eq!(photos(&app, player), 2);
  assert_eq!(time_scale(&app), 1.0);
  // Still held: the gate stays off so this hold cannot capture again
  assert!(!app.world().get::<CaptureGate>(player).unwrap().input_enabled());

  set_capture(&mut app, player, false);
  app.update();
  assert!(app.world().get::<CaptureGate>(player).unwrap().input_enabled());

  run(&mut app, 10);
  assert_eq!(tutorial_phase(&app, tutorial), TutorialPhase::Done);
  assert_eq!(photos(&app, player), 2);
}

#[test]
fn removed_tutorial_gives_back_time_and_gate() {
  let mut app = gameplay_app();
  let tutorial = spawn_tutorial(&mut app);
  let center = app
    .world()
    .get::<CheckpointTutorial>(tutorial)
    .unwrap()
    .area
    .center();
  let player = spawn_player(&mut app, center);

  app.update();
  assert!((time_scale(&app) - 0.8).abs() < 1e-6);

  app.world_mut().despawn(tutorial);
  app.update();
  assert_eq!(time_scale(&app), 1.0);
  assert!(app.world().get::<CaptureGate>(player).unwrap().input_enabled());
}
