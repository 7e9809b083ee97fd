//! Level construction and teardown.
//!
//! Everything spawned here carries [`LevelEntity`] so a reload can sweep the
//! whole level away and build it again from config.

use bevy::ecs::message::{MessageReader, MessageWriter};
use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

use super::hazards::{KillHeight, KillZone};
use super::hint::HintZone;
use super::lives::LifeBudget;
use super::{GameOverScreen, LevelCommand, LevelEntered, LevelEntity};
use crate::checkpoint::CheckpointLedger;
use crate::checkpoint::tutorial::CheckpointTutorial;
use crate::config::ConfigLoaded;
use crate::core::hit_stop::HitStops;
use crate::core::pause::PauseState;
use crate::core::time_scale::{GlobalAudioPause, GlobalTimeScale};
use crate::enemy::EnemyRegistry;
use crate::enemy::spawn::spawn_enemy;
use crate::player::spawn::spawn_player_entity;

/// Solid ground. Projectiles stop on it.
#[derive(Component, Debug, Clone, Copy)]
pub struct Platform {
  pub area: Rect,
}

pub fn spawn_level(commands: &mut Commands, config: &ConfigLoaded, registry: &mut EnemyRegistry) {
  let level = &config.level;

  for platform in &level.platforms {
    // Rapier cuboid uses half-extents
    commands.spawn((
      LevelEntity,
      Platform {
        area: platform.to_rect(),
      },
      Sprite::from_color(
        Color::srgb(0.32, 0.34, 0.4),
        Vec2::new(platform.width, platform.height),
      ),
      Transform::from_xyz(platform.x, platform.y, 0.0),
      RigidBody::Fixed,
      Collider::cuboid(platform.width / 2.0, platform.height / 2.0),
    ));
  }

  for zone in &level.kill_zones {
    commands.spawn((
      LevelEntity,
      KillZone {
        area: zone.to_rect(),
      },
      Sprite::from_color(
        Color::srgba(0.8, 0.15, 0.1, 0.5),
        Vec2::new(zone.width, zone.height),
      ),
      Transform::from_xyz(zone.x, zone.y, 1.0),
    ));
  }
  commands.insert_resource(KillHeight(level.kill_y));

  for tutorial in &level.tutorials {
    let area = tutorial.area;
    commands.spawn((
      LevelEntity,
      CheckpointTutorial::new(tutorial),
      Sprite::from_color(
        Color::srgba(0.95, 0.85, 0.3, 0.25),
        Vec2::new(area.width, area.height),
      ),
      Transform::from_xyz(area.x, area.y, 1.0),
    ));
  }

  for hint in &level.hints {
    commands.spawn((
      LevelEntity,
      HintZone::new(hint),
      Transform::from_xyz(hint.area.x, hint.area.y, 1.0),
    ));
  }

  for spawn in &level.enemies {
    spawn_enemy(commands, registry, config, spawn);
  }

  let spawn = Vec2::new(config.player.spawn_x, config.player.spawn_y);
  spawn_player_entity(commands, config, spawn);
}

/// Tears the level down and builds it again. A restart also replaces the
/// life budget. Several commands in one frame collapse into one, with restart
/// winning over reload.
#[allow(clippy::too_many_arguments)]
pub fn handle_level_commands(
  mut commands: Commands,
  mut requests: MessageReader<LevelCommand>,
  config: Res<ConfigLoaded>,
  level_entities: Query<Entity, With<LevelEntity>>,
  mut scale: ResMut<GlobalTimeScale>,
  mut audio: ResMut<GlobalAudioPause>,
  pause: Option<ResMut<PauseState>>,
  hit_stops: Option<ResMut<HitStops>>,
  mut entered: MessageWriter<LevelEntered>,
) {
  let Some(command) = requests.read().copied().reduce(LevelCommand::max) else {
    return;
  };

  for entity in &level_entities {
    commands.entity(entity).despawn();
  }

  commands.insert_resource(CheckpointLedger::default());
  let mut registry = EnemyRegistry::default();
  spawn_level(&mut commands, &config, &mut registry);
  commands.insert_resource(registry);

  // User-initiated boundary: every override goes back to neutral
  scale.reset();
  audio.reset();
  if let Some(mut pause) = pause {
    pause.clear();
  }
  if let Some(mut hit_stops) = hit_stops {
    hit_stops.clear();
  }
  commands.remove_resource::<GameOverScreen>();

  let restart = command == LevelCommand::Restart;
  if restart {
    commands.remove_resource::<LifeBudget>();
    commands.insert_resource(LifeBudget::new(config.lives.starting));
  }

  info!("Level {}", if restart { "restarted" } else { "reloaded" });
  entered.write(LevelEntered { restart });
}

/// Every entry into the level starts with a full life budget.
pub fn reset_lives_on_entry(
  mut commands: Commands,
  mut entered: MessageReader<LevelEntered>,
  lives: Option<ResMut<LifeBudget>>,
  config: Res<ConfigLoaded>,
) {
  if entered.read().count() == 0 {
    return;
  }
  match lives {
    Some(mut lives) => {
      lives.reset();
      debug!("Lives reset to {}", lives.remaining());
    }
    None => {
      commands.insert_resource(LifeBudget::new(config.lives.starting));
      debug!("Lives created with {}", config.lives.starting);
    }
  }
}
