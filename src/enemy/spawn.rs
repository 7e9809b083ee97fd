use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

use super::contact::ContactDamage;
use super::identity::EnemyRegistry;
use super::lifecycle::{DeathFeel, Enemy, EnemyLifecycle, EnemyLook};
use super::patrol::Patrol;
use super::shooter::Shooter;
use crate::config::{ConfigLoaded, EnemySpawnConfig};
use crate::session::LevelEntity;

/// Spawns one enemy and registers its identity.
pub fn spawn_enemy(
  commands: &mut Commands,
  registry: &mut EnemyRegistry,
  config: &ConfigLoaded,
  spawn: &EnemySpawnConfig,
) -> Entity {
  let enemy = &config.enemy;
  let size = Vec2::new(enemy.size[0], enemy.size[1]);
  let facing = if spawn.start_moving_right { 1.0 } else { -1.0 };

  let entity = commands
    .spawn((
      Enemy,
      LevelEntity,
      EnemyLifecycle::default(),
      EnemyLook {
        scale: Vec3::ONE,
        alpha: 1.0,
      },
      DeathFeel::from_config(enemy, &config.hit_stop),
      Patrol::new(
        spawn.patrol_min,
        spawn.patrol_max,
        spawn.speed,
        enemy.turn_pause_secs,
        spawn.start_moving_right,
      ),
      ContactDamage::new(enemy.contact_radius, enemy.contact_cooldown),
      Sprite::from_color(
        Color::srgb(enemy.color[0], enemy.color[1], enemy.color[2]),
        size,
      ),
      Transform::from_xyz(spawn.x, spawn.y, 5.0).with_scale(Vec3::new(facing, 1.0, 1.0)),
      Visibility::default(),
      RigidBody::KinematicPositionBased,
      // Rapier cuboid uses half-extents
      Collider::cuboid(size.x / 2.0, size.y / 2.0),
      Sensor,
    ))
    .id();

  if spawn.shooter {
    commands.entity(entity).insert(Shooter::new(&config.shooter));
  }

  let id = registry.assign(entity);
  commands.entity(entity).insert(id);
  debug!("Spawned {} at ({}, {})", id, spawn.x, spawn.y);
  entity
}
