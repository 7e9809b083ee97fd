//! Ranged enemies.

use bevy::ecs::message::MessageWriter;
use bevy::prelude::*;

use super::lifecycle::{Enemy, EnemyLifecycle};
use super::projectile::spawn_projectile;
use crate::config::{ConfigLoaded, ShooterConfig};
use crate::core::audio::{PlaySfx, SfxCue};
use crate::player::components::Player;

/// Fires at the player whenever it is within `range` and the interval has
/// passed. Only alive enemies shoot.
#[derive(Component, Debug, Clone)]
pub struct Shooter {
  pub interval: f32,
  pub range: f32,
  ready_at: f32,
}

impl Shooter {
  pub fn new(config: &ShooterConfig) -> Self {
    Self {
      interval: config.interval_secs,
      range: config.range,
      ready_at: 0.0,
    }
  }

  /// Returns true if a shot goes off at `now`, starting the interval.
  pub fn try_fire(&mut self, distance: f32, now: f32) -> bool {
    if distance > self.range || now < self.ready_at {
      return false;
    }
    self.ready_at = now + self.interval;
    true
  }
}

pub fn enemy_shoot(
  mut commands: Commands,
  time: Res<Time>,
  config: Res<ConfigLoaded>,
  players: Query<&Transform, With<Player>>,
  mut shooters: Query<(Entity, &mut Shooter, &EnemyLifecycle, &Transform), With<Enemy>>,
  mut sfx: MessageWriter<PlaySfx>,
) {
  let Ok(player) = players.single() else {
    return;
  };
  let target = player.translation.truncate();
  let now = time.elapsed_secs();

  for (entity, mut shooter, lifecycle, transform) in &mut shooters {
    if !lifecycle.is_alive() {
      continue;
    }
    let origin = transform.translation.truncate();
    if !shooter.try_fire(origin.distance(target), now) {
      continue;
    }

    let direction = (target - origin).try_normalize().unwrap_or(Vec2::X);
    spawn_projectile(&mut commands, &config.shooter, entity, origin, direction);
    sfx.write(PlaySfx::new(SfxCue::EnemyShoot, config.shooter.shoot_volume));
    debug!("{:?} fired toward ({:.0}, {:.0})", entity, target.x, target.y);
  }
}
