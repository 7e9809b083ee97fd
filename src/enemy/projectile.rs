//! Enemy projectiles. The player's melee swing bats them back, after which
//! they kill enemies instead of hurting the player.

use bevy::ecs::message::{MessageReader, MessageWriter};
use bevy::prelude::*;

use super::lifecycle::{Enemy, EnemyHit, EnemyLifecycle};
use crate::config::{ConfigLoaded, ShooterConfig};
use crate::core::audio::{PlaySfx, SfxCue};
use crate::player::combat::MeleeSwing;
use crate::player::components::Player;
use crate::player::vitals::{DamagePlayer, DamageSource};
use crate::session::LevelEntity;
use crate::session::level::Platform;

fn to_color(rgb: [f32; 3]) -> Color {
  Color::srgb(rgb[0], rgb[1], rgb[2])
}

#[derive(Component, Debug, Clone)]
pub struct Projectile {
  pub velocity: Vec2,
  pub radius: f32,
  /// The enemy that fired it.
  pub source: Entity,
  life_left: f32,
  reflected: bool,
}

impl Projectile {
  pub fn new(source: Entity, velocity: Vec2, radius: f32, lifetime: f32) -> Self {
    Self {
      velocity,
      radius,
      source,
      life_left: lifetime,
      reflected: false,
    }
  }

  pub fn is_reflected(&self) -> bool {
    self.reflected
  }

  /// Spends `dt` of lifetime. Returns false once none is left.
  pub fn tick(&mut self, dt: f32) -> bool {
    self.life_left -= dt;
    self.life_left > 0.0
  }

  /// Sends the projectile away from `from`, `multiplier` times faster.
  /// A projectile reflects at most once.
  pub fn reflect(&mut self, position: Vec2, from: Vec2, multiplier: f32) -> bool {
    if self.reflected {
      return false;
    }
    let speed = self.velocity.length() * multiplier;
    let direction = (position - from)
      .try_normalize()
      .unwrap_or(-self.velocity.normalize_or_zero());
    self.velocity = direction * speed;
    self.reflected = true;
    true
  }
}

pub fn spawn_projectile(
  commands: &mut Commands,
  config: &ShooterConfig,
  source: Entity,
  origin: Vec2,
  direction: Vec2,
) -> Entity {
  commands
    .spawn((
      Projectile::new(
        source,
        direction * config.projectile_speed,
        config.projectile_radius,
        config.projectile_lifetime_secs,
      ),
      LevelEntity,
      Sprite::from_color(
        to_color(config.projectile_color),
        Vec2::splat(config.projectile_radius * 2.0),
      ),
      Transform::from_translation(origin.extend(6.0)),
      Visibility::default(),
    ))
    .id()
}

/// Moves projectiles on virtual time and despawns the expired ones.
pub fn move_projectiles(
  mut commands: Commands,
  time: Res<Time>,
  mut projectiles: Query<(Entity, &mut Projectile, &mut Transform)>,
) {
  let dt = time.delta_secs();
  for (entity, mut projectile, mut transform) in &mut projectiles {
    if !projectile.tick(dt) {
      trace!("Projectile {:?} expired", entity);
      commands.entity(entity).despawn();
      continue;
    }
    transform.translation += (projectile.velocity * dt).extend(0.0);
  }
}

pub fn reflect_projectiles(
  mut swings: MessageReader<MeleeSwing>,
  config: Res<ConfigLoaded>,
  mut projectiles: Query<(Entity, &mut Projectile, &Transform, &mut Sprite)>,
) {
  for swing in swings.read() {
    for (entity, mut projectile, transform, mut sprite) in &mut projectiles {
      let position = transform.translation.truncate();
      if position.distance(swing.point) > swing.range + projectile.radius {
        continue;
      }
      if projectile.reflect(position, swing.point, config.shooter.reflect_speed_multiplier) {
        sprite.color = to_color(config.shooter.reflected_color);
        debug!("Reflected projectile {:?}", entity);
      }
    }
  }
}

/// Resolves what each projectile touched this frame. Every impact removes
/// the projectile.
#[allow(clippy::too_many_arguments)]
pub fn projectile_hits(
  mut commands: Commands,
  config: Res<ConfigLoaded>,
  players: Query<&Transform, With<Player>>,
  enemies: Query<(Entity, &EnemyLifecycle, &Transform), With<Enemy>>,
  platforms: Query<&Platform>,
  projectiles: Query<(Entity, &Projectile, &Transform)>,
  mut damage: MessageWriter<DamagePlayer>,
  mut hits: MessageWriter<EnemyHit>,
  mut sfx: MessageWriter<PlaySfx>,
) {
  let player_size = Vec2::new(config.player.size[0], config.player.size[1]);
  let enemy_size = Vec2::new(config.enemy.size[0], config.enemy.size[1]);
  let player = players.single().ok().map(|t| t.translation.truncate());

  for (entity, projectile, transform) in &projectiles {
    let position = transform.translation.truncate();
    let touches = |center: Vec2, size: Vec2| {
      Rect::from_center_size(center, size)
        .inflate(projectile.radius)
        .contains(position)
    };

    let impact = if projectile.is_reflected() {
      let target = enemies.iter().find(|(_, lifecycle, enemy)| {
        lifecycle.is_alive() && touches(enemy.translation.truncate(), enemy_size)
      });
      if let Some((enemy, _, _)) = target {
        debug!("Reflected projectile hit {:?}", enemy);
        hits.write(EnemyHit { enemy });
        true
      } else {
        false
      }
    } else if player.is_some_and(|p| touches(p, player_size)) {
      damage.write(DamagePlayer {
        source: DamageSource::Enemy(projectile.source),
      });
      true
    } else {
      false
    };

    let impact = impact
      || platforms
        .iter()
        .any(|platform| platform.area.inflate(projectile.radius).contains(position));

    if impact {
      sfx.write(PlaySfx::new(SfxCue::ProjectileHit, config.shooter.hit_volume));
      commands.entity(entity).despawn();
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn projectile() -> Projectile {
    Projectile::new(Entity::PLACEHOLDER, Vec2::new(-100.0, 0.0), 5.0, 3.0)
  }

  #[test]
  fn reflects_once_away_from_the_swing() {
    let mut p = projectile();
    assert!(p.reflect(Vec2::new(10.0, 0.0), Vec2::ZERO, 1.5));
    assert!(p.is_reflected());
    assert_eq!(p.velocity, Vec2::new(150.0, 0.0));

    assert!(!p.reflect(Vec2::new(-10.0, 0.0), Vec2::ZERO, 1.5));
    assert_eq!(p.velocity, Vec2::new(150.0, 0.0));
  }

  #[test]
  fn reflect_from_its_own_position_turns_it_around() {
    let mut p = projectile();
    p.reflect(Vec2::ZERO, Vec2::ZERO, 1.0);
    assert_eq!(p.velocity, Vec2::new(100.0, 0.0));
  }

  #[test]
  fn lifetime_runs_out() {
    let mut p = projectile();
    assert!(p.tick(2.0));
    assert!(!p.tick(1.0));
  }
}
