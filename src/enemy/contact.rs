use bevy::ecs::message::MessageWriter;
use bevy::prelude::*;

use super::lifecycle::{Enemy, EnemyLifecycle};
use crate::player::components::Player;
use crate::player::vitals::{DamagePlayer, DamageSource};

/// Hurts the player on touch, at most once per `cooldown`.
#[derive(Component, Debug, Clone)]
pub struct ContactDamage {
  pub radius: f32,
  pub cooldown: f32,
  ready_at: f32,
}

impl ContactDamage {
  pub fn new(radius: f32, cooldown: f32) -> Self {
    Self {
      radius,
      cooldown,
      ready_at: 0.0,
    }
  }

  /// Returns true if a hit lands at time `now`, starting the cooldown.
  pub fn try_hit(&mut self, distance: f32, now: f32) -> bool {
    if distance > self.radius || now < self.ready_at {
      return false;
    }
    self.ready_at = now + self.cooldown;
    true
  }
}

pub fn enemy_contact_damage(
  time: Res<Time>,
  players: Query<&Transform, With<Player>>,
  mut enemies: Query<(Entity, &mut ContactDamage, &EnemyLifecycle, &Transform), With<Enemy>>,
  mut damage: MessageWriter<DamagePlayer>,
) {
  let Ok(player) = players.single() else {
    return;
  };
  let player_pos = player.translation.truncate();
  let now = time.elapsed_secs();

  for (entity, mut contact, lifecycle, transform) in &mut enemies {
    if !lifecycle.is_alive() {
      continue;
    }
    let distance = transform.translation.truncate().distance(player_pos);
    if contact.try_hit(distance, now) {
      trace!("Contact damage from {:?}", entity);
      damage.write(DamagePlayer {
        source: DamageSource::Enemy(entity),
      });
    }
  }
}
