use bevy::ecs::message::MessageWriter;
use bevy::prelude::*;

use super::components::{Facing, MovementLocks, Player};
use super::vitals::PlayerVitals;
use crate::config::CombatConfig;
use crate::enemy::{Enemy, EnemyHit, EnemyLifecycle};
use crate::input::PlayerIntent;

/// An attack started this frame: its hit circle.
#[derive(Message, Debug, Clone, Copy)]
pub struct MeleeSwing {
  pub point: Vec2,
  pub range: f32,
}

/// Melee attack in front of the player.
#[derive(Component, Debug, Clone)]
pub struct MeleeAttack {
  pub range: f32,
  pub offset: f32,
  pub cooldown: f32,
  ready_at: f32,
}

impl MeleeAttack {
  pub fn new(config: &CombatConfig) -> Self {
    Self {
      range: config.attack_range,
      offset: config.attack_offset,
      cooldown: config.attack_cooldown,
      ready_at: 0.0,
    }
  }

  /// Starts the cooldown if the attack is ready at `now`.
  pub fn try_start(&mut self, now: f32) -> bool {
    if now < self.ready_at {
      return false;
    }
    self.ready_at = now + self.cooldown;
    true
  }

  pub fn is_cooling_down(&self, now: f32) -> bool {
    now < self.ready_at
  }

  /// Centre of the hit circle for a player at `position`.
  pub fn point(&self, position: Vec2, facing: Facing) -> Vec2 {
    position + Vec2::X * self.offset * facing.sign()
  }
}

pub fn player_attack(
  time: Res<Time>,
  mut players: Query<
    (&PlayerIntent, &PlayerVitals, &MovementLocks, &Facing, &Transform, &mut MeleeAttack),
    With<Player>,
  >,
  enemies: Query<(Entity, &EnemyLifecycle, &Transform), With<Enemy>>,
  mut hits: MessageWriter<EnemyHit>,
  mut swings: MessageWriter<MeleeSwing>,
) {
  let now = time.elapsed_secs();

  for (intent, vitals, locks, facing, transform, mut attack) in &mut players {
    if !intent.attack_pressed || !vitals.is_alive() || !locks.is_empty() {
      continue;
    }
    if !attack.try_start(now) {
      continue;
    }

    let point = attack.point(transform.translation.truncate(), *facing);
    swings.write(MeleeSwing {
      point,
      range: attack.range,
    });
    for (enemy, lifecycle, enemy_transform) in &enemies {
      if lifecycle.is_alive() && enemy_transform.translation.truncate().distance(point) <= attack.range
      {
        debug!("Attack hit {:?}", enemy);
        hits.write(EnemyHit { enemy });
      }
    }
  }
}
