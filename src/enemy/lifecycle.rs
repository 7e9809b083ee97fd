use bevy::color::Alpha;
use bevy::ecs::message::{MessageReader, MessageWriter};
use bevy::prelude::*;
use bevy_rapier2d::prelude::{ColliderDisabled, RigidBodyDisabled};

use super::cosmetics::DeathCosmetic;
use super::identity::EnemyId;
use crate::checkpoint::ledger::CheckpointLedger;
use crate::config::{EnemyConfig, HitStopConfig};
use crate::core::audio::{PlaySfx, SfxCue};
use crate::core::hit_stop::HitStopRequest;

#[derive(Component)]
pub struct Enemy;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LifecycleState {
  #[default]
  Alive,
  /// Cosmetic death sequence in progress. Already harmless and already
  /// recorded in the ledger.
  Dying,
  Dead,
}

#[derive(Component, Debug, Default)]
pub struct EnemyLifecycle {
  state: LifecycleState,
}

impl EnemyLifecycle {
  pub fn state(&self) -> LifecycleState {
    self.state
  }

  pub fn is_alive(&self) -> bool {
    self.state == LifecycleState::Alive
  }

  /// Alive → Dying. Returns false (and does nothing) from any other state.
  pub fn die(&mut self) -> bool {
    if self.state != LifecycleState::Alive {
      return false;
    }
    self.state = LifecycleState::Dying;
    true
  }

  /// Dying → Dead, once the cosmetic sequence is over.
  pub fn finish_dying(&mut self) -> bool {
    if self.state != LifecycleState::Dying {
      return false;
    }
    self.state = LifecycleState::Dead;
    true
  }

  /// Back to Alive from any state. Returns whether anything changed.
  pub fn reset(&mut self) -> bool {
    let changed = self.state != LifecycleState::Alive;
    self.state = LifecycleState::Alive;
    changed
  }

  /// Straight to Dead from any state, skipping cosmetics.
  pub fn force_dead(&mut self) {
    self.state = LifecycleState::Dead;
  }
}

/// Appearance captured at spawn and restored by [`reset_enemy`].
#[derive(Component, Debug, Clone, Copy)]
pub struct EnemyLook {
  pub scale: Vec3,
  pub alpha: f32,
}

/// Tuning for the kill presentation.
#[derive(Component, Debug, Clone, Copy)]
pub struct DeathFeel {
  pub pop_secs: f32,
  pub pop_scale: f32,
  pub fade_secs: f32,
  pub hit_stop_secs: f32,
  pub hit_stop_scale: f32,
  pub volume: f32,
}

impl DeathFeel {
  pub fn from_config(enemy: &EnemyConfig, hit_stop: &HitStopConfig) -> Self {
    Self {
      pop_secs: enemy.pop_secs,
      pop_scale: enemy.pop_scale,
      fade_secs: enemy.fade_secs,
      hit_stop_secs: hit_stop.secs,
      hit_stop_scale: hit_stop.scale,
      volume: enemy.death_volume,
    }
  }
}

/// A lethal hit on an enemy.
#[derive(Message, Debug, Clone, Copy)]
pub struct EnemyHit {
  pub enemy: Entity,
}

/// Stops simulation and collision for an enemy body.
pub(crate) fn disable_body(commands: &mut Commands, entity: Entity) {
  commands
    .entity(entity)
    .insert((ColliderDisabled, RigidBodyDisabled));
}

pub(crate) fn enable_body(commands: &mut Commands, entity: Entity) {
  commands
    .entity(entity)
    .remove::<(ColliderDisabled, RigidBodyDisabled)>();
}

/// Natural death: goes through the ledger right away, then plays cosmetics.
pub fn kill_enemies(
  mut commands: Commands,
  mut hits: MessageReader<EnemyHit>,
  mut enemies: Query<(&EnemyId, &mut EnemyLifecycle, &DeathFeel, &Transform), With<Enemy>>,
  mut ledger: Option<ResMut<CheckpointLedger>>,
  mut sfx: MessageWriter<PlaySfx>,
  mut hit_stop: MessageWriter<HitStopRequest>,
) {
  for hit in hits.read() {
    let Ok((id, mut lifecycle, feel, transform)) = enemies.get_mut(hit.enemy) else {
      continue;
    };
    if !lifecycle.die() {
      continue;
    }

    // Recorded before the cosmetic sequence starts, so a restore that lands
    // mid-sequence still sees the kill.
    match ledger.as_mut() {
      Some(ledger) => {
        ledger.register_death(*id);
      }
      None => warn!("No checkpoint ledger; death of {} is not recorded", id),
    }
    debug!("{} dying", id);

    disable_body(&mut commands, hit.enemy);
    commands
      .entity(hit.enemy)
      .insert(DeathCosmetic::new(transform.scale));

    sfx.write(PlaySfx::new(SfxCue::EnemyDeath, feel.volume).with_pitch(0.95, 1.25));
    hit_stop.write(HitStopRequest {
      source: hit.enemy,
      secs: feel.hit_stop_secs,
      scale: feel.hit_stop_scale,
    });
  }
}

/// Brings an enemy back: visible, opaque, original scale (keeping facing),
/// physics and AI on.
pub fn reset_enemy(
  commands: &mut Commands,
  entity: Entity,
  lifecycle: &mut EnemyLifecycle,
  look: &EnemyLook,
  transform: &mut Transform,
  sprite: &mut Sprite,
  visibility: &mut Visibility,
) {
  lifecycle.reset();
  commands.entity(entity).remove::<DeathCosmetic>();
  enable_body(commands, entity);

  sprite.color.set_alpha(look.alpha);
  *visibility = Visibility::Inherited;

  let facing = if transform.scale.x < 0.0 { -1.0 } else { 1.0 };
  transform.scale = Vec3::new(look.scale.x.abs() * facing, look.scale.y, look.scale.z);
}

/// Puts an enemy in its dead state without any presentation.
pub fn force_enemy_dead(
  commands: &mut Commands,
  entity: Entity,
  lifecycle: &mut EnemyLifecycle,
  visibility: &mut Visibility,
) {
  lifecycle.force_dead();
  commands.entity(entity).remove::<DeathCosmetic>();
  disable_body(commands, entity);
  *visibility = Visibility::Hidden;
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn die_is_idempotent() {
    let mut lifecycle = EnemyLifecycle::default();
    assert!(lifecycle.die());
    assert!(!lifecycle.die());
    assert_eq!(lifecycle.state(), LifecycleState::Dying);

    assert!(lifecycle.finish_dying());
    assert!(!lifecycle.die());
    assert_eq!(lifecycle.state(), LifecycleState::Dead);
  }

  #[test]
  fn reset_is_tolerant_of_redundant_calls() {
    let mut lifecycle = EnemyLifecycle::default();
    assert!(!lifecycle.reset());
    lifecycle.force_dead();
    assert!(lifecycle.reset());
    assert!(lifecycle.is_alive());
  }

  #[test]
  fn force_dead_from_every_state() {
    let mut lifecycle = EnemyLifecycle::default();
    lifecycle.force_dead();
    assert_eq!(lifecycle.state(), LifecycleState::Dead);

    let mut dying = EnemyLifecycle::default();
    dying.die();
    dying.force_dead();
    assert_eq!(dying.state(), LifecycleState::Dead);
    assert!(!dying.finish_dying());
  }
}
