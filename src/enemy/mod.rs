pub mod contact;
pub mod cosmetics;
pub mod identity;
pub mod lifecycle;
pub mod patrol;
pub mod projectile;
pub mod shooter;
pub mod spawn;


use bevy::prelude::*;
pub use identity::{EnemyId, EnemyRegistry};
pub use lifecycle::{Enemy, EnemyHit, EnemyLifecycle, LifecycleState};

use crate::core::GameplaySet;
use crate::core::audio::PlaySfx;
use crate::core::hit_stop::HitStopRequest;
use crate::player::combat::{MeleeSwing, player_attack};
use crate::player::vitals::DamagePlayer;

pub struct EnemyPlugin;

impl Plugin for EnemyPlugin {
  fn build(&self, app: &mut App) {
    crate::core::ensure_gameplay_sets(app);
    app
      .init_resource::<EnemyRegistry>()
      .add_message::<EnemyHit>()
      .add_message::<DamagePlayer>()
      .add_message::<PlaySfx>()
      .add_message::<HitStopRequest>()
      .add_message::<MeleeSwing>()
      .add_systems(
        Update,
        (
          identity::rebind_enemy_identities.in_set(GameplaySet::Intent),
          (
            patrol::patrol_enemies,
            contact::enemy_contact_damage,
            shooter::enemy_shoot,
            projectile::move_projectiles,
            projectile::reflect_projectiles,
            projectile::projectile_hits,
          )
            .chain()
            .after(player_attack)
            .in_set(GameplaySet::Hazards),
          lifecycle::kill_enemies.in_set(GameplaySet::Vitals),
          cosmetics::advance_death_cosmetics.in_set(GameplaySet::Presentation),
        ),
      );
  }
}
