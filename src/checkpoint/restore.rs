use bevy::ecs::message::MessageReader;
use bevy::prelude::*;

use super::RestoreCheckpoint;
use super::ledger::CheckpointLedger;
use crate::enemy::identity::EnemyRegistry;
use crate::enemy::lifecycle::{Enemy, EnemyLifecycle, EnemyLook, force_enemy_dead, reset_enemy};

pub(crate) type RestoreQuery<'w, 's> = Query<
  'w,
  's,
  (
    &'static mut EnemyLifecycle,
    &'static EnemyLook,
    &'static mut Transform,
    &'static mut Sprite,
    &'static mut Visibility,
  ),
  With<Enemy>,
>;

/// Counts from one restoration pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RestoreReport {
  pub revived: usize,
  pub kept_dead: usize,
  pub missing: usize,
}

/// Rolls the ledger back to the snapshot and brings every registered enemy in
/// line with it. Several requests in one frame collapse into one pass.
pub fn restore_checkpoint(
  mut commands: Commands,
  mut requests: MessageReader<RestoreCheckpoint>,
  mut ledger: ResMut<CheckpointLedger>,
  registry: Res<EnemyRegistry>,
  mut enemies: RestoreQuery,
) {
  if requests.read().count() == 0 {
    return;
  }

  let report = restore_world(&mut commands, &mut ledger, &registry, &mut enemies);
  info!(
    "Checkpoint restored: {} revived, {} kept dead, {} missing",
    report.revived, report.kept_dead, report.missing
  );
}

/// Walks the registry, not the query, so hidden and inactive enemies are
/// visited too and each identity is handled exactly once.
pub(crate) fn restore_world(
  commands: &mut Commands,
  ledger: &mut CheckpointLedger,
  registry: &EnemyRegistry,
  enemies: &mut RestoreQuery,
) -> RestoreReport {
  let snapshot = ledger.restore_snapshot();
  let mut report = RestoreReport::default();

  for (id, entity) in registry.iter() {
    let Ok((mut lifecycle, look, mut transform, mut sprite, mut visibility)) = enemies.get_mut(entity)
    else {
      warn!("{} no longer resolves to an enemy ({:?}); skipped", id, entity);
      report.missing += 1;
      continue;
    };

    if snapshot.contains(&id) {
      force_enemy_dead(commands, entity, &mut lifecycle, &mut visibility);
      report.kept_dead += 1;
    } else {
      reset_enemy(
        commands,
        entity,
        &mut lifecycle,
        look,
        &mut transform,
        &mut sprite,
        &mut visibility,
      );
      report.revived += 1;
    }
  }

  report
}
