use std::collections::HashSet;

use bevy::prelude::*;

use crate::enemy::identity::EnemyId;

/// Which enemies are dead, now and as of the last confirmed checkpoint.
///
/// `live` grows as enemies die; `snapshot` is replaced wholesale by each
/// capture. Restoring makes `live` an exact copy of `snapshot`, which undoes
/// every kill made after the checkpoint. Both sets are dropped on level
/// reload.
#[derive(Resource, Debug, Default, Clone)]
pub struct CheckpointLedger {
  live: HashSet<EnemyId>,
  snapshot: HashSet<EnemyId>,
}

impl CheckpointLedger {
  /// Records a death. Returns false if `id` was already recorded.
  pub fn register_death(&mut self, id: EnemyId) -> bool {
    self.live.insert(id)
  }

  /// Promotes the live set to the snapshot.
  pub fn save_snapshot(&mut self) {
    self.snapshot = self.live.clone();
  }

  /// Replaces the live set with the snapshot and returns the snapshot.
  pub fn restore_snapshot(&mut self) -> &HashSet<EnemyId> {
    self.live = self.snapshot.clone();
    &self.snapshot
  }

  pub fn is_dead(&self, id: EnemyId) -> bool {
    self.live.contains(&id)
  }

  pub fn in_snapshot(&self, id: EnemyId) -> bool {
    self.snapshot.contains(&id)
  }

  pub fn live(&self) -> &HashSet<EnemyId> {
    &self.live
  }

  pub fn snapshot(&self) -> &HashSet<EnemyId> {
    &self.snapshot
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::enemy::identity::EnemyRegistry;

  fn ids(count: usize) -> Vec<EnemyId> {
    let mut world = World::new();
    let mut registry = EnemyRegistry::default();
    (0..count)
      .map(|_| registry.assign(world.spawn_empty().id()))
      .collect()
  }

  #[test]
  fn duplicate_registration_is_noop() {
    let ids = ids(1);
    let mut ledger = CheckpointLedger::default();
    assert!(ledger.register_death(ids[0]));
    assert!(!ledger.register_death(ids[0]));
    assert_eq!(ledger.live().len(), 1);
  }

  #[test]
  fn restore_undoes_kills_after_save() {
    let ids = ids(3);
    let (a, b, c) = (ids[0], ids[1], ids[2]);
    let mut ledger = CheckpointLedger::default();

    ledger.register_death(a);
    ledger.register_death(b);
    ledger.save_snapshot();
    ledger.register_death(c);
    assert!(ledger.is_dead(c));

    ledger.restore_snapshot();
    assert_eq!(ledger.live(), &HashSet::from([a, b]));
    assert!(!ledger.is_dead(c));
  }

  #[test]
  fn restore_without_save_revives_everyone() {
    let ids = ids(2);
    let mut ledger = CheckpointLedger::default();
    ledger.register_death(ids[0]);
    ledger.register_death(ids[1]);

    assert!(ledger.restore_snapshot().is_empty());
    assert!(ledger.live().is_empty());
  }

  #[test]
  fn snapshot_is_a_copy_not_a_view() {
    let ids = ids(2);
    let mut ledger = CheckpointLedger::default();
    ledger.register_death(ids[0]);
    ledger.save_snapshot();
    ledger.register_death(ids[1]);

    assert!(ledger.in_snapshot(ids[0]));
    assert!(!ledger.in_snapshot(ids[1]));
  }
}
