//! Stable enemy identities.
//!
//! Entity handles change whenever scene logic recreates an enemy, so death
//! bookkeeping is keyed by [`EnemyId`] instead. The registry keeps every
//! identity it has handed out for the whole level session.

use std::collections::HashMap;
use std::fmt;

use bevy::prelude::*;

#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EnemyId(u32);

impl EnemyId {
  pub fn raw(self) -> u32 {
    self.0
  }
}

impl fmt::Display for EnemyId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "enemy#{}", self.0)
  }
}

#[derive(Resource, Debug, Default)]
pub struct EnemyRegistry {
  next: u32,
  handles: HashMap<EnemyId, Entity>,
}

impl EnemyRegistry {
  /// Hands out a fresh identity bound to `entity`. Identities are never
  /// reused within a session.
  pub fn assign(&mut self, entity: Entity) -> EnemyId {
    let id = EnemyId(self.next);
    self.next += 1;
    self.handles.insert(id, entity);
    id
  }

  /// Rebinds an existing identity to a recreated entity. Identities this
  /// registry never handed out are left alone.
  pub fn refresh(&mut self, id: EnemyId, entity: Entity) -> bool {
    match self.handles.get_mut(&id) {
      Some(handle) => {
        *handle = entity;
        true
      }
      None => false,
    }
  }

  pub fn resolve(&self, id: EnemyId) -> Option<Entity> {
    self.handles.get(&id).copied()
  }

  pub fn iter(&self) -> impl Iterator<Item = (EnemyId, Entity)> + '_ {
    self.handles.iter().map(|(id, entity)| (*id, *entity))
  }

  pub fn len(&self) -> usize {
    self.handles.len()
  }

  pub fn is_empty(&self) -> bool {
    self.handles.is_empty()
  }
}

/// Follows enemies rebuilt under an identity they already had, so lookups
/// by [`EnemyId`] reach the live entity.
pub fn rebind_enemy_identities(
  mut registry: ResMut<EnemyRegistry>,
  enemies: Query<(Entity, &EnemyId), Changed<EnemyId>>,
) {
  for (entity, &id) in &enemies {
    if registry.resolve(id) == Some(entity) {
      continue;
    }
    if registry.refresh(id, entity) {
      debug!("{} rebound to {:?}", id, entity);
    } else {
      warn!("{:?} carries unknown {}", entity, id);
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn identities_are_unique_and_resolvable() {
    let mut world = World::new();
    let a = world.spawn_empty().id();
    let b = world.spawn_empty().id();

    let mut registry = EnemyRegistry::default();
    let id_a = registry.assign(a);
    let id_b = registry.assign(b);

    assert_ne!(id_a, id_b);
    assert_eq!(registry.resolve(id_a), Some(a));
    assert_eq!(registry.resolve(id_b), Some(b));
    assert_eq!(registry.len(), 2);
  }

  #[test]
  fn refresh_rebinds_without_new_identity() {
    let mut world = World::new();
    let original = world.spawn_empty().id();
    let recreated = world.spawn_empty().id();

    let mut registry = EnemyRegistry::default();
    let id = registry.assign(original);
    assert!(registry.refresh(id, recreated));

    assert_eq!(registry.resolve(id), Some(recreated));
    assert_eq!(registry.len(), 1);
  }

  #[test]
  fn refresh_ignores_foreign_identity() {
    let mut world = World::new();
    let entity = world.spawn_empty().id();

    let mut other = EnemyRegistry::default();
    other.assign(entity);
    let foreign = other.assign(entity);

    let mut registry = EnemyRegistry::default();
    assert!(!registry.refresh(foreign, entity));
    assert!(registry.is_empty());
  }
}
