use bevy::ecs::message::MessageWriter;
use bevy::prelude::*;

use crate::player::components::Player;
use crate::player::vitals::{DamagePlayer, DamageSource, PlayerVitals};

/// Touching this rectangle is lethal.
#[derive(Component, Debug, Clone, Copy)]
pub struct KillZone {
  pub area: Rect,
}

/// Falling below this height is lethal.
#[derive(Resource, Debug, Clone, Copy)]
pub struct KillHeight(pub f32);

/// Whether the player was inside a lethal area last frame. Hazards hurt on
/// the way in, not for every frame spent inside.
#[derive(Component, Debug, Default, Clone, Copy)]
pub struct HazardLatch {
  inside: bool,
}

impl HazardLatch {
  /// Records this frame's overlap. Returns true only on entry.
  pub fn enter(&mut self, lethal: bool) -> bool {
    let entered = lethal && !self.inside;
    self.inside = lethal;
    entered
  }
}

pub fn is_lethal(position: Vec2, kill_height: Option<f32>, zones: impl IntoIterator<Item = Rect>) -> bool {
  if kill_height.is_some_and(|y| position.y < y) {
    return true;
  }
  zones.into_iter().any(|zone| zone.contains(position))
}

pub fn hazard_damage(
  mut players: Query<(&Transform, &PlayerVitals, &mut HazardLatch), With<Player>>,
  zones: Query<&KillZone>,
  kill_height: Option<Res<KillHeight>>,
  mut damage: MessageWriter<DamagePlayer>,
) {
  let Ok((transform, vitals, mut latch)) = players.single_mut() else {
    return;
  };

  let position = transform.translation.truncate();
  let lethal = is_lethal(
    position,
    kill_height.map(|k| k.0),
    zones.iter().map(|zone| zone.area),
  );
  if latch.enter(lethal) && vitals.is_alive() {
    debug!("Entered hazard at ({:.0}, {:.0})", position.x, position.y);
    damage.write(DamagePlayer {
      source: DamageSource::Hazard,
    });
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn kill_height_and_zones() {
    let zone = Rect::from_center_size(Vec2::new(100.0, 0.0), Vec2::splat(20.0));
    assert!(is_lethal(Vec2::new(0.0, -500.0), Some(-400.0), Vec::<Rect>::new()));
    assert!(!is_lethal(Vec2::new(0.0, 0.0), Some(-400.0), [zone]));
    assert!(is_lethal(Vec2::new(105.0, 5.0), None, [zone]));
  }

  #[test]
  fn latch_fires_on_entry_only() {
    let mut latch = HazardLatch::default();
    assert!(!latch.enter(false));
    assert!(latch.enter(true));
    assert!(!latch.enter(true));
    assert!(!latch.enter(false));
    assert!(latch.enter(true));
  }
}
