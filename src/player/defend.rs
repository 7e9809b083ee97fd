use bevy::color::Alpha;
use bevy::prelude::*;

use super::components::{BaseLook, LocomotionState, MovementLocks, Player};
use super::vitals::PlayerVitals;
use crate::input::PlayerIntent;

/// Holding defend on the ground: invulnerable, rooted, faded.
pub fn update_defend(
  mut players: Query<
    (
      &PlayerIntent,
      &LocomotionState,
      &mut PlayerVitals,
      &mut MovementLocks,
      &BaseLook,
      &mut Sprite,
    ),
    With<Player>,
  >,
) {
  for (intent, locomotion, mut vitals, mut locks, look, mut sprite) in &mut players {
    let defending = locks.contains(MovementLocks::DEFEND);
    let wants = intent.defend_held && locomotion.is_grounded() && vitals.is_alive();

    if wants && !defending {
      locks.insert(MovementLocks::DEFEND);
      vitals.set_invulnerable(true);
      sprite.color.set_alpha(look.defend_alpha);
      debug!("Defending");
    } else if !wants && defending {
      locks.remove(MovementLocks::DEFEND);
      vitals.set_invulnerable(false);
      if vitals.is_alive() {
        sprite.color.set_alpha(look.color.alpha());
      }
    }
  }
}
