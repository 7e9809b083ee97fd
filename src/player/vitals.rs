//! Player life state.
//!
//! A lethal hit settles the outcome on the spot by spending a life, so
//! whatever happens to the life budget while the death plays out cannot
//! change whether the player respawns.

use bevy::prelude::*;

use crate::session::lives::LifeBudget;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageSource {
  Enemy(Entity),
  Hazard,
  Debug,
}

/// Lethal damage to the player.
#[derive(Message, Debug, Clone, Copy)]
pub struct DamagePlayer {
  pub source: DamageSource,
}

/// The death presentation of `player` has finished. Written once per death.
#[derive(Message, Debug, Clone, Copy)]
pub struct DeathSequenceComplete {
  pub player: Entity,
}

/// The player is out of lives.
#[derive(Message, Debug, Clone, Copy, Default)]
pub struct GameOver;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VitalState {
  #[default]
  Alive,
  Dying,
  AwaitingOutcome,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeathOutcome {
  Respawn,
  GameOver,
}

#[derive(Component, Debug, Clone)]
pub struct PlayerVitals {
  state: VitalState,
  respawn_point: Vec2,
  pending: Option<DeathOutcome>,
  invulnerable: bool,
}

impl PlayerVitals {
  pub fn new(spawn: Vec2) -> Self {
    Self {
      state: VitalState::Alive,
      respawn_point: spawn,
      pending: None,
      invulnerable: false,
    }
  }

  pub fn state(&self) -> VitalState {
    self.state
  }

  pub fn is_alive(&self) -> bool {
    self.state == VitalState::Alive
  }

  pub fn respawn_point(&self) -> Vec2 {
    self.respawn_point
  }

  pub fn set_respawn_point(&mut self, point: Vec2) {
    self.respawn_point = point;
  }

  /// Outcome decided by the current death, if one is in progress.
  pub fn pending_outcome(&self) -> Option<DeathOutcome> {
    self.pending
  }

  pub fn is_invulnerable(&self) -> bool {
    self.invulnerable
  }

  pub fn set_invulnerable(&mut self, invulnerable: bool) {
    self.invulnerable = invulnerable;
  }

  /// Starts a death unless the player is invulnerable or already dying.
  ///
  /// With no budget at all the player may respawn.
  pub fn take_lethal_damage(&mut self, budget: Option<&mut LifeBudget>) -> Option<DeathOutcome> {
    if self.invulnerable || self.state != VitalState::Alive {
      return None;
    }

    let outcome = match budget {
      Some(budget) => {
        if budget.spend() {
          DeathOutcome::Respawn
        } else {
          DeathOutcome::GameOver
        }
      }
      None => {
        warn!("No life budget; allowing respawn");
        DeathOutcome::Respawn
      }
    };

    self.state = VitalState::Dying;
    self.pending = Some(outcome);
    Some(outcome)
  }

  /// Finishes the death presentation. Respawn goes straight back to Alive;
  /// game over stays in AwaitingOutcome until the level restarts.
  pub fn complete_death_sequence(&mut self) -> Option<DeathOutcome> {
    if self.state != VitalState::Dying {
      return None;
    }
    self.state = VitalState::AwaitingOutcome;

    let outcome = self.pending?;
    if outcome == DeathOutcome::Respawn {
      self.state = VitalState::Alive;
      self.pending = None;
    }
    Some(outcome)
  }
}
