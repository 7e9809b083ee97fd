//! Remaining respawns for the current level attempt.

use bevy::prelude::*;

/// Lives left before a death becomes a game over.
///
/// Reset on every level (re)entry; removed and recreated from config on an
/// explicit restart. Never incremented within an attempt.
#[derive(Resource, Debug, Clone, PartialEq, Eq)]
pub struct LifeBudget {
  starting: u32,
  remaining: u32,
}

impl LifeBudget {
  pub fn new(starting: u32) -> Self {
    Self {
      starting,
      remaining: starting,
    }
  }

  pub fn starting(&self) -> u32 {
    self.starting
  }

  pub fn remaining(&self) -> u32 {
    self.remaining
  }

  pub fn reset(&mut self) {
    self.remaining = self.starting;
  }

  /// Consumes a life. Returns false without changing anything when none are
  /// left.
  pub fn spend(&mut self) -> bool {
    if self.remaining == 0 {
      return false;
    }
    self.remaining -= 1;
    true
  }

  /// Developer override, capped at the starting value.
  pub fn set_remaining(&mut self, remaining: u32) {
    self.remaining = remaining.min(self.starting);
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn spend_counts_down_to_zero_and_stops() {
    let mut lives = LifeBudget::new(3);
    assert!(lives.spend());
    assert!(lives.spend());
    assert!(lives.spend());
    assert_eq!(lives.remaining(), 0);

    assert!(!lives.spend());
    assert_eq!(lives.remaining(), 0);
  }

  #[test]
  fn reset_restores_starting_value() {
    let mut lives = LifeBudget::new(2);
    lives.spend();
    lives.spend();
    lives.reset();
    assert_eq!(lives.remaining(), 2);
  }

  #[test]
  fn zero_starting_lives_never_permit_respawn() {
    let mut lives = LifeBudget::new(0);
    assert!(!lives.spend());
  }

  #[test]
  fn set_remaining_is_capped() {
    let mut lives = LifeBudget::new(3);
    lives.set_remaining(9);
    assert_eq!(lives.remaining(), 3);
    lives.set_remaining(1);
    assert_eq!(lives.remaining(), 1);
  }
}
