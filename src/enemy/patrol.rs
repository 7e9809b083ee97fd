use bevy::prelude::*;

use super::lifecycle::EnemyLifecycle;

/// Walks back and forth between two x bounds, pausing at each turn.
#[derive(Component, Debug, Clone)]
pub struct Patrol {
  pub min_x: f32,
  pub max_x: f32,
  pub speed: f32,
  pub turn_pause: f32,
  moving_right: bool,
  paused_for: f32,
}

impl Patrol {
  pub fn new(min_x: f32, max_x: f32, speed: f32, turn_pause: f32, moving_right: bool) -> Self {
    Self {
      min_x,
      max_x,
      speed,
      turn_pause,
      moving_right,
      paused_for: 0.0,
    }
  }

  pub fn moving_right(&self) -> bool {
    self.moving_right
  }

  /// Returns the new x position. Turning at a bound starts the pause.
  pub fn step(&mut self, x: f32, dt: f32) -> f32 {
    if self.paused_for > 0.0 {
      self.paused_for = (self.paused_for - dt).max(0.0);
      return x;
    }

    let dir = if self.moving_right { 1.0 } else { -1.0 };
    let next = (x + dir * self.speed * dt).clamp(self.min_x, self.max_x);

    let at_bound = if self.moving_right {
      next >= self.max_x
    } else {
      next <= self.min_x
    };
    if at_bound {
      self.moving_right = !self.moving_right;
      self.paused_for = self.turn_pause;
    }
    next
  }
}

pub fn patrol_enemies(
  time: Res<Time>,
  mut enemies: Query<(&mut Patrol, &EnemyLifecycle, &mut Transform)>,
) {
  let dt = time.delta_secs();
  for (mut patrol, lifecycle, mut transform) in &mut enemies {
    if !lifecycle.is_alive() {
      continue;
    }
    transform.translation.x = patrol.step(transform.translation.x, dt);

    let facing = if patrol.moving_right() { 1.0 } else { -1.0 };
    transform.scale.x = transform.scale.x.abs() * facing;
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn turns_and_pauses_at_bounds() {
    let mut patrol = Patrol::new(0.0, 10.0, 10.0, 0.5, true);
    let x = patrol.step(5.0, 1.0);
    assert_eq!(x, 10.0);
    assert!(!patrol.moving_right());

    // Paused at the bound
    assert_eq!(patrol.step(x, 0.25), 10.0);
    assert_eq!(patrol.step(x, 0.25), 10.0);

    let x = patrol.step(x, 0.5);
    assert_eq!(x, 5.0);
  }
}
