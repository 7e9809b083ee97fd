//! One-shot hint zones.
//!
//! The first time the player walks in, time slows and the player is held in
//! place. After a real-time delay a message slides in, stays, and slides out.
//! Time and movement come back once it is gone.

use bevy::prelude::*;

use crate::config::HintConfig;
use crate::core::time_scale::{GlobalTimeScale, OverrideOwner};
use crate::player::components::{MovementLocks, Player};
use crate::player::vitals::PlayerVitals;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HintPhase {
  Waiting,
  Delay { left: f32 },
  Showing { elapsed: f32 },
  Done,
}

#[derive(Component, Debug, Clone)]
pub struct HintZone {
  pub area: Rect,
  pub text: String,
  pub slow_time_scale: f32,
  pub delay_secs: f32,
  pub slide_secs: f32,
  pub stay_secs: f32,
  phase: HintPhase,
}

impl HintZone {
  pub fn new(config: &HintConfig) -> Self {
    Self {
      area: config.area.to_rect(),
      text: config.text.clone(),
      slow_time_scale: config.slow_time_scale,
      delay_secs: config.delay_secs,
      slide_secs: config.slide_secs,
      stay_secs: config.stay_secs,
      phase: HintPhase::Waiting,
    }
  }

  pub fn phase(&self) -> HintPhase {
    self.phase
  }

  /// Time the message is on screen, slides included.
  pub fn show_secs(&self) -> f32 {
    self.slide_secs * 2.0 + self.stay_secs
  }

  /// How far the message is slid in, from 0 (hidden) to 1.
  pub fn reveal(&self) -> f32 {
    let HintPhase::Showing { elapsed } = self.phase else {
      return 0.0;
    };
    let slide_in = elapsed / self.slide_secs;
    let slide_out = (self.show_secs() - elapsed) / self.slide_secs;
    slide_in.min(slide_out).clamp(0.0, 1.0)
  }
}

/// Advances every hint zone on real time, so the slowdown it causes does not
/// stretch its own timing.
pub fn run_hint_zones(
  time: Res<Time<Real>>,
  mut hints: Query<(Entity, &mut HintZone)>,
  mut players: Query<(&PlayerVitals, &Transform, &mut MovementLocks), With<Player>>,
  mut scale: ResMut<GlobalTimeScale>,
) {
  let Ok((vitals, transform, mut locks)) = players.single_mut() else {
    return;
  };
  let dt = time.delta_secs();
  let position = transform.translation.truncate();

  for (entity, mut hint) in &mut hints {
    let owner = OverrideOwner::Hint(entity);
    let running = matches!(hint.phase, HintPhase::Delay { .. } | HintPhase::Showing { .. });

    if running && !vitals.is_alive() {
      scale.release(owner);
      locks.remove(MovementLocks::HINT);
      debug!("Hint {:?} cut short by death", entity);
      hint.phase = HintPhase::Done;
      continue;
    }

    hint.phase = match hint.phase {
      HintPhase::Waiting => {
        if vitals.is_alive() && hint.area.contains(position) {
          info!("Hint started: {}", hint.text);
          scale.engage(owner, hint.slow_time_scale);
          locks.insert(MovementLocks::HINT);
          HintPhase::Delay {
            left: hint.delay_secs,
          }
        } else {
          HintPhase::Waiting
        }
      }
      HintPhase::Delay { left } => {
        let left = left - dt;
        if left > 0.0 {
          HintPhase::Delay { left }
        } else {
          HintPhase::Showing { elapsed: 0.0 }
        }
      }
      HintPhase::Showing { elapsed } => {
        let elapsed = elapsed + dt;
        if elapsed < hint.show_secs() {
          HintPhase::Showing { elapsed }
        } else {
          scale.release(owner);
          locks.remove(MovementLocks::HINT);
          info!("Hint done");
          HintPhase::Done
        }
      }
      HintPhase::Done => HintPhase::Done,
    };
  }
}

/// A hint removed mid-run gives back time and movement.
pub fn release_removed_hints(
  mut removed: RemovedComponents<HintZone>,
  mut scale: ResMut<GlobalTimeScale>,
  mut players: Query<&mut MovementLocks, With<Player>>,
) {
  let mut any = false;
  for entity in removed.read() {
    let owner = OverrideOwner::Hint(entity);
    if scale.is_engaged(owner) {
      scale.release(owner);
      any = true;
    }
  }
  if !any {
    return;
  }

  for mut locks in &mut players {
    locks.remove(MovementLocks::HINT);
  }
}
