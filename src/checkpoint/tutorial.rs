//! One-shot zone that teaches the capture.
//!
//! Entering the zone suppresses the gate and slows time. Holding confirm long
//! enough captures through [`CaptureGate::try_capture_now`]. The gate comes back
//! only after confirm is released, so the same hold cannot also start a normal
//! capture.

use bevy::color::Alpha;
use bevy::ecs::message::MessageWriter;
use bevy::prelude::*;

use super::CheckpointCaptured;
use super::gate::CaptureGate;
use crate::config::TutorialConfig;
use crate::core::time_scale::{GlobalTimeScale, OverrideOwner};
use crate::input::PlayerIntent;
use crate::player::components::LocomotionState;
use crate::player::vitals::PlayerVitals;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TutorialPhase {
  Waiting,
  Active { held_for: f32 },
  Finishing { fade_left: f32, gate_restored: bool },
  Done,
}

#[derive(Component, Debug, Clone)]
pub struct CheckpointTutorial {
  pub area: Rect,
  pub hold_secs: f32,
  pub slow_time_scale: f32,
  pub fade_secs: f32,
  phase: TutorialPhase,
}

impl CheckpointTutorial {
  pub fn new(config: &TutorialConfig) -> Self {
    Self {
      area: config.area.to_rect(),
      hold_secs: config.hold_secs,
      slow_time_scale: config.slow_time_scale,
      fade_secs: config.fade_secs,
      phase: TutorialPhase::Waiting,
    }
  }

  pub fn phase(&self) -> TutorialPhase {
    self.phase
  }
}

#[allow(clippy::type_complexity)]
pub fn run_checkpoint_tutorials(
  time: Res<Time<Real>>,
  mut tutorials: Query<(Entity, &mut CheckpointTutorial, Option<&mut Sprite>)>,
  mut players: Query<(
    Entity,
    &PlayerIntent,
    &LocomotionState,
    &PlayerVitals,
    &Transform,
    &mut CaptureGate,
  )>,
  mut scale: ResMut<GlobalTimeScale>,
  mut captured: MessageWriter<CheckpointCaptured>,
) {
  let Ok((player, intent, locomotion, vitals, transform, mut gate)) = players.single_mut() else {
    return;
  };
  let dt = time.delta_secs();
  let position = transform.translation.truncate();

  for (entity, mut tutorial, sprite) in &mut tutorials {
    let owner = OverrideOwner::Tutorial(entity);

    tutorial.phase = match tutorial.phase {
      TutorialPhase::Waiting => {
        if vitals.is_alive() && tutorial.area.contains(position) {
          info!("Checkpoint tutorial started");
          gate.set_input_enabled(false);
          scale.engage(owner, tutorial.slow_time_scale);
          TutorialPhase::Active { held_for: 0.0 }
        } else {
          TutorialPhase::Waiting
        }
      }
      TutorialPhase::Active { held_for } => {
        if !vitals.is_alive() {
          // Not consumed; it can run again after respawn
          scale.release(owner);
          gate.set_input_enabled(true);
          TutorialPhase::Waiting
        } else if intent.capture_held && locomotion.is_grounded() {
          let held_for = held_for + dt;
          if held_for < tutorial.hold_secs {
            TutorialPhase::Active { held_for }
          } else {
            if gate.try_capture_now(true) {
              captured.write(CheckpointCaptured {
                player,
                position,
              });
            } else {
              debug!("Tutorial hold finished with no photos left");
            }
            scale.release(owner);
            TutorialPhase::Finishing {
              fade_left: tutorial.fade_secs,
              gate_restored: false,
            }
          }
        } else {
          TutorialPhase::Active { held_for: 0.0 }
        }
      }
      TutorialPhase::Finishing {
        fade_left,
        mut gate_restored,
      } => {
        if !gate_restored && !intent.capture_held {
          gate.set_input_enabled(true);
          gate_restored = true;
        }
        let fade_left = (fade_left - dt).max(0.0);
        if let Some(mut sprite) = sprite {
          let k = if tutorial.fade_secs > 0.0 {
            fade_left / tutorial.fade_secs
          } else {
            0.0
          };
          let alpha = sprite.color.alpha();
          sprite.color.set_alpha(alpha.min(k));
        }
        if gate_restored && fade_left <= 0.0 {
          info!("Checkpoint tutorial done");
          TutorialPhase::Done
        } else {
          TutorialPhase::Finishing {
            fade_left,
            gate_restored,
          }
        }
      }
      TutorialPhase::Done => TutorialPhase::Done,
    };
  }
}

/// A tutorial removed mid-run gives back time and the gate.
pub fn release_removed_tutorials(
  mut removed: RemovedComponents<CheckpointTutorial>,
  mut scale: ResMut<GlobalTimeScale>,
  mut gates: Query<&mut CaptureGate>,
) {
  let mut any = false;
  for entity in removed.read() {
    any = true;
    let owner = OverrideOwner::Tutorial(entity);
    if scale.is_engaged(owner) {
      scale.release(owner);
    }
  }
  if !any {
    return;
  }

  for mut gate in &mut gates {
    if !gate.input_enabled() {
      gate.set_input_enabled(true);
    }
  }
}
