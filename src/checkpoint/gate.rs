//! Hold-to-confirm checkpoint capture.
//!
//! The gate is a two-phase state machine advanced once per frame with real
//! time. A capture fires when the confirm input has been held for
//! `hold_secs` while grounded, alive and with photos left. One hold fires at
//! most once; the latch clears when the input is released.

use bevy::ecs::message::MessageWriter;
use bevy::prelude::*;

use super::CheckpointCaptured;
use crate::core::audio::{PlaySfx, SfxCue};
use crate::core::time_scale::{GlobalTimeScale, OverrideOwner};
use crate::input::PlayerIntent;
use crate::player::components::LocomotionState;
use crate::player::vitals::PlayerVitals;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GatePhase {
  #[default]
  Idle,
  Holding,
}

/// What one tick of the gate asks the outside world to do.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GateStep {
  pub fired: bool,
  /// Confirm was pressed with no photos left.
  pub empty_cue: bool,
  /// Slow motion should be in effect this frame.
  pub slow_motion: bool,
}

/// Per-frame view of the confirm input.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConfirmInput {
  pub held: bool,
  pub just_pressed: bool,
}

impl From<&PlayerIntent> for ConfirmInput {
  fn from(intent: &PlayerIntent) -> Self {
    Self {
      held: intent.capture_held,
      just_pressed: intent.capture_just_pressed(),
    }
  }
}

#[derive(Component, Debug, Clone)]
pub struct CaptureGate {
  photos: u32,
  hold_secs: f32,
  slow_time_scale: Option<f32>,
  phase: GatePhase,
  held_for: f32,
  fired_this_hold: bool,
  input_enabled: bool,
}

impl CaptureGate {
  pub fn new(photos: u32, hold_secs: f32, slow_time_scale: Option<f32>) -> Self {
    Self {
      photos,
      hold_secs,
      slow_time_scale,
      phase: GatePhase::Idle,
      held_for: 0.0,
      fired_this_hold: false,
      input_enabled: true,
    }
  }

  pub fn photos(&self) -> u32 {
    self.photos
  }

  /// Developer override.
  pub fn set_photos(&mut self, photos: u32) {
    self.photos = photos;
  }

  pub fn phase(&self) -> GatePhase {
    self.phase
  }

  pub fn held_for(&self) -> f32 {
    self.held_for
  }

  pub fn slow_time_scale(&self) -> Option<f32> {
    self.slow_time_scale
  }

  pub fn input_enabled(&self) -> bool {
    self.input_enabled
  }

  /// Suppresses or re-allows capture. Always starts over: the hold timer and
  /// the fired latch are cleared.
  pub fn set_input_enabled(&mut self, enabled: bool) {
    self.input_enabled = enabled;
    self.fired_this_hold = false;
    self.reset_hold();
  }

  /// Captures immediately, bypassing the hold and suppression. Still needs
  /// ground under the player and a photo left.
  pub fn try_capture_now(&mut self, grounded: bool) -> bool {
    if !grounded || self.photos == 0 {
      return false;
    }
    self.photos -= 1;
    self.reset_hold();
    true
  }

  pub fn tick(&mut self, input: ConfirmInput, grounded: bool, alive: bool, dt: f32) -> GateStep {
    let mut step = GateStep::default();

    if !input.held {
      self.fired_this_hold = false;
      self.reset_hold();
      return step;
    }

    let usable = self.input_enabled && alive;
    if usable && input.just_pressed && self.photos == 0 {
      step.empty_cue = true;
    }

    if !usable || self.photos == 0 || self.fired_this_hold || !grounded {
      // Leaving the ground restarts the timer but keeps the latch
      self.reset_hold();
      return step;
    }

    self.phase = GatePhase::Holding;
    self.held_for += dt;

    if self.held_for >= self.hold_secs {
      self.photos -= 1;
      self.fired_this_hold = true;
      self.reset_hold();
      step.fired = true;
      return step;
    }

    step.slow_motion = self.slow_time_scale.is_some();
    step
  }

  fn reset_hold(&mut self) {
    self.phase = GatePhase::Idle;
    self.held_for = 0.0;
  }
}

/// Feedback settings for captures, kept on the player next to the gate.
#[derive(Component, Debug, Clone, Copy)]
pub struct CaptureFeedback {
  pub freeze_secs: f32,
  pub used_volume: f32,
  pub empty_volume: f32,
}

pub fn tick_capture_gates(
  time: Res<Time<Real>>,
  mut players: Query<(
    Entity,
    &PlayerIntent,
    &LocomotionState,
    &PlayerVitals,
    &Transform,
    &CaptureFeedback,
    &mut CaptureGate,
  )>,
  mut scale: ResMut<GlobalTimeScale>,
  mut captured: MessageWriter<CheckpointCaptured>,
  mut sfx: MessageWriter<PlaySfx>,
) {
  let dt = time.delta_secs();

  for (entity, intent, locomotion, vitals, transform, feedback, mut gate) in &mut players {
    let step = gate.tick(
      ConfirmInput::from(intent),
      locomotion.is_grounded(),
      vitals.is_alive(),
      dt,
    );

    sync_slow_motion(&mut scale, entity, step.slow_motion, gate.slow_time_scale());

    if step.empty_cue {
      debug!("Capture attempted with no photos left");
      sfx.write(PlaySfx::new(SfxCue::PhotoEmpty, feedback.empty_volume));
    }
    if step.fired {
      captured.write(CheckpointCaptured {
        player: entity,
        position: transform.translation.truncate(),
      });
    }
  }
}

fn sync_slow_motion(
  scale: &mut ResMut<GlobalTimeScale>,
  gate: Entity,
  wanted: bool,
  slow_time_scale: Option<f32>,
) {
  let owner = OverrideOwner::CaptureGate(gate);
  let engaged = scale.is_engaged(owner);

  match slow_time_scale {
    Some(value) if wanted && !engaged => {
      scale.engage(owner, value);
    }
    _ if !wanted && engaged => {
      scale.release(owner);
    }
    _ => {}
  }
}

/// A despawned gate must not leave its slow motion behind.
pub fn release_removed_gates(
  mut removed: RemovedComponents<CaptureGate>,
  mut scale: ResMut<GlobalTimeScale>,
) {
  for entity in removed.read() {
    let owner = OverrideOwner::CaptureGate(entity);
    if scale.is_engaged(owner) {
      scale.release(owner);
      debug!("Released slow motion of removed gate {:?}", entity);
    }
  }
}
