//! Pause menu toggle.
//!
//! Pausing engages a zero time scale and the audio pause layer. Resuming
//! releases both, then keeps gameplay input blocked until the mouse buttons
//! are up plus one more frame, so the click that closed the menu does not
//! leak into the game.

use bevy::prelude::*;

use super::time_scale::{GlobalAudioPause, GlobalTimeScale, OverrideOwner};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum ResumeBlock {
  #[default]
  Clear,
  WaitingForMouse,
  ExtraFrame,
}

#[derive(Resource, Debug, Default)]
pub struct PauseState {
  paused: bool,
  resume_block: ResumeBlock,
}

impl PauseState {
  pub fn is_paused(&self) -> bool {
    self.paused
  }

  /// Gameplay input must be ignored while this is true.
  pub fn input_blocked(&self) -> bool {
    self.paused || self.resume_block != ResumeBlock::Clear
  }

  pub fn pause(&mut self, scale: &mut GlobalTimeScale, audio: &mut GlobalAudioPause) -> bool {
    if self.paused {
      return false;
    }
    self.paused = true;
    scale.engage(OverrideOwner::Pause, 0.0);
    audio.engage(OverrideOwner::Pause, true);
    true
  }

  pub fn resume(&mut self, scale: &mut GlobalTimeScale, audio: &mut GlobalAudioPause) -> bool {
    if !self.paused {
      return false;
    }
    self.paused = false;
    self.resume_block = ResumeBlock::WaitingForMouse;
    scale.release(OverrideOwner::Pause);
    audio.release(OverrideOwner::Pause);
    true
  }

  /// Steps the post-resume input block. `mouse_held` is whether any mouse
  /// button is currently down.
  pub fn advance_resume_block(&mut self, mouse_held: bool) {
    self.resume_block = match self.resume_block {
      ResumeBlock::WaitingForMouse if mouse_held => ResumeBlock::WaitingForMouse,
      ResumeBlock::WaitingForMouse => ResumeBlock::ExtraFrame,
      ResumeBlock::ExtraFrame | ResumeBlock::Clear => ResumeBlock::Clear,
    };
  }

  /// Forgets any pause without touching the global layers. Used together with
  /// a neutral reset of those layers on level reload.
  pub fn clear(&mut self) {
    *self = Self::default();
  }
}

/// Holds the Escape toggle so other plugins can gate it with run conditions.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PauseToggleSet;

pub struct PausePlugin;

impl Plugin for PausePlugin {
  fn build(&self, app: &mut App) {
    app
      .init_resource::<PauseState>()
      .add_systems(PreUpdate, advance_resume_block)
      .add_systems(
        Update,
        toggle_pause
          .in_set(PauseToggleSet)
          .before(super::GameplaySet::Intent),
      );
  }
}

fn toggle_pause(
  keys: Res<ButtonInput<KeyCode>>,
  mut pause: ResMut<PauseState>,
  mut scale: ResMut<GlobalTimeScale>,
  mut audio: ResMut<GlobalAudioPause>,
) {
  if !keys.just_pressed(KeyCode::Escape) {
    return;
  }

  if pause.is_paused() {
    pause.resume(&mut scale, &mut audio);
    info!("Resumed");
  } else {
    pause.pause(&mut scale, &mut audio);
    info!("Paused");
  }
}

fn advance_resume_block(mouse: Res<ButtonInput<MouseButton>>, mut pause: ResMut<PauseState>) {
  let mouse_held = mouse.pressed(MouseButton::Left) || mouse.pressed(MouseButton::Right);
  // Avoid marking the resource changed every frame
  if pause.input_blocked() && !pause.is_paused() {
    pause.advance_resume_block(mouse_held);
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn pause_and_resume_restore_time_scale() {
    let mut state = PauseState::default();
    let mut scale = GlobalTimeScale::default();
    let mut audio = GlobalAudioPause::default();

    assert!(state.pause(&mut scale, &mut audio));
    assert!(!state.pause(&mut scale, &mut audio));
    assert_eq!(scale.current(), 0.0);
    assert!(audio.current());

    assert!(state.resume(&mut scale, &mut audio));
    assert_eq!(scale.current(), 1.0);
    assert!(!audio.current());
  }

  #[test]
  fn pausing_during_slow_motion_resumes_into_slow_motion() {
    let mut state = PauseState::default();
    let mut scale = GlobalTimeScale::default();
    let mut audio = GlobalAudioPause::default();

    scale.engage(OverrideOwner::GameOver, 0.5);
    state.pause(&mut scale, &mut audio);
    state.resume(&mut scale, &mut audio);
    assert_eq!(scale.current(), 0.5);
  }

  #[test]
  fn input_stays_blocked_until_mouse_released_plus_one_frame() {
    let mut state = PauseState::default();
    let mut scale = GlobalTimeScale::default();
    let mut audio = GlobalAudioPause::default();
    state.pause(&mut scale, &mut audio);
    state.resume(&mut scale, &mut audio);

    state.advance_resume_block(true);
    assert!(state.input_blocked());
    state.advance_resume_block(false);
    assert!(state.input_blocked());
    state.advance_resume_block(false);
    assert!(!state.input_blocked());
  }
}
