//! Shared global time scale and audio pause.
//!
//! Several independent systems (pause menu, capture gate slow motion,
//! hit-stop, game over) write the same two global values. Each writer engages
//! a layer tagged with its [`OverrideOwner`] and later releases it. A layer
//! remembers the value that was in effect when it was engaged, so nested
//! engagements unwind back to exactly that value. Releasing a layer that is not
//! on top hands its remembered value to the layer above it.

use bevy::audio::{AudioSink, AudioSinkPlayback};
use bevy::prelude::*;

/// Identifies the writer of a global override layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OverrideOwner {
  Pause,
  GameOver,
  CaptureGate(Entity),
  Tutorial(Entity),
  Hint(Entity),
  HitStop(Entity),
}

#[derive(Debug, Clone, Copy)]
struct Layer<T> {
  owner: OverrideOwner,
  prior: T,
  value: T,
}

/// A value with a stack of owner-tagged overrides on top of a base value.
#[derive(Debug, Clone)]
pub struct LayeredOverride<T> {
  base: T,
  layers: Vec<Layer<T>>,
}

impl<T: Copy + PartialEq> LayeredOverride<T> {
  pub fn new(base: T) -> Self {
    Self {
      base,
      layers: Vec::new(),
    }
  }

  /// Value currently in effect.
  pub fn current(&self) -> T {
    self.layers.last().map_or(self.base, |layer| layer.value)
  }

  pub fn base(&self) -> T {
    self.base
  }

  pub fn is_engaged(&self, owner: OverrideOwner) -> bool {
    self.layers.iter().any(|layer| layer.owner == owner)
  }

  pub fn depth(&self) -> usize {
    self.layers.len()
  }

  /// Pushes a layer for `owner`. Returns false if the owner already holds a
  /// layer; its value is updated in place and its prior value is kept.
  pub fn engage(&mut self, owner: OverrideOwner, value: T) -> bool {
    if let Some(layer) = self.layers.iter_mut().find(|layer| layer.owner == owner) {
      layer.value = value;
      return false;
    }

    let prior = self.current();
    self.layers.push(Layer {
      owner,
      prior,
      value,
    });
    true
  }

  /// Removes the layer held by `owner` and returns the value now in effect,
  /// or `None` if the owner held nothing.
  pub fn release(&mut self, owner: OverrideOwner) -> Option<T> {
    let index = self.layers.iter().position(|layer| layer.owner == owner)?;
    let layer = self.layers.remove(index);

    // The layer engaged right after this one captured our value as its prior.
    if let Some(above) = self.layers.get_mut(index) {
      above.prior = layer.prior;
    }

    Some(self.current())
  }

  /// Drops every layer. Only used at user-initiated boundaries (level reload,
  /// restart) where returning to neutral is the intended outcome.
  pub fn reset(&mut self) {
    self.layers.clear();
  }
}

/// Global simulation speed multiplier applied to `Time<Virtual>`.
#[derive(Resource, Debug, Clone, Deref, DerefMut)]
pub struct GlobalTimeScale(pub LayeredOverride<f32>);

impl Default for GlobalTimeScale {
  fn default() -> Self {
    Self(LayeredOverride::new(1.0))
  }
}

/// Global "audio paused" flag applied to every playing sink.
#[derive(Resource, Debug, Clone, Deref, DerefMut)]
pub struct GlobalAudioPause(pub LayeredOverride<bool>);

impl Default for GlobalAudioPause {
  fn default() -> Self {
    Self(LayeredOverride::new(false))
  }
}

pub struct TimeScalePlugin;

impl Plugin for TimeScalePlugin {
  fn build(&self, app: &mut App) {
    app
      .init_resource::<GlobalTimeScale>()
      .init_resource::<GlobalAudioPause>()
      .add_systems(PostUpdate, (apply_time_scale, apply_audio_pause));
  }
}

pub fn apply_time_scale(scale: Res<GlobalTimeScale>, mut time: ResMut<Time<Virtual>>) {
  if !scale.is_changed() {
    return;
  }

  let value = scale.current();
  if value <= 0.0 {
    time.pause();
  } else {
    time.unpause();
    time.set_relative_speed(value);
  }
  debug!("Time scale now {} ({} layers)", value, scale.depth());
}

pub fn apply_audio_pause(pause: Res<GlobalAudioPause>, mut sinks: Query<&mut AudioSink>) {
  if !pause.is_changed() {
    return;
  }

  let paused = pause.current();
  for mut sink in &mut sinks {
    if paused {
      sink.pause();
    } else {
      sink.play();
    }
  }
}
