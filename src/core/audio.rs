//! One-shot sound effects.

use bevy::audio::Volume;
use bevy::ecs::message::MessageReader;
use bevy::prelude::*;
use rand::Rng;

use super::time_scale::GlobalAudioPause;
use crate::config::{AudioConfig, ConfigLoaded};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SfxCue {
  PhotoUsed,
  PhotoEmpty,
  EnemyDeath,
  PlayerHurt,
  Jump,
  EnemyShoot,
  ProjectileHit,
}

/// Request to play a cue once at `volume`, with playback speed picked
/// uniformly from `pitch`.
#[derive(Message, Debug, Clone, Copy)]
pub struct PlaySfx {
  pub cue: SfxCue,
  pub volume: f32,
  pub pitch: (f32, f32),
}

impl PlaySfx {
  pub fn new(cue: SfxCue, volume: f32) -> Self {
    Self {
      cue,
      volume,
      pitch: (0.95, 1.05),
    }
  }

  pub fn with_pitch(mut self, min: f32, max: f32) -> Self {
    self.pitch = (min, max);
    self
  }
}

impl AudioConfig {
  pub fn clips(&self, cue: SfxCue) -> &[String] {
    match cue {
      SfxCue::PhotoUsed => &self.photo_used,
      SfxCue::PhotoEmpty => &self.photo_empty,
      SfxCue::EnemyDeath => &self.enemy_death,
      SfxCue::PlayerHurt => &self.player_hurt,
      SfxCue::Jump => &self.jump,
      SfxCue::EnemyShoot => &self.enemy_shoot,
      SfxCue::ProjectileHit => &self.projectile_hit,
    }
  }
}

pub struct SfxPlugin;

impl Plugin for SfxPlugin {
  fn build(&self, app: &mut App) {
    app.add_message::<PlaySfx>().add_systems(
      Update,
      play_sfx.in_set(super::GameplaySet::Presentation),
    );
  }
}

fn play_sfx(
  mut commands: Commands,
  mut messages: MessageReader<PlaySfx>,
  config: Res<ConfigLoaded>,
  asset_server: Res<AssetServer>,
  audio_pause: Res<GlobalAudioPause>,
) {
  let mut rng = rand::rng();

  for request in messages.read() {
    let clips = config.audio.clips(request.cue);
    if clips.is_empty() {
      trace!("No clip configured for {:?}", request.cue);
      continue;
    }

    let clip = &clips[rng.random_range(0..clips.len())];
    let (min, max) = request.pitch;
    let speed = if max > min {
      rng.random_range(min..max)
    } else {
      min
    };

    let mut settings = PlaybackSettings::DESPAWN
      .with_volume(Volume::Linear(request.volume))
      .with_speed(speed);
    settings.paused = audio_pause.current();

    commands.spawn((AudioPlayer::new(asset_server.load(clip.clone())), settings));
  }
}
