mod plugin;

use std::fmt;

use bevy::{asset::Asset, prelude::*, reflect::TypePath};
pub use plugin::ConfigPlugin;
use serde::{Deserialize, Deserializer, de};

#[derive(Asset, TypePath, Deserialize, Debug, Clone)]
pub struct GameConfig {
  pub window: WindowConfig,
  pub camera: CameraConfig,
  pub physics: PhysicsConfig,
  pub player: PlayerConfig,
  pub combat: CombatConfig,
  pub lives: LivesConfig,
  pub checkpoint: CheckpointConfig,
  pub death: DeathConfig,
  pub enemy: EnemyConfig,
  pub shooter: ShooterConfig,
  pub hit_stop: HitStopConfig,
  pub level: LevelConfig,
  pub audio: AudioConfig,
}

#[derive(Deserialize, Debug, Clone)]
pub struct WindowConfig {
  pub width: u32,
  pub height: u32,
  pub title: String,
}

#[derive(Deserialize, Debug, Clone)]
pub struct CameraConfig {
  pub viewport_width: f32,
  pub viewport_height: f32,
  /// Follow smoothing (higher = snappier).
  pub smoothness: f32,
}

#[derive(Deserialize, Debug, Clone)]
pub struct PhysicsConfig {
  pub gravity: f32,
}

#[derive(Deserialize, Debug, Clone)]
pub struct PlayerConfig {
  pub spawn_x: f32,
  pub spawn_y: f32,
  pub collider_radius: f32,
  pub collider_length: f32,
  pub walk_speed: f32,
  pub acceleration: f32,
  pub air_acceleration: f32,
  pub jump_speed: f32,
  pub max_jumps: u32,
  pub snap_to_ground: f32,
  pub max_slope_angle: f32,
  pub autostep_height: f32,
  pub autostep_width: f32,
  pub size: [f32; 2],
  #[serde(deserialize_with = "deserialize_hex_color")]
  pub color: [f32; 3],
  /// Sprite alpha while defending.
  pub defend_alpha: f32,
}

#[derive(Deserialize, Debug, Clone)]
pub struct CombatConfig {
  pub attack_range: f32,
  /// Horizontal distance of the attack point in front of the player.
  pub attack_offset: f32,
  pub attack_cooldown: f32,
}

#[derive(Deserialize, Debug, Clone)]
pub struct LivesConfig {
  pub starting: u32,
}

#[derive(Deserialize, Debug, Clone)]
pub struct CheckpointConfig {
  pub photos: u32,
  pub hold_secs: f32,
  pub freeze_secs: f32,
  pub slow_time: bool,
  pub slow_time_scale: f32,
  pub icon_fade_secs: f32,
  pub used_volume: f32,
  pub empty_volume: f32,
}

#[derive(Deserialize, Debug, Clone)]
pub struct DeathConfig {
  /// Length of the player's death presentation, in (virtual) seconds.
  pub sequence_secs: f32,
  pub hurt_volume: f32,
}

#[derive(Deserialize, Debug, Clone)]
pub struct EnemyConfig {
  pub size: [f32; 2],
  #[serde(deserialize_with = "deserialize_hex_color")]
  pub color: [f32; 3],
  pub fade_secs: f32,
  pub pop_secs: f32,
  pub pop_scale: f32,
  pub contact_radius: f32,
  pub contact_cooldown: f32,
  pub turn_pause_secs: f32,
  pub death_volume: f32,
}

/// Ranged enemies and the projectiles they fire.
#[derive(Deserialize, Debug, Clone)]
pub struct ShooterConfig {
  pub interval_secs: f32,
  pub range: f32,
  pub shoot_volume: f32,
  pub projectile_speed: f32,
  pub projectile_lifetime_secs: f32,
  pub projectile_radius: f32,
  /// Speed multiplier applied when the player bats a projectile back.
  pub reflect_speed_multiplier: f32,
  #[serde(deserialize_with = "deserialize_hex_color")]
  pub projectile_color: [f32; 3],
  #[serde(deserialize_with = "deserialize_hex_color")]
  pub reflected_color: [f32; 3],
  pub hit_volume: f32,
}

#[derive(Deserialize, Debug, Clone)]
pub struct HitStopConfig {
  pub secs: f32,
  pub scale: f32,
}

#[derive(Deserialize, Debug, Clone)]
pub struct LevelConfig {
  /// Falling below this height is lethal.
  pub kill_y: f32,
  #[serde(default)]
  pub platforms: Vec<RectConfig>,
  #[serde(default)]
  pub kill_zones: Vec<RectConfig>,
  #[serde(default)]
  pub enemies: Vec<EnemySpawnConfig>,
  #[serde(default)]
  pub tutorials: Vec<TutorialConfig>,
  #[serde(default)]
  pub hints: Vec<HintConfig>,
}

/// Axis-aligned rectangle given by its center and size.
#[derive(Deserialize, Debug, Clone, Copy)]
pub struct RectConfig {
  pub x: f32,
  pub y: f32,
  pub width: f32,
  pub height: f32,
}

impl RectConfig {
  pub fn to_rect(self) -> Rect {
    Rect::from_center_size(Vec2::new(self.x, self.y), Vec2::new(self.width, self.height))
  }
}

#[derive(Deserialize, Debug, Clone)]
pub struct EnemySpawnConfig {
  pub x: f32,
  pub y: f32,
  pub patrol_min: f32,
  pub patrol_max: f32,
  pub speed: f32,
  #[serde(default)]
  pub start_moving_right: bool,
  #[serde(default)]
  pub shooter: bool,
}

#[derive(Deserialize, Debug, Clone)]
pub struct TutorialConfig {
  pub area: RectConfig,
  pub hold_secs: f32,
  pub slow_time_scale: f32,
  pub fade_secs: f32,
}

/// One-shot hint zone: slows time and holds the player still while a
/// message slides in and out.
#[derive(Deserialize, Debug, Clone)]
pub struct HintConfig {
  pub area: RectConfig,
  pub text: String,
  pub slow_time_scale: f32,
  /// Real-time wait between entering and the message appearing.
  pub delay_secs: f32,
  pub slide_secs: f32,
  pub stay_secs: f32,
}

/// Clip paths per sound cue. A cue with several clips picks one at random.
#[derive(Deserialize, Debug, Clone, Default)]
pub struct AudioConfig {
  #[serde(default)]
  pub photo_used: Vec<String>,
  #[serde(default)]
  pub photo_empty: Vec<String>,
  #[serde(default)]
  pub enemy_death: Vec<String>,
  #[serde(default)]
  pub player_hurt: Vec<String>,
  #[serde(default)]
  pub jump: Vec<String>,
  #[serde(default)]
  pub enemy_shoot: Vec<String>,
  #[serde(default)]
  pub projectile_hit: Vec<String>,
}

fn deserialize_hex_color<'de, D>(deserializer: D) -> Result<[f32; 3], D::Error>
where
  D: Deserializer<'de>,
{
  let s: String = Deserialize::deserialize(deserializer)?;
  let s = s.trim_start_matches('#');
  if s.len() != 6 {
    return Err(de::Error::custom("hex color must be 6 characters"));
  }
  let r = u8::from_str_radix(&s[0..2], 16).map_err(de::Error::custom)?;
  let g = u8::from_str_radix(&s[2..4], 16).map_err(de::Error::custom)?;
  let b = u8::from_str_radix(&s[4..6], 16).map_err(de::Error::custom)?;
  Ok([r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0])
}

/// Configuration rejected by [`GameConfig::validate`].
#[derive(Debug)]
pub enum ConfigError {
  Parse(toml::de::Error),
  NonPositive { field: &'static str, value: f32 },
  OutOfRange { field: &'static str, value: f32 },
  InvertedPatrol { index: usize },
}

impl fmt::Display for ConfigError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Parse(err) => write!(f, "failed to parse config: {}", err),
      Self::NonPositive { field, value } => {
        write!(f, "{} must be greater than zero, got {}", field, value)
      }
      Self::OutOfRange { field, value } => {
        write!(f, "{} must be within (0, 1], got {}", field, value)
      }
      Self::InvertedPatrol { index } => {
        write!(f, "enemy #{} has patrol_min greater than patrol_max", index)
      }
    }
  }
}

impl std::error::Error for ConfigError {}

impl From<toml::de::Error> for ConfigError {
  fn from(err: toml::de::Error) -> Self {
    Self::Parse(err)
  }
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
  if value > 0.0 {
    Ok(())
  } else {
    Err(ConfigError::NonPositive { field, value })
  }
}

fn unit_scale(field: &'static str, value: f32) -> Result<(), ConfigError> {
  if value > 0.0 && value <= 1.0 {
    Ok(())
  } else {
    Err(ConfigError::OutOfRange { field, value })
  }
}

impl GameConfig {
  /// Parses and validates a TOML document.
  pub fn from_toml(source: &str) -> Result<Self, ConfigError> {
    let config: GameConfig = toml::from_str(source)?;
    config.validate()?;
    Ok(config)
  }

  pub fn validate(&self) -> Result<(), ConfigError> {
    positive("checkpoint.hold_secs", self.checkpoint.hold_secs)?;
    unit_scale("checkpoint.slow_time_scale", self.checkpoint.slow_time_scale)?;
    positive("death.sequence_secs", self.death.sequence_secs)?;
    unit_scale("hit_stop.scale", self.hit_stop.scale)?;
    positive("enemy.fade_secs", self.enemy.fade_secs)?;
    positive("enemy.pop_secs", self.enemy.pop_secs)?;
    positive("shooter.interval_secs", self.shooter.interval_secs)?;
    positive("shooter.projectile_lifetime_secs", self.shooter.projectile_lifetime_secs)?;
    positive("shooter.projectile_radius", self.shooter.projectile_radius)?;
    for tutorial in &self.level.tutorials {
      positive("level.tutorials.hold_secs", tutorial.hold_secs)?;
      unit_scale("level.tutorials.slow_time_scale", tutorial.slow_time_scale)?;
    }
    for hint in &self.level.hints {
      unit_scale("level.hints.slow_time_scale", hint.slow_time_scale)?;
      positive("level.hints.slide_secs", hint.slide_secs)?;
    }
    for (index, enemy) in self.level.enemies.iter().enumerate() {
      if enemy.patrol_min > enemy.patrol_max {
        return Err(ConfigError::InvertedPatrol { index });
      }
    }
    Ok(())
  }
}

#[derive(Resource)]
pub struct ConfigHandle(pub Handle<GameConfig>);

#[derive(Resource, Debug, Clone)]
pub struct ConfigLoaded {
  pub window: WindowConfig,
  pub camera: CameraConfig,
  pub physics: PhysicsConfig,
  pub player: PlayerConfig,
  pub combat: CombatConfig,
  pub lives: LivesConfig,
  pub checkpoint: CheckpointConfig,
  pub death: DeathConfig,
  pub enemy: EnemyConfig,
  pub shooter: ShooterConfig,
  pub hit_stop: HitStopConfig,
  pub level: LevelConfig,
  pub audio: AudioConfig,
}

impl From<GameConfig> for ConfigLoaded {
  fn from(config: GameConfig) -> Self {
    Self {
      window: config.window,
      camera: config.camera,
      physics: config.physics,
      player: config.player,
      combat: config.combat,
      lives: config.lives,
      checkpoint: config.checkpoint,
      death: config.death,
      enemy: config.enemy,
      shooter: config.shooter,
      hit_stop: config.hit_stop,
      level: config.level,
      audio: config.audio,
    }
  }
}

/// The config shipped with the game, embedded at compile time.
pub const EMBEDDED_CONFIG: &str = include_str!("../../assets/config/game.config.toml");
