pub mod audio;
pub(crate) mod camera;
pub mod hit_stop;
pub mod pause;
mod physics;
pub mod time_scale;

use bevy::prelude::*;
pub use physics::{GravityConfig, TERMINAL_VELOCITY};

/// Frame phases for gameplay logic, chained in `Update`.
///
/// Systems that read another component's state see the value as of the most
/// recent completed phase, never a later one.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameplaySet {
  /// Fold raw input into per-entity intents.
  Intent,
  /// Produce damage and hit messages (hazards, contacts, attacks).
  Hazards,
  /// Apply damage: player and enemy lifecycle transitions.
  Vitals,
  /// Checkpoint capture gate and tutorial.
  Capture,
  /// Resolve finished death sequences (respawn or game over).
  Outcome,
  /// Ledger restoration pass over all enemies.
  Restore,
  /// Cosmetics, HUD, feedback.
  Presentation,
}

pub struct GameplaySetsPlugin;

impl Plugin for GameplaySetsPlugin {
  fn build(&self, app: &mut App) {
    app.configure_sets(
      Update,
      (
        GameplaySet::Intent,
        GameplaySet::Hazards,
        GameplaySet::Vitals,
        GameplaySet::Capture,
        GameplaySet::Outcome,
        GameplaySet::Restore,
        GameplaySet::Presentation,
      )
        .chain(),
    );
  }
}

/// Adds [`GameplaySetsPlugin`] unless another plugin already did.
pub fn ensure_gameplay_sets(app: &mut App) {
  if !app.is_plugin_added::<GameplaySetsPlugin>() {
    app.add_plugins(GameplaySetsPlugin);
  }
}

pub struct CorePlugin;

impl Plugin for CorePlugin {
  fn build(&self, app: &mut App) {
    ensure_gameplay_sets(app);
    app
      .add_plugins(physics::PhysicsPlugin)
      .add_plugins(time_scale::TimeScalePlugin)
      .add_plugins(pause::PausePlugin)
      .add_plugins(hit_stop::HitStopPlugin)
      .add_plugins(audio::SfxPlugin)
      .init_resource::<camera::CameraSmoothness>()
      .add_systems(Startup, camera::setup_camera)
      .add_systems(PostUpdate, camera::camera_follow);
  }
}
