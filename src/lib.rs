//! Photo-checkpoint platformer.
//!
//! The player spends limited photos to set checkpoints and a limited life
//! budget to respawn at them. Enemy deaths are tracked per checkpoint so a
//! respawn puts the world back the way it was when the photo was taken.

pub mod checkpoint;
pub mod config;
pub mod console;
pub mod core;
pub mod enemy;
pub mod hud;
pub mod input;
pub mod player;
pub mod session;

#[cfg(test)]
mod test_support;

use bevy::prelude::*;

/// All gameplay plugins, without windowing or rendering setup.
pub struct GamePlugins;

impl Plugin for GamePlugins {
  fn build(&self, app: &mut App) {
    app
      .add_plugins(config::ConfigPlugin)
      .add_plugins(core::CorePlugin)
      .add_plugins(input::InputPlugin)
      .add_plugins(player::PlayerPlugin)
      .add_plugins(enemy::EnemyPlugin)
      .add_plugins(checkpoint::CheckpointPlugin)
      .add_plugins(session::SessionPlugin)
      .add_plugins(hud::HudPlugin)
      .add_plugins(console::ConsolePlugins);
  }
}
