//! Developer console: teleport, kill, lives, photos and restart.

pub mod commands;
mod toggle;

use bevy::prelude::*;
use bevy_console::{AddConsoleCommand, ConsoleConfiguration, ConsoleOpen, ConsolePlugin};
use commands::{
  KillCommand, LivesCommand, PhotosCommand, RestartCommand, TeleportCommand, kill_command,
  lives_command, photos_command, restart_command, teleport_command,
};

use crate::core::pause::PauseToggleSet;

/// Run condition: the console is not taking keyboard input.
pub fn console_closed(open: Option<Res<ConsoleOpen>>) -> bool {
  !open.is_some_and(|open| open.open)
}

pub struct ConsolePlugins;

impl Plugin for ConsolePlugins {
  fn build(&self, app: &mut App) {
    app
      .add_plugins(ConsolePlugin)
      .insert_resource(ConsoleConfiguration {
        // Disable default toggle keys, we use custom `/` handling
        keys: vec![],
        ..default()
      })
      .add_console_command::<TeleportCommand, _>(teleport_command)
      .add_console_command::<KillCommand, _>(kill_command)
      .add_console_command::<LivesCommand, _>(lives_command)
      .add_console_command::<PhotosCommand, _>(photos_command)
      .add_console_command::<RestartCommand, _>(restart_command)
      // Escape closes the console; it must not also pause the game
      .configure_sets(Update, PauseToggleSet.run_if(console_closed))
      .add_systems(Update, toggle::handle_console_toggle.before(PauseToggleSet));
  }
}
