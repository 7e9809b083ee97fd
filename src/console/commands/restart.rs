//! Full level restart, lives included.

use bevy::ecs::message::MessageWriter;
use bevy::prelude::*;
use bevy_console::{ConsoleCommand, reply};
use clap::Parser;

use crate::session::LevelCommand;

#[derive(Parser, ConsoleCommand)]
#[command(name = "restart")]
pub struct RestartCommand;

pub fn restart_command(
  mut log: ConsoleCommand<RestartCommand>,
  mut level: MessageWriter<LevelCommand>,
) {
  if let Some(Ok(RestartCommand)) = log.take() {
    level.write(LevelCommand::Restart);
    reply!(log, "Restarting level");
  }
}
