//! Photo count override.

use bevy::prelude::*;
use bevy_console::{ConsoleCommand, reply};
use clap::Parser;

use crate::checkpoint::CaptureGate;
use crate::player::components::Player;

#[derive(Parser, ConsoleCommand)]
#[command(name = "photos")]
pub struct PhotosCommand {
  /// Photos left
  count: u32,
}

pub fn photos_command(
  mut log: ConsoleCommand<PhotosCommand>,
  mut gates: Query<&mut CaptureGate, With<Player>>,
) {
  if let Some(Ok(PhotosCommand { count })) = log.take() {
    if let Ok(mut gate) = gates.single_mut() {
      gate.set_photos(count);
      reply!(log, "Photos: {}", count);
    } else {
      reply!(log, "No player found");
    }
  }
}
