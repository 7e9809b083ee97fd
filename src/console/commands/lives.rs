//! Lives override.

use bevy::prelude::*;
use bevy_console::{ConsoleCommand, reply};
use clap::Parser;

use crate::session::LifeBudget;

#[derive(Parser, ConsoleCommand)]
#[command(name = "lives")]
pub struct LivesCommand {
  /// Remaining lives, capped at the starting value
  count: u32,
}

pub fn lives_command(mut log: ConsoleCommand<LivesCommand>, lives: Option<ResMut<LifeBudget>>) {
  if let Some(Ok(LivesCommand { count })) = log.take() {
    match lives {
      Some(mut lives) => {
        lives.set_remaining(count);
        reply!(log, "Lives: {}/{}", lives.remaining(), lives.starting());
      }
      None => reply!(log, "No life budget in this session"),
    }
  }
}
