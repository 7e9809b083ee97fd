//! Kill the player as if hit by a hazard.

use bevy::ecs::message::MessageWriter;
use bevy::prelude::*;
use bevy_console::{ConsoleCommand, reply};
use clap::Parser;

use crate::player::vitals::{DamagePlayer, DamageSource};

#[derive(Parser, ConsoleCommand)]
#[command(name = "kill")]
pub struct KillCommand;

pub fn kill_command(mut log: ConsoleCommand<KillCommand>, mut damage: MessageWriter<DamagePlayer>) {
  if let Some(Ok(KillCommand)) = log.take() {
    damage.write(DamagePlayer {
      source: DamageSource::Debug,
    });
    reply!(log, "Lethal damage sent");
  }
}
