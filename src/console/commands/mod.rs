//! Console commands.

mod kill;
mod lives;
mod photos;
mod restart;
mod teleport;

pub use kill::{KillCommand, kill_command};
pub use lives::{LivesCommand, lives_command};
pub use photos::{PhotosCommand, photos_command};
pub use restart::{RestartCommand, restart_command};
pub use teleport::{TeleportCommand, teleport_command};
