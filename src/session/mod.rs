pub mod hazards;
pub mod hint;
pub mod level;
pub mod lives;

use bevy::ecs::message::{MessageReader, MessageWriter};
use bevy::prelude::*;
pub use lives::LifeBudget;

use crate::core::GameplaySet;
use crate::core::time_scale::{GlobalTimeScale, OverrideOwner};
use crate::player::vitals::{DamagePlayer, DamageSource, GameOver};

/// Despawned on level reload.
#[derive(Component, Debug, Default)]
pub struct LevelEntity;

/// Restart outranks reload when both arrive in one frame.
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LevelCommand {
  Reload,
  Restart,
}

/// The level was (re)built.
#[derive(Message, Debug, Clone, Copy)]
pub struct LevelEntered {
  pub restart: bool,
}

/// Present while the game-over screen is up. Time stands still until a
/// restart.
#[derive(Resource, Debug, Default)]
pub struct GameOverScreen;

pub struct SessionPlugin;

impl Plugin for SessionPlugin {
  fn build(&self, app: &mut App) {
    crate::core::ensure_gameplay_sets(app);
    app
      .init_resource::<GlobalTimeScale>()
      .init_resource::<crate::core::time_scale::GlobalAudioPause>()
      .add_message::<LevelCommand>()
      .add_message::<LevelEntered>()
      .add_message::<GameOver>()
      .add_message::<DamagePlayer>()
      .add_systems(Startup, request_first_level)
      .add_systems(
        Update,
        (
          (
            session_keys,
            level::handle_level_commands,
            level::reset_lives_on_entry,
          )
            .chain()
            .before(GameplaySet::Intent),
          hazards::hazard_damage.in_set(GameplaySet::Hazards),
          hint::run_hint_zones.in_set(GameplaySet::Capture),
          (show_game_over, hint::release_removed_hints).in_set(GameplaySet::Presentation),
        ),
      );
  }
}

fn request_first_level(mut level: MessageWriter<LevelCommand>) {
  level.write(LevelCommand::Reload);
}

pub fn show_game_over(
  mut commands: Commands,
  mut game_over: MessageReader<GameOver>,
  screen: Option<Res<GameOverScreen>>,
  mut scale: ResMut<GlobalTimeScale>,
) {
  if game_over.read().count() == 0 || screen.is_some() {
    return;
  }
  scale.engage(OverrideOwner::GameOver, 0.0);
  commands.insert_resource(GameOverScreen);
}

/// R reloads (restarts after game over), Enter restarts after game over,
/// K is a debug kill.
fn session_keys(
  keys: Res<ButtonInput<KeyCode>>,
  screen: Option<Res<GameOverScreen>>,
  mut level: MessageWriter<LevelCommand>,
  mut damage: MessageWriter<DamagePlayer>,
) {
  let game_over = screen.is_some();

  if keys.just_pressed(KeyCode::KeyR) {
    level.write(if game_over {
      LevelCommand::Restart
    } else {
      LevelCommand::Reload
    });
  } else if game_over && keys.just_pressed(KeyCode::Enter) {
    level.write(LevelCommand::Restart);
  }

  if keys.just_pressed(KeyCode::KeyK) {
    damage.write(DamagePlayer {
      source: DamageSource::Debug,
    });
  }
}
