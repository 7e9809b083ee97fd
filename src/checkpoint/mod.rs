pub mod gate;
pub mod ledger;
pub mod restore;
pub mod tutorial;

#[cfg(test)]
mod tests;

use bevy::ecs::message::{MessageReader, MessageWriter};
use bevy::prelude::*;
pub use gate::{CaptureFeedback, CaptureGate};
pub use ledger::CheckpointLedger;
pub use tutorial::CheckpointTutorial;

use crate::core::GameplaySet;
use crate::core::audio::{PlaySfx, SfxCue};
use crate::player::components::MovementLocks;
use crate::player::vitals::PlayerVitals;

/// A capture fired for `player` at `position`.
#[derive(Message, Debug, Clone, Copy)]
pub struct CheckpointCaptured {
  pub player: Entity,
  pub position: Vec2,
}

/// Asks for the ledger and every enemy to be rolled back to the last
/// snapshot.
#[derive(Message, Debug, Clone, Copy, Default)]
pub struct RestoreCheckpoint;

/// Movement freeze right after a capture, counted in real time.
#[derive(Component, Debug, Clone, Copy)]
pub struct CaptureFreeze {
  pub remaining: f32,
}

pub struct CheckpointPlugin;

impl Plugin for CheckpointPlugin {
  fn build(&self, app: &mut App) {
    crate::core::ensure_gameplay_sets(app);
    app
      .init_resource::<CheckpointLedger>()
      .init_resource::<crate::enemy::EnemyRegistry>()
      .init_resource::<crate::core::time_scale::GlobalTimeScale>()
      .add_message::<CheckpointCaptured>()
      .add_message::<RestoreCheckpoint>()
      .add_message::<PlaySfx>()
      .add_systems(
        Update,
        (
          (
            tutorial::run_checkpoint_tutorials,
            gate::tick_capture_gates,
            commit_captures,
            tick_capture_freeze,
          )
            .chain()
            .in_set(GameplaySet::Capture),
          restore::restore_checkpoint.in_set(GameplaySet::Restore),
          (gate::release_removed_gates, tutorial::release_removed_tutorials)
            .in_set(GameplaySet::Presentation),
        ),
      );
  }
}

/// Applies a capture: new respawn point, ledger snapshot, feedback, and a
/// short movement freeze.
pub fn commit_captures(
  mut commands: Commands,
  mut captures: MessageReader<CheckpointCaptured>,
  mut ledger: ResMut<CheckpointLedger>,
  mut players: Query<(&mut PlayerVitals, &mut MovementLocks, Option<&CaptureFeedback>)>,
  mut sfx: MessageWriter<PlaySfx>,
) {
  for capture in captures.read() {
    ledger.save_snapshot();

    let Ok((mut vitals, mut locks, feedback)) = players.get_mut(capture.player) else {
      warn!("Capture by missing player {:?}; snapshot saved only", capture.player);
      continue;
    };
    vitals.set_respawn_point(capture.position);

    let feedback = feedback.copied().unwrap_or(CaptureFeedback {
      freeze_secs: 0.0,
      used_volume: 1.0,
      empty_volume: 1.0,
    });
    if feedback.freeze_secs > 0.0 {
      locks.insert(MovementLocks::CAPTURE);
      commands.entity(capture.player).insert(CaptureFreeze {
        remaining: feedback.freeze_secs,
      });
    }
    sfx.write(PlaySfx::new(SfxCue::PhotoUsed, feedback.used_volume));

    info!(
      "Checkpoint captured at ({:.1}, {:.1}), {} dead enemies saved",
      capture.position.x,
      capture.position.y,
      ledger.snapshot().len()
    );
  }
}

pub fn tick_capture_freeze(
  mut commands: Commands,
  time: Res<Time<Real>>,
  mut frozen: Query<(Entity, &mut CaptureFreeze, &mut MovementLocks)>,
) {
  let dt = time.delta_secs();
  for (entity, mut freeze, mut locks) in &mut frozen {
    freeze.remaining -= dt;
    if freeze.remaining <= 0.0 {
      locks.remove(MovementLocks::CAPTURE);
      commands.entity(entity).remove::<CaptureFreeze>();
    }
  }
}
