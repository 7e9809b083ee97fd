//! Damage intake, death presentation and outcome resolution.

use bevy::color::Alpha;
use bevy::ecs::message::{MessageReader, MessageWriter};
use bevy::prelude::*;

use super::components::{
  BaseLook, CharacterVelocity, JumpState, LocomotionState, MovementLocks, Player, PlayerPose,
};
use super::vitals::{DamagePlayer, DeathOutcome, DeathSequenceComplete, GameOver, PlayerVitals};
use crate::checkpoint::RestoreCheckpoint;
use crate::core::audio::{PlaySfx, SfxCue};
use crate::session::lives::LifeBudget;

/// Death presentation countdown in virtual time, so it freezes while paused.
#[derive(Component, Debug, Clone, Copy)]
pub struct DeathAnimation {
  pub duration: f32,
  remaining: f32,
  signalled: bool,
}

impl DeathAnimation {
  pub fn new(duration: f32) -> Self {
    Self {
      duration,
      remaining: duration,
      signalled: false,
    }
  }

  /// Returns true exactly once, on the tick the animation runs out.
  pub fn tick(&mut self, dt: f32) -> bool {
    if self.signalled {
      return false;
    }
    self.remaining -= dt;
    if self.remaining > 0.0 {
      return false;
    }
    self.signalled = true;
    true
  }

  /// 0 at the start, 1 at the end.
  pub fn progress(&self) -> f32 {
    if self.duration <= 0.0 {
      return 1.0;
    }
    (1.0 - self.remaining / self.duration).clamp(0.0, 1.0)
  }
}

/// How this player's death plays out.
#[derive(Component, Debug, Clone, Copy)]
pub struct DeathFeedback {
  pub sequence_secs: f32,
  pub hurt_volume: f32,
}

pub fn apply_damage(
  mut commands: Commands,
  mut damage: MessageReader<DamagePlayer>,
  mut players: Query<
    (
      Entity,
      &mut PlayerVitals,
      &mut MovementLocks,
      &mut CharacterVelocity,
      &mut PlayerPose,
      &DeathFeedback,
    ),
    With<Player>,
  >,
  mut lives: Option<ResMut<LifeBudget>>,
  mut sfx: MessageWriter<PlaySfx>,
) {
  if damage.is_empty() {
    return;
  }
  let Ok((entity, mut vitals, mut locks, mut velocity, mut pose, feedback)) = players.single_mut()
  else {
    damage.clear();
    return;
  };

  for hit in damage.read() {
    let Some(outcome) = vitals.take_lethal_damage(lives.as_deref_mut()) else {
      trace!("Damage from {:?} ignored in {:?}", hit.source, vitals.state());
      continue;
    };

    info!(
      "Player killed by {:?}; outcome {:?}, {} lives left",
      hit.source,
      outcome,
      lives.as_ref().map_or(0, |l| l.remaining())
    );
    locks.insert(MovementLocks::DEATH);
    velocity.0.x = 0.0;
    *pose = PlayerPose::Dead;
    commands
      .entity(entity)
      .insert(DeathAnimation::new(feedback.sequence_secs));
    sfx.write(PlaySfx::new(SfxCue::PlayerHurt, feedback.hurt_volume));
  }
}

pub fn tick_death_animations(
  time: Res<Time>,
  mut players: Query<(Entity, &mut DeathAnimation, &BaseLook, &mut Sprite), With<Player>>,
  mut complete: MessageWriter<DeathSequenceComplete>,
) {
  let dt = time.delta_secs();
  for (entity, mut animation, look, mut sprite) in &mut players {
    let finished = animation.tick(dt);

    // Sink to half opacity over the animation
    let alpha = look.color.alpha() * (1.0 - 0.5 * animation.progress());
    sprite.color.set_alpha(alpha);

    if finished {
      debug!("Death sequence of {:?} complete", entity);
      complete.write(DeathSequenceComplete { player: entity });
    }
  }
}

pub fn resolve_death_outcome(
  mut commands: Commands,
  mut completions: MessageReader<DeathSequenceComplete>,
  mut players: Query<
    (
      &mut PlayerVitals,
      &mut Transform,
      &mut CharacterVelocity,
      &mut LocomotionState,
      &mut JumpState,
      &mut MovementLocks,
      &mut PlayerPose,
      &BaseLook,
      &mut Sprite,
    ),
    With<Player>,
  >,
  mut restore: MessageWriter<RestoreCheckpoint>,
  mut game_over: MessageWriter<GameOver>,
) {
  for completion in completions.read() {
    let Ok((
      mut vitals,
      mut transform,
      mut velocity,
      mut locomotion,
      mut jumps,
      mut locks,
      mut pose,
      look,
      mut sprite,
    )) = players.get_mut(completion.player)
    else {
      continue;
    };

    match vitals.complete_death_sequence() {
      Some(DeathOutcome::Respawn) => {
        let point = vitals.respawn_point();
        transform.translation.x = point.x;
        transform.translation.y = point.y;
        velocity.0 = Vec2::ZERO;
        *locomotion = LocomotionState::Airborne;
        *jumps = JumpState::default();
        locks.remove(MovementLocks::DEATH);
        *pose = PlayerPose::Idle;
        sprite.color = look.color;
        commands.entity(completion.player).remove::<DeathAnimation>();
        restore.write(RestoreCheckpoint);
        info!("Respawned at ({:.1}, {:.1})", point.x, point.y);
      }
      Some(DeathOutcome::GameOver) => {
        commands.entity(completion.player).remove::<DeathAnimation>();
        game_over.write(GameOver);
        info!("Game over");
      }
      None => {
        trace!("Stale death completion for {:?}", completion.player);
      }
    }
  }
}
