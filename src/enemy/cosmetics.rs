//! Enemy death presentation: a squash-and-stretch pop followed by a fade.
//!
//! Advanced with real time so hit-stop and slow motion do not stretch it.

use bevy::color::Alpha;
use bevy::prelude::*;

use super::lifecycle::{DeathFeel, EnemyLifecycle, EnemyLook, LifecycleState};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
  Pop,
  Fade,
}

/// In-flight death sequence. Removing the component cancels it.
#[derive(Component, Debug, Clone)]
pub struct DeathCosmetic {
  phase: Phase,
  elapsed: f32,
  base_scale: Vec3,
}

/// What the sprite should look like this frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CosmeticFrame {
  pub scale: Vec3,
  /// Fraction of the original opacity.
  pub opacity: f32,
  pub finished: bool,
}

impl DeathCosmetic {
  pub fn new(base_scale: Vec3) -> Self {
    Self {
      phase: Phase::Pop,
      elapsed: 0.0,
      base_scale,
    }
  }

  pub fn advance(&mut self, dt: f32, feel: &DeathFeel) -> CosmeticFrame {
    self.elapsed += dt;

    if self.phase == Phase::Pop {
      if self.elapsed < feel.pop_secs {
        let k = self.elapsed / feel.pop_secs;
        // Up to the peak in the first half, back down in the second
        let s = if k < 0.5 {
          1.0 + (feel.pop_scale - 1.0) * (k / 0.5)
        } else {
          feel.pop_scale + (1.0 - feel.pop_scale) * ((k - 0.5) / 0.5)
        };
        return CosmeticFrame {
          scale: self.base_scale * Vec3::new(s, 2.0 - s, 1.0),
          opacity: 1.0,
          finished: false,
        };
      }
      self.phase = Phase::Fade;
      self.elapsed -= feel.pop_secs;
    }

    let t = (self.elapsed / feel.fade_secs).min(1.0);
    CosmeticFrame {
      scale: self.base_scale,
      opacity: 1.0 - t,
      finished: t >= 1.0,
    }
  }
}

pub fn advance_death_cosmetics(
  mut commands: Commands,
  time: Res<Time<Real>>,
  mut enemies: Query<(
    Entity,
    &mut DeathCosmetic,
    &DeathFeel,
    &EnemyLook,
    &mut EnemyLifecycle,
    &mut Transform,
    &mut Sprite,
    &mut Visibility,
  )>,
) {
  let dt = time.delta_secs();

  for (entity, mut cosmetic, feel, look, mut lifecycle, mut transform, mut sprite, mut visibility) in
    &mut enemies
  {
    // Reset or forced dead since the sequence started
    if lifecycle.state() != LifecycleState::Dying {
      commands.entity(entity).remove::<DeathCosmetic>();
      continue;
    }

    let frame = cosmetic.advance(dt, feel);
    transform.scale = frame.scale;
    sprite.color.set_alpha(look.alpha * frame.opacity);

    if frame.finished {
      *visibility = Visibility::Hidden;
      lifecycle.finish_dying();
      commands.entity(entity).remove::<DeathCosmetic>();
      debug!("Enemy {:?} dead", entity);
    }
  }
}
