//! Short time-scale dips on impactful events (enemy kills).

use bevy::ecs::message::MessageReader;
use bevy::prelude::*;

use super::time_scale::{GlobalTimeScale, OverrideOwner};

/// Requests a hit-stop window owned by `source`.
#[derive(Message, Debug, Clone, Copy)]
pub struct HitStopRequest {
  pub source: Entity,
  pub secs: f32,
  pub scale: f32,
}

/// Active windows with their remaining real-time duration.
#[derive(Resource, Debug, Default)]
pub struct HitStops {
  active: Vec<(Entity, f32)>,
}

impl HitStops {
  pub fn is_active(&self, source: Entity) -> bool {
    self.active.iter().any(|(entity, _)| *entity == source)
  }

  pub fn clear(&mut self) {
    self.active.clear();
  }
}

pub struct HitStopPlugin;

impl Plugin for HitStopPlugin {
  fn build(&self, app: &mut App) {
    super::ensure_gameplay_sets(app);
    app
      .add_message::<HitStopRequest>()
      .init_resource::<HitStops>()
      .add_systems(
        Update,
        (start_hit_stops, tick_hit_stops)
          .chain()
          .in_set(super::GameplaySet::Presentation),
      );
  }
}

pub fn start_hit_stops(
  mut requests: MessageReader<HitStopRequest>,
  mut stops: ResMut<HitStops>,
  mut scale: ResMut<GlobalTimeScale>,
) {
  for request in requests.read() {
    scale.engage(OverrideOwner::HitStop(request.source), request.scale);
    match stops
      .active
      .iter_mut()
      .find(|(entity, _)| *entity == request.source)
    {
      Some((_, remaining)) => *remaining = request.secs,
      None => stops.active.push((request.source, request.secs)),
    }
  }
}

/// Counts windows down in real time; a window measured in scaled time would
/// stretch itself by its own scale.
pub fn tick_hit_stops(
  time: Res<Time<Real>>,
  mut stops: ResMut<HitStops>,
  mut scale: ResMut<GlobalTimeScale>,
) {
  if stops.active.is_empty() {
    return;
  }

  let dt = time.delta_secs();
  stops.active.retain_mut(|(source, remaining)| {
    *remaining -= dt;
    if *remaining > 0.0 {
      return true;
    }
    scale.release(OverrideOwner::HitStop(*source));
    false
  });
}
