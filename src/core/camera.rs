use bevy::{camera::ScalingMode, prelude::*};

use crate::config::ConfigLoaded;
use crate::player::components::Player;

/// Marker component for the game camera
#[derive(Component)]
pub struct GameCamera;

/// Camera smoothing factor (higher = snappier, lower = smoother)
#[derive(Resource)]
pub struct CameraSmoothness(pub f32);

impl Default for CameraSmoothness {
  fn default() -> Self {
    Self(8.0)
  }
}

/// Simple orthographic 2D camera setup
pub fn setup_camera(
  mut commands: Commands,
  config: Res<ConfigLoaded>,
  mut smoothness: ResMut<CameraSmoothness>,
) {
  smoothness.0 = config.camera.smoothness;

  commands.spawn((
    GameCamera,
    Camera2d,
    Camera {
      order: 0,
      clear_color: ClearColorConfig::Custom(Color::srgb(0.06, 0.07, 0.1)),
      ..default()
    },
    Projection::Orthographic(OrthographicProjection {
      near: -1000.0,
      far: 1000.0,
      scale: 1.0,
      viewport_origin: Vec2::new(0.5, 0.5),
      scaling_mode: ScalingMode::AutoMin {
        min_width: config.camera.viewport_width,
        min_height: config.camera.viewport_height,
      },
      area: Rect::default(),
    }),
  ));
}

/// Eases the camera towards the player using real time, so it keeps tracking
/// during slow motion.
pub fn camera_follow(
  player_query: Query<&Transform, With<Player>>,
  mut camera_query: Query<&mut Transform, (With<GameCamera>, Without<Player>)>,
  smoothness: Res<CameraSmoothness>,
  time: Res<Time<Real>>,
) {
  let Ok(player) = player_query.single() else {
    return;
  };
  let Ok(mut camera) = camera_query.single_mut() else {
    return;
  };

  let t = 1.0 - (-smoothness.0 * time.delta_secs()).exp();
  let target = player.translation.truncate();
  let current = camera.translation.truncate();
  let next = current.lerp(target, t);
  camera.translation.x = next.x;
  camera.translation.y = next.y;
}
