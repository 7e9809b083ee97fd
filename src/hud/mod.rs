//! Lives, photos and the game-over panel, drawn with egui.

use bevy::prelude::*;
use bevy_egui::{EguiContext, egui};

use crate::checkpoint::CaptureGate;
use crate::config::ConfigLoaded;
use crate::player::components::Player;
use crate::session::hint::HintZone;
use crate::session::{GameOverScreen, LifeBudget};

const HEART_FULL_ALPHA: f32 = 1.0;
const HEART_EMPTY_ALPHA: f32 = 0.2;

/// One heart per starting life; spent ones are dimmed.
pub fn heart_alphas(remaining: u32, starting: u32) -> Vec<f32> {
  (0..starting)
    .map(|i| {
      if i < remaining {
        HEART_FULL_ALPHA
      } else {
        HEART_EMPTY_ALPHA
      }
    })
    .collect()
}

/// Count shown next to the photo icon. A single photo shows no count.
pub fn photo_label(photos: u32) -> Option<String> {
  (photos > 1).then(|| format!("x{}", photos))
}

/// Photo icon opacity. Fades out in real time once the last photo is used.
#[derive(Resource, Debug, Clone)]
pub struct PhotoIcon {
  pub alpha: f32,
  fade_secs: f32,
  last_photos: Option<u32>,
}

impl PhotoIcon {
  pub fn new(fade_secs: f32) -> Self {
    Self {
      alpha: 1.0,
      fade_secs,
      last_photos: None,
    }
  }

  pub fn update(&mut self, photos: u32, dt: f32) {
    if photos > 0 {
      self.alpha = 1.0;
    } else if self.last_photos.is_none() {
      // Started with nothing: never shown
      self.alpha = 0.0;
    } else if self.fade_secs <= 0.0 {
      self.alpha = 0.0;
    } else {
      self.alpha = (self.alpha - dt / self.fade_secs).max(0.0);
    }
    self.last_photos = Some(photos);
  }
}

/// Vertical offset of the hint panel for a given reveal: it slides up from
/// below the screen edge.
pub fn hint_offset(reveal: f32) -> f32 {
  const TRAVEL: f32 = 80.0;
  (1.0 - reveal) * TRAVEL - 24.0
}

/// Marker resource indicating egui is ready for UI drawing
#[derive(Resource, Default)]
struct EguiReady(u32);

pub struct HudPlugin;

impl Plugin for HudPlugin {
  fn build(&self, app: &mut App) {
    if !app.is_plugin_added::<bevy_egui::EguiPlugin>() {
      app.add_plugins(bevy_egui::EguiPlugin::default());
    }
    app
      .init_resource::<EguiReady>()
      .add_systems(Startup, init_photo_icon)
      .add_systems(
        Update,
        (update_photo_icon, draw_hud)
          .chain()
          .in_set(crate::core::GameplaySet::Presentation),
      );
  }
}

fn init_photo_icon(mut commands: Commands, config: Res<ConfigLoaded>) {
  commands.insert_resource(PhotoIcon::new(config.checkpoint.icon_fade_secs));
}

fn update_photo_icon(
  time: Res<Time<Real>>,
  gates: Query<&CaptureGate, With<Player>>,
  icon: Option<ResMut<PhotoIcon>>,
) {
  let (Some(mut icon), Ok(gate)) = (icon, gates.single()) else {
    return;
  };
  icon.update(gate.photos(), time.delta_secs());
}

fn draw_hud(
  mut egui_ctx: Query<&mut EguiContext>,
  lives: Option<Res<LifeBudget>>,
  gates: Query<&CaptureGate, With<Player>>,
  icon: Option<Res<PhotoIcon>>,
  game_over: Option<Res<GameOverScreen>>,
  hints: Query<&HintZone>,
  mut ready: ResMut<EguiReady>,
) {
  // Skip early frames to allow egui to fully initialize
  if ready.0 < 5 {
    ready.0 += 1;
    return;
  }
  let Ok(ctx) = egui_ctx.single_mut() else {
    return;
  };
  let ctx: &egui::Context = ctx.into_inner().get_mut();

  egui::Area::new(egui::Id::new("hud_status"))
    .anchor(egui::Align2::LEFT_TOP, egui::vec2(12.0, 12.0))
    .interactable(false)
    .show(ctx, |ui| {
      if let Some(lives) = &lives {
        ui.horizontal(|ui| {
          for alpha in heart_alphas(lives.remaining(), lives.starting()) {
            let color = egui::Color32::from_rgba_unmultiplied(220, 40, 60, (alpha * 255.0) as u8);
            ui.label(egui::RichText::new("♥").size(24.0).color(color));
          }
        });
      }

      if let (Ok(gate), Some(icon)) = (gates.single(), &icon) {
        if icon.alpha > 0.0 {
          let alpha = (icon.alpha * 255.0) as u8;
          ui.horizontal(|ui| {
            ui.label(
              egui::RichText::new("📷")
                .size(22.0)
                .color(egui::Color32::from_white_alpha(alpha)),
            );
            if let Some(label) = photo_label(gate.photos()) {
              ui.label(
                egui::RichText::new(label)
                  .size(18.0)
                  .color(egui::Color32::from_white_alpha(alpha)),
              );
            }
          });
        }
      }
    });

  if let Some(hint) = hints.iter().find(|hint| hint.reveal() > 0.0) {
    let reveal = hint.reveal();
    egui::Area::new(egui::Id::new("hud_hint"))
      .anchor(egui::Align2::CENTER_BOTTOM, egui::vec2(0.0, hint_offset(reveal)))
      .interactable(false)
      .show(ctx, |ui| {
        egui::Frame::new()
          .fill(egui::Color32::from_black_alpha((reveal * 180.0) as u8))
          .inner_margin(egui::Margin::same(12))
          .show(ui, |ui| {
            ui.label(
              egui::RichText::new(&hint.text)
                .size(18.0)
                .color(egui::Color32::from_white_alpha((reveal * 255.0) as u8)),
            );
          });
      });
  }

  if game_over.is_some() {
    egui::Area::new(egui::Id::new("hud_game_over"))
      .anchor(egui::Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
      .interactable(false)
      .show(ctx, |ui| {
        egui::Frame::new()
          .fill(egui::Color32::from_black_alpha(200))
          .inner_margin(egui::Margin::same(24))
          .show(ui, |ui| {
            ui.vertical_centered(|ui| {
              ui.label(
                egui::RichText::new("GAME OVER")
                  .size(40.0)
                  .color(egui::Color32::WHITE),
              );
              ui.label(
                egui::RichText::new("Press R or Enter to restart")
                  .size(16.0)
                  .color(egui::Color32::LIGHT_GRAY),
              );
            });
          });
      });
  }
}
