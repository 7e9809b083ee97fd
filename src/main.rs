use bevy::{
  prelude::*,
  window::{PresentMode, WindowMode, WindowResolution},
};
use photo_platformer::GamePlugins;
use photo_platformer::config::{EMBEDDED_CONFIG, GameConfig};

fn main() {
  // WASM: set up panic hook for better error messages
  #[cfg(target_family = "wasm")]
  console_error_panic_hook::set_once();

  // WASM: embed config at compile time (no filesystem access)
  #[cfg(target_family = "wasm")]
  let config_str = EMBEDDED_CONFIG.to_string();
  #[cfg(not(target_family = "wasm"))]
  let config_str = std::fs::read_to_string("assets/config/game.config.toml")
    .unwrap_or_else(|_| EMBEDDED_CONFIG.to_string());

  let config = match GameConfig::from_toml(&config_str) {
    Ok(config) => config,
    Err(err) => panic!("Invalid config file: {}", err),
  };

  let mut app = App::new();

  app.insert_resource(Time::<Fixed>::from_hz(60.0));

  app
    .add_plugins(
      DefaultPlugins
        .set(ImagePlugin::default_nearest())
        .set(WindowPlugin {
          primary_window: Some(Window {
            resolution: WindowResolution::new(config.window.width, config.window.height),
            title: config.window.title.clone(),
            // WASM: only Fifo (vsync) is supported on WebGL2
            #[cfg(target_family = "wasm")]
            present_mode: PresentMode::Fifo,
            #[cfg(not(target_family = "wasm"))]
            present_mode: PresentMode::AutoVsync,
            // WASM: use windowed mode and target canvas element
            #[cfg(target_family = "wasm")]
            mode: WindowMode::Windowed,
            #[cfg(target_family = "wasm")]
            canvas: Some("#bevy".to_string()),
            #[cfg(target_family = "wasm")]
            fit_canvas_to_parent: true,
            #[cfg(not(target_family = "wasm"))]
            mode: WindowMode::Windowed,
            ..default()
          }),
          ..default()
        })
        // Disable 3D PBR plugin - removes SSAO, atmosphere, environment map warnings on WebGL2
        .disable::<bevy::pbr::PbrPlugin>(),
    )
    .add_plugins(GamePlugins);

  app.run();
}
