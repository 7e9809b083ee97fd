//! `/` opens and closes the console; Escape only closes it.

use bevy::ecs::message::MessageWriter;
use bevy::input::ButtonState;
use bevy::input::keyboard::{Key, KeyboardInput};
use bevy::prelude::*;
use bevy_console::ConsoleOpen;
use bevy_egui::{EguiContexts, egui};

/// bevy_console only toggles on its own key list, which is empty here, so a
/// synthetic F12 press is sent instead.
fn synthetic_toggle() -> KeyboardInput {
  KeyboardInput {
    key_code: KeyCode::F12,
    logical_key: Key::F12,
    state: ButtonState::Pressed,
    text: None,
    repeat: false,
    window: Entity::PLACEHOLDER,
  }
}

pub fn handle_console_toggle(
  keys: Res<ButtonInput<KeyCode>>,
  console_open: Res<ConsoleOpen>,
  mut contexts: EguiContexts,
  mut keyboard_events: MessageWriter<KeyboardInput>,
) {
  let close_with_escape = keys.just_pressed(KeyCode::Escape) && console_open.open;
  let slash = keys.just_pressed(KeyCode::Slash);
  if !close_with_escape && !slash {
    return;
  }

  // Keep the key out of the console input line
  if console_open.open {
    let key = if close_with_escape {
      egui::Key::Escape
    } else {
      egui::Key::Slash
    };
    if let Ok(ctx) = contexts.ctx_mut() {
      ctx.input_mut(|i| {
        i.consume_key(egui::Modifiers::NONE, key);
      });
    }
  }

  keyboard_events.write(synthetic_toggle());
}
