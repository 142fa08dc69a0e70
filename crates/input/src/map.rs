//! Key bindings from terminal events to player controls.

use crate::types::Control;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Every binding, in help order. Letters are listed lower-case and match in
/// either case, so Caps Lock or Shift do not get in the way.
pub const BINDINGS: &[(KeyCode, Control)] = &[
    (KeyCode::Up, Control::Forward),
    (KeyCode::Char('w'), Control::Forward),
    (KeyCode::Down, Control::Backward),
    (KeyCode::Char('s'), Control::Backward),
    (KeyCode::Left, Control::TurnLeft),
    (KeyCode::Char('a'), Control::TurnLeft),
    (KeyCode::Right, Control::TurnRight),
    (KeyCode::Char('d'), Control::TurnRight),
    (KeyCode::Char('q'), Control::StrafeLeft),
    (KeyCode::Char('e'), Control::StrafeRight),
    (KeyCode::Char(' '), Control::Jump),
    (KeyCode::Char('t'), Control::ToggleTextures),
    (KeyCode::Esc, Control::Quit),
];

/// Map a key to the control it drives.
pub fn control_for_key(code: KeyCode) -> Option<Control> {
    let code = match code {
        KeyCode::Char(c) => KeyCode::Char(c.to_ascii_lowercase()),
        other => other,
    };
    BINDINGS
        .iter()
        .find(|(key, _)| *key == code)
        .map(|&(_, control)| control)
}

/// Map a full key event, honouring `Ctrl+C` as quit.
pub fn handle_key_event(key: KeyEvent) -> Option<Control> {
    if should_quit(key) {
        return Some(Control::Quit);
    }
    control_for_key(key.code)
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    key.code == KeyCode::Esc
        || (matches!(key.code, KeyCode::Char('c') | KeyCode::Char('C'))
            && key.modifiers.contains(KeyModifiers::CONTROL))
}

/// Controls section for `--help`, one line per control.
pub fn bindings_help() -> String {
    let mut help = String::from("Controls:\n");
    for control in Control::ALL {
        let mut keys: Vec<String> = BINDINGS
            .iter()
            .filter(|(_, c)| *c == control)
            .map(|&(key, _)| key_label(key))
            .collect();
        if control == Control::Quit {
            keys.push("Ctrl+C".to_string());
        }
        help.push_str(&format!("  {:<16}{}\n", control.as_str(), keys.join(", ")));
    }
    help
}

fn key_label(code: KeyCode) -> String {
    match code {
        KeyCode::Char(' ') => "Space".to_string(),
        KeyCode::Char(c) => c.to_ascii_uppercase().to_string(),
        other => format!("{other:?}"),
    }
}
