//! Keyboard and wheel event collection
//!
//! Winit delivers events as they happen; the edit engine wants one snapshot
//! per tick. Held keys persist across ticks until released, while typed text
//! and wheel movement are drained each tick.

use winit::event::{ElementState, KeyEvent, MouseScrollDelta};
use winit::keyboard::{KeyCode, PhysicalKey};

use kager::editable::{EditKey, HeldKeys, InputSnapshot};

/// The edit key a physical key drives, if any
pub fn edit_key_for(code: KeyCode) -> Option<EditKey> {
    match code {
        KeyCode::ArrowUp => Some(EditKey::Up),
        KeyCode::ArrowDown => Some(EditKey::Down),
        KeyCode::ArrowLeft => Some(EditKey::Left),
        KeyCode::ArrowRight => Some(EditKey::Right),
        KeyCode::Backspace => Some(EditKey::Backspace),
        KeyCode::Enter | KeyCode::NumpadEnter => Some(EditKey::Enter),
        _ => None,
    }
}

/// Accumulates input between ticks
#[derive(Debug, Default)]
pub struct InputCollector {
    held: HeldKeys,
    typed: String,
    scroll_lines: f32,
}

impl InputCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn handle_key_event(&mut self, event: &KeyEvent) {
        let key = match event.physical_key {
            PhysicalKey::Code(code) => edit_key_for(code),
            PhysicalKey::Unidentified(_) => None,
        };
        let pressed = event.state == ElementState::Pressed;
        self.record_key(key, pressed, event.text.as_deref());
    }

    /// Track `key` as held or released; keep printable text from presses
    fn record_key(&mut self, key: Option<EditKey>, pressed: bool, text: Option<&str>) {
        if let Some(key) = key {
            if pressed {
                self.held.press(key);
            } else {
                self.held.release(key);
            }
        }

        if pressed {
            if let Some(text) = text {
                self.typed.extend(text.chars().filter(|ch| !ch.is_control()));
            }
        }
    }

    /// Accumulate wheel movement as a line count; positive scrolls toward the top
    pub fn handle_wheel(&mut self, delta: MouseScrollDelta, line_height: f32) {
        let lines = match delta {
            MouseScrollDelta::LineDelta(_, y) => y,
            MouseScrollDelta::PixelDelta(pos) if line_height > 0.0 => pos.y as f32 / line_height,
            MouseScrollDelta::PixelDelta(_) => 0.0,
        };
        self.scroll_lines += lines;
    }

    /// Forget held keys, e.g. when the window loses focus and releases go elsewhere
    pub fn release_all(&mut self) {
        if !self.held.is_empty() {
            tracing::debug!("Releasing held keys {:?}", self.held);
        }
        self.held = HeldKeys::empty();
    }

    /// Snapshot for this tick; drains typed text and wheel movement
    pub fn take_snapshot(&mut self) -> InputSnapshot {
        InputSnapshot {
            held: self.held,
            scroll_delta: std::mem::take(&mut self.scroll_lines),
            typed: std::mem::take(&mut self.typed),
        }
    }
}
