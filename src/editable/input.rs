//! Per-tick input snapshot consumed by the edit engine.
//!
//! The engine never sees device events. The runtime folds whatever happened
//! since the previous tick into one [`InputSnapshot`].

use bitflags::bitflags;

/// Keys that drive structural edits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EditKey {
    Up,
    Down,
    Left,
    Right,
    Backspace,
    Enter,
}

impl EditKey {
    pub const fn flag(self) -> HeldKeys {
        match self {
            EditKey::Up => HeldKeys::UP,
            EditKey::Down => HeldKeys::DOWN,
            EditKey::Left => HeldKeys::LEFT,
            EditKey::Right => HeldKeys::RIGHT,
            EditKey::Backspace => HeldKeys::BACKSPACE,
            EditKey::Enter => HeldKeys::ENTER,
        }
    }
}

bitflags! {
    /// Set of structural keys currently held down
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
    pub struct HeldKeys: u8 {
        const UP = 1 << 0;
        const DOWN = 1 << 1;
        const LEFT = 1 << 2;
        const RIGHT = 1 << 3;
        const BACKSPACE = 1 << 4;
        const ENTER = 1 << 5;
    }
}

impl HeldKeys {
    pub fn is_held(&self, key: EditKey) -> bool {
        self.contains(key.flag())
    }

    pub fn press(&mut self, key: EditKey) {
        self.insert(key.flag());
    }

    pub fn release(&mut self, key: EditKey) {
        self.remove(key.flag());
    }
}

/// Everything the engine reads in one tick
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InputSnapshot {
    /// Structural keys held at sampling time
    pub held: HeldKeys,
    /// Vertical wheel movement since the last tick
    pub scroll_delta: f32,
    /// Characters typed since the last tick, in order (may be empty)
    pub typed: String,
}

impl InputSnapshot {
    /// A snapshot with nothing pressed or typed
    pub fn idle() -> Self {
        Self::default()
    }

    /// A snapshot holding the given keys
    pub fn holding(keys: &[EditKey]) -> Self {
        let mut held = HeldKeys::empty();
        for key in keys {
            held.press(*key);
        }
        Self {
            held,
            ..Self::default()
        }
    }

    /// A snapshot that only types `text`
    pub fn typing(text: &str) -> Self {
        Self {
            typed: text.to_string(),
            ..Self::default()
        }
    }

    pub fn with_scroll(mut self, delta: f32) -> Self {
        self.scroll_delta = delta;
        self
    }
}
