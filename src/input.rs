//! Keyboard state
//!
//! The window layer reports presses and releases; the game reads held keys
//! for movement and consumes discrete presses through [`Keys::take_press`] so
//! holding a key only fires its action once.

/// Keys the game reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// Enter
    Confirm,
    /// W
    LevelUp,
    /// S
    LevelDown,
    /// A
    Left,
    /// D
    Right,
    /// Space
    Release,
}

impl Key {
    pub const ALL: [Key; 6] = [
        Key::Confirm,
        Key::LevelUp,
        Key::LevelDown,
        Key::Left,
        Key::Right,
        Key::Release,
    ];

    fn index(self) -> usize {
        self as usize
    }
}

/// Current key state plus per-key "already handled" flags
#[derive(Debug, Clone, Default)]
pub struct Keys {
    held: [bool; Key::ALL.len()],
    processed: [bool; Key::ALL.len()],
}

impl Keys {
    pub fn press(&mut self, key: Key) {
        self.held[key.index()] = true;
    }

    /// Releasing re-arms the key's discrete action
    pub fn release(&mut self, key: Key) {
        self.held[key.index()] = false;
        self.processed[key.index()] = false;
    }

    pub fn is_held(&self, key: Key) -> bool {
        self.held[key.index()]
    }

    /// True once per press
    pub fn take_press(&mut self, key: Key) -> bool {
        let i = key.index();
        if self.held[i] && !self.processed[i] {
            self.processed[i] = true;
            true
        } else {
            false
        }
    }

    pub fn release_all(&mut self) {
        for key in Key::ALL {
            self.release(key);
        }
    }
}
