//! Caps word.
//!
//! Typing an all-caps identifier by holding shift across it is exactly the
//! kind of sustained chording the home-row mods make annoying.  Caps word is
//! the escape hatch: toggle it, type the word, and the first key that isn't
//! part of a word (or five seconds of silence) turns it back off.

use enumset::EnumSet;
use usbd_human_interface_device::page::Keyboard;

use crate::config::{Setting, CAPS_WORD_IDLE_TIMEOUT};
use crate::Mods;

pub struct CapsWord {
    active: bool,
    idle: u16,
    settings: EnumSet<Setting>,
}

impl CapsWord {
    pub fn new(settings: EnumSet<Setting>) -> Self {
        CapsWord {
            active: false,
            idle: 0,
            settings,
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Toggle, returning the new state.
    pub fn toggle(&mut self) -> bool {
        self.active = !self.active;
        self.idle = 0;
        self.active
    }

    pub fn deactivate(&mut self) {
        self.active = false;
    }

    /// Advance one millisecond.  Returns true if idle time just shut the
    /// feature off.
    pub fn tick(&mut self) -> bool {
        if !self.active {
            return false;
        }
        self.idle = self.idle.saturating_add(1);
        if self.idle >= CAPS_WORD_IDLE_TIMEOUT {
            self.active = false;
            true
        } else {
            false
        }
    }

    /// Adjust the modifiers for a keypress.  Letters gain shift (unless a
    /// held shift inverts that back off); word-continuing keys pass through;
    /// anything else ends the word and goes out untouched.
    pub fn apply(&mut self, key: Keyboard, mods: Mods) -> Mods {
        if !self.active {
            return mods;
        }
        self.idle = 0;
        if is_letter(key) {
            if mods.contains(Mods::SHIFT)
                && self.settings.contains(Setting::CapsWordInvertOnShift)
            {
                return mods - Mods::SHIFT;
            }
            return mods | Mods::SHIFT;
        }
        if !continues_word(key) {
            self.active = false;
        }
        mods
    }
}

fn is_letter(key: Keyboard) -> bool {
    let code = key as u8;
    (Keyboard::A as u8..=Keyboard::Z as u8).contains(&code)
}

/// Keys that can appear mid-identifier without ending the word.
fn continues_word(key: Keyboard) -> bool {
    let code = key as u8;
    (Keyboard::Keyboard1 as u8..=Keyboard::Keyboard0 as u8).contains(&code)
        || matches!(
            key,
            Keyboard::DeleteBackspace | Keyboard::DeleteForward | Keyboard::Minus
        )
}
