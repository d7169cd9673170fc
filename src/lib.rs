//! Keymap engine for my two keyboards.
//!
//! This crate holds the keymaps, custom key behaviors, and the small pieces of
//! state those behaviors need, for two boards: a column-staggered split with
//! home-row modifiers (the "voyager" feature), and a six-button trackball
//! whose right button doubles as a drag-scroll control (the "madromys"
//! feature).
//!
//! The crate deliberately does not scan matrices, debounce, or build HID
//! reports.  The host firmware does all of that, and feeds us key up/down
//! events plus a millisecond tick.  Everything we decide comes back out
//! through the [`LayoutActions`] trait.

#![cfg_attr(not(any(feature = "std", test)), no_std)]

#[cfg(not(any(feature = "std", test)))]
extern crate core as std;

extern crate alloc;

use bitflags::bitflags;
use usb_device::prelude::UsbDeviceState;
use usbd_human_interface_device::page::{Consumer, Keyboard};

pub mod achordion;
pub mod boardinfo;
pub mod capsword;
pub mod combo;
pub mod config;
pub mod keys;
pub mod layout;
pub mod leds;
pub mod macros;
pub mod scroll;
pub mod tapdance;
pub mod typer;

pub use keys::Side;
pub use layout::Action;

cfg_if::cfg_if! {
    if #[cfg(feature = "defmt")] {
        mod log {
            pub use defmt::{info, warn};
        }
    } else if #[cfg(feature = "log")] {
        mod log {
            pub use ::log::{info, warn};
        }
    } else {
        mod log {
            macro_rules! nolog {
                ($($arg:tt)*) => {{
                    let _ = format_args!($($arg)*);
                }};
            }
            pub(crate) use nolog as info;
            pub(crate) use nolog as warn;
        }
    }
}

/// Key events indicate keys going up or down.  The `u8` is the scan code, an
/// index into the board's matrix, row major.
#[derive(Clone, Copy, Eq, PartialEq, Debug)]
pub enum KeyEvent {
    Press(u8),
    Release(u8),
}

#[cfg(feature = "defmt")]
impl defmt::Format for KeyEvent {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            KeyEvent::Press(k) => defmt::write!(fmt, "KeyEvent::Press({})", k),
            KeyEvent::Release(k) => defmt::write!(fmt, "KeyEvent::Release({})", k),
        }
    }
}

impl KeyEvent {
    pub fn key(&self) -> u8 {
        match self {
            KeyEvent::Press(k) => *k,
            KeyEvent::Release(k) => *k,
        }
    }

    pub fn is_press(&self) -> bool {
        match self {
            KeyEvent::Press(_) => true,
            KeyEvent::Release(_) => false,
        }
    }

    pub fn is_release(&self) -> bool {
        !self.is_press()
    }
}

bitflags! {
    /// A modifier map.  This indicates what modifiers should be held down when
    /// this keypress is sent.
    #[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug)]
    pub struct Mods: u8 {
        const SHIFT = 0b0000_0001;
        const CONTROL = 0b0000_0010;
        const ALT = 0b0000_0100;
        const GUI = 0b0000_1000;

        /// All four modifiers at once, for keys nothing else binds.
        const HYPER = Self::SHIFT.bits()
            | Self::CONTROL.bits()
            | Self::ALT.bits()
            | Self::GUI.bits();
        /// Everything but GUI.
        const MEH = Self::SHIFT.bits() | Self::CONTROL.bits() | Self::ALT.bits();
    }
}

/// The mouse buttons the trackball reports.
#[derive(Clone, Copy, Eq, PartialEq, Debug)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

/// Indicates a keypress that should be sent to the host.
#[derive(Clone, Eq, PartialEq, Debug)]
pub enum KeyAction {
    KeyPress(Keyboard, Mods),
    ModOnly(Mods),
    KeyRelease,
    MousePress(MouseButton),
    MouseRelease(MouseButton),
    /// A consumer-page usage, sent as a one-shot press and release.
    ConsumerTap(Consumer),
}

/// What the keymap asks of the surrounding firmware.
///
/// The managers in [`layout`] are handed a `&mut dyn LayoutActions` with every
/// event and tick, and this is the only way decisions leave the crate.
pub trait LayoutActions {
    /// Send a key action to the HID layer.
    fn send_key(&mut self, key: KeyAction);

    /// Turn pointer drag-scroll on or off.
    fn set_drag_scroll(&mut self, active: bool);

    /// Switch the RGB lighting to the given effect.
    fn set_rgb(&mut self, effect: leds::RgbEffect);

    /// The set of active layers changed.  Mostly of interest for per-layer
    /// indicator lighting; the mask is the same one [`layout::LayerState`]
    /// holds.
    fn active_layers(&mut self, mask: u8) {
        let _ = mask;
    }
}

/// Transient keymap state is dropped when the bus suspends.  Helper for the
/// managers, which each decide what "transient" means for them.
pub(crate) fn is_suspend(state: UsbDeviceState) -> bool {
    matches!(state, UsbDeviceState::Suspend)
}
