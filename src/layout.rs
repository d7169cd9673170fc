//! Keymaps and their dispatch.
//!
//! Each board gets a submodule holding its layer grids and a manager that
//! turns raw [`KeyEvent`]s into [`crate::KeyAction`]s.  The two boards are
//! different devices running different firmware images, so there is no
//! top-level mode switch here the way a single keyboard would have; the
//! firmware for a board instantiates that board's manager and nothing else.
//!
//! What the boards share is the vocabulary: the [`Action`] a grid cell can
//! hold, and the [`LayerState`] mask that decides which grid is consulted.

use usbd_human_interface_device::page::{Consumer, Keyboard};

use crate::macros::MacroId;
use crate::{Mods, MouseButton};

#[cfg(feature = "madromys")]
pub mod madromys;
#[cfg(feature = "voyager")]
pub mod voyager;

/// One cell of a layer grid.
#[derive(Clone, Copy, Eq, PartialEq, Debug)]
pub enum Action {
    /// Nothing, not even fall-through.
    None,
    /// Transparent: defer to the next active layer below.
    Trans,
    /// A plain keycode.
    Key(Keyboard),
    /// A keycode sent with modifiers held around it.
    Mod(Mods, Keyboard),
    /// A pure modifier chord with no keycode, held while pressed.
    Mods(Mods),
    /// Modifier when held, keycode when tapped.
    ModTap(Mods, Keyboard),
    /// Layer shift when held, keycode when tapped.
    LayerTap(u8, Keyboard),
    /// Layer shift while held.
    Momentary(u8),
    /// Layer toggled on or off by each tap.
    Toggle(u8),
    /// A tap dance key; the id indexes the board's dance table.
    TapDance(u8),
    /// A consumer-page usage (media keys, the terminal lock).
    Consumer(Consumer),
    /// A pointer button.
    Mouse(MouseButton),
    /// Toggle the caps-word feature.
    CapsWord,
    /// Play one of the macro programs.
    Macro(MacroId),
    /// Drop the RGB matrix into the solid-color effect.
    RgbSolid,
}

// Grid constructors, kept short so the layer tables stay readable.

pub const fn k(key: Keyboard) -> Action {
    Action::Key(key)
}

pub const fn m(mods: Mods, key: Keyboard) -> Action {
    Action::Mod(mods, key)
}

pub const fn mt(mods: Mods, tap: Keyboard) -> Action {
    Action::ModTap(mods, tap)
}

pub const fn lt(layer: u8, tap: Keyboard) -> Action {
    Action::LayerTap(layer, tap)
}

pub const fn td(id: u8) -> Action {
    Action::TapDance(id)
}

pub const fn cons(usage: Consumer) -> Action {
    Action::Consumer(usage)
}

pub const NO: Action = Action::None;
pub const TR: Action = Action::Trans;

/// Which layers are active, as a bit mask.  Eight layers is plenty for these
/// maps, and a `u8` keeps the state trivially copyable into the indicator
/// callback.
///
/// Layer 0 is the base and is always active.
#[derive(Clone, Copy, Eq, PartialEq, Debug)]
pub struct LayerState(u8);

impl Default for LayerState {
    fn default() -> Self {
        LayerState(1)
    }
}

impl LayerState {
    pub fn mask(&self) -> u8 {
        self.0
    }

    pub fn is_on(&self, layer: u8) -> bool {
        self.0 & (1 << layer) != 0
    }

    pub fn on(&mut self, layer: u8) {
        self.0 |= 1 << layer;
    }

    pub fn off(&mut self, layer: u8) {
        self.0 &= !(1 << layer);
        // The base layer does not come off.
        self.0 |= 1;
    }

    pub fn toggle(&mut self, layer: u8) {
        if layer != 0 {
            self.0 ^= 1 << layer;
        }
    }

    /// Drop everything but the base layer.
    pub fn reset(&mut self) {
        self.0 = 1;
    }

    /// Look up the action for a scan code: the highest active layer wins,
    /// with `Trans` falling through to the next one down.
    pub fn resolve<const N: usize>(&self, layers: &[&[Action; N]], code: u8) -> Action {
        let code = code as usize;
        if code >= N {
            return Action::None;
        }
        for layer in (0..layers.len()).rev() {
            if !self.is_on(layer as u8) {
                continue;
            }
            match layers[layer][code] {
                Action::Trans => continue,
                action => return action,
            }
        }
        Action::None
    }
}

#[cfg(test)]
mod test {
    use super::{Action, LayerState};
    use usbd_human_interface_device::page::Keyboard;

    #[test]
    fn transparent_falls_through() {
        static BASE: [Action; 2] = [Action::Key(Keyboard::A), Action::Key(Keyboard::B)];
        static UPPER: [Action; 2] = [Action::Trans, Action::Key(Keyboard::X)];
        let layers: [&[Action; 2]; 2] = [&BASE, &UPPER];

        let mut state = LayerState::default();
        assert_eq!(state.resolve(&layers, 0), Action::Key(Keyboard::A));
        state.on(1);
        assert_eq!(state.resolve(&layers, 0), Action::Key(Keyboard::A));
        assert_eq!(state.resolve(&layers, 1), Action::Key(Keyboard::X));
        state.off(1);
        assert_eq!(state.resolve(&layers, 1), Action::Key(Keyboard::B));

        state.toggle(1);
        assert!(state.is_on(1));
        state.toggle(1);
        assert!(!state.is_on(1));
        // The base layer cannot be toggled away.
        state.toggle(0);
        assert!(state.is_on(0));
    }
}
