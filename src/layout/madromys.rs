//! The trackball.
//!
//! Six buttons, mostly used in a browser: alt-tab on the far top-left,
//! back/forward on a double-tap key, and the top-right button pulling double
//! duty as right-click (tap) and drag-scroll (hold).  Holding it also exposes
//! an overlay layer where the bottom-left button locks drag-scroll on, for
//! long reading sessions where holding a button down gets old.
//!
//! All three special buttons are tap dances; the [`crate::scroll`] state
//! machine keeps the momentary and locked scroll modes straight.

use arrayvec::ArrayVec;
use usb_device::prelude::UsbDeviceState;
use usbd_human_interface_device::page::Keyboard;

use crate::keys::madromys::*;
use crate::layout::{m, td, Action, LayerState, TR};
use crate::log::warn;
use crate::scroll::{DragScroll, TapEffect};
use crate::tapdance::{DanceOutcome, Gesture, TapDance};
use crate::{KeyAction, KeyEvent, LayoutActions, Mods, MouseButton};

/// The overlay layer reachable while the scroll button is held.
pub const OVERLAY: u8 = 1;

// Tap dance ids.
pub const DANCE_SCROLL: u8 = 0;
pub const DANCE_LOCK: u8 = 1;
pub const DANCE_BACK_FWD: u8 = 2;
const NDANCES: usize = 3;

#[rustfmt::skip]
static BASE_GRID: [Action; NKEYS] = [
    m(Mods::GUI.union(Mods::ALT), Keyboard::Tab), td(DANCE_BACK_FWD), Action::Mouse(MouseButton::Middle), td(DANCE_SCROLL),
    Action::Mouse(MouseButton::Left), Action::Mouse(MouseButton::Middle), Action::None, Action::None,
];

#[rustfmt::skip]
static OVERLAY_GRID: [Action; NKEYS] = [
    TR, TR, TR, TR,
    td(DANCE_LOCK), TR, Action::None, Action::None,
];

pub static LAYERS: [&[Action; NKEYS]; 2] = [&BASE_GRID, &OVERLAY_GRID];

/// What a pressed button turned into, so its release undoes the right thing.
#[derive(Clone, Copy, Debug)]
enum Down {
    Mouse(MouseButton),
    Key(Keyboard),
    Dance(u8),
    Noop,
}

pub struct MadromysManager {
    layers: LayerState,
    dances: [TapDance; NDANCES],
    scroll: DragScroll,
    down: ArrayVec<(u8, Down), 8>,
}

impl Default for MadromysManager {
    fn default() -> Self {
        MadromysManager {
            layers: LayerState::default(),
            dances: Default::default(),
            scroll: DragScroll::default(),
            down: ArrayVec::new(),
        }
    }
}

impl MadromysManager {
    pub fn layer_mask(&self) -> u8 {
        self.layers.mask()
    }

    pub fn scroll_active(&self) -> bool {
        self.scroll.is_active()
    }

    /// Handle a single button event from the scan loop.
    pub fn handle_event(&mut self, event: KeyEvent, actions: &mut dyn LayoutActions) {
        match event {
            KeyEvent::Press(code) => {
                let action = self.layers.resolve(&LAYERS, code);
                self.interrupt_dances(&action, actions);
                match action {
                    Action::TapDance(id) => {
                        let outcomes = self.dances[id as usize].press();
                        self.track(code, Down::Dance(id));
                        self.apply_outcomes(id, outcomes, actions);
                    }
                    Action::Mouse(button) => {
                        actions.send_key(KeyAction::MousePress(button));
                        self.track(code, Down::Mouse(button));
                    }
                    Action::Mod(mods, key) => {
                        actions.send_key(KeyAction::KeyPress(key, mods));
                        self.track(code, Down::Key(key));
                    }
                    Action::Key(key) => {
                        actions.send_key(KeyAction::KeyPress(key, Mods::empty()));
                        self.track(code, Down::Key(key));
                    }
                    _ => self.track(code, Down::Noop),
                }
            }
            KeyEvent::Release(code) => {
                let Some(index) = self.down.iter().position(|(c, _)| *c == code) else {
                    return;
                };
                let (_, down) = self.down.remove(index);
                match down {
                    Down::Mouse(button) => actions.send_key(KeyAction::MouseRelease(button)),
                    Down::Key(_) => actions.send_key(KeyAction::KeyRelease),
                    Down::Dance(id) => {
                        let outcomes = self.dances[id as usize].release();
                        self.apply_outcomes(id, outcomes, actions);
                    }
                    Down::Noop => (),
                }
            }
        }
    }

    /// Advance one millisecond.
    pub fn tick(&mut self, actions: &mut dyn LayoutActions) {
        for id in 0..NDANCES {
            let outcomes = self.dances[id].tick();
            self.apply_outcomes(id as u8, outcomes, actions);
        }
    }

    /// Bus state changes.  Suspend drops everything, including a scroll
    /// lock; waking up into silently-hijacked ball motion is confusing.
    pub fn usb_state(&mut self, state: UsbDeviceState, actions: &mut dyn LayoutActions) {
        if !crate::is_suspend(state) {
            return;
        }
        self.layers.reset();
        self.dances = Default::default();
        self.scroll = DragScroll::default();
        self.down.clear();
        actions.set_drag_scroll(false);
        actions.active_layers(self.layers.mask());
    }

    /// Any press that isn't the dance's own key settles in-flight dances.
    fn interrupt_dances(&mut self, action: &Action, actions: &mut dyn LayoutActions) {
        for id in 0..NDANCES {
            if matches!(action, Action::TapDance(d) if *d as usize == id) {
                continue;
            }
            let outcomes = self.dances[id].interrupt();
            self.apply_outcomes(id as u8, outcomes, actions);
        }
    }

    fn apply_outcomes(
        &mut self,
        id: u8,
        outcomes: ArrayVec<DanceOutcome, 2>,
        actions: &mut dyn LayoutActions,
    ) {
        for outcome in outcomes {
            self.apply_outcome(id, outcome, actions);
        }
    }

    fn apply_outcome(&mut self, id: u8, outcome: DanceOutcome, actions: &mut dyn LayoutActions) {
        match id {
            DANCE_SCROLL => self.scroll_outcome(outcome, actions),
            DANCE_LOCK => self.lock_outcome(outcome, actions),
            DANCE_BACK_FWD => self.back_fwd_outcome(outcome, actions),
            _ => warn!("outcome for unknown dance {}", id),
        }
    }

    /// The right button: tap clicks, hold drag-scrolls (with the overlay
    /// layer), and a tap while locked unlocks.
    fn scroll_outcome(&mut self, outcome: DanceOutcome, actions: &mut dyn LayoutActions) {
        match outcome {
            DanceOutcome::Finished(Gesture::SingleHold) => {
                self.scroll.hold_engaged();
                self.layers.on(OVERLAY);
                actions.set_drag_scroll(true);
                actions.active_layers(self.layers.mask());
            }
            DanceOutcome::Finished(_) => (),
            DanceOutcome::Reset(Gesture::SingleTap) => match self.scroll.tap() {
                TapEffect::Click => {
                    actions.send_key(KeyAction::MousePress(MouseButton::Right));
                    actions.send_key(KeyAction::MouseRelease(MouseButton::Right));
                }
                TapEffect::Unlocked => actions.set_drag_scroll(false),
            },
            DanceOutcome::Reset(Gesture::SingleHold) => {
                self.scroll.hold_released();
                if !self.scroll.is_active() {
                    actions.set_drag_scroll(false);
                }
                self.layers.off(OVERLAY);
                actions.active_layers(self.layers.mask());
            }
            DanceOutcome::Reset(_) => (),
        }
    }

    /// The overlay's lock button: a tap locks drag-scroll on.
    fn lock_outcome(&mut self, outcome: DanceOutcome, actions: &mut dyn LayoutActions) {
        if let DanceOutcome::Reset(Gesture::SingleTap) = outcome {
            self.scroll.lock();
            actions.set_drag_scroll(true);
        }
    }

    /// Browser history: one tap back, two taps forward.
    fn back_fwd_outcome(&mut self, outcome: DanceOutcome, actions: &mut dyn LayoutActions) {
        match outcome {
            DanceOutcome::Finished(Gesture::SingleTap | Gesture::SingleHold) => {
                actions.send_key(KeyAction::KeyPress(Keyboard::LeftBrace, Mods::GUI));
            }
            DanceOutcome::Finished(
                Gesture::DoubleTap | Gesture::DoubleHold | Gesture::DoubleSingleTap,
            ) => {
                actions.send_key(KeyAction::KeyPress(Keyboard::RightBrace, Mods::GUI));
            }
            DanceOutcome::Finished(_) => (),
            DanceOutcome::Reset(
                Gesture::SingleTap
                | Gesture::SingleHold
                | Gesture::DoubleTap
                | Gesture::DoubleHold
                | Gesture::DoubleSingleTap,
            ) => {
                actions.send_key(KeyAction::KeyRelease);
            }
            DanceOutcome::Reset(_) => (),
        }
    }

    fn track(&mut self, code: u8, down: Down) {
        if self.down.try_push((code, down)).is_err() {
            warn!("too many buttons down, dropping tracking for {}", code);
        }
    }
}
