//! The split board.
//!
//! Six layers over a 10x6 matrix (left rows first, thumb row last in each
//! half).  The base layer is Colemak-DH with the usual home-row modifier
//! arrangement - ctrl/alt/gui/shift out from the pinky, mirrored on both
//! hands - plus layer-taps on the thumbs and the Z and H keys.  The rest of
//! the layers are reached only through those holds.
//!
//! All the interesting behavior is in the dual-role resolution: the board
//! wires the [`crate::achordion`] resolver with per-key tapping terms,
//! typing-streak windows, the eager modifier set, and the thumbs-or-both-
//! hands chord rule.

use arraydeque::ArrayDeque;
use arrayvec::ArrayVec;
use usb_device::prelude::UsbDeviceState;
use usbd_human_interface_device::page::{Consumer, Keyboard};

use crate::achordion::{HoldKind, HoldTap, Predicates, Resolution, Settled};
use crate::capsword::CapsWord;
use crate::combo::{ComboEntry, ComboSignal, Combos};
use crate::config::{
    DEFAULT_SETTINGS, STREAK_ALT, STREAK_DEFAULT, STREAK_SHIFT, TAPPING_TERM, TAPPING_TERM_FAST,
};
use crate::keys::voyager::*;
use crate::keys::Geometry;
use crate::layout::{cons, k, lt, m, mt, Action, LayerState, NO, TR};
use crate::leds::RgbEffect;
use crate::log::warn;
use crate::macros::{MacroId, MacroPlayer};
use crate::{KeyAction, KeyEvent, LayoutActions, Mods};

// Layer numbers, also the indices into LAYERS.
pub const BASE: u8 = 0;
pub const NUM: u8 = 1;
pub const SYM: u8 = 2;
pub const NAV: u8 = 3;
pub const MEDIA: u8 = 4;
pub const VIM: u8 = 5;

const HYPER: Mods = Mods::HYPER;
const MEH: Mods = Mods::MEH;
const SHIFT: Mods = Mods::SHIFT;
const CTRL: Mods = Mods::CONTROL;
const ALT: Mods = Mods::ALT;
const GUI: Mods = Mods::GUI;

const LOCK_SCREEN: Action = cons(Consumer::ALTerminalLockScreensaver);

#[rustfmt::skip]
static BASE_GRID: [Action; NKEYS] = [
    // Left half.
    LOCK_SCREEN,         m(HYPER, Keyboard::Keyboard1), m(HYPER, Keyboard::Keyboard2), m(HYPER, Keyboard::Keyboard3), m(HYPER, Keyboard::Keyboard4), m(HYPER, Keyboard::Keyboard5),
    k(Keyboard::Tab),    k(Keyboard::Q),                k(Keyboard::W),                k(Keyboard::F),                k(Keyboard::P),                k(Keyboard::B),
    mt(HYPER, Keyboard::Escape), mt(CTRL, Keyboard::A), mt(ALT, Keyboard::R),          mt(GUI, Keyboard::S),          mt(SHIFT, Keyboard::T),        k(Keyboard::G),
    mt(MEH, Keyboard::Grave),    lt(VIM, Keyboard::Z),  k(Keyboard::X),                k(Keyboard::C),                k(Keyboard::D),                k(Keyboard::V),
    lt(NAV, Keyboard::Space),    lt(MEDIA, Keyboard::Minus), NO,                       NO,                            NO,                            NO,
    // Right half.
    m(HYPER, Keyboard::Keyboard6), m(HYPER, Keyboard::Keyboard7), m(HYPER, Keyboard::Keyboard8), m(HYPER, Keyboard::Keyboard9), m(HYPER, Keyboard::Keyboard0), TR,
    k(Keyboard::J),      k(Keyboard::L),                k(Keyboard::U),                k(Keyboard::Y),                k(Keyboard::Semicolon),        k(Keyboard::Backslash),
    k(Keyboard::M),      mt(SHIFT, Keyboard::N),        mt(GUI, Keyboard::E),          mt(ALT, Keyboard::I),          mt(CTRL, Keyboard::O),         mt(HYPER, Keyboard::Apostrophe),
    k(Keyboard::K),      lt(SYM, Keyboard::H),          k(Keyboard::Comma),            k(Keyboard::Dot),              k(Keyboard::ForwardSlash),     mt(MEH, Keyboard::Equal),
    k(Keyboard::DeleteBackspace), lt(NUM, Keyboard::ReturnEnter), NO,                  NO,                            NO,                            NO,
];

#[rustfmt::skip]
static NUM_GRID: [Action; NKEYS] = [
    TR,                  m(MEH, Keyboard::Keyboard1),   m(MEH, Keyboard::Keyboard2),   m(MEH, Keyboard::Keyboard3),   m(MEH, Keyboard::Keyboard4),   m(MEH, Keyboard::Keyboard5),
    k(Keyboard::UpArrow), k(Keyboard::LeftBrace),       k(Keyboard::Keyboard7),        k(Keyboard::Keyboard8),        k(Keyboard::Keyboard9),        k(Keyboard::RightBrace),
    m(SHIFT, Keyboard::G), k(Keyboard::Semicolon),      k(Keyboard::Keyboard4),        k(Keyboard::Keyboard5),        k(Keyboard::Keyboard6),        k(Keyboard::Equal),
    k(Keyboard::DownArrow), k(Keyboard::Grave),         k(Keyboard::Keyboard1),        k(Keyboard::Keyboard2),        k(Keyboard::Keyboard3),        k(Keyboard::Backslash),
    k(Keyboard::Keyboard0), TR,                         NO,                            NO,                            NO,                            NO,

    m(MEH, Keyboard::Keyboard6),   m(MEH, Keyboard::Keyboard7),   m(MEH, Keyboard::Keyboard8),   m(MEH, Keyboard::Keyboard9),   m(MEH, Keyboard::Keyboard0), TR,
    TR,                  TR,                            TR,                            TR,                            TR,                            TR,
    TR,                  k(Keyboard::RightShift),       k(Keyboard::RightGUI),         k(Keyboard::LeftAlt),          k(Keyboard::RightControl),     Action::Mods(HYPER),
    TR,                  TR,                            TR,                            TR,                            TR,                            Action::Mods(MEH),
    TR,                  TR,                            NO,                            NO,                            NO,                            NO,
];

#[rustfmt::skip]
static SYM_GRID: [Action; NKEYS] = [
    TR,                  TR,                            TR,                            TR,                            TR,                            TR,
    m(SHIFT, Keyboard::Comma), m(SHIFT, Keyboard::LeftBrace), m(SHIFT, Keyboard::Keyboard7), m(SHIFT, Keyboard::Keyboard8), m(SHIFT, Keyboard::Keyboard9), m(SHIFT, Keyboard::RightBrace),
    m(SHIFT, Keyboard::Dot), m(SHIFT, Keyboard::Semicolon), m(SHIFT, Keyboard::Keyboard4), m(SHIFT, Keyboard::Keyboard5), m(SHIFT, Keyboard::Keyboard6), m(SHIFT, Keyboard::Equal),
    m(SHIFT, Keyboard::Grave), k(Keyboard::Equal),      m(SHIFT, Keyboard::Keyboard1), m(SHIFT, Keyboard::Keyboard2), m(SHIFT, Keyboard::Keyboard3), m(SHIFT, Keyboard::Backslash),
    m(SHIFT, Keyboard::Keyboard0), TR,                  NO,                            NO,                            NO,                            NO,

    TR,                  TR,                            TR,                            TR,                            TR,                            TR,
    TR,                  TR,                            TR,                            TR,                            TR,                            TR,
    TR,                  k(Keyboard::RightShift),       k(Keyboard::RightGUI),         k(Keyboard::LeftAlt),          k(Keyboard::RightControl),     Action::Mods(HYPER),
    TR,                  TR,                            TR,                            TR,                            TR,                            Action::Mods(MEH),
    TR,                  TR,                            NO,                            NO,                            NO,                            NO,
];

#[rustfmt::skip]
static NAV_GRID: [Action; NKEYS] = [
    TR,                  m(MEH, Keyboard::Keyboard1),   m(MEH, Keyboard::Keyboard2),   m(MEH, Keyboard::Keyboard3),   m(MEH, Keyboard::Keyboard4),   m(MEH, Keyboard::Keyboard5),
    TR,                  TR,                            TR,                            TR,                            TR,                            TR,
    Action::Mods(HYPER), k(Keyboard::LeftControl),      k(Keyboard::LeftAlt),          k(Keyboard::LeftGUI),          k(Keyboard::LeftShift),        TR,
    Action::Mods(MEH),   TR,                            TR,                            TR,                            TR,                            TR,
    TR,                  TR,                            NO,                            NO,                            NO,                            NO,

    m(MEH, Keyboard::Keyboard6),   m(MEH, Keyboard::Keyboard7),   m(MEH, Keyboard::Keyboard8),   m(MEH, Keyboard::Keyboard9),   m(MEH, Keyboard::Keyboard0), TR,
    TR,                  m(HYPER, Keyboard::LeftArrow), m(Mods::CONTROL.union(Mods::SHIFT), Keyboard::Tab), m(CTRL, Keyboard::Tab), m(HYPER, Keyboard::RightArrow), TR,
    TR,                  k(Keyboard::LeftArrow),        k(Keyboard::DownArrow),        k(Keyboard::UpArrow),          k(Keyboard::RightArrow),       Action::CapsWord,
    TR,                  k(Keyboard::Home),             k(Keyboard::PageDown),         k(Keyboard::PageUp),           k(Keyboard::End),              TR,
    k(Keyboard::DeleteForward), m(SHIFT, Keyboard::Semicolon), NO,                     NO,                            NO,                            NO,
];

#[rustfmt::skip]
static MEDIA_GRID: [Action; NKEYS] = [
    TR,                  TR,                            TR,                            TR,                            TR,                            TR,
    TR,                  m(GUI, Keyboard::Q),           m(GUI, Keyboard::W),           TR,                            TR,                            TR,
    TR,                  m(GUI, Keyboard::A),           m(GUI, Keyboard::R),           m(GUI, Keyboard::S),           m(GUI, Keyboard::T),           Action::Macro(MacroId::CopyUrl),
    TR,                  m(GUI, Keyboard::Z),           m(GUI, Keyboard::X),           m(GUI, Keyboard::C),           m(GUI.union(CTRL).union(SHIFT), Keyboard::Keyboard4), m(GUI, Keyboard::V),
    TR,                  TR,                            NO,                            NO,                            NO,                            NO,

    TR,                  TR,                            TR,                            TR,                            TR,                            TR,
    TR,                  m(MEH, Keyboard::LeftArrow),   TR,                            TR,                            m(MEH, Keyboard::RightArrow),  TR,
    TR,                  cons(Consumer::ScanPreviousTrack), cons(Consumer::VolumeDecrement), cons(Consumer::VolumeIncrement), cons(Consumer::ScanNextTrack), TR,
    TR,                  TR,                            TR,                            TR,                            TR,                            Action::RgbSolid,
    cons(Consumer::Mute), cons(Consumer::PlayPause),    NO,                            NO,                            NO,                            NO,
];

#[rustfmt::skip]
static VIM_GRID: [Action; NKEYS] = [
    TR,                  TR,                            TR,                            TR,                            TR,                            TR,
    TR,                  TR,                            TR,                            TR,                            TR,                            TR,
    Action::Mods(HYPER), k(Keyboard::LeftControl),      k(Keyboard::LeftAlt),          k(Keyboard::LeftGUI),          k(Keyboard::LeftShift),        TR,
    Action::Mods(MEH),   TR,                            TR,                            TR,                            TR,                            TR,
    TR,                  TR,                            NO,                            NO,                            NO,                            NO,

    TR,                  TR,                            TR,                            TR,                            TR,                            TR,
    TR,                  TR,                            TR,                            TR,                            TR,                            TR,
    Action::Macro(MacroId::VimVsplit), m(CTRL, Keyboard::H), m(CTRL, Keyboard::J),     m(CTRL, Keyboard::K),          m(CTRL, Keyboard::L),          TR,
    Action::Macro(MacroId::VimSplit),  m(ALT, Keyboard::H),  m(ALT, Keyboard::J),      m(ALT, Keyboard::K),           m(ALT, Keyboard::L),           TR,
    TR,                  TR,                            NO,                            NO,                            NO,                            NO,
];

pub static LAYERS: [&[Action; NKEYS]; 6] = [
    &BASE_GRID, &NUM_GRID, &SYM_GRID, &NAV_GRID, &MEDIA_GRID, &VIM_GRID,
];

/// Base-layer combos: escape on the left hand, backspace on the right, both
/// without leaving the home position.
pub static COMBOS: [ComboEntry; 2] = [
    ComboEntry {
        keys: [KEY_W, KEY_F],
        output: k(Keyboard::Escape),
    },
    ComboEntry {
        keys: [KEY_U, KEY_Y],
        output: k(Keyboard::DeleteBackspace),
    },
];

/// Shorter tapping term for the shift and alt home-row keys.
fn tapping_term(kind: HoldKind, tap: Keyboard) -> u16 {
    match (kind, tap) {
        (HoldKind::Mods(mods), Keyboard::T | Keyboard::N) if mods == SHIFT => TAPPING_TERM_FAST,
        (HoldKind::Mods(mods), Keyboard::R | Keyboard::I) if mods == ALT => TAPPING_TERM_FAST,
        _ => TAPPING_TERM,
    }
}

/// Streak windows per modifier class; layer-taps opt out entirely, since
/// reaching a layer mid-streak is deliberate.
fn streak_timeout(kind: HoldKind, _tap: Keyboard) -> u16 {
    match kind {
        HoldKind::Layer(_) => 0,
        HoldKind::Mods(mods) if mods.contains(SHIFT) => STREAK_SHIFT,
        HoldKind::Mods(mods) if mods.contains(ALT) => STREAK_ALT,
        HoldKind::Mods(_) => STREAK_DEFAULT,
    }
}

/// Shift, GUI and ctrl may engage before the verdict; alt may not (menu
/// bars twitch).  Composite chords wait too.
fn eager_mod(mods: Mods) -> bool {
    mods == SHIFT || mods == GUI || mods == CTRL
}

/// A chord may settle as a hold when a thumb is involved or the two keys
/// are on opposite hands.
fn chord_permit(geo: &Geometry, held: u8, other: u8) -> bool {
    geo.is_thumb(held) || geo.is_thumb(other) || geo.opposite_hands(held, other)
}

pub const PREDICATES: Predicates = Predicates {
    geometry: GEOMETRY,
    tapping_term,
    streak_timeout,
    eager_mod,
    chord_permit,
};

/// What a pressed key turned into, so its release undoes the right thing.
#[derive(Clone, Copy, Debug)]
enum Down {
    Key(Keyboard),
    Mods(Mods),
    Layer(u8),
    Noop,
}

pub struct VoyagerManager {
    layers: LayerState,
    resolver: HoldTap,
    combos: Combos,
    caps: CapsWord,
    player: MacroPlayer,
    /// What each physically-down scan code resolved to.
    down: ArrayVec<(u8, Down), 16>,
    /// Events held back while dual-role keys are unresolved.
    deferred: ArrayDeque<KeyEvent, 16>,
    /// The modifier union last reported with a `ModOnly`.
    reported_mods: Mods,
}

impl Default for VoyagerManager {
    fn default() -> Self {
        VoyagerManager {
            layers: LayerState::default(),
            resolver: HoldTap::new(PREDICATES, DEFAULT_SETTINGS),
            combos: Combos::new(&COMBOS),
            caps: CapsWord::new(DEFAULT_SETTINGS),
            player: MacroPlayer::default(),
            down: ArrayVec::new(),
            deferred: ArrayDeque::new(),
            reported_mods: Mods::empty(),
        }
    }
}

impl VoyagerManager {
    pub fn layer_mask(&self) -> u8 {
        self.layers.mask()
    }

    pub fn caps_word_active(&self) -> bool {
        self.caps.is_active()
    }

    /// Handle a single key event from the scan loop.
    pub fn handle_event(&mut self, event: KeyEvent, actions: &mut dyn LayoutActions) {
        if self.resolver.has_pending() || !self.deferred.is_empty() {
            self.feed_pending(event, actions);
        } else {
            self.process_event(event, actions);
        }
        if event.is_press() {
            self.resolver.note_keypress();
        }
    }

    /// Advance one millisecond.
    pub fn tick(&mut self, actions: &mut dyn LayoutActions) {
        let settles = self.resolver.tick();
        for settle in settles {
            self.apply_settle(settle, actions);
        }
        self.drain_deferred(actions);

        if let Some(ComboSignal::Replay(code)) = self.combos.tick() {
            self.press_action(code, actions);
        }
        self.caps.tick();
        self.player.tick(actions);
    }

    /// Bus state changes.  Suspend drops everything transient.
    pub fn usb_state(&mut self, state: UsbDeviceState, actions: &mut dyn LayoutActions) {
        if !crate::is_suspend(state) {
            return;
        }
        self.layers.reset();
        self.resolver.clear();
        self.combos.clear();
        self.caps.deactivate();
        self.player.clear();
        self.down.clear();
        self.deferred.clear();
        self.reported_mods = Mods::empty();
        actions.active_layers(self.layers.mask());
    }

    /// While dual-role keys are pending, events feed the resolver and then
    /// wait in line so they replay in order once the verdict lands.
    fn feed_pending(&mut self, event: KeyEvent, actions: &mut dyn LayoutActions) {
        match event {
            KeyEvent::Press(code) => {
                let settles = self.resolver.other_press(code);
                for settle in settles {
                    self.apply_settle(settle, actions);
                }
                self.defer(event, actions);
            }
            KeyEvent::Release(code) => {
                if self.resolver.is_pending(code) {
                    if let Some(settle) = self.resolver.release(code) {
                        self.apply_settle(settle, actions);
                    }
                } else {
                    let settles = self.resolver.other_release(code);
                    for settle in settles {
                        self.apply_settle(settle, actions);
                    }
                    self.defer(event, actions);
                }
            }
        }
        self.drain_deferred(actions);
    }

    fn defer(&mut self, event: KeyEvent, actions: &mut dyn LayoutActions) {
        if self.deferred.push_back(event).is_err() {
            // Queue full; something pathological is going on.  Flush what we
            // can rather than dropping input.
            warn!("deferred event queue overflow");
            self.drain_deferred(actions);
            self.process_event(event, actions);
        }
    }

    /// Replay deferred events once nothing is pending.  Stops early if a
    /// replayed press opens a new pending entry.
    fn drain_deferred(&mut self, actions: &mut dyn LayoutActions) {
        while !self.resolver.has_pending() {
            let Some(event) = self.deferred.pop_front() else {
                break;
            };
            self.process_event(event, actions);
        }
    }

    /// Ordinary, in-order event dispatch.
    fn process_event(&mut self, event: KeyEvent, actions: &mut dyn LayoutActions) {
        match event {
            KeyEvent::Press(code) => {
                // Combos only exist on the base layer; with a layer held,
                // their member keys are just whatever the layer says.
                if self.layers.mask() != 1 {
                    self.press_action(code, actions);
                    return;
                }
                let signals = self.combos.press(code);
                for signal in signals {
                    match signal {
                        ComboSignal::Fire(action) => self.emit_combo_press(action, actions),
                        ComboSignal::Release(action) => self.emit_combo_release(action, actions),
                        ComboSignal::Replay(buffered) => self.press_action(buffered, actions),
                        ComboSignal::Process => self.press_action(code, actions),
                        ComboSignal::Swallow => (),
                    }
                }
            }
            KeyEvent::Release(code) => {
                let signals = self.combos.release(code);
                for signal in signals {
                    match signal {
                        ComboSignal::Fire(action) => self.emit_combo_press(action, actions),
                        ComboSignal::Release(action) => self.emit_combo_release(action, actions),
                        ComboSignal::Replay(buffered) => self.press_action(buffered, actions),
                        ComboSignal::Process => self.release_action(code, actions),
                        ComboSignal::Swallow => (),
                    }
                }
            }
        }
    }

    /// Resolve and perform the press of a scan code.
    fn press_action(&mut self, code: u8, actions: &mut dyn LayoutActions) {
        let action = self.layers.resolve(&LAYERS, code);
        match action {
            Action::Key(key) => {
                let mods = self.caps.apply(key, self.current_mods());
                actions.send_key(KeyAction::KeyPress(key, mods));
                self.track(code, Down::Key(key));
            }
            Action::Mod(mods, key) => {
                actions.send_key(KeyAction::KeyPress(key, self.current_mods() | mods));
                self.track(code, Down::Key(key));
            }
            Action::Mods(mods) => {
                self.track(code, Down::Mods(mods));
                self.sync_mods(actions);
            }
            Action::ModTap(mods, tap) => {
                self.dual_press(code, HoldKind::Mods(mods), tap, actions);
            }
            Action::LayerTap(layer, tap) => {
                self.dual_press(code, HoldKind::Layer(layer), tap, actions);
            }
            Action::Momentary(layer) => {
                self.layers.on(layer);
                self.track(code, Down::Layer(layer));
                actions.active_layers(self.layers.mask());
            }
            Action::Toggle(layer) => {
                self.layers.toggle(layer);
                self.track(code, Down::Noop);
                actions.active_layers(self.layers.mask());
            }
            Action::Consumer(usage) => {
                actions.send_key(KeyAction::ConsumerTap(usage));
                self.track(code, Down::Noop);
            }
            Action::CapsWord => {
                self.caps.toggle();
                self.track(code, Down::Noop);
            }
            Action::Macro(id) => {
                self.player.start(id);
                self.track(code, Down::Noop);
            }
            Action::RgbSolid => {
                actions.set_rgb(RgbEffect::Solid);
                self.track(code, Down::Noop);
            }
            // No pointer or tap-dance keys on this board.
            Action::Mouse(_) | Action::TapDance(_) | Action::None | Action::Trans => {
                self.track(code, Down::Noop);
            }
        }
    }

    fn dual_press(
        &mut self,
        code: u8,
        kind: HoldKind,
        tap: Keyboard,
        actions: &mut dyn LayoutActions,
    ) {
        if let Some(settle) = self.resolver.press(code, kind, tap) {
            self.apply_settle(settle, actions);
        } else if self.resolver.pressed_eagerly().is_some() {
            self.sync_mods(actions);
        }
    }

    /// Perform the release of a scan code, using what its press became.
    fn release_action(&mut self, code: u8, actions: &mut dyn LayoutActions) {
        // A deferred release can reach here with its key still pending.
        if self.resolver.is_pending(code) {
            if let Some(settle) = self.resolver.release(code) {
                self.apply_settle(settle, actions);
            }
            return;
        }
        let Some(index) = self.down.iter().position(|(c, _)| *c == code) else {
            return;
        };
        let (_, down) = self.down.remove(index);
        match down {
            Down::Key(_) => actions.send_key(KeyAction::KeyRelease),
            Down::Mods(_) => self.sync_mods(actions),
            Down::Layer(layer) => {
                self.layers.off(layer);
                actions.active_layers(self.layers.mask());
            }
            Down::Noop => (),
        }
    }

    /// Act on a dual-role verdict.
    fn apply_settle(&mut self, settle: Settled, actions: &mut dyn LayoutActions) {
        match settle.resolution {
            Resolution::Tap => {
                // Retract eager modifiers before the tap goes out.
                if settle.eager {
                    self.sync_mods(actions);
                }
                let mods = self.caps.apply(settle.tap, self.current_mods());
                actions.send_key(KeyAction::KeyPress(settle.tap, mods));
                if settle.released {
                    actions.send_key(KeyAction::KeyRelease);
                } else {
                    self.track(settle.code, Down::Key(settle.tap));
                }
            }
            Resolution::Hold => match settle.kind {
                HoldKind::Mods(mods) => {
                    self.track(settle.code, Down::Mods(mods));
                    self.sync_mods(actions);
                }
                HoldKind::Layer(layer) => {
                    self.layers.on(layer);
                    self.track(settle.code, Down::Layer(layer));
                    actions.active_layers(self.layers.mask());
                }
            },
        }
    }

    fn emit_combo_press(&mut self, action: Action, actions: &mut dyn LayoutActions) {
        if let Action::Key(key) = action {
            let mods = self.caps.apply(key, self.current_mods());
            actions.send_key(KeyAction::KeyPress(key, mods));
        }
    }

    fn emit_combo_release(&mut self, action: Action, actions: &mut dyn LayoutActions) {
        if let Action::Key(_) = action {
            actions.send_key(KeyAction::KeyRelease);
        }
    }

    fn track(&mut self, code: u8, down: Down) {
        if self.down.try_push((code, down)).is_err() {
            warn!("too many keys down, dropping tracking for {}", code);
        }
    }

    /// The modifier union currently engaged: held modifier keys, settled
    /// holds, and eagerly-applied pending holds.
    fn current_mods(&self) -> Mods {
        let mut mods = self.resolver.eager_pending_mods();
        for (_, down) in &self.down {
            if let Down::Mods(m) = down {
                mods |= *m;
            }
        }
        mods
    }

    /// Report the modifier union if it changed.
    fn sync_mods(&mut self, actions: &mut dyn LayoutActions) {
        let mods = self.current_mods();
        if mods != self.reported_mods {
            self.reported_mods = mods;
            actions.send_key(KeyAction::ModOnly(mods));
        }
    }
}
