//! Hold-or-tap resolution for dual-role keys.
//!
//! The home-row modifier and layer-tap keys are the usability make-or-break
//! of the split board, and the stock "did it outlast the tapping term"
//! question is not enough to keep them honest during fast typing.  Three
//! extra signals are layered on top, each supplied by the board as a plain
//! function over its own keymap:
//!
//! - A *chord* predicate.  When another key comes down while a dual-role key
//!   is unresolved, the pair is only allowed to settle as a hold if the
//!   predicate likes it.  The split board permits chords involving a thumb
//!   key or spanning both hands; two fingers of the same hand mashing nearby
//!   keys is almost always rolled typing, not a deliberate modifier.
//! - A *streak* window.  A dual-role key pressed hot on the heels of the
//!   previous keystroke is part of a typing streak and settles as a tap
//!   without further ceremony.
//! - An *eager* set.  Shift, control and GUI behave fine if applied the
//!   moment hold-intent shows up (and retracted if the verdict ends up being
//!   tap); alt on most desktops pops up menus, so it waits.
//!
//! A chord the predicate permits still doesn't settle on the other key's
//! press.  It settles when that key is *released* inside the hold (the
//! "permissive hold" rule), when the tapping term runs out, or as a tap when
//! the dual-role key itself comes up first.  Rolled presses across two
//! dual-role keys therefore still come out as the letters.
//!
//! The resolver is deliberately unaware of what a hold *does*; it hands back
//! [`Settled`] records and the board's manager acts on them.  The manager is
//! expected to defer ordinary key events while anything is pending, so that
//! a layer hold settles before the keys typed under it resolve.

use arrayvec::ArrayVec;
use enumset::EnumSet;
use usbd_human_interface_device::page::Keyboard;

use crate::config::Setting;
use crate::keys::Geometry;
use crate::Mods;

/// What the key does if it settles as a hold.
#[derive(Clone, Copy, Eq, PartialEq, Debug)]
pub enum HoldKind {
    Mods(Mods),
    Layer(u8),
}

/// The verdict for one dual-role key.
#[derive(Clone, Copy, Eq, PartialEq, Debug)]
pub enum Resolution {
    Tap,
    Hold,
}

/// A settled dual-role key, ready for the manager to act on.
#[derive(Clone, Copy, Debug)]
pub struct Settled {
    pub code: u8,
    pub kind: HoldKind,
    pub tap: Keyboard,
    pub resolution: Resolution,
    /// Eager modifiers were applied at press time and, on a tap verdict,
    /// need retracting.
    pub eager: bool,
    /// The physical key was already up when the verdict landed, so the
    /// manager should emit both edges of whatever it settles on.
    pub released: bool,
}

/// The predicates a board plugs into the resolver.
#[derive(Clone, Copy)]
pub struct Predicates {
    pub geometry: Geometry,
    /// Per-key tapping term, in ms.
    pub tapping_term: fn(HoldKind, Keyboard) -> u16,
    /// Streak window for this key; 0 disables streak handling for it.
    pub streak_timeout: fn(HoldKind, Keyboard) -> u16,
    /// Which modifier sets may engage before the verdict.
    pub eager_mod: fn(Mods) -> bool,
    /// May `held` and `other` settle as a chord (hold)?
    pub chord_permit: fn(&Geometry, u8, u8) -> bool,
}

struct Pending {
    code: u8,
    kind: HoldKind,
    tap: Keyboard,
    age: u16,
    term: u16,
    eager: bool,
    /// The most recent key pressed on top of this one while permitted as a
    /// chord.  Its release is what commits the hold.
    interrupter: Option<u8>,
}

impl Pending {
    fn settle(&self, resolution: Resolution, released: bool) -> Settled {
        Settled {
            code: self.code,
            kind: self.kind,
            tap: self.tap,
            resolution,
            eager: self.eager,
            released,
        }
    }
}

/// More simultaneous unresolved dual-role keys than this means the typist is
/// doing something the keymap was never designed for; extras settle as taps.
const MAX_PENDING: usize = 4;

pub struct HoldTap {
    predicates: Predicates,
    settings: EnumSet<Setting>,
    pending: ArrayVec<Pending, MAX_PENDING>,
    /// Milliseconds since the last physical keypress, for streak detection.
    /// Saturates; anything past the largest window reads as "no streak".
    streak_age: u16,
}

pub type SettledList = ArrayVec<Settled, MAX_PENDING>;

impl HoldTap {
    pub fn new(predicates: Predicates, settings: EnumSet<Setting>) -> Self {
        HoldTap {
            predicates,
            settings,
            pending: ArrayVec::new(),
            streak_age: u16::MAX,
        }
    }

    /// Anything still waiting on a verdict?
    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Is this scan code a dual-role key we are still deciding on?
    pub fn is_pending(&self, code: u8) -> bool {
        self.pending.iter().any(|p| p.code == code)
    }

    /// Every physical press feeds the streak clock, whether or not it
    /// involved the resolver.  The manager calls this once per press, after
    /// routing the event.
    pub fn note_keypress(&mut self) {
        self.streak_age = 0;
    }

    /// Whether the eager modifiers of `kind` should engage right away.
    fn eager(&self, kind: HoldKind) -> bool {
        if !self.settings.contains(Setting::EagerMods) {
            return false;
        }
        match kind {
            HoldKind::Mods(mods) => (self.predicates.eager_mod)(mods),
            HoldKind::Layer(_) => false,
        }
    }

    /// A dual-role key went down.  Returns an immediate tap verdict when the
    /// press lands inside a typing streak; otherwise the key goes pending
    /// and the answer comes later.
    ///
    /// The returned `Settled`, if any, has `released: false` - the key is
    /// still physically down and the manager owes it a release later.
    pub fn press(&mut self, code: u8, kind: HoldKind, tap: Keyboard) -> Option<Settled> {
        let streak_window = (self.predicates.streak_timeout)(kind, tap);
        let in_streak = self.settings.contains(Setting::StreakDetection)
            && streak_window > 0
            && self.streak_age < streak_window;

        let entry = Pending {
            code,
            kind,
            tap,
            age: 0,
            term: (self.predicates.tapping_term)(kind, tap),
            eager: !in_streak && self.eager(kind),
            interrupter: None,
        };
        if in_streak || self.pending.try_push(entry).is_err() {
            return Some(Settled {
                code,
                kind,
                tap,
                resolution: Resolution::Tap,
                eager: false,
                released: false,
            });
        }
        None
    }

    /// Was the newest pending entry marked eager?  The manager asks right
    /// after [`Self::press`] so it can engage the modifiers.
    pub fn pressed_eagerly(&self) -> Option<Mods> {
        let last = self.pending.last()?;
        if !last.eager {
            return None;
        }
        match last.kind {
            HoldKind::Mods(mods) => Some(mods),
            HoldKind::Layer(_) => None,
        }
    }

    /// The union of modifiers applied eagerly for still-pending keys.
    pub fn eager_pending_mods(&self) -> Mods {
        let mut mods = Mods::empty();
        for p in &self.pending {
            if p.eager {
                if let HoldKind::Mods(m) = p.kind {
                    mods |= m;
                }
            }
        }
        mods
    }

    /// Some other key was pressed while we have keys pending.  Chords the
    /// predicate refuses settle as taps right now; permitted ones just note
    /// the interrupter and keep waiting.
    pub fn other_press(&mut self, other: u8) -> SettledList {
        let mut settled = SettledList::new();
        let predicates = self.predicates;
        self.pending.retain(|p| {
            if (predicates.chord_permit)(&predicates.geometry, p.code, other) {
                p.interrupter = Some(other);
                true
            } else {
                settled.push(p.settle(Resolution::Tap, false));
                false
            }
        });
        settled
    }

    /// Some other key was released.  A permitted interrupter released while
    /// the dual-role key is still down commits the hold.
    pub fn other_release(&mut self, other: u8) -> SettledList {
        let mut settled = SettledList::new();
        if !self.settings.contains(Setting::PermissiveHold) {
            return settled;
        }
        self.pending.retain(|p| {
            if p.interrupter == Some(other) {
                settled.push(p.settle(Resolution::Hold, false));
                false
            } else {
                true
            }
        });
        settled
    }

    /// The dual-role key itself came up before a verdict: it was a tap, and
    /// both edges are due immediately.
    pub fn release(&mut self, code: u8) -> Option<Settled> {
        let index = self.pending.iter().position(|p| p.code == code)?;
        let entry = self.pending.remove(index);
        Some(entry.settle(Resolution::Tap, true))
    }

    /// Advance one millisecond.  Pending keys that outlive their term settle
    /// as holds.
    pub fn tick(&mut self) -> SettledList {
        let mut settled = SettledList::new();
        self.streak_age = self.streak_age.saturating_add(1);
        self.pending.retain(|p| {
            p.age = p.age.saturating_add(1);
            if p.age >= p.term {
                settled.push(p.settle(Resolution::Hold, false));
                false
            } else {
                true
            }
        });
        settled
    }

    /// Forget everything in flight (bus suspend).
    pub fn clear(&mut self) {
        self.pending.clear();
        self.streak_age = u16::MAX;
    }
}
