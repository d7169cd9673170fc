//! Two-key combos.
//!
//! A combo is an unordered pair of keys that, pressed close enough together,
//! produce a single different key instead.  The first member of a pair is
//! held back for a short window; if its partner arrives in time the combo
//! output goes down (and stays down until a member is released), otherwise
//! the buffered key is replayed as itself, in order, and nothing is lost.
//!
//! The engine does not emit key actions itself.  It answers each event with
//! [`ComboSignal`]s telling the owning manager what to feed through its
//! normal dispatch: fire an output, replay a swallowed press, or just carry
//! on with the event it was already handling.

use arrayvec::ArrayVec;

use crate::config::COMBO_TERM;
use crate::layout::Action;

/// One combo definition.  `keys` are scan codes on the base layer.
#[derive(Clone, Copy, Debug)]
pub struct ComboEntry {
    pub keys: [u8; 2],
    pub output: Action,
}

impl ComboEntry {
    fn partner_of(&self, code: u8) -> Option<u8> {
        if self.keys[0] == code {
            Some(self.keys[1])
        } else if self.keys[1] == code {
            Some(self.keys[0])
        } else {
            None
        }
    }
}

/// Instructions back to the manager, in the order they should happen.
#[derive(Clone, Copy, Eq, PartialEq, Debug)]
pub enum ComboSignal {
    /// The combo output goes down.
    Fire(Action),
    /// The combo output comes back up.
    Release(Action),
    /// Process a press of this swallowed scan code through normal dispatch.
    Replay(u8),
    /// Carry on processing the event that was just fed in.
    Process,
    /// The event was consumed; nothing else to do.
    Swallow,
}

pub type ComboSignals = ArrayVec<ComboSignal, 2>;

/// A combo in flight: the output is down, and so are some of its members.
struct Active {
    output: Action,
    members: [u8; 2],
    down: [bool; 2],
    released: bool,
}

struct Buffered {
    code: u8,
    age: u16,
}

pub struct Combos {
    entries: &'static [ComboEntry],
    buffered: Option<Buffered>,
    active: Option<Active>,
}

impl Combos {
    pub fn new(entries: &'static [ComboEntry]) -> Self {
        Combos {
            entries,
            buffered: None,
            active: None,
        }
    }

    fn lookup(&self, a: u8, b: u8) -> Option<&ComboEntry> {
        self.entries
            .iter()
            .find(|e| e.partner_of(a) == Some(b))
    }

    fn is_member(&self, code: u8) -> bool {
        self.entries.iter().any(|e| e.partner_of(code).is_some())
    }

    /// A key went down.
    pub fn press(&mut self, code: u8) -> ComboSignals {
        let mut out = ComboSignals::new();
        if let Some(buffered) = self.buffered.take() {
            if let Some(entry) = self.lookup(buffered.code, code) {
                let output = entry.output;
                let members = entry.keys;
                self.active = Some(Active {
                    output,
                    members,
                    down: [true, true],
                    released: false,
                });
                out.push(ComboSignal::Fire(output));
                return out;
            }
            // Wrong partner: the buffered key was just a keystroke.
            out.push(ComboSignal::Replay(buffered.code));
        }
        if self.active.is_none() && self.is_member(code) {
            self.buffered = Some(Buffered { code, age: 0 });
            out.push(ComboSignal::Swallow);
        } else {
            out.push(ComboSignal::Process);
        }
        out
    }

    /// A key came up.
    pub fn release(&mut self, code: u8) -> ComboSignals {
        let mut out = ComboSignals::new();
        // Releasing a key we were still buffering: replay the press, then
        // let the release go through normally.
        if self.buffered.as_ref().is_some_and(|b| b.code == code) {
            self.buffered = None;
            out.push(ComboSignal::Replay(code));
            out.push(ComboSignal::Process);
            return out;
        }
        if let Some(active) = self.active.as_mut() {
            let member = active
                .members
                .iter()
                .position(|&m| m == code)
                .filter(|&i| active.down[i]);
            if let Some(i) = member {
                active.down[i] = false;
                if !active.released {
                    active.released = true;
                    out.push(ComboSignal::Release(active.output));
                } else {
                    out.push(ComboSignal::Swallow);
                }
                if active.down == [false, false] {
                    self.active = None;
                }
                return out;
            }
        }
        out.push(ComboSignal::Process);
        out
    }

    /// Advance one millisecond.  A buffered key that outlives the combo
    /// window is replayed as itself.
    pub fn tick(&mut self) -> Option<ComboSignal> {
        let buffered = self.buffered.as_mut()?;
        buffered.age = buffered.age.saturating_add(1);
        if buffered.age >= COMBO_TERM {
            let code = buffered.code;
            self.buffered = None;
            Some(ComboSignal::Replay(code))
        } else {
            None
        }
    }

    /// Drop any in-flight state (bus suspend).  A swallowed press is simply
    /// forgotten; the host never saw it.
    pub fn clear(&mut self) {
        self.buffered = None;
        self.active = None;
    }
}
