//! Tap dance keys.
//!
//! A tap dance key means different things depending on how many times it is
//! tapped in quick succession and whether the last press is still being held.
//! The firmware hands us the raw edges; we count presses, watch for
//! interruptions from other keys, and age the sequence with the tick.  Once
//! the sequence settles it is classified into a [`Gesture`], the board's
//! handler acts on it, and when the key finally comes back up the handler
//! gets a second look at the same gesture to undo anything it held down.

use arrayvec::ArrayVec;

use crate::config::TAPPING_TERM;

/// The classified shape of a tap sequence.
///
/// `DoubleSingleTap` is the odd one out: it distinguishes typing a letter
/// twice ("pepper") from genuinely wanting the double-tap action.  A double
/// press that was interrupted by another key is someone typing, and should be
/// sent as two ordinary taps.
#[derive(Clone, Copy, Eq, PartialEq, Debug)]
pub enum Gesture {
    None,
    Unknown,
    SingleTap,
    SingleHold,
    DoubleTap,
    DoubleHold,
    DoubleSingleTap,
    TripleTap,
    TripleHold,
}

#[cfg(feature = "defmt")]
impl defmt::Format for Gesture {
    fn format(&self, fmt: defmt::Formatter) {
        let name = match self {
            Gesture::None => "none",
            Gesture::Unknown => "unknown",
            Gesture::SingleTap => "tap",
            Gesture::SingleHold => "hold",
            Gesture::DoubleTap => "double-tap",
            Gesture::DoubleHold => "double-hold",
            Gesture::DoubleSingleTap => "double-single-tap",
            Gesture::TripleTap => "triple-tap",
            Gesture::TripleHold => "triple-hold",
        };
        defmt::write!(fmt, "{}", name);
    }
}

impl Gesture {
    /// Classify a settled tap sequence.
    ///
    /// An uninterrupted press that is still held is a hold; an interrupted or
    /// released press is a tap.  The same rule repeats for two and three
    /// presses, except that an interrupted double is `DoubleSingleTap` no
    /// matter what the key is doing now.  Anything past three presses is
    /// deliberately not distinguished.
    pub fn classify(count: u8, interrupted: bool, held: bool) -> Gesture {
        match count {
            1 => {
                if interrupted || !held {
                    Gesture::SingleTap
                } else {
                    Gesture::SingleHold
                }
            }
            2 => {
                if interrupted {
                    Gesture::DoubleSingleTap
                } else if held {
                    Gesture::DoubleHold
                } else {
                    Gesture::DoubleTap
                }
            }
            3 => {
                if interrupted || !held {
                    Gesture::TripleTap
                } else {
                    Gesture::TripleHold
                }
            }
            _ => Gesture::Unknown,
        }
    }
}

/// What a dance reports back to its owner.
///
/// `Finished` fires once per sequence, when the gesture settles (tapping term
/// expired, or another key interrupted).  `Reset` fires when the sequence is
/// fully over and the key is up, with the same gesture, so held actions can
/// be released.
#[derive(Clone, Copy, Eq, PartialEq, Debug)]
pub enum DanceOutcome {
    Finished(Gesture),
    Reset(Gesture),
}

/// Up to two outcomes can fall out of a single edge (a tick that both
/// finishes and resets a released sequence).
pub type DanceOutcomes = ArrayVec<DanceOutcome, 2>;

/// State for one tap dance key.
pub struct TapDance {
    /// Presses seen in the current sequence.
    count: u8,
    /// The key is physically down.
    pressed: bool,
    /// Another key was pressed mid-sequence.
    interrupted: bool,
    /// Milliseconds since the last edge on this key.
    age: u16,
    /// The classification, once the sequence has settled.
    settled: Option<Gesture>,
    /// Per-key tapping term.
    term: u16,
}

impl Default for TapDance {
    fn default() -> Self {
        TapDance {
            count: 0,
            pressed: false,
            interrupted: false,
            age: 0,
            settled: None,
            term: TAPPING_TERM,
        }
    }
}

impl TapDance {
    pub fn with_term(term: u16) -> Self {
        TapDance {
            term,
            ..Default::default()
        }
    }

    /// Is a sequence in flight (settled or not)?
    pub fn is_active(&self) -> bool {
        self.count > 0
    }

    /// The key went down.
    pub fn press(&mut self) -> DanceOutcomes {
        self.count = self.count.saturating_add(1);
        self.pressed = true;
        self.age = 0;
        DanceOutcomes::new()
    }

    /// The key came up.  If the gesture already settled this completes the
    /// sequence.
    pub fn release(&mut self) -> DanceOutcomes {
        let mut out = DanceOutcomes::new();
        self.pressed = false;
        self.age = 0;
        if let Some(gesture) = self.settled {
            out.push(DanceOutcome::Reset(gesture));
            *self = TapDance::with_term(self.term);
        }
        out
    }

    /// Another key was pressed while this dance was in flight.  That settles
    /// the gesture immediately; fast rolls onto other keys shouldn't wait out
    /// the tapping term.
    pub fn interrupt(&mut self) -> DanceOutcomes {
        let mut out = DanceOutcomes::new();
        if self.count == 0 || self.settled.is_some() {
            return out;
        }
        self.interrupted = true;
        out.push(self.settle());
        // An interrupted sequence whose key is already up is completely done.
        if !self.pressed {
            if let Some(gesture) = self.settled {
                out.push(DanceOutcome::Reset(gesture));
                *self = TapDance::with_term(self.term);
            }
        }
        out
    }

    /// Advance time by one millisecond.
    pub fn tick(&mut self) -> DanceOutcomes {
        let mut out = DanceOutcomes::new();
        if self.count == 0 {
            return out;
        }
        self.age = self.age.saturating_add(1);
        if self.settled.is_none() && self.age >= self.term {
            out.push(self.settle());
            if !self.pressed {
                if let Some(gesture) = self.settled {
                    out.push(DanceOutcome::Reset(gesture));
                    *self = TapDance::with_term(self.term);
                }
            }
        }
        out
    }

    fn settle(&mut self) -> DanceOutcome {
        let gesture = Gesture::classify(self.count, self.interrupted, self.pressed);
        self.settled = Some(gesture);
        DanceOutcome::Finished(gesture)
    }
}
