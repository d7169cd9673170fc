//! Drag scroll state.
//!
//! The trackball normally moves the pointer.  In drag-scroll mode, ball
//! motion scrolls instead.  The mode can be held momentarily (hold the scroll
//! key) or locked on (a tap-dance key on the overlay layer), and the two ways
//! in are allowed to overlap: releasing a momentary hold while the lock is
//! set leaves scrolling on.

/// The scroll mode.  There is no "momentary and locked" state; locking wins
/// and a later momentary release must not turn scrolling off.
#[derive(Clone, Copy, Eq, PartialEq, Debug)]
pub enum ScrollState {
    Off,
    Momentary,
    Locked,
}

#[cfg(feature = "defmt")]
impl defmt::Format for ScrollState {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            ScrollState::Off => defmt::write!(fmt, "off"),
            ScrollState::Momentary => defmt::write!(fmt, "momentary"),
            ScrollState::Locked => defmt::write!(fmt, "locked"),
        }
    }
}

/// What a tap of the scroll key should do, given the state it found.
#[derive(Clone, Copy, Eq, PartialEq, Debug)]
pub enum TapEffect {
    /// Not locked: the tap is an ordinary button click.
    Click,
    /// Locked: the tap disengages the lock.
    Unlocked,
}

pub struct DragScroll {
    state: ScrollState,
}

impl Default for DragScroll {
    fn default() -> Self {
        DragScroll {
            state: ScrollState::Off,
        }
    }
}

impl DragScroll {
    pub fn state(&self) -> ScrollState {
        self.state
    }

    /// Scroll mode is active exactly when we are not off.
    pub fn is_active(&self) -> bool {
        self.state != ScrollState::Off
    }

    /// The scroll key settled as a hold: scroll while it stays down.
    /// A hold on top of an existing lock changes nothing.
    pub fn hold_engaged(&mut self) {
        if self.state == ScrollState::Off {
            self.state = ScrollState::Momentary;
        }
    }

    /// The held scroll key came back up.  Reverts to off unless locked.
    pub fn hold_released(&mut self) {
        if self.state == ScrollState::Momentary {
            self.state = ScrollState::Off;
        }
    }

    /// The scroll key settled as a tap.
    pub fn tap(&mut self) -> TapEffect {
        match self.state {
            ScrollState::Locked => {
                self.state = ScrollState::Off;
                TapEffect::Unlocked
            }
            _ => TapEffect::Click,
        }
    }

    /// The lock key settled as a tap: scroll stays on until the unlock tap.
    pub fn lock(&mut self) {
        self.state = ScrollState::Locked;
    }
}

#[cfg(test)]
mod test {
    use super::{DragScroll, ScrollState, TapEffect};

    #[test]
    fn lock_outlives_hold() {
        let mut ds = DragScroll::default();
        ds.hold_engaged();
        assert!(ds.is_active());
        ds.lock();
        // Releasing the hold no longer turns scrolling off.
        ds.hold_released();
        assert_eq!(ds.state(), ScrollState::Locked);
        assert!(ds.is_active());
        // Only the unlock tap does.
        assert_eq!(ds.tap(), TapEffect::Unlocked);
        assert!(!ds.is_active());
        // And a tap while unlocked is just a click.
        assert_eq!(ds.tap(), TapEffect::Click);
    }
}
