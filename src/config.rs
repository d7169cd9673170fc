//! Tunable constants.
//!
//! The numbers the keymaps are built around, collected in one place so the
//! inevitable fiddling with timing doesn't mean hunting through the managers.
//! All durations are in milliseconds, matching the tick the host firmware
//! drives us with.

use enumset::{enum_set, EnumSet, EnumSetType};

/// How long a tap-hold or tap-dance key waits before a still-held press
/// counts as a hold.  Individual keys can override this through the board's
/// tapping-term lookup.
pub const TAPPING_TERM: u16 = 180;

/// The shortened term used for the shift and alt home-row keys, which
/// otherwise false-trigger as holds during fast typing.
pub const TAPPING_TERM_FAST: u16 = 130;

/// Streak timeouts: a tap-hold key pressed within this long of the previous
/// key is part of a typing streak and resolves as a tap.  Shift gets the
/// shortest window since it is the most common mid-word modifier.
pub const STREAK_SHIFT: u16 = 80;
pub const STREAK_ALT: u16 = 120;
pub const STREAK_DEFAULT: u16 = 500;

/// Two keys pressed within this window can form a combo.
pub const COMBO_TERM: u16 = 50;

/// Caps word turns itself off after this much idle time.
pub const CAPS_WORD_IDLE_TIMEOUT: u16 = 5000;

/// Delay inserted between the chords of a macro program.
pub const MACRO_STEP_DELAY: u16 = 100;

/// How long to wait after resume before sending the wakeup report.  Zero:
/// the hosts I use don't need the grace period.
pub const USB_SUSPEND_WAKEUP_DELAY: u16 = 0;

/// Animation speed the RGB matrix starts at.
pub const RGB_STARTUP_SPEED: u8 = 60;

/// USB serial string reported for this device family.
pub const SERIAL_NUMBER: &str = "bZvgQ/QodNz";

/// Feature switches the engines consult at runtime.  These were compile-time
/// switches in earlier iterations of this config; a set is easier to test
/// against.
#[derive(EnumSetType, Debug)]
pub enum Setting {
    /// A press-and-release of another key inside the tapping term settles the
    /// surrounding tap-hold key as held.
    PermissiveHold,
    /// Enable the typing-streak windows above.
    StreakDetection,
    /// While caps word is on, a real shift inverts instead of stacking.
    CapsWordInvertOnShift,
    /// Apply shift/ctrl/gui immediately on hold-intent rather than waiting
    /// for the chord to settle.
    EagerMods,
}

pub const DEFAULT_SETTINGS: EnumSet<Setting> = enum_set!(
    Setting::PermissiveHold
        | Setting::StreakDetection
        | Setting::CapsWordInvertOnShift
        | Setting::EagerMods
);
