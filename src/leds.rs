//! RGB indication.
//!
//! The boards' lighting is run entirely by the host firmware; the keymap
//! only ever names an effect to switch to, and offers a color per layer so
//! the firmware can show where you are.

use smart_leds::RGB8;

use crate::config::RGB_STARTUP_SPEED;

pub const OFF: RGB8 = RGB8::new(0, 0, 0);

/// The effects the keymap can ask for.
#[derive(Clone, Copy, Eq, PartialEq, Debug)]
pub enum RgbEffect {
    /// Whatever animated effect the firmware booted into.
    Startup,
    /// A single solid color across the matrix.
    Solid,
    Off,
}

#[cfg(feature = "defmt")]
impl defmt::Format for RgbEffect {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            RgbEffect::Startup => defmt::write!(fmt, "startup"),
            RgbEffect::Solid => defmt::write!(fmt, "solid"),
            RgbEffect::Off => defmt::write!(fmt, "off"),
        }
    }
}

/// The lighting state the firmware should come up in.
pub const STARTUP: (RgbEffect, u8) = (RgbEffect::Startup, RGB_STARTUP_SPEED);

/// Indicator colors for the split board's layers, dim enough to live with.
/// The base layer and anything out of range show nothing.
#[cfg(feature = "voyager")]
pub fn layer_color(layer: u8) -> RGB8 {
    match layer {
        // Base: no indication.
        0 => OFF,
        // Num: blue.
        1 => RGB8::new(0, 0, 16),
        // Sym: yellow.
        2 => RGB8::new(12, 12, 0),
        // Nav: green.
        3 => RGB8::new(0, 16, 0),
        // Media: purple.
        4 => RGB8::new(10, 0, 14),
        // Vim: red.
        5 => RGB8::new(16, 0, 0),
        _ => OFF,
    }
}

#[cfg(all(test, feature = "voyager"))]
mod test {
    use super::{layer_color, OFF};

    #[test]
    fn colors_distinguish_layers() {
        assert_eq!(layer_color(0), OFF);
        assert_eq!(layer_color(9), OFF);
        let colors: Vec<_> = (1..6).map(layer_color).collect();
        for (i, a) in colors.iter().enumerate() {
            assert_ne!(*a, OFF);
            for b in &colors[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }
}
