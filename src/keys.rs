//! Keys on my keyboards.
//!
//! Both boards present their keys to us as flat scan codes, numbered row-major
//! across the whole matrix.  For the split board the left half's rows come
//! first, then the right half's, so "which hand is this" and "is this a thumb
//! key" are both questions about the row number.  The constants here name the
//! handful of scan codes the rest of the crate needs to refer to directly.

/// Which side of the keyboard a key is on.
#[derive(Eq, PartialEq, Clone, Copy, Debug)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn is_left(&self) -> bool {
        match *self {
            Side::Left => true,
            Side::Right => false,
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Side {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Side::Left => defmt::write!(fmt, "left"),
            Side::Right => defmt::write!(fmt, "right"),
        }
    }
}

/// The fixed shape of a board's matrix.
///
/// `thumb_row` is the row index *within a half* at which the thumb cluster
/// starts.  Boards without a thumb cluster (the trackball) set it past the
/// end so nothing qualifies.
#[derive(Clone, Copy, Debug)]
pub struct Geometry {
    pub rows: u8,
    pub cols: u8,
    pub thumb_row: u8,
}

impl Geometry {
    /// Total number of key positions.
    pub const fn keys(&self) -> usize {
        self.rows as usize * self.cols as usize
    }

    /// The matrix row of a scan code.
    pub const fn row(&self, code: u8) -> u8 {
        code / self.cols
    }

    /// Which half of the matrix a scan code falls in.  Rows are split evenly,
    /// left half first.
    pub fn side(&self, code: u8) -> Side {
        if self.row(code) < self.rows / 2 {
            Side::Left
        } else {
            Side::Right
        }
    }

    /// Whether the scan code sits in a thumb cluster: its row within its half
    /// is at or past `thumb_row`.
    pub fn is_thumb(&self, code: u8) -> bool {
        self.row(code) % (self.rows / 2) >= self.thumb_row
    }

    /// Whether two scan codes are on opposite halves.
    pub fn opposite_hands(&self, a: u8, b: u8) -> bool {
        self.side(a) != self.side(b)
    }
}

/// Scan codes for the split board: 10 rows of 6, rows 0-4 on the left half.
/// Row 4 of each half is the two-key thumb row (the remaining four positions
/// in those rows do not exist physically and map to nothing).
#[cfg(feature = "voyager")]
pub mod voyager {
    use super::Geometry;

    pub const GEOMETRY: Geometry = Geometry {
        rows: 10,
        cols: 6,
        thumb_row: 4,
    };

    pub const NKEYS: usize = GEOMETRY.keys();

    // The home row modifiers live on row 2 (left) and row 7 (right).
    pub const KEY_A: u8 = 13;
    pub const KEY_R: u8 = 14;
    pub const KEY_S: u8 = 15;
    pub const KEY_T: u8 = 16;
    pub const KEY_G: u8 = 17;
    pub const KEY_N: u8 = 43;
    pub const KEY_E: u8 = 44;
    pub const KEY_I: u8 = 45;
    pub const KEY_O: u8 = 46;

    // A few letters tests and combos want by name.
    pub const KEY_Q: u8 = 7;
    pub const KEY_W: u8 = 8;
    pub const KEY_F: u8 = 9;
    pub const KEY_P: u8 = 10;
    pub const KEY_Z: u8 = 19;
    pub const KEY_J: u8 = 36;
    pub const KEY_L: u8 = 37;
    pub const KEY_U: u8 = 38;
    pub const KEY_Y: u8 = 39;
    pub const KEY_H: u8 = 49;

    // Thumb keys: left half row 4, right half row 9.
    pub const KEY_SPACE: u8 = 24;
    pub const KEY_MINUS: u8 = 25;
    pub const KEY_BSPC: u8 = 54;
    pub const KEY_ENTER: u8 = 55;
}

/// Scan codes for the trackball: two rows, four top buttons and two bottom.
#[cfg(feature = "madromys")]
pub mod madromys {
    use super::Geometry;

    pub const GEOMETRY: Geometry = Geometry {
        rows: 2,
        cols: 4,
        // No thumb cluster on a trackball.
        thumb_row: u8::MAX,
    };

    pub const NKEYS: usize = GEOMETRY.keys();

    pub const BTN_ALT_TAB: u8 = 0;
    pub const BTN_BACK_FWD: u8 = 1;
    pub const BTN_MIDDLE: u8 = 2;
    pub const BTN_SCROLL: u8 = 3;
    pub const BTN_LEFT: u8 = 4;
    pub const BTN_BOTTOM_RIGHT: u8 = 5;
}
