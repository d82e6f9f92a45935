//! The fixed pixel groups that make up the four digits of the clock face.
//!
//! The strip is laid out in three serpentine rows; each digit owns a block of columns:
//!
//! ```text
//! HourTens             HourOnes              MinuteTens             MinuteOnes
//!     0      ---     1 --  2 --  3    ---      4 --  5    ---     6 --   7 -- 8
//!                                                                             |
//!     17     ---    16 -- 15 -- 14    ---     13 -- 12    ---    11 --  10 -- 9
//!     |
//!     18     ---    19 -- 20 -- 21    ---     22 -- 23    ---    24 --  25 -- 26
//! ```
//!
//! A digit's value is the number of lit pixels in its group.

use crate::constants::LED_COUNT;

/// An ordered set of strip indices that together show one digit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DigitGroup {
    pixels: &'static [u8],
}

impl DigitGroup {
    /// Checks at compile time that every index is on the strip.
    #[expect(
        clippy::indexing_slicing,
        clippy::arithmetic_side_effects,
        reason = "Bounded by the loop condition"
    )]
    #[must_use]
    pub const fn new(pixels: &'static [u8]) -> Self {
        let mut index = 0;
        while index < pixels.len() {
            assert!((pixels[index] as usize) < LED_COUNT, "pixel index is off the strip");
            index += 1;
        }
        Self { pixels }
    }

    /// The strip indices, in the order the unrandomized renderer lights them.
    #[must_use]
    pub const fn pixels(&self) -> &'static [u8] {
        self.pixels
    }

    /// How many pixels the group has, which is also the largest value it can show.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.pixels.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    /// Strip index of the group's `position`th pixel.
    #[must_use]
    pub fn pixel(&self, position: usize) -> Option<usize> {
        self.pixels.get(position).map(|&pixel| usize::from(pixel))
    }
}

/// Which of the four digits a group or color belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Digit {
    HourTens,
    HourOnes,
    MinuteTens,
    MinuteOnes,
}

impl Digit {
    /// All four digits, left to right.
    pub const ALL: [Self; 4] = [
        Self::HourTens,
        Self::HourOnes,
        Self::MinuteTens,
        Self::MinuteOnes,
    ];

    #[must_use]
    pub const fn group(self) -> DigitGroup {
        match self {
            Self::HourTens => HOUR_TENS,
            Self::HourOnes => HOUR_ONES,
            Self::MinuteTens => MINUTE_TENS,
            Self::MinuteOnes => MINUTE_ONES,
        }
    }
}

pub const HOUR_TENS: DigitGroup = DigitGroup::new(&[0, 17, 18]);
pub const HOUR_ONES: DigitGroup = DigitGroup::new(&[1, 2, 3, 16, 15, 14, 19, 20, 21]);
pub const MINUTE_TENS: DigitGroup = DigitGroup::new(&[4, 5, 13, 12, 22, 23]);
pub const MINUTE_ONES: DigitGroup = DigitGroup::new(&[6, 7, 8, 11, 10, 9, 24, 25, 26]);

/// The "V" drawn across the hour-ones block on the boot splash.
pub const LOGO_V: [u8; 5] = [1, 3, 16, 14, 20];

/// The largest group; sizes the renderer's scratch permutation.
pub const MAX_GROUP_LEN: usize = 9;

const _: () = assert!(
    HOUR_TENS.len() + HOUR_ONES.len() + MINUTE_TENS.len() + MINUTE_ONES.len() == LED_COUNT,
    "digit groups must cover the strip"
);
const _: () = assert!(HOUR_ONES.len() == MAX_GROUP_LEN && MINUTE_ONES.len() == MAX_GROUP_LEN);
