//! Draws one digit as a count of lit pixels within its group.
//!
//! With randomization on, which pixels of the group carry the count is reshuffled on every
//! draw, but never into a pattern that lights no previously dark pixel. That keeps the
//! face visibly changing on every update while the digit value stays put.

use oorandom::Rand32;

use crate::constants::MAX_SHUFFLE_ATTEMPTS;
use crate::digit_group::{DigitGroup, MAX_GROUP_LEN};
use crate::frame::{Frame, Rgb};

/// Whether the lit pixels follow the group order or a fresh shuffle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PixelOrder {
    /// The first `value` pixels of the group, in group order.
    Fixed,
    /// A shuffle guaranteed to light at least one pixel that is dark in the frame.
    Random,
}

/// Digit renderer holding the random source used for shuffles.
pub struct DigitRenderer {
    rng: Rand32,
}

impl DigitRenderer {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Rand32::new(seed),
        }
    }

    /// Writes `value` into `group`: the whole group to `background`, then `value` of its
    /// pixels to `color`. Values above the group size light the whole group. Does not commit.
    ///
    /// Randomization only applies strictly between empty and full; at either extreme every
    /// pixel of the group has the same state whatever the order.
    pub fn render(
        &mut self,
        frame: &mut Frame,
        group: DigitGroup,
        value: u8,
        color: Rgb,
        background: Rgb,
        order: PixelOrder,
    ) {
        let len = group.len().min(MAX_GROUP_LEN);
        let value = usize::from(value).min(len);

        let mut permutation = identity::<MAX_GROUP_LEN>();
        let positions = permutation.get_mut(..len).unwrap_or_default();
        if order == PixelOrder::Random && value > 0 && value < len {
            self.shuffle_until_visible_change(frame, group, positions, value);
        }

        for position in 0..len {
            if let Some(pixel) = group.pixel(position) {
                frame.set_pixel(pixel, background);
            }
        }
        for &position in positions.iter().take(value) {
            if let Some(pixel) = group.pixel(usize::from(position)) {
                frame.set_pixel(pixel, color);
            }
        }
    }

    /// Reshuffles `positions` until one of its first `value` entries is dark in `frame`.
    /// Gives up after `MAX_SHUFFLE_ATTEMPTS` and keeps the last shuffle; that only happens
    /// when the group has no dark pixel to light.
    fn shuffle_until_visible_change(
        &mut self,
        frame: &Frame,
        group: DigitGroup,
        positions: &mut [u8],
        value: usize,
    ) {
        for _ in 0..MAX_SHUFFLE_ATTEMPTS {
            self.shuffle(positions);
            let lights_dark_pixel = positions.iter().take(value).any(|&position| {
                group
                    .pixel(usize::from(position))
                    .is_some_and(|pixel| frame.is_off(pixel))
            });
            if lights_dark_pixel {
                return;
            }
        }
        warn!(
            "No shuffle lit a dark pixel after {} attempts",
            MAX_SHUFFLE_ATTEMPTS
        );
    }

    /// Swaps each position with a uniformly chosen one.
    #[expect(
        clippy::cast_possible_truncation,
        reason = "Groups have at most MAX_GROUP_LEN pixels"
    )]
    fn shuffle(&mut self, positions: &mut [u8]) {
        let len = positions.len() as u32;
        for index in 0..positions.len() {
            let other = self.rng.rand_range(0..len) as usize;
            positions.swap(index, other);
        }
    }
}

#[expect(
    clippy::cast_possible_truncation,
    reason = "Groups have at most MAX_GROUP_LEN pixels"
)]
fn identity<const N: usize>() -> [u8; N] {
    core::array::from_fn(|index| index as u8)
}
