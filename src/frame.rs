//! The pending pixel buffer and the device it is committed to.

use smart_leds::RGB8;

use crate::constants::LED_COUNT;

/// RGB color representation re-exported from `smart_leds`.
pub type Rgb = RGB8;

/// Unlit pixel.
pub const BLACK: Rgb = rgb(0, 0, 0);
pub const RED: Rgb = rgb(255, 0, 0);
pub const GREEN: Rgb = rgb(0, 255, 0);
pub const BLUE: Rgb = rgb(0, 0, 255);
pub const PURPLE: Rgb = rgb(139, 0, 139);
pub const WHITE: Rgb = rgb(255, 255, 255);
pub const YELLOW: Rgb = rgb(255, 255, 0);
/// Background for the steady parts of the time-setting screens.
pub const DIM_WHITE: Rgb = rgb(50, 50, 50);

/// Builds a color in a `const` context.
#[must_use]
pub const fn rgb(r: u8, g: u8, b: u8) -> Rgb {
    Rgb { r, g, b }
}

/// One full set of pixel colors, in strip order.
///
/// The buffer persists between commits, so it always holds what the strip last showed
/// plus any pending changes. The digit renderer relies on that to tell which pixels are
/// currently dark.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Frame([Rgb; LED_COUNT]);

impl Default for Frame {
    fn default() -> Self {
        Self::new()
    }
}

impl Frame {
    /// An all-black frame.
    #[must_use]
    pub const fn new() -> Self {
        Self([BLACK; LED_COUNT])
    }

    /// Sets one pixel. Indices past the end of the strip are ignored.
    pub fn set_pixel(&mut self, index: usize, color: Rgb) {
        if let Some(pixel) = self.0.get_mut(index) {
            *pixel = color;
        }
    }

    /// The color a pixel currently holds; black for indices past the end of the strip.
    #[must_use]
    pub fn pixel(&self, index: usize) -> Rgb {
        self.0.get(index).copied().unwrap_or(BLACK)
    }

    #[must_use]
    pub fn is_off(&self, index: usize) -> bool {
        self.pixel(index) == BLACK
    }

    pub fn fill(&mut self, color: Rgb) {
        self.0.fill(color);
    }

    pub fn clear(&mut self) {
        self.fill(BLACK);
    }

    #[must_use]
    pub const fn pixels(&self) -> &[Rgb; LED_COUNT] {
        &self.0
    }
}

/// Where committed frames go: the LED strip on hardware, a recorder in tests.
pub trait PixelOutput {
    /// Global brightness scalar (0..=255) applied to every later commit.
    fn set_brightness(&mut self, brightness: u8);

    /// Pushes `frame` to the physical pixels. Expensive; call at most once per logical frame.
    fn commit(&mut self, frame: &Frame);
}
