//! Composes clock-face screens into the frame buffer.

use crate::constants::{VERSION_MAJOR, VERSION_MINOR};
use crate::digit_group::{Digit, HOUR_TENS, LOGO_V};
use crate::digit_renderer::{DigitRenderer, PixelOrder};
use crate::frame::{BLACK, DIM_WHITE, Frame, RED, Rgb, WHITE};
use crate::menu::{RenderRequest, TimeField};
use crate::settings::{ColorScheme, Settings};
use crate::time_of_day::{TimeOfDay, ones, tens};

/// The frame buffer plus the renderer that draws digits into it.
///
/// Nothing here commits; the caller pushes [`ClockFace::frame`] to the pixel output.
pub struct ClockFace {
    frame: Frame,
    renderer: DigitRenderer,
}

impl ClockFace {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            frame: Frame::new(),
            renderer: DigitRenderer::new(seed),
        }
    }

    #[must_use]
    pub const fn frame(&self) -> &Frame {
        &self.frame
    }

    pub fn clear(&mut self) {
        self.frame.clear();
    }

    /// The time in the scheme's colors over black, each digit reshuffled.
    pub fn draw_time(&mut self, time: TimeOfDay, settings: &Settings) {
        let colors = settings.colors();
        let values = digit_values(time, settings.military_time);
        for (digit, value) in Digit::ALL.into_iter().zip(values) {
            self.renderer.render(
                &mut self.frame,
                digit.group(),
                value,
                colors.for_digit(digit),
                BLACK,
                PixelOrder::Random,
            );
        }
    }

    /// Draws a menu screen.
    pub fn draw_request(&mut self, request: RenderRequest, time: TimeOfDay, settings: &Settings) {
        match request {
            RenderRequest::EditTime { field, visible } => {
                self.draw_edit_time(time, settings, field, visible);
            }
            RenderRequest::IntervalSelector(interval) => self.renderer.render(
                &mut self.frame,
                HOUR_TENS,
                interval.indicator(),
                WHITE,
                BLACK,
                PixelOrder::Fixed,
            ),
            RenderRequest::ColorPreview(scheme) => self.draw_color_preview(scheme),
        }
    }

    /// Steady digits over dim white; the edited digits only in the visible phase.
    ///
    /// An edited digit of zero is drawn as its whole group in dim white, so that it still
    /// visibly blinks against the black of the hidden phase.
    fn draw_edit_time(
        &mut self,
        time: TimeOfDay,
        settings: &Settings,
        field: TimeField,
        visible: bool,
    ) {
        let colors = settings.colors();
        self.frame.fill(DIM_WHITE);
        let values = digit_values(time, settings.military_time);
        for (digit, value) in Digit::ALL.into_iter().zip(values) {
            let group = digit.group();
            if !is_edited(field, digit) {
                self.renderer.render(
                    &mut self.frame,
                    group,
                    value,
                    colors.for_digit(digit),
                    DIM_WHITE,
                    PixelOrder::Fixed,
                );
            } else if !visible {
                self.fill_pixels(group.pixels(), BLACK);
            } else if value == 0 {
                self.fill_pixels(group.pixels(), DIM_WHITE);
            } else {
                self.renderer.render(
                    &mut self.frame,
                    group,
                    value,
                    colors.for_digit(digit),
                    DIM_WHITE,
                    PixelOrder::Fixed,
                );
            }
        }
    }

    fn draw_color_preview(&mut self, scheme: ColorScheme) {
        let colors = scheme.colors();
        for digit in Digit::ALL {
            self.fill_pixels(digit.group().pixels(), colors.for_digit(digit));
        }
    }

    /// Boot screen: a "V" in the hour-ones color and the firmware version in the minute
    /// groups.
    pub fn draw_splash(&mut self, settings: &Settings) {
        let colors = settings.colors();
        self.frame.clear();
        self.fill_pixels(&LOGO_V, colors.hour_ones);
        self.renderer.render(
            &mut self.frame,
            Digit::MinuteTens.group(),
            VERSION_MAJOR,
            colors.minute_tens,
            BLACK,
            PixelOrder::Fixed,
        );
        self.renderer.render(
            &mut self.frame,
            Digit::MinuteOnes.group(),
            VERSION_MINOR,
            colors.minute_ones,
            BLACK,
            PixelOrder::Fixed,
        );
    }

    /// Every pixel red.
    pub fn draw_fatal(&mut self) {
        self.frame.fill(RED);
    }

    fn fill_pixels(&mut self, pixels: &[u8], color: Rgb) {
        for &pixel in pixels {
            self.frame.set_pixel(usize::from(pixel), color);
        }
    }
}

/// Digit values left to right, with the hour converted for display.
#[must_use]
pub const fn digit_values(time: TimeOfDay, military_time: bool) -> [u8; 4] {
    let hour = time.display_hour(military_time);
    [tens(hour), ones(hour), tens(time.minute()), ones(time.minute())]
}

const fn is_edited(field: TimeField, digit: Digit) -> bool {
    matches!(
        (field, digit),
        (TimeField::Hour, Digit::HourTens | Digit::HourOnes)
            | (TimeField::MinuteTens, Digit::MinuteTens)
            | (TimeField::MinuteOnes, Digit::MinuteOnes)
    )
}
