//! Pixels drawn for the menu screens.
#![cfg(feature = "host")]

mod common;

use common::time;
use tix_clock::constants::LED_COUNT;
use tix_clock::digit_group::{DigitGroup, HOUR_ONES, HOUR_TENS, MINUTE_ONES, MINUTE_TENS};
use tix_clock::display::ClockFace;
use tix_clock::frame::{BLACK, BLUE, DIM_WHITE, Frame, GREEN, PURPLE, RED, Rgb};
use tix_clock::menu::{RenderRequest, TimeField};
use tix_clock::settings::{ColorScheme, Settings};

/// Colors of a group's pixels in group order.
fn group_colors(frame: &Frame, group: DigitGroup) -> Vec<Rgb> {
    group
        .pixels()
        .iter()
        .map(|&index| frame.pixel(usize::from(index)))
        .collect()
}

/// `lit` pixels of `color` then the rest in `background`, as a fixed-order render draws them.
fn fixed(group: DigitGroup, lit: usize, color: Rgb, background: Rgb) -> Vec<Rgb> {
    (0..group.len())
        .map(|position| if position < lit { color } else { background })
        .collect()
}

fn edit_minute_ones(face: &mut ClockFace, hour: u8, minute: u8, visible: bool) -> Frame {
    face.draw_request(
        RenderRequest::EditTime {
            field: TimeField::MinuteOnes,
            visible,
        },
        time(hour, minute, 0),
        &Settings::default(),
    );
    *face.frame()
}

#[test]
fn steady_digits_sit_on_dim_white_and_hidden_field_is_black() {
    let mut face = ClockFace::new(1);
    let frame = edit_minute_ones(&mut face, 5, 30, false);

    assert_eq!(group_colors(&frame, HOUR_TENS), fixed(HOUR_TENS, 0, RED, DIM_WHITE));
    assert_eq!(group_colors(&frame, HOUR_ONES), fixed(HOUR_ONES, 5, GREEN, DIM_WHITE));
    assert_eq!(group_colors(&frame, MINUTE_TENS), fixed(MINUTE_TENS, 3, BLUE, DIM_WHITE));
    assert_eq!(group_colors(&frame, MINUTE_ONES), fixed(MINUTE_ONES, 0, BLACK, BLACK));
}

#[test]
fn visible_zero_field_fills_its_group_dim_white() {
    let mut face = ClockFace::new(1);
    let frame = edit_minute_ones(&mut face, 5, 30, true);

    assert_eq!(group_colors(&frame, MINUTE_ONES), fixed(MINUTE_ONES, 0, PURPLE, DIM_WHITE));
    assert_eq!(group_colors(&frame, HOUR_ONES), fixed(HOUR_ONES, 5, GREEN, DIM_WHITE));
}

#[test]
fn visible_field_shows_its_digit_over_dim_white() {
    let mut face = ClockFace::new(1);
    let frame = edit_minute_ones(&mut face, 5, 37, true);
    assert_eq!(group_colors(&frame, MINUTE_ONES), fixed(MINUTE_ONES, 7, PURPLE, DIM_WHITE));

    let frame = edit_minute_ones(&mut face, 5, 37, false);
    assert_eq!(group_colors(&frame, MINUTE_ONES), fixed(MINUTE_ONES, 0, BLACK, BLACK));
}

#[test]
fn hour_edit_blanks_both_hour_groups() {
    let mut face = ClockFace::new(1);
    face.draw_request(
        RenderRequest::EditTime {
            field: TimeField::Hour,
            visible: false,
        },
        time(17, 30, 0),
        &Settings::default(),
    );
    let frame = *face.frame();
    assert_eq!(group_colors(&frame, HOUR_TENS), fixed(HOUR_TENS, 0, BLACK, BLACK));
    assert_eq!(group_colors(&frame, HOUR_ONES), fixed(HOUR_ONES, 0, BLACK, BLACK));
    assert_eq!(group_colors(&frame, MINUTE_TENS), fixed(MINUTE_TENS, 3, BLUE, DIM_WHITE));
}

#[test]
fn color_preview_lights_every_pixel_in_the_scheme_colors() {
    let mut face = ClockFace::new(1);
    face.clear();
    face.draw_request(
        RenderRequest::ColorPreview(ColorScheme::Christmas),
        time(5, 30, 0),
        &Settings::default(),
    );
    let frame = *face.frame();

    assert!((0..LED_COUNT).all(|index| !frame.is_off(index)));
    assert_eq!(group_colors(&frame, HOUR_TENS), fixed(HOUR_TENS, 3, RED, RED));
    assert_eq!(group_colors(&frame, HOUR_ONES), fixed(HOUR_ONES, 9, GREEN, GREEN));
    assert_eq!(group_colors(&frame, MINUTE_TENS), fixed(MINUTE_TENS, 6, RED, RED));
    assert_eq!(group_colors(&frame, MINUTE_ONES), fixed(MINUTE_ONES, 9, GREEN, GREEN));
}
