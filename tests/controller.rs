//! Control loop behavior against fake collaborators.
#![cfg(feature = "host")]

mod common;

use common::{FakeTimeSource, MemoryStorage, RecordingOutput, ScriptedI2c, at, time};
use tix_clock::Error;
use tix_clock::button::{Buttons, Gesture};
use tix_clock::controller::ClockController;
use tix_clock::digit_group::HOUR_TENS;
use tix_clock::ds3231::{DS3231_ADDRESS, Ds3231, registers};
use tix_clock::frame::{BLACK, Frame, RED, WHITE};
use tix_clock::menu::MenuPosition;
use tix_clock::settings::{Settings, UpdateInterval};
use tix_clock::time_of_day::{BUILD_TIME, TimeOfDay};

type Controller = ClockController<FakeTimeSource, RecordingOutput, MemoryStorage>;

fn started(time: TimeOfDay) -> Controller {
    let mut controller = Controller::new(
        FakeTimeSource::at(time),
        RecordingOutput::default(),
        MemoryStorage::default(),
        7,
        at(0),
    );
    controller.start(at(0)).expect("start");
    controller
}

fn assert_fatal(output: &RecordingOutput) {
    assert_eq!(output.brightness, u8::MAX);
    assert!(output.last().pixels().iter().all(|&pixel| pixel == RED));
}

fn lit(frame: &Frame) -> usize {
    frame.pixels().iter().filter(|&&pixel| pixel != BLACK).count()
}

fn press_set(gesture: Gesture) -> Buttons {
    Buttons {
        set: gesture,
        ..Buttons::IDLE
    }
}

fn press_up(gesture: Gesture) -> Buttons {
    Buttons {
        up: gesture,
        ..Buttons::IDLE
    }
}

#[test]
fn missing_time_source_is_reported_as_not_found() {
    let mut controller = Controller::new(
        FakeTimeSource {
            absent: true,
            ..FakeTimeSource::default()
        },
        RecordingOutput::default(),
        MemoryStorage::default(),
        7,
        at(0),
    );
    assert!(matches!(controller.start(at(0)), Err(Error::RtcNotFound)));
    assert_fatal(controller.output());
}

#[test]
fn unreadable_time_source_at_start_is_fatal() {
    let mut controller = Controller::new(
        FakeTimeSource {
            time: time(9, 0, 0),
            fail_reads_after: Some(0),
            ..FakeTimeSource::default()
        },
        RecordingOutput::default(),
        MemoryStorage::default(),
        7,
        at(0),
    );
    assert!(matches!(controller.start(at(0)), Err(Error::Rtc)));
    assert_fatal(controller.output());
}

#[test]
fn out_of_range_rtc_time_at_start_is_fatal() {
    let mut bus = ScriptedI2c::new(DS3231_ADDRESS);
    bus.registers[usize::from(registers::SECONDS)] = 0x75;
    let mut controller = ClockController::new(
        Ds3231::new(bus),
        RecordingOutput::default(),
        MemoryStorage::default(),
        7,
        at(0),
    );
    assert!(matches!(controller.start(at(0)), Err(Error::RtcInvalidData)));
    assert_fatal(controller.output());
}

#[test]
fn time_source_that_lost_power_gets_the_build_time() {
    let mut controller = Controller::new(
        FakeTimeSource {
            time: time(3, 3, 3),
            lost_power: true,
            ..FakeTimeSource::default()
        },
        RecordingOutput::default(),
        MemoryStorage::default(),
        7,
        at(0),
    );
    controller.start(at(0)).expect("start");
    assert_eq!(controller.time_source().writes, vec![BUILD_TIME]);
    assert_eq!(controller.time(), BUILD_TIME);
}

#[test]
fn start_applies_stored_brightness_and_initializes_blank_storage() {
    let controller = started(time(10, 42, 17));
    assert_eq!(controller.output().brightness_history, vec![50]);
    assert_eq!(controller.storage().writes, 1);
    assert_eq!(*controller.settings(), Settings::default());
}

#[test]
fn unreadable_storage_falls_back_to_defaults() {
    let mut controller = Controller::new(
        FakeTimeSource::at(time(1, 0, 0)),
        RecordingOutput::default(),
        MemoryStorage {
            fail: true,
            ..MemoryStorage::default()
        },
        7,
        at(0),
    );
    controller.start(at(0)).expect("start");
    assert_eq!(*controller.settings(), Settings::default());
}

#[test]
fn first_poll_draws_the_time_and_later_polls_wait_for_the_interval() {
    let mut controller = started(time(10, 42, 17));
    controller.poll(at(5), Buttons::IDLE);
    assert_eq!(controller.output().commits.len(), 1);
    // 1 + 0 + 4 + 2 pixels for 10:42.
    assert_eq!(lit(controller.output().last()), 7);

    controller.poll(at(2_000), Buttons::IDLE);
    assert_eq!(controller.output().commits.len(), 1);
    controller.poll(at(4_005), Buttons::IDLE);
    assert_eq!(controller.output().commits.len(), 2);
    assert_eq!(lit(controller.output().last()), 7);
}

#[test]
fn ticker_advances_the_clock_once_per_second() {
    let mut controller = started(time(10, 42, 58));
    controller.poll(at(999), Buttons::IDLE);
    assert_eq!(controller.time(), time(10, 42, 58));
    controller.poll(at(1_000), Buttons::IDLE);
    assert_eq!(controller.time(), time(10, 42, 59));
    controller.poll(at(2_000), Buttons::IDLE);
    assert_eq!(controller.time(), time(10, 43, 0));
}

#[test]
fn clock_resyncs_from_the_time_source_every_two_minutes() {
    let mut controller = Controller::new(
        FakeTimeSource {
            script: [time(10, 0, 0), time(10, 2, 30)].into(),
            ..FakeTimeSource::default()
        },
        RecordingOutput::default(),
        MemoryStorage::default(),
        7,
        at(0),
    );
    controller.start(at(0)).expect("start");
    assert_eq!(controller.time_source().reads, 1);
    controller.poll(at(119_999), Buttons::IDLE);
    assert_eq!(controller.time_source().reads, 1);

    controller.poll(at(120_000), Buttons::IDLE);
    assert_eq!(controller.time_source().reads, 2);
    assert_eq!(controller.time(), time(10, 2, 30));
}

#[test]
fn failed_resync_keeps_the_running_time() {
    let mut controller = Controller::new(
        FakeTimeSource {
            time: time(10, 0, 0),
            fail_reads_after: Some(1),
            ..FakeTimeSource::default()
        },
        RecordingOutput::default(),
        MemoryStorage::default(),
        7,
        at(0),
    );
    controller.start(at(0)).expect("start");
    for second in 1..=120 {
        controller.poll(at(second * 1_000), Buttons::IDLE);
    }
    assert_eq!(controller.time(), time(10, 2, 0));
    assert_eq!(controller.menu_position(), MenuPosition::Clock);
}

#[test]
fn resync_and_ticker_pause_while_editing_the_time() {
    let mut controller = started(time(10, 0, 0));
    controller.poll(at(110_000), press_set(Gesture::LongClick));
    assert_eq!(controller.menu_position(), MenuPosition::SetHour);
    let frozen = controller.time();

    controller.poll(at(120_000), Buttons::IDLE);
    assert_eq!(controller.time_source().reads, 1);
    assert_eq!(controller.time(), frozen);
}

#[test]
fn editing_the_time_writes_it_with_zero_seconds() {
    let mut controller = started(time(10, 42, 17));
    controller.poll(at(5), Buttons::IDLE);
    controller.poll(at(100), press_set(Gesture::LongClick));
    controller.poll(at(200), press_up(Gesture::Clicks(1)));
    controller.poll(at(300), press_set(Gesture::Clicks(1)));
    controller.poll(at(400), press_set(Gesture::Clicks(1)));
    controller.poll(at(500), press_set(Gesture::Clicks(1)));
    assert_eq!(controller.menu_position(), MenuPosition::CommitTime);

    let commits_before = controller.output().commits.len();
    controller.poll(at(505), Buttons::IDLE);
    assert_eq!(controller.menu_position(), MenuPosition::Clock);
    assert_eq!(controller.time_source().writes, vec![time(11, 42, 0)]);
    // The clock redraws right away: 1 + 1 + 4 + 2 pixels for 11:42.
    assert_eq!(controller.output().commits.len(), commits_before + 1);
    assert_eq!(lit(controller.output().last()), 8);
}

#[test]
fn committed_time_starts_a_fresh_second() {
    let mut controller = started(time(10, 42, 17));
    controller.poll(at(5), Buttons::IDLE);
    controller.poll(at(100), press_set(Gesture::LongClick));
    controller.poll(at(2_000), press_set(Gesture::Clicks(1)));
    controller.poll(at(3_000), press_set(Gesture::Clicks(1)));
    controller.poll(at(4_000), press_set(Gesture::Clicks(1)));
    controller.poll(at(4_005), Buttons::IDLE);
    assert_eq!(controller.time(), time(10, 42, 0));

    controller.poll(at(4_100), Buttons::IDLE);
    assert_eq!(controller.time(), time(10, 42, 0));
    controller.poll(at(5_004), Buttons::IDLE);
    assert_eq!(controller.time(), time(10, 42, 0));
    controller.poll(at(5_005), Buttons::IDLE);
    assert_eq!(controller.time(), time(10, 42, 1));
}

#[test]
fn brightness_press_is_applied_and_saved() {
    let mut controller = started(time(10, 42, 17));
    controller.poll(at(5), Buttons::IDLE);
    controller.poll(at(100), press_up(Gesture::Clicks(1)));
    assert_eq!(controller.output().brightness, 100);
    assert_eq!(controller.storage().writes, 2);

    let mut storage = MemoryStorage {
        bytes: controller.storage().bytes,
        ..MemoryStorage::default()
    };
    let reloaded = Settings::load_or_initialize(&mut storage).expect("load");
    assert_eq!(reloaded.brightness.get(), 100);
}

#[test]
fn interval_screen_shows_the_selection_on_hour_tens() {
    let mut controller = started(time(10, 42, 17));
    controller.poll(at(5), Buttons::IDLE);
    controller.poll(at(100), press_up(Gesture::LongClick));
    assert_eq!(controller.menu_position(), MenuPosition::SetInterval);

    controller.poll(at(105), Buttons::IDLE);
    let frame = *controller.output().last();
    assert_eq!(lit(&frame), 2);
    let white_in_group = HOUR_TENS
        .pixels()
        .iter()
        .filter(|&&index| frame.pixel(usize::from(index)) == WHITE)
        .count();
    assert_eq!(white_in_group, 2);

    controller.poll(at(200), press_up(Gesture::Clicks(1)));
    assert_eq!(controller.settings().update_interval, UpdateInterval::Slow);
    assert_eq!(lit(controller.output().last()), 3);
}

#[test]
fn splash_then_blank() {
    let mut controller = started(time(1, 2, 3));
    controller.show_splash();
    assert!(lit(controller.output().last()) > 0);
    controller.blank();
    assert_eq!(lit(controller.output().last()), 0);
}
