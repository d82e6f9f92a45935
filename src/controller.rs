//! The control loop body: ticking, resyncing, menu handling and redraws.
//!
//! [`ClockController`] owns all clock state and its three collaborators. The firmware
//! calls [`ClockController::poll`] every few milliseconds with the sampled buttons; host
//! tests drive it with fake collaborators and explicit instants.

use embassy_time::Instant;

use crate::button::Buttons;
use crate::constants::{ONE_SECOND, RTC_RESYNC_INTERVAL};
use crate::display::ClockFace;
use crate::frame::PixelOutput;
use crate::menu::{Effect, Menu, MenuPosition};
use crate::settings::Settings;
use crate::settings_store::RecordStorage;
use crate::time_of_day::{BUILD_TIME, TimeOfDay};
use crate::time_source::TimeSource;
use crate::{Error, Result};

/// When the periodic jobs last ran.
#[derive(Clone, Copy, Debug)]
struct Schedule {
    last_tick: Instant,
    last_resync: Instant,
    /// `None` until the first clock render, and after anything that requests a refresh.
    last_display: Option<Instant>,
}

/// Single owner of the clock's state and collaborators.
pub struct ClockController<T, P, S> {
    time_source: T,
    output: P,
    storage: S,
    time: TimeOfDay,
    menu: Menu,
    settings: Settings,
    face: ClockFace,
    schedule: Schedule,
}

impl<T: TimeSource, P: PixelOutput, S: RecordStorage> ClockController<T, P, S> {
    /// A controller showing the clock at midnight with default settings. Call
    /// [`ClockController::start`] before polling.
    pub fn new(time_source: T, output: P, storage: S, seed: u64, now: Instant) -> Self {
        Self {
            time_source,
            output,
            storage,
            time: TimeOfDay::MIDNIGHT,
            menu: Menu::new(now),
            settings: Settings::default(),
            face: ClockFace::new(seed),
            schedule: Schedule {
                last_tick: now,
                last_resync: now,
                last_display: None,
            },
        }
    }

    /// Loads settings, checks the time source and takes the time from it.
    ///
    /// A settings store that cannot be read leaves the defaults in place. A time source
    /// that lost power is reseeded with the firmware build time. Any time-source failure
    /// is fatal: the strip is lit red before the error is returned.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RtcNotFound`] if the time source does not respond, or the time
    /// source's error if it cannot be read or reseeded.
    pub fn start(&mut self, now: Instant) -> Result<()> {
        match Settings::load_or_initialize(&mut self.storage) {
            Ok(settings) => self.settings = settings,
            Err(err) => warn!("Settings unavailable, using defaults: {}", err),
        }
        self.output.set_brightness(self.settings.brightness.get());

        if let Err(err) = self.sync_time_source() {
            error!("Time source failed at startup: {}", err);
            self.show_fatal_error();
            return Err(err);
        }

        self.menu = Menu::new(now);
        self.schedule = Schedule {
            last_tick: now,
            last_resync: now,
            last_display: None,
        };
        Ok(())
    }

    fn sync_time_source(&mut self) -> Result<()> {
        let lost_power = self
            .time_source
            .lost_power()
            .map_err(|_| Error::RtcNotFound)?;
        if lost_power {
            warn!("Time source lost power, setting it to the build time");
            self.time_source.set(BUILD_TIME)?;
        }

        self.time = self.time_source.now()?;
        info!(
            "Started at {}:{}:{}",
            self.time.hour(),
            self.time.minute(),
            self.time.second()
        );
        Ok(())
    }

    /// Shows the boot splash. The caller holds it and then calls [`ClockController::blank`].
    pub fn show_splash(&mut self) {
        self.face.draw_splash(&self.settings);
        self.output.commit(self.face.frame());
    }

    /// Blanks the strip.
    pub fn blank(&mut self) {
        self.face.clear();
        self.output.commit(self.face.frame());
    }

    /// Lights the whole strip red at full brightness.
    pub fn show_fatal_error(&mut self) {
        self.output.set_brightness(u8::MAX);
        self.face.draw_fatal();
        self.output.commit(self.face.frame());
    }

    /// One control-loop iteration.
    ///
    /// Time-source and storage failures are logged and the clock keeps running from memory.
    pub fn poll(&mut self, now: Instant, buttons: Buttons) {
        let position = self.menu.position();
        if !position.is_time_edit() {
            self.tick(now);
        }
        if position.is_clock() {
            self.resync_if_due(now);
        }

        let effects = self
            .menu
            .step(&mut self.time, &mut self.settings, buttons, now);
        for effect in effects {
            self.apply(effect, now);
        }

        if self.menu.position().is_clock() && self.display_due(now) {
            self.schedule.last_display = Some(now);
            debug!("Display {}:{}", self.time.hour(), self.time.minute());
            self.face.draw_time(self.time, &self.settings);
            self.output.commit(self.face.frame());
        }
    }

    fn tick(&mut self, now: Instant) {
        if now.saturating_duration_since(self.schedule.last_tick) >= ONE_SECOND {
            self.schedule.last_tick = now;
            self.time.advance_one_second();
        }
    }

    fn resync_if_due(&mut self, now: Instant) {
        if now.saturating_duration_since(self.schedule.last_resync) < RTC_RESYNC_INTERVAL {
            return;
        }
        self.schedule.last_resync = now;
        match self.time_source.now() {
            Ok(time) => {
                debug!(
                    "Resync {}:{}:{}",
                    time.hour(),
                    time.minute(),
                    time.second()
                );
                self.time = time;
            }
            Err(err) => warn!("Resync failed, keeping {}: {}", self.time, err),
        }
    }

    fn display_due(&self, now: Instant) -> bool {
        self.schedule.last_display.is_none_or(|last| {
            now.saturating_duration_since(last) >= self.settings.update_interval.duration()
        })
    }

    fn apply(&mut self, effect: Effect, now: Instant) {
        match effect {
            Effect::Render(request) => {
                self.face.draw_request(request, self.time, &self.settings);
                self.output.commit(self.face.frame());
            }
            Effect::SaveSettings => {
                if let Err(err) = self.settings.save(&mut self.storage) {
                    warn!("Saving settings failed: {}", err);
                }
            }
            Effect::WriteTime(time) => {
                // The committed second starts now.
                self.schedule.last_tick = now;
                match self.time_source.set(time) {
                    Ok(()) => info!(
                        "Time set to {}:{}:{}",
                        time.hour(),
                        time.minute(),
                        time.second()
                    ),
                    Err(err) => warn!("Writing time failed: {}", err),
                }
            }
            Effect::ApplyBrightness(brightness) => {
                self.output.set_brightness(brightness);
                self.output.commit(self.face.frame());
            }
            Effect::ClearDisplay => self.face.clear(),
            Effect::RefreshClock => self.schedule.last_display = None,
        }
    }

    #[must_use]
    pub const fn time(&self) -> TimeOfDay {
        self.time
    }

    #[must_use]
    pub const fn settings(&self) -> &Settings {
        &self.settings
    }

    #[must_use]
    pub const fn menu_position(&self) -> MenuPosition {
        self.menu.position()
    }

    #[must_use]
    pub const fn time_source(&self) -> &T {
        &self.time_source
    }

    #[must_use]
    pub const fn output(&self) -> &P {
        &self.output
    }

    #[must_use]
    pub const fn storage(&self) -> &S {
        &self.storage
    }
}
