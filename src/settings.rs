//! User-adjustable settings: refresh interval, brightness, 12/24-hour mode and color scheme.
//!
//! Settings live in memory as [`Settings`] and on storage as a
//! [`SettingsRecord`](crate::settings_store::SettingsRecord). Converting a record back into
//! settings re-validates every field, so a hand-edited or stale record can never put the
//! clock into a state the menu could not reach.

use embassy_time::Duration;

use crate::constants::{BRIGHTNESS_MAX, BRIGHTNESS_MIN, BRIGHTNESS_STEP};
use crate::digit_group::Digit;
use crate::frame::{BLUE, GREEN, PURPLE, RED, Rgb, WHITE, YELLOW, rgb};
use crate::settings_store::{RecordStorage, SettingsRecord, decode_record, encode_record};
use crate::Result;

/// How often the clock face is reshuffled while showing the time.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum UpdateInterval {
    /// Every second.
    Fast,
    /// Every four seconds.
    #[default]
    Medium,
    /// Every minute.
    Slow,
}

impl UpdateInterval {
    #[must_use]
    pub const fn as_millis(self) -> u32 {
        match self {
            Self::Fast => 1_000,
            Self::Medium => 4_000,
            Self::Slow => 60_000,
        }
    }

    #[must_use]
    pub const fn duration(self) -> Duration {
        Duration::from_millis(self.as_millis() as u64)
    }

    /// Parses a stored interval; anything but the three supported values is `None`.
    #[must_use]
    pub const fn from_millis(millis: u32) -> Option<Self> {
        match millis {
            1_000 => Some(Self::Fast),
            4_000 => Some(Self::Medium),
            60_000 => Some(Self::Slow),
            _ => None,
        }
    }

    /// Up on the interval screen.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Fast => Self::Medium,
            Self::Medium => Self::Slow,
            Self::Slow => Self::Fast,
        }
    }

    /// Lit pixels on the interval screen: 1 fast, 2 medium, 3 slow.
    #[must_use]
    pub const fn indicator(self) -> u8 {
        match self {
            Self::Fast => 1,
            Self::Medium => 2,
            Self::Slow => 3,
        }
    }
}

/// Global strip brightness, always one of 50, 100, 150, 200, 250.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Brightness(u8);

impl Default for Brightness {
    fn default() -> Self {
        Self::MIN
    }
}

impl Brightness {
    pub const MIN: Self = Self(BRIGHTNESS_MIN);
    pub const MAX: Self = Self(BRIGHTNESS_MAX);

    /// Clamps a stored value: anything outside `[MIN, MAX]` becomes `MIN`.
    #[must_use]
    pub const fn new(value: u8) -> Self {
        if value >= BRIGHTNESS_MIN && value <= BRIGHTNESS_MAX {
            Self(value)
        } else {
            Self::MIN
        }
    }

    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }

    /// One step brighter, wrapping from the top back to `MIN`.
    #[must_use]
    pub const fn cycle(self) -> Self {
        match self.0.checked_add(BRIGHTNESS_STEP) {
            Some(value) => Self::new(value),
            None => Self::MIN,
        }
    }
}

/// The four colors a scheme assigns, one per digit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DigitColors {
    pub hour_tens: Rgb,
    pub hour_ones: Rgb,
    pub minute_tens: Rgb,
    pub minute_ones: Rgb,
}

impl DigitColors {
    #[must_use]
    pub const fn new(hour_tens: Rgb, hour_ones: Rgb, minute_tens: Rgb, minute_ones: Rgb) -> Self {
        Self {
            hour_tens,
            hour_ones,
            minute_tens,
            minute_ones,
        }
    }

    #[must_use]
    pub const fn for_digit(&self, digit: Digit) -> Rgb {
        match digit {
            Digit::HourTens => self.hour_tens,
            Digit::HourOnes => self.hour_ones,
            Digit::MinuteTens => self.minute_tens,
            Digit::MinuteOnes => self.minute_ones,
        }
    }
}

/// Named palettes, selectable from the color menu.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum ColorScheme {
    #[default]
    Classic = 0,
    TixII = 1,
    GreenYellow = 2,
    RedOrange = 3,
    PurpleBlue = 4,
    Christmas = 5,
    Hanukkah = 6,
}

impl ColorScheme {
    pub const COUNT: u8 = 7;

    /// Maps a stored index to a scheme; unknown indices fall back to [`ColorScheme::Classic`].
    #[must_use]
    pub const fn from_index(index: u8) -> Self {
        match index {
            1 => Self::TixII,
            2 => Self::GreenYellow,
            3 => Self::RedOrange,
            4 => Self::PurpleBlue,
            5 => Self::Christmas,
            6 => Self::Hanukkah,
            _ => Self::Classic,
        }
    }

    #[must_use]
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// Down on the color screen, wrapping after the last scheme.
    #[must_use]
    pub const fn next(self) -> Self {
        Self::from_index(self.index().wrapping_add(1))
    }

    #[must_use]
    pub const fn colors(self) -> DigitColors {
        match self {
            Self::Classic => DigitColors::new(RED, GREEN, BLUE, PURPLE),
            Self::TixII => DigitColors::new(BLUE, YELLOW, PURPLE, GREEN),
            Self::GreenYellow => {
                DigitColors::new(rgb(13, 175, 186), GREEN, rgb(154, 255, 50), YELLOW)
            }
            Self::RedOrange => DigitColors::new(RED, rgb(255, 69, 0), rgb(255, 140, 0), YELLOW),
            Self::PurpleBlue => DigitColors::new(
                rgb(129, 13, 112),
                rgb(73, 29, 118),
                rgb(23, 46, 124),
                rgb(13, 175, 186),
            ),
            Self::Christmas => DigitColors::new(RED, GREEN, RED, GREEN),
            Self::Hanukkah => DigitColors::new(WHITE, BLUE, WHITE, BLUE),
        }
    }
}

/// Everything the user can change from the menu.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Settings {
    pub update_interval: UpdateInterval,
    pub brightness: Brightness,
    pub military_time: bool,
    pub color_scheme: ColorScheme,
}

impl Settings {
    /// Reads settings from `storage`.
    ///
    /// A region that was never saved (or no longer checks out) is overwritten with the
    /// defaults, which are returned. A valid record is loaded and clamped.
    ///
    /// # Errors
    ///
    /// Returns the storage error if the region cannot be read, or if writing the defaults
    /// fails.
    pub fn load_or_initialize(storage: &mut impl RecordStorage) -> Result<Self> {
        let bytes = storage.read_record()?;
        if let Some(record) = decode_record(&bytes) {
            let settings = Self::from(record);
            info!("Settings: loaded {}", settings);
            return Ok(settings);
        }

        let settings = Self::default();
        info!("Settings: writing defaults");
        settings.save(storage)?;
        Ok(settings)
    }

    /// Writes these settings to `storage`.
    ///
    /// # Errors
    ///
    /// Returns an error if the record cannot be encoded or written.
    pub fn save(&self, storage: &mut impl RecordStorage) -> Result<()> {
        let bytes = encode_record(&SettingsRecord::from(*self))?;
        storage.write_record(&bytes)?;
        debug!("Settings: saved {}", *self);
        Ok(())
    }

    /// Colors of the current scheme.
    #[must_use]
    pub const fn colors(&self) -> DigitColors {
        self.color_scheme.colors()
    }

    pub const fn toggle_military_time(&mut self) {
        self.military_time = !self.military_time;
    }

    pub const fn cycle_brightness(&mut self) {
        self.brightness = self.brightness.cycle();
    }

    pub const fn cycle_update_interval(&mut self) {
        self.update_interval = self.update_interval.next();
    }

    pub const fn cycle_color_scheme(&mut self) {
        self.color_scheme = self.color_scheme.next();
    }
}

impl From<Settings> for SettingsRecord {
    fn from(settings: Settings) -> Self {
        Self {
            update_interval_ms: settings.update_interval.as_millis(),
            brightness: settings.brightness.get(),
            military_time: settings.military_time,
            color_scheme: settings.color_scheme.index(),
        }
    }
}

impl From<SettingsRecord> for Settings {
    fn from(record: SettingsRecord) -> Self {
        let update_interval =
            UpdateInterval::from_millis(record.update_interval_ms).unwrap_or_else(|| {
                warn!(
                    "Settings: unknown interval {} ms, using default",
                    record.update_interval_ms
                );
                UpdateInterval::default()
            });
        let brightness = Brightness::new(record.brightness);
        if brightness.get() != record.brightness {
            warn!(
                "Settings: brightness {} out of range, using {}",
                record.brightness,
                brightness.get()
            );
        }
        if record.color_scheme >= ColorScheme::COUNT {
            warn!(
                "Settings: unknown color scheme {}, using default",
                record.color_scheme
            );
        }
        Self {
            update_interval,
            brightness,
            military_time: record.military_time,
            color_scheme: ColorScheme::from_index(record.color_scheme),
        }
    }
}
