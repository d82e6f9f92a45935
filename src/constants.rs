use embassy_time::Duration;

/// The number of WS2812 pixels on the clock face.
pub const LED_COUNT: usize = 27;

/// Firmware version shown on the boot splash (major in the minute-tens group, minor in the
/// minute-ones group).
pub const VERSION_MAJOR: u8 = 1;
pub const VERSION_MINOR: u8 = 0;

/// Duration representing one second.
/// The internal time model advances once per elapsed second.
pub const ONE_SECOND: Duration = Duration::from_secs(1);

/// How often the in-memory time is overwritten from the real-time clock.
pub const RTC_RESYNC_INTERVAL: Duration = Duration::from_secs(120);

/// Half-period of the blinking field while editing the time.
/// Also throttles redraws of the interval and color menus.
pub const BLINK_INTERVAL: Duration = Duration::from_millis(333);

/// Inactivity after which an open menu saves what was edited and returns to the clock.
pub const MENU_TIMEOUT: Duration = Duration::from_secs(20);

/// Sleep between control-loop iterations.
pub const LOOP_PERIOD: Duration = Duration::from_millis(5);

/// How long the version splash stays up at boot.
pub const SPLASH_DURATION: Duration = Duration::from_millis(3000);

/// Blank pause after the splash.
pub const SPLASH_BLANK_DURATION: Duration = Duration::from_millis(500);

/// Debounce delay for the buttons.
/// Level changes shorter than this are treated as contact bounce.
pub const BUTTON_DEBOUNCE_DELAY: Duration = Duration::from_millis(30);

/// Clicks separated by less than this are counted as one multi-click gesture.
pub const MULTI_CLICK_WINDOW: Duration = Duration::from_millis(50);

/// Duration representing a long button press.
/// Holding a button this long reports a long click instead of a short one.
pub const LONG_PRESS_DURATION: Duration = Duration::from_millis(1000);

/// Lowest strip brightness (out of 255); also the value cycling wraps back to.
pub const BRIGHTNESS_MIN: u8 = 50;

/// Highest strip brightness (out of 255).
pub const BRIGHTNESS_MAX: u8 = 250;

/// Brightness added by each short press of Up on the clock screen.
pub const BRIGHTNESS_STEP: u8 = 50;

/// Attempts the digit renderer makes to find a shuffle that lights a dark pixel.
pub const MAX_SHUFFLE_ATTEMPTS: u8 = 100;
