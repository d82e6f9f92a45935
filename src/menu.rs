//! Button-driven menu for setting the time and the display options.
//!
//! The menu is a fixed sequence of positions. [`Menu::step`] runs the handler for the
//! current position once per control-loop iteration and returns the [`Effect`]s the
//! controller must carry out: redraws, persistence, writes to the time source.
//!
//! | position | screen          | Set                     | Up                      | Down          |
//! |----------|-----------------|-------------------------|-------------------------|---------------|
//! | 0        | clock           | 12/24 h; long: set time | brightness; long: 5     | long: 7       |
//! | 1        | set hour        | next                    | hour +1                 | hour -1       |
//! | 2        | set minute tens | next                    | minute +10              | minute -10    |
//! | 3        | set minute ones | save time               | ones +1                 | ones -1       |
//! | 4        | save time       |                         |                         |               |
//! | 5        | set interval    | save interval           | next; long: save        |               |
//! | 6        | save interval   |                         |                         |               |
//! | 7        | set color       | save color              |                         | next scheme   |
//! | 8        | save color      |                         |                         |               |
//!
//! Editing screens fall through to their save position after [`MENU_TIMEOUT`] without a
//! button press. Save positions last one iteration and return to the clock.

use embassy_time::Instant;
use heapless::Vec;

use crate::button::Buttons;
use crate::constants::{BLINK_INTERVAL, MENU_TIMEOUT};
use crate::settings::{ColorScheme, Settings, UpdateInterval};
use crate::time_of_day::TimeOfDay;

/// Most effects a single step can produce.
pub const MAX_EFFECTS: usize = 4;

/// The effects of one step, in the order they must be applied.
pub type Effects = Vec<Effect, MAX_EFFECTS>;

/// Menu positions, in the order Set walks through them.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum MenuPosition {
    #[default]
    Clock = 0,
    SetHour = 1,
    SetMinuteTens = 2,
    SetMinuteOnes = 3,
    CommitTime = 4,
    SetInterval = 5,
    CommitInterval = 6,
    SetColorScheme = 7,
    CommitColor = 8,
}

impl MenuPosition {
    #[must_use]
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// The position a short Set press moves to. Past the last position the menu closes.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Clock => Self::SetHour,
            Self::SetHour => Self::SetMinuteTens,
            Self::SetMinuteTens => Self::SetMinuteOnes,
            Self::SetMinuteOnes => Self::CommitTime,
            Self::CommitTime => Self::SetInterval,
            Self::SetInterval => Self::CommitInterval,
            Self::CommitInterval => Self::SetColorScheme,
            Self::SetColorScheme => Self::CommitColor,
            Self::CommitColor => Self::Clock,
        }
    }

    /// Positions 1 through 4, during which the ticker must not move the time being edited.
    #[must_use]
    pub const fn is_time_edit(self) -> bool {
        matches!(
            self,
            Self::SetHour | Self::SetMinuteTens | Self::SetMinuteOnes | Self::CommitTime
        )
    }

    #[must_use]
    pub const fn is_clock(self) -> bool {
        matches!(self, Self::Clock)
    }
}

/// The part of the time a time-setting screen edits.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TimeField {
    /// Both hour digits.
    Hour,
    MinuteTens,
    MinuteOnes,
}

impl TimeField {
    fn increment(self, time: &mut TimeOfDay) {
        match self {
            Self::Hour => time.increment_hour(),
            Self::MinuteTens => time.increment_minute_tens(),
            Self::MinuteOnes => time.increment_minute_ones(),
        }
    }

    fn decrement(self, time: &mut TimeOfDay) {
        match self {
            Self::Hour => time.decrement_hour(),
            Self::MinuteTens => time.decrement_minute_tens(),
            Self::MinuteOnes => time.decrement_minute_ones(),
        }
    }
}

/// A screen the controller must draw and commit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RenderRequest {
    /// The time over a dim background, with `field` shown only when `visible`.
    EditTime { field: TimeField, visible: bool },
    /// One to three white pixels in the hour-tens group.
    IntervalSelector(UpdateInterval),
    /// Every digit group fully lit in the scheme's colors.
    ColorPreview(ColorScheme),
}

/// Something the controller must do on behalf of the menu.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Effect {
    Render(RenderRequest),
    /// Persist the current settings.
    SaveSettings,
    /// Set the time source to this time.
    WriteTime(TimeOfDay),
    /// Apply a new global brightness to the strip.
    ApplyBrightness(u8),
    /// Blank the frame buffer without committing.
    ClearDisplay,
    /// Redraw the clock face on this iteration instead of waiting for the update interval.
    RefreshClock,
}

/// Blink timing for the field being edited.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct Blink {
    phase: bool,
    last_toggle: Option<Instant>,
}

impl Blink {
    /// Hidden, and due for a toggle on the next check.
    const fn reset(&mut self) {
        self.phase = false;
        self.last_toggle = None;
    }

    /// Toggles the phase if a blink interval has passed and returns whether it did.
    fn toggle_if_due(&mut self, now: Instant) -> bool {
        let due = self
            .last_toggle
            .is_none_or(|last| now.saturating_duration_since(last) >= BLINK_INTERVAL);
        if due {
            self.phase = !self.phase;
            self.last_toggle = Some(now);
        }
        due
    }
}

/// Where the next step goes and what it asks for.
struct Transition {
    next: MenuPosition,
    effects: Effects,
}

impl Transition {
    fn stay(position: MenuPosition) -> Self {
        Self::to(position)
    }

    fn to(next: MenuPosition) -> Self {
        Self {
            next,
            effects: Vec::new(),
        }
    }

    fn with(mut self, effect: Effect) -> Self {
        if self.effects.push(effect).is_err() {
            warn!("Menu: effect list full, dropping {}", effect);
        }
        self
    }
}

/// Menu position plus the timers that drive its timeout and blinking.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Menu {
    position: MenuPosition,
    last_action: Instant,
    blink: Blink,
}

impl Menu {
    /// A menu showing the clock.
    #[must_use]
    pub fn new(now: Instant) -> Self {
        Self {
            position: MenuPosition::Clock,
            last_action: now,
            blink: Blink::default(),
        }
    }

    #[must_use]
    pub const fn position(&self) -> MenuPosition {
        self.position
    }

    /// Whether the edited field is currently shown.
    #[must_use]
    pub const fn blink_phase(&self) -> bool {
        self.blink.phase
    }

    /// Runs the handler for the current position with this iteration's gestures.
    ///
    /// Edits `time` and `settings` in place and returns the effects for the controller.
    pub fn step(
        &mut self,
        time: &mut TimeOfDay,
        settings: &mut Settings,
        buttons: Buttons,
        now: Instant,
    ) -> Effects {
        let transition = match self.position {
            MenuPosition::Clock => self.execute_clock(settings, buttons, now),
            MenuPosition::SetHour => self.execute_edit_time(TimeField::Hour, time, buttons, now),
            MenuPosition::SetMinuteTens => {
                self.execute_edit_time(TimeField::MinuteTens, time, buttons, now)
            }
            MenuPosition::SetMinuteOnes => {
                self.execute_edit_time(TimeField::MinuteOnes, time, buttons, now)
            }
            MenuPosition::CommitTime => Self::execute_commit_time(time),
            MenuPosition::SetInterval => self.execute_set_interval(settings, buttons, now),
            MenuPosition::SetColorScheme => self.execute_set_color_scheme(settings, buttons, now),
            MenuPosition::CommitInterval | MenuPosition::CommitColor => {
                Self::execute_commit_settings(self.position)
            }
        };

        if transition.next != self.position {
            info!(
                "Menu: {} -> {}",
                self.position.index(),
                transition.next.index()
            );
            self.enter(transition.next, now);
        }
        transition.effects
    }

    fn enter(&mut self, position: MenuPosition, now: Instant) {
        self.position = position;
        self.last_action = now;
        self.blink.reset();
    }

    fn timed_out(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.last_action) >= MENU_TIMEOUT
    }

    /// Registers a button press on an editing screen: restarts the timeout and shows the
    /// edited field right away.
    const fn touch(&mut self, now: Instant) {
        self.last_action = now;
        self.blink.reset();
    }

    fn execute_clock(
        &mut self,
        settings: &mut Settings,
        buttons: Buttons,
        now: Instant,
    ) -> Transition {
        if buttons.set.is_long() {
            return Transition::to(MenuPosition::SetHour);
        }
        if buttons.up.is_long() {
            return Transition::to(MenuPosition::SetInterval).with(Effect::ClearDisplay);
        }
        if buttons.down.is_long() {
            return Transition::to(MenuPosition::SetColorScheme).with(Effect::ClearDisplay);
        }

        let mut transition = Transition::stay(MenuPosition::Clock);
        if buttons.set.is_short() {
            settings.toggle_military_time();
            info!("Military time: {}", settings.military_time);
            transition = transition
                .with(Effect::SaveSettings)
                .with(Effect::RefreshClock);
        }
        if buttons.up.is_short() {
            settings.cycle_brightness();
            info!("Brightness set to {}", settings.brightness.get());
            transition = transition
                .with(Effect::ApplyBrightness(settings.brightness.get()))
                .with(Effect::SaveSettings);
        }
        self.last_action = now;
        transition
    }

    fn execute_edit_time(
        &mut self,
        field: TimeField,
        time: &mut TimeOfDay,
        buttons: Buttons,
        now: Instant,
    ) -> Transition {
        if buttons.set.is_short() {
            return Transition::to(self.position.next());
        }
        if buttons.up.is_short() {
            field.increment(time);
            self.touch(now);
            debug!("Edit {}: {}:{}", field, time.hour(), time.minute());
        }
        if buttons.down.is_short() {
            field.decrement(time);
            self.touch(now);
            debug!("Edit {}: {}:{}", field, time.hour(), time.minute());
        }
        if self.timed_out(now) {
            return Transition::to(MenuPosition::CommitTime);
        }

        let transition = Transition::stay(self.position);
        if self.blink.toggle_if_due(now) {
            transition.with(Effect::Render(RenderRequest::EditTime {
                field,
                visible: self.blink.phase,
            }))
        } else {
            transition
        }
    }

    fn execute_commit_time(time: &mut TimeOfDay) -> Transition {
        *time = time.with_zero_second();
        Transition::to(MenuPosition::Clock)
            .with(Effect::WriteTime(*time))
            .with(Effect::ClearDisplay)
            .with(Effect::RefreshClock)
    }

    fn execute_set_interval(
        &mut self,
        settings: &mut Settings,
        buttons: Buttons,
        now: Instant,
    ) -> Transition {
        if buttons.set.is_short() || buttons.up.is_long() {
            return Transition::to(MenuPosition::CommitInterval);
        }
        if buttons.up.is_short() {
            settings.cycle_update_interval();
            self.touch(now);
            debug!(
                "Update interval: {} ms",
                settings.update_interval.as_millis()
            );
        }
        if self.timed_out(now) {
            return Transition::to(MenuPosition::CommitInterval);
        }

        let transition = Transition::stay(self.position);
        if self.blink.toggle_if_due(now) {
            transition.with(Effect::Render(RenderRequest::IntervalSelector(
                settings.update_interval,
            )))
        } else {
            transition
        }
    }

    fn execute_set_color_scheme(
        &mut self,
        settings: &mut Settings,
        buttons: Buttons,
        now: Instant,
    ) -> Transition {
        if buttons.set.is_short() {
            return Transition::to(MenuPosition::CommitColor);
        }
        if buttons.down.is_short() {
            settings.cycle_color_scheme();
            self.touch(now);
            debug!("Color scheme: {}", settings.color_scheme.index());
        }
        if self.timed_out(now) {
            return Transition::to(MenuPosition::CommitColor);
        }

        let transition = Transition::stay(self.position);
        if self.blink.toggle_if_due(now) {
            transition.with(Effect::Render(RenderRequest::ColorPreview(
                settings.color_scheme,
            )))
        } else {
            transition
        }
    }

    fn execute_commit_settings(position: MenuPosition) -> Transition {
        debug!("Menu: saving from position {}", position.index());
        Transition::to(MenuPosition::Clock)
            .with(Effect::SaveSettings)
            .with(Effect::ClearDisplay)
            .with(Effect::RefreshClock)
    }
}
