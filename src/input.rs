//! Input routing
//!
//! Classifies inbound samples, rescales the native sensor range into each
//! channel's semantic range, and tracks the push button.

use embassy_time::{Duration, Instant};

use crate::channel::{Channel, Receiver, Sender};
use crate::clock;
use crate::color::{KELVIN_MAX, KELVIN_MIN};
use crate::params::ANGLE_MAX_DEG;

/// Full travel of the rotary sensor, in degrees
pub const ROTARY_MAX_DEG: f32 = 300.0;

/// Full range of the color ratio, in percent
pub const COLOR_RATIO_MAX: f32 = 100.0;

/// Logical input quantity carried by a sample
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleChannel {
    Angle,
    Radius,
    Intensity,
    Color,
}

impl SampleChannel {
    /// Upper bound of the native range of a raw sample
    pub const fn raw_max(self) -> f32 {
        match self {
            Self::Angle | Self::Radius | Self::Intensity => ROTARY_MAX_DEG,
            Self::Color => COLOR_RATIO_MAX,
        }
    }

    /// Change of the rescaled value that counts as the user touching the knob.
    ///
    /// Expressed in the rescaled unit: degrees, meters, percent, Kelvin.
    pub const fn significance(self) -> f32 {
        match self {
            Self::Angle => 2.0,
            Self::Radius => 0.01,
            Self::Intensity => 0.5,
            Self::Color => 200.0,
        }
    }

    /// Rescale a raw sample into the channel's semantic range.
    ///
    /// Out-of-range samples are clamped to the nearest bound.
    pub fn rescale(self, raw: f32, strip_length_m: f32) -> f32 {
        let raw = if raw.is_nan() { 0.0 } else { raw.clamp(0.0, self.raw_max()) };
        match self {
            Self::Angle => raw * ANGLE_MAX_DEG / ROTARY_MAX_DEG,
            Self::Radius => raw * strip_length_m / ROTARY_MAX_DEG,
            Self::Intensity => raw * 100.0 / ROTARY_MAX_DEG,
            Self::Color => raw * (KELVIN_MAX - KELVIN_MIN) / COLOR_RATIO_MAX + KELVIN_MIN,
        }
    }
}

/// Event delivered by the external boundary
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Sample already tagged with its channel
    Sample { channel: SampleChannel, raw: f32 },
    /// Raw reading of the shared knob, interpreted by the active mode
    Rotary { raw: f32 },
    /// Button state report
    Button { pressed: bool, at: Instant },
}

/// Type alias for the input event channel
pub type InputQueue<const SIZE: usize> = Channel<InputEvent, SIZE>;

/// Type alias for input event sender
pub type InputSender<'a, const SIZE: usize> = Sender<'a, InputEvent, SIZE>;

/// Type alias for input event receiver
pub type InputReceiver<'a, const SIZE: usize> = Receiver<'a, InputEvent, SIZE>;

/// Last rescaled value of every channel.
///
/// Always updated when a sample arrives, whatever the active mode. Only the
/// mode owning a channel consumes its value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RawChannels {
    pub angle_deg: f32,
    pub radius_m: f32,
    pub intensity_percent: f32,
    pub color_kelvin: f32,
}

impl RawChannels {
    /// Last value of `channel`, in its semantic unit
    pub const fn get(&self, channel: SampleChannel) -> f32 {
        match channel {
            SampleChannel::Angle => self.angle_deg,
            SampleChannel::Radius => self.radius_m,
            SampleChannel::Intensity => self.intensity_percent,
            SampleChannel::Color => self.color_kelvin,
        }
    }

    /// Store the rescaled value of `channel`
    pub fn set(&mut self, channel: SampleChannel, value: f32) {
        match channel {
            SampleChannel::Angle => self.angle_deg = value,
            SampleChannel::Radius => self.radius_m = value,
            SampleChannel::Intensity => self.intensity_percent = value,
            SampleChannel::Color => self.color_kelvin = value,
        }
    }
}

/// What the button asks the controller to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonAction {
    /// Short press released: go to the next mode
    Switch,
    /// Held past the stop threshold: stop the light
    Stop,
}

/// Edge and hold tracking of the push button
#[derive(Debug, Clone, Copy)]
pub struct ButtonTracker {
    hold: Duration,
    pressed: bool,
    /// Start of the current press, cleared once the press has been consumed
    press_started: Option<Instant>,
}

impl ButtonTracker {
    pub const fn new(hold: Duration) -> Self {
        Self {
            hold,
            pressed: false,
            press_started: None,
        }
    }

    /// Whether the button is currently down
    pub const fn is_pressed(&self) -> bool {
        self.pressed
    }

    /// Handle a button report.
    ///
    /// Reports are repeated periodically even without a change, so the hold
    /// check runs on every call. `stopped` tells whether the light is
    /// already stopped, in which case holding has no further effect.
    pub fn on_edge(&mut self, pressed: bool, at: Instant, stopped: bool) -> Option<ButtonAction> {
        if pressed != self.pressed {
            self.pressed = pressed;
            if pressed {
                self.press_started = Some(at);
            } else if self.press_started.take().is_some() {
                return Some(ButtonAction::Switch);
            }
        }
        self.check_hold(at, stopped)
    }

    /// Check the hold threshold without a new report.
    ///
    /// A press stamped later than `now` has not been held at all.
    pub fn check_hold(&mut self, now: Instant, stopped: bool) -> Option<ButtonAction> {
        let started = self.press_started?;
        if stopped || !clock::reached(now, started) || clock::since(now, started) <= self.hold {
            return None;
        }
        self.press_started = None;
        Some(ButtonAction::Stop)
    }
}
