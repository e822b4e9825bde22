//! Build-time configuration of the desk lamp.

use embassy_time::Duration;

use crate::color::Rgb;
use crate::params::LightParameters;

/// Number of addressable LEDs on the strip
pub const STRIP_LED_COUNT: usize = 74;

/// Physical strip length in meters
pub const STRIP_LENGTH_M: f32 = 2.45;

/// Period of the control/render tick
pub const FRAME_PERIOD: Duration = Duration::from_millis(10);

/// How long the button must be held to stop the light
pub const STOP_HOLD: Duration = Duration::from_millis(1000);

/// Publication period requested from the button service
pub const BUTTON_UPDATE_PERIOD: Duration = Duration::from_millis(50);

/// Publication period requested from the rotary sensor service
pub const ROTARY_UPDATE_PERIOD: Duration = Duration::from_millis(20);

/// Lifetime of the attention overlay after its last trigger
pub const OVERLAY_DURATION: Duration = Duration::from_millis(6000);

/// Warm white, close to 4500K
pub const INITIAL_COLOR: Rgb = Rgb {
    r: 255,
    g: 196,
    b: 137,
};

/// Light parameters at power-up
pub const INITIAL_PARAMETERS: LightParameters = LightParameters {
    angle_deg: 90.0,
    radius_m: 0.5,
    intensity: 0.25,
    color: INITIAL_COLOR,
};

/// Color temperature the color channel starts from
pub const INITIAL_KELVIN: f32 = 4500.0;

/// Configuration of the controller
#[derive(Debug, Clone)]
pub struct ControllerConfig {
    /// Physical strip length in meters
    pub strip_length_m: f32,
    /// Button hold duration that stops the light
    pub stop_hold: Duration,
    /// Attention overlay lifetime
    pub overlay_duration: Duration,
    /// Light parameters at power-up
    pub initial: LightParameters,
    /// Initial value of the color temperature channel
    pub initial_kelvin: f32,
    /// Publication periods to request after discovery
    pub update_requests: UpdateRequests,
}

impl ControllerConfig {
    pub const DEFAULT: Self = Self {
        strip_length_m: STRIP_LENGTH_M,
        stop_hold: STOP_HOLD,
        overlay_duration: OVERLAY_DURATION,
        initial: INITIAL_PARAMETERS,
        initial_kelvin: INITIAL_KELVIN,
        update_requests: UpdateRequests {
            rotary: ROTARY_UPDATE_PERIOD,
            button: BUTTON_UPDATE_PERIOD,
        },
    };
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Publication periods the controller wants from upstream sensor services.
///
/// Services forget these on every discovery, so they have to be sent again
/// each time discovery completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpdateRequests {
    pub rotary: Duration,
    pub button: Duration,
}
