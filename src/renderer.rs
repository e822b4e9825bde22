//! Frame rendering
//!
//! Paints a triangular window of light centered on the current angle, with
//! a half-width equal to the current radius.

use crate::color::{BLACK, Rgb};
use crate::params::{ANGLE_MAX_DEG, LightParameters};

/// Physical layout of the LED strip
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StripGeometry {
    /// Number of LEDs
    pub led_count: usize,
    /// Strip length in meters
    pub length_m: f32,
}

impl StripGeometry {
    pub const fn new(led_count: usize, length_m: f32) -> Self {
        Self {
            led_count,
            length_m,
        }
    }

    /// Position on the strip, in LEDs, of an angle in degrees
    #[allow(clippy::cast_precision_loss)]
    pub fn angle_to_px(self, angle_deg: f32) -> f32 {
        angle_deg * self.led_count as f32 / ANGLE_MAX_DEG
    }

    /// Number of LEDs covered by a length in meters
    #[allow(clippy::cast_precision_loss)]
    pub fn length_to_px(self, length_m: f32) -> f32 {
        if self.length_m <= 0.0 {
            return 0.0;
        }
        length_m * self.led_count as f32 / self.length_m
    }

    /// Index of the LED under a fractional position, clamped to the strip.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn led_at(self, position_px: f32) -> usize {
        let last = self.led_count.saturating_sub(1);
        if position_px <= 0.0 {
            return 0;
        }
        (position_px as usize).min(last)
    }
}

/// Render the light parameters into `leds`.
///
/// Pure: the same parameters always give the same pixels. Each pixel is
/// `color * max(0, 1 - |center - i| / radius) * intensity`, truncated.
/// A zero radius lights nothing.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
pub fn render(params: &LightParameters, geometry: StripGeometry, leds: &mut [Rgb]) {
    let center = geometry.angle_to_px(params.angle_deg);
    let radius = geometry.length_to_px(params.radius_m);

    if radius <= 0.0 || params.intensity <= 0.0 {
        leds.fill(BLACK);
        return;
    }

    for (i, led) in leds.iter_mut().enumerate() {
        let distance = libm::fabsf(center - i as f32);
        let falloff = (1.0 - distance / radius).max(0.0);
        let level = falloff * params.intensity.min(1.0);

        *led = Rgb {
            r: (f32::from(params.color.r) * level) as u8,
            g: (f32::from(params.color.g) * level) as u8,
            b: (f32::from(params.color.b) * level) as u8,
        };
    }
}
