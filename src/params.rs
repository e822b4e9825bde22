//! Light parameters driven by the controller and read by the renderer.

use crate::color::Rgb;

/// Widest angle the light can be pointed at, in degrees
pub const ANGLE_MAX_DEG: f32 = 180.0;

/// The picture parameters of the lamp.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightParameters {
    /// Angular position of the light spot, 0° to 180°
    pub angle_deg: f32,
    /// Half-width of the light spot in meters, 0 to the strip length
    pub radius_m: f32,
    /// Intensity ratio, 0.0 to 1.0
    pub intensity: f32,
    /// Color of the light
    pub color: Rgb,
}

impl LightParameters {
    /// Returns a copy with every scalar forced into its valid range.
    #[must_use]
    pub fn clamped(self, strip_length_m: f32) -> Self {
        Self {
            angle_deg: self.angle_deg.clamp(0.0, ANGLE_MAX_DEG),
            radius_m: self.radius_m.clamp(0.0, strip_length_m),
            intensity: self.intensity.clamp(0.0, 1.0),
            color: self.color,
        }
    }

    /// Intensity expressed in percent
    pub fn intensity_percent(&self) -> f32 {
        self.intensity * 100.0
    }
}
