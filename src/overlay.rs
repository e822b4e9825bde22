//! Attention overlay
//!
//! A short-lived highlight telling the user which parameter the knob is
//! currently changing. It fades from the highlight color back to the
//! rendered pixel over its lifetime and never touches the light parameters.

use embassy_time::{Duration, Instant};

use crate::clock;
use crate::color::{Rgb, blend_colors, rgb_from_u32};
use crate::math8::progress8;
use crate::mode::Mode;
use crate::params::LightParameters;
use crate::renderer::StripGeometry;

#[allow(clippy::unreadable_literal)]
const RED: Rgb = rgb_from_u32(0xFF0000);
#[allow(clippy::unreadable_literal)]
const WHITE: Rgb = rgb_from_u32(0xFFFFFF);
/// Warmest selectable color (1500K)
#[allow(clippy::unreadable_literal)]
pub const WARM_SWATCH: Rgb = rgb_from_u32(0xFF6D00);
/// Coolest selectable color (5500K)
#[allow(clippy::unreadable_literal)]
pub const COOL_SWATCH: Rgb = rgb_from_u32(0xFFECE0);

/// Decaying "you changed this" highlight
#[derive(Debug, Clone, Copy)]
pub struct AttentionOverlay {
    duration: Duration,
    started_at: Option<Instant>,
}

impl AttentionOverlay {
    /// Create an inactive overlay
    pub const fn new(duration: Duration) -> Self {
        Self {
            duration,
            started_at: None,
        }
    }

    /// Activate the overlay, or restart it if already active
    pub fn trigger(&mut self, now: Instant) {
        self.started_at = Some(now);
    }

    pub const fn is_active(&self) -> bool {
        self.started_at.is_some()
    }

    pub const fn started_at(&self) -> Option<Instant> {
        self.started_at
    }

    /// Fade progress (0 = fresh, 255 = fully faded), or `None` if inactive.
    ///
    /// Deactivates the overlay once its lifetime has passed.
    pub fn progress(&mut self, now: Instant) -> Option<u8> {
        let started_at = self.started_at?;
        // Triggered by an event stamped after this tick
        if !clock::reached(now, started_at) {
            return Some(0);
        }
        let elapsed = clock::since(now, started_at);
        if elapsed > self.duration {
            self.started_at = None;
            return None;
        }
        Some(progress8(elapsed, self.duration))
    }

    /// Blend the highlight of `mode` into a rendered frame.
    pub fn composite(
        &mut self,
        leds: &mut [Rgb],
        mode: Mode,
        params: &LightParameters,
        geometry: StripGeometry,
        now: Instant,
    ) {
        let Some(progress) = self.progress(now) else {
            return;
        };
        if leds.is_empty() {
            return;
        }
        let geometry = StripGeometry::new(leds.len(), geometry.length_m);

        match mode {
            Mode::AngleMode => {
                let center = geometry.led_at(geometry.angle_to_px(params.angle_deg));
                highlight(leds, center, RED, progress);
            }
            Mode::IntensityMode => highlight(leds, 0, WHITE, progress),
            Mode::RadiusMode => {
                let center = geometry.angle_to_px(params.angle_deg);
                let radius = geometry.length_to_px(params.radius_m);
                highlight(leds, geometry.led_at(center - radius), RED, progress);
                highlight(leds, geometry.led_at(center + radius), RED, progress);
            }
            Mode::ColorMode => {
                highlight(leds, 0, WARM_SWATCH, progress);
                highlight(leds, 1, COOL_SWATCH, progress);
            }
            Mode::Stopped | Mode::Resuming => {}
        }
    }
}

/// `highlight * (1 - t) + rendered * t`
fn highlight(leds: &mut [Rgb], index: usize, color: Rgb, progress: u8) {
    if let Some(led) = leds.get_mut(index) {
        *led = blend_colors(color, *led, progress);
    }
}
