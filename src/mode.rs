//! Operating modes of the lamp.

use crate::input::SampleChannel;

/// Currently active interpretation of the knob
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Light fades out, then stays dark
    Stopped,
    /// Idle: nothing is being adjusted, the overlay keeps rendering
    Resuming,
    AngleMode,
    RadiusMode,
    IntensityMode,
    ColorMode,
}

/// What a mode does on each tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickBehavior {
    /// Filter the owned channel, render, return to idle once settled
    FilterAndRender(SampleChannel),
    /// Decrease intensity, render
    FadeAndRender,
    /// Render every tick
    Render,
    /// Render only while the attention overlay is active
    RenderOverlay,
}

impl Mode {
    /// Mode reached by a short button press.
    ///
    /// Leaving `Stopped` goes through the resume step (backup restored with
    /// zero intensity) and lands in `IntensityMode`, so the light ramps in.
    pub const fn next(self) -> Self {
        match self {
            Self::Stopped | Self::Resuming | Self::AngleMode => Self::IntensityMode,
            Self::IntensityMode => Self::RadiusMode,
            Self::RadiusMode => Self::ColorMode,
            Self::ColorMode => Self::AngleMode,
        }
    }

    /// Channel this mode consumes, if any
    pub const fn channel(self) -> Option<SampleChannel> {
        match self {
            Self::AngleMode => Some(SampleChannel::Angle),
            Self::RadiusMode => Some(SampleChannel::Radius),
            Self::IntensityMode => Some(SampleChannel::Intensity),
            Self::ColorMode => Some(SampleChannel::Color),
            Self::Stopped | Self::Resuming => None,
        }
    }

    pub const fn tick_behavior(self) -> TickBehavior {
        match self {
            Self::Stopped => TickBehavior::FadeAndRender,
            Self::Resuming => TickBehavior::RenderOverlay,
            Self::ColorMode => TickBehavior::Render,
            Self::AngleMode => TickBehavior::FilterAndRender(SampleChannel::Angle),
            Self::RadiusMode => TickBehavior::FilterAndRender(SampleChannel::Radius),
            Self::IntensityMode => TickBehavior::FilterAndRender(SampleChannel::Intensity),
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Stopped => "stopped",
            Self::Resuming => "resuming",
            Self::AngleMode => "angle",
            Self::RadiusMode => "radius",
            Self::IntensityMode => "intensity",
            Self::ColorMode => "color",
        }
    }
}
