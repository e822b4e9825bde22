//! Mode state machine
//!
//! [`ControllerState`] owns every piece of mutable lamp state: the live and
//! backup light parameters, the raw channel values, one filter per smoothed
//! channel, the attention overlay, the button tracker and the frame buffer.
//! It is driven from a single loop: input handlers and [`ControllerState::on_tick`].

use embassy_time::Instant;

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::color::{BLACK, Rgb, kelvin_to_rgb};
use crate::config::{ControllerConfig, UpdateRequests};
use crate::filter::FilterState;
use crate::input::{ButtonAction, ButtonTracker, InputEvent, RawChannels, SampleChannel};
use crate::mode::{Mode, TickBehavior};
use crate::overlay::AttentionOverlay;
use crate::params::LightParameters;
use crate::renderer::{StripGeometry, render};

/// Intensity removed on every tick while stopped
const FADE_STEP: f32 = 0.01;

/// Intensity below which a fading light counts as off
const FADE_FLOOR: f32 = 0.0001;

/// Filters of the smoothed channels, in knob units
#[derive(Debug, Clone, Copy)]
pub struct ChannelFilters {
    /// Degrees
    pub angle: FilterState,
    /// Centimeters
    pub radius: FilterState,
    /// Percent
    pub intensity: FilterState,
}

impl ChannelFilters {
    fn seeded(params: &LightParameters) -> Self {
        Self {
            angle: FilterState::new(params.angle_deg),
            radius: FilterState::new(params.radius_m * 100.0),
            intensity: FilterState::new(params.intensity_percent()),
        }
    }
}

/// Why a mode was entered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Cause {
    Button,
    Hold,
    Settled,
}

/// State of the desk lamp controller
pub struct ControllerState<const N: usize> {
    geometry: StripGeometry,
    update_requests: UpdateRequests,
    ready: bool,

    mode: Mode,
    params: LightParameters,
    backup: LightParameters,
    raw: RawChannels,
    filters: ChannelFilters,
    overlay: AttentionOverlay,
    button: ButtonTracker,

    frame_buffer: [Rgb; N],
}

impl<const N: usize> ControllerState<N> {
    /// Create a controller waiting for discovery, idle, at the initial parameters
    pub fn new(config: &ControllerConfig) -> Self {
        let params = config.initial.clamped(config.strip_length_m);
        Self {
            geometry: StripGeometry::new(N, config.strip_length_m),
            update_requests: config.update_requests,
            ready: false,
            mode: Mode::Resuming,
            params,
            backup: params,
            raw: RawChannels {
                angle_deg: params.angle_deg,
                radius_m: params.radius_m,
                intensity_percent: params.intensity_percent(),
                color_kelvin: config.initial_kelvin,
            },
            filters: ChannelFilters::seeded(&params),
            overlay: AttentionOverlay::new(config.overlay_duration),
            button: ButtonTracker::new(config.stop_hold),
            frame_buffer: [BLACK; N],
        }
    }

    /// Whether the sensor and strip services have been discovered
    pub const fn is_ready(&self) -> bool {
        self.ready
    }

    pub const fn mode(&self) -> Mode {
        self.mode
    }

    /// Live light parameters
    pub const fn params(&self) -> &LightParameters {
        &self.params
    }

    /// Parameters saved when the light was last stopped
    pub const fn backup(&self) -> &LightParameters {
        &self.backup
    }

    /// Last rescaled sample of every channel
    pub const fn raw(&self) -> &RawChannels {
        &self.raw
    }

    pub const fn filters(&self) -> &ChannelFilters {
        &self.filters
    }

    pub const fn overlay(&self) -> &AttentionOverlay {
        &self.overlay
    }

    pub const fn geometry(&self) -> StripGeometry {
        self.geometry
    }

    /// Last rendered frame
    pub const fn frame(&self) -> &[Rgb; N] {
        &self.frame_buffer
    }

    /// Mark the boundary services as discovered.
    ///
    /// Returns the publication periods to request from the sensor services.
    /// Discovery resets those on every service, so the caller must send
    /// them again after each discovery.
    pub fn on_discovery_complete(&mut self, now: Instant) -> UpdateRequests {
        if !self.ready {
            self.ready = true;
            self.overlay.trigger(now);
        }
        #[cfg(feature = "esp32-log")]
        println!("[ControllerState.on_discovery_complete] ready in {} mode", self.mode.as_str());
        self.update_requests
    }

    /// Dispatch an input event
    pub fn handle(&mut self, event: InputEvent, now: Instant) {
        match event {
            InputEvent::Sample { channel, raw } => self.on_sample(channel, raw, now),
            InputEvent::Rotary { raw } => self.on_rotary(raw, now),
            InputEvent::Button { pressed, at } => self.on_button_edge(pressed, at),
        }
    }

    /// Handle a sample of `channel` in its native sensor range.
    ///
    /// The raw value of the channel is always updated. It only affects the
    /// light if the active mode owns the channel.
    pub fn on_sample(&mut self, channel: SampleChannel, raw: f32, now: Instant) {
        if !self.ready {
            #[cfg(feature = "esp32-log")]
            println!("[ControllerState.on_sample] ignored {:?} before discovery", channel);
            return;
        }

        let value = channel.rescale(raw, self.geometry.length_m);
        let owned = self.mode.channel() == Some(channel);

        if owned {
            let reference = match channel {
                SampleChannel::Angle => self.params.angle_deg,
                SampleChannel::Radius => self.params.radius_m,
                SampleChannel::Intensity => self.params.intensity_percent(),
                SampleChannel::Color => self.raw.color_kelvin,
            };
            if libm::fabsf(value - reference) > channel.significance() {
                self.overlay.trigger(now);
            }
        }

        self.raw.set(channel, value);

        if owned && channel == SampleChannel::Color {
            self.params.color = kelvin_to_rgb(value);
        }
    }

    /// Handle a reading of the single shared knob, in degrees.
    ///
    /// The reading feeds whichever channel the active mode owns. The color
    /// channel expects a ratio, so the knob travel is mapped onto 0-100%.
    pub fn on_rotary(&mut self, raw_deg: f32, now: Instant) {
        let Some(channel) = self.mode.channel() else {
            return;
        };
        let raw = match channel {
            SampleChannel::Color => raw_deg * channel.raw_max() / SampleChannel::Angle.raw_max(),
            _ => raw_deg,
        };
        self.on_sample(channel, raw, now);
    }

    /// Handle a button report
    pub fn on_button_edge(&mut self, pressed: bool, at: Instant) {
        if !self.ready {
            return;
        }
        let stopped = self.mode == Mode::Stopped;
        if let Some(action) = self.button.on_edge(pressed, at, stopped) {
            self.apply_button(action, at);
        }
    }

    /// Run one control step.
    ///
    /// Returns the frame to send to the strip, or `None` when nothing needs
    /// to be sent this tick.
    pub fn on_tick(&mut self, now: Instant) -> Option<&[Rgb; N]> {
        if !self.ready {
            return None;
        }

        let stopped = self.mode == Mode::Stopped;
        if let Some(action) = self.button.check_hold(now, stopped) {
            self.apply_button(action, now);
        }

        if self.mode.step(self, now) {
            Some(&self.frame_buffer)
        } else {
            None
        }
    }

    fn apply_button(&mut self, action: ButtonAction, now: Instant) {
        match action {
            ButtonAction::Switch => self.switch_mode(now),
            ButtonAction::Stop => self.stop(now),
        }
    }

    /// Go to the next mode in the cycle
    fn switch_mode(&mut self, now: Instant) {
        if self.mode == Mode::Stopped {
            self.resume();
        }
        self.enter(self.mode.next(), Cause::Button);
        if self.mode == Mode::ColorMode {
            self.params.color = kelvin_to_rgb(self.raw.color_kelvin);
        }
        self.overlay.trigger(now);
    }

    /// Save the live parameters and start fading out
    fn stop(&mut self, now: Instant) {
        self.backup = self.params;
        self.enter(Mode::Stopped, Cause::Hold);
        self.overlay.trigger(now);
    }

    /// Restore the saved parameters, starting from darkness
    fn resume(&mut self) {
        self.params = self.backup;
        self.params.intensity = 0.0;
        self.filters.intensity.rebase(0.0);
    }

    fn enter(&mut self, mode: Mode, _cause: Cause) {
        #[cfg(feature = "esp32-log")]
        println!(
            "[ControllerState.enter] {} -> {} ({:?})",
            self.mode.as_str(),
            mode.as_str(),
            _cause
        );
        self.mode = mode;
    }

    /// Filter the channel into the light parameters.
    ///
    /// Returns true if the raw value was far enough to count as motion.
    fn filter_channel(&mut self, channel: SampleChannel) -> bool {
        let length_m = self.geometry.length_m;
        let filtered = match channel {
            SampleChannel::Angle => {
                let filtered = self.filters.angle.update(self.raw.angle_deg);
                self.params.angle_deg = filtered.value;
                filtered
            }
            SampleChannel::Radius => {
                let filtered = self.filters.radius.update(self.raw.radius_m * 100.0);
                self.params.radius_m = filtered.value / 100.0;
                filtered
            }
            SampleChannel::Intensity => {
                let filtered = self.filters.intensity.update(self.raw.intensity_percent);
                self.params.intensity = filtered.value / 100.0;
                filtered
            }
            SampleChannel::Color => return false,
        };
        self.params = self.params.clamped(length_m);
        filtered.moved
    }

    fn fade(&mut self) {
        let intensity = self.params.intensity - FADE_STEP;
        self.params.intensity = if intensity < FADE_FLOOR { 0.0 } else { intensity };
    }

    fn render_frame(&mut self, now: Instant) {
        render(&self.params, self.geometry, &mut self.frame_buffer);
        self.overlay
            .composite(&mut self.frame_buffer, self.mode, &self.params, self.geometry, now);
    }
}

impl Mode {
    /// Run the tick behavior of this mode on `state`.
    ///
    /// Returns true if a new frame was rendered.
    pub fn step<const N: usize>(self, state: &mut ControllerState<N>, now: Instant) -> bool {
        match self.tick_behavior() {
            TickBehavior::FilterAndRender(channel) => {
                if state.filter_channel(channel) {
                    state.overlay.trigger(now);
                }
                state.render_frame(now);
                if !state.overlay.is_active() {
                    state.enter(Mode::Resuming, Cause::Settled);
                }
                true
            }
            TickBehavior::FadeAndRender => {
                state.fade();
                state.render_frame(now);
                true
            }
            TickBehavior::Render => {
                state.render_frame(now);
                true
            }
            TickBehavior::RenderOverlay => {
                if !state.overlay.is_active() {
                    return false;
                }
                state.render_frame(now);
                true
            }
        }
    }
}
