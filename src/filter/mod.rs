//! Inertial smoothing of knob readings
//!
//! Turns noisy, steppy raw samples into smooth motion of a light parameter.
//! Each filtered quantity owns one [`FilterState`]; the update itself is a
//! plain O(1) function of that state and the latest raw value.
//!
//! Values are filtered in "knob units" (degrees for the angle, centimeters
//! for the radius, percent for the intensity) so that a single
//! [`MOTION_THRESHOLD`] of 2 units fits every channel.

/// Share of the current error applied directly on each update
pub const FILTER_STRENGTH: f32 = 0.03;

/// Share of the accumulated force applied on each update
pub const INERTIA_STRENGTH: f32 = 0.1;

/// Bound of the accumulated force, in both directions
pub const MAX_SPEED: f32 = 0.3;

/// Error above which the user is considered to be moving the knob
pub const MOTION_THRESHOLD: f32 = 2.0;

/// Smoothing state of one filtered channel
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FilterState {
    previous_output: f32,
    accumulated_force: f32,
}

/// Result of one filter update
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Filtered {
    /// Smoothed value
    pub value: f32,
    /// The raw value was far enough from the output to count as user motion
    pub moved: bool,
}

impl FilterState {
    /// Create a state resting at `initial`
    pub const fn new(initial: f32) -> Self {
        Self {
            previous_output: initial,
            accumulated_force: 0.0,
        }
    }

    /// Last smoothed value
    pub const fn previous_output(&self) -> f32 {
        self.previous_output
    }

    /// Integral of past errors, always within `[-MAX_SPEED, MAX_SPEED]`
    pub const fn accumulated_force(&self) -> f32 {
        self.accumulated_force
    }

    /// Feed one raw value and get the next smoothed value.
    ///
    /// Order matters: error, motion check, force accumulation and clamp,
    /// then output. Any other order changes the damping curve.
    pub fn update(&mut self, raw: f32) -> Filtered {
        let err = raw - self.previous_output;
        let moved = libm::fabsf(err) > MOTION_THRESHOLD;

        self.accumulated_force = (self.accumulated_force + err).clamp(-MAX_SPEED, MAX_SPEED);

        let value = self.previous_output
            + FILTER_STRENGTH * err
            + INERTIA_STRENGTH * self.accumulated_force;
        self.previous_output = value;

        Filtered { value, moved }
    }

    /// Move the output to `value` and drop any accumulated force.
    ///
    /// Used when the controlled parameter is forced from outside the filter,
    /// so the next update continues from the forced value instead of jumping
    /// back to the stale output.
    pub fn rebase(&mut self, value: f32) {
        self.previous_output = value;
        self.accumulated_force = 0.0;
    }
}

/// Functional form of [`FilterState::update`]
#[inline]
pub fn filter(state: &mut FilterState, raw: f32) -> Filtered {
    state.update(raw)
}
