//! Frame scheduling and timing utilities.
//!
//! Provides portable frame pacing without async/await or platform-specific timers.
//! The caller is responsible for sleeping/waiting between frames.

use embassy_time::{Duration, Instant};

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::clock;
use crate::config::FRAME_PERIOD;
use crate::controller::ControllerState;
use crate::input::InputReceiver;
use crate::sink::{EmitStatus, FrameEmitter, LedSink, RetryPolicy, SinkFault};

/// Result of a frame tick operation.
#[derive(Debug, Clone, Copy)]
pub struct FrameResult {
    /// The deadline for the next frame.
    pub next_deadline: Instant,
    /// How long to wait until the next frame (may be zero if behind schedule).
    pub sleep_duration: Duration,
    /// What happened to this tick's frame.
    pub emit: EmitStatus,
}

/// Single-threaded owner of the control loop.
///
/// This scheduler:
/// - Drains input events queued by the boundary since the last tick
/// - Runs one controller step and hands the frame to the emitter
/// - Tracks frame timing with drift correction
/// - Returns timing info so the caller can sleep appropriately
///
/// # Usage
///
/// ```ignore
/// let mut scheduler = FrameScheduler::new(controller, INPUTS.receiver(), sink, RetryPolicy::DEFAULT);
///
/// loop {
///     let now = get_current_time_ms();
///     match scheduler.tick(Instant::from_millis(now)) {
///         Ok(result) => sleep_ms(result.sleep_duration.as_millis()),
///         Err(fault) => report(fault),
///     }
/// }
/// ```
pub struct FrameScheduler<'a, S: LedSink, const N: usize, const INPUT_QUEUE_SIZE: usize> {
    controller: ControllerState<N>,
    inputs: InputReceiver<'a, INPUT_QUEUE_SIZE>,
    emitter: FrameEmitter<S, N>,
    next_frame: Instant,
    frame_duration: Duration,
}

impl<'a, S: LedSink, const N: usize, const INPUT_QUEUE_SIZE: usize>
    FrameScheduler<'a, S, N, INPUT_QUEUE_SIZE>
{
    /// Create a new frame scheduler.
    ///
    /// Uses [`FRAME_PERIOD`] for frame timing.
    pub fn new(
        controller: ControllerState<N>,
        inputs: InputReceiver<'a, INPUT_QUEUE_SIZE>,
        sink: S,
        policy: RetryPolicy,
    ) -> Self {
        Self::with_frame_duration(controller, inputs, sink, policy, FRAME_PERIOD)
    }

    /// Create a new frame scheduler with custom frame duration.
    pub fn with_frame_duration(
        controller: ControllerState<N>,
        inputs: InputReceiver<'a, INPUT_QUEUE_SIZE>,
        sink: S,
        policy: RetryPolicy,
        frame_duration: Duration,
    ) -> Self {
        Self {
            controller,
            inputs,
            emitter: FrameEmitter::new(sink, policy),
            next_frame: Instant::from_ticks(0),
            frame_duration,
        }
    }

    /// Process one frame and return timing information.
    ///
    /// This method:
    /// 1. Applies drift correction if we've fallen too far behind
    /// 2. Applies every queued input event
    /// 3. Runs one controller step
    /// 4. Submits the new frame, or retries a pending one
    /// 5. Returns the deadline for the next frame
    ///
    /// A sink that keeps rejecting frames is reported as `Err(SinkFault)`;
    /// the scheduler stays usable and keeps retrying on later ticks.
    pub fn tick(&mut self, now: Instant) -> Result<FrameResult, SinkFault> {
        // Skip the backlog after a long stall instead of bursting to catch up
        let max_drift = Duration::from_ticks(self.frame_duration.as_ticks() * 2);
        if clock::since(now, self.next_frame) > max_drift && clock::reached(now, self.next_frame) {
            self.next_frame = now;
        }

        let controller = &mut self.controller;
        self.inputs.drain(|event| controller.handle(event, now));

        let emitted = match self.controller.on_tick(now) {
            Some(frame) => self.emitter.submit(frame, now),
            None => self.emitter.poll(now),
        };

        self.next_frame = clock::advance(self.next_frame, self.frame_duration);

        let emit = match emitted {
            Ok(status) => status,
            Err(fault) => {
                #[cfg(feature = "esp32-log")]
                println!("[FrameScheduler.tick] sink fault after {} failures", fault.failures);
                return Err(fault);
            }
        };

        // May be zero if we're behind
        let sleep_duration = if clock::reached(now, self.next_frame) {
            Duration::from_ticks(0)
        } else {
            clock::since(self.next_frame, now)
        };

        Ok(FrameResult {
            next_deadline: self.next_frame,
            sleep_duration,
            emit,
        })
    }

    /// Get a reference to the controller.
    pub const fn controller(&self) -> &ControllerState<N> {
        &self.controller
    }

    /// Get a mutable reference to the controller.
    pub const fn controller_mut(&mut self) -> &mut ControllerState<N> {
        &mut self.controller
    }

    /// Get a reference to the frame emitter.
    pub const fn emitter(&self) -> &FrameEmitter<S, N> {
        &self.emitter
    }

    /// Get a mutable reference to the frame emitter.
    pub const fn emitter_mut(&mut self) -> &mut FrameEmitter<S, N> {
        &mut self.emitter
    }
}
