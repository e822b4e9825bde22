//! LED sink boundary
//!
//! The core only ever attempts a write and looks at the result. Retry
//! policy lives here: a rejected frame is kept and retried with exponential
//! backoff, a newer frame replaces it, and a run of consecutive failures is
//! escalated as a [`SinkFault`] instead of stalling the tick loop.

use embassy_time::{Duration, Instant};

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::clock;
use crate::color::Rgb;

/// Abstract LED strip output
///
/// Implement this trait to support different transports: a local driver,
/// a message bus, a simulator.
pub trait LedSink {
    type Error: core::fmt::Debug;

    /// Attempt to write colors to the LED strip, without blocking
    fn try_write(&mut self, colors: &[Rgb]) -> Result<(), Self::Error>;
}

/// Retry behavior of a [`FrameEmitter`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Consecutive failures after which the sink is reported as faulty
    pub max_failures: u8,
    /// Wait after the first failure
    pub base_backoff: Duration,
    /// Upper bound of the wait between two attempts
    pub max_backoff: Duration,
}

impl RetryPolicy {
    pub const DEFAULT: Self = Self {
        max_failures: 5,
        base_backoff: Duration::from_millis(2),
        max_backoff: Duration::from_millis(20),
    };

    /// Wait before the next attempt after `failures` consecutive failures
    pub fn backoff(&self, failures: u8) -> Duration {
        let shift = u32::from(failures.saturating_sub(1)).min(32);
        let ticks = self.base_backoff.as_ticks().saturating_mul(1_u64 << shift);
        Duration::from_ticks(ticks.min(self.max_backoff.as_ticks()))
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// The sink kept rejecting frames
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SinkFault {
    /// Consecutive failed attempts so far
    pub failures: u8,
}

/// Outcome of a non-faulty emit attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmitStatus {
    /// The frame reached the sink
    Sent,
    /// The frame is pending and will be retried
    Deferred,
    /// Nothing to send
    Idle,
}

/// Frame output with bounded, non-blocking retries
pub struct FrameEmitter<S: LedSink, const N: usize> {
    sink: S,
    policy: RetryPolicy,
    pending: Option<[Rgb; N]>,
    failures: u8,
    retry_at: Instant,
}

impl<S: LedSink, const N: usize> FrameEmitter<S, N> {
    pub const fn new(sink: S, policy: RetryPolicy) -> Self {
        Self {
            sink,
            policy,
            pending: None,
            failures: 0,
            retry_at: Instant::from_ticks(0),
        }
    }

    pub const fn sink(&self) -> &S {
        &self.sink
    }

    pub const fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// Consecutive failed attempts
    pub const fn failures(&self) -> u8 {
        self.failures
    }

    /// Whether a frame is waiting to be retried
    pub const fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Queue a new frame, replacing any pending one, and try to send it.
    pub fn submit(&mut self, frame: &[Rgb; N], now: Instant) -> Result<EmitStatus, SinkFault> {
        self.pending = Some(*frame);
        self.poll(now)
    }

    /// Retry the pending frame if its backoff has elapsed.
    pub fn poll(&mut self, now: Instant) -> Result<EmitStatus, SinkFault> {
        let Some(frame) = self.pending else {
            return Ok(EmitStatus::Idle);
        };
        if self.failures > 0 && !clock::reached(now, self.retry_at) {
            return self.deferred();
        }

        match self.sink.try_write(&frame) {
            Ok(()) => {
                self.pending = None;
                self.failures = 0;
                Ok(EmitStatus::Sent)
            }
            Err(_error) => {
                self.failures = self.failures.saturating_add(1);
                self.retry_at = clock::advance(now, self.policy.backoff(self.failures));
                #[cfg(feature = "esp32-log")]
                println!(
                    "[FrameEmitter.poll] write failed ({} in a row): {:?}",
                    self.failures, _error
                );
                self.deferred()
            }
        }
    }

    fn deferred(&self) -> Result<EmitStatus, SinkFault> {
        if self.failures >= self.policy.max_failures {
            return Err(SinkFault {
                failures: self.failures,
            });
        }
        Ok(EmitStatus::Deferred)
    }
}
