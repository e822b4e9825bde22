#![no_std]

pub mod channel;
pub mod clock;
pub mod color;
pub mod config;
pub mod controller;
pub mod filter;
pub mod frame_scheduler;
pub mod input;
pub mod math8;
pub mod mode;
pub mod overlay;
pub mod params;
pub mod renderer;
pub mod sink;

pub use config::{ControllerConfig, STRIP_LED_COUNT, STRIP_LENGTH_M, UpdateRequests};
pub use controller::{ChannelFilters, ControllerState};
pub use filter::{FilterState, Filtered, filter};
pub use frame_scheduler::{FrameResult, FrameScheduler};
pub use input::{
    ButtonAction, ButtonTracker, InputEvent, InputQueue, InputReceiver, InputSender,
    RawChannels, SampleChannel,
};
pub use mode::Mode;
pub use overlay::AttentionOverlay;
pub use params::LightParameters;
pub use renderer::{StripGeometry, render};
pub use sink::{EmitStatus, FrameEmitter, LedSink, RetryPolicy, SinkFault};

pub use color::{Rgb, kelvin_to_rgb};
pub use embassy_time::{Duration, Instant};

/// Controller sized for the desk lamp strip
pub type DeskController = ControllerState<STRIP_LED_COUNT>;
