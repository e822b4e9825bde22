//! Desktop preview app for the desk light controller
//!
//! Simulates the lamp in a window: a knob, a push button, the analog
//! sample channels and the strip itself. All input goes through the same
//! event queue and frame scheduler the firmware uses.

use std::time::Instant as StdInstant;

use desk_light_controller::{
    ControllerConfig, DeskController, EmitStatus, FrameScheduler, InputEvent, InputQueue,
    InputSender, Instant, LedSink, RetryPolicy, Rgb, STRIP_LED_COUNT, SampleChannel,
    config::FRAME_PERIOD,
};
use eframe::egui::{self};

/// Size of each LED rectangle in pixels
const LED_SIZE: f32 = 12.0;

/// Gap between LEDs
const LED_GAP: f32 = 2.0;

/// Input queue size
const INPUT_QUEUE_SIZE: usize = 16;

/// Upper bound of controller steps per UI frame
const MAX_STEPS_PER_FRAME: usize = 100;

/// Static input queue shared by the UI and the scheduler
static INPUTS: InputQueue<INPUT_QUEUE_SIZE> = InputQueue::<INPUT_QUEUE_SIZE>::new();

/// Sink that keeps the last frame for drawing and can simulate a dead bus
struct PreviewSink {
    frame: [Rgb; STRIP_LED_COUNT],
    offline: bool,
}

impl LedSink for PreviewSink {
    type Error = &'static str;

    fn try_write(&mut self, colors: &[Rgb]) -> Result<(), Self::Error> {
        if self.offline {
            return Err("bus offline");
        }
        self.frame.copy_from_slice(colors);
        Ok(())
    }
}

fn main() -> eframe::Result<()> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([900.0, 420.0])
            .with_title("Desk Light Preview"),
        ..Default::default()
    };

    eframe::run_native(
        "desk-light-preview",
        options,
        Box::new(|_cc| Ok(Box::new(PreviewApp::new()))),
    )
}

struct PreviewApp {
    scheduler: FrameScheduler<'static, PreviewSink, STRIP_LED_COUNT, INPUT_QUEUE_SIZE>,
    inputs: InputSender<'static, INPUT_QUEUE_SIZE>,

    /// Synthetic time in milliseconds
    t_ms: u64,
    /// Time of the next controller step
    next_step_ms: u64,
    /// Wall-clock reference for delta time
    last_frame: StdInstant,
    /// Knob position in degrees
    knob: f32,
    /// Analog samples in their native ranges
    samples: [f32; 4],
    /// Whether the push button is currently held
    button_down: bool,
    /// Last emit outcome, for the status line
    last_emit: Option<EmitStatus>,
    /// Last reported sink fault
    fault: Option<u8>,
}

impl PreviewApp {
    fn new() -> Self {
        let config = ControllerConfig::DEFAULT;
        let sink = PreviewSink {
            frame: [Rgb::default(); STRIP_LED_COUNT],
            offline: false,
        };
        let scheduler = FrameScheduler::new(
            DeskController::new(&config),
            INPUTS.receiver(),
            sink,
            RetryPolicy::DEFAULT,
        );

        Self {
            scheduler,
            inputs: INPUTS.sender(),
            t_ms: 0,
            next_step_ms: 0,
            last_frame: StdInstant::now(),
            knob: 0.0,
            samples: [150.0, 60.0, 75.0, 75.0],
            button_down: false,
            last_emit: None,
            fault: None,
        }
    }

    fn now(&self) -> Instant {
        Instant::from_millis(self.t_ms)
    }

    fn send(&self, event: InputEvent) {
        let _ = self.inputs.try_send(event);
    }

    /// Update synthetic time based on wall clock
    fn update_time(&mut self) {
        let now = StdInstant::now();
        let delta = now.duration_since(self.last_frame);
        self.last_frame = now;

        #[allow(clippy::cast_possible_truncation)]
        let delta_ms = delta.as_millis().min(u128::from(u32::MAX)) as u64;
        self.t_ms = self.t_ms.wrapping_add(delta_ms);
    }

    /// Run every controller step that is due at the current synthetic time
    fn run_steps(&mut self) {
        let mut steps = 0;
        while self.next_step_ms <= self.t_ms && steps < MAX_STEPS_PER_FRAME {
            match self.scheduler.tick(Instant::from_millis(self.next_step_ms)) {
                Ok(result) => {
                    self.last_emit = Some(result.emit);
                    self.fault = None;
                    self.next_step_ms = result.next_deadline.as_millis();
                }
                Err(fault) => {
                    self.fault = Some(fault.failures);
                    self.next_step_ms += FRAME_PERIOD.as_millis();
                }
            }
            steps += 1;
        }
        if steps == MAX_STEPS_PER_FRAME {
            self.next_step_ms = self.t_ms;
        }
    }

    fn controls(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            let ready = self.scheduler.controller().is_ready();
            if ui
                .add_enabled(!ready, egui::Button::new("Discover"))
                .clicked()
            {
                let now = self.now();
                self.scheduler.controller_mut().on_discovery_complete(now);
            }

            let button = ui.add(egui::Button::new("Push").sense(egui::Sense::click_and_drag()));
            let down = button.is_pointer_button_down_on();
            if down != self.button_down {
                self.button_down = down;
                self.send(InputEvent::Button {
                    pressed: down,
                    at: self.now(),
                });
            }

            ui.add_space(8.0);
            ui.label("Knob:");
            if ui
                .add(egui::Slider::new(&mut self.knob, 0.0..=300.0).suffix("°"))
                .changed()
            {
                self.send(InputEvent::Rotary { raw: self.knob });
            }

            ui.add_space(8.0);
            let sink = self.scheduler.emitter_mut().sink_mut();
            ui.checkbox(&mut sink.offline, "Bus offline");
        });

        ui.add_space(4.0);

        let channels = [
            (SampleChannel::Angle, "Angle pot"),
            (SampleChannel::Radius, "Radius pot"),
            (SampleChannel::Intensity, "Intensity pot"),
            (SampleChannel::Color, "Color ratio"),
        ];
        ui.horizontal(|ui| {
            for (index, (channel, label)) in channels.into_iter().enumerate() {
                ui.label(label);
                let range = 0.0..=channel.raw_max();
                if ui
                    .add(egui::Slider::new(&mut self.samples[index], range))
                    .changed()
                {
                    self.send(InputEvent::Sample {
                        channel,
                        raw: self.samples[index],
                    });
                }
                ui.add_space(8.0);
            }
        });
    }

    fn status(&self, ui: &mut egui::Ui) {
        let controller = self.scheduler.controller();
        let params = controller.params();
        ui.horizontal(|ui| {
            let secs = self.t_ms / 1000;
            let ms = self.t_ms % 1000;
            ui.label(format!("Time: {secs}.{ms:03}s"));
            ui.separator();
            ui.label(format!("Mode: {}", controller.mode().as_str()));
            ui.separator();
            ui.label(format!(
                "Angle {:.1}°  Radius {:.2}m  Intensity {:.1}%",
                params.angle_deg,
                params.radius_m,
                params.intensity_percent()
            ));
            ui.separator();
            ui.label(if controller.overlay().is_active() {
                "Overlay on"
            } else {
                "Overlay off"
            });
            ui.separator();
            match (self.fault, self.last_emit) {
                (Some(failures), _) => ui.colored_label(
                    egui::Color32::RED,
                    format!("Sink fault ({failures} failures)"),
                ),
                (None, Some(status)) => ui.label(format!("Sink: {status:?}")),
                (None, None) => ui.label("Sink: idle"),
            };
        });
    }
}

impl eframe::App for PreviewApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.update_time();
        self.run_steps();

        ctx.request_repaint();

        egui::CentralPanel::default().show(ctx, |ui| {
            self.controls(ui);
            ui.add_space(8.0);
            self.status(ui);
            ui.add_space(16.0);

            // === LED Display ===
            let frame = &self.scheduler.emitter().sink().frame;
            let available_width = ui.available_width();
            let led_pitch = LED_SIZE + LED_GAP;

            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let leds_per_row = (available_width / led_pitch).floor().max(1.0) as usize;
            let rows = frame.len().div_ceil(leds_per_row);
            #[allow(clippy::cast_precision_loss)]
            let height = rows as f32 * led_pitch;

            let (response, painter) = ui.allocate_painter(
                egui::vec2(available_width, height),
                egui::Sense::hover(),
            );
            let origin = response.rect.min;

            #[allow(clippy::cast_precision_loss)]
            for (i, pixel) in frame.iter().enumerate() {
                let row = i / leds_per_row;
                let col = i % leds_per_row;
                let x = origin.x + col as f32 * led_pitch;
                let y = origin.y + row as f32 * led_pitch;

                let rect = egui::Rect::from_min_size(
                    egui::pos2(x, y),
                    egui::vec2(LED_SIZE, LED_SIZE),
                );
                let color = egui::Color32::from_rgb(pixel.r, pixel.g, pixel.b);
                painter.rect_filled(rect, 3.0, color);
            }
        });
    }
}
