mod tests {
    use desk_light_controller::config::STRIP_LED_COUNT;
    use desk_light_controller::{
        ControllerConfig, DeskController, Duration, EmitStatus, FrameEmitter, FrameScheduler,
        InputEvent, InputQueue, Instant, LedSink, Mode, RetryPolicy, Rgb, SinkFault,
    };

    #[derive(Default)]
    struct MockSink {
        frames: Vec<Vec<Rgb>>,
        fail_next: usize,
        always_fail: bool,
    }

    impl LedSink for MockSink {
        type Error = &'static str;

        fn try_write(&mut self, colors: &[Rgb]) -> Result<(), Self::Error> {
            if self.always_fail {
                return Err("unreachable strip");
            }
            if self.fail_next > 0 {
                self.fail_next -= 1;
                return Err("busy");
            }
            self.frames.push(colors.to_vec());
            Ok(())
        }
    }

    fn ms(value: u64) -> Instant {
        Instant::from_millis(value)
    }

    fn scheduler<'a>(
        queue: &'a InputQueue<8>,
        sink: MockSink,
        policy: RetryPolicy,
    ) -> FrameScheduler<'a, MockSink, STRIP_LED_COUNT, 8> {
        let mut controller = DeskController::new(&ControllerConfig::DEFAULT);
        controller.on_discovery_complete(ms(0));
        FrameScheduler::new(controller, queue.receiver(), sink, policy)
    }

    #[test]
    fn test_idle_before_discovery() {
        let queue = InputQueue::<8>::new();
        let controller = DeskController::new(&ControllerConfig::DEFAULT);
        let mut scheduler =
            FrameScheduler::new(controller, queue.receiver(), MockSink::default(), RetryPolicy::DEFAULT);

        let result = scheduler.tick(ms(0)).unwrap();
        assert_eq!(result.emit, EmitStatus::Idle);
        assert!(scheduler.emitter().sink().frames.is_empty());
    }

    #[test]
    fn test_emits_and_paces_frames() {
        let queue = InputQueue::<8>::new();
        let mut scheduler = scheduler(&queue, MockSink::default(), RetryPolicy::DEFAULT);

        let result = scheduler.tick(ms(0)).unwrap();
        assert_eq!(result.emit, EmitStatus::Sent);
        assert_eq!(result.next_deadline, ms(10));
        assert_eq!(result.sleep_duration, Duration::from_millis(10));

        let frames = &scheduler.emitter().sink().frames;
        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].len(), STRIP_LED_COUNT);
    }

    #[test]
    fn test_resyncs_after_stall() {
        let queue = InputQueue::<8>::new();
        let mut scheduler = scheduler(&queue, MockSink::default(), RetryPolicy::DEFAULT);

        scheduler.tick(ms(0)).unwrap();
        let result = scheduler.tick(ms(1000)).unwrap();
        assert_eq!(result.next_deadline, ms(1010));
        assert_eq!(result.sleep_duration, Duration::from_millis(10));
    }

    #[test]
    fn test_applies_queued_inputs() {
        let queue = InputQueue::<8>::new();
        let mut scheduler = scheduler(&queue, MockSink::default(), RetryPolicy::DEFAULT);
        let sender = queue.sender();

        sender
            .try_send(InputEvent::Button {
                pressed: true,
                at: ms(5),
            })
            .unwrap();
        sender
            .try_send(InputEvent::Button {
                pressed: false,
                at: ms(105),
            })
            .unwrap();
        sender.try_send(InputEvent::Rotary { raw: 150.0 }).unwrap();

        scheduler.tick(ms(110)).unwrap();
        assert_eq!(scheduler.controller().mode(), Mode::IntensityMode);
        assert!((scheduler.controller().raw().intensity_percent - 50.0).abs() < 1e-3);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_retries_rejected_frames() {
        let queue = InputQueue::<8>::new();
        let sink = MockSink {
            fail_next: 2,
            ..MockSink::default()
        };
        let mut scheduler = scheduler(&queue, sink, RetryPolicy::DEFAULT);

        assert_eq!(scheduler.tick(ms(0)).unwrap().emit, EmitStatus::Deferred);
        assert_eq!(scheduler.tick(ms(10)).unwrap().emit, EmitStatus::Deferred);
        assert_eq!(scheduler.emitter().failures(), 2);
        assert_eq!(scheduler.tick(ms(20)).unwrap().emit, EmitStatus::Sent);
        assert_eq!(scheduler.emitter().failures(), 0);
        assert_eq!(scheduler.emitter().sink().frames.len(), 1);
    }

    #[test]
    fn test_reports_fault_then_recovers() {
        let queue = InputQueue::<8>::new();
        let sink = MockSink {
            always_fail: true,
            ..MockSink::default()
        };
        let policy = RetryPolicy {
            max_failures: 3,
            ..RetryPolicy::DEFAULT
        };
        let mut scheduler = scheduler(&queue, sink, policy);

        assert!(scheduler.tick(ms(0)).is_ok());
        assert!(scheduler.tick(ms(10)).is_ok());
        assert_eq!(scheduler.tick(ms(20)).unwrap_err(), SinkFault { failures: 3 });

        scheduler.emitter_mut().sink_mut().always_fail = false;
        assert_eq!(scheduler.tick(ms(30)).unwrap().emit, EmitStatus::Sent);
    }

    #[test]
    fn test_newer_frame_replaces_pending() {
        let mut emitter: FrameEmitter<MockSink, 2> = FrameEmitter::new(
            MockSink {
                fail_next: 1,
                ..MockSink::default()
            },
            RetryPolicy::DEFAULT,
        );
        let first = [Rgb::new(1, 1, 1); 2];
        let second = [Rgb::new(2, 2, 2); 2];

        assert!(!emitter.has_pending());
        assert_eq!(emitter.submit(&first, ms(0)), Ok(EmitStatus::Deferred));
        assert!(emitter.has_pending());
        // Still inside the 2ms backoff: no attempt, but the frame is replaced
        assert_eq!(emitter.submit(&second, ms(1)), Ok(EmitStatus::Deferred));
        assert!(emitter.sink().frames.is_empty());

        assert_eq!(emitter.poll(ms(2)), Ok(EmitStatus::Sent));
        assert_eq!(emitter.sink().frames, vec![second.to_vec()]);
        assert!(!emitter.has_pending());
        assert_eq!(emitter.poll(ms(3)), Ok(EmitStatus::Idle));
    }

    #[test]
    fn test_backoff_doubles_up_to_cap() {
        let policy = RetryPolicy::DEFAULT;
        assert_eq!(policy.backoff(1), Duration::from_millis(2));
        assert_eq!(policy.backoff(2), Duration::from_millis(4));
        assert_eq!(policy.backoff(3), Duration::from_millis(8));
        assert_eq!(policy.backoff(5), Duration::from_millis(20));
        assert_eq!(policy.backoff(200), Duration::from_millis(20));
    }
}
