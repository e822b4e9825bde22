mod tests {
    use desk_light_controller::{ButtonAction, ButtonTracker, Duration, Instant, SampleChannel};

    const LENGTH: f32 = 2.45;

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-3
    }

    #[test]
    fn test_rescale_ranges() {
        assert!(close(SampleChannel::Angle.rescale(300.0, LENGTH), 180.0));
        assert!(close(SampleChannel::Angle.rescale(150.0, LENGTH), 90.0));
        assert!(close(SampleChannel::Radius.rescale(300.0, LENGTH), 2.45));
        assert!(close(SampleChannel::Intensity.rescale(150.0, LENGTH), 50.0));
        assert!(close(SampleChannel::Color.rescale(0.0, LENGTH), 1500.0));
        assert!(close(SampleChannel::Color.rescale(100.0, LENGTH), 5500.0));
        assert!(close(SampleChannel::Color.rescale(25.0, LENGTH), 2500.0));
    }

    #[test]
    fn test_rescale_clamps_out_of_range() {
        assert!(close(SampleChannel::Angle.rescale(420.0, LENGTH), 180.0));
        assert!(close(SampleChannel::Intensity.rescale(-3.0, LENGTH), 0.0));
        assert!(close(SampleChannel::Color.rescale(130.0, LENGTH), 5500.0));
        assert!(close(SampleChannel::Radius.rescale(f32::NAN, LENGTH), 0.0));
    }

    #[test]
    fn test_short_press_switches_on_release() {
        let mut button = ButtonTracker::new(Duration::from_millis(1000));
        assert_eq!(button.on_edge(true, Instant::from_millis(0), false), None);
        assert!(button.is_pressed());
        assert_eq!(
            button.on_edge(false, Instant::from_millis(200), false),
            Some(ButtonAction::Switch)
        );
    }

    #[test]
    fn test_repeated_reports_are_not_edges() {
        let mut button = ButtonTracker::new(Duration::from_millis(1000));
        button.on_edge(true, Instant::from_millis(0), false);
        assert_eq!(button.on_edge(true, Instant::from_millis(50), false), None);
        assert_eq!(button.on_edge(true, Instant::from_millis(100), false), None);
        assert_eq!(
            button.on_edge(false, Instant::from_millis(150), false),
            Some(ButtonAction::Switch)
        );
        assert_eq!(button.on_edge(false, Instant::from_millis(200), false), None);
    }

    #[test]
    fn test_hold_stops_once() {
        let mut button = ButtonTracker::new(Duration::from_millis(1000));
        button.on_edge(true, Instant::from_millis(0), false);

        assert_eq!(button.check_hold(Instant::from_millis(1000), false), None);
        assert_eq!(
            button.check_hold(Instant::from_millis(1001), false),
            Some(ButtonAction::Stop)
        );
        // The press was consumed by the stop
        assert_eq!(button.check_hold(Instant::from_millis(1500), false), None);
        assert_eq!(button.on_edge(false, Instant::from_millis(1600), true), None);
    }

    #[test]
    fn test_press_stamped_after_now_is_not_held() {
        let mut button = ButtonTracker::new(Duration::from_millis(1000));
        button.on_edge(true, Instant::from_millis(1005), false);
        assert_eq!(button.check_hold(Instant::from_millis(1000), false), None);
        assert_eq!(button.check_hold(Instant::from_millis(2005), false), None);
        assert_eq!(
            button.check_hold(Instant::from_millis(2006), false),
            Some(ButtonAction::Stop)
        );
    }

    #[test]
    fn test_hold_across_counter_rollover() {
        let mut button = ButtonTracker::new(Duration::from_millis(1000));
        let one_ms = Duration::from_millis(1).as_ticks();
        let pressed_at = Instant::from_ticks(u64::MAX - 400 * one_ms);
        button.on_edge(true, pressed_at, false);

        // 500ms after the press, past the rollover
        let not_yet = Instant::from_ticks(100 * one_ms - 1);
        assert_eq!(button.check_hold(not_yet, false), None);

        // 1000ms + 1 tick after the press
        let held = Instant::from_ticks(600 * one_ms);
        assert_eq!(button.check_hold(held, false), Some(ButtonAction::Stop));
    }

    #[test]
    fn test_hold_while_stopped_then_release_switches() {
        let mut button = ButtonTracker::new(Duration::from_millis(1000));
        button.on_edge(true, Instant::from_millis(0), true);
        assert_eq!(button.on_edge(true, Instant::from_millis(1500), true), None);
        assert_eq!(
            button.on_edge(false, Instant::from_millis(1600), true),
            Some(ButtonAction::Switch)
        );
    }
}
