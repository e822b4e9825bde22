mod tests {
    use desk_light_controller::channel::{Channel, TryReceiveError, TrySendError};
    use desk_light_controller::{InputEvent, InputQueue, SampleChannel};

    #[test]
    fn test_fifo_order() {
        let channel: Channel<u8, 4> = Channel::new();
        let sender = channel.sender();
        let receiver = channel.receiver();

        sender.try_send(1).unwrap();
        sender.try_send(2).unwrap();
        assert_eq!(channel.len(), 2);
        assert_eq!(receiver.try_receive(), Ok(1));
        assert_eq!(receiver.try_receive(), Ok(2));
        assert_eq!(receiver.try_receive(), Err(TryReceiveError));
        assert!(channel.is_empty());
    }

    #[test]
    fn test_full_channel_returns_value() {
        let channel: Channel<u8, 2> = Channel::new();
        channel.try_send(1).unwrap();
        channel.try_send(2).unwrap();
        assert_eq!(channel.try_send(3), Err(TrySendError(3)));
    }

    #[test]
    fn test_drain_input_events() {
        let queue: InputQueue<8> = InputQueue::new();
        let sender = queue.sender();
        sender
            .try_send(InputEvent::Sample {
                channel: SampleChannel::Angle,
                raw: 10.0,
            })
            .unwrap();
        sender.try_send(InputEvent::Rotary { raw: 20.0 }).unwrap();

        let mut seen = Vec::new();
        let count = queue.receiver().drain(|event| seen.push(event));
        assert_eq!(count, 2);
        assert_eq!(seen[1], InputEvent::Rotary { raw: 20.0 });
        assert!(queue.is_empty());
    }
}
