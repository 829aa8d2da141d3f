//! # Bus Contract
//!
//! Guarantees of the shared bus that every component relies on:
//!
//! 1. `on` listeners fire on every emit with the emitted payload
//! 2. `once` listeners fire exactly once
//! 3. `off` removes the given callback
//! 4. `off` with a missing argument is refused and leaves the registry intact

#[cfg(test)]
mod tests {
    use shared_bus::{
        args, Callback, EventBus, EventPublisher, EventSubscriber, RecordingSink, Value,
    };
    use std::cell::RefCell;
    use std::rc::Rc;

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    type Log = Rc<RefCell<Vec<Vec<Value>>>>;

    fn event_names() -> Vec<&'static str> {
        vec!["greet", "user:login", "a", "with spaces", "ünïcode"]
    }

    fn payloads() -> Vec<Vec<Value>> {
        vec![
            args![],
            args![1],
            args!["text", 2.5, null],
            args![{ "nested": [1, 2, 3] }, [true, false]],
        ]
    }

    fn recording(log: &Log) -> Callback {
        let log = Rc::clone(log);
        Callback::new(move |args| log.borrow_mut().push(args.to_vec()))
    }

    fn bus_with_sink() -> (EventBus, Rc<RecordingSink>) {
        let sink = Rc::new(RecordingSink::new());
        (EventBus::with_sink(sink.clone()), sink)
    }

    // =============================================================================
    // PROPERTIES
    // =============================================================================

    #[test]
    fn on_delivers_payload_on_every_emit() {
        for event in event_names() {
            for payload in payloads() {
                let bus = EventBus::new();
                let log: Log = Rc::default();
                bus.on(event, recording(&log));

                bus.emit(event, &payload);
                assert_eq!(*log.borrow(), vec![payload.clone()], "event {event}");

                bus.emit(event, &payload);
                assert_eq!(log.borrow().len(), 2, "event {event}");
            }
        }
    }

    #[test]
    fn once_delivers_exactly_once() {
        for event in event_names() {
            for payload in payloads() {
                let bus = EventBus::new();
                let log: Log = Rc::default();
                bus.once(event, recording(&log));

                bus.emit(event, &payload);
                bus.emit(event, &payload);

                assert_eq!(*log.borrow(), vec![payload.clone()], "event {event}");
            }
        }
    }

    #[test]
    fn off_after_on_stops_delivery() {
        for event in event_names() {
            let bus = EventBus::new();
            let log: Log = Rc::default();
            let cb = recording(&log);
            bus.on(event, cb.clone());
            bus.off(Some(event), Some(&cb));

            for payload in payloads() {
                bus.emit(event, &payload);
            }
            assert!(log.borrow().is_empty(), "event {event}");
        }
    }

    #[test]
    fn off_with_missing_arguments_is_refused() {
        let (bus, sink) = bus_with_sink();
        let log: Log = Rc::default();
        let cb = recording(&log);
        bus.on("greet", cb.clone());
        bus.once("greet", cb.clone());

        bus.off(Some("greet"), None);
        bus.off(None, None);

        assert_eq!(bus.listener_count("greet"), 2);
        assert_eq!(sink.count("off_missing_arguments"), 2);

        bus.emit("greet", &args!["still here"]);
        assert_eq!(log.borrow().len(), 2);
    }

    #[test]
    fn emit_without_listeners_is_silent() {
        let (bus, sink) = bus_with_sink();
        bus.emit("nobody", &args![{ "ignored": true }]);

        assert_eq!(bus.events_emitted(), 1);
        assert!(sink.is_empty());
    }

    #[test]
    fn listeners_of_other_events_are_untouched() {
        let bus = EventBus::new();
        let greet: Log = Rc::default();
        let other: Log = Rc::default();
        bus.on("greet", recording(&greet));
        bus.on("other", recording(&other));

        bus.emit("greet", &args![1]);

        assert_eq!(greet.borrow().len(), 1);
        assert!(other.borrow().is_empty());
    }

    #[test]
    #[should_panic(expected = "listener failure")]
    fn listener_panic_propagates_out_of_emit() {
        let bus = EventBus::new();
        bus.on("boom", Callback::new(|_| panic!("listener failure")));
        bus.emit("boom", &[]);
    }
}
