//! # Configuration-Sourced Declarations
//!
//! Declarations written as JSON configuration and resolved against a
//! component's method table:
//!
//! - method names, options objects and truthy flags resolve end to end
//! - entries are set up in the order their keys were written
//! - a re-declared event name keeps only the last declaration
//! - invalid shapes are reported while valid siblings still subscribe

#[cfg(test)]
mod tests {
    use component_events::{
        args, App, Args, Component, DeclarationError, EventDeclarations, EventPublisher,
        EventsPlugin, HandlerDecl, Method, RecordingSink,
    };
    use std::rc::Rc;

    // =============================================================================
    // TEST COMPONENT
    // =============================================================================

    const CONFIG: &str = r#"{
        "greet": "say_hello",
        "tick": { "handler": "count", "once": 1 },
        "boot": { "handler": "count", "immediate": "yes" },
        "broken": 42,
        "nothing": null,
        "no-handler": { "once": true },
        "empty-handler": { "handler": "" },
        "wrong-handler": { "handler": 7 },
        "list": ["say_hello"],
        "gone": "not_a_method"
    }"#;

    #[derive(Default)]
    struct Configured {
        hellos: Vec<String>,
        counts: u32,
    }

    impl Configured {
        fn say_hello(&mut self, args: &Args) {
            let name = args.first().and_then(|v| v.as_str()).unwrap_or("anonymous");
            self.hellos.push(name.to_string());
        }

        fn count(&mut self, _args: &Args) {
            self.counts += 1;
        }
    }

    impl Component for Configured {
        fn events() -> EventDeclarations<Self> {
            EventDeclarations::from_json_str(CONFIG).unwrap_or_default()
        }

        fn method(name: &str) -> Option<Method<Self>> {
            match name {
                "say_hello" => Some(Self::say_hello),
                "count" => Some(Self::count),
                _ => None,
            }
        }
    }

    /// Same event declared twice: the closure overrides the method name.
    #[derive(Default)]
    struct Overridden {
        via_method: u32,
        via_closure: u32,
    }

    impl Overridden {
        fn bump(&mut self, _args: &Args) {
            self.via_method += 1;
        }
    }

    impl Component for Overridden {
        fn events() -> EventDeclarations<Self> {
            EventDeclarations::new()
                .on("ping", HandlerDecl::method("bump"))
                .on(
                    "ping",
                    HandlerDecl::callback(|c: &mut Overridden, _| c.via_closure += 1),
                )
        }

        fn method(name: &str) -> Option<Method<Self>> {
            (name == "bump").then_some(Self::bump as Method<Self>)
        }
    }

    /// Keys deliberately out of alphabetical order.
    const ORDERED: &str = r#"{
        "zeta": { "handler": "first", "immediate": true },
        "alpha": { "handler": "second", "immediate": true }
    }"#;

    #[derive(Default)]
    struct Ordered {
        calls: Vec<&'static str>,
    }

    impl Ordered {
        fn first(&mut self, _args: &Args) {
            self.calls.push("first");
        }

        fn second(&mut self, _args: &Args) {
            self.calls.push("second");
        }
    }

    impl Component for Ordered {
        fn events() -> EventDeclarations<Self> {
            EventDeclarations::from_json_str(ORDERED).unwrap_or_default()
        }

        fn method(name: &str) -> Option<Method<Self>> {
            match name {
                "first" => Some(Self::first),
                "second" => Some(Self::second),
                _ => None,
            }
        }
    }

    fn app_with_sink() -> (App, Rc<RecordingSink>) {
        let sink = Rc::new(RecordingSink::new());
        let mut app = App::new("declarations");
        app.use_plugin(EventsPlugin::with_sink(sink.clone()));
        (app, sink)
    }

    // =============================================================================
    // END TO END
    // =============================================================================

    #[test]
    fn json_declarations_resolve_against_method_table() {
        let (app, _sink) = app_with_sink();
        let bus = app.events().cloned().unwrap();

        let component = app.create(Configured::default());
        assert_eq!(component.state().counts, 1, "boot is immediate");

        bus.emit("greet", &args!["ada"]);
        bus.emit("greet", &[]);
        assert_eq!(component.state().hellos, vec!["ada", "anonymous"]);

        bus.emit("tick", &[]);
        bus.emit("tick", &[]);
        bus.emit("boot", &[]);
        assert_eq!(component.state().counts, 3, "tick once, boot twice");
    }

    #[test]
    fn invalid_shapes_are_reported_and_skipped() {
        let (app, sink) = app_with_sink();
        let bus = app.events().cloned().unwrap();

        let component = app.create(Configured::default());

        assert_eq!(sink.count("invalid_handler"), 3, "broken, nothing, wrong-handler");
        assert_eq!(sink.count("missing_handler"), 3, "no-handler, empty-handler, list");
        assert_eq!(sink.count("missing_method"), 1, "gone");

        for event in [
            "broken",
            "nothing",
            "no-handler",
            "empty-handler",
            "wrong-handler",
            "list",
            "gone",
        ] {
            assert!(!bus.has_listeners(event), "{event} must not subscribe");
        }

        let tracker = component.tracker().unwrap();
        assert_eq!(tracker.events(), vec!["boot", "greet", "tick"]);
    }

    #[test]
    fn diagnostics_name_the_offending_event() {
        let (app, sink) = app_with_sink();
        let _component = app.create(Configured::default());

        let gone = sink
            .records()
            .into_iter()
            .find(|d| d.as_label() == "missing_method")
            .unwrap();
        assert_eq!(gone.event(), Some("gone"));
        assert!(gone.to_string().contains("not_a_method"));
    }

    #[test]
    fn json_declarations_are_set_up_in_written_order() {
        let (app, sink) = app_with_sink();
        let component = app.create(Ordered::default());

        assert_eq!(component.state().calls, vec!["first", "second"]);
        assert!(sink.is_empty());
    }

    #[test]
    fn last_declaration_for_a_name_wins() {
        let (app, sink) = app_with_sink();
        let bus = app.events().cloned().unwrap();

        let component = app.create(Overridden::default());
        bus.emit("ping", &[]);

        assert_eq!(bus.listener_count("ping"), 1);
        assert_eq!(component.state().via_method, 0);
        assert_eq!(component.state().via_closure, 1);
        assert!(sink.is_empty());
    }

    #[test]
    fn duplicate_json_keys_keep_the_last_value() {
        let decls: EventDeclarations<Configured> =
            EventDeclarations::from_json_str(r#"{ "greet": "count", "greet": "say_hello" }"#)
                .unwrap();

        assert_eq!(decls.len(), 1);
        assert!(matches!(decls.get("greet"), Some(HandlerDecl::Method(m)) if m == "say_hello"));
    }

    #[test]
    fn non_object_configuration_is_rejected() {
        let err = EventDeclarations::<Configured>::from_json_str(r#"["greet"]"#).unwrap_err();
        assert!(matches!(err, DeclarationError::NotAnObject { found: "array" }));

        let err = EventDeclarations::<Configured>::from_json_str("{ not json").unwrap_err();
        assert!(matches!(err, DeclarationError::Parse(_)));
    }

    #[test]
    fn merged_declarations_subscribe_together() {
        let base = EventDeclarations::<Configured>::from_json_str(r#"{ "greet": "say_hello" }"#)
            .unwrap();
        let extra = EventDeclarations::new().on(
            "tick",
            HandlerDecl::callback(|c: &mut Configured, _| c.counts += 10),
        );
        let merged = base.merge(extra);

        assert_eq!(merged.names().collect::<Vec<_>>(), vec!["greet", "tick"]);
    }
}
