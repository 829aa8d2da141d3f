//! # Subscription Resolver
//!
//! Turns a component's [`EventDeclarations`] into live bus subscriptions on
//! creation, and removes them again on destruction.
//!
//! ## Setup
//!
//! ```text
//! for (event, decl) in declarations (declaration order):
//!   Callback          ─► bind ─► on(event)
//!   Method(name)      ─► lookup ─► bind ─► on(event)        │ missing: warn, skip
//!   Options{handler}  ─► bind handler ─► on/once(event)     │ no handler: warn, skip
//!                        └─ immediate ─► call once, no args
//!   Unsupported       ─► warn, skip
//! every successful subscription is recorded in the tracker
//! ```
//!
//! A bad declaration only ever skips itself; the remaining declarations of the
//! same component are still subscribed.

use crate::component::Component;
use crate::declaration::{EventDeclarations, Handler, HandlerDecl, HandlerOptions, HandlerTarget};
use crate::tracker::SubscriptionTracker;
use shared_bus::{Callback, Diagnostic, DiagnosticSink, EventSubscriber, Value};
use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::{Rc, Weak};
use tracing::debug;

/// Subscribe every declaration for the instance `vm` and return the tracker
/// holding what was registered.
pub fn setup<C, B>(
    vm: &Rc<RefCell<C>>,
    bus: &B,
    declarations: EventDeclarations<C>,
) -> SubscriptionTracker
where
    C: Component,
    B: EventSubscriber + ?Sized,
{
    let sink = bus.diagnostics();
    let mut resolver = Resolver {
        bus,
        binder: Binder::new(vm, Rc::clone(&sink)),
        sink,
        tracker: SubscriptionTracker::new(),
    };

    for (event, decl) in declarations {
        resolver.setup_handler(&event, decl);
    }

    debug!(
        component = C::component_name(),
        subscriptions = resolver.tracker.len(),
        "Component events set up"
    );
    resolver.tracker
}

/// Remove every tracked subscription from the bus and clear the tracker.
pub fn teardown<B>(tracker: &mut SubscriptionTracker, bus: &B)
where
    B: EventSubscriber + ?Sized,
{
    let mut removed = 0usize;
    for (event, callback) in tracker.drain() {
        bus.off(Some(event.as_str()), Some(&callback));
        removed += 1;
    }
    debug!(removed, "Component events torn down");
}

/// Binds handlers to one component instance.
///
/// Callbacks hold only a weak reference: delivering to a dropped instance does
/// nothing. Every callback made by the same binder shares one backlog. While
/// one of the instance's handlers runs (and holds `&mut` state), deliveries to
/// the same instance are queued and run in arrival order as soon as that
/// handler returns, still inside the outer `emit`.
pub struct Binder<C> {
    vm: Weak<RefCell<C>>,
    queue: Rc<DeliveryQueue<C>>,
    sink: Rc<dyn DiagnosticSink>,
}

struct DeliveryQueue<C> {
    busy: Cell<bool>,
    backlog: RefCell<VecDeque<Pending<C>>>,
}

struct Pending<C> {
    handler: Handler<C>,
    args: Vec<Value>,
}

/// Clears the busy flag even if a handler panics.
struct BusyGuard<'a>(&'a Cell<bool>);

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.0.set(false);
    }
}

impl<C: 'static> Binder<C> {
    /// Binder for the instance `vm`, reporting to `sink`.
    pub fn new(vm: &Rc<RefCell<C>>, sink: Rc<dyn DiagnosticSink>) -> Self {
        Self {
            vm: Rc::downgrade(vm),
            queue: Rc::new(DeliveryQueue {
                busy: Cell::new(false),
                backlog: RefCell::new(VecDeque::new()),
            }),
            sink,
        }
    }

    /// Wrap `handler` so that the bus can call it for this instance.
    pub fn bind(&self, event: &str, handler: Handler<C>) -> Callback {
        let weak = Weak::clone(&self.vm);
        let queue = Rc::clone(&self.queue);
        let sink = Rc::clone(&self.sink);
        let event = event.to_owned();

        Callback::new(move |args| {
            let Some(vm) = weak.upgrade() else {
                debug!(event = %event, "Component dropped, delivery skipped");
                return;
            };

            if queue.busy.get() {
                debug!(event = %event, "Component busy, delivery queued");
                queue.backlog.borrow_mut().push_back(Pending {
                    handler: Rc::clone(&handler),
                    args: args.to_vec(),
                });
                return;
            }

            // Borrowed from outside any handler, e.g. a live `Instance::state()`.
            let Ok(mut state) = vm.try_borrow_mut() else {
                sink.report(&Diagnostic::StateBorrowed {
                    event: event.clone(),
                });
                return;
            };

            queue.busy.set(true);
            let _busy = BusyGuard(&queue.busy);

            handler(&mut *state, args);
            loop {
                let next = queue.backlog.borrow_mut().pop_front();
                let Some(pending) = next else {
                    break;
                };
                (pending.handler)(&mut *state, &pending.args);
            }
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BusMethod {
    On,
    Once,
}

struct Resolver<'a, C, B: ?Sized> {
    bus: &'a B,
    binder: Binder<C>,
    sink: Rc<dyn DiagnosticSink>,
    tracker: SubscriptionTracker,
}

impl<C, B> Resolver<'_, C, B>
where
    C: Component,
    B: EventSubscriber + ?Sized,
{
    fn setup_handler(&mut self, event: &str, decl: HandlerDecl<C>) {
        match decl {
            HandlerDecl::Callback(handler) => {
                let callback = self.bind(event, handler);
                self.subscribe(event, callback, BusMethod::On);
            }
            HandlerDecl::Method(name) => {
                if let Some(callback) = self.bind_method(event, &name) {
                    self.subscribe(event, callback, BusMethod::On);
                }
            }
            HandlerDecl::Options(options) => self.setup_options(event, options),
            HandlerDecl::Unsupported(kind) => {
                debug!(event = %event, kind, "Unsupported handler shape");
                self.report(Diagnostic::InvalidHandler {
                    event: event.to_owned(),
                });
            }
        }
    }

    fn setup_options(&mut self, event: &str, options: HandlerOptions<C>) {
        let method = if options.once {
            BusMethod::Once
        } else {
            BusMethod::On
        };

        let callback = match options.handler {
            None => None,
            Some(HandlerTarget::Method(name)) if name.is_empty() => None,
            Some(HandlerTarget::Callback(handler)) => Some(Some(self.bind(event, handler))),
            Some(HandlerTarget::Method(name)) => Some(self.bind_method(event, &name)),
            Some(HandlerTarget::Unsupported(kind)) => {
                debug!(event = %event, kind, "Unsupported options handler");
                self.report(Diagnostic::InvalidHandler {
                    event: event.to_owned(),
                });
                Some(None)
            }
        };

        // Outer None: no handler at all. Inner None: already reported.
        let callback = match callback {
            None => {
                self.report(Diagnostic::MissingHandler {
                    event: event.to_owned(),
                });
                return;
            }
            Some(None) => return,
            Some(Some(callback)) => callback,
        };

        self.subscribe(event, callback.clone(), method);

        if options.immediate {
            debug!(event = %event, "Invoking immediate handler");
            callback.call(&[]);
        }
    }

    fn bind(&self, event: &str, handler: Handler<C>) -> Callback {
        self.binder.bind(event, handler)
    }

    fn bind_method(&self, event: &str, name: &str) -> Option<Callback> {
        let Some(method) = C::method(name) else {
            self.report(Diagnostic::MissingMethod {
                event: event.to_owned(),
                method: name.to_owned(),
            });
            return None;
        };
        let handler: Handler<C> = Rc::new(method);
        Some(self.bind(event, handler))
    }

    fn subscribe(&mut self, event: &str, callback: Callback, method: BusMethod) {
        self.tracker.track(event, callback.clone());
        match method {
            BusMethod::On => self.bus.on(event, callback),
            BusMethod::Once => self.bus.once(event, callback),
        }
    }

    fn report(&self, diagnostic: Diagnostic) {
        self.sink.report(&diagnostic);
    }
}
