//! # Component Host
//!
//! Minimal application/instance model the event plugin attaches to.
//!
//! - [`App`] owns plugin installation and the per-application bus.
//! - [`Instance`] owns one component's state plus its subscription tracker.
//!
//! The creation and destruction paths call the resolver directly:
//!
//! ```text
//! App::create(state) ──► Instance { Uninitialized }
//!                          │ bus installed ──► Component::attach_events
//!                          │ events declared
//!                          ▼
//!                        resolver::setup ──► Tracking
//!                          │
//! Instance::destroy/Drop ──► resolver::teardown ──► TornDown
//! ```

use crate::component::Component;
use crate::resolver;
use crate::tracker::{LifecycleState, SubscriptionTracker};
use shared_bus::EventBus;
use std::any::TypeId;
use std::cell::{Ref, RefCell, RefMut};
use std::collections::HashSet;
use std::fmt;
use std::rc::Rc;
use tracing::debug;

/// Something that extends an [`App`] when installed.
pub trait Plugin: 'static {
    /// Called once per application, the first time the plugin type is used.
    fn install(&self, app: &mut App);
}

/// One application: a plugin registry and the shared bus handed to every
/// component instance it creates.
pub struct App {
    name: String,
    events: Option<EventBus>,
    installed: HashSet<TypeId>,
}

impl App {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            events: None,
            installed: HashSet::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Install `plugin` unless a plugin of the same type already was.
    pub fn use_plugin<P: Plugin>(&mut self, plugin: P) -> &mut Self {
        if !self.installed.insert(TypeId::of::<P>()) {
            debug!(
                app = %self.name,
                plugin = std::any::type_name::<P>(),
                "Plugin already installed"
            );
            return self;
        }
        plugin.install(self);
        self
    }

    pub fn is_installed<P: Plugin>(&self) -> bool {
        self.installed.contains(&TypeId::of::<P>())
    }

    /// Make `bus` the application's event bus.
    ///
    /// Every instance created afterwards is given a handle to it and gets its
    /// declarations subscribed.
    pub fn provide_events(&mut self, bus: EventBus) {
        self.events = Some(bus);
    }

    /// The application's bus, once the events plugin is installed.
    pub fn events(&self) -> Option<&EventBus> {
        self.events.as_ref()
    }

    /// Create a component instance around `state`.
    pub fn create<C: Component>(&self, state: C) -> Instance<C> {
        let mut instance = Instance {
            vm: Rc::new(RefCell::new(state)),
            events: self.events.clone(),
            tracker: None,
            lifecycle: LifecycleState::Uninitialized,
        };
        instance.created();
        instance
    }
}

impl fmt::Debug for App {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("App")
            .field("name", &self.name)
            .field("events", &self.events)
            .field("plugins", &self.installed.len())
            .finish()
    }
}

/// A live component: its state, its bus handle and its subscriptions.
///
/// Dropping an instance tears its subscriptions down like
/// [`destroy`](Self::destroy) does.
pub struct Instance<C: Component> {
    vm: Rc<RefCell<C>>,
    events: Option<EventBus>,
    tracker: Option<SubscriptionTracker>,
    lifecycle: LifecycleState,
}

impl<C: Component> Instance<C> {
    /// The application bus, if the events plugin is installed.
    pub fn events(&self) -> Option<&EventBus> {
        self.events.as_ref()
    }

    /// Borrow the component state.
    ///
    /// # Panics
    ///
    /// If the state is mutably borrowed, e.g. from inside one of its handlers.
    pub fn state(&self) -> Ref<'_, C> {
        self.vm.borrow()
    }

    /// Mutably borrow the component state.
    ///
    /// # Panics
    ///
    /// If the state is already borrowed.
    pub fn state_mut(&self) -> RefMut<'_, C> {
        self.vm.borrow_mut()
    }

    /// Shared handle to the component state, as the bound callbacks see it.
    pub fn shared(&self) -> Rc<RefCell<C>> {
        Rc::clone(&self.vm)
    }

    pub fn lifecycle(&self) -> LifecycleState {
        self.lifecycle
    }

    /// Subscriptions currently held, while tracking.
    pub fn tracker(&self) -> Option<&SubscriptionTracker> {
        self.tracker.as_ref()
    }

    /// Tear down subscriptions and release the instance.
    pub fn destroy(mut self) {
        self.before_destroy();
    }

    fn created(&mut self) {
        let Some(bus) = &self.events else {
            return;
        };
        self.vm.borrow_mut().attach_events(bus.clone());

        let declarations = C::events();
        if declarations.is_empty() {
            debug!(component = C::component_name(), "No events declared");
            return;
        }

        self.tracker = Some(resolver::setup(&self.vm, bus, declarations));
        self.lifecycle = LifecycleState::Tracking;
    }

    fn before_destroy(&mut self) {
        if self.lifecycle == LifecycleState::TornDown {
            return;
        }

        if let (Some(mut tracker), Some(bus)) = (self.tracker.take(), &self.events) {
            resolver::teardown(&mut tracker, bus);
        }
        self.lifecycle = LifecycleState::TornDown;
        debug!(component = C::component_name(), "Component destroyed");
    }
}

impl<C: Component> Drop for Instance<C> {
    fn drop(&mut self) {
        self.before_destroy();
    }
}

impl<C: Component> fmt::Debug for Instance<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Instance")
            .field("component", &C::component_name())
            .field("lifecycle", &self.lifecycle)
            .field("tracker", &self.tracker)
            .finish_non_exhaustive()
    }
}
