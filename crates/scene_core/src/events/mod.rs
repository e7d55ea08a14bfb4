//! Event bus
//!
//! Named publish/subscribe with two delivery modes:
//! - Immediate: [`EventBus::emit_immediate`] runs every listener now
//! - Queued: [`EventBus::emit`] records the event; [`EventBus::process_events`]
//!   delivers everything queued so far, in FIFO order
//!
//! A listener that fails (returns `Err` or panics) is logged with the event
//! name and skipped; remaining listeners and later queued events still run.
//!
//! The bus is single-threaded. Handles are cheap clones sharing one state, so
//! a bus can be passed down explicitly; [`EventBus::instance`] additionally
//! provides a lazily created per-thread default.

use std::any::Any;
use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::rc::{Rc, Weak};

use crate::core::config::EventBusConfig;
use crate::foundation::ids::EntityId;

/// Well-known event names used by the scene runtime
pub mod names {
    /// A scene finished loading; args: scene id, scene name
    pub const SCENE_LOADED: &str = "scene_loaded";
    /// A sprite's texture finished loading; args: entity, texture path
    pub const SPRITE_LOADED: &str = "sprite_loaded";
    /// Once per host frame, before queued events are drained; args: frame index
    pub const FRAME: &str = "frame";
}

/// Event argument
#[derive(Debug, Clone, PartialEq)]
pub enum EventArg {
    /// Boolean flag
    Bool(bool),
    /// Integer value
    Int(i64),
    /// Floating point value
    Float(f64),
    /// Text value
    Text(String),
    /// Position coordinates
    Position(f32, f32),
    /// Entity reference
    Entity(EntityId),
    /// Arbitrary structured payload
    Json(serde_json::Value),
}

impl From<bool> for EventArg {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for EventArg {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<f64> for EventArg {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for EventArg {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for EventArg {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<EntityId> for EventArg {
    fn from(value: EntityId) -> Self {
        Self::Entity(value)
    }
}

impl From<serde_json::Value> for EventArg {
    fn from(value: serde_json::Value) -> Self {
        Self::Json(value)
    }
}

/// A named event with positional arguments
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    /// Event name
    pub name: String,
    /// Positional arguments
    pub args: Vec<EventArg>,
}

impl Event {
    /// Create an event
    pub fn new(name: impl Into<String>, args: Vec<EventArg>) -> Self {
        Self {
            name: name.into(),
            args,
        }
    }

    /// Argument at `index`
    pub fn arg(&self, index: usize) -> Option<&EventArg> {
        self.args.get(index)
    }

    /// Text argument at `index`
    pub fn text(&self, index: usize) -> Option<&str> {
        match self.arg(index) {
            Some(EventArg::Text(text)) => Some(text),
            _ => None,
        }
    }

    /// Integer argument at `index`
    pub fn int(&self, index: usize) -> Option<i64> {
        match self.arg(index) {
            Some(EventArg::Int(value)) => Some(*value),
            _ => None,
        }
    }
}

/// Error a listener may return
pub type ListenerError = Box<dyn std::error::Error>;

/// Listener outcome
pub type ListenerResult = Result<(), ListenerError>;

type Callback = Rc<dyn Fn(&Event) -> ListenerResult>;

/// Identifies one listener registration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

struct Registration {
    id: ListenerId,
    once: bool,
    callback: Callback,
}

#[derive(Default)]
struct BusState {
    listeners: HashMap<String, Vec<Registration>>,
    queue: Vec<Event>,
    next_listener: u64,
    warn_queue_len: usize,
    // Bumped by clear(); a drain in progress stops when it changes
    generation: u64,
}

impl BusState {
    fn add(&mut self, name: &str, once: bool, callback: Callback) -> ListenerId {
        self.next_listener += 1;
        let id = ListenerId(self.next_listener);
        self.listeners
            .entry(name.to_string())
            .or_default()
            .push(Registration { id, once, callback });
        id
    }

    fn remove(&mut self, name: &str, id: ListenerId) -> bool {
        let Some(registrations) = self.listeners.get_mut(name) else {
            return false;
        };
        let before = registrations.len();
        registrations.retain(|registration| registration.id != id);
        let removed = registrations.len() != before;
        if registrations.is_empty() {
            self.listeners.remove(name);
        }
        removed
    }

    fn contains(&self, name: &str, id: ListenerId) -> bool {
        self.listeners
            .get(name)
            .is_some_and(|registrations| {
                registrations.iter().any(|registration| registration.id == id)
            })
    }
}

/// Handle returned by [`EventBus::on`] and [`EventBus::once`]
///
/// Dropping it leaves the listener registered.
#[derive(Clone)]
pub struct Subscription {
    event: String,
    id: ListenerId,
    bus: Weak<RefCell<BusState>>,
}

impl Subscription {
    /// Listener id, usable with [`EventBus::off`]
    pub fn id(&self) -> ListenerId {
        self.id
    }

    /// Event name the listener is registered for
    pub fn event(&self) -> &str {
        &self.event
    }

    /// Remove exactly this registration
    ///
    /// Returns `false` if it was already gone; calling twice is harmless.
    pub fn unsubscribe(&self) -> bool {
        self.bus
            .upgrade()
            .is_some_and(|state| remove_listener(&state, &self.event, self.id))
    }
}

fn remove_listener(state: &RefCell<BusState>, name: &str, id: ListenerId) -> bool {
    state.borrow_mut().remove(name, id)
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("event", &self.event)
            .field("id", &self.id)
            .finish()
    }
}

thread_local! {
    static INSTANCE: RefCell<Option<EventBus>> = const { RefCell::new(None) };
}

/// Publish/subscribe hub
#[derive(Clone)]
pub struct EventBus {
    state: Rc<RefCell<BusState>>,
}

impl EventBus {
    /// Create a bus with no listeners and an empty queue
    pub fn new() -> Self {
        Self::with_config(&EventBusConfig::default())
    }

    /// Create a bus using `config`
    pub fn with_config(config: &EventBusConfig) -> Self {
        let state = BusState {
            warn_queue_len: config.warn_queue_len,
            ..BusState::default()
        };
        Self {
            state: Rc::new(RefCell::new(state)),
        }
    }

    /// Shared bus for the current thread, created on first use
    pub fn instance() -> Self {
        INSTANCE.with(|slot| slot.borrow_mut().get_or_insert_with(Self::new).clone())
    }

    /// Discard the shared bus
    ///
    /// The discarded bus is cleared; the next [`EventBus::instance`] call
    /// creates a fresh one.
    pub fn reset_instance() {
        let previous = INSTANCE.with(|slot| slot.borrow_mut().take());
        if let Some(bus) = previous {
            bus.clear();
        }
    }

    /// Whether two handles refer to the same bus
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.state, &other.state)
    }

    /// Register a persistent listener
    pub fn on<F>(&self, name: &str, listener: F) -> Subscription
    where
        F: Fn(&Event) -> ListenerResult + 'static,
    {
        self.subscribe(name, false, Rc::new(listener))
    }

    /// Register a listener that is removed right before its first invocation
    pub fn once<F>(&self, name: &str, listener: F) -> Subscription
    where
        F: Fn(&Event) -> ListenerResult + 'static,
    {
        self.subscribe(name, true, Rc::new(listener))
    }

    fn subscribe(&self, name: &str, once: bool, callback: Callback) -> Subscription {
        let id = self.state.borrow_mut().add(name, once, callback);
        Subscription {
            event: name.to_string(),
            id,
            bus: Rc::downgrade(&self.state),
        }
    }

    /// Remove a specific listener; returns whether it was registered
    pub fn off(&self, name: &str, id: ListenerId) -> bool {
        self.state.borrow_mut().remove(name, id)
    }

    /// Remove every listener for `name`
    pub fn remove_all_listeners(&self, name: &str) {
        self.state.borrow_mut().listeners.remove(name);
    }

    /// Number of listeners for `name`
    pub fn listener_count(&self, name: &str) -> usize {
        self.state.borrow().listeners.get(name).map_or(0, Vec::len)
    }

    /// Whether `name` has any listener
    pub fn has_listeners(&self, name: &str) -> bool {
        self.listener_count(name) > 0
    }

    /// Names with at least one listener, sorted
    pub fn registered_events(&self) -> Vec<String> {
        let mut names: Vec<String> = self.state.borrow().listeners.keys().cloned().collect();
        names.sort_unstable();
        names
    }

    /// Number of queued, undelivered events
    pub fn queued_len(&self) -> usize {
        self.state.borrow().queue.len()
    }

    /// Remove all listeners and discard queued events
    ///
    /// Called from a listener during [`EventBus::process_events`], this also
    /// discards the rest of the batch being drained.
    pub fn clear(&self) {
        let mut state = self.state.borrow_mut();
        state.listeners.clear();
        state.queue.clear();
        state.generation = state.generation.wrapping_add(1);
    }

    /// Queue an event for the next [`EventBus::process_events`]
    pub fn emit(&self, name: &str, args: Vec<EventArg>) {
        let mut state = self.state.borrow_mut();
        state.queue.push(Event::new(name, args));
        if state.warn_queue_len > 0 && state.queue.len() == state.warn_queue_len + 1 {
            log::warn!(
                "Event queue exceeded {} pending events (latest: '{}'); is it being drained?",
                state.warn_queue_len,
                name
            );
        }
    }

    /// Deliver an event to its listeners now
    ///
    /// Returns the number of listeners that failed.
    pub fn emit_immediate(&self, name: &str, args: Vec<EventArg>) -> usize {
        self.dispatch(&Event::new(name, args))
    }

    /// Deliver every event queued so far, in FIFO order
    ///
    /// Events queued while draining wait for the next call. If a listener
    /// calls [`EventBus::clear`], the undelivered remainder is dropped.
    /// Returns the number of events delivered.
    pub fn process_events(&self) -> usize {
        let (pending, generation) = {
            let mut state = self.state.borrow_mut();
            (std::mem::take(&mut state.queue), state.generation)
        };

        let mut delivered = 0;
        for event in &pending {
            if self.state.borrow().generation != generation {
                log::debug!(
                    "Event bus cleared while draining; dropped {} queued event(s)",
                    pending.len() - delivered
                );
                break;
            }
            self.dispatch(event);
            delivered += 1;
        }
        if delivered > 0 {
            log::trace!("Processed {} queued event(s)", delivered);
        }
        delivered
    }

    /// Run the listeners registered for `event` when dispatch starts
    fn dispatch(&self, event: &Event) -> usize {
        let snapshot: Vec<(ListenerId, bool, Callback)> = self
            .state
            .borrow()
            .listeners
            .get(&event.name)
            .map(|registrations| {
                registrations
                    .iter()
                    .map(|registration| {
                        (registration.id, registration.once, Rc::clone(&registration.callback))
                    })
                    .collect()
            })
            .unwrap_or_default();

        let mut failures = 0;
        for (id, once, callback) in snapshot {
            // Skip listeners removed by an earlier listener; consume once-listeners
            let live = if once {
                self.state.borrow_mut().remove(&event.name, id)
            } else {
                self.state.borrow().contains(&event.name, id)
            };
            if !live {
                continue;
            }

            match panic::catch_unwind(AssertUnwindSafe(|| callback(event))) {
                Ok(Ok(())) => {}
                Ok(Err(err)) => {
                    failures += 1;
                    log::error!("Error in event listener for '{}': {}", event.name, err);
                }
                Err(payload) => {
                    failures += 1;
                    log::error!(
                        "Event listener for '{}' panicked: {}",
                        event.name,
                        panic_message(payload.as_ref())
                    );
                }
            }
        }
        failures
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (events, queued) = {
            let state = self.state.borrow();
            (state.listeners.len(), state.queue.len())
        };
        f.debug_struct("EventBus")
            .field("events", &events)
            .field("queued", &queued)
            .finish()
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(message) = payload.downcast_ref::<&str>() {
        *message
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.as_str()
    } else {
        "<non-string panic payload>"
    }
}
