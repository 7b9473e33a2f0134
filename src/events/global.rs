//! Process-wide event bus.
//!
//! Win32 window procedures are plain `extern "system"` functions with no
//! user pointer to carry a publisher, so they publish through this static
//! bus. It is initialised once in `main` via [`init_event_bus`].
//!
//! - the [`EventPublisher`] is stored in a `OnceLock`; it is `Send + Sync`
//! - the [`EventBus`] is stored behind a `Mutex`; only the UI thread locks it

use std::sync::{Mutex, OnceLock};

use log::warn;

use super::bus::{EventBus, EventPublisher};
use super::types::AppEvent;

static PUBLISHER: OnceLock<EventPublisher> = OnceLock::new();

static BUS: OnceLock<Mutex<EventBus>> = OnceLock::new();

/// Initialise the global event bus. Later calls are no-ops.
pub fn init_event_bus() {
    let bus = EventBus::new();
    let publisher = bus.publisher();
    if BUS.set(Mutex::new(bus)).is_err() || PUBLISHER.set(publisher).is_err() {
        warn!("event bus already initialised");
    }
}

/// Publisher handle for the global bus, `None` before [`init_event_bus`].
pub fn publisher() -> Option<EventPublisher> {
    PUBLISHER.get().cloned()
}

/// Publish to the global bus.
///
/// Events published before initialisation are logged and dropped.
pub fn publish(event: AppEvent) {
    match PUBLISHER.get() {
        Some(publisher) => publisher.publish(event),
        None => warn!("event bus not initialised, dropping {}", event.description()),
    }
}

/// Drain every event published since the last call, oldest first.
pub fn drain_events() -> Vec<AppEvent> {
    let Some(bus) = BUS.get() else {
        return Vec::new();
    };
    bus.lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
        .drain()
}
