//! Event bus between input handlers and the UI thread.
//!
//! Hotkey and tray callbacks never touch application state. They publish an
//! [`AppEvent`] and return; a 16 ms timer on the UI thread drains the queue
//! and hands each event to the dispatcher.
//!
//! ```text
//! WM_HOTKEY ─┐
//!            ├─ publish() ─▶ mpsc channel ─ drain() ─▶ dispatcher ─▶ Controller
//! tray menu ─┘
//! ```
//!
//! - [`types`]: the `AppEvent` enum
//! - [`bus`]: `EventBus` and `EventPublisher`
//! - [`global`]: process-wide bus used by the Win32 callbacks

pub mod bus;
pub mod global;
pub mod types;

pub use bus::{EventBus, EventPublisher};
pub use global::{drain_events, init_event_bus, publish, publisher};
pub use types::AppEvent;
