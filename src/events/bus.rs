//! Event bus backed by an mpsc channel.
//!
//! Any thread can publish through an [`EventPublisher`]; the UI thread
//! drains with [`EventBus::drain`].

use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};

use super::types::AppEvent;

/// Multi-producer, single-consumer queue of [`AppEvent`]s.
///
/// # Example
///
/// ```
/// use rangefinder::events::{AppEvent, EventBus};
///
/// let bus = EventBus::new();
/// let publisher = bus.publisher();
///
/// publisher.publish(AppEvent::ClearAll);
///
/// let events = bus.drain();
/// assert_eq!(events.len(), 1);
/// ```
pub struct EventBus {
    sender: Sender<AppEvent>,
    receiver: Receiver<AppEvent>,
}

impl EventBus {
    pub fn new() -> Self {
        let (sender, receiver) = mpsc::channel();
        Self { sender, receiver }
    }

    /// Get a publisher handle that can be cloned and sent to other threads.
    pub fn publisher(&self) -> EventPublisher {
        EventPublisher {
            sender: self.sender.clone(),
        }
    }

    /// Try to receive the next event without blocking.
    pub fn try_recv(&self) -> Option<AppEvent> {
        match self.receiver.try_recv() {
            Ok(event) => Some(event),
            Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => None,
        }
    }

    /// Drain all pending events, oldest first.
    pub fn drain(&self) -> Vec<AppEvent> {
        std::iter::from_fn(|| self.try_recv()).collect()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

/// A cloneable, thread-safe event publisher.
#[derive(Clone)]
pub struct EventPublisher {
    sender: Sender<AppEvent>,
}

impl EventPublisher {
    /// Queue an event. Never blocks.
    ///
    /// If the receiver has been dropped the app is shutting down and the
    /// event is discarded.
    pub fn publish(&self, event: AppEvent) {
        if self.sender.send(event).is_err() {
            log::debug!("event bus closed, event dropped");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::Language;
    use crate::model::{HotkeyAction, HotkeyBindings, ScreenPoint};

    fn measure_at(x: f64, y: f64) -> AppEvent {
        AppEvent::Hotkey {
            action: HotkeyAction::Measure,
            point: Some(ScreenPoint::new(x, y)),
        }
    }

    #[test]
    fn test_create_bus() {
        let bus = EventBus::new();
        assert!(bus.drain().is_empty());
    }

    #[test]
    fn test_publish_and_receive_multiple_events() {
        let bus = EventBus::new();
        let publisher = bus.publisher();

        publisher.publish(measure_at(1.0, 1.0));
        publisher.publish(AppEvent::ClearAll);
        publisher.publish(AppEvent::Shutdown);

        let events = bus.drain();
        assert_eq!(events.len(), 3);
        assert_eq!(events[0], measure_at(1.0, 1.0));
        assert_eq!(events[1], AppEvent::ClearAll);
        assert_eq!(events[2], AppEvent::Shutdown);
    }

    #[test]
    fn test_drain_empties_queue() {
        let bus = EventBus::new();
        let publisher = bus.publisher();

        publisher.publish(AppEvent::ClearAll);
        publisher.publish(AppEvent::ToggleLanguage);

        assert_eq!(bus.drain().len(), 2);
        assert!(bus.drain().is_empty());
    }

    #[test]
    fn test_publishers_on_other_threads() {
        let bus = EventBus::new();
        let handles: Vec<_> = (0..4)
            .map(|i| {
                let publisher = bus.publisher();
                std::thread::spawn(move || publisher.publish(measure_at(i as f64, 0.0)))
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(bus.drain().len(), 4);
    }

    #[test]
    fn test_try_recv_returns_events_in_order() {
        let bus = EventBus::default();
        let publisher = bus.publisher();

        publisher.publish(AppEvent::SetLanguage(Language::English));
        publisher.publish(AppEvent::SetHotkeys(HotkeyBindings::default()));

        assert_eq!(bus.try_recv(), Some(AppEvent::SetLanguage(Language::English)));
        assert_eq!(
            bus.try_recv(),
            Some(AppEvent::SetHotkeys(HotkeyBindings::default()))
        );
        assert_eq!(bus.try_recv(), None);
    }

    #[test]
    fn test_publish_after_bus_dropped_is_silent() {
        let bus = EventBus::new();
        let publisher = bus.publisher();
        drop(bus);
        publisher.publish(AppEvent::Shutdown);
    }
}
