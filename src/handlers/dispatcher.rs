//! Event dispatcher.
//!
//! Called from the UI thread's 16 ms timer. Drains every pending event and
//! hands them to the controller in publication order.
//!
//! ```text
//! drain_events() → dispatch_events() → Controller::handle_event()
//! ```

use crate::app::{Controller, Flow, StatusSink};
use crate::events::{drain_events, AppEvent};
use crate::input::HotkeyListener;
use crate::overlay::OverlaySurface;

/// Dispatch all pending events from the global event bus.
pub fn dispatch_events<O, L>(controller: &mut Controller<O, L>, sink: &mut dyn StatusSink) -> Flow
where
    O: OverlaySurface,
    L: HotkeyListener,
{
    dispatch_all(controller, drain_events(), sink)
}

/// Dispatch a batch of events, stopping at the first one that ends the app.
///
/// Events queued after a `Shutdown` are dropped.
pub fn dispatch_all<O, L>(
    controller: &mut Controller<O, L>,
    events: impl IntoIterator<Item = AppEvent>,
    sink: &mut dyn StatusSink,
) -> Flow
where
    O: OverlaySurface,
    L: HotkeyListener,
{
    for event in events {
        if controller.handle_event(event, sink) == Flow::Exit {
            return Flow::Exit;
        }
    }
    Flow::Continue
}
