//! Global hotkey registration.
//!
//! The OS side is a [`HotkeyBackend`]: a table of reservations keyed by a
//! hotkey id. [`HotkeyRegistry`] maps the three actions onto it, tolerates
//! keys already taken by another program, and turns an incoming hotkey id
//! back into an [`AppEvent`].

use log::{debug, info, warn};

use crate::events::AppEvent;
use crate::model::{HotkeyAction, HotkeyBindings, Key, ScreenPoint};

/// OS-level reservation of system-wide keys.
pub trait HotkeyBackend {
    /// Reserve `key` under `id`. Returns false if the OS refused, usually
    /// because another program already owns the key.
    fn reserve(&mut self, id: i32, key: Key) -> bool;

    /// Release the reservation under `id`. Releasing an unknown id is a no-op.
    fn release(&mut self, id: i32);
}

/// Which actions got their key and which did not.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistrationReport {
    pub registered: Vec<(HotkeyAction, Key)>,
    pub conflicts: Vec<(HotkeyAction, Key)>,
}

impl RegistrationReport {
    pub fn is_complete(&self) -> bool {
        self.conflicts.is_empty()
    }
}

/// What the controller needs from the hotkey layer.
pub trait HotkeyListener {
    /// Release every held key, then reserve the keys in `bindings`.
    fn register(&mut self, bindings: &HotkeyBindings) -> RegistrationReport;

    /// Release every held key. Idempotent.
    fn unregister_all(&mut self);
}

/// Keeps track of which action ids are currently reserved.
#[derive(Debug)]
pub struct HotkeyRegistry<B: HotkeyBackend> {
    backend: B,
    active: Vec<(HotkeyAction, Key)>,
}

impl<B: HotkeyBackend> HotkeyRegistry<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            active: Vec::new(),
        }
    }

    /// Currently reserved action/key pairs.
    pub fn active(&self) -> &[(HotkeyAction, Key)] {
        &self.active
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }
}

impl<B: HotkeyBackend> HotkeyListener for HotkeyRegistry<B> {
    fn register(&mut self, bindings: &HotkeyBindings) -> RegistrationReport {
        self.unregister_all();

        let mut report = RegistrationReport::default();
        for (action, key) in bindings.iter() {
            if self.backend.reserve(action.hotkey_id(), key) {
                debug!("hotkey {} -> {}", key, action.description());
                self.active.push((action, key));
                report.registered.push((action, key));
            } else {
                warn!(
                    "Could not register {} for {}: key is taken by another program",
                    key,
                    action.description()
                );
                report.conflicts.push((action, key));
            }
        }
        info!(
            "Registered {}/{} hotkeys",
            report.registered.len(),
            HotkeyAction::ALL.len()
        );
        report
    }

    fn unregister_all(&mut self) {
        for (action, key) in self.active.drain(..) {
            self.backend.release(action.hotkey_id());
            debug!("released {} ({})", key, action.description());
        }
    }
}

impl<B: HotkeyBackend> Drop for HotkeyRegistry<B> {
    fn drop(&mut self) {
        self.unregister_all();
    }
}

/// Translate an OS hotkey id into an event.
///
/// `cursor` is only called for actions that need a point, so Clear never
/// reads the cursor. Unknown ids yield `None`.
pub fn hotkey_event(id: i32, cursor: impl FnOnce() -> Option<ScreenPoint>) -> Option<AppEvent> {
    let action = HotkeyAction::from_hotkey_id(id)?;
    let point = if action.captures_point() {
        cursor()
    } else {
        None
    };
    Some(AppEvent::Hotkey { action, point })
}
