//! Event handlers.
//!
//! - dispatcher.rs: drains the event bus into the controller

pub mod dispatcher;

pub use dispatcher::{dispatch_all, dispatch_events};
