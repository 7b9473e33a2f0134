//! Application core shared by every platform backend.
//!
//! - controller.rs: routes [`AppEvent`](crate::events::AppEvent)s to the
//!   engine, the hotkeys, the overlay and the settings store
//! - status_board.rs: the [`StatusSink`] trait and the status panel model

pub mod controller;
pub mod status_board;

pub use controller::{Controller, Flow};
pub use status_board::{StatusBoard, StatusSink};
