//! Windows application state.

pub mod state;

pub use state::{AppController, WindowsRuntimeState, STATE};
