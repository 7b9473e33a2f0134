//! Platform-specific implementations.
//!
//! Only Windows has a backend. Each backend provides a hotkey backend, the
//! overlay window and the process entry glue.

#[cfg(target_os = "windows")]
pub mod windows;
