#![cfg_attr(
    all(not(debug_assertions), target_os = "windows"),
    windows_subsystem = "windows"
)]

#[cfg(target_os = "windows")]
mod windows_main;

fn main() {
    rangefinder::logging::init();
    rangefinder::events::init_event_bus();

    #[cfg(target_os = "windows")]
    windows_main::run();

    #[cfg(not(target_os = "windows"))]
    log::error!(
        "rangefinder needs global hotkeys and a layered overlay window; only Windows is supported"
    );
}
