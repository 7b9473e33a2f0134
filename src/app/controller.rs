//! Owns the engine, the overlay, the hotkeys and the settings, and applies
//! one [`AppEvent`] at a time.

use log::{debug, error, info, warn};

use super::status_board::StatusSink;
use crate::engine::{calibration_status, EngineEvent, MeasurementEngine, StatusContext};
use crate::error::{ConfigError, EngineError};
use crate::events::AppEvent;
use crate::i18n::{tr_key, Language};
use crate::input::{HotkeyListener, RegistrationReport};
use crate::model::{parse_calibration_input, Calibration, HotkeyBindings, Key};
use crate::overlay::OverlaySurface;
use crate::storage::ConfigStore;

/// A refused request, kept so it can be shown again in another language.
#[derive(Debug, Clone, PartialEq)]
enum Warning {
    CalibrateFirst,
    PointsMustDiffer,
    InvalidCalibration,
    HotkeysUnavailable(Vec<Key>),
    DuplicateHotkey(Key),
}

impl Warning {
    fn render(&self, language: Language) -> String {
        match self {
            Warning::CalibrateFirst => tr_key("Calibrate first", language).into_owned(),
            Warning::PointsMustDiffer => tr_key("Points must differ", language).into_owned(),
            Warning::InvalidCalibration => tr_key("Invalid calibration", language).into_owned(),
            Warning::HotkeysUnavailable(keys) => {
                let keys: Vec<String> = keys.iter().map(Key::to_string).collect();
                format!(
                    "{}: {}",
                    tr_key("Hotkey unavailable", language),
                    keys.join(", ")
                )
            }
            Warning::DuplicateHotkey(key) => {
                format!("{}: {key}", tr_key("Duplicate hotkey", language))
            }
        }
    }
}

/// Whether the message loop should keep running after an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

pub struct Controller<O: OverlaySurface, L: HotkeyListener> {
    engine: MeasurementEngine,
    overlay: O,
    hotkeys: L,
    store: ConfigStore,
    language: Language,
    last_report: RegistrationReport,
    /// Shown until the next status change.
    warning: Option<Warning>,
}

impl<O: OverlaySurface, L: HotkeyListener> Controller<O, L> {
    /// Build from whatever the store loaded. Nothing is shown or registered
    /// until [`start`](Self::start).
    pub fn new(overlay: O, hotkeys: L, store: ConfigStore) -> Self {
        let settings = store.settings().clone();
        Self {
            engine: MeasurementEngine::new(&settings),
            overlay,
            hotkeys,
            store,
            language: settings.language,
            last_report: RegistrationReport::default(),
            warning: None,
        }
    }

    pub fn engine(&self) -> &MeasurementEngine {
        &self.engine
    }

    pub fn overlay(&self) -> &O {
        &self.overlay
    }

    pub fn overlay_mut(&mut self) -> &mut O {
        &mut self.overlay
    }

    pub fn hotkeys(&self) -> &L {
        &self.hotkeys
    }

    pub fn store(&self) -> &ConfigStore {
        &self.store
    }

    pub fn language(&self) -> Language {
        self.language
    }

    /// Result of the most recent hotkey registration.
    pub fn registration(&self) -> &RegistrationReport {
        &self.last_report
    }

    /// Show the overlay, register hotkeys and publish the initial status.
    pub fn start(&mut self, sink: &mut dyn StatusSink) {
        self.overlay.show();
        if let Some(cal) = self.engine.calibration() {
            sink.calibration_updated(cal.reference_pixels());
        }
        // Status first: a status change clears the panel's warning line.
        self.publish_status(sink);
        self.register_hotkeys(sink);
        info!(
            "Started: calibration {}, language {}",
            self.engine
                .calibration()
                .map(|c| format!("{:.1} px", c.reference_pixels()))
                .unwrap_or_else(|| "none".into()),
            self.language.code()
        );
    }

    /// Apply one event.
    pub fn handle_event(&mut self, event: AppEvent, sink: &mut dyn StatusSink) -> Flow {
        debug!("event: {}", event.description());
        match event {
            AppEvent::Hotkey { action, point } => {
                match self.engine.handle(action, point, &mut self.overlay) {
                    Ok(events) => self.apply(events, sink),
                    Err(e) => self.reject(e, sink),
                }
            }
            AppEvent::ClearAll => {
                let events = self.engine.clear(&mut self.overlay);
                self.apply(events, sink);
            }
            AppEvent::SetHotkeys(bindings) => self.rebind(bindings, sink),
            AppEvent::SetCalibration(input) => match parse_calibration_input(&input) {
                Ok(calibration) => {
                    let events = self.engine.set_calibration(calibration);
                    self.apply(events, sink);
                }
                Err(e) => {
                    warn!("{e}");
                    self.show_warning(Warning::InvalidCalibration, sink);
                }
            },
            AppEvent::SetLanguage(language) => self.set_language(language, sink),
            AppEvent::ToggleLanguage => self.set_language(self.language.toggled(), sink),
            AppEvent::Shutdown => {
                self.shutdown();
                return Flow::Exit;
            }
        }
        Flow::Continue
    }

    /// Release hotkeys, close the overlay, then save settings. Idempotent.
    pub fn shutdown(&mut self) {
        self.hotkeys.unregister_all();
        self.overlay.close();
        self.save();
        info!("Shut down");
    }

    fn register_hotkeys(&mut self, sink: &mut dyn StatusSink) {
        let report = self.hotkeys.register(self.engine.bindings());
        if !report.is_complete() {
            let keys = report.conflicts.iter().map(|&(_, key)| key).collect();
            self.show_warning(Warning::HotkeysUnavailable(keys), sink);
        }
        self.last_report = report;
    }

    fn rebind(&mut self, bindings: HotkeyBindings, sink: &mut dyn StatusSink) {
        if let Err(e) = bindings.validate() {
            warn!("Rejected bindings: {e}");
            match e {
                ConfigError::DuplicateHotkey { key, .. } => {
                    self.show_warning(Warning::DuplicateHotkey(key), sink)
                }
                other => sink.warning(&other.to_string()),
            }
            return;
        }

        self.store.update(|s| s.bindings = bindings);
        self.save();
        self.engine.set_bindings(bindings);
        info!(
            "Hotkeys: measure {}, clear {}, calibrate {}",
            bindings.measure, bindings.clear, bindings.calibrate
        );
        self.publish_status(sink);
        self.register_hotkeys(sink);
    }

    fn set_language(&mut self, language: Language, sink: &mut dyn StatusSink) {
        if language == self.language {
            return;
        }
        self.language = language;
        self.store.update(|s| s.language = language);
        info!("Language: {}", language.code());
        let warning = self.warning.take();
        self.publish_status(sink);
        if let Some(warning) = warning {
            self.show_warning(warning, sink);
        }
    }

    fn apply(&mut self, events: Vec<EngineEvent>, sink: &mut dyn StatusSink) {
        for event in events {
            match event {
                EngineEvent::StatusChanged(_) => self.publish_status(sink),
                EngineEvent::CalibrationUpdated(pixels) => {
                    self.store
                        .update(|s| s.calibration = Calibration::new(pixels));
                    self.save();
                    sink.calibration_updated(pixels);
                    sink.calibration_status(&calibration_status(
                        self.engine.calibration(),
                        self.language,
                    ));
                }
                EngineEvent::Measured(result) => {
                    debug!(
                        "measurement: {:.1} px -> {:.2} m",
                        result.pixel_distance, result.meters
                    );
                }
            }
        }
    }

    fn reject(&mut self, err: EngineError, sink: &mut dyn StatusSink) {
        match err {
            EngineError::CalibrationRequired => {
                warn!("Measure pressed before calibration");
                self.show_warning(Warning::CalibrateFirst, sink);
            }
            EngineError::DegenerateCalibration => {
                warn!("Calibration points are identical, ignored");
                self.show_warning(Warning::PointsMustDiffer, sink);
            }
            EngineError::MissingCursorPosition(action) => {
                warn!("Cursor position unavailable, {} ignored", action.description());
            }
        }
    }

    /// Render the engine's status for the current language and bindings.
    fn publish_status(&mut self, sink: &mut dyn StatusSink) {
        self.warning = None;
        let ctx = StatusContext {
            language: self.language,
            bindings: self.engine.bindings(),
            reference_meters: self.engine.reference_meters(),
        };
        let (result, instruction) = self.engine.status().render(&ctx);
        sink.status_changed(&result, &instruction);
        sink.calibration_status(&calibration_status(self.engine.calibration(), self.language));
    }

    fn show_warning(&mut self, warning: Warning, sink: &mut dyn StatusSink) {
        sink.warning(&warning.render(self.language));
        self.warning = Some(warning);
    }

    fn save(&mut self) {
        if let Err(e) = self.store.flush() {
            error!("Failed to save settings: {e}");
        }
    }
}
