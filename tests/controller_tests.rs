//! Tests for the controller: hotkey lifecycle, status output, persistence.

use std::cell::RefCell;
use std::rc::Rc;

use rangefinder::app::{Controller, Flow, StatusBoard, StatusSink};
use rangefinder::events::AppEvent;
use rangefinder::handlers::dispatch_all;
use rangefinder::i18n::Language;
use rangefinder::input::{HotkeyBackend, HotkeyRegistry};
use rangefinder::model::{HotkeyAction, HotkeyBindings, Key, Mode, ScreenPoint};
use rangefinder::overlay::{Color, OverlaySurface, Scene};
use rangefinder::storage::{load_settings, ConfigStore};

type Journal = Rc<RefCell<Vec<String>>>;

/// Hotkey backend that records every call and refuses `taken` keys.
struct FakeBackend {
    journal: Journal,
    taken: Vec<Key>,
    held: Vec<(i32, Key)>,
}

impl HotkeyBackend for FakeBackend {
    fn reserve(&mut self, id: i32, key: Key) -> bool {
        if self.taken.contains(&key) {
            self.journal.borrow_mut().push(format!("refuse {key}"));
            return false;
        }
        self.journal.borrow_mut().push(format!("reserve {key}"));
        self.held.push((id, key));
        true
    }

    fn release(&mut self, id: i32) {
        self.journal.borrow_mut().push(format!("release {id}"));
        self.held.retain(|(held, _)| *held != id);
    }
}

/// Scene that also writes show/close into the shared journal.
struct JournalOverlay {
    journal: Journal,
    scene: Scene,
}

impl OverlaySurface for JournalOverlay {
    fn add_marker(&mut self, point: ScreenPoint, color: Color, label: &str) {
        self.scene.add_marker(point, color, label);
    }

    fn add_line(&mut self, from: ScreenPoint, to: ScreenPoint, color: Color, meters: f64) {
        self.scene.add_line(from, to, color, meters);
    }

    fn clear(&mut self) {
        self.scene.clear();
    }

    fn show(&mut self) {
        self.journal.borrow_mut().push("show".into());
        self.scene.show();
    }

    fn close(&mut self) {
        self.journal.borrow_mut().push("close".into());
        self.scene.close();
    }
}

type TestController = Controller<JournalOverlay, HotkeyRegistry<FakeBackend>>;

fn controller_with(store: ConfigStore, taken: Vec<Key>) -> (TestController, Journal) {
    let journal: Journal = Rc::default();
    let overlay = JournalOverlay {
        journal: journal.clone(),
        scene: Scene::new(),
    };
    let backend = FakeBackend {
        journal: journal.clone(),
        taken,
        held: Vec::new(),
    };
    let controller = Controller::new(overlay, HotkeyRegistry::new(backend), store);
    (controller, journal)
}

fn started() -> (TestController, Journal, StatusBoard) {
    let (mut controller, journal) = controller_with(ConfigStore::ephemeral(), Vec::new());
    let mut board = StatusBoard::new();
    controller.start(&mut board);
    journal.borrow_mut().clear();
    (controller, journal, board)
}

fn hotkey(action: HotkeyAction, x: f64, y: f64) -> AppEvent {
    AppEvent::Hotkey {
        action,
        point: Some(ScreenPoint::new(x, y)),
    }
}

fn calibrate(controller: &mut TestController, board: &mut StatusBoard) {
    dispatch_all(
        controller,
        [
            hotkey(HotkeyAction::Calibrate, 0.0, 0.0),
            hotkey(HotkeyAction::Calibrate, 300.0, 0.0),
        ],
        board,
    );
}

// === Hotkey lifecycle ===

#[test]
fn start_shows_overlay_and_registers_all_keys() {
    let (mut controller, journal) = controller_with(ConfigStore::ephemeral(), Vec::new());
    let mut board = StatusBoard::new();
    controller.start(&mut board);

    assert_eq!(
        *journal.borrow(),
        vec!["show", "reserve F9", "reserve F10", "reserve F8"]
    );
    assert!(controller.registration().is_complete());
    assert_eq!(board.warning_text(), None);
}

#[test]
fn taken_key_becomes_warning_not_failure() {
    let (mut controller, _) = controller_with(ConfigStore::ephemeral(), vec![Key::F10]);
    let mut board = StatusBoard::new();
    controller.start(&mut board);

    let report = controller.registration();
    assert_eq!(report.conflicts, vec![(HotkeyAction::Clear, Key::F10)]);
    assert_eq!(report.registered.len(), 2);
    assert!(board.warning_text().unwrap().contains("F10"));
}

#[test]
fn startup_conflict_warning_follows_language_switch() {
    let (mut controller, _) = controller_with(ConfigStore::ephemeral(), vec![Key::F10]);
    let mut board = StatusBoard::new();
    controller.start(&mut board);
    assert_eq!(
        board.warning_text(),
        Some("Клавиша занята другой программой: F10")
    );

    controller.handle_event(AppEvent::ToggleLanguage, &mut board);

    assert_eq!(
        board.warning_text(),
        Some("Key is taken by another program: F10")
    );
    assert!(board.result().starts_with("Distance"));
}

#[test]
fn warning_is_dropped_by_the_next_status_change() {
    let (mut controller, _, mut board) = started();
    controller.handle_event(hotkey(HotkeyAction::Measure, 5.0, 5.0), &mut board);
    controller.handle_event(AppEvent::ClearAll, &mut board);

    controller.handle_event(AppEvent::ToggleLanguage, &mut board);

    assert_eq!(board.warning_text(), None);
}

#[test]
fn rebinding_releases_old_keys_before_reserving_new() {
    let (mut controller, journal, mut board) = started();
    let bindings = HotkeyBindings::default().with_key(HotkeyAction::Measure, Key::F2);

    controller.handle_event(AppEvent::SetHotkeys(bindings), &mut board);

    let log = journal.borrow();
    let last_release = log.iter().rposition(|e| e.starts_with("release")).unwrap();
    let first_reserve = log.iter().position(|e| e.starts_with("reserve")).unwrap();
    assert!(last_release < first_reserve);
    assert!(log.contains(&"reserve F2".to_string()));
    assert_eq!(controller.hotkeys().active().len(), 3);
    assert!(!log.contains(&"close".to_string()));
}

#[test]
fn rebinding_renames_keys_in_instructions() {
    let (mut controller, _, mut board) = started();
    controller.handle_event(AppEvent::SetLanguage(Language::English), &mut board);
    let bindings = HotkeyBindings::default().with_key(HotkeyAction::Calibrate, Key::F6);

    controller.handle_event(AppEvent::SetHotkeys(bindings), &mut board);

    assert!(board.instruction().contains("F6"));
}

#[test]
fn duplicate_bindings_are_refused() {
    let (mut controller, journal, mut board) = started();
    let bindings = HotkeyBindings::default().with_key(HotkeyAction::Clear, Key::F9);

    controller.handle_event(AppEvent::SetHotkeys(bindings), &mut board);

    assert!(journal.borrow().is_empty());
    assert_eq!(*controller.engine().bindings(), HotkeyBindings::default());
    assert!(board.warning_text().is_some());
}

#[test]
fn shutdown_releases_hotkeys_before_closing_overlay() {
    let (mut controller, journal, mut board) = started();

    let flow = controller.handle_event(AppEvent::Shutdown, &mut board);

    assert_eq!(flow, Flow::Exit);
    let log = journal.borrow();
    let close = log.iter().position(|e| e == "close").unwrap();
    let released_before_close = log[..close]
        .iter()
        .filter(|e| e.starts_with("release"))
        .count();
    assert_eq!(released_before_close, 3);
    assert!(controller.hotkeys().backend().held.is_empty());
}

#[test]
fn events_after_shutdown_are_not_dispatched() {
    let (mut controller, _, mut board) = started();
    let flow = dispatch_all(
        &mut controller,
        [AppEvent::Shutdown, hotkey(HotkeyAction::Calibrate, 1.0, 1.0)],
        &mut board,
    );
    assert_eq!(flow, Flow::Exit);
    assert_eq!(controller.engine().mode(), Mode::Idle);
}

// === Status output ===

#[test]
fn measure_before_calibration_warns_and_changes_nothing() {
    let (mut controller, _, mut board) = started();
    let result_before = board.result().to_string();

    controller.handle_event(hotkey(HotkeyAction::Measure, 5.0, 5.0), &mut board);

    assert_eq!(board.warning_text(), Some("Сначала выполните калибровку!"));
    assert_eq!(board.result(), result_before);
    assert_eq!(controller.engine().mode(), Mode::Idle);
    assert!(controller.overlay().scene.is_empty());
}

#[test]
fn full_session_reports_distance() {
    let (mut controller, _, mut board) = started();
    controller.handle_event(AppEvent::SetLanguage(Language::English), &mut board);
    calibrate(&mut controller, &mut board);

    assert_eq!(board.calibration_px(), Some(300.0));
    assert_eq!(board.calibration(), "Calibrated: 300.0 px");

    dispatch_all(
        &mut controller,
        [
            hotkey(HotkeyAction::Measure, 0.0, 0.0),
            hotkey(HotkeyAction::Measure, 150.0, 0.0),
        ],
        &mut board,
    );
    assert_eq!(board.result(), "Distance: 50.0 m");
}

#[test]
fn language_switch_rerenders_without_changing_state() {
    let (mut controller, _, mut board) = started();
    calibrate(&mut controller, &mut board);
    let russian = board.result().to_string();
    let mode = controller.engine().mode();

    controller.handle_event(AppEvent::ToggleLanguage, &mut board);

    assert_eq!(controller.language(), Language::English);
    assert_ne!(board.result(), russian);
    assert!(board.result().starts_with("Calibration: 300.0 px"));
    assert_eq!(controller.engine().mode(), mode);
}

#[test]
fn clear_all_empties_overlay() {
    let (mut controller, _, mut board) = started();
    calibrate(&mut controller, &mut board);
    assert!(!controller.overlay().scene.is_empty());

    controller.handle_event(AppEvent::ClearAll, &mut board);

    assert!(controller.overlay().scene.is_empty());
    assert!(controller.engine().calibration().is_some());
}

#[test]
fn invalid_manual_calibration_warns() {
    let (mut controller, _, mut board) = started();
    controller.handle_event(AppEvent::SetCalibration("abc".into()), &mut board);

    assert!(controller.engine().calibration().is_none());
    assert_eq!(
        board.warning_text(),
        Some("Введите корректное положительное число!")
    );
}

#[test]
fn missing_cursor_position_is_ignored() {
    let (mut controller, _, mut board) = started();
    controller.handle_event(
        AppEvent::Hotkey {
            action: HotkeyAction::Calibrate,
            point: None,
        },
        &mut board,
    );
    assert_eq!(controller.engine().mode(), Mode::Idle);
}

// === Persistence ===

#[test]
fn calibration_is_saved_immediately() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("Rangefinder").join("config.json");
    let (mut controller, _) = controller_with(ConfigStore::open(&path), Vec::new());
    let mut board = StatusBoard::new();
    controller.start(&mut board);

    calibrate(&mut controller, &mut board);

    let saved = load_settings(&path).unwrap();
    assert_eq!(saved.calibration.map(|c| c.reference_pixels()), Some(300.0));
}

#[test]
fn manual_calibration_and_bindings_survive_restart() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    {
        let (mut controller, _) = controller_with(ConfigStore::open(&path), Vec::new());
        let mut board = StatusBoard::new();
        controller.start(&mut board);
        controller.handle_event(AppEvent::SetCalibration("412,5".into()), &mut board);
        controller.handle_event(
            AppEvent::SetHotkeys(HotkeyBindings::default().with_key(HotkeyAction::Clear, Key::Delete)),
            &mut board,
        );
        controller.handle_event(AppEvent::SetLanguage(Language::English), &mut board);
        controller.handle_event(AppEvent::Shutdown, &mut board);
    }

    let (controller, _) = controller_with(ConfigStore::open(&path), Vec::new());
    assert_eq!(
        controller.engine().calibration().map(|c| c.reference_pixels()),
        Some(412.5)
    );
    assert_eq!(
        controller.engine().bindings().key_for(HotkeyAction::Clear),
        Key::Delete
    );
    assert_eq!(controller.language(), Language::English);
}

#[test]
fn corrupt_config_falls_back_to_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(&path, "{ not json").unwrap();

    let store = ConfigStore::open(&path);

    assert_eq!(store.settings(), &rangefinder::model::Settings::default());
}

// === Status sink contract ===

#[derive(Default)]
struct RecordingSink {
    calls: Vec<String>,
}

impl StatusSink for RecordingSink {
    fn status_changed(&mut self, result: &str, instruction: &str) {
        self.calls.push(format!("status {result} | {instruction}"));
    }

    fn calibration_updated(&mut self, pixels: f64) {
        self.calls.push(format!("calibration {pixels}"));
    }

    fn calibration_status(&mut self, text: &str) {
        self.calls.push(format!("calibration_status {text}"));
    }

    fn warning(&mut self, text: &str) {
        self.calls.push(format!("warning {text}"));
    }
}

#[test]
fn sink_receives_calibration_update_once_per_calibration() {
    let (mut controller, _, _) = started();
    let mut sink = RecordingSink::default();

    controller.handle_event(hotkey(HotkeyAction::Calibrate, 0.0, 0.0), &mut sink);
    controller.handle_event(hotkey(HotkeyAction::Calibrate, 0.0, 120.0), &mut sink);

    let updates: Vec<_> = sink
        .calls
        .iter()
        .filter(|c| c.starts_with("calibration "))
        .collect();
    assert_eq!(updates, vec!["calibration 120"]);
}
