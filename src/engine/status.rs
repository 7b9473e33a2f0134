//! Status texts shown to the user.
//!
//! The engine records *which* message applies, not the rendered string.
//! Rendering happens on demand for a language, the current key bindings and
//! the reference length, so switching language or rebinding a key updates
//! whatever is on screen without touching engine state.

use crate::i18n::{tr_key, Language};
use crate::model::{Calibration, HotkeyAction, HotkeyBindings};

/// The short result line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ResultText {
    /// Nothing measured yet, or markers cleared.
    Idle,
    /// First calibration point stored.
    CalibrationPoint,
    /// Calibration finished with this pixel length.
    Calibrated { pixels: f64 },
    /// First measurement point stored.
    MeasurementPoint,
    /// Last measured distance.
    Distance { meters: f64 },
}

/// The longer "what to do next" line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InstructionText {
    /// Fresh start without a calibration.
    Welcome,
    /// Fresh start with a calibration loaded from settings.
    CalibrationLoaded,
    /// Waiting for the second calibration point.
    CalibrationSecondPoint,
    /// Calibration just finished.
    CalibrationCompleted,
    /// Calibration typed in by the user.
    CalibrationApplied,
    /// Waiting for the second measurement point.
    MeasurementSecondPoint,
    /// A measurement just finished.
    MeasurementCompleted,
    /// Markers cleared while calibrated.
    Cleared,
    /// Markers cleared without a calibration.
    ClearedUncalibrated,
}

/// Everything the rendered texts depend on besides the status itself.
#[derive(Debug, Clone, Copy)]
pub struct StatusContext<'a> {
    pub language: Language,
    pub bindings: &'a HotkeyBindings,
    pub reference_meters: f64,
}

/// Result and instruction lines together.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Status {
    pub result: ResultText,
    pub instruction: InstructionText,
}

impl Status {
    pub fn new(result: ResultText, instruction: InstructionText) -> Self {
        Self {
            result,
            instruction,
        }
    }

    /// Status shown right after start-up.
    pub fn initial(calibrated: bool) -> Self {
        let instruction = if calibrated {
            InstructionText::CalibrationLoaded
        } else {
            InstructionText::Welcome
        };
        Self::new(ResultText::Idle, instruction)
    }

    /// Render `(result, instruction)` strings.
    pub fn render(&self, ctx: &StatusContext<'_>) -> (String, String) {
        (
            render_result(self.result, ctx),
            render_instruction(self.instruction, ctx),
        )
    }
}

fn render_result(result: ResultText, ctx: &StatusContext<'_>) -> String {
    let lang = ctx.language;
    let meters = ctx.reference_meters;
    match (result, lang) {
        (ResultText::Idle, _) => tr_key("Distance", lang).into_owned(),
        (ResultText::CalibrationPoint, Language::Russian) => "Калибровка: точка 1/2".into(),
        (ResultText::CalibrationPoint, Language::English) => "Calibration: point 1/2".into(),
        (ResultText::Calibrated { pixels }, Language::Russian) => {
            format!("Калибровка: {pixels:.1} px = {meters} м")
        }
        (ResultText::Calibrated { pixels }, Language::English) => {
            format!("Calibration: {pixels:.1} px = {meters} m")
        }
        (ResultText::MeasurementPoint, Language::Russian) => "Измерение: точка A/B".into(),
        (ResultText::MeasurementPoint, Language::English) => "Measurement: point A/B".into(),
        (ResultText::Distance { meters }, Language::Russian) => {
            format!("Расстояние: {meters:.1} м")
        }
        (ResultText::Distance { meters }, Language::English) => {
            format!("Distance: {meters:.1} m")
        }
    }
}

fn render_instruction(instruction: InstructionText, ctx: &StatusContext<'_>) -> String {
    let measure = ctx.bindings.key_for(HotkeyAction::Measure);
    let clear = ctx.bindings.key_for(HotkeyAction::Clear);
    let calibrate = ctx.bindings.key_for(HotkeyAction::Calibrate);
    let meters = ctx.reference_meters;

    use InstructionText::*;
    match (instruction, ctx.language) {
        (Welcome, Language::Russian) => {
            format!("Нажмите {calibrate} на первой точке расстояния {meters} м в игре")
        }
        (Welcome, Language::English) => {
            format!("Press {calibrate} on the first point of a {meters} m distance in game")
        }
        (CalibrationLoaded, Language::Russian) => {
            format!("Калибровка загружена. Нажмите {measure} для измерения")
        }
        (CalibrationLoaded, Language::English) => {
            format!("Calibration loaded. Press {measure} to measure")
        }
        (CalibrationSecondPoint, Language::Russian) => {
            format!("Нажмите {calibrate} на второй точке расстояния {meters} м")
        }
        (CalibrationSecondPoint, Language::English) => {
            format!("Press {calibrate} on the second point of the {meters} m distance")
        }
        (CalibrationCompleted, Language::Russian) => {
            format!("Калибровка завершена! Нажмите {measure} для измерения расстояний")
        }
        (CalibrationCompleted, Language::English) => {
            format!("Calibration complete! Press {measure} to measure distances")
        }
        (CalibrationApplied, Language::Russian) => {
            format!("Калибровка установлена! Нажмите {measure} для измерения расстояний")
        }
        (CalibrationApplied, Language::English) => {
            format!("Calibration set! Press {measure} to measure distances")
        }
        (MeasurementSecondPoint, Language::Russian) => {
            format!("Нажмите {measure} на второй точке")
        }
        (MeasurementSecondPoint, Language::English) => {
            format!("Press {measure} on the second point")
        }
        (MeasurementCompleted, Language::Russian) => {
            format!("{measure} - новое измерение, {clear} - очистить")
        }
        (MeasurementCompleted, Language::English) => {
            format!("{measure} - new measurement, {clear} - clear")
        }
        (Cleared, Language::Russian) => {
            format!("Метки очищены. Нажмите {measure} для измерения")
        }
        (Cleared, Language::English) => format!("Markers cleared. Press {measure} to measure"),
        (ClearedUncalibrated, Language::Russian) => {
            format!("Метки очищены. Сначала калибровка: {calibrate}")
        }
        (ClearedUncalibrated, Language::English) => {
            format!("Markers cleared. Calibrate first with {calibrate}")
        }
    }
}

/// The separate "is a calibration active" line.
pub fn calibration_status(calibration: Option<Calibration>, lang: Language) -> String {
    match (calibration, lang) {
        (Some(cal), Language::Russian) => {
            format!("Калибровка: {:.1} px", cal.reference_pixels())
        }
        (Some(cal), Language::English) => {
            format!("Calibrated: {:.1} px", cal.reference_pixels())
        }
        (None, _) => tr_key("Not calibrated", lang).into_owned(),
    }
}
