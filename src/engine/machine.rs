//! Calibration and measurement state machine.
//!
//! The engine owns the interaction mode, the two point sequences and the
//! active calibration. It draws through an [`OverlaySurface`] passed in per
//! call and reports what happened as a list of [`EngineEvent`]s; it never
//! talks to the OS or to the user directly.
//!
//! ```text
//!   Idle ──Calibrate──▶ Calibrating ──Calibrate (pt 2)──▶ Idle
//!   Idle ──Measure────▶ Measuring   ──Measure (pt B)───▶ Idle
//!   any  ──Clear──────▶ Idle (Calibrating stays Calibrating)
//! ```

use log::{debug, info};

use super::status::{InstructionText, ResultText, Status};
use crate::error::EngineError;
use crate::model::{
    distance, Calibration, HotkeyAction, HotkeyBindings, Mode, PairProgress,
    PointPair, ScreenPoint, Settings, DEFAULT_REFERENCE_METERS,
};
use crate::overlay::{Color, OverlaySurface};

/// Outcome of one completed measurement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeasurementResult {
    pub pixel_distance: f64,
    pub meters: f64,
}

/// Observable consequences of a handled action, in the order they happened.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    StatusChanged(Status),
    /// New calibration in pixels per reference length.
    CalibrationUpdated(f64),
    Measured(MeasurementResult),
}

#[derive(Debug, Clone)]
pub struct MeasurementEngine {
    mode: Mode,
    calibration_points: PointPair,
    measurement_points: PointPair,
    calibration: Option<Calibration>,
    reference_meters: f64,
    bindings: HotkeyBindings,
    status: Status,
}

impl Default for MeasurementEngine {
    fn default() -> Self {
        Self::new(&Settings::default())
    }
}

impl MeasurementEngine {
    /// Start in `Idle` with the saved calibration, if any.
    pub fn new(settings: &Settings) -> Self {
        let reference_meters =
            if settings.reference_meters.is_finite() && settings.reference_meters > 0.0 {
                settings.reference_meters
            } else {
                DEFAULT_REFERENCE_METERS
            };
        Self {
            mode: Mode::Idle,
            calibration_points: PointPair::default(),
            measurement_points: PointPair::default(),
            calibration: settings.calibration,
            reference_meters,
            bindings: settings.bindings,
            status: Status::initial(settings.calibration.is_some()),
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn calibration(&self) -> Option<Calibration> {
        self.calibration
    }

    pub fn calibration_points(&self) -> &PointPair {
        &self.calibration_points
    }

    pub fn measurement_points(&self) -> &PointPair {
        &self.measurement_points
    }

    pub fn reference_meters(&self) -> f64 {
        self.reference_meters
    }

    pub fn bindings(&self) -> &HotkeyBindings {
        &self.bindings
    }

    /// The status most recently reported.
    pub fn status(&self) -> Status {
        self.status
    }

    /// Route one hotkey action.
    ///
    /// `point` is the cursor position captured when the hotkey fired; it is
    /// required for Measure and Calibrate and ignored for Clear. A rejected
    /// action leaves the engine and the overlay untouched.
    pub fn handle(
        &mut self,
        action: HotkeyAction,
        point: Option<ScreenPoint>,
        overlay: &mut dyn OverlaySurface,
    ) -> Result<Vec<EngineEvent>, EngineError> {
        debug!("engine: {} in {:?}", action.description(), self.mode);
        match action {
            HotkeyAction::Clear => Ok(self.clear(overlay)),
            HotkeyAction::Calibrate => {
                let point = point.ok_or(EngineError::MissingCursorPosition(action))?;
                self.calibrate(point, overlay)
            }
            HotkeyAction::Measure => {
                let point = point.ok_or(EngineError::MissingCursorPosition(action))?;
                self.measure(point, overlay)
            }
        }
    }

    /// Add a calibration point; the second one finishes calibration.
    pub fn calibrate(
        &mut self,
        point: ScreenPoint,
        overlay: &mut dyn OverlaySurface,
    ) -> Result<Vec<EngineEvent>, EngineError> {
        // Validate before touching anything so a rejection is side-effect free.
        let completes = self.mode == Mode::Calibrating && self.calibration_points.first().is_some();
        let new_calibration = match (completes, self.calibration_points.first()) {
            (true, Some(first)) => Some(
                Calibration::from_points(first, point).ok_or(EngineError::DegenerateCalibration)?,
            ),
            _ => None,
        };

        if self.mode != Mode::Calibrating {
            if !self.measurement_points.is_empty() {
                debug!("engine: abandoning pending measurement pair");
            }
            self.calibration_points.reset();
            self.measurement_points.reset();
            self.mode = Mode::Calibrating;
        }

        match self.calibration_points.push(point) {
            PairProgress::First(p1) => {
                overlay.add_marker(p1, Color::YELLOW, "1");
                debug!("engine: calibration point 1 at ({:.0}, {:.0})", p1.x, p1.y);
                Ok(vec![self.set_status(
                    ResultText::CalibrationPoint,
                    InstructionText::CalibrationSecondPoint,
                )])
            }
            PairProgress::Complete(p1, p2) => {
                let Some(calibration) = new_calibration else {
                    return Err(EngineError::DegenerateCalibration);
                };
                overlay.add_marker(p2, Color::YELLOW, "2");
                overlay.add_line(p1, p2, Color::YELLOW, self.reference_meters);

                let pixels = calibration.reference_pixels();
                self.calibration = Some(calibration);
                self.mode = Mode::Idle;
                info!(
                    "Calibrated: {:.1} px = {} m",
                    pixels, self.reference_meters
                );
                Ok(vec![
                    EngineEvent::CalibrationUpdated(pixels),
                    self.set_status(
                        ResultText::Calibrated { pixels },
                        InstructionText::CalibrationCompleted,
                    ),
                ])
            }
        }
    }

    /// Add a measurement point; the second one produces a distance.
    pub fn measure(
        &mut self,
        point: ScreenPoint,
        overlay: &mut dyn OverlaySurface,
    ) -> Result<Vec<EngineEvent>, EngineError> {
        let calibration = self.calibration.ok_or(EngineError::CalibrationRequired)?;

        if self.mode != Mode::Measuring {
            if !self.calibration_points.is_empty() && self.mode == Mode::Calibrating {
                debug!("engine: abandoning pending calibration pair");
            }
            self.calibration_points.reset();
            self.measurement_points.reset();
            self.mode = Mode::Measuring;
        }

        match self.measurement_points.push(point) {
            PairProgress::First(a) => {
                overlay.add_marker(a, Color::LIME, "A");
                Ok(vec![self.set_status(
                    ResultText::MeasurementPoint,
                    InstructionText::MeasurementSecondPoint,
                )])
            }
            PairProgress::Complete(a, b) => {
                let pixel_distance = distance(a, b);
                let meters = calibration.to_meters(pixel_distance, self.reference_meters);

                overlay.add_marker(b, Color::LIME, "B");
                overlay.add_line(a, b, Color::LIME, meters);

                self.measurement_points.reset();
                self.mode = Mode::Idle;
                info!("Measured {:.1} px = {:.1} m", pixel_distance, meters);
                Ok(vec![
                    EngineEvent::Measured(MeasurementResult {
                        pixel_distance,
                        meters,
                    }),
                    self.set_status(
                        ResultText::Distance { meters },
                        InstructionText::MeasurementCompleted,
                    ),
                ])
            }
        }
    }

    /// Remove every marker and line and forget pending points.
    ///
    /// Idempotent. Calibration mode survives so the user can start over on
    /// the same reference.
    pub fn clear(&mut self, overlay: &mut dyn OverlaySurface) -> Vec<EngineEvent> {
        self.calibration_points.reset();
        self.measurement_points.reset();
        overlay.clear();
        if self.mode != Mode::Calibrating {
            self.mode = Mode::Idle;
        }
        let instruction = if self.calibration.is_some() {
            InstructionText::Cleared
        } else {
            InstructionText::ClearedUncalibrated
        };
        debug!("engine: cleared, mode {:?}", self.mode);
        vec![self.set_status(ResultText::Idle, instruction)]
    }

    /// Replace the calibration with a manually entered one.
    pub fn set_calibration(&mut self, calibration: Calibration) -> Vec<EngineEvent> {
        let pixels = calibration.reference_pixels();
        self.calibration = Some(calibration);
        info!("Calibration set manually: {:.1} px", pixels);
        vec![
            EngineEvent::CalibrationUpdated(pixels),
            self.set_status(
                ResultText::Calibrated { pixels },
                InstructionText::CalibrationApplied,
            ),
        ]
    }

    /// Status texts rendered after this call name the new keys.
    pub fn set_bindings(&mut self, bindings: HotkeyBindings) {
        self.bindings = bindings;
    }

    /// Ignores values that are not positive and finite.
    pub fn set_reference_meters(&mut self, meters: f64) {
        if meters.is_finite() && meters > 0.0 {
            self.reference_meters = meters;
        }
    }

    fn set_status(&mut self, result: ResultText, instruction: InstructionText) -> EngineEvent {
        self.status = Status::new(result, instruction);
        EngineEvent::StatusChanged(self.status)
    }
}
