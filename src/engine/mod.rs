//! Calibration and measurement logic.
//!
//! Portable: depends only on the model and the [`OverlaySurface`] trait.
//!
//! [`OverlaySurface`]: crate::overlay::OverlaySurface

pub mod machine;
pub mod status;

pub use machine::{EngineEvent, MeasurementEngine, MeasurementResult};
pub use status::{calibration_status, InstructionText, ResultText, Status, StatusContext};
