//! Where status texts end up.

/// Outbound notifications from the controller to whatever shows status.
pub trait StatusSink {
    /// New result and instruction lines.
    fn status_changed(&mut self, result: &str, instruction: &str);

    /// Calibration changed to this many pixels per reference length.
    fn calibration_updated(&mut self, pixels: f64);

    /// New text for the "is a calibration active" line.
    fn calibration_status(&mut self, text: &str);

    /// Something the user asked for was refused.
    fn warning(&mut self, text: &str);
}

/// Text lines of the status panel drawn on the overlay.
///
/// A warning stays visible until the next status change.
#[derive(Debug, Clone, Default)]
pub struct StatusBoard {
    calibration: String,
    result: String,
    instruction: String,
    warning: Option<String>,
    calibration_px: Option<f64>,
    dirty: bool,
}

impl StatusBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calibration(&self) -> &str {
        &self.calibration
    }

    pub fn result(&self) -> &str {
        &self.result
    }

    pub fn instruction(&self) -> &str {
        &self.instruction
    }

    pub fn warning_text(&self) -> Option<&str> {
        self.warning.as_deref()
    }

    pub fn calibration_px(&self) -> Option<f64> {
        self.calibration_px
    }

    /// Lines top to bottom, warning last. Empty lines are skipped.
    pub fn lines(&self) -> impl Iterator<Item = (&str, bool)> + '_ {
        [
            (self.calibration.as_str(), false),
            (self.result.as_str(), false),
            (self.instruction.as_str(), false),
            (self.warning.as_deref().unwrap_or(""), true),
        ]
        .into_iter()
        .filter(|(text, _)| !text.is_empty())
    }

    /// Returns true once after every change, then resets.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }
}

impl StatusSink for StatusBoard {
    fn status_changed(&mut self, result: &str, instruction: &str) {
        self.result = result.to_string();
        self.instruction = instruction.to_string();
        self.warning = None;
        self.dirty = true;
    }

    fn calibration_updated(&mut self, pixels: f64) {
        self.calibration_px = Some(pixels);
        self.dirty = true;
    }

    fn calibration_status(&mut self, text: &str) {
        self.calibration = text.to_string();
        self.dirty = true;
    }

    fn warning(&mut self, text: &str) {
        self.warning = Some(text.to_string());
        self.dirty = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn warning_clears_on_next_status() {
        let mut board = StatusBoard::new();
        board.warning("Calibrate first!");
        assert_eq!(board.warning_text(), Some("Calibrate first!"));

        board.status_changed("Distance: 1.0 m", "next");
        assert_eq!(board.warning_text(), None);
        assert_eq!(board.result(), "Distance: 1.0 m");
    }

    #[test]
    fn lines_skip_empty_and_flag_warning() {
        let mut board = StatusBoard::new();
        board.status_changed("r", "i");
        board.warning("w");
        let lines: Vec<_> = board.lines().collect();
        assert_eq!(lines, vec![("r", false), ("i", false), ("w", true)]);
    }

    #[test]
    fn dirty_is_consumed_once() {
        let mut board = StatusBoard::new();
        assert!(!board.take_dirty());
        board.calibration_updated(300.0);
        assert!(board.take_dirty());
        assert!(!board.take_dirty());
        assert_eq!(board.calibration_px(), Some(300.0));
    }
}
