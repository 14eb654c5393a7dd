#[derive(Debug, Clone)]
pub struct StatusLine {
    message: String,
}

pub const READY_STATUS: &str = "Ready. Press Enter or e to edit the selected row.";

impl Default for StatusLine {
    fn default() -> Self {
        Self {
            message: READY_STATUS.to_string(),
        }
    }
}

impl StatusLine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_raw(&mut self, msg: impl Into<String>) {
        self.message = msg.into();
    }

    pub fn ready(&mut self) {
        self.message = READY_STATUS.to_string();
    }

    pub fn editing(&mut self, row: usize) {
        self.message = format!("Editing row {}", row + 1);
    }

    pub fn reset(&mut self, row: usize) {
        self.message = format!("Row {} reset to its displayed values", row + 1);
    }

    pub fn discarded(&mut self, row: usize) {
        self.message = format!("Row {} left without saving", row + 1);
    }

    pub fn saving(&mut self, row: usize) {
        self.message = format!("Saving row {}…", row + 1);
    }

    pub fn saved(&mut self, row: usize) {
        self.message = format!("Row {} saved", row + 1);
    }

    pub fn save_failed(&mut self, row: usize, reason: &str) {
        self.message = format!("Row {} not saved: {reason}", row + 1);
    }

    pub fn pending_exit(&mut self, in_flight: usize) {
        self.message =
            format!("{in_flight} save(s) still in flight. Press q again to quit anyway.");
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}
