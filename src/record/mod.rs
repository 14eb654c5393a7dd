mod controller;
mod controls;
mod error;
mod options;

pub use controller::{RecordController, SaveTicket};
pub use controls::ActionControls;
pub use error::RecordError;
pub use options::{FailurePolicy, RecordOptions, RecordSettings};
