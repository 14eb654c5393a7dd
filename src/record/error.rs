use thiserror::Error;

use crate::domain::ControllerState;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    #[error("record is {0}, not editing")]
    NotEditing(ControllerState),
    #[error("a save is already in flight for this record")]
    SaveInFlight,
    #[error("save ticket does not belong to the in-flight save")]
    StaleTicket,
    #[error("field `{0}` is bound more than once")]
    DuplicateField(String),
}
