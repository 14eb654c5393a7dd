mod kind;
mod state;
mod value;

pub use kind::FieldKind;
pub use state::ControllerState;
pub use value::{FieldValue, ValueMap};
