mod binding;
mod components;

pub use binding::FieldBinding;
pub use components::{CHECKED_LABEL, UNCHECKED_LABEL};
