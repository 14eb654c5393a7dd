use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ControllerState {
    #[default]
    Viewing,
    Editing,
    Saving,
}

impl fmt::Display for ControllerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ControllerState::Viewing => write!(f, "viewing"),
            ControllerState::Editing => write!(f, "editing"),
            ControllerState::Saving => write!(f, "saving"),
        }
    }
}
