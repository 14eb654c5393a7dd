mod components;
mod view;

pub use view::{RowRender, UiContext, draw};
