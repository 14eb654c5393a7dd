pub(crate) mod input;
mod options;
mod runtime;
mod status;
mod table_ui;
mod terminal;

pub use options::UiOptions;
pub use runtime::RunSummary;
pub use table_ui::{PersistenceFactory, TableUI};
