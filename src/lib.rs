#![deny(rust_2018_idioms)]

//! Inline edit/save lifecycle for displayed records.
//!
//! A [`RecordController`] toggles one record between a read-only view and
//! its editors, collects a [`ValueMap`] on save and hands it to a
//! [`PersistenceAdapter`]. With the `tui` feature the same machinery drives a
//! terminal table of records ([`TableUI`]).

pub mod domain;
pub mod element;
pub mod form;
pub mod io;
pub mod persist;
pub mod record;

#[cfg(feature = "tui")]
mod app;
#[cfg(feature = "tui")]
mod presentation;

#[cfg(feature = "tui")]
pub use app::{PersistenceFactory, RunSummary, TableUI, UiOptions};
pub use domain::{ControllerState, FieldKind, FieldValue, ValueMap};
pub use io::TableDocument;
pub use persist::{PersistenceAdapter, SaveFailure, SaveOutcome};
pub use record::{FailurePolicy, RecordController, RecordError, RecordOptions, SaveTicket};

pub mod prelude {
    #[cfg(feature = "tui")]
    pub use super::{RunSummary, TableUI, UiOptions};
    pub use super::{
        ControllerState, FailurePolicy, FieldValue, PersistenceAdapter, RecordController,
        RecordOptions, SaveFailure, SaveOutcome, TableDocument, ValueMap,
    };
}
