use std::rc::Rc;

use anyhow::{Context, Result};
use serde_json::{Map, Value};

use crate::{
    io::TableDocument,
    persist::{EchoPersistence, PersistenceAdapter},
    record::{RecordController, RecordOptions},
};

use super::{
    options::UiOptions,
    runtime::{App, RowEntry, RunSummary},
};

/// Builds the adapter that saves one row, given that row's raw values.
pub type PersistenceFactory = Box<dyn Fn(&Map<String, Value>) -> Rc<dyn PersistenceAdapter>>;

pub struct TableUI {
    document: TableDocument,
    title: Option<String>,
    options: UiOptions,
    persistence: Option<PersistenceFactory>,
}

impl TableUI {
    pub fn new(document: TableDocument) -> Self {
        Self {
            document,
            title: None,
            options: UiOptions::default(),
            persistence: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_options(mut self, options: UiOptions) -> Self {
        self.options = options;
        self
    }

    /// Without a factory every row saves through [`EchoPersistence`].
    pub fn with_persistence<F>(mut self, factory: F) -> Self
    where
        F: Fn(&Map<String, Value>) -> Rc<dyn PersistenceAdapter> + 'static,
    {
        self.persistence = Some(Box::new(factory));
        self
    }

    pub async fn run(self) -> Result<RunSummary> {
        let mut app = self.into_app()?;
        app.run().await
    }

    fn into_app(self) -> Result<App> {
        let TableUI {
            document,
            title,
            options,
            persistence,
        } = self;

        let mut rows = Vec::with_capacity(document.rows.len());
        for (index, raw) in document.rows.iter().enumerate() {
            let record = document.build_record(raw);
            let adapter = match &persistence {
                Some(factory) => factory(raw),
                None => Rc::new(EchoPersistence) as Rc<dyn PersistenceAdapter>,
            };
            let controller =
                RecordController::attach(&record, RecordOptions::from(document.options.clone()), adapter)
                    .with_context(|| format!("failed to attach row {}", index + 1))?;
            rows.push(RowEntry::new(record, controller));
        }
        tracing::debug!(rows = rows.len(), columns = document.columns.len(), "table loaded");

        let title = title
            .or_else(|| document.title.clone())
            .unwrap_or_else(|| "Records".to_string());
        Ok(App::new(title, document.columns, rows, options))
    }
}
