//! Persistence seam for record saves.
//!
//! A `PersistenceAdapter` receives the value snapshot and resolves exactly
//! once with a [`SaveOutcome`]. Failures travel as data in the `Err` arm;
//! nothing here panics or returns early through `?` on the controller side.

#[cfg(feature = "http")]
mod http;
mod store;
mod timeout;

use std::{future::Future, time::Duration};

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

use crate::domain::ValueMap;

#[cfg(feature = "http")]
pub use http::HttpPersistence;
#[cfg(feature = "http")]
pub use reqwest::Method;
pub use store::{JsonFileStore, JsonRowStore};
pub use timeout::WithTimeout;

/// Success payload (whatever the backend answered) or the failure reason.
pub type SaveOutcome = Result<Value, SaveFailure>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SaveFailure {
    #[error("save rejected with status {status}: {body}")]
    Rejected { status: u16, body: String },
    #[error("transport error: {0}")]
    Transport(String),
    #[error("save timed out after {0:?}")]
    TimedOut(Duration),
    #[error("storage error: {0}")]
    Storage(String),
}

#[async_trait(?Send)]
pub trait PersistenceAdapter {
    async fn save(&self, values: ValueMap) -> SaveOutcome;
}

/// Adapter backed by a closure returning a future.
pub struct FnPersistence<F> {
    save: F,
}

pub fn from_fn<F, Fut>(save: F) -> FnPersistence<F>
where
    F: Fn(ValueMap) -> Fut,
    Fut: Future<Output = SaveOutcome> + 'static,
{
    FnPersistence { save }
}

#[async_trait(?Send)]
impl<F, Fut> PersistenceAdapter for FnPersistence<F>
where
    F: Fn(ValueMap) -> Fut,
    Fut: Future<Output = SaveOutcome> + 'static,
{
    async fn save(&self, values: ValueMap) -> SaveOutcome {
        (self.save)(values).await
    }
}

/// Accepts every save and echoes the submitted values back.
#[derive(Debug, Clone, Copy, Default)]
pub struct EchoPersistence;

#[async_trait(?Send)]
impl PersistenceAdapter for EchoPersistence {
    async fn save(&self, values: ValueMap) -> SaveOutcome {
        Ok(values.to_json())
    }
}
