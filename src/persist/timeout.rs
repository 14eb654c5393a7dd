use std::time::Duration;

use async_trait::async_trait;

use crate::domain::ValueMap;

use super::{PersistenceAdapter, SaveFailure, SaveOutcome};

/// Turns an adapter that takes longer than `limit` into a `TimedOut` failure.
///
/// The inner future is dropped on expiry; the controller only ever sees the
/// one outcome this wrapper resolves with.
pub struct WithTimeout<A> {
    inner: A,
    limit: Duration,
}

impl<A> WithTimeout<A> {
    pub fn new(inner: A, limit: Duration) -> Self {
        Self { inner, limit }
    }
}

#[async_trait(?Send)]
impl<A: PersistenceAdapter> PersistenceAdapter for WithTimeout<A> {
    async fn save(&self, values: ValueMap) -> SaveOutcome {
        match tokio::time::timeout(self.limit, self.inner.save(values)).await {
            Ok(outcome) => outcome,
            Err(_) => {
                tracing::warn!(limit = ?self.limit, "save timed out");
                Err(SaveFailure::TimedOut(self.limit))
            }
        }
    }
}
