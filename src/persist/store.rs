use std::{
    cell::RefCell,
    path::{Path, PathBuf},
    sync::Arc,
};

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::Mutex;

use crate::domain::ValueMap;

use super::{PersistenceAdapter, SaveFailure, SaveOutcome};

/// JSON document holding table rows, either as a bare array or under a
/// top-level `rows` key.
///
/// Saves are read-modify-write on the whole file; the shared lock keeps
/// concurrent saves from different rows from losing each other's updates.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
    lock: Arc<Mutex<()>>,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Arc::new(Mutex::new(())),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Adapter for the row whose `key` column equals `key_value`.
    pub fn row(&self, key: impl Into<String>, key_value: Value) -> JsonRowStore {
        JsonRowStore {
            store: self.clone(),
            key: key.into(),
            key_value: RefCell::new(key_value),
        }
    }

    async fn update_row(&self, key: &str, key_value: &Value, values: &ValueMap) -> SaveOutcome {
        let _guard = self.lock.lock().await;
        let contents = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|err| storage(&self.path, err))?;
        let mut document: Value =
            serde_json::from_str(&contents).map_err(|err| storage(&self.path, err))?;

        let rows = match &mut document {
            Value::Array(rows) => rows,
            Value::Object(map) => match map.get_mut("rows") {
                Some(Value::Array(rows)) => rows,
                _ => {
                    return Err(SaveFailure::Storage(format!(
                        "{}: document has no rows array",
                        self.path.display()
                    )));
                }
            },
            _ => {
                return Err(SaveFailure::Storage(format!(
                    "{}: expected an array or an object with rows",
                    self.path.display()
                )));
            }
        };

        let row = rows
            .iter_mut()
            .find(|row| row.get(key) == Some(key_value))
            .and_then(Value::as_object_mut)
            .ok_or_else(|| SaveFailure::Storage(format!("no row with {key} = {key_value}")))?;
        if let Value::Object(updates) = values.to_json() {
            for (name, value) in updates {
                let merged = merge_cell(row.get(&name), value);
                row.insert(name, merged);
            }
        }
        let saved = Value::Object(row.clone());

        let rendered =
            serde_json::to_string_pretty(&document).map_err(|err| storage(&self.path, err))?;
        tokio::fs::write(&self.path, rendered)
            .await
            .map_err(|err| storage(&self.path, err))?;
        Ok(saved)
    }
}

/// Edited text keeps the stored cell's type when it still parses as one:
/// numbers stay numbers and an untouched empty cell stays null.
fn merge_cell(existing: Option<&Value>, edited: Value) -> Value {
    let Value::String(text) = &edited else {
        return edited;
    };
    match existing {
        Some(Value::Number(_)) => match serde_json::from_str::<Value>(text.trim()) {
            Ok(number @ Value::Number(_)) => number,
            _ => edited,
        },
        Some(Value::Null) if text.is_empty() => Value::Null,
        _ => edited,
    }
}

fn storage(path: &Path, err: impl std::fmt::Display) -> SaveFailure {
    SaveFailure::Storage(format!("{}: {err}", path.display()))
}

/// One row of a [`JsonFileStore`]. The key follows the row when a save
/// changes the key column.
#[derive(Debug, Clone)]
pub struct JsonRowStore {
    store: JsonFileStore,
    key: String,
    key_value: RefCell<Value>,
}

impl JsonRowStore {
    pub fn key_value(&self) -> Value {
        self.key_value.borrow().clone()
    }
}

#[async_trait(?Send)]
impl PersistenceAdapter for JsonRowStore {
    async fn save(&self, values: ValueMap) -> SaveOutcome {
        let key_value = self.key_value();
        let outcome = self.store.update_row(&self.key, &key_value, &values).await;
        match &outcome {
            Ok(saved) => {
                if let Some(current) = saved.get(&self.key)
                    && current != &key_value
                {
                    tracing::debug!(from = %key_value, to = %current, "row key changed");
                    *self.key_value.borrow_mut() = current.clone();
                }
            }
            Err(err) => tracing::warn!(key = %key_value, error = %err, "row save failed"),
        }
        outcome
    }
}
