use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder};
use serde_json::Value;

use crate::domain::ValueMap;

use super::{PersistenceAdapter, SaveFailure, SaveOutcome};

/// Sends the value map to `url`.
///
/// GET (the default) encodes the values as query parameters; any other
/// method sends them as a form body. A non-2xx response is a rejection.
#[derive(Debug, Clone)]
pub struct HttpPersistence {
    client: Client,
    url: String,
    method: Method,
}

impl HttpPersistence {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            url: url.into(),
            method: Method::GET,
        }
    }

    pub fn with_method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    fn request(&self, values: &ValueMap) -> RequestBuilder {
        let builder = self.client.request(self.method.clone(), &self.url);
        if self.method == Method::GET {
            builder.query(values)
        } else {
            builder.form(values)
        }
    }
}

#[async_trait(?Send)]
impl PersistenceAdapter for HttpPersistence {
    async fn save(&self, values: ValueMap) -> SaveOutcome {
        let response = self
            .request(&values)
            .send()
            .await
            .map_err(|err| SaveFailure::Transport(err.to_string()))?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|err| SaveFailure::Transport(err.to_string()))?;
        if !status.is_success() {
            tracing::warn!(url = %self.url, status = status.as_u16(), "save rejected");
            return Err(SaveFailure::Rejected {
                status: status.as_u16(),
                body,
            });
        }
        Ok(serde_json::from_str(&body).unwrap_or(Value::String(body)))
    }
}
