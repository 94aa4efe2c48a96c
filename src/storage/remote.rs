//! REST-backed store
//!
//! Talks to the expense-splitting service over HTTP with a blocking
//! reqwest client. Routes:
//!
//! - `GET/POST /people/`, `PUT/DELETE /people/{id}`
//! - `GET/POST /expenses/` (`?sort=-created_date&limit=N`), `PUT /expenses/{id}`
//!
//! Any non-success status becomes [`FairshareError::Api`] carrying the
//! status code and the server's message. Nothing is retried.

use std::time::Duration;

use reqwest::blocking::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::{FairshareError, FairshareResult};
use crate::models::{Expense, NewExpense, NewPerson, Person, PersonId};

use super::query::ExpenseQuery;
use super::{ExpenseStore, PeopleStore, Store};

/// Error body returned by the service (`{"detail": ...}`)
#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    detail: serde_json::Value,
}

/// Store that forwards every call to the REST service
pub struct HttpStore {
    base_url: String,
    client: Client,
}

impl HttpStore {
    /// Build a client for `base_url`; each request times out after `timeout_secs`
    pub fn new(base_url: &str, timeout_secs: u64) -> FairshareResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs.max(1)))
            .build()
            .map_err(|e| FairshareError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            base_url: base_url.trim().trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn send(&self, request: RequestBuilder) -> FairshareResult<Response> {
        let response = request.send()?;
        check_status(response)
    }

    fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> FairshareResult<T> {
        let response = self.send(request)?;
        Ok(response.json::<T>()?)
    }
}

/// Pass a successful response through, or turn it into an API error
fn check_status(response: Response) -> FairshareResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().unwrap_or_default();
    let message = error_message(&body).unwrap_or_else(|| {
        if body.trim().is_empty() {
            status.canonical_reason().unwrap_or("request failed").to_string()
        } else {
            body.trim().to_string()
        }
    });

    warn!(status = status.as_u16(), %message, "request returned an error status");
    Err(FairshareError::Api {
        status: Some(status.as_u16()),
        message,
    })
}

/// Pull the `detail` field out of an error body, if there is one
fn error_message(body: &str) -> Option<String> {
    let envelope: ErrorEnvelope = serde_json::from_str(body).ok()?;
    match envelope.detail {
        serde_json::Value::String(s) => Some(s),
        serde_json::Value::Null => None,
        other => Some(other.to_string()),
    }
}

impl PeopleStore for HttpStore {
    fn list_people(&self) -> FairshareResult<Vec<Person>> {
        debug!("GET /people/");
        self.send_json(self.client.get(self.url("/people/")))
    }

    fn create_person(&self, person: NewPerson) -> FairshareResult<Person> {
        debug!("POST /people/");
        self.send_json(self.client.post(self.url("/people/")).json(&person))
    }

    fn update_person(&self, person: Person) -> FairshareResult<Person> {
        let path = format!("/people/{}", person.id.get());
        debug!("PUT {}", path);
        self.send_json(self.client.put(self.url(&path)).json(&person.to_new()))
    }

    fn delete_person(&self, id: PersonId) -> FairshareResult<()> {
        let path = format!("/people/{}", id.get());
        debug!("DELETE {}", path);
        // 204 No Content: there is no body to read
        self.send(self.client.delete(self.url(&path)))?;
        Ok(())
    }
}

impl ExpenseStore for HttpStore {
    fn list_expenses(&self, query: &ExpenseQuery) -> FairshareResult<Vec<Expense>> {
        let mut params = vec![("sort", query.sort.to_string())];
        if let Some(limit) = query.limit {
            params.push(("limit", limit.to_string()));
        }

        debug!(sort = %query.sort, limit = ?query.limit, "GET /expenses/");
        self.send_json(self.client.get(self.url("/expenses/")).query(&params))
    }

    fn create_expense(&self, expense: NewExpense) -> FairshareResult<Expense> {
        debug!("POST /expenses/");
        self.send_json(self.client.post(self.url("/expenses/")).json(&expense))
    }

    fn update_expense(&self, expense: Expense) -> FairshareResult<Expense> {
        let path = format!("/expenses/{}", expense.id.get());
        debug!("PUT {}", path);
        self.send_json(self.client.put(self.url(&path)).json(&expense))
    }
}

impl Store for HttpStore {
    fn describe(&self) -> String {
        format!("remote {}", self.base_url)
    }
}
