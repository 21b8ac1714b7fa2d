// src/infrastructure/http.rs
use crate::application::NoteService;
use crate::domain::{DomainError, Note, NoteInput};
use anyhow::{Context, Result};
use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, instrument};

/// Note service reached over its REST API
#[derive(Debug)]
pub struct HttpNoteService {
    base_url: String,
    client: Client,
}

/// Error payload the service sends with non-2xx answers
#[derive(Debug, Deserialize)]
struct ErrorBody {
    detail: serde_json::Value,
}

impl HttpNoteService {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn collection_url(&self) -> String {
        format!("{}/notes/", self.base_url)
    }

    fn note_url(&self, id: i64) -> String {
        format!("{}/notes/{}", self.base_url, id)
    }

    // `id` is the note the request targets, if any; a 404 for it becomes
    // NoteNotFound.
    fn send(&self, request: RequestBuilder, id: Option<i64>) -> Result<Response, DomainError> {
        let response = request
            .send()
            .map_err(|e| DomainError::Unreachable(e.to_string()))?;

        let status = response.status();
        debug!(%status, "Note service responded");
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().unwrap_or_default();
        Err(rejection(status, &body, id))
    }

    fn decode<T: DeserializeOwned>(response: Response) -> Result<T, DomainError> {
        response
            .json::<T>()
            .map_err(|e| DomainError::MalformedResponse(e.to_string()))
    }
}

/// Map a non-success answer to a domain error
pub(crate) fn rejection(status: StatusCode, body: &str, id: Option<i64>) -> DomainError {
    if let (StatusCode::NOT_FOUND, Some(id)) = (status, id) {
        return DomainError::NoteNotFound(id);
    }

    let detail = serde_json::from_str::<ErrorBody>(body)
        .ok()
        .map(|b| match b.detail {
            serde_json::Value::String(s) => s,
            other => other.to_string(),
        });

    let message = match detail {
        Some(d) if !d.is_empty() => d,
        _ if !body.trim().is_empty() => body.trim().to_string(),
        _ => status.canonical_reason().unwrap_or("request failed").to_string(),
    };

    DomainError::Rejected {
        status: status.as_u16(),
        message,
    }
}

impl NoteService for HttpNoteService {
    #[instrument(level = "debug", skip(self), fields(base_url = %self.base_url))]
    fn list_notes(&mut self) -> Result<Vec<Note>, DomainError> {
        let response = self.send(self.client.get(self.collection_url()), None)?;
        Self::decode(response)
    }

    #[instrument(level = "debug", skip(self), fields(base_url = %self.base_url))]
    fn get_note(&mut self, id: i64) -> Result<Note, DomainError> {
        let response = self.send(self.client.get(self.note_url(id)), Some(id))?;
        Self::decode(response)
    }

    #[instrument(level = "debug", skip(self), fields(base_url = %self.base_url))]
    fn create_note(&mut self, input: &NoteInput) -> Result<Note, DomainError> {
        let request = self.client.post(self.collection_url()).json(input);
        let response = self.send(request, None)?;
        Self::decode(response)
    }

    #[instrument(level = "debug", skip(self), fields(base_url = %self.base_url))]
    fn update_note(&mut self, id: i64, input: &NoteInput) -> Result<Note, DomainError> {
        let request = self.client.put(self.note_url(id)).json(input);
        let response = self.send(request, Some(id))?;
        Self::decode(response)
    }

    #[instrument(level = "debug", skip(self), fields(base_url = %self.base_url))]
    fn delete_note(&mut self, id: i64) -> Result<(), DomainError> {
        // the acknowledgement body carries nothing we use
        self.send(self.client.delete(self.note_url(id)), Some(id))?;
        Ok(())
    }
}
