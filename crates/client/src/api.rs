//! HTTP client for the notes API.
//!
//! [`NotesApi`] is the seam the controller depends on; [`ApiClient`]
//! implements it with [`reqwest`]. Each operation is exactly one HTTP call.
//! Any non-2xx status becomes [`ApiError::Status`]; nothing is retried.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use notes_core::types::{DbId, Timestamp};

/// A note as served by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: DbId,
    pub title: String,
    pub content: String,
    pub created_at: Timestamp,
}

/// Body sent on create and update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NoteInput {
    pub title: String,
    pub content: String,
}

/// Acknowledgement returned by a successful delete.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DeleteAck {
    pub deleted: bool,
}

/// Errors from the notes API layer.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The server answered with a non-2xx status code.
    #[error("Request failed: {status}")]
    Status { status: u16 },

    /// The request could not be sent or the response could not be decoded.
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),
}

/// The four operations the controller needs from the backend.
#[async_trait]
pub trait NotesApi: Send + Sync {
    /// `GET /notes`
    async fn list_notes(&self) -> Result<Vec<Note>, ApiError>;

    /// `POST /notes`
    async fn create_note(&self, input: &NoteInput) -> Result<Note, ApiError>;

    /// `PUT /notes/{id}`
    async fn update_note(&self, id: DbId, input: &NoteInput) -> Result<Note, ApiError>;

    /// `DELETE /notes/{id}`
    async fn delete_note(&self, id: DbId) -> Result<DeleteAck, ApiError>;
}

/// HTTP client for a notes API instance.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    notes_url: String,
}

impl ApiClient {
    /// Create a client for the API rooted at `base_url`.
    pub fn new(base_url: &reqwest::Url) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    /// Create a client reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, base_url: &reqwest::Url) -> Self {
        let notes_url = format!("{}/notes", base_url.as_str().trim_end_matches('/'));
        Self { client, notes_url }
    }

    fn note_url(&self, id: DbId) -> String {
        format!("{}/{}", self.notes_url, id)
    }

    /// Ensure the response has a success status, then decode its JSON body.
    async fn parse_response<T>(response: reqwest::Response) -> Result<T, ApiError>
    where
        T: serde::de::DeserializeOwned,
    {
        let status = response.status();
        if !status.is_success() {
            tracing::debug!(status = status.as_u16(), url = %response.url(), "Notes API returned an error status");
            return Err(ApiError::Status {
                status: status.as_u16(),
            });
        }
        Ok(response.json::<T>().await?)
    }
}

#[async_trait]
impl NotesApi for ApiClient {
    async fn list_notes(&self) -> Result<Vec<Note>, ApiError> {
        let response = self.client.get(&self.notes_url).send().await?;
        Self::parse_response(response).await
    }

    async fn create_note(&self, input: &NoteInput) -> Result<Note, ApiError> {
        let response = self.client.post(&self.notes_url).json(input).send().await?;
        Self::parse_response(response).await
    }

    async fn update_note(&self, id: DbId, input: &NoteInput) -> Result<Note, ApiError> {
        let response = self.client.put(self.note_url(id)).json(input).send().await?;
        Self::parse_response(response).await
    }

    async fn delete_note(&self, id: DbId) -> Result<DeleteAck, ApiError> {
        let response = self.client.delete(self.note_url(id)).send().await?;
        Self::parse_response(response).await
    }
}
