//! Handlers for the notes collection.
//!
//! Every handler validates, performs one store round trip, and responds.
//! Failures are mapped to JSON bodies by [`AppError`].

use axum::extract::{FromRequest, Path, Request, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};

use notes_core::error::CoreError;
use notes_core::notes::{note_not_found, validate_note_fields};
use notes_core::types::DbId;
use notes_db::models::note::NoteDraft;
use notes_db::repositories::NoteRepo;

use crate::error::AppResult;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response bodies
// ---------------------------------------------------------------------------

/// Body accepted by create and update. Both fields are optional here so
/// that a missing field reaches validation instead of failing extraction.
#[derive(Debug, Default, Deserialize)]
pub struct NoteInput {
    pub title: Option<String>,
    pub content: Option<String>,
}

impl NoteInput {
    /// Validate and convert into the DTO the repository writes.
    pub fn into_draft(self) -> Result<NoteDraft, CoreError> {
        validate_note_fields(self.title.as_deref(), self.content.as_deref())?;
        Ok(NoteDraft {
            title: self.title.unwrap_or_default(),
            content: self.content.unwrap_or_default(),
        })
    }
}

/// Acknowledgement returned by a successful delete.
#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub deleted: bool,
}

/// JSON body extractor that never rejects.
///
/// An absent, non-JSON, or mistyped body yields an empty [`NoteInput`], which
/// then fails validation with the usual 400 message.
pub struct NoteBody(pub NoteInput);

impl<S> FromRequest<S> for NoteBody
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<NoteInput>::from_request(req, state).await {
            Ok(Json(input)) => Ok(Self(input)),
            Err(rejection) => {
                tracing::debug!(error = %rejection, "Unreadable note body, treating fields as missing");
                Ok(Self(NoteInput::default()))
            }
        }
    }
}

/// Parse the `{id}` path segment. A non-integer id can match no row.
fn parse_note_id(raw: &str) -> Result<DbId, CoreError> {
    raw.parse::<DbId>().map_err(|_| note_not_found())
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /notes
///
/// List every note, newest first.
pub async fn list_notes(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let notes = NoteRepo::list(&state.pool).await?;
    Ok(Json(notes))
}

/// POST /notes
///
/// Create a note. Rejects with 400 before touching the store when either
/// field is missing or empty.
pub async fn create_note(
    State(state): State<AppState>,
    NoteBody(input): NoteBody,
) -> AppResult<impl IntoResponse> {
    let draft = input.into_draft()?;

    let note = NoteRepo::create(&state.pool, &draft).await?;

    tracing::info!(note_id = note.id, "Note created");

    Ok((StatusCode::CREATED, Json(note)))
}

/// PUT /notes/{id}
///
/// Replace a note's title and content.
pub async fn update_note(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    NoteBody(input): NoteBody,
) -> AppResult<impl IntoResponse> {
    let draft = input.into_draft()?;
    let id = parse_note_id(&raw_id)?;

    let note = NoteRepo::update(&state.pool, id, &draft)
        .await?
        .ok_or_else(note_not_found)?;

    tracing::info!(note_id = id, "Note updated");

    Ok(Json(note))
}

/// DELETE /notes/{id}
///
/// Delete a note.
pub async fn delete_note(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let id = parse_note_id(&raw_id)?;

    if !NoteRepo::delete(&state.pool, id).await? {
        return Err(note_not_found().into());
    }

    tracing::info!(note_id = id, "Note deleted");

    Ok(Json(DeleteResponse { deleted: true }))
}
