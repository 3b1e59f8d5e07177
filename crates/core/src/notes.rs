//! Note field rules and the fixed messages the API answers with.
//!
//! Both the server (request validation) and the client (submit button
//! state) decide "is this note complete?" through [`fields_present`], so the
//! two sides never disagree about what the server will accept.

use crate::error::CoreError;

/// Entity name used in not-found errors.
pub const NOTE_ENTITY: &str = "Note";

/// Message returned when either required field is missing or empty.
pub const TITLE_AND_CONTENT_REQUIRED: &str = "title and content required";

/// Message returned when an update or delete matches no row.
pub const NOTE_NOT_FOUND: &str = "Note not found";

/// `true` when both fields are present and non-empty.
///
/// Whitespace counts as content; nothing is trimmed.
pub fn fields_present(title: Option<&str>, content: Option<&str>) -> bool {
    matches!((title, content), (Some(t), Some(c)) if !t.is_empty() && !c.is_empty())
}

/// Validate the writable fields of a note.
pub fn validate_note_fields(title: Option<&str>, content: Option<&str>) -> Result<(), CoreError> {
    if fields_present(title, content) {
        Ok(())
    } else {
        Err(CoreError::Validation(TITLE_AND_CONTENT_REQUIRED.to_string()))
    }
}

/// The not-found error for a note lookup.
pub fn note_not_found() -> CoreError {
    CoreError::NotFound {
        entity: NOTE_ENTITY,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
