//! Async driver for [`NotesState`].
//!
//! Each operation runs a `begin_*` transition under the state lock, releases
//! the lock, awaits the API call, then runs the matching `finish_*`
//! transition. The lock is never held across a network call, so concurrent
//! callers see each other's in-flight guards.

use tokio::sync::RwLock;

use notes_core::types::DbId;

use crate::api::NotesApi;
use crate::state::NotesState;
use crate::view::{self, AppView};

pub struct NotesController<A> {
    api: A,
    state: RwLock<NotesState>,
}

impl<A: NotesApi> NotesController<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            state: RwLock::new(NotesState::new()),
        }
    }

    /// Copy of the current state.
    pub async fn snapshot(&self) -> NotesState {
        self.state.read().await.clone()
    }

    /// Render the current state.
    pub async fn view(&self) -> AppView {
        view::render(&*self.state.read().await)
    }

    /// Fetch the full collection, replacing the local copy on success.
    pub async fn load(&self) {
        let request = self.state.write().await.begin_load();

        let result = self.api.list_notes().await.map_err(|e| e.to_string());
        match &result {
            Ok(notes) => tracing::debug!(count = notes.len(), "Notes loaded"),
            Err(error) => tracing::warn!(%error, "Loading notes failed"),
        }

        self.state.write().await.finish_load(request, result);
    }

    /// Create or update from the form. Returns `false` when the submit was a
    /// no-op (a save already in flight, or an incomplete form).
    pub async fn submit(&self) -> bool {
        let Some(request) = self.state.write().await.begin_submit() else {
            return false;
        };

        let result = match request.target {
            None => self.api.create_note(&request.input).await,
            Some(id) => self.api.update_note(id, &request.input).await,
        }
        .map_err(|e| e.to_string());

        match &result {
            Ok(note) if request.target.is_none() => {
                tracing::info!(note_id = note.id, "Note created")
            }
            Ok(note) => tracing::info!(note_id = note.id, "Note updated"),
            Err(error) => tracing::warn!(%error, "Saving note failed"),
        }

        self.state.write().await.finish_submit(request, result);
        true
    }

    /// Delete a note. Returns `false` while a save is in flight or a delete
    /// of the same note already is.
    pub async fn delete(&self, id: DbId) -> bool {
        let Some(request) = self.state.write().await.begin_delete(id) else {
            return false;
        };

        let result = self
            .api
            .delete_note(id)
            .await
            .map(|_| ())
            .map_err(|e| e.to_string());

        match &result {
            Ok(()) => tracing::info!(note_id = id, "Note deleted"),
            Err(error) => tracing::warn!(note_id = id, %error, "Deleting note failed"),
        }

        self.state.write().await.finish_delete(request, result);
        true
    }

    /// Enter edit mode for the note with `id`. Returns `false` if the note
    /// is not in the local collection.
    pub async fn start_edit(&self, id: DbId) -> bool {
        let mut state = self.state.write().await;
        let Some(note) = state.find(id).cloned() else {
            return false;
        };
        state.start_edit(&note);
        true
    }

    pub async fn reset_form(&self) {
        self.state.write().await.reset_form();
    }

    pub async fn set_title(&self, title: impl Into<String>) {
        self.state.write().await.set_title(title);
    }

    pub async fn set_content(&self, content: impl Into<String>) {
        self.state.write().await.set_content(content);
    }
}
