//! Explicit UI state and its reducer transitions.
//!
//! Every user-visible change goes through a method on [`NotesState`]. Network
//! operations are split into a `begin_*` transition, which applies guards and
//! returns the request to send (or `None` for a no-op), and a `finish_*`
//! transition, which folds the response back in. Nothing here performs I/O;
//! [`crate::controller::NotesController`] sequences the two halves around the
//! API call.
//!
//! Mutations are tagged with a monotonically increasing sequence number. An
//! update response is applied only if no newer update of the same note has
//! already been applied, and only to a note still in the collection, so a
//! late response cannot overwrite fresher state or resurrect a deleted note.

use std::collections::{BTreeSet, HashMap};

use notes_core::notes::fields_present;
use notes_core::types::DbId;

use crate::api::{Note, NoteInput};

/// Title and content being edited.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteForm {
    pub title: String,
    pub content: String,
}

/// An issued list request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadRequest {
    pub seq: u64,
}

/// An issued create (`target == None`) or update request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitRequest {
    pub target: Option<DbId>,
    pub input: NoteInput,
    pub seq: u64,
}

/// An issued delete request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeleteRequest {
    pub id: DbId,
    pub seq: u64,
}

/// All mutable client state.
#[derive(Debug, Clone, Default)]
pub struct NotesState {
    /// Local, non-authoritative copy of the collection, newest first.
    pub notes: Vec<Note>,
    pub loading: bool,
    pub error: Option<String>,
    pub form: NoteForm,
    /// Note being edited; `None` means create mode.
    pub editing_id: Option<DbId>,
    /// A create or update is in flight.
    pub saving: bool,
    /// Notes whose delete is in flight.
    pub deleting: BTreeSet<DbId>,

    last_seq: u64,
    latest_load: u64,
    applied: HashMap<DbId, u64>,
}

impl NotesState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_editing(&self) -> bool {
        self.editing_id.is_some()
    }

    pub fn is_deleting(&self, id: DbId) -> bool {
        self.deleting.contains(&id)
    }

    /// `true` when a submit would issue a request.
    pub fn can_submit(&self) -> bool {
        !self.saving && fields_present(Some(&self.form.title), Some(&self.form.content))
    }

    pub fn find(&self, id: DbId) -> Option<&Note> {
        self.notes.iter().find(|n| n.id == id)
    }

    fn next_seq(&mut self) -> u64 {
        self.last_seq += 1;
        self.last_seq
    }

    // -- form ---------------------------------------------------------------

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.form.title = title.into();
    }

    pub fn set_content(&mut self, content: impl Into<String>) {
        self.form.content = content.into();
    }

    /// Enter edit mode for `note` and prefill the form from it.
    pub fn start_edit(&mut self, note: &Note) {
        self.editing_id = Some(note.id);
        self.form = NoteForm {
            title: note.title.clone(),
            content: note.content.clone(),
        };
    }

    /// Clear the form and return to create mode.
    pub fn reset_form(&mut self) {
        self.form = NoteForm::default();
        self.editing_id = None;
    }

    // -- load ---------------------------------------------------------------

    pub fn begin_load(&mut self) -> LoadRequest {
        self.error = None;
        self.loading = true;
        let seq = self.next_seq();
        self.latest_load = seq;
        LoadRequest { seq }
    }

    /// Replace the collection on success. A response to a load that has
    /// since been superseded by a newer load is dropped.
    pub fn finish_load(&mut self, request: LoadRequest, result: Result<Vec<Note>, String>) {
        if request.seq != self.latest_load {
            return;
        }
        self.loading = false;
        match result {
            Ok(notes) => {
                self.applied.retain(|id, _| notes.iter().any(|n| n.id == *id));
                self.notes = notes;
            }
            Err(message) => self.error = Some(message),
        }
    }

    // -- submit -------------------------------------------------------------

    /// No-op while a save is in flight or while either field is empty.
    pub fn begin_submit(&mut self) -> Option<SubmitRequest> {
        if !self.can_submit() {
            return None;
        }
        self.error = None;
        self.saving = true;
        Some(SubmitRequest {
            target: self.editing_id,
            input: NoteInput {
                title: self.form.title.clone(),
                content: self.form.content.clone(),
            },
            seq: self.next_seq(),
        })
    }

    pub fn finish_submit(&mut self, request: SubmitRequest, result: Result<Note, String>) {
        self.saving = false;
        match result {
            Ok(note) => {
                match request.target {
                    None => {
                        self.notes.retain(|n| n.id != note.id);
                        self.notes.insert(0, note);
                    }
                    Some(_) => self.apply_update(note, request.seq),
                }
                self.reset_form();
            }
            Err(message) => self.error = Some(message),
        }
    }

    fn apply_update(&mut self, note: Note, seq: u64) {
        let Some(slot) = self.notes.iter_mut().find(|n| n.id == note.id) else {
            return;
        };
        if self.applied.get(&note.id).is_some_and(|&last| last > seq) {
            return;
        }
        self.applied.insert(note.id, seq);
        *slot = note;
    }

    // -- delete -------------------------------------------------------------

    /// No-op while a save is in flight or a delete of the same note is.
    pub fn begin_delete(&mut self, id: DbId) -> Option<DeleteRequest> {
        if self.saving || self.deleting.contains(&id) {
            return None;
        }
        self.error = None;
        self.deleting.insert(id);
        Some(DeleteRequest {
            id,
            seq: self.next_seq(),
        })
    }

    pub fn finish_delete(&mut self, request: DeleteRequest, result: Result<(), String>) {
        self.deleting.remove(&request.id);
        match result {
            Ok(()) => {
                // A late update cannot match a removed note, so its
                // bookkeeping goes with it.
                self.applied.remove(&request.id);
                self.notes.retain(|n| n.id != request.id);
                if self.editing_id == Some(request.id) {
                    self.reset_form();
                }
            }
            Err(message) => self.error = Some(message),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;

    fn note(id: DbId, title: &str, content: &str) -> Note {
        Note {
            id,
            title: title.to_string(),
            content: content.to_string(),
            created_at: Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap(),
        }
    }

    fn loaded(notes: Vec<Note>) -> NotesState {
        let mut state = NotesState::new();
        let request = state.begin_load();
        state.finish_load(request, Ok(notes));
        state
    }

    fn ids(state: &NotesState) -> Vec<DbId> {
        state.notes.iter().map(|n| n.id).collect()
    }

    // -- load ---------------------------------------------------------------

    #[test]
    fn load_sets_and_clears_loading() {
        let mut state = NotesState::new();
        let request = state.begin_load();
        assert!(state.loading);

        state.finish_load(request, Ok(vec![note(1, "a", "b")]));
        assert!(!state.loading);
        assert_eq!(ids(&state), vec![1]);
    }

    #[test]
    fn failed_load_keeps_collection_and_sets_error() {
        let mut state = loaded(vec![note(1, "a", "b")]);
        let request = state.begin_load();
        state.finish_load(request, Err("Request failed: 500".into()));

        assert!(!state.loading);
        assert_eq!(state.error.as_deref(), Some("Request failed: 500"));
        assert_eq!(ids(&state), vec![1]);
    }

    #[test]
    fn superseded_load_is_dropped() {
        let mut state = NotesState::new();
        let older = state.begin_load();
        let newer = state.begin_load();

        state.finish_load(newer, Ok(vec![note(2, "new", "x")]));
        state.finish_load(older, Ok(vec![note(1, "old", "x")]));

        assert_eq!(ids(&state), vec![2]);
    }

    // -- submit -------------------------------------------------------------

    #[test]
    fn create_prepends_and_resets_form() {
        let mut state = loaded(vec![note(1, "a", "b")]);
        state.set_title("A");
        state.set_content("B");

        let request = state.begin_submit().expect("submit should start");
        assert_eq!(request.target, None);
        assert!(state.saving);

        state.finish_submit(request, Ok(note(2, "A", "B")));
        assert!(!state.saving);
        assert_eq!(ids(&state), vec![2, 1]);
        assert_eq!(state.form, NoteForm::default());
    }

    #[test]
    fn update_replaces_in_place_and_leaves_edit_mode() {
        let mut state = loaded(vec![note(2, "two", "x"), note(1, "one", "y")]);
        let target = state.notes[1].clone();
        state.start_edit(&target);
        assert_eq!(state.form.title, "one");
        state.set_title("uno");

        let request = state.begin_submit().unwrap();
        assert_eq!(request.target, Some(1));

        state.finish_submit(request, Ok(note(1, "uno", "y")));
        assert_eq!(ids(&state), vec![2, 1]);
        assert_eq!(state.notes[1].title, "uno");
        assert!(!state.is_editing());
    }

    #[test]
    fn submit_while_saving_is_noop() {
        let mut state = NotesState::new();
        state.set_title("A");
        state.set_content("B");

        assert!(state.begin_submit().is_some());
        assert!(state.begin_submit().is_none());
    }

    #[test]
    fn submit_with_empty_field_is_noop() {
        let mut state = NotesState::new();
        state.set_title("A");

        assert!(state.begin_submit().is_none());
        assert!(!state.saving);
    }

    #[test]
    fn failed_submit_keeps_state_and_clears_saving() {
        let mut state = loaded(vec![note(1, "a", "b")]);
        state.set_title("A");
        state.set_content("B");

        let request = state.begin_submit().unwrap();
        state.finish_submit(request, Err("Request failed: 400".into()));

        assert!(!state.saving);
        assert_eq!(state.error.as_deref(), Some("Request failed: 400"));
        assert_eq!(ids(&state), vec![1]);
        assert_eq!(state.form.title, "A");
    }

    #[test]
    fn submit_clears_previous_error() {
        let mut state = NotesState::new();
        state.error = Some("old".into());
        state.set_title("A");
        state.set_content("B");

        state.begin_submit().unwrap();
        assert_eq!(state.error, None);
    }

    // -- delete -------------------------------------------------------------

    #[test]
    fn delete_of_same_id_in_flight_is_noop() {
        let mut state = loaded(vec![note(1, "a", "b")]);

        assert!(state.begin_delete(1).is_some());
        assert!(state.begin_delete(1).is_none());
        assert!(state.is_deleting(1));
    }

    #[test]
    fn deletes_of_different_ids_may_overlap() {
        let mut state = loaded(vec![note(2, "a", "b"), note(1, "c", "d")]);

        let first = state.begin_delete(1).unwrap();
        let second = state.begin_delete(2).unwrap();

        state.finish_delete(first, Ok(()));
        assert!(state.is_deleting(2));
        state.finish_delete(second, Ok(()));
        assert!(state.notes.is_empty());
        assert!(state.deleting.is_empty());
    }

    #[test]
    fn deleting_edit_target_resets_form() {
        let mut state = loaded(vec![note(1, "a", "b")]);
        let target = state.notes[0].clone();
        state.start_edit(&target);

        let request = state.begin_delete(1).unwrap();
        state.finish_delete(request, Ok(()));

        assert!(!state.is_editing());
        assert_eq!(state.form, NoteForm::default());
    }

    #[test]
    fn failed_delete_keeps_note_and_clears_marker() {
        let mut state = loaded(vec![note(1, "a", "b")]);

        let request = state.begin_delete(1).unwrap();
        state.finish_delete(request, Err("Request failed: 404".into()));

        assert_eq!(ids(&state), vec![1]);
        assert!(!state.is_deleting(1));
        assert_eq!(state.error.as_deref(), Some("Request failed: 404"));
    }

    #[test]
    fn late_update_does_not_resurrect_deleted_note() {
        let mut state = loaded(vec![note(1, "a", "b")]);
        let target = state.notes[0].clone();
        state.start_edit(&target);
        state.set_title("edited");

        let delete = state.begin_delete(1).unwrap();
        let update = state.begin_submit().unwrap();

        state.finish_delete(delete, Ok(()));
        state.finish_submit(update, Ok(note(1, "edited", "b")));

        assert!(state.notes.is_empty());
        assert!(state.applied.is_empty());
    }

    #[test]
    fn delete_while_saving_is_noop() {
        let mut state = loaded(vec![note(2, "a", "b"), note(1, "c", "d")]);
        state.set_title("A");
        state.set_content("B");
        let submit = state.begin_submit().unwrap();

        assert!(state.begin_delete(1).is_none());
        assert!(state.deleting.is_empty());

        state.finish_submit(submit, Ok(note(3, "A", "B")));
        assert!(state.begin_delete(1).is_some());
    }

    #[test]
    fn update_bookkeeping_is_pruned() {
        let mut state = loaded(vec![note(2, "a", "b"), note(1, "c", "d")]);
        for (id, title) in [(1, "one"), (2, "two")] {
            let target = state.find(id).unwrap().clone();
            state.start_edit(&target);
            state.set_title(title);
            let request = state.begin_submit().unwrap();
            state.finish_submit(request, Ok(note(id, title, "x")));
        }
        assert_eq!(state.applied.len(), 2);

        let delete = state.begin_delete(1).unwrap();
        state.finish_delete(delete, Ok(()));
        assert!(!state.applied.contains_key(&1));

        let reload = state.begin_load();
        state.finish_load(reload, Ok(vec![note(4, "new", "x")]));
        assert!(state.applied.is_empty());
    }

    #[test]
    fn newer_update_wins_over_late_one() {
        let mut state = loaded(vec![note(1, "a", "b")]);
        let target = state.notes[0].clone();

        state.start_edit(&target);
        state.set_title("first");
        let first = state.begin_submit().unwrap();
        state.finish_submit(first.clone(), Ok(note(1, "first", "b")));

        state.start_edit(&target);
        state.set_title("second");
        let second = state.begin_submit().unwrap();
        state.finish_submit(second, Ok(note(1, "second", "b")));

        state.finish_submit(first, Ok(note(1, "first", "b")));
        assert_eq!(state.notes[0].title, "second");
    }
}
