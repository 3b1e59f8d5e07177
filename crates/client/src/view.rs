//! View models rendered from [`NotesState`].
//!
//! [`render`] is a pure function: it decides labels, which buttons exist and
//! which are disabled. Front ends only draw the result; [`AppView`]'s
//! `Display` impl is the text drawing used by the terminal binary.

use std::fmt;

use chrono::TimeZone;

use notes_core::types::{DbId, Timestamp};

use crate::state::NotesState;

pub const LABEL_ADD: &str = "Add note";
pub const LABEL_SAVE_CHANGES: &str = "Save changes";
pub const LABEL_SAVING: &str = "Saving…";
pub const LABEL_CANCEL: &str = "Cancel";
pub const LABEL_EDIT: &str = "Edit";
pub const LABEL_DELETE: &str = "Delete";
pub const LABEL_DELETING: &str = "Deleting…";

pub const STATUS_LOADING: &str = "Loading…";
pub const STATUS_EMPTY: &str = "No notes yet.";

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ButtonView {
    pub label: &'static str,
    pub disabled: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormView {
    pub title: String,
    pub content: String,
    pub submit: ButtonView,
    /// Present only in edit mode.
    pub cancel: Option<ButtonView>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteCard {
    pub id: DbId,
    pub title: String,
    pub content: String,
    pub created_at: String,
    pub edit: ButtonView,
    pub delete: ButtonView,
}

/// Everything a front end draws for one frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppView {
    pub form: FormView,
    /// Loading, error, and empty-list lines, in display order.
    pub status: Vec<String>,
    pub cards: Vec<NoteCard>,
}

/// Render the view for `state`, formatting times in the local time zone.
pub fn render(state: &NotesState) -> AppView {
    render_in(state, &chrono::Local)
}

/// Render the view for `state`, formatting times in `tz`.
pub fn render_in<Tz>(state: &NotesState, tz: &Tz) -> AppView
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    AppView {
        form: render_form(state),
        status: render_status(state),
        cards: state
            .notes
            .iter()
            .map(|note| {
                let busy = state.saving || state.is_deleting(note.id);
                NoteCard {
                    id: note.id,
                    title: note.title.clone(),
                    content: note.content.clone(),
                    created_at: format_timestamp(note.created_at, tz),
                    edit: ButtonView {
                        label: LABEL_EDIT,
                        disabled: busy,
                    },
                    delete: ButtonView {
                        label: if state.is_deleting(note.id) {
                            LABEL_DELETING
                        } else {
                            LABEL_DELETE
                        },
                        disabled: busy,
                    },
                }
            })
            .collect(),
    }
}

fn render_form(state: &NotesState) -> FormView {
    let label = if state.saving {
        LABEL_SAVING
    } else if state.is_editing() {
        LABEL_SAVE_CHANGES
    } else {
        LABEL_ADD
    };

    FormView {
        title: state.form.title.clone(),
        content: state.form.content.clone(),
        submit: ButtonView {
            label,
            disabled: !state.can_submit(),
        },
        cancel: state.is_editing().then_some(ButtonView {
            label: LABEL_CANCEL,
            disabled: state.saving,
        }),
    }
}

fn render_status(state: &NotesState) -> Vec<String> {
    let mut lines = Vec::new();
    if state.loading {
        lines.push(STATUS_LOADING.to_string());
    }
    if let Some(error) = &state.error {
        lines.push(format!("Error: {error}"));
    }
    if !state.loading && state.error.is_none() && state.notes.is_empty() {
        lines.push(STATUS_EMPTY.to_string());
    }
    lines
}

/// Format a creation time for display in `tz`.
pub fn format_timestamp<Tz>(ts: Timestamp, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    ts.with_timezone(tz).format(TIMESTAMP_FORMAT).to_string()
}

impl fmt::Display for ButtonView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.disabled {
            write!(f, "({})", self.label)
        } else {
            write!(f, "[{}]", self.label)
        }
    }
}

impl fmt::Display for AppView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "== Notes ==")?;
        writeln!(f, "Title:   {}", self.form.title)?;
        writeln!(f, "Content: {}", self.form.content)?;
        write!(f, "{}", self.form.submit)?;
        if let Some(cancel) = &self.form.cancel {
            write!(f, " {cancel}")?;
        }
        writeln!(f)?;

        for line in &self.status {
            writeln!(f, "{line}")?;
        }

        for card in &self.cards {
            writeln!(f)?;
            writeln!(f, "#{} {}", card.id, card.title)?;
            for line in card.content.lines() {
                writeln!(f, "    {line}")?;
            }
            writeln!(f, "    {}  {} {}", card.created_at, card.edit, card.delete)?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
