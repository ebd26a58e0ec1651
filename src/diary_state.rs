use crate::diary_entry::DiaryEntry;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// How a new entry gets its id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum IdPolicy {
    /// Ids come from a counter that only grows, so a deleted id is never handed out again.
    #[default]
    Monotonic,
    /// `len + 1` of the current list. Deleting then adding can produce a duplicate id;
    /// id-addressed operations then act on the first match.
    Derived,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AddRejected {
    #[error("entry title is empty")]
    EmptyTitle,
    #[error("entry body is empty")]
    EmptyBody,
}

/// State of the "add entry" dialog and the text typed into it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddDialog {
    pub open: bool,
    pub draft_title: String,
    pub draft_body: String,
}

impl AddDialog {
    fn clear_drafts(&mut self) {
        self.draft_title.clear();
        self.draft_body.clear();
    }
}

/// Read-only copy of the store handed to the UI after each mutation.
#[derive(Debug, Clone)]
pub struct DiarySnapshot {
    pub entries: Vec<DiaryEntry>,
    /// Row of the entry shown in the inline editor.
    pub editing: Option<usize>,
    pub dialog: AddDialog,
}

impl DiarySnapshot {
    pub fn is_editing_row(&self, row: usize) -> bool {
        self.editing == Some(row)
    }
}

#[derive(Debug)]
pub struct DiaryState {
    entries: Vec<DiaryEntry>,
    // a row, not an id: ids can repeat under IdPolicy::Derived
    editing: Option<usize>,
    dialog: AddDialog,
    id_policy: IdPolicy,
    next_id: usize,
}

impl Default for DiaryState {
    fn default() -> Self {
        DiaryState::new()
    }
}

impl DiaryState {
    pub fn new() -> Self {
        DiaryState::with_id_policy(IdPolicy::default())
    }

    pub fn with_id_policy(id_policy: IdPolicy) -> Self {
        DiaryState {
            entries: Vec::new(),
            editing: None,
            dialog: AddDialog::default(),
            id_policy,
            next_id: 1,
        }
    }

    fn allocate_id(&mut self) -> usize {
        match self.id_policy {
            IdPolicy::Monotonic => {
                let id = self.next_id;
                self.next_id += 1;
                id
            }
            IdPolicy::Derived => self.entries.len() + 1,
        }
    }

    /// Appends a new entry, closing the dialog and clearing its drafts.
    ///
    /// Empty title or body leaves everything untouched, including the dialog.
    pub fn add_entry(&mut self, title: &str, body: &str) -> Result<usize, AddRejected> {
        if title.is_empty() {
            debug!("add rejected: empty title");
            return Err(AddRejected::EmptyTitle);
        }
        if body.is_empty() {
            debug!("add rejected: empty body");
            return Err(AddRejected::EmptyBody);
        }

        let id = self.allocate_id();
        self.entries
            .push(DiaryEntry::new(id, title.to_string(), body.to_string()));
        self.dialog.open = false;
        self.dialog.clear_drafts();
        debug!(id, count = self.entries.len(), "entry added");
        Ok(id)
    }

    /// Submits the dialog drafts as a new entry.
    pub fn confirm_dialog(&mut self) -> Result<usize, AddRejected> {
        let title = self.dialog.draft_title.clone();
        let body = self.dialog.draft_body.clone();
        self.add_entry(&title, &body)
    }

    fn position(&self, id: usize) -> Option<usize> {
        self.entries.iter().position(|e| e.id == id)
    }

    /// Opens the inline editor on the first entry with `id`.
    pub fn begin_edit(&mut self, id: usize) {
        match self.position(id) {
            Some(row) => self.begin_edit_at(row),
            None => debug!(id, "begin edit ignored: no such entry"),
        }
    }

    /// Opens the inline editor on the entry at `row`, closing any other.
    pub fn begin_edit_at(&mut self, row: usize) {
        if row >= self.entries.len() {
            debug!(row, "begin edit ignored: no such row");
            return;
        }
        self.editing = Some(row);
        debug!(row, id = self.entries[row].id, "editing entry");
    }

    /// Leaves edit mode, then writes `title` and `body` into the first entry with `id`.
    ///
    /// Unlike [`DiaryState::add_entry`] the values are not validated.
    pub fn commit_edit(&mut self, id: usize, title: &str, body: &str) {
        self.editing = None;
        match self.position(id) {
            Some(row) => self.overwrite(row, title, body),
            None => debug!(id, "edit discarded: no such entry"),
        }
    }

    /// Row-addressed [`DiaryState::commit_edit`], used by the inline editor.
    pub fn commit_edit_at(&mut self, row: usize, title: &str, body: &str) {
        self.editing = None;
        if row < self.entries.len() {
            self.overwrite(row, title, body);
        } else {
            debug!(row, "edit discarded: no such row");
        }
    }

    fn overwrite(&mut self, row: usize, title: &str, body: &str) {
        let entry = &mut self.entries[row];
        entry.title = title.to_string();
        entry.body = body.to_string();
        debug!(row, id = entry.id, "entry updated");
    }

    pub fn delete_entry(&mut self, id: usize) -> bool {
        let Some(row) = self.position(id) else {
            debug!(id, "delete ignored: no such entry");
            return false;
        };
        self.entries.remove(row);
        self.editing = match self.editing {
            Some(editing) if editing == row => None,
            Some(editing) if editing > row => Some(editing - 1),
            other => other,
        };
        debug!(id, count = self.entries.len(), "entry deleted");
        true
    }

    pub fn open_dialog(&mut self) {
        self.dialog.open = true;
    }

    pub fn cancel_dialog(&mut self) {
        self.dialog.open = false;
        self.dialog.clear_drafts();
    }

    pub fn set_draft_title(&mut self, title: String) {
        self.dialog.draft_title = title;
    }

    pub fn set_draft_body(&mut self, body: String) {
        self.dialog.draft_body = body;
    }

    pub fn get_entries(&self) -> &[DiaryEntry] {
        &self.entries
    }

    pub fn get(&self, id: usize) -> Option<&DiaryEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    pub fn editing_row(&self) -> Option<usize> {
        self.editing
    }

    pub fn editing_entry(&self) -> Option<&DiaryEntry> {
        self.editing.and_then(|row| self.entries.get(row))
    }

    pub fn dialog(&self) -> &AddDialog {
        &self.dialog
    }

    pub fn id_policy(&self) -> IdPolicy {
        self.id_policy
    }

    pub fn snapshot(&self) -> DiarySnapshot {
        DiarySnapshot {
            entries: self.entries.clone(),
            editing: self.editing,
            dialog: self.dialog.clone(),
        }
    }
}
