//! Editable working copy of a task.
//!
//! A draft is opened for a new task or an existing one, edited field by
//! field, and turned into a `Task` payload when saved (explicitly or by the
//! auto-saver). Dismissing a draft simply drops it.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::emoji;
use crate::task::timestamp_now;
use crate::{ChecklistItem, ChecklistItemId, FolderId, Task, TaskId, TaskKind, DEFAULT_FOLDER_ID};

pub const DEFAULT_BACKGROUND: &str = "#FFFFFF";

#[derive(Debug, Clone, PartialEq)]
pub struct TaskDraft {
    id: TaskId,
    created_at: DateTime<Utc>,
    is_completed: bool,
    is_pinned: bool,
    original_emoji: Option<String>,
    is_new: bool,
    pub title: String,
    pub content: String,
    pub kind: TaskKind,
    pub checklist_items: Vec<ChecklistItem>,
    pub background_color: String,
    pub folder_id: FolderId,
}

impl TaskDraft {
    /// Blank draft for a new text task in the default folder.
    ///
    /// The id and creation time are fixed here, so repeated saves of the same
    /// draft update one task instead of creating several.
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            created_at: timestamp_now(),
            is_completed: false,
            is_pinned: false,
            original_emoji: None,
            is_new: true,
            title: String::new(),
            content: String::new(),
            kind: TaskKind::Text,
            checklist_items: Vec::new(),
            background_color: DEFAULT_BACKGROUND.to_string(),
            folder_id: DEFAULT_FOLDER_ID.to_string(),
        }
    }

    pub fn from_task(task: &Task) -> Self {
        Self {
            id: task.id,
            created_at: task.created_at,
            is_completed: task.is_completed,
            is_pinned: task.is_pinned,
            original_emoji: task.emoji.clone(),
            is_new: false,
            title: task.title.clone(),
            content: task.content.clone(),
            kind: task.kind,
            checklist_items: task.items().to_vec(),
            background_color: task
                .background_color
                .clone()
                .unwrap_or_else(|| DEFAULT_BACKGROUND.to_string()),
            folder_id: task
                .folder_id
                .clone()
                .unwrap_or_else(|| DEFAULT_FOLDER_ID.to_string()),
        }
    }

    pub fn id(&self) -> TaskId {
        self.id
    }

    pub fn is_new(&self) -> bool {
        self.is_new
    }

    pub fn add_item(&mut self) -> ChecklistItemId {
        let item = ChecklistItem::new("");
        let id = item.id;
        self.checklist_items.push(item);
        id
    }

    /// Sets an item's text and recomputes its emoji from the new text.
    pub fn update_item(&mut self, item_id: ChecklistItemId, text: impl Into<String>) -> bool {
        match self.checklist_items.iter_mut().find(|i| i.id == item_id) {
            Some(item) => {
                item.text = text.into();
                item.emoji = emoji::suggest(&item.text).map(str::to_string);
                true
            }
            None => false,
        }
    }

    pub fn toggle_item(&mut self, item_id: ChecklistItemId) -> bool {
        match self.checklist_items.iter_mut().find(|i| i.id == item_id) {
            Some(item) => {
                item.toggle();
                true
            }
            None => false,
        }
    }

    pub fn remove_item(&mut self, item_id: ChecklistItemId) -> bool {
        let before = self.checklist_items.len();
        self.checklist_items.retain(|i| i.id != item_id);
        self.checklist_items.len() != before
    }

    /// Emoji for the whole task: a keyword match on title and content, or
    /// the emoji the task had when the draft was opened.
    pub fn suggested_emoji(&self) -> Option<String> {
        emoji::suggest(&format!("{} {}", self.title, self.content))
            .map(str::to_string)
            .or_else(|| self.original_emoji.clone())
    }

    /// The task this draft would save, or None for a blank text task.
    pub fn build(&self) -> Option<Task> {
        let task = Task {
            id: self.id,
            title: self.title.clone(),
            content: self.content.clone(),
            is_completed: self.is_completed,
            is_pinned: self.is_pinned,
            created_at: self.created_at,
            background_color: Some(self.background_color.clone()),
            kind: self.kind,
            checklist_items: Some(self.checklist_items.clone()),
            emoji: self.suggested_emoji(),
            folder_id: Some(self.folder_id.clone()),
        };
        if task.is_blank() {
            None
        } else {
            Some(task)
        }
    }
}

impl Default for TaskDraft {
    fn default() -> Self {
        Self::new()
    }
}
