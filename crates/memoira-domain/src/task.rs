use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::field_update::FieldUpdate;
use crate::folder::{Folder, FolderId, DEFAULT_FOLDER_ID};

pub type TaskId = Uuid;
pub type ChecklistItemId = Uuid;

/// Current time truncated to the millisecond precision of the stored format.
pub fn timestamp_now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(3)
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskKind {
    #[default]
    Text,
    Checklist,
}

impl TaskKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Checklist => "checklist",
        }
    }
}

impl std::str::FromStr for TaskKind {
    type Err = memoira_core::MemoiraError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "checklist" => Ok(Self::Checklist),
            other => Err(memoira_core::MemoiraError::Validation(format!(
                "Unknown task type: {}",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChecklistItem {
    pub id: ChecklistItemId,
    pub text: String,
    #[serde(default)]
    pub is_completed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emoji: Option<String>,
}

impl ChecklistItem {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            text: text.into(),
            is_completed: false,
            emoji: None,
        }
    }

    pub fn toggle(&mut self) {
        self.is_completed = !self.is_completed;
    }
}

/// Completed vs. total item counts for a checklist task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ChecklistProgress {
    pub completed: usize,
    pub total: usize,
}

impl ChecklistProgress {
    pub fn remaining(&self) -> usize {
        self.total - self.completed
    }

    pub fn is_done(&self) -> bool {
        self.total > 0 && self.completed == self.total
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub is_completed: bool,
    #[serde(default)]
    pub is_pinned: bool,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    #[serde(rename = "type", default)]
    pub kind: TaskKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checklist_items: Option<Vec<ChecklistItem>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emoji: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub folder_id: Option<FolderId>,
}

impl Task {
    pub fn new_text(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            content: content.into(),
            is_completed: false,
            is_pinned: false,
            created_at: timestamp_now(),
            background_color: None,
            kind: TaskKind::Text,
            checklist_items: None,
            emoji: None,
            folder_id: None,
        }
    }

    pub fn new_checklist(title: impl Into<String>, items: Vec<ChecklistItem>) -> Self {
        Self {
            kind: TaskKind::Checklist,
            checklist_items: Some(items),
            ..Self::new_text(title, String::new())
        }
    }

    pub fn with_folder(mut self, folder_id: impl Into<FolderId>) -> Self {
        self.folder_id = Some(folder_id.into());
        self
    }

    pub fn is_checklist(&self) -> bool {
        self.kind == TaskKind::Checklist
    }

    /// A text task with nothing but whitespace in both title and content.
    /// Such tasks are never saved.
    pub fn is_blank(&self) -> bool {
        self.kind == TaskKind::Text && self.title.trim().is_empty() && self.content.trim().is_empty()
    }

    pub fn toggle_completion(&mut self) {
        self.is_completed = !self.is_completed;
    }

    pub fn toggle_pin(&mut self) {
        self.is_pinned = !self.is_pinned;
    }

    /// Flips the matching checklist item. Returns false if no item matched.
    pub fn toggle_checklist_item(&mut self, item_id: ChecklistItemId) -> bool {
        match self
            .checklist_items
            .as_mut()
            .and_then(|items| items.iter_mut().find(|item| item.id == item_id))
        {
            Some(item) => {
                item.toggle();
                true
            }
            None => false,
        }
    }

    pub fn items(&self) -> &[ChecklistItem] {
        self.checklist_items.as_deref().unwrap_or_default()
    }

    pub fn checklist_progress(&self) -> Option<ChecklistProgress> {
        if !self.is_checklist() {
            return None;
        }
        let items = self.items();
        Some(ChecklistProgress {
            completed: items.iter().filter(|item| item.is_completed).count(),
            total: items.len(),
        })
    }

    pub fn open_items(&self) -> impl Iterator<Item = &ChecklistItem> {
        self.items().iter().filter(|item| !item.is_completed)
    }

    /// The folder this task is shown under. References to folders that no
    /// longer exist resolve to the default folder.
    pub fn resolved_folder_id<'a>(&'a self, folders: &[Folder]) -> &'a str {
        match self.folder_id.as_deref() {
            Some(id) if folders.iter().any(|f| f.id == id) => id,
            _ => DEFAULT_FOLDER_ID,
        }
    }

    pub fn is_in_folder(&self, folder_id: &str) -> bool {
        self.folder_id.as_deref() == Some(folder_id)
    }

    pub fn apply_update(&mut self, update: TaskUpdate) {
        if let Some(title) = update.title {
            self.title = title;
        }
        if let Some(content) = update.content {
            self.content = content;
        }
        if let Some(kind) = update.kind {
            self.kind = kind;
            if kind == TaskKind::Checklist && self.checklist_items.is_none() {
                self.checklist_items = Some(Vec::new());
            }
        }
        update.background_color.apply_to(&mut self.background_color);
        update.emoji.apply_to(&mut self.emoji);
        update.folder_id.apply_to(&mut self.folder_id);
    }
}

/// Partial update of a task's editable fields.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskUpdate {
    pub title: Option<String>,
    pub content: Option<String>,
    pub kind: Option<TaskKind>,
    pub background_color: FieldUpdate<String>,
    pub emoji: FieldUpdate<String>,
    pub folder_id: FieldUpdate<FolderId>,
}

impl TaskUpdate {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.content.is_none()
            && self.kind.is_none()
            && !self.background_color.is_change()
            && !self.emoji.is_change()
            && !self.folder_id.is_change()
    }
}
