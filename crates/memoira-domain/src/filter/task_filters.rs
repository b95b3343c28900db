//! View filter configuration.

use super::StatusFilter;
use crate::FolderId;
use serde::{Deserialize, Serialize};

/// Everything the view derivation needs besides the tasks themselves.
///
/// This holds the settings (what to filter by); the `TaskFilter`
/// implementations and searchers do the matching.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskFilters {
    pub status: StatusFilter,
    pub search_term: String,
    pub selected_folder_id: Option<FolderId>,
}

impl TaskFilters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_status(mut self, status: StatusFilter) -> Self {
        self.status = status;
        self
    }

    pub fn with_search(mut self, term: impl Into<String>) -> Self {
        self.search_term = term.into();
        self
    }

    pub fn with_folder(mut self, folder_id: impl Into<FolderId>) -> Self {
        self.selected_folder_id = Some(folder_id.into());
        self
    }

    pub fn has_search(&self) -> bool {
        !self.search_term.is_empty()
    }

    /// Drops the folder selection if it points at a folder that was deleted.
    pub fn forget_folder(&mut self, folder_id: &str) {
        if self.selected_folder_id.as_deref() == Some(folder_id) {
            self.selected_folder_id = None;
        }
    }
}
