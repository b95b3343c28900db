//! Task filter implementations.

use crate::Task;
use serde::{Deserialize, Serialize};

/// Trait for filtering tasks by various criteria.
pub trait TaskFilter {
    /// Returns true if the task matches the filter criteria.
    fn matches(&self, task: &Task) -> bool;
}

/// Completion/pin status filter selectable from the filter bar.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusFilter {
    #[default]
    All,
    Active,
    Completed,
    Pinned,
}

impl StatusFilter {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Active => "active",
            Self::Completed => "completed",
            Self::Pinned => "pinned",
        }
    }
}

impl std::str::FromStr for StatusFilter {
    type Err = memoira_core::MemoiraError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "all" => Ok(Self::All),
            "active" => Ok(Self::Active),
            "completed" => Ok(Self::Completed),
            "pinned" => Ok(Self::Pinned),
            other => Err(memoira_core::MemoiraError::Validation(format!(
                "Unknown filter: {}",
                other
            ))),
        }
    }
}

impl TaskFilter for StatusFilter {
    fn matches(&self, task: &Task) -> bool {
        match self {
            Self::All => true,
            Self::Active => !task.is_completed,
            Self::Completed => task.is_completed,
            Self::Pinned => task.is_pinned,
        }
    }
}

/// Keep only tasks whose folder id equals the selected one exactly.
///
/// Unset or dangling folder ids do not match, even for the default folder.
pub struct FolderFilter {
    folder_id: String,
}

impl FolderFilter {
    pub fn new(folder_id: impl Into<String>) -> Self {
        Self {
            folder_id: folder_id.into(),
        }
    }
}

impl TaskFilter for FolderFilter {
    fn matches(&self, task: &Task) -> bool {
        task.is_in_folder(&self.folder_id)
    }
}
