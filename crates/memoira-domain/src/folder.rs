use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub type FolderId = String;

/// Id of the folder that always exists and receives orphaned tasks.
pub const DEFAULT_FOLDER_ID: &str = "default";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Folder {
    pub id: FolderId,
    pub name: String,
}

impl Folder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
        }
    }

    pub fn with_id(id: impl Into<FolderId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }

    pub fn default_folder() -> Self {
        Self::with_id(DEFAULT_FOLDER_ID, "عام")
    }

    pub fn is_default(&self) -> bool {
        self.id == DEFAULT_FOLDER_ID
    }

    /// Trims a proposed name and checks it against the other folders.
    ///
    /// Names are compared case-sensitively after trimming. `exclude` is the id
    /// of the folder being renamed, so it does not collide with itself.
    pub fn validate_name(folders: &[Folder], name: &str, exclude: Option<&str>) -> Option<String> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return None;
        }
        let taken = folders
            .iter()
            .any(|f| Some(f.id.as_str()) != exclude && f.name == trimmed);
        if taken {
            None
        } else {
            Some(trimmed.to_string())
        }
    }
}

/// A folder deletion awaiting confirmation.
///
/// Obtained for any existing non-default folder; dropping it declines the
/// deletion and leaves state untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FolderDeletion {
    pub folder: Folder,
    /// Number of tasks that will move to the default folder.
    pub affected_tasks: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn folders() -> Vec<Folder> {
        vec![
            Folder::default_folder(),
            Folder::with_id("work", "Work"),
            Folder::with_id("home", "Home"),
        ]
    }

    #[test]
    fn test_validate_name_trims() {
        assert_eq!(
            Folder::validate_name(&folders(), "  Travel ", None),
            Some("Travel".to_string())
        );
    }

    #[test]
    fn test_validate_name_rejects_empty() {
        assert_eq!(Folder::validate_name(&folders(), "   ", None), None);
    }

    #[test]
    fn test_validate_name_is_case_sensitive() {
        assert_eq!(Folder::validate_name(&folders(), "Work", None), None);
        assert_eq!(
            Folder::validate_name(&folders(), "work", None),
            Some("work".to_string())
        );
    }

    #[test]
    fn test_validate_name_ignores_excluded_folder() {
        assert_eq!(
            Folder::validate_name(&folders(), "Work", Some("work")),
            Some("Work".to_string())
        );
        assert_eq!(Folder::validate_name(&folders(), "Home", Some("work")), None);
    }

    #[test]
    fn test_default_folder() {
        assert!(Folder::default_folder().is_default());
        assert!(!Folder::new("Other").is_default());
    }
}
