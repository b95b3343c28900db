use super::{Changes, Command, CommandContext};
use crate::{Folder, FolderDeletion, FolderId, DEFAULT_FOLDER_ID};
use memoira_core::MemoiraResult;

/// Append a folder with a fresh id. Empty or duplicate names are ignored.
pub struct CreateFolder {
    pub name: String,
}

impl Command for CreateFolder {
    fn execute(&self, context: &mut CommandContext) -> MemoiraResult<Changes> {
        match Folder::validate_name(context.folders, &self.name, None) {
            Some(name) => {
                context.folders.push(Folder::new(name));
                Ok(Changes::FOLDERS)
            }
            None => {
                tracing::debug!("Rejected folder name {:?}", self.name);
                Ok(Changes::NONE)
            }
        }
    }

    fn description(&self) -> String {
        format!("Create folder '{}'", self.name.trim())
    }
}

pub struct RenameFolder {
    pub folder_id: FolderId,
    pub name: String,
}

impl Command for RenameFolder {
    fn execute(&self, context: &mut CommandContext) -> MemoiraResult<Changes> {
        let Some(name) = Folder::validate_name(context.folders, &self.name, Some(&self.folder_id))
        else {
            tracing::debug!("Rejected folder name {:?}", self.name);
            return Ok(Changes::NONE);
        };
        match context.folders.iter_mut().find(|f| f.id == self.folder_id) {
            Some(folder) => {
                folder.name = name;
                Ok(Changes::FOLDERS)
            }
            None => Ok(Changes::NONE),
        }
    }

    fn description(&self) -> String {
        format!("Rename folder {} to '{}'", self.folder_id, self.name.trim())
    }
}

/// Remove a folder and move its tasks to the default folder.
///
/// The default folder itself can never be removed.
pub struct DeleteFolder {
    pub folder_id: FolderId,
}

impl DeleteFolder {
    /// Describe what deleting `folder_id` would do, for confirmation.
    /// None for the default folder or an unknown id.
    pub fn preview(folders: &[Folder], tasks: &[crate::Task], folder_id: &str) -> Option<FolderDeletion> {
        if folder_id == DEFAULT_FOLDER_ID {
            return None;
        }
        let folder = folders.iter().find(|f| f.id == folder_id)?;
        Some(FolderDeletion {
            folder: folder.clone(),
            affected_tasks: tasks.iter().filter(|t| t.is_in_folder(folder_id)).count(),
        })
    }
}

impl Command for DeleteFolder {
    fn execute(&self, context: &mut CommandContext) -> MemoiraResult<Changes> {
        if self.folder_id == DEFAULT_FOLDER_ID {
            tracing::debug!("Refused to delete the default folder");
            return Ok(Changes::NONE);
        }
        let before = context.folders.len();
        context.folders.retain(|f| f.id != self.folder_id);
        if context.folders.len() == before {
            return Ok(Changes::NONE);
        }

        let mut moved = 0;
        for task in context.tasks.iter_mut().filter(|t| t.is_in_folder(&self.folder_id)) {
            task.folder_id = Some(DEFAULT_FOLDER_ID.to_string());
            moved += 1;
        }
        tracing::debug!("Moved {} tasks to the default folder", moved);

        Ok(if moved > 0 {
            Changes::FOLDERS.merge(Changes::TASKS)
        } else {
            Changes::FOLDERS
        })
    }

    fn description(&self) -> String {
        format!("Delete folder {}", self.folder_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::seed_folders;
    use crate::Task;

    fn run(command: &dyn Command, tasks: &mut Vec<Task>, folders: &mut Vec<Folder>) -> Changes {
        let mut ctx = CommandContext { tasks, folders };
        command.execute(&mut ctx).unwrap()
    }

    #[test]
    fn test_create_folder() {
        let mut tasks = Vec::new();
        let mut folders = seed_folders();

        let changes = run(
            &CreateFolder {
                name: "  سفر ".to_string(),
            },
            &mut tasks,
            &mut folders,
        );
        assert_eq!(changes, Changes::FOLDERS);
        assert_eq!(folders.len(), 4);
        assert_eq!(folders[3].name, "سفر");
        assert_ne!(folders[3].id, DEFAULT_FOLDER_ID);
    }

    #[test]
    fn test_create_duplicate_or_empty_is_rejected() {
        let mut tasks = Vec::new();
        let mut folders = seed_folders();
        let before = folders.clone();

        for name in ["عمل", "   ", ""] {
            let changes = run(
                &CreateFolder {
                    name: name.to_string(),
                },
                &mut tasks,
                &mut folders,
            );
            assert!(changes.is_empty());
        }
        assert_eq!(folders, before);
    }

    #[test]
    fn test_rename_folder() {
        let mut tasks = Vec::new();
        let mut folders = seed_folders();

        let renamed = run(
            &RenameFolder {
                folder_id: "work".to_string(),
                name: "Office".to_string(),
            },
            &mut tasks,
            &mut folders,
        );
        assert_eq!(renamed, Changes::FOLDERS);
        assert_eq!(folders[2].name, "Office");

        let collision = run(
            &RenameFolder {
                folder_id: "work".to_string(),
                name: "تسوق".to_string(),
            },
            &mut tasks,
            &mut folders,
        );
        assert!(collision.is_empty());

        let same_name = run(
            &RenameFolder {
                folder_id: "work".to_string(),
                name: " Office ".to_string(),
            },
            &mut tasks,
            &mut folders,
        );
        assert_eq!(same_name, Changes::FOLDERS);

        let missing = run(
            &RenameFolder {
                folder_id: "nope".to_string(),
                name: "Fresh".to_string(),
            },
            &mut tasks,
            &mut folders,
        );
        assert!(missing.is_empty());
    }

    #[test]
    fn test_delete_folder_moves_tasks_to_default() {
        let mut tasks = vec![
            Task::new_text("a", "").with_folder("work"),
            Task::new_text("b", "").with_folder("shopping"),
            Task::new_text("c", "").with_folder("work"),
        ];
        let mut folders = seed_folders();

        let changes = run(
            &DeleteFolder {
                folder_id: "work".to_string(),
            },
            &mut tasks,
            &mut folders,
        );

        assert!(changes.tasks && changes.folders);
        assert_eq!(tasks.len(), 3);
        assert!(folders.iter().all(|f| f.id != "work"));
        assert_eq!(tasks[0].folder_id.as_deref(), Some(DEFAULT_FOLDER_ID));
        assert_eq!(tasks[1].folder_id.as_deref(), Some("shopping"));
        assert_eq!(tasks[2].folder_id.as_deref(), Some(DEFAULT_FOLDER_ID));
    }

    #[test]
    fn test_delete_default_folder_is_rejected() {
        let mut tasks = vec![Task::new_text("a", "").with_folder(DEFAULT_FOLDER_ID)];
        let mut folders = seed_folders();
        let before = folders.clone();

        let changes = run(
            &DeleteFolder {
                folder_id: DEFAULT_FOLDER_ID.to_string(),
            },
            &mut tasks,
            &mut folders,
        );
        assert!(changes.is_empty());
        assert_eq!(folders, before);
    }

    #[test]
    fn test_preview() {
        let tasks = vec![
            Task::new_text("a", "").with_folder("work"),
            Task::new_text("b", "").with_folder("work"),
        ];
        let folders = seed_folders();

        let deletion = DeleteFolder::preview(&folders, &tasks, "work").unwrap();
        assert_eq!(deletion.folder.name, "عمل");
        assert_eq!(deletion.affected_tasks, 2);

        assert!(DeleteFolder::preview(&folders, &tasks, DEFAULT_FOLDER_ID).is_none());
        assert!(DeleteFolder::preview(&folders, &tasks, "missing").is_none());
    }
}
