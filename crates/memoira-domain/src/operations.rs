use crate::filter::TaskFilters;
use crate::{
    ChecklistItemId, ColumnCount, DisplaySize, DragMove, Folder, FolderDeletion, FontFamily,
    FontSize, Settings, Task, TaskId, TaskUpdate, TaskView,
};
use async_trait::async_trait;
use memoira_core::MemoiraResult;

/// Trait ensuring every front end drives the store through the same operations.
///
/// Mutating operations return whether anything changed. Rejections and lookup
/// misses are `Ok(false)`; `Err` is reserved for persistence failures, after
/// which the in-memory state already holds the change.
#[async_trait]
pub trait NoteOperations: Send {
    // Task operations
    async fn add_or_update_task(&mut self, task: Task) -> MemoiraResult<bool>;
    async fn update_task(&mut self, id: TaskId, updates: TaskUpdate) -> MemoiraResult<Option<Task>>;
    async fn delete_task(&mut self, id: TaskId) -> MemoiraResult<bool>;
    async fn toggle_completion(&mut self, id: TaskId) -> MemoiraResult<bool>;
    async fn toggle_pin(&mut self, id: TaskId) -> MemoiraResult<bool>;
    async fn toggle_checklist_item(
        &mut self,
        task_id: TaskId,
        item_id: ChecklistItemId,
    ) -> MemoiraResult<bool>;
    /// Returns the number of tasks removed.
    async fn clear_completed(&mut self) -> MemoiraResult<usize>;
    async fn reorder_task(&mut self, filters: &TaskFilters, drag: DragMove) -> MemoiraResult<bool>;
    fn list_tasks(&self) -> &[Task];
    fn get_task(&self, id: TaskId) -> Option<&Task>;
    fn view(&self, filters: &TaskFilters) -> TaskView<'_>;

    // Folder operations
    async fn add_folder(&mut self, name: &str) -> MemoiraResult<Option<Folder>>;
    async fn rename_folder(&mut self, id: &str, name: &str) -> MemoiraResult<bool>;
    /// First half of a folder deletion. None when the folder cannot be deleted.
    fn request_folder_deletion(&self, id: &str) -> Option<FolderDeletion>;
    /// Second half of a folder deletion: removes the folder and moves its
    /// tasks to the default folder.
    async fn confirm_folder_deletion(&mut self, deletion: FolderDeletion) -> MemoiraResult<bool>;
    fn list_folders(&self) -> &[Folder];

    // Settings
    fn settings(&self) -> &Settings;
    async fn set_auto_save(&mut self, enabled: bool) -> MemoiraResult<()>;
    async fn set_font_family(&mut self, family: FontFamily) -> MemoiraResult<()>;
    async fn set_font_size(&mut self, size: FontSize) -> MemoiraResult<()>;
    async fn set_columns(&mut self, columns: ColumnCount) -> MemoiraResult<()>;
    async fn set_folder_size(&mut self, size: DisplaySize) -> MemoiraResult<()>;
    async fn set_card_size(&mut self, size: DisplaySize) -> MemoiraResult<()>;
}
