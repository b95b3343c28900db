pub mod commands;
pub mod draft;
pub mod emoji;
pub mod field_update;
pub mod filter;
pub mod folder;
pub mod operations;
pub mod reorder;
pub mod search;
pub mod seed;
pub mod settings;
pub mod sort;
pub mod task;
pub mod view;

pub use draft::TaskDraft;
pub use field_update::FieldUpdate;
pub use filter::{StatusFilter, TaskFilters};
pub use folder::{Folder, FolderDeletion, FolderId, DEFAULT_FOLDER_ID};
pub use operations::NoteOperations;
pub use reorder::{DragMove, Partition};
pub use settings::{ColumnCount, DisplaySize, FontFamily, FontSize, Settings};
pub use task::{ChecklistItem, ChecklistItemId, ChecklistProgress, Task, TaskId, TaskKind, TaskUpdate};
pub use view::{derive_view, EmptyReason, TaskView};
