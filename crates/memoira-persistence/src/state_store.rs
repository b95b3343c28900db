//! The authoritative in-memory state, mirrored to a key-value store.

use crate::codec;
use crate::traits::{KeyValueStore, StorageKey};
use async_trait::async_trait;
use memoira_core::MemoiraResult;
use memoira_domain::commands::{
    Changes, ClearCompleted, Command, CommandContext, CreateFolder, DeleteFolder, DeleteTask,
    RenameFolder, ReorderTask, SaveTask, ToggleChecklistItem, ToggleCompletion, TogglePin,
    UpdateTask,
};
use memoira_domain::filter::TaskFilters;
use memoira_domain::seed::{seed_folders, seed_tasks};
use memoira_domain::task::timestamp_now;
use memoira_domain::{
    derive_view, ChecklistItemId, ColumnCount, DisplaySize, DragMove, Folder, FolderDeletion,
    FontFamily, FontSize, NoteOperations, Settings, Task, TaskDraft, TaskId, TaskUpdate, TaskView,
};
use serde::de::DeserializeOwned;
use std::collections::BTreeSet;
use std::sync::Arc;

/// Tasks, folders and settings, persisted key by key after every change.
///
/// A write that fails is retried once before the error is returned. After
/// that the change stays in memory and the key stays dirty: every later
/// write retries dirty keys, and `flush` rewrites everything.
pub struct NoteStore {
    backend: Arc<dyn KeyValueStore>,
    tasks: Vec<Task>,
    folders: Vec<Folder>,
    settings: Settings,
    dirty: BTreeSet<StorageKey>,
}

impl NoteStore {
    /// Load every key from `backend`. Absent keys take their seed or default
    /// value, which is written back before returning.
    ///
    /// A task or folder collection that is present but does not decode fails
    /// the open with a serialization error and is never overwritten. Scalar
    /// settings that do not decode fall back to their defaults.
    pub async fn open(backend: Arc<dyn KeyValueStore>) -> MemoiraResult<Self> {
        let mut dirty = BTreeSet::new();
        let store = backend.as_ref();

        let tasks = load_collection(store, StorageKey::Tasks, &mut dirty, || {
            seed_tasks(timestamp_now())
        })
        .await?;
        let folders = load_collection(store, StorageKey::Folders, &mut dirty, seed_folders).await?;

        let defaults = Settings::default();
        let settings = Settings {
            auto_save: load_or(store, StorageKey::AutoSave, &mut dirty, || defaults.auto_save).await?,
            font_family: load_or(store, StorageKey::FontFamily, &mut dirty, || defaults.font_family)
                .await?,
            font_size: load_or(store, StorageKey::FontSize, &mut dirty, || defaults.font_size).await?,
            columns: load_or(store, StorageKey::Columns, &mut dirty, || defaults.columns).await?,
            folder_size: load_or(store, StorageKey::FolderSize, &mut dirty, || defaults.folder_size)
                .await?,
            card_size: load_or(store, StorageKey::CardSize, &mut dirty, || defaults.card_size).await?,
        };

        tracing::debug!(
            "Opened store with {} tasks and {} folders ({} keys seeded)",
            tasks.len(),
            folders.len(),
            dirty.len()
        );

        let mut note_store = Self {
            backend,
            tasks,
            folders,
            settings,
            dirty,
        };
        note_store.sync_dirty().await?;
        Ok(note_store)
    }

    /// True while some key failed to write and memory is ahead of storage.
    pub fn is_dirty(&self) -> bool {
        !self.dirty.is_empty()
    }

    pub fn dirty_keys(&self) -> Vec<StorageKey> {
        self.dirty.iter().copied().collect()
    }

    /// Rewrite every collection and setting.
    pub async fn flush(&mut self) -> MemoiraResult<()> {
        self.dirty.extend(StorageKey::ALL);
        self.sync_dirty().await
    }

    /// Save a draft delivered by the auto-saver. Goes through the same
    /// validation as an explicit save.
    pub async fn apply_autosave(&mut self, task: Task) -> MemoiraResult<bool> {
        tracing::debug!("Auto-saving task {}", task.id);
        self.add_or_update_task(task).await
    }

    /// Save an editor draft. Returns the stored task, or None if the draft
    /// was blank.
    pub async fn save_draft(&mut self, draft: &TaskDraft) -> MemoiraResult<Option<Task>> {
        let Some(task) = draft.build() else {
            tracing::debug!("Draft {} is blank, not saving", draft.id());
            return Ok(None);
        };
        self.add_or_update_task(task).await?;
        Ok(self.get_task(draft.id()).cloned())
    }

    /// Each folder with the number of tasks shown under it.
    pub fn folder_task_counts(&self) -> Vec<(&Folder, usize)> {
        self.folders
            .iter()
            .map(|folder| {
                let count = self
                    .tasks
                    .iter()
                    .filter(|task| task.resolved_folder_id(&self.folders) == folder.id)
                    .count();
                (folder, count)
            })
            .collect()
    }

    async fn execute(&mut self, command: &dyn Command) -> MemoiraResult<Changes> {
        let changes = command.execute(&mut CommandContext {
            tasks: &mut self.tasks,
            folders: &mut self.folders,
        })?;
        if changes.is_empty() {
            tracing::debug!("No changes: {}", command.description());
            return Ok(changes);
        }
        tracing::debug!("Executed: {}", command.description());

        if changes.tasks {
            self.dirty.insert(StorageKey::Tasks);
        }
        if changes.folders {
            self.dirty.insert(StorageKey::Folders);
        }
        self.sync_dirty().await?;
        Ok(changes)
    }

    async fn update_setting<F>(&mut self, key: StorageKey, update: F) -> MemoiraResult<()>
    where
        F: FnOnce(&mut Settings) + Send,
    {
        let before = self.settings.clone();
        update(&mut self.settings);
        if self.settings == before {
            return Ok(());
        }
        self.dirty.insert(key);
        self.sync_dirty().await
    }

    /// Write every dirty key, retrying failed keys once. Keys that still fail
    /// stay dirty and the first failure is returned.
    async fn sync_dirty(&mut self) -> MemoiraResult<()> {
        if self.write_dirty().await.is_ok() {
            return Ok(());
        }
        tracing::warn!("Retrying unsaved keys {:?}", self.dirty);
        self.write_dirty().await
    }

    async fn write_dirty(&mut self) -> MemoiraResult<()> {
        let mut first_error = None;
        for key in self.dirty.clone() {
            match self.write_key(key).await {
                Ok(()) => {
                    self.dirty.remove(&key);
                }
                Err(e) => {
                    tracing::warn!("Failed to persist {}: {}", key, e);
                    first_error.get_or_insert(e);
                }
            }
        }
        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    async fn write_key(&self, key: StorageKey) -> MemoiraResult<()> {
        let store = self.backend.as_ref();
        let settings = &self.settings;
        match key {
            StorageKey::Tasks => codec::save(store, key, &self.tasks).await,
            StorageKey::Folders => codec::save(store, key, &self.folders).await,
            StorageKey::AutoSave => codec::save(store, key, &settings.auto_save).await,
            StorageKey::FontFamily => codec::save(store, key, &settings.font_family).await,
            StorageKey::FontSize => codec::save(store, key, &settings.font_size).await,
            StorageKey::Columns => codec::save(store, key, &settings.columns).await,
            StorageKey::FolderSize => codec::save(store, key, &settings.folder_size).await,
            StorageKey::CardSize => codec::save(store, key, &settings.card_size).await,
        }
    }
}

async fn load_collection<T, F>(
    store: &dyn KeyValueStore,
    key: StorageKey,
    seeded: &mut BTreeSet<StorageKey>,
    seed: F,
) -> MemoiraResult<T>
where
    T: DeserializeOwned,
    F: FnOnce() -> T,
{
    match codec::load(store, key).await? {
        Some(value) => Ok(value),
        None => {
            seeded.insert(key);
            Ok(seed())
        }
    }
}

async fn load_or<T, F>(
    store: &dyn KeyValueStore,
    key: StorageKey,
    seeded: &mut BTreeSet<StorageKey>,
    default: F,
) -> MemoiraResult<T>
where
    T: DeserializeOwned,
    F: FnOnce() -> T,
{
    match codec::load_lenient(store, key).await? {
        Some(value) => Ok(value),
        None => {
            seeded.insert(key);
            Ok(default())
        }
    }
}

#[async_trait]
impl NoteOperations for NoteStore {
    async fn add_or_update_task(&mut self, task: Task) -> MemoiraResult<bool> {
        let changes = self.execute(&SaveTask { task }).await?;
        Ok(!changes.is_empty())
    }

    async fn update_task(&mut self, id: TaskId, updates: TaskUpdate) -> MemoiraResult<Option<Task>> {
        let changes = self.execute(&UpdateTask { task_id: id, updates }).await?;
        if changes.is_empty() {
            return Ok(None);
        }
        Ok(self.get_task(id).cloned())
    }

    async fn delete_task(&mut self, id: TaskId) -> MemoiraResult<bool> {
        let changes = self.execute(&DeleteTask { task_id: id }).await?;
        Ok(!changes.is_empty())
    }

    async fn toggle_completion(&mut self, id: TaskId) -> MemoiraResult<bool> {
        let changes = self.execute(&ToggleCompletion { task_id: id }).await?;
        Ok(!changes.is_empty())
    }

    async fn toggle_pin(&mut self, id: TaskId) -> MemoiraResult<bool> {
        let changes = self.execute(&TogglePin { task_id: id }).await?;
        Ok(!changes.is_empty())
    }

    async fn toggle_checklist_item(
        &mut self,
        task_id: TaskId,
        item_id: ChecklistItemId,
    ) -> MemoiraResult<bool> {
        let changes = self
            .execute(&ToggleChecklistItem { task_id, item_id })
            .await?;
        Ok(!changes.is_empty())
    }

    async fn clear_completed(&mut self) -> MemoiraResult<usize> {
        let before = self.tasks.len();
        self.execute(&ClearCompleted).await?;
        Ok(before - self.tasks.len())
    }

    async fn reorder_task(&mut self, filters: &TaskFilters, drag: DragMove) -> MemoiraResult<bool> {
        let changes = self
            .execute(&ReorderTask {
                filters: filters.clone(),
                drag,
            })
            .await?;
        Ok(!changes.is_empty())
    }

    fn list_tasks(&self) -> &[Task] {
        &self.tasks
    }

    fn get_task(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }

    fn view(&self, filters: &TaskFilters) -> TaskView<'_> {
        derive_view(&self.tasks, filters)
    }

    async fn add_folder(&mut self, name: &str) -> MemoiraResult<Option<Folder>> {
        let changes = self
            .execute(&CreateFolder {
                name: name.to_string(),
            })
            .await?;
        if changes.is_empty() {
            return Ok(None);
        }
        Ok(self.folders.last().cloned())
    }

    async fn rename_folder(&mut self, id: &str, name: &str) -> MemoiraResult<bool> {
        let changes = self
            .execute(&RenameFolder {
                folder_id: id.to_string(),
                name: name.to_string(),
            })
            .await?;
        Ok(!changes.is_empty())
    }

    fn request_folder_deletion(&self, id: &str) -> Option<FolderDeletion> {
        DeleteFolder::preview(&self.folders, &self.tasks, id)
    }

    async fn confirm_folder_deletion(&mut self, deletion: FolderDeletion) -> MemoiraResult<bool> {
        let changes = self
            .execute(&DeleteFolder {
                folder_id: deletion.folder.id,
            })
            .await?;
        Ok(!changes.is_empty())
    }

    fn list_folders(&self) -> &[Folder] {
        &self.folders
    }

    fn settings(&self) -> &Settings {
        &self.settings
    }

    async fn set_auto_save(&mut self, enabled: bool) -> MemoiraResult<()> {
        self.update_setting(StorageKey::AutoSave, |s| s.auto_save = enabled)
            .await
    }

    async fn set_font_family(&mut self, family: FontFamily) -> MemoiraResult<()> {
        self.update_setting(StorageKey::FontFamily, |s| s.font_family = family)
            .await
    }

    async fn set_font_size(&mut self, size: FontSize) -> MemoiraResult<()> {
        self.update_setting(StorageKey::FontSize, |s| s.font_size = size)
            .await
    }

    async fn set_columns(&mut self, columns: ColumnCount) -> MemoiraResult<()> {
        self.update_setting(StorageKey::Columns, |s| s.columns = columns)
            .await
    }

    async fn set_folder_size(&mut self, size: DisplaySize) -> MemoiraResult<()> {
        self.update_setting(StorageKey::FolderSize, |s| s.folder_size = size)
            .await
    }

    async fn set_card_size(&mut self, size: DisplaySize) -> MemoiraResult<()> {
        self.update_setting(StorageKey::CardSize, |s| s.card_size = size)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{JsonFileStore, MemoryStore};
    use crate::traits::MockKeyValueStore;
    use memoira_core::MemoiraError;
    use memoira_domain::{Partition, StatusFilter, TaskKind, DEFAULT_FOLDER_ID};
    use serde_json::json;
    use tempfile::tempdir;

    async fn open_memory() -> (Arc<MemoryStore>, NoteStore) {
        let backend = Arc::new(MemoryStore::new());
        let store = NoteStore::open(backend.clone()).await.unwrap();
        (backend, store)
    }

    fn find<'a>(store: &'a NoteStore, title: &str) -> &'a Task {
        store
            .list_tasks()
            .iter()
            .find(|t| t.title == title)
            .unwrap()
    }

    #[tokio::test]
    async fn test_open_seeds_and_persists_empty_store() {
        let (backend, store) = open_memory().await;

        assert_eq!(store.list_tasks().len(), 3);
        assert_eq!(store.list_folders().len(), 3);
        assert_eq!(store.settings(), &Settings::default());
        assert!(!store.is_dirty());

        let keys = backend.keys().await.unwrap();
        assert_eq!(keys.len(), StorageKey::ALL.len());

        let reopened = NoteStore::open(backend.clone()).await.unwrap();
        assert_eq!(reopened.list_tasks(), store.list_tasks());
        assert_eq!(reopened.list_folders(), store.list_folders());
    }

    #[tokio::test]
    async fn test_open_reads_existing_keys() {
        let backend = Arc::new(MemoryStore::with_entries([
            ("memoira_tasks", json!([])),
            ("memoira_autoSave", json!(true)),
            ("memoira_columns", json!("1")),
        ]));
        let store = NoteStore::open(backend).await.unwrap();

        assert!(store.list_tasks().is_empty());
        assert_eq!(store.list_folders().len(), 3);
        assert!(store.settings().auto_save);
        assert_eq!(store.settings().columns, ColumnCount::One);
        assert_eq!(store.settings().font_family, FontFamily::Sans);
    }

    #[tokio::test]
    async fn test_undecodable_collection_fails_open_and_is_kept() {
        let mut kept = Task::new_text("my important note", "");
        kept.folder_id = Some(DEFAULT_FOLDER_ID.to_string());
        let stored = json!([
            serde_json::to_value(&kept).unwrap(),
            {"id": "legacy-1", "title": "old", "type": "text"},
        ]);
        let backend = Arc::new(MemoryStore::with_entries([("memoira_tasks", stored.clone())]));

        let err = NoteStore::open(backend.clone()).await.err().unwrap();
        match err {
            MemoiraError::Serialization(message) => assert!(message.contains("memoira_tasks")),
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(backend.get("memoira_tasks").await.unwrap(), Some(stored));
    }

    #[tokio::test]
    async fn test_undecodable_folders_are_not_reseeded() {
        let stored = json!({"not": "a list"});
        let backend = Arc::new(MemoryStore::with_entries([("memoira_folders", stored.clone())]));

        assert!(NoteStore::open(backend.clone()).await.is_err());
        assert_eq!(backend.get("memoira_folders").await.unwrap(), Some(stored));
    }

    #[tokio::test]
    async fn test_undecodable_setting_falls_back_to_default() {
        let backend = Arc::new(MemoryStore::with_entries([("memoira_fontSize", json!("huge"))]));
        let store = NoteStore::open(backend.clone()).await.unwrap();

        assert_eq!(store.settings().font_size, FontSize::Base);
        assert_eq!(backend.get("memoira_fontSize").await.unwrap(), Some(json!("base")));
    }

    #[tokio::test]
    async fn test_round_trip_through_json_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("store.json");

        let mut store = NoteStore::open(Arc::new(JsonFileStore::new(&path)))
            .await
            .unwrap();
        store.add_folder("سفر").await.unwrap();
        let shopping = find(&store, "قائمة التسوق").id;
        store.toggle_pin(shopping).await.unwrap();
        store.set_font_size(FontSize::Lg).await.unwrap();
        store.set_card_size(DisplaySize::Sm).await.unwrap();

        let reopened = NoteStore::open(Arc::new(JsonFileStore::new(&path)))
            .await
            .unwrap();
        assert_eq!(reopened.list_tasks(), store.list_tasks());
        assert_eq!(reopened.list_folders(), store.list_folders());
        assert_eq!(reopened.settings(), store.settings());
    }

    #[tokio::test]
    async fn test_blank_task_is_not_saved() {
        let (backend, mut store) = open_memory().await;
        let before = backend.get("memoira_tasks").await.unwrap();

        let saved = store
            .add_or_update_task(Task::new_text("  ", "\n"))
            .await
            .unwrap();

        assert!(!saved);
        assert_eq!(store.list_tasks().len(), 3);
        assert_eq!(backend.get("memoira_tasks").await.unwrap(), before);
    }

    #[tokio::test]
    async fn test_add_prepends_and_update_keeps_position() {
        let (_, mut store) = open_memory().await;

        let mut task = Task::new_text("New", "");
        assert!(store.add_or_update_task(task.clone()).await.unwrap());
        assert_eq!(store.list_tasks()[0].id, task.id);

        let last = store.list_tasks()[3].clone();
        let mut edited = last.clone();
        edited.title = "Edited".to_string();
        store.add_or_update_task(edited).await.unwrap();
        assert_eq!(store.list_tasks()[3].title, "Edited");
        assert_eq!(store.list_tasks().len(), 4);

        task.content = "body".to_string();
        store.add_or_update_task(task.clone()).await.unwrap();
        assert_eq!(store.list_tasks()[0].content, "body");
    }

    #[tokio::test]
    async fn test_toggle_missing_task_leaves_storage_identical() {
        let (backend, mut store) = open_memory().await;
        let before = serde_json::to_vec(&backend.get("memoira_tasks").await.unwrap()).unwrap();

        let changed = store.toggle_completion(uuid::Uuid::new_v4()).await.unwrap();

        assert!(!changed);
        let after = serde_json::to_vec(&backend.get("memoira_tasks").await.unwrap()).unwrap();
        assert_eq!(before, after);
    }

    #[tokio::test]
    async fn test_update_task() {
        let (_, mut store) = open_memory().await;
        let id = find(&store, "مهمة ترحيبية").id;

        let updated = store
            .update_task(
                id,
                TaskUpdate {
                    title: Some("Hello".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.title, "Hello");
        assert!(updated.is_pinned);

        let missing = store
            .update_task(uuid::Uuid::new_v4(), TaskUpdate::default())
            .await
            .unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn test_checklist_toggle_and_clear_completed() {
        let (_, mut store) = open_memory().await;
        let shopping = find(&store, "قائمة التسوق").clone();
        let milk = shopping.items()[0].id;

        assert!(store.toggle_checklist_item(shopping.id, milk).await.unwrap());
        assert!(find(&store, "قائمة التسوق").items()[0].is_completed);
        assert!(!store
            .toggle_checklist_item(shopping.id, uuid::Uuid::new_v4())
            .await
            .unwrap());

        assert_eq!(store.clear_completed().await.unwrap(), 1);
        assert_eq!(store.clear_completed().await.unwrap(), 0);
        assert!(store.list_tasks().iter().all(|t| !t.is_completed));
    }

    #[tokio::test]
    async fn test_folder_lifecycle() {
        let (backend, mut store) = open_memory().await;

        let travel = store.add_folder(" سفر ").await.unwrap().unwrap();
        assert_eq!(travel.name, "سفر");
        assert!(store.add_folder("سفر").await.unwrap().is_none());
        assert!(store.add_folder("").await.unwrap().is_none());
        assert_eq!(store.list_folders().len(), 4);

        assert!(store.rename_folder(&travel.id, "Trips").await.unwrap());
        assert!(!store.rename_folder(&travel.id, "عمل").await.unwrap());

        let stored = backend.get("memoira_folders").await.unwrap().unwrap();
        assert_eq!(stored[3]["name"], "Trips");
    }

    #[tokio::test]
    async fn test_folder_deletion_requires_confirmation() {
        let (_, mut store) = open_memory().await;
        let report = find(&store, "الانتهاء من تقرير المشروع").id;

        let deletion = store.request_folder_deletion("work").unwrap();
        assert_eq!(deletion.affected_tasks, 1);
        // declining means dropping the request
        assert_eq!(store.list_folders().len(), 3);

        let task_count = store.list_tasks().len();
        assert!(store.confirm_folder_deletion(deletion).await.unwrap());
        assert!(store.list_folders().iter().all(|f| f.id != "work"));
        assert_eq!(store.list_tasks().len(), task_count);
        assert_eq!(
            store.get_task(report).unwrap().folder_id.as_deref(),
            Some(DEFAULT_FOLDER_ID)
        );
    }

    #[tokio::test]
    async fn test_default_folder_cannot_be_deleted() {
        let (_, store) = open_memory().await;
        assert!(store.request_folder_deletion(DEFAULT_FOLDER_ID).is_none());
        assert!(store.request_folder_deletion("nope").is_none());
    }

    #[tokio::test]
    async fn test_reorder_persists() {
        let backend = Arc::new(MemoryStore::with_entries([("memoira_tasks", json!([]))]));
        let mut store = NoteStore::open(backend.clone()).await.unwrap();
        for title in ["a", "b", "c"] {
            let mut task = Task::new_text(title, "");
            task.created_at = chrono::DateTime::from_timestamp_millis(1_000).unwrap();
            store.add_or_update_task(task).await.unwrap();
        }
        // equal timestamps: the view follows canonical order c, b, a
        let filters = TaskFilters::default();
        let moved = store
            .reorder_task(&filters, DragMove::within(Partition::Regular, 0, 2))
            .await
            .unwrap();
        assert!(moved);

        let titles: Vec<_> = store.view(&filters).iter().map(|t| t.title.clone()).collect();
        assert_eq!(titles, vec!["b", "a", "c"]);

        let reopened = NoteStore::open(backend).await.unwrap();
        assert_eq!(reopened.list_tasks(), store.list_tasks());
    }

    #[tokio::test]
    async fn test_view_through_store() {
        let (_, store) = open_memory().await;
        let filters = TaskFilters::new().with_status(StatusFilter::Active);
        let view = store.view(&filters);
        assert_eq!(view.pinned.len(), 1);
        assert_eq!(view.regular.len(), 1);
        assert_eq!(view.regular[0].kind, TaskKind::Checklist);
    }

    #[tokio::test]
    async fn test_settings_persist_under_their_own_keys() {
        let (backend, mut store) = open_memory().await;

        store.set_auto_save(true).await.unwrap();
        store.set_font_family(FontFamily::Mono).await.unwrap();
        store.set_columns(ColumnCount::Two).await.unwrap();
        store.set_folder_size(DisplaySize::Lg).await.unwrap();

        assert_eq!(backend.get("memoira_autoSave").await.unwrap(), Some(json!(true)));
        assert_eq!(backend.get("memoira_fontFamily").await.unwrap(), Some(json!("mono")));
        assert_eq!(backend.get("memoira_columns").await.unwrap(), Some(json!("2")));
        assert_eq!(backend.get("memoira_folderSize").await.unwrap(), Some(json!("lg")));
        assert_eq!(backend.get("memoira_cardSize").await.unwrap(), Some(json!("md")));
    }

    #[tokio::test]
    async fn test_failed_write_keeps_memory_and_retries() {
        let (backend, mut store) = open_memory().await;
        let id = find(&store, "مهمة ترحيبية").id;

        backend.set_fail_writes(true);
        let err = store.toggle_pin(id).await.unwrap_err();
        assert!(err.is_persistence());
        assert!(!store.get_task(id).unwrap().is_pinned);
        assert_eq!(store.dirty_keys(), vec![StorageKey::Tasks]);

        backend.set_fail_writes(false);
        store.flush().await.unwrap();
        assert!(!store.is_dirty());

        let reopened = NoteStore::open(backend).await.unwrap();
        assert!(!reopened.get_task(id).unwrap().is_pinned);
    }

    #[tokio::test]
    async fn test_transient_write_failure_is_retried_before_reporting() {
        let (backend, mut store) = open_memory().await;
        let id = find(&store, "قائمة التسوق").id;

        backend.fail_next_writes(1);
        assert!(store.toggle_pin(id).await.unwrap());
        assert!(!store.is_dirty());

        let reopened = NoteStore::open(backend).await.unwrap();
        assert!(reopened.get_task(id).unwrap().is_pinned);
    }

    #[tokio::test]
    async fn test_dirty_keys_retry_on_next_write() {
        let (backend, mut store) = open_memory().await;

        backend.set_fail_writes(true);
        assert!(store.set_auto_save(true).await.is_err());
        backend.set_fail_writes(false);

        store.set_font_size(FontSize::Sm).await.unwrap();
        assert!(!store.is_dirty());
        assert_eq!(backend.get("memoira_autoSave").await.unwrap(), Some(json!(true)));
    }

    #[tokio::test]
    async fn test_mocked_backend_failure_surfaces_key() {
        let mut mock = MockKeyValueStore::new();
        mock.expect_get().returning(|key| {
            if key.starts_with("memoira_tasks") {
                Ok(Some(json!([])))
            } else {
                Ok(None)
            }
        });
        mock.expect_set().returning(|key, _| {
            if key.starts_with("memoira_tasks") {
                Err(MemoiraError::Io(std::io::Error::other("disk full")))
            } else {
                Ok(())
            }
        });

        let mut store = NoteStore::open(Arc::new(mock)).await.unwrap();
        let err = store
            .add_or_update_task(Task::new_text("Note", ""))
            .await
            .unwrap_err();

        match err {
            MemoiraError::Persistence { key, .. } => assert_eq!(key, "memoira_tasks"),
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(store.list_tasks().len(), 1);
        assert!(store.is_dirty());
    }

    #[tokio::test]
    async fn test_save_draft_and_autosave() {
        let (_, mut store) = open_memory().await;

        let mut draft = TaskDraft::new();
        assert!(store.save_draft(&draft).await.unwrap().is_none());

        draft.title = "شراء حليب".to_string();
        let saved = store.save_draft(&draft).await.unwrap().unwrap();
        assert_eq!(saved.emoji.as_deref(), Some("🥛"));

        draft.content = "من السوق".to_string();
        let task = draft.build().unwrap();
        assert!(store.apply_autosave(task).await.unwrap());
        assert_eq!(store.list_tasks().len(), 4);
        assert_eq!(store.get_task(draft.id()).unwrap().content, "من السوق");
    }

    #[tokio::test]
    async fn test_folder_task_counts() {
        let (_, mut store) = open_memory().await;
        let orphan = Task::new_text("orphan", "").with_folder("gone");
        store.add_or_update_task(orphan).await.unwrap();

        let counts: Vec<_> = store
            .folder_task_counts()
            .into_iter()
            .map(|(folder, count)| (folder.id.clone(), count))
            .collect();
        assert_eq!(
            counts,
            vec![
                ("default".to_string(), 2),
                ("shopping".to_string(), 1),
                ("work".to_string(), 1),
            ]
        );
    }
}
