//! Debounced auto-save of editor drafts.
//!
//! Each edit schedules a deferred save keyed by task id. A newer edit of the
//! same task replaces the pending save and restarts the delay, so only the
//! last edit in a burst is delivered.

use memoira_domain::{Task, TaskId};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

struct PendingSave {
    generation: u64,
    handle: JoinHandle<()>,
}

#[derive(Default)]
struct Pending {
    next_generation: u64,
    saves: HashMap<TaskId, PendingSave>,
}

/// Trailing-edge debouncer delivering tasks on a channel.
///
/// The receiver returned by `new` should feed `NoteStore::apply_autosave`.
pub struct AutoSaver {
    delay: Duration,
    tx: mpsc::UnboundedSender<Task>,
    pending: Arc<Mutex<Pending>>,
}

impl AutoSaver {
    /// Must be called within a tokio runtime.
    pub fn new(delay: Duration) -> (Self, mpsc::UnboundedReceiver<Task>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let saver = Self {
            delay,
            tx,
            pending: Arc::new(Mutex::new(Pending::default())),
        };
        (saver, rx)
    }

    /// Deliver `task` after the delay unless it is rescheduled or cancelled
    /// first.
    pub fn schedule(&self, task: Task) {
        let id = task.id;
        let delay = self.delay;
        let tx = self.tx.clone();
        let pending = Arc::clone(&self.pending);

        let mut guard = self.pending.lock();
        let generation = guard.next_generation;
        guard.next_generation += 1;

        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            // An abort that lands after the wake-up is too late to stop us
            let mut guard = pending.lock();
            if guard.saves.get(&id).map(|p| p.generation) != Some(generation) {
                tracing::debug!("Skipping superseded auto-save for {}", id);
                return;
            }
            guard.saves.remove(&id);
            if tx.send(task).is_err() {
                tracing::error!("Failed to deliver auto-save for {}: channel closed", id);
            }
        });

        if let Some(previous) = guard.saves.insert(id, PendingSave { generation, handle }) {
            previous.handle.abort();
            tracing::debug!("Rescheduled auto-save for {}", id);
        } else {
            tracing::debug!("Scheduled auto-save for {} in {:?}", id, delay);
        }
    }

    /// Drop the pending save for `id`, e.g. when its editor is dismissed.
    /// Returns false if nothing was pending.
    pub fn cancel(&self, id: TaskId) -> bool {
        match self.pending.lock().saves.remove(&id) {
            Some(save) => {
                save.handle.abort();
                tracing::debug!("Cancelled auto-save for {}", id);
                true
            }
            None => false,
        }
    }

    pub fn cancel_all(&self) {
        for (_, save) in self.pending.lock().saves.drain() {
            save.handle.abort();
        }
    }

    pub fn is_pending(&self, id: TaskId) -> bool {
        self.pending.lock().saves.contains_key(&id)
    }

    /// Number of saves waiting for their delay to elapse.
    pub fn pending(&self) -> usize {
        self.pending.lock().saves.len()
    }
}

impl Drop for AutoSaver {
    fn drop(&mut self) {
        self.cancel_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use crate::NoteStore;
    use memoira_domain::{NoteOperations, TaskDraft};
    use tokio::time::{sleep, timeout, Instant};

    const DELAY: Duration = Duration::from_millis(1000);

    fn note(title: &str) -> Task {
        Task::new_text(title, "")
    }

    #[tokio::test(start_paused = true)]
    async fn test_delivers_after_delay() {
        let (saver, mut rx) = AutoSaver::new(DELAY);
        let start = Instant::now();

        saver.schedule(note("draft"));
        assert_eq!(saver.pending(), 1);

        let delivered = rx.recv().await.unwrap();
        assert_eq!(delivered.title, "draft");
        assert!(start.elapsed() >= DELAY);
        assert_eq!(saver.pending(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_reschedule_keeps_only_latest_edit() {
        let (saver, mut rx) = AutoSaver::new(DELAY);
        let start = Instant::now();

        let mut task = note("v1");
        saver.schedule(task.clone());
        sleep(Duration::from_millis(600)).await;

        task.title = "v2".to_string();
        saver.schedule(task.clone());
        assert_eq!(saver.pending(), 1);

        let delivered = rx.recv().await.unwrap();
        assert_eq!(delivered.title, "v2");
        assert!(start.elapsed() >= Duration::from_millis(1600));

        assert!(timeout(DELAY * 3, rx.recv()).await.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_drops_pending_save() {
        let (saver, mut rx) = AutoSaver::new(DELAY);
        let task = note("discarded");

        saver.schedule(task.clone());
        assert!(saver.is_pending(task.id));
        assert!(saver.cancel(task.id));
        assert!(!saver.cancel(task.id));

        assert!(timeout(DELAY * 3, rx.recv()).await.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_superseded_save_is_not_delivered_after_waking() {
        let (saver, mut rx) = AutoSaver::new(DELAY);
        let task = note("stale");
        saver.schedule(task.clone());

        // Newer generation registered without aborting the sleeping save
        saver
            .pending
            .lock()
            .saves
            .get_mut(&task.id)
            .unwrap()
            .generation += 1;

        assert!(timeout(DELAY * 3, rx.recv()).await.is_err());
        assert!(saver.is_pending(task.id));
    }

    #[tokio::test(start_paused = true)]
    async fn test_tasks_debounce_independently() {
        let (saver, mut rx) = AutoSaver::new(DELAY);

        saver.schedule(note("a"));
        saver.schedule(note("b"));
        assert_eq!(saver.pending(), 2);

        let mut titles = vec![rx.recv().await.unwrap().title, rx.recv().await.unwrap().title];
        titles.sort();
        assert_eq!(titles, vec!["a", "b"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_delivered_draft_updates_one_task() {
        let backend = Arc::new(MemoryStore::new());
        let mut store = NoteStore::open(backend).await.unwrap();
        let (saver, mut rx) = AutoSaver::new(DELAY);

        let mut draft = TaskDraft::new();
        for text in ["ف", "فكر", "فكرة"] {
            draft.title = text.to_string();
            if let Some(task) = draft.build() {
                saver.schedule(task);
            }
            sleep(Duration::from_millis(200)).await;
        }

        let task = rx.recv().await.unwrap();
        assert!(store.apply_autosave(task).await.unwrap());

        let saved = store.get_task(draft.id()).unwrap();
        assert_eq!(saved.title, "فكرة");
        assert_eq!(saved.emoji.as_deref(), Some("💡"));
        assert_eq!(store.list_tasks().len(), 4);
    }
}
