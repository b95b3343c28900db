//! Derived task view.
//!
//! The view is recomputed from the full task list on every state change and
//! is never persisted. The pipeline runs in a fixed order: folder scope,
//! search, status filter, pinned/regular partition, newest-first sort.

use serde::Serialize;

use crate::filter::{FolderFilter, StatusFilter, TaskFilter, TaskFilters};
use crate::reorder::Partition;
use crate::search::{CompositeSearcher, TaskSearcher};
use crate::sort::newest_first;
use crate::{Task, TaskId};

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TaskView<'a> {
    pub pinned: Vec<&'a Task>,
    pub regular: Vec<&'a Task>,
}

/// Why a derived view came out empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EmptyReason {
    NoSearchMatches,
    NoTasks,
    NoActiveTasks,
    NoCompletedTasks,
    NoPinnedTasks,
}

pub fn derive_view<'a>(tasks: &'a [Task], filters: &TaskFilters) -> TaskView<'a> {
    let folder = filters.selected_folder_id.as_deref().map(FolderFilter::new);
    let searcher = filters
        .has_search()
        .then(|| CompositeSearcher::all(filters.search_term.as_str()));

    let (mut pinned, mut regular): (Vec<&Task>, Vec<&Task>) = tasks
        .iter()
        .filter(|task| folder.as_ref().map_or(true, |f| f.matches(task)))
        .filter(|task| searcher.as_ref().map_or(true, |s| s.matches(task)))
        .filter(|task| filters.status.matches(task))
        .partition(|task| task.is_pinned);

    newest_first(&mut pinned);
    newest_first(&mut regular);

    TaskView { pinned, regular }
}

impl<'a> TaskView<'a> {
    pub fn len(&self) -> usize {
        self.pinned.len() + self.regular.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pinned.is_empty() && self.regular.is_empty()
    }

    pub fn partition(&self, partition: Partition) -> &[&'a Task] {
        match partition {
            Partition::Pinned => &self.pinned,
            Partition::Regular => &self.regular,
        }
    }

    pub fn partition_ids(&self, partition: Partition) -> Vec<TaskId> {
        self.partition(partition).iter().map(|task| task.id).collect()
    }

    /// Pinned tasks followed by regular tasks.
    pub fn iter(&self) -> impl Iterator<Item = &'a Task> + '_ {
        self.pinned.iter().chain(self.regular.iter()).copied()
    }

    pub fn empty_reason(&self, filters: &TaskFilters) -> Option<EmptyReason> {
        if !self.is_empty() {
            return None;
        }
        if filters.has_search() {
            return Some(EmptyReason::NoSearchMatches);
        }
        Some(match filters.status {
            StatusFilter::All => EmptyReason::NoTasks,
            StatusFilter::Active => EmptyReason::NoActiveTasks,
            StatusFilter::Completed => EmptyReason::NoCompletedTasks,
            StatusFilter::Pinned => EmptyReason::NoPinnedTasks,
        })
    }
}
