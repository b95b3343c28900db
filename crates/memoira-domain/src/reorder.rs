//! Manual reordering of tasks within a view partition.
//!
//! A drag happens on the derived view, but the order that persists is the
//! canonical task list. `reconcile` maps a partition-local order back onto
//! the canonical list without touching the other partition.

use serde::{Deserialize, Serialize};

use crate::view::TaskView;
use crate::{Task, TaskId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Partition {
    Pinned,
    Regular,
}

impl Partition {
    pub fn of(task: &Task) -> Self {
        if task.is_pinned {
            Self::Pinned
        } else {
            Self::Regular
        }
    }
}

impl std::str::FromStr for Partition {
    type Err = memoira_core::MemoiraError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pinned" => Ok(Self::Pinned),
            "regular" => Ok(Self::Regular),
            other => Err(memoira_core::MemoiraError::Validation(format!(
                "Unknown partition: {}",
                other
            ))),
        }
    }
}

/// A completed drag gesture expressed in view coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DragMove {
    pub source: Partition,
    pub source_index: usize,
    pub destination: Partition,
    pub destination_index: usize,
}

impl DragMove {
    pub fn within(partition: Partition, from: usize, to: usize) -> Self {
        Self {
            source: partition,
            source_index: from,
            destination: partition,
            destination_index: to,
        }
    }

    /// Dropping onto the other partition would change pin status, which a
    /// drag never does.
    pub fn crosses_partitions(&self) -> bool {
        self.source != self.destination
    }

    pub fn is_noop(&self) -> bool {
        !self.crosses_partitions() && self.source_index == self.destination_index
    }
}

/// Moves the entry at `from` to `to`. Returns None if either index is out
/// of range.
pub fn reorder_partition(order: &[TaskId], from: usize, to: usize) -> Option<Vec<TaskId>> {
    if from >= order.len() || to >= order.len() {
        return None;
    }
    let mut order = order.to_vec();
    let moved = order.remove(from);
    order.insert(to, moved);
    Some(order)
}

/// Rebuilds the canonical list after `dragged` moved within its partition.
///
/// The dragged task is reinserted directly before the task that follows it in
/// `partition_order`. When it is last in the partition, or its successor is not
/// in the canonical list, it is appended. Pinned tasks are then moved ahead of
/// regular ones with a stable pass, so every other task keeps its relative
/// order.
pub fn reconcile(canonical: &[Task], partition_order: &[TaskId], dragged: TaskId) -> Vec<Task> {
    let mut tasks = canonical.to_vec();

    let Some(position) = partition_order.iter().position(|id| *id == dragged) else {
        return tasks;
    };
    let Some(from) = tasks.iter().position(|task| task.id == dragged) else {
        return tasks;
    };

    let moved = tasks.remove(from);
    let insert_at = partition_order
        .get(position + 1)
        .and_then(|successor| tasks.iter().position(|task| task.id == *successor))
        .unwrap_or(tasks.len());
    tasks.insert(insert_at, moved);

    // false sorts before true, and sort_by_key is stable
    tasks.sort_by_key(|task| !task.is_pinned);
    tasks
}

/// Applies a drag against the view it was performed on.
///
/// Returns None when the drag is rejected or changes nothing: crossing
/// partitions, dropping at the same index, or indices outside the partition.
pub fn apply_drag(canonical: &[Task], view: &TaskView<'_>, drag: &DragMove) -> Option<Vec<Task>> {
    if drag.crosses_partitions() || drag.is_noop() {
        return None;
    }
    let current = view.partition_ids(drag.source);
    let dragged = *current.get(drag.source_index)?;
    let reordered = reorder_partition(&current, drag.source_index, drag.destination_index)?;
    Some(reconcile(canonical, &reordered, dragged))
}
