use super::{Changes, Command, CommandContext};
use crate::filter::TaskFilters;
use crate::reorder::{self, DragMove};
use crate::view::derive_view;
use crate::{ChecklistItemId, Task, TaskId, TaskUpdate};
use memoira_core::MemoiraResult;

/// Insert a new task at the front, or replace an existing one in place.
pub struct SaveTask {
    pub task: Task,
}

impl Command for SaveTask {
    fn execute(&self, context: &mut CommandContext) -> MemoiraResult<Changes> {
        if self.task.is_blank() {
            tracing::debug!("Rejected blank task {}", self.task.id);
            return Ok(Changes::NONE);
        }
        match context.tasks.iter_mut().find(|t| t.id == self.task.id) {
            Some(existing) => *existing = self.task.clone(),
            None => context.tasks.insert(0, self.task.clone()),
        }
        Ok(Changes::TASKS)
    }

    fn description(&self) -> String {
        format!("Save task '{}'", self.task.title)
    }
}

/// Apply a partial update. The result goes through the same blank-task
/// rejection as a full save.
pub struct UpdateTask {
    pub task_id: TaskId,
    pub updates: TaskUpdate,
}

impl Command for UpdateTask {
    fn execute(&self, context: &mut CommandContext) -> MemoiraResult<Changes> {
        let Some(existing) = context.tasks.iter().find(|t| t.id == self.task_id) else {
            return Ok(Changes::NONE);
        };
        let mut updated = existing.clone();
        updated.apply_update(self.updates.clone());
        SaveTask { task: updated }.execute(context)
    }

    fn description(&self) -> String {
        format!("Update task {}", self.task_id)
    }
}

pub struct DeleteTask {
    pub task_id: TaskId,
}

impl Command for DeleteTask {
    fn execute(&self, context: &mut CommandContext) -> MemoiraResult<Changes> {
        let before = context.tasks.len();
        context.tasks.retain(|t| t.id != self.task_id);
        Ok(if context.tasks.len() != before {
            Changes::TASKS
        } else {
            Changes::NONE
        })
    }

    fn description(&self) -> String {
        format!("Delete task {}", self.task_id)
    }
}

pub struct ToggleCompletion {
    pub task_id: TaskId,
}

impl Command for ToggleCompletion {
    fn execute(&self, context: &mut CommandContext) -> MemoiraResult<Changes> {
        match context.tasks.iter_mut().find(|t| t.id == self.task_id) {
            Some(task) => {
                task.toggle_completion();
                Ok(Changes::TASKS)
            }
            None => Ok(Changes::NONE),
        }
    }

    fn description(&self) -> String {
        format!("Toggle completion of task {}", self.task_id)
    }
}

pub struct TogglePin {
    pub task_id: TaskId,
}

impl Command for TogglePin {
    fn execute(&self, context: &mut CommandContext) -> MemoiraResult<Changes> {
        match context.tasks.iter_mut().find(|t| t.id == self.task_id) {
            Some(task) => {
                task.toggle_pin();
                Ok(Changes::TASKS)
            }
            None => Ok(Changes::NONE),
        }
    }

    fn description(&self) -> String {
        format!("Toggle pin of task {}", self.task_id)
    }
}

pub struct ToggleChecklistItem {
    pub task_id: TaskId,
    pub item_id: ChecklistItemId,
}

impl Command for ToggleChecklistItem {
    fn execute(&self, context: &mut CommandContext) -> MemoiraResult<Changes> {
        let toggled = context
            .tasks
            .iter_mut()
            .find(|t| t.id == self.task_id)
            .is_some_and(|task| task.toggle_checklist_item(self.item_id));
        Ok(if toggled { Changes::TASKS } else { Changes::NONE })
    }

    fn description(&self) -> String {
        format!("Toggle item {} of task {}", self.item_id, self.task_id)
    }
}

pub struct ClearCompleted;

impl Command for ClearCompleted {
    fn execute(&self, context: &mut CommandContext) -> MemoiraResult<Changes> {
        let before = context.tasks.len();
        context.tasks.retain(|t| !t.is_completed);
        Ok(if context.tasks.len() != before {
            Changes::TASKS
        } else {
            Changes::NONE
        })
    }

    fn description(&self) -> String {
        "Clear completed tasks".to_string()
    }
}

/// Move a task within its partition of the view derived from `filters`.
pub struct ReorderTask {
    pub filters: TaskFilters,
    pub drag: DragMove,
}

impl Command for ReorderTask {
    fn execute(&self, context: &mut CommandContext) -> MemoiraResult<Changes> {
        let view = derive_view(context.tasks.as_slice(), &self.filters);
        match reorder::apply_drag(context.tasks.as_slice(), &view, &self.drag) {
            Some(reordered) => {
                *context.tasks = reordered;
                Ok(Changes::TASKS)
            }
            None => {
                tracing::debug!("Ignored drag {:?}", self.drag);
                Ok(Changes::NONE)
            }
        }
    }

    fn description(&self) -> String {
        format!(
            "Move task from {:?}[{}] to {:?}[{}]",
            self.drag.source,
            self.drag.source_index,
            self.drag.destination,
            self.drag.destination_index
        )
    }
}
