use crate::cli::{TaskAction, TaskAddArgs, TaskEditArgs, TaskMoveArgs, TaskWriteArgs};
use crate::context::CliContext;
use crate::handlers::view::build_filters;
use crate::output;
use memoira_domain::{DragMove, FieldUpdate, NoteOperations, TaskDraft, TaskKind, TaskUpdate};
use memoira_persistence::AutoSaver;
use tokio::io::{AsyncBufReadExt, BufReader};

pub async fn handle(ctx: &mut CliContext, action: TaskAction) -> anyhow::Result<()> {
    match action {
        TaskAction::Add(args) => handle_add(ctx, args).await?,
        TaskAction::List => {
            output::output_list(ctx.notes.list_tasks().to_vec());
        }
        TaskAction::Get { id } => match ctx.notes.get_task(id) {
            Some(task) => {
                let progress = task.checklist_progress().map(|p| {
                    serde_json::json!({
                        "completed": p.completed,
                        "total": p.total,
                        "remaining": p.remaining(),
                        "done": p.is_done(),
                    })
                });
                let open_items: Option<Vec<_>> = task
                    .is_checklist()
                    .then(|| task.open_items().collect());
                output::output_success(serde_json::json!({
                    "task": task,
                    "progress": progress,
                    "open_items": open_items,
                }))
            }
            None => return output::output_error(&format!("Task not found: {}", id)),
        },
        TaskAction::Edit(args) => handle_edit(ctx, args).await?,
        TaskAction::Write(args) => handle_write(ctx, args).await?,
        TaskAction::Delete { id } => {
            if !ctx.notes.delete_task(id).await? {
                return output::output_error(&format!("Task not found: {}", id));
            }
            output::output_success(serde_json::json!({"deleted": id.to_string()}));
        }
        TaskAction::Toggle { id } => {
            if !ctx.notes.toggle_completion(id).await? {
                return output::output_error(&format!("Task not found: {}", id));
            }
            output::output_success(ctx.require_task(id)?);
        }
        TaskAction::Pin { id } => {
            if !ctx.notes.toggle_pin(id).await? {
                return output::output_error(&format!("Task not found: {}", id));
            }
            output::output_success(ctx.require_task(id)?);
        }
        TaskAction::Check { id, item } => {
            if !ctx.notes.toggle_checklist_item(id, item).await? {
                return output::output_error(&format!(
                    "Checklist item {} not found in task {}",
                    item, id
                ));
            }
            output::output_success(ctx.require_task(id)?);
        }
        TaskAction::ClearCompleted => {
            let removed = ctx.notes.clear_completed().await?;
            output::output_success(serde_json::json!({"removed": removed}));
        }
        TaskAction::Move(args) => handle_move(ctx, args).await?,
    }
    Ok(())
}

async fn handle_add(ctx: &mut CliContext, args: TaskAddArgs) -> anyhow::Result<()> {
    if let Some(folder) = &args.folder {
        ctx.require_folder(folder)?;
    }

    let mut draft = TaskDraft::new();
    draft.title = args.title;
    draft.content = args.content;
    if args.checklist || !args.items.is_empty() {
        draft.kind = TaskKind::Checklist;
    }
    for text in args.items {
        let item = draft.add_item();
        draft.update_item(item, text);
    }
    if let Some(color) = args.color {
        draft.background_color = color;
    }
    if let Some(folder) = args.folder {
        draft.folder_id = folder;
    }

    let Some(mut task) = draft.build() else {
        return output::output_error("Task title and content are both empty");
    };
    task.is_pinned = args.pinned;
    ctx.notes.add_or_update_task(task).await?;
    output::output_success(ctx.require_task(draft.id())?);
    Ok(())
}

async fn handle_edit(ctx: &mut CliContext, args: TaskEditArgs) -> anyhow::Result<()> {
    ctx.require_task(args.id)?;
    if let Some(folder) = &args.folder {
        ctx.require_folder(folder)?;
    }

    let updates = TaskUpdate {
        title: args.title,
        content: args.content,
        kind: args.kind,
        background_color: FieldUpdate::from_parts(args.color, args.clear_color),
        emoji: FieldUpdate::from_parts(args.emoji, args.clear_emoji),
        folder_id: args
            .folder
            .map(FieldUpdate::Set)
            .unwrap_or(FieldUpdate::NoChange),
    };
    if updates.is_empty() {
        return output::output_error("Nothing to update");
    }

    match ctx.notes.update_task(args.id, updates).await? {
        Some(task) => output::output_success(&task),
        None => return output::output_error("Task title and content would both be empty"),
    }
    Ok(())
}

/// Appends stdin lines to the draft's content. With auto-save on, each line
/// schedules a deferred save and delivered saves are applied as they arrive.
async fn handle_write(ctx: &mut CliContext, args: TaskWriteArgs) -> anyhow::Result<()> {
    let mut draft = match args.id {
        Some(id) => TaskDraft::from_task(ctx.require_task(id)?),
        None => TaskDraft::new(),
    };
    if let Some(title) = args.title {
        draft.title = title;
    }
    if let Some(folder) = args.folder {
        ctx.require_folder(&folder)?;
        draft.folder_id = folder;
    }

    let auto_save = ctx.notes.settings().auto_save;
    let (saver, mut delivered) = AutoSaver::new(ctx.config.effective_autosave_delay());
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                if !draft.content.is_empty() {
                    draft.content.push('\n');
                }
                draft.content.push_str(&line);
                if auto_save {
                    if let Some(task) = draft.build() {
                        saver.schedule(task);
                    }
                }
            }
            Some(task) = delivered.recv() => {
                ctx.notes.apply_autosave(task).await?;
            }
        }
    }

    // The explicit save below supersedes any pending one
    saver.cancel(draft.id());
    match ctx.notes.save_draft(&draft).await? {
        Some(task) => output::output_success(&task),
        None => return output::output_error("Task title and content are both empty"),
    }
    Ok(())
}

async fn handle_move(ctx: &mut CliContext, args: TaskMoveArgs) -> anyhow::Result<()> {
    let filters = build_filters(ctx, &args.view);
    let drag = DragMove {
        source: args.partition,
        source_index: args.from,
        destination: args.to_partition.unwrap_or(args.partition),
        destination_index: args.to,
    };
    if drag.crosses_partitions() {
        return output::output_error("Tasks cannot be dragged between pinned and regular");
    }

    let moved = ctx.notes.reorder_task(&filters, drag).await?;
    let view = ctx.notes.view(&filters);
    output::output_success(serde_json::json!({
        "moved": moved,
        "order": view.partition_ids(args.partition),
    }));
    Ok(())
}
