use crate::cli::FolderAction;
use crate::context::CliContext;
use crate::output;
use memoira_domain::NoteOperations;
use serde::Serialize;

#[derive(Serialize)]
struct FolderSummary<'a> {
    id: &'a str,
    name: &'a str,
    is_default: bool,
    task_count: usize,
}

pub async fn handle(ctx: &mut CliContext, action: FolderAction) -> anyhow::Result<()> {
    match action {
        FolderAction::Add { name } => match ctx.notes.add_folder(&name).await? {
            Some(folder) => output::output_success(&folder),
            None => {
                return output::output_error(&format!(
                    "Folder name is empty or already taken: {:?}",
                    name.trim()
                ))
            }
        },
        FolderAction::List => {
            let summaries: Vec<FolderSummary> = ctx
                .notes
                .folder_task_counts()
                .into_iter()
                .map(|(folder, task_count)| FolderSummary {
                    id: &folder.id,
                    name: &folder.name,
                    is_default: folder.is_default(),
                    task_count,
                })
                .collect();
            output::output_list(summaries);
        }
        FolderAction::Rename { id, name } => {
            ctx.require_folder(&id)?;
            if !ctx.notes.rename_folder(&id, &name).await? {
                return output::output_error(&format!(
                    "Folder name is empty or already taken: {:?}",
                    name.trim()
                ));
            }
            output::output_success(serde_json::json!({"id": id, "name": name.trim()}));
        }
        FolderAction::Delete { id, yes } => {
            let Some(deletion) = ctx.notes.request_folder_deletion(&id) else {
                if ctx.folder_exists(&id) {
                    return output::output_error("The default folder cannot be deleted");
                }
                return output::output_error(&format!("Folder not found: {}", id));
            };
            if !yes {
                return output::output_error(&format!(
                    "Deleting folder '{}' moves {} task(s) to the default folder; pass --yes to confirm",
                    deletion.folder.name, deletion.affected_tasks
                ));
            }
            let moved = deletion.affected_tasks;
            ctx.notes.confirm_folder_deletion(deletion).await?;
            output::output_success(serde_json::json!({
                "deleted": id,
                "moved_tasks": moved,
            }));
        }
    }
    Ok(())
}
