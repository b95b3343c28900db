use crate::cli::ViewArgs;
use crate::context::CliContext;
use crate::output;
use memoira_domain::{NoteOperations, Task, TaskFilters};
use serde::Serialize;

#[derive(Serialize)]
struct ViewResponse<'a> {
    pinned: Vec<&'a Task>,
    regular: Vec<&'a Task>,
    count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    empty_reason: Option<memoira_domain::EmptyReason>,
}

/// Filters for a view request. A folder that no longer exists is dropped
/// from the selection instead of producing an empty view.
pub fn build_filters(ctx: &CliContext, args: &ViewArgs) -> TaskFilters {
    let mut filters = TaskFilters::new()
        .with_status(args.filter)
        .with_search(args.search.clone());
    if let Some(folder) = &args.folder {
        filters = filters.with_folder(folder.clone());
        if !ctx.folder_exists(folder) {
            tracing::warn!("Folder {} no longer exists, showing all folders", folder);
            filters.forget_folder(folder);
        }
    }
    filters
}

pub async fn handle(ctx: &CliContext, args: ViewArgs) -> anyhow::Result<()> {
    let filters = build_filters(ctx, &args);
    let view = ctx.notes.view(&filters);
    let empty_reason = view.empty_reason(&filters);
    let count = view.len();
    output::output_success(ViewResponse {
        pinned: view.pinned,
        regular: view.regular,
        count,
        empty_reason,
    });
    Ok(())
}
