use crate::cli::{SettingsAction, SettingsSetArgs};
use crate::context::CliContext;
use crate::output;
use memoira_domain::NoteOperations;

pub async fn handle(ctx: &mut CliContext, action: SettingsAction) -> anyhow::Result<()> {
    match action {
        SettingsAction::Show => output::output_success(ctx.notes.settings()),
        SettingsAction::Set(args) => {
            handle_set(ctx, args).await?;
            output::output_success(ctx.notes.settings());
        }
    }
    Ok(())
}

async fn handle_set(ctx: &mut CliContext, args: SettingsSetArgs) -> anyhow::Result<()> {
    let notes = &mut ctx.notes;
    if let Some(enabled) = args.auto_save {
        notes.set_auto_save(enabled).await?;
    }
    if let Some(family) = args.font_family {
        notes.set_font_family(family).await?;
    }
    if let Some(size) = args.font_size {
        notes.set_font_size(size).await?;
    }
    if let Some(columns) = args.columns {
        notes.set_columns(columns).await?;
    }
    if let Some(size) = args.folder_size {
        notes.set_folder_size(size).await?;
    }
    if let Some(size) = args.card_size {
        notes.set_card_size(size).await?;
    }
    Ok(())
}
