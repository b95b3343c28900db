mod cli;
mod context;
mod handlers;
mod output;

use clap::{CommandFactory, Parser};
use cli::{Cli, Commands};
use context::CliContext;
use memoira_core::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if let Ok(log_path) = std::env::var("MEMOIRA_DEBUG_LOG") {
        let log_file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)?;

        tracing_subscriber::fmt()
            .with_writer(log_file)
            .with_max_level(tracing::Level::DEBUG)
            .with_target(true)
            .with_thread_ids(true)
            .with_file(true)
            .with_line_number(true)
            .with_ansi(false)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_max_level(tracing::Level::WARN)
            .init();
    }

    let cli = Cli::parse();

    let command = match cli.command {
        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "memoira", &mut std::io::stdout());
            return Ok(());
        }
        command => command,
    };

    let config = AppConfig::load();
    let Some(file_path) = cli.file.or_else(|| config.effective_data_file()) else {
        output::output_error("No data file: pass --file or set MEMOIRA_FILE");
    };

    let mut ctx = match CliContext::load(&file_path, config).await {
        Ok(ctx) => ctx,
        Err(e) => output::output_error(&format!("Failed to open {}: {}", file_path.display(), e)),
    };

    let result = match command {
        Commands::Task(task_cmd) => handlers::task::handle(&mut ctx, task_cmd.action).await,
        Commands::Folder(folder_cmd) => handlers::folder::handle(&mut ctx, folder_cmd.action).await,
        Commands::Settings(settings_cmd) => {
            handlers::settings::handle(&mut ctx, settings_cmd.action).await
        }
        Commands::View(args) => handlers::view::handle(&ctx, args).await,
        Commands::Completions { .. } => Ok(()),
    };

    if let Err(e) = result {
        // The store already retried; whatever is still dirty was not saved
        if ctx.notes.is_dirty() {
            tracing::warn!(
                "Unsaved keys {:?} in {}",
                ctx.notes.dirty_keys(),
                ctx.path().display()
            );
        }
        output::output_error(&format!("{:#}", e));
    }
    Ok(())
}
