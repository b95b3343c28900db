use clap::{Args, Parser, Subcommand};
use memoira_domain::{
    ColumnCount, DisplaySize, FontFamily, FontSize, Partition, StatusFilter, TaskKind,
};
use std::path::PathBuf;
use uuid::Uuid;

#[derive(Parser)]
#[command(name = "memoira")]
#[command(about = "Notes and checklists with folders, search and manual ordering", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to the data file (or set MEMOIRA_FILE env var)
    #[arg(long, global = true, value_name = "FILE", env = "MEMOIRA_FILE")]
    pub file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Task operations
    Task(TaskCommand),
    /// Folder operations
    Folder(FolderCommand),
    /// Display preferences
    Settings(SettingsCommand),
    /// Show the filtered, partitioned task view
    View(ViewArgs),
    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

// Task commands
#[derive(Args)]
pub struct TaskCommand {
    #[command(subcommand)]
    pub action: TaskAction,
}

#[derive(Subcommand)]
pub enum TaskAction {
    /// Create a new task
    Add(TaskAddArgs),
    /// List all tasks in stored order
    List,
    /// Get a specific task
    Get {
        #[arg(long)]
        id: Uuid,
    },
    /// Update fields of a task
    Edit(TaskEditArgs),
    /// Compose a task from stdin, auto-saving while typing when enabled
    Write(TaskWriteArgs),
    /// Delete a task
    Delete {
        #[arg(long)]
        id: Uuid,
    },
    /// Toggle completion of a task
    Toggle {
        #[arg(long)]
        id: Uuid,
    },
    /// Toggle pin of a task
    Pin {
        #[arg(long)]
        id: Uuid,
    },
    /// Toggle a checklist item
    Check {
        #[arg(long)]
        id: Uuid,
        #[arg(long)]
        item: Uuid,
    },
    /// Delete every completed task
    ClearCompleted,
    /// Move a task within its partition of the view
    Move(TaskMoveArgs),
}

#[derive(Args)]
pub struct TaskAddArgs {
    #[arg(long, default_value = "")]
    pub title: String,
    #[arg(long, default_value = "")]
    pub content: String,
    /// Create a checklist instead of a text note
    #[arg(long)]
    pub checklist: bool,
    /// Checklist item text (repeatable)
    #[arg(long = "item")]
    pub items: Vec<String>,
    /// Background color, e.g. #FFFDE7
    #[arg(long)]
    pub color: Option<String>,
    #[arg(long)]
    pub folder: Option<String>,
    #[arg(long)]
    pub pinned: bool,
}

#[derive(Args)]
pub struct TaskEditArgs {
    #[arg(long)]
    pub id: Uuid,
    #[arg(long)]
    pub title: Option<String>,
    #[arg(long)]
    pub content: Option<String>,
    #[arg(long = "type")]
    pub kind: Option<TaskKind>,
    #[arg(long)]
    pub color: Option<String>,
    #[arg(long)]
    pub clear_color: bool,
    #[arg(long)]
    pub emoji: Option<String>,
    #[arg(long)]
    pub clear_emoji: bool,
    #[arg(long)]
    pub folder: Option<String>,
}

#[derive(Args)]
pub struct TaskWriteArgs {
    /// Existing task to edit; a new task is created when omitted
    #[arg(long)]
    pub id: Option<Uuid>,
    #[arg(long)]
    pub title: Option<String>,
    #[arg(long)]
    pub folder: Option<String>,
}

#[derive(Args)]
pub struct TaskMoveArgs {
    /// Partition the task is dragged from
    #[arg(long)]
    pub partition: Partition,
    #[arg(long)]
    pub from: usize,
    #[arg(long)]
    pub to: usize,
    /// Partition the task is dropped on; defaults to the source partition
    #[arg(long)]
    pub to_partition: Option<Partition>,
    #[command(flatten)]
    pub view: ViewArgs,
}

// Folder commands
#[derive(Args)]
pub struct FolderCommand {
    #[command(subcommand)]
    pub action: FolderAction,
}

#[derive(Subcommand)]
pub enum FolderAction {
    /// Create a new folder
    Add {
        #[arg(long)]
        name: String,
    },
    /// List folders with their task counts
    List,
    /// Rename a folder
    Rename {
        #[arg(long)]
        id: String,
        #[arg(long)]
        name: String,
    },
    /// Delete a folder, moving its tasks to the default folder
    Delete {
        #[arg(long)]
        id: String,
        /// Confirm the deletion
        #[arg(long)]
        yes: bool,
    },
}

// Settings commands
#[derive(Args)]
pub struct SettingsCommand {
    #[command(subcommand)]
    pub action: SettingsAction,
}

#[derive(Subcommand)]
pub enum SettingsAction {
    /// Show current settings
    Show,
    /// Change one or more settings
    Set(SettingsSetArgs),
}

#[derive(Args)]
pub struct SettingsSetArgs {
    #[arg(long)]
    pub auto_save: Option<bool>,
    #[arg(long)]
    pub font_family: Option<FontFamily>,
    #[arg(long)]
    pub font_size: Option<FontSize>,
    #[arg(long)]
    pub columns: Option<ColumnCount>,
    #[arg(long)]
    pub folder_size: Option<DisplaySize>,
    #[arg(long)]
    pub card_size: Option<DisplaySize>,
}

// View
#[derive(Args, Clone)]
pub struct ViewArgs {
    #[arg(long, default_value = "all")]
    pub filter: StatusFilter,
    #[arg(long, default_value = "")]
    pub search: String,
    /// Only show tasks in this folder
    #[arg(long)]
    pub folder: Option<String>,
}
