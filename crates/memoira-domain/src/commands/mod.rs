use memoira_core::MemoiraResult;

pub mod folder_commands;
pub mod task_commands;

pub use folder_commands::*;
pub use task_commands::*;

/// Trait for domain commands that mutate state.
///
/// Rejected or unmatched commands are not errors: they report no changes and
/// leave the collections untouched.
pub trait Command: Send + Sync {
    /// Execute this command, returning which collections it modified.
    fn execute(&self, context: &mut CommandContext) -> MemoiraResult<Changes>;

    /// Human-readable description of what this command does
    fn description(&self) -> String;
}

/// Context passed to commands for mutation
pub struct CommandContext<'a> {
    pub tasks: &'a mut Vec<crate::Task>,
    pub folders: &'a mut Vec<crate::Folder>,
}

/// Which persisted collections a command touched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Changes {
    pub tasks: bool,
    pub folders: bool,
}

impl Changes {
    pub const NONE: Changes = Changes {
        tasks: false,
        folders: false,
    };
    pub const TASKS: Changes = Changes {
        tasks: true,
        folders: false,
    };
    pub const FOLDERS: Changes = Changes {
        tasks: false,
        folders: true,
    };

    pub fn is_empty(&self) -> bool {
        !self.tasks && !self.folders
    }

    pub fn merge(self, other: Changes) -> Changes {
        Changes {
            tasks: self.tasks || other.tasks,
            folders: self.folders || other.folders,
        }
    }
}
