//! Task filtering functionality.
//!
//! Provides the status filter, folder scoping and the filter configuration
//! consumed by view derivation.

pub mod task_filter;
pub mod task_filters;

pub use task_filter::{FolderFilter, StatusFilter, TaskFilter};
pub use task_filters::TaskFilters;
