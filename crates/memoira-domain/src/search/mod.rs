//! Task search functionality.
//!
//! Matching is a case-insensitive substring test against the title, the
//! content and, for checklist tasks, every item's text. A task matches if
//! any of them contains the query.

use crate::Task;

/// Trait for searching tasks by various criteria.
pub trait TaskSearcher {
    /// Returns true if the task matches the search criteria.
    fn matches(&self, task: &Task) -> bool;
}

/// Search tasks by title (case-insensitive).
pub struct TitleSearcher {
    query: String,
}

impl TitleSearcher {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into().to_lowercase(),
        }
    }
}

impl TaskSearcher for TitleSearcher {
    fn matches(&self, task: &Task) -> bool {
        task.title.to_lowercase().contains(&self.query)
    }
}

/// Search tasks by free-text content (case-insensitive).
pub struct ContentSearcher {
    query: String,
}

impl ContentSearcher {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into().to_lowercase(),
        }
    }
}

impl TaskSearcher for ContentSearcher {
    fn matches(&self, task: &Task) -> bool {
        task.content.to_lowercase().contains(&self.query)
    }
}

/// Search checklist item text. Text tasks never match, even if they carry
/// leftover items from an earlier checklist edit.
pub struct ChecklistSearcher {
    query: String,
}

impl ChecklistSearcher {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into().to_lowercase(),
        }
    }
}

impl TaskSearcher for ChecklistSearcher {
    fn matches(&self, task: &Task) -> bool {
        task.is_checklist()
            && task
                .items()
                .iter()
                .any(|item| item.text.to_lowercase().contains(&self.query))
    }
}

enum SearchBy {
    Title(TitleSearcher),
    Content(ContentSearcher),
    Checklist(ChecklistSearcher),
}

impl SearchBy {
    fn matches(&self, task: &Task) -> bool {
        match self {
            Self::Title(s) => s.matches(task),
            Self::Content(s) => s.matches(task),
            Self::Checklist(s) => s.matches(task),
        }
    }
}

/// Matches if any of title, content or checklist items contains the query.
pub struct CompositeSearcher {
    searchers: Vec<SearchBy>,
}

impl CompositeSearcher {
    pub fn all(query: impl Into<String>) -> Self {
        let query = query.into();
        Self {
            searchers: vec![
                SearchBy::Title(TitleSearcher::new(query.clone())),
                SearchBy::Content(ContentSearcher::new(query.clone())),
                SearchBy::Checklist(ChecklistSearcher::new(query)),
            ],
        }
    }
}

impl TaskSearcher for CompositeSearcher {
    fn matches(&self, task: &Task) -> bool {
        self.searchers.iter().any(|searcher| searcher.matches(task))
    }
}
