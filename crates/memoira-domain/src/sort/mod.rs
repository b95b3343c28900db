//! Task sorting functionality.

use crate::Task;
use std::borrow::Borrow;

/// Sort most recently created first. Works with both `&Task` and `Task`
/// elements.
///
/// Sorting is stable: tasks created at the same instant keep their input
/// order.
pub fn newest_first<T: Borrow<Task>>(tasks: &mut [T]) {
    tasks.sort_by(|a, b| b.borrow().created_at.cmp(&a.borrow().created_at));
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn task_at(title: &str, millis: i64) -> Task {
        let mut task = Task::new_text(title, "");
        task.created_at = Utc.timestamp_millis_opt(millis).unwrap();
        task
    }

    #[test]
    fn test_newest_first() {
        let a = task_at("a", 100);
        let b = task_at("b", 300);
        let c = task_at("c", 200);

        let mut tasks = vec![&a, &b, &c];
        newest_first(&mut tasks);

        let titles: Vec<_> = tasks.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["b", "c", "a"]);
    }

    #[test]
    fn test_ties_keep_input_order() {
        let first = task_at("first", 100);
        let second = task_at("second", 100);
        let newer = task_at("newer", 500);

        let mut tasks = vec![first, second, newer];
        newest_first(&mut tasks);

        let titles: Vec<_> = tasks.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["newer", "first", "second"]);
    }
}
