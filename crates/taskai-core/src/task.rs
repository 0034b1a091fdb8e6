use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Task {
    pub id: Uuid,
    pub title: String,
    pub completed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl Task {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            completed: false,
            category: None,
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }
}

pub fn prepend(tasks: &[Task], task: Task) -> Vec<Task> {
    prepend_all(tasks, vec![task])
}

/// Puts `batch` in front of the existing tasks, keeping the batch order.
pub fn prepend_all(tasks: &[Task], batch: Vec<Task>) -> Vec<Task> {
    let mut next = batch;
    next.extend_from_slice(tasks);
    next
}

pub fn toggle(tasks: &[Task], id: Uuid) -> Vec<Task> {
    tasks
        .iter()
        .map(|task| {
            if task.id == id {
                Task {
                    completed: !task.completed,
                    ..task.clone()
                }
            } else {
                task.clone()
            }
        })
        .collect()
}

pub fn remove(tasks: &[Task], id: Uuid) -> Vec<Task> {
    tasks.iter().filter(|task| task.id != id).cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_twice_restores_the_task() {
        let tasks = vec![Task::new("water plants"), Task::new("stretch")];
        let id = tasks[1].id;

        let once = toggle(&tasks, id);
        assert!(once[1].completed);
        assert!(!once[0].completed);

        let twice = toggle(&once, id);
        assert_eq!(twice, tasks);
    }

    #[test]
    fn prepend_all_keeps_batch_order_in_front() {
        let existing = vec![Task::new("old")];
        let batch = vec![Task::new("first"), Task::new("second")];

        let tasks = prepend_all(&existing, batch);

        let titles = tasks
            .iter()
            .map(|task| task.title.as_str())
            .collect::<Vec<_>>();
        assert_eq!(titles, vec!["first", "second", "old"]);
    }

    #[test]
    fn remove_filters_by_id() {
        let tasks = prepend(&[Task::new("keep")], Task::new("drop"));
        let remaining = remove(&tasks, tasks[0].id);
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].title, "keep");
    }
}
