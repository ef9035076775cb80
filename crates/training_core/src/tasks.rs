//! Daily training tasks.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainingTask {
    pub id: String,
    pub description: String,
    pub completed: bool,
    /// Reputation points granted on completion.
    pub reward: i64,
    /// Must be completed before the day can advance.
    pub critical: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskList {
    pub tasks: Vec<TrainingTask>,
}

impl Default for TaskList {
    fn default() -> Self {
        Self {
            tasks: vec![TrainingTask {
                id: "day1-01".to_string(),
                description: "Check your email for onboarding instructions.".to_string(),
                completed: false,
                reward: 50,
                critical: true,
            }],
        }
    }
}

impl TaskList {
    pub fn add(&mut self, task: TrainingTask) {
        self.tasks.push(task);
    }

    /// Marks a task complete and returns its reward, or `None` when the id is unknown or the task
    /// was already complete.
    pub fn complete(&mut self, id: &str) -> Option<i64> {
        let task = self
            .tasks
            .iter_mut()
            .find(|task| task.id == id && !task.completed)?;
        task.completed = true;
        Some(task.reward)
    }

    pub fn set_critical(&mut self, id: &str, critical: bool) {
        if let Some(task) = self.tasks.iter_mut().find(|task| task.id == id) {
            task.critical = critical;
        }
    }

    pub fn replace(&mut self, tasks: Vec<TrainingTask>) {
        self.tasks = tasks;
    }

    pub fn critical_tasks_done(&self) -> bool {
        self.tasks
            .iter()
            .filter(|task| task.critical)
            .all(|task| task.completed)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn completing_pays_reward_once() {
        let mut list = TaskList::default();
        assert!(!list.critical_tasks_done());
        assert_eq!(list.complete("day1-01"), Some(50));
        assert_eq!(list.complete("day1-01"), None);
        assert_eq!(list.complete("missing"), None);
        assert!(list.critical_tasks_done());
    }

    #[test]
    fn non_critical_tasks_do_not_gate_the_day() {
        let mut list = TaskList::default();
        list.set_critical("day1-01", false);
        list.add(TrainingTask {
            id: "day1-02".to_string(),
            description: "Read the guardian's tips.".to_string(),
            completed: false,
            reward: 10,
            critical: false,
        });
        assert!(list.critical_tasks_done());
    }
}
