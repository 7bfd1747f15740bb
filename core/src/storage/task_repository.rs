use crate::models::Task;
use crate::storage::{KeyValueStore, TASKS};
use crate::{Error, Result};
use log::debug;

pub struct TaskRepository;

impl TaskRepository {
    /// Add a task. Blank text (after trimming) is rejected.
    pub fn add(store: &impl KeyValueStore, text: &str) -> Result<Task> {
        let text = text.trim();
        if text.is_empty() {
            return Err(Error::Validation("Task text cannot be empty".to_string()));
        }

        let task = Task::new(text.to_string());
        store.write_one(TASKS, &task.id, &serde_json::to_value(&task)?)?;
        debug!("added task {}", task.id);
        Ok(task)
    }

    /// Get all tasks as a snapshot, in stored order
    pub fn get_all(store: &impl KeyValueStore) -> Result<Vec<Task>> {
        store
            .read_all(TASKS)?
            .into_iter()
            .map(|value| serde_json::from_value(value).map_err(Into::into))
            .collect()
    }

    /// Flip a task's completed flag and move it to the end of the
    /// list. Toggling sinks the task in both directions; incomplete
    /// tasks keep their relative order. No-op if the id is absent.
    pub fn toggle(store: &impl KeyValueStore, id: &str) -> Result<()> {
        let mut tasks = Self::get_all(store)?;
        let Some(index) = tasks.iter().position(|task| task.id == id) else {
            return Ok(());
        };

        let mut task = tasks.remove(index);
        task.completed = !task.completed;
        tasks.push(task);

        Self::persist_all(store, &tasks)
    }

    /// Delete a task. Deleting an absent id is a no-op.
    pub fn delete(store: &impl KeyValueStore, id: &str) -> Result<()> {
        if store.delete_one(TASKS, id)? {
            debug!("deleted task {}", id);
        }
        Ok(())
    }

    fn persist_all(store: &impl KeyValueStore, tasks: &[Task]) -> Result<()> {
        let records = tasks
            .iter()
            .map(|task| Ok((task.id.clone(), serde_json::to_value(task)?)))
            .collect::<Result<Vec<_>>>()?;
        store.replace_all(TASKS, &records)
    }
}
