use serde::Deserialize;

/// Form body for creating a task.
#[derive(Debug, Deserialize)]
pub struct AddTaskForm {
    pub title: String,
    pub description: String,
}

/// Form body for editing a task.
#[derive(Debug, Deserialize)]
pub struct EditTaskForm {
    pub title: String,
    pub description: String,
}
