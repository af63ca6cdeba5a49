//! The create/edit form buffer and its required-field rule.

use std::fmt;

use crate::types::{NewTask, Task};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Title,
    Description,
    Status,
}

impl Field {
    /// Form order, used for focus cycling and error ordering.
    pub const ALL: [Field; 3] = [Field::Title, Field::Description, Field::Status];

    pub fn label(self) -> &'static str {
        match self {
            Field::Title => "Title",
            Field::Description => "Description",
            Field::Status => "Status",
        }
    }

    fn required_message(self) -> &'static str {
        match self {
            Field::Title => "Please enter a title",
            Field::Description => "Please enter a description",
            Field::Status => "Please enter a status",
        }
    }

    pub fn next(self) -> Field {
        match self {
            Field::Title => Field::Description,
            Field::Description => Field::Status,
            Field::Status => Field::Title,
        }
    }

    pub fn prev(self) -> Field {
        match self {
            Field::Title => Field::Status,
            Field::Description => Field::Title,
            Field::Status => Field::Description,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: Field,
    pub message: &'static str,
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskForm {
    pub title: String,
    pub description: String,
    pub status: String,
}

impl TaskForm {
    pub fn value(&self, field: Field) -> &str {
        match field {
            Field::Title => &self.title,
            Field::Description => &self.description,
            Field::Status => &self.status,
        }
    }

    pub fn value_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::Title => &mut self.title,
            Field::Description => &mut self.description,
            Field::Status => &mut self.status,
        }
    }

    /// Every field is required; whitespace-only counts as empty.
    pub fn validate(&self) -> Result<NewTask, Vec<FieldError>> {
        let errors: Vec<FieldError> = Field::ALL
            .into_iter()
            .filter(|field| self.value(*field).trim().is_empty())
            .map(|field| FieldError {
                field,
                message: field.required_message(),
            })
            .collect();
        if !errors.is_empty() {
            return Err(errors);
        }
        Ok(NewTask {
            title: self.title.clone(),
            description: self.description.clone(),
            status: self.status.clone(),
        })
    }
}

impl From<&Task> for TaskForm {
    fn from(task: &Task) -> Self {
        Self {
            title: task.title.clone(),
            description: task.description.clone(),
            status: task.status.clone(),
        }
    }
}
