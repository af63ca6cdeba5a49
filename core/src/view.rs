//! Headless task view: list state, the create/edit modal, delete
//! confirmation and transient notices.
//!
//! # Design
//! Every operation that reaches the `TaskApi` is split into a synchronous
//! `begin_*` step, which raises the busy flag and returns what to send, and a
//! `finish_*` step, which applies the outcome. The async methods (`mount`,
//! `submit`, `confirm_delete`) simply await the api between the two. A front
//! end can redraw after `begin_*` so `loading`/`submitting` are visible while
//! the request is outstanding.
//!
//! The store is authoritative: ids come back from `create`, and rows are
//! replaced with whatever `update` returns.

use crate::api::TaskApi;
use crate::error::ApiError;
use crate::form::{FieldError, TaskForm};
use crate::table::TaskTable;
use crate::types::{NewTask, Task, TaskPatch};

/// Shown on every submit while the view runs against placeholder data.
pub const PLACEHOLDER_WARNING: &str =
    "Backend API is unavailable; changes are kept in local placeholder data only.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Warning,
    Error,
}

/// A transient notification for the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub text: String,
}

/// The open create/edit modal.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskModal {
    pub form: TaskForm,
    pub errors: Vec<FieldError>,
    editing: Option<Task>,
}

impl TaskModal {
    /// The task being edited, or `None` when creating.
    pub fn editing(&self) -> Option<&Task> {
        self.editing.as_ref()
    }

    pub fn title(&self) -> String {
        match &self.editing {
            Some(task) => format!("Edit Task ID: {}", task.id),
            None => "Create New Task".to_string(),
        }
    }
}

/// What a validated form turns into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    Create(NewTask),
    Update { id: u64, patch: TaskPatch },
}

pub struct TaskView<A> {
    api: A,
    tasks: Vec<Task>,
    loading: bool,
    error: Option<String>,
    modal: Option<TaskModal>,
    submitting: bool,
    pending_delete: Option<u64>,
    notices: Vec<Notice>,
    table: TaskTable,
    mounted: bool,
}

impl<A: TaskApi> TaskView<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            tasks: Vec::new(),
            loading: false,
            error: None,
            modal: None,
            submitting: false,
            pending_delete: None,
            notices: Vec::new(),
            table: TaskTable::default(),
            mounted: true,
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn modal(&self) -> Option<&TaskModal> {
        self.modal.as_ref()
    }

    pub fn form_mut(&mut self) -> Option<&mut TaskForm> {
        self.modal.as_mut().map(|m| &mut m.form)
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// The id awaiting delete confirmation.
    pub fn pending_delete(&self) -> Option<u64> {
        self.pending_delete
    }

    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    pub fn table(&self) -> &TaskTable {
        &self.table
    }

    pub fn table_mut(&mut self) -> &mut TaskTable {
        &mut self.table
    }

    /// Rows on the current table page.
    pub fn visible_rows(&self) -> Vec<&Task> {
        self.table.visible(&self.tasks)
    }

    /// Advance the table one page, stopping at the last page of the
    /// filtered rows.
    pub fn next_page(&mut self) {
        self.table.next_page(&self.tasks);
    }

    pub fn prev_page(&mut self) {
        self.table.prev_page();
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Outcomes arriving after this are dropped.
    pub fn unmount(&mut self) {
        self.mounted = false;
    }

    pub fn dismiss_error(&mut self) {
        self.error = None;
    }

    // --- Loading ---

    /// Initial fetch.
    pub async fn mount(&mut self) {
        self.mounted = true;
        self.reload().await;
    }

    pub async fn reload(&mut self) {
        self.begin_load();
        let result = self.api.list().await;
        self.finish_load(result);
    }

    pub fn begin_load(&mut self) {
        self.loading = true;
        self.error = None;
    }

    pub fn finish_load(&mut self, result: Result<Vec<Task>, ApiError>) {
        if !self.mounted {
            tracing::debug!("dropping list result for unmounted view");
            return;
        }
        self.loading = false;
        match result {
            Ok(tasks) => {
                tracing::debug!(count = tasks.len(), "tasks loaded");
                self.tasks = tasks;
                self.table.clamp_page(&self.tasks);
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to load tasks");
                self.error = Some(format!("Failed to load tasks: {e}"));
                self.notify(NoticeLevel::Error, "Failed to load tasks.");
            }
        }
    }

    // --- Create / edit ---

    /// Open the modal empty for a new task, or pre-filled from `task`.
    pub fn open_modal(&mut self, task: Option<&Task>) {
        let modal = match task {
            Some(task) => TaskModal {
                form: TaskForm::from(task),
                errors: Vec::new(),
                editing: Some(task.clone()),
            },
            None => TaskModal::default(),
        };
        self.modal = Some(modal);
    }

    /// Open the modal for the row with `id`. Returns false if there is none.
    pub fn open_edit(&mut self, id: u64) -> bool {
        let Some(task) = self.tasks.iter().find(|t| t.id == id).cloned() else {
            return false;
        };
        self.open_modal(Some(&task));
        true
    }

    pub fn close_modal(&mut self) {
        self.modal = None;
    }

    /// Validate the open form. On success raise `submitting` and return the
    /// request to send; on failure record the field errors and send nothing.
    pub fn begin_submit(&mut self) -> Result<Submission, ApiError> {
        let Some(modal) = self.modal.as_mut() else {
            return Err(ApiError::Validation("no task form is open".to_string()));
        };
        let input = match modal.form.validate() {
            Ok(input) => input,
            Err(errors) => {
                let message = errors
                    .iter()
                    .map(|e| e.message)
                    .collect::<Vec<_>>()
                    .join(", ");
                modal.errors = errors;
                return Err(ApiError::Validation(message));
            }
        };
        modal.errors.clear();
        let submission = match modal.editing() {
            Some(task) => Submission::Update {
                id: task.id,
                patch: TaskPatch::from(input),
            },
            None => Submission::Create(input),
        };
        self.submitting = true;
        if self.api.is_placeholder() {
            self.notify(NoticeLevel::Warning, PLACEHOLDER_WARNING);
        }
        Ok(submission)
    }

    pub fn finish_submit(&mut self, result: Result<Task, ApiError>) {
        if !self.mounted {
            tracing::debug!("dropping submit result for unmounted view");
            return;
        }
        self.submitting = false;
        let editing = self.modal.as_ref().and_then(|m| m.editing().map(|t| t.id));
        match result {
            Ok(task) => {
                let id = task.id;
                self.upsert(task);
                self.close_modal();
                let text = if editing.is_some() {
                    format!("Task {id} updated successfully")
                } else {
                    format!("Task created successfully with ID {id}")
                };
                tracing::info!(id, "task saved");
                self.notify(NoticeLevel::Success, text);
            }
            Err(e) => {
                tracing::warn!(error = %e, "task submission failed");
                self.notify(NoticeLevel::Error, format!("Operation failed: {e}"));
            }
        }
    }

    /// Send a submission produced by `begin_submit`. Does not touch view state.
    pub async fn send(&self, submission: Submission) -> Result<Task, ApiError> {
        match submission {
            Submission::Create(input) => self.api.create(input).await,
            Submission::Update { id, patch } => self.api.update(id, patch).await,
        }
    }

    pub async fn submit(&mut self) -> Result<Task, ApiError> {
        let submission = self.begin_submit()?;
        let result = self.send(submission).await;
        self.finish_submit(result.clone());
        result
    }

    // --- Delete ---

    /// Ask for confirmation before deleting `id`. Returns false if no row has
    /// that id.
    pub fn request_delete(&mut self, id: u64) -> bool {
        if !self.tasks.iter().any(|t| t.id == id) {
            return false;
        }
        self.pending_delete = Some(id);
        true
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    /// Resolve a pending confirmation as confirmed.
    pub fn begin_delete(&mut self) -> Option<u64> {
        self.pending_delete.take()
    }

    pub fn finish_delete(&mut self, id: u64, result: Result<(), ApiError>) {
        if !self.mounted {
            tracing::debug!(id, "dropping delete result for unmounted view");
            return;
        }
        match result {
            Ok(()) => {
                self.tasks.retain(|t| t.id != id);
                self.table.clamp_page(&self.tasks);
                tracing::info!(id, "task deleted");
                self.notify(NoticeLevel::Success, "Task deleted successfully");
            }
            Err(e) => {
                tracing::warn!(id, error = %e, "task delete failed");
                self.notify(NoticeLevel::Error, format!("Delete failed: {e}"));
            }
        }
    }

    /// Delete the task awaiting confirmation. A no-op when nothing is pending.
    pub async fn confirm_delete(&mut self) -> Result<(), ApiError> {
        let Some(id) = self.begin_delete() else {
            return Ok(());
        };
        let result = self.api.delete(id).await;
        self.finish_delete(id, result.clone());
        result
    }

    fn upsert(&mut self, task: Task) {
        match self.tasks.iter_mut().find(|t| t.id == task.id) {
            Some(existing) => *existing = task,
            None => self.tasks.push(task),
        }
    }

    fn notify(&mut self, level: NoticeLevel, text: impl Into<String>) {
        self.notices.push(Notice {
            level,
            text: text.into(),
        });
    }
}
