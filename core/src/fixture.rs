//! In-memory placeholder backing store.
//!
//! Stands in for the REST resource when no server is available. It behaves
//! like one: ids are assigned here, unknown ids are `NotFound`, and every
//! call can be delayed to simulate a network round trip.

use std::time::Duration;

use tokio::sync::RwLock;

use crate::api::TaskApi;
use crate::error::ApiError;
use crate::types::{NewTask, Task, TaskPatch};

/// Latency applied by `FixtureTasks::sample()`.
pub const DEFAULT_LATENCY: Duration = Duration::from_millis(500);

/// The three rows shown when the view first loads against the fixture.
pub fn sample_tasks() -> Vec<Task> {
    let row = |id: u64, title: &str, description: &str, status: &str| Task {
        id,
        title: title.to_string(),
        description: description.to_string(),
        status: status.to_string(),
    };
    vec![
        row(1, "task 1", "backend", "completed"),
        row(2, "task 2", "frontend", "in-progress"),
        row(3, "task 3", "CI/CD", "pending"),
    ]
}

#[derive(Debug)]
pub struct FixtureTasks {
    tasks: RwLock<Vec<Task>>,
    latency: Duration,
}

impl FixtureTasks {
    pub fn new(tasks: Vec<Task>, latency: Duration) -> Self {
        Self {
            tasks: RwLock::new(tasks),
            latency,
        }
    }

    /// The sample rows with the default artificial latency.
    pub fn sample() -> Self {
        Self::new(sample_tasks(), DEFAULT_LATENCY)
    }

    pub fn empty() -> Self {
        Self::new(Vec::new(), Duration::ZERO)
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    async fn simulate_round_trip(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }
}

impl TaskApi for FixtureTasks {
    async fn list(&self) -> Result<Vec<Task>, ApiError> {
        self.simulate_round_trip().await;
        Ok(self.tasks.read().await.clone())
    }

    async fn create(&self, input: NewTask) -> Result<Task, ApiError> {
        self.simulate_round_trip().await;
        let mut tasks = self.tasks.write().await;
        let id = tasks.iter().map(|t| t.id).max().unwrap_or(0) + 1;
        let task = input.into_task(id);
        tasks.push(task.clone());
        tracing::info!(id, "fixture task created");
        Ok(task)
    }

    async fn update(&self, id: u64, patch: TaskPatch) -> Result<Task, ApiError> {
        self.simulate_round_trip().await;
        let mut tasks = self.tasks.write().await;
        let task = tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(ApiError::NotFound)?;
        task.apply(&patch);
        Ok(task.clone())
    }

    async fn delete(&self, id: u64) -> Result<(), ApiError> {
        self.simulate_round_trip().await;
        let mut tasks = self.tasks.write().await;
        let before = tasks.len();
        tasks.retain(|t| t.id != id);
        if tasks.len() == before {
            return Err(ApiError::NotFound);
        }
        Ok(())
    }

    fn is_placeholder(&self) -> bool {
        true
    }
}
