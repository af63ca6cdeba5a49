use task_core::{ApiError, FixtureTasks, NewTask, RemoteTasks, Task, TaskApi, TaskPatch};

use crate::config::{AppConfig, BackendKind};

/// The `TaskApi` chosen by configuration.
pub enum TaskBackend {
    Remote(RemoteTasks),
    Fixture(FixtureTasks),
}

impl TaskBackend {
    pub fn from_config(config: &AppConfig) -> Self {
        match config.backend {
            BackendKind::Remote => TaskBackend::Remote(RemoteTasks::new(&config.base_url)),
            BackendKind::Fixture => {
                TaskBackend::Fixture(FixtureTasks::sample().with_latency(config.fixture_latency()))
            }
        }
    }

    pub fn label(&self) -> String {
        match self {
            TaskBackend::Remote(api) => api.client().base_url().to_string(),
            TaskBackend::Fixture(_) => "placeholder data".to_string(),
        }
    }
}

impl TaskApi for TaskBackend {
    async fn list(&self) -> Result<Vec<Task>, ApiError> {
        match self {
            TaskBackend::Remote(api) => api.list().await,
            TaskBackend::Fixture(api) => api.list().await,
        }
    }

    async fn create(&self, input: NewTask) -> Result<Task, ApiError> {
        match self {
            TaskBackend::Remote(api) => api.create(input).await,
            TaskBackend::Fixture(api) => api.create(input).await,
        }
    }

    async fn update(&self, id: u64, patch: TaskPatch) -> Result<Task, ApiError> {
        match self {
            TaskBackend::Remote(api) => api.update(id, patch).await,
            TaskBackend::Fixture(api) => api.update(id, patch).await,
        }
    }

    async fn delete(&self, id: u64) -> Result<(), ApiError> {
        match self {
            TaskBackend::Remote(api) => api.delete(id).await,
            TaskBackend::Fixture(api) => api.delete(id).await,
        }
    }

    fn is_placeholder(&self) -> bool {
        match self {
            TaskBackend::Remote(api) => api.is_placeholder(),
            TaskBackend::Fixture(api) => api.is_placeholder(),
        }
    }
}
