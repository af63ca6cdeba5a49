//! The seam between the task view and whatever backs it.
//!
//! `TaskView` only talks to a `TaskApi`, so the network client, the in-memory
//! placeholder store and test fakes are interchangeable.

use crate::client::TaskClient;
use crate::error::ApiError;
use crate::transport::ReqwestTransport;
use crate::types::{NewTask, Task, TaskPatch};

/// The four CRUD operations against a task collection.
#[allow(async_fn_in_trait)]
pub trait TaskApi {
    /// All tasks currently known to the backing store, in store order.
    async fn list(&self) -> Result<Vec<Task>, ApiError>;

    /// Create a task. The returned record carries the store-assigned `id`.
    async fn create(&self, input: NewTask) -> Result<Task, ApiError>;

    /// Apply the fields present in `patch` to task `id`.
    async fn update(&self, id: u64, patch: TaskPatch) -> Result<Task, ApiError>;

    async fn delete(&self, id: u64) -> Result<(), ApiError>;

    /// True when writes land in a local stand-in rather than a real backend.
    fn is_placeholder(&self) -> bool {
        false
    }
}

/// `TaskApi` over HTTP: `TaskClient` builds and parses, reqwest executes.
#[derive(Debug, Clone)]
pub struct RemoteTasks {
    client: TaskClient,
    transport: ReqwestTransport,
}

impl RemoteTasks {
    pub fn new(base_url: &str) -> Self {
        Self::with_transport(TaskClient::new(base_url), ReqwestTransport::new())
    }

    pub fn with_transport(client: TaskClient, transport: ReqwestTransport) -> Self {
        Self { client, transport }
    }

    pub fn client(&self) -> &TaskClient {
        &self.client
    }

    /// Fetch a single task by id.
    pub async fn get(&self, id: u64) -> Result<Task, ApiError> {
        let req = self.client.build_get_task(id);
        let response = self.transport.execute(req).await?;
        self.client.parse_get_task(response)
    }
}

impl TaskApi for RemoteTasks {
    async fn list(&self) -> Result<Vec<Task>, ApiError> {
        let req = self.client.build_list_tasks();
        let response = self.transport.execute(req).await?;
        self.client.parse_list_tasks(response)
    }

    async fn create(&self, input: NewTask) -> Result<Task, ApiError> {
        let req = self.client.build_create_task(&input)?;
        let response = self.transport.execute(req).await?;
        self.client.parse_create_task(response)
    }

    async fn update(&self, id: u64, patch: TaskPatch) -> Result<Task, ApiError> {
        let req = self.client.build_update_task(id, &patch)?;
        let response = self.transport.execute(req).await?;
        self.client.parse_update_task(response)
    }

    async fn delete(&self, id: u64) -> Result<(), ApiError> {
        let req = self.client.build_delete_task(id);
        let response = self.transport.execute(req).await?;
        self.client.parse_delete_task(response)
    }
}
