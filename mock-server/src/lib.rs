use std::{collections::BTreeMap, sync::Arc};

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Task {
    pub id: u64,
    pub title: String,
    pub description: String,
    pub status: String,
}

#[derive(Deserialize)]
pub struct CreateTask {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub status: String,
}

#[derive(Deserialize)]
pub struct UpdateTask {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
}

#[derive(Debug, Default)]
pub struct Store {
    tasks: BTreeMap<u64, Task>,
    next_id: u64,
}

impl Store {
    pub fn with_tasks(tasks: impl IntoIterator<Item = Task>) -> Self {
        let tasks: BTreeMap<u64, Task> = tasks.into_iter().map(|t| (t.id, t)).collect();
        let next_id = tasks.keys().next_back().copied().unwrap_or(0) + 1;
        Self { tasks, next_id }
    }

    fn allocate_id(&mut self) -> u64 {
        let id = self.next_id.max(1);
        self.next_id = id + 1;
        id
    }
}

pub type Db = Arc<RwLock<Store>>;

type ApiResult<T> = Result<T, (StatusCode, String)>;

/// The rows served when the server is started with `SEED_SAMPLE` set.
pub fn sample_tasks() -> Vec<Task> {
    [
        (1, "task 1", "backend", "completed"),
        (2, "task 2", "frontend", "in-progress"),
        (3, "task 3", "CI/CD", "pending"),
    ]
    .into_iter()
    .map(|(id, title, description, status)| Task {
        id,
        title: title.to_string(),
        description: description.to_string(),
        status: status.to_string(),
    })
    .collect()
}

pub fn app() -> Router {
    app_with(Store::default())
}

pub fn app_with(store: Store) -> Router {
    let db: Db = Arc::new(RwLock::new(store));
    Router::new()
        .route("/tasks", get(list_tasks).post(create_task))
        .route("/tasks/", get(list_tasks).post(create_task))
        .route("/tasks/{id}", get(get_task).put(update_task).delete(delete_task))
        .with_state(db)
}

pub async fn run(listener: TcpListener, store: Store) -> Result<(), std::io::Error> {
    axum::serve(listener, app_with(store)).await
}

async fn list_tasks(State(db): State<Db>) -> Json<Vec<Task>> {
    let store = db.read().await;
    Json(store.tasks.values().cloned().collect())
}

async fn create_task(
    State(db): State<Db>,
    Json(input): Json<CreateTask>,
) -> ApiResult<(StatusCode, Json<Task>)> {
    require("title", &input.title)?;
    require("description", &input.description)?;
    let status = if input.status.trim().is_empty() {
        "pending".to_string()
    } else {
        input.status
    };

    let mut store = db.write().await;
    let task = Task {
        id: store.allocate_id(),
        title: input.title,
        description: input.description,
        status,
    };
    store.tasks.insert(task.id, task.clone());
    tracing::info!(id = task.id, "task created");
    Ok((StatusCode::CREATED, Json(task)))
}

async fn get_task(State(db): State<Db>, Path(id): Path<u64>) -> Result<Json<Task>, StatusCode> {
    let store = db.read().await;
    store.tasks.get(&id).cloned().map(Json).ok_or(StatusCode::NOT_FOUND)
}

async fn update_task(
    State(db): State<Db>,
    Path(id): Path<u64>,
    Json(input): Json<UpdateTask>,
) -> ApiResult<Json<Task>> {
    for (field, value) in [
        ("title", &input.title),
        ("description", &input.description),
        ("status", &input.status),
    ] {
        if let Some(value) = value {
            require(field, value)?;
        }
    }

    let mut store = db.write().await;
    let task = store
        .tasks
        .get_mut(&id)
        .ok_or((StatusCode::NOT_FOUND, format!("task {id} not found")))?;
    if let Some(title) = input.title {
        task.title = title;
    }
    if let Some(description) = input.description {
        task.description = description;
    }
    if let Some(status) = input.status {
        task.status = status;
    }
    tracing::info!(id, "task updated");
    Ok(Json(task.clone()))
}

async fn delete_task(State(db): State<Db>, Path(id): Path<u64>) -> Result<StatusCode, StatusCode> {
    let mut store = db.write().await;
    store
        .tasks
        .remove(&id)
        .map(|_| {
            tracing::info!(id, "task deleted");
            StatusCode::NO_CONTENT
        })
        .ok_or(StatusCode::NOT_FOUND)
}

fn require(field: &str, value: &str) -> ApiResult<()> {
    if value.trim().is_empty() {
        return Err((
            StatusCode::UNPROCESSABLE_ENTITY,
            format!("{field} must not be empty"),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn task_serializes_to_json() {
        let task = Task {
            id: 1,
            title: "Test".to_string(),
            description: "backend".to_string(),
            status: "pending".to_string(),
        };
        let json = serde_json::to_value(&task).unwrap();
        assert_eq!(json["id"], 1);
        assert_eq!(json["title"], "Test");
        assert_eq!(json["description"], "backend");
        assert_eq!(json["status"], "pending");
    }

    #[test]
    fn create_task_allows_missing_status() {
        let input: CreateTask =
            serde_json::from_str(r#"{"title":"t","description":"d"}"#).unwrap();
        assert!(input.status.is_empty());
    }

    #[test]
    fn create_task_rejects_missing_title() {
        let result: Result<CreateTask, _> = serde_json::from_str(r#"{"description":"d"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn update_task_all_fields_optional() {
        let input: UpdateTask = serde_json::from_str(r#"{}"#).unwrap();
        assert!(input.title.is_none());
        assert!(input.description.is_none());
        assert!(input.status.is_none());
    }

    #[test]
    fn seeded_store_continues_after_highest_id() {
        let mut store = Store::with_tasks(sample_tasks());
        assert_eq!(store.allocate_id(), 4);
        assert_eq!(store.allocate_id(), 5);
    }

    #[test]
    fn empty_store_starts_at_one() {
        let mut store = Store::default();
        assert_eq!(store.allocate_id(), 1);
    }
}
