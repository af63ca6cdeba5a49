//! Stateless HTTP request builder and response parser for the task API.
//!
//! # Design
//! `TaskClient` holds only a `base_url` and carries no mutable state between
//! calls. Each CRUD operation is split into a `build_*` method that produces
//! an `HttpRequest` and a `parse_*` method that consumes an `HttpResponse`.
//! The caller executes the actual HTTP round-trip.

use serde::de::DeserializeOwned;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{NewTask, Task, TaskPatch};

/// Synchronous, stateless client for the task API.
#[derive(Debug, Clone)]
pub struct TaskClient {
    base_url: String,
}

impl TaskClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn build_list_tasks(&self) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            path: self.collection_url(),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn build_get_task(&self, id: u64) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            path: self.item_url(id),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn build_create_task(&self, input: &NewTask) -> Result<HttpRequest, ApiError> {
        let body = serde_json::to_string(input).map_err(|e| ApiError::Serialization(e.to_string()))?;
        Ok(HttpRequest {
            method: HttpMethod::Post,
            path: self.collection_url(),
            headers: json_headers(),
            body: Some(body),
        })
    }

    pub fn build_update_task(&self, id: u64, input: &TaskPatch) -> Result<HttpRequest, ApiError> {
        let body = serde_json::to_string(input).map_err(|e| ApiError::Serialization(e.to_string()))?;
        Ok(HttpRequest {
            method: HttpMethod::Put,
            path: self.item_url(id),
            headers: json_headers(),
            body: Some(body),
        })
    }

    pub fn build_delete_task(&self, id: u64) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Delete,
            path: self.item_url(id),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn parse_list_tasks(&self, response: HttpResponse) -> Result<Vec<Task>, ApiError> {
        check_status(&response, LIST)?;
        decode(&response.body)
    }

    pub fn parse_get_task(&self, response: HttpResponse) -> Result<Task, ApiError> {
        check_status(&response, GET)?;
        decode(&response.body)
    }

    pub fn parse_create_task(&self, response: HttpResponse) -> Result<Task, ApiError> {
        check_status(&response, CREATE)?;
        decode(&response.body)
    }

    pub fn parse_update_task(&self, response: HttpResponse) -> Result<Task, ApiError> {
        check_status(&response, UPDATE)?;
        decode(&response.body)
    }

    pub fn parse_delete_task(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response, DELETE)?;
        Ok(())
    }

    fn collection_url(&self) -> String {
        format!("{}/tasks/", self.base_url)
    }

    fn item_url(&self, id: u64) -> String {
        format!("{}/tasks/{id}", self.base_url)
    }
}

fn json_headers() -> Vec<(String, String)> {
    vec![("content-type".to_string(), "application/json".to_string())]
}

fn decode<T: DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    serde_json::from_str(body).map_err(|e| ApiError::Deserialization(e.to_string()))
}

/// Which statuses an operation accepts, and which of the rest carry meaning
/// beyond a failed exchange.
#[derive(Debug, Clone, Copy)]
struct StatusRules {
    accepted: &'static [u16],
    not_found: bool,
    validation: bool,
}

const LIST: StatusRules = StatusRules {
    accepted: &[200],
    not_found: false,
    validation: false,
};

const GET: StatusRules = StatusRules {
    accepted: &[200],
    not_found: true,
    validation: false,
};

const CREATE: StatusRules = StatusRules {
    accepted: &[200, 201],
    not_found: false,
    validation: true,
};

const UPDATE: StatusRules = StatusRules {
    accepted: &[200],
    not_found: true,
    validation: true,
};

const DELETE: StatusRules = StatusRules {
    accepted: &[200, 204],
    not_found: true,
    validation: false,
};

/// Map non-accepted status codes to the `ApiError` variant the operation can
/// report. Anything the rules don't name is an `Http` transport failure.
fn check_status(response: &HttpResponse, rules: StatusRules) -> Result<(), ApiError> {
    if rules.accepted.contains(&response.status) {
        return Ok(());
    }
    match response.status {
        404 if rules.not_found => Err(ApiError::NotFound),
        400 | 422 if rules.validation => Err(ApiError::Validation(response.body.clone())),
        status => Err(ApiError::Http {
            status,
            body: response.body.clone(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> TaskClient {
        TaskClient::new("http://localhost:30080")
    }

    fn response(status: u16, body: &str) -> HttpResponse {
        HttpResponse {
            status,
            headers: Vec::new(),
            body: body.to_string(),
        }
    }

    #[test]
    fn build_list_tasks_produces_correct_request() {
        let req = client().build_list_tasks();
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.path, "http://localhost:30080/tasks/");
        assert!(req.body.is_none());
        assert!(req.headers.is_empty());
    }

    #[test]
    fn build_get_task_produces_correct_request() {
        let req = client().build_get_task(42);
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.path, "http://localhost:30080/tasks/42");
        assert!(req.body.is_none());
    }

    #[test]
    fn build_create_task_produces_correct_request() {
        let input = NewTask {
            title: "task 4".to_string(),
            description: "docs".to_string(),
            status: "pending".to_string(),
        };
        let req = client().build_create_task(&input).unwrap();
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.path, "http://localhost:30080/tasks/");
        assert_eq!(
            req.headers,
            vec![("content-type".to_string(), "application/json".to_string())]
        );
        let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body["title"], "task 4");
        assert_eq!(body["description"], "docs");
        assert_eq!(body["status"], "pending");
        assert!(body.get("id").is_none());
    }

    #[test]
    fn build_update_task_omits_absent_fields() {
        let input = TaskPatch {
            status: Some("completed".to_string()),
            ..TaskPatch::default()
        };
        let req = client().build_update_task(2, &input).unwrap();
        assert_eq!(req.method, HttpMethod::Put);
        assert_eq!(req.path, "http://localhost:30080/tasks/2");
        let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body["status"], "completed");
        assert!(body.get("title").is_none());
        assert!(body.get("description").is_none());
    }

    #[test]
    fn build_delete_task_produces_correct_request() {
        let req = client().build_delete_task(2);
        assert_eq!(req.method, HttpMethod::Delete);
        assert_eq!(req.path, "http://localhost:30080/tasks/2");
        assert!(req.body.is_none());
    }

    #[test]
    fn parse_list_tasks_keeps_server_order() {
        let body = r#"[
            {"id":3,"title":"task 3","description":"CI/CD","status":"pending"},
            {"id":1,"title":"task 1","description":"backend","status":"completed"}
        ]"#;
        let tasks = client().parse_list_tasks(response(200, body)).unwrap();
        let ids: Vec<u64> = tasks.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![3, 1]);
    }

    #[test]
    fn parse_get_task_not_found() {
        let err = client().parse_get_task(response(404, "")).unwrap_err();
        assert!(matches!(err, ApiError::NotFound));
    }

    #[test]
    fn parse_create_task_accepts_200_and_201() {
        let body = r#"{"id":4,"title":"task 4","description":"docs","status":"pending"}"#;
        for status in [200, 201] {
            let task = client().parse_create_task(response(status, body)).unwrap();
            assert_eq!(task.id, 4);
        }
    }

    #[test]
    fn parse_create_task_server_validation() {
        let err = client()
            .parse_create_task(response(422, "title must not be empty"))
            .unwrap_err();
        assert_eq!(err, ApiError::Validation("title must not be empty".to_string()));
    }

    #[test]
    fn parse_create_task_wrong_status() {
        let err = client()
            .parse_create_task(response(500, "internal error"))
            .unwrap_err();
        assert!(matches!(err, ApiError::Http { status: 500, .. }));
        assert!(err.is_transport());
    }

    #[test]
    fn parse_update_task_not_found() {
        let err = client().parse_update_task(response(404, "")).unwrap_err();
        assert!(matches!(err, ApiError::NotFound));
    }

    #[test]
    fn parse_delete_task_accepts_200_and_204() {
        assert!(client().parse_delete_task(response(204, "")).is_ok());
        assert!(client().parse_delete_task(response(200, "")).is_ok());
    }

    #[test]
    fn parse_delete_task_not_found() {
        let err = client().parse_delete_task(response(404, "")).unwrap_err();
        assert!(matches!(err, ApiError::NotFound));
    }

    #[test]
    fn parse_list_tasks_any_failure_is_transport() {
        for status in [400, 404, 422, 500] {
            let err = client().parse_list_tasks(response(status, "nope")).unwrap_err();
            assert_eq!(
                err,
                ApiError::Http {
                    status,
                    body: "nope".to_string()
                }
            );
            assert!(err.is_transport(), "list {status} gave {err:?}");
        }
    }

    #[test]
    fn parse_delete_task_rejected_is_transport() {
        for status in [400, 422] {
            let err = client().parse_delete_task(response(status, "bad id")).unwrap_err();
            assert!(matches!(err, ApiError::Http { status: s, .. } if s == status));
            assert!(err.is_transport());
        }
    }

    #[test]
    fn parse_update_task_server_validation() {
        let err = client()
            .parse_update_task(response(422, "status must not be empty"))
            .unwrap_err();
        assert_eq!(err, ApiError::Validation("status must not be empty".to_string()));
    }

    #[test]
    fn parse_create_task_404_is_transport() {
        let err = client().parse_create_task(response(404, "")).unwrap_err();
        assert!(matches!(err, ApiError::Http { status: 404, .. }));
        assert!(err.is_transport());
    }

    #[test]
    fn trailing_slash_is_stripped() {
        let client = TaskClient::new("http://localhost:30080/");
        let req = client.build_list_tasks();
        assert_eq!(req.path, "http://localhost:30080/tasks/");
    }

    #[test]
    fn parse_list_tasks_bad_json() {
        let err = client().parse_list_tasks(response(200, "not json")).unwrap_err();
        assert!(matches!(err, ApiError::Deserialization(_)));
    }
}
