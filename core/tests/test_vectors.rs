//! Verify build/parse methods against JSON test vectors stored in `test-vectors/`.
//!
//! Each vector file describes inputs, expected requests, simulated responses,
//! and expected parse results or errors. Comparing parsed JSON (not raw
//! strings) avoids false negatives from field-ordering differences.

use serde_json::Value;
use task_core::{
    ApiError, HttpMethod, HttpRequest, HttpResponse, NewTask, Task, TaskClient, TaskPatch,
};

const BASE_URL: &str = "http://localhost:30080";

fn client() -> TaskClient {
    TaskClient::new(BASE_URL)
}

fn load(raw: &str) -> Vec<Value> {
    let vectors: Value = serde_json::from_str(raw).unwrap();
    vectors["cases"].as_array().unwrap().clone()
}

/// Parse the method string from test vectors into `HttpMethod`.
fn parse_method(s: &str) -> HttpMethod {
    match s {
        "GET" => HttpMethod::Get,
        "POST" => HttpMethod::Post,
        "PUT" => HttpMethod::Put,
        "DELETE" => HttpMethod::Delete,
        other => panic!("unknown method: {other}"),
    }
}

fn assert_request(name: &str, req: &HttpRequest, expected: &Value) {
    assert_eq!(req.method, parse_method(expected["method"].as_str().unwrap()), "{name}: method");
    assert_eq!(req.path, format!("{BASE_URL}{}", expected["path"].as_str().unwrap()), "{name}: path");

    let expected_headers: Vec<(String, String)> = expected["headers"]
        .as_array()
        .unwrap()
        .iter()
        .map(|h| {
            let arr = h.as_array().unwrap();
            (arr[0].as_str().unwrap().to_string(), arr[1].as_str().unwrap().to_string())
        })
        .collect();
    assert_eq!(req.headers, expected_headers, "{name}: headers");

    match &expected["body"] {
        Value::Null => assert!(req.body.is_none(), "{name}: body should be empty"),
        body => {
            let actual: Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
            assert_eq!(&actual, body, "{name}: body");
        }
    }
}

fn simulated(case: &Value) -> HttpResponse {
    let sim = &case["simulated_response"];
    HttpResponse {
        status: sim["status"].as_u64().unwrap() as u16,
        headers: Vec::new(),
        body: sim["body"].as_str().unwrap().to_string(),
    }
}

fn assert_error(name: &str, err: ApiError, expected: &Value) {
    match expected["kind"].as_str().unwrap() {
        "not_found" => assert_eq!(err, ApiError::NotFound, "{name}"),
        "validation" => assert_eq!(
            err,
            ApiError::Validation(expected["message"].as_str().unwrap().to_string()),
            "{name}"
        ),
        "http" => {
            let status = expected["status"].as_u64().unwrap() as u16;
            assert!(
                matches!(err, ApiError::Http { status: s, .. } if s == status),
                "{name}: got {err:?}"
            );
            assert!(err.is_transport(), "{name}: expected a transport failure");
        }
        other => panic!("unknown error kind: {other}"),
    }
}

fn id_of(case: &Value) -> u64 {
    case["id"].as_u64().unwrap()
}

// ---------------------------------------------------------------------------
// List
// ---------------------------------------------------------------------------

#[test]
fn list_test_vectors() {
    let c = client();
    for case in load(include_str!("../../test-vectors/list.json")) {
        let name = case["name"].as_str().unwrap();
        assert_request(name, &c.build_list_tasks(), &case["expected_request"]);

        let result = c.parse_list_tasks(simulated(&case));
        match case.get("expected_error") {
            Some(expected) => assert_error(name, result.unwrap_err(), expected),
            None => {
                let expected: Vec<Task> = serde_json::from_value(case["expected_result"].clone()).unwrap();
                assert_eq!(result.unwrap(), expected, "{name}: parsed result");
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Create
// ---------------------------------------------------------------------------

#[test]
fn create_test_vectors() {
    let c = client();
    for case in load(include_str!("../../test-vectors/create.json")) {
        let name = case["name"].as_str().unwrap();
        let input: NewTask = serde_json::from_value(case["input"].clone()).unwrap();
        let req = c.build_create_task(&input).unwrap();
        assert_request(name, &req, &case["expected_request"]);

        let result = c.parse_create_task(simulated(&case));
        match case.get("expected_error") {
            Some(expected) => assert_error(name, result.unwrap_err(), expected),
            None => {
                let expected: Task = serde_json::from_value(case["expected_result"].clone()).unwrap();
                assert_eq!(result.unwrap(), expected, "{name}: parsed result");
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Update
// ---------------------------------------------------------------------------

#[test]
fn update_test_vectors() {
    let c = client();
    for case in load(include_str!("../../test-vectors/update.json")) {
        let name = case["name"].as_str().unwrap();
        let input: TaskPatch = serde_json::from_value(case["input"].clone()).unwrap();
        let req = c.build_update_task(id_of(&case), &input).unwrap();
        assert_request(name, &req, &case["expected_request"]);

        let result = c.parse_update_task(simulated(&case));
        match case.get("expected_error") {
            Some(expected) => assert_error(name, result.unwrap_err(), expected),
            None => {
                let expected: Task = serde_json::from_value(case["expected_result"].clone()).unwrap();
                assert_eq!(result.unwrap(), expected, "{name}: parsed result");
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Delete
// ---------------------------------------------------------------------------

#[test]
fn delete_test_vectors() {
    let c = client();
    for case in load(include_str!("../../test-vectors/delete.json")) {
        let name = case["name"].as_str().unwrap();
        assert_request(name, &c.build_delete_task(id_of(&case)), &case["expected_request"]);

        let result = c.parse_delete_task(simulated(&case));
        match case.get("expected_error") {
            Some(expected) => assert_error(name, result.unwrap_err(), expected),
            None => assert!(result.is_ok(), "{name}: expected success"),
        }
    }
}
