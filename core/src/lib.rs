//! Client core for the task manager.
//!
//! # Overview
//! - `TaskClient` builds `HttpRequest` values and parses `HttpResponse`
//!   values without touching the network (host-does-IO pattern);
//!   `ReqwestTransport` performs the round-trip in between.
//! - `TaskApi` is the CRUD seam. `RemoteTasks` implements it over HTTP,
//!   `FixtureTasks` over an in-memory placeholder store.
//! - `TaskView` is the headless view controller: task list, loading and
//!   error state, the create/edit modal, delete confirmation and notices.
//!   `TaskTable` handles sorting, status filters and pagination.
//!
//! DTOs are defined independently from the mock-server crate; integration
//! tests catch schema drift.

pub mod api;
pub mod client;
pub mod error;
pub mod fixture;
pub mod form;
pub mod http;
pub mod table;
pub mod transport;
pub mod types;
pub mod view;

pub use api::{RemoteTasks, TaskApi};
pub use client::TaskClient;
pub use error::ApiError;
pub use fixture::{sample_tasks, FixtureTasks};
pub use form::{Field, FieldError, TaskForm};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use table::{SortOrder, TaskTable, PAGE_SIZE};
pub use transport::ReqwestTransport;
pub use types::{NewTask, Task, TaskPatch, DEFAULT_STATUS, STATUS_FILTERS};
pub use view::{Notice, NoticeLevel, Submission, TaskModal, TaskView, PLACEHOLDER_WARNING};
