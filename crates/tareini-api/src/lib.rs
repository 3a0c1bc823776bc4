//! Client library for the Tareini task backend.
//!
//! Covers the full backend surface consumed by the terminal app:
//! authentication (`auth`), the per-user task collection (`tasks`), the
//! client-side validation rules applied before anything is sent
//! (`validate`), and the error taxonomy shared by all requests (`error`).
//!
//! The clients take the backend base URL at construction, so tests can point
//! them at a mock server instead of a live backend.

pub mod auth;
pub mod error;
pub mod tasks;
pub mod types;
pub mod validate;

pub use auth::AuthClient;
pub use error::ApiError;
pub use tasks::TaskClient;
pub use types::{Credentials, NewTask, Task, TaskStatus, TokenResponse};

/// Result type for backend operations.
pub type ApiResult<T> = Result<T, ApiError>;
