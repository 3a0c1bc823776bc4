//! Task collection client for the Tareini backend.
//!
//! Every request carries the session token as a bearer credential. The
//! client never caches: callers refetch after each mutation and replace
//! their view state with whatever the backend returns.

use reqwest::Client;
use tracing::debug;

use crate::error::ApiError;
use crate::types::{NewTask, Task};
use crate::ApiResult;

pub struct TaskClient {
    client: Client,
    base_url: String,
    token: String,
}

impl TaskClient {
    pub fn new(base_url: String, token: String) -> Self {
        Self {
            client: Client::new(),
            base_url,
            token,
        }
    }

    /// `GET /api/task`. A response body without the `tasks` field means the
    /// backend does not recognize the session.
    pub async fn list(&self) -> ApiResult<Vec<Task>> {
        let response = self
            .client
            .get(format!("{}/api/task", self.base_url))
            .bearer_auth(&self.token)
            .send()
            .await?;

        // The backend signals a dead session by the shape of the body, not
        // the status code, so probe for the collection field first.
        let body: serde_json::Value = response.json().await?;
        match body.get("tasks") {
            Some(tasks) => {
                let tasks: Vec<Task> =
                    serde_json::from_value(tasks.clone()).map_err(|err| {
                        debug!(%err, "task collection failed to decode");
                        ApiError::Unauthenticated
                    })?;
                Ok(tasks)
            }
            None => Err(ApiError::Unauthenticated),
        }
    }

    /// `POST /api/task` with the partial task. Any non-success response
    /// sends the user back through login.
    pub async fn create(&self, task: &NewTask) -> ApiResult<()> {
        let response = self
            .client
            .post(format!("{}/api/task", self.base_url))
            .bearer_auth(&self.token)
            .json(task)
            .send()
            .await?;

        if response.status().is_success() {
            Ok(())
        } else {
            debug!(status = %response.status(), "task creation rejected");
            Err(ApiError::Unauthenticated)
        }
    }

    /// `PUT /api/task/{id}` with the full record. The response status is
    /// not inspected; callers refetch afterwards regardless.
    pub async fn update(&self, task: &Task) -> ApiResult<()> {
        self.client
            .put(format!("{}/api/task/{}", self.base_url, task.id))
            .bearer_auth(&self.token)
            .json(task)
            .send()
            .await?;
        Ok(())
    }

    /// `DELETE /api/task/{id}`. Callers refetch on success only; a failed
    /// delete leaves the list as it was.
    pub async fn delete(&self, id: &str) -> ApiResult<()> {
        self.client
            .delete(format!("{}/api/task/{}", self.base_url, id))
            .bearer_auth(&self.token)
            .send()
            .await?;
        Ok(())
    }
}
