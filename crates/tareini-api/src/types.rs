//! Wire types for the Tareini backend.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A task as the backend returns it.
///
/// The limit date is kept as the opaque ISO string from the wire; it is only
/// interpreted for display and when editing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Server-assigned identifier
    pub id: String,
    pub title: String,
    pub description: String,
    pub status: TaskStatus,
    /// ISO timestamp (`limitDate` on the wire)
    pub limit_date: String,
}

/// Fixed task-status enumeration, serialized with the backend's labels.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum TaskStatus {
    #[serde(rename = "Cancelada")]
    Cancelled,
    #[serde(rename = "Pendiente")]
    Pending,
    #[serde(rename = "En progreso")]
    InProgress,
    #[serde(rename = "Completada")]
    Completed,
}

impl TaskStatus {
    /// All statuses, in selector order.
    pub const ALL: [TaskStatus; 4] = [
        TaskStatus::Cancelled,
        TaskStatus::Pending,
        TaskStatus::InProgress,
        TaskStatus::Completed,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            TaskStatus::Cancelled => "Cancelada",
            TaskStatus::Pending => "Pendiente",
            TaskStatus::InProgress => "En progreso",
            TaskStatus::Completed => "Completada",
        }
    }

    /// Next status in selector order, clamped at the end.
    pub fn next(&self) -> TaskStatus {
        let idx = Self::ALL.iter().position(|s| s == self).unwrap_or(0);
        Self::ALL[(idx + 1).min(Self::ALL.len() - 1)]
    }

    /// Previous status in selector order, clamped at the start.
    pub fn prev(&self) -> TaskStatus {
        let idx = Self::ALL.iter().position(|s| s == self).unwrap_or(0);
        Self::ALL[idx.saturating_sub(1)]
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Creation payload: a partial task. The status defaults server-side.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewTask {
    pub title: String,
    pub description: String,
    /// RFC 3339 timestamp (`limitDate` on the wire)
    pub limit_date: String,
}

/// Login / registration request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Successful authentication response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub token: String,
}

/// Error body the backend sends with rejected requests.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorBody {
    pub message: Option<String>,
}

/// Renders a limit date as day/month/year from local calendar fields,
/// without padding (`17/3/2026`). Unparseable dates render verbatim.
pub fn format_limit_date(limit_date: &str) -> String {
    match DateTime::parse_from_rfc3339(limit_date) {
        Ok(date) => {
            let local = date.with_timezone(&Local);
            use chrono::Datelike;
            format!("{}/{}/{}", local.day(), local.month(), local.year())
        }
        Err(_) => limit_date.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_round_trips_backend_labels() {
        let json = serde_json::to_string(&TaskStatus::InProgress).unwrap();
        assert_eq!(json, "\"En progreso\"");
        let back: TaskStatus = serde_json::from_str("\"Pendiente\"").unwrap();
        assert_eq!(back, TaskStatus::Pending);
    }

    #[test]
    fn status_selector_clamps_at_both_ends() {
        assert_eq!(TaskStatus::Cancelled.prev(), TaskStatus::Cancelled);
        assert_eq!(TaskStatus::Completed.next(), TaskStatus::Completed);
        assert_eq!(TaskStatus::Pending.next(), TaskStatus::InProgress);
    }

    #[test]
    fn task_uses_camel_case_limit_date() {
        let task: Task = serde_json::from_value(serde_json::json!({
            "id": "t1",
            "title": "Buy groceries",
            "description": "Get milk and eggs",
            "status": "Pendiente",
            "limitDate": "2026-09-01T00:00:00.000Z",
        }))
        .unwrap();
        assert_eq!(task.limit_date, "2026-09-01T00:00:00.000Z");
        let json = serde_json::to_value(&task).unwrap();
        assert!(json.get("limitDate").is_some());
    }

    #[test]
    fn unparseable_limit_date_renders_verbatim() {
        assert_eq!(format_limit_date("mañana"), "mañana");
    }
}
