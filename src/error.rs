//! Error types for the store, the HTTP surface and the HTTP client.
//! Application edges (main, run, config) use `anyhow` on top of these.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

use crate::wire::ErrorBody;

#[derive(Error, Debug)]
pub(crate) enum StoreError {
    #[error("database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("malformed stored value: {0}")]
    Json(#[from] serde_json::Error),

    #[error("store lock poisoned")]
    Poisoned,
}

pub(crate) type StoreResult<T> = Result<T, StoreError>;

/// The REST operation a failure belongs to. Its `Display` is the generic
/// message sent back to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Operation {
    FetchExpenses,
    AddExpense,
    DeleteExpense,
    FetchSalary,
    UpdateSalary,
    FetchSavings,
    UpdateSavings,
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let msg = match self {
            Self::FetchExpenses => "Failed to fetch expenses",
            Self::AddExpense => "Failed to add expense",
            Self::DeleteExpense => "Failed to delete expense",
            Self::FetchSalary => "Failed to fetch salary",
            Self::UpdateSalary => "Failed to update salary",
            Self::FetchSavings => "Failed to fetch savings",
            Self::UpdateSavings => "Failed to update savings",
        };
        f.write_str(msg)
    }
}

#[derive(Error, Debug)]
pub(crate) enum ApiError {
    #[error("{op}: {source}")]
    Store {
        op: Operation,
        #[source]
        source: StoreError,
    },

    #[error("{op}: invalid request body: {detail}")]
    Body { op: Operation, detail: String },

    #[error("{op}: blocking task failed: {detail}")]
    Task { op: Operation, detail: String },

    #[error("Not found")]
    NotFound,
}

impl ApiError {
    fn public_message(&self) -> String {
        match self {
            Self::Store { op, .. } | Self::Body { op, .. } | Self::Task { op, .. } => op.to_string(),
            Self::NotFound => "Not found".to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self {
            Self::NotFound => StatusCode::NOT_FOUND,
            _ => {
                tracing::error!(error = %self, "request failed");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        let body = ErrorBody {
            success: false,
            error: self.public_message(),
        };
        (status, Json(body)).into_response()
    }
}

#[derive(Error, Debug)]
pub(crate) enum ClientError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("server rejected the request: {0}")]
    Rejected(String),
}

impl ClientError {
    /// True when the server could not be reached or answered with something
    /// unreadable. These are the failures the UI replaces with local data.
    pub(crate) fn is_network_failure(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::Decode(_))
    }
}
