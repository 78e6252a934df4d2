use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::error;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("invalid serving multiplier {0}")]
    InvalidScaleFactor(f64),

    #[error("nutrition value {field} must be a non-negative finite number, got {value}")]
    InvalidNutrition { field: &'static str, value: f64 },

    #[error("retention window must be at least one day, got {0}")]
    InvalidRetention(u32),

    #[error("no meal at index {index} on {date}")]
    IndexOutOfRange { date: String, index: usize },

    #[error("invalid date {0:?}, expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("goal {name} must be a positive finite number, got {value}")]
    InvalidGoal { name: &'static str, value: f64 },

    #[error("invalid menu query: {0}")]
    InvalidQuery(String),

    #[error("storage unavailable: {0:#}")]
    StorageUnavailable(anyhow::Error),

    #[error("stored meal history is corrupt: {0}")]
    CorruptHistory(#[source] serde_json::Error),

    #[error("menu source unreachable: {0:#}")]
    SourceUnreachable(anyhow::Error),

    #[error("menu source returned an unexpected document: {0}")]
    MalformedSource(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::InvalidScaleFactor(_)
            | AppError::InvalidNutrition { .. }
            | AppError::InvalidRetention(_)
            | AppError::InvalidDate(_)
            | AppError::InvalidGoal { .. }
            | AppError::InvalidQuery(_) => StatusCode::BAD_REQUEST,
            AppError::IndexOutOfRange { .. } => StatusCode::NOT_FOUND,
            AppError::StorageUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::CorruptHistory(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::SourceUnreachable(_) | AppError::MalformedSource(_) => {
                StatusCode::BAD_GATEWAY
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(error = %self, %status, "request failed");
        }
        (status, self.to_string()).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_errors_map_to_4xx() {
        assert_eq!(AppError::InvalidScaleFactor(0.0).status(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::InvalidRetention(0).status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            AppError::InvalidNutrition { field: "calories", value: -1.0 }.status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::InvalidDate("2024-13-01".into()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::IndexOutOfRange { date: "2024-01-01".into(), index: 3 }.status(),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn collaborator_failures_map_to_5xx() {
        let storage = AppError::StorageUnavailable(anyhow::anyhow!("disk gone"));
        assert_eq!(storage.status(), StatusCode::SERVICE_UNAVAILABLE);
        assert!(storage.to_string().contains("disk gone"));

        let source = AppError::SourceUnreachable(anyhow::anyhow!("timeout"));
        assert_eq!(source.status(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn index_error_names_date_and_index() {
        let msg = AppError::IndexOutOfRange { date: "2024-05-01".into(), index: 7 }.to_string();
        assert_eq!(msg, "no meal at index 7 on 2024-05-01");
    }
}
