use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;
use tracing::error;
use utoipa::ToSchema;

use crate::domain::error::DomainError;

/// Любая ошибка обработчика: и некорректное тело, и сбой таблицы отдаются как 500.
#[derive(Debug, Error)]
#[error(transparent)]
pub(crate) struct AppError(#[from] DomainError);

pub(crate) type AppResult<T> = Result<T, AppError>;

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct FailureResponseDto {
    pub(crate) success: bool,
    pub(crate) error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let AppError(err) = self;
        match &err {
            DomainError::ClientInput(message) => error!(%message, "rejected request body"),
            DomainError::Store(source) => error!(error = %source, "store operation failed"),
        }

        let body = FailureResponseDto {
            success: false,
            error: err.to_string(),
        };
        (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
    }
}
