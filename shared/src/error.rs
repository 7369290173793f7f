use axum::{http::StatusCode, response::IntoResponse};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    EntityNotFound(String),
    #[error("外部カタログに該当する書籍が見つかりませんでした: {0}")]
    MetadataNotFound(String),
    #[error("{0}")]
    ValidationError(#[from] garde::Report),
    // sqlx::Errorを引数にするヴァリアントが複数あるので、[from]は使えず、[source]で代用している
    #[error("トランザクションを実行できませんでした。")]
    TransactionError(#[source] sqlx::Error),
    #[error("データベース処理実行中にエラーが発生しました。")]
    SpecificOperationError(#[source] sqlx::Error),
    #[error("No rows affected: {0}")]
    NoRowsAffectedError(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let status_code = match &self {
            AppError::EntityNotFound(_) | AppError::MetadataNotFound(_) => StatusCode::NOT_FOUND,
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            e @ (AppError::TransactionError(_)
            | AppError::SpecificOperationError(_)
            | AppError::NoRowsAffectedError(_)) => {
                tracing::error!(
                    error.cause_chain = ?e,
                    error.message = %e,
                    "Unexpected error happened"
                );
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        // 削除操作はスクリプトから呼ばれるため、ステータスに加えてメッセージ本文も返す
        (status_code, self.to_string()).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
