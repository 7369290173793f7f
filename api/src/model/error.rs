use askama::Template;
use axum::response::{IntoResponse, Response};
use shared::error::AppError;

#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorTemplate;

// ページ系 handler の失敗はすべてこの 1 種類のエラービューに畳み込む。
// 原因はここでログに残し、利用者には種別を見せない。
pub struct ErrorPage;

impl From<AppError> for ErrorPage {
    fn from(e: AppError) -> Self {
        tracing::error!(
            error.cause_chain = ?e,
            error.message = %e,
            "failed to handle request"
        );
        Self
    }
}

impl IntoResponse for ErrorPage {
    fn into_response(self) -> Response {
        ErrorTemplate.into_response()
    }
}
