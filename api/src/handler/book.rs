use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Redirect,
    Form,
};
use garde::Validate;
use kernel::model::id::BookId;
use registry::AppRegistry;
use shared::error::{AppError, AppResult};

use crate::model::{
    book::{
        AboutTemplate, BookDetailTemplate, BookListTemplate, CreateBookRequest, EditBookTemplate,
        NewReviewTemplate, UpdateBookRequest, UpdateBookRequestWithId,
    },
    error::ErrorPage,
};

pub async fn show_book_list(
    State(registry): State<AppRegistry>,
) -> Result<BookListTemplate, ErrorPage> {
    let views = registry.catalog_service().find_all_views().await?;
    Ok(BookListTemplate::from(views))
}

// パス末尾の :title は表示用の飾りで、検索には使わない
pub async fn show_book_detail(
    State(registry): State<AppRegistry>,
    Path((book_id, _title)): Path<(BookId, String)>,
) -> Result<BookDetailTemplate, ErrorPage> {
    let view = registry.catalog_service().find_view_by_id(book_id).await?;
    Ok(BookDetailTemplate::from(view))
}

pub async fn show_new_review_form() -> NewReviewTemplate {
    NewReviewTemplate
}

pub async fn register_book(
    State(registry): State<AppRegistry>,
    Form(req): Form<CreateBookRequest>,
) -> Result<Redirect, ErrorPage> {
    req.validate(&()).map_err(AppError::from)?;
    registry
        .catalog_service()
        .register_review(req.into())
        .await?;
    Ok(Redirect::to("/"))
}

// 編集フォームには集約前の素の行を流す
pub async fn show_edit_form(
    State(registry): State<AppRegistry>,
    Path((book_id, _title)): Path<(BookId, String)>,
) -> Result<EditBookTemplate, ErrorPage> {
    let book = registry
        .book_repository()
        .find_by_id(book_id)
        .await?
        .ok_or_else(|| AppError::EntityNotFound(format!("book_id: {book_id}")))?;
    Ok(EditBookTemplate::from(book))
}

pub async fn update_book(
    State(registry): State<AppRegistry>,
    Path((book_id, _title)): Path<(BookId, String)>,
    Form(req): Form<UpdateBookRequest>,
) -> Result<Redirect, ErrorPage> {
    req.validate(&()).map_err(AppError::from)?;
    // リダイレクト先には送信されたタイトルをそのまま使う。
    // ルーティング上タイトルは飾りなので、改名されていても実害はない
    let redirect = format!("/{}/{}", book_id, urlencoding::encode(&req.book_title));
    registry
        .catalog_service()
        .update_book(UpdateBookRequestWithId::new(book_id, req).into())
        .await?;
    Ok(Redirect::to(&redirect))
}

// 削除だけはスクリプトから呼ばれるため、エラービューではなく
// ステータスコードとメッセージで失敗を返す
pub async fn delete_book(
    State(registry): State<AppRegistry>,
    Path(book_id): Path<BookId>,
) -> AppResult<StatusCode> {
    registry.catalog_service().delete_book(book_id).await?;
    Ok(StatusCode::OK)
}

pub async fn show_about() -> AboutTemplate {
    AboutTemplate
}
