use async_trait::async_trait;
use shared::error::AppResult;

use crate::model::{
    author::{event::CreateAuthor, Author},
    id::{AuthorId, BookId},
};

#[mockall::automock]
#[async_trait]
pub trait AuthorRepository: Send + Sync {
    // name の完全一致で既存行の id を返し、なければ挿入する。既存行は書き換えない
    async fn find_or_create(&self, event: CreateAuthor) -> AppResult<AuthorId>;
    // 書籍にリンクされた著者をリンク行の挿入順で返す
    async fn find_by_book_id(&self, book_id: BookId) -> AppResult<Vec<Author>>;
}
