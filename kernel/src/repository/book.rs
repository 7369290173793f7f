use async_trait::async_trait;
use shared::error::AppResult;

use crate::model::{
    book::{
        event::{CreateBook, DeleteBook, UpdateBook},
        Book,
    },
    id::BookId,
};

#[mockall::automock]
#[async_trait]
pub trait BookRepository: Send + Sync {
    // 登録順（id 昇順）で全件取得する
    async fn find_all(&self) -> AppResult<Vec<Book>>;
    async fn find_by_id(&self, book_id: BookId) -> AppResult<Option<Book>>;
    // 書籍行の挿入と著者リンク行の作成を同一トランザクションで行う
    async fn create(&self, event: CreateBook) -> AppResult<BookId>;
    // 可変 4 フィールドのみ上書きする。cover_id と著者リンクは対象外
    async fn update(&self, event: UpdateBook) -> AppResult<()>;
    // リンク行を先に削除してから書籍行を削除する。著者行は残す
    async fn delete(&self, event: DeleteBook) -> AppResult<()>;
}
