use async_trait::async_trait;
use derive_new::new;
use kernel::{
    model::{
        author::{event::CreateAuthor, Author},
        id::{AuthorId, BookId},
    },
    repository::author::AuthorRepository,
};
use shared::error::{AppError, AppResult};

use crate::database::{model::author::AuthorRow, ConnectionPool};

#[derive(new)]
pub struct AuthorRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl AuthorRepository for AuthorRepositoryImpl {
    // name の一意制約を衝突時の参照に使い、検索と挿入を単一のストア操作にまとめる。
    // 既存行の api_id は書き換えない
    async fn find_or_create(&self, event: CreateAuthor) -> AppResult<AuthorId> {
        let author_id: i64 = sqlx::query_scalar(
            "INSERT INTO authors (name, api_id) \
             VALUES ($1, $2) \
             ON CONFLICT (name) DO UPDATE SET name = EXCLUDED.name \
             RETURNING id",
        )
        .bind(&event.name)
        .bind(&event.api_id)
        .fetch_one(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        Ok(AuthorId::new(author_id))
    }

    // リンク行の id 昇順＝リンクの挿入順で返す
    async fn find_by_book_id(&self, book_id: BookId) -> AppResult<Vec<Author>> {
        let rows: Vec<AuthorRow> = sqlx::query_as(
            "SELECT a.id, a.name, a.api_id \
             FROM authors AS a \
             INNER JOIN authorbooks AS ab ON a.id = ab.author_id \
             WHERE ab.book_id = $1 \
             ORDER BY ab.id ASC",
        )
        .bind(book_id.raw())
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        Ok(rows.into_iter().map(Author::from).collect())
    }
}
