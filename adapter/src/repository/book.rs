use async_trait::async_trait;
use derive_new::new;
use kernel::{
    model::{
        book::{
            event::{CreateBook, DeleteBook, UpdateBook},
            Book,
        },
        id::BookId,
    },
    repository::book::BookRepository,
};
use shared::error::{AppError, AppResult};

use crate::database::{model::book::BookRow, ConnectionPool};

#[derive(new)]
pub struct BookRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl BookRepository for BookRepositoryImpl {
    async fn find_all(&self) -> AppResult<Vec<Book>> {
        let rows: Vec<BookRow> = sqlx::query_as(
            "SELECT id, title, description, review, rating, cover_id \
             FROM books \
             ORDER BY id ASC",
        )
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        Ok(rows.into_iter().map(Book::from).collect())
    }

    async fn find_by_id(&self, book_id: BookId) -> AppResult<Option<Book>> {
        let row: Option<BookRow> = sqlx::query_as(
            "SELECT id, title, description, review, rating, cover_id \
             FROM books \
             WHERE id = $1",
        )
        .bind(book_id.raw())
        .fetch_optional(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        Ok(row.map(Book::from))
    }

    // 書籍行の挿入とリンク行の作成を同一トランザクションで行う
    async fn create(&self, event: CreateBook) -> AppResult<BookId> {
        let mut tx = self.db.begin().await?;

        let book_id: i64 = sqlx::query_scalar(
            "INSERT INTO books (title, description, review, rating, cover_id) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING id",
        )
        .bind(&event.title)
        .bind(&event.description)
        .bind(&event.review)
        .bind(&event.rating)
        .bind(event.cover_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(AppError::SpecificOperationError)?;

        sqlx::query("INSERT INTO authorbooks (author_id, book_id) VALUES ($1, $2)")
            .bind(event.author_id.raw())
            .bind(book_id)
            .execute(&mut *tx)
            .await
            .map_err(AppError::SpecificOperationError)?;

        tx.commit().await.map_err(AppError::TransactionError)?;

        Ok(BookId::new(book_id))
    }

    async fn update(&self, event: UpdateBook) -> AppResult<()> {
        let res = sqlx::query(
            "UPDATE books \
             SET title = $1, description = $2, review = $3, rating = $4 \
             WHERE id = $5",
        )
        .bind(&event.title)
        .bind(&event.description)
        .bind(&event.review)
        .bind(&event.rating)
        .bind(event.book_id.raw())
        .execute(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Err(AppError::EntityNotFound(
                "specified book not found".into(),
            ));
        }
        Ok(())
    }

    // リンク行 → 書籍行の順で削除する。著者行は残す
    async fn delete(&self, event: DeleteBook) -> AppResult<()> {
        let mut tx = self.db.begin().await?;

        sqlx::query("DELETE FROM authorbooks WHERE book_id = $1")
            .bind(event.book_id.raw())
            .execute(&mut *tx)
            .await
            .map_err(AppError::SpecificOperationError)?;

        let res = sqlx::query("DELETE FROM books WHERE id = $1")
            .bind(event.book_id.raw())
            .execute(&mut *tx)
            .await
            .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Err(AppError::NoRowsAffectedError(
                "no book record has been deleted".into(),
            ));
        }

        tx.commit().await.map_err(AppError::TransactionError)
    }
}
