use kernel::model::{book::Book, id::BookId};

#[derive(sqlx::FromRow)]
pub struct BookRow {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub review: String,
    pub rating: String,
    pub cover_id: Option<i64>,
}

impl From<BookRow> for Book {
    fn from(row: BookRow) -> Self {
        Book {
            id: BookId::new(row.id),
            title: row.title,
            description: row.description,
            review: row.review,
            rating: row.rating,
            cover_id: row.cover_id,
        }
    }
}
