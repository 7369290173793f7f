use kernel::model::{author::Author, id::AuthorId};

#[derive(sqlx::FromRow)]
pub struct AuthorRow {
    pub id: i64,
    pub name: String,
    pub api_id: Option<String>,
}

impl From<AuthorRow> for Author {
    fn from(row: AuthorRow) -> Self {
        Author {
            id: AuthorId::new(row.id),
            name: row.name,
            api_id: row.api_id,
        }
    }
}
