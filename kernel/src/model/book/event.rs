use crate::model::id::{AuthorId, BookId};

// 新規レビューのフォーム入力。title は外部カタログの検索キーを兼ねる。
#[derive(Debug)]
pub struct SubmitReview {
    pub title: String,
    pub description: String,
    pub review: String,
    pub rating: String,
}

// 著者解決後のストアへの挿入イベント
#[derive(Debug)]
pub struct CreateBook {
    pub title: String,
    pub description: String,
    pub review: String,
    pub rating: String,
    pub cover_id: Option<i64>,
    pub author_id: AuthorId,
}

#[derive(Debug)]
pub struct UpdateBook {
    pub book_id: BookId,
    pub title: String,
    pub description: String,
    pub review: String,
    pub rating: String,
}

#[derive(Debug)]
pub struct DeleteBook {
    pub book_id: BookId,
}
