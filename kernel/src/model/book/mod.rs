use super::{author::Author, id::BookId};

pub mod event;

#[derive(Debug, Clone)]
pub struct Book {
    pub id: BookId,
    pub title: String,
    pub description: String,
    pub review: String,
    // 評価値は範囲検証せず、入力された文字列をそのまま保持する
    pub rating: String,
    pub cover_id: Option<i64>,
}

// 一覧・詳細の描画時にリクエストごとに組み立てる非正規化ビュー。永続化はしない。
// cover_image は data URI または空文字列、author_photo は先頭の著者の写真のみ。
#[derive(Debug)]
pub struct BookView {
    pub book: Book,
    pub cover_image: String,
    pub authors: Vec<Author>,
    pub author_photo: Option<String>,
}
