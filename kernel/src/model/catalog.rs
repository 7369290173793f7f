use strum::Display;

// 外部検索の最初のヒットから取り出すメタデータ。各フィールドは個別に欠けうる。
#[derive(Debug, Clone)]
pub struct BookMetadata {
    pub title: Option<String>,
    pub author: Option<String>,
    pub cover_id: Option<i64>,
    pub author_key: Option<String>,
}

// 画像エンドポイントに渡す 1 文字のサイズコード
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum CoverSize {
    #[strum(serialize = "S")]
    Small,
    #[strum(serialize = "M")]
    Medium,
    #[strum(serialize = "L")]
    Large,
}
