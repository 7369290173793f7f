use async_trait::async_trait;

use crate::model::catalog::{BookMetadata, CoverSize};

// 外部カタログ API の呼び出し口。
// ネットワーク・ステータス起因の失敗は実装側でログに残して None に落とし、
// 呼び出し側へはエラーとして伝播させない（表示が欠けるだけでリクエストは成功させる）。
#[mockall::automock]
#[async_trait]
pub trait CatalogClient: Send + Sync {
    // タイトルで検索し、最初のヒットだけを返す。0 件・失敗は None
    async fn search_book(&self, title: &str) -> Option<BookMetadata>;
    // base64 エンコード済みの JPEG バイト列を返す
    async fn fetch_cover(&self, cover_id: i64, size: CoverSize) -> Option<String>;
    async fn fetch_author_photo(&self, author_key: &str, size: CoverSize) -> Option<String>;
}
