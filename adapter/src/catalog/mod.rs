use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use kernel::{
    client::catalog::CatalogClient,
    model::catalog::{BookMetadata, CoverSize},
};
use serde::Deserialize;
use shared::config::CatalogApiConfig;

#[derive(Clone)]
pub struct CatalogApiClient {
    client: reqwest::Client,
    search_base_url: String,
    covers_base_url: String,
}

impl CatalogApiClient {
    // タイムアウトは設定せず、トランスポートの既定値に任せる
    pub fn new(cfg: &CatalogApiConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            search_base_url: cfg.search_base_url.clone(),
            covers_base_url: cfg.covers_base_url.clone(),
        }
    }

    fn search_url(&self, title: &str) -> String {
        format!(
            "{}/search.json?q={}",
            self.search_base_url,
            urlencoding::encode(title)
        )
    }

    fn cover_url(&self, cover_id: i64, size: CoverSize) -> String {
        format!("{}/b/id/{}-{}.jpg", self.covers_base_url, cover_id, size)
    }

    fn author_photo_url(&self, author_key: &str, size: CoverSize) -> String {
        format!("{}/a/olid/{}-{}.jpg", self.covers_base_url, author_key, size)
    }

    // バイナリで取得して base64 へ変換する。失敗は warn に残して None
    async fn fetch_image(&self, url: &str) -> Option<String> {
        match self.try_fetch_bytes(url).await {
            Ok(bytes) => Some(STANDARD.encode(bytes)),
            Err(e) => {
                tracing::warn!(error.message = %e, url = %url, "画像の取得に失敗しました");
                None
            }
        }
    }

    async fn try_fetch_bytes(&self, url: &str) -> reqwest::Result<Vec<u8>> {
        let response = self.client.get(url).send().await?.error_for_status()?;
        Ok(response.bytes().await?.to_vec())
    }

    async fn try_search(&self, url: &str) -> reqwest::Result<SearchBooksResponse> {
        self.client
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await
    }
}

#[async_trait]
impl CatalogClient for CatalogApiClient {
    async fn search_book(&self, title: &str) -> Option<BookMetadata> {
        let url = self.search_url(title);
        match self.try_search(&url).await {
            Ok(response) => response.into_first_hit(),
            Err(e) => {
                tracing::warn!(error.message = %e, url = %url, "書籍検索に失敗しました");
                None
            }
        }
    }

    async fn fetch_cover(&self, cover_id: i64, size: CoverSize) -> Option<String> {
        self.fetch_image(&self.cover_url(cover_id, size)).await
    }

    async fn fetch_author_photo(&self, author_key: &str, size: CoverSize) -> Option<String> {
        self.fetch_image(&self.author_photo_url(author_key, size))
            .await
    }
}

// search.json のレスポンスから利用するフィールドだけを写し取る
#[derive(Debug, Deserialize)]
struct SearchBooksResponse {
    #[serde(default)]
    docs: Vec<SearchDoc>,
}

#[derive(Debug, Deserialize)]
struct SearchDoc {
    title: Option<String>,
    author_name: Option<Vec<String>>,
    cover_i: Option<i64>,
    author_key: Option<Vec<String>>,
}

impl SearchBooksResponse {
    // 最初のヒットだけを採用し、配列フィールドは先頭要素を取り出す
    fn into_first_hit(self) -> Option<BookMetadata> {
        let doc = self.docs.into_iter().next()?;
        Some(BookMetadata {
            title: doc.title,
            author: doc.author_name.and_then(|names| names.into_iter().next()),
            cover_id: doc.cover_i,
            author_key: doc.author_key.and_then(|keys| keys.into_iter().next()),
        })
    }
}
