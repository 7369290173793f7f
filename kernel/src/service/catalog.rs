use std::sync::Arc;

use derive_new::new;
use shared::error::{AppError, AppResult};

use crate::{
    client::catalog::CatalogClient,
    model::{
        author::event::CreateAuthor,
        book::{
            event::{CreateBook, DeleteBook, SubmitReview, UpdateBook},
            Book, BookView,
        },
        catalog::CoverSize,
        id::BookId,
    },
    repository::{author::AuthorRepository, book::BookRepository},
};

// ローカルのレビュー行と外部カタログ由来の書誌・画像を突き合わせ、
// 非正規化した BookView を組み立てるサービス。書き込み時は著者の解決も担う。
#[derive(new, Clone)]
pub struct CatalogService {
    book_repository: Arc<dyn BookRepository>,
    author_repository: Arc<dyn AuthorRepository>,
    catalog_client: Arc<dyn CatalogClient>,
}

impl CatalogService {
    pub async fn find_all_views(&self) -> AppResult<Vec<BookView>> {
        let books = self.book_repository.find_all().await?;
        let mut views = Vec::with_capacity(books.len());
        // 外部フェッチを含むため、1 冊ずつ順番に組み立てる
        for book in books {
            views.push(self.build_view(book).await?);
        }
        Ok(views)
    }

    pub async fn find_view_by_id(&self, book_id: BookId) -> AppResult<BookView> {
        let book = self
            .book_repository
            .find_by_id(book_id)
            .await?
            .ok_or_else(|| AppError::EntityNotFound(format!("book_id: {book_id}")))?;
        self.build_view(book).await
    }

    // 検索 → 著者の find-or-create → 書籍挿入＋リンク作成、の順で登録する
    pub async fn register_review(&self, event: SubmitReview) -> AppResult<BookId> {
        let metadata = self
            .catalog_client
            .search_book(&event.title)
            .await
            .ok_or_else(|| AppError::MetadataNotFound(event.title.clone()))?;
        // 著者名が取れない書籍は著者リンクを張れないため登録しない
        let author_name = metadata
            .author
            .ok_or_else(|| AppError::MetadataNotFound(event.title.clone()))?;

        let author_id = self
            .author_repository
            .find_or_create(CreateAuthor {
                name: author_name,
                api_id: metadata.author_key,
            })
            .await?;

        self.book_repository
            .create(CreateBook {
                // 検索結果にタイトルがなければ入力値をそのまま使う
                title: metadata.title.unwrap_or(event.title),
                description: event.description,
                review: event.review,
                rating: event.rating,
                cover_id: metadata.cover_id,
                author_id,
            })
            .await
    }

    pub async fn update_book(&self, event: UpdateBook) -> AppResult<()> {
        self.book_repository.update(event).await
    }

    pub async fn delete_book(&self, book_id: BookId) -> AppResult<()> {
        self.book_repository.delete(DeleteBook { book_id }).await
    }

    async fn build_view(&self, book: Book) -> AppResult<BookView> {
        let cover_image = match book.cover_id {
            Some(cover_id) => self
                .catalog_client
                .fetch_cover(cover_id, CoverSize::Large)
                .await
                .map(as_data_uri)
                .unwrap_or_default(),
            None => String::new(),
        };

        let authors = self.author_repository.find_by_book_id(book.id).await?;

        // 写真は結合順の先頭の著者のみ。api_id を持たない著者ならフェッチしない
        let author_photo = match authors.first().and_then(|a| a.api_id.as_deref()) {
            Some(author_key) => self
                .catalog_client
                .fetch_author_photo(author_key, CoverSize::Medium)
                .await
                .map(as_data_uri),
            None => None,
        };

        Ok(BookView {
            book,
            cover_image,
            authors,
            author_photo,
        })
    }
}

fn as_data_uri(encoded: String) -> String {
    format!("data:image/jpeg;base64,{encoded}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        client::catalog::MockCatalogClient,
        model::{author::Author, catalog::BookMetadata, id::AuthorId},
        repository::{author::MockAuthorRepository, book::MockBookRepository},
    };

    fn dune(id: i64) -> Book {
        Book {
            id: BookId::new(id),
            title: "Dune".into(),
            description: "Desert planet epic".into(),
            review: "A classic".into(),
            rating: "5".into(),
            cover_id: Some(12345),
        }
    }

    fn herbert() -> Author {
        Author {
            id: AuthorId::new(1),
            name: "Frank Herbert".into(),
            api_id: Some("OL123A".into()),
        }
    }

    fn service(
        book_repo: MockBookRepository,
        author_repo: MockAuthorRepository,
        client: MockCatalogClient,
    ) -> CatalogService {
        CatalogService::new(Arc::new(book_repo), Arc::new(author_repo), Arc::new(client))
    }

    #[tokio::test]
    async fn detail_view_assembles_cover_authors_and_primary_photo() {
        let mut book_repo = MockBookRepository::new();
        book_repo
            .expect_find_by_id()
            .returning(|id| Ok(Some(dune(id.raw()))));

        let mut author_repo = MockAuthorRepository::new();
        author_repo
            .expect_find_by_book_id()
            .returning(|_| Ok(vec![herbert()]));

        let mut client = MockCatalogClient::new();
        client
            .expect_fetch_cover()
            .withf(|cover_id, size| *cover_id == 12345 && *size == CoverSize::Large)
            .returning(|_, _| Some("Y292ZXI=".into()));
        client
            .expect_fetch_author_photo()
            .withf(|key, size| key == "OL123A" && *size == CoverSize::Medium)
            .returning(|_, _| Some("cGhvdG8=".into()));

        let view = service(book_repo, author_repo, client)
            .find_view_by_id(BookId::new(1))
            .await
            .unwrap();

        assert!(view.cover_image.starts_with("data:image/jpeg;base64,"));
        assert_eq!(view.authors.len(), 1);
        assert_eq!(view.authors[0].name, "Frank Herbert");
        assert_eq!(
            view.author_photo.as_deref(),
            Some("data:image/jpeg;base64,cGhvdG8=")
        );
    }

    #[tokio::test]
    async fn detail_view_degrades_to_empty_cover_when_fetch_fails() {
        let mut book_repo = MockBookRepository::new();
        book_repo
            .expect_find_by_id()
            .returning(|id| Ok(Some(dune(id.raw()))));

        let mut author_repo = MockAuthorRepository::new();
        author_repo
            .expect_find_by_book_id()
            .returning(|_| Ok(vec![herbert()]));

        let mut client = MockCatalogClient::new();
        client.expect_fetch_cover().returning(|_, _| None);
        client.expect_fetch_author_photo().returning(|_, _| None);

        let view = service(book_repo, author_repo, client)
            .find_view_by_id(BookId::new(1))
            .await
            .unwrap();

        assert_eq!(view.cover_image, "");
        assert_eq!(view.author_photo, None);
    }

    #[tokio::test]
    async fn detail_view_fails_with_not_found_for_missing_id() {
        let mut book_repo = MockBookRepository::new();
        book_repo.expect_find_by_id().returning(|_| Ok(None));

        let author_repo = MockAuthorRepository::new();
        let client = MockCatalogClient::new();

        let err = service(book_repo, author_repo, client)
            .find_view_by_id(BookId::new(999))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::EntityNotFound(_)));
    }

    #[tokio::test]
    async fn detail_view_skips_fetches_without_cover_id_or_authors() {
        let mut book_repo = MockBookRepository::new();
        book_repo.expect_find_by_id().returning(|id| {
            Ok(Some(Book {
                cover_id: None,
                ..dune(id.raw())
            }))
        });

        let mut author_repo = MockAuthorRepository::new();
        author_repo.expect_find_by_book_id().returning(|_| Ok(vec![]));

        let mut client = MockCatalogClient::new();
        client.expect_fetch_cover().never();
        client.expect_fetch_author_photo().never();

        let view = service(book_repo, author_repo, client)
            .find_view_by_id(BookId::new(1))
            .await
            .unwrap();

        assert_eq!(view.cover_image, "");
        assert!(view.authors.is_empty());
        assert_eq!(view.author_photo, None);
    }

    #[tokio::test]
    async fn detail_view_skips_photo_when_primary_author_has_no_api_id() {
        let mut book_repo = MockBookRepository::new();
        book_repo
            .expect_find_by_id()
            .returning(|id| Ok(Some(dune(id.raw()))));

        let mut author_repo = MockAuthorRepository::new();
        author_repo.expect_find_by_book_id().returning(|_| {
            Ok(vec![
                Author {
                    id: AuthorId::new(2),
                    name: "Anonymous".into(),
                    api_id: None,
                },
                herbert(),
            ])
        });

        let mut client = MockCatalogClient::new();
        client
            .expect_fetch_cover()
            .returning(|_, _| Some("Y292ZXI=".into()));
        client.expect_fetch_author_photo().never();

        let view = service(book_repo, author_repo, client)
            .find_view_by_id(BookId::new(1))
            .await
            .unwrap();

        // 結合順の先頭が api_id を持たないため、2 人目の著者の写真は引かない
        assert_eq!(view.author_photo, None);
        assert_eq!(view.authors.len(), 2);
    }

    #[tokio::test]
    async fn list_views_enrich_each_book_in_store_order() {
        let mut book_repo = MockBookRepository::new();
        book_repo.expect_find_all().returning(|| {
            Ok(vec![
                dune(1),
                Book {
                    title: "Children of Dune".into(),
                    cover_id: None,
                    ..dune(2)
                },
            ])
        });

        let mut author_repo = MockAuthorRepository::new();
        author_repo
            .expect_find_by_book_id()
            .times(2)
            .returning(|_| Ok(vec![herbert()]));

        let mut client = MockCatalogClient::new();
        // 2 冊目は cover_id を持たないのでフェッチは 1 回だけ
        client
            .expect_fetch_cover()
            .times(1)
            .returning(|_, _| Some("Y292ZXI=".into()));
        client
            .expect_fetch_author_photo()
            .times(2)
            .returning(|_, _| None);

        let views = service(book_repo, author_repo, client)
            .find_all_views()
            .await
            .unwrap();

        assert_eq!(views.len(), 2);
        assert_eq!(views[0].book.id, BookId::new(1));
        assert_eq!(views[1].book.id, BookId::new(2));
        assert!(views[0].cover_image.starts_with("data:image/jpeg;base64,"));
        assert_eq!(views[1].cover_image, "");
    }

    #[tokio::test]
    async fn register_review_fails_when_search_returns_nothing() {
        let book_repo = MockBookRepository::new();
        let author_repo = MockAuthorRepository::new();

        let mut client = MockCatalogClient::new();
        client.expect_search_book().returning(|_| None);

        let err = service(book_repo, author_repo, client)
            .register_review(SubmitReview {
                title: "Nonexistent Title XYZ123".into(),
                description: "".into(),
                review: "".into(),
                rating: "1".into(),
            })
            .await
            .unwrap_err();

        // 検索ヒットなしの場合、books / authors / authorbooks への書き込みは一切起きない
        assert!(matches!(err, AppError::MetadataNotFound(_)));
    }

    #[tokio::test]
    async fn register_review_fails_when_metadata_has_no_author() {
        let book_repo = MockBookRepository::new();
        let author_repo = MockAuthorRepository::new();

        let mut client = MockCatalogClient::new();
        client.expect_search_book().returning(|_| {
            Some(BookMetadata {
                title: Some("Dune".into()),
                author: None,
                cover_id: Some(12345),
                author_key: None,
            })
        });

        let err = service(book_repo, author_repo, client)
            .register_review(SubmitReview {
                title: "Dune".into(),
                description: "".into(),
                review: "".into(),
                rating: "5".into(),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::MetadataNotFound(_)));
    }

    #[tokio::test]
    async fn register_review_links_resolved_author_and_stores_cover_id() {
        let mut client = MockCatalogClient::new();
        client.expect_search_book().returning(|_| {
            Some(BookMetadata {
                title: Some("Dune".into()),
                author: Some("Frank Herbert".into()),
                cover_id: Some(12345),
                author_key: Some("OL123A".into()),
            })
        });

        let mut author_repo = MockAuthorRepository::new();
        author_repo
            .expect_find_or_create()
            .withf(|event| event.name == "Frank Herbert" && event.api_id.as_deref() == Some("OL123A"))
            .returning(|_| Ok(AuthorId::new(7)));

        let mut book_repo = MockBookRepository::new();
        book_repo
            .expect_create()
            .withf(|event| {
                event.title == "Dune"
                    && event.cover_id == Some(12345)
                    && event.author_id == AuthorId::new(7)
            })
            .returning(|_| Ok(BookId::new(42)));

        let book_id = service(book_repo, author_repo, client)
            .register_review(SubmitReview {
                title: "dune".into(),
                description: "Desert planet epic".into(),
                review: "A classic".into(),
                rating: "5".into(),
            })
            .await
            .unwrap();

        assert_eq!(book_id, BookId::new(42));
    }

    #[tokio::test]
    async fn register_review_falls_back_to_submitted_title() {
        let mut client = MockCatalogClient::new();
        client.expect_search_book().returning(|_| {
            Some(BookMetadata {
                title: None,
                author: Some("Frank Herbert".into()),
                cover_id: None,
                author_key: None,
            })
        });

        let mut author_repo = MockAuthorRepository::new();
        author_repo
            .expect_find_or_create()
            .withf(|event| event.api_id.is_none())
            .returning(|_| Ok(AuthorId::new(7)));

        let mut book_repo = MockBookRepository::new();
        book_repo
            .expect_create()
            .withf(|event| event.title == "Dune Messiah" && event.cover_id.is_none())
            .returning(|_| Ok(BookId::new(43)));

        let book_id = service(book_repo, author_repo, client)
            .register_review(SubmitReview {
                title: "Dune Messiah".into(),
                description: "".into(),
                review: "".into(),
                rating: "4".into(),
            })
            .await
            .unwrap();

        assert_eq!(book_id, BookId::new(43));
    }

    #[tokio::test]
    async fn update_book_overwrites_only_mutable_fields() {
        let mut book_repo = MockBookRepository::new();
        book_repo
            .expect_update()
            .withf(|event| {
                event.book_id == BookId::new(1)
                    && event.title == "Dune (revised)"
                    && event.rating == "4"
            })
            .returning(|_| Ok(()));

        let author_repo = MockAuthorRepository::new();
        let client = MockCatalogClient::new();

        service(book_repo, author_repo, client)
            .update_book(UpdateBook {
                book_id: BookId::new(1),
                title: "Dune (revised)".into(),
                description: "d".into(),
                review: "r".into(),
                rating: "4".into(),
            })
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn delete_book_delegates_cascade_to_store() {
        let mut book_repo = MockBookRepository::new();
        book_repo
            .expect_delete()
            .withf(|event| event.book_id == BookId::new(1))
            .returning(|_| Ok(()));

        let author_repo = MockAuthorRepository::new();
        let client = MockCatalogClient::new();

        service(book_repo, author_repo, client)
            .delete_book(BookId::new(1))
            .await
            .unwrap();
    }
}
