use askama::Template;
use derive_new::new;
use garde::Validate;
use kernel::model::{
    author::Author,
    book::{
        event::{SubmitReview, UpdateBook},
        Book, BookView,
    },
    id::BookId,
};
use serde::Deserialize;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateBookRequest {
    #[garde(length(min = 1))]
    pub title: String,
    #[garde(skip)]
    pub description: String,
    #[garde(skip)]
    pub review: String,
    #[garde(skip)]
    pub rating: String,
}

impl From<CreateBookRequest> for SubmitReview {
    fn from(request: CreateBookRequest) -> Self {
        let CreateBookRequest {
            title,
            description,
            review,
            rating,
        } = request;
        Self {
            title,
            description,
            review,
            rating,
        }
    }
}

// 編集フォームのフィールド名は bookTitle 形式
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBookRequest {
    #[garde(length(min = 1))]
    pub book_title: String,
    #[garde(skip)]
    pub book_description: String,
    #[garde(skip)]
    pub book_review: String,
    #[garde(skip)]
    pub book_rating: String,
}

#[derive(new)]
pub struct UpdateBookRequestWithId(BookId, UpdateBookRequest);

impl From<UpdateBookRequestWithId> for UpdateBook {
    fn from(value: UpdateBookRequestWithId) -> Self {
        let UpdateBookRequestWithId(book_id, request) = value;
        Self {
            book_id,
            title: request.book_title,
            description: request.book_description,
            review: request.book_review,
            rating: request.book_rating,
        }
    }
}

pub struct AuthorResponse {
    pub name: String,
    pub api_id: Option<String>,
}

impl From<Author> for AuthorResponse {
    fn from(author: Author) -> Self {
        Self {
            name: author.name,
            api_id: author.api_id,
        }
    }
}

pub struct BookViewResponse {
    pub id: BookId,
    pub title: String,
    pub description: String,
    pub review: String,
    pub rating: String,
    pub cover_image: String,
    pub authors: Vec<AuthorResponse>,
    pub author_photo: Option<String>,
}

impl From<BookView> for BookViewResponse {
    fn from(view: BookView) -> Self {
        let BookView {
            book,
            cover_image,
            authors,
            author_photo,
        } = view;
        Self {
            id: book.id,
            title: book.title,
            description: book.description,
            review: book.review,
            rating: book.rating,
            cover_image,
            authors: authors.into_iter().map(AuthorResponse::from).collect(),
            author_photo,
        }
    }
}

// 編集フォームに流す素の行。画像や著者の解決はしない
pub struct BookResponse {
    pub id: BookId,
    pub title: String,
    pub description: String,
    pub review: String,
    pub rating: String,
}

impl From<Book> for BookResponse {
    fn from(book: Book) -> Self {
        Self {
            id: book.id,
            title: book.title,
            description: book.description,
            review: book.review,
            rating: book.rating,
        }
    }
}

#[derive(Template)]
#[template(path = "index.html")]
pub struct BookListTemplate {
    pub books: Vec<BookViewResponse>,
}

impl From<Vec<BookView>> for BookListTemplate {
    fn from(views: Vec<BookView>) -> Self {
        Self {
            books: views.into_iter().map(BookViewResponse::from).collect(),
        }
    }
}

#[derive(Template)]
#[template(path = "book.html")]
pub struct BookDetailTemplate {
    pub book: BookViewResponse,
}

impl From<BookView> for BookDetailTemplate {
    fn from(view: BookView) -> Self {
        Self {
            book: BookViewResponse::from(view),
        }
    }
}

#[derive(Template)]
#[template(path = "new_review.html")]
pub struct NewReviewTemplate;

#[derive(Template)]
#[template(path = "update.html")]
pub struct EditBookTemplate {
    pub book: BookResponse,
}

impl From<Book> for EditBookTemplate {
    fn from(book: Book) -> Self {
        Self {
            book: BookResponse::from(book),
        }
    }
}

#[derive(Template)]
#[template(path = "about.html")]
pub struct AboutTemplate;
