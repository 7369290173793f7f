use axum::{
    routing::{delete, get, post},
    Router,
};
use registry::AppRegistry;

use crate::handler::book::{
    delete_book, register_book, show_about, show_book_detail, show_book_list, show_edit_form,
    show_new_review_form, update_book,
};

pub fn build_book_routers() -> Router<AppRegistry> {
    Router::new()
        .route("/", get(show_book_list))
        .route("/about", get(show_about))
        .route("/New", get(show_new_review_form))
        .route("/add", post(register_book))
        .route("/update/:id/:title", get(show_edit_form).post(update_book))
        .route("/delete/:id", delete(delete_book))
        // 静的セグメントのルートが優先されるため、このワイルドカードは最後に置く
        .route("/:id/:title", get(show_book_detail))
}
