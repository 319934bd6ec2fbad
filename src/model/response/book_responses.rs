use rocket::serde::json::Json;
use rocket::serde::{Deserialize, Serialize};

use crate::model::repository;
use crate::model::response::shelf_responses::ShelfApi;
use crate::model::response::tag_responses::GroupedCategoryApi;
use crate::model::response::ErrorMessage;

#[derive(Serialize, Deserialize, Debug, PartialEq, Clone)]
#[serde(crate = "rocket::serde")]
pub struct BookApi {
    pub id: u32,
    pub title: String,
    pub author: String,
    pub description: Option<String>,
    pub publication_year: Option<i32>,
}

impl From<repository::Book> for BookApi {
    fn from(value: repository::Book) -> Self {
        BookApi {
            id: value.id,
            title: value.title,
            author: value.author,
            description: value.description,
            publication_year: value.publication_year,
        }
    }
}

/// the trimmed shape returned by the title search box
#[derive(Serialize, Deserialize, Debug, PartialEq, Clone)]
#[serde(crate = "rocket::serde")]
pub struct BookSummaryApi {
    pub id: u32,
    pub title: String,
    pub author: String,
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
#[serde(crate = "rocket::serde")]
pub struct BookSearchListApi {
    pub books: Vec<BookSummaryApi>,
}

/// a book that passed the explore filter, with both ranking scores so the
/// client can re-sort without another request
#[derive(Serialize, Deserialize, Debug, PartialEq, Clone)]
#[serde(crate = "rocket::serde")]
pub struct ExploreBookApi {
    pub id: u32,
    pub title: String,
    pub author: String,
    pub description: Option<String>,
    pub publication_year: Option<i32>,
    pub match_score: i64,
    pub popularity: i64,
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
#[serde(crate = "rocket::serde")]
pub struct ExploreListApi {
    pub books: Vec<ExploreBookApi>,
    pub total: usize,
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
#[serde(crate = "rocket::serde")]
pub struct BookTagsApi {
    pub categories: Vec<GroupedCategoryApi>,
}

/// the caller's shelves with membership flags for one book, plus which shelf
/// a bare "add" button should target
#[derive(Serialize, Deserialize, Debug, PartialEq)]
#[serde(crate = "rocket::serde")]
pub struct BookShelvesApi {
    pub shelves: Vec<ShelfApi>,
    pub default_shelf_id: Option<u32>,
}

// ----------------------------------

#[derive(Responder)]
pub enum GetBookResponse {
    #[response(status = 404, content_type = "json")]
    BookNotFound(Json<ErrorMessage>),
    #[response(status = 500, content_type = "json")]
    BookDbError(Json<ErrorMessage>),
    #[response(status = 200)]
    Success(Json<BookApi>),
}

#[derive(Responder)]
pub enum SearchBookResponse {
    #[response(status = 500, content_type = "json")]
    BookDbError(Json<ErrorMessage>),
    #[response(status = 200)]
    Success(Json<BookSearchListApi>),
}

#[derive(Responder)]
pub enum ExploreResponse {
    #[response(status = 500, content_type = "json")]
    BookDbError(Json<ErrorMessage>),
    #[response(status = 200)]
    Success(Json<ExploreListApi>),
}

#[derive(Responder)]
pub enum GetBookTagsResponse {
    #[response(status = 404, content_type = "json")]
    BookNotFound(Json<ErrorMessage>),
    #[response(status = 500, content_type = "json")]
    TagDbError(Json<ErrorMessage>),
    #[response(status = 200)]
    Success(Json<BookTagsApi>),
}

#[derive(Responder)]
pub enum GetBookShelvesResponse {
    #[response(status = 401, content_type = "json")]
    Unauthorized(Json<ErrorMessage>),
    #[response(status = 404, content_type = "json")]
    BookNotFound(Json<ErrorMessage>),
    #[response(status = 500, content_type = "json")]
    ShelfDbError(Json<ErrorMessage>),
    #[response(status = 200)]
    Success(Json<BookShelvesApi>),
}
