use rocket::serde::json::Json;
use rocket::serde::{Deserialize, Serialize};

use crate::model::repository;
use crate::model::response::ErrorMessage;

/// a shelf as the owning user sees it. `has_book` is only populated when the
/// request asked about a specific book
#[derive(Serialize, Deserialize, Debug, PartialEq, Clone)]
#[serde(crate = "rocket::serde")]
pub struct ShelfApi {
    pub id: u32,
    pub name: String,
    pub display_order: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_book: Option<bool>,
}

impl From<repository::Bookshelf> for ShelfApi {
    fn from(value: repository::Bookshelf) -> Self {
        ShelfApi {
            // shelves read back from the database always carry an id
            id: value.id.unwrap_or(0),
            name: value.name,
            display_order: value.display_order,
            has_book: None,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
#[serde(crate = "rocket::serde")]
pub struct ShelfListApi {
    pub shelves: Vec<ShelfApi>,
}

/// a book on a shelf along with when it was shelved
#[derive(Serialize, Deserialize, Debug, PartialEq, Clone)]
#[serde(crate = "rocket::serde")]
pub struct ShelfBookApi {
    pub id: u32,
    pub title: String,
    pub author: String,
    pub publication_year: Option<i32>,
    pub added_at: String,
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
#[serde(crate = "rocket::serde")]
pub struct ShelfBookListApi {
    pub books: Vec<ShelfBookApi>,
    pub total: usize,
}

// ----------------------------------

#[derive(Responder)]
pub enum GetShelvesResponse {
    #[response(status = 401, content_type = "json")]
    Unauthorized(Json<ErrorMessage>),
    #[response(status = 500, content_type = "json")]
    ShelfDbError(Json<ErrorMessage>),
    #[response(status = 200)]
    Success(Json<ShelfListApi>),
}

#[derive(Responder)]
pub enum CreateShelfResponse {
    #[response(status = 401, content_type = "json")]
    Unauthorized(Json<ErrorMessage>),
    #[response(status = 400, content_type = "json")]
    BadName(Json<ErrorMessage>),
    #[response(status = 409, content_type = "json")]
    NameTaken(Json<ErrorMessage>),
    #[response(status = 500, content_type = "json")]
    ShelfDbError(Json<ErrorMessage>),
    #[response(status = 201)]
    Success(Json<ShelfApi>),
}

#[derive(Responder)]
pub enum SaveShelvesResponse {
    #[response(status = 401, content_type = "json")]
    Unauthorized(Json<ErrorMessage>),
    #[response(status = 400, content_type = "json")]
    BadRequest(Json<ErrorMessage>),
    #[response(status = 404, content_type = "json")]
    ShelfNotFound(Json<ErrorMessage>),
    #[response(status = 500, content_type = "json")]
    ShelfDbError(Json<ErrorMessage>),
    #[response(status = 200)]
    Success(Json<ShelfListApi>),
}

#[derive(Responder)]
pub enum ShelfBookResponse {
    #[response(status = 401, content_type = "json")]
    Unauthorized(Json<ErrorMessage>),
    #[response(status = 400, content_type = "json")]
    BadAction(Json<ErrorMessage>),
    #[response(status = 404, content_type = "json")]
    NotFound(Json<ErrorMessage>),
    #[response(status = 409, content_type = "json")]
    Conflict(Json<ErrorMessage>),
    #[response(status = 500, content_type = "json")]
    ShelfDbError(Json<ErrorMessage>),
    #[response(status = 200)]
    Success(Json<super::SuccessMessage>),
}

#[derive(Responder)]
pub enum ShelfBooksResponse {
    #[response(status = 401, content_type = "json")]
    Unauthorized(Json<ErrorMessage>),
    #[response(status = 404, content_type = "json")]
    ShelfNotFound(Json<ErrorMessage>),
    #[response(status = 500, content_type = "json")]
    ShelfDbError(Json<ErrorMessage>),
    #[response(status = 200)]
    Success(Json<ShelfBookListApi>),
}
