use rocket::serde::json::Json;
use rocket::serde::{Deserialize, Serialize};

use crate::model::repository;
use crate::model::response::ErrorMessage;

#[derive(Serialize, Deserialize, Debug, PartialEq, Clone)]
#[serde(crate = "rocket::serde")]
pub struct AuthorApi {
    pub id: u32,
    pub name: String,
}

impl From<repository::Author> for AuthorApi {
    fn from(value: repository::Author) -> Self {
        AuthorApi {
            id: value.id,
            name: value.name,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Clone)]
#[serde(crate = "rocket::serde")]
pub struct AuthorBookApi {
    pub id: u32,
    pub title: String,
    pub description: Option<String>,
    pub publication_year: Option<i32>,
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
#[serde(crate = "rocket::serde")]
pub struct AuthorBooksApi {
    pub author: AuthorApi,
    pub books: Vec<AuthorBookApi>,
    pub total: usize,
}

/// a tag aggregated across every book of one author; `count` is the summed
/// net score over those books and is always positive here
#[derive(Serialize, Deserialize, Debug, PartialEq, Clone)]
#[serde(crate = "rocket::serde")]
pub struct AuthorTagApi {
    pub id: u32,
    pub name: String,
    pub description: Option<String>,
    pub category_name: String,
    pub count: i64,
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
#[serde(crate = "rocket::serde")]
pub struct AuthorTagsApi {
    pub author: AuthorApi,
    pub tags: Vec<AuthorTagApi>,
}

// ----------------------------------

#[derive(Responder)]
pub enum GetAuthorResponse {
    #[response(status = 404, content_type = "json")]
    AuthorNotFound(Json<ErrorMessage>),
    #[response(status = 400, content_type = "json")]
    BadTab(Json<ErrorMessage>),
    #[response(status = 500, content_type = "json")]
    AuthorDbError(Json<ErrorMessage>),
    #[response(status = 200)]
    Books(Json<AuthorBooksApi>),
    #[response(status = 200)]
    Tags(Json<AuthorTagsApi>),
}
