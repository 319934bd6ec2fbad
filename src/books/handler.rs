use rocket::serde::json::Json;

use crate::books::service;
use crate::guard::{resolve_user, Auth, ValidateResult};
use crate::model::error::book_errors::{
    BookShelvesError, BookTagsError, ExploreError, GetBookError, SearchBookError,
};
use crate::model::request::book_requests::ExploreParams;
use crate::model::response::book_responses::{
    BookSearchListApi, ExploreResponse, GetBookResponse, GetBookShelvesResponse,
    GetBookTagsResponse, SearchBookResponse,
};
use crate::model::response::ErrorMessage;

#[get("/<id>")]
pub fn get_book(id: u32) -> GetBookResponse {
    match service::get_book(id) {
        Ok(book) => GetBookResponse::Success(Json::from(book)),
        Err(GetBookError::BookNotFound) => GetBookResponse::BookNotFound(ErrorMessage::new(
            "The book with the passed id could not be found.",
        )),
        Err(GetBookError::DbError(message)) => {
            GetBookResponse::BookDbError(ErrorMessage::new(&message))
        }
    }
}

#[get("/<id>/tags")]
pub fn get_book_tags(id: u32, auth: Option<Auth>) -> GetBookTagsResponse {
    let user = resolve_user(auth);
    match service::get_book_tags(id, user) {
        Ok(tags) => GetBookTagsResponse::Success(Json::from(tags)),
        Err(BookTagsError::BookNotFound) => GetBookTagsResponse::BookNotFound(ErrorMessage::new(
            "The book with the passed id could not be found.",
        )),
        Err(BookTagsError::DbError(message)) => {
            GetBookTagsResponse::TagDbError(ErrorMessage::new(&message))
        }
    }
}

#[get("/?<search>")]
pub fn search_books(search: Option<String>) -> SearchBookResponse {
    match service::search_books(search.unwrap_or_default()) {
        Ok(books) => SearchBookResponse::Success(Json::from(BookSearchListApi { books })),
        Err(SearchBookError::DbError(message)) => {
            SearchBookResponse::BookDbError(ErrorMessage::new(&message))
        }
    }
}

#[get("/explore?<params..>")]
pub fn explore_books(params: ExploreParams) -> ExploreResponse {
    match service::explore(params) {
        Ok(books) => ExploreResponse::Success(Json::from(books)),
        Err(ExploreError::DbError(message)) => {
            ExploreResponse::BookDbError(ErrorMessage::new(&message))
        }
    }
}

#[get("/<id>/shelves")]
pub fn get_book_shelves(id: u32, auth: Auth) -> GetBookShelvesResponse {
    let user_id = match auth.validate() {
        ValidateResult::Ok(user_id) => user_id,
        ValidateResult::Invalid => {
            return GetBookShelvesResponse::Unauthorized(ErrorMessage::new("Bad Credentials"))
        }
    };
    match service::get_book_shelves(user_id, id) {
        Ok(shelves) => GetBookShelvesResponse::Success(Json::from(shelves)),
        Err(BookShelvesError::BookNotFound) => GetBookShelvesResponse::BookNotFound(
            ErrorMessage::new("The book with the passed id could not be found."),
        ),
        Err(BookShelvesError::DbError(message)) => {
            GetBookShelvesResponse::ShelfDbError(ErrorMessage::new(&message))
        }
    }
}
