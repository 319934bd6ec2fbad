use rocket::serde::json::Json;
use rocket::State;

use crate::guard::{Auth, ValidateResult};
use crate::model::error::shelf_errors::{
    CreateShelfError, GetShelvesError, SaveShelvesError, ShelfBookError, ShelfBooksError,
};
use crate::model::request::book_requests::ShelfBooksParams;
use crate::model::request::shelf_requests::{
    CreateShelfRequest, SaveShelvesRequest, ShelfBookRequest,
};
use crate::model::response::shelf_responses::{
    CreateShelfResponse, GetShelvesResponse, SaveShelvesResponse, ShelfBookResponse,
    ShelfBooksResponse, ShelfListApi,
};
use crate::model::response::{ErrorMessage, SuccessMessage};
use crate::optimistic::{shelf_key, InFlight};
use crate::shelves::service;

#[get("/?<book_id>")]
pub fn get_shelves(book_id: Option<u32>, auth: Auth) -> GetShelvesResponse {
    let user_id = match auth.validate() {
        ValidateResult::Ok(id) => id,
        ValidateResult::Invalid => {
            return GetShelvesResponse::Unauthorized(ErrorMessage::new("Bad Credentials"))
        }
    };
    match service::get_shelves(user_id, book_id) {
        Ok(shelves) => GetShelvesResponse::Success(Json::from(ShelfListApi { shelves })),
        Err(GetShelvesError::DbError(message)) => {
            GetShelvesResponse::ShelfDbError(ErrorMessage::new(&message))
        }
    }
}

#[post("/", data = "<request>")]
pub fn create_shelf(request: Json<CreateShelfRequest>, auth: Auth) -> CreateShelfResponse {
    let user_id = match auth.validate() {
        ValidateResult::Ok(id) => id,
        ValidateResult::Invalid => {
            return CreateShelfResponse::Unauthorized(ErrorMessage::new("Bad Credentials"))
        }
    };
    match service::create_shelf(user_id, request.into_inner().name) {
        Ok(shelf) => CreateShelfResponse::Success(Json::from(shelf)),
        Err(CreateShelfError::BadName) => {
            CreateShelfResponse::BadName(ErrorMessage::new("Shelf name is required."))
        }
        Err(CreateShelfError::NameTaken) => CreateShelfResponse::NameTaken(ErrorMessage::new(
            "You already have a shelf with that name.",
        )),
        Err(CreateShelfError::DbError(message)) => {
            CreateShelfResponse::ShelfDbError(ErrorMessage::new(&message))
        }
    }
}

#[put("/", data = "<request>")]
pub fn save_shelves(request: Json<SaveShelvesRequest>, auth: Auth) -> SaveShelvesResponse {
    let user_id = match auth.validate() {
        ValidateResult::Ok(id) => id,
        ValidateResult::Invalid => {
            return SaveShelvesResponse::Unauthorized(ErrorMessage::new("Bad Credentials"))
        }
    };
    match service::save_shelves(user_id, request.into_inner()) {
        Ok(shelves) => SaveShelvesResponse::Success(Json::from(ShelfListApi { shelves })),
        Err(SaveShelvesError::EmptyList) => SaveShelvesResponse::BadRequest(ErrorMessage::new(
            "You must have at least one bookshelf.",
        )),
        Err(SaveShelvesError::BadName) => {
            SaveShelvesResponse::BadRequest(ErrorMessage::new("All shelves must have a name."))
        }
        Err(SaveShelvesError::DuplicateNames) => {
            SaveShelvesResponse::BadRequest(ErrorMessage::new("Shelf names must be unique."))
        }
        Err(SaveShelvesError::ShelfNotFound) => SaveShelvesResponse::ShelfNotFound(
            ErrorMessage::new("One of the passed shelves could not be found."),
        ),
        Err(SaveShelvesError::DbError(message)) => {
            SaveShelvesResponse::ShelfDbError(ErrorMessage::new(&message))
        }
    }
}

#[post("/<id>/books", data = "<request>")]
pub fn modify_shelf_book(
    id: u32,
    request: Json<ShelfBookRequest>,
    auth: Auth,
    in_flight: &State<InFlight>,
) -> ShelfBookResponse {
    let user_id = match auth.validate() {
        ValidateResult::Ok(user_id) => user_id,
        ValidateResult::Invalid => {
            return ShelfBookResponse::Unauthorized(ErrorMessage::new("Bad Credentials"))
        }
    };
    let request = request.into_inner();
    let _ticket = match in_flight.begin(shelf_key(user_id, id, request.book_id)) {
        Some(ticket) => ticket,
        None => {
            return ShelfBookResponse::Conflict(ErrorMessage::new(
                "Another change for this book and shelf is still being processed.",
            ))
        }
    };
    match service::set_shelf_book(user_id, id, request) {
        Ok(()) => ShelfBookResponse::Success(SuccessMessage::ok()),
        Err(ShelfBookError::BadAction) => {
            ShelfBookResponse::BadAction(ErrorMessage::new("action must be add or remove."))
        }
        Err(ShelfBookError::ShelfNotFound) => ShelfBookResponse::NotFound(ErrorMessage::new(
            "The shelf with the passed id could not be found.",
        )),
        Err(ShelfBookError::BookNotFound) => ShelfBookResponse::NotFound(ErrorMessage::new(
            "The book with the passed id could not be found.",
        )),
        Err(ShelfBookError::AlreadyOnShelf) => {
            ShelfBookResponse::Conflict(ErrorMessage::new("That book is already on the shelf."))
        }
        Err(ShelfBookError::DbError(message)) => {
            ShelfBookResponse::ShelfDbError(ErrorMessage::new(&message))
        }
    }
}

#[get("/<id>/books?<params..>")]
pub fn get_shelf_books(id: u32, params: ShelfBooksParams, auth: Auth) -> ShelfBooksResponse {
    let user_id = match auth.validate() {
        ValidateResult::Ok(user_id) => user_id,
        ValidateResult::Invalid => {
            return ShelfBooksResponse::Unauthorized(ErrorMessage::new("Bad Credentials"))
        }
    };
    match service::shelf_books(user_id, id, params) {
        Ok(books) => ShelfBooksResponse::Success(Json::from(books)),
        Err(ShelfBooksError::ShelfNotFound) => ShelfBooksResponse::ShelfNotFound(
            ErrorMessage::new("The shelf with the passed id could not be found."),
        ),
        Err(ShelfBooksError::DbError(message)) => {
            ShelfBooksResponse::ShelfDbError(ErrorMessage::new(&message))
        }
    }
}
