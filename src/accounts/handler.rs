use rocket::serde::json::Json;
use rocket::serde::Serialize;

use crate::accounts::service;
use crate::guard::{Auth, ValidateResult};
use crate::model::error::account_errors::{
    CreateUserError, DeleteAccountError, UpdateAccountError,
};
use crate::model::request::account_requests::{NewUserRequest, UpdateAccountRequest};
use crate::model::response::account_responses::{
    CreateUserResponse, DeleteAccountResponse, UpdateAccountResponse,
};
use crate::model::response::{ErrorMessage, SuccessMessage};

static API_VERSION_NUMBER: f64 = 1.3;

#[derive(Serialize)]
#[serde(crate = "rocket::serde")]
pub struct ApiVersion {
    version: f64,
}

impl ApiVersion {
    fn new() -> ApiVersion {
        ApiVersion {
            version: API_VERSION_NUMBER,
        }
    }
}

#[get("/version")]
pub fn api_version() -> Json<ApiVersion> {
    Json(ApiVersion::new())
}

#[post("/users", data = "<request>")]
pub fn create_user(request: Json<NewUserRequest>) -> CreateUserResponse {
    match service::create_user(request.into_inner()) {
        Ok(()) => CreateUserResponse::Success(SuccessMessage::ok()),
        Err(CreateUserError::BadUsername) => CreateUserResponse::BadRequest(ErrorMessage::new(
            "Username must be 2-30 characters of letters, numbers, underscores, or hyphens.",
        )),
        Err(CreateUserError::BadPassword) => CreateUserResponse::BadRequest(ErrorMessage::new(
            "Password must be at least 6 characters.",
        )),
        Err(CreateUserError::UsernameTaken) => {
            CreateUserResponse::UsernameTaken(ErrorMessage::new("Username already taken."))
        }
        Err(CreateUserError::DbError(message)) => {
            CreateUserResponse::UserDbError(ErrorMessage::new(&message))
        }
    }
}

#[patch("/account", data = "<request>")]
pub fn update_account(request: Json<UpdateAccountRequest>, auth: Auth) -> UpdateAccountResponse {
    let user_id = match auth.validate() {
        ValidateResult::Ok(id) => id,
        ValidateResult::Invalid => {
            return UpdateAccountResponse::Unauthorized(ErrorMessage::new("Bad Credentials"))
        }
    };
    match service::update_account(user_id, request.into_inner()) {
        Ok(()) => UpdateAccountResponse::Success(SuccessMessage::ok()),
        Err(UpdateAccountError::BadUsername) => UpdateAccountResponse::BadRequest(
            ErrorMessage::new(
                "Username must be 2-30 characters of letters, numbers, underscores, or hyphens.",
            ),
        ),
        Err(UpdateAccountError::BadPassword) => UpdateAccountResponse::BadRequest(
            ErrorMessage::new("Password must be at least 6 characters."),
        ),
        Err(UpdateAccountError::UsernameTaken) => {
            UpdateAccountResponse::UsernameTaken(ErrorMessage::new("Username already taken."))
        }
        Err(UpdateAccountError::DbError(message)) => {
            UpdateAccountResponse::UserDbError(ErrorMessage::new(&message))
        }
    }
}

#[delete("/account")]
pub fn delete_account(auth: Auth) -> DeleteAccountResponse {
    let user_id = match auth.validate() {
        ValidateResult::Ok(id) => id,
        ValidateResult::Invalid => {
            return DeleteAccountResponse::Unauthorized(ErrorMessage::new("Bad Credentials"))
        }
    };
    match service::delete_account(user_id) {
        Ok(()) => DeleteAccountResponse::Success(()),
        Err(DeleteAccountError::DbError(message)) => {
            DeleteAccountResponse::UserDbError(ErrorMessage::new(&message))
        }
    }
}
