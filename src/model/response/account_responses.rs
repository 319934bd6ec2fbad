use rocket::serde::json::Json;

use crate::model::response::{ErrorMessage, SuccessMessage};

pub type NoContent = ();

#[derive(Responder)]
pub enum CreateUserResponse {
    #[response(status = 400, content_type = "json")]
    BadRequest(Json<ErrorMessage>),
    #[response(status = 409, content_type = "json")]
    UsernameTaken(Json<ErrorMessage>),
    #[response(status = 500, content_type = "json")]
    UserDbError(Json<ErrorMessage>),
    #[response(status = 201)]
    Success(Json<SuccessMessage>),
}

#[derive(Responder)]
pub enum UpdateAccountResponse {
    #[response(status = 401, content_type = "json")]
    Unauthorized(Json<ErrorMessage>),
    #[response(status = 400, content_type = "json")]
    BadRequest(Json<ErrorMessage>),
    #[response(status = 409, content_type = "json")]
    UsernameTaken(Json<ErrorMessage>),
    #[response(status = 500, content_type = "json")]
    UserDbError(Json<ErrorMessage>),
    #[response(status = 200)]
    Success(Json<SuccessMessage>),
}

#[derive(Responder)]
pub enum DeleteAccountResponse {
    #[response(status = 401, content_type = "json")]
    Unauthorized(Json<ErrorMessage>),
    #[response(status = 500, content_type = "json")]
    UserDbError(Json<ErrorMessage>),
    #[response(status = 204)]
    Success(NoContent),
}
