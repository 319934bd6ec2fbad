use rocket::serde::json::Json;
use rocket::serde::{Deserialize, Serialize};

pub mod account_responses;
pub mod author_responses;
pub mod book_responses;
pub mod preference_responses;
pub mod shelf_responses;
pub mod tag_responses;

/// the body every failing endpoint returns; the message is all a client gets
#[derive(Responder, Serialize, Deserialize, Debug, PartialEq)]
#[serde(crate = "rocket::serde")]
pub struct ErrorMessage {
    pub error: String,
}

impl ErrorMessage {
    pub fn new(error: &str) -> Json<ErrorMessage> {
        Json::from(ErrorMessage {
            error: error.to_string(),
        })
    }
}

impl From<&str> for ErrorMessage {
    fn from(value: &str) -> Self {
        Self {
            error: value.to_string(),
        }
    }
}

impl From<String> for ErrorMessage {
    fn from(value: String) -> Self {
        Self { error: value }
    }
}

/// mutation endpoints that have nothing else to report answer with this
#[derive(Serialize, Deserialize, Debug, PartialEq)]
#[serde(crate = "rocket::serde")]
pub struct SuccessMessage {
    pub success: bool,
}

impl SuccessMessage {
    pub fn ok() -> Json<SuccessMessage> {
        Json::from(SuccessMessage { success: true })
    }
}
