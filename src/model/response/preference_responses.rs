use rocket::serde::json::Json;
use rocket::serde::{Deserialize, Serialize};

use crate::model::repository;
use crate::model::response::ErrorMessage;

/// the three preference bits a user holds for a tag. A missing record reads
/// back as all false; clients cannot tell the difference, which is the point
#[derive(Serialize, Deserialize, Debug, PartialEq, Clone, Copy)]
#[serde(crate = "rocket::serde")]
pub struct PreferenceApi {
    pub is_saved: bool,
    pub is_followed: bool,
    pub is_hidden: bool,
}

impl PreferenceApi {
    pub fn none() -> Self {
        PreferenceApi {
            is_saved: false,
            is_followed: false,
            is_hidden: false,
        }
    }
}

impl From<repository::PreferenceRecord> for PreferenceApi {
    fn from(value: repository::PreferenceRecord) -> Self {
        PreferenceApi {
            is_saved: value.saved,
            is_followed: value.followed,
            is_hidden: value.hidden,
        }
    }
}

/// echoes the toggled field and the bit's new value
#[derive(Serialize, Deserialize, Debug, PartialEq, Clone)]
#[serde(crate = "rocket::serde")]
pub struct ToggleApi {
    pub field: String,
    pub value: bool,
}

// ----------------------------------

#[derive(Responder)]
pub enum GetPreferencesResponse {
    #[response(status = 401, content_type = "json")]
    Unauthorized(Json<ErrorMessage>),
    #[response(status = 404, content_type = "json")]
    TagNotFound(Json<ErrorMessage>),
    #[response(status = 500, content_type = "json")]
    PreferenceDbError(Json<ErrorMessage>),
    #[response(status = 200)]
    Success(Json<PreferenceApi>),
}

#[derive(Responder)]
pub enum TogglePreferenceResponse {
    #[response(status = 401, content_type = "json")]
    Unauthorized(Json<ErrorMessage>),
    #[response(status = 400, content_type = "json")]
    BadField(Json<ErrorMessage>),
    #[response(status = 404, content_type = "json")]
    TagNotFound(Json<ErrorMessage>),
    #[response(status = 409, content_type = "json")]
    ToggleInFlight(Json<ErrorMessage>),
    #[response(status = 500, content_type = "json")]
    PreferenceDbError(Json<ErrorMessage>),
    #[response(status = 200)]
    Success(Json<ToggleApi>),
}
