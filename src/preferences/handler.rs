use rocket::serde::json::Json;
use rocket::State;

use crate::guard::{Auth, ValidateResult};
use crate::model::error::preference_errors::{GetPreferencesError, TogglePreferenceError};
use crate::model::request::tag_requests::ToggleRequest;
use crate::model::response::preference_responses::{
    GetPreferencesResponse, TogglePreferenceResponse,
};
use crate::model::response::ErrorMessage;
use crate::optimistic::{preference_key, InFlight};
use crate::preferences::service;

#[get("/<tag_id>/preferences")]
pub fn get_preferences(tag_id: u32, auth: Auth) -> GetPreferencesResponse {
    let user_id = match auth.validate() {
        ValidateResult::Ok(id) => id,
        ValidateResult::Invalid => {
            return GetPreferencesResponse::Unauthorized(ErrorMessage::new("Bad Credentials"))
        }
    };
    match service::get_preferences(user_id, tag_id) {
        Ok(preferences) => GetPreferencesResponse::Success(Json::from(preferences)),
        Err(GetPreferencesError::TagNotFound) => GetPreferencesResponse::TagNotFound(
            ErrorMessage::new("The tag with the passed id could not be found."),
        ),
        Err(GetPreferencesError::DbError(message)) => {
            GetPreferencesResponse::PreferenceDbError(ErrorMessage::new(&message))
        }
    }
}

#[post("/<tag_id>/preferences", data = "<request>")]
pub fn toggle_preference(
    tag_id: u32,
    request: Json<ToggleRequest>,
    auth: Auth,
    in_flight: &State<InFlight>,
) -> TogglePreferenceResponse {
    let user_id = match auth.validate() {
        ValidateResult::Ok(id) => id,
        ValidateResult::Invalid => {
            return TogglePreferenceResponse::Unauthorized(ErrorMessage::new("Bad Credentials"))
        }
    };
    // one toggle per (user, tag) at a time; the bits are flipped relative to
    // what was read, so two racing toggles could otherwise undo each other
    let _ticket = match in_flight.begin(preference_key(user_id, tag_id)) {
        Some(ticket) => ticket,
        None => {
            return TogglePreferenceResponse::ToggleInFlight(ErrorMessage::new(
                "Another preference change for this tag is still being processed.",
            ))
        }
    };
    match service::toggle_preference(user_id, tag_id, &request.field) {
        Ok(toggled) => TogglePreferenceResponse::Success(Json::from(toggled)),
        Err(TogglePreferenceError::BadField) => TogglePreferenceResponse::BadField(
            ErrorMessage::new("field must be one of is_saved, is_followed, or is_hidden."),
        ),
        Err(TogglePreferenceError::TagNotFound) => TogglePreferenceResponse::TagNotFound(
            ErrorMessage::new("The tag with the passed id could not be found."),
        ),
        Err(TogglePreferenceError::DbError(message)) => {
            TogglePreferenceResponse::PreferenceDbError(ErrorMessage::new(&message))
        }
    }
}
