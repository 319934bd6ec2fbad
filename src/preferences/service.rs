use std::backtrace::Backtrace;

use crate::model::error::preference_errors::{GetPreferencesError, TogglePreferenceError};
use crate::model::repository::PreferenceRecord;
use crate::model::response::preference_responses::{PreferenceApi, ToggleApi};
use crate::optimistic::ControlState;
use crate::preferences::models::PreferenceField;
use crate::preferences::repository as preference_repository;
use crate::tags::repository as tag_repository;

/// the caller's three bits for a tag. A missing row reads as all false
pub fn get_preferences(user_id: u32, tag_id: u32) -> Result<PreferenceApi, GetPreferencesError> {
    let con = crate::repository::open_connection();
    if let Err(e) = tag_repository::get_tag(tag_id, &con) {
        con.close().unwrap();
        return Err(match e {
            rusqlite::Error::QueryReturnedNoRows => GetPreferencesError::TagNotFound,
            _ => GetPreferencesError::DbError(e.to_string()),
        });
    }
    let record = match preference_repository::get_preference(user_id, tag_id, &con) {
        Ok(r) => r,
        Err(e) => {
            log::error!(
                "Failed to retrieve preferences for user {user_id} / tag {tag_id}! Error is {e:?}\n{}",
                Backtrace::force_capture()
            );
            con.close().unwrap();
            return Err(GetPreferencesError::DbError(e.to_string()));
        }
    };
    con.close().unwrap();
    Ok(record.map(PreferenceApi::from).unwrap_or(PreferenceApi::none()))
}

/// flips exactly one of the caller's bits for a tag.
///
/// From no row, setting a bit creates the row with just that bit. From an
/// existing row the bit pattern is updated with a refreshed timestamp, unless
/// every bit ends up false, in which case the row is deleted. Echoes the
/// field and its new value
pub fn toggle_preference(
    user_id: u32,
    tag_id: u32,
    field_name: &str,
) -> Result<ToggleApi, TogglePreferenceError> {
    let field = match PreferenceField::from_field_name(field_name) {
        Some(f) => f,
        None => return Err(TogglePreferenceError::BadField),
    };
    let con = crate::repository::open_connection();
    if let Err(e) = tag_repository::get_tag(tag_id, &con) {
        con.close().unwrap();
        return Err(match e {
            rusqlite::Error::QueryReturnedNoRows => TogglePreferenceError::TagNotFound,
            _ => TogglePreferenceError::DbError(e.to_string()),
        });
    }
    let existing = match preference_repository::get_preference(user_id, tag_id, &con) {
        Ok(r) => r,
        Err(e) => {
            log::error!(
                "Failed to retrieve preferences for user {user_id} / tag {tag_id}! Error is {e:?}\n{}",
                Backtrace::force_capture()
            );
            con.close().unwrap();
            return Err(TogglePreferenceError::DbError(e.to_string()));
        }
    };
    let current = existing.clone().unwrap_or(PreferenceRecord {
        user_id,
        tag_id,
        saved: false,
        followed: false,
        hidden: false,
    });
    let toggled = flip(&current, field);
    // the bit as a control sees it: flipped immediately, reverted on failure
    let state = ControlState::Idle(bit(&current, field)).apply(bit(&toggled, field));
    let now = chrono::offset::Local::now().naive_local();
    let write_result = if !toggled.saved && !toggled.followed && !toggled.hidden {
        // no row is kept in the all-false state
        preference_repository::delete_preference(user_id, tag_id, &con)
    } else if existing.is_some() {
        preference_repository::update_preference(&toggled, now, &con)
    } else {
        preference_repository::create_preference(&toggled, now, &con)
    };
    con.close().unwrap();
    match write_result {
        Ok(()) => Ok(ToggleApi {
            field: field.field_name().to_string(),
            value: state.resolve(true).value(),
        }),
        Err(e) => {
            log::error!(
                "Failed to toggle {field_name} for user {user_id} / tag {tag_id}; reverting to {}. Error is {e:?}\n{}",
                state.resolve(false).value(),
                Backtrace::force_capture()
            );
            Err(TogglePreferenceError::DbError(e.to_string()))
        }
    }
}

fn flip(record: &PreferenceRecord, field: PreferenceField) -> PreferenceRecord {
    let mut flipped = record.clone();
    match field {
        PreferenceField::Saved => flipped.saved = !flipped.saved,
        PreferenceField::Followed => flipped.followed = !flipped.followed,
        PreferenceField::Hidden => flipped.hidden = !flipped.hidden,
    };
    flipped
}

fn bit(record: &PreferenceRecord, field: PreferenceField) -> bool {
    match field {
        PreferenceField::Saved => record.saved,
        PreferenceField::Followed => record.followed,
        PreferenceField::Hidden => record.hidden,
    }
}
