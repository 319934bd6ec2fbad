use std::backtrace::Backtrace;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::guard::Auth;
use crate::model::error::account_errors::{
    CreateUserError, DeleteAccountError, UpdateAccountError,
};
use crate::model::request::account_requests::{NewUserRequest, UpdateAccountRequest};
use crate::repository::{is_constraint_violation, user_repository};

/// 2-30 characters of letters, digits, underscores, and hyphens
static USERNAME_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new("^[a-zA-Z0-9_-]{2,30}$").unwrap());

const MIN_PASSWORD_LENGTH: usize = 6;

/// registers a new account. The username's uniqueness is left to the table
/// constraint, so a race between two signups picks one winner cleanly
pub fn create_user(request: NewUserRequest) -> Result<(), CreateUserError> {
    let username = request.username.trim().to_string();
    if !USERNAME_PATTERN.is_match(&username) {
        return Err(CreateUserError::BadUsername);
    }
    if request.password.trim().len() < MIN_PASSWORD_LENGTH {
        return Err(CreateUserError::BadPassword);
    }
    let auth = Auth {
        username: username.clone(),
        password: request.password,
    };
    let con = crate::repository::open_connection();
    let result = user_repository::create_user(&username, &auth.password_hash(), &con);
    con.close().unwrap();
    match result {
        Ok(_) => Ok(()),
        Err(e) if is_constraint_violation(&e) => Err(CreateUserError::UsernameTaken),
        Err(e) => {
            log::error!(
                "Failed to create account {username}! Error is {e:?}\n{}",
                Backtrace::force_capture()
            );
            Err(CreateUserError::DbError(e.to_string()))
        }
    }
}

/// updates the caller's username and/or password; whichever fields are
/// present get validated and written
pub fn update_account(user_id: u32, request: UpdateAccountRequest) -> Result<(), UpdateAccountError> {
    let con = crate::repository::open_connection();
    if let Some(username) = request.username {
        let username = username.trim().to_string();
        if !USERNAME_PATTERN.is_match(&username) {
            con.close().unwrap();
            return Err(UpdateAccountError::BadUsername);
        }
        match user_repository::update_username(user_id, &username, &con) {
            Ok(()) => { /* no op */ }
            Err(e) if is_constraint_violation(&e) => {
                con.close().unwrap();
                return Err(UpdateAccountError::UsernameTaken);
            }
            Err(e) => {
                log::error!(
                    "Failed to update username for user {user_id}! Error is {e:?}\n{}",
                    Backtrace::force_capture()
                );
                con.close().unwrap();
                return Err(UpdateAccountError::DbError(e.to_string()));
            }
        }
    }
    if let Some(password) = request.password {
        if password.trim().len() < MIN_PASSWORD_LENGTH {
            con.close().unwrap();
            return Err(UpdateAccountError::BadPassword);
        }
        let auth = Auth {
            username: String::new(),
            password,
        };
        if let Err(e) = user_repository::update_password(user_id, &auth.password_hash(), &con) {
            log::error!(
                "Failed to update password for user {user_id}! Error is {e:?}\n{}",
                Backtrace::force_capture()
            );
            con.close().unwrap();
            return Err(UpdateAccountError::DbError(e.to_string()));
        }
    }
    con.close().unwrap();
    Ok(())
}

/// removes the caller's account; votes, preferences, and shelves go with it
pub fn delete_account(user_id: u32) -> Result<(), DeleteAccountError> {
    let con = crate::repository::open_connection();
    let result = user_repository::delete_user(user_id, &con);
    con.close().unwrap();
    match result {
        Ok(()) => Ok(()),
        Err(e) => {
            log::error!(
                "Failed to delete account {user_id}! Error is {e:?}\n{}",
                Backtrace::force_capture()
            );
            Err(DeleteAccountError::DbError(e.to_string()))
        }
    }
}
