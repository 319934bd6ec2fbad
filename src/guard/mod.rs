use std::io::Write;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use rocket::async_trait;
use rocket::http::Status;
use rocket::request::{FromRequest, Outcome};
use rocket::Request;
use sha2::{Digest, Sha256};

use crate::repository::{open_connection, user_repository};

/// used to represent the result of calling `Auth::validate`
pub enum ValidateResult {
    /// carries the id of the authenticated user, which is passed explicitly
    /// into every service call instead of living in any ambient state
    Ok(u32),
    Invalid,
}

#[derive(Debug)]
pub struct Auth {
    pub username: String,
    pub password: String,
}

impl Auth {
    /// creates an `Auth` object from the passed header value.
    /// The value of header must be base64-encoded basic auth.
    pub fn from(header: &str) -> Result<Auth, &str> {
        // remove the "Basic " from the header, leaving only the base64 part
        let stripped_header = header.to_string().replace("Basic ", "");
        match BASE64.decode(stripped_header.as_str()) {
            Ok(value) => {
                let combined = String::from_utf8(value).unwrap();
                let split = combined.split(":").collect::<Vec<&str>>();
                // if there aren't exactly 2 parts, then something is wrong here
                if split.len() != 2 || split.contains(&"") {
                    return Err("Invalid basic auth format: missing username or password");
                }
                Ok(Auth {
                    username: String::from(split[0].trim()),
                    password: String::from(split[1].trim()),
                })
            }
            Err(_) => Err("Invalid basic auth format: not base64"),
        }
    }

    /// compares our value with the accounts table and resolves to the matching
    /// user id.
    ///
    /// _this is a convenience method to be used only in handlers_
    pub fn validate(&self) -> ValidateResult {
        let con = open_connection();
        let result =
            user_repository::find_by_credentials(&self.username, &self.password_hash(), &con);
        con.close().unwrap();
        match result {
            Ok(Some(id)) => ValidateResult::Ok(id),
            Ok(None) => ValidateResult::Invalid,
            Err(e) => {
                log::error!("Failed to check credentials against the database! Error is {e:?}");
                ValidateResult::Invalid
            }
        }
    }

    pub fn password_hash(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.write(self.password.trim().as_bytes()).unwrap();
        format!("{:x}", hasher.finalize())
    }
}

#[async_trait]
impl<'a> FromRequest<'a> for Auth {
    type Error = AuthError;

    async fn from_request(request: &'a Request<'_>) -> Outcome<Self, Self::Error> {
        // just check if it's basic auth
        fn check_basic_auth(value: &str) -> bool {
            String::from(value).starts_with("Basic")
        }
        match request.headers().get_one("Authorization") {
            None => Outcome::Error((Status::Unauthorized, AuthError::Missing)),
            Some(value) if check_basic_auth(value) => match Auth::from(value) {
                Ok(auth) => Outcome::Success(auth),
                Err(_) => Outcome::Error((Status::Unauthorized, AuthError::Invalid)),
            },
            Some(_) => Outcome::Error((Status::BadRequest, AuthError::Invalid)),
        }
    }
}

#[derive(Debug)]
pub enum AuthError {
    Missing,
    Invalid,
}

/// resolves an optional auth guard to a user id, treating bad credentials the
/// same as no credentials. Read-only endpoints use this so anonymous requests
/// still get data, just without any per-user vote values
pub fn resolve_user(auth: Option<Auth>) -> Option<u32> {
    match auth?.validate() {
        ValidateResult::Ok(id) => Some(id),
        ValidateResult::Invalid => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_valid_input() {
        // test:test
        let input = "Basic dGVzdDp0ZXN0Cg==";
        let output = Auth::from(input).unwrap();
        assert_eq!("test", output.username);
        assert_eq!("test", output.password);
    }

    #[test]
    fn test_from_unencoded_input() {
        let input = "test:test";
        let output = Auth::from(input).unwrap_err();
        assert_eq!("Invalid basic auth format: not base64", output);
    }

    #[test]
    fn test_from_bad_input() {
        // :test
        assert_eq!(
            "Invalid basic auth format: missing username or password",
            Auth::from("OnRlc3Q=").unwrap_err()
        );
        // test:
        assert_eq!(
            "Invalid basic auth format: missing username or password",
            Auth::from("dGVzdDo=").unwrap_err()
        );
        // testtest
        assert_eq!(
            "Invalid basic auth format: missing username or password",
            Auth::from("dGVzdHRlc3Q=").unwrap_err()
        )
    }

    #[test]
    fn test_password_hash() {
        let auth = Auth {
            username: "test".to_string(),
            password: "test".to_string(),
        };
        assert_eq!(
            "9f86d081884c7d659a2feaa0c55ad015a3bf4f1b2b0b822cd15d6c15b0f00a08",
            auth.password_hash()
        );
    }
}
