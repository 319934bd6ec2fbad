use rocket::serde::{Deserialize, Serialize};

#[derive(Deserialize, Serialize)]
#[serde(crate = "rocket::serde")]
pub struct NewUserRequest {
    pub username: String,
    pub password: String,
}

/// both fields are optional; whichever is present gets updated
#[derive(Deserialize, Serialize)]
#[serde(crate = "rocket::serde")]
pub struct UpdateAccountRequest {
    pub username: Option<String>,
    pub password: Option<String>,
}
