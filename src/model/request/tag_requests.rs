use rocket::serde::{Deserialize, Serialize};

/// a vote of 0 removes the caller's vote row instead of storing a 0
#[derive(Deserialize, Serialize)]
#[serde(crate = "rocket::serde")]
pub struct VoteRequest {
    pub book_id: u32,
    pub tag_id: u32,
    pub value: i64,
}

#[derive(Deserialize, Serialize)]
#[serde(crate = "rocket::serde")]
pub struct AddTagRequest {
    pub book_id: u32,
    pub tag_id: u32,
}

/// field must be one of `is_saved`, `is_followed`, `is_hidden`
#[derive(Deserialize, Serialize)]
#[serde(crate = "rocket::serde")]
pub struct ToggleRequest {
    pub field: String,
}
