use rocket::serde::{Deserialize, Serialize};

#[derive(Deserialize, Serialize)]
#[serde(crate = "rocket::serde")]
pub struct CreateShelfRequest {
    pub name: String,
}

/// one entry in a bulk shelf save. Entries without an id are created; the
/// caller's shelves missing from the list are deleted
#[derive(Deserialize, Serialize, Clone)]
#[serde(crate = "rocket::serde")]
pub struct ShelfEntry {
    pub id: Option<u32>,
    pub name: String,
}

#[derive(Deserialize, Serialize)]
#[serde(crate = "rocket::serde")]
pub struct SaveShelvesRequest {
    pub shelves: Vec<ShelfEntry>,
}

/// action must be `add` or `remove`
#[derive(Deserialize, Serialize)]
#[serde(crate = "rocket::serde")]
pub struct ShelfBookRequest {
    pub book_id: u32,
    pub action: String,
}
