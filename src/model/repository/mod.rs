use chrono::NaiveDateTime;

#[derive(Debug, PartialEq, Clone)]
pub struct Book {
    pub id: u32,
    pub title: String,
    pub author: String,
    pub description: Option<String>,
    pub publication_year: Option<i32>,
}

#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Author {
    pub id: u32,
    pub name: String,
}

/// represents a tag in the Tags table. Tags are created by the moderation
/// workflow outside of this server, so nothing here ever inserts one outside
/// of tests
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Tag {
    pub id: u32,
    pub name: String,
    pub description: Option<String>,
    pub category_id: u32,
}

#[derive(Debug, PartialEq, Eq, Clone)]
pub struct TagCategory {
    pub id: u32,
    pub name: String,
    pub display_order: u32,
}

/// a single user's vote on a (book, tag) pair. At most one row exists per
/// (book, tag, user) triple; a value of 0 is treated the same as no row
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct VoteRecord {
    pub book_id: u32,
    pub tag_id: u32,
    pub user_id: u32,
    pub value: i64,
}

/// the saved/followed/hidden bits one user holds for one tag. A record where
/// all three bits are false is never persisted; the repository deletes it
/// instead
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct PreferenceRecord {
    pub user_id: u32,
    pub tag_id: u32,
    pub saved: bool,
    pub followed: bool,
    pub hidden: bool,
}

#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Bookshelf {
    /// only populated when pulled from the database
    pub id: Option<u32>,
    pub user_id: u32,
    pub name: String,
    pub display_order: u32,
}

/// membership of a book on a shelf, along with when it was shelved
#[derive(Debug, PartialEq, Clone)]
pub struct ShelfBook {
    pub book_id: u32,
    pub added_date: NaiveDateTime,
}
