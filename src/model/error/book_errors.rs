#[derive(PartialEq, Debug)]
pub enum GetBookError {
    /// the book was not found
    BookNotFound,
    /// an error with the database
    DbError(String),
}

#[derive(PartialEq, Debug)]
pub enum SearchBookError {
    DbError(String),
}

#[derive(PartialEq, Debug)]
pub enum ExploreError {
    DbError(String),
}

#[derive(PartialEq, Debug)]
pub enum BookTagsError {
    BookNotFound,
    DbError(String),
}

#[derive(PartialEq, Debug)]
pub enum BookShelvesError {
    BookNotFound,
    DbError(String),
}
