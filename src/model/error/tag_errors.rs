#[derive(PartialEq, Debug)]
pub enum GetTagError {
    /// the tag was not found
    TagNotFound,
    /// an error with the database
    DbError(String),
}

#[derive(PartialEq, Debug)]
pub enum SearchTagError {
    DbError(String),
}

#[derive(PartialEq, Debug)]
pub enum GetCategoriesError {
    DbError(String),
}

#[derive(PartialEq, Debug)]
pub enum VoteError {
    /// vote values may only be -1, 0, or 1
    BadValue,
    /// no book with the passed id was found
    BookNotFound,
    /// no tag with the passed id was found
    TagNotFound,
    DbError(String),
}

#[derive(PartialEq, Debug)]
pub enum AddTagError {
    BookNotFound,
    TagNotFound,
    DbError(String),
}

#[derive(PartialEq, Debug)]
pub enum MyTagsError {
    /// the requested tab is not one this endpoint serves
    BadTab,
    DbError(String),
}

#[derive(PartialEq, Debug)]
pub enum TagBooksError {
    TagNotFound,
    DbError(String),
}
