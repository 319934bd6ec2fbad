#[derive(PartialEq, Debug)]
pub enum GetAuthorError {
    /// the author was not found
    AuthorNotFound,
    /// the requested tab is not one this endpoint serves
    BadTab,
    DbError(String),
}
