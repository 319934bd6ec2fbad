pub mod account_errors;
pub mod author_errors;
pub mod book_errors;
pub mod preference_errors;
pub mod shelf_errors;
pub mod tag_errors;
