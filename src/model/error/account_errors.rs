#[derive(PartialEq, Debug)]
pub enum CreateUserError {
    /// the username fails the length or charset rules
    BadUsername,
    /// the password is too short
    BadPassword,
    /// another account already holds that username
    UsernameTaken,
    /// an error with the database
    DbError(String),
}

#[derive(PartialEq, Debug)]
pub enum UpdateAccountError {
    BadUsername,
    BadPassword,
    UsernameTaken,
    DbError(String),
}

#[derive(PartialEq, Debug)]
pub enum DeleteAccountError {
    DbError(String),
}
