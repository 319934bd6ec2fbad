#[derive(PartialEq, Debug)]
pub enum GetPreferencesError {
    /// the tag was not found
    TagNotFound,
    DbError(String),
}

#[derive(PartialEq, Debug)]
pub enum TogglePreferenceError {
    /// the field is not one of the three preference bits
    BadField,
    TagNotFound,
    DbError(String),
}
