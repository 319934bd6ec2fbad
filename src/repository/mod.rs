use std::path::Path;

#[cfg(not(test))]
use rusqlite::OpenFlags;
use rusqlite::{Connection, Result};

pub mod metadata_repository;
pub mod user_repository;

/// creates a new connection and returns it, but panics if the connection could not be created
#[cfg(not(test))]
pub fn open_connection() -> Connection {
    use crate::config::BOOK_SERVER_CONFIG;

    match Connection::open_with_flags(
        Path::new(BOOK_SERVER_CONFIG.clone().database.location.as_str()),
        OpenFlags::default(),
    ) {
        Ok(con) => {
            // sqlite leaves foreign keys off unless told otherwise, and the
            // schema relies on cascading deletes
            con.pragma_update(None, "foreign_keys", true).unwrap();
            con
        }
        Err(error) => panic!("Failed to get a connection to the database!: {error}"),
    }
}

#[cfg(test)]
pub fn open_connection() -> Connection {
    let db_name = format!("{}.sqlite", crate::test::current_thread_name());
    match Connection::open_with_flags(Path::new(db_name.as_str()), rusqlite::OpenFlags::default()) {
        Ok(con) => {
            con.pragma_update(None, "foreign_keys", true).unwrap();
            con
        }
        Err(error) => panic!("Failed to get a connection to the database!: {error}"),
    }
}

/// runs init.sql on the database
fn create_db(con: &mut Connection) {
    let sql = include_str!("../assets/init.sql");
    con.execute_batch(sql).unwrap();
}

/// handles checking if the database exists and is at the current version,
/// creating the schema when it isn't there yet
pub fn initialize_db() -> Result<()> {
    let mut con = open_connection();
    // version is unused until there's a second version of the schema to
    // migrate between
    if metadata_repository::get_version(&con).is_err() {
        create_db(&mut con);
    }
    con.close().unwrap();
    Ok(())
}

/// checks whether the passed error is the store signaling a violated unique
/// constraint. Duplicate-insert races are detected through this rather than
/// by pre-checking existence
pub fn is_constraint_violation(e: &rusqlite::Error) -> bool {
    matches!(
        e,
        rusqlite::Error::SqliteFailure(inner, _)
            if inner.code == rusqlite::ErrorCode::ConstraintViolation
    )
}
