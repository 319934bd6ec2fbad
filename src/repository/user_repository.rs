use rusqlite::Connection;

/// creates a new account row. Username uniqueness is enforced by the table
/// constraint; callers translate that violation instead of pre-checking
pub fn create_user(
    username: &str,
    password_hash: &str,
    con: &Connection,
) -> Result<u32, rusqlite::Error> {
    let mut pst = con.prepare(include_str!("../assets/queries/users/create_user.sql"))?;
    let id = pst.insert(rusqlite::params![username, password_hash])? as u32;
    Ok(id)
}

/// looks up the account matching the passed credentials.
/// `None` means the username doesn't exist or the password doesn't match
pub fn find_by_credentials(
    username: &str,
    password_hash: &str,
    con: &Connection,
) -> Result<Option<u32>, rusqlite::Error> {
    let mut pst = con.prepare(include_str!(
        "../assets/queries/users/find_by_credentials.sql"
    ))?;
    match pst.query_row(rusqlite::params![username, password_hash], |row| {
        row.get::<usize, u32>(0)
    }) {
        Ok(id) => Ok(Some(id)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e),
    }
}

pub fn update_username(id: u32, username: &str, con: &Connection) -> Result<(), rusqlite::Error> {
    let mut pst = con.prepare(include_str!("../assets/queries/users/update_username.sql"))?;
    pst.execute(rusqlite::params![username, id])?;
    Ok(())
}

pub fn update_password(
    id: u32,
    password_hash: &str,
    con: &Connection,
) -> Result<(), rusqlite::Error> {
    let mut pst = con.prepare(include_str!("../assets/queries/users/update_password.sql"))?;
    pst.execute(rusqlite::params![password_hash, id])?;
    Ok(())
}

/// removes the account row. Votes, preferences and shelves go with it through
/// the cascading foreign keys
pub fn delete_user(id: u32, con: &Connection) -> Result<(), rusqlite::Error> {
    let mut pst = con.prepare(include_str!("../assets/queries/users/delete_user.sql"))?;
    pst.execute(rusqlite::params![id])?;
    Ok(())
}
