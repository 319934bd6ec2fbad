use rusqlite::Connection;

/// retrieves the schema version from the metadata table. An error here means
/// the tables have not been created yet
pub fn get_version(con: &Connection) -> Result<String, rusqlite::Error> {
    let mut pst = con.prepare(include_str!("../assets/queries/metadata/get_version.sql"))?;
    pst.query_row([], |row| row.get(0))
}
