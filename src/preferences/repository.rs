use chrono::NaiveDateTime;
use rusqlite::Connection;

use crate::model::repository::PreferenceRecord;
use crate::preferences::models::PreferenceField;

/// retrieves the preference row for a (user, tag) pair. `None` simply means
/// all three bits are false
pub fn get_preference(
    user_id: u32,
    tag_id: u32,
    con: &Connection,
) -> Result<Option<PreferenceRecord>, rusqlite::Error> {
    let mut pst = con.prepare(include_str!(
        "../assets/queries/preferences/get_preference.sql"
    ))?;
    match pst.query_row(rusqlite::params![user_id, tag_id], preference_mapper) {
        Ok(record) => Ok(Some(record)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e),
    }
}

pub fn create_preference(
    record: &PreferenceRecord,
    updated: NaiveDateTime,
    con: &Connection,
) -> Result<(), rusqlite::Error> {
    let mut pst = con.prepare(include_str!(
        "../assets/queries/preferences/create_preference.sql"
    ))?;
    pst.execute(rusqlite::params![
        record.user_id,
        record.tag_id,
        record.saved,
        record.followed,
        record.hidden,
        updated
    ])?;
    Ok(())
}

pub fn update_preference(
    record: &PreferenceRecord,
    updated: NaiveDateTime,
    con: &Connection,
) -> Result<(), rusqlite::Error> {
    let mut pst = con.prepare(include_str!(
        "../assets/queries/preferences/update_preference.sql"
    ))?;
    pst.execute(rusqlite::params![
        record.user_id,
        record.tag_id,
        record.saved,
        record.followed,
        record.hidden,
        updated
    ])?;
    Ok(())
}

/// removes the row outright; a preference with no set bits is never stored
pub fn delete_preference(
    user_id: u32,
    tag_id: u32,
    con: &Connection,
) -> Result<(), rusqlite::Error> {
    let mut pst = con.prepare(include_str!(
        "../assets/queries/preferences/delete_preference.sql"
    ))?;
    pst.execute(rusqlite::params![user_id, tag_id])?;
    Ok(())
}

/// the tags a user holds the passed bit for, most recently toggled first.
/// Returns (tagId, updatedDate) pairs
pub fn get_preferred_tags(
    user_id: u32,
    field: PreferenceField,
    con: &Connection,
) -> Result<Vec<(u32, String)>, rusqlite::Error> {
    let formatted_query = format!(
        include_str!("../assets/queries/preferences/preferred_tags.sql"),
        field.column()
    );
    let mut pst = con.prepare(formatted_query.as_str())?;
    let rows = pst.query_map(rusqlite::params![user_id], |row| {
        Ok((row.get::<usize, u32>(0)?, row.get::<usize, String>(1)?))
    })?;
    rows.collect()
}

/// 1. userId
/// 2. tagId
/// 3. saved
/// 4. followed
/// 5. hidden
fn preference_mapper(row: &rusqlite::Row) -> Result<PreferenceRecord, rusqlite::Error> {
    Ok(PreferenceRecord {
        user_id: row.get(0)?,
        tag_id: row.get(1)?,
        saved: row.get(2)?,
        followed: row.get(3)?,
        hidden: row.get(4)?,
    })
}
