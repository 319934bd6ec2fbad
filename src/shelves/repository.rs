use chrono::NaiveDateTime;
use rusqlite::Connection;

use crate::model::repository::{Bookshelf, ShelfBook};

pub fn get_shelves_for_user(
    user_id: u32,
    con: &Connection,
) -> Result<Vec<Bookshelf>, rusqlite::Error> {
    let mut pst = con.prepare(include_str!(
        "../assets/queries/shelves/get_shelves_for_user.sql"
    ))?;
    let rows = pst.query_map(rusqlite::params![user_id], shelf_mapper)?;
    rows.collect()
}

/// retrieves a shelf only if it belongs to the passed user; somebody else's
/// shelf comes back as `None` just like a missing one
pub fn get_shelf_for_user(
    shelf_id: u32,
    user_id: u32,
    con: &Connection,
) -> Result<Option<Bookshelf>, rusqlite::Error> {
    let mut pst = con.prepare(include_str!(
        "../assets/queries/shelves/get_shelf_for_user.sql"
    ))?;
    match pst.query_row(rusqlite::params![shelf_id, user_id], shelf_mapper) {
        Ok(shelf) => Ok(Some(shelf)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e),
    }
}

/// creates a shelf record. Name uniqueness per user is enforced by the table
/// constraint; callers translate that violation instead of pre-checking
pub fn create_shelf(shelf: &Bookshelf, con: &Connection) -> Result<Bookshelf, rusqlite::Error> {
    let mut pst = con.prepare(include_str!("../assets/queries/shelves/create_shelf.sql"))?;
    let id = pst.insert(rusqlite::params![
        shelf.user_id,
        shelf.name,
        shelf.display_order
    ])? as u32;
    Ok(Bookshelf {
        id: Some(id),
        user_id: shelf.user_id,
        name: shelf.name.clone(),
        display_order: shelf.display_order,
    })
}

pub fn update_shelf(
    id: u32,
    name: &str,
    display_order: u32,
    con: &Connection,
) -> Result<(), rusqlite::Error> {
    let mut pst = con.prepare(include_str!("../assets/queries/shelves/update_shelf.sql"))?;
    pst.execute(rusqlite::params![id, name, display_order])?;
    Ok(())
}

pub fn delete_shelves(shelf_ids: &[u32], con: &Connection) -> Result<(), rusqlite::Error> {
    if shelf_ids.is_empty() {
        return Ok(());
    }
    let in_clause: Vec<String> = shelf_ids.iter().map(|it| it.to_string()).collect();
    let formatted_query = format!(
        include_str!("../assets/queries/shelves/delete_shelves.sql"),
        in_clause.join(",")
    );
    con.execute(formatted_query.as_str(), [])?;
    Ok(())
}

/// the display order a shelf appended at the end of the user's list gets
pub fn next_display_order(user_id: u32, con: &Connection) -> Result<u32, rusqlite::Error> {
    let mut pst = con.prepare(include_str!(
        "../assets/queries/shelves/next_display_order.sql"
    ))?;
    pst.query_row(rusqlite::params![user_id], |row| row.get(0))
}

pub fn add_shelf_book(
    shelf_id: u32,
    book_id: u32,
    added: NaiveDateTime,
    con: &Connection,
) -> Result<(), rusqlite::Error> {
    let mut pst = con.prepare(include_str!("../assets/queries/shelves/add_shelf_book.sql"))?;
    pst.execute(rusqlite::params![shelf_id, book_id, added])?;
    Ok(())
}

pub fn remove_shelf_book(
    shelf_id: u32,
    book_id: u32,
    con: &Connection,
) -> Result<(), rusqlite::Error> {
    let mut pst = con.prepare(include_str!(
        "../assets/queries/shelves/remove_shelf_book.sql"
    ))?;
    pst.execute(rusqlite::params![shelf_id, book_id])?;
    Ok(())
}

pub fn get_shelf_books(shelf_id: u32, con: &Connection) -> Result<Vec<ShelfBook>, rusqlite::Error> {
    let mut pst = con.prepare(include_str!("../assets/queries/shelves/get_shelf_books.sql"))?;
    let rows = pst.query_map(rusqlite::params![shelf_id], |row| {
        Ok(ShelfBook {
            book_id: row.get(0)?,
            added_date: row.get(1)?,
        })
    })?;
    rows.collect()
}

/// which of the user's shelves hold the passed book
pub fn get_shelves_containing_book(
    user_id: u32,
    book_id: u32,
    con: &Connection,
) -> Result<Vec<u32>, rusqlite::Error> {
    let mut pst = con.prepare(include_str!(
        "../assets/queries/shelves/shelves_containing_book.sql"
    ))?;
    let rows = pst.query_map(rusqlite::params![user_id, book_id], |row| row.get(0))?;
    rows.collect()
}

/// 1. id
/// 2. userId
/// 3. name
/// 4. displayOrder
fn shelf_mapper(row: &rusqlite::Row) -> Result<Bookshelf, rusqlite::Error> {
    Ok(Bookshelf {
        id: Some(row.get(0)?),
        user_id: row.get(1)?,
        name: row.get(2)?,
        display_order: row.get(3)?,
    })
}
