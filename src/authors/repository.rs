use rusqlite::Connection;

use crate::model::repository::{Author, Book};

pub fn get_author(id: u32, con: &Connection) -> Result<Author, rusqlite::Error> {
    let mut pst = con.prepare(include_str!("../assets/queries/authors/get_author.sql"))?;
    pst.query_row(rusqlite::params![id], |row| {
        Ok(Author {
            id: row.get(0)?,
            name: row.get(1)?,
        })
    })
}

/// the author's books ordered by publication year, books without a year last
pub fn get_books_for_author(
    author_id: u32,
    con: &Connection,
) -> Result<Vec<Book>, rusqlite::Error> {
    let mut pst = con.prepare(include_str!(
        "../assets/queries/authors/books_for_author.sql"
    ))?;
    let rows = pst.query_map(rusqlite::params![author_id], |row| {
        Ok(Book {
            id: row.get(0)?,
            title: row.get(1)?,
            author: row.get(2)?,
            description: row.get(3)?,
            publication_year: row.get(4)?,
        })
    })?;
    rows.collect()
}
