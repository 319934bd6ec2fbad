use rusqlite::Connection;

use crate::model::repository::Book;

pub fn get_book(id: u32, con: &Connection) -> Result<Book, rusqlite::Error> {
    let mut pst = con.prepare(include_str!("../assets/queries/books/get_book.sql"))?;
    pst.query_row(rusqlite::params![id], book_mapper)
}

/// pulls the passed books in one query. Ids that don't resolve are silently
/// absent from the result
pub fn get_books_by_ids(book_ids: &[u32], con: &Connection) -> Result<Vec<Book>, rusqlite::Error> {
    if book_ids.is_empty() {
        return Ok(Vec::new());
    }
    let in_clause: Vec<String> = book_ids.iter().map(|it| it.to_string()).collect();
    let formatted_query = format!(
        include_str!("../assets/queries/books/get_books_by_ids.sql"),
        in_clause.join(",")
    );
    let mut pst = con.prepare(formatted_query.as_str())?;
    let rows = pst.query_map([], book_mapper)?;
    rows.collect()
}

/// case-insensitively searches book titles for the passed text
pub fn search_books(
    query: &str,
    limit: u32,
    con: &Connection,
) -> Result<Vec<Book>, rusqlite::Error> {
    let mut pst = con.prepare(include_str!("../assets/queries/books/search_books.sql"))?;
    let rows = pst.query_map(rusqlite::params![query, limit], book_mapper)?;
    rows.collect()
}

/// every book inside the (optional) publication year bounds
pub fn get_books_in_year_range(
    year_from: Option<i32>,
    year_to: Option<i32>,
    con: &Connection,
) -> Result<Vec<Book>, rusqlite::Error> {
    let mut pst = con.prepare(include_str!(
        "../assets/queries/books/books_in_year_range.sql"
    ))?;
    let rows = pst.query_map(rusqlite::params![year_from, year_to], book_mapper)?;
    rows.collect()
}

/// 1. id
/// 2. title
/// 3. author
/// 4. description
/// 5. publicationYear
fn book_mapper(row: &rusqlite::Row) -> Result<Book, rusqlite::Error> {
    Ok(Book {
        id: row.get(0)?,
        title: row.get(1)?,
        author: row.get(2)?,
        description: row.get(3)?,
        publication_year: row.get(4)?,
    })
}
