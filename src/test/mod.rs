use std::fs::remove_file;
use std::path::Path;

use crate::guard::Auth;
use crate::model::repository::Bookshelf;
use crate::repository::{initialize_db, open_connection, user_repository};
use crate::shelves::repository as shelf_repository;
use crate::tags::repository as tag_repository;

/// username:password
#[cfg(test)]
pub static AUTH: &str = "Basic dXNlcm5hbWU6cGFzc3dvcmQ=";

#[cfg(test)]
pub fn current_thread_name() -> String {
    let current_thread = std::thread::current();
    current_thread.name().unwrap().to_string()
}

#[cfg(test)]
pub fn refresh_db() {
    let thread_name = current_thread_name();
    remove_file(Path::new(format!("{thread_name}.sqlite").as_str())).unwrap_or(());
    initialize_db().unwrap();
}

#[cfg(test)]
pub fn cleanup() {
    let thread_name = current_thread_name();
    remove_file(Path::new(format!("{thread_name}.sqlite").as_str())).unwrap_or(());
}

#[cfg(test)]
pub fn create_user_db_entry(username: &str, password: &str) -> u32 {
    let auth = Auth {
        username: username.to_string(),
        password: password.to_string(),
    };
    let connection = open_connection();
    let id = user_repository::create_user(username, &auth.password_hash(), &connection).unwrap();
    connection.close().unwrap();
    id
}

/// books and tags have no write path in the server itself, so tests insert
/// them directly
#[cfg(test)]
pub fn create_book_db_entry(title: &str) -> u32 {
    create_book_db_entry_with_year(title, None)
}

#[cfg(test)]
pub fn create_book_db_entry_with_year(title: &str, year: Option<i32>) -> u32 {
    let connection = open_connection();
    connection
        .execute(
            "insert into Books (title, author, publicationYear) values (?1, 'unknown', ?2)",
            rusqlite::params![title, year],
        )
        .unwrap();
    let id = connection.last_insert_rowid() as u32;
    connection.close().unwrap();
    id
}

#[cfg(test)]
pub fn create_category_db_entry(name: &str, display_order: u32) -> u32 {
    let connection = open_connection();
    connection
        .execute(
            "insert into TagCategories (name, displayOrder) values (?1, ?2)",
            rusqlite::params![name, display_order],
        )
        .unwrap();
    let id = connection.last_insert_rowid() as u32;
    connection.close().unwrap();
    id
}

#[cfg(test)]
pub fn create_tag_db_entry(name: &str, category_id: u32) -> u32 {
    let connection = open_connection();
    connection
        .execute(
            "insert into Tags (name, categoryId) values (?1, ?2)",
            rusqlite::params![name, category_id],
        )
        .unwrap();
    let id = connection.last_insert_rowid() as u32;
    connection.close().unwrap();
    id
}

#[cfg(test)]
pub fn create_author_db_entry(name: &str, book_ids: Vec<u32>) -> u32 {
    let connection = open_connection();
    connection
        .execute(
            "insert into Authors (name) values (?1)",
            rusqlite::params![name],
        )
        .unwrap();
    let id = connection.last_insert_rowid() as u32;
    for (order, book_id) in book_ids.iter().enumerate() {
        connection
            .execute(
                "insert into BookAuthors (bookId, authorId, displayOrder) values (?1, ?2, ?3)",
                rusqlite::params![book_id, id, order as u32],
            )
            .unwrap();
    }
    connection.close().unwrap();
    id
}

#[cfg(test)]
pub fn create_vote_db_entry(book_id: u32, tag_id: u32, user_id: u32, value: i64) {
    let connection = open_connection();
    tag_repository::upsert_vote(book_id, tag_id, user_id, value, &connection).unwrap();
    connection.close().unwrap();
}

#[cfg(test)]
pub fn create_shelf_db_entry(user_id: u32, name: &str, display_order: u32) -> u32 {
    let connection = open_connection();
    let shelf = shelf_repository::create_shelf(
        &Bookshelf {
            id: None,
            user_id,
            name: name.to_string(),
            display_order,
        },
        &connection,
    )
    .unwrap();
    connection.close().unwrap();
    shelf.id.unwrap()
}

#[cfg(test)]
pub fn add_book_to_shelf(shelf_id: u32, book_id: u32) {
    let connection = open_connection();
    let now = chrono::offset::Local::now().naive_local();
    shelf_repository::add_shelf_book(shelf_id, book_id, now, &connection).unwrap();
    connection.close().unwrap();
}
