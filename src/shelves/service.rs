use std::backtrace::Backtrace;
use std::collections::{HashMap, HashSet};

use itertools::Itertools;

use crate::books::repository as book_repository;
use crate::books::service::parse_id_list;
use crate::model::error::shelf_errors::{
    CreateShelfError, GetShelvesError, SaveShelvesError, ShelfBookError, ShelfBooksError,
};
use crate::model::repository::Bookshelf;
use crate::model::request::book_requests::ShelfBooksParams;
use crate::model::request::shelf_requests::{SaveShelvesRequest, ShelfBookRequest};
use crate::model::response::shelf_responses::{ShelfApi, ShelfBookApi, ShelfBookListApi};
use crate::repository::is_constraint_violation;
use crate::scoring;
use crate::shelves::repository as shelf_repository;
use crate::tags::repository as tag_repository;

/// the caller's shelves in display order; with a book id, each carries
/// whether that book is on it
pub fn get_shelves(user_id: u32, book_id: Option<u32>) -> Result<Vec<ShelfApi>, GetShelvesError> {
    let con = crate::repository::open_connection();
    let shelves = match shelf_repository::get_shelves_for_user(user_id, &con) {
        Ok(s) => s,
        Err(e) => {
            log::error!(
                "Failed to retrieve shelves for user {user_id}! Error is {e:?}\n{}",
                Backtrace::force_capture()
            );
            con.close().unwrap();
            return Err(GetShelvesError::DbError(e.to_string()));
        }
    };
    let containing: Option<HashSet<u32>> = match book_id {
        Some(book_id) => {
            match shelf_repository::get_shelves_containing_book(user_id, book_id, &con) {
                Ok(ids) => Some(ids.into_iter().collect()),
                Err(e) => {
                    log::error!(
                        "Failed to check shelf membership for book {book_id}! Error is {e:?}\n{}",
                        Backtrace::force_capture()
                    );
                    con.close().unwrap();
                    return Err(GetShelvesError::DbError(e.to_string()));
                }
            }
        }
        None => None,
    };
    con.close().unwrap();
    Ok(shelves
        .into_iter()
        .map_into::<ShelfApi>()
        .map(|mut shelf| {
            if let Some(containing) = &containing {
                shelf.has_book = Some(containing.contains(&shelf.id));
            }
            shelf
        })
        .collect())
}

/// creates a shelf at the end of the caller's display order
pub fn create_shelf(user_id: u32, name: String) -> Result<ShelfApi, CreateShelfError> {
    let name = name.trim().to_string();
    if name.is_empty() {
        return Err(CreateShelfError::BadName);
    }
    let con = crate::repository::open_connection();
    let display_order = match shelf_repository::next_display_order(user_id, &con) {
        Ok(order) => order,
        Err(e) => {
            log::error!(
                "Failed to determine next shelf position for user {user_id}! Error is {e:?}\n{}",
                Backtrace::force_capture()
            );
            con.close().unwrap();
            return Err(CreateShelfError::DbError(e.to_string()));
        }
    };
    let created = shelf_repository::create_shelf(
        &Bookshelf {
            id: None,
            user_id,
            name,
            display_order,
        },
        &con,
    );
    con.close().unwrap();
    match created {
        Ok(shelf) => Ok(ShelfApi::from(shelf)),
        // the unique constraint on (userId, name) is the duplicate check
        Err(e) if is_constraint_violation(&e) => Err(CreateShelfError::NameTaken),
        Err(e) => {
            log::error!(
                "Failed to create shelf for user {user_id}! Error is {e:?}\n{}",
                Backtrace::force_capture()
            );
            Err(CreateShelfError::DbError(e.to_string()))
        }
    }
}

/// bulk-saves the caller's shelf list: entries without an id are created,
/// shelves missing from the list are deleted, and the array order becomes the
/// display order
pub fn save_shelves(
    user_id: u32,
    request: SaveShelvesRequest,
) -> Result<Vec<ShelfApi>, SaveShelvesError> {
    let entries = request.shelves;
    if entries.is_empty() {
        return Err(SaveShelvesError::EmptyList);
    }
    if entries.iter().any(|entry| entry.name.trim().is_empty()) {
        return Err(SaveShelvesError::BadName);
    }
    let names: HashSet<String> = entries
        .iter()
        .map(|entry| entry.name.trim().to_lowercase())
        .collect();
    if names.len() != entries.len() {
        return Err(SaveShelvesError::DuplicateNames);
    }
    let con = crate::repository::open_connection();
    let current = match shelf_repository::get_shelves_for_user(user_id, &con) {
        Ok(s) => s,
        Err(e) => {
            log::error!(
                "Failed to retrieve shelves for user {user_id}! Error is {e:?}\n{}",
                Backtrace::force_capture()
            );
            con.close().unwrap();
            return Err(SaveShelvesError::DbError(e.to_string()));
        }
    };
    let current_ids: HashSet<u32> = current.iter().filter_map(|shelf| shelf.id).collect();
    // an id we don't recognize is either someone else's shelf or long gone
    if entries
        .iter()
        .filter_map(|entry| entry.id)
        .any(|id| !current_ids.contains(&id))
    {
        con.close().unwrap();
        return Err(SaveShelvesError::ShelfNotFound);
    }
    let kept_ids: HashSet<u32> = entries.iter().filter_map(|entry| entry.id).collect();
    let to_delete: Vec<u32> = current_ids
        .iter()
        .filter(|id| !kept_ids.contains(id))
        .copied()
        .collect();
    if let Err(e) = shelf_repository::delete_shelves(&to_delete, &con) {
        log::error!(
            "Failed to delete shelves for user {user_id}! Error is {e:?}\n{}",
            Backtrace::force_capture()
        );
        con.close().unwrap();
        return Err(SaveShelvesError::DbError(e.to_string()));
    }
    for (position, entry) in entries.iter().enumerate() {
        let name = entry.name.trim();
        let result = match entry.id {
            Some(id) => shelf_repository::update_shelf(id, name, position as u32, &con),
            None => shelf_repository::create_shelf(
                &Bookshelf {
                    id: None,
                    user_id,
                    name: name.to_string(),
                    display_order: position as u32,
                },
                &con,
            )
            .map(|_| ()),
        };
        if let Err(e) = result {
            log::error!(
                "Failed to save shelf {name} for user {user_id}! Error is {e:?}\n{}",
                Backtrace::force_capture()
            );
            con.close().unwrap();
            return Err(SaveShelvesError::DbError(e.to_string()));
        }
    }
    // hand back the list as it now reads from the store
    let saved = match shelf_repository::get_shelves_for_user(user_id, &con) {
        Ok(s) => s,
        Err(e) => {
            log::error!(
                "Failed to re-read shelves for user {user_id}! Error is {e:?}\n{}",
                Backtrace::force_capture()
            );
            con.close().unwrap();
            return Err(SaveShelvesError::DbError(e.to_string()));
        }
    };
    con.close().unwrap();
    Ok(saved.into_iter().map_into().collect())
}

/// puts a book on (or takes it off) one of the caller's shelves
pub fn set_shelf_book(
    user_id: u32,
    shelf_id: u32,
    request: ShelfBookRequest,
) -> Result<(), ShelfBookError> {
    if request.action != "add" && request.action != "remove" {
        return Err(ShelfBookError::BadAction);
    }
    let con = crate::repository::open_connection();
    match shelf_repository::get_shelf_for_user(shelf_id, user_id, &con) {
        Ok(Some(_)) => { /* no op */ }
        Ok(None) => {
            con.close().unwrap();
            return Err(ShelfBookError::ShelfNotFound);
        }
        Err(e) => {
            log::error!(
                "Failed to retrieve shelf {shelf_id}! Error is {e:?}\n{}",
                Backtrace::force_capture()
            );
            con.close().unwrap();
            return Err(ShelfBookError::DbError(e.to_string()));
        }
    };
    if let Err(e) = book_repository::get_book(request.book_id, &con) {
        con.close().unwrap();
        return Err(match e {
            rusqlite::Error::QueryReturnedNoRows => ShelfBookError::BookNotFound,
            _ => ShelfBookError::DbError(e.to_string()),
        });
    }
    let result = if request.action == "add" {
        let now = chrono::offset::Local::now().naive_local();
        shelf_repository::add_shelf_book(shelf_id, request.book_id, now, &con)
    } else {
        shelf_repository::remove_shelf_book(shelf_id, request.book_id, &con)
    };
    con.close().unwrap();
    match result {
        Ok(()) => Ok(()),
        // a duplicate add surfaces as the unique constraint firing
        Err(e) if is_constraint_violation(&e) => Err(ShelfBookError::AlreadyOnShelf),
        Err(e) => {
            log::error!(
                "Failed to {} book {} for shelf {shelf_id}! Error is {e:?}\n{}",
                request.action,
                request.book_id,
                Backtrace::force_capture()
            );
            Err(ShelfBookError::DbError(e.to_string()))
        }
    }
}

/// the books on one of the caller's shelves, run through the same title /
/// year / tag filters as explore, sorted by when they were shelved unless
/// asked otherwise
pub fn shelf_books(
    user_id: u32,
    shelf_id: u32,
    params: ShelfBooksParams,
) -> Result<ShelfBookListApi, ShelfBooksError> {
    let con = crate::repository::open_connection();
    match shelf_repository::get_shelf_for_user(shelf_id, user_id, &con) {
        Ok(Some(_)) => { /* no op */ }
        Ok(None) => {
            con.close().unwrap();
            return Err(ShelfBooksError::ShelfNotFound);
        }
        Err(e) => {
            log::error!(
                "Failed to retrieve shelf {shelf_id}! Error is {e:?}\n{}",
                Backtrace::force_capture()
            );
            con.close().unwrap();
            return Err(ShelfBooksError::DbError(e.to_string()));
        }
    };
    let memberships = match shelf_repository::get_shelf_books(shelf_id, &con) {
        Ok(m) => m,
        Err(e) => {
            log::error!(
                "Failed to retrieve books on shelf {shelf_id}! Error is {e:?}\n{}",
                Backtrace::force_capture()
            );
            con.close().unwrap();
            return Err(ShelfBooksError::DbError(e.to_string()));
        }
    };
    if memberships.is_empty() {
        con.close().unwrap();
        return Ok(ShelfBookListApi {
            books: Vec::new(),
            total: 0,
        });
    }
    let added_dates: HashMap<u32, chrono::NaiveDateTime> = memberships
        .iter()
        .map(|membership| (membership.book_id, membership.added_date))
        .collect();
    let book_ids: Vec<u32> = memberships.iter().map(|m| m.book_id).collect();
    let books = match book_repository::get_books_by_ids(&book_ids, &con) {
        Ok(b) => b,
        Err(e) => {
            log::error!(
                "Failed to retrieve books on shelf {shelf_id}! Error is {e:?}\n{}",
                Backtrace::force_capture()
            );
            con.close().unwrap();
            return Err(ShelfBooksError::DbError(e.to_string()));
        }
    };
    // title and year filters first, cheap and in memory
    let title_query = params.q.unwrap_or_default().trim().to_lowercase();
    let books: Vec<_> = books
        .into_iter()
        .filter(|book| {
            if !title_query.is_empty() && !book.title.to_lowercase().contains(&title_query) {
                return false;
            }
            match (params.year_from, book.publication_year) {
                (Some(from), Some(year)) if year < from => return false,
                (Some(_), None) => return false,
                _ => {}
            }
            match (params.year_to, book.publication_year) {
                (Some(to), Some(year)) if year > to => return false,
                (Some(_), None) => return false,
                _ => {}
            }
            true
        })
        .collect();
    // then the include/exclude tag filter, same as explore
    let include = parse_id_list(params.include.as_deref());
    let exclude = parse_id_list(params.exclude.as_deref());
    let books = if include.is_empty() && exclude.is_empty() {
        con.close().unwrap();
        books
    } else {
        let remaining_ids: Vec<u32> = books.iter().map(|b| b.id).collect();
        let votes = match tag_repository::get_votes_for_books(&remaining_ids, &con) {
            Ok(v) => v,
            Err(e) => {
                log::error!(
                    "Failed to retrieve votes for shelf {shelf_id}! Error is {e:?}\n{}",
                    Backtrace::force_capture()
                );
                con.close().unwrap();
                return Err(ShelfBooksError::DbError(e.to_string()));
            }
        };
        con.close().unwrap();
        let scores_by_book = scoring::scores_by_book_and_tag(&votes);
        let empty: HashMap<u32, i64> = HashMap::new();
        books
            .into_iter()
            .filter(|book| {
                let scores = scores_by_book.get(&book.id).unwrap_or(&empty);
                scoring::passes_filter(scores, &include, &exclude)
            })
            .collect()
    };
    let mut result: Vec<ShelfBookApi> = books
        .into_iter()
        .map(|book| {
            let added_at = added_dates
                .get(&book.id)
                .map(|added| added.format("%Y-%m-%dT%H:%M:%S").to_string())
                .unwrap_or_default();
            ShelfBookApi {
                id: book.id,
                title: book.title,
                author: book.author,
                publication_year: book.publication_year,
                added_at,
            }
        })
        .collect();
    let sort = params.sort.unwrap_or_else(|| "added_at".to_string());
    let descending = params.dir.as_deref() != Some("asc");
    result.sort_by(|a, b| {
        let ordering = match sort.as_str() {
            "title" => a.title.cmp(&b.title),
            "publication_year" => a.publication_year.cmp(&b.publication_year),
            // added_at is the default sort
            _ => a.added_at.cmp(&b.added_at),
        };
        let ordering = if descending { ordering.reverse() } else { ordering };
        ordering.then(a.id.cmp(&b.id))
    });
    let total = result.len();
    Ok(ShelfBookListApi {
        books: result,
        total,
    })
}
