use std::backtrace::Backtrace;
use std::collections::{HashMap, HashSet};

use itertools::Itertools;

use crate::books::repository as book_repository;
use crate::config::BOOK_SERVER_CONFIG;
use crate::model::error::book_errors::{
    BookShelvesError, BookTagsError, ExploreError, GetBookError, SearchBookError,
};
use crate::model::request::book_requests::ExploreParams;
use crate::model::response::book_responses::{
    BookApi, BookShelvesApi, BookSummaryApi, BookTagsApi, ExploreBookApi, ExploreListApi,
};
use crate::model::response::shelf_responses::ShelfApi;
use crate::model::response::tag_responses::{BookTagApi, GroupedCategoryApi};
use crate::scoring;
use crate::shelves::repository as shelf_repository;
use crate::tags::repository as tag_repository;

/// will return the book with the passed id
pub fn get_book(id: u32) -> Result<BookApi, GetBookError> {
    let con = crate::repository::open_connection();
    let book = match book_repository::get_book(id, &con) {
        Ok(b) => b,
        Err(rusqlite::Error::QueryReturnedNoRows) => {
            con.close().unwrap();
            return Err(GetBookError::BookNotFound);
        }
        Err(e) => {
            log::error!(
                "Could not retrieve book with id {id}! Error is {e:?}\n{}",
                Backtrace::force_capture()
            );
            con.close().unwrap();
            return Err(GetBookError::DbError(e.to_string()));
        }
    };
    con.close().unwrap();
    Ok(BookApi::from(book))
}

/// searches books by title. An empty search returns an empty list without
/// touching the database
pub fn search_books(query: String) -> Result<Vec<BookSummaryApi>, SearchBookError> {
    let query = query.trim().to_string();
    if query.is_empty() {
        return Ok(Vec::new());
    }
    let con = crate::repository::open_connection();
    let limit = BOOK_SERVER_CONFIG.search.result_limit;
    let found = match book_repository::search_books(&query, limit, &con) {
        Ok(books) => books,
        Err(e) => {
            log::error!(
                "Failed to search books with query {query}! Error is {e:?}\n{}",
                Backtrace::force_capture()
            );
            con.close().unwrap();
            return Err(SearchBookError::DbError(e.to_string()));
        }
    };
    con.close().unwrap();
    Ok(found
        .into_iter()
        .map(|book| BookSummaryApi {
            id: book.id,
            title: book.title,
            author: book.author,
        })
        .collect())
}

/// the tags on one book grouped by category, each with its net score and the
/// calling user's own vote. Only tags somebody has voted on appear
pub fn get_book_tags(book_id: u32, user: Option<u32>) -> Result<BookTagsApi, BookTagsError> {
    let con = crate::repository::open_connection();
    if let Err(e) = book_repository::get_book(book_id, &con) {
        con.close().unwrap();
        return Err(match e {
            rusqlite::Error::QueryReturnedNoRows => BookTagsError::BookNotFound,
            _ => BookTagsError::DbError(e.to_string()),
        });
    }
    let votes = match tag_repository::get_votes_for_book(book_id, &con) {
        Ok(v) => v,
        Err(e) => {
            log::error!(
                "Failed to retrieve votes for book {book_id}! Error is {e:?}\n{}",
                Backtrace::force_capture()
            );
            con.close().unwrap();
            return Err(BookTagsError::DbError(e.to_string()));
        }
    };
    let scores = scoring::score_by_tag(&votes);
    // the caller's own value per tag, computed in the same pass shape as the
    // aggregate so both always agree
    let mut user_values: HashMap<u32, i64> = HashMap::new();
    if let Some(user_id) = user {
        for vote in votes.iter().filter(|v| v.user_id == user_id) {
            *user_values.entry(vote.tag_id).or_insert(0) += vote.value;
        }
    }
    let tag_ids: Vec<u32> = scores.keys().copied().collect();
    let tags = match tag_repository::get_tags_with_categories(&tag_ids, &con) {
        Ok(t) => t,
        Err(e) => {
            log::error!(
                "Failed to retrieve tags for book {book_id}! Error is {e:?}\n{}",
                Backtrace::force_capture()
            );
            con.close().unwrap();
            return Err(BookTagsError::DbError(e.to_string()));
        }
    };
    con.close().unwrap();
    let mut grouped: HashMap<u32, GroupedCategoryApi> = HashMap::new();
    for (tag, category) in tags {
        let entry = grouped
            .entry(category.id)
            .or_insert_with(|| GroupedCategoryApi {
                category_id: category.id,
                category_name: category.name.clone(),
                display_order: category.display_order,
                tags: Vec::new(),
            });
        entry.tags.push(BookTagApi {
            score: *scores.get(&tag.id).unwrap_or(&0),
            user_value: *user_values.get(&tag.id).unwrap_or(&0),
            id: tag.id,
            name: tag.name,
            description: tag.description,
            category_id: tag.category_id,
            category_name: category.name,
            category_display_order: category.display_order,
        });
    }
    let mut categories: Vec<GroupedCategoryApi> = grouped.into_values().collect();
    for category in categories.iter_mut() {
        category
            .tags
            .sort_by(|a, b| b.score.cmp(&a.score).then(a.id.cmp(&b.id)));
    }
    categories.sort_by(|a, b| {
        a.display_order
            .cmp(&b.display_order)
            .then(a.category_id.cmp(&b.category_id))
    });
    Ok(BookTagsApi { categories })
}

/// the explore filter: keeps books whose include tags are all net positive
/// and whose exclude tags are not, then ranks by the requested sort
pub fn explore(params: ExploreParams) -> Result<ExploreListApi, ExploreError> {
    let include = parse_id_list(params.include.as_deref());
    let exclude = parse_id_list(params.exclude.as_deref());
    let sort = params.sort.unwrap_or_else(|| "best_match".to_string());
    let con = crate::repository::open_connection();
    let books = match book_repository::get_books_in_year_range(params.year_from, params.year_to, &con)
    {
        Ok(b) => b,
        Err(e) => {
            log::error!(
                "Failed to retrieve books for explore! Error is {e:?}\n{}",
                Backtrace::force_capture()
            );
            con.close().unwrap();
            return Err(ExploreError::DbError(e.to_string()));
        }
    };
    if books.is_empty() {
        con.close().unwrap();
        return Ok(ExploreListApi {
            books: Vec::new(),
            total: 0,
        });
    }
    let book_ids: Vec<u32> = books.iter().map(|b| b.id).collect();
    let votes = match tag_repository::get_votes_for_books(&book_ids, &con) {
        Ok(v) => v,
        Err(e) => {
            log::error!(
                "Failed to retrieve votes for explore! Error is {e:?}\n{}",
                Backtrace::force_capture()
            );
            con.close().unwrap();
            return Err(ExploreError::DbError(e.to_string()));
        }
    };
    con.close().unwrap();
    let scores_by_book = scoring::scores_by_book_and_tag(&votes);
    let empty: HashMap<u32, i64> = HashMap::new();
    let mut result: Vec<ExploreBookApi> = books
        .into_iter()
        .filter_map(|book| {
            let scores = scores_by_book.get(&book.id).unwrap_or(&empty);
            if !scoring::passes_filter(scores, &include, &exclude) {
                return None;
            }
            Some(ExploreBookApi {
                match_score: scoring::match_score(scores, &include),
                popularity: scoring::popularity(scores),
                id: book.id,
                title: book.title,
                author: book.author,
                description: book.description,
                publication_year: book.publication_year,
            })
        })
        .collect();
    // best_match only means something when there are include tags to match
    if sort == "best_match" && !include.is_empty() {
        result.sort_by(|a, b| b.match_score.cmp(&a.match_score).then(a.id.cmp(&b.id)));
    } else {
        result.sort_by(|a, b| b.popularity.cmp(&a.popularity).then(a.id.cmp(&b.id)));
    }
    let total = result.len();
    Ok(ExploreListApi {
        books: result,
        total,
    })
}

/// the caller's shelves with a membership flag for one book, plus the shelf a
/// bare "add" button should target (the first one in display order)
pub fn get_book_shelves(user_id: u32, book_id: u32) -> Result<BookShelvesApi, BookShelvesError> {
    let con = crate::repository::open_connection();
    if let Err(e) = book_repository::get_book(book_id, &con) {
        con.close().unwrap();
        return Err(match e {
            rusqlite::Error::QueryReturnedNoRows => BookShelvesError::BookNotFound,
            _ => BookShelvesError::DbError(e.to_string()),
        });
    }
    let shelves = match shelf_repository::get_shelves_for_user(user_id, &con) {
        Ok(s) => s,
        Err(e) => {
            log::error!(
                "Failed to retrieve shelves for user {user_id}! Error is {e:?}\n{}",
                Backtrace::force_capture()
            );
            con.close().unwrap();
            return Err(BookShelvesError::DbError(e.to_string()));
        }
    };
    let containing: HashSet<u32> =
        match shelf_repository::get_shelves_containing_book(user_id, book_id, &con) {
            Ok(ids) => ids.into_iter().collect(),
            Err(e) => {
                log::error!(
                    "Failed to check shelf membership for book {book_id}! Error is {e:?}\n{}",
                    Backtrace::force_capture()
                );
                con.close().unwrap();
                return Err(BookShelvesError::DbError(e.to_string()));
            }
        };
    con.close().unwrap();
    let default_shelf_id = shelves
        .iter()
        .find(|s| s.display_order == 0)
        .and_then(|s| s.id);
    let shelves: Vec<ShelfApi> = shelves
        .into_iter()
        .map_into::<ShelfApi>()
        .map(|mut shelf| {
            shelf.has_book = Some(containing.contains(&shelf.id));
            shelf
        })
        .collect();
    Ok(BookShelvesApi {
        shelves,
        default_shelf_id,
    })
}

/// splits a comma-separated id list, dropping anything that isn't a number
pub fn parse_id_list(raw: Option<&str>) -> Vec<u32> {
    raw.unwrap_or_default()
        .split(',')
        .filter_map(|part| part.trim().parse::<u32>().ok())
        .collect()
}
