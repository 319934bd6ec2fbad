use std::backtrace::Backtrace;
use std::collections::HashMap;

use crate::authors::repository as author_repository;
use crate::model::error::author_errors::GetAuthorError;
use crate::model::repository::{Author, Tag, TagCategory};
use crate::model::response::author_responses::{
    AuthorApi, AuthorBookApi, AuthorBooksApi, AuthorTagApi, AuthorTagsApi,
};
use crate::scoring;
use crate::tags::repository as tag_repository;

/// the two tabs an author page can show
#[derive(Debug)]
pub enum AuthorPage {
    Books(AuthorBooksApi),
    Tags(AuthorTagsApi),
}

pub fn get_author(id: u32, tab: &str) -> Result<AuthorPage, GetAuthorError> {
    let con = crate::repository::open_connection();
    let author = match author_repository::get_author(id, &con) {
        Ok(a) => a,
        Err(rusqlite::Error::QueryReturnedNoRows) => {
            con.close().unwrap();
            return Err(GetAuthorError::AuthorNotFound);
        }
        Err(e) => {
            log::error!(
                "Could not retrieve author with id {id}! Error is {e:?}\n{}",
                Backtrace::force_capture()
            );
            con.close().unwrap();
            return Err(GetAuthorError::DbError(e.to_string()));
        }
    };
    let result = match tab {
        "books" => author_books(&author, &con),
        "tags" => author_tags(&author, &con),
        _ => {
            con.close().unwrap();
            return Err(GetAuthorError::BadTab);
        }
    };
    con.close().unwrap();
    result
}

fn author_books(
    author: &Author,
    con: &rusqlite::Connection,
) -> Result<AuthorPage, GetAuthorError> {
    let books = match author_repository::get_books_for_author(author.id, con) {
        Ok(b) => b,
        Err(e) => {
            log::error!(
                "Failed to retrieve books for author {}! Error is {e:?}\n{}",
                author.id,
                Backtrace::force_capture()
            );
            return Err(GetAuthorError::DbError(e.to_string()));
        }
    };
    let books: Vec<AuthorBookApi> = books
        .into_iter()
        .map(|book| AuthorBookApi {
            id: book.id,
            title: book.title,
            description: book.description,
            publication_year: book.publication_year,
        })
        .collect();
    let total = books.len();
    Ok(AuthorPage::Books(AuthorBooksApi {
        author: AuthorApi::from(author.clone()),
        books,
        total,
    }))
}

/// nets every vote across every book of the author into one score per tag and
/// keeps only the net-positive ones
fn author_tags(author: &Author, con: &rusqlite::Connection) -> Result<AuthorPage, GetAuthorError> {
    let books = match author_repository::get_books_for_author(author.id, con) {
        Ok(b) => b,
        Err(e) => {
            log::error!(
                "Failed to retrieve books for author {}! Error is {e:?}\n{}",
                author.id,
                Backtrace::force_capture()
            );
            return Err(GetAuthorError::DbError(e.to_string()));
        }
    };
    let book_ids: Vec<u32> = books.iter().map(|b| b.id).collect();
    let votes = match tag_repository::get_votes_for_books(&book_ids, con) {
        Ok(v) => v,
        Err(e) => {
            log::error!(
                "Failed to retrieve votes for author {}'s books! Error is {e:?}\n{}",
                author.id,
                Backtrace::force_capture()
            );
            return Err(GetAuthorError::DbError(e.to_string()));
        }
    };
    let scores = scoring::score_by_tag(&votes);
    let ranked: Vec<(u32, i64)> = scoring::rank(scores)
        .into_iter()
        .filter(|(_, score)| scoring::is_tagged(*score))
        .collect();
    let tag_ids: Vec<u32> = ranked.iter().map(|(tag_id, _)| *tag_id).collect();
    let tags = match tag_repository::get_tags_with_categories(&tag_ids, con) {
        Ok(t) => t,
        Err(e) => {
            log::error!(
                "Failed to retrieve tag info for author {}! Error is {e:?}\n{}",
                author.id,
                Backtrace::force_capture()
            );
            return Err(GetAuthorError::DbError(e.to_string()));
        }
    };
    let by_id: HashMap<u32, (Tag, TagCategory)> =
        tags.into_iter().map(|pair| (pair.0.id, pair)).collect();
    let tags: Vec<AuthorTagApi> = ranked
        .into_iter()
        .filter_map(|(tag_id, score)| {
            by_id.get(&tag_id).map(|(tag, category)| AuthorTagApi {
                id: tag.id,
                name: tag.name.clone(),
                description: tag.description.clone(),
                category_name: category.name.clone(),
                count: score,
            })
        })
        .collect();
    Ok(AuthorPage::Tags(AuthorTagsApi {
        author: AuthorApi::from(author.clone()),
        tags,
    }))
}
