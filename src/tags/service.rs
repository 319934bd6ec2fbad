use std::backtrace::Backtrace;
use std::collections::{HashMap, HashSet};

use crate::books::repository as book_repository;
use crate::config::BOOK_SERVER_CONFIG;
use crate::model::error::tag_errors::{
    AddTagError, GetCategoriesError, GetTagError, MyTagsError, SearchTagError, TagBooksError,
    VoteError,
};
use crate::model::repository::{Tag, TagCategory, VoteRecord};
use crate::model::request::tag_requests::{AddTagRequest, VoteRequest};
use crate::model::response::tag_responses::{
    BookTagApi, CategoryApi, PreferredTagApi, TagBookApi, TagBookListApi, TagInfoApi, VotedTagApi,
};
use crate::optimistic::ControlState;
use crate::preferences::models::PreferenceField;
use crate::preferences::repository as preference_repository;
use crate::scoring;
use crate::tags::repository as tag_repository;

/// the two shapes `/tags/my-tags` can answer with, depending on the tab
#[derive(Debug)]
pub enum MyTags {
    Voted(Vec<VotedTagApi>),
    Preferred(Vec<PreferredTagApi>),
}

/// will return the tag with the passed id along with its category name
pub fn get_tag(id: u32) -> Result<TagInfoApi, GetTagError> {
    let con = crate::repository::open_connection();
    let detail = match tag_repository::get_tag_detail(id, &con) {
        Ok(d) => d,
        Err(rusqlite::Error::QueryReturnedNoRows) => {
            con.close().unwrap();
            return Err(GetTagError::TagNotFound);
        }
        Err(e) => {
            log::error!(
                "Could not retrieve tag with id {id}! Error is {e:?}\n{}",
                Backtrace::force_capture()
            );
            con.close().unwrap();
            return Err(GetTagError::DbError(e.to_string()));
        }
    };
    con.close().unwrap();
    Ok(tag_info(detail))
}

/// searches tags by name. An empty search returns an empty list without
/// touching the database
pub fn search_tags(query: String) -> Result<Vec<TagInfoApi>, SearchTagError> {
    let query = query.trim().to_string();
    if query.is_empty() {
        return Ok(Vec::new());
    }
    let con = crate::repository::open_connection();
    let limit = BOOK_SERVER_CONFIG.search.result_limit;
    let found = match tag_repository::search_tags(&query, limit, &con) {
        Ok(tags) => tags,
        Err(e) => {
            log::error!(
                "Failed to search tags with query {query}! Error is {e:?}\n{}",
                Backtrace::force_capture()
            );
            con.close().unwrap();
            return Err(SearchTagError::DbError(e.to_string()));
        }
    };
    con.close().unwrap();
    Ok(found.into_iter().map(tag_info).collect())
}

pub fn get_categories() -> Result<Vec<CategoryApi>, GetCategoriesError> {
    let con = crate::repository::open_connection();
    let categories = match tag_repository::get_categories(&con) {
        Ok(c) => c,
        Err(e) => {
            log::error!(
                "Failed to retrieve tag categories! Error is {e:?}\n{}",
                Backtrace::force_capture()
            );
            con.close().unwrap();
            return Err(GetCategoriesError::DbError(e.to_string()));
        }
    };
    con.close().unwrap();
    Ok(categories
        .into_iter()
        .map(|c| CategoryApi {
            id: c.id,
            name: c.name,
            display_order: c.display_order,
        })
        .collect())
}

/// records the user's vote on a (book, tag) pair. A value of 0 removes the
/// vote row; anything else replaces it through the upsert. The caller keeps
/// its own optimistic score, so nothing is recomputed or returned here
pub fn submit_vote(user_id: u32, request: VoteRequest) -> Result<(), VoteError> {
    if ![-1, 0, 1].contains(&request.value) {
        return Err(VoteError::BadValue);
    }
    let con = crate::repository::open_connection();
    if let Err(e) = book_repository::get_book(request.book_id, &con) {
        con.close().unwrap();
        return Err(match e {
            rusqlite::Error::QueryReturnedNoRows => VoteError::BookNotFound,
            _ => VoteError::DbError(e.to_string()),
        });
    }
    if let Err(e) = tag_repository::get_tag(request.tag_id, &con) {
        con.close().unwrap();
        return Err(match e {
            rusqlite::Error::QueryReturnedNoRows => VoteError::TagNotFound,
            _ => VoteError::DbError(e.to_string()),
        });
    }
    // track the caller's previous value so the settled transition can be
    // logged the same way the controls see it
    let previous = match tag_repository::get_votes_for_book_and_tag(request.book_id, request.tag_id, &con)
    {
        Ok(votes) => scoring::user_value(&votes, user_id),
        Err(e) => {
            log::error!(
                "Failed to read existing vote for book {} / tag {}! Error is {e:?}\n{}",
                request.book_id,
                request.tag_id,
                Backtrace::force_capture()
            );
            con.close().unwrap();
            return Err(VoteError::DbError(e.to_string()));
        }
    };
    let state = ControlState::Idle(previous).apply(request.value);
    let write_result = if request.value == 0 {
        tag_repository::delete_vote(request.book_id, request.tag_id, user_id, &con)
    } else {
        tag_repository::upsert_vote(request.book_id, request.tag_id, user_id, request.value, &con)
    };
    con.close().unwrap();
    match write_result {
        Ok(()) => {
            log::debug!(
                "vote for book {} / tag {} by user {user_id} settled at {}",
                request.book_id,
                request.tag_id,
                state.resolve(true).value()
            );
            Ok(())
        }
        Err(e) => {
            log::error!(
                "Failed to store vote for book {} / tag {}; reverting to {}. Error is {e:?}\n{}",
                request.book_id,
                request.tag_id,
                state.resolve(false).value(),
                Backtrace::force_capture()
            );
            Err(VoteError::DbError(e.to_string()))
        }
    }
}

/// tags a book for the user (an upsert of a +1 vote) and hands back the full
/// recomputed tag record so the client can render it without a second fetch
pub fn add_tag(user_id: u32, request: AddTagRequest) -> Result<BookTagApi, AddTagError> {
    let con = crate::repository::open_connection();
    if let Err(e) = book_repository::get_book(request.book_id, &con) {
        con.close().unwrap();
        return Err(match e {
            rusqlite::Error::QueryReturnedNoRows => AddTagError::BookNotFound,
            _ => AddTagError::DbError(e.to_string()),
        });
    }
    let (tag, category) = match tag_repository::get_tag_detail(request.tag_id, &con) {
        Ok(d) => d,
        Err(rusqlite::Error::QueryReturnedNoRows) => {
            con.close().unwrap();
            return Err(AddTagError::TagNotFound);
        }
        Err(e) => {
            log::error!(
                "Could not retrieve tag with id {}! Error is {e:?}\n{}",
                request.tag_id,
                Backtrace::force_capture()
            );
            con.close().unwrap();
            return Err(AddTagError::DbError(e.to_string()));
        }
    };
    if let Err(e) = tag_repository::upsert_vote(request.book_id, request.tag_id, user_id, 1, &con) {
        log::error!(
            "Failed to tag book {} with tag {}! Error is {e:?}\n{}",
            request.book_id,
            request.tag_id,
            Backtrace::force_capture()
        );
        con.close().unwrap();
        return Err(AddTagError::DbError(e.to_string()));
    }
    let votes =
        match tag_repository::get_votes_for_book_and_tag(request.book_id, request.tag_id, &con) {
            Ok(v) => v,
            Err(e) => {
                log::error!(
                    "Tagged book {} but failed to re-read its votes! Error is {e:?}\n{}",
                    request.book_id,
                    Backtrace::force_capture()
                );
                con.close().unwrap();
                return Err(AddTagError::DbError(e.to_string()));
            }
        };
    con.close().unwrap();
    let scores = scoring::score_by_tag(&votes);
    Ok(BookTagApi {
        id: tag.id,
        name: tag.name,
        description: tag.description,
        category_id: tag.category_id,
        category_name: category.name,
        category_display_order: category.display_order,
        score: *scores.get(&tag.id).unwrap_or(&0),
        user_value: scoring::user_value(&votes, user_id),
    })
}

/// the caller's personal tag lists: tags they've voted on, or tags they've
/// saved/followed/hidden
pub fn my_tags(user_id: u32, tab: &str) -> Result<MyTags, MyTagsError> {
    match tab {
        "upvoted" | "downvoted" => {
            let value = if tab == "upvoted" { 1 } else { -1 };
            voted_tags(user_id, value)
        }
        "saved" | "followed" | "hidden" => {
            // the tab names line up with the preference bits
            let field = PreferenceField::from_tab(tab).unwrap();
            preferred_tags(user_id, field)
        }
        _ => Err(MyTagsError::BadTab),
    }
}

fn voted_tags(user_id: u32, value: i64) -> Result<MyTags, MyTagsError> {
    let con = crate::repository::open_connection();
    let votes = match tag_repository::get_votes_by_user_and_value(user_id, value, &con) {
        Ok(v) => v,
        Err(e) => {
            log::error!(
                "Failed to retrieve votes for user {user_id}! Error is {e:?}\n{}",
                Backtrace::force_capture()
            );
            con.close().unwrap();
            return Err(MyTagsError::DbError(e.to_string()));
        }
    };
    // one row per (book, tag), so counting rows counts books
    let mut book_counts: HashMap<u32, u32> = HashMap::new();
    for vote in votes.iter() {
        *book_counts.entry(vote.tag_id).or_insert(0) += 1;
    }
    let tag_ids: Vec<u32> = book_counts.keys().copied().collect();
    let tags = match tag_repository::get_tags_with_categories(&tag_ids, &con) {
        Ok(t) => t,
        Err(e) => {
            log::error!(
                "Failed to retrieve tags for user {user_id}'s votes! Error is {e:?}\n{}",
                Backtrace::force_capture()
            );
            con.close().unwrap();
            return Err(MyTagsError::DbError(e.to_string()));
        }
    };
    con.close().unwrap();
    let mut result: Vec<VotedTagApi> = tags
        .into_iter()
        .map(|(tag, category)| VotedTagApi {
            book_count: *book_counts.get(&tag.id).unwrap_or(&0),
            id: tag.id,
            name: tag.name,
            description: tag.description,
            category_name: category.name,
        })
        .collect();
    result.sort_by(|a, b| b.book_count.cmp(&a.book_count).then(a.id.cmp(&b.id)));
    Ok(MyTags::Voted(result))
}

fn preferred_tags(user_id: u32, field: PreferenceField) -> Result<MyTags, MyTagsError> {
    let con = crate::repository::open_connection();
    let preferred = match preference_repository::get_preferred_tags(user_id, field, &con) {
        Ok(p) => p,
        Err(e) => {
            log::error!(
                "Failed to retrieve preferred tags for user {user_id}! Error is {e:?}\n{}",
                Backtrace::force_capture()
            );
            con.close().unwrap();
            return Err(MyTagsError::DbError(e.to_string()));
        }
    };
    let tag_ids: Vec<u32> = preferred.iter().map(|(tag_id, _)| *tag_id).collect();
    let tags = match tag_repository::get_tags_with_categories(&tag_ids, &con) {
        Ok(t) => t,
        Err(e) => {
            log::error!(
                "Failed to retrieve preferred tag info for user {user_id}! Error is {e:?}\n{}",
                Backtrace::force_capture()
            );
            con.close().unwrap();
            return Err(MyTagsError::DbError(e.to_string()));
        }
    };
    con.close().unwrap();
    let by_id: HashMap<u32, (Tag, TagCategory)> =
        tags.into_iter().map(|pair| (pair.0.id, pair)).collect();
    // keep the repository's ordering (most recently toggled first)
    let result: Vec<PreferredTagApi> = preferred
        .into_iter()
        .filter_map(|(tag_id, added_at)| {
            by_id.get(&tag_id).map(|(tag, category)| PreferredTagApi {
                id: tag.id,
                name: tag.name.clone(),
                description: tag.description.clone(),
                category_name: category.name.clone(),
                added_at,
            })
        })
        .collect();
    Ok(MyTags::Preferred(result))
}

/// the books carrying the passed tag, each with the tag's net score there.
/// `only_mine` narrows the rows to the caller's own votes
pub fn tag_books(
    user: Option<u32>,
    tag_id: u32,
    only_mine: bool,
    sort: &str,
    dir: &str,
) -> Result<TagBookListApi, TagBooksError> {
    let con = crate::repository::open_connection();
    if let Err(e) = tag_repository::get_tag(tag_id, &con) {
        con.close().unwrap();
        return Err(match e {
            rusqlite::Error::QueryReturnedNoRows => TagBooksError::TagNotFound,
            _ => TagBooksError::DbError(e.to_string()),
        });
    }
    let votes = match (only_mine, user) {
        (true, Some(user_id)) => tag_repository::get_votes_for_tag_by_user(tag_id, user_id, &con),
        _ => tag_repository::get_votes_for_tag(tag_id, &con),
    };
    let votes: Vec<VoteRecord> = match votes {
        Ok(v) => v,
        Err(e) => {
            log::error!(
                "Failed to retrieve votes for tag {tag_id}! Error is {e:?}\n{}",
                Backtrace::force_capture()
            );
            con.close().unwrap();
            return Err(TagBooksError::DbError(e.to_string()));
        }
    };
    let scores = scoring::score_by_book(&votes);
    let user_tagged: HashSet<u32> = match user {
        Some(user_id) => votes
            .iter()
            .filter(|v| v.user_id == user_id && v.value != 0)
            .map(|v| v.book_id)
            .collect(),
        None => HashSet::new(),
    };
    let book_ids: Vec<u32> = scores.keys().copied().collect();
    let books = match book_repository::get_books_by_ids(&book_ids, &con) {
        Ok(b) => b,
        Err(e) => {
            log::error!(
                "Failed to retrieve books for tag {tag_id}! Error is {e:?}\n{}",
                Backtrace::force_capture()
            );
            con.close().unwrap();
            return Err(TagBooksError::DbError(e.to_string()));
        }
    };
    con.close().unwrap();
    let mut result: Vec<TagBookApi> = books
        .into_iter()
        .map(|book| TagBookApi {
            tag_score: *scores.get(&book.id).unwrap_or(&0),
            user_tagged: user_tagged.contains(&book.id),
            id: book.id,
            title: book.title,
            description: book.description,
            publication_year: book.publication_year,
        })
        .collect();
    let descending = dir != "asc";
    result.sort_by(|a, b| {
        let ordering = match sort {
            "title" => a.title.cmp(&b.title),
            "publication_year" => a.publication_year.cmp(&b.publication_year),
            // score is the default sort
            _ => a.tag_score.cmp(&b.tag_score),
        };
        let ordering = if descending { ordering.reverse() } else { ordering };
        ordering.then(a.id.cmp(&b.id))
    });
    let total = result.len();
    Ok(TagBookListApi {
        books: result,
        total,
    })
}

fn tag_info((tag, category): (Tag, TagCategory)) -> TagInfoApi {
    TagInfoApi {
        id: tag.id,
        name: tag.name,
        description: tag.description,
        category_name: category.name,
    }
}
