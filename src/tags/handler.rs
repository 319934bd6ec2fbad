use rocket::serde::json::Json;
use rocket::State;

use crate::guard::{resolve_user, Auth, ValidateResult};
use crate::model::error::tag_errors::{
    AddTagError, GetTagError, MyTagsError, TagBooksError, VoteError,
};
use crate::model::request::tag_requests::{AddTagRequest, VoteRequest};
use crate::model::response::tag_responses::{
    AddTagResponse, AddedTagApi, CategoryListApi, GetCategoriesResponse, GetTagResponse,
    MyTagsResponse, PreferredTagListApi, SearchTagResponse, TagBooksResponse, TagSearchListApi,
    VoteResponse, VotedTagListApi,
};
use crate::model::response::{ErrorMessage, SuccessMessage};
use crate::optimistic::{vote_key, InFlight};
use crate::tags::service;
use crate::tags::service::MyTags;

#[get("/<id>")]
pub fn get_tag(id: u32) -> GetTagResponse {
    match service::get_tag(id) {
        Ok(tag) => GetTagResponse::Success(Json::from(tag)),
        Err(GetTagError::TagNotFound) => GetTagResponse::TagNotFound(ErrorMessage::new(
            "The tag with the passed id could not be found.",
        )),
        Err(GetTagError::DbError(message)) => {
            GetTagResponse::TagDbError(ErrorMessage::new(&message))
        }
    }
}

#[get("/?<search>")]
pub fn search_tags(search: Option<String>) -> SearchTagResponse {
    match service::search_tags(search.unwrap_or_default()) {
        Ok(tags) => SearchTagResponse::Success(Json::from(TagSearchListApi { tags })),
        Err(crate::model::error::tag_errors::SearchTagError::DbError(message)) => {
            SearchTagResponse::TagDbError(ErrorMessage::new(&message))
        }
    }
}

#[get("/categories")]
pub fn get_categories() -> GetCategoriesResponse {
    match service::get_categories() {
        Ok(categories) => {
            GetCategoriesResponse::Success(Json::from(CategoryListApi { categories }))
        }
        Err(crate::model::error::tag_errors::GetCategoriesError::DbError(message)) => {
            GetCategoriesResponse::CategoryDbError(ErrorMessage::new(&message))
        }
    }
}

#[post("/vote", data = "<request>")]
pub fn vote(request: Json<VoteRequest>, auth: Auth, in_flight: &State<InFlight>) -> VoteResponse {
    let user_id = match auth.validate() {
        ValidateResult::Ok(id) => id,
        ValidateResult::Invalid => {
            return VoteResponse::Unauthorized(ErrorMessage::new("Bad Credentials"))
        }
    };
    let request = request.into_inner();
    // refuse a second vote on the same key while the first is being written
    let _ticket = match in_flight.begin(vote_key(user_id, request.book_id, request.tag_id)) {
        Some(ticket) => ticket,
        None => {
            return VoteResponse::VoteInFlight(ErrorMessage::new(
                "Another vote for this book and tag is still being processed.",
            ))
        }
    };
    match service::submit_vote(user_id, request) {
        Ok(()) => VoteResponse::Success(SuccessMessage::ok()),
        Err(VoteError::BadValue) => {
            VoteResponse::BadValue(ErrorMessage::new("Vote value must be -1, 0, or 1."))
        }
        Err(VoteError::BookNotFound) => VoteResponse::NotFound(ErrorMessage::new(
            "The book with the passed id could not be found.",
        )),
        Err(VoteError::TagNotFound) => VoteResponse::NotFound(ErrorMessage::new(
            "The tag with the passed id could not be found.",
        )),
        Err(VoteError::DbError(message)) => VoteResponse::VoteDbError(ErrorMessage::new(&message)),
    }
}

#[post("/add", data = "<request>")]
pub fn add_tag(
    request: Json<AddTagRequest>,
    auth: Auth,
    in_flight: &State<InFlight>,
) -> AddTagResponse {
    let user_id = match auth.validate() {
        ValidateResult::Ok(id) => id,
        ValidateResult::Invalid => {
            return AddTagResponse::Unauthorized(ErrorMessage::new("Bad Credentials"))
        }
    };
    let request = request.into_inner();
    let _ticket = match in_flight.begin(vote_key(user_id, request.book_id, request.tag_id)) {
        Some(ticket) => ticket,
        None => {
            return AddTagResponse::VoteInFlight(ErrorMessage::new(
                "Another vote for this book and tag is still being processed.",
            ))
        }
    };
    match service::add_tag(user_id, request) {
        Ok(tag) => AddTagResponse::Success(Json::from(AddedTagApi { tag })),
        Err(AddTagError::BookNotFound) => AddTagResponse::NotFound(ErrorMessage::new(
            "The book with the passed id could not be found.",
        )),
        Err(AddTagError::TagNotFound) => AddTagResponse::NotFound(ErrorMessage::new(
            "The tag with the passed id could not be found.",
        )),
        Err(AddTagError::DbError(message)) => {
            AddTagResponse::TagDbError(ErrorMessage::new(&message))
        }
    }
}

#[get("/my-tags?<tab>")]
pub fn my_tags(tab: Option<String>, auth: Auth) -> MyTagsResponse {
    let user_id = match auth.validate() {
        ValidateResult::Ok(id) => id,
        ValidateResult::Invalid => {
            return MyTagsResponse::Unauthorized(ErrorMessage::new("Bad Credentials"))
        }
    };
    let tab = tab.unwrap_or_else(|| "upvoted".to_string());
    match service::my_tags(user_id, &tab) {
        Ok(MyTags::Voted(tags)) => MyTagsResponse::Voted(Json::from(VotedTagListApi { tags })),
        Ok(MyTags::Preferred(tags)) => {
            MyTagsResponse::Preferred(Json::from(PreferredTagListApi { tags }))
        }
        Err(MyTagsError::BadTab) => MyTagsResponse::BadTab(ErrorMessage::new(
            "tab must be one of upvoted, downvoted, saved, followed, or hidden.",
        )),
        Err(MyTagsError::DbError(message)) => {
            MyTagsResponse::TagDbError(ErrorMessage::new(&message))
        }
    }
}

#[get("/<id>/books?<mine>&<sort>&<dir>")]
pub fn tag_books(
    id: u32,
    mine: Option<bool>,
    sort: Option<String>,
    dir: Option<String>,
    auth: Option<Auth>,
) -> TagBooksResponse {
    let user = resolve_user(auth);
    let sort = sort.unwrap_or_else(|| "score".to_string());
    let dir = dir.unwrap_or_else(|| "desc".to_string());
    match service::tag_books(user, id, mine.unwrap_or(false), &sort, &dir) {
        Ok(books) => TagBooksResponse::Success(Json::from(books)),
        Err(TagBooksError::TagNotFound) => TagBooksResponse::TagNotFound(ErrorMessage::new(
            "The tag with the passed id could not be found.",
        )),
        Err(TagBooksError::DbError(message)) => {
            TagBooksResponse::TagDbError(ErrorMessage::new(&message))
        }
    }
}
