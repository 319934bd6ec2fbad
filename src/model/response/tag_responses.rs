use rocket::serde::json::Json;
use rocket::serde::{Deserialize, Serialize};

use crate::model::response::ErrorMessage;

/// a tag on its own, outside the context of any one book
#[derive(Serialize, Deserialize, Debug, PartialEq, Clone)]
#[serde(crate = "rocket::serde")]
pub struct TagInfoApi {
    pub id: u32,
    pub name: String,
    pub description: Option<String>,
    pub category_name: String,
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Clone)]
#[serde(crate = "rocket::serde")]
pub struct CategoryApi {
    pub id: u32,
    pub name: String,
    pub display_order: u32,
}

/// a tag as it appears on one book: net score across all voters plus the
/// calling user's own contribution (0 when anonymous or not voted)
#[derive(Serialize, Deserialize, Debug, PartialEq, Clone)]
#[serde(crate = "rocket::serde")]
pub struct BookTagApi {
    pub id: u32,
    pub name: String,
    pub description: Option<String>,
    pub category_id: u32,
    pub category_name: String,
    pub category_display_order: u32,
    pub score: i64,
    pub user_value: i64,
}

/// the tags of one category on a book, used to render a grouped tag section
#[derive(Serialize, Deserialize, Debug, PartialEq, Clone)]
#[serde(crate = "rocket::serde")]
pub struct GroupedCategoryApi {
    pub category_id: u32,
    pub category_name: String,
    pub display_order: u32,
    pub tags: Vec<BookTagApi>,
}

/// wrapper so `POST /tags/add` can hand the client a render-ready record
#[derive(Serialize, Deserialize, Debug, PartialEq)]
#[serde(crate = "rocket::serde")]
pub struct AddedTagApi {
    pub tag: BookTagApi,
}

/// a tag the caller voted on, with how many books that vote spans
#[derive(Serialize, Deserialize, Debug, PartialEq, Clone)]
#[serde(crate = "rocket::serde")]
pub struct VotedTagApi {
    pub id: u32,
    pub name: String,
    pub description: Option<String>,
    pub category_name: String,
    pub book_count: u32,
}

/// a tag the caller saved/followed/hid, with when the preference last changed
#[derive(Serialize, Deserialize, Debug, PartialEq, Clone)]
#[serde(crate = "rocket::serde")]
pub struct PreferredTagApi {
    pub id: u32,
    pub name: String,
    pub description: Option<String>,
    pub category_name: String,
    pub added_at: String,
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
#[serde(crate = "rocket::serde")]
pub struct VotedTagListApi {
    pub tags: Vec<VotedTagApi>,
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
#[serde(crate = "rocket::serde")]
pub struct PreferredTagListApi {
    pub tags: Vec<PreferredTagApi>,
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
#[serde(crate = "rocket::serde")]
pub struct TagSearchListApi {
    pub tags: Vec<TagInfoApi>,
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
#[serde(crate = "rocket::serde")]
pub struct CategoryListApi {
    pub categories: Vec<CategoryApi>,
}

/// one book under a tag: the tag's net score on that book and whether the
/// caller has a non-zero vote there
#[derive(Serialize, Deserialize, Debug, PartialEq, Clone)]
#[serde(crate = "rocket::serde")]
pub struct TagBookApi {
    pub id: u32,
    pub title: String,
    pub description: Option<String>,
    pub publication_year: Option<i32>,
    pub tag_score: i64,
    pub user_tagged: bool,
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
#[serde(crate = "rocket::serde")]
pub struct TagBookListApi {
    pub books: Vec<TagBookApi>,
    pub total: usize,
}

// ----------------------------------

#[derive(Responder)]
pub enum GetTagResponse {
    #[response(status = 404, content_type = "json")]
    TagNotFound(Json<ErrorMessage>),
    #[response(status = 500, content_type = "json")]
    TagDbError(Json<ErrorMessage>),
    #[response(status = 200)]
    Success(Json<TagInfoApi>),
}

#[derive(Responder)]
pub enum SearchTagResponse {
    #[response(status = 500, content_type = "json")]
    TagDbError(Json<ErrorMessage>),
    #[response(status = 200)]
    Success(Json<TagSearchListApi>),
}

#[derive(Responder)]
pub enum GetCategoriesResponse {
    #[response(status = 500, content_type = "json")]
    CategoryDbError(Json<ErrorMessage>),
    #[response(status = 200)]
    Success(Json<CategoryListApi>),
}

#[derive(Responder)]
pub enum VoteResponse {
    #[response(status = 401, content_type = "json")]
    Unauthorized(Json<ErrorMessage>),
    #[response(status = 400, content_type = "json")]
    BadValue(Json<ErrorMessage>),
    #[response(status = 404, content_type = "json")]
    NotFound(Json<ErrorMessage>),
    #[response(status = 409, content_type = "json")]
    VoteInFlight(Json<ErrorMessage>),
    #[response(status = 500, content_type = "json")]
    VoteDbError(Json<ErrorMessage>),
    #[response(status = 200)]
    Success(Json<super::SuccessMessage>),
}

#[derive(Responder)]
pub enum AddTagResponse {
    #[response(status = 401, content_type = "json")]
    Unauthorized(Json<ErrorMessage>),
    #[response(status = 404, content_type = "json")]
    NotFound(Json<ErrorMessage>),
    #[response(status = 409, content_type = "json")]
    VoteInFlight(Json<ErrorMessage>),
    #[response(status = 500, content_type = "json")]
    TagDbError(Json<ErrorMessage>),
    #[response(status = 200)]
    Success(Json<AddedTagApi>),
}

#[derive(Responder)]
pub enum MyTagsResponse {
    #[response(status = 401, content_type = "json")]
    Unauthorized(Json<ErrorMessage>),
    #[response(status = 400, content_type = "json")]
    BadTab(Json<ErrorMessage>),
    #[response(status = 500, content_type = "json")]
    TagDbError(Json<ErrorMessage>),
    #[response(status = 200)]
    Voted(Json<VotedTagListApi>),
    #[response(status = 200)]
    Preferred(Json<PreferredTagListApi>),
}

#[derive(Responder)]
pub enum TagBooksResponse {
    #[response(status = 404, content_type = "json")]
    TagNotFound(Json<ErrorMessage>),
    #[response(status = 500, content_type = "json")]
    TagDbError(Json<ErrorMessage>),
    #[response(status = 200)]
    Success(Json<TagBookListApi>),
}
