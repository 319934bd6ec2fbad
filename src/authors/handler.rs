use rocket::serde::json::Json;

use crate::authors::service;
use crate::authors::service::AuthorPage;
use crate::model::error::author_errors::GetAuthorError;
use crate::model::response::author_responses::GetAuthorResponse;
use crate::model::response::ErrorMessage;

#[get("/<id>?<tab>")]
pub fn get_author(id: u32, tab: Option<String>) -> GetAuthorResponse {
    let tab = tab.unwrap_or_else(|| "books".to_string());
    match service::get_author(id, &tab) {
        Ok(AuthorPage::Books(books)) => GetAuthorResponse::Books(Json::from(books)),
        Ok(AuthorPage::Tags(tags)) => GetAuthorResponse::Tags(Json::from(tags)),
        Err(GetAuthorError::AuthorNotFound) => GetAuthorResponse::AuthorNotFound(
            ErrorMessage::new("The author with the passed id could not be found."),
        ),
        Err(GetAuthorError::BadTab) => {
            GetAuthorResponse::BadTab(ErrorMessage::new("tab must be either books or tags."))
        }
        Err(GetAuthorError::DbError(message)) => {
            GetAuthorResponse::AuthorDbError(ErrorMessage::new(&message))
        }
    }
}
