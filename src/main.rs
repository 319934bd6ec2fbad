#[macro_use]
extern crate rocket;

use rocket::{Build, Rocket};

use accounts::handler::{api_version, create_user, delete_account, update_account};
use authors::handler::get_author;
use books::handler::{explore_books, get_book, get_book_shelves, get_book_tags, search_books};
use preferences::handler::{get_preferences, toggle_preference};
use shelves::handler::{
    create_shelf, get_shelf_books, get_shelves, modify_shelf_book, save_shelves,
};
use tags::handler::{add_tag, get_categories, get_tag, my_tags, search_tags, tag_books, vote};

use crate::optimistic::InFlight;
use crate::repository::initialize_db;

mod accounts;
mod authors;
mod books;
mod config;
mod guard;
mod model;
mod optimistic;
mod preferences;
mod repository;
mod scoring;
mod shelves;
mod tags;
#[cfg(test)]
mod test;

/// sets up the fern logger. Tests build multiple rocket instances, so an
/// already-initialized logger is left alone
fn configure_logging() {
    let result = fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{} {} {}] {}",
                humantime::format_rfc3339_seconds(std::time::SystemTime::now()),
                record.level(),
                record.target(),
                message
            ))
        })
        .level(log::LevelFilter::Info)
        .chain(std::io::stdout())
        .apply();
    if result.is_err() { /* already initialized - no op */ }
}

#[launch]
fn rocket() -> Rocket<Build> {
    configure_logging();
    initialize_db().unwrap();
    rocket::build()
        .manage(InFlight::new())
        .mount(
            "/api",
            routes![api_version, create_user, update_account, delete_account],
        )
        .mount(
            "/books",
            routes![
                get_book,
                get_book_tags,
                search_books,
                explore_books,
                get_book_shelves
            ],
        )
        .mount(
            "/tags",
            routes![
                get_tag,
                search_tags,
                get_categories,
                vote,
                add_tag,
                my_tags,
                tag_books,
                get_preferences,
                toggle_preference
            ],
        )
        .mount("/authors", routes![get_author])
        .mount(
            "/shelves",
            routes![
                get_shelves,
                create_shelf,
                save_shelves,
                modify_shelf_book,
                get_shelf_books
            ],
        )
}




#[cfg(test)]
mod shelf_endpoint_tests {
    use rocket::http::{Header, Status};
    use rocket::local::blocking::Client;

    use crate::model::response::shelf_responses::ShelfListApi;
    use crate::test::{
        cleanup, create_book_db_entry, create_user_db_entry, refresh_db, AUTH,
    };

    use super::rocket;

    fn client() -> Client {
        Client::tracked(rocket()).unwrap()
    }

    #[test]
    fn create_and_list_shelves() {
        refresh_db();
        create_user_db_entry("username", "password");
        let client = client();
        let res = client
            .post(uri!("/shelves"))
            .header(Header::new("Authorization", AUTH))
            .body(r#"{"name":"To Read"}"#)
            .dispatch();
        assert_eq!(res.status(), Status::Created);
        let res = client
            .get(uri!("/shelves"))
            .header(Header::new("Authorization", AUTH))
            .dispatch();
        let body: ShelfListApi = res.into_json().unwrap();
        assert_eq!(1, body.shelves.len());
        assert_eq!("To Read", body.shelves[0].name);
        assert_eq!(0, body.shelves[0].display_order);
        cleanup();
    }

    #[test]
    fn duplicate_shelf_membership_conflicts() {
        refresh_db();
        create_user_db_entry("username", "password");
        let book_id = create_book_db_entry("Some Book");
        let client = client();
        client
            .post(uri!("/shelves"))
            .header(Header::new("Authorization", AUTH))
            .body(r#"{"name":"To Read"}"#)
            .dispatch();
        let body = format!(r#"{{"book_id":{book_id},"action":"add"}}"#);
        let res = client
            .post(uri!("/shelves/1/books"))
            .header(Header::new("Authorization", AUTH))
            .body(&body)
            .dispatch();
        assert_eq!(res.status(), Status::Ok);
        let res = client
            .post(uri!("/shelves/1/books"))
            .header(Header::new("Authorization", AUTH))
            .body(&body)
            .dispatch();
        assert_eq!(res.status(), Status::Conflict);
        cleanup();
    }

    #[test]
    fn foreign_shelf_is_not_found() {
        refresh_db();
        create_user_db_entry("username", "password");
        create_user_db_entry("somebody_else", "password");
        let book_id = create_book_db_entry("Some Book");
        let client = client();
        // the shelf belongs to the second user
        let shelf_id = crate::test::create_shelf_db_entry(2, "Theirs", 0);
        let res = client
            .post(format!("/shelves/{shelf_id}/books"))
            .header(Header::new("Authorization", AUTH))
            .body(format!(r#"{{"book_id":{book_id},"action":"add"}}"#))
            .dispatch();
        assert_eq!(res.status(), Status::NotFound);
        cleanup();
    }
}
