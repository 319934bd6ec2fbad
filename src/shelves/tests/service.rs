mod create_shelf_tests {
    use crate::model::error::shelf_errors::CreateShelfError;
    use crate::shelves::service::{create_shelf, get_shelves};
    use crate::test::*;

    #[test]
    fn shelves_are_appended_in_order() {
        refresh_db();
        let user_id = create_user_db_entry("username", "password");
        create_shelf(user_id, "Reading".to_string()).unwrap();
        create_shelf(user_id, "Finished".to_string()).unwrap();
        let shelves = get_shelves(user_id, None).unwrap();
        assert_eq!(2, shelves.len());
        assert_eq!("Reading", shelves[0].name);
        assert_eq!(0, shelves[0].display_order);
        assert_eq!("Finished", shelves[1].name);
        assert_eq!(1, shelves[1].display_order);
        cleanup();
    }

    #[test]
    fn blank_names_are_rejected() {
        refresh_db();
        let res = create_shelf(1, "   ".to_string());
        assert_eq!(CreateShelfError::BadName, res.unwrap_err());
        cleanup();
    }

    #[test]
    fn duplicate_names_conflict() {
        refresh_db();
        let user_id = create_user_db_entry("username", "password");
        create_shelf(user_id, "Reading".to_string()).unwrap();
        let res = create_shelf(user_id, "Reading".to_string());
        assert_eq!(CreateShelfError::NameTaken, res.unwrap_err());
        cleanup();
    }

    #[test]
    fn two_users_can_share_a_shelf_name() {
        refresh_db();
        let first = create_user_db_entry("username", "password");
        let second = create_user_db_entry("other", "password");
        create_shelf(first, "Reading".to_string()).unwrap();
        create_shelf(second, "Reading".to_string()).unwrap();
        assert_eq!(1, get_shelves(second, None).unwrap().len());
        cleanup();
    }
}

mod save_shelves_tests {
    use crate::model::error::shelf_errors::SaveShelvesError;
    use crate::model::request::shelf_requests::{SaveShelvesRequest, ShelfEntry};
    use crate::shelves::service::save_shelves;
    use crate::test::*;

    #[test]
    fn bulk_save_reorders_inserts_and_deletes() {
        refresh_db();
        let user_id = create_user_db_entry("username", "password");
        create_shelf_db_entry(user_id, "A", 0);
        let b = create_shelf_db_entry(user_id, "B", 1);
        create_shelf_db_entry(user_id, "C", 2);
        // keep only B, then a brand new D
        let saved = save_shelves(
            user_id,
            SaveShelvesRequest {
                shelves: vec![
                    ShelfEntry {
                        id: Some(b),
                        name: "B".to_string(),
                    },
                    ShelfEntry {
                        id: None,
                        name: "D".to_string(),
                    },
                ],
            },
        )
        .unwrap();
        assert_eq!(2, saved.len());
        assert_eq!(b, saved[0].id);
        assert_eq!("B", saved[0].name);
        assert_eq!(0, saved[0].display_order);
        assert_eq!("D", saved[1].name);
        assert_eq!(1, saved[1].display_order);
        cleanup();
    }

    #[test]
    fn bulk_save_renames_kept_shelves() {
        refresh_db();
        let user_id = create_user_db_entry("username", "password");
        let shelf = create_shelf_db_entry(user_id, "Old Name", 0);
        let saved = save_shelves(
            user_id,
            SaveShelvesRequest {
                shelves: vec![ShelfEntry {
                    id: Some(shelf),
                    name: "New Name".to_string(),
                }],
            },
        )
        .unwrap();
        assert_eq!("New Name", saved[0].name);
        cleanup();
    }

    #[test]
    fn empty_list_is_rejected() {
        refresh_db();
        let res = save_shelves(1, SaveShelvesRequest { shelves: vec![] });
        assert_eq!(SaveShelvesError::EmptyList, res.unwrap_err());
        cleanup();
    }

    #[test]
    fn duplicate_names_are_rejected_case_insensitively() {
        refresh_db();
        let res = save_shelves(
            1,
            SaveShelvesRequest {
                shelves: vec![
                    ShelfEntry {
                        id: None,
                        name: "Reading".to_string(),
                    },
                    ShelfEntry {
                        id: None,
                        name: "rEaDiNg".to_string(),
                    },
                ],
            },
        );
        assert_eq!(SaveShelvesError::DuplicateNames, res.unwrap_err());
        cleanup();
    }

    #[test]
    fn somebody_elses_shelf_id_is_not_found() {
        refresh_db();
        let user_id = create_user_db_entry("username", "password");
        let other = create_user_db_entry("other", "password");
        let foreign_shelf = create_shelf_db_entry(other, "Theirs", 0);
        let res = save_shelves(
            user_id,
            SaveShelvesRequest {
                shelves: vec![ShelfEntry {
                    id: Some(foreign_shelf),
                    name: "Mine Now".to_string(),
                }],
            },
        );
        assert_eq!(SaveShelvesError::ShelfNotFound, res.unwrap_err());
        cleanup();
    }
}

mod shelf_book_tests {
    use crate::model::error::shelf_errors::ShelfBookError;
    use crate::model::request::shelf_requests::ShelfBookRequest;
    use crate::shelves::service::{get_shelves, set_shelf_book};
    use crate::test::*;

    #[test]
    fn add_and_remove_membership() {
        refresh_db();
        let user_id = create_user_db_entry("username", "password");
        let book = create_book_db_entry("book");
        let shelf = create_shelf_db_entry(user_id, "Reading", 0);
        set_shelf_book(
            user_id,
            shelf,
            ShelfBookRequest {
                book_id: book,
                action: "add".to_string(),
            },
        )
        .unwrap();
        let shelves = get_shelves(user_id, Some(book)).unwrap();
        assert_eq!(Some(true), shelves[0].has_book);
        set_shelf_book(
            user_id,
            shelf,
            ShelfBookRequest {
                book_id: book,
                action: "remove".to_string(),
            },
        )
        .unwrap();
        let shelves = get_shelves(user_id, Some(book)).unwrap();
        assert_eq!(Some(false), shelves[0].has_book);
        cleanup();
    }

    #[test]
    fn duplicate_add_conflicts() {
        refresh_db();
        let user_id = create_user_db_entry("username", "password");
        let book = create_book_db_entry("book");
        let shelf = create_shelf_db_entry(user_id, "Reading", 0);
        let request = || ShelfBookRequest {
            book_id: book,
            action: "add".to_string(),
        };
        set_shelf_book(user_id, shelf, request()).unwrap();
        let res = set_shelf_book(user_id, shelf, request());
        assert_eq!(ShelfBookError::AlreadyOnShelf, res.unwrap_err());
        cleanup();
    }

    #[test]
    fn unknown_action_is_rejected() {
        refresh_db();
        let res = set_shelf_book(
            1,
            1,
            ShelfBookRequest {
                book_id: 1,
                action: "toggle".to_string(),
            },
        );
        assert_eq!(ShelfBookError::BadAction, res.unwrap_err());
        cleanup();
    }
}

mod shelf_books_tests {
    use crate::model::request::book_requests::ShelfBooksParams;
    use crate::shelves::service::shelf_books;
    use crate::test::*;

    fn no_filters() -> ShelfBooksParams {
        ShelfBooksParams {
            q: None,
            include: None,
            exclude: None,
            year_from: None,
            year_to: None,
            sort: None,
            dir: None,
        }
    }

    #[test]
    fn lists_the_shelved_books() {
        refresh_db();
        let user_id = create_user_db_entry("username", "password");
        let first = create_book_db_entry("first");
        let second = create_book_db_entry("second");
        create_book_db_entry("unshelved");
        let shelf = create_shelf_db_entry(user_id, "Reading", 0);
        add_book_to_shelf(shelf, first);
        add_book_to_shelf(shelf, second);
        let result = shelf_books(user_id, shelf, no_filters()).unwrap();
        assert_eq!(2, result.total);
        cleanup();
    }

    #[test]
    fn title_filter_narrows_the_list() {
        refresh_db();
        let user_id = create_user_db_entry("username", "password");
        let wanted = create_book_db_entry("The Fifth Season");
        let other = create_book_db_entry("The Stone Sky");
        let shelf = create_shelf_db_entry(user_id, "Reading", 0);
        add_book_to_shelf(shelf, wanted);
        add_book_to_shelf(shelf, other);
        let result = shelf_books(
            user_id,
            shelf,
            ShelfBooksParams {
                q: Some("fifth".to_string()),
                ..no_filters()
            },
        )
        .unwrap();
        assert_eq!(1, result.total);
        assert_eq!(wanted, result.books[0].id);
        cleanup();
    }

    #[test]
    fn tag_filter_matches_explore_semantics() {
        refresh_db();
        let user_id = create_user_db_entry("username", "password");
        let tagged = create_book_db_entry("tagged");
        let untagged = create_book_db_entry("untagged");
        let category = create_category_db_entry("genre", 0);
        let tag = create_tag_db_entry("fantasy", category);
        create_vote_db_entry(tagged, tag, user_id, 1);
        let shelf = create_shelf_db_entry(user_id, "Reading", 0);
        add_book_to_shelf(shelf, tagged);
        add_book_to_shelf(shelf, untagged);
        let result = shelf_books(
            user_id,
            shelf,
            ShelfBooksParams {
                include: Some(tag.to_string()),
                ..no_filters()
            },
        )
        .unwrap();
        assert_eq!(1, result.total);
        assert_eq!(tagged, result.books[0].id);
        cleanup();
    }
}
