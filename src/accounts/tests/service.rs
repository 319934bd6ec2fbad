mod create_user_tests {
    use crate::accounts::service::create_user;
    use crate::guard::{Auth, ValidateResult};
    use crate::model::error::account_errors::CreateUserError;
    use crate::model::request::account_requests::NewUserRequest;
    use crate::test::*;

    #[test]
    fn created_credentials_validate() {
        refresh_db();
        create_user(NewUserRequest {
            username: "username".to_string(),
            password: "password".to_string(),
        })
        .unwrap();
        let auth = Auth {
            username: "username".to_string(),
            password: "password".to_string(),
        };
        assert!(matches!(auth.validate(), ValidateResult::Ok(1)));
        cleanup();
    }

    #[test]
    fn wrong_password_does_not_validate() {
        refresh_db();
        create_user(NewUserRequest {
            username: "username".to_string(),
            password: "password".to_string(),
        })
        .unwrap();
        let auth = Auth {
            username: "username".to_string(),
            password: "wrong".to_string(),
        };
        assert!(matches!(auth.validate(), ValidateResult::Invalid));
        cleanup();
    }

    #[test]
    fn usernames_must_be_unique() {
        refresh_db();
        create_user(NewUserRequest {
            username: "username".to_string(),
            password: "password".to_string(),
        })
        .unwrap();
        let res = create_user(NewUserRequest {
            username: "username".to_string(),
            password: "different".to_string(),
        });
        assert_eq!(CreateUserError::UsernameTaken, res.unwrap_err());
        cleanup();
    }

    #[test]
    fn bad_usernames_and_passwords_are_rejected() {
        refresh_db();
        let res = create_user(NewUserRequest {
            username: "a".to_string(),
            password: "password".to_string(),
        });
        assert_eq!(CreateUserError::BadUsername, res.unwrap_err());
        let res = create_user(NewUserRequest {
            username: "has spaces".to_string(),
            password: "password".to_string(),
        });
        assert_eq!(CreateUserError::BadUsername, res.unwrap_err());
        let res = create_user(NewUserRequest {
            username: "username".to_string(),
            password: "short".to_string(),
        });
        assert_eq!(CreateUserError::BadPassword, res.unwrap_err());
        cleanup();
    }
}

mod update_account_tests {
    use crate::accounts::service::update_account;
    use crate::guard::{Auth, ValidateResult};
    use crate::model::request::account_requests::UpdateAccountRequest;
    use crate::test::*;

    #[test]
    fn password_change_invalidates_the_old_one() {
        refresh_db();
        let user_id = create_user_db_entry("username", "password");
        update_account(
            user_id,
            UpdateAccountRequest {
                username: None,
                password: Some("new password".to_string()),
            },
        )
        .unwrap();
        let old = Auth {
            username: "username".to_string(),
            password: "password".to_string(),
        };
        assert!(matches!(old.validate(), ValidateResult::Invalid));
        let new = Auth {
            username: "username".to_string(),
            password: "new password".to_string(),
        };
        assert!(matches!(new.validate(), ValidateResult::Ok(_)));
        cleanup();
    }

    #[test]
    fn username_change_keeps_the_password() {
        refresh_db();
        let user_id = create_user_db_entry("username", "password");
        update_account(
            user_id,
            UpdateAccountRequest {
                username: Some("renamed".to_string()),
                password: None,
            },
        )
        .unwrap();
        let auth = Auth {
            username: "renamed".to_string(),
            password: "password".to_string(),
        };
        assert!(matches!(auth.validate(), ValidateResult::Ok(_)));
        cleanup();
    }
}

mod delete_account_tests {
    use crate::accounts::service::delete_account;
    use crate::repository::open_connection;
    use crate::tags::repository as tag_repository;
    use crate::test::*;

    #[test]
    fn deleting_an_account_removes_its_votes_and_shelves() {
        refresh_db();
        let user_id = create_user_db_entry("username", "password");
        let book = create_book_db_entry("book");
        let category = create_category_db_entry("genre", 0);
        let tag = create_tag_db_entry("fantasy", category);
        create_vote_db_entry(book, tag, user_id, 1);
        let shelf = create_shelf_db_entry(user_id, "Reading", 0);
        add_book_to_shelf(shelf, book);
        delete_account(user_id).unwrap();
        let con = open_connection();
        let votes = tag_repository::get_votes_for_book(book, &con).unwrap();
        let shelves = crate::shelves::repository::get_shelves_for_user(user_id, &con).unwrap();
        con.close().unwrap();
        assert!(votes.is_empty());
        assert!(shelves.is_empty());
        cleanup();
    }
}
