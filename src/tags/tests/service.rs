mod submit_vote_tests {
    use crate::books::service::get_book_tags;
    use crate::model::error::tag_errors::VoteError;
    use crate::model::request::tag_requests::VoteRequest;
    use crate::tags::service::submit_vote;
    use crate::test::*;

    #[test]
    fn submit_vote_works() {
        refresh_db();
        let user_id = create_user_db_entry("username", "password");
        let book_id = create_book_db_entry("book");
        let category_id = create_category_db_entry("genre", 0);
        let tag_id = create_tag_db_entry("fantasy", category_id);
        submit_vote(
            user_id,
            VoteRequest {
                book_id,
                tag_id,
                value: 1,
            },
        )
        .unwrap();
        let tags = get_book_tags(book_id, Some(user_id)).unwrap();
        assert_eq!(1, tags.categories.len());
        assert_eq!(1, tags.categories[0].tags[0].score);
        assert_eq!(1, tags.categories[0].tags[0].user_value);
        cleanup();
    }

    #[test]
    fn submit_vote_is_idempotent() {
        refresh_db();
        let user_id = create_user_db_entry("username", "password");
        let book_id = create_book_db_entry("book");
        let category_id = create_category_db_entry("genre", 0);
        let tag_id = create_tag_db_entry("fantasy", category_id);
        let request = || VoteRequest {
            book_id,
            tag_id,
            value: 1,
        };
        submit_vote(user_id, request()).unwrap();
        submit_vote(user_id, request()).unwrap();
        // the second identical vote must not double the contribution
        let tags = get_book_tags(book_id, Some(user_id)).unwrap();
        assert_eq!(1, tags.categories[0].tags[0].score);
        cleanup();
    }

    #[test]
    fn submit_vote_zero_removes_the_row() {
        refresh_db();
        let user_id = create_user_db_entry("username", "password");
        let book_id = create_book_db_entry("book");
        let category_id = create_category_db_entry("genre", 0);
        let tag_id = create_tag_db_entry("fantasy", category_id);
        submit_vote(
            user_id,
            VoteRequest {
                book_id,
                tag_id,
                value: 1,
            },
        )
        .unwrap();
        submit_vote(
            user_id,
            VoteRequest {
                book_id,
                tag_id,
                value: 0,
            },
        )
        .unwrap();
        // no rows left means the tag no longer shows up on the book at all
        let tags = get_book_tags(book_id, Some(user_id)).unwrap();
        assert!(tags.categories.is_empty());
        cleanup();
    }

    #[test]
    fn submit_vote_rejects_out_of_range_values() {
        refresh_db();
        let res = submit_vote(
            1,
            VoteRequest {
                book_id: 1,
                tag_id: 1,
                value: 2,
            },
        );
        assert_eq!(VoteError::BadValue, res.unwrap_err());
        cleanup();
    }

    #[test]
    fn submit_vote_book_not_found() {
        refresh_db();
        let user_id = create_user_db_entry("username", "password");
        let category_id = create_category_db_entry("genre", 0);
        let tag_id = create_tag_db_entry("fantasy", category_id);
        let res = submit_vote(
            user_id,
            VoteRequest {
                book_id: 999,
                tag_id,
                value: 1,
            },
        );
        assert_eq!(VoteError::BookNotFound, res.unwrap_err());
        cleanup();
    }
}

mod add_tag_tests {
    use crate::model::request::tag_requests::AddTagRequest;
    use crate::tags::service::add_tag;
    use crate::test::*;

    #[test]
    fn add_tag_returns_the_recomputed_record() {
        refresh_db();
        let user_id = create_user_db_entry("username", "password");
        let other_user = create_user_db_entry("other", "password");
        let book_id = create_book_db_entry("book");
        let category_id = create_category_db_entry("genre", 2);
        let tag_id = create_tag_db_entry("fantasy", category_id);
        create_vote_db_entry(book_id, tag_id, other_user, 1);
        let tag = add_tag(user_id, AddTagRequest { book_id, tag_id }).unwrap();
        assert_eq!(tag_id, tag.id);
        assert_eq!("fantasy", tag.name);
        assert_eq!("genre", tag.category_name);
        assert_eq!(2, tag.category_display_order);
        // the other user's vote plus our upserted +1
        assert_eq!(2, tag.score);
        assert_eq!(1, tag.user_value);
        cleanup();
    }

    #[test]
    fn add_tag_twice_does_not_double_count() {
        refresh_db();
        let user_id = create_user_db_entry("username", "password");
        let book_id = create_book_db_entry("book");
        let category_id = create_category_db_entry("genre", 0);
        let tag_id = create_tag_db_entry("fantasy", category_id);
        add_tag(user_id, AddTagRequest { book_id, tag_id }).unwrap();
        let tag = add_tag(user_id, AddTagRequest { book_id, tag_id }).unwrap();
        assert_eq!(1, tag.score);
        cleanup();
    }
}

mod my_tags_tests {
    use crate::model::error::tag_errors::MyTagsError;
    use crate::tags::service::{my_tags, MyTags};
    use crate::test::*;

    #[test]
    fn my_tags_upvoted_counts_books() {
        refresh_db();
        let user_id = create_user_db_entry("username", "password");
        let first_book = create_book_db_entry("first");
        let second_book = create_book_db_entry("second");
        let category_id = create_category_db_entry("genre", 0);
        let fantasy = create_tag_db_entry("fantasy", category_id);
        let grimdark = create_tag_db_entry("grimdark", category_id);
        create_vote_db_entry(first_book, fantasy, user_id, 1);
        create_vote_db_entry(second_book, fantasy, user_id, 1);
        create_vote_db_entry(first_book, grimdark, user_id, 1);
        // a downvote doesn't belong on the upvoted tab
        create_vote_db_entry(second_book, grimdark, user_id, -1);
        let result = my_tags(user_id, "upvoted").unwrap();
        let tags = match result {
            MyTags::Voted(tags) => tags,
            MyTags::Preferred(_) => panic!("expected the voted shape"),
        };
        assert_eq!(2, tags.len());
        assert_eq!("fantasy", tags[0].name);
        assert_eq!(2, tags[0].book_count);
        assert_eq!("grimdark", tags[1].name);
        assert_eq!(1, tags[1].book_count);
        cleanup();
    }

    #[test]
    fn my_tags_saved_orders_by_most_recent() {
        refresh_db();
        let user_id = create_user_db_entry("username", "password");
        let category_id = create_category_db_entry("genre", 0);
        let fantasy = create_tag_db_entry("fantasy", category_id);
        crate::preferences::service::toggle_preference(user_id, fantasy, "is_saved").unwrap();
        let result = my_tags(user_id, "saved").unwrap();
        let tags = match result {
            MyTags::Preferred(tags) => tags,
            MyTags::Voted(_) => panic!("expected the preferred shape"),
        };
        assert_eq!(1, tags.len());
        assert_eq!(fantasy, tags[0].id);
        cleanup();
    }

    #[test]
    fn my_tags_bad_tab() {
        refresh_db();
        let res = my_tags(1, "starred");
        assert_eq!(MyTagsError::BadTab, res.unwrap_err());
        cleanup();
    }
}

mod tag_books_tests {
    use crate::model::error::tag_errors::TagBooksError;
    use crate::tags::service::tag_books;
    use crate::test::*;

    #[test]
    fn tag_books_sorts_by_score() {
        refresh_db();
        let user_id = create_user_db_entry("username", "password");
        let other_user = create_user_db_entry("other", "password");
        let first_book = create_book_db_entry("first");
        let second_book = create_book_db_entry("second");
        let category_id = create_category_db_entry("genre", 0);
        let tag_id = create_tag_db_entry("fantasy", category_id);
        create_vote_db_entry(first_book, tag_id, user_id, 1);
        create_vote_db_entry(second_book, tag_id, user_id, 1);
        create_vote_db_entry(second_book, tag_id, other_user, 1);
        let result = tag_books(Some(user_id), tag_id, false, "score", "desc").unwrap();
        assert_eq!(2, result.total);
        assert_eq!(second_book, result.books[0].id);
        assert_eq!(2, result.books[0].tag_score);
        assert_eq!(first_book, result.books[1].id);
        assert!(result.books[0].user_tagged);
        cleanup();
    }

    #[test]
    fn tag_books_only_mine() {
        refresh_db();
        let user_id = create_user_db_entry("username", "password");
        let other_user = create_user_db_entry("other", "password");
        let first_book = create_book_db_entry("first");
        let second_book = create_book_db_entry("second");
        let category_id = create_category_db_entry("genre", 0);
        let tag_id = create_tag_db_entry("fantasy", category_id);
        create_vote_db_entry(first_book, tag_id, user_id, 1);
        create_vote_db_entry(second_book, tag_id, other_user, 1);
        let result = tag_books(Some(user_id), tag_id, true, "score", "desc").unwrap();
        assert_eq!(1, result.total);
        assert_eq!(first_book, result.books[0].id);
        cleanup();
    }

    #[test]
    fn tag_books_unknown_tag() {
        refresh_db();
        let res = tag_books(None, 999, false, "score", "desc");
        assert_eq!(TagBooksError::TagNotFound, res.unwrap_err());
        cleanup();
    }
}

mod get_tag_tests {
    use crate::model::error::tag_errors::GetTagError;
    use crate::tags::service::{get_tag, search_tags};
    use crate::test::*;

    #[test]
    fn get_tag_includes_category_name() {
        refresh_db();
        let category_id = create_category_db_entry("genre", 0);
        let tag_id = create_tag_db_entry("fantasy", category_id);
        let tag = get_tag(tag_id).unwrap();
        assert_eq!("fantasy", tag.name);
        assert_eq!("genre", tag.category_name);
        cleanup();
    }

    #[test]
    fn get_tag_not_found() {
        refresh_db();
        let res = get_tag(1);
        assert_eq!(GetTagError::TagNotFound, res.unwrap_err());
        cleanup();
    }

    #[test]
    fn search_tags_empty_query_skips_the_db() {
        refresh_db();
        let found = search_tags("   ".to_string()).unwrap();
        assert!(found.is_empty());
        cleanup();
    }

    #[test]
    fn search_tags_matches_substrings() {
        refresh_db();
        let category_id = create_category_db_entry("genre", 0);
        create_tag_db_entry("dark fantasy", category_id);
        create_tag_db_entry("romance", category_id);
        let found = search_tags("fanta".to_string()).unwrap();
        assert_eq!(1, found.len());
        assert_eq!("dark fantasy", found[0].name);
        cleanup();
    }
}
