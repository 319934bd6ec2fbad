use rusqlite::Connection;

use crate::model::repository::{Tag, TagCategory, VoteRecord};

/// retrieves the tag with the passed id, without its category
pub fn get_tag(id: u32, con: &Connection) -> Result<Tag, rusqlite::Error> {
    let mut pst = con.prepare(include_str!("../assets/queries/tags/get_tag.sql"))?;
    pst.query_row(rusqlite::params![id], tag_mapper)
}

/// retrieves the tag with the passed id joined with its category
pub fn get_tag_detail(id: u32, con: &Connection) -> Result<(Tag, TagCategory), rusqlite::Error> {
    let mut pst = con.prepare(include_str!("../assets/queries/tags/get_tag_detail.sql"))?;
    pst.query_row(rusqlite::params![id], tag_with_category_mapper)
}

/// case-insensitively searches tag names for the passed text
pub fn search_tags(
    query: &str,
    limit: u32,
    con: &Connection,
) -> Result<Vec<(Tag, TagCategory)>, rusqlite::Error> {
    let mut pst = con.prepare(include_str!("../assets/queries/tags/search_tags.sql"))?;
    let rows = pst.query_map(rusqlite::params![query, limit], tag_with_category_mapper)?;
    rows.collect()
}

pub fn get_categories(con: &Connection) -> Result<Vec<TagCategory>, rusqlite::Error> {
    let mut pst = con.prepare(include_str!("../assets/queries/tags/get_categories.sql"))?;
    let rows = pst.query_map([], |row| {
        Ok(TagCategory {
            id: row.get(0)?,
            name: row.get(1)?,
            display_order: row.get(2)?,
        })
    })?;
    rows.collect()
}

/// pulls the passed tags joined with their categories. Ids that don't resolve
/// are silently absent from the result
pub fn get_tags_with_categories(
    tag_ids: &[u32],
    con: &Connection,
) -> Result<Vec<(Tag, TagCategory)>, rusqlite::Error> {
    if tag_ids.is_empty() {
        return Ok(Vec::new());
    }
    let in_clause: Vec<String> = tag_ids.iter().map(|it| it.to_string()).collect();
    let formatted_query = format!(
        include_str!("../assets/queries/tags/get_tags_with_categories.sql"),
        in_clause.join(",")
    );
    let mut pst = con.prepare(formatted_query.as_str())?;
    let rows = pst.query_map([], tag_with_category_mapper)?;
    rows.collect()
}

/// writes the user's vote for a (book, tag) pair, replacing any previous one.
/// The unique constraint on (bookId, tagId, userId) is what makes a repeat
/// vote an update instead of a second row
pub fn upsert_vote(
    book_id: u32,
    tag_id: u32,
    user_id: u32,
    value: i64,
    con: &Connection,
) -> Result<(), rusqlite::Error> {
    let mut pst = con.prepare(include_str!("../assets/queries/votes/upsert_vote.sql"))?;
    pst.execute(rusqlite::params![book_id, tag_id, user_id, value])?;
    Ok(())
}

/// removes the user's vote row entirely; absent rows and 0 votes read the same
pub fn delete_vote(
    book_id: u32,
    tag_id: u32,
    user_id: u32,
    con: &Connection,
) -> Result<(), rusqlite::Error> {
    let mut pst = con.prepare(include_str!("../assets/queries/votes/delete_vote.sql"))?;
    pst.execute(rusqlite::params![book_id, tag_id, user_id])?;
    Ok(())
}

pub fn get_votes_for_book(book_id: u32, con: &Connection) -> Result<Vec<VoteRecord>, rusqlite::Error> {
    let mut pst = con.prepare(include_str!("../assets/queries/votes/votes_for_book.sql"))?;
    let rows = pst.query_map(rusqlite::params![book_id], vote_mapper)?;
    rows.collect()
}

pub fn get_votes_for_book_and_tag(
    book_id: u32,
    tag_id: u32,
    con: &Connection,
) -> Result<Vec<VoteRecord>, rusqlite::Error> {
    let mut pst = con.prepare(include_str!(
        "../assets/queries/votes/votes_for_book_and_tag.sql"
    ))?;
    let rows = pst.query_map(rusqlite::params![book_id, tag_id], vote_mapper)?;
    rows.collect()
}

pub fn get_votes_for_tag(tag_id: u32, con: &Connection) -> Result<Vec<VoteRecord>, rusqlite::Error> {
    let mut pst = con.prepare(include_str!("../assets/queries/votes/votes_for_tag.sql"))?;
    let rows = pst.query_map(rusqlite::params![tag_id], vote_mapper)?;
    rows.collect()
}

pub fn get_votes_for_tag_by_user(
    tag_id: u32,
    user_id: u32,
    con: &Connection,
) -> Result<Vec<VoteRecord>, rusqlite::Error> {
    let mut pst = con.prepare(include_str!(
        "../assets/queries/votes/votes_for_tag_by_user.sql"
    ))?;
    let rows = pst.query_map(rusqlite::params![tag_id, user_id], vote_mapper)?;
    rows.collect()
}

/// pulls every vote row touching any of the passed books in one query
pub fn get_votes_for_books(
    book_ids: &[u32],
    con: &Connection,
) -> Result<Vec<VoteRecord>, rusqlite::Error> {
    if book_ids.is_empty() {
        return Ok(Vec::new());
    }
    let in_clause: Vec<String> = book_ids.iter().map(|it| it.to_string()).collect();
    let formatted_query = format!(
        include_str!("../assets/queries/votes/votes_for_books.sql"),
        in_clause.join(",")
    );
    let mut pst = con.prepare(formatted_query.as_str())?;
    let rows = pst.query_map([], vote_mapper)?;
    rows.collect()
}

pub fn get_votes_by_user_and_value(
    user_id: u32,
    value: i64,
    con: &Connection,
) -> Result<Vec<VoteRecord>, rusqlite::Error> {
    let mut pst = con.prepare(include_str!(
        "../assets/queries/votes/votes_by_user_and_value.sql"
    ))?;
    let rows = pst.query_map(rusqlite::params![user_id, value], vote_mapper)?;
    rows.collect()
}

fn tag_mapper(row: &rusqlite::Row) -> Result<Tag, rusqlite::Error> {
    Ok(Tag {
        id: row.get(0)?,
        name: row.get(1)?,
        description: row.get(2)?,
        category_id: row.get(3)?,
    })
}

/// 1. tag id
/// 2. tag name
/// 3. tag description
/// 4. category id on the tag
/// 5. category id
/// 6. category name
/// 7. category display order
fn tag_with_category_mapper(row: &rusqlite::Row) -> Result<(Tag, TagCategory), rusqlite::Error> {
    let tag = Tag {
        id: row.get(0)?,
        name: row.get(1)?,
        description: row.get(2)?,
        category_id: row.get(3)?,
    };
    let category = TagCategory {
        id: row.get(4)?,
        name: row.get(5)?,
        display_order: row.get(6)?,
    };
    Ok((tag, category))
}

/// 1. bookId
/// 2. tagId
/// 3. userId
/// 4. value
fn vote_mapper(row: &rusqlite::Row) -> Result<VoteRecord, rusqlite::Error> {
    Ok(VoteRecord {
        book_id: row.get(0)?,
        tag_id: row.get(1)?,
        user_id: row.get(2)?,
        value: row.get(3)?,
    })
}
