//! Post<->tag association management.
//!
//! # Responsibility
//! - Rewrite the full link set between one post and its tags.
//! - Resolve requested tag ids against existing tags.
//!
//! # Invariants
//! - Replacement is a set operation: applying the same id set twice yields
//!   identical rows, and an empty set clears every link.
//! - Unknown tag ids are dropped silently; callers pre-filter from a known
//!   tag list.
//! - All rewrites happen inside a caller-owned transaction.

use crate::model::tag::{Tag, TagId};
use crate::repo::RepoResult;
use rusqlite::{params, Connection, Transaction};
use std::collections::BTreeSet;

/// Replaces all association rows for `post_id` with the requested id set.
///
/// The caller owns the surrounding transaction and is responsible for
/// verifying that the post exists.
pub(crate) fn replace_post_tags(
    tx: &Transaction<'_>,
    post_id: i64,
    tag_ids: &[TagId],
) -> RepoResult<()> {
    tx.execute("DELETE FROM post_tags WHERE post_id = ?1;", [post_id])?;

    for tag_id in dedup_tag_ids(tag_ids) {
        // Resolves against tags in the same statement; an unknown id
        // inserts zero rows instead of failing.
        tx.execute(
            "INSERT INTO post_tags (post_id, tag_id)
             SELECT ?1, id FROM tags WHERE id = ?2;",
            params![post_id, tag_id],
        )?;
    }

    Ok(())
}

/// Loads the resolved tag set for one post, sorted by name.
pub(crate) fn load_tags_for_post(conn: &Connection, post_id: i64) -> RepoResult<Vec<Tag>> {
    let mut stmt = conn.prepare(
        "SELECT t.id, t.name
         FROM post_tags pt
         INNER JOIN tags t ON t.id = pt.tag_id
         WHERE pt.post_id = ?1
         ORDER BY t.name ASC;",
    )?;
    let mut rows = stmt.query([post_id])?;
    let mut tags = Vec::new();
    while let Some(row) = rows.next()? {
        tags.push(Tag {
            id: row.get("id")?,
            name: row.get("name")?,
        });
    }
    Ok(tags)
}

/// Deduplicates requested ids so the composite primary key never trips on
/// repeated input.
fn dedup_tag_ids(tag_ids: &[TagId]) -> Vec<TagId> {
    let unique: BTreeSet<TagId> = tag_ids.iter().copied().collect();
    unique.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::dedup_tag_ids;

    #[test]
    fn dedup_removes_repeats_and_sorts() {
        assert_eq!(dedup_tag_ids(&[3, 1, 3, 2, 1]), vec![1, 2, 3]);
        assert!(dedup_tag_ids(&[]).is_empty());
    }
}
