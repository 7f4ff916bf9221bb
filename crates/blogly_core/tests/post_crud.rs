use blogly_core::db::open_db_in_memory;
use blogly_core::{
    PostService, ServiceError, SqlitePostRepository, SqliteTagRepository, SqliteUserRepository,
    TagService, UserId, UserService,
};
use rusqlite::{params, Connection};

fn add_user(conn: &mut Connection) -> UserId {
    let mut service = UserService::new(SqliteUserRepository::new(conn));
    service
        .create_user("Ann", "Lee", "1990-01-01", None)
        .unwrap()
        .id
}

fn add_tag(conn: &mut Connection, name: &str) -> i64 {
    let mut service = TagService::new(SqliteTagRepository::new(conn));
    service.create_tag(name).unwrap().id
}

fn link_count(conn: &Connection, post_id: i64) -> i64 {
    conn.query_row(
        "SELECT COUNT(*) FROM post_tags WHERE post_id = ?1;",
        [post_id],
        |row| row.get(0),
    )
    .unwrap()
}

#[test]
fn create_post_persists_fields_and_initial_tags() {
    let mut conn = open_db_in_memory().unwrap();
    let user_id = add_user(&mut conn);
    let go = add_tag(&mut conn, "go");
    let rust = add_tag(&mut conn, "rust");

    let mut service = PostService::new(SqlitePostRepository::new(&mut conn));
    let post = service
        .create_post(user_id, "Hi", "World", &[rust, go])
        .unwrap();

    assert!(post.id > 0);
    assert_eq!(post.user_id, user_id);
    assert_eq!(post.title, "Hi");
    assert_eq!(post.content, "World");
    assert!(post.created_at > 0);
    let names: Vec<&str> = post.tags.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, vec!["go", "rust"]);
}

#[test]
fn create_post_for_missing_user_returns_not_found() {
    let mut conn = open_db_in_memory().unwrap();
    let mut service = PostService::new(SqlitePostRepository::new(&mut conn));

    let err = service.create_post(404, "Hi", "World", &[]).unwrap_err();
    assert!(matches!(
        err,
        ServiceError::NotFound {
            entity: "user",
            id: 404,
        }
    ));
}

#[test]
fn create_post_rejects_blank_title_and_content() {
    let mut conn = open_db_in_memory().unwrap();
    let user_id = add_user(&mut conn);

    let mut service = PostService::new(SqlitePostRepository::new(&mut conn));
    assert!(matches!(
        service.create_post(user_id, "  ", "body", &[]),
        Err(ServiceError::Validation(_))
    ));
    assert!(matches!(
        service.create_post(user_id, "title", "", &[]),
        Err(ServiceError::Validation(_))
    ));
}

#[test]
fn unknown_tag_ids_are_silently_dropped() {
    let mut conn = open_db_in_memory().unwrap();
    let user_id = add_user(&mut conn);
    let go = add_tag(&mut conn, "go");

    let mut service = PostService::new(SqlitePostRepository::new(&mut conn));
    let post = service
        .create_post(user_id, "Hi", "World", &[go, 9999, go])
        .unwrap();

    let names: Vec<&str> = post.tags.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, vec!["go"]);
}

#[test]
fn update_post_replaces_fields_and_whole_tag_set() {
    let mut conn = open_db_in_memory().unwrap();
    let user_id = add_user(&mut conn);
    let go = add_tag(&mut conn, "go");
    let rust = add_tag(&mut conn, "rust");

    let mut service = PostService::new(SqlitePostRepository::new(&mut conn));
    let post = service.create_post(user_id, "Hi", "World", &[go]).unwrap();

    let updated = service
        .update_post(post.id, "Hi2", "World2", &[rust])
        .unwrap();
    assert_eq!(updated.title, "Hi2");
    assert_eq!(updated.content, "World2");
    assert_eq!(updated.created_at, post.created_at);
    let names: Vec<&str> = updated.tags.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, vec!["rust"]);

    // Applying the same tag set again yields identical rows.
    let repeated = service
        .update_post(post.id, "Hi2", "World2", &[rust])
        .unwrap();
    assert_eq!(repeated.tags, updated.tags);

    // An empty set clears every link.
    let cleared = service.update_post(post.id, "Hi2", "World2", &[]).unwrap();
    assert!(cleared.tags.is_empty());
}

#[test]
fn update_missing_post_returns_not_found() {
    let mut conn = open_db_in_memory().unwrap();
    let mut service = PostService::new(SqlitePostRepository::new(&mut conn));

    let err = service.update_post(5, "t", "c", &[]).unwrap_err();
    assert!(matches!(err, ServiceError::NotFound { entity: "post", .. }));
}

#[test]
fn delete_post_leaves_zero_association_rows() {
    let mut conn = open_db_in_memory().unwrap();
    let user_id = add_user(&mut conn);
    let go = add_tag(&mut conn, "go");
    let rust = add_tag(&mut conn, "rust");

    let post_id = {
        let mut service = PostService::new(SqlitePostRepository::new(&mut conn));
        service
            .create_post(user_id, "Hi", "World", &[go, rust])
            .unwrap()
            .id
    };
    assert_eq!(link_count(&conn, post_id), 2);

    let mut service = PostService::new(SqlitePostRepository::new(&mut conn));
    service.delete_post(post_id).unwrap();

    assert_eq!(link_count(&conn, post_id), 0);
    let tag_count: i64 = conn
        .query_row("SELECT COUNT(*) FROM tags;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(tag_count, 2, "tags persist after their last post is gone");
}

#[test]
fn list_posts_by_user_is_newest_first_and_owner_scoped() {
    let mut conn = open_db_in_memory().unwrap();
    let ann = add_user(&mut conn);
    let bea = {
        let mut service = UserService::new(SqliteUserRepository::new(&mut conn));
        service
            .create_user("Bea", "Cho", "1985-06-15", None)
            .unwrap()
            .id
    };

    let (old_id, new_id) = {
        let mut service = PostService::new(SqlitePostRepository::new(&mut conn));
        let old = service.create_post(ann, "old", "body", &[]).unwrap().id;
        let new = service.create_post(ann, "new", "body", &[]).unwrap().id;
        service.create_post(bea, "other", "body", &[]).unwrap();
        (old, new)
    };
    conn.execute(
        "UPDATE blog_posts SET created_at = 1000 WHERE id = ?1;",
        params![old_id],
    )
    .unwrap();
    conn.execute(
        "UPDATE blog_posts SET created_at = 2000 WHERE id = ?1;",
        params![new_id],
    )
    .unwrap();

    let service = PostService::new(SqlitePostRepository::new(&mut conn));
    let posts = service.list_posts_by_user(ann).unwrap();
    assert_eq!(posts.len(), 2);
    assert_eq!(posts[0].id, new_id);
    assert_eq!(posts[1].id, old_id);
}

#[test]
fn get_post_resolves_tag_set_or_returns_not_found() {
    let mut conn = open_db_in_memory().unwrap();
    let user_id = add_user(&mut conn);
    let go = add_tag(&mut conn, "go");

    let mut service = PostService::new(SqlitePostRepository::new(&mut conn));
    let created = service.create_post(user_id, "Hi", "World", &[go]).unwrap();

    let fetched = service.get_post(created.id).unwrap();
    assert_eq!(fetched, created);

    let err = service.get_post(999).unwrap_err();
    assert!(matches!(err, ServiceError::NotFound { entity: "post", .. }));
}
