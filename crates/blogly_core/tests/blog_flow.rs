//! End-to-end flow across users, posts and tags on one store instance.

use blogly_core::db::open_db_in_memory;
use blogly_core::{
    PostService, ServiceError, SqlitePostRepository, SqliteTagRepository, SqliteUserRepository,
    TagService, UserService,
};

#[test]
fn user_post_tag_lifecycle() {
    let mut conn = open_db_in_memory().unwrap();

    let user = {
        let mut users = UserService::new(SqliteUserRepository::new(&mut conn));
        users
            .create_user("Ann", "Lee", "1990-01-01", Some(""))
            .unwrap()
    };
    assert_eq!(user.full_name(), "Ann Lee");

    let post = {
        let mut posts = PostService::new(SqlitePostRepository::new(&mut conn));
        posts.create_post(user.id, "Hi", "World", &[]).unwrap()
    };
    assert!(post.tags.is_empty());

    let go = {
        let mut tags = TagService::new(SqliteTagRepository::new(&mut conn));
        tags.create_tag("go").unwrap()
    };

    let updated = {
        let mut posts = PostService::new(SqlitePostRepository::new(&mut conn));
        posts
            .update_post(post.id, "Hi2", "World2", &[go.id])
            .unwrap()
    };
    assert_eq!(updated.title, "Hi2");
    assert_eq!(updated.content, "World2");
    assert_eq!(updated.tags, vec![go.clone()]);

    {
        let mut users = UserService::new(SqliteUserRepository::new(&mut conn));
        users.delete_user(user.id).unwrap();
    }

    // Delete cascades: the post no longer resolves, the tag survives.
    {
        let posts = PostService::new(SqlitePostRepository::new(&mut conn));
        let err = posts.get_post(post.id).unwrap_err();
        assert!(matches!(err, ServiceError::NotFound { entity: "post", .. }));
    }

    let tags = TagService::new(SqliteTagRepository::new(&mut conn));
    assert_eq!(tags.list_tags().unwrap(), vec![go]);
}
