use chrono::{TimeZone, Utc};
use moneta::db::{
    CategoryRepository, CategoryUpdate, NewCategory, NewUser, Store, UserRepository, UserUpdate,
};
use moneta::entities::users::UserRole;

async fn test_store() -> Store {
    // single connection so every query sees the same in-memory database
    Store::with_pool_options("sqlite::memory:", 1, 1)
        .await
        .expect("Failed to create store")
}

fn new_user(username: &str, email: &str) -> NewUser {
    NewUser {
        username: username.to_string(),
        hashed_secret_key: "$argon2id$v=19$m=8192,t=3,p=1$dGVzdA$aGFzaA".to_string(),
        email_address: email.to_string(),
        role: UserRole::User,
    }
}

#[tokio::test]
async fn test_add_then_get_by_id_round_trip() {
    let store = test_store().await;
    let users = store.users();

    let added = users.add(new_user("alice", "alice@example.com")).await.unwrap();
    assert!(added.id > 0);
    assert!(!added.is_email_verified);
    assert_eq!(added.failed_login_attempts, 0);
    assert!(added.updated_at.is_none());
    assert!(added.last_login_date.is_none());

    let fetched = users.get_by_id(added.id).await.unwrap().unwrap();
    assert_eq!(fetched, added);
}

#[tokio::test]
async fn test_get_by_username_and_email() {
    let store = test_store().await;
    let users = store.users();

    users.add(new_user("bob", "bob@example.com")).await.unwrap();

    let by_name = users.get_by_username("bob").await.unwrap();
    assert_eq!(by_name.unwrap().email_address, "bob@example.com");

    let by_email = users.get_by_email("bob@example.com").await.unwrap();
    assert_eq!(by_email.unwrap().username, "bob");

    // absence is a None, not an error
    assert!(users.get_by_username("nobody").await.unwrap().is_none());
    assert!(
        users
            .get_by_email("nonexistent@x.com")
            .await
            .unwrap()
            .is_none()
    );
}

#[tokio::test]
async fn test_duplicate_username_is_constraint_error() {
    let store = test_store().await;
    let users = store.users();

    users.add(new_user("carol", "carol@example.com")).await.unwrap();

    let err = users
        .add(new_user("carol", "other@example.com"))
        .await
        .unwrap_err();

    let db_err = err
        .downcast_ref::<sea_orm::DbErr>()
        .expect("constraint failure surfaces the database error");
    assert!(matches!(
        db_err.sql_err(),
        Some(sea_orm::SqlErr::UniqueConstraintViolation(_))
    ));
}

#[tokio::test]
async fn test_duplicate_email_is_constraint_error() {
    let store = test_store().await;
    let users = store.users();

    users.add(new_user("dave", "dave@example.com")).await.unwrap();

    let err = users
        .add(new_user("dave2", "dave@example.com"))
        .await
        .unwrap_err();

    let db_err = err.downcast_ref::<sea_orm::DbErr>().unwrap();
    assert!(matches!(
        db_err.sql_err(),
        Some(sea_orm::SqlErr::UniqueConstraintViolation(_))
    ));
}

#[tokio::test]
async fn test_update_replaces_mutable_fields() {
    let store = test_store().await;
    let users = store.users();

    let added = users.add(new_user("eve", "eve@example.com")).await.unwrap();
    let last_login = Utc.with_ymd_and_hms(2026, 1, 15, 9, 30, 0).unwrap();

    let updated = users
        .update(UserUpdate {
            id: added.id,
            username: "eve2".to_string(),
            hashed_secret_key: "$argon2id$v=19$m=8192,t=3,p=1$dGVzdA$bmV3".to_string(),
            email_address: "eve2@example.com".to_string(),
            is_email_verified: true,
            role: UserRole::Admin,
            last_login_date: Some(last_login),
            failed_login_attempts: 2,
        })
        .await
        .unwrap()
        .expect("row exists");

    assert_eq!(updated.username, "eve2");
    assert_eq!(updated.email_address, "eve2@example.com");
    assert!(updated.is_email_verified);
    assert_eq!(updated.role, UserRole::Admin);
    assert_eq!(updated.last_login_date, Some(last_login));
    assert_eq!(updated.failed_login_attempts, 2);
    assert!(updated.updated_at.is_some());
    // creation time never moves
    assert_eq!(updated.created_at, added.created_at);
}

#[tokio::test]
async fn test_update_missing_user_returns_none() {
    let store = test_store().await;
    let users = store.users();

    let result = users
        .update(UserUpdate {
            id: 9999,
            username: "ghost".to_string(),
            hashed_secret_key: "hash".to_string(),
            email_address: "ghost@example.com".to_string(),
            is_email_verified: false,
            role: UserRole::User,
            last_login_date: None,
            failed_login_attempts: 0,
        })
        .await
        .unwrap();

    assert!(result.is_none());
}

#[tokio::test]
async fn test_delete_is_idempotent() {
    let store = test_store().await;
    let users = store.users();

    let added = users.add(new_user("frank", "frank@example.com")).await.unwrap();

    assert!(users.delete(added.id).await.unwrap());
    assert!(users.get_by_id(added.id).await.unwrap().is_none());

    // second delete finds nothing and is still not an error
    assert!(!users.delete(added.id).await.unwrap());
}

#[tokio::test]
async fn test_admin_role_round_trips_as_text() {
    let store = test_store().await;
    let users = store.users();

    let added = users
        .add(NewUser {
            role: UserRole::Admin,
            ..new_user("root", "root@example.com")
        })
        .await
        .unwrap();

    let fetched = users.get_by_id(added.id).await.unwrap().unwrap();
    assert_eq!(fetched.role, UserRole::Admin);
}

#[tokio::test]
async fn test_list_all_users() {
    let store = test_store().await;
    let users = store.users();

    users.add(new_user("one", "one@example.com")).await.unwrap();
    users.add(new_user("two", "two@example.com")).await.unwrap();

    let all = users.list_all().await.unwrap();
    assert_eq!(all.len(), 2);
}

#[tokio::test]
async fn test_user_categories_are_owned_plus_defaults() {
    let store = test_store().await;
    let users = store.users();
    let categories = store.categories();

    let owner = users.add(new_user("grace", "grace@example.com")).await.unwrap();
    let other = users.add(new_user("heidi", "heidi@example.com")).await.unwrap();

    categories
        .add(NewCategory {
            user_id: None,
            name: "Food".to_string(),
            is_default: true,
        })
        .await
        .unwrap();
    categories
        .add(NewCategory {
            user_id: Some(owner.id),
            name: "Hobby".to_string(),
            is_default: false,
        })
        .await
        .unwrap();

    let visible: Vec<String> = categories
        .get_for_user(owner.id)
        .await
        .unwrap()
        .into_iter()
        .map(|c| c.name)
        .collect();
    assert_eq!(visible, vec!["Food".to_string(), "Hobby".to_string()]);

    let visible: Vec<String> = categories
        .get_for_user(other.id)
        .await
        .unwrap()
        .into_iter()
        .map(|c| c.name)
        .collect();
    assert_eq!(visible, vec!["Food".to_string()]);
}

#[tokio::test]
async fn test_category_matching_both_predicates_appears_once() {
    let store = test_store().await;
    let users = store.users();
    let categories = store.categories();

    // the schema itself stays loose: a row can be both owned and default
    let owner = users.add(new_user("ivan", "ivan@example.com")).await.unwrap();
    categories
        .add(NewCategory {
            user_id: Some(owner.id),
            name: "Both".to_string(),
            is_default: true,
        })
        .await
        .unwrap();

    let visible = categories.get_for_user(owner.id).await.unwrap();
    assert_eq!(visible.len(), 1);
    assert_eq!(visible[0].name, "Both");
}

#[tokio::test]
async fn test_category_update_and_delete() {
    let store = test_store().await;
    let categories = store.categories();

    let added = categories
        .add(NewCategory {
            user_id: None,
            name: "Rent".to_string(),
            is_default: true,
        })
        .await
        .unwrap();

    let updated = categories
        .update(CategoryUpdate {
            id: added.id,
            user_id: None,
            name: "Housing".to_string(),
            is_default: true,
        })
        .await
        .unwrap()
        .expect("row exists");
    assert_eq!(updated.name, "Housing");

    let missing = categories
        .update(CategoryUpdate {
            id: 9999,
            user_id: None,
            name: "Ghost".to_string(),
            is_default: false,
        })
        .await
        .unwrap();
    assert!(missing.is_none());

    assert!(categories.delete(added.id).await.unwrap());
    assert!(categories.get_by_id(added.id).await.unwrap().is_none());
    assert!(!categories.delete(added.id).await.unwrap());
}

#[tokio::test]
async fn test_deleting_user_cascades_to_owned_categories() {
    let store = test_store().await;
    let users = store.users();
    let categories = store.categories();

    let owner = users.add(new_user("judy", "judy@example.com")).await.unwrap();
    let owned = categories
        .add(NewCategory {
            user_id: Some(owner.id),
            name: "Travel".to_string(),
            is_default: false,
        })
        .await
        .unwrap();
    categories
        .add(NewCategory {
            user_id: None,
            name: "Food".to_string(),
            is_default: true,
        })
        .await
        .unwrap();

    users.delete(owner.id).await.unwrap();

    assert!(categories.get_by_id(owned.id).await.unwrap().is_none());
    // defaults survive their users
    let all = categories.list_all().await.unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].name, "Food");
}
