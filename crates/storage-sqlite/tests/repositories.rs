use std::sync::Arc;
use std::time::Duration;

use tempfile::TempDir;

use leadhub_core::changes::{ChangeFeed, ChangeKind};
use leadhub_core::errors::{DatabaseError, Error};
use leadhub_core::leads::{LeadRepositoryTrait, NewLead};
use leadhub_core::users::{NewUser, UserRepositoryTrait, DEFAULT_ROLE};
use leadhub_storage_sqlite::db::{self, write_actor};
use leadhub_storage_sqlite::{DbPool, LeadRepository, SqliteChangeFeed, UserRepository};

struct TestDb {
    _tmp: TempDir,
    pool: Arc<DbPool>,
    writer: db::WriteHandle,
    change_feed: Arc<SqliteChangeFeed>,
}

fn setup() -> TestDb {
    let tmp = tempfile::tempdir().unwrap();
    let db_path = db::init(tmp.path().join("test.db").to_str().unwrap()).unwrap();
    let pool = db::create_pool(&db_path).unwrap();
    db::run_migrations(&pool).unwrap();
    let writer = write_actor::spawn_writer((*pool).clone());
    TestDb {
        _tmp: tmp,
        pool,
        writer,
        change_feed: Arc::new(SqliteChangeFeed::new(16)),
    }
}

fn new_user(clerk_id: &str) -> NewUser {
    NewUser {
        clerk_id: clerk_id.to_string(),
        email: format!("{clerk_id}@acme.com"),
        role: DEFAULT_ROLE.to_string(),
    }
}

fn new_lead(name: &str) -> NewLead {
    NewLead {
        name: name.to_string(),
        email: "lead@acme.com".to_string(),
        phone: None,
        notes: None,
        owner_clerk_id: "user_abc".to_string(),
        owner_email: None,
    }
}

#[tokio::test]
async fn insert_and_find_user_by_clerk_id() {
    let test_db = setup();
    let repo = UserRepository::new(test_db.pool.clone(), test_db.writer.clone());

    assert!(repo.find_by_clerk_id("user_abc").unwrap().is_none());

    let created = repo.insert_new_user(new_user("user_abc")).await.unwrap();
    assert_eq!(created.clerk_id, "user_abc");
    assert_eq!(created.role, "SALES");

    let found = repo.find_by_clerk_id("user_abc").unwrap().unwrap();
    assert_eq!(found, created);
}

#[tokio::test]
async fn duplicate_clerk_id_is_a_unique_violation() {
    let test_db = setup();
    let repo = UserRepository::new(test_db.pool.clone(), test_db.writer.clone());

    repo.insert_new_user(new_user("user_abc")).await.unwrap();
    let err = repo.insert_new_user(new_user("user_abc")).await.unwrap_err();

    assert!(
        matches!(
            err,
            Error::Database(DatabaseError::UniqueViolation(_) | DatabaseError::Internal(_))
        ),
        "got {err:?}"
    );

    // The constraint left exactly one row behind.
    assert!(repo.find_by_clerk_id("user_abc").unwrap().is_some());
}

#[tokio::test]
async fn leads_are_listed_newest_first_with_their_owner() {
    let test_db = setup();
    let users = UserRepository::new(test_db.pool.clone(), test_db.writer.clone());
    let leads = LeadRepository::new(
        test_db.pool.clone(),
        test_db.writer.clone(),
        test_db.change_feed.clone(),
    );

    let owner = users.insert_new_user(new_user("user_abc")).await.unwrap();

    for name in ["first", "second", "third"] {
        leads
            .insert_new_lead(new_lead(name), owner.id.clone())
            .await
            .unwrap();
        // Distinct creation timestamps so the ordering is deterministic.
        tokio::time::sleep(Duration::from_millis(5)).await;
    }

    let listed = leads.load_leads_with_owners().unwrap();
    let names: Vec<&str> = listed.iter().map(|l| l.lead.name.as_str()).collect();
    assert_eq!(names, ["third", "second", "first"]);
    assert!(listed.iter().all(|l| l.owner.clerk_id == "user_abc"));
    assert!(listed.iter().all(|l| l.lead.owner_id == owner.id));
}

#[tokio::test]
async fn insert_publishes_a_change_notification_after_commit() {
    let test_db = setup();
    let users = UserRepository::new(test_db.pool.clone(), test_db.writer.clone());
    let leads = LeadRepository::new(
        test_db.pool.clone(),
        test_db.writer.clone(),
        test_db.change_feed.clone(),
    );

    let owner = users.insert_new_user(new_user("user_abc")).await.unwrap();

    let mut rx = test_db.change_feed.subscribe();
    let created = leads
        .insert_new_lead(new_lead("John Smith"), owner.id.clone())
        .await
        .unwrap();

    let notification = rx.try_recv().unwrap();
    assert_eq!(notification.kind, ChangeKind::Insert);
    let (_, state) = notification.row_state();
    let state = state.unwrap();
    assert_eq!(state["id"], created.id.as_str());
    assert_eq!(state["name"], "John Smith");

    // Exactly one notification per write.
    assert!(rx.try_recv().is_err());
}

#[tokio::test]
async fn subscribers_joining_late_see_no_history() {
    let test_db = setup();
    let users = UserRepository::new(test_db.pool.clone(), test_db.writer.clone());
    let leads = LeadRepository::new(
        test_db.pool.clone(),
        test_db.writer.clone(),
        test_db.change_feed.clone(),
    );

    let owner = users.insert_new_user(new_user("user_abc")).await.unwrap();
    leads
        .insert_new_lead(new_lead("early"), owner.id.clone())
        .await
        .unwrap();

    let mut rx = test_db.change_feed.subscribe();
    assert!(rx.try_recv().is_err());
}
