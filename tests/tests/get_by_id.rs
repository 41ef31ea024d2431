use pretty_assertions::assert_eq;
use std::time::Duration;
use tests::{people, setup_db};
use weft::{Db, Key, MemoryCache, Model, Value};

#[tokio::test]
async fn loads_links_in_one_query() {
    let (mut db, log) = people::setup().await;

    let tom = db.get_by_id("Person", 9, None).await.unwrap().unwrap();

    assert_eq!(1, log.len());
    assert_eq!(Some(&Value::from("Tom")), tom.get("first_name"));

    let employer = tom.one("employer").unwrap();
    assert_eq!(Some(&Value::from("Acme")), employer.get("name"));
    assert_eq!(
        Some(&Value::from("Leeds")),
        employer.one("address").unwrap().get("city")
    );

    let details = tom.many("details").unwrap();
    assert_eq!(
        vec![&Key::from((9, "Email")), &Key::from((9, "Tel"))],
        details.keys().collect::<Vec<_>>()
    );

    // Tom has no manager
    assert!(tom.one("boss").is_none());
}

#[tokio::test]
async fn key_round_trips() {
    let (mut db, _log) = people::setup().await;
    let schema = db.schema().clone();
    let person = schema.model_by_name("Person").unwrap();

    let tom = db.get_by_id("Person", 9, None).await.unwrap().unwrap();
    assert_eq!(Key::from(9), tom.key(person));
    assert_eq!("9", tom.key(person).to_string());
}

#[tokio::test]
async fn null_employer_leaves_no_entry() {
    let (mut db, _log) = people::setup().await;

    let ann = db.get_by_id("Person", 3, None).await.unwrap().unwrap();

    assert!(ann.one("employer").is_none());
    assert!(ann.many("details").unwrap().is_empty());

    // The self link is followed one level
    let boss = ann.one("boss").unwrap();
    assert_eq!(Some(&Value::from("Tom")), boss.get("first_name"));
    assert_eq!(Some(&Value::I64(9)), ann.get("manager"));
    assert_eq!(2, boss.many("details").unwrap().len());
    assert!(!boss.is_fetched("boss"));
}

#[tokio::test]
async fn missing_key_returns_none() {
    let (mut db, _log) = people::setup().await;
    assert!(db.get_by_id("Person", 404, None).await.unwrap().is_none());
}

#[tokio::test]
async fn wrong_key_arity() {
    let (mut db, log) = people::setup().await;

    let err = db.get_by_id("Person", (9, 1), None).await.unwrap_err();
    assert!(err.is_bad_parameter());

    let err = db.get_by_id("Nobody", 9, None).await.unwrap_err();
    assert!(err.is_bad_parameter());

    assert!(log.is_empty());
}

#[tokio::test]
async fn composite_key_lookup() {
    let (mut db, _log) = people::setup().await;

    let detail = db
        .get_by_id("ContactDetail", (9, "Tel"), None)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(Some(&Value::from("07...")), detail.get("value"));
}

#[tokio::test]
async fn statement_reused_across_keys() {
    let (mut db, log) = people::setup().await;

    db.get_by_id("Person", 9, None).await.unwrap();
    db.get_by_id("Person", 3, None).await.unwrap();

    let sql = log.sql();
    assert_eq!(2, sql.len());
    assert_eq!(sql[0], sql[1]);
}

#[tokio::test]
async fn object_cache_serves_repeat_loads() {
    let mut builder = Db::builder();
    builder
        .register(
            Model::builder("Tag", "tag")
                .key(["id"])
                .columns(["id", "name"])
                .cache_ttl(Duration::from_secs(60)),
        )
        .object_cache(MemoryCache::new());

    let (mut db, log) = setup_db(
        &mut builder,
        &[
            "CREATE TABLE tag (id INTEGER PRIMARY KEY, name TEXT)",
            "INSERT INTO tag (id, name) VALUES (1, 'rust')",
        ],
    )
    .await;

    let first = db.get_by_id("Tag", 1, None).await.unwrap();
    let second = db.get_by_id("Tag", 1, None).await.unwrap();

    assert_eq!(first, second);
    assert_eq!(1, log.len());

    // Saving invalidates the cached copy
    let mut tag = second.unwrap();
    tag.set("name", "rustlang");
    db.save(&mut tag).await.unwrap();

    let third = db.get_by_id("Tag", 1, None).await.unwrap().unwrap();
    assert_eq!(Some(&Value::from("rustlang")), third.get("name"));
    assert_eq!(3, log.len());
}

#[tokio::test]
async fn no_cache_without_ttl() {
    let mut builder = Db::builder();
    people::register(&mut builder).object_cache(MemoryCache::new());

    let (mut db, log) = setup_db(&mut builder, people::DDL).await;
    people::seed(&mut db).await;
    log.clear();

    db.get_by_id("Person", 9, None).await.unwrap();
    db.get_by_id("Person", 9, None).await.unwrap();
    assert_eq!(2, log.len());

    db.get_by_id("Person", 9, Some(Duration::from_secs(60)))
        .await
        .unwrap();
    db.get_by_id("Person", 9, Some(Duration::from_secs(60)))
        .await
        .unwrap();
    assert_eq!(3, log.len());
}

#[tokio::test]
async fn reentry_follows_self_link_to_ceiling() {
    let mut builder = Db::builder();
    people::register(&mut builder).reentry(true).max_depth(2);

    let (mut db, _log) = setup_db(&mut builder, people::DDL).await;
    people::seed(&mut db).await;
    db.execute_sql(
        "INSERT INTO person (person_id, first_name, manager_id) VALUES (1, 'Bea', 3)",
        vec![],
    )
    .await
    .unwrap();

    let bea = db.get_by_id("Person", 1, None).await.unwrap().unwrap();

    let ann = bea.one("boss").unwrap();
    assert_eq!(Some(&Value::from("Ann")), ann.get("first_name"));

    let tom = ann.one("boss").unwrap();
    assert_eq!(Some(&Value::from("Tom")), tom.get("first_name"));

    // Depth ceiling reached
    assert!(!tom.is_fetched("employer"));
    assert!(!tom.is_fetched("details"));
}
