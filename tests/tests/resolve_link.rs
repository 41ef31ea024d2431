use pretty_assertions::assert_eq;
use tests::people;
use weft::{Db, Node, Query, Value};

async fn tom_without(db: &mut Db, path: &str) -> Node {
    db.get_one_by_criteria(
        "Person",
        Query::new()
            .filter("Person.person_id = ?", 9)
            .limit(path, false),
    )
    .await
    .unwrap()
    .unwrap()
}

#[tokio::test]
async fn resolve_deferred_link() {
    let (mut db, log) = people::setup().await;

    let mut tom = tom_without(&mut db, "Person_employer").await;
    assert!(!tom.is_fetched("employer"));
    let details = tom.many("details").unwrap().clone();

    log.clear();
    db.resolve_link(&mut tom, "employer").await.unwrap();

    let employer = tom.one("employer").unwrap();
    assert_eq!(Some(&Value::from("Acme")), employer.get("name"));
    assert_eq!(
        Some(&Value::from("Leeds")),
        employer.one("address").unwrap().get("city")
    );

    // Other links are left as they were
    assert_eq!(&details, tom.many("details").unwrap());

    // Only the resolved subtree is selected
    let sql = log.last_sql();
    assert_eq!(1, log.len());
    assert!(sql.starts_with("SELECT \"Person_employer\".\"company_id\""));
    assert!(!sql.contains("\"Person\".\"first_name\""));
    assert!(!sql.contains("contact_detail"));
    assert!(sql.ends_with("WHERE \"Person\".\"person_id\" = ?1;"));
}

#[tokio::test]
async fn resolve_through_loaded_link() {
    let (mut db, log) = people::setup().await;

    let mut tom = tom_without(&mut db, "Person_employer_address").await;
    assert!(!tom.one("employer").unwrap().is_fetched("address"));

    log.clear();
    db.resolve_link(&mut tom, "employer.address").await.unwrap();

    let address = tom.one("employer").unwrap().one("address").unwrap();
    assert_eq!(Some(&Value::from("Leeds")), address.get("city"));

    // The intermediate is joined but not selected
    let sql = log.last_sql();
    assert!(sql.contains("JOIN \"company\" AS \"Person_employer\""));
    assert!(!sql.contains("\"Person_employer\".\"name\""));
}

#[tokio::test]
async fn resolve_one_to_many() {
    let (mut db, _log) = people::setup().await;

    let mut tom = tom_without(&mut db, "Person_details").await;
    assert!(!tom.is_fetched("details"));

    db.resolve_link(&mut tom, "details").await.unwrap();
    assert_eq!(2, tom.many("details").unwrap().len());
}

#[tokio::test]
async fn resolve_null_foreign_key() {
    let (mut db, _log) = people::setup().await;

    let mut ann = db
        .get_one_by_criteria(
            "Person",
            Query::new()
                .filter("Person.person_id = ?", 3)
                .limit("Person_employer", false),
        )
        .await
        .unwrap()
        .unwrap();

    db.resolve_link(&mut ann, "employer").await.unwrap();
    assert!(ann.one("employer").is_none());

    // Nothing to route through
    let err = db
        .resolve_link(&mut ann, "employer.address")
        .await
        .unwrap_err();
    assert!(err.is_model_incompatible());
}

#[tokio::test]
async fn resolve_unknown_link() {
    let (mut db, log) = people::setup().await;

    let mut tom = db.get_by_id("Person", 9, None).await.unwrap().unwrap();
    log.clear();

    let err = db.resolve_link(&mut tom, "pets").await.unwrap_err();
    assert!(err.is_bad_parameter());
    assert!(log.is_empty());
}

#[tokio::test]
async fn resolve_on_new_node_without_key() {
    let (mut db, _log) = people::setup().await;

    let schema = db.schema().clone();
    let mut node = Node::new(schema.model_by_name("Person").unwrap());

    let err = db.resolve_link(&mut node, "employer").await.unwrap_err();
    assert!(err.is_bad_parameter());
}
