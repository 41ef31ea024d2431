use pretty_assertions::assert_eq;
use tests::people;
use weft::{driver::Transaction, Key, Node, NodeState, SaveOutcome, Value};

#[tokio::test]
async fn insert_back_fills_generated_key() {
    let (mut db, log) = people::setup().await;
    let schema = db.schema().clone();

    let mut bea = Node::new(schema.model_by_name("Person").unwrap());
    bea.set("first_name", "Bea").set("last_name", "Jones");

    assert_eq!(SaveOutcome::Inserted, db.save(&mut bea).await.unwrap());
    assert_eq!(
        "INSERT INTO \"person\" (\"first_name\", \"last_name\") VALUES (?1, ?2);",
        log.last_sql()
    );

    assert_eq!(NodeState::Loaded, bea.state());
    assert_eq!(Some(&Value::I64(10)), bea.get("person_id"));

    let loaded = db.get_by_id("Person", 10, None).await.unwrap().unwrap();
    assert_eq!(Some(&Value::from("Bea")), loaded.get("first_name"));
    assert!(loaded.one("employer").is_none());
}

#[tokio::test]
async fn insert_needs_a_field() {
    let (mut db, log) = people::setup().await;
    let schema = db.schema().clone();

    let mut empty = Node::new(schema.model_by_name("Address").unwrap());
    assert!(db.save(&mut empty).await.unwrap_err().is_bad_parameter());
    assert!(log.is_empty());
}

#[tokio::test]
async fn update_writes_changed_columns() {
    let (mut db, log) = people::setup().await;

    let mut tom = db.get_by_id("Person", 9, None).await.unwrap().unwrap();
    tom.set("last_name", "Smith");
    assert_eq!(NodeState::Modified, tom.state());

    assert_eq!(SaveOutcome::Updated, db.save(&mut tom).await.unwrap());
    assert_eq!(
        "UPDATE \"person\" SET \"last_name\" = ?1 WHERE \"person_id\" = ?2;",
        log.last_sql()
    );
    assert_eq!(NodeState::Loaded, tom.state());

    let tom = db.get_by_id("Person", 9, None).await.unwrap().unwrap();
    assert_eq!(Some(&Value::from("Smith")), tom.get("last_name"));
    assert_eq!(Some(&Value::from("Tom")), tom.get("first_name"));
}

#[tokio::test]
async fn update_matches_loaded_key() {
    let (mut db, log) = people::setup().await;

    let mut tel = db
        .get_by_id("ContactDetail", (9, "Tel"), None)
        .await
        .unwrap()
        .unwrap();
    tel.set("type", "Phone");

    db.save(&mut tel).await.unwrap();
    assert_eq!(
        "UPDATE \"contact_detail\" SET \"type\" = ?1 WHERE \"person_id\" = ?2 AND \"type\" = ?3;",
        log.last_sql()
    );

    assert!(db
        .get_by_id("ContactDetail", (9, "Tel"), None)
        .await
        .unwrap()
        .is_none());

    let tom = db.get_by_id("Person", 9, None).await.unwrap().unwrap();
    assert!(tom
        .many("details")
        .unwrap()
        .contains_key(&Key::from((9, "Phone"))));

    // Saving again addresses the new key
    tel.set("value", "0113");
    db.save(&mut tel).await.unwrap();
    let phone = db
        .get_by_id("ContactDetail", (9, "Phone"), None)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(Some(&Value::from("0113")), phone.get("value"));
}

#[tokio::test]
async fn unchanged_nodes_issue_nothing() {
    let (mut db, log) = people::setup().await;

    let mut tom = db.get_by_id("Person", 9, None).await.unwrap().unwrap();
    log.clear();

    assert_eq!(SaveOutcome::Unchanged, db.save(&mut tom).await.unwrap());

    // Not a column of `person`
    tom.set("nickname", "T");
    assert_eq!(SaveOutcome::Unchanged, db.save(&mut tom).await.unwrap());

    assert!(log.is_empty());
}

#[tokio::test]
async fn replace_overwrites_row() {
    let (mut db, log) = people::setup().await;
    let schema = db.schema().clone();

    let mut tom = Node::new(schema.model_by_name("Person").unwrap());
    tom.set("person_id", 9).set("first_name", "Thomas");

    assert_eq!(SaveOutcome::Replaced, db.replace(&mut tom).await.unwrap());
    assert_eq!(1, log.count_prefix("REPLACE INTO \"person\""));

    let tom = db.get_by_id("Person", 9, None).await.unwrap().unwrap();
    assert_eq!(Some(&Value::from("Thomas")), tom.get("first_name"));
    assert_eq!(Some(&Value::Null), tom.get("last_name"));
    assert!(tom.one("employer").is_none());
}

#[tokio::test]
async fn delete_by_key() {
    let (mut db, _log) = people::setup().await;

    let mut ann = db.get_by_id("Person", 3, None).await.unwrap().unwrap();
    assert!(db.delete(&mut ann).await.unwrap());
    assert_eq!(NodeState::New, ann.state());

    assert!(db.get_by_id("Person", 3, None).await.unwrap().is_none());
    assert!(!db.delete(&mut ann).await.unwrap());

    // A deleted node can be saved back
    assert_eq!(SaveOutcome::Inserted, db.save(&mut ann).await.unwrap());
    assert!(db.get_by_id("Person", 3, None).await.unwrap().is_some());
}

#[tokio::test]
async fn rollback_discards_save() {
    let (mut db, log) = people::setup().await;

    db.begin().await.unwrap();
    let mut tom = db.get_by_id("Person", 9, None).await.unwrap().unwrap();
    tom.set("first_name", "Thomas");
    db.save(&mut tom).await.unwrap();
    db.rollback().await.unwrap();

    assert_eq!(
        vec![Transaction::Start, Transaction::Rollback],
        log.transactions()
    );

    let tom = db.get_by_id("Person", 9, None).await.unwrap().unwrap();
    assert_eq!(Some(&Value::from("Tom")), tom.get("first_name"));
}

#[tokio::test]
async fn commit_keeps_save() {
    let (mut db, _log) = people::setup().await;

    db.begin().await.unwrap();
    let mut ann = db.get_by_id("Person", 3, None).await.unwrap().unwrap();
    ann.set("company_id", 5);
    db.save(&mut ann).await.unwrap();
    db.commit().await.unwrap();

    let ann = db.get_by_id("Person", 3, None).await.unwrap().unwrap();
    assert_eq!(
        Some(&Value::from("Acme")),
        ann.one("employer").unwrap().get("name")
    );
}
