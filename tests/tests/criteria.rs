use pretty_assertions::assert_eq;
use serde_json::json;
use tests::people;
use weft::{Criteria, Key, Query, Value};

#[tokio::test]
async fn filter_and_order() {
    let (mut db, log) = people::setup().await;

    let people = db
        .get_by_criteria(
            "Person",
            Query::new()
                .filter("Person.last_name IN (?, ?)", ["Gidden", "Smith"])
                .order_by("Person.first_name"),
        )
        .await
        .unwrap();

    assert_eq!(
        vec![&Key::from(3), &Key::from(9)],
        people.keys().collect::<Vec<_>>()
    );
    assert_eq!(2, people[&Key::from(9)].many("details").unwrap().len());

    assert!(log
        .last_sql()
        .contains("WHERE (Person.last_name IN (?1, ?2)) ORDER BY Person.first_name"));
}

#[tokio::test]
async fn no_match_is_empty() {
    let (mut db, _log) = people::setup().await;

    let people = db
        .get_by_criteria("Person", Query::new().filter("Person.first_name = ?", "Zed"))
        .await
        .unwrap();
    assert!(people.is_empty());
}

#[tokio::test]
async fn overrides_drop_joins() {
    let (mut db, log) = people::setup().await;

    let tom = db
        .get_one_by_criteria(
            "Person",
            Query::new()
                .filter("Person.person_id = ?", 9)
                .limit("Person_details", false)
                .limit("Person_boss", false),
        )
        .await
        .unwrap()
        .unwrap();

    let sql = log.last_sql();
    assert!(!sql.contains("contact_detail"));
    assert!(!sql.contains("Person_boss"));
    assert!(sql.contains("Person_employer_address"));

    assert!(!tom.is_fetched("details"));
    assert!(tom.is_fetched("employer"));
}

#[tokio::test]
async fn get_one_rejects_many() {
    let (mut db, _log) = people::setup().await;

    let err = db
        .get_one_by_criteria("Person", Query::new().raw("Person.first_name IS NOT NULL"))
        .await
        .unwrap_err();
    assert!(err.is_too_many_records());

    let none = db
        .get_one_by_criteria("Person", Query::new().filter("Person.person_id = ?", 1))
        .await
        .unwrap();
    assert!(none.is_none());
}

#[tokio::test]
async fn placeholder_count_must_match() {
    let (mut db, log) = people::setup().await;

    let err = db
        .get_by_criteria(
            "Person",
            Query::new().filter("Person.person_id BETWEEN ? AND ?", 1),
        )
        .await
        .unwrap_err();
    assert!(err.is_bad_criteria());
    assert!(log.is_empty());
}

#[tokio::test]
async fn criteria_from_json() {
    let (mut db, _log) = people::setup().await;

    let criteria = Criteria::from_json(&json!([
        { "Person.last_name = ?": "Smith" },
        "Person.company_id IS NULL",
    ]))
    .unwrap();

    let ann = db
        .get_one_by_criteria("Person", criteria)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(Some(&Value::from("Ann")), ann.get("first_name"));

    let criteria = Criteria::from_json(&json!({
        "Person.person_id IN (?, ?)": [3, 9],
    }))
    .unwrap();
    let both = db.get_by_criteria("Person", criteria).await.unwrap();
    assert_eq!(2, both.len());
}

#[tokio::test]
async fn same_shape_reuses_statement() {
    let (mut db, log) = people::setup().await;

    for name in ["Tom", "Ann"] {
        let found = db
            .get_by_criteria("Person", Query::new().filter("Person.first_name = ?", name))
            .await
            .unwrap();
        assert_eq!(1, found.len());
    }

    let sql = log.sql();
    assert_eq!(sql[0], sql[1]);
}

#[tokio::test]
async fn query_one_to_many_root() {
    let (mut db, _log) = people::setup().await;

    let details = db
        .get_by_criteria(
            "ContactDetail",
            Query::new()
                .filter("ContactDetail.person_id = ?", 9)
                .order_by("ContactDetail.type DESC"),
        )
        .await
        .unwrap();

    assert_eq!(
        vec![&Key::from((9, "Tel")), &Key::from((9, "Email"))],
        details.keys().collect::<Vec<_>>()
    );
}

#[tokio::test]
async fn rows_from_caller_sql() {
    let (mut db, _log) = people::setup().await;

    let rows = db
        .query_sql(
            "SELECT person_id, first_name, last_name, company_id, manager_id \
             FROM person ORDER BY person_id",
            vec![],
        )
        .await
        .unwrap();

    let overrides = weft::LimitOverrides::new()
        .with("Person_employer", false)
        .with("Person_details", false)
        .with("Person_boss", false);

    let people = db
        .get_from_query("Person", &rows, Some(&overrides))
        .unwrap();
    assert_eq!(
        vec![&Key::from(3), &Key::from(9)],
        people.keys().collect::<Vec<_>>()
    );

    // Rows that do not match the traversal width are rejected
    let err = db.get_from_query("Person", &rows, None).unwrap_err();
    assert!(err.is_model_incompatible());
}

#[tokio::test]
async fn quoted_question_mark_is_literal() {
    let (mut db, log) = people::setup().await;

    let found = db
        .get_by_criteria(
            "Person",
            Query::new().filter("Person.first_name = ? AND Person.last_name <> 'why?'", "Tom"),
        )
        .await
        .unwrap();

    assert_eq!(vec![&Key::from(9)], found.keys().collect::<Vec<_>>());
    assert!(log
        .last_sql()
        .contains("WHERE (Person.first_name = ?1 AND Person.last_name <> 'why?')"));
}
