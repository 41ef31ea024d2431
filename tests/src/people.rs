//! People, their employers and contact details.

use weft::{db::Builder, Db, Link, Model};

pub const DDL: &[&str] = &[
    "CREATE TABLE address (address_id INTEGER PRIMARY KEY, city TEXT NOT NULL)",
    "CREATE TABLE company (company_id INTEGER PRIMARY KEY, name TEXT NOT NULL, \
     address_id INTEGER NOT NULL)",
    "CREATE TABLE person (person_id INTEGER PRIMARY KEY, first_name TEXT, last_name TEXT, \
     company_id INTEGER, manager_id INTEGER)",
    "CREATE TABLE contact_detail (person_id INTEGER NOT NULL, type TEXT NOT NULL, \
     value TEXT, PRIMARY KEY (person_id, type))",
];

/// Person -> employer (Company, nullable) -> address (Address)
/// Person -> details (ContactDetail, many)
/// Person -> manager (Person, nullable, one level)
pub fn register(builder: &mut Builder) -> &mut Builder {
    builder
        .register(
            Model::builder("Person", "person")
                .key(["person_id"])
                .columns(["person_id", "first_name", "last_name", "company_id"])
                .column_as("manager_id", "manager")
                .link(
                    "employer",
                    Link::one("Company").foreign_key("company_id").nullable(true),
                )
                .link("details", Link::many("ContactDetail").foreign_key("person_id"))
                .link(
                    "boss",
                    Link::one("Person")
                        .foreign_key_pairs([("manager_id", "person_id")])
                        .nullable(true)
                        .limit("Person_boss", true),
                ),
        )
        .register(
            Model::builder("Company", "company")
                .key(["company_id"])
                .columns(["company_id", "name", "address_id"])
                .link("address", Link::one("Address").foreign_key("address_id")),
        )
        .register(
            Model::builder("Address", "address")
                .key(["address_id"])
                .columns(["address_id", "city"]),
        )
        .register(
            Model::builder("ContactDetail", "contact_detail")
                .key(["person_id", "type"])
                .columns(["person_id", "type", "value"]),
        )
}

/// Tom (9) works at Acme in Leeds and has two contact details. Ann (3) has
/// no employer and reports to Tom.
pub async fn seed(db: &mut Db) {
    for sql in [
        "INSERT INTO address (address_id, city) VALUES (7, 'Leeds')",
        "INSERT INTO company (company_id, name, address_id) VALUES (5, 'Acme', 7)",
        "INSERT INTO person (person_id, first_name, last_name, company_id, manager_id) \
         VALUES (9, 'Tom', 'Gidden', 5, NULL)",
        "INSERT INTO person (person_id, first_name, last_name, company_id, manager_id) \
         VALUES (3, 'Ann', 'Smith', NULL, 9)",
        "INSERT INTO contact_detail (person_id, type, value) VALUES (9, 'Email', 'tom@x')",
        "INSERT INTO contact_detail (person_id, type, value) VALUES (9, 'Tel', '07...')",
    ] {
        db.execute_sql(sql, vec![]).await.unwrap();
    }
}

/// A database with the people schema and seed data, plus its operation log
pub async fn setup() -> (Db, crate::ExecLog) {
    let mut builder = Db::builder();
    register(&mut builder);
    let (mut db, log) = crate::setup_db(&mut builder, DDL).await;
    seed(&mut db).await;
    log.clear();
    (db, log)
}
