mod exec_log;
pub use exec_log::ExecLog;

pub mod logging_driver;
use logging_driver::LoggingDriver;

pub mod people;

use weft::{db::Builder, Db};
use weft_driver_sqlite::Sqlite;

/// Build a database on a fresh in-memory SQLite connection, run `ddl`, and
/// return it with a log of the operations issued after setup.
pub async fn setup_db(builder: &mut Builder, ddl: &[&str]) -> (Db, ExecLog) {
    let driver = LoggingDriver::new(Box::new(Sqlite::in_memory()));
    let log = ExecLog::new(driver.ops_log_handle());

    let mut db = builder.build(driver).await.unwrap();

    for sql in ddl {
        db.execute_sql(sql, vec![]).await.unwrap();
    }

    log.clear();
    (db, log)
}
