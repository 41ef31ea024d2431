mod builder;
pub use builder::Builder;

mod query;
pub use query::Query;

mod save;
pub use save::SaveOutcome;

mod transaction;

use crate::engine::Engine;

use weft_core::{
    driver::{Capability, Connection, Driver, Operation, Row},
    stmt::Value,
    Result, Schema,
};

use std::sync::Arc;

/// A database handle owning a single connection.
///
/// Operations run one at a time, each to completion, in the order they are
/// issued.
pub struct Db {
    engine: Arc<Engine>,
    driver: Arc<dyn Driver>,
    connection: Box<dyn Connection>,
}

impl Db {
    pub fn builder() -> Builder {
        Builder::default()
    }

    /// Open a second handle on the same schema and caches, with its own
    /// connection.
    pub async fn connect_another(&self) -> Result<Db> {
        Ok(Db {
            engine: self.engine.clone(),
            driver: self.driver.clone(),
            connection: self.driver.connect().await?,
        })
    }

    pub fn schema(&self) -> &Arc<Schema> {
        &self.engine.schema
    }

    pub fn driver(&self) -> &dyn Driver {
        &*self.driver
    }

    pub fn capability(&self) -> &'static Capability {
        self.engine.capability
    }

    /// Run caller-written SQL that returns rows.
    ///
    /// Placeholders must already be in the driver's dialect.
    pub async fn query_sql(&mut self, sql: &str, params: Vec<Value>) -> Result<Vec<Row>> {
        tracing::debug!(sql, params = params.len(), "query");
        self.connection
            .exec(Operation::query(sql, params))
            .await?
            .rows
            .into_values()
    }

    /// Run caller-written SQL that returns a count of affected rows.
    pub async fn execute_sql(&mut self, sql: &str, params: Vec<Value>) -> Result<u64> {
        tracing::debug!(sql, params = params.len(), "execute");
        self.connection
            .exec(Operation::execute(sql, params))
            .await?
            .rows
            .into_count()
    }
}

impl std::fmt::Debug for Db {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Db")
            .field("engine", &self.engine)
            .field("driver", &self.driver)
            .finish()
    }
}
