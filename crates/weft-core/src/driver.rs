mod capability;
pub use capability::{Capability, Dialect};

pub mod operation;
pub use operation::{Operation, QuerySql, Transaction};

mod response;
pub use response::{Response, Row, Rows};

use crate::{async_trait, stmt::Value, Result};

use std::{borrow::Cow, fmt::Debug};

#[async_trait]
pub trait Driver: Debug + Send + Sync + 'static {
    /// Connection URL this driver was created from
    fn url(&self) -> Cow<'_, str>;

    /// Describes the SQL dialect spoken by the database.
    fn capability(&self) -> &'static Capability;

    /// Open a new connection.
    async fn connect(&self) -> Result<Box<dyn Connection>>;
}

/// A single database connection. Operations run one at a time, each to
/// completion, in the order they are issued.
#[async_trait]
pub trait Connection: Debug + Send + 'static {
    /// Execute a database operation
    async fn exec(&mut self, op: Operation) -> Result<Response>;

    /// Identifier generated by the most recent insert on this connection
    fn last_insert_id(&self) -> Option<Value>;
}
