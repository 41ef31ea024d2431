pub use weft_core::driver::{
    Capability, Connection, Dialect, Driver, Operation, Response, Row, Rows, Transaction,
};

mod connect;
pub use connect::Connect;
