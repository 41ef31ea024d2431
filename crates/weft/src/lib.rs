//! Maps a graph of linked entity types onto flat relational rows and back.
//!
//! A query on one entity type compiles into a single multi-join SELECT whose
//! column order is fixed by walking the schema graph. Each returned row is
//! then walked the same way to build a tree of [`Node`]s, folding the
//! repeated parent columns that one-to-many joins produce.

pub mod cache;
pub use cache::{MemoryCache, ObjectCache};

pub mod db;
pub use db::{Db, Query, SaveOutcome};

pub mod driver;

mod engine;

pub mod entity;
pub use entity::{Node, NodeState, Slot};

mod materialize;
pub use materialize::RowCursor;

pub use weft_core::{
    bail, err,
    schema::{self, Limit, LimitOverrides, Link, Model, Path, Schema},
    stmt::{Key, Value},
    Error, Result,
};
pub use weft_sql::{Criteria, Param};
