use super::{Column, Link, LinkBuilder, Path};

use indexmap::IndexMap;
use std::{fmt, time::Duration};

/// Schema description of one entity type.
#[derive(Debug, Clone)]
pub struct Model {
    /// Uniquely identifies the model within the schema
    pub id: ModelId,

    /// Logical entity type name. Also the table alias when the model is the
    /// root of a query.
    pub name: String,

    /// Physical table name
    pub table_name: String,

    /// Columns in the order they are selected and consumed
    pub columns: Vec<Column>,

    /// Indices into `columns` forming the primary key, in key order
    pub primary_key: Vec<usize>,

    /// Outgoing links, in traversal order
    pub links: IndexMap<String, Link>,

    pub default_cache_ttl: Option<Duration>,
}

#[derive(Copy, Clone, Eq, PartialEq, Hash)]
pub struct ModelId(pub usize);

impl Model {
    pub fn builder(name: impl Into<String>, table_name: impl Into<String>) -> ModelBuilder {
        ModelBuilder {
            name: name.into(),
            table_name: table_name.into(),
            key: vec![],
            columns: vec![],
            links: vec![],
            default_cache_ttl: None,
        }
    }

    /// The root traversal path of queries on this model
    pub fn path(&self) -> Path {
        Path::root(&self.name)
    }

    pub fn key_columns(&self) -> impl ExactSizeIterator<Item = &Column> + '_ {
        self.primary_key.iter().map(|index| &self.columns[*index])
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|column| column.name == name)
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|column| column.name == name)
    }

    pub fn field_index(&self, field: &str) -> Option<usize> {
        self.columns.iter().position(|column| column.field == field)
    }

    pub fn link(&self, name: &str) -> Option<&Link> {
        self.links.get(name)
    }
}

impl fmt::Debug for ModelId {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(fmt, "ModelId({})", self.0)
    }
}

/// Unresolved model definition handed to [`super::Builder`].
#[derive(Debug, Clone)]
pub struct ModelBuilder {
    pub(super) name: String,
    pub(super) table_name: String,
    pub(super) key: Vec<String>,
    pub(super) columns: Vec<Column>,
    pub(super) links: Vec<(String, LinkBuilder)>,
    pub(super) default_cache_ttl: Option<Duration>,
}

impl ModelBuilder {
    /// Set the key columns. Each must also be declared as a column.
    pub fn key<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.key = columns.into_iter().map(Into::into).collect();
        self
    }

    /// Add a column whose field shares its name
    pub fn column(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        self.columns.push(Column::new(name.clone(), name));
        self
    }

    /// Add a column populating a differently named field
    pub fn column_as(mut self, name: impl Into<String>, field: impl Into<String>) -> Self {
        self.columns.push(Column::new(name, field));
        self
    }

    pub fn columns<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for name in names {
            self = self.column(name);
        }
        self
    }

    pub fn link(mut self, name: impl Into<String>, link: LinkBuilder) -> Self {
        self.links.push((name.into(), link));
        self
    }

    pub fn cache_ttl(mut self, ttl: Duration) -> Self {
        self.default_cache_ttl = Some(ttl);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}
