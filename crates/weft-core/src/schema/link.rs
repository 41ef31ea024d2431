use super::{Limit, Model, ModelId, Schema};

use indexmap::IndexMap;

/// A declared relationship from one model to another.
#[derive(Debug, Clone)]
pub struct Link {
    /// Name of the link on the owning model
    pub name: String,

    /// Model the link points to
    pub target: ModelId,

    /// Column pairs joining the owner to the target
    pub foreign_key: ForeignKey,

    /// When `true`, a parent row may have no match and the link is joined
    /// with an outer join.
    pub nullable: bool,

    pub cardinality: Cardinality,

    /// Per-path limits, keyed by traversal path
    pub limits: IndexMap<String, Limit>,

    /// Global depth limit applied at every path
    pub depth: Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cardinality {
    OneToOne,
    OneToMany,
}

/// The join key of a link. Never empty once the schema is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForeignKey {
    pub pairs: Vec<ForeignKeyPair>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ForeignKeyPair {
    /// Column index on the owning model
    pub source: usize,

    /// Column index on the target model
    pub target: usize,
}

impl Link {
    /// Start a one-to-one link definition. Not nullable unless declared.
    pub fn one(target: impl Into<String>) -> LinkBuilder {
        LinkBuilder::new(target.into(), Cardinality::OneToOne, false)
    }

    /// Start a one-to-many link definition. Nullable unless declared
    /// otherwise, so parents without children are still returned.
    pub fn many(target: impl Into<String>) -> LinkBuilder {
        LinkBuilder::new(target.into(), Cardinality::OneToMany, true)
    }

    pub fn target<'a>(&self, schema: &'a Schema) -> &'a Model {
        schema.model(self.target)
    }

    pub fn is_one_to_one(&self) -> bool {
        matches!(self.cardinality, Cardinality::OneToOne)
    }

    pub fn is_one_to_many(&self) -> bool {
        matches!(self.cardinality, Cardinality::OneToMany)
    }
}

/// Unresolved link definition. Target and column names are resolved when the
/// schema is built.
#[derive(Debug, Clone)]
pub struct LinkBuilder {
    pub(super) target: String,
    pub(super) foreign_key: Vec<(String, String)>,
    pub(super) nullable: bool,
    pub(super) cardinality: Cardinality,
    pub(super) limits: IndexMap<String, Limit>,
    pub(super) depth: Option<u32>,
}

impl LinkBuilder {
    fn new(target: String, cardinality: Cardinality, nullable: bool) -> Self {
        Self {
            target,
            foreign_key: vec![],
            nullable,
            cardinality,
            limits: IndexMap::new(),
            depth: None,
        }
    }

    /// Join on a column that has the same name on both sides.
    pub fn foreign_key(mut self, column: impl Into<String>) -> Self {
        let column = column.into();
        self.foreign_key = vec![(column.clone(), column)];
        self
    }

    /// Join on `(owner column, target column)` pairs.
    pub fn foreign_key_pairs<I, A, B>(mut self, pairs: I) -> Self
    where
        I: IntoIterator<Item = (A, B)>,
        A: Into<String>,
        B: Into<String>,
    {
        self.foreign_key = pairs
            .into_iter()
            .map(|(source, target)| (source.into(), target.into()))
            .collect();
        self
    }

    pub fn nullable(mut self, nullable: bool) -> Self {
        self.nullable = nullable;
        self
    }

    pub fn limit(mut self, path: impl Into<String>, limit: impl Into<Limit>) -> Self {
        self.limits.insert(path.into(), limit.into());
        self
    }

    pub fn depth(mut self, depth: u32) -> Self {
        self.depth = Some(depth);
        self
    }
}
