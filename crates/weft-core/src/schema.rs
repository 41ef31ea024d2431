//! Schema descriptions: one [`Model`] per entity type, linked into a graph.
//!
//! A [`Schema`] is built once through [`Builder`], verified, and then frozen.
//! Compiled queries and row materialization both walk it through a
//! [`Traversal`], which is what keeps their column order in lock step.

mod builder;
pub use builder::Builder;

mod column;
pub use column::Column;

mod limit;
pub use limit::{Limit, LimitOverrides};

mod link;
pub use link::{Cardinality, ForeignKey, ForeignKeyPair, Link, LinkBuilder};

mod model;
pub use model::{Model, ModelBuilder, ModelId};

mod path;
pub use path::Path;

mod traversal;
pub use traversal::{Descent, Traversal, Visit, DEFAULT_MAX_DEPTH};

mod verify;

use crate::{Error, Result};
use std::collections::HashMap;

use indexmap::IndexMap;

/// Registry of every model known to the process.
#[derive(Debug, Default)]
pub struct Schema {
    pub models: IndexMap<ModelId, Model>,

    /// Entity type name to model
    lookup: HashMap<String, ModelId>,
}

impl Schema {
    pub fn builder() -> Builder {
        Builder::default()
    }

    /// Get a model by ID
    pub fn model(&self, id: impl Into<ModelId>) -> &Model {
        self.models.get(&id.into()).expect("invalid model ID")
    }

    pub fn models(&self) -> impl Iterator<Item = &Model> {
        self.models.values()
    }

    /// Resolve an entity type name to its model identifier.
    pub fn model_id(&self, name: &str) -> Result<ModelId> {
        self.lookup
            .get(name)
            .copied()
            .ok_or_else(|| Error::bad_parameter(format!("unknown entity type `{name}`")))
    }

    /// Resolve an entity type name to its model.
    pub fn model_by_name(&self, name: &str) -> Result<&Model> {
        Ok(self.model(self.model_id(name)?))
    }
}
