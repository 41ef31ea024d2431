use super::{verify, Link, Model, ModelBuilder, ModelId, Schema};
use crate::{Error, Result};

use indexmap::IndexMap;
use std::collections::HashMap;

/// Collects model definitions and resolves them into a frozen [`Schema`].
#[derive(Debug, Default)]
pub struct Builder {
    models: Vec<ModelBuilder>,
}

impl Builder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn model(&mut self, model: ModelBuilder) -> &mut Self {
        self.models.push(model);
        self
    }

    pub fn build(&self) -> Result<Schema> {
        // Reserve identifiers first so links can point forward and back.
        let mut lookup = HashMap::new();
        for (index, model) in self.models.iter().enumerate() {
            if lookup.insert(model.name.clone(), ModelId(index)).is_some() {
                return Err(Error::invalid_schema(format!(
                    "entity type `{}` is registered more than once",
                    model.name
                )));
            }
        }

        let mut models = IndexMap::new();
        for (index, builder) in self.models.iter().enumerate() {
            let model = self
                .build_model(ModelId(index), builder, &lookup)
                .map_err(|err| err.context(crate::err!("model `{}`", builder.name)))?;
            models.insert(model.id, model);
        }

        tracing::debug!(models = models.len(), "schema built");

        Ok(Schema { models, lookup })
    }

    fn build_model(
        &self,
        id: ModelId,
        builder: &ModelBuilder,
        lookup: &HashMap<String, ModelId>,
    ) -> Result<Model> {
        verify::columns(builder)?;
        let primary_key = verify::primary_key(builder)?;

        let mut links = IndexMap::new();
        for (name, link) in &builder.links {
            if builder.columns.iter().any(|column| column.field == *name) {
                return Err(Error::invalid_schema(format!(
                    "link `{name}` shadows a field of the same name"
                )));
            }

            let Some(target) = lookup.get(&link.target).copied() else {
                return Err(Error::invalid_schema(format!(
                    "link `{name}` targets `{}`, which is not registered",
                    link.target
                )));
            };

            let foreign_key = verify::foreign_key(builder, name, link, &self.models[target.0])?;

            let resolved = Link {
                name: name.clone(),
                target,
                foreign_key,
                nullable: link.nullable,
                cardinality: link.cardinality,
                limits: link.limits.clone(),
                depth: link.depth,
            };

            if links.insert(name.clone(), resolved).is_some() {
                return Err(Error::invalid_schema(format!(
                    "link `{name}` is declared more than once"
                )));
            }
        }

        Ok(Model {
            id,
            name: builder.name.clone(),
            table_name: builder.table_name.clone(),
            columns: builder.columns.clone(),
            primary_key,
            links,
            default_cache_ttl: builder.default_cache_ttl,
        })
    }
}
