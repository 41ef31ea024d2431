use crate::{cache::ObjectCache, db::Query, materialize::Materializer};

use weft_core::{
    driver::Capability,
    schema::{LimitOverrides, Model, Path, Traversal},
    Result, Schema,
};
use weft_sql::{CacheKey, CompiledQuery, Serializer, StatementCache, Statement};

use std::sync::Arc;

/// State shared by every handle to one database: the frozen schema, the
/// compiled statement cache and the configured collaborators.
#[derive(Debug)]
pub(crate) struct Engine {
    pub(crate) schema: Arc<Schema>,

    pub(crate) capability: &'static Capability,

    serializer: Serializer,

    statements: StatementCache,

    /// Ceiling on link traversal depth
    max_depth: usize,

    /// Default-allow may re-enter models on the descent
    reentry: bool,

    pub(crate) object_cache: Option<Arc<dyn ObjectCache>>,
}

impl Engine {
    pub(crate) fn new(
        schema: Arc<Schema>,
        capability: &'static Capability,
        max_depth: usize,
        reentry: bool,
        statement_cache: bool,
        object_cache: Option<Arc<dyn ObjectCache>>,
    ) -> Engine {
        Engine {
            schema,
            capability,
            serializer: Serializer::for_dialect(capability.dialect),
            statements: StatementCache::new(statement_cache),
            max_depth,
            reentry,
            object_cache,
        }
    }

    pub(crate) fn traversal<'a>(
        &'a self,
        overrides: Option<&'a LimitOverrides>,
        forced: Option<&'a Path>,
    ) -> Traversal<'a> {
        Traversal::new(&self.schema)
            .overrides(overrides)
            .forced(forced)
            .max_depth(self.max_depth)
            .reentry(self.reentry)
    }

    pub(crate) fn materializer<'a>(
        &'a self,
        overrides: Option<&'a LimitOverrides>,
        forced: Option<&'a Path>,
    ) -> Materializer<'a> {
        Materializer::new(self.traversal(overrides, forced))
    }

    /// Compile a SELECT rooted at `model`, reusing the cached text when a
    /// query of the same shape was compiled before.
    ///
    /// Without `query` the root is matched by primary key.
    pub(crate) fn compile(
        &self,
        model: &Model,
        overrides: Option<&LimitOverrides>,
        forced: Option<&Path>,
        query: Option<&Query>,
    ) -> Result<Arc<CompiledQuery>> {
        let mut key = CacheKey::new(model.id).overrides(overrides).forced(forced);

        if let Some(query) = query {
            key = key
                .criteria(query.criteria.shape())
                .order_by(query.order_by.as_deref())
                .group_by(query.group_by.as_deref());
        }

        self.statements.get_or_compile(key, || {
            let clauses = weft_sql::compile(&self.traversal(overrides, forced), model)?;
            let width = clauses.width();

            let select = match query {
                None => clauses.select_by_key(),
                Some(query) => clauses.select(
                    query.criteria.filters(),
                    query.order_by.clone(),
                    query.group_by.clone(),
                ),
            };

            Ok(CompiledQuery {
                sql: self.serialize(&select.into()),
                width,
            })
        })
    }

    pub(crate) fn serialize(&self, stmt: &Statement) -> String {
        self.serializer.serialize(stmt)
    }
}
