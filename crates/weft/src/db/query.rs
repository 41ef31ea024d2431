use super::Db;
use crate::entity::Node;

use weft_core::{
    driver::Row,
    schema::{Limit, LimitOverrides, Path},
    stmt::Key,
    Error, Result,
};
use weft_sql::{Criteria, Param};

use indexmap::IndexMap;
use std::time::Duration;

/// Filters, ordering and limit overrides for a criteria query.
#[derive(Debug, Clone, Default)]
pub struct Query {
    pub(crate) criteria: Criteria,
    pub(crate) overrides: Option<LimitOverrides>,
    pub(crate) order_by: Option<String>,
    pub(crate) group_by: Option<String>,
}

impl Query {
    pub fn new() -> Query {
        Query::default()
    }

    pub fn criteria(mut self, criteria: Criteria) -> Self {
        self.criteria = criteria;
        self
    }

    /// AND a fragment whose `?` placeholders are filled by `param`.
    pub fn filter(mut self, sql: impl Into<String>, param: impl Into<Param>) -> Self {
        self.criteria = self.criteria.and(sql, param);
        self
    }

    /// AND a fragment with no placeholders.
    pub fn raw(mut self, sql: impl Into<String>) -> Self {
        self.criteria = self.criteria.raw(sql);
        self
    }

    pub fn overrides(mut self, overrides: LimitOverrides) -> Self {
        self.overrides = Some(overrides);
        self
    }

    /// Override the limit at one traversal path, e.g. `Person_details`.
    pub fn limit(mut self, path: impl Into<String>, limit: impl Into<Limit>) -> Self {
        self.overrides
            .get_or_insert_with(LimitOverrides::new)
            .set(path, limit);
        self
    }

    pub fn order_by(mut self, order_by: impl Into<String>) -> Self {
        self.order_by = Some(order_by.into());
        self
    }

    pub fn group_by(mut self, group_by: impl Into<String>) -> Self {
        self.group_by = Some(group_by.into());
        self
    }
}

impl From<Criteria> for Query {
    fn from(criteria: Criteria) -> Self {
        Query::new().criteria(criteria)
    }
}

impl Db {
    /// Load one entity and its linked entities by primary key.
    ///
    /// When a time-to-live applies (the argument, else the model's default)
    /// and an object cache is configured, a live cached entity is returned
    /// without querying.
    pub async fn get_by_id(
        &mut self,
        entity_type: &str,
        key: impl Into<Key>,
        cache_ttl: Option<Duration>,
    ) -> Result<Option<Node>> {
        let engine = self.engine.clone();
        let model = engine.schema.model_by_name(entity_type)?;
        let key = key.into();

        if key.len() != model.primary_key.len() {
            return Err(Error::bad_parameter(format!(
                "`{}` has {} key column(s), got {} value(s)",
                model.name,
                model.primary_key.len(),
                key.len()
            )));
        }

        let cache = cache_ttl
            .or(model.default_cache_ttl)
            .and_then(|ttl| Some((engine.object_cache.as_ref()?, ttl)));

        if let Some((cache, _)) = cache {
            if let Some(node) = cache.get(&model.name, &key) {
                tracing::trace!(model = %model.name, %key, "object cache hit");
                return Ok(Some(node));
            }
        }

        let compiled = engine.compile(model, None, None, None)?;
        let rows = self
            .query_sql(&compiled.sql, key.components().to_vec())
            .await?;
        let mut roots = engine.materializer(None, None).load(model, &rows)?;

        if roots.len() > 1 {
            return Err(Error::model_incompatible(format!(
                "key `{key}` matched {} `{}` rows",
                roots.len(),
                model.name
            )));
        }

        let node = roots.pop().map(|(_, node)| node);

        if let (Some((cache, ttl)), Some(node)) = (cache, &node) {
            cache.put(&model.name, key, node.clone(), ttl);
        }

        Ok(node)
    }

    /// Load every entity matching `query`, keyed by primary key in row order.
    pub async fn get_by_criteria(
        &mut self,
        entity_type: &str,
        query: impl Into<Query>,
    ) -> Result<IndexMap<Key, Node>> {
        let query = query.into();
        let engine = self.engine.clone();
        let model = engine.schema.model_by_name(entity_type)?;

        query.criteria.validate()?;

        let overrides = query.overrides.as_ref();
        let compiled = engine.compile(model, overrides, None, Some(&query))?;
        let rows = self
            .query_sql(&compiled.sql, query.criteria.params())
            .await?;

        engine.materializer(overrides, None).load(model, &rows)
    }

    /// Like [`Db::get_by_criteria`], but fails if more than one entity
    /// matches.
    pub async fn get_one_by_criteria(
        &mut self,
        entity_type: &str,
        query: impl Into<Query>,
    ) -> Result<Option<Node>> {
        let mut roots = self.get_by_criteria(entity_type, query).await?;

        if roots.len() > 1 {
            return Err(Error::too_many_records(entity_type, roots.len()));
        }

        Ok(roots.pop().map(|(_, node)| node))
    }

    /// Materialize rows produced by caller-written SQL. The rows must follow
    /// the column order a compiled query with the same overrides would
    /// select.
    pub fn get_from_query(
        &self,
        entity_type: &str,
        rows: &[Row],
        overrides: Option<&LimitOverrides>,
    ) -> Result<IndexMap<Key, Node>> {
        let model = self.engine.schema.model_by_name(entity_type)?;
        self.engine.materializer(overrides, None).load(model, rows)
    }

    /// Fetch a link that was not loaded with `node`.
    ///
    /// `link` names a link on the node's model, or a dotted chain of links
    /// (`employer.address`) whose intermediate one-to-one children are
    /// already attached. Other links on the node are left untouched.
    pub async fn resolve_link(&mut self, node: &mut Node, link: &str) -> Result<()> {
        let engine = self.engine.clone();
        let model = engine.schema.model(node.model());

        let key = match node.loaded_key() {
            Some(key) => key.clone(),
            None => node.key(model),
        };

        if key.is_null() {
            return Err(Error::bad_parameter(format!(
                "cannot resolve `{link}` on a `{}` without a key",
                model.name
            )));
        }

        let forced = link
            .split('.')
            .fold(model.path(), |path: Path, segment| path.child(segment));

        let compiled = engine.compile(model, None, Some(&forced), None)?;
        let rows = self
            .query_sql(&compiled.sql, key.into_components())
            .await?;

        engine
            .materializer(None, Some(&forced))
            .load_into(node, model, &rows)
    }
}
