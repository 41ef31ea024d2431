//! Process-wide cache of compiled SQL, keyed by the shape of the query.

use std::{
    collections::HashMap,
    sync::{Arc, RwLock},
};

use weft_core::{
    schema::{Limit, LimitOverrides, ModelId, Path},
    Result,
};

/// Everything that changes the SQL text of a query. Parameter values are not
/// part of the key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub model: ModelId,

    /// `None` for key lookups, otherwise the criteria fragments in order
    pub criteria: Option<Vec<String>>,

    pub order_by: Option<String>,

    pub group_by: Option<String>,

    /// Limit overrides, sorted by path
    pub overrides: Vec<(String, Limit)>,

    pub forced: Option<String>,
}

impl CacheKey {
    pub fn new(model: ModelId) -> Self {
        Self {
            model,
            criteria: None,
            order_by: None,
            group_by: None,
            overrides: vec![],
            forced: None,
        }
    }

    pub fn criteria(mut self, shape: Vec<String>) -> Self {
        self.criteria = Some(shape);
        self
    }

    pub fn order_by(mut self, order_by: Option<&str>) -> Self {
        self.order_by = order_by.map(str::to_string);
        self
    }

    pub fn group_by(mut self, group_by: Option<&str>) -> Self {
        self.group_by = group_by.map(str::to_string);
        self
    }

    pub fn overrides(mut self, overrides: Option<&LimitOverrides>) -> Self {
        let mut entries: Vec<_> = overrides
            .into_iter()
            .flat_map(|overrides| overrides.iter())
            .map(|(path, limit)| (path.to_string(), limit))
            .collect();
        entries.sort_by(|a, b| a.0.cmp(&b.0));
        self.overrides = entries;
        self
    }

    pub fn forced(mut self, forced: Option<&Path>) -> Self {
        self.forced = forced.map(|path| path.segments().join("."));
        self
    }
}

/// SQL text ready to execute, with the row width it produces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledQuery {
    pub sql: String,
    pub width: usize,
}

/// Append-only map from query shape to compiled SQL.
///
/// Reads take a shared lock. A miss compiles outside the lock and then
/// inserts if absent, so two racing callers agree on the first entry.
#[derive(Debug)]
pub struct StatementCache {
    enabled: bool,
    statements: RwLock<HashMap<CacheKey, Arc<CompiledQuery>>>,
}

impl StatementCache {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            statements: RwLock::new(HashMap::new()),
        }
    }

    pub fn get_or_compile(
        &self,
        key: CacheKey,
        compile: impl FnOnce() -> Result<CompiledQuery>,
    ) -> Result<Arc<CompiledQuery>> {
        if !self.enabled {
            return compile().map(Arc::new);
        }

        if let Some(hit) = self.read().get(&key) {
            tracing::trace!(model = ?key.model, "statement cache hit");
            return Ok(hit.clone());
        }

        tracing::trace!(model = ?key.model, "statement cache miss");
        let compiled = Arc::new(compile()?);

        let mut statements = self
            .statements
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        Ok(statements.entry(key).or_insert(compiled).clone())
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, HashMap<CacheKey, Arc<CompiledQuery>>> {
        self.statements
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Default for StatementCache {
    fn default() -> Self {
        Self::new(true)
    }
}
