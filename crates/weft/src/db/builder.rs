use super::Db;
use crate::{cache::ObjectCache, driver::Connect, engine::Engine, Result};

use weft_core::{
    driver::Driver,
    schema::{self, ModelBuilder, DEFAULT_MAX_DEPTH},
    Schema,
};

use std::sync::Arc;

#[derive(Debug)]
pub struct Builder {
    /// Model definitions, resolved when the database is built
    core: schema::Builder,

    max_depth: usize,

    reentry: bool,

    statement_cache: bool,

    object_cache: Option<Arc<dyn ObjectCache>>,
}

impl Builder {
    pub fn register(&mut self, model: ModelBuilder) -> &mut Self {
        self.core.model(model);
        self
    }

    /// Set the ceiling on link traversal depth. Applies to every query, on
    /// top of any per-link limits.
    pub fn max_depth(&mut self, max_depth: usize) -> &mut Self {
        self.max_depth = max_depth;
        self
    }

    /// Let links with no explicit limit re-enter a model already on the
    /// current descent, e.g. an unlimited self link. Such cycles stop at the
    /// `max_depth` ceiling. Disabled by default.
    pub fn reentry(&mut self, reentry: bool) -> &mut Self {
        self.reentry = reentry;
        self
    }

    /// Enable or disable reuse of compiled SQL across queries of the same
    /// shape. Enabled by default.
    pub fn statement_cache(&mut self, enabled: bool) -> &mut Self {
        self.statement_cache = enabled;
        self
    }

    /// Cache entities loaded by primary key when a time-to-live applies.
    pub fn object_cache(&mut self, cache: impl ObjectCache) -> &mut Self {
        self.object_cache = Some(Arc::new(cache));
        self
    }

    pub fn build_schema(&self) -> Result<Schema> {
        self.core.build()
    }

    pub async fn connect(&mut self, url: &str) -> Result<Db> {
        self.build(Connect::new(url)?).await
    }

    pub async fn build(&mut self, driver: impl Driver) -> Result<Db> {
        let schema = Arc::new(self.build_schema()?);
        let connection = driver.connect().await?;

        tracing::debug!(url = %driver.url(), max_depth = self.max_depth, "database ready");

        let engine = Engine::new(
            schema,
            driver.capability(),
            self.max_depth,
            self.reentry,
            self.statement_cache,
            self.object_cache.clone(),
        );

        Ok(Db {
            engine: Arc::new(engine),
            driver: Arc::new(driver),
            connection,
        })
    }
}

impl Default for Builder {
    fn default() -> Self {
        Self {
            core: schema::Builder::default(),
            max_depth: DEFAULT_MAX_DEPTH,
            reentry: false,
            statement_cache: true,
            object_cache: None,
        }
    }
}
