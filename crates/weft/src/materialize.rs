//! Rebuilds entity trees from flat result rows.
//!
//! Rows are walked with the same [`Traversal`] the query was compiled with,
//! so the links visited here, and their order, match the joins that produced
//! the columns.

mod cursor;
pub use cursor::RowCursor;

mod skip;
use skip::{skip_links, skip_subtree};

use crate::entity::{Node, Slot};

use weft_core::{
    driver::Row,
    schema::{Cardinality, Descent, Link, Model, Traversal, Visit},
    stmt::Key,
    Error, Result,
};

use indexmap::IndexMap;

#[derive(Debug, Clone, Copy)]
pub(crate) struct Materializer<'a> {
    traversal: Traversal<'a>,
}

impl<'a> Materializer<'a> {
    pub(crate) fn new(traversal: Traversal<'a>) -> Self {
        Self { traversal }
    }

    /// Build the trees for a full result set, one per distinct root key.
    ///
    /// Rows repeating a root key only fold their link columns into the tree
    /// already started for that key.
    pub(crate) fn load(&self, model: &Model, rows: &[Row]) -> Result<IndexMap<Key, Node>> {
        let root = self.traversal.root(model);
        let mut roots: IndexMap<Key, Node> = IndexMap::new();

        for row in rows {
            let mut cursor = RowCursor::new(row);

            let mut candidate = Node::loaded(model.id);
            self.consume_columns(&mut candidate, model, &mut cursor)?;
            let key = candidate.key(model);

            if key.is_null() {
                return Err(Error::model_incompatible(format!(
                    "`{}` row has a null primary key",
                    model.name
                )));
            }

            let node = roots.entry(key).or_insert(candidate);
            self.consume_links(node, &root, &mut cursor)?;
            cursor.finish()?;
        }

        tracing::trace!(model = %model.name, rows = rows.len(), roots = roots.len(), "materialized");
        Ok(roots)
    }

    /// Fold rows of a forced-path query into an already loaded root.
    ///
    /// Rows fold into a copy of `node`; the copy replaces it only once every
    /// row has been consumed, so a failing row leaves `node` as it was.
    pub(crate) fn load_into(&self, node: &mut Node, model: &Model, rows: &[Row]) -> Result<()> {
        let root = self.traversal.root(model);
        let mut staged = node.clone();

        for row in rows {
            let mut cursor = RowCursor::new(row);
            self.consume_links(&mut staged, &root, &mut cursor)?;
            cursor.finish()?;
        }

        *node = staged;
        Ok(())
    }

    /// Read the model's columns, in order, into the node's scalar slots.
    pub(crate) fn consume_columns(
        &self,
        node: &mut Node,
        model: &Model,
        cursor: &mut RowCursor<'_>,
    ) -> Result<()> {
        for column in &model.columns {
            node.load(&column.field, cursor.take()?.clone());
        }

        if node.loaded_key().is_none() {
            let key = node.key(model);
            if !key.is_null() {
                node.mark_saved(key);
            }
        }

        Ok(())
    }

    pub(crate) fn consume_links(
        &self,
        node: &mut Node,
        descent: &Descent,
        cursor: &mut RowCursor<'_>,
    ) -> Result<()> {
        let schema = self.traversal.schema;
        let model = schema.model(descent.model);

        for link in model.links.values() {
            match self.traversal.visit(descent, link) {
                Visit::Skip => {}
                Visit::Route(child) => self.route(node, model, link, &child, cursor)?,
                Visit::Enter(child) => self.enter(node, model, link, &child, cursor)?,
            }
        }

        Ok(())
    }

    /// Pass through a link on the way to the forced path. Its columns were
    /// not selected, so the child must already be attached.
    fn route(
        &self,
        node: &mut Node,
        model: &Model,
        link: &Link,
        child: &Descent,
        cursor: &mut RowCursor<'_>,
    ) -> Result<()> {
        match node.slot_mut(&link.name) {
            Some(Slot::One(attached)) => self.consume_links(attached, child, cursor),
            _ => Err(Error::model_incompatible(format!(
                "`{}` must be loaded to resolve `{}`",
                child.path,
                self.traversal
                    .forced_path()
                    .map(|path| path.as_str())
                    .unwrap_or(model.name.as_str())
            ))),
        }
    }

    fn enter(
        &self,
        node: &mut Node,
        model: &Model,
        link: &Link,
        child: &Descent,
        cursor: &mut RowCursor<'_>,
    ) -> Result<()> {
        let target = link.target(self.traversal.schema);

        if link.is_one_to_many() {
            node.attach(&link.name, Slot::Many(IndexMap::new()));
        }

        // A null foreign key guarantees the joined columns are null padded.
        let fk_is_null = link.foreign_key.pairs.iter().any(|pair| {
            node.get(&model.columns[pair.source].field)
                .map_or(true, |value| value.is_null())
        });

        if fk_is_null {
            tracing::trace!(path = %child.path, "null foreign key; skipping");
            return skip_subtree(&self.traversal, child, cursor);
        }

        let mut candidate = Node::loaded(target.id);
        self.consume_columns(&mut candidate, target, cursor)?;
        let key = candidate.key(target);

        if key.is_null() {
            if !link.nullable {
                return Err(Error::model_incompatible(format!(
                    "required link `{}` has no matching `{}` row",
                    child.path, target.name
                )));
            }

            tracing::trace!(path = %child.path, "outer join found no row; skipping");
            return skip_links(&self.traversal, child, cursor);
        }

        let attached = match link.cardinality {
            Cardinality::OneToOne => {
                if let Some(existing) = node.one(&link.name) {
                    let existing = existing.key(target);
                    if existing != key {
                        return Err(Error::model_incompatible(format!(
                            "one-to-one link `{}` matched both `{existing}` and `{key}`",
                            child.path
                        )));
                    }
                }

                match node.attach(&link.name, Slot::One(Box::new(candidate))) {
                    Slot::One(attached) => &mut **attached,
                    _ => return Err(not_a_link(link)),
                }
            }
            Cardinality::OneToMany => match node.attach(&link.name, Slot::Many(IndexMap::new())) {
                Slot::Many(children) => children.entry(key).or_insert(candidate),
                _ => return Err(not_a_link(link)),
            },
        };

        self.consume_links(attached, child, cursor)
    }
}

fn not_a_link(link: &Link) -> Error {
    Error::model_incompatible(format!("`{}` holds a field value, not a link", link.name))
}
