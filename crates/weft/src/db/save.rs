use super::Db;
use crate::entity::{Node, NodeState};

use weft_core::{
    schema::{Column, Model},
    stmt::{Key, Value},
    Error, Result,
};
use weft_sql::stmt::{Delete, Insert, Update};

/// What [`Db::save`] or [`Db::replace`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    Inserted,
    Replaced,
    Updated,

    /// Nothing to write; no statement was issued
    Unchanged,
}

impl Db {
    /// Write the node's scalar fields. Links are not saved.
    ///
    /// New nodes are inserted. Modified nodes update only the columns whose
    /// fields were set since loading, matched by the key they were loaded
    /// with.
    pub async fn save(&mut self, node: &mut Node) -> Result<SaveOutcome> {
        match node.state() {
            NodeState::New => self.insert(node, false).await,
            NodeState::Modified => self.update(node).await,
            NodeState::Loaded => Ok(SaveOutcome::Unchanged),
        }
    }

    /// Write every set field with `REPLACE INTO`, whatever the node's state.
    pub async fn replace(&mut self, node: &mut Node) -> Result<SaveOutcome> {
        if !self.engine.capability.replace {
            return Err(Error::unsupported_feature(format!(
                "{:?} has no REPLACE statement",
                self.engine.capability.dialect
            )));
        }

        self.insert(node, true).await
    }

    /// Delete the row the node was loaded from. Returns `false` when no row
    /// matched.
    pub async fn delete(&mut self, node: &mut Node) -> Result<bool> {
        let engine = self.engine.clone();
        let model = engine.schema.model(node.model());
        let key = row_key(node, model)?;

        let stmt = Delete {
            table: model.table_name.clone(),
            key: key_column_names(model),
        };

        let count = self
            .execute_sql(&engine.serialize(&stmt.into()), key.components().to_vec())
            .await?;

        self.invalidate(model, &key);
        node.mark_deleted();

        Ok(count > 0)
    }

    async fn insert(&mut self, node: &mut Node, replace: bool) -> Result<SaveOutcome> {
        let engine = self.engine.clone();
        let model = engine.schema.model(node.model());

        let columns: Vec<&Column> = model
            .columns
            .iter()
            .filter(|column| node.get(&column.field).is_some())
            .collect();

        if columns.is_empty() {
            return Err(Error::bad_parameter(format!(
                "new `{}` has no fields set",
                model.name
            )));
        }

        let stmt = Insert {
            table: model.table_name.clone(),
            columns: columns.iter().map(|column| column.name.clone()).collect(),
            replace,
        };

        let params = field_values(node, &columns);
        self.execute_sql(&engine.serialize(&stmt.into()), params)
            .await?;

        // Back-fill a single generated key
        if let [index] = model.primary_key[..] {
            let field = &model.columns[index].field;
            if node.get(field).map_or(true, Value::is_null) {
                if let Some(id) = self.connection.last_insert_id() {
                    node.load(field, id);
                }
            }
        }

        let key = node.key(model);
        self.invalidate(model, &key);
        node.mark_saved(key);

        Ok(if replace {
            SaveOutcome::Replaced
        } else {
            SaveOutcome::Inserted
        })
    }

    async fn update(&mut self, node: &mut Node) -> Result<SaveOutcome> {
        let engine = self.engine.clone();
        let model = engine.schema.model(node.model());
        let key = row_key(node, model)?;

        let columns: Vec<&Column> = model
            .columns
            .iter()
            .filter(|column| node.is_dirty(&column.field))
            .collect();

        if columns.is_empty() {
            tracing::warn!(
                model = %model.name,
                %key,
                "modified entity has no changed columns; skipping update"
            );
            node.mark_saved(key);
            return Ok(SaveOutcome::Unchanged);
        }

        let stmt = Update {
            table: model.table_name.clone(),
            columns: columns.iter().map(|column| column.name.clone()).collect(),
            key: key_column_names(model),
        };

        let mut params = field_values(node, &columns);
        params.extend(key.components().iter().cloned());

        let count = self
            .execute_sql(&engine.serialize(&stmt.into()), params)
            .await?;

        if count == 0 {
            tracing::warn!(model = %model.name, %key, "update matched no rows");
        }

        let new_key = node.key(model);
        self.invalidate(model, &key);
        self.invalidate(model, &new_key);
        node.mark_saved(new_key);

        Ok(SaveOutcome::Updated)
    }

    fn invalidate(&self, model: &Model, key: &Key) {
        if let Some(cache) = &self.engine.object_cache {
            cache.invalidate(&model.name, key);
        }
    }
}

/// The key addressing the node's stored row.
fn row_key(node: &Node, model: &Model) -> Result<Key> {
    let key = match node.loaded_key() {
        Some(key) => key.clone(),
        None => node.key(model),
    };

    if key.components().iter().any(Value::is_null) {
        return Err(Error::bad_parameter(format!(
            "`{}` key `{key}` has a null component",
            model.name
        )));
    }

    Ok(key)
}

fn key_column_names(model: &Model) -> Vec<String> {
    model
        .key_columns()
        .map(|column| column.name.clone())
        .collect()
}

fn field_values(node: &Node, columns: &[&Column]) -> Vec<Value> {
    columns
        .iter()
        .map(|column| node.get(&column.field).cloned().unwrap_or_default())
        .collect()
}
