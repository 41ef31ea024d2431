use super::{ForeignKey, ForeignKeyPair, LinkBuilder, ModelBuilder};
use crate::{Error, Result};

use std::collections::HashSet;

pub(super) fn columns(model: &ModelBuilder) -> Result<()> {
    if model.columns.is_empty() {
        return Err(Error::invalid_schema("model declares no columns"));
    }

    let mut names = HashSet::new();
    let mut fields = HashSet::new();

    for column in &model.columns {
        if !names.insert(column.name.as_str()) {
            return Err(Error::invalid_schema(format!(
                "column `{}` is declared more than once",
                column.name
            )));
        }

        if !fields.insert(column.field.as_str()) {
            return Err(Error::invalid_schema(format!(
                "field `{}` is populated by more than one column",
                column.field
            )));
        }
    }

    Ok(())
}

/// Resolves key column names to column indices.
pub(super) fn primary_key(model: &ModelBuilder) -> Result<Vec<usize>> {
    if model.key.is_empty() {
        return Err(Error::invalid_schema("model declares no key columns"));
    }

    let mut indices = Vec::with_capacity(model.key.len());

    for name in &model.key {
        let Some(index) = model.columns.iter().position(|column| column.name == *name) else {
            return Err(Error::invalid_schema(format!(
                "key column `{name}` is not a declared column"
            )));
        };

        if indices.contains(&index) {
            return Err(Error::invalid_schema(format!(
                "key column `{name}` is listed more than once"
            )));
        }

        indices.push(index);
    }

    Ok(indices)
}

/// Resolves a link's column pairs against both sides of the join.
pub(super) fn foreign_key(
    owner: &ModelBuilder,
    name: &str,
    link: &LinkBuilder,
    target: &ModelBuilder,
) -> Result<ForeignKey> {
    // An empty key would join every parent row to every child row.
    if link.foreign_key.is_empty() {
        return Err(Error::invalid_schema(format!(
            "link `{name}` has an empty foreign key"
        )));
    }

    let mut pairs = Vec::with_capacity(link.foreign_key.len());

    for (source, dest) in &link.foreign_key {
        let Some(source_index) = owner.columns.iter().position(|c| c.name == *source) else {
            return Err(Error::invalid_schema(format!(
                "link `{name}` joins on `{source}`, which is not a column of `{}`",
                owner.name
            )));
        };

        let Some(target_index) = target.columns.iter().position(|c| c.name == *dest) else {
            return Err(Error::invalid_schema(format!(
                "link `{name}` joins on `{dest}`, which is not a column of `{}`",
                target.name
            )));
        };

        pairs.push(ForeignKeyPair {
            source: source_index,
            target: target_index,
        });
    }

    Ok(ForeignKey { pairs })
}
