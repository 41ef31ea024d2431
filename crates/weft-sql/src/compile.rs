//! The clause compiler: turns a model and its link graph into the select
//! list, FROM/JOIN clause and key filter of one SELECT statement.

use crate::stmt::{ColumnRef, Filter, Join, JoinKind, Select, TableRef};

use weft_core::{
    schema::{Descent, Link, Model, Traversal, Visit},
    Error, Result,
};

/// The clauses of a compiled query, before criteria are applied.
#[derive(Debug, Clone, PartialEq)]
pub struct Clauses {
    /// Select list. Its order is the column contract shared with the row
    /// materializer.
    pub columns: Vec<ColumnRef>,

    pub from: TableRef,

    pub joins: Vec<Join>,

    /// `root.key = ?` for every key column of the root, in key order
    pub key_filter: Vec<Filter>,
}

/// Compile the clauses for a query rooted at `model`.
pub fn compile(traversal: &Traversal<'_>, model: &Model) -> Result<Clauses> {
    let root = traversal.root(model);

    let mut compiler = Compiler {
        traversal,
        columns: vec![],
        joins: vec![],
    };

    compiler.compile(&root, traversal.root_selects_columns())?;

    if compiler.columns.is_empty() {
        // Only possible when the forced path does not name a reachable link
        return Err(Error::bad_parameter(format!(
            "path `{}` selects no columns from `{}`",
            traversal
                .forced_path()
                .map(|path| path.as_str())
                .unwrap_or(root.path.as_str()),
            model.name
        )));
    }

    let key_filter = model
        .key_columns()
        .map(|column| Filter::Eq(ColumnRef::new(root.path.as_str(), &column.name)))
        .collect();

    Ok(Clauses {
        columns: compiler.columns,
        from: TableRef::new(&model.table_name, root.path.as_str()),
        joins: compiler.joins,
        key_filter,
    })
}

struct Compiler<'a, 'b> {
    traversal: &'b Traversal<'a>,
    columns: Vec<ColumnRef>,
    joins: Vec<Join>,
}

impl Compiler<'_, '_> {
    fn compile(&mut self, descent: &Descent, select: bool) -> Result<()> {
        let schema = self.traversal.schema;
        let model = schema.model(descent.model);

        if select {
            let alias = descent.path.as_str();
            self.columns.extend(
                model
                    .columns
                    .iter()
                    .map(|column| ColumnRef::new(alias, &column.name)),
            );
        }

        for link in model.links.values() {
            let (child, select) = match self.traversal.visit(descent, link) {
                Visit::Skip => continue,
                Visit::Route(child) => (child, false),
                Visit::Enter(child) => (child, true),
            };

            let target = link.target(schema);
            let on = join_condition(descent, model, &child, target, link)?;

            // The ON clause must follow its own JOIN, ahead of the child's
            // joins.
            self.joins.push(Join {
                kind: if child.null_tainted {
                    JoinKind::LeftOuter
                } else {
                    JoinKind::Inner
                },
                table: TableRef::new(&target.table_name, child.path.as_str()),
                on,
            });

            self.compile(&child, select)?;
        }

        Ok(())
    }
}

fn join_condition(
    parent: &Descent,
    model: &Model,
    child: &Descent,
    target: &Model,
    link: &Link,
) -> Result<Vec<(ColumnRef, ColumnRef)>> {
    if link.foreign_key.pairs.is_empty() {
        return Err(Error::invalid_schema(format!(
            "link `{}.{}` has an empty foreign key",
            model.name, link.name
        )));
    }

    Ok(link
        .foreign_key
        .pairs
        .iter()
        .map(|pair| {
            (
                ColumnRef::new(parent.path.as_str(), &model.columns[pair.source].name),
                ColumnRef::new(child.path.as_str(), &target.columns[pair.target].name),
            )
        })
        .collect())
}

impl Clauses {
    /// Number of columns each result row carries
    pub fn width(&self) -> usize {
        self.columns.len()
    }

    /// A SELECT matching the root by primary key.
    pub fn select_by_key(self) -> Select {
        let filter = self.key_filter.clone();
        self.select(filter, None, None)
    }

    pub fn select(
        self,
        filter: Vec<Filter>,
        order_by: Option<String>,
        group_by: Option<String>,
    ) -> Select {
        Select {
            columns: self.columns,
            from: self.from,
            joins: self.joins,
            filter,
            group_by,
            order_by,
        }
    }
}
